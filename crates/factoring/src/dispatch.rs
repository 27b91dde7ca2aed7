//! Operation routing
//!
//! The [`Router`] maps wire names to operations and operations to handlers
//! once, at construction. [`Router::handle`] is the single entry point for
//! an invocation: it never fails, every error becomes a [`Response`].

use crate::index::{IndexResolver, Lookup};
use crate::liveness;
use crate::operation::{Operation, INIT_FUNCTION};
use crate::record_store::RecordStore;
use crate::response::Response;
use crate::{observe, FactoringError, KeyLayout, Result, StateTxn};
use std::collections::HashMap;
use std::time::Instant;

type Handler = fn(&mut IndexResolver<'_>, &[String]) -> Result<Response>;

const MISSING_ARGUMENT: &str = "the invoke args not exist or arg[0] is empty";

struct Route {
    operation: Operation,
    handler: Handler,
}

/// Routes invocations to their handlers
pub struct Router {
    routes: HashMap<&'static str, Route>,
    layout: KeyLayout,
}

impl Router {
    pub fn new(layout: KeyLayout) -> Self {
        let routes = Operation::ALL
            .into_iter()
            .map(|operation| {
                let handler: Handler = match operation {
                    Operation::SaveData => save_data,
                    Operation::KeepaliveQuery => keepalive_query,
                    Operation::QueryDataByFabricTxId => query_by_tx_id,
                    Operation::QueryDataByBusinessNo => query_by_business_no,
                };
                (operation.as_str(), Route { operation, handler })
            })
            .collect();

        Self { routes, layout }
    }

    pub fn layout(&self) -> KeyLayout {
        self.layout
    }

    /// Resolve a wire name to its operation
    pub fn resolve(&self, function: &str) -> Result<Operation> {
        self.routes
            .get(function)
            .map(|route| route.operation)
            .ok_or_else(|| FactoringError::UnknownOperation(function.to_string()))
    }

    /// Initialize the store: only the `init` function is accepted
    pub fn init(&self, function: &str, txn: &mut dyn StateTxn) -> Response {
        tracing::info!("Init factoring store");
        if function != INIT_FUNCTION {
            return Response::error(FactoringError::UnsupportedInit(function.to_string()).to_string());
        }

        let mut store = RecordStore::new(txn);
        match liveness::seed(&mut store) {
            Ok(()) => Response::success(),
            Err(e) => {
                tracing::error!("Init failed: {}", e);
                Response::error(e.to_string())
            }
        }
    }

    /// Handle one invocation within `txn`
    pub fn handle(&self, function: &str, args: &[String], txn: &mut dyn StateTxn) -> Response {
        tracing::debug!("Invoke function {} with args {:?}", function, args);
        let started = Instant::now();

        let route = match self.routes.get(function) {
            Some(route) => route,
            None => {
                let err = FactoringError::UnknownOperation(function.to_string());
                tracing::debug!("{}", err);
                return Response::error(err.to_string());
            }
        };

        let response = match self.dispatch(route, args, txn) {
            Ok(response) => response,
            Err(e) => {
                if e.is_caller_error() {
                    tracing::debug!("{} rejected: {}", route.operation, e);
                } else {
                    tracing::error!("{} failed: {}", route.operation, e);
                }
                Response::error(e.to_string())
            }
        };

        observe::record_invocation(
            route.operation.as_str(),
            started.elapsed(),
            response.is_success(),
        );
        response
    }

    fn dispatch(&self, route: &Route, args: &[String], txn: &mut dyn StateTxn) -> Result<Response> {
        if route.operation.requires_argument() && args.first().map_or(true, |arg| arg.is_empty()) {
            return Err(FactoringError::InvalidArguments(MISSING_ARGUMENT.into()));
        }

        let mut resolver = IndexResolver::new(txn, self.layout);
        (route.handler)(&mut resolver, args)
    }
}

fn save_data(resolver: &mut IndexResolver<'_>, args: &[String]) -> Result<Response> {
    let tx_id = resolver.current_tx_id().to_string();
    let primary_key = resolver.write_record(args[0].as_bytes(), &tx_id)?;
    Ok(Response::success_with_payload(primary_key.into_bytes()))
}

fn keepalive_query(resolver: &mut IndexResolver<'_>, _args: &[String]) -> Result<Response> {
    liveness::probe(resolver.store())?;
    Ok(Response::success_with_payload(liveness::REACHED.to_vec()))
}

fn query_by_tx_id(resolver: &mut IndexResolver<'_>, args: &[String]) -> Result<Response> {
    let tx_id = &args[0];
    Ok(match resolver.read_by_primary_key(tx_id)? {
        Lookup::Found(payload) => Response::success_with_payload(payload),
        Lookup::NotFound => Response::not_found(format!("no record for tx id {}", tx_id)),
    })
}

fn query_by_business_no(resolver: &mut IndexResolver<'_>, args: &[String]) -> Result<Response> {
    let business_no = &args[0];
    Ok(match resolver.read_by_business_id(business_no)? {
        Lookup::Found(payload) => Response::success_with_payload(payload),
        Lookup::NotFound => {
            Response::not_found(format!("no record indexed under businessNo {}", business_no))
        }
    })
}
