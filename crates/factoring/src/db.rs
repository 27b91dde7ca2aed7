//! Host adapter
//!
//! Bundles a state backend with a [`Router`] and drives the invocation
//! lifecycle: one backend transaction per invocation, committed when the
//! response is a success and aborted otherwise.

use crate::dispatch::Router;
use crate::operation::INIT_FUNCTION;
use crate::response::Response;
use crate::{
    FactoringConfig, KeyLayout, LmdbStateStore, Result, StateBackend, StateTxn, StoreMeta,
};
use std::path::Path;

/// Factoring record store
pub struct FactoringDb<B: StateBackend = LmdbStateStore> {
    backend: B,
    router: Router,
}

impl FactoringDb<LmdbStateStore> {
    /// Open an LMDB-backed store at the given path with default settings
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(FactoringConfig::new(path.as_ref().to_path_buf()))
    }
}

impl<B: StateBackend> FactoringDb<B> {
    /// Open with custom configuration
    pub fn open_with_config(cfg: FactoringConfig) -> Result<Self> {
        Ok(Self::with_backend(B::open(cfg)?))
    }

    /// Wrap an already opened backend
    pub fn with_backend(backend: B) -> Self {
        let router = Router::new(backend.key_layout());
        Self { backend, router }
    }

    /// Get reference to the backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn key_layout(&self) -> KeyLayout {
        self.router.layout()
    }

    pub fn meta(&self) -> Result<StoreMeta> {
        self.backend.meta()
    }

    /// Initialize the store (writes the liveness sentinel)
    pub fn init(&self) -> Response {
        self.init_function(INIT_FUNCTION)
    }

    /// Initialize through an explicit host function name
    ///
    /// Any name other than `init` is rejected and nothing is written.
    pub fn init_function(&self, function: &str) -> Response {
        let mut txn = match self.backend.write_txn() {
            Ok(txn) => txn,
            Err(e) => return Response::error(e.to_string()),
        };
        let response = self.router.init(function, &mut txn);
        finish(txn, response, true)
    }

    /// Invoke an operation under a backend-allocated transaction id
    pub fn invoke(&self, function: &str, args: &[String]) -> Response {
        match self.backend.write_txn() {
            Ok(txn) => self.run(txn, function, args),
            Err(e) => Response::error(e.to_string()),
        }
    }

    /// Invoke an operation under a host-supplied transaction id
    pub fn invoke_with_tx_id(&self, function: &str, args: &[String], tx_id: &str) -> Response {
        match self.backend.write_txn_with_id(tx_id) {
            Ok(txn) => self.run(txn, function, args),
            Err(e) => Response::error(e.to_string()),
        }
    }

    fn run(&self, mut txn: B::Txn<'_>, function: &str, args: &[String]) -> Response {
        let response = self.router.handle(function, args, &mut txn);
        // Queries have nothing to commit; aborting keeps their tx id unused
        let writes = self
            .router
            .resolve(function)
            .map(|op| !op.is_read_only())
            .unwrap_or(false);
        finish(txn, response, writes)
    }

    /// Close the store
    pub fn close(self) -> Result<()> {
        self.backend.close()
    }
}

fn finish<T: StateTxn>(txn: T, response: Response, writes: bool) -> Response {
    if !(writes && response.is_success()) {
        txn.abort();
        return response;
    }

    let tx_id = txn.tx_id().to_string();
    match txn.commit() {
        Ok(info) => {
            tracing::debug!(
                "Committed tx {} ({} keys written)",
                info.tx_id,
                info.state_keys_written
            );
            response
        }
        Err(e) => {
            tracing::error!("Commit of tx {} failed: {}", tx_id, e);
            Response::error(e.to_string())
        }
    }
}
