//! Invoke command implementation

use anyhow::Result;
use factoring::prelude::*;

pub fn execute(db: &FactoringDb, function: &str, args: &[String], tx_id: Option<&str>) -> Result<()> {
    let response = match tx_id {
        Some(tx_id) => db.invoke_with_tx_id(function, args, tx_id),
        None => db.invoke(function, args),
    };
    super::report(&response)
}
