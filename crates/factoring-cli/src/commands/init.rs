//! Init command implementation

use anyhow::Result;
use factoring::prelude::*;

pub fn execute(db: &FactoringDb, function: &str) -> Result<()> {
    tracing::info!("Initializing store via {:?}", function);
    let response = db.init_function(function);
    super::report(&response)?;
    println!("✓ Store initialized");
    Ok(())
}
