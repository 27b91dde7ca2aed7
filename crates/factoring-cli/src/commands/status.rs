//! Status command implementation

use anyhow::{Context, Result};
use factoring::prelude::*;

pub fn execute(db: &FactoringDb) -> Result<()> {
    let meta = db.meta().context("Failed to get store metadata")?;

    println!("\nStore Status");
    println!("{}", "=".repeat(60));
    println!("Schema Version: {}", meta.schema_version);
    println!("Key Layout: {}", meta.key_layout.as_str());
    println!("Next Tx Sequence: {}", meta.next_tx_seq);
    println!("Created: {}", meta.created_at);
    println!("Updated: {}", meta.updated_at);

    let probe = db.invoke("KeepaliveQuery", &[]);
    if probe.is_success() {
        println!("\n✓ Keep-alive sentinel present");
    } else {
        println!("\n⚠️  {}", probe.message);
        println!("Run 'factoring init' to write it");
    }

    Ok(())
}
