use crate::store::SnapshotWriter;
use anyhow::Result;

/// Prints the stored snapshot.
pub fn run(store: &SnapshotWriter) -> Result<()> {
    let snapshot = store.read()?;
    if snapshot.rates.is_empty() {
        println!("No rates stored in {}", store.path().display());
        return Ok(());
    }
    println!("{}", snapshot.display_as_table());
    Ok(())
}
