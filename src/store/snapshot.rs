use crate::core::Snapshot;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and writes the snapshot file. Every write replaces the whole file.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json =
            serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write snapshot to {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            rates = snapshot.rates.len(),
            "Snapshot written"
        );
        Ok(())
    }

    pub fn read(&self) -> Result<Snapshot> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Currency, RateRecord};
    use tempfile::TempDir;

    fn snapshot(rates: Vec<RateRecord>) -> Snapshot {
        Snapshot::new(
            "El Toque",
            "https://eltoque.com/tasas-de-cambio-de-moneda-en-cuba-hoy",
            rates,
        )
    }

    #[test]
    fn test_write_is_pretty_and_unescaped() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let writer = SnapshotWriter::new(temp_dir.path().join("tasas_compra.json"));

        let mut snap = snapshot(vec![RateRecord::new(Currency::Usd, "320")]);
        snap.source = "El Toque · Cuba".to_string();
        writer.write(&snap)?;

        let content = fs::read_to_string(writer.path())?;
        assert!(content.contains("\n  \"fuente\": \"El Toque · Cuba\""));
        assert!(content.contains("\"tasas_compra\": ["));
        assert!(content.contains("\"moneda\": \"USD\""));
        assert!(content.contains("\"compra\": \"320\""));
        Ok(())
    }

    #[test]
    fn test_write_overwrites_previous_snapshot() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let writer = SnapshotWriter::new(temp_dir.path().join("tasas_compra.json"));

        writer.write(&snapshot(vec![
            RateRecord::new(Currency::Usd, "320"),
            RateRecord::new(Currency::Eur, "335"),
        ]))?;
        writer.write(&snapshot(vec![RateRecord::new(Currency::Mlc, "270")]))?;

        let stored = writer.read()?;
        assert_eq!(stored.rates, vec![RateRecord::new(Currency::Mlc, "270")]);
        Ok(())
    }

    #[test]
    fn test_write_creates_missing_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let writer = SnapshotWriter::new(temp_dir.path().join("nested/dir/tasas.json"));

        writer.write(&snapshot(vec![]))?;
        assert!(writer.path().exists());
        Ok(())
    }

    #[test]
    fn test_read_missing_snapshot_fails() {
        let writer = SnapshotWriter::new("/definitely/not/here/tasas.json");
        let result = writer.read();
        assert!(result.unwrap_err().to_string().contains("Failed to read snapshot"));
    }
}
