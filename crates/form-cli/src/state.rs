use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use form_adapters::SignupStep;
use form_core::{InMemoryStepStore, StoreSnapshot};
use tracing::debug;

/// Archivo JSON con el snapshot del store en memoria.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store vacío si el archivo todavía no existe.
    pub fn load(&self) -> Result<InMemoryStepStore<SignupStep>> {
        if !self.path.exists() {
            debug!("state file {} not found, starting empty", self.path.display());
            return Ok(InMemoryStepStore::new());
        }
        let raw = fs::read_to_string(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let snapshot: StoreSnapshot =
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", self.path.display()))?;
        let store = InMemoryStepStore::restore(snapshot)?;
        Ok(store)
    }

    pub fn save(&self, store: &InMemoryStepStore<SignupStep>) -> Result<()> {
        let json = serde_json::to_string_pretty(&store.snapshot())?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))?;
        debug!("state saved to {}", self.path.display());
        Ok(())
    }
}
