use crate::core::{BranchSelection, Result, SelectionStore, Storage};

/// Keeps the branch selection as a JSON array in one file of a [`Storage`].
#[derive(Debug, Clone)]
pub struct StorageSelectionStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> StorageSelectionStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: Storage> SelectionStore for StorageSelectionStore<S> {
    async fn load(&self) -> Result<BranchSelection> {
        if !self.storage.exists(&self.key).await {
            tracing::debug!("No saved branch selection at {}, starting empty", self.key);
            return Ok(BranchSelection::default());
        }

        let data = self.storage.read_file(&self.key).await?;
        let selection = BranchSelection::from_json(&data)?;
        tracing::debug!("Loaded {} saved branches from {}", selection.len(), self.key);
        Ok(selection)
    }

    async fn save(&self, selection: &BranchSelection) -> Result<()> {
        let data = selection.to_json()?;
        self.storage.write_file(&self.key, &data).await?;
        tracing::debug!("Saved {} branches to {}", selection.len(), self.key);
        Ok(())
    }
}
