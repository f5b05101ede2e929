use crate::error::PersistenceError;
use crate::mapping::{Mapping, validate_mapping};
use crate::store::KeyValueStore;
use tracing::{debug, info, warn};

/// Storage key for the mapping saved under `id`.
pub fn mapping_key(id: &str) -> String {
    format!("mapping:{}", id)
}

/// Saves and loads mappings through an injected store.
#[derive(Debug, Clone)]
pub struct MappingRepository<S> {
    store: S,
}

impl<S: KeyValueStore> MappingRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist `mapping` under `id`. Invalid mappings are rejected before
    /// anything is written.
    pub async fn save_mapping(&self, id: &str, mapping: &Mapping) -> Result<(), PersistenceError> {
        if !validate_mapping(mapping) {
            warn!(id, "Refusing to save invalid mapping");
            return Err(PersistenceError::InvalidMapping);
        }

        let json = serde_json::to_string(mapping)?;
        self.store.set(&mapping_key(id), &json).await?;
        info!(id, entries = mapping.len(), "Saved mapping");
        Ok(())
    }

    /// Load the mapping saved under `id`.
    ///
    /// Absent, unparsable and invalid records all give `Ok(None)`; only
    /// storage failures are errors.
    pub async fn load_mapping(&self, id: &str) -> Result<Option<Mapping>, PersistenceError> {
        let Some(raw) = self.store.get(&mapping_key(id)).await? else {
            debug!(id, "No stored mapping");
            return Ok(None);
        };

        match serde_json::from_str::<Mapping>(&raw) {
            Ok(mapping) if validate_mapping(&mapping) => Ok(Some(mapping)),
            Ok(_) => {
                debug!(id, "Stored mapping failed validation");
                Ok(None)
            }
            Err(e) => {
                debug!(id, error = %e, "Stored mapping is not a flat string map");
                Ok(None)
            }
        }
    }
}
