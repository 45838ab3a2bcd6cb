use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use serde::de::DeserializeOwned;

use crate::{
    error::StoreErr,
    model::{ModelArtifact, Regressor},
    schema::FeatureSchema,
};

pub const MODEL_FILE: &str = "rul_model.json";
pub const FEATURES_FILE: &str = "selected_features.json";
pub const LABELS_FILE: &str = "sensor_labels.json";

/// The model and its feature schema, loaded once before serving and read-only afterwards.
pub struct ModelStore {
    model: Box<dyn Regressor>,
    schema: FeatureSchema,
}

impl ModelStore {
    /// Creates a store from an in-memory model.
    ///
    /// A model whose input width differs from the schema is accepted; every prediction will
    /// then fail with a width error.
    pub fn new<R: Regressor + 'static>(model: R, schema: FeatureSchema) -> Self {
        if model.n_features() != schema.len() {
            warn!(
                "model expects {} features but the schema lists {}",
                model.n_features(),
                schema.len()
            );
        }

        Self {
            model: Box::new(model),
            schema,
        }
    }

    /// Loads the model artifact and the feature schema from `dir`.
    ///
    /// # Arguments
    /// * `dir` - Directory holding `rul_model.json`, `selected_features.json` and
    ///   `sensor_labels.json`.
    ///
    /// # Errors
    /// Returns a `StoreErr` if a file is missing or malformed, the artifact is structurally
    /// invalid, or the schema lists disagree.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, StoreErr> {
        let dir = dir.as_ref();

        let model: ModelArtifact = read_json(&dir.join(MODEL_FILE))?;
        model.validate()?;

        let identifiers: Vec<String> = read_json(&dir.join(FEATURES_FILE))?;
        let labels: Vec<String> = read_json(&dir.join(LABELS_FILE))?;
        let schema = FeatureSchema::new(identifiers, labels)?;

        info!(
            "loaded model with {} features from {}",
            schema.len(),
            dir.display()
        );
        Ok(Self::new(model, schema))
    }

    pub fn model(&self) -> &dyn Regressor {
        self.model.as_ref()
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}

impl fmt::Debug for ModelStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelStore")
            .field("n_features", &self.model.n_features())
            .field("schema", &self.schema)
            .finish()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreErr> {
    let to_path = || PathBuf::from(path);

    let content = fs::read_to_string(path).map_err(|source| StoreErr::Io {
        path: to_path(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| StoreErr::Parse {
        path: to_path(),
        source,
    })
}
