use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The model module's result type.
pub type Result<T> = std::result::Result<T, MlErr>;

/// Failures raised by a regression model, either while validating an artifact or while
/// predicting.
#[derive(Debug)]
pub enum MlErr {
    /// The input matrix does not have the width the model was fitted on.
    InputWidth { got: usize, expected: usize },
    /// The input or the output holds NaN or infinity.
    NonFinite { what: &'static str },
    /// The model produced no value for the given input.
    EmptyOutput,
    /// A forest artifact with no trees.
    EmptyForest,
    InvalidTree { tree: usize, reason: String },
    /// Walking a tree reached a node that does not exist or has no usable split.
    Traversal { node: usize },
    /// The prediction could not be carried to completion (e.g. the blocking pool went away).
    Interrupted(String),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::InputWidth { got, expected } => write!(
                f,
                "input has {got} features, but the model is expecting {expected} features as input"
            ),
            MlErr::NonFinite { what } => {
                write!(f, "{what} contains NaN, infinity or a value too large")
            }
            MlErr::EmptyOutput => write!(f, "the model produced no prediction"),
            MlErr::EmptyForest => write!(f, "the forest has no trees"),
            MlErr::InvalidTree { tree, reason } => write!(f, "tree {tree} is invalid: {reason}"),
            MlErr::Traversal { node } => write!(f, "tree traversal got stuck at node {node}"),
            MlErr::Interrupted(msg) => write!(f, "prediction interrupted: {msg}"),
        }
    }
}

impl Error for MlErr {}

/// Startup failures while loading the model artifact and the feature schema.
///
/// Every variant is fatal: the server never binds if the store cannot be built.
#[derive(Debug)]
pub enum StoreErr {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Identifiers and labels differ in length.
    LengthMismatch { identifiers: usize, labels: usize },
    DuplicateFeature(String),
    EmptySchema,
    /// The model artifact parsed but is structurally broken.
    Artifact(MlErr),
}

impl Display for StoreErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreErr::Io { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            StoreErr::Parse { path, source } => {
                write!(f, "invalid JSON in '{}': {source}", path.display())
            }
            StoreErr::LengthMismatch { identifiers, labels } => write!(
                f,
                "feature schema has {identifiers} identifiers but {labels} labels"
            ),
            StoreErr::DuplicateFeature(id) => {
                write!(f, "feature identifier '{id}' appears more than once")
            }
            StoreErr::EmptySchema => write!(f, "feature schema is empty"),
            StoreErr::Artifact(e) => write!(f, "invalid model artifact: {e}"),
        }
    }
}

impl Error for StoreErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreErr::Io { source, .. } => Some(source),
            StoreErr::Parse { source, .. } => Some(source),
            StoreErr::Artifact(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for StoreErr {
    fn from(value: MlErr) -> Self {
        Self::Artifact(value)
    }
}

/// Request-time failures of the prediction pipeline.
///
/// They all render the same way, as an inline `Error: ...` message.
#[derive(Debug)]
pub enum PredictErr {
    MissingField(String),
    /// Holds the raw submitted string that failed to parse.
    NonNumeric(String),
    Model(MlErr),
}

impl Display for PredictErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictErr::MissingField(id) => write!(f, "missing value for feature '{id}'"),
            PredictErr::NonNumeric(raw) => {
                write!(f, "could not convert string to float: '{raw}'")
            }
            PredictErr::Model(e) => write!(f, "{e}"),
        }
    }
}

impl Error for PredictErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PredictErr::Model(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlErr> for PredictErr {
    fn from(value: MlErr) -> Self {
        Self::Model(value)
    }
}

/// Invalid environment configuration.
#[derive(Debug)]
pub enum ConfigErr {
    Invalid { var: &'static str, value: String },
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::Invalid { var, value } => write!(f, "invalid value for {var}: '{value}'"),
        }
    }
}

impl Error for ConfigErr {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_errors_carry_the_offending_input() {
        let missing = PredictErr::MissingField("s2".into());
        assert_eq!(missing.to_string(), "missing value for feature 's2'");

        let bad = PredictErr::NonNumeric("abc".into());
        assert_eq!(bad.to_string(), "could not convert string to float: 'abc'");
    }

    #[test]
    fn model_errors_display_through_predict_err() {
        let err = PredictErr::from(MlErr::InputWidth {
            got: 2,
            expected: 3,
        });
        assert_eq!(
            err.to_string(),
            "input has 2 features, but the model is expecting 3 features as input"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn store_io_error_names_the_path() {
        let err = StoreErr::Io {
            path: PathBuf::from("model/sensor_labels.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("model/sensor_labels.json"));
        assert!(msg.contains("no such file"));
    }
}
