//! Web front end for a pre-trained remaining-useful-life regression model.
//!
//! The [`ModelStore`] is loaded once at startup, then an HTML form collects one reading per
//! feature and `POST /predict` renders either `Predicted RUL: X.XX hours` or `Error: ...`.

pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod predict;
pub mod render;
pub mod schema;
pub mod server;
pub mod store;

pub use config::ServerConfig;
pub use error::{MlErr, PredictErr, StoreErr};
pub use form::FormValues;
pub use predict::Outcome;
pub use schema::FeatureSchema;
pub use store::ModelStore;
