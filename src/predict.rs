use std::fmt;

use ndarray::Array2;

use crate::{
    error::{MlErr, PredictErr},
    form::FormValues,
    model::{check_finite, Regressor},
    schema::FeatureSchema,
    store::ModelStore,
};

/// What a submission ends up showing under the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Remaining useful life, in hours.
    Prediction(f64),
    Error(String),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }
}

impl From<Result<f64, PredictErr>> for Outcome {
    fn from(value: Result<f64, PredictErr>) -> Self {
        match value {
            Ok(rul) => Outcome::Prediction(rul),
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Prediction(rul) => write!(f, "Predicted RUL: {} hours", format_rul(*rul)),
            Outcome::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

/// Formats `value` with two decimals, rounding halves away from zero.
pub fn format_rul(value: f64) -> String {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        format!("{:.2}", scaled.round() / 100.0)
    } else {
        format!("{value:.2}")
    }
}

/// Coerces one submitted string to a number, ignoring surrounding whitespace.
pub fn coerce(raw: &str) -> Result<f64, PredictErr> {
    raw.trim()
        .parse()
        .map_err(|_| PredictErr::NonNumeric(raw.to_string()))
}

/// Builds the single-row model input from the submission, in schema column order.
///
/// # Errors
/// Fails on the first identifier that is missing or does not coerce to a number.
pub fn assemble(schema: &FeatureSchema, form: &FormValues) -> Result<Array2<f64>, PredictErr> {
    let row = schema
        .identifiers()
        .iter()
        .map(|id| {
            let raw = form
                .get(id)
                .ok_or_else(|| PredictErr::MissingField(id.clone()))?;
            coerce(raw)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let width = row.len();
    Array2::from_shape_vec((1, width), row).map_err(|_| {
        PredictErr::Model(MlErr::InputWidth {
            got: width,
            expected: schema.len(),
        })
    })
}

/// Runs the coercion-then-invoke pipeline for one submission.
///
/// # Returns
/// The first value the model predicts for the assembled row.
pub fn predict(
    model: &dyn Regressor,
    schema: &FeatureSchema,
    form: &FormValues,
) -> Result<f64, PredictErr> {
    let x = assemble(schema, form)?;
    check_finite(&x.view(), "X")?;

    let y = model.predict(x.view())?;
    let rul = y.get(0).copied().ok_or(MlErr::EmptyOutput)?;
    if !rul.is_finite() {
        return Err(MlErr::NonFinite { what: "prediction" }.into());
    }
    Ok(rul)
}

/// Same as [`predict`], against the model and schema of `store`.
pub fn run(store: &ModelStore, form: &FormValues) -> Outcome {
    predict(store.model(), store.schema(), form).into()
}
