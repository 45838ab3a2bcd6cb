use std::collections::HashSet;

use crate::error::StoreErr;

/// Ordered feature identifiers paired one-to-one with their display labels.
///
/// The identifier order is the column order fed to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    identifiers: Vec<String>,
    labels: Vec<String>,
}

impl FeatureSchema {
    /// Creates a new `FeatureSchema`.
    ///
    /// # Errors
    /// Returns a `StoreErr` if the lists differ in length, are empty, or an identifier repeats.
    pub fn new(identifiers: Vec<String>, labels: Vec<String>) -> Result<Self, StoreErr> {
        if identifiers.len() != labels.len() {
            return Err(StoreErr::LengthMismatch {
                identifiers: identifiers.len(),
                labels: labels.len(),
            });
        }
        if identifiers.is_empty() {
            return Err(StoreErr::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(identifiers.len());
        if let Some(dup) = identifiers.iter().find(|id| !seen.insert(id.as_str())) {
            return Err(StoreErr::DuplicateFeature(dup.clone()));
        }

        Ok(Self {
            identifiers,
            labels,
        })
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Iterates `(identifier, label)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.identifiers
            .iter()
            .zip(&self.labels)
            .map(|(id, label)| (id.as_str(), label.as_str()))
    }
}
