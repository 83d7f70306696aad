// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Prediction Adapter
//!
//! Wraps the pre-trained lifestyle score model. The artifact is fit outside this
//! system and shipped as a JSON document; the adapter only checks the shape of
//! the feature vector, invokes the model and returns its single output.
//!
//! ```json
//! {
//!   "model_type": "linear_regression",
//!   "feature_names": ["bmi", "water_liters", "workout_days_per_week", "exercise_code", "meals_per_day"],
//!   "coefficients": [0.1, 1.0, 0.5, 0.0, 0.8],
//!   "intercept": 0.0
//! }
//! ```

use crate::constants::model::{FEATURE_COUNT, FEATURE_NAMES, MODEL_TYPE_LINEAR};
use crate::models::EncodedFeatureVector;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A model that maps a feature vector to one or more predictions
pub trait ScorePredictor: Send + Sync {
    /// Run the model on one feature vector
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError>;

    /// Short human-readable description, used in status output
    fn describe(&self) -> String;
}

/// Prediction errors
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Model artifact '{}' not found", .0.display())]
    ArtifactNotFound(PathBuf),

    #[error("Failed to read model artifact '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Model artifact '{}' is malformed: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported model type '{0}', expected 'linear_regression'")]
    UnsupportedModelType(String),

    #[error("Model features {found:?} do not match expected order {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Expected {expected} features, got {found}")]
    FeatureCount { expected: usize, found: usize },

    #[error("Model returned no prediction")]
    EmptyPrediction,

    #[error("Model returned a non-finite prediction: {0}")]
    NonFinite(f64),
}

/// Linear regression artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModelArtifact {
    /// Parse and validate an artifact from its JSON bytes
    pub fn from_json(path: &Path, bytes: &[u8]) -> Result<Self, PredictionError> {
        let artifact: LinearModelArtifact =
            serde_json::from_slice(bytes).map_err(|source| PredictionError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check model type, feature order and coefficient count
    pub fn validate(&self) -> Result<(), PredictionError> {
        if self.model_type != MODEL_TYPE_LINEAR {
            return Err(PredictionError::UnsupportedModelType(self.model_type.clone()));
        }

        if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(PredictionError::FeatureMismatch {
                expected: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
                found: self.feature_names.clone(),
            });
        }

        if self.coefficients.len() != FEATURE_COUNT {
            return Err(PredictionError::FeatureCount {
                expected: FEATURE_COUNT,
                found: self.coefficients.len(),
            });
        }

        Ok(())
    }
}

impl ScorePredictor for LinearModelArtifact {
    fn predict(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError> {
        if features.len() != self.coefficients.len() {
            return Err(PredictionError::FeatureCount {
                expected: self.coefficients.len(),
                found: features.len(),
            });
        }
        let value = self
            .coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (weight, x)| acc + weight * x);
        Ok(vec![value])
    }

    fn describe(&self) -> String {
        format!("{} ({} features)", self.model_type, self.coefficients.len())
    }
}

/// Adapter between the encoded metrics and the loaded model
pub struct PredictionAdapter {
    predictor: Box<dyn ScorePredictor>,
    fingerprint: Option<String>,
}

impl std::fmt::Debug for PredictionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionAdapter")
            .field("model", &self.predictor.describe())
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

impl PredictionAdapter {
    /// Wrap an already constructed predictor
    pub fn new(predictor: Box<dyn ScorePredictor>) -> Self {
        Self {
            predictor,
            fingerprint: None,
        }
    }

    /// Load the JSON artifact from disk
    pub fn load(path: &Path) -> Result<Self, PredictionError> {
        if !path.exists() {
            return Err(PredictionError::ArtifactNotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path).map_err(|source| PredictionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact = LinearModelArtifact::from_json(path, &bytes)?;
        let fingerprint = sha256_hex(&bytes);

        info!(
            model.path = %path.display(),
            model.kind = %artifact.describe(),
            model.sha256 = %fingerprint,
            "Loaded prediction model"
        );

        Ok(Self {
            predictor: Box::new(artifact),
            fingerprint: Some(fingerprint),
        })
    }

    /// Predict the lifestyle score for encoded metrics
    pub fn predict(&self, features: &EncodedFeatureVector) -> Result<f64, PredictionError> {
        self.predict_raw(features.as_slice())
    }

    /// Predict from an untyped vector, checking it has exactly five features
    pub fn predict_raw(&self, features: &[f64]) -> Result<f64, PredictionError> {
        if features.len() != FEATURE_COUNT {
            return Err(PredictionError::FeatureCount {
                expected: FEATURE_COUNT,
                found: features.len(),
            });
        }

        let outputs = self.predictor.predict(features)?;
        let score = outputs.first().copied().ok_or(PredictionError::EmptyPrediction)?;
        if !score.is_finite() {
            return Err(PredictionError::NonFinite(score));
        }

        debug!(prediction = score, "Model prediction");
        Ok(score)
    }

    pub fn describe(&self) -> String {
        self.predictor.describe()
    }

    /// SHA-256 of the artifact bytes, when loaded from disk
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
