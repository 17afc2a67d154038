use serde::{Deserialize, Serialize};

use crate::model::FEATURE_COUNT;

// ---------- Request/Response types ----------

/// Flat request body: all four features as top-level numeric keys. Key
/// order in the JSON object is irrelevant; unknown keys are ignored.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub temperature: f64,
    pub hour: f64,
    pub dayofyear: f64,
    pub roll_moist: f64,
}

impl PredictRequest {
    /// Feature row in the order the scaler was fitted with.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.temperature, self.hour, self.dayofyear, self.roll_moist]
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_moisture: f64,
}
