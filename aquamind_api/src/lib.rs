//! Soil moisture prediction service.
//!
//! Loads a fitted feature scaler and a fitted regression model once at
//! startup and serves a single `POST /predict` endpoint that maps a JSON
//! request (temperature, hour, dayofyear, roll_moist) to a predicted
//! moisture percentage.

pub mod model;
pub mod routes;
pub mod types;
