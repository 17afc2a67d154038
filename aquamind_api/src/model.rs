use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Feature order the scaler and model were fitted with. Incoming requests
/// are keyed by name; this is the authoritative column order.
pub const FEATURE_COLUMNS: [&str; 4] = ["temperature", "hour", "dayofyear", "roll_moist"];

pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

pub const SCALER_FILE: &str = "aquamind_scaler.json";
pub const MODEL_FILE: &str = "aquamind_model.json";

// ---------- Scaler artifact ----------

/// Fitted z-score scaler: per-column mean and scale.
#[derive(Debug, Deserialize)]
pub struct Scaler {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl Scaler {
    fn validate(&self) -> Result<()> {
        if self.columns != FEATURE_COLUMNS {
            bail!(
                "scaler columns {:?} do not match expected {:?}",
                self.columns,
                FEATURE_COLUMNS
            );
        }
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            bail!(
                "scaler stats length mismatch: mean {}, scale {}, expected {}",
                self.mean.len(),
                self.scale.len(),
                FEATURE_COUNT
            );
        }
        for (col, s) in self.columns.iter().zip(&self.scale) {
            if !s.is_finite() || *s == 0.0 {
                bail!("scaler column {} has unusable scale {}", col, s);
            }
        }
        Ok(())
    }

    pub fn transform(&self, row: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, x) in row.iter().enumerate() {
            scaled[i] = (x - self.mean[i]) / self.scale[i];
        }
        scaled
    }
}

// ---------- Regression artifact ----------

/// Fitted linear regression: per-column coefficient plus intercept.
#[derive(Debug, Deserialize)]
pub struct Regression {
    coef: Vec<f64>,
    intercept: f64,
}

impl Regression {
    fn validate(&self) -> Result<()> {
        if self.coef.len() != FEATURE_COUNT {
            bail!(
                "model coefficient length mismatch: got {}, expected {}",
                self.coef.len(),
                FEATURE_COUNT
            );
        }
        Ok(())
    }

    pub fn predict(&self, scaled: &[f64; FEATURE_COUNT]) -> f64 {
        self.coef
            .iter()
            .zip(scaled)
            .fold(self.intercept, |acc, (c, x)| acc + c * x)
    }
}

// ---------- Loaded pair ----------

/// Both artifacts, loaded once at startup and immutable afterwards.
#[derive(Debug)]
pub struct Artifacts {
    pub scaler: Scaler,
    pub model: Regression,
}

impl Artifacts {
    pub fn load(dir: &Path) -> Result<Self> {
        let scaler: Scaler = read_json(&dir.join(SCALER_FILE))?;
        scaler.validate()?;
        let model: Regression = read_json(&dir.join(MODEL_FILE))?;
        model.validate()?;
        Ok(Self { scaler, model })
    }

    /// Scale-then-predict on one feature row, in `FEATURE_COLUMNS` order.
    pub fn predict(&self, row: &[f64; FEATURE_COUNT]) -> Result<f64> {
        let scaled = self.scaler.transform(row);
        let pred = self.model.predict(&scaled);
        if !pred.is_finite() {
            bail!("non-finite prediction for input {:?}", row);
        }
        Ok(pred)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read artifact {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse artifact {}", path.display()))
}

/// Locate the `models/` directory holding the two artifacts.
///
/// Common run paths: workspace root (`cargo run` from the repo), the crate
/// directory (`cargo test`), or next to an installed executable.
pub fn default_artifact_dir() -> PathBuf {
    let candidates = [
        PathBuf::from("models"),
        PathBuf::from("../models"),
        {
            let mut p = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
            p.pop(); // exe dir
            p.push("models");
            p
        },
    ];

    for c in candidates {
        if c.exists() {
            return c;
        }
    }

    // Fallback to the default relative path; load() will error with context.
    PathBuf::from("models")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../models")
    }

    fn fitted_scaler() -> Scaler {
        Scaler {
            columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            mean: vec![20.0, 12.0, 180.0, 30.0],
            scale: vec![5.0, 6.0, 100.0, 8.0],
        }
    }

    #[test]
    fn transform_centers_and_scales() {
        let scaler = fitted_scaler();

        // The fitted mean maps to the origin.
        let at_mean = scaler.transform(&[20.0, 12.0, 180.0, 30.0]);
        assert_eq!(at_mean, [0.0, 0.0, 0.0, 0.0]);

        let scaled = scaler.transform(&[25.0, 0.0, 280.0, 26.0]);
        assert!((scaled[0] - 1.0).abs() < 1e-12);
        assert!((scaled[1] + 2.0).abs() < 1e-12);
        assert!((scaled[2] - 1.0).abs() < 1e-12);
        assert!((scaled[3] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn predict_is_intercept_plus_dot() {
        let model = Regression {
            coef: vec![0.3, 0.4, 0.5, -0.2],
            intercept: -0.1,
        };

        assert!((model.predict(&[0.0, 0.0, 0.0, 0.0]) + 0.1).abs() < 1e-12);
        assert!((model.predict(&[1.0, 0.0, 0.0, 0.0]) - 0.2).abs() < 1e-12);
        assert!((model.predict(&[0.0, 1.0, 1.0, 1.0]) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn scaler_rejects_wrong_columns() {
        let scaler = Scaler {
            columns: vec!["temperature".into(), "hour".into()],
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 1.0],
        };
        assert!(scaler.validate().is_err());
    }

    #[test]
    fn scaler_rejects_zero_scale() {
        let mut scaler = fitted_scaler();
        scaler.scale[2] = 0.0;
        assert!(scaler.validate().is_err());
    }

    #[test]
    fn model_rejects_short_coefficients() {
        let model = Regression {
            coef: vec![1.0, 2.0],
            intercept: 0.0,
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn shipped_artifacts_load_and_predict() {
        let artifacts = Artifacts::load(&models_dir()).expect("shipped artifacts should load");

        let pred = artifacts
            .predict(&[28.4, 15.0, 145.0, 32.1])
            .expect("canonical row should predict");
        assert!((pred - 29.813988779316702).abs() < 1e-9);
    }

    #[test]
    fn pathological_input_is_rejected_not_emitted() {
        let artifacts = Artifacts::load(&models_dir()).expect("shipped artifacts should load");

        // Opposing extremes drive the dot product past f64 range.
        let err = artifacts.predict(&[-f64::MAX, 0.0, 0.0, f64::MAX]);
        assert!(err.is_err());
    }

    #[test]
    fn missing_artifact_dir_errors_with_path() {
        let err = Artifacts::load(Path::new("/nonexistent/models")).unwrap_err();
        assert!(err.to_string().contains("aquamind_scaler.json"));
    }
}
