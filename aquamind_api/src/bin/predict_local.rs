//! Loads the scaler and model directly and prints one prediction,
//! bypassing the HTTP layer entirely. Manual diagnostic only.

use aquamind_api::model::{default_artifact_dir, Artifacts};

fn main() -> anyhow::Result<()> {
    let artifacts = Artifacts::load(&default_artifact_dir())?;

    // Same example row the HTTP probe sends.
    let row = [28.4, 15.0, 145.0, 32.1];
    let pred = artifacts.predict(&row)?;

    println!("Predicted soil moisture: {pred:.2}%");
    Ok(())
}
