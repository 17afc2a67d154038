//! Sends one fixed payload to the running prediction service and prints
//! the response. Manual diagnostic only: no retry, no assertions. An
//! unreachable service propagates as an error and terminates the process.

use serde_json::{json, Value};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = "http://localhost:5000/predict";

    let payload = json!({
        "temperature": 28.4,
        "hour": 15,
        "dayofyear": 145,
        "roll_moist": 32.1
    });

    let resp = reqwest::Client::new().post(url).json(&payload).send().await?;

    println!("status: {}", resp.status());
    let body: Value = resp.json().await?;
    println!("response: {body}");
    Ok(())
}
