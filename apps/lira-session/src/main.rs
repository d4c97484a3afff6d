//! # Lira Session Entry Point
//!
//! Starts a session with the configured rate feed and prints the initial
//! view as JSON. Useful to check config, cache path and feed reachability.
//!
//! ```text
//! $ RUST_LOG=debug lira-session
//! {
//!   "converter": { "old": "", "new": "", "usd": "", "lastUpdated": null },
//!   ...
//!   "rate": { "rate": 14750.0, "origin": "network", "label": "14,750", ... }
//! }
//! ```

use lira_rates::RatesConfig;
use lira_session::{init_tracing, Session};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("Starting Lira Companion session");

    let config = RatesConfig::load_or_default(None);
    let session = Session::from_config(&config)?;
    session.start().await;

    println!("{}", serde_json::to_string_pretty(&session.view().await)?);
    Ok(())
}
