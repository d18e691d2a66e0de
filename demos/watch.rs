//! End-to-end demo: generate a disposable address and watch its inbox.
//!
//! Generates an address (random local part unless you edit the builder),
//! then polls the inbox every 5 seconds for 2 minutes and prints whatever
//! arrived as JSON. Set `RUST_LOG=debug` to see per-cycle logging.

use fakemailgen_client::{Client, Inbox};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = Client::builder()
        .refresh_interval(Duration::from_millis(5000))
        .build()?;

    let email = client.generate_email().await?;
    println!("Send an email to: {email}");
    println!("Watching for 2 minutes...");

    let mut inbox = Inbox::new();
    let cancel = CancellationToken::new();

    let stop = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(120)).await;
        stop.cancel();
    });

    client.watch(&email, &mut inbox, cancel).await?;

    if inbox.is_empty() {
        println!("No messages received.");
    } else {
        println!("Received {} message(s):", inbox.len());
        println!("{}", serde_json::to_string_pretty(inbox.messages())?);
    }

    Ok(())
}
