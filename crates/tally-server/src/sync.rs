//! Webhook sync sink
//!
//! Optional cloud sync, enabled via environment variables:
//!
//! - `TALLY_SYNC_URL`: Endpoint that receives each new expense as a JSON POST
//! - `TALLY_SYNC_TIMEOUT_SECS`: Per-request timeout (default: 10)
//!
//! `notify` only pushes onto an unbounded channel. A background task drains
//! the channel and delivers events one at a time; failures are logged and
//! the event is dropped.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use tally_core::{ExpenseEvent, SyncConfig, SyncSink};

/// Sync sink that POSTs expense events to a webhook
pub struct WebhookSink {
    tx: UnboundedSender<ExpenseEvent>,
}

impl WebhookSink {
    /// Start the delivery task and return the sink feeding it
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: SyncConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let (tx, rx) = mpsc::unbounded_channel();

        info!(
            "Starting webhook sync: {} (timeout {}s)",
            config.url,
            config.timeout.as_secs()
        );
        tokio::spawn(deliver_events(client, config.url, rx));

        Ok(Self { tx })
    }
}

impl SyncSink for WebhookSink {
    fn notify(&self, event: &ExpenseEvent) {
        if self.tx.send(event.clone()).is_err() {
            warn!("Webhook sync worker has stopped; dropping event");
        }
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

/// Deliver events until every sender is dropped
async fn deliver_events(
    client: reqwest::Client,
    url: String,
    mut rx: UnboundedReceiver<ExpenseEvent>,
) {
    while let Some(event) = rx.recv().await {
        let id = event.expense().id;
        match post_event(&client, &url, &event).await {
            Ok(()) => debug!(id, "Expense synced"),
            Err(e) => warn!(id, "Webhook sync failed: {}", e),
        }
    }

    debug!("Webhook sync worker stopped");
}

async fn post_event(
    client: &reqwest::Client,
    url: &str,
    event: &ExpenseEvent,
) -> reqwest::Result<()> {
    client
        .post(url)
        .json(event)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
