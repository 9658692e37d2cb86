//! Background data refresh system
//!
//! Provides periodic re-fetching of places in the background using tokio
//! channels to communicate updates to the main application. Each fetch goes
//! through the places service, so results inside the cache TTL are served
//! without touching the network.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::data::Places;
use crate::network::{NetworkError, PlacesServing};

/// Messages sent from background refresh to main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// Places were fetched
    PlacesUpdated(Places),
    /// A fetch failed
    RefreshError(NetworkError),
    /// Refresh started
    RefreshStarted,
    /// Refresh completed
    RefreshCompleted,
}

/// Configuration for the refresh interval
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between fetches
    pub interval: Duration,
    /// Whether auto-refresh is enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            enabled: true,
        }
    }
}

/// Handle for controlling the background refresh system
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Creates a new RefreshHandle and spawns the background refresh task
    ///
    /// The first fetch happens one interval after spawning; the caller is
    /// expected to have done the initial load itself.
    ///
    /// # Arguments
    /// * `places_service` - Service used for each fetch
    /// * `config` - Configuration for the refresh interval
    ///
    /// # Returns
    /// A RefreshHandle that receives updates via the `receiver` channel
    pub fn spawn(places_service: Arc<dyn PlacesServing>, config: RefreshConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        if config.enabled {
            let interval_duration = config.interval;
            let tx = msg_tx;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(interval_duration);
                // Skip the first tick (immediate)
                interval.tick().await;

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            if tx.send(RefreshMessage::RefreshStarted).await.is_err() {
                                break;
                            }

                            let message = match places_service.get_places().await {
                                Ok(places) => RefreshMessage::PlacesUpdated(places),
                                Err(error) => RefreshMessage::RefreshError(error),
                            };
                            let _ = tx.send(message).await;
                            let _ = tx.send(RefreshMessage::RefreshCompleted).await;
                        }
                        _ = shutdown_rx.recv() => {
                            tracing::debug!("Background refresh stopped");
                            break;
                        }
                    }
                }
            });
        }

        Self {
            receiver: msg_rx,
            shutdown_tx,
        }
    }

    /// Waits for the next refresh message
    ///
    /// Returns `None` once the background task has stopped.
    pub async fn recv(&mut self) -> Option<RefreshMessage> {
        self.receiver.recv().await
    }

    /// Shuts down the background refresh task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}
