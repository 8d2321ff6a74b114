//! Analytics event publishing.
//!
//! Publishing is fire-and-forget: [`ChannelPublisher::publish`] enqueues the
//! event and returns immediately. A background worker delivers events to the
//! configured collector; failures are logged and the event is dropped.
//!
//! The queue is bounded and every delivery has a timeout, so a stalled
//! collector costs at most `queue_capacity` events.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::instrument;
use uncmfrt_core::{CartSnapshot, ShopId};
use uuid::Uuid;

use crate::config::AnalyticsConfig;

/// Event published when the cart panel is opened from the header.
pub const CART_VIEWED: &str = "cart_viewed";

/// Shop identification sent with every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopAnalytics {
    pub shop_id: ShopId,
    pub accepted_language: String,
    pub currency: String,
}

/// Payload of [`CART_VIEWED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartViewPayload {
    /// Cart held at the time of the click; `None` if not resolved yet.
    pub cart: Option<CartSnapshot>,
    pub prev_cart: Option<CartSnapshot>,
    pub shop: ShopAnalytics,
    /// Page the cart was opened from.
    pub url: String,
}

/// Payloads the storefront publishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalyticsPayload {
    CartViewed(CartViewPayload),
}

/// Envelope delivered to the collector.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: Uuid,
    pub name: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub payload: AnalyticsPayload,
}

impl AnalyticsEvent {
    #[must_use]
    pub fn new(name: &'static str, payload: AnalyticsPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            occurred_at: Utc::now(),
            payload,
        }
    }
}

/// Sink for analytics events. Must not block or fail the caller.
pub trait AnalyticsPublisher: Send + Sync {
    fn publish(&self, name: &'static str, payload: AnalyticsPayload);
}

/// Publisher backed by a background delivery task.
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    tx: mpsc::Sender<AnalyticsEvent>,
}

impl ChannelPublisher {
    /// Start the delivery worker.
    ///
    /// Without an endpoint the worker only logs events at debug level. The
    /// worker stops once every publisher clone has been dropped.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for the collector can't be built.
    pub fn spawn(config: &AnalyticsConfig) -> Result<(Self, JoinHandle<()>), reqwest::Error> {
        let collector = match &config.endpoint {
            Some(endpoint) => Some(Collector {
                client: reqwest::Client::builder()
                    .timeout(config.timeout)
                    .build()?,
                endpoint: endpoint.clone(),
            }),
            None => None,
        };

        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let worker = tokio::spawn(run_worker(rx, collector));
        Ok((Self { tx }, worker))
    }
}

impl AnalyticsPublisher for ChannelPublisher {
    fn publish(&self, name: &'static str, payload: AnalyticsPayload) {
        match self.tx.try_send(AnalyticsEvent::new(name, payload)) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(event = name, "Analytics queue full, dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!(event = name, "Analytics worker stopped, dropping event");
            }
        }
    }
}

struct Collector {
    client: reqwest::Client,
    endpoint: String,
}

impl Collector {
    #[instrument(skip_all, fields(event = event.name, event_id = %event.id))]
    async fn deliver(&self, event: &AnalyticsEvent) {
        match self.client.post(&self.endpoint).json(event).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Analytics event delivered");
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "Analytics collector rejected event");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to deliver analytics event");
            }
        }
    }
}

async fn run_worker(mut rx: mpsc::Receiver<AnalyticsEvent>, collector: Option<Collector>) {
    while let Some(event) = rx.recv().await {
        match &collector {
            Some(collector) => collector.deliver(&event).await,
            None => tracing::debug!(
                event = event.name,
                event_id = %event.id,
                "Analytics event (no collector configured)"
            ),
        }
    }
    tracing::debug!("Analytics worker shutting down");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use tokio::net::TcpListener;

    use super::*;

    fn payload() -> AnalyticsPayload {
        AnalyticsPayload::CartViewed(CartViewPayload {
            cart: Some(CartSnapshot {
                total_quantity: Some(2),
                ..CartSnapshot::default()
            }),
            prev_cart: None,
            shop: ShopAnalytics {
                shop_id: ShopId::new("gid://shopify/Shop/1"),
                accepted_language: "EN".to_string(),
                currency: "USD".to_string(),
            },
            url: "https://uncmfrt.com/".to_string(),
        })
    }

    #[test]
    fn test_event_envelope_shape() {
        let event = AnalyticsEvent::new(CART_VIEWED, payload());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["name"], "cart_viewed");
        assert!(json["occurredAt"].is_string());
        assert_eq!(json["payload"]["cart"]["totalQuantity"], 2);
        assert!(json["payload"]["prevCart"].is_null());
        assert_eq!(json["payload"]["shop"]["shopId"], "gid://shopify/Shop/1");
        assert_eq!(json["payload"]["url"], "https://uncmfrt.com/");
    }

    #[tokio::test]
    async fn test_publish_without_collector_drains() {
        let (publisher, worker) = ChannelPublisher::spawn(&AnalyticsConfig::default()).unwrap();
        publisher.publish(CART_VIEWED, payload());
        publisher.publish(CART_VIEWED, payload());
        drop(publisher);
        // Worker exits once the queue is drained and all senders are gone.
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_publish_after_worker_stopped_does_not_panic() {
        let (publisher, worker) = ChannelPublisher::spawn(&AnalyticsConfig::default()).unwrap();
        worker.abort();
        let _ = worker.await;
        publisher.publish(CART_VIEWED, payload());
    }

    #[tokio::test]
    async fn test_stalled_collector_does_not_hold_worker() {
        // Accepts connections and never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let holder = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = AnalyticsConfig {
            endpoint: Some(format!("http://{addr}/events")),
            timeout: Duration::from_millis(100),
            queue_capacity: 2,
            ..AnalyticsConfig::default()
        };
        let (publisher, worker) = ChannelPublisher::spawn(&config).unwrap();
        for _ in 0..5 {
            publisher.publish(CART_VIEWED, payload());
        }
        drop(publisher);

        let finished = tokio::time::timeout(Duration::from_secs(5), worker).await;
        assert!(finished.is_ok(), "worker still blocked on the collector");
        holder.abort();
    }
}
