//! Player surfaces that report whether a reference loads.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use super::PlayerSignal;

/// Something that can be pointed at an embeddable reference
#[async_trait]
pub trait PlayerSurface: Send + Sync {
    /// Human-readable surface name
    fn name(&self) -> &str;

    /// Load the reference and report the outcome
    async fn load(&self, embed_url: &str) -> PlayerSignal;
}

/// Surface that fetches the reference over HTTP and treats any 2xx as loaded
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    /// Create a probe with a per-request timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Create a probe from the configured player settings
    pub fn from_config(settings: &crate::config::PlayerSettings) -> Self {
        Self::new(settings.probe_timeout())
    }
}

/// Map an HTTP status to a load signal
pub fn signal_for_status(status: StatusCode) -> PlayerSignal {
    if status.is_success() {
        PlayerSignal::Loaded
    } else {
        PlayerSignal::Error
    }
}

#[async_trait]
impl PlayerSurface for HttpProbe {
    fn name(&self) -> &str {
        "http-probe"
    }

    async fn load(&self, embed_url: &str) -> PlayerSignal {
        let response = self
            .client
            .get(embed_url)
            .timeout(self.timeout)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status();
                debug!(url = embed_url, %status, "Probe response");
                signal_for_status(status)
            }
            Err(e) => {
                debug!(url = embed_url, "Probe failed: {}", e);
                PlayerSignal::Error
            }
        }
    }
}
