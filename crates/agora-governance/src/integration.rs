//! Integration registry for outbound notifications.
//!
//! A thin platform -> credentials map. The engine calls `notify` on state
//! transitions; actual webhook transport is the host's concern, so dispatch
//! here is logged and acknowledged.

use std::collections::HashMap;

/// Third-party platform credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integration {
    pub api_key: String,
    pub webhook_url: String,
}

/// Notification seam consumed by the engines. Tests substitute a recording
/// implementation to observe state-transition dispatches.
pub trait Notifier {
    /// Notify a platform. Returns true iff the platform is known.
    fn notify(&self, platform: &str, message: &str) -> bool;

    /// Notify every known platform. Returns the number notified.
    fn notify_all(&self, message: &str) -> usize;
}

/// Registry of configured integrations.
#[derive(Debug, Default)]
pub struct IntegrationRegistry {
    integrations: HashMap<String, Integration>,
}

impl IntegrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a platform's credentials.
    pub fn add(&mut self, platform: &str, api_key: &str, webhook_url: &str) {
        self.integrations.insert(
            platform.to_string(),
            Integration {
                api_key: api_key.to_string(),
                webhook_url: webhook_url.to_string(),
            },
        );
    }

    /// Remove a platform. Returns true if it was registered.
    pub fn remove(&mut self, platform: &str) -> bool {
        self.integrations.remove(platform).is_some()
    }

    /// Get a platform's credentials.
    pub fn get(&self, platform: &str) -> Option<&Integration> {
        self.integrations.get(platform)
    }

    /// Registered platform names.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.integrations.keys().map(String::as_str)
    }
}

impl Notifier for IntegrationRegistry {
    fn notify(&self, platform: &str, message: &str) -> bool {
        match self.integrations.get(platform) {
            Some(integration) => {
                tracing::debug!(
                    "Notifying {} via {}: {}",
                    platform,
                    integration.webhook_url,
                    message
                );
                true
            }
            None => false,
        }
    }

    fn notify_all(&self, message: &str) -> usize {
        self.integrations
            .keys()
            .filter(|platform| self.notify(platform, message))
            .count()
    }
}
