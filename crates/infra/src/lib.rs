mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, DeliveryWebhookConfig};
pub use repos::{AttemptFilter, ILectureRepo, InMemoryLectureRepo, Repos};
pub use services::*;
use std::{sync::Arc, time::Duration};
pub use system::{ControlledSys, ISys, RealSys};

#[derive(Clone)]
pub struct LectureContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub services: Services,
}

impl LectureContext {
    fn create(config: Config) -> Self {
        let delivery_channel: Arc<dyn IDeliveryChannel> = match &config.delivery_webhook {
            Some(webhook) => Arc::new(WebhookDeliveryChannel::new(
                webhook.url.clone(),
                webhook.key.clone(),
                Duration::from_millis(config.delivery_timeout_millis),
            )),
            None => Arc::new(LogDeliveryChannel),
        };
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            services: Services {
                delivery_channel,
                error_observer: Arc::new(TracingErrorObserver),
            },
        }
    }

    /// Context with in-memory storage that only logs notifications
    pub fn create_inmemory() -> Self {
        let mut config = Config::new();
        config.delivery_webhook = None;
        Self::create(config)
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> LectureContext {
    LectureContext::create(Config::new())
}
