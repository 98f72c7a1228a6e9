mod delivery_channel;
mod error_observer;

pub use delivery_channel::{
    IDeliveryChannel, LogDeliveryChannel, RecordingDeliveryChannel, SentNotification,
    WebhookDeliveryChannel,
};
pub use error_observer::{IErrorObserver, RecordingErrorObserver, TracingErrorObserver};
use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    pub delivery_channel: Arc<dyn IDeliveryChannel>,
    pub error_observer: Arc<dyn IErrorObserver>,
}
