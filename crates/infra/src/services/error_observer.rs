use lecture_alerts_domain::DeliveryRecord;
use parking_lot::Mutex;
use tracing::error;

/// Gets told about deliveries that will never be attempted again
pub trait IErrorObserver: Send + Sync {
    fn delivery_exhausted(&self, record: &DeliveryRecord);
}

pub struct TracingErrorObserver;

impl IErrorObserver for TracingErrorObserver {
    fn delivery_exhausted(&self, record: &DeliveryRecord) {
        error!(
            job_id = %record.job_id,
            recipient_id = %record.recipient_id,
            attempts = record.attempts,
            "Giving up on delivering notification. Last error: {:?}",
            record.last_error
        );
    }
}

/// Keeps every reported record in memory
#[derive(Default)]
pub struct RecordingErrorObserver {
    exhausted: Mutex<Vec<DeliveryRecord>>,
}

impl RecordingErrorObserver {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn exhausted(&self) -> Vec<DeliveryRecord> {
        self.exhausted.lock().clone()
    }
}

impl IErrorObserver for RecordingErrorObserver {
    fn delivery_exhausted(&self, record: &DeliveryRecord) {
        self.exhausted.lock().push(record.clone());
    }
}
