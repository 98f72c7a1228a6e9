use crate::dtos::DeliveryRecordDTO;
use lecture_alerts_domain::{DeliveryRecord, JobId, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveriesResponse {
    pub deliveries: Vec<DeliveryRecordDTO>,
}

impl DeliveriesResponse {
    pub fn new(records: Vec<DeliveryRecord>) -> Self {
        Self {
            deliveries: records.into_iter().map(DeliveryRecordDTO::new).collect(),
        }
    }
}

pub mod get_delivery_status {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub job_id: JobId,
    }

    pub type APIResponse = DeliveriesResponse;
}

pub mod acknowledge_delivery {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub job_id: JobId,
        pub recipient_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// `None` when there is no delivery for the job and recipient
        pub delivery: Option<DeliveryRecordDTO>,
    }

    impl APIResponse {
        pub fn new(record: Option<DeliveryRecord>) -> Self {
            Self {
                delivery: record.map(DeliveryRecordDTO::new),
            }
        }
    }
}

pub mod get_recipient_notifications {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub recipient_id: ID,
    }

    /// Newest first
    pub type APIResponse = DeliveriesResponse;
}
