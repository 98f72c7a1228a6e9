use crate::shared::entity::{Entity, ID};
use chrono_tz::{Tz, UTC};
use serde::{Deserialize, Serialize};

/// A `Course` groups `Lecture`s and the recipients enrolled to be notified
/// about them.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: ID,
    pub name: String,
    pub lecturer_id: ID,
    /// Code students type in (or scan) to join the course
    pub join_code: String,
    pub settings: CourseSettings,
    pub created: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSettings {
    /// Timezone used when expanding recurring lectures
    pub timezone: Tz,
    /// 0 is monday
    pub week_start: usize,
}

impl Default for CourseSettings {
    fn default() -> Self {
        Self {
            timezone: UTC,
            week_start: 0,
        }
    }
}

impl Course {
    pub fn new(name: String, lecturer_id: ID, join_code: String, created: i64) -> Self {
        Self {
            id: Default::default(),
            name,
            lecturer_id,
            join_code,
            settings: Default::default(),
            created,
        }
    }
}

impl Entity for Course {
    fn id(&self) -> &ID {
        &self.id
    }
}
