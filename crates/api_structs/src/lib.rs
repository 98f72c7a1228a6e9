mod attendance;
mod course;
mod lecture;
mod notification;
mod status;

pub mod dtos {
    pub use crate::attendance::dtos::*;
    pub use crate::course::dtos::*;
    pub use crate::lecture::dtos::*;
    pub use crate::notification::dtos::*;
}

pub use crate::attendance::api::*;
pub use crate::course::api::*;
pub use crate::lecture::api::*;
pub use crate::notification::api::*;
pub use crate::status::api::*;
