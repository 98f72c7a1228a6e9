mod acknowledge_delivery;
mod attempt_delivery;
pub mod dispatch;
mod get_delivery_status;
mod get_recipient_notifications;
pub mod poll_due;
pub mod retry_failed_deliveries;
mod send_announcement;
pub mod sync_lecture_notifications;

use acknowledge_delivery::acknowledge_delivery_controller;
use actix_web::web;
use get_delivery_status::get_delivery_status_controller;
use get_recipient_notifications::get_recipient_notifications_controller;
use send_announcement::send_announcement_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/lectures/{lecture_id}/announcements",
        web::post().to(send_announcement_controller),
    );

    cfg.route(
        "/notifications/{job_id}/deliveries",
        web::get().to(get_delivery_status_controller),
    );
    cfg.route(
        "/notifications/{job_id}/deliveries/{recipient_id}/ack",
        web::post().to(acknowledge_delivery_controller),
    );

    cfg.route(
        "/recipients/{recipient_id}/notifications",
        web::get().to(get_recipient_notifications_controller),
    );
}
