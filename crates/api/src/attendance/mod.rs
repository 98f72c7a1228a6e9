mod get_attendance_summary;
mod mark_attendance;

use actix_web::web;
use get_attendance_summary::get_attendance_summary_controller;
use mark_attendance::mark_attendance_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/lectures/{lecture_id}/attendance",
        web::post().to(mark_attendance_controller),
    );
    cfg.route(
        "/lectures/{lecture_id}/attendance",
        web::get().to(get_attendance_summary_controller),
    );
}
