pub mod advance_clock;
pub mod cancel_lecture;
pub mod create_lecture;
pub mod expand_series;
mod get_lecture;
mod subscribers;
pub mod update_lecture;

use actix_web::web;
use cancel_lecture::cancel_lecture_controller;
use create_lecture::create_lecture_controller;
use get_lecture::get_lecture_controller;
use update_lecture::update_lecture_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/lectures", web::post().to(create_lecture_controller));
    cfg.route(
        "/lectures/{lecture_id}",
        web::get().to(get_lecture_controller),
    );
    cfg.route(
        "/lectures/{lecture_id}",
        web::put().to(update_lecture_controller),
    );
    cfg.route(
        "/lectures/{lecture_id}/cancel",
        web::post().to(cancel_lecture_controller),
    );
}
