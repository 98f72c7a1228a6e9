mod create_course;
mod enroll_recipient;
mod get_course;
mod get_upcoming_lectures;
mod join_course;
mod set_notification_preference;
mod unenroll_recipient;

use actix_web::web;
use create_course::create_course_controller;
use enroll_recipient::enroll_recipient_controller;
use get_course::get_course_controller;
use get_upcoming_lectures::get_upcoming_lectures_controller;
use join_course::join_course_controller;
use set_notification_preference::set_notification_preference_controller;
use unenroll_recipient::unenroll_recipient_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/courses", web::post().to(create_course_controller));
    cfg.route("/courses/join", web::post().to(join_course_controller));
    cfg.route("/courses/{course_id}", web::get().to(get_course_controller));

    cfg.route(
        "/courses/{course_id}/enrollments",
        web::post().to(enroll_recipient_controller),
    );
    cfg.route(
        "/courses/{course_id}/enrollments/{recipient_id}",
        web::delete().to(unenroll_recipient_controller),
    );
    cfg.route(
        "/courses/{course_id}/enrollments/{recipient_id}",
        web::put().to(set_notification_preference_controller),
    );

    cfg.route(
        "/courses/{course_id}/lectures",
        web::get().to(get_upcoming_lectures_controller),
    );
}
