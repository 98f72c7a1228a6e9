use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::get_service_health::*;
use lecture_alerts_infra::LectureContext;

async fn status(ctx: web::Data<LectureContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        now: ctx.sys.get_timestamp_millis(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
