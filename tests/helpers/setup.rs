use lecture_alerts_api::Application;
use lecture_alerts_infra::{setup_context, Config};
use lecture_alerts_sdk::LectureAlertsSDK;

pub struct TestApp {
    pub config: Config,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, LectureAlertsSDK, String) {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port
    ctx.config.delivery_webhook = None;
    ctx.config.run_job_schedulers = true;
    ctx.config.job_tick_interval_millis = 20;

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config };
    let sdk = LectureAlertsSDK::new(address.clone());
    (app, sdk, address)
}
