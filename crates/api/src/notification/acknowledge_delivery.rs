use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use lecture_alerts_api_structs::acknowledge_delivery::*;
use lecture_alerts_domain::{DeliveryRecord, JobId, ID};
use lecture_alerts_infra::LectureContext;

pub async fn acknowledge_delivery_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<LectureContext>,
) -> Result<HttpResponse, ApiError> {
    let path_params = path_params.into_inner();
    let usecase = AcknowledgeDeliveryUseCase {
        job_id: path_params.job_id,
        recipient_id: path_params.recipient_id,
    };

    match execute(usecase, &ctx).await {
        Ok(record) => Ok(HttpResponse::Ok().json(APIResponse::new(record))),
        Err(e) => match e {},
    }
}

/// Marks a delivered notification as read by its recipient. Anything else
/// (unknown record, not delivered yet, already acknowledged) leaves the
/// record as it is.
#[derive(Debug)]
pub struct AcknowledgeDeliveryUseCase {
    pub job_id: JobId,
    pub recipient_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for AcknowledgeDeliveryUseCase {
    type Response = Option<DeliveryRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "AcknowledgeDelivery";

    async fn execute(&mut self, ctx: &LectureContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx
            .repos
            .deliveries
            .acknowledge(
                &self.job_id,
                &self.recipient_id,
                ctx.sys.get_timestamp_millis(),
            )
            .await)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::notification::dispatch::DispatchNotificationUseCase;
    use crate::shared::test_helpers::*;
    use lecture_alerts_domain::DeliveryStatus;

    #[actix_web::test]
    async fn acknowledges_delivered_notification_once() {
        let TestContext { ctx, sys, .. } = setup_test_context();
        let course = create_course(&ctx).await;
        let recipient_id = enroll(&ctx, &course.id).await;
        let lecture = create_lecture(&ctx, &course, START + 2 * HOUR).await;
        let job = ctx.repos.notification_jobs.find_by_lecture(&lecture.id).await[0].clone();
        execute(DispatchNotificationUseCase { job: job.clone() }, &ctx)
            .await
            .unwrap();

        let usecase = || AcknowledgeDeliveryUseCase {
            job_id: job.id.clone(),
            recipient_id,
        };
        let acked_at = sys.advance(MINUTE);
        let record = execute(usecase(), &ctx).await.unwrap().unwrap();
        assert_eq!(record.status, DeliveryStatus::Acknowledged);
        assert_eq!(record.acknowledged_at, Some(acked_at));

        sys.advance(MINUTE);
        let record = execute(usecase(), &ctx).await.unwrap().unwrap();
        assert_eq!(record.acknowledged_at, Some(acked_at));
    }

    #[actix_web::test]
    async fn acknowledging_unknown_or_failed_delivery_is_a_no_op() {
        let TestContext { ctx, channel, .. } = setup_test_context();
        let unknown = AcknowledgeDeliveryUseCase {
            job_id: JobId::from("unknown".to_string()),
            recipient_id: ID::new(),
        };
        assert!(execute(unknown, &ctx).await.unwrap().is_none());

        let course = create_course(&ctx).await;
        let recipient_id = enroll(&ctx, &course.id).await;
        channel.fail_next(recipient_id, 1);
        let lecture = create_lecture(&ctx, &course, START + 2 * HOUR).await;
        let job = ctx.repos.notification_jobs.find_by_lecture(&lecture.id).await[0].clone();
        execute(DispatchNotificationUseCase { job: job.clone() }, &ctx)
            .await
            .unwrap();

        let failed = AcknowledgeDeliveryUseCase {
            job_id: job.id.clone(),
            recipient_id,
        };
        let record = execute(failed, &ctx).await.unwrap().unwrap();
        assert_eq!(record.status, DeliveryStatus::Failed);
        assert_eq!(record.acknowledged_at, None);
    }
}
