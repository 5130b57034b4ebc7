use chrono::Utc;
use tracing::info;

use campus_types::api::{ApplicationRequest, Outcome};
use campus_types::models::{Application, ResumeSource, ReviewStatus};

use crate::latency::simulate;
use crate::{ApiResult, CampusApi, blocking, next_id};

impl CampusApi {
    /// At most one application per (student, task). A second attempt is
    /// refused, not an error.
    ///
    /// The manual-upload path only records where the resume came from; file
    /// handling stays with the caller.
    pub async fn submit_application(
        &self,
        req: ApplicationRequest,
    ) -> ApiResult<Outcome<Application>> {
        simulate(self.latency.application).await;

        blocking(&self.storage, move |storage| {
            let mut applications: Vec<Application> = storage.collection()?;
            if applications
                .iter()
                .any(|a| a.student_id == req.student_id && a.task_id == req.task_id)
            {
                return Ok(Outcome::refused("You have already applied for this task."));
            }

            let application = Application {
                id: next_id("app"),
                student_id: req.student_id,
                task_id: req.task_id,
                motivation: req.motivation,
                resume_source: if req.use_profile_resume {
                    ResumeSource::Profile
                } else {
                    ResumeSource::ManualUpload
                },
                submitted_at: Utc::now(),
                status: ReviewStatus::Pending,
            };
            applications.push(application.clone());
            storage.persist(&applications)?;

            info!(
                "Application {} submitted for task {}",
                application.id, application.task_id
            );
            Ok(Outcome::accepted(
                "Application submitted successfully!",
                application,
            ))
        })
        .await
    }
}
