use chrono::Utc;
use tracing::info;

use campus_types::api::{FeedbackRequest, FeedbackTargets, Outcome};
use campus_types::models::{Committee, Feedback, Role, User};

use crate::latency::simulate;
use crate::{ApiResult, CampusApi, blocking, next_id};

impl CampusApi {
    /// Everything a student can rate: all committees and all faculty.
    pub async fn get_feedback_targets(&self) -> ApiResult<FeedbackTargets> {
        simulate(self.latency.catalog).await;

        blocking(&self.storage, |storage| {
            let committees: Vec<Committee> = storage.collection()?;
            let users: Vec<User> = storage.collection()?;

            Ok(FeedbackTargets {
                committees,
                faculty: users
                    .into_iter()
                    .filter(|u| u.role() == Role::Faculty)
                    .collect(),
            })
        })
        .await
    }

    /// Always accepted. Unlike applications there is no per-target limit.
    pub async fn submit_feedback(&self, req: FeedbackRequest) -> ApiResult<Outcome<Feedback>> {
        simulate(self.latency.feedback).await;

        blocking(&self.storage, move |storage| {
            let mut feedback: Vec<Feedback> = storage.collection()?;
            let entry = Feedback {
                id: next_id("feedback"),
                student_id: req.student_id,
                target_id: req.target_id,
                target_type: req.target_type,
                rating: req.rating,
                comment: req.comment,
                is_anonymous: req.is_anonymous,
                submitted_at: Utc::now(),
            };
            feedback.push(entry.clone());
            storage.persist(&feedback)?;

            info!("Feedback {} recorded for {}", entry.id, entry.target_id);
            Ok(Outcome::accepted("Thank you for your feedback!", entry))
        })
        .await
    }
}
