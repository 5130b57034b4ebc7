use tracing::info;

use campus_types::api::{Outcome, SickLeaveRequest};
use campus_types::models::{ReviewStatus, SickLeave};

use crate::latency::simulate;
use crate::{ApiResult, CampusApi, blocking, next_id};

/// No upload happens; every request points at the same placeholder.
pub const PROOF_PLACEHOLDER: &str = "/uploads/medical-certificate-placeholder.pdf";

/// Every request is routed to this faculty member.
pub const LEAVE_APPROVER_ID: &str = "faculty-mehta";

impl CampusApi {
    pub async fn submit_sick_leave(&self, req: SickLeaveRequest) -> ApiResult<Outcome<SickLeave>> {
        simulate(self.latency.sick_leave).await;

        blocking(&self.storage, move |storage| {
            let mut leaves: Vec<SickLeave> = storage.collection()?;
            let leave = SickLeave {
                id: next_id("leave"),
                student_id: req.student_id,
                start_date: req.start_date,
                end_date: req.end_date,
                reason: req.reason,
                proof_url: PROOF_PLACEHOLDER.to_string(),
                status: ReviewStatus::Pending,
                faculty_approver_id: LEAVE_APPROVER_ID.to_string(),
            };
            leaves.push(leave.clone());
            storage.persist(&leaves)?;

            info!("Sick leave {} filed by {}", leave.id, leave.student_id);
            Ok(Outcome::accepted(
                "Sick leave request submitted for approval.",
                leave,
            ))
        })
        .await
    }

    pub async fn get_sick_leaves_for_student(&self, student_id: &str) -> ApiResult<Vec<SickLeave>> {
        simulate(self.latency.sick_leave).await;

        let student_id = student_id.to_string();
        blocking(&self.storage, move |storage| {
            let mut leaves: Vec<SickLeave> = storage.collection()?;
            leaves.retain(|l| l.student_id == student_id);
            Ok(leaves)
        })
        .await
    }
}
