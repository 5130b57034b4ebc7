use std::collections::HashSet;

use campus_types::api::TaskListing;
use campus_types::models::{Application, Committee, Task, User};

use crate::latency::simulate;
use crate::{ApiResult, CampusApi, blocking};

const UNKNOWN_POSTER: &str = "Unknown";

impl CampusApi {
    pub async fn get_dashboard_tasks(&self) -> ApiResult<Vec<TaskListing>> {
        simulate(self.latency.catalog).await;

        blocking(&self.storage, |storage| {
            let tasks: Vec<Task> = storage.collection()?;
            let users: Vec<User> = storage.collection()?;
            let committees: Vec<Committee> = storage.collection()?;

            Ok(tasks
                .into_iter()
                .map(|task| listing(task, &users, &committees, None))
                .collect())
        })
        .await
    }

    /// Dashboard listing plus whether `student_id` already applied to each task.
    pub async fn get_tasks_for_explorer(&self, student_id: &str) -> ApiResult<Vec<TaskListing>> {
        simulate(self.latency.catalog).await;

        let student_id = student_id.to_string();
        blocking(&self.storage, move |storage| {
            let tasks: Vec<Task> = storage.collection()?;
            let users: Vec<User> = storage.collection()?;
            let committees: Vec<Committee> = storage.collection()?;
            let applications: Vec<Application> = storage.collection()?;

            let applied: HashSet<&str> = applications
                .iter()
                .filter(|a| a.student_id == student_id)
                .map(|a| a.task_id.as_str())
                .collect();

            Ok(tasks
                .into_iter()
                .map(|task| {
                    let has_applied = applied.contains(task.id.as_str());
                    listing(task, &users, &committees, Some(has_applied))
                })
                .collect())
        })
        .await
    }
}

fn listing(
    task: Task,
    users: &[User],
    committees: &[Committee],
    has_applied: Option<bool>,
) -> TaskListing {
    let posted_by_name = poster_name(&task.posted_by, users, committees);
    TaskListing {
        task,
        posted_by_name,
        has_applied,
    }
}

/// Users are searched before committees; the two id spaces are assumed disjoint.
fn poster_name(posted_by: &str, users: &[User], committees: &[Committee]) -> String {
    users
        .iter()
        .find(|u| u.id() == posted_by)
        .map(|u| u.display_name().to_string())
        .or_else(|| {
            committees
                .iter()
                .find(|c| c.id == posted_by)
                .map(|c| c.name.clone())
        })
        .unwrap_or_else(|| UNKNOWN_POSTER.to_string())
}
