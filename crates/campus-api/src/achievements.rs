use std::cmp::Reverse;

use campus_types::api::AchievementListing;
use campus_types::models::{Achievement, User};

use crate::latency::simulate;
use crate::{ApiResult, CampusApi, blocking};

impl CampusApi {
    /// Approved achievements across the college, newest first, with the
    /// student's name and branch attached.
    pub async fn get_college_achievements(&self) -> ApiResult<Vec<AchievementListing>> {
        simulate(self.latency.achievements).await;

        blocking(&self.storage, |storage| {
            let achievements: Vec<Achievement> = storage.collection()?;
            let users: Vec<User> = storage.collection()?;

            let mut listings: Vec<AchievementListing> = achievements
                .into_iter()
                .filter(|a| a.approved)
                .map(|achievement| {
                    let student = users.iter().find(|u| u.id() == achievement.student_id);
                    AchievementListing {
                        student_name: student
                            .map(|u| u.display_name().to_string())
                            .unwrap_or_default(),
                        student_branch: student
                            .map(|u| u.branch().to_string())
                            .unwrap_or_default(),
                        achievement,
                    }
                })
                .collect();
            listings.sort_by_key(|l| Reverse(l.achievement.date));

            Ok(listings)
        })
        .await
    }

    /// Everything one student has logged, approved or not, newest first.
    pub async fn get_student_achievements(&self, student_id: &str) -> ApiResult<Vec<Achievement>> {
        simulate(self.latency.achievements).await;

        let student_id = student_id.to_string();
        blocking(&self.storage, move |storage| {
            let mut achievements: Vec<Achievement> = storage.collection()?;
            achievements.retain(|a| a.student_id == student_id);
            achievements.sort_by_key(|a| Reverse(a.date));
            Ok(achievements)
        })
        .await
    }
}
