use serde_json::{Map, Value};
use tracing::{info, warn};

use campus_types::api::Outcome;
use campus_types::models::User;

use crate::latency::simulate;
use crate::{ApiResult, CampusApi, blocking};

/// Keys a profile patch can never overwrite.
const IMMUTABLE_KEYS: &[&str] = &["id", "role"];

impl CampusApi {
    pub async fn get_student_profile(&self, user_id: &str) -> ApiResult<Option<User>> {
        simulate(self.latency.profile_read).await;

        let user_id = user_id.to_string();
        blocking(&self.storage, move |storage| {
            let users: Vec<User> = storage.collection()?;
            Ok(users.into_iter().find(|u| u.id() == user_id))
        })
        .await
    }

    /// Shallow merge: each top-level key in `patch` replaces the stored value
    /// wholesale, every other key is left exactly as stored. The merged record
    /// must still read back as a [`User`] or nothing is written.
    pub async fn update_student_profile(
        &self,
        user_id: &str,
        patch: Map<String, Value>,
    ) -> ApiResult<Outcome<User>> {
        simulate(self.latency.profile_write).await;

        let user_id = user_id.to_string();
        blocking(&self.storage, move |storage| {
            let mut users = storage.raw_collection::<User>()?;
            let Some(Value::Object(fields)) = users
                .iter_mut()
                .find(|u| u.get("id").and_then(Value::as_str) == Some(user_id.as_str()))
            else {
                return Ok(Outcome::refused("User not found."));
            };

            let mut merged = fields.clone();
            for (key, value) in patch {
                if !IMMUTABLE_KEYS.contains(&key.as_str()) {
                    merged.insert(key, value);
                }
            }

            let updated: User = match serde_json::from_value(Value::Object(merged.clone())) {
                Ok(user) => user,
                Err(e) => {
                    warn!("Rejected profile update for {}: {}", user_id, e);
                    return Ok(Outcome::refused(format!("Invalid profile data: {}", e)));
                }
            };

            *fields = merged;
            storage.persist_raw::<User>(&users)?;

            info!("Profile updated for {}", user_id);
            Ok(Outcome::accepted("Profile updated successfully!", updated))
        })
        .await
    }
}
