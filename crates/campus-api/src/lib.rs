pub mod achievements;
pub mod applications;
pub mod auth;
pub mod auto_reply;
pub mod catalog;
pub mod error;
pub mod feedback;
pub mod latency;
pub mod messages;
pub mod profiles;
pub mod sick_leave;
pub mod tasks;

use chrono::Utc;
use tracing::error;

use campus_db::Storage;

pub use auto_reply::AutoReplyScheduler;
pub use error::{ApiError, ApiResult};
pub use latency::Latency;

/// The portal's data layer. Every operation waits out its configured
/// latency, then runs a load/mutate/save cycle against [`Storage`].
///
/// Cheap to clone; clones share storage and the auto-reply scheduler.
#[derive(Clone)]
pub struct CampusApi {
    storage: Storage,
    latency: Latency,
    auto_reply: AutoReplyScheduler,
}

impl CampusApi {
    pub fn new(storage: Storage, latency: Latency) -> Self {
        let auto_reply = AutoReplyScheduler::new(storage.clone(), latency.auto_reply);
        Self {
            storage,
            latency,
            auto_reply,
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    pub fn auto_reply(&self) -> &AutoReplyScheduler {
        &self.auto_reply
    }
}

/// Run a storage closure off the async runtime.
pub(crate) async fn blocking<F, T>(storage: &Storage, f: F) -> ApiResult<T>
where
    F: FnOnce(&Storage) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let storage = storage.clone();
    let result = tokio::task::spawn_blocking(move || f(&storage))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::TaskJoin(e)
        })?;
    Ok(result?)
}

/// `<kind>-<millis>`. Two creations in the same millisecond collide.
pub(crate) fn next_id(kind: &str) -> String {
    format!("{}-{}", kind, Utc::now().timestamp_millis())
}
