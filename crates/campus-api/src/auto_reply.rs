use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use campus_db::Storage;
use campus_types::models::Message;

use crate::{ApiResult, blocking, next_id};

/// The one direct-message channel that answers back.
pub const AUTO_REPLY_CHANNEL: &str = "dm-aarav-mehta";

/// The other party in [`AUTO_REPLY_CHANNEL`].
pub const AUTO_REPLY_AUTHOR: &str = "faculty-mehta";

pub const AUTO_REPLY_CONTENT: &str =
    "Hi! I'm in a lecture right now, I'll get back to you after 4pm.";

const GREETINGS: &[&str] = &["hi", "hello", "hey", "how are you"];

/// Whether `message` should get the canned reply. Plain substring match on
/// the lowercased content, so "this" counts as "hi".
pub fn triggers_reply(message: &Message) -> bool {
    if message.channel_id != AUTO_REPLY_CHANNEL {
        return false;
    }
    let content = message.content.to_lowercase();
    GREETINGS.iter().any(|greeting| content.contains(greeting))
}

/// Delayed canned replies, cancellable per channel.
#[derive(Clone)]
pub struct AutoReplyScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    storage: Storage,
    delay: Duration,
    /// Cancelling this cancels every channel token.
    root: CancellationToken,
    channels: Mutex<HashMap<String, CancellationToken>>,
    jobs: Mutex<Vec<JoinHandle<()>>>,
}

impl AutoReplyScheduler {
    pub fn new(storage: Storage, delay: Duration) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                storage,
                delay,
                root: CancellationToken::new(),
                channels: Mutex::new(HashMap::new()),
                jobs: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Queue one reply into `channel_id`. The reply reloads the messages
    /// collection when it fires, so writes made in between are kept.
    pub async fn schedule(&self, channel_id: &str) {
        let token = {
            let mut channels = self.inner.channels.lock().await;
            channels
                .entry(channel_id.to_string())
                .or_insert_with(|| self.inner.root.child_token())
                .child_token()
        };

        let storage = self.inner.storage.clone();
        let delay = self.inner.delay;
        let channel_id = channel_id.to_string();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Auto-reply for {} cancelled", channel_id);
                }
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = deliver(&storage, &channel_id).await {
                        warn!("Auto-reply for {} failed: {}", channel_id, e);
                    }
                }
            }
        });

        let mut jobs = self.inner.jobs.lock().await;
        jobs.retain(|job| !job.is_finished());
        jobs.push(handle);
    }

    /// Drop every reply still pending for `channel_id`.
    pub async fn cancel_channel(&self, channel_id: &str) {
        if let Some(token) = self.inner.channels.lock().await.remove(channel_id) {
            token.cancel();
            debug!("Cancelled pending auto-replies for {}", channel_id);
        }
    }

    /// Cancel everything. Replies scheduled afterwards are dropped immediately.
    pub fn shutdown(&self) {
        self.inner.root.cancel();
    }

    /// Wait until every reply scheduled so far has landed or been cancelled.
    pub async fn wait_idle(&self) {
        let jobs = std::mem::take(&mut *self.inner.jobs.lock().await);
        for job in jobs {
            if let Err(e) = job.await {
                warn!("Auto-reply task join error: {}", e);
            }
        }
    }
}

async fn deliver(storage: &Storage, channel_id: &str) -> ApiResult<()> {
    let channel_id = channel_id.to_string();
    blocking(storage, move |storage| {
        let mut messages: Vec<Message> = storage.collection()?;
        messages.push(Message {
            id: next_id("msg"),
            channel_id: channel_id.clone(),
            author_id: AUTO_REPLY_AUTHOR.to_string(),
            content: AUTO_REPLY_CONTENT.to_string(),
            image_url: None,
            timestamp: Utc::now(),
        });
        storage.persist(&messages)?;

        info!("Auto-reply delivered to {}", channel_id);
        Ok(())
    })
    .await
}
