use chrono::Utc;
use tracing::debug;

use campus_types::api::{ChatData, Outcome, SendMessageRequest};
use campus_types::models::{Channel, Message, User};

use crate::auto_reply::triggers_reply;
use crate::latency::simulate;
use crate::{ApiResult, CampusApi, blocking, next_id};

impl CampusApi {
    /// All channels and all users. `members` is not checked here; the caller
    /// decides what to show.
    pub async fn get_chat_data(&self, user_id: &str) -> ApiResult<ChatData> {
        simulate(self.latency.chat_data).await;

        debug!("Loading chat data for {}", user_id);
        blocking(&self.storage, |storage| {
            let channels: Vec<Channel> = storage.collection()?;
            let users: Vec<User> = storage.collection()?;
            Ok(ChatData { channels, users })
        })
        .await
    }

    pub async fn get_messages_for_channel(&self, channel_id: &str) -> ApiResult<Vec<Message>> {
        simulate(self.latency.messages).await;

        let channel_id = channel_id.to_string();
        blocking(&self.storage, move |storage| {
            let mut messages: Vec<Message> = storage.collection()?;
            messages.retain(|m| m.channel_id == channel_id);
            Ok(messages)
        })
        .await
    }

    /// Persists the message immediately. A greeting sent into the designated
    /// direct-message channel also schedules a delayed canned reply; it lands
    /// after this call returns.
    pub async fn send_message(&self, req: SendMessageRequest) -> ApiResult<Outcome<Message>> {
        simulate(self.latency.send_message).await;

        let message = blocking(&self.storage, move |storage| {
            let mut messages: Vec<Message> = storage.collection()?;
            let message = Message {
                id: next_id("msg"),
                channel_id: req.channel_id,
                author_id: req.author_id,
                content: req.content,
                image_url: req.image_url,
                timestamp: Utc::now(),
            };
            messages.push(message.clone());
            storage.persist(&messages)?;
            Ok(message)
        })
        .await?;

        if triggers_reply(&message) {
            self.auto_reply.schedule(&message.channel_id).await;
        }

        Ok(Outcome::accepted("Message sent.", message))
    }
}
