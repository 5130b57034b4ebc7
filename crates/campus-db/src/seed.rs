use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use campus_types::models::{Achievement, Channel, Committee, Event, Message, Task, User};

/// Initial dataset written into the medium the first time a collection is read.
/// Applications, sick leaves and feedback always start empty.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
    pub committees: Vec<Committee>,
    pub events: Vec<Event>,
    pub channels: Vec<Channel>,
    pub messages: Vec<Message>,
    pub achievements: Vec<Achievement>,
}

impl SeedData {
    /// The dataset shipped with the portal.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            users: parse("users", include_str!("../seed/users.json"))?,
            tasks: parse("tasks", include_str!("../seed/tasks.json"))?,
            committees: parse("committees", include_str!("../seed/committees.json"))?,
            events: parse("events", include_str!("../seed/events.json"))?,
            channels: parse("channels", include_str!("../seed/channels.json"))?,
            messages: parse("messages", include_str!("../seed/messages.json"))?,
            achievements: parse("achievements", include_str!("../seed/achievements.json"))?,
        })
    }
}

fn parse<T: DeserializeOwned>(name: &str, raw: &str) -> Result<Vec<T>> {
    serde_json::from_str(raw).with_context(|| format!("Invalid seed file {}.json", name))
}
