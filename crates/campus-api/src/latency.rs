use std::str::FromStr;
use std::time::Duration;

/// Artificial per-operation delay standing in for network round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub auth: Duration,
    pub profile_read: Duration,
    pub profile_write: Duration,
    pub catalog: Duration,
    pub application: Duration,
    pub chat_data: Duration,
    pub messages: Duration,
    pub send_message: Duration,
    pub feedback: Duration,
    pub achievements: Duration,
    pub sick_leave: Duration,
    /// Delay before the canned direct-message reply lands.
    pub auto_reply: Duration,
}

impl Latency {
    pub const fn standard() -> Self {
        Self {
            auth: Duration::from_millis(500),
            profile_read: Duration::from_millis(300),
            profile_write: Duration::from_millis(500),
            catalog: Duration::from_millis(300),
            application: Duration::from_millis(600),
            chat_data: Duration::from_millis(400),
            messages: Duration::from_millis(200),
            send_message: Duration::from_millis(200),
            feedback: Duration::from_millis(800),
            achievements: Duration::from_millis(400),
            sick_leave: Duration::from_millis(600),
            auto_reply: Duration::from_millis(1500),
        }
    }

    pub const fn none() -> Self {
        Self {
            auth: Duration::ZERO,
            profile_read: Duration::ZERO,
            profile_write: Duration::ZERO,
            catalog: Duration::ZERO,
            application: Duration::ZERO,
            chat_data: Duration::ZERO,
            messages: Duration::ZERO,
            send_message: Duration::ZERO,
            feedback: Duration::ZERO,
            achievements: Duration::ZERO,
            sick_leave: Duration::ZERO,
            auto_reply: Duration::ZERO,
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromStr for Latency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" | "standard" => Ok(Self::standard()),
            "none" | "off" => Ok(Self::none()),
            other => Err(anyhow::anyhow!("Unknown latency profile '{}'", other)),
        }
    }
}

pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
