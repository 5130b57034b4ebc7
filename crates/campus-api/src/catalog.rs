use tracing::debug;

use campus_types::models::{Committee, Event};

use crate::latency::simulate;
use crate::{ApiResult, CampusApi, blocking};

impl CampusApi {
    pub async fn get_committees(&self) -> ApiResult<Vec<Committee>> {
        simulate(self.latency.catalog).await;

        let committees: Vec<Committee> =
            blocking(&self.storage, |storage| storage.collection()).await?;
        debug!("Serving {} committees", committees.len());
        Ok(committees)
    }

    /// Event registrations are tracked by the client; `attendees` is seed data.
    pub async fn get_events(&self) -> ApiResult<Vec<Event>> {
        simulate(self.latency.catalog).await;

        blocking(&self.storage, |storage| storage.collection()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::testing;
    use campus_db::KeyValueStore;

    #[tokio::test(start_paused = true)]
    async fn reads_seed_committees_and_events() {
        let (medium, api) = testing::api();

        let committees = api.get_committees().await.unwrap();
        assert_eq!(committees.len(), 3);
        assert!(medium.get("committees").unwrap().is_some());

        let events = api.get_events().await.unwrap();
        assert!(events.iter().any(|e| e.featured));
        assert!(medium.get("events").unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn reads_wait_out_the_latency() {
        let (_, api) = testing::api();

        let started = tokio::time::Instant::now();
        api.get_events().await.unwrap();
        assert!(started.elapsed() >= api.latency().catalog);
    }
}
