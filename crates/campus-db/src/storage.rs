use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use campus_types::models::{
    Achievement, Application, Channel, Committee, Event, Feedback, Message, SickLeave, Task, User,
};

use crate::seed::SeedData;
use crate::store::KeyValueStore;

/// A record type persisted as one JSON array under a fixed key.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + 'static {
    const KEY: &'static str;

    fn seed(seed: &SeedData) -> &[Self];
}

macro_rules! seeded_record {
    ($ty:ty, $key:literal, $field:ident) => {
        impl Record for $ty {
            const KEY: &'static str = $key;

            fn seed(seed: &SeedData) -> &[Self] {
                &seed.$field
            }
        }
    };
    ($ty:ty, $key:literal) => {
        impl Record for $ty {
            const KEY: &'static str = $key;

            fn seed(_: &SeedData) -> &[Self] {
                &[]
            }
        }
    };
}

seeded_record!(User, "users", users);
seeded_record!(Task, "tasks", tasks);
seeded_record!(Committee, "committees", committees);
seeded_record!(Event, "events", events);
seeded_record!(Channel, "channels", channels);
seeded_record!(Message, "messages", messages);
seeded_record!(Achievement, "achievements", achievements);
seeded_record!(Application, "applications");
seeded_record!(SickLeave, "sickLeaves");
seeded_record!(Feedback, "feedback");

/// Collection-level access to the medium.
///
/// Every mutation is a full load, an in-memory change and a full save of
/// the array. There is no partial write path.
#[derive(Clone)]
pub struct Storage {
    medium: Option<Arc<dyn KeyValueStore>>,
    seed: Arc<SeedData>,
}

impl Storage {
    pub fn new(medium: Arc<dyn KeyValueStore>, seed: SeedData) -> Self {
        Self {
            medium: Some(medium),
            seed: Arc::new(seed),
        }
    }

    /// No medium attached: reads serve seed data, writes are dropped.
    pub fn detached(seed: SeedData) -> Self {
        Self {
            medium: None,
            seed: Arc::new(seed),
        }
    }

    pub fn medium(&self) -> Option<&Arc<dyn KeyValueStore>> {
        self.medium.as_ref()
    }

    /// Reads `key`, seeding it on first access. A stored value that does not
    /// deserialize is served as `seed` and left in place untouched.
    pub fn load<T>(&self, key: &str, seed: &[T]) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let Some(medium) = &self.medium else {
            return Ok(seed.to_vec());
        };

        match medium.get(key)? {
            Some(raw) if !raw.is_empty() => match serde_json::from_str(&raw) {
                Ok(items) => Ok(items),
                Err(e) => {
                    warn!("Stored '{}' is unreadable, serving seed data: {}", key, e);
                    Ok(seed.to_vec())
                }
            },
            _ => {
                medium.set(key, &serde_json::to_string(seed)?)?;
                debug!("Seeded '{}' with {} records", key, seed.len());
                Ok(seed.to_vec())
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &str, data: &[T]) -> Result<()> {
        if let Some(medium) = &self.medium {
            medium.set(key, &serde_json::to_string(data)?)?;
        }
        Ok(())
    }

    pub fn collection<T: Record>(&self) -> Result<Vec<T>> {
        self.load(T::KEY, T::seed(&self.seed))
    }

    pub fn persist<T: Record>(&self, data: &[T]) -> Result<()> {
        self.save(T::KEY, data)
    }

    /// The collection for `T` as stored, without passing through `T`. Keys
    /// the typed record would default or drop are kept as they are.
    pub fn raw_collection<T: Record>(&self) -> Result<Vec<Value>> {
        let seed = T::seed(&self.seed)
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        self.load(T::KEY, &seed)
    }

    pub fn persist_raw<T: Record>(&self, data: &[Value]) -> Result<()> {
        self.save(T::KEY, data)
    }
}
