use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use campus_types::models::User;

use crate::store::KeyValueStore;

pub const SESSION_KEY: &str = "campus-user-session";

/// Key used by older portal builds. Read once, moved to [`SESSION_KEY`].
pub const LEGACY_SESSION_KEY: &str = "studenthub-user-session";

/// Snapshot of the logged-in user, kept beside the collections but written
/// independently of them.
#[derive(Clone)]
pub struct SessionStore {
    medium: Option<Arc<dyn KeyValueStore>>,
}

impl SessionStore {
    pub fn new(medium: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self { medium }
    }

    pub fn current(&self) -> Result<Option<User>> {
        let Some(medium) = &self.medium else {
            return Ok(None);
        };

        let raw = match medium.get(SESSION_KEY)? {
            Some(raw) => raw,
            None => match medium.get(LEGACY_SESSION_KEY)? {
                Some(raw) => {
                    medium.set(SESSION_KEY, &raw)?;
                    medium.remove(LEGACY_SESSION_KEY)?;
                    info!("Migrated session from legacy key");
                    raw
                }
                None => return Ok(None),
            },
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Failed to parse user session: {}", e);
                Ok(None)
            }
        }
    }

    pub fn save(&self, user: &User) -> Result<()> {
        if let Some(medium) = &self.medium {
            medium.set(SESSION_KEY, &serde_json::to_string(user)?)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if let Some(medium) = &self.medium {
            medium.remove(SESSION_KEY)?;
            medium.remove(LEGACY_SESSION_KEY)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use campus_types::models::Faculty;

    fn faculty() -> User {
        User::Faculty(Faculty {
            id: "faculty-mehta".to_string(),
            email: "mehta@campus.edu".to_string(),
            password: "faculty123".to_string(),
            full_name: "Dr. Anil Mehta".to_string(),
            branch: "Computer Science".to_string(),
            phone: String::new(),
            designation: "Professor".to_string(),
            extra: Default::default(),
        })
    }

    #[test]
    fn save_then_clear() {
        let medium: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let sessions = SessionStore::new(Some(medium));

        assert_eq!(sessions.current().unwrap(), None);
        sessions.save(&faculty()).unwrap();
        assert_eq!(sessions.current().unwrap(), Some(faculty()));

        sessions.clear().unwrap();
        assert_eq!(sessions.current().unwrap(), None);
    }

    #[test]
    fn legacy_session_is_moved_to_canonical_key() {
        let medium: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        medium
            .set(LEGACY_SESSION_KEY, &serde_json::to_string(&faculty()).unwrap())
            .unwrap();
        let sessions = SessionStore::new(Some(medium.clone()));

        assert_eq!(sessions.current().unwrap(), Some(faculty()));
        assert!(medium.get(SESSION_KEY).unwrap().is_some());
        assert!(medium.get(LEGACY_SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn unreadable_session_reads_as_logged_out() {
        let medium: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        medium.set(SESSION_KEY, "not a user").unwrap();
        let sessions = SessionStore::new(Some(medium));

        assert_eq!(sessions.current().unwrap(), None);
    }
}
