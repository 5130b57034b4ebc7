use crate::Database;
use anyhow::Result;

impl Database {
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
                .optional()
        })
    }

    /// Unconditional overwrite; the previous value is gone.
    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
                (key, value),
            )?;
            Ok(())
        })
    }

    pub fn remove_value(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get_value("users").unwrap(), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let db = Database::open_in_memory().unwrap();
        db.set_value("tasks", "[1]").unwrap();
        db.set_value("tasks", "[1,2]").unwrap();
        assert_eq!(db.get_value("tasks").unwrap().as_deref(), Some("[1,2]"));

        db.remove_value("tasks").unwrap();
        assert_eq!(db.get_value("tasks").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = std::env::temp_dir().join(format!("campus_db_test_{}", std::process::id()));
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("reopen.db");
        let _ = std::fs::remove_file(&path);

        {
            let db = Database::open(&path).unwrap();
            db.set_value("feedback", "[]").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_value("feedback").unwrap().as_deref(), Some("[]"));
    }
}
