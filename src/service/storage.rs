use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::models::appointment::Appointment;

// The two named blobs mirror the original client's storage keys.
const SCHEDULE_FILE: &str = "schedule.json";
const REMINDED_FILE: &str = "reminded.json";

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "storage io error: {}", err),
            StorageError::Serde(err) => write!(f, "storage serialization error: {}", err),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde(err)
    }
}

// Persistence port for the schedule: the whole collection and the
// fired-reminder id set are read once at startup and overwritten on every
// mutation. Implementations must not partially apply a save.
pub trait ScheduleStorage: Send + Sync {
    fn load(&self) -> Result<(Vec<Appointment>, HashSet<String>), StorageError>;
    fn save(
        &self,
        appointments: &[Appointment],
        reminded: &HashSet<String>,
    ) -> Result<(), StorageError>;
}

pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_blob<T: serde::de::DeserializeOwned + Default>(
        &self,
        file: &str,
    ) -> Result<T, StorageError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl ScheduleStorage for JsonFileStorage {
    fn load(&self) -> Result<(Vec<Appointment>, HashSet<String>), StorageError> {
        let appointments: Vec<Appointment> = self.read_blob(SCHEDULE_FILE)?;
        let reminded: HashSet<String> = self.read_blob(REMINDED_FILE)?;
        Ok((appointments, reminded))
    }

    fn save(
        &self,
        appointments: &[Appointment],
        reminded: &HashSet<String>,
    ) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(
            self.dir.join(SCHEDULE_FILE),
            serde_json::to_string(appointments)?,
        )?;
        fs::write(
            self.dir.join(REMINDED_FILE),
            serde_json::to_string(reminded)?,
        )?;
        Ok(())
    }
}

// In-memory implementation for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<(Vec<Appointment>, HashSet<String>)>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScheduleStorage for MemoryStorage {
    fn load(&self) -> Result<(Vec<Appointment>, HashSet<String>), StorageError> {
        let state = self.state.lock().unwrap();
        Ok(state.clone())
    }

    fn save(
        &self,
        appointments: &[Appointment],
        reminded: &HashSet<String>,
    ) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        *state = (appointments.to_vec(), reminded.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn file_storage_round_trips_both_blobs() {
        let dir = env::temp_dir().join(format!("schedulechat_test_{}", uuid::Uuid::new_v4()));
        let storage = JsonFileStorage::new(&dir);

        let appointments = vec![Appointment {
            id: "a1".to_string(),
            title: "Dentist".to_string(),
            date: "2025-03-10".to_string(),
            time: "09:00".to_string(),
            reminder_minutes: Some(15),
        }];
        let reminded: HashSet<String> = ["a1".to_string()].into_iter().collect();

        storage.save(&appointments, &reminded).expect("save should succeed");
        let (loaded, loaded_reminded) = storage.load().expect("load should succeed");
        assert_eq!(loaded, appointments);
        assert_eq!(loaded_reminded, reminded);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_storage_loads_empty_state_when_files_missing() {
        let dir = env::temp_dir().join(format!("schedulechat_test_{}", uuid::Uuid::new_v4()));
        let storage = JsonFileStorage::new(&dir);
        let (appointments, reminded) = storage.load().expect("missing files are empty state");
        assert!(appointments.is_empty());
        assert!(reminded.is_empty());
    }
}
