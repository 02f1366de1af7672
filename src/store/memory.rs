//! In-process store used by the server binary and by tests.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;
use uuid::Uuid;

use crate::models::{AllowedDate, EmployeeProfile, EntryDraft, TimeRecord};

use super::{AllowedDateSource, RecordStore, StoreError, StoreResult};

/// A [`RecordStore`] and [`AllowedDateSource`] kept in memory.
///
/// # Example
///
/// ```
/// use compensated_hours::models::{EntryDraft, TimeRecord};
/// use compensated_hours::store::{InMemoryStore, RecordStore};
///
/// let store = InMemoryStore::new();
/// let draft = EntryDraft::parse("d1", Some("07:00"), None, None).unwrap();
/// store.create(TimeRecord::new("emp_001", draft)).unwrap();
///
/// assert_eq!(store.list(Some("emp_001")).unwrap().len(), 1);
/// assert!(store.list(Some("emp_002")).unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<Uuid, TimeRecord>>,
    profiles: RwLock<HashMap<String, EmployeeProfile>>,
    dates: RwLock<Vec<AllowedDate>>,
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Unavailable {
        message: "store lock poisoned".to_string(),
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with the given allowed dates.
    pub fn with_allowed_dates(dates: Vec<AllowedDate>) -> Self {
        let store = Self::new();
        if let Ok(mut slot) = store.dates.write() {
            *slot = dates;
        }
        store
    }

    /// Opens a date for logging.
    pub fn add_allowed_date(&self, date: AllowedDate) -> StoreResult<()> {
        self.dates.write().map_err(poisoned)?.push(date);
        Ok(())
    }
}

impl RecordStore for InMemoryStore {
    fn list(&self, employee_id: Option<&str>) -> StoreResult<Vec<TimeRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        let mut listed: Vec<TimeRecord> = records
            .values()
            .filter(|r| employee_id.is_none_or(|id| r.employee_id == id))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<TimeRecord>> {
        Ok(self.records.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn create(&self, record: TimeRecord) -> StoreResult<TimeRecord> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.contains_key(&record.id) {
            return Err(StoreError::Rejected {
                message: format!("record {} already exists", record.id),
            });
        }
        debug!(record_id = %record.id, employee_id = %record.employee_id, "Stored record");
        records.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, id: Uuid, fields: EntryDraft) -> StoreResult<TimeRecord> {
        let mut records = self.records.write().map_err(poisoned)?;
        let record = records.get_mut(&id).ok_or(StoreError::NotFound { id })?;
        record.apply(fields);
        Ok(record.clone())
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.records
            .write()
            .map_err(poisoned)?
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }

    fn profile(&self, employee_id: &str) -> StoreResult<Option<EmployeeProfile>> {
        Ok(self
            .profiles
            .read()
            .map_err(poisoned)?
            .get(employee_id)
            .cloned())
    }

    fn profiles(&self) -> StoreResult<Vec<EmployeeProfile>> {
        let mut profiles: Vec<EmployeeProfile> =
            self.profiles.read().map_err(poisoned)?.values().cloned().collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(profiles)
    }

    fn save_profile(&self, profile: EmployeeProfile) -> StoreResult<EmployeeProfile> {
        self.profiles
            .write()
            .map_err(poisoned)?
            .insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }
}

impl AllowedDateSource for InMemoryStore {
    fn allowed_dates(&self) -> StoreResult<Vec<AllowedDate>> {
        let mut dates = self.dates.read().map_err(poisoned)?.clone();
        dates.sort_by_key(|d| d.date);
        Ok(dates)
    }
}
