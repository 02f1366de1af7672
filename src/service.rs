//! Engine operations over the record store.
//!
//! [`CompensationService`] is what the HTTP layer talks to. Each operation
//! takes the caller's [`Identity`], loads a fresh snapshot from the store,
//! runs the calculation rules over it and writes back through the same
//! store. Store failures are returned as [`EngineError::Store`] and never
//! retried.
//!
//! Submits and edits that go through one service, or any of its clones, are
//! serialized, so the duplicate-date check and the write it guards see the
//! same records. Writers that bypass the service are not covered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    AdminCapability, LedgerLine, build_ledger, calculate_compensated_hours, detect_target_crossing,
    group_records_by_employee, summarize_fleet, summarize_progress, validate_entry,
};
use crate::config::{ConfigLoader, DuplicateDatePolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowedDate, AuditStep, EmployeeProfile, EntryDraft, FleetReport, Identity, ProfileChanges,
    ProgressSummary, TimeRecord,
};
use crate::store::{AllowedDateSource, RecordStore};

/// The result of storing or editing an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    /// The record as stored.
    pub record: TimeRecord,
    /// The owner's progress after the change.
    pub summary: ProgressSummary,
    /// True when this change took the owner to their target.
    pub target_reached_now: bool,
    /// Eligibility and hours steps for the entry.
    pub audit_steps: Vec<AuditStep>,
}

/// Records attendance entries and reports progress toward targets.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use compensated_hours::config::ConfigLoader;
/// use compensated_hours::models::{EntryDraft, Identity};
/// use compensated_hours::service::CompensationService;
/// use compensated_hours::store::InMemoryStore;
/// use rust_decimal::Decimal;
///
/// let service = CompensationService::in_memory(Arc::new(InMemoryStore::new()), ConfigLoader::default());
/// let caller = Identity::employee("emp_001");
/// service
///     .register_profile(&caller, "Ana", None, Some(Decimal::new(40, 0)))
///     .unwrap();
///
/// let draft = EntryDraft::parse("d1", Some("07:30"), None, None).unwrap();
/// let outcome = service.submit_entry(&caller, draft).unwrap();
/// assert_eq!(outcome.summary.compensated_total, Decimal::new(50, 2));
/// ```
#[derive(Clone)]
pub struct CompensationService {
    records: Arc<dyn RecordStore>,
    dates: Arc<dyn AllowedDateSource>,
    config: ConfigLoader,
    writes: Arc<Mutex<()>>,
}

impl CompensationService {
    /// Creates a service over the given collaborators.
    pub fn new(
        records: Arc<dyn RecordStore>,
        dates: Arc<dyn AllowedDateSource>,
        config: ConfigLoader,
    ) -> Self {
        Self {
            records,
            dates,
            config,
            writes: Arc::new(Mutex::new(())),
        }
    }

    /// Creates a service whose records and dates both come from `store`.
    pub fn in_memory(store: Arc<crate::store::InMemoryStore>, config: ConfigLoader) -> Self {
        Self::new(store.clone(), store, config)
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Lists the dates open for logging, earliest first.
    pub fn allowed_dates(&self) -> EngineResult<Vec<AllowedDate>> {
        Ok(self.dates.allowed_dates()?)
    }

    /// Creates or replaces the caller's own profile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedInput`] for a blank name or a negative
    /// target.
    pub fn register_profile(
        &self,
        identity: &Identity,
        display_name: &str,
        email: Option<&str>,
        target_hours: Option<Decimal>,
    ) -> EngineResult<EmployeeProfile> {
        let display_name = check_display_name(display_name)?;
        check_target(target_hours)?;

        let profile = self.records.save_profile(EmployeeProfile {
            id: identity.employee_id.clone(),
            display_name,
            email: email.map(str::to_string),
            target_hours,
        })?;

        info!(employee_id = %profile.id, "Registered employee profile");
        Ok(profile)
    }

    /// Changes an existing profile.
    ///
    /// Employees may change their own profile; administrators may change any.
    pub fn update_profile(
        &self,
        identity: &Identity,
        employee_id: &str,
        mut changes: ProfileChanges,
    ) -> EngineResult<EmployeeProfile> {
        if !identity.may_act_for(employee_id) {
            return Err(EngineError::Forbidden {
                message: format!(
                    "employee '{}' may not change the profile of '{}'",
                    identity.employee_id, employee_id
                ),
            });
        }
        if let Some(name) = changes.display_name.take() {
            changes.display_name = Some(check_display_name(&name)?);
        }
        check_target(changes.target_hours)?;

        let mut profile =
            self.records
                .profile(employee_id)?
                .ok_or_else(|| EngineError::ProfileNotFound {
                    employee_id: employee_id.to_string(),
                })?;
        profile.apply(changes);
        let profile = self.records.save_profile(profile)?;

        info!(
            employee_id = %profile.id,
            changed_by = %identity.employee_id,
            "Updated employee profile"
        );
        Ok(profile)
    }

    /// Validates and stores a new entry for the caller.
    ///
    /// # Errors
    ///
    /// * [`EngineError::ValidationRejected`] if the entry has nothing to compensate
    /// * [`EngineError::DuplicateEntry`] if the date is already logged and the
    ///   duplicate policy is `reject`
    /// * [`EngineError::Store`] if the store fails
    pub fn submit_entry(
        &self,
        identity: &Identity,
        draft: EntryDraft,
    ) -> EngineResult<SubmissionOutcome> {
        let owner = identity.employee_id.as_str();
        let mut audit_steps = self.check_entry(owner, &draft)?;

        let _write = self.write_lock();
        let existing = self.records.list(Some(owner))?;
        self.check_duplicate(owner, &draft.date_id, &existing, None)?;

        let target = self.target_for(owner)?;
        let before = summarize_progress(target, &existing, self.config.window());

        audit_steps.push(self.hours_step(&draft));
        let record = self.records.create(TimeRecord::new(owner, draft))?;
        debug!(employee_id = %owner, record_id = %record.id, "Entry stored");

        self.finish(owner, target, before, record, audit_steps)
    }

    /// Replaces the fields of one of the caller's own entries.
    ///
    /// The same eligibility rule applies as for new entries.
    pub fn edit_entry(
        &self,
        identity: &Identity,
        record_id: Uuid,
        draft: EntryDraft,
    ) -> EngineResult<SubmissionOutcome> {
        let owner = identity.employee_id.as_str();
        self.owned_record(identity, record_id)?;
        let mut audit_steps = self.check_entry(owner, &draft)?;

        let _write = self.write_lock();
        let existing = self.records.list(Some(owner))?;
        self.check_duplicate(owner, &draft.date_id, &existing, Some(record_id))?;

        let target = self.target_for(owner)?;
        let before = summarize_progress(target, &existing, self.config.window());

        audit_steps.push(self.hours_step(&draft));
        let record = self.records.update(record_id, draft)?;
        debug!(employee_id = %owner, record_id = %record.id, "Entry updated");

        self.finish(owner, target, before, record, audit_steps)
    }

    /// Removes one of the caller's own entries and returns the new summary.
    pub fn delete_entry(&self, identity: &Identity, record_id: Uuid) -> EngineResult<ProgressSummary> {
        self.owned_record(identity, record_id)?;
        self.records.delete(record_id)?;
        info!(employee_id = %identity.employee_id, record_id = %record_id, "Entry deleted");
        self.summary(identity)
    }

    /// The caller's current progress.
    pub fn summary(&self, identity: &Identity) -> EngineResult<ProgressSummary> {
        let owner = identity.employee_id.as_str();
        let target = self.target_for(owner)?;
        let records = self.records.list(Some(owner))?;
        Ok(summarize_progress(target, &records, self.config.window()))
    }

    /// The caller's records with their per-day totals, newest first.
    pub fn ledger(&self, identity: &Identity) -> EngineResult<Vec<LedgerLine>> {
        let records = self.records.list(Some(identity.employee_id.as_str()))?;
        let dates = self.dates.allowed_dates()?;
        Ok(build_ledger(&records, &dates, self.config.window()))
    }

    /// Every employee's progress. Administrators only.
    pub fn fleet_report(&self, identity: &Identity) -> EngineResult<FleetReport> {
        let capability = AdminCapability::from_identity(identity)?;

        let profiles = self.records.profiles()?;
        let records = self.records.list(None)?;
        let grouped = group_records_by_employee(profiles, records);
        let report = summarize_fleet(&capability, &grouped, self.config.window());

        info!(
            requested_by = %identity.employee_id,
            employees = report.employees.len(),
            "Built fleet report"
        );
        Ok(report)
    }

    fn write_lock(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock holds nothing stale.
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn target_for(&self, employee_id: &str) -> EngineResult<Option<Decimal>> {
        Ok(self
            .records
            .profile(employee_id)?
            .and_then(|profile| profile.target_hours))
    }

    fn check_entry(&self, owner: &str, draft: &EntryDraft) -> EngineResult<Vec<AuditStep>> {
        let validation = validate_entry(
            draft.arrival_time,
            draft.departure_time,
            draft.other_hours,
            self.config.window(),
            1,
        )?;
        if !validation.accepted {
            warn!(
                employee_id = %owner,
                date_id = %draft.date_id,
                reason = validation.reason.as_deref().unwrap_or_default(),
                "Entry rejected"
            );
        }
        let step = validation.audit_step.clone();
        validation.into_result()?;
        Ok(vec![step])
    }

    fn check_duplicate(
        &self,
        owner: &str,
        date_id: &str,
        existing: &[TimeRecord],
        editing: Option<Uuid>,
    ) -> EngineResult<()> {
        if self.config.duplicate_dates() == DuplicateDatePolicy::Allow {
            return Ok(());
        }
        let taken = existing
            .iter()
            .any(|r| r.date_id == date_id && Some(r.id) != editing);
        if taken {
            warn!(employee_id = %owner, date_id = %date_id, "Duplicate entry refused");
            return Err(EngineError::DuplicateEntry {
                employee_id: owner.to_string(),
                date_id: date_id.to_string(),
            });
        }
        Ok(())
    }

    fn hours_step(&self, draft: &EntryDraft) -> AuditStep {
        calculate_compensated_hours(
            draft.arrival_time,
            draft.departure_time,
            self.config.window(),
            2,
        )
        .audit_step
    }

    fn owned_record(&self, identity: &Identity, record_id: Uuid) -> EngineResult<TimeRecord> {
        let record = self
            .records
            .get(record_id)?
            .ok_or(EngineError::RecordNotFound { record_id })?;
        if record.employee_id != identity.employee_id {
            return Err(EngineError::Forbidden {
                message: format!(
                    "record {} does not belong to employee '{}'",
                    record_id, identity.employee_id
                ),
            });
        }
        Ok(record)
    }

    fn finish(
        &self,
        owner: &str,
        target: Option<Decimal>,
        before: ProgressSummary,
        record: TimeRecord,
        audit_steps: Vec<AuditStep>,
    ) -> EngineResult<SubmissionOutcome> {
        let records = self.records.list(Some(owner))?;
        let summary = summarize_progress(target, &records, self.config.window());

        let target_reached_now = detect_target_crossing(&before, &summary);
        if target_reached_now {
            info!(
                employee_id = %owner,
                compensated_total = %summary.compensated_total,
                "Compensation target reached"
            );
        }

        Ok(SubmissionOutcome {
            record,
            summary,
            target_reached_now,
            audit_steps,
        })
    }
}

fn check_display_name(display_name: &str) -> EngineResult<String> {
    let trimmed = display_name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MalformedInput {
            field: "display_name".to_string(),
            message: "must not be blank".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn check_target(target_hours: Option<Decimal>) -> EngineResult<()> {
    match target_hours {
        Some(target) if target < Decimal::ZERO => Err(EngineError::MalformedInput {
            field: "target_hours".to_string(),
            message: format!("must not be negative, got {}", target),
        }),
        _ => Ok(()),
    }
}
