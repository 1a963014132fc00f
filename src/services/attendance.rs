//! Check-in, checkout and attendance history.

use chrono::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{PageRequest, paginate, worked_hours};
use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEntry, AttendancePage, AttendanceRecord, CheckInChallenge};
use crate::otp::{OtpNotifier, generate_otp};
use crate::store::Store;

use super::require_employee;

/// Check-in codes are valid for this long unless configured otherwise.
pub const DEFAULT_OTP_TTL_MINUTES: i64 = 10;

/// Issues a check-in code and hands it to the notifier.
///
/// Fails with `Conflict` while the employee has an open attendance record.
/// A new request replaces any earlier, unredeemed code.
pub async fn request_check_in(
    store: &dyn Store,
    clock: &dyn Clock,
    notifier: &dyn OtpNotifier,
    otp_ttl: Duration,
    employee_id: Uuid,
) -> EngineResult<CheckInChallenge> {
    let employee = require_employee(store, employee_id).await?;
    if store.find_open_attendance(employee_id).await?.is_some() {
        return Err(EngineError::conflict("already checked in; check out first"));
    }

    let challenge = CheckInChallenge {
        employee_id,
        code: generate_otp(),
        expires_at: clock.now() + otp_ttl,
    };
    store.save_check_in_challenge(challenge.clone()).await?;
    notifier.deliver(&employee, &challenge.code).await?;

    debug!(employee_id = %employee_id, expires_at = %challenge.expires_at, "Check-in code stored");
    Ok(challenge)
}

/// Redeems a check-in code and opens an attendance record at the current instant.
pub async fn verify_check_in(
    store: &dyn Store,
    clock: &dyn Clock,
    employee_id: Uuid,
    code: &str,
) -> EngineResult<AttendanceRecord> {
    require_employee(store, employee_id).await?;
    let code = code.trim();
    if code.is_empty() {
        return Err(EngineError::validation("otp", "missing required field"));
    }

    let now = clock.now();
    let challenge = store
        .check_in_challenge(employee_id)
        .await?
        .ok_or_else(|| EngineError::validation("otp", "no check-in code was requested"))?;
    if challenge.is_expired(now) {
        store.clear_check_in_challenge(employee_id).await?;
        return Err(EngineError::validation("otp", "check-in code has expired"));
    }
    if challenge.code != code {
        return Err(EngineError::validation("otp", "check-in code does not match"));
    }

    let record = AttendanceRecord::open(employee_id, now);
    if !store.open_attendance(record.clone()).await? {
        return Err(EngineError::conflict("already checked in; check out first"));
    }
    store.clear_check_in_challenge(employee_id).await?;

    info!(employee_id = %employee_id, record_id = %record.id, "Checked in");
    Ok(record)
}

/// Closes the employee's open attendance record at the current instant.
///
/// Fails with `Conflict` when there is nothing to close, including when a
/// concurrent checkout closed the record first.
pub async fn check_out(
    store: &dyn Store,
    clock: &dyn Clock,
    employee_id: Uuid,
) -> EngineResult<AttendanceRecord> {
    require_employee(store, employee_id).await?;
    let open = store
        .find_open_attendance(employee_id)
        .await?
        .ok_or_else(|| EngineError::conflict("no open attendance record; check in first"))?;
    if !open.is_open() {
        return Err(EngineError::conflict("already checked out"));
    }

    let closed = store
        .close_attendance(employee_id, clock.now())
        .await?
        .ok_or_else(|| EngineError::conflict("already checked out"))?;

    info!(
        employee_id = %employee_id,
        record_id = %closed.id,
        worked_hours = %worked_hours(&closed),
        "Checked out"
    );
    Ok(closed)
}

/// Returns a page of the employee's attendance history, newest first.
pub async fn attendance_page(
    store: &dyn Store,
    employee_id: Uuid,
    page: PageRequest,
) -> EngineResult<AttendancePage> {
    require_employee(store, employee_id).await?;
    let mut records = store.attendance_for(employee_id).await?;
    records.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time));

    let window = paginate(records.len(), page);
    let attendance_details = window
        .slice(&records)
        .iter()
        .map(|record| AttendanceEntry {
            id: record.id,
            date: record.check_in_time.date_naive(),
            check_in_time: record.check_in_time,
            check_out_time: record.check_out_time,
            total_worked_hours: worked_hours(record),
        })
        .collect();

    Ok(AttendancePage {
        page: window.info(),
        attendance_details,
    })
}
