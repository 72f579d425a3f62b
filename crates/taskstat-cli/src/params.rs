//! Parsing of selection flags into query filters.

use chrono::{DateTime, Duration, TimeZone, Utc};
use taskstat_core::{Label, Selector, TaskStatus};

use crate::StatError;

/// Flag value meaning "match anything".
pub const ANY: &str = "*";

/// Resolve `--age` to the oldest create time still listed.
///
/// Accepts an integer with a unit suffix (`s`, `m`, `h`, `d`, `w`), counted
/// back from `now`, or a bare integer read as UTC epoch seconds.
pub fn parse_age(age: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, StatError> {
    let invalid = || StatError::InvalidArgument(format!("unable to parse age string '{}'", age));

    let age = age.trim();
    if !age.is_empty() && age.bytes().all(|b| b.is_ascii_digit()) {
        let secs: i64 = age.parse().map_err(|_| invalid())?;
        return Utc.timestamp_opt(secs, 0).single().ok_or_else(invalid);
    }

    let Some((unit_at, _)) = age.char_indices().last() else {
        return Err(invalid());
    };
    let (amount, unit) = age.split_at(unit_at);
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let amount: i64 = amount.parse().map_err(|_| invalid())?;

    let delta = match unit {
        "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        _ => None,
    }
    .ok_or_else(invalid)?;

    now.checked_sub_signed(delta).ok_or_else(invalid)
}

/// Parse `--status` values; `*` anywhere selects every status.
pub fn parse_statuses(values: &[String]) -> Result<Selector<TaskStatus>, StatError> {
    if values.iter().any(|v| v == ANY) {
        return Ok(Selector::Any);
    }
    let statuses = values
        .iter()
        .map(|v| v.parse::<TaskStatus>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Selector::Only(statuses))
}

/// Parse `--users`, falling back to the current OS user.
pub fn parse_users(values: &[String], os_user: Option<String>) -> Result<Selector<String>, StatError> {
    if values.iter().any(|v| v == ANY) {
        return Ok(Selector::Any);
    }
    if !values.is_empty() {
        return Ok(Selector::Only(values.to_vec()));
    }
    match os_user {
        Some(user) => Ok(Selector::Only(vec![user])),
        None => Err(StatError::InvalidArgument(
            "could not determine the current user; pass --users".to_string(),
        )),
    }
}

/// Parse `--jobs`; no values means any job.
pub fn parse_jobs(values: &[String]) -> Selector<String> {
    if values.is_empty() {
        Selector::Any
    } else {
        Selector::Only(values.to_vec())
    }
}

pub fn parse_labels(values: &[String]) -> Result<Vec<Label>, StatError> {
    values
        .iter()
        .map(|v| v.parse::<Label>().map_err(StatError::from))
        .collect()
}

/// Name of the user running this process, if the environment says.
pub fn os_user() -> Option<String> {
    ["USER", "LOGNAME", "USERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|user| !user.is_empty())
}
