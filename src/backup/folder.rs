// databasebackup/src/backup/folder.rs
use chrono::{Datelike, Days, NaiveDate};

use crate::errors::{BackupError, Result};

/// Name of the backup folder for `date`: `YYYY-M-D`, month and day unpadded.
///
/// Both today's target folder and the outdated folder looked up for pruning are
/// named here, so the two can never disagree on the format.
pub fn backup_folder_name(date: NaiveDate) -> String {
    format!("{}-{}-{}", date.year(), date.month(), date.day())
}

/// The calendar date `days` days before `today`.
pub fn days_before(today: NaiveDate, days: u64) -> Result<NaiveDate> {
    today
        .checked_sub_days(Days::new(days))
        .ok_or(BackupError::DateOutOfRange(days))
}
