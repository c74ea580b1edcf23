//! Bucket boundary generation
//!
//! This module turns a [`DateRange`] and a reference instant into the ordered
//! list of period-end instants that balance history is sampled at.
//!
//! Every boundary is the last representable moment of its day
//! (`23:59:59.999` UTC), never the start. Day-spaced ranges step back from
//! today in fixed multiples; the yearly range uses the last day of each of the
//! last 12 calendar months, the current month included.

use crate::types::{BucketSpacing, DashboardError, DateRange};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};

/// Generate bucket boundaries for `range`, oldest first
///
/// `now` is the single reference instant for the whole computation; callers
/// read the clock once and pass it in.
///
/// # Arguments
///
/// * `range` - Validated range selector
/// * `now` - Reference instant
///
/// # Returns
///
/// * `Ok(Vec<DateTime<Utc>>)` - Exactly `range.bucket_count()` strictly increasing instants
/// * `Err(DashboardError::DateOutOfRange)` - Only at the edges of chrono's calendar
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_dashboard_engine::core::generate_buckets;
/// use rust_dashboard_engine::types::DateRange;
///
/// let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
/// let buckets = generate_buckets(DateRange::OneYear, now).unwrap();
/// assert_eq!(buckets.len(), 12);
/// assert_eq!(buckets[0].to_rfc3339(), "2024-02-29T23:59:59.999+00:00");
/// ```
pub fn generate_buckets(
    range: DateRange,
    now: DateTime<Utc>,
) -> Result<Vec<DateTime<Utc>>, DashboardError> {
    let today = now.date_naive();
    let count = range.bucket_count();

    // Offsets run from the oldest bucket down to 0 (today / this month)
    (0..count)
        .rev()
        .map(|offset| {
            let day = match range.spacing() {
                BucketSpacing::Days(step) => {
                    today.checked_sub_days(Days::new(u64::from(offset) * u64::from(step)))
                }
                BucketSpacing::Months => month_end(today, offset),
            };
            day.and_then(end_of_day)
                .ok_or_else(|| DashboardError::date_out_of_range(now))
        })
        .collect()
}

/// Last calendar day of the month `months_back` months before `today`'s month
fn month_end(today: NaiveDate, months_back: u32) -> Option<NaiveDate> {
    today
        .with_day(1)?
        .checked_sub_months(Months::new(months_back))?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// `23:59:59.999` UTC on `day`
fn end_of_day(day: NaiveDate) -> Option<DateTime<Utc>> {
    day.and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| naive.and_utc())
}
