//! Balance-history types
//!
//! Range selectors, their bucket policies, and the points produced by
//! reconstruction.

use super::account::AccountId;
use super::error::DashboardError;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Balance-history range selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateRange {
    /// 30 daily buckets
    OneMonth,
    /// 13 weekly buckets
    ThreeMonths,
    /// 13 bi-weekly buckets
    SixMonths,
    /// 12 month-end buckets
    OneYear,
}

/// How far apart consecutive buckets are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSpacing {
    /// Fixed number of calendar days
    Days(u32),
    /// One calendar month, boundaries on the last day of the month
    Months,
}

impl DateRange {
    /// Every accepted range, in display order
    pub const ALL: [DateRange; 4] = [
        DateRange::OneMonth,
        DateRange::ThreeMonths,
        DateRange::SixMonths,
        DateRange::OneYear,
    ];

    /// Number of points produced for this range
    pub fn bucket_count(self) -> u32 {
        match self {
            DateRange::OneMonth => 30,
            DateRange::ThreeMonths | DateRange::SixMonths => 13,
            DateRange::OneYear => 12,
        }
    }

    /// Distance between consecutive bucket boundaries
    pub fn spacing(self) -> BucketSpacing {
        match self {
            DateRange::OneMonth => BucketSpacing::Days(1),
            DateRange::ThreeMonths => BucketSpacing::Days(7),
            DateRange::SixMonths => BucketSpacing::Days(14),
            DateRange::OneYear => BucketSpacing::Months,
        }
    }

    /// Wire label (`1m`, `3m`, `6m`, `1y`)
    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::OneMonth => "1m",
            DateRange::ThreeMonths => "3m",
            DateRange::SixMonths => "6m",
            DateRange::OneYear => "1y",
        }
    }
}

impl FromStr for DateRange {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRange::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| DashboardError::invalid_range(s))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DateRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Format an instant the way the dashboard front-end expects
/// (`2025-01-15T23:59:59.999Z`)
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_instant<S: Serializer>(
    instant: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_instant(instant))
}

/// Reconstructed balance at one bucket boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceHistoryPoint {
    /// Bucket boundary
    #[serde(serialize_with = "serialize_instant")]
    pub date: DateTime<Utc>,

    /// Balance in effect at `date`, rounded to cents
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
}

/// One account's history for one range, as produced by the report strategies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountHistory {
    pub account_id: AccountId,
    pub range: DateRange,
    pub points: Vec<BalanceHistoryPoint>,
}
