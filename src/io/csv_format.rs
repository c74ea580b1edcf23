//! CSV output for balance histories
//!
//! Writes one row per point with columns: account, range, date, balance.
//! Dates use the same millisecond ISO-8601 form as the JSON output and
//! balances are always printed with two decimals.

use crate::types::{format_instant, AccountHistory, DashboardError};
use csv::Writer;
use std::io::Write;

/// Write balance histories to CSV format
///
/// Histories are written in the order given; callers sort them.
///
/// # Arguments
///
/// * `histories` - Histories to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(DashboardError::CsvError)` if a write error occurred
pub fn write_history_csv(
    histories: &[AccountHistory],
    output: &mut dyn Write,
) -> Result<(), DashboardError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(["account", "range", "date", "balance"])?;

    for history in histories {
        for point in &history.points {
            writer.write_record(&[
                history.account_id.clone(),
                history.range.to_string(),
                format_instant(&point.date),
                format!("{:.2}", point.balance),
            ])?;
        }
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BalanceHistoryPoint, DateRange};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_history_csv() {
        let histories = vec![AccountHistory {
            account_id: "acc_1".to_string(),
            range: DateRange::OneYear,
            points: vec![
                BalanceHistoryPoint {
                    date: Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap(),
                    balance: dec!(800),
                },
                BalanceHistoryPoint {
                    date: Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap(),
                    balance: dec!(1000.5),
                },
            ],
        }];
        let mut output = Vec::new();

        write_history_csv(&histories, &mut output).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "account,range,date,balance\n\
             acc_1,1y,2024-12-31T23:59:59.000Z,800.00\n\
             acc_1,1y,2025-01-31T23:59:59.000Z,1000.50\n"
        );
    }

    #[test]
    fn test_write_empty_histories_writes_header_only() {
        let mut output = Vec::new();
        write_history_csv(&[], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "account,range,date,balance\n");
    }
}
