//! CSV export for projection step data.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::finance::projection::CashflowProjection;

/// Column header for projection CSV export.
const HEADER: &str = "step,timestamp,power_w,cost,revenue,profit,\
                      cumulative_revenue,cumulative_profit";

/// Timestamp layout used in exported rows.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Exports one projection to a CSV file at the given path.
///
/// Writes a header row followed by one row per step. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(projection: &CashflowProjection, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(projection, buf)
}

/// Writes one projection as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(projection: &CashflowProjection, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for i in 0..projection.len() {
        let timestamp = projection
            .timestamps()
            .get(i)
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();
        wtr.write_record(&[
            i.to_string(),
            timestamp,
            format!("{:.3}", projection.power_w()[i]),
            format!("{:.4}", projection.cost()[i]),
            format!("{:.6}", projection.revenue()[i]),
            format!("{:.4}", projection.profit()[i]),
            format!("{:.6}", projection.cumulative_revenue()[i]),
            format!("{:.4}", projection.cumulative_profit()[i]),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::finance::project;
    use crate::finance::types::{PowerSeries, TurbineFinancials};

    fn projection(steps: usize) -> CashflowProjection {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date");
        let watts = (0..steps).map(|i| 1000.0 * i as f64).collect();
        let series = PowerSeries::hourly(start, watts).expect("valid series");
        let financials = TurbineFinancials {
            turbine_type: "E-126/4200".to_string(),
            hub_height_m: 135.0,
            construction_cost: 10_000_000.0,
            maintenance_rate: 0.02,
            revenue_per_kwh: 0.07,
        };
        project(&series, &financials).expect("valid projection")
    }

    #[test]
    fn header_matches_schema() {
        let mut buf = Vec::new();
        write_csv(&projection(1), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "step,timestamp,power_w,cost,revenue,profit,cumulative_revenue,cumulative_profit"
        );
    }

    #[test]
    fn row_count_matches_step_count() {
        let mut buf = Vec::new();
        write_csv(&projection(24), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 24 data rows
        assert_eq!(lines.len(), 25);
    }

    #[test]
    fn deterministic_output() {
        let p = projection(5);
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&p, &mut buf1).ok();
        write_csv(&p, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn numeric_columns_parse() {
        let mut buf = Vec::new();
        write_csv(&projection(3), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.expect("every row should parse");
            assert_eq!(rec.len(), 8);
            assert_eq!(&rec[1][..10], "2024-01-01");
            for i in 2..8 {
                let val: Result<f64, _> = rec[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 3);
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("projection.csv");
        export_csv(&projection(4), &path).expect("export should succeed");
        let content = std::fs::read_to_string(&path).expect("file should exist");
        assert_eq!(content.lines().count(), 5);
    }
}
