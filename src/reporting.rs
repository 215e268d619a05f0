//! Console reports for single-turbine projections and comparisons.

use std::fmt;

use crate::finance::compare::Comparison;
use crate::finance::kpi::ComparisonTable;
use crate::finance::projection::CashflowProjection;

/// Single-turbine analysis report.
pub struct ProjectionReport<'a> {
    pub location: &'a str,
    pub projection: &'a CashflowProjection,
}

impl fmt::Display for ProjectionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.projection;
        let fin = p.financials();
        let title = format!("Analysis for {} wind turbine", fin.turbine_type);
        let rule = "-".repeat(title.len());

        writeln!(f, "{rule}")?;
        writeln!(f, "{title}")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Total time analyzed: {:.1} years", p.time_span_years())?;
        writeln!(f, "Construction Cost for Turbine: $ {:.0}", fin.construction_cost)?;
        writeln!(f, "Hub Height: {} m", fin.hub_height_m)?;
        writeln!(
            f,
            "Annual Maintenance Cost: $ {:.0}",
            fin.annual_maintenance_cost().trunc()
        )?;
        writeln!(f, "Revenue per kWh: $ {}", fin.revenue_per_kwh)?;
        writeln!(f)?;
        writeln!(f, "Total Energy Output: {:.0} MWh", p.total_energy_mwh())?;
        writeln!(f, "Total Revenue over the time range: $ {:.0}", p.total_revenue())?;
        writeln!(f, "Total Profit over the time range: $ {:.0}", p.total_profit())?;
        match p.break_even_years() {
            Ok(years) => write!(f, "Break-Even Point reached in {years:.2} years"),
            Err(_) => write!(f, "Break-Even Point: not reached within model assumptions"),
        }
    }
}

/// Multi-turbine comparison report.
pub struct ComparisonReport<'a> {
    pub location: &'a str,
    pub comparison: &'a Comparison,
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.comparison;
        writeln!(f, "{}", "-".repeat(24))?;
        writeln!(f, "Wind Turbine Comparison")?;
        writeln!(f, "{}", "-".repeat(24))?;
        writeln!(f)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Total time analyzed: {:.1} years", c.time_span_years())?;
        writeln!(f, "Revenue per kWh: $ {}", c.revenue_per_kwh)?;
        writeln!(f)?;
        write!(f, "{}", ComparisonTable(&c.summary))?;
        if c.len() != 2 {
            write!(
                f,
                "\n\nNote: financial comparison plots are only available for exactly two turbines"
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::finance::types::{PowerSeries, TurbineFinancials};
    use crate::finance::{compare, project};

    fn series(watts: f64, steps: usize) -> PowerSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date");
        PowerSeries::hourly(start, vec![watts; steps]).expect("valid series")
    }

    fn financials(name: &str) -> TurbineFinancials {
        TurbineFinancials {
            turbine_type: name.to_string(),
            hub_height_m: 135.0,
            construction_cost: 1_000_000.0,
            maintenance_rate: 0.0,
            revenue_per_kwh: 0.10,
        }
    }

    #[test]
    fn projection_report_shows_break_even() {
        // 2 MW constant for a year at $0.10/kWh = $1,752,000 revenue
        let p = project(&series(2_000_000.0, 8760), &financials("E-126/4200"))
            .expect("valid projection");
        let out = ProjectionReport {
            location: "Boulder, CO",
            projection: &p,
        }
        .to_string();
        assert!(out.contains("Analysis for E-126/4200 wind turbine"));
        assert!(out.contains("Location: Boulder, CO"));
        assert!(out.contains("Total time analyzed: 1.0 years"));
        assert!(out.contains("Total Energy Output: 17520 MWh"));
        assert!(out.contains("Break-Even Point reached in 0.57 years"));
    }

    #[test]
    fn projection_report_handles_unreached_break_even() {
        let mut f = financials("V90/2000");
        f.maintenance_rate = 0.02;
        let p = project(&series(0.0, 24), &f).expect("valid projection");
        let out = ProjectionReport {
            location: "x",
            projection: &p,
        }
        .to_string();
        assert!(out.contains("not reached within model assumptions"));
    }

    #[test]
    fn comparison_report_notes_non_pair() {
        let c = compare(
            &[series(1000.0, 24), series(1000.0, 24), series(1000.0, 24)],
            &[financials("A"), financials("B"), financials("C")],
            0.07,
        )
        .expect("valid comparison");
        let out = ComparisonReport {
            location: "x",
            comparison: &c,
        }
        .to_string();
        assert!(out.contains("Wind Turbine Comparison"));
        assert!(out.contains("only available for exactly two turbines"));
    }

    #[test]
    fn comparison_report_for_pair_has_no_note() {
        let c = compare(
            &[series(1000.0, 24), series(1000.0, 24)],
            &[financials("A"), financials("B")],
            0.07,
        )
        .expect("valid comparison");
        let out = ComparisonReport {
            location: "x",
            comparison: &c,
        }
        .to_string();
        assert!(!out.contains("Note:"));
        assert!(out.contains("Revenue per kWh: $ 0.07"));
    }
}
