//! Error types for series construction and cash-flow projection.

use thiserror::Error;

/// Failure while projecting cash flows for one turbine or a comparison batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// A power series or financial parameter is malformed.
    ///
    /// `index` is the turbine's position in a comparison (0-based), or
    /// `None` for a single-turbine projection.
    #[error("invalid input for {}: {reason}", describe(.turbine, .index))]
    InvalidInput {
        turbine: String,
        index: Option<usize>,
        reason: String,
    },

    /// Annualized net cash flow is not positive, so the construction cost is
    /// never recovered under the model's assumptions.
    #[error(
        "break-even not reached within model assumptions for {turbine}: \
         annualized net cash flow is {annual_net_cash_flow:.2}"
    )]
    DegenerateBreakEven {
        turbine: String,
        annual_net_cash_flow: f64,
    },
}

fn describe(turbine: &str, index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("turbine #{} ({turbine})", i + 1),
        None => format!("turbine {turbine}"),
    }
}

/// Failure while building a [`PowerSeries`](super::types::PowerSeries).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("series has {timestamps} timestamps but {values} power values")]
    LengthMismatch { timestamps: usize, values: usize },

    #[error("timestamp at step {step} is not after the previous one")]
    NonIncreasingTimestamp { step: usize },

    #[error("power at step {step} must be finite and >= 0 W, got {value}")]
    InvalidPower { step: usize, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_names_comparison_position() {
        let err = ProjectionError::InvalidInput {
            turbine: "V90/2000".to_string(),
            index: Some(1),
            reason: "power series is empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid input for turbine #2 (V90/2000): power series is empty"
        );
    }

    #[test]
    fn degenerate_break_even_message() {
        let err = ProjectionError::DegenerateBreakEven {
            turbine: "V90/2000".to_string(),
            annual_net_cash_flow: -100_000.0,
        };
        assert!(err.to_string().contains("break-even not reached"));
        assert!(err.to_string().contains("-100000.00"));
    }
}
