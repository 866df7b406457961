//! Risk management types

use thiserror::Error;

/// Reason an entry was refused by the risk checks
///
/// Refusals are recoverable: the simulation skips the entry and carries
/// on with the next bar. They never abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenRefusal {
    /// At most one concurrent position per symbol
    #[error("Position already open for {0}")]
    AlreadyOpen(String),
    /// Position count limit hit
    #[error("Maximum number of positions reached")]
    MaxPositionsReached,
    /// Price is zero/negative or the sizeable notional rounds below one share
    #[error("Position size computes to zero shares")]
    ZeroQuantity,
    /// New position notional above the per-position cap
    #[error("Position size exceeds maximum risk threshold")]
    PositionTooLarge,
    /// Aggregate open notional plus the new position above the portfolio cap
    #[error("Total portfolio risk would exceed maximum threshold")]
    PortfolioRiskExceeded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refusal_messages() {
        assert_eq!(
            OpenRefusal::MaxPositionsReached.to_string(),
            "Maximum number of positions reached"
        );
        assert_eq!(
            OpenRefusal::AlreadyOpen("AAPL".to_string()).to_string(),
            "Position already open for AAPL"
        );
        assert_eq!(
            OpenRefusal::PortfolioRiskExceeded.to_string(),
            "Total portfolio risk would exceed maximum threshold"
        );
    }
}
