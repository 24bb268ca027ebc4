//! Cash position carried from year to year during a projection

/// Running cash position since project inception
///
/// Values are folded forward one year at a time; the payback year is latched
/// on the first year the cumulative total reaches zero and never moves after.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashPosition {
    /// Cumulative cash flow including upfront capital
    pub cumulative_cash_flow: f64,

    /// First year (1-indexed) with non-negative cumulative cash flow
    pub payback_year: Option<u32>,
}

impl CashPosition {
    /// Position before year 1: the upfront capital has been spent
    pub fn opening(upfront_capex: f64) -> Self {
        Self {
            cumulative_cash_flow: -upfront_capex,
            payback_year: None,
        }
    }

    /// Position after booking `net_profit` for `year`
    pub fn advance(self, year: u32, net_profit: f64) -> Self {
        let cumulative_cash_flow = self.cumulative_cash_flow + net_profit;
        let payback_year = self
            .payback_year
            .or_else(|| (cumulative_cash_flow >= 0.0).then_some(year));

        Self {
            cumulative_cash_flow,
            payback_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_position_is_negative_capex() {
        let position = CashPosition::opening(1500.0);
        assert_eq!(position.cumulative_cash_flow, -1500.0);
        assert_eq!(position.payback_year, None);
    }

    #[test]
    fn test_payback_latches_first_crossing() {
        let position = CashPosition::opening(100.0)
            .advance(1, 50.0)
            .advance(2, 60.0)
            .advance(3, -500.0)
            .advance(4, 1000.0);

        assert_eq!(position.payback_year, Some(2));
        assert_eq!(position.cumulative_cash_flow, 610.0);
    }

    #[test]
    fn test_exactly_zero_counts_as_payback() {
        let position = CashPosition::opening(100.0).advance(1, 100.0);
        assert_eq!(position.payback_year, Some(1));
    }

    #[test]
    fn test_zero_capex_pays_back_on_first_non_negative_year() {
        let position = CashPosition::opening(0.0).advance(1, -1.0).advance(2, 1.0);
        assert_eq!(position.payback_year, Some(2));
    }
}
