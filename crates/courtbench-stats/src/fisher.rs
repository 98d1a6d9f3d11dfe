//! Two-sided exact Fisher test on a 2×2 table.
//!
//! Conditioning on the margins, the top-left cell follows a hypergeometric
//! distribution. The two-sided p-value sums the probability of every table
//! with the same margins that is no more likely than the observed one.
//! Probabilities are compared in log space so large tables do not overflow.

use statrs::distribution::{Discrete, Hypergeometric};
use thiserror::Error;
use tracing::debug;

use crate::ContingencyTable;

/// Relative slack when comparing table probabilities against the observed one.
const RELATIVE_TOLERANCE: f64 = 1e-7;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid hypergeometric parameters: {0}")]
    Distribution(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisherResult {
    /// Sample odds ratio `(a·d)/(b·c)`.
    pub odds_ratio: f64,
    pub p_value: f64,
}

/// Run the two-sided exact test.
///
/// A table with an empty row or column carries no evidence either way and
/// returns an odds ratio of 0 with p-value 1.
pub fn fisher_exact(table: &ContingencyTable) -> Result<FisherResult, StatsError> {
    if table.is_degenerate() {
        debug!(%table, "degenerate contingency table");
        return Ok(FisherResult {
            odds_ratio: 0.0,
            p_value: 1.0,
        });
    }

    let [[a, b], [c, d]] = table.cells();
    let odds_ratio = sample_odds_ratio(a, b, c, d);

    let row_total = a + b;
    let col_total = a + c;
    let population = table.total();
    let dist = Hypergeometric::new(population, col_total, row_total)
        .map_err(|e| StatsError::Distribution(e.to_string()))?;

    // Support of the top-left cell given the margins.
    let low = row_total.saturating_sub(b + d);
    let high = row_total.min(col_total);

    let observed = dist.ln_pmf(a);
    let cutoff = observed + RELATIVE_TOLERANCE.ln_1p();
    let p_value: f64 = (low..=high)
        .map(|x| dist.ln_pmf(x))
        .filter(|&ln_p| ln_p <= cutoff)
        .map(f64::exp)
        .sum();

    Ok(FisherResult {
        odds_ratio,
        p_value: p_value.min(1.0),
    })
}

fn sample_odds_ratio(a: u64, b: u64, c: u64, d: u64) -> f64 {
    let numerator = a as f64 * d as f64;
    let denominator = b as f64 * c as f64;
    if denominator == 0.0 {
        if numerator == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-8,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn symmetric_table_is_not_significant() {
        let result = fisher_exact(&ContingencyTable::new(2, 3, 1, 4)).unwrap();
        assert_close(result.odds_ratio, 8.0 / 3.0);
        assert_close(result.p_value, 1.0);
    }

    #[test]
    fn skewed_table() {
        let result = fisher_exact(&ContingencyTable::new(8, 2, 1, 5)).unwrap();
        assert_close(result.odds_ratio, 20.0);
        assert_close(result.p_value, 0.034965034965034965);
    }

    #[test]
    fn larger_table() {
        let result = fisher_exact(&ContingencyTable::new(7, 17, 15, 5)).unwrap();
        assert_close(result.odds_ratio, 35.0 / 255.0);
        assert_close(result.p_value, 0.005768386750469949);
    }

    #[test]
    fn zero_off_diagonal_gives_infinite_odds() {
        let result = fisher_exact(&ContingencyTable::new(3, 0, 0, 3)).unwrap();
        assert!(result.odds_ratio.is_infinite());
        assert_close(result.p_value, 0.1);
    }

    #[test]
    fn zero_diagonal_gives_zero_odds() {
        let result = fisher_exact(&ContingencyTable::new(0, 3, 3, 0)).unwrap();
        assert_eq!(result.odds_ratio, 0.0);
        assert_close(result.p_value, 0.1);
    }

    #[test]
    fn empty_column_is_degenerate() {
        let result = fisher_exact(&ContingencyTable::new(0, 3, 0, 4)).unwrap();
        assert_eq!(result.odds_ratio, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn empty_table_is_degenerate() {
        let result = fisher_exact(&ContingencyTable::default()).unwrap();
        assert_eq!(result.odds_ratio, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn many_participants_do_not_overflow() {
        let result = fisher_exact(&ContingencyTable::new(400, 600, 600, 400)).unwrap();
        assert!(result.p_value.is_finite());
        assert!(result.p_value < 1e-10);
    }

    #[test]
    fn p_value_never_exceeds_one() {
        let result = fisher_exact(&ContingencyTable::new(5, 5, 5, 5)).unwrap();
        assert!(result.p_value <= 1.0);
        assert_close(result.p_value, 1.0);
    }
}
