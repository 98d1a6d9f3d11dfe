//! Terminal report for the association test.

use courtbench_stats::FisherResult;

/// Print the odds ratio and p-value, fixed-point with 8 decimals.
pub fn print_fisher_report(result: &FisherResult) {
    for line in report_lines(result) {
        println!("{line}");
    }
}

fn report_lines(result: &FisherResult) -> [String; 2] {
    [
        format!("Exact Fisher test odd ratio is : {:10.8}", result.odds_ratio),
        format!("Exact Fisher test P-Value is : {:10.8}", result.p_value),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_decimal_places() {
        let lines = report_lines(&FisherResult {
            odds_ratio: 8.0 / 3.0,
            p_value: 1.0,
        });
        assert_eq!(lines[0], "Exact Fisher test odd ratio is : 2.66666667");
        assert_eq!(lines[1], "Exact Fisher test P-Value is : 1.00000000");
    }

    #[test]
    fn infinite_odds_ratio() {
        let lines = report_lines(&FisherResult {
            odds_ratio: f64::INFINITY,
            p_value: 0.1,
        });
        assert_eq!(lines[0], "Exact Fisher test odd ratio is :        inf");
        assert_eq!(lines[1], "Exact Fisher test P-Value is : 0.10000000");
    }
}
