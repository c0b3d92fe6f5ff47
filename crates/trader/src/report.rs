#![allow(clippy::format_push_string)]

use crate::position::PortfolioSummary;

pub struct ReportFormatter;

impl ReportFormatter {
    #[must_use]
    pub fn format(summary: &PortfolioSummary) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════\n");
        output.push_str("                PORTFOLIO REPORT                   \n");
        output.push_str("═══════════════════════════════════════════════════\n");
        output.push_str(&format!("Total Equity:      ${}\n", summary.total_equity));
        output.push_str(&format!("Cash:              ${}\n", summary.cash));
        output.push_str(&format!("Open Positions:    {}\n", summary.open_positions));
        output.push_str(&format!("Open PnL:          ${}\n", summary.open_pnl));
        output.push_str(&format!("Closed PnL:        ${}\n", summary.closed_pnl));

        if summary.total_trades > 0 {
            output.push_str(&format!(
                "Win Rate:          {:.1}%\n",
                summary.win_rate * 100.0
            ));
        } else {
            output.push_str("Win Rate:          N/A (no closed trades)\n");
        }
        output.push_str(&format!("Closed Trades:     {}\n", summary.total_trades));
        output.push_str("═══════════════════════════════════════════════════\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn report_includes_every_line() {
        let summary = PortfolioSummary {
            total_equity: dec!(103000),
            cash: dec!(92000),
            open_positions: 1,
            open_pnl: dec!(1000),
            closed_pnl: dec!(2000),
            win_rate: 1.0,
            total_trades: 1,
        };
        let report = ReportFormatter::format(&summary);
        assert!(report.contains("$103000"));
        assert!(report.contains("Open Positions:    1"));
        assert!(report.contains("100.0%"));
    }

    #[test]
    fn report_handles_no_trades() {
        let summary = PortfolioSummary {
            total_equity: dec!(100000),
            cash: dec!(100000),
            open_positions: 0,
            open_pnl: dec!(0),
            closed_pnl: dec!(0),
            win_rate: 0.0,
            total_trades: 0,
        };
        let report = ReportFormatter::format(&summary);
        assert!(report.contains("N/A"));
    }
}
