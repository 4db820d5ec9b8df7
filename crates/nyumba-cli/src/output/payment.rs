//! Presentation of finished payments

use super::format_kes;
use console::{style, Term};
use nyumba_sdk::payment::{PaymentOutcome, PaymentReport};
use serde_json::{json, Value};
use std::io::{self, Write};

/// Renders one terminal payment outcome and waits for the user to dismiss it
#[derive(Debug, Clone, Copy)]
pub struct PaymentResultPresenter {
    wait_for_dismiss: bool,
}

impl PaymentResultPresenter {
    pub fn new(wait_for_dismiss: bool) -> Self {
        Self { wait_for_dismiss }
    }

    /// Wait for a key press only when stdout is an interactive terminal
    pub fn for_terminal(no_wait: bool) -> Self {
        Self::new(!no_wait && Term::stdout().is_term())
    }

    pub fn render(&self, report: &PaymentReport) -> String {
        let (icon, title) = match report.outcome {
            PaymentOutcome::Succeeded => (style("✓").green(), style("Payment received").green()),
            PaymentOutcome::Failed => (style("✗").red(), style("Payment not completed").red()),
            PaymentOutcome::TimedOut => (style("…").yellow(), style("Payment pending").yellow()),
            PaymentOutcome::Unreachable => {
                (style("!").yellow(), style("Payment status unknown").yellow())
            }
        };

        let attempt = &report.attempt;
        let mut lines = vec![
            format!("{} {}", icon.bold(), title.bold()),
            format!("  {}", report.message()),
            String::new(),
            format!("  {} {}", style("Amount:").dim(), format_kes(attempt.amount)),
            format!("  {} {}", style("Phone:").dim(), attempt.payer_phone),
            format!("  {} {}", style("Reference:").dim(), attempt.correlation_id),
        ];
        if let Some(receipt) = &report.receipt {
            lines.push(format!("  {} {}", style("M-Pesa receipt:").dim(), receipt));
        }
        lines.join("\n")
    }

    pub fn present<W: Write>(&self, report: &PaymentReport, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.render(report))
    }

    /// Return control to the caller, after a key press when interactive
    pub fn dismiss(&self) -> io::Result<()> {
        if !self.wait_for_dismiss {
            return Ok(());
        }
        let term = Term::stdout();
        term.write_line(&format!("\n{}", style("Press any key to continue").dim()))?;
        term.read_key()?;
        Ok(())
    }
}

/// JSON form of a finished payment for `--json` output
pub fn report_json(report: &PaymentReport) -> Value {
    json!({
        "outcome": report.outcome,
        "message": report.message(),
        "correlation_id": report.attempt.correlation_id,
        "phone": report.attempt.payer_phone,
        "amount": report.attempt.amount,
        "status": report.attempt.status,
        "queries": report.queries,
        "receipt": report.receipt,
    })
}
