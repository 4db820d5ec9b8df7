//! Payment command handlers

use crate::cli::commands::{PayOptions, PaymentAction};
use crate::client::create_client;
use crate::config::CliConfig;
use crate::error::Result;
use crate::interactive::Prompter;
use crate::output::payment::{report_json, PaymentResultPresenter};
use crate::output::{json_output, print_error, print_info};
use crate::progress::{complete_spinner_and_clear, complete_spinner_error, create_spinner};
use console::style;
use nyumba_sdk::payment::{PaymentError, PaymentFlow, PaymentOrder};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle `nyumba pay`: initiate, follow and present one payment
pub async fn handle_pay(options: PayOptions, config: &CliConfig, json: bool) -> Result<()> {
    let phone = match options.phone {
        Some(phone) => phone,
        None => Prompter::new().phone_number()?,
    };
    let mut order = PaymentOrder::new(options.tenant, phone);
    if let Some(amount) = options.amount {
        order = order.amount(amount);
    }

    let client = create_client(config)?;
    let poller_config = config.payment.poller_config();
    let max_attempts = poller_config.max_attempts;

    // Ctrl-C aborts an outstanding request or stops polling; a prompt that
    // already reached the phone may still be approved
    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt received, cancelling payment flow");
                cancel.cancel();
            }
        }
    });

    let flow = PaymentFlow::new(Arc::new(client), poller_config).with_cancellation(cancel);

    let spinner = create_spinner("Sending payment request...");
    let progress = tokio::spawn({
        let spinner = spinner.clone();
        let mut state = flow.subscribe();
        let phone = order.phone.trim().to_string();
        async move {
            while state.changed().await.is_ok() {
                let attempts = state.borrow_and_update().attempts();
                match attempts {
                    Some(0) => spinner.set_message(format!(
                        "Prompt sent to {phone}. Enter your M-Pesa PIN to approve the payment..."
                    )),
                    Some(n) => spinner.set_message(format!(
                        "Waiting for M-Pesa confirmation (check {n} of {max_attempts})..."
                    )),
                    None => break,
                }
            }
        }
    });

    let result = flow.run(&order).await;
    progress.abort();
    ctrl_c.abort();

    match result {
        Ok(report) => {
            complete_spinner_and_clear(spinner);
            if json {
                return json_output(&report_json(&report));
            }
            let presenter = PaymentResultPresenter::for_terminal(options.no_wait);
            presenter.present(&report, &mut std::io::stdout())?;
            presenter.dismiss()?;
            Ok(())
        }
        Err(PaymentError::Cancelled) => {
            complete_spinner_error(spinner, "Payment cancelled");
            print_info(
                "If you approved the prompt, the payment may still go through. \
                 Check your M-Pesa messages before paying again.",
            );
            Ok(())
        }
        Err(e) => {
            complete_spinner_error(spinner, "Payment could not be completed");
            if e.is_recoverable() {
                print_info(failure_hint(&e));
            } else {
                print_error(failure_hint(&e));
            }
            Err(e.into())
        }
    }
}

fn failure_hint(error: &PaymentError) -> &'static str {
    match error {
        PaymentError::MissingCorrelationId => {
            "The prompt may still reach your phone. Check your M-Pesa messages before paying again."
        }
        PaymentError::InvalidConfig { .. } => {
            "Fix the [payment] section of your configuration file and try again."
        }
        _ => "Check the phone number and amount, then try again.",
    }
}

/// Handle `nyumba payment ...`
pub async fn handle_payment(action: PaymentAction, config: &CliConfig, json: bool) -> Result<()> {
    match action {
        PaymentAction::Status { payment_id } => {
            let client = create_client(config)?;
            let status = client.payment_status(&payment_id).await?;

            if json {
                return json_output(&status);
            }

            println!("{} {}", style("Payment").bold(), style(&payment_id).cyan());
            println!("  Status: {}", status.status);
            if let Some(message) = &status.message {
                println!("  {message}");
            }
            if let Some(receipt) = &status.receipt {
                println!("  M-Pesa receipt: {receipt}");
            }
            Ok(())
        }
    }
}
