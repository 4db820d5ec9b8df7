//! Referral, subscription and settings command handlers

use crate::cli::commands::{ReferralAction, SettingsAction, SubscriptionAction};
use crate::client::create_client;
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::table_output::{referrals_table, subscriptions_table};
use crate::output::{json_output, print_success};
use nyumba_sdk::{NotificationSettings, SettingsUpdate};

/// Handle `nyumba referrals ...`
pub async fn handle_referrals(action: ReferralAction, config: &CliConfig, json: bool) -> Result<()> {
    let client = create_client(config)?;

    match action {
        ReferralAction::Ls => {
            let referrals = client.list_referrals().await?;

            if json {
                return json_output(&referrals);
            }
            if referrals.is_empty() {
                println!("No referrals yet.");
                return Ok(());
            }
            println!("{}", referrals_table(&referrals));
        }
    }

    Ok(())
}

/// Handle `nyumba subscriptions ...`
pub async fn handle_subscriptions(
    action: SubscriptionAction,
    config: &CliConfig,
    json: bool,
) -> Result<()> {
    let client = create_client(config)?;

    match action {
        SubscriptionAction::Ls => {
            let subscriptions = client.list_subscriptions().await?;

            if json {
                return json_output(&subscriptions);
            }
            if subscriptions.is_empty() {
                println!("No subscriptions.");
                return Ok(());
            }
            println!("{}", subscriptions_table(&subscriptions));
        }
    }

    Ok(())
}

/// Handle `nyumba settings ...`
pub async fn handle_settings(action: SettingsAction, config: &CliConfig, json: bool) -> Result<()> {
    match action {
        SettingsAction::Update {
            display_name,
            email,
            phone,
            notify_email,
            notify_sms,
        } => {
            let notifications = match (notify_email, notify_sms) {
                (Some(email), Some(sms)) => Some(NotificationSettings { email, sms }),
                _ => None,
            };
            let update = SettingsUpdate {
                display_name,
                email,
                phone,
                notifications,
            };

            let client = create_client(config)?;
            let settings = client.update_settings(&update).await?;

            if json {
                return json_output(&settings);
            }
            print_success("Settings updated");
        }
    }

    Ok(())
}
