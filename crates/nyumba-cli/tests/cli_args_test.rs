//! Argument parsing tests for the nyumba binary

use clap::Parser;
use nyumba_cli::cli::commands::{Commands, ConfigAction, ListingAction, SettingsAction};
use nyumba_cli::cli::Args;
use rust_decimal_macros::dec;
use std::path::PathBuf;

#[test]
fn test_pay_arguments() {
    let args = Args::try_parse_from([
        "nyumba",
        "pay",
        "--tenant",
        "t-1",
        "--phone",
        "254712345678",
        "--amount",
        "25000",
        "--no-wait",
    ])
    .unwrap();

    match args.command {
        Commands::Pay { options } => {
            assert_eq!(options.tenant, "t-1");
            assert_eq!(options.phone.as_deref(), Some("254712345678"));
            assert_eq!(options.amount, Some(dec!(25000)));
            assert!(options.no_wait);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(args.config, PathBuf::from("~/.nyumba/config.toml"));
    assert!(!args.json);
}

#[test]
fn test_pay_amount_is_optional() {
    let args = Args::try_parse_from(["nyumba", "pay", "--tenant", "t-1"]).unwrap();
    assert!(matches!(
        args.command,
        Commands::Pay { options } if options.amount.is_none() && options.phone.is_none()
    ));
}

#[test]
fn test_pay_rejects_bad_amount() {
    assert!(Args::try_parse_from(["nyumba", "pay", "--tenant", "t-1", "--amount", "lots"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let args = Args::try_parse_from([
        "nyumba",
        "listings",
        "ls",
        "--location",
        "Kilimani",
        "--json",
        "--config",
        "/tmp/nyumba.toml",
    ])
    .unwrap();

    assert!(args.json);
    assert_eq!(args.config, PathBuf::from("/tmp/nyumba.toml"));
    match args.command {
        Commands::Listings {
            action: ListingAction::Ls { filters },
        } => assert_eq!(filters.location.as_deref(), Some("Kilimani")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_notification_flags_go_together() {
    assert!(Args::try_parse_from([
        "nyumba",
        "settings",
        "update",
        "--notify-email",
        "true"
    ])
    .is_err());

    let args = Args::try_parse_from([
        "nyumba",
        "settings",
        "update",
        "--notify-email",
        "true",
        "--notify-sms",
        "false",
    ])
    .unwrap();
    assert!(matches!(
        args.command,
        Commands::Settings {
            action: SettingsAction::Update {
                notify_email: Some(true),
                notify_sms: Some(false),
                ..
            }
        }
    ));
}

#[test]
fn test_config_init_force() {
    let args = Args::try_parse_from(["nyumba", "config", "init", "--force"]).unwrap();
    assert!(matches!(
        args.command,
        Commands::Config {
            action: ConfigAction::Init { force: true }
        }
    ));
}
