//! Configuration command handlers

use crate::cli::commands::ConfigAction;
use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::output::{json_output, print_info, print_success};
use nyumba_common::config::ConfigLoader;
use std::path::Path;

/// Handle `nyumba config ...`
pub fn handle_config(action: ConfigAction, config_path: &Path, json: bool) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = CliConfig::load_from(config_path)?;
            if json {
                return json_output(&config);
            }
            if !config_path.exists() {
                print_info(&format!(
                    "{} does not exist; showing defaults and environment overrides",
                    config_path.display()
                ));
            }
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                return Err(CliError::interactive(format!(
                    "{} already exists; pass --force to overwrite it",
                    config_path.display()
                )));
            }
            CliConfig::default().save(config_path)?;
            print_success(&format!("Wrote {}", config_path.display()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nyumba").join("config.toml");

        handle_config(ConfigAction::Init { force: false }, &path, false).unwrap();
        let written = CliConfig::load_from_file(&path).unwrap();
        assert_eq!(written.payment.max_attempts, 12);

        let again = handle_config(ConfigAction::Init { force: false }, &path, false);
        assert!(matches!(again, Err(CliError::Interactive(_))));

        handle_config(ConfigAction::Init { force: true }, &path, false).unwrap();
    }
}
