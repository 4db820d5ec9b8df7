//! Command handlers for the Nyumba CLI

pub mod account;
pub mod config;
pub mod listings;
pub mod maintenance;
pub mod pay;
pub mod tenants;

use crate::error::{CliError, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a JSON payload file into a request schema
pub(crate) fn read_payload<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| CliError::Input {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyumba_sdk::NewMaintenanceRequest;
    use std::io::Write;

    #[test]
    fn test_read_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"property_id": "p-1", "title": "Leaking tap", "description": "Kitchen sink"}}"#
        )
        .unwrap();

        let request: NewMaintenanceRequest = read_payload(file.path()).unwrap();
        assert_eq!(request.title, "Leaking tap");
    }

    #[test]
    fn test_read_payload_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_payload::<NewMaintenanceRequest>(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Input { ref path, .. } if path == file.path()));
    }
}
