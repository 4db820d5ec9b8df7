//! Maintenance request command handlers

use super::read_payload;
use crate::cli::commands::MaintenanceAction;
use crate::client::create_client;
use crate::config::CliConfig;
use crate::error::Result;
use crate::interactive::Prompter;
use crate::output::table_output::maintenance_table;
use crate::output::{json_output, print_success};
use nyumba_sdk::NewMaintenanceRequest;

/// Handle `nyumba maintenance ...`
pub async fn handle_maintenance(
    action: MaintenanceAction,
    config: &CliConfig,
    json: bool,
) -> Result<()> {
    let client = create_client(config)?;

    match action {
        MaintenanceAction::Ls => {
            let requests = client.list_maintenance_requests().await?;

            if json {
                return json_output(&requests);
            }
            if requests.is_empty() {
                println!("No maintenance requests.");
                return Ok(());
            }
            println!("{}", maintenance_table(&requests));
        }
        MaintenanceAction::Create { file } => {
            let request: NewMaintenanceRequest = read_payload(&file)?;
            let created = client.create_maintenance_request(&request).await?;

            if json {
                return json_output(&created);
            }
            print_success(&format!(
                "Raised maintenance request {} ({} priority)",
                created.id, created.priority
            ));
        }
        MaintenanceAction::Delete { id, yes } => {
            Prompter::new().confirm(&format!("Delete maintenance request {id}?"), yes)?;
            client.delete_maintenance_request(&id).await?;
            print_success(&format!("Deleted maintenance request {id}"));
        }
    }

    Ok(())
}
