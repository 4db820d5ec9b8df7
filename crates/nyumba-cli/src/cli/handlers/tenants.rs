//! Tenant command handlers

use crate::cli::commands::TenantAction;
use crate::client::create_client;
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::table_output::tenants_table;
use crate::output::{format_kes, json_output};
use console::style;

/// Handle `nyumba tenants ...`
pub async fn handle_tenants(action: TenantAction, config: &CliConfig, json: bool) -> Result<()> {
    let client = create_client(config)?;

    match action {
        TenantAction::Ls => {
            let tenants = client.list_tenants().await?;

            if json {
                return json_output(&tenants);
            }
            if tenants.is_empty() {
                println!("No tenants found.");
                return Ok(());
            }
            println!("{}", tenants_table(&tenants));
        }
        TenantAction::Show { id } => {
            let tenant = client.get_tenant(&id).await?;

            if json {
                return json_output(&tenant);
            }
            println!("{} {}", style(&tenant.name).bold(), style(&tenant.id).dim());
            println!("  {} {}", style("Phone:").dim(), tenant.phone);
            if let Some(email) = &tenant.email {
                println!("  {} {}", style("Email:").dim(), email);
            }
            println!("  {} {}", style("Property:").dim(), tenant.property_id);
            if let Some(unit) = &tenant.unit {
                println!("  {} {}", style("Unit:").dim(), unit);
            }
            println!("  {} {}", style("Rent:").dim(), format_kes(tenant.rent_amount));
            let balance = format_kes(tenant.balance_due);
            if tenant.balance_due.is_sign_positive() && !tenant.balance_due.is_zero() {
                println!("  {} {}", style("Balance due:").dim(), style(balance).yellow());
            } else {
                println!("  {} {}", style("Balance due:").dim(), style(balance).green());
            }
            if let (Some(start), Some(end)) = (tenant.lease_start, tenant.lease_end) {
                println!("  {} {start} to {end}", style("Lease:").dim());
            }
        }
    }

    Ok(())
}
