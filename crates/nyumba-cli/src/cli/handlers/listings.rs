//! Listing and inquiry command handlers

use super::read_payload;
use crate::cli::commands::{InquiryOptions, ListingAction, ListingFilters};
use crate::client::create_client;
use crate::config::CliConfig;
use crate::error::Result;
use crate::interactive::Prompter;
use crate::output::table_output::listings_table;
use crate::output::{format_kes, json_output, print_success};
use console::style;
use nyumba_sdk::{InquiryRequest, ListingQuery, ListingRequest};
use tracing::info;

impl From<ListingFilters> for ListingQuery {
    fn from(filters: ListingFilters) -> Self {
        ListingQuery {
            location: filters.location,
            property_type: filters.property_type,
            min_price: filters.min_price,
            max_price: filters.max_price,
            bedrooms: filters.bedrooms,
        }
    }
}

/// Handle `nyumba listings ...`
pub async fn handle_listings(action: ListingAction, config: &CliConfig, json: bool) -> Result<()> {
    let client = create_client(config)?;

    match action {
        ListingAction::Ls { filters } => {
            let query = ListingQuery::from(filters);
            info!("Fetching listings...");
            let listings = client.list_listings(Some(&query)).await?;

            if json {
                return json_output(&listings);
            }
            if listings.is_empty() {
                println!("No listings found matching the specified criteria.");
                return Ok(());
            }
            println!("{}", listings_table(&listings));
        }
        ListingAction::Show { id } => {
            let listing = client.get_listing(&id).await?;

            if json {
                return json_output(&listing);
            }
            println!("{}", style(&listing.title).bold());
            println!("  {} {}", style("Location:").dim(), listing.location);
            println!("  {} {}/month", style("Rent:").dim(), format_kes(listing.price));
            if let Some(bedrooms) = listing.bedrooms {
                println!("  {} {}", style("Bedrooms:").dim(), bedrooms);
            }
            if let Some(property_type) = &listing.property_type {
                println!("  {} {}", style("Type:").dim(), property_type);
            }
            println!("  {} {}", style("Status:").dim(), listing.status);
            if !listing.description.is_empty() {
                println!("\n{}", listing.description);
            }
        }
        ListingAction::Create { file } => {
            let request: ListingRequest = read_payload(&file)?;
            let listing = client.create_listing(&request).await?;

            if json {
                return json_output(&listing);
            }
            print_success(&format!("Created listing {} ({})", listing.title, listing.id));
        }
        ListingAction::Delete { id, yes } => {
            Prompter::new().confirm(&format!("Delete listing {id}?"), yes)?;
            client.delete_listing(&id).await?;
            print_success(&format!("Deleted listing {id}"));
        }
    }

    Ok(())
}

/// Handle `nyumba inquire`
pub async fn handle_inquire(options: InquiryOptions, config: &CliConfig, json: bool) -> Result<()> {
    let client = create_client(config)?;
    let inquiry = InquiryRequest {
        listing_id: options.listing,
        name: options.name,
        email: options.email,
        phone: options.phone,
        message: options.message,
    };

    let response = client.submit_inquiry(&inquiry).await?;

    if json {
        return json_output(&response);
    }
    let message = response
        .message
        .unwrap_or_else(|| "Inquiry sent to the landlord".to_string());
    print_success(&message);
    Ok(())
}
