//! Table formatting for CLI output

use super::{format_kes, format_timestamp};
use nyumba_sdk::{Listing, MaintenanceRequest, ReferralRecord, Subscription, TenantLease};
use tabled::{settings::Style, Table, Tabled};

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

/// Render listings as a table
pub fn listings_table(listings: &[Listing]) -> String {
    #[derive(Tabled)]
    struct ListingRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Location")]
        location: String,
        #[tabled(rename = "Bedrooms")]
        bedrooms: String,
        #[tabled(rename = "Rent")]
        price: String,
        #[tabled(rename = "Status")]
        status: String,
    }

    let rows = listings
        .iter()
        .map(|listing| ListingRow {
            id: listing.id.clone(),
            title: listing.title.clone(),
            location: listing.location.clone(),
            bedrooms: listing
                .bedrooms
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            price: format_kes(listing.price),
            status: listing.status.to_string(),
        })
        .collect();

    render::<ListingRow>(rows)
}

/// Render tenant leases as a table
pub fn tenants_table(tenants: &[TenantLease]) -> String {
    #[derive(Tabled)]
    struct TenantRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Phone")]
        phone: String,
        #[tabled(rename = "Unit")]
        unit: String,
        #[tabled(rename = "Rent")]
        rent: String,
        #[tabled(rename = "Balance Due")]
        balance: String,
        #[tabled(rename = "Lease Ends")]
        lease_end: String,
    }

    let rows = tenants
        .iter()
        .map(|tenant| TenantRow {
            id: tenant.id.clone(),
            name: tenant.name.clone(),
            phone: tenant.phone.clone(),
            unit: or_dash(tenant.unit.as_deref()),
            rent: format_kes(tenant.rent_amount),
            balance: format_kes(tenant.balance_due),
            lease_end: tenant
                .lease_end
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    render::<TenantRow>(rows)
}

/// Render maintenance requests as a table
pub fn maintenance_table(requests: &[MaintenanceRequest]) -> String {
    #[derive(Tabled)]
    struct MaintenanceRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Property")]
        property_id: String,
        #[tabled(rename = "Title")]
        title: String,
        #[tabled(rename = "Priority")]
        priority: String,
        #[tabled(rename = "Status")]
        status: String,
        #[tabled(rename = "Opened")]
        created_at: String,
    }

    let rows = requests
        .iter()
        .map(|request| MaintenanceRow {
            id: request.id.clone(),
            property_id: request.property_id.clone(),
            title: request.title.clone(),
            priority: request.priority.to_string(),
            status: request.status.to_string(),
            created_at: format_timestamp(request.created_at),
        })
        .collect();

    render::<MaintenanceRow>(rows)
}

/// Render referrals as a table
pub fn referrals_table(referrals: &[ReferralRecord]) -> String {
    #[derive(Tabled)]
    struct ReferralRow {
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Email")]
        email: String,
        #[tabled(rename = "Status")]
        status: String,
        #[tabled(rename = "Reward")]
        reward: String,
        #[tabled(rename = "Referred")]
        created_at: String,
    }

    let rows = referrals
        .iter()
        .map(|referral| ReferralRow {
            name: referral.referred_name.clone(),
            email: or_dash(referral.referred_email.as_deref()),
            status: referral.status.to_string(),
            reward: referral
                .reward
                .map(format_kes)
                .unwrap_or_else(|| "-".to_string()),
            created_at: format_timestamp(referral.created_at),
        })
        .collect();

    render::<ReferralRow>(rows)
}

/// Render subscriptions as a table
pub fn subscriptions_table(subscriptions: &[Subscription]) -> String {
    #[derive(Tabled)]
    struct SubscriptionRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Plan")]
        plan: String,
        #[tabled(rename = "Billing")]
        billing_cycle: String,
        #[tabled(rename = "Amount")]
        amount: String,
        #[tabled(rename = "Status")]
        status: String,
        #[tabled(rename = "Renews")]
        renews_at: String,
    }

    let rows = subscriptions
        .iter()
        .map(|subscription| SubscriptionRow {
            id: subscription.id.clone(),
            plan: subscription.plan.clone(),
            billing_cycle: subscription.billing_cycle.to_string(),
            amount: subscription
                .amount
                .map(format_kes)
                .unwrap_or_else(|| "-".to_string()),
            status: subscription.status.clone(),
            renews_at: format_timestamp(subscription.renews_at),
        })
        .collect();

    render::<SubscriptionRow>(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listings_table_contains_rows() {
        let listings: Vec<Listing> = serde_json::from_value(json!([
            {
                "_id": "l-1",
                "title": "Bedsitter",
                "location": "Roysambu",
                "price": 9500,
                "status": "occupied"
            }
        ]))
        .unwrap();

        let table = listings_table(&listings);
        assert!(table.contains("Bedsitter"));
        assert!(table.contains("KES 9,500.00"));
        assert!(table.contains("occupied"));
    }

    #[test]
    fn test_tenants_table_shows_balance() {
        let tenants: Vec<TenantLease> = serde_json::from_value(json!([
            {
                "_id": "t-1",
                "name": "Achieng",
                "phone": "254711000000",
                "property_id": "p-1",
                "rent_amount": 18000,
                "balance_due": 4000
            }
        ]))
        .unwrap();

        let table = tenants_table(&tenants);
        assert!(table.contains("Achieng"));
        assert!(table.contains("KES 4,000.00"));
    }
}
