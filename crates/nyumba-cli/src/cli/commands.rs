use clap::Subcommand;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Main CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pay with an M-Pesa prompt sent to your phone
    Pay {
        #[command(flatten)]
        options: PayOptions,
    },

    /// Look up payments
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },

    /// Browse and manage property listings
    Listings {
        #[command(subcommand)]
        action: ListingAction,
    },

    /// View tenants and their balances
    Tenants {
        #[command(subcommand)]
        action: TenantAction,
    },

    /// Raise and track maintenance requests
    Maintenance {
        #[command(subcommand)]
        action: MaintenanceAction,
    },

    /// View your referrals
    Referrals {
        #[command(subcommand)]
        action: ReferralAction,
    },

    /// View landlord subscriptions
    Subscriptions {
        #[command(subcommand)]
        action: SubscriptionAction,
    },

    /// Send an inquiry about a listing
    Inquire {
        #[command(flatten)]
        options: InquiryOptions,
    },

    /// Update account settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options for `nyumba pay`
#[derive(clap::Args, Debug)]
pub struct PayOptions {
    /// Paying tenant account id
    #[arg(long)]
    pub tenant: String,

    /// M-Pesa phone number to prompt (asked interactively when omitted)
    #[arg(long)]
    pub phone: Option<String>,

    /// Amount in KES (defaults to the tenant's balance due)
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Return as soon as the outcome is shown instead of waiting for a key
    #[arg(long)]
    pub no_wait: bool,
}

#[derive(Subcommand, Debug)]
pub enum PaymentAction {
    /// Check a payment by its checkout request id
    Status {
        /// Checkout request id returned when the payment was started
        payment_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListingAction {
    /// List listings
    Ls {
        #[command(flatten)]
        filters: ListingFilters,
    },

    /// Show one listing
    Show {
        /// Listing id
        id: String,
    },

    /// Create a listing from a JSON file
    Create {
        /// Path to the listing JSON
        file: PathBuf,
    },

    /// Delete a listing
    Delete {
        /// Listing id
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Filters for listing search
#[derive(clap::Args, Debug, Default)]
pub struct ListingFilters {
    /// Location (e.g. Kilimani)
    #[arg(long)]
    pub location: Option<String>,

    /// Property type (e.g. apartment, bedsitter)
    #[arg(long)]
    pub property_type: Option<String>,

    /// Minimum monthly rent
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Maximum monthly rent
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Number of bedrooms
    #[arg(long)]
    pub bedrooms: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum TenantAction {
    /// List tenants
    Ls,

    /// Show one tenant
    Show {
        /// Tenant id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MaintenanceAction {
    /// List maintenance requests
    Ls,

    /// Raise a maintenance request from a JSON file
    Create {
        /// Path to the request JSON
        file: PathBuf,
    },

    /// Delete a maintenance request
    Delete {
        /// Request id
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReferralAction {
    /// List referrals
    Ls,
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionAction {
    /// List subscriptions
    Ls,
}

/// Options for `nyumba inquire`
#[derive(clap::Args, Debug)]
pub struct InquiryOptions {
    /// Listing id
    #[arg(long)]
    pub listing: String,

    /// Your name
    #[arg(long)]
    pub name: String,

    /// Your email address
    #[arg(long)]
    pub email: String,

    /// Your phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Message to the landlord
    #[arg(long, short)]
    pub message: String,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Change one or more account settings
    Update {
        #[arg(long)]
        display_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        /// Email notifications on/off
        #[arg(long, requires = "notify_sms")]
        notify_email: Option<bool>,

        /// SMS notifications on/off
        #[arg(long, requires = "notify_email")]
        notify_sms: Option<bool>,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
