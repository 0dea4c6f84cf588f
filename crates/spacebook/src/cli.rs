//! Clap derive structures for the `spacebook` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// spacebook -- browse, book, and manage rentable spaces
#[derive(Debug, Parser)]
#[command(
    name = "spacebook",
    version,
    about = "Book venues and manage listings from the command line",
    long_about = "A CLI client for the Spacebook venue marketplace.\n\n\
        Browse listings and submit booking requests anonymously, or sign in\n\
        to manage your own spaces, bookings, and (as admin) the platform.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "SPACEBOOK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, env = "SPACEBOOK_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SPACEBOOK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SPACEBOOK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SPACEBOOK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Account roles as CLI values.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Client,
    Owner,
    Admin,
}

impl From<RoleArg> for spacebook_core::model::Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Client => Self::Client,
            RoleArg::Owner => Self::Owner,
            RoleArg::Admin => Self::Admin,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in, sign out, and manage your account
    Auth(AuthArgs),

    /// Browse and manage space listings
    #[command(alias = "sp")]
    Spaces(SpacesArgs),

    /// Submit a booking request for a space
    Book(BookArgs),

    /// View and manage booking requests
    #[command(alias = "bk")]
    Bookings(BookingsArgs),

    /// Manage amenity options (admin)
    Amenities(AmenitiesArgs),

    /// View and toggle feature flags
    Flags(FlagsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in with email and password
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,

        /// Account password (prompted if omitted; prefer the prompt)
        #[arg(long, hide = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Signup {
        /// Display name
        #[arg(long, required = true)]
        name: String,

        /// Account email
        #[arg(long, required = true)]
        email: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Register as a space owner instead of a client
        #[arg(long)]
        owner: bool,
    },

    /// Sign out and clear the stored token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Switch the active role of a multi-role account
    SwitchRole {
        /// Role to switch to
        #[arg(value_enum)]
        role: RoleArg,
    },

    /// Request the owner role for this account
    Upgrade,

    /// Redeem an emailed verification token
    VerifyEmail {
        /// Token from the verification email
        token: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SPACES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SpacesArgs {
    #[command(subcommand)]
    pub command: SpacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SpacesCommand {
    /// List space listings
    #[command(alias = "ls")]
    List {
        /// Free-text search over name and description
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Filter by space type (e.g. studio, hall, office)
        #[arg(long = "type")]
        space_type: Option<String>,

        /// Filter by location
        #[arg(long)]
        location: Option<String>,

        /// Minimum capacity
        #[arg(long)]
        min_capacity: Option<u32>,

        /// Only featured listings
        #[arg(long)]
        featured: bool,

        /// Only your own listings (owner)
        #[arg(long)]
        owned: bool,
    },

    /// Get listing details
    Get {
        /// Space ID
        id: String,
    },

    /// Create a listing (owner)
    Create {
        /// Listing name
        #[arg(long, required = true)]
        name: String,

        /// Space type (e.g. studio, hall, office)
        #[arg(long = "type", required = true)]
        space_type: String,

        /// Price per unit
        #[arg(long, required = true)]
        price: f64,

        /// Billing unit: hour or day
        #[arg(long, default_value = "hour")]
        price_unit: String,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Location
        #[arg(long)]
        location: Option<String>,

        /// Capacity (people)
        #[arg(long)]
        capacity: Option<u32>,

        /// Amenity names (comma-separated)
        #[arg(long, value_delimiter = ',')]
        amenities: Option<Vec<String>>,
    },

    /// Update a listing (owner)
    Update {
        /// Space ID
        id: String,

        /// Listing name
        #[arg(long)]
        name: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Location
        #[arg(long)]
        location: Option<String>,

        /// Price per unit
        #[arg(long)]
        price: Option<f64>,

        /// Capacity (people)
        #[arg(long)]
        capacity: Option<u32>,

        /// Mark as featured
        #[arg(long, action = clap::ArgAction::Set)]
        featured: Option<bool>,
    },

    /// Delete a listing (owner)
    Delete {
        /// Space ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOK / BOOKINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Space ID to book
    pub space: String,

    /// Event date (YYYY-MM-DD)
    #[arg(long, required = true)]
    pub date: String,

    /// Start time (HH:MM)
    #[arg(long, required = true)]
    pub start: String,

    /// End time (HH:MM)
    #[arg(long, required = true)]
    pub end: String,

    /// Your name (defaults to the signed-in user)
    #[arg(long)]
    pub name: Option<String>,

    /// Contact email (defaults to the signed-in user)
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Notes for the owner
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// List booking requests
    #[command(alias = "ls")]
    List {
        /// Filter by space ID
        #[arg(long)]
        space: Option<String>,

        /// Filter by status (pending, confirmed, cancelled, completed)
        #[arg(long)]
        status: Option<String>,

        /// Only bookings against your own spaces (owner)
        #[arg(long)]
        owned: bool,
    },

    /// Confirm a pending booking (owner)
    Confirm {
        /// Booking ID
        id: String,
    },

    /// Cancel a booking (owner)
    Cancel {
        /// Booking ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AMENITIES / FLAGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AmenitiesArgs {
    #[command(subcommand)]
    pub command: AmenitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AmenitiesCommand {
    /// List amenity options
    #[command(alias = "ls")]
    List,

    /// Create an amenity option
    Create {
        /// Amenity name
        name: String,
    },

    /// Rename an amenity option
    Rename {
        /// Amenity ID
        id: String,

        /// New name
        name: String,
    },

    /// Delete an amenity option
    Delete {
        /// Amenity ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct FlagsArgs {
    #[command(subcommand)]
    pub command: FlagsCommand,
}

#[derive(Debug, Subcommand)]
pub enum FlagsCommand {
    /// List feature flags
    #[command(alias = "ls")]
    List,

    /// Enable or disable a feature flag (admin)
    Set {
        /// Flag name
        name: String,

        /// New state
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create an initial config file with guided setup
    Init,

    /// Display the current resolved configuration
    Show,

    /// Set a profile's base URL
    Set {
        /// Profile name
        profile: String,

        /// Backend base URL
        base_url: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
