use camerconnect_core::SortKey;
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// CLI arguments for camerconnect
#[derive(Debug, Parser)]
#[command(
    name = "camerconnect",
    version,
    about = "Browse, search and bookmark businesses of the CamerConnect directory"
)]
pub struct CliArgs {
    /// Read the directory from a snapshot (.json or .json.gz) instead of the API
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Backend base URL (overrides CAMERCONNECT_API_URL)
    #[arg(long = "api", global = true)]
    pub api: Option<String>,

    /// Businesses per page (overrides CAMERCONNECT_PAGE_SIZE)
    #[arg(long = "page-size", global = true)]
    pub page_size: Option<NonZeroUsize>,

    /// Where favorites and the login session are kept
    #[arg(long = "state-dir", global = true)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the directory contents
    Stats,

    /// List sectors, optionally filtered by a name fragment
    Sectors {
        /// Case- and accent-insensitive fragment (e.g. "sante")
        search: Option<String>,
    },

    /// One page of businesses, sorted and filtered
    List(ListArgs),

    /// Details of one business
    Show {
        /// Business id
        id: String,
    },

    /// Manage local favorites
    Favorites {
        #[command(subcommand)]
        action: FavoriteAction,
    },

    /// Log in and keep the session locally
    #[cfg(feature = "client")]
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account
    #[cfg(feature = "client")]
    Register(RegisterArgs),

    /// Close the current session
    #[cfg(feature = "client")]
    Logout,

    /// Show who is logged in
    Whoami,

    /// Recent local interactions (consultations, favorites) and their totals
    History {
        /// How many entries to print
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// Download the whole directory into a snapshot file
    #[cfg(feature = "client")]
    Fetch {
        /// Output path (.json)
        output: PathBuf,
    },

    /// Most popular sectors, as returned by the backend
    #[cfg(feature = "client")]
    Popular,

    /// A named aggregate from the backend's statistics endpoint
    #[cfg(feature = "client")]
    ApiStats {
        /// Statistic name (e.g. "entreprises")
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Restrict to one sector (case- and accent-insensitive)
    #[arg(long)]
    pub sector: Option<String>,

    /// Substring of name, description or location
    #[arg(short = 's', long, default_value = "")]
    pub search: String,

    /// rating, reviews, interactions or name
    #[arg(long, default_value_t = SortKey::Rating)]
    pub sort: SortKey,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub district: Option<String>,

    /// Only premium businesses
    #[arg(long)]
    pub premium: bool,

    /// 1-based page number; out-of-range values are clamped
    #[arg(short = 'p', long, default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// One list instead of premium / regular sections
    #[arg(long)]
    pub flat: bool,

    /// Ignore accents when searching ("yaounde" finds "Yaoundé")
    #[arg(long)]
    pub folded: bool,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum FavoriteAction {
    /// Print favorites that still exist in the directory
    List,
    Add { id: String },
    Remove { id: String },
    /// Add if absent, remove if present
    Toggle { id: String },
}

#[cfg(feature = "client")]
#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub nom: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long, default_value = "")]
    pub ville: String,
    #[arg(long, default_value = "")]
    pub age: String,
    #[arg(long, default_value = "")]
    pub genre: String,
}
