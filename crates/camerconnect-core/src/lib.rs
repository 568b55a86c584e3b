// crates/camerconnect-core/src/lib.rs

//! # camerconnect-core
//!
//! Listing engine for the CamerConnect business directory.
//!
//! Raw backend records go through a fixed pipeline:
//!
//! ```text
//! normalize -> filter -> sort (stable) -> paginate -> compose (premium tier)
//! ```
//!
//! [`run`] executes the last four stages over any [`Listable`] slice;
//! [`Directory::listing`] does it for one sector of a fetched directory.
//!
//! ```
//! use camerconnect_core::{Directory, Grouping, Query, SortKey};
//!
//! let dir = Directory::from_json_str(r#"{
//!     "Restauration": [
//!         {"id": "1", "name": "Chez Paul", "rating": 4.2},
//!         {"id": "2", "name": "Le Palmier", "rating": 4.8, "isPremium": true}
//!     ]
//! }"#).unwrap();
//!
//! let query = Query::new().sort_by(SortKey::Rating);
//! let outcome = dir.listing(Some("Restauration"), &query, Grouping::Tiered).unwrap();
//! assert_eq!(outcome.total_matches(), 2);
//! assert_eq!(outcome.records()[0].name, "Le Palmier");
//! ```

pub mod compose;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod interactions;
pub mod model;
pub mod normalize;
pub mod paginate;
pub mod query;
#[doc(hidden)]
pub mod raw; // raw backend shapes, used by the normalizer and the client
pub mod reviews;
pub mod session;
pub mod sort;
pub mod state;
pub mod text;
pub mod traits;

#[cfg(feature = "json")]
pub mod loader;

#[cfg(feature = "client")]
pub mod client;

// Re-exports
pub use crate::compose::{compose, Grouping, ListingView};
pub use crate::config::ClientConfig;
pub use crate::directory::{Directory, Sector, DEFAULT_SECTOR};
pub use crate::engine::{run, ListingOutcome, ListingPage};
pub use crate::error::{DirectoryError, Result};
pub use crate::favorites::Favorites;
pub use crate::interactions::{Interaction, InteractionKind, InteractionLog, InteractionSummary};
pub use crate::model::{BusinessRecord, Contact, DirectoryStats, PaymentStatus};
pub use crate::paginate::{paginate, Page, PageMeta};
pub use crate::query::{Query, SortKey, DEFAULT_PAGE_SIZE};
pub use crate::reviews::{Review, ReviewSummary};
pub use crate::session::{Session, User};
pub use crate::state::{LoadTicket, LoadTracker, PageState};
pub use crate::text::{fold_key, MatchMode};
pub use crate::traits::{Listable, NameMatch};

#[cfg(feature = "client")]
pub use crate::client::{ApiClient, Registration};
