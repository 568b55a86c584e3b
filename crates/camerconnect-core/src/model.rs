// crates/camerconnect-core/src/model.rs

//! Canonical, normalized business records.

use crate::traits::Listable;
use serde::{Deserialize, Serialize};

/// Optional ways to reach a business.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.website.is_none()
    }
}

/// Billing state of the business's subscription (`statut_paiement`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    #[default]
    Unknown,
}

impl PaymentStatus {
    /// Accepts the backend's French labels as well as English ones.
    pub fn parse(s: &str) -> Self {
        match crate::text::fold_key(s.trim()).as_str() {
            "paye" | "payee" | "paid" | "valide" | "active" => PaymentStatus::Paid,
            "non paye" | "impaye" | "unpaid" | "en attente" | "pending" => PaymentStatus::Unpaid,
            _ => PaymentStatus::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Payé",
            PaymentStatus::Unpaid => "Non payé",
            PaymentStatus::Unknown => "Inconnu",
        }
    }
}

/// A business entry in the normalized directory.
///
/// Numeric fields are always present (missing values become `0`), so sorting
/// and filtering never have to reason about absent data. Records are
/// immutable once built; a re-fetch replaces them wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Free text, usually `"City, District"`.
    pub location: String,
    pub sector: String,
    pub city: Option<String>,
    pub district: Option<String>,

    /// 0.0 ..= 5.0
    pub rating: f64,
    pub review_count: u64,
    pub interaction_count: u64,

    pub premium: bool,
    pub payment: PaymentStatus,
    pub services: Vec<String>,
    pub contact: Contact,
    pub hours: Option<String>,
    pub image: Option<String>,
}

impl BusinessRecord {
    /// Minimal record with every optional field at its default.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            location: String::new(),
            sector: String::new(),
            city: None,
            district: None,
            rating: 0.0,
            review_count: 0,
            interaction_count: 0,
            premium: false,
            payment: PaymentStatus::Unknown,
            services: Vec::new(),
            contact: Contact::default(),
            hours: None,
            image: None,
        }
    }
}

impl Listable for BusinessRecord {
    fn listing_id(&self) -> &str {
        &self.id
    }
    fn name_str(&self) -> &str {
        &self.name
    }
    fn description_str(&self) -> &str {
        &self.description
    }
    fn location_str(&self) -> &str {
        &self.location
    }
    fn is_premium(&self) -> bool {
        self.premium
    }
    fn rating(&self) -> f64 {
        self.rating
    }
    fn review_count(&self) -> u64 {
        self.review_count
    }
    fn interaction_count(&self) -> u64 {
        self.interaction_count
    }
}

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub sectors: usize,
    pub businesses: usize,
    pub premium: usize,
    /// Mean rating over businesses that have at least one review; 0 when none.
    pub average_rating: f64,
}
