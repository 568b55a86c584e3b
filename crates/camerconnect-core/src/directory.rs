// crates/camerconnect-core/src/directory.rs

//! The fetched directory: every business, grouped by sector.
//!
//! Structure of arrays, like a flat table: a `listed` vector holding every
//! sector entry as the backend sent it, where each [`Sector`] owns a
//! contiguous range, plus a `records` vector with one entry per business id.
//! A directory is immutable; re-fetching builds a new one and swaps it in
//! whole.

use crate::compose::Grouping;
use crate::engine::{run, ListingOutcome};
use crate::error::Result;
use crate::model::{BusinessRecord, DirectoryStats};
use crate::normalize::{normalize_all, normalize_value};
use crate::query::Query;
use crate::raw::SectorsRaw;
use crate::text::{equals_folded, MatchMode};
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::ops::Range;
use tracing::debug;

/// Sector used when a snapshot is a bare array of records.
pub const DEFAULT_SECTOR: &str = "Autres";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    /// Range of this sector's entries in the directory's `listed` vector.
    pub records_range: Range<usize>,
}

impl Sector {
    pub fn len(&self) -> usize {
        self.records_range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records_range.is_empty()
    }
}

impl NameMatch for Sector {
    fn name_str(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    sectors: Vec<Sector>,
    /// Every sector entry, sector by sector.
    listed: Vec<BusinessRecord>,
    /// One record per id, first listing wins.
    records: Vec<BusinessRecord>,
}

impl Directory {
    /// Build from the `/api/secteurs/entreprises` body.
    ///
    /// Each sector keeps every entry it lists. A business listed under
    /// several sectors appears once in [`all_records`](Self::all_records),
    /// as its first listing (map order).
    pub fn from_raw_sectors(raw: SectorsRaw) -> Self {
        let mut dir = Directory::default();
        let mut seen = HashSet::new();
        for (name, entries) in raw {
            let records = normalize_all(entries, Some(&name));
            dir.push_sector(&mut seen, name, records);
        }
        dir
    }

    /// One sector's worth of already-normalized records.
    pub fn from_records(sector: impl Into<String>, records: Vec<BusinessRecord>) -> Self {
        let mut dir = Directory::default();
        dir.push_sector(&mut HashSet::new(), sector.into(), records);
        dir
    }

    fn push_sector(
        &mut self,
        seen: &mut HashSet<String>,
        name: String,
        records: Vec<BusinessRecord>,
    ) {
        let start = self.listed.len();
        for rec in records {
            if seen.insert(rec.id.clone()) {
                self.records.push(rec.clone());
            } else {
                debug!(id = %rec.id, sector = %name, "business already listed");
            }
            self.listed.push(rec);
        }
        self.sectors.push(Sector {
            name,
            records_range: start..self.listed.len(),
        });
    }

    /// Parse a JSON document: either the sector map, or a bare array of
    /// records (put under [`DEFAULT_SECTOR`]).
    pub fn from_json_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let records = items
                    .into_iter()
                    .filter_map(|v| normalize_value(v, Some(DEFAULT_SECTOR)))
                    .collect();
                Ok(Self::from_records(DEFAULT_SECTOR, records))
            }
            other => {
                let raw: SectorsRaw = serde_json::from_value(other)?;
                Ok(Self::from_raw_sectors(raw))
            }
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_json_value(serde_json::from_str(s)?)
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn sector_names(&self) -> impl Iterator<Item = &str> {
        self.sectors.iter().map(|s| s.name.as_str())
    }

    /// Every business once, in first-listing order.
    pub fn all_records(&self) -> &[BusinessRecord] {
        &self.records
    }

    /// Sector lookup, case- and accent-insensitive.
    pub fn sector(&self, name: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| equals_folded(&s.name, name))
    }

    pub fn sector_records(&self, name: &str) -> Option<&[BusinessRecord]> {
        self.sector(name).map(|s| self.records_of(s))
    }

    /// Entries listed under `sector`, duplicates of other sectors included.
    pub fn records_of(&self, sector: &Sector) -> &[BusinessRecord] {
        self.listed.get(sector.records_range.clone()).unwrap_or_default()
    }

    pub fn find(&self, id: &str) -> Option<&BusinessRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Dashboard category search: sectors whose name contains `term`.
    pub fn search_sectors(&self, term: &str) -> Vec<&Sector> {
        self.sectors
            .iter()
            .filter(|s| s.matches(term, MatchMode::Folded))
            .collect()
    }

    pub fn stats(&self) -> DirectoryStats {
        let reviewed: Vec<f64> = self
            .records
            .iter()
            .filter(|r| r.review_count > 0)
            .map(|r| r.rating)
            .collect();
        let average_rating = if reviewed.is_empty() {
            0.0
        } else {
            reviewed.iter().sum::<f64>() / reviewed.len() as f64
        };
        DirectoryStats {
            sectors: self.sectors.len(),
            businesses: self.records.len(),
            premium: self.records.iter().filter(|r| r.premium).count(),
            average_rating,
        }
    }

    /// Run the listing engine over one sector (or everything for `None`).
    /// `None` when the sector does not exist, which pages show as "not found".
    pub fn listing(
        &self,
        sector: Option<&str>,
        query: &Query,
        grouping: Grouping,
    ) -> Option<ListingOutcome<'_, BusinessRecord>> {
        let records = match sector {
            Some(name) => self.sector_records(name)?,
            None => self.all_records(),
        };
        Some(run(records, query, grouping))
    }
}
