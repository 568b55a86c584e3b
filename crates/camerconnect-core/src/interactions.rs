// crates/camerconnect-core/src/interactions.rs

//! A user's interaction history ("Mes interactions" on the dashboard).

use crate::error::Result;
use crate::model::BusinessRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Contact,
    Favorite,
    Review,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 4] = [
        InteractionKind::View,
        InteractionKind::Contact,
        InteractionKind::Favorite,
        InteractionKind::Review,
    ];

    /// Label shown in the history table.
    pub fn label(self) -> &'static str {
        match self {
            InteractionKind::View => "Consultation",
            InteractionKind::Contact => "Contact",
            InteractionKind::Favorite => "Favori",
            InteractionKind::Review => "Avis",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: String,
    pub business_id: String,
    pub business_name: String,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    /// Calendar date as sent by the backend (`YYYY-MM-DD`).
    pub date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSummary {
    pub views: usize,
    pub contacts: usize,
    pub favorites: usize,
    pub reviews: usize,
}

impl InteractionSummary {
    pub fn from_slice(items: &[Interaction]) -> Self {
        items.iter().fold(Self::default(), |mut acc, i| {
            match i.kind {
                InteractionKind::View => acc.views += 1,
                InteractionKind::Contact => acc.contacts += 1,
                InteractionKind::Favorite => acc.favorites += 1,
                InteractionKind::Review => acc.reviews += 1,
            }
            acc
        })
    }

    pub fn count(&self, kind: InteractionKind) -> usize {
        match kind {
            InteractionKind::View => self.views,
            InteractionKind::Contact => self.contacts,
            InteractionKind::Favorite => self.favorites,
            InteractionKind::Review => self.reviews,
        }
    }

    pub fn total(&self) -> usize {
        self.views + self.contacts + self.favorites + self.reviews
    }
}

/// Append-only local history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionLog {
    items: Vec<Interaction>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Interaction] {
        &self.items
    }

    /// Newest first, at most `limit` entries.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &Interaction> {
        self.items.iter().rev().take(limit)
    }

    pub fn record(
        &mut self,
        business: &BusinessRecord,
        kind: InteractionKind,
        date: impl Into<String>,
    ) -> &Interaction {
        let next_id = self
            .items
            .iter()
            .filter_map(|i| i.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        self.items.push(Interaction {
            id: next_id.to_string(),
            business_id: business.id.clone(),
            business_name: business.name.clone(),
            kind,
            date: date.into(),
        });
        &self.items[self.items.len() - 1]
    }

    pub fn summary(&self) -> InteractionSummary {
        InteractionSummary::from_slice(&self.items)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, kind: InteractionKind) -> Interaction {
        Interaction {
            id: id.into(),
            business_id: "1".into(),
            business_name: "Restaurant Le Palmier".into(),
            kind,
            date: "2024-01-15".into(),
        }
    }

    #[test]
    fn summary_counts_each_kind() {
        let history = vec![
            item("1", InteractionKind::View),
            item("2", InteractionKind::View),
            item("3", InteractionKind::Contact),
            item("4", InteractionKind::Review),
        ];
        let summary = InteractionSummary::from_slice(&history);
        assert_eq!(summary.count(InteractionKind::View), 2);
        assert_eq!(summary.favorites, 0);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn log_assigns_increasing_ids_and_lists_newest_first() {
        let palmier = BusinessRecord::new("1", "Restaurant Le Palmier");
        let atelier = BusinessRecord::new("2", "Atelier Bois Précieux");
        let mut log = InteractionLog::new();
        log.record(&palmier, InteractionKind::View, "2024-01-14");
        let last = log.record(&atelier, InteractionKind::Favorite, "2024-01-15");
        assert_eq!(last.id, "2");
        assert_eq!(last.business_name, "Atelier Bois Précieux");

        let recent: Vec<&str> = log.recent(5).map(|i| i.business_id.as_str()).collect();
        assert_eq!(recent, vec!["2", "1"]);
        assert_eq!(log.summary().favorites, 1);
    }

    #[test]
    fn wire_shape_uses_type_key() {
        let parsed: Interaction = serde_json::from_str(
            r#"{"id":"9","businessId":"2","businessName":"Atelier","type":"favorite","date":"2024-01-13"}"#,
        )
        .unwrap();
        assert_eq!(parsed.kind, InteractionKind::Favorite);
        assert_eq!(parsed.kind.to_string(), "Favori");
    }
}
