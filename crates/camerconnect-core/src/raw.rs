// crates/camerconnect-core/src/raw.rs

//! Raw business records exactly as they arrive from the backend or from the
//! mock fixtures.
//!
//! Two key vocabularies exist in the wild: the French keys of the Laravel API
//! (`nom_entreprise`, `moyenne_notes`, ...) and the English keys of the mock
//! data (`name`, `rating`, ...). Both are kept as separate optional fields so
//! a record carrying both never trips serde's duplicate-field check; the
//! normalizer decides which one wins.
//!
//! Every field is a [`Loose`] value: numbers may come as JSON strings, flags as
//! `0`/`1`, and any of them may be `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A JSON scalar of unknown type, read leniently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Loose(pub Value);

impl Loose {
    /// Text view. Numbers are rendered, blanks and non-scalars are `None`.
    pub fn as_text(&self) -> Option<String> {
        let s = match &self.0 {
            Value::String(s) => s.trim().to_owned(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!s.is_empty()).then_some(s)
    }

    pub fn as_f64(&self) -> Option<f64> {
        let value = match &self.0 {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|f| f.is_finite())
    }

    /// Non-negative count. Negative or fractional input is floored at zero.
    pub fn as_count(&self) -> Option<u64> {
        match &self.0 {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().map(|f| if f > 0.0 { f as u64 } else { 0 })),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| if f > 0.0 { f as u64 } else { 0 }))
            }
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &self.0 {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|v| v != 0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "oui" => Some(true),
                "false" | "0" | "no" | "non" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Sequence of strings. Accepts a JSON array or a comma-separated string.
    pub fn as_list(&self) -> Vec<String> {
        match &self.0 {
            Value::Array(items) => items
                .iter()
                .filter_map(|v| Loose(v.clone()).as_text())
                .collect(),
            Value::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Member of an object value, for nested shapes like `contact.phone`.
    pub fn field(&self, key: &str) -> Option<Loose> {
        self.0.get(key).filter(|v| !v.is_null()).cloned().map(Loose)
    }
}

impl From<Value> for Loose {
    fn from(v: Value) -> Self {
        Loose(v)
    }
}

/// Raw business record from JSON.
/// We do *not* normalize anything here; see [`crate::normalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBusiness {
    // --- identity ---
    #[serde(default)]
    pub id_entreprise: Option<Loose>,
    #[serde(default)]
    pub id: Option<Loose>,

    // --- text ---
    #[serde(default)]
    pub nom_entreprise: Option<Loose>,
    #[serde(default)]
    pub name: Option<Loose>,
    #[serde(default)]
    pub description: Option<Loose>,
    #[serde(default)]
    pub localisation: Option<Loose>,
    #[serde(default)]
    pub location: Option<Loose>,
    #[serde(default)]
    pub ville: Option<Loose>,
    #[serde(default)]
    pub city: Option<Loose>,
    #[serde(default)]
    pub quartier: Option<Loose>,
    #[serde(default)]
    pub district: Option<Loose>,
    #[serde(default)]
    pub secteur: Option<Loose>,
    #[serde(default)]
    pub category: Option<Loose>,

    // --- numbers ---
    #[serde(default)]
    pub moyenne_notes: Option<Loose>,
    #[serde(default)]
    pub rating: Option<Loose>,
    #[serde(default)]
    pub nombre_avis: Option<Loose>,
    #[serde(default)]
    pub reviews: Option<Loose>,
    #[serde(default)]
    pub nombre_interactions: Option<Loose>,
    #[serde(default)]
    pub interactions: Option<Loose>,

    // --- tier / billing ---
    #[serde(default)]
    pub type_abonnement: Option<Loose>,
    #[serde(default, rename = "isPremium")]
    pub is_premium: Option<Loose>,
    #[serde(default)]
    pub statut_paiement: Option<Loose>,
    #[serde(default, rename = "paymentStatus")]
    pub payment_status: Option<Loose>,

    // --- contact & misc ---
    #[serde(default)]
    pub telephone: Option<Loose>,
    #[serde(default)]
    pub phone: Option<Loose>,
    #[serde(default)]
    pub email: Option<Loose>,
    #[serde(default)]
    pub site_web: Option<Loose>,
    #[serde(default)]
    pub website: Option<Loose>,
    #[serde(default)]
    pub services: Option<Loose>,
    #[serde(default)]
    pub horaires: Option<Loose>,
    #[serde(default)]
    pub hours: Option<Loose>,
    #[serde(default)]
    pub image: Option<Loose>,

    // --- canonical keys, as written by `Directory::save_json_file` ---
    #[serde(default)]
    pub sector: Option<Loose>,
    #[serde(default)]
    pub review_count: Option<Loose>,
    #[serde(default)]
    pub interaction_count: Option<Loose>,
    #[serde(default)]
    pub premium: Option<Loose>,
    #[serde(default)]
    pub payment: Option<Loose>,
    #[serde(default)]
    pub contact: Option<Loose>,
}

/// Body of `GET /api/secteurs/entreprises`: sector name -> raw records.
///
/// Records are kept as untyped values so one malformed entry can be dropped
/// without failing the whole sector.
pub type SectorsRaw = BTreeMap<String, Vec<Value>>;

/// Pick the first present, non-blank text among candidates.
pub(crate) fn first_text(candidates: &[&Option<Loose>]) -> Option<String> {
    candidates
        .iter()
        .find_map(|c| c.as_ref().and_then(Loose::as_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_numbers_accept_strings() {
        assert_eq!(Loose(json!("4.5")).as_f64(), Some(4.5));
        assert_eq!(Loose(json!("3,7")).as_f64(), Some(3.7));
        assert_eq!(Loose(json!(12)).as_count(), Some(12));
        assert_eq!(Loose(json!("12")).as_count(), Some(12));
        assert_eq!(Loose(json!(-3)).as_count(), Some(0));
        assert_eq!(Loose(json!(null)).as_f64(), None);
        assert_eq!(Loose(json!("n/a")).as_f64(), None);
    }

    #[test]
    fn loose_lists_accept_arrays_and_csv() {
        assert_eq!(
            Loose(json!(["Livraison", "", "Traiteur"])).as_list(),
            vec!["Livraison", "Traiteur"]
        );
        assert_eq!(
            Loose(json!("Wifi, Parking ,")).as_list(),
            vec!["Wifi", "Parking"]
        );
    }

    #[test]
    fn raw_business_tolerates_both_vocabularies_at_once() {
        let raw: RawBusiness = serde_json::from_value(json!({
            "id": 7,
            "id_entreprise": "7",
            "nom_entreprise": "Chez Paul",
            "name": "Chez Paul (mock)",
            "moyenne_notes": null,
            "isPremium": true,
            "extra_field": {"ignored": true}
        }))
        .unwrap();
        assert_eq!(first_text(&[&raw.nom_entreprise, &raw.name]).as_deref(), Some("Chez Paul"));
        assert_eq!(raw.is_premium.and_then(|l| l.as_bool()), Some(true));
        assert!(raw.moyenne_notes.is_none());
    }
}
