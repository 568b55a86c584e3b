// crates/camerconnect-core/src/normalize.rs

//! # Record Normalizer
//!
//! Raw -> canonical. Maps the backend's French keys (and the mock data's
//! English keys) onto [`BusinessRecord`] and fills every missing field with
//! its default. This stage never fails: a record without an identifier is
//! dropped with a data-quality warning and everything else is defaulted.

use crate::model::{BusinessRecord, Contact, PaymentStatus};
use crate::raw::{first_text, Loose, RawBusiness};
use serde_json::Value;
use tracing::warn;

pub const MAX_RATING: f64 = 5.0;

/// **Standard Converter:** one raw record -> canonical record.
///
/// `sector` is used when the record itself does not name its sector (records
/// nested under a sector key in `/api/secteurs/entreprises` usually don't).
pub fn normalize_record(raw: RawBusiness, sector: Option<&str>) -> Option<BusinessRecord> {
    let Some(id) = first_text(&[&raw.id_entreprise, &raw.id]) else {
        let name = first_text(&[&raw.nom_entreprise, &raw.name]);
        warn!(
            name = name.as_deref().unwrap_or("<unnamed>"),
            "dropping business record without identifier"
        );
        return None;
    };

    let city = first_text(&[&raw.ville, &raw.city]);
    let district = first_text(&[&raw.quartier, &raw.district]);
    let location = first_text(&[&raw.localisation, &raw.location])
        .unwrap_or_else(|| compose_location(city.as_deref(), district.as_deref()));

    let rating = [&raw.moyenne_notes, &raw.rating]
        .iter()
        .find_map(|c| c.as_ref().and_then(Loose::as_f64))
        .map(clamp_rating)
        .unwrap_or(0.0);

    let premium = premium_flag(&raw);
    let payment = first_text(&[&raw.statut_paiement, &raw.payment_status, &raw.payment])
        .map(|s| PaymentStatus::parse(&s))
        .unwrap_or_default();

    let services = raw
        .services
        .as_ref()
        .map(Loose::as_list)
        .unwrap_or_default();

    Some(BusinessRecord {
        name: first_text(&[&raw.nom_entreprise, &raw.name]).unwrap_or_default(),
        description: first_text(&[&raw.description]).unwrap_or_default(),
        location,
        sector: first_text(&[&raw.secteur, &raw.category, &raw.sector])
            .or_else(|| sector.map(str::to_owned))
            .unwrap_or_default(),
        city,
        district,
        rating,
        review_count: first_count(&[&raw.nombre_avis, &raw.reviews, &raw.review_count]),
        interaction_count: first_count(&[
            &raw.nombre_interactions,
            &raw.interactions,
            &raw.interaction_count,
        ]),
        premium,
        payment,
        services,
        contact: contact(&raw),
        hours: first_text(&[&raw.horaires, &raw.hours]),
        image: first_text(&[&raw.image]),
        id,
    })
}

/// Normalize an untyped JSON value. Non-object entries are dropped.
pub fn normalize_value(value: Value, sector: Option<&str>) -> Option<BusinessRecord> {
    match serde_json::from_value::<RawBusiness>(value) {
        Ok(raw) => normalize_record(raw, sector),
        Err(e) => {
            warn!(error = %e, sector = sector.unwrap_or(""), "dropping unreadable business record");
            None
        }
    }
}

/// Normalize a whole batch, preserving input order.
pub fn normalize_all<I>(raw: I, sector: Option<&str>) -> Vec<BusinessRecord>
where
    I: IntoIterator<Item = Value>,
{
    raw.into_iter()
        .filter_map(|v| normalize_value(v, sector))
        .collect()
}

fn first_count(candidates: &[&Option<Loose>]) -> u64 {
    candidates
        .iter()
        .find_map(|c| c.as_ref().and_then(Loose::as_count))
        .unwrap_or(0)
}

/// Flat contact keys first, then a nested `contact` object.
fn contact(raw: &RawBusiness) -> Contact {
    let nested = |key: &str| raw.contact.as_ref().and_then(|c| c.field(key));
    Contact {
        phone: first_text(&[&raw.telephone, &raw.phone, &nested("phone")]),
        email: first_text(&[&raw.email, &nested("email")]),
        website: first_text(&[&raw.site_web, &raw.website, &nested("website")]),
    }
}

/// Into `0..=5`. Anything not above zero, `-0.0` included, becomes `+0.0`.
fn clamp_rating(r: f64) -> f64 {
    if r > 0.0 {
        r.min(MAX_RATING)
    } else {
        0.0
    }
}

/// `type_abonnement == "premium"` on the API, `isPremium` in mock data.
fn premium_flag(raw: &RawBusiness) -> bool {
    if let Some(tier) = first_text(&[&raw.type_abonnement]) {
        return tier.eq_ignore_ascii_case("premium");
    }
    [&raw.is_premium, &raw.premium]
        .iter()
        .find_map(|c| c.as_ref().and_then(Loose::as_bool))
        .unwrap_or(false)
}

fn compose_location(city: Option<&str>, district: Option<&str>) -> String {
    match (city, district) {
        (Some(c), Some(d)) => format!("{c}, {d}"),
        (Some(c), None) => c.to_owned(),
        (None, Some(d)) => d.to_owned(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_backend_keys() {
        let rec = normalize_value(
            json!({
                "id_entreprise": 42,
                "nom_entreprise": "Lamana",
                "description": "Produits laitiers",
                "ville": "Dschang",
                "quartier": "Foto",
                "moyenne_notes": "4.6",
                "nombre_avis": 18,
                "nombre_interactions": "240",
                "type_abonnement": "Premium",
                "statut_paiement": "Payé",
                "services": "Livraison, Vente en gros"
            }),
            Some("Agro-alimentaire"),
        )
        .unwrap();

        assert_eq!(rec.id, "42");
        assert_eq!(rec.name, "Lamana");
        assert_eq!(rec.location, "Dschang, Foto");
        assert_eq!(rec.city.as_deref(), Some("Dschang"));
        assert_eq!(rec.sector, "Agro-alimentaire");
        assert_eq!(rec.rating, 4.6);
        assert_eq!(rec.review_count, 18);
        assert_eq!(rec.interaction_count, 240);
        assert!(rec.premium);
        assert_eq!(rec.payment, PaymentStatus::Paid);
        assert_eq!(rec.services, vec!["Livraison", "Vente en gros"]);
    }

    #[test]
    fn maps_mock_keys() {
        let rec = normalize_value(
            json!({
                "id": "3",
                "name": "Salon de Beauté Élégance",
                "location": "Douala, Bonanjo",
                "rating": 4.4,
                "reviews": 203,
                "isPremium": true,
                "category": "Beauté",
                "phone": "+237 6 99 00 00 00"
            }),
            None,
        )
        .unwrap();

        assert_eq!(rec.location, "Douala, Bonanjo");
        assert_eq!(rec.sector, "Beauté");
        assert_eq!(rec.review_count, 203);
        assert!(rec.premium);
        assert_eq!(rec.contact.phone.as_deref(), Some("+237 6 99 00 00 00"));
    }

    #[test]
    fn missing_fields_default_to_zero_and_empty() {
        let rec = normalize_value(json!({"id": "x", "rating": null}), None).unwrap();
        assert_eq!(rec.rating, 0.0);
        assert_eq!(rec.review_count, 0);
        assert_eq!(rec.interaction_count, 0);
        assert!(rec.services.is_empty());
        assert!(!rec.premium);
        assert_eq!(rec.name, "");
        assert!(rec.contact.is_empty());
    }

    #[test]
    fn out_of_range_ratings_are_clamped() {
        let high = normalize_value(json!({"id": "a", "rating": 9}), None).unwrap();
        let low = normalize_value(json!({"id": "b", "rating": -1}), None).unwrap();
        assert_eq!(high.rating, 5.0);
        assert_eq!(low.rating, 0.0);
    }

    #[test]
    fn negative_zero_rating_becomes_zero() {
        let out = normalize_all(
            vec![json!({"id": "a", "moyenne_notes": "-0"}), json!({"id": "b"})],
            None,
        );
        assert!(out[0].rating.is_sign_positive());
        assert_eq!(out[0].rating.to_bits(), out[1].rating.to_bits());
    }

    #[test]
    fn records_without_id_are_dropped() {
        let out = normalize_all(
            vec![
                json!({"name": "No id"}),
                json!("not an object"),
                json!({"id": "", "name": "Blank id"}),
                json!({"id": 1, "name": "Kept"}),
            ],
            None,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Kept");
    }
}
