//! Basic usage example for camerconnect
//!
//! Builds a directory from a backend-shaped body and walks through the
//! listing pages a visitor would see.

use camerconnect_core::{Directory, Grouping, ListingOutcome, ListingView, MatchMode, Query, Result, SortKey};

const BODY: &str = r#"{
    "Restauration": [
        {"id_entreprise": 1, "nom_entreprise": "Restaurant Le Palmier", "description": "Cuisine camerounaise authentique", "ville": "Douala", "quartier": "Akwa", "moyenne_notes": 4.8, "nombre_avis": 127, "type_abonnement": "premium"},
        {"id_entreprise": 2, "nom_entreprise": "Chez Paul", "description": "Grillades et poisson braisé", "ville": "Dschang", "quartier": "Foto", "moyenne_notes": 4.2, "nombre_avis": 30},
        {"id_entreprise": 3, "nom_entreprise": "Mama Africa", "description": "Ndolé, eru et plats traditionnels", "ville": "Yaoundé", "quartier": "Bastos", "moyenne_notes": "4.5", "nombre_avis": "56"},
        {"id_entreprise": 4, "nom_entreprise": "Snack Express", "ville": "Douala", "quartier": "Bonanjo", "moyenne_notes": 3.9, "nombre_avis": 45, "nombre_interactions": 900}
    ],
    "Artisanat": [
        {"id_entreprise": 5, "nom_entreprise": "Atelier Bois Précieux", "description": "Meubles et sculptures sur mesure", "ville": "Yaoundé", "quartier": "Mfoundi", "moyenne_notes": 4.9, "nombre_avis": 67, "type_abonnement": "premium"}
    ]
}"#;

fn print_outcome(title: &str, outcome: &ListingOutcome<'_, camerconnect_core::BusinessRecord>) {
    println!("--- {title} ---");
    match outcome {
        ListingOutcome::NoMatches { total_records } => {
            println!("  No matches among {total_records} businesses");
        }
        ListingOutcome::Page(page) => {
            match &page.view {
                ListingView::Tiered { premium, regular } => {
                    for r in premium {
                        println!("  ★ {} ({:.1})", r.name, r.rating);
                    }
                    for r in regular {
                        println!("    {} ({:.1})", r.name, r.rating);
                    }
                }
                ListingView::Flat { items } => {
                    for r in items {
                        println!("  - {} ({} avis)", r.name, r.review_count);
                    }
                }
            }
            println!("  page {}/{}", page.meta.page, page.meta.total_pages);
        }
    }
    println!();
}

fn main() -> Result<()> {
    println!("=== CamerConnect Basic Usage Example ===\n");

    let dir = Directory::from_json_str(BODY)?;
    let stats = dir.stats();
    println!(
        "{} sectors, {} businesses ({} premium), average rating {:.2}\n",
        stats.sectors, stats.businesses, stats.premium, stats.average_rating
    );

    // Example 1: default category page (by rating, premium first)
    if let Some(out) = dir.listing(Some("Restauration"), &Query::new(), Grouping::Tiered) {
        print_outcome("Restauration, by rating", &out);
    }

    // Example 2: search plus city filter, flat list by reviews
    let q = Query::new()
        .search("a")
        .city("Douala")
        .sort_by(SortKey::ReviewCount);
    if let Some(out) = dir.listing(None, &q, Grouping::Flat) {
        print_outcome("'a' in Douala, by reviews", &out);
    }

    // Example 3: accent-insensitive search
    let q = Query::new().search("yaounde").match_mode(MatchMode::Folded);
    if let Some(out) = dir.listing(None, &q, Grouping::Tiered) {
        print_outcome("'yaounde', accents ignored", &out);
    }

    // Example 4: sector search from the dashboard
    println!("--- Sectors matching 'arti' ---");
    for s in dir.search_sectors("arti") {
        println!("  {} ({} businesses)", s.name, s.len());
    }

    Ok(())
}
