//! Plain-text rendering of records and listing pages.

use camerconnect_core::{
    BusinessRecord, DirectoryStats, Interaction, InteractionKind, InteractionSummary,
    ListingOutcome, ListingView, PaymentStatus,
};
use std::fmt::Write;

/// `★★★★☆ 4.2`
pub fn stars(rating: f64) -> String {
    let full = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{} {:.1}", "★".repeat(full), "☆".repeat(5 - full), rating)
}

/// One line per business in a listing.
pub fn record_line(r: &BusinessRecord) -> String {
    let mut line = format!("[{}] {}", r.id, r.name);
    if r.premium {
        line.push_str(" (Premium)");
    }
    let _ = write!(line, " | {} | {} avis", stars(r.rating), r.review_count);
    if !r.location.is_empty() {
        let _ = write!(line, " | {}", r.location);
    }
    line
}

pub fn record_details(r: &BusinessRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", r.name, if r.premium { " (Premium)" } else { "" });
    let _ = writeln!(out, "  Id: {}", r.id);
    if !r.sector.is_empty() {
        let _ = writeln!(out, "  Secteur: {}", r.sector);
    }
    if !r.location.is_empty() {
        let _ = writeln!(out, "  Localisation: {}", r.location);
    }
    let _ = writeln!(out, "  Note: {} ({} avis)", stars(r.rating), r.review_count);
    let _ = writeln!(out, "  Interactions: {}", r.interaction_count);
    if r.payment != PaymentStatus::Unknown {
        let _ = writeln!(out, "  Paiement: {}", r.payment.label());
    }
    if !r.description.is_empty() {
        let _ = writeln!(out, "  {}", r.description);
    }
    if !r.services.is_empty() {
        let _ = writeln!(out, "  Services: {}", r.services.join(", "));
    }
    for (label, value) in [
        ("Téléphone", &r.contact.phone),
        ("Email", &r.contact.email),
        ("Site web", &r.contact.website),
        ("Horaires", &r.hours),
    ] {
        if let Some(v) = value {
            let _ = writeln!(out, "  {label}: {v}");
        }
    }
    out
}

pub fn outcome(outcome: &ListingOutcome<'_, BusinessRecord>) -> String {
    let mut out = String::new();
    let page = match outcome {
        ListingOutcome::NoMatches { total_records } => {
            let _ = writeln!(out, "Aucune entreprise trouvée ({total_records} au total).");
            return out;
        }
        ListingOutcome::Page(page) => page,
    };

    let _ = writeln!(
        out,
        "{} entreprise(s), trié par {}",
        page.meta.total_matches,
        page.sort.label()
    );
    match &page.view {
        ListingView::Tiered { premium, regular } => {
            if !premium.is_empty() {
                let _ = writeln!(out, "\nEntreprises Premium");
                premium.iter().for_each(|r| {
                    let _ = writeln!(out, "  {}", record_line(r));
                });
            }
            if !regular.is_empty() {
                let _ = writeln!(out, "\nAutres entreprises");
                regular.iter().for_each(|r| {
                    let _ = writeln!(out, "  {}", record_line(r));
                });
            }
        }
        ListingView::Flat { items } => {
            items.iter().for_each(|r| {
                let _ = writeln!(out, "  {}", record_line(r));
            });
        }
    }
    let _ = writeln!(
        out,
        "\nPage {} / {}",
        page.meta.page, page.meta.total_pages
    );
    if page.requested_page != page.meta.page as i64 {
        let _ = writeln!(out, "(page {} demandée)", page.requested_page);
    }
    out
}

pub fn stats(s: &DirectoryStats) -> String {
    format!(
        "Directory statistics:\n  Sectors: {}\n  Businesses: {}\n  Premium: {}\n  Average rating: {:.1}\n",
        s.sectors, s.businesses, s.premium, s.average_rating
    )
}

pub fn interaction_line(i: &Interaction) -> String {
    format!("{}  {:<12} {}", i.date, i.kind.label(), i.business_name)
}

pub fn interaction_summary(s: &InteractionSummary) -> String {
    InteractionKind::ALL
        .iter()
        .map(|k| format!("{}: {}", k.label(), s.count(*k)))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use camerconnect_core::{run, Grouping, Query};

    fn sample() -> Vec<BusinessRecord> {
        vec![
            BusinessRecord {
                rating: 4.8,
                premium: true,
                location: "Douala, Akwa".into(),
                ..BusinessRecord::new("2", "Le Palmier")
            },
            BusinessRecord {
                rating: 4.2,
                review_count: 30,
                ..BusinessRecord::new("1", "Chez Paul")
            },
        ]
    }

    #[test]
    fn stars_round_to_nearest() {
        assert_eq!(stars(4.6), "★★★★★ 4.6");
        assert_eq!(stars(0.0), "☆☆☆☆☆ 0.0");
    }

    #[test]
    fn tiered_outcome_has_both_sections() {
        let records = sample();
        let text = outcome(&run(&records, &Query::new(), Grouping::Tiered));
        let premium_at = text.find("Entreprises Premium").unwrap();
        let regular_at = text.find("Autres entreprises").unwrap();
        assert!(premium_at < regular_at);
        assert!(text.contains("[2] Le Palmier (Premium)"));
        assert!(text.contains("Page 1 / 1"));
    }

    #[test]
    fn no_matches_is_reported() {
        let records = sample();
        let text = outcome(&run(&records, &Query::new().search("zzz"), Grouping::Flat));
        assert!(text.starts_with("Aucune entreprise trouvée (2 au total)"));
    }

    #[test]
    fn summary_lists_every_kind() {
        let s = InteractionSummary {
            views: 3,
            contacts: 1,
            ..Default::default()
        };
        assert_eq!(
            interaction_summary(&s),
            "Consultation: 3 | Contact: 1 | Favori: 0 | Avis: 0"
        );
    }

    #[test]
    fn clamped_page_is_mentioned() {
        let records = sample();
        let text = outcome(&run(&records, &Query::new().page(7), Grouping::Flat));
        assert!(text.contains("(page 7 demandée)"));
    }
}
