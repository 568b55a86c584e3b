//! Error handling example for camerconnect
//!
//! Load failures are errors; an empty result is not.

use camerconnect_core::client::decode_body;
use camerconnect_core::{Directory, DirectoryError, Grouping, PageState, Query, Result};

fn main() -> Result<()> {
    println!("=== CamerConnect Error Handling Example ===\n");

    // Example 1: missing snapshot
    println!("--- Example 1: Loading a snapshot that does not exist ---");
    match Directory::load_json_file("does-not-exist.json") {
        Ok(_) => println!("✓ loaded"),
        Err(e) => println!("✗ {e} (load failure: {})", e.is_load_failure()),
    }
    println!();

    // Example 2: the backend answered with an HTML error page
    println!("--- Example 2: Non-JSON response ---");
    let html = "<!DOCTYPE html><title>502 Bad Gateway</title>";
    match decode_body(502, html, "Erreur lors du chargement des entreprises") {
        Err(DirectoryError::NonJson(text)) => println!("✗ not JSON: {text}"),
        other => println!("unexpected: {other:?}"),
    }
    println!();

    // Example 3: error status with a message
    println!("--- Example 3: Error status with message ---");
    if let Err(e) = decode_body(401, r#"{"message":"Email ou mot de passe incorrect"}"#, "") {
        println!("✗ {e}");
    }
    println!();

    // Example 4: broken fields are absorbed, records without id dropped
    println!("--- Example 4: Malformed records ---");
    let dir = Directory::from_json_str(
        r#"{"Santé": [
            {"id_entreprise": 1, "nom_entreprise": "Pharmacie du Centre", "moyenne_notes": "n/a"},
            {"nom_entreprise": "Sans identifiant"},
            42
        ]}"#,
    )?;
    for r in dir.all_records() {
        println!("  kept {} with rating {}", r.name, r.rating);
    }
    println!();

    // Example 5: nothing matches, which is a state and not an error
    println!("--- Example 5: No matches ---");
    let loaded: Result<Directory> = Ok(dir);
    println!("  page state: {:?}", PageState::settle(&loaded, |d| d.all_records().is_empty()));
    let dir = loaded?;
    if let Some(out) = dir.listing(None, &Query::new().search("boulangerie"), Grouping::Tiered) {
        println!("  empty: {}, matches: {}", out.is_empty(), out.total_matches());
    }

    Ok(())
}
