#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use camerconnect_wasm::{
    begin_load, business, fail_load, finish_load, list_page, load_directory, page_state,
    sector_names, toggle_favorite, is_favorite,
};

const BODY: &str = r#"{
    "Restauration": [
        {"id_entreprise": 1, "nom_entreprise": "Chez Paul", "moyenne_notes": 4.2},
        {"id_entreprise": 2, "nom_entreprise": "Le Palmier", "moyenne_notes": 4.8, "type_abonnement": "premium"}
    ],
    "Santé": [
        {"id_entreprise": 3, "nom_entreprise": "Pharmacie du Centre"}
    ]
}"#;

fn get(obj: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(obj, &JsValue::from_str(key)).expect("property should exist")
}

#[wasm_bindgen_test]
fn lists_a_sector_page() {
    load_directory(BODY).expect("body should load");

    let names = sector_names().unwrap();
    assert_eq!(js_sys::Array::from(&names).length(), 2);

    let page = list_page(Some("restauration".into()), JsValue::UNDEFINED, true).unwrap();
    assert_eq!(get(&page, "status").as_string().as_deref(), Some("page"));
    let items = js_sys::Array::from(&get(&get(&page, "view"), "items"));
    assert_eq!(items.length(), 2);
    assert_eq!(get(&items.get(0), "name").as_string().as_deref(), Some("Le Palmier"));
}

#[wasm_bindgen_test]
fn unknown_business_is_null() {
    load_directory(BODY).expect("body should load");
    assert!(business("404").unwrap().is_null());
}

#[wasm_bindgen_test]
fn stale_load_is_ignored() {
    let old = begin_load();
    let new = begin_load();
    assert!(finish_load(new, BODY).unwrap());
    assert!(!finish_load(old, "[]").unwrap());
    assert!(!fail_load(old, "timeout"));
    assert_eq!(get(&page_state().unwrap(), "state").as_string().as_deref(), Some("loaded"));
}

#[wasm_bindgen_test]
fn favorites_toggle() {
    let before = is_favorite("2");
    assert_eq!(toggle_favorite("2").unwrap(), !before);
    assert_eq!(is_favorite("2"), !before);
}
