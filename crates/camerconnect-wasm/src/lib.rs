//! camerconnect-wasm: WebAssembly bindings for camerconnect-core
//!
//! The page fetches `/api/secteurs/entreprises` itself and hands the body to
//! this module; every listing page (search box, sort select, filters, pager)
//! then re-runs the engine locally on each input event.
//!
//! What it provides
//! ----------------
//! - Load with stale-response protection: `begin_load()` / `finish_load()`
//! - Listing pages: `list_page(sector, query, flat)`
//! - Lookups: `business(id)`, `sector_names()`, `search_sectors(term)`, `stats()`
//! - Favorites persisted in `localStorage` under `camerconnect_favorites`
//! - Dashboard helpers: `review_summary(reviews)`, `interaction_summary(items)`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { begin_load, finish_load, list_page } from 'camerconnect-wasm';
//!
//! async function showSector(name, query) {
//!   await init();
//!   const ticket = begin_load();
//!   const body = await (await fetch('/api/secteurs/entreprises')).text();
//!   if (!finish_load(ticket, body)) return; // user navigated away meanwhile
//!   const page = list_page(name, { searchTerm: query, sort: 'rating', page: 1 }, false);
//!   render(page);
//! }
//! ```
//!
//! Notes
//! -----
//! - `list_page` returns `{status: "noMatches", totalRecords}` or
//!   `{status: "page", view, meta, requestedPage, sort}`; the view is
//!   `{kind: "tiered", premium, regular}` or `{kind: "flat", items}`.
//! - Errors are thrown as JS `Error`s carrying the message.
use std::cell::RefCell;
use std::fmt::Display;

use camerconnect_core::favorites::FAVORITES_KEY;
use camerconnect_core::{
    Directory, Favorites, Grouping, Interaction, InteractionSummary, LoadTicket, LoadTracker,
    PageState, Query, Review, ReviewSummary,
};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

static TRACKER: LoadTracker = LoadTracker::new();

thread_local! {
    static DIRECTORY: RefCell<Option<Directory>> = const { RefCell::new(None) };
    static PAGE_STATE: RefCell<PageState> = RefCell::new(PageState::Loading);
    static FAVORITES: RefCell<Option<Favorites>> = const { RefCell::new(None) };
}

#[derive(Serialize)]
struct SectorView<'a> {
    name: &'a str,
    count: usize,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"CamerConnect WASM module ready".into());
}

fn js_err(e: impl Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(js_err)
}

fn with_directory<R>(f: impl FnOnce(&Directory) -> Result<R, JsValue>) -> Result<R, JsValue> {
    DIRECTORY.with(|d| match d.borrow().as_ref() {
        Some(dir) => f(dir),
        None => Err(js_err("directory not loaded yet")),
    })
}

fn set_state(state: PageState) {
    PAGE_STATE.with(|s| *s.borrow_mut() = state);
}

/* --------------------------------------------------------------------------
   Loading
-------------------------------------------------------------------------- */

/// Start a load. Pass the returned ticket to `finish_load` / `fail_load`.
#[wasm_bindgen]
pub fn begin_load() -> u64 {
    set_state(PageState::Loading);
    TRACKER.begin().raw()
}

/// Apply a fetched body. Returns `false` (and changes nothing) when a newer
/// load was started in the meantime.
#[wasm_bindgen]
pub fn finish_load(ticket: u64, body: &str) -> Result<bool, JsValue> {
    let ticket = LoadTicket::from_raw(ticket);
    if !TRACKER.is_current(ticket) {
        return Ok(false);
    }
    let parsed = Directory::from_json_str(body);
    set_state(PageState::settle(&parsed, |d| d.all_records().is_empty()));
    let dir = parsed.map_err(js_err)?;
    DIRECTORY.with(|d| *d.borrow_mut() = Some(dir));
    Ok(true)
}

/// Record a transport failure for `ticket`, if it is still current.
#[wasm_bindgen]
pub fn fail_load(ticket: u64, message: &str) -> bool {
    let ticket = LoadTicket::from_raw(ticket);
    PAGE_STATE.with(|s| {
        TRACKER.apply(ticket, &mut *s.borrow_mut(), PageState::Failed(message.to_owned()))
    })
}

/// Load without a ticket, for pages that fetch once.
#[wasm_bindgen]
pub fn load_directory(body: &str) -> Result<(), JsValue> {
    let ticket = begin_load();
    finish_load(ticket, body).map(|_| ())
}

/// `{state: "loading" | "loaded" | "empty" | "failed", message?}`
#[wasm_bindgen]
pub fn page_state() -> Result<JsValue, JsValue> {
    PAGE_STATE.with(|s| to_js(&*s.borrow()))
}

/* --------------------------------------------------------------------------
   Listing & lookups
-------------------------------------------------------------------------- */

/// One listing page. `sector` null/undefined lists every business; `query`
/// may be omitted or partial (`{searchTerm, sort, city, premiumOnly, page}`).
#[wasm_bindgen]
pub fn list_page(sector: Option<String>, query: JsValue, flat: bool) -> Result<JsValue, JsValue> {
    let query: Query = if query.is_undefined() || query.is_null() {
        Query::default()
    } else {
        serde_wasm_bindgen::from_value(query).map_err(js_err)?
    };
    let grouping = if flat { Grouping::Flat } else { Grouping::Tiered };
    with_directory(|dir| {
        let outcome = dir
            .listing(sector.as_deref(), &query, grouping)
            .ok_or_else(|| js_err(format!("unknown sector: {}", sector.as_deref().unwrap_or(""))))?;
        to_js(&outcome)
    })
}

/// Normalized record, or `null`.
#[wasm_bindgen]
pub fn business(id: &str) -> Result<JsValue, JsValue> {
    with_directory(|dir| match dir.find(id) {
        Some(r) => to_js(r),
        None => Ok(JsValue::NULL),
    })
}

#[wasm_bindgen]
pub fn sector_names() -> Result<JsValue, JsValue> {
    with_directory(|dir| to_js(&dir.sector_names().collect::<Vec<_>>()))
}

/// `[{name, count}]` for sectors whose name contains `term` (accents ignored).
#[wasm_bindgen]
pub fn search_sectors(term: &str) -> Result<JsValue, JsValue> {
    with_directory(|dir| {
        let out: Vec<SectorView> = dir
            .search_sectors(term)
            .into_iter()
            .map(|s| SectorView {
                name: &s.name,
                count: s.len(),
            })
            .collect();
        to_js(&out)
    })
}

#[wasm_bindgen]
pub fn stats() -> Result<JsValue, JsValue> {
    with_directory(|dir| to_js(&dir.stats()))
}

/* --------------------------------------------------------------------------
   Favorites
-------------------------------------------------------------------------- */

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn with_favorites<R>(f: impl FnOnce(&mut Favorites) -> R) -> R {
    FAVORITES.with(|cell| {
        let mut slot = cell.borrow_mut();
        let favorites = slot.get_or_insert_with(|| {
            local_storage()
                .and_then(|s| s.get_item(FAVORITES_KEY).ok().flatten())
                .and_then(|text| serde_json::from_str(&text).ok())
                .unwrap_or_default()
        });
        f(favorites)
    })
}

fn persist_favorites(favorites: &Favorites) -> Result<(), JsValue> {
    if let Some(storage) = local_storage() {
        let text = serde_json::to_string(favorites).map_err(js_err)?;
        storage.set_item(FAVORITES_KEY, &text)?;
    }
    Ok(())
}

#[wasm_bindgen]
pub fn is_favorite(id: &str) -> bool {
    with_favorites(|f| f.contains(id))
}

/// Flip membership; returns `true` when `id` is now a favorite.
#[wasm_bindgen]
pub fn toggle_favorite(id: &str) -> Result<bool, JsValue> {
    with_favorites(|f| {
        let now = f.toggle(id);
        persist_favorites(f)?;
        Ok(now)
    })
}

#[wasm_bindgen]
pub fn favorite_ids() -> Result<JsValue, JsValue> {
    with_favorites(|f| to_js(f.ids()))
}

/// Favorite records still present in the loaded directory.
#[wasm_bindgen]
pub fn favorite_businesses() -> Result<JsValue, JsValue> {
    with_directory(|dir| with_favorites(|f| to_js(&f.resolve(dir))))
}

/* --------------------------------------------------------------------------
   Dashboard helpers
-------------------------------------------------------------------------- */

/// `{count, average, histogram}` for an array of reviews.
#[wasm_bindgen]
pub fn review_summary(reviews: JsValue) -> Result<JsValue, JsValue> {
    let reviews: Vec<Review> = serde_wasm_bindgen::from_value(reviews).map_err(js_err)?;
    to_js(&ReviewSummary::from_slice(&reviews))
}

/// `{views, contacts, favorites, reviews}` for an interaction history.
#[wasm_bindgen]
pub fn interaction_summary(items: JsValue) -> Result<JsValue, JsValue> {
    let items: Vec<Interaction> = serde_wasm_bindgen::from_value(items).map_err(js_err)?;
    to_js(&InteractionSummary::from_slice(&items))
}
