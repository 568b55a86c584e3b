// crates/camerconnect-core/src/client.rs

//! Blocking REST client for the CamerConnect backend.
//!
//! Transport lives in [`ApiClient`]; turning a status code and body text into
//! a value or a [`DirectoryError`] is done by [`decode_body`], which has no
//! network dependency.

#![cfg(feature = "client")]

use crate::config::ClientConfig;
use crate::directory::Directory;
use crate::error::{DirectoryError, Result};
use crate::model::BusinessRecord;
use crate::normalize::normalize_value;
use crate::raw::SectorsRaw;
use crate::session::Session;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Longest slice of a non-JSON body kept in the error message.
const BODY_EXCERPT: usize = 200;

/// Sign-up form, sent as-is to `POST /api/register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub nom: String,
    pub email: String,
    pub password: String,
    pub ville: String,
    pub age: String,
    pub genre: String,
}

pub struct ApiClient {
    config: ClientConfig,
    http: Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET /api/secteurs/entreprises`: the whole directory.
    pub fn sectors_with_businesses(&self) -> Result<Directory> {
        let body = self.get_json("/api/secteurs/entreprises", "Erreur lors du chargement des entreprises")?;
        let raw: SectorsRaw = serde_json::from_value(body)?;
        let dir = Directory::from_raw_sectors(raw);
        info!(
            sectors = dir.sectors().len(),
            businesses = dir.all_records().len(),
            "directory fetched"
        );
        Ok(dir)
    }

    /// `GET /api/entreprises/{id}`. `Ok(None)` on 404 or on a record without id.
    pub fn business(&self, id: &str) -> Result<Option<BusinessRecord>> {
        let path = format!("/api/entreprises/{id}");
        let (status, text) = self.send(self.http.get(self.config.endpoint(&path)))?;
        if status == StatusCode::NOT_FOUND {
            debug!(id, "business not found");
            return Ok(None);
        }
        let body = decode_body(status.as_u16(), &text, "Entreprise introuvable")?;
        Ok(normalize_value(body, None))
    }

    /// `GET /api/secteurs/populaires`, passed through untouched.
    pub fn popular_sectors(&self) -> Result<Value> {
        self.get_json("/api/secteurs/populaires", "Erreur lors du chargement des secteurs")
    }

    /// `GET /api/stats/{name}`, passed through untouched.
    pub fn stats(&self, name: &str) -> Result<Value> {
        self.get_json(&format!("/api/stats/{name}"), "Erreur lors du chargement des statistiques")
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let req = self
            .http
            .post(self.config.endpoint("/api/login"))
            .json(&json!({ "email": email, "password": password }));
        let (status, text) = self.send(req)?;
        let body = decode_body(status.as_u16(), &text, "Email ou mot de passe incorrect")?;
        let session = Session::from_login_body(body)?;
        info!(email, "logged in");
        Ok(session)
    }

    pub fn register(&self, form: &Registration) -> Result<Value> {
        let req = self.http.post(self.config.endpoint("/api/register")).json(form);
        let (status, text) = self.send(req)?;
        decode_body(status.as_u16(), &text, "Erreur lors de la création du compte")
    }

    /// Clears `session` first, then tells the backend. A failed server call
    /// is only logged: the local session is gone either way.
    pub fn logout(&self, session: &mut Session) {
        let Some(token) = session.token().map(str::to_owned) else {
            return;
        };
        session.clear();
        let req = self
            .http
            .post(self.config.endpoint("/api/logout"))
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        match self.send(req) {
            Ok((status, _)) if status.is_success() => debug!("server session closed"),
            Ok((status, _)) => warn!(status = status.as_u16(), "logout rejected by backend"),
            Err(e) => warn!(error = %e, "logout request failed"),
        }
    }

    fn get_json(&self, path: &str, fallback: &str) -> Result<Value> {
        let (status, text) = self.send(self.http.get(self.config.endpoint(path)))?;
        decode_body(status.as_u16(), &text, fallback)
    }

    fn send(&self, req: RequestBuilder) -> Result<(StatusCode, String)> {
        let resp = req.send()?;
        let status = resp.status();
        let text = resp.text()?;
        debug!(status = status.as_u16(), bytes = text.len(), "backend response");
        Ok((status, text))
    }
}

/// Decode a response body.
///
/// The body must be JSON whatever the status. An error status then becomes
/// [`DirectoryError::Status`], using the body's `message` or `error` field
/// and falling back to `fallback`.
pub fn decode_body(status: u16, text: &str, fallback: &str) -> Result<Value> {
    let body: Value = serde_json::from_str(text).map_err(|_| DirectoryError::NonJson(excerpt(text)))?;
    if (200..300).contains(&status) {
        return Ok(body);
    }
    let message = ["message", "error"]
        .iter()
        .find_map(|k| body.get(*k).and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(fallback)
        .to_owned();
    Err(DirectoryError::Status { status, message })
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(BODY_EXCERPT) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_is_returned() {
        let v = decode_body(200, r#"{"Restauration": []}"#, "x").unwrap();
        assert!(v.get("Restauration").is_some());
    }

    #[test]
    fn html_is_non_json_even_on_error_status() {
        let err = decode_body(500, "<!DOCTYPE html><p>Server Error</p>", "x").unwrap_err();
        match err {
            DirectoryError::NonJson(text) => assert!(text.starts_with("<!DOCTYPE")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn error_status_prefers_message_then_error() {
        let err = decode_body(401, r#"{"message":"Identifiants invalides"}"#, "fallback").unwrap_err();
        assert!(matches!(err, DirectoryError::Status { status: 401, ref message } if message == "Identifiants invalides"));

        let err = decode_body(422, r#"{"error":"Email déjà utilisé"}"#, "fallback").unwrap_err();
        assert!(matches!(err, DirectoryError::Status { ref message, .. } if message == "Email déjà utilisé"));

        let err = decode_body(500, "{}", "fallback").unwrap_err();
        assert!(matches!(err, DirectoryError::Status { ref message, .. } if message == "fallback"));
    }

    #[test]
    fn long_bodies_are_cut() {
        let body = "x".repeat(1000);
        let DirectoryError::NonJson(text) = decode_body(200, &body, "").unwrap_err() else {
            panic!("expected NonJson");
        };
        assert_eq!(text.chars().count(), BODY_EXCERPT + 1);
    }

    #[test]
    fn logout_without_token_is_a_no_op() {
        let client = ApiClient::new(ClientConfig::default()).expect("client should build");
        let mut session = Session::new();
        client.logout(&mut session);
        assert!(!session.is_authenticated());
    }
}
