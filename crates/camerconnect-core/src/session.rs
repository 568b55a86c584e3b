// crates/camerconnect-core/src/session.rs

//! The logged-in user, as an explicit value.
//!
//! A [`Session`] starts empty, is filled by a successful login and cleared by
//! logout. Whoever owns it decides where it lives: the CLI keeps it as a JSON
//! file in its state directory.

use crate::error::{DirectoryError, Result};
use crate::raw::{first_text, Loose};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub city: Option<String>,
}

/// Body of a successful `POST /api/login`.
#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    id_utilisateur: Option<Loose>,
    #[serde(default)]
    nom: Option<Loose>,
    #[serde(default)]
    email: Option<Loose>,
    #[serde(default)]
    ville: Option<Loose>,
    #[serde(default)]
    token: Option<Loose>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user: Option<User>,
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from a login response. A body without a token or
    /// user id is a malformed answer, not a login.
    pub fn from_login_body(body: Value) -> Result<Self> {
        let raw: LoginBody = serde_json::from_value(body)?;
        let token = first_text(&[&raw.token]).ok_or_else(|| {
            DirectoryError::NonJson("login response carries no token".to_owned())
        })?;
        let id = first_text(&[&raw.id_utilisateur]).ok_or_else(|| {
            DirectoryError::NonJson("login response carries no user id".to_owned())
        })?;
        Ok(Session {
            user: Some(User {
                id,
                name: first_text(&[&raw.nom]).unwrap_or_default(),
                email: first_text(&[&raw.email]).unwrap_or_default(),
                city: first_text(&[&raw.ville]),
            }),
            token: Some(token),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Token for an `Authorization: Bearer` header.
    pub fn bearer(&self) -> Result<&str> {
        self.token().ok_or(DirectoryError::Unauthenticated)
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// An empty session removes the file instead of writing `null`s.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !self.is_authenticated() {
            return match fs::remove_file(path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }
}
