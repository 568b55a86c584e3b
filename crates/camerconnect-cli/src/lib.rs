//! camerconnect-cli
//! ================
//!
//! Command-line front-end for the `camerconnect-core` business directory.
//!
//! This crate primarily provides a binary (`camerconnect`). The library
//! target only exists so docs.rs renders this overview. See the README for
//! full usage examples.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install camerconnect-cli
//! camerconnect --help
//! camerconnect sectors sante
//! camerconnect list --sector Restauration --sort reviews --page 2
//! camerconnect -i annuaire.json.gz list --premium --flat
//! ```
//!
//! For programmatic access to the listing engine, use the
//! [`camerconnect-core`] crate directly.
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
