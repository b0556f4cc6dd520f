//! `chimera-server` — HTTP adapter for the Chimera task dashboard.
//!
//! A thin pass-through layer between the browser dashboard and the Asana
//! API: each endpoint resolves a credential, builds a fresh
//! [`chimera_asana::AsanaClient`], issues one or two remote calls, and
//! reshapes the result. The only state the process holds is the in-memory
//! [`settings::SettingsStore`]; nothing survives a restart.

pub mod routes;
pub mod settings;
mod ui;

pub use routes::{AppState, router};
