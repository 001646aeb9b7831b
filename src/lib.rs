//! Core of the CSV viewer: parsing, exact-match filtering and the per-session
//! table store. The egui front-end in `main.rs` only calls into this crate.

pub mod config;
pub mod data;
pub mod state;
