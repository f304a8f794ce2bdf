//! Weather & news terminal dashboard
//!
//! The library exposes the application's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod news;
pub mod reducer;
pub mod state;
pub mod theme;
