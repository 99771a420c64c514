//! taskdeck - a terminal client for company project and task management.
//!
//! The `api` module is a typed SDK for the REST backend and can be used on
//! its own. The remaining modules make up the terminal UI.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod reports;
pub mod routes;
pub mod schedule;
pub mod session;
pub mod tasks;
pub mod ui;
