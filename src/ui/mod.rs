//! User interface components and views.
//!
//! This module contains all TUI rendering logic, including views for the
//! application's routes and the reusable components they are built from.

pub mod components;
pub mod theme;
pub mod views;
