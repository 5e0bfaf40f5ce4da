//! The Spike Cross guide - character browser built on tui-dispatch
//!
//! This library exposes the view engine and host components for the binary and tests.

pub mod action;
pub mod catalog;
pub mod components;
pub mod dispatch;
pub mod effect;
pub mod focus;
pub mod i18n;
pub mod logging;
pub mod provider;
pub mod reducer;
pub mod router;
pub mod selection;
pub mod state;
pub mod view;
