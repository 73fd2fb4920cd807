//! # State Module
//!
//! Startup state for the form: configuration and the server-rendered
//! initial page.
//!
//! The live form state (rows, tax settings, last totals) is owned by
//! [`crate::controller::FormController`]; nothing here changes after
//! startup.

mod config;

pub use config::{FormConfig, PageState, DEFAULT_ROW_TEMPLATE};
