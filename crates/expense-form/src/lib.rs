//! # Expense Form
//!
//! The interactive layer of the expense-entry form: page events in,
//! formatted figures out. All arithmetic lives in `expense-core`.
//!
//! ## Module Organization
//! ```text
//! expense_form/
//! ├── lib.rs          ◄─── You are here (exports & logging setup)
//! ├── controller.rs   ◄─── FormController: operations + dispatch
//! ├── events.rs       ◄─── FormEvent wire format and matching
//! ├── render.rs       ◄─── RenderSink trait, in-memory RenderedForm
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── config.rs   ◄─── FormConfig (env) and PageState
//! └── error.rs        ◄─── FormError for the hosting page
//! ```
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  page event ──► dispatch ──► RowStore op ──► compute ──► RenderSink     │
//! │                    │                                                    │
//! │                    └── unmatched: ignored                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use expense_form::{FormConfig, FormController, RenderedForm};
//!
//! let mut form = FormController::new(&FormConfig::default(), RenderedForm::new()).unwrap();
//! form.on_init();
//! assert_eq!(form.store().len(), 1);
//! assert_eq!(form.sink().total.as_deref(), Some("$ 0"));
//! ```

pub mod controller;
pub mod error;
pub mod events;
pub mod render;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use controller::FormController;
pub use error::{ErrorCode, FormError, FormResult};
pub use events::{Action, EventTarget, FormEvent};
pub use render::{RenderSink, RenderedForm, RenderedRow, SlotStatus, SummarySlot};
pub use state::{FormConfig, PageState};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout belongs to the driver's JSON output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages everywhere
/// - `RUST_LOG=expense_form=trace` - Trace the form crate only
/// - Default: INFO, DEBUG for the expense crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,expense=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
