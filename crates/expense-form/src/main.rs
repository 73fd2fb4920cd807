//! # Expense Form Driver
//!
//! Runs the form headlessly: one JSON `FormEvent` per stdin line, one JSON
//! snapshot of the rendered form per stdout line.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load `FormConfig` from `EXPENSE_*` variables
//! 3. Read the row template and page state files, if configured
//! 4. Build the controller and run `on_init`
//! 5. Print the initial snapshot, then process events until EOF
//!
//! ## Output
//! ```text
//! {"rows":[...],"subtotal":"$ 200","tax":"$ 10","total":"$ 210",...}
//! {"error":{"code":"NOT_FOUND","message":"Row not found: ..."}}
//! ```

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::Context;
use serde_json::json;
use tracing::{info, warn};

use expense_form::{
    init_tracing, FormConfig, FormController, FormError, FormEvent, PageState, RenderedForm,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut config = FormConfig::from_env();
    if let Some(path) = &config.row_template_path {
        config.row_template = fs::read_to_string(path)
            .with_context(|| format!("reading row template {}", path.display()))?;
    }
    config.validate()?;

    let page = match &config.page_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading page state {}", path.display()))?;
            serde_json::from_str::<PageState>(&raw)
                .with_context(|| format!("parsing page state {}", path.display()))?
        }
        None => PageState::default(),
    };

    let mut form = FormController::from_page(&config, page, RenderedForm::new())?;
    form.on_init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", serde_json::to_string(form.sink())?)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<FormEvent>(&line) {
            Ok(event) => match form.dispatch(&event) {
                Ok(_) => serde_json::to_value(form.sink())?,
                Err(err) => json!({ "error": err }),
            },
            Err(err) => {
                warn!(%err, "Unreadable event");
                json!({ "error": FormError::validation(err.to_string()) })
            }
        };
        writeln!(out, "{}", reply)?;
        out.flush()?;
    }

    info!(rows = form.store().len(), "Input closed");
    Ok(())
}
