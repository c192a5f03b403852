//! # Yousmala TUI
//!
//! Terminal front end for order entry. The main screen shows the reference
//! list counts and an activity log; `a` opens the order form modal, which
//! collects a supplier, an amount, a status, a client and optional products,
//! and submits them to the back office.
//!
//! ## Architecture
//!
//! - **`app`**: state and the message/effect update loop around the engine
//!   workflow
//! - **`cmd`**: turns effects into background API tasks
//! - **`ui`**: components, theme and the event loop

mod app;
mod cmd;
mod logging;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use yousmala_api::BackOfficeApi;

pub use logging::{TUI_LOG_PATH_ENV, default_log_path, init_file_tracing};

/// Run the terminal UI until the operator quits.
///
/// Reference lists are requested as soon as the loop starts.
///
/// # Errors
///
/// Terminal setup, drawing, or restoration failures.
pub async fn run(api: Arc<dyn BackOfficeApi>) -> Result<()> {
    ui::runtime::run_app(api).await
}
