//! Scoped render boundary.
//!
//! A try/fallback combinator: any panic inside the wrapped render closure is
//! caught at this boundary and replaced with a generic failure panel instead
//! of tearing down the whole page.

use std::panic::{catch_unwind, UnwindSafe};

const FAILURE_PANEL: &str = r#"<div class="error-boundary">
  <h2>Something went wrong</h2>
  <p>An unexpected error occurred while displaying this page.</p>
  <a href="/">Return home</a>
  <button onclick="window.location.reload()">Reload</button>
</div>"#;

/// Run a render closure, substituting the failure panel if it panics.
/// Panic details are logged in debug builds only.
pub fn render_with_boundary<F>(render: F) -> String
where
    F: FnOnce() -> String + UnwindSafe,
{
    match catch_unwind(render) {
        Ok(html) => html,
        Err(payload) => {
            if cfg!(debug_assertions) {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!("render boundary caught a panic: {}", detail);
            }
            FAILURE_PANEL.to_string()
        }
    }
}
