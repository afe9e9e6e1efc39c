//! Browser-backed implementations of the orchestrator's capabilities.

use web_sys::js_sys;

use crate::redirect::{Navigator, PageProbe};

/// Navigates by setting `window.location.href`. Failures are logged and
/// swallowed; the manual controls stay on screen as the recovery path.
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn navigate(&self, url: &str) {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(url).is_err() {
                gloo_console::error!("navigation failed", url);
            }
        } else {
            log::warn!("no window available, cannot navigate to {url}");
        }
    }
}

/// Reads `document.hidden` and the wall clock from the real page.
pub struct DomProbe;

impl PageProbe for DomProbe {
    fn is_hidden(&self) -> bool {
        web_sys::window()
            .and_then(|window| window.document())
            .map(|document| document.hidden())
            .unwrap_or(false)
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
