use wasm_bindgen::JsValue;
use web_sys::{js_sys, window};
use yew::prelude::*;

use crate::platform::{classify, OsType};

/// Classifies the visitor's OS from the user-agent, once, after first
/// render. Returns `Unknown` until the mount effect has run; if the
/// user-agent is unavailable the classification stays `Unknown` for the
/// whole session, which the redirect logic treats as "no auto-redirect".
#[hook]
pub fn use_operating_system() -> OsType {
    let os = use_state(|| OsType::Unknown);

    {
        let os = os.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(window) = window() {
                    let navigator = window.navigator();
                    let user_agent = navigator
                        .user_agent()
                        .ok()
                        .filter(|ua| !ua.is_empty())
                        .unwrap_or_else(|| {
                            // web-sys has no binding for navigator.vendor
                            js_sys::Reflect::get(navigator.as_ref(), &JsValue::from_str("vendor"))
                                .ok()
                                .and_then(|value| value.as_string())
                                .unwrap_or_default()
                        });

                    // old IE advertised an iPhone UA in some modes; its
                    // window.MSStream global is the tell
                    let has_legacy_engine =
                        js_sys::Reflect::get(&window, &JsValue::from_str("MSStream"))
                            .map(|value| !value.is_undefined())
                            .unwrap_or(false);

                    os.set(classify(&user_agent, has_legacy_engine));
                } else {
                    log::warn!("no window available, platform stays unknown");
                }
                || ()
            },
            (),
        );
    }

    *os
}
