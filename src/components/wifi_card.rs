use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

use crate::config::WIFI_SSID;

/// In-store Wi-Fi card: shows the SSID with a copy-to-clipboard button.
/// The clipboard write is fire-and-forget; a denied permission just means
/// the checkmark never shows.
#[function_component(WifiCard)]
pub fn wifi_card() -> Html {
    let copied = use_state(|| false);

    let on_copy = {
        let copied = copied.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(window) = window() {
                let clipboard = window.navigator().clipboard();
                let copied = copied.clone();
                spawn_local(async move {
                    if wasm_bindgen_futures::JsFuture::from(clipboard.write_text(WIFI_SSID))
                        .await
                        .is_ok()
                    {
                        copied.set(true);
                        TimeoutFuture::new(2000).await;
                        copied.set(false);
                    }
                });
            }
        })
    };

    html! {
        <div class="wifi-card">
            <div class="wifi-card-header">
                <span class="wifi-icon">{"\u{1F4F6}"}</span>
                <span class="wifi-label">{"Free Wi-Fi"}</span>
            </div>
            <div class="wifi-ssid-row">
                <code class="wifi-ssid">{WIFI_SSID}</code>
                <button class="wifi-copy-button" onclick={on_copy} aria-label="Copy Wi-Fi SSID">
                    { if *copied { "\u{2713}" } else { "\u{2398}" } }
                </button>
            </div>
            <p class="wifi-hint">{"SSIDをタップまたはボタンでコピーできます"}</p>
        </div>
    }
}
