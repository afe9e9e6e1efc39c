use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::components::audio_visualizer::AudioVisualizer;
use crate::components::background_particles::BackgroundParticles;
use crate::components::wifi_card::WifiCard;
use crate::config;
use crate::hooks::use_operating_system::use_operating_system;
use crate::platform::OsType;
use crate::redirect::{
    self, Navigator, RedirectStatus, Redirector, TriggerState, PRE_REDIRECT_DELAY_MS,
};
use crate::utils::browser::{DomProbe, WindowNavigator};

/// Kicks off the platform-specific redirect sequence: the immediate
/// deep-link attempt plus the deferred follow-up on its own timer. The
/// follow-up handle joins `pending_timers` so unmount cancels it.
fn run_auto_redirect(
    os: OsType,
    status: UseStateHandle<RedirectStatus>,
    pending_timers: Rc<RefCell<Vec<Timeout>>>,
) {
    let redirector = Redirector::new(&config::APP_LINKS, &config::DEEP_LINKS, WindowNavigator);
    let (next_status, follow_up) = redirector.begin(os, &DomProbe);
    status.set(next_status);

    let handle = Timeout::new(follow_up.delay_ms, move || {
        let redirector =
            Redirector::new(&config::APP_LINKS, &config::DEEP_LINKS, WindowNavigator);
        if let Some(next_status) = redirector.finish(follow_up.kind, &DomProbe) {
            status.set(next_status);
        }
    });
    pending_timers.borrow_mut().push(handle);
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let os = use_operating_system();
    let status = use_state(|| RedirectStatus::Idle);
    let icon_failed = use_state(|| false);
    // the attempt guard and timer handles live outside the render cycle
    let guard = use_mut_ref(|| TriggerState::Idle);
    let pending_timers = use_mut_ref(Vec::<Timeout>::new);

    // One-shot trigger: fires the first time classification resolves away
    // from Unknown, no matter how many times this effect re-runs afterwards.
    {
        let status = status.clone();
        let guard = guard.clone();
        let pending_timers = pending_timers.clone();
        use_effect_with_deps(
            move |os: &OsType| {
                let os = *os;
                let fire = {
                    let mut guard = guard.borrow_mut();
                    let (next, fire) = redirect::arm(os, *guard);
                    *guard = next;
                    fire
                };

                if fire {
                    log::info!("platform resolved to {os:?}, starting redirect sequence");
                    let start = Timeout::new(PRE_REDIRECT_DELAY_MS, {
                        let pending_timers = pending_timers.clone();
                        move || run_auto_redirect(os, status, pending_timers)
                    });
                    pending_timers.borrow_mut().push(start);
                }

                move || {
                    // unmount cancels anything still scheduled
                    pending_timers.borrow_mut().clear();
                }
            },
            os,
        );
    }

    // Manual escape hatches: plain navigation, never touch guard or status.
    let on_open_app = Callback::from(move |_: MouseEvent| {
        if let Some(url) = redirect::deep_link(os, &config::DEEP_LINKS) {
            WindowNavigator.navigate(url);
        }
    });

    let on_open_store = Callback::from(move |_: MouseEvent| {
        WindowNavigator.navigate(redirect::store_url(os, &config::APP_LINKS));
    });

    let on_open_web = Callback::from(move |_: MouseEvent| {
        WindowNavigator.navigate(config::APP_LINKS.web);
    });

    let on_icon_error = {
        let icon_failed = icon_failed.clone();
        Callback::from(move |_: Event| icon_failed.set(true))
    };

    html! {
        <div class="landing">
            <style>{LANDING_CSS}</style>
            <BackgroundParticles />

            <div class="landing-content">
                <div class="glass-card">
                    <div class="app-icon-frame">
                        {
                            if !*icon_failed {
                                html! {
                                    <img
                                        src="./app-icon.png"
                                        alt="カラオケ館公式アプリ"
                                        class="app-icon"
                                        onerror={on_icon_error}
                                    />
                                }
                            } else {
                                html! { <div class="app-icon-placeholder">{"\u{1F3A4}"}</div> }
                            }
                        }
                    </div>

                    <h1 class="app-title">{"カラオケ館公式アプリ"}</h1>

                    <div class="status-section">
                        {
                            match *status {
                                RedirectStatus::Idle => html! {
                                    <p class="status-idle">{"読み込み中..."}</p>
                                },
                                RedirectStatus::CheckingApp => html! {
                                    <div class="status-checking">
                                        <div class="spinner"></div>
                                        <p class="status-main">{"アプリを確認中..."}</p>
                                        <p class="status-sub">{"アプリが起動しない場合はストアへ移動します"}</p>
                                    </div>
                                },
                                RedirectStatus::RedirectingStore => html! {
                                    <div class="status-redirecting">
                                        <AudioVisualizer />
                                        <p class="status-main">{"ストアページへ移動中"}</p>
                                    </div>
                                },
                            }
                        }
                    </div>
                </div>

                <WifiCard />

                <div class="manual-actions">
                    <p class="manual-hint">{"画面が変わらない場合は以下を選択してください"}</p>
                    <div class="manual-buttons">
                        <button class="button-primary" onclick={on_open_app}>
                            {"アプリを開く"}
                        </button>
                        <button class="button-secondary" onclick={on_open_store}>
                            {"ストアへ"}
                        </button>
                    </div>
                    <button class="button-link" onclick={on_open_web}>
                        {"Webサイトを開く"}
                    </button>
                </div>

                {
                    if *status != RedirectStatus::Idle {
                        html! {
                            <div class="popup-notice">
                                {"※ポップアップブロックによりアプリが起動しない場合があります。\
                                  その場合は「アプリを開く」または「ストアへ」ボタンを押してください。"}
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

const LANDING_CSS: &str = r#"
    .landing {
        position: relative;
        min-height: 100vh;
        display: flex;
        flex-direction: column;
        align-items: center;
        justify-content: center;
        padding: 1.5rem;
        overflow: hidden;
        background: #0b1020;
        color: #fff;
        font-family: -apple-system, "Hiragino Sans", "Noto Sans JP", sans-serif;
    }
    .background-particles {
        position: fixed;
        inset: 0;
        pointer-events: none;
        z-index: 0;
        overflow: hidden;
    }
    .blob {
        position: absolute;
        width: 24rem;
        height: 24rem;
        border-radius: 50%;
        filter: blur(64px);
        opacity: 0.3;
        animation: pulse 4s ease-in-out infinite;
    }
    .blob-blue { top: -10%; left: -10%; background: #2563eb; }
    .blob-purple { top: -10%; right: -10%; background: #9333ea; animation-delay: 0.7s; }
    .blob-cyan { bottom: -20%; left: 20%; background: #0891b2; animation-delay: 1s; }
    .grid-overlay {
        position: absolute;
        inset: 0;
        background-image:
            linear-gradient(rgba(255,255,255,0.04) 1px, transparent 1px),
            linear-gradient(90deg, rgba(255,255,255,0.04) 1px, transparent 1px);
        background-size: 32px 32px;
    }
    .landing-content {
        position: relative;
        z-index: 1;
        width: 100%;
        max-width: 28rem;
        display: flex;
        flex-direction: column;
        align-items: center;
    }
    .glass-card {
        width: 100%;
        background: rgba(255, 255, 255, 0.1);
        backdrop-filter: blur(24px);
        border: 1px solid rgba(255, 255, 255, 0.2);
        border-radius: 1.5rem;
        padding: 2rem;
        display: flex;
        flex-direction: column;
        align-items: center;
        text-align: center;
        box-shadow: 0 25px 50px rgba(0, 0, 0, 0.25);
    }
    .app-icon-frame {
        width: 8rem;
        height: 8rem;
        background: #fff;
        border-radius: 1rem;
        overflow: hidden;
        margin-bottom: 1.5rem;
        border: 4px solid rgba(255, 255, 255, 0.1);
    }
    .app-icon { width: 100%; height: 100%; object-fit: cover; }
    .app-icon-placeholder {
        width: 100%;
        height: 100%;
        display: flex;
        align-items: center;
        justify-content: center;
        font-size: 3rem;
        background: #f3f4f6;
    }
    .app-title {
        font-size: 1.5rem;
        font-weight: 700;
        margin: 0 0 0.5rem;
    }
    .status-section {
        height: 7rem;
        width: 100%;
        display: flex;
        flex-direction: column;
        align-items: center;
        justify-content: center;
    }
    .status-idle { color: #bfdbfe; animation: pulse 2s ease-in-out infinite; }
    .status-checking, .status-redirecting {
        display: flex;
        flex-direction: column;
        align-items: center;
        gap: 0.75rem;
    }
    .status-main { font-size: 1.1rem; font-weight: 500; margin: 0; }
    .status-sub { font-size: 0.75rem; color: #bfdbfe; margin: 0; }
    .spinner {
        width: 2rem;
        height: 2rem;
        border: 3px solid rgba(96, 165, 250, 0.3);
        border-top-color: #60a5fa;
        border-radius: 50%;
        animation: spin 0.8s linear infinite;
    }
    .audio-visualizer {
        display: flex;
        align-items: flex-end;
        justify-content: center;
        gap: 0.25rem;
        height: 2rem;
    }
    .audio-bar {
        width: 0.5rem;
        background: linear-gradient(to top, #3b82f6, #22d3ee);
        border-radius: 9999px;
        opacity: 0.8;
        animation: equalize 0.8s ease-in-out infinite alternate;
    }
    .wifi-card {
        width: 100%;
        margin-top: 1.5rem;
        background: rgba(255, 255, 255, 0.1);
        backdrop-filter: blur(12px);
        border: 1px solid rgba(255, 255, 255, 0.2);
        border-radius: 1rem;
        padding: 1rem;
    }
    .wifi-card-header {
        display: flex;
        align-items: center;
        gap: 0.75rem;
        margin-bottom: 0.5rem;
    }
    .wifi-label {
        font-weight: 700;
        font-size: 0.85rem;
        color: #dbeafe;
        text-transform: uppercase;
        letter-spacing: 0.1em;
    }
    .wifi-ssid-row {
        display: flex;
        align-items: center;
        justify-content: space-between;
        background: rgba(0, 0, 0, 0.3);
        border-radius: 0.5rem;
        padding: 0.75rem;
    }
    .wifi-ssid {
        font-size: 1.1rem;
        font-family: ui-monospace, monospace;
        font-weight: 700;
    }
    .wifi-copy-button {
        margin-left: 1rem;
        padding: 0.5rem;
        background: transparent;
        border: none;
        border-radius: 50%;
        color: #d1d5db;
        font-size: 1.1rem;
        cursor: pointer;
    }
    .wifi-copy-button:hover { background: rgba(255, 255, 255, 0.1); }
    .wifi-hint {
        font-size: 0.75rem;
        color: #9ca3af;
        text-align: center;
        margin: 0.5rem 0 0;
    }
    .manual-actions { margin-top: 2rem; width: 100%; }
    .manual-hint {
        text-align: center;
        color: #9ca3af;
        font-size: 0.75rem;
        margin-bottom: 0.75rem;
    }
    .manual-buttons {
        display: grid;
        grid-template-columns: 1fr 1fr;
        gap: 0.75rem;
    }
    .button-primary, .button-secondary {
        padding: 0.75rem 0.5rem;
        border-radius: 0.75rem;
        font-weight: 700;
        font-size: 1rem;
        cursor: pointer;
    }
    .button-primary {
        background: linear-gradient(to right, #2563eb, #0891b2);
        border: none;
        color: #fff;
    }
    .button-secondary {
        background: rgba(255, 255, 255, 0.1);
        border: 1px solid rgba(255, 255, 255, 0.2);
        color: #fff;
    }
    .button-link {
        width: 100%;
        margin-top: 0.75rem;
        padding: 0.75rem;
        background: none;
        border: none;
        color: #93c5fd;
        font-size: 0.85rem;
        cursor: pointer;
    }
    .popup-notice {
        margin-top: 1.5rem;
        max-width: 20rem;
        padding: 0.75rem;
        background: rgba(239, 68, 68, 0.1);
        border: 1px solid rgba(239, 68, 68, 0.2);
        border-radius: 0.5rem;
        color: #fecaca;
        font-size: 0.65rem;
        line-height: 1.4;
        text-align: left;
    }
    @keyframes pulse {
        0%, 100% { opacity: 0.3; }
        50% { opacity: 0.6; }
    }
    @keyframes spin { to { transform: rotate(360deg); } }
    @keyframes equalize {
        from { height: 0.4rem; }
        to { height: 2rem; }
    }
"#;
