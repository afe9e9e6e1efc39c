//! Redirect orchestration: the one-shot trigger guard and the per-platform
//! deep-link / store-fallback sequence.
//!
//! Everything here is pure with respect to the browser. Navigation goes
//! through the [`Navigator`] trait and visibility/clock reads through
//! [`PageProbe`], so the whole sequence is unit-testable on the host; the
//! wasm adapters live in `utils::browser` and the timers that connect
//! `begin` to `finish` live in the page component.

use crate::config::{AppLinks, DeepLinks};
use crate::platform::OsType;

/// Cosmetic delay before the auto-redirect starts, so the visitor sees the
/// loading screen instead of an instant navigation.
pub const PRE_REDIRECT_DELAY_MS: u32 = 800;
/// Android: how long to keep showing "checking app" before flipping the
/// display to "moving to store". Display only; the OS owns the real fallback.
pub const ANDROID_DISPLAY_DELAY_MS: u32 = 1000;
/// iOS: how long to wait after the deep-link attempt before deciding the app
/// did not open. Tunable policy, not protocol.
pub const IOS_APP_CHECK_DELAY_MS: u32 = 2000;
/// iOS: if this much wall-clock time passed since the attempt, the check is
/// stale (tab was suspended, clock jumped) and no store redirect is issued.
pub const IOS_CHECK_STALE_AFTER_MS: f64 = 3000.0;
/// Platforms without an app: delay before falling through to the web site.
pub const WEB_FALLBACK_DELAY_MS: u32 = 1500;

/// Display-only lifecycle of the redirect attempt. One-directional; never
/// resets within a session. The presentation layer reads it, nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectStatus {
    Idle,
    CheckingApp,
    RedirectingStore,
}

/// The attempt guard: whether the auto-redirect sequence has fired yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Triggered,
}

/// Guard transition. Fires exactly once: the first time classification is
/// observed away from `Unknown` while still `Idle`. Re-renders may call this
/// any number of times afterwards without effect.
pub fn arm(os: OsType, state: TriggerState) -> (TriggerState, bool) {
    match (os, state) {
        (OsType::Unknown, state) => (state, false),
        (_, TriggerState::Idle) => (TriggerState::Triggered, true),
        (_, TriggerState::Triggered) => (TriggerState::Triggered, false),
    }
}

/// The one capability the orchestrator needs from the outside world: set the
/// current location. No return value; success is never observed directly.
pub trait Navigator {
    fn navigate(&self, url: &str);
}

/// Read-only signals consumed by the iOS fallback check.
pub trait PageProbe {
    /// Is the page currently hidden from the user (tab backgrounded)?
    fn is_hidden(&self) -> bool;
    /// Wall-clock milliseconds.
    fn now_ms(&self) -> f64;
}

/// Deferred second half of a redirect sequence, to be run after `delay_ms`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FollowUp {
    pub delay_ms: u32,
    pub kind: FollowUpKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FollowUpKind {
    /// Android: flip the display to "moving to store". No navigation; the
    /// intent URI already delegated app-or-store to the OS.
    StoreDisplay,
    /// iOS: decide whether the app opened, and go to the store if not.
    AppOpenCheck { started_at_ms: f64 },
    /// No app on this platform: go to the web site.
    WebFallback,
}

/// Runs the per-platform redirect algorithm against an abstract navigator.
pub struct Redirector<'a, N: Navigator> {
    links: &'a AppLinks,
    deep_links: &'a DeepLinks,
    navigator: N,
}

impl<'a, N: Navigator> Redirector<'a, N> {
    pub fn new(links: &'a AppLinks, deep_links: &'a DeepLinks, navigator: N) -> Self {
        Self {
            links,
            deep_links,
            navigator,
        }
    }

    /// Immediate half of the sequence: attempt the deep link where the
    /// platform has one, and describe what to do after the platform delay.
    pub fn begin(&self, os: OsType, probe: &dyn PageProbe) -> (RedirectStatus, FollowUp) {
        match os {
            OsType::Android => {
                self.navigator.navigate(&self.deep_links.android);
                (
                    RedirectStatus::CheckingApp,
                    FollowUp {
                        delay_ms: ANDROID_DISPLAY_DELAY_MS,
                        kind: FollowUpKind::StoreDisplay,
                    },
                )
            }
            OsType::Ios => {
                let started_at_ms = probe.now_ms();
                self.navigator.navigate(&self.deep_links.ios);
                (
                    RedirectStatus::CheckingApp,
                    FollowUp {
                        delay_ms: IOS_APP_CHECK_DELAY_MS,
                        kind: FollowUpKind::AppOpenCheck { started_at_ms },
                    },
                )
            }
            // Windows Phone, or anything else that still resolved: no app to
            // try, go to the web site after a beat.
            _ => (
                RedirectStatus::RedirectingStore,
                FollowUp {
                    delay_ms: WEB_FALLBACK_DELAY_MS,
                    kind: FollowUpKind::WebFallback,
                },
            ),
        }
    }

    /// Deferred half. Returns the status to display, or `None` when nothing
    /// further should happen (iOS check concluded the app took over).
    pub fn finish(&self, kind: FollowUpKind, probe: &dyn PageProbe) -> Option<RedirectStatus> {
        match kind {
            FollowUpKind::StoreDisplay => Some(RedirectStatus::RedirectingStore),
            FollowUpKind::AppOpenCheck { started_at_ms } => {
                let elapsed_ms = probe.now_ms() - started_at_ms;
                // Still visible and the check is fresh: the custom scheme did
                // not open anything, fall back to the store. A hidden page
                // means the app likely took over; a stale check means the
                // tab was suspended and a late store redirect would be wrong.
                if !probe.is_hidden() && elapsed_ms < IOS_CHECK_STALE_AFTER_MS {
                    self.navigator.navigate(self.links.ios);
                    Some(RedirectStatus::RedirectingStore)
                } else {
                    None
                }
            }
            FollowUpKind::WebFallback => {
                self.navigator.navigate(self.links.web);
                Some(RedirectStatus::RedirectingStore)
            }
        }
    }
}

/// Store destination for the manual "open store" button. Defaults to the web
/// site while the platform is unresolved.
pub fn store_url<'a>(os: OsType, links: &'a AppLinks) -> &'a str {
    match os {
        OsType::Ios => links.ios,
        OsType::Android => links.android,
        _ => links.web,
    }
}

/// Deep link for the manual "open app" button; only iOS and Android have one.
pub fn deep_link<'a>(os: OsType, deep_links: &'a DeepLinks) -> Option<&'a str> {
    match os {
        OsType::Ios => Some(deep_links.ios.as_str()),
        OsType::Android => Some(deep_links.android.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_links() -> AppLinks {
        AppLinks {
            ios: "https://apps.example/ios",
            android: "https://play.example/android",
            web: "https://example.jp/app",
        }
    }

    fn test_deep_links() -> DeepLinks {
        DeepLinks {
            ios: "exampleapp://".to_string(),
            android: format!(
                "intent://open#Intent;scheme=exampleapp;package=jp.example.app;S.browser_fallback_url={};end",
                urlencoding::encode("https://play.example/android")
            ),
        }
    }

    /// Records every navigation instead of touching the window.
    #[derive(Clone, Default)]
    struct RecordingNavigator {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, url: &str) {
            self.calls.borrow_mut().push(url.to_string());
        }
    }

    struct ScriptedProbe {
        hidden: bool,
        now_ms: f64,
    }

    impl PageProbe for ScriptedProbe {
        fn is_hidden(&self) -> bool {
            self.hidden
        }
        fn now_ms(&self) -> f64 {
            self.now_ms
        }
    }

    #[test]
    fn guard_fires_once_across_render_storms() {
        let (state, fired) = arm(OsType::Unknown, TriggerState::Idle);
        assert_eq!(state, TriggerState::Idle);
        assert!(!fired);

        let (state, fired) = arm(OsType::Android, state);
        assert_eq!(state, TriggerState::Triggered);
        assert!(fired);

        // classification keeps being re-observed; nothing fires again
        for os in [OsType::Android, OsType::Ios, OsType::Unknown, OsType::Android] {
            let (next, fired) = arm(os, TriggerState::Triggered);
            assert_eq!(next, TriggerState::Triggered);
            assert!(!fired);
        }
    }

    #[test]
    fn guard_never_fires_while_unknown() {
        let mut state = TriggerState::Idle;
        for _ in 0..10 {
            let (next, fired) = arm(OsType::Unknown, state);
            assert!(!fired);
            state = next;
        }
        assert_eq!(state, TriggerState::Idle);
    }

    #[test]
    fn android_navigates_to_intent_uri_exactly_once() {
        let links = test_links();
        let deep = test_deep_links();
        let nav = RecordingNavigator::default();
        let redirector = Redirector::new(&links, &deep, nav.clone());
        let probe = ScriptedProbe { hidden: false, now_ms: 0.0 };

        let (status, follow_up) = redirector.begin(OsType::Android, &probe);
        assert_eq!(status, RedirectStatus::CheckingApp);
        assert_eq!(follow_up.delay_ms, ANDROID_DISPLAY_DELAY_MS);

        let calls = nav.calls.borrow().clone();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("intent://"));
        assert!(calls[0].contains("package=jp.example.app"));
        assert!(calls[0].contains(urlencoding::encode("https://play.example/android").as_ref()));

        // the follow-up is display only
        let status = redirector.finish(follow_up.kind, &probe);
        assert_eq!(status, Some(RedirectStatus::RedirectingStore));
        assert_eq!(nav.calls.borrow().len(), 1);
    }

    #[test]
    fn ios_app_opened_suppresses_store_redirect() {
        let links = test_links();
        let deep = test_deep_links();
        let nav = RecordingNavigator::default();
        let redirector = Redirector::new(&links, &deep, nav.clone());

        let probe = ScriptedProbe { hidden: false, now_ms: 10_000.0 };
        let (status, follow_up) = redirector.begin(OsType::Ios, &probe);
        assert_eq!(status, RedirectStatus::CheckingApp);
        assert_eq!(follow_up.delay_ms, IOS_APP_CHECK_DELAY_MS);
        assert_eq!(nav.calls.borrow().as_slice(), ["exampleapp://"]);

        // the tab backgrounded: the app took over, do nothing further
        let probe = ScriptedProbe { hidden: true, now_ms: 12_000.0 };
        assert_eq!(redirector.finish(follow_up.kind, &probe), None);
        assert_eq!(nav.calls.borrow().len(), 1);
    }

    #[test]
    fn ios_app_absent_falls_back_to_store() {
        let links = test_links();
        let deep = test_deep_links();
        let nav = RecordingNavigator::default();
        let redirector = Redirector::new(&links, &deep, nav.clone());

        let probe = ScriptedProbe { hidden: false, now_ms: 10_000.0 };
        let (_, follow_up) = redirector.begin(OsType::Ios, &probe);

        // still visible, check fresh: conclude the app is not installed
        let probe = ScriptedProbe { hidden: false, now_ms: 12_000.0 };
        let status = redirector.finish(follow_up.kind, &probe);
        assert_eq!(status, Some(RedirectStatus::RedirectingStore));
        assert_eq!(
            nav.calls.borrow().as_slice(),
            ["exampleapp://", "https://apps.example/ios"]
        );
    }

    #[test]
    fn ios_stale_check_issues_no_navigation() {
        let links = test_links();
        let deep = test_deep_links();
        let nav = RecordingNavigator::default();
        let redirector = Redirector::new(&links, &deep, nav.clone());

        let probe = ScriptedProbe { hidden: false, now_ms: 10_000.0 };
        let (_, follow_up) = redirector.begin(OsType::Ios, &probe);

        // visible, but too much time passed since the attempt
        let probe = ScriptedProbe { hidden: false, now_ms: 10_000.0 + IOS_CHECK_STALE_AFTER_MS };
        assert_eq!(redirector.finish(follow_up.kind, &probe), None);
        assert_eq!(nav.calls.borrow().len(), 1);
    }

    #[test]
    fn windows_phone_path_goes_to_web() {
        let links = test_links();
        let deep = test_deep_links();
        let nav = RecordingNavigator::default();
        let redirector = Redirector::new(&links, &deep, nav.clone());
        let probe = ScriptedProbe { hidden: false, now_ms: 0.0 };

        let (status, follow_up) = redirector.begin(OsType::WindowsPhone, &probe);
        assert_eq!(status, RedirectStatus::RedirectingStore);
        assert_eq!(follow_up.delay_ms, WEB_FALLBACK_DELAY_MS);
        // no deep-link attempt on this path
        assert!(nav.calls.borrow().is_empty());

        let status = redirector.finish(follow_up.kind, &probe);
        assert_eq!(status, Some(RedirectStatus::RedirectingStore));
        assert_eq!(nav.calls.borrow().as_slice(), ["https://example.jp/app"]);
    }

    #[test]
    fn manual_store_url_per_platform() {
        let links = test_links();
        assert_eq!(store_url(OsType::Unknown, &links), "https://example.jp/app");
        assert_eq!(store_url(OsType::Ios, &links), "https://apps.example/ios");
        assert_eq!(store_url(OsType::Android, &links), "https://play.example/android");
        assert_eq!(store_url(OsType::WindowsPhone, &links), "https://example.jp/app");
    }

    #[test]
    fn manual_deep_link_only_for_app_platforms() {
        let deep = test_deep_links();
        assert_eq!(deep_link(OsType::Ios, &deep), Some("exampleapp://"));
        assert!(deep_link(OsType::Android, &deep).unwrap().starts_with("intent://"));
        assert_eq!(deep_link(OsType::WindowsPhone, &deep), None);
        assert_eq!(deep_link(OsType::Unknown, &deep), None);
    }

    #[test]
    fn manual_web_url_is_stable() {
        // the "open website" control always lands on the same fixed URL
        let links = test_links();
        let nav = RecordingNavigator::default();
        for _ in 0..3 {
            nav.navigate(links.web);
        }
        assert_eq!(
            nav.calls.borrow().as_slice(),
            ["https://example.jp/app"; 3]
        );
    }
}
