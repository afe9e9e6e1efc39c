/// Which mobile OS the visitor is on, as far as the user-agent string can tell.
///
/// Classification happens once per page load and never changes afterwards;
/// `Unknown` is both the initial value and a legitimate final answer when the
/// user-agent matches nothing (desktop browsers, bots, stripped UAs).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsType {
    Ios,
    Android,
    WindowsPhone,
    Unknown,
}

/// Classify a user-agent string. Ordered tests, first match wins: Windows
/// Phone UAs also contain "Android", so that check must come first.
///
/// `has_legacy_engine` is the old-IE `window.MSStream` marker; desktop IE
/// faked an iPhone UA in some modes, so an iOS match with the marker present
/// is rejected.
pub fn classify(user_agent: &str, has_legacy_engine: bool) -> OsType {
    let ua_lower = user_agent.to_lowercase();

    if ua_lower.contains("windows phone") {
        OsType::WindowsPhone
    } else if ua_lower.contains("android") {
        OsType::Android
    } else if ["iPad", "iPhone", "iPod"]
        .iter()
        .any(|device| user_agent.contains(device))
        && !has_legacy_engine
    {
        OsType::Ios
    } else {
        OsType::Unknown
    }
}
