use once_cell::sync::Lazy;

/// Store and web destinations, one per platform.
#[derive(Debug)]
pub struct AppLinks {
    pub ios: &'static str,
    pub android: &'static str,
    pub web: &'static str,
}

/// URIs that open the installed app directly.
#[derive(Debug)]
pub struct DeepLinks {
    pub ios: String,
    pub android: String,
}

pub const WIFI_SSID: &str = "+karaokekan-wifi";

pub static APP_LINKS: AppLinks = AppLinks {
    ios: "https://apps.apple.com/jp/app/%E3%82%AB%E3%83%A9%E3%82%AA%E3%82%B1%E9%A4%A8%E5%85%AC%E5%BC%8F%E3%82%A2%E3%83%97%E3%83%AA/id1341634219",
    android: "https://play.google.com/store/apps/details?id=jp.karaokekan.karakan.karakan&hl=ja",
    web: "https://karaokekan.jp/app",
};

const ANDROID_PACKAGE_ID: &str = "jp.karaokekan.karakan.karakan";

// The scheme registered by the Android app is a deployment detail, not
// something this page can verify. Override at build time when it changes:
// ANDROID_APP_SCHEME=... trunk build
const ANDROID_SCHEME: &str = match option_env!("ANDROID_APP_SCHEME") {
    Some(scheme) => scheme,
    None => "karaokekan",
};

pub static DEEP_LINKS: Lazy<DeepLinks> = Lazy::new(|| DeepLinks {
    ios: "jp.karaokekan.karakan://".to_string(),
    android: android_intent_uri(ANDROID_SCHEME, ANDROID_PACKAGE_ID, APP_LINKS.android),
});

/// Build an Android intent URI with an embedded browser fallback, so the OS
/// launches the app when installed and opens the store page when it is not.
/// The fallback URL must be percent-encoded to survive inside the intent
/// string.
fn android_intent_uri(scheme: &str, package: &str, fallback_url: &str) -> String {
    format!(
        "intent://open#Intent;scheme={};package={};S.browser_fallback_url={};end",
        scheme,
        package,
        urlencoding::encode(fallback_url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_uri_embeds_package_and_encoded_fallback() {
        let uri = android_intent_uri("karaokekan", ANDROID_PACKAGE_ID, APP_LINKS.android);
        assert!(uri.starts_with("intent://"));
        assert!(uri.ends_with(";end"));
        assert!(uri.contains("package=jp.karaokekan.karakan.karakan;"));
        assert!(uri.contains(urlencoding::encode(APP_LINKS.android).as_ref()));
        // the raw fallback URL must not appear unencoded
        assert!(!uri.contains(APP_LINKS.android));
    }

    #[test]
    fn android_deep_link_is_an_intent_uri() {
        assert!(DEEP_LINKS.android.starts_with("intent://"));
        assert!(DEEP_LINKS.ios.ends_with("://"));
    }
}
