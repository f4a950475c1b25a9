//! Browser Fingerprint
//!
//! The broadcaster pages serve their player markup to desktop browsers,
//! so requests carry a realistic desktop header set.

use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

/// Accept-Language sent when the config does not override it.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "tr-TR,tr;q=0.9,en-US;q=0.8,en;q=0.7";

/// Browser profile with realistic fingerprint
#[derive(Debug, Clone)]
pub struct BrowserProfile {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub sec_ch_ua: String,
    pub sec_ch_ua_platform: String,
}

/// Real Chrome versions (high market share)
const CHROME_VERSIONS: &[(&str, &str)] = &[
    ("131", "131.0.0.0"),
    ("130", "130.0.0.0"),
    ("129", "129.0.0.0"),
    ("128", "128.0.0.0"),
];

/// Real Firefox versions
const FIREFOX_VERSIONS: &[&str] = &["133.0", "132.0", "131.0"];

/// Platform configurations
#[derive(Debug, Clone, Copy)]
enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    fn random() -> Self {
        let mut rng = rand::thread_rng();
        // Windows 70%, macOS 20%, Linux 10%
        let roll: f32 = rng.gen();
        if roll < 0.70 {
            Platform::Windows
        } else if roll < 0.90 {
            Platform::MacOS
        } else {
            Platform::Linux
        }
    }

    fn os_string(self) -> &'static str {
        match self {
            Platform::MacOS => "Macintosh; Intel Mac OS X 10_15_7",
            Platform::Windows => "Windows NT 10.0; Win64; x64",
            Platform::Linux => "X11; Linux x86_64",
        }
    }

    fn sec_ch_platform(self) -> &'static str {
        match self {
            Platform::MacOS => "\"macOS\"",
            Platform::Windows => "\"Windows\"",
            Platform::Linux => "\"Linux\"",
        }
    }
}

/// Generate a realistic Chrome browser profile
#[must_use]
pub fn chrome_profile() -> BrowserProfile {
    let mut rng = rand::thread_rng();
    let platform = Platform::random();
    let (major, full) = CHROME_VERSIONS
        .choose(&mut rng)
        .copied()
        .unwrap_or(("131", "131.0.0.0"));

    let user_agent = format!(
        "Mozilla/5.0 ({}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{full} Safari/537.36",
        platform.os_string(),
    );

    BrowserProfile {
        user_agent,
        accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8".to_string(),
        accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        sec_ch_ua: format!(
            "\"Google Chrome\";v=\"{major}\", \"Chromium\";v=\"{major}\", \"Not_A Brand\";v=\"24\""
        ),
        sec_ch_ua_platform: platform.sec_ch_platform().to_string(),
    }
}

/// Generate a realistic Firefox browser profile
#[must_use]
pub fn firefox_profile() -> BrowserProfile {
    let mut rng = rand::thread_rng();
    let platform = Platform::random();
    let version = FIREFOX_VERSIONS.choose(&mut rng).copied().unwrap_or("133.0");

    BrowserProfile {
        user_agent: format!(
            "Mozilla/5.0 ({}; rv:{version}) Gecko/20100101 Firefox/{version}",
            platform.os_string(),
        ),
        accept:
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                .to_string(),
        accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        // Firefox doesn't send Sec-CH-UA headers
        sec_ch_ua: String::new(),
        sec_ch_ua_platform: String::new(),
    }
}

/// Generate a random browser profile (Chrome 75%, Firefox 25%)
#[must_use]
pub fn random_profile() -> BrowserProfile {
    let roll: f32 = rand::thread_rng().gen();
    if roll < 0.75 {
        chrome_profile()
    } else {
        firefox_profile()
    }
}

impl BrowserProfile {
    /// Replace the user agent, dropping the Chrome client hints that would
    /// contradict it.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self.sec_ch_ua.clear();
        self.sec_ch_ua_platform.clear();
        self
    }

    #[must_use]
    pub fn with_accept_language(mut self, accept_language: &str) -> Self {
        self.accept_language = accept_language.to_string();
        self
    }

    /// Convert profile to reqwest `HeaderMap`.
    ///
    /// Values that are not valid header text are skipped.
    pub fn to_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let mut insert = |name: HeaderName, value: &str| {
            if value.is_empty() {
                return;
            }
            match HeaderValue::from_str(value) {
                Ok(v) => {
                    headers.insert(name, v);
                }
                Err(_) => tracing::warn!(header = %name, "Skipping invalid header value"),
            }
        };

        insert(USER_AGENT, &self.user_agent);
        insert(ACCEPT, &self.accept);
        insert(ACCEPT_LANGUAGE, &self.accept_language);
        insert(HeaderName::from_static("sec-ch-ua"), &self.sec_ch_ua);
        insert(
            HeaderName::from_static("sec-ch-ua-platform"),
            &self.sec_ch_ua_platform,
        );

        headers
    }
}
