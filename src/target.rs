use serde::Serialize;
use url::{Host, Url};

/// Substrings that route a URL to the video loader.
const VIDEO_MARKERS: &[&str] = &["youtube.com", "youtu.be"];

/// Where a validated URL is sent for loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetUrl {
    Video(Url),
    Generic(Url),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlKind {
    Video,
    WebPage,
}

impl UrlKind {
    /// Human name used in load failure messages.
    pub fn describe(&self) -> &'static str {
        match self {
            UrlKind::Video => "YouTube video",
            UrlKind::WebPage => "website",
        }
    }
}

impl TargetUrl {
    /// Validates `raw` and classifies it by the text the caller typed, not
    /// the normalised form.
    pub fn parse(raw: &str) -> Option<Self> {
        validate(raw).map(|url| Self::classify(raw, url))
    }

    /// Markers are matched case-sensitively against `raw`.
    pub fn classify(raw: &str, url: Url) -> Self {
        if VIDEO_MARKERS.iter().any(|marker| raw.contains(marker)) {
            TargetUrl::Video(url)
        } else {
            TargetUrl::Generic(url)
        }
    }

    pub fn kind(&self) -> UrlKind {
        match self {
            TargetUrl::Video(_) => UrlKind::Video,
            TargetUrl::Generic(_) => UrlKind::WebPage,
        }
    }

    pub fn url(&self) -> &Url {
        match self {
            TargetUrl::Video(url) | TargetUrl::Generic(url) => url,
        }
    }
}

/// Syntactic URL check: http(s) scheme and a host that is an IP address or
/// a dotted domain name. Surrounding whitespace makes the input invalid.
pub fn validate(raw: &str) -> Option<Url> {
    if raw.trim() != raw {
        return None;
    }
    let url = Url::parse(raw).ok()?;

    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    let host_ok = match url.host()? {
        Host::Domain(domain) => {
            domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
        }
        Host::Ipv4(_) | Host::Ipv6(_) => true,
    };

    host_ok.then_some(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_urls() {
        assert!(validate("not a url").is_none());
        assert!(validate("example.com").is_none());
        assert!(validate("ftp://example.com/file").is_none());
        assert!(validate("http://localhost:3000").is_none());
        assert!(validate("https://example..com").is_none());
        assert!(validate(" https://example.com").is_none());
        assert!(validate("https://example.com\n").is_none());
    }

    #[test]
    fn accepts_web_urls() {
        assert!(validate("https://example.com").is_some());
        assert!(validate("http://news.example.org/a?b=c").is_some());
        assert!(validate("http://192.168.0.10/page").is_some());
    }

    #[test]
    fn classifies_video_hosts() {
        for raw in [
            "https://youtu.be/abc123",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://m.youtube.com/shorts/abc123def45",
        ] {
            let target = TargetUrl::parse(raw).unwrap();
            assert_eq!(target.kind(), UrlKind::Video, "{raw}");
        }
    }

    #[test]
    fn everything_else_is_a_web_page() {
        for raw in [
            "https://example.com",
            "https://vimeo.com/123456789",
            "https://YOUTUBE.COM/watch?v=dQw4w9WgXcQ",
        ] {
            let target = TargetUrl::parse(raw).unwrap();
            assert_eq!(target.kind(), UrlKind::WebPage, "{raw}");
        }
    }

    #[test]
    fn keeps_the_typed_url_text() {
        let target = TargetUrl::parse("https://YouTu.be/abc123").unwrap();
        assert_eq!(target.kind(), UrlKind::WebPage);
        assert_eq!(target.url().as_str(), "https://youtu.be/abc123");
    }
}
