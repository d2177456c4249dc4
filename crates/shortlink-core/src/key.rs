use crate::fingerprint::Fingerprint;
use crate::shortcode::ShortCode;
use std::fmt::Display;

/// Key of the global id counter. It never expires.
pub const COUNTER_KEY: &str = "next.url.id";

/// A namespaced backend key.
///
/// Each facet of a link lives in its own namespace, so code-space,
/// fingerprint-space and detail-space keys can never collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LinkKey {
    /// The global id counter, `next.url.id`.
    Counter,
    /// Code to original URL, `shortlink:<code>:url`.
    Url(ShortCode),
    /// URL fingerprint to code, `urlhash:<fingerprint>:url`.
    Fingerprint(Fingerprint),
    /// Code to JSON detail record, `shortlink:<code>:detail`.
    Detail(ShortCode),
}

impl Display for LinkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkKey::Counter => f.write_str(COUNTER_KEY),
            LinkKey::Url(code) => write!(f, "shortlink:{}:url", code),
            LinkKey::Fingerprint(fp) => write!(f, "urlhash:{}:url", fp),
            LinkKey::Detail(code) => write!(f, "shortlink:{}:detail", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_layout() {
        let code = ShortCode::from_id(1);
        let fp = Fingerprint::of("http://www.example.com");

        assert_eq!(LinkKey::Counter.to_string(), "next.url.id");
        assert_eq!(LinkKey::Url(code.clone()).to_string(), "shortlink:1:url");
        assert_eq!(LinkKey::Detail(code).to_string(), "shortlink:1:detail");
        assert_eq!(
            LinkKey::Fingerprint(fp.clone()).to_string(),
            format!("urlhash:{}:url", fp)
        );
    }
}
