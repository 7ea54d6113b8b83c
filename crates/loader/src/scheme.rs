// Scheme translation between the private playlist scheme and the real
// transport scheme, plus directory-prefix resolution for relative paths.

use url::Url;

use crate::config::SchemeConfig;
use crate::error::LoaderError;

#[derive(Debug, Clone)]
pub struct SchemeTranslator {
    config: SchemeConfig,
}

impl SchemeTranslator {
    pub fn new(config: SchemeConfig) -> Self {
        Self { config }
    }

    /// Whether the URL carries the private scheme: exact, case-sensitive
    /// match on the text before the first `:`, no wildcards.
    pub fn matches(&self, url: &str) -> bool {
        url.split_once(':')
            .is_some_and(|(scheme, _)| scheme == self.config.private_scheme)
    }

    /// Substitutes the transport scheme for every textual occurrence of the
    /// private scheme token, then re-parses the result.
    pub fn translate(&self, url: &str) -> Result<Url, LoaderError> {
        let substituted = url.replace(
            &self.config.private_scheme,
            &self.config.transport_scheme,
        );
        Url::parse(&substituted)
            .map_err(|e| LoaderError::malformed_url(substituted.as_str(), e.to_string()))
    }

    /// Reverse substitution: the private-scheme form of a transport URL.
    /// `translate` applied to the result reproduces the input string.
    pub fn to_private(&self, url: &str) -> String {
        url.replace(
            &self.config.transport_scheme,
            &self.config.private_scheme,
        )
    }

    /// The URL string up to (not including) the last path separator; empty
    /// when no separator exists. Relative manifest references are rewritten
    /// against this prefix.
    pub fn directory_prefix(url: &Url) -> &str {
        let raw = url.as_str();
        match raw.rfind('/') {
            Some(idx) => &raw[..idx],
            None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> SchemeTranslator {
        SchemeTranslator::new(SchemeConfig::default())
    }

    #[test]
    fn matches_only_the_private_scheme() {
        let t = translator();
        assert!(t.matches("cplp://host/path/master.m3u8"));
        assert!(!t.matches("https://host/path/master.m3u8"));
        assert!(!t.matches("http://host/path/master.m3u8"));
        assert!(!t.matches("file:///tmp/master.m3u8"));
        assert!(!t.matches("no-scheme-here"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let t = translator();
        assert!(!t.matches("CPLP://host/path/master.m3u8"));
        assert!(!t.matches("Cplp://host/path/master.m3u8"));
    }

    #[test]
    fn translate_swaps_only_the_scheme_token() {
        let t = translator();
        let url = t.translate("cplp://host/path/master.m3u8").expect("valid");
        assert_eq!(url.as_str(), "https://host/path/master.m3u8");
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn translate_then_to_private_round_trips() {
        let t = translator();
        let original = "cplp://host/path/master.m3u8";
        let translated = t.translate(original).expect("valid");
        assert_eq!(t.to_private(translated.as_str()), original);
    }

    #[test]
    fn translate_rejects_unparsable_results() {
        let t = translator();
        let err = t.translate("cplp://").expect_err("no host should not parse");
        assert!(matches!(err, LoaderError::MalformedUrl { .. }));
    }

    #[test]
    fn directory_prefix_drops_the_last_component() {
        let url = Url::parse("https://host/path/master.m3u8").expect("valid");
        assert_eq!(SchemeTranslator::directory_prefix(&url), "https://host/path");
    }

    #[test]
    fn directory_prefix_of_root_keeps_the_authority() {
        let url = Url::parse("https://host/master.m3u8").expect("valid");
        assert_eq!(SchemeTranslator::directory_prefix(&url), "https://host");
    }

    #[test]
    fn custom_scheme_pair_is_honored() {
        let t = SchemeTranslator::new(SchemeConfig {
            private_scheme: "demo".to_owned(),
            transport_scheme: "http".to_owned(),
        });
        assert!(t.matches("demo://host/x.m3u8"));
        assert!(!t.matches("cplp://host/x.m3u8"));
        let url = t.translate("demo://host/x.m3u8").expect("valid");
        assert_eq!(url.as_str(), "http://host/x.m3u8");
    }
}
