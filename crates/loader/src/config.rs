/// URL scheme tokens used by the interceptor.
///
/// Passed into the translator at construction so the scheme pair is explicit
/// per-interceptor configuration rather than process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeConfig {
    /// Private scheme token carried by intercepted playlist URLs.
    pub private_scheme: String,

    /// Real transport scheme substituted for outbound fetches.
    pub transport_scheme: String,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            private_scheme: "cplp".to_owned(),
            transport_scheme: "https".to_owned(),
        }
    }
}
