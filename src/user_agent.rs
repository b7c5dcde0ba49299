//! Shared User-Agent string for platform API and resource requests.

/// Product token placed before the crate version.
const PRODUCT: &str = "derivative-downloader";

/// Default User-Agent for every platform request (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version} (design-data-tool)")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_contains_crate_version() {
        let ua = default_user_agent();
        assert_eq!(
            env!("CARGO_PKG_VERSION"),
            ua.strip_prefix("derivative-downloader/")
                .and_then(|s| s.split(' ').next())
                .expect("UA has version"),
            "UA must contain crate version"
        );
    }

    #[test]
    fn test_user_agent_identifies_tool() {
        let ua = default_user_agent();
        assert!(ua.contains("design-data-tool"), "unexpected UA: {ua}");
    }
}
