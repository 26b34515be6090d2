//! Test helpers
//!
//! Clients preconfigured for offline and live tests, plus query-string
//! helpers for asserting on recorded requests.

use crate::http::{Client, ClientConfig};
use url::form_urlencoded;

/// A record-mode client that never sleeps between retries
///
/// No token is needed; every request is captured and answered from the
/// seeded responses (or `{}` when none are left).
pub fn local_client() -> Client {
    let config = ClientConfig::builder()
        .record_mode(true)
        .no_retry_sleep(true)
        .build();

    // Record mode builds no network stack, so this cannot fail.
    match Client::new(config) {
        Ok(client) => client,
        Err(e) => unreachable!("record-mode client failed to build: {e}"),
    }
}

/// A live client, or `None` when `WANIKANI_API_TOKEN` is unset
pub fn live_client() -> Option<Client> {
    let config = ClientConfig::from_env().ok()?;
    Client::new(config).ok()
}

/// Decode a query string for readable assertions
///
/// `levels=1%2C2&started=true` becomes `levels=1,2&started=true`. Pair
/// order is preserved.
pub fn query_unescape(query: &str) -> String {
    form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_unescape() {
        assert_eq!(
            query_unescape("updated_after=2020-01-02T03%3A04%3A05Z&slugs=a+b,c"),
            "updated_after=2020-01-02T03:04:05Z&slugs=a b,c"
        );
        assert_eq!(query_unescape(""), "");
    }

    #[test]
    fn test_local_client_is_offline() {
        let client = local_client();
        assert!(client.config().record_mode);
        assert!(client.config().no_retry_sleep);
        assert!(client.recorder().is_some());
    }
}
