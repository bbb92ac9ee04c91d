//! Long-lived upstream HTTP session.
//!
//! One `reqwest::Client` per upstream, carrying the source's browser-like
//! default headers plus its current `Cookie` header. When the cookie store
//! generation for the source moves, the next caller rebuilds the client under
//! the write lock. Calls already in flight keep the client they cloned.

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::Client;
use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};

use super::cookies::{CookieStore, cookie_header_value};
use crate::domain::UpstreamSource;

struct BuiltClient {
    generation: u64,
    client: Client,
}

/// Shared HTTP session for one upstream source.
pub struct UpstreamSession {
    source: UpstreamSource,
    base_headers: HeaderMap,
    cookies: Arc<CookieStore>,
    built: RwLock<BuiltClient>,
}

impl UpstreamSession {
    /// Build the session with the cookie currently held for `source`.
    pub fn new(
        source: UpstreamSource,
        base_headers: HeaderMap,
        cookies: Arc<CookieStore>,
    ) -> Result<Self, reqwest::Error> {
        let snapshot = cookies.snapshot(source);
        let client = build_client(source, &base_headers, snapshot.value.as_deref())?;
        Ok(Self {
            source,
            base_headers,
            cookies,
            built: RwLock::new(BuiltClient {
                generation: snapshot.generation,
                client,
            }),
        })
    }

    /// Client reflecting the latest cookie for this source.
    pub fn client(&self) -> Client {
        let snapshot = self.cookies.snapshot(self.source);
        {
            let built = self.built.read();
            if built.generation >= snapshot.generation {
                return built.client.clone();
            }
        }

        let mut built = self.built.write();
        if built.generation < snapshot.generation {
            match build_client(self.source, &self.base_headers, snapshot.value.as_deref()) {
                Ok(client) => {
                    built.client = client;
                    built.generation = snapshot.generation;
                    tracing::info!(
                        source = %self.source,
                        generation = snapshot.generation,
                        "Upstream session rebuilt"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        source = %self.source,
                        error = %e,
                        "Failed to rebuild upstream session, keeping previous client"
                    );
                }
            }
        }
        built.client.clone()
    }
}

impl std::fmt::Debug for UpstreamSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamSession")
            .field("source", &self.source)
            .field("generation", &self.built.read().generation)
            .finish_non_exhaustive()
    }
}

/// Build a header map from static name/value pairs. Names must be lowercase.
#[must_use]
pub fn static_headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    pairs
        .iter()
        .map(|&(name, value)| (HeaderName::from_static(name), HeaderValue::from_static(value)))
        .collect()
}

fn build_client(
    source: UpstreamSource,
    base_headers: &HeaderMap,
    cookie: Option<&str>,
) -> Result<Client, reqwest::Error> {
    let mut headers = base_headers.clone();
    if let Some(header) = cookie.and_then(cookie_header_value) {
        match HeaderValue::from_str(&header) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(COOKIE, value);
            }
            Err(_) => {
                tracing::warn!(
                    source = %source,
                    "Cookie is not a valid header value, sending none"
                );
            }
        }
    }
    Client::builder().default_headers(headers).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn cookie_headers_seen(server: &MockServer) -> Vec<Option<String>> {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| {
                r.headers
                    .get("cookie")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .collect()
    }

    #[tokio::test]
    async fn cookie_update_applies_to_next_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let cookies = Arc::new(CookieStore::new());
        let session = UpstreamSession::new(
            UpstreamSource::Xueqiu,
            static_headers(&[("x-gateway-test", "1")]),
            Arc::clone(&cookies),
        )
        .unwrap();
        let url = format!("{}/ping", server.uri());

        session.client().get(&url).send().await.unwrap();
        cookies.set(UpstreamSource::Xueqiu, "b=2; a=1");
        session.client().get(&url).send().await.unwrap();
        cookies.set(UpstreamSource::Xueqiu, "");
        session.client().get(&url).send().await.unwrap();

        assert_eq!(
            cookie_headers_seen(&server).await,
            vec![None, Some("a=1; b=2".to_string()), None]
        );
        let requests = server.received_requests().await.unwrap();
        assert!(requests.iter().all(|r| r.headers.contains_key("x-gateway-test")));
    }

    #[tokio::test]
    async fn malformed_cookie_sends_no_cookie_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let cookies = Arc::new(CookieStore::with_values([(
            UpstreamSource::PumpFun,
            "a=1".to_string(),
        )]));
        let session = UpstreamSession::new(
            UpstreamSource::PumpFun,
            HeaderMap::new(),
            Arc::clone(&cookies),
        )
        .unwrap();
        let url = format!("{}/ping", server.uri());

        session.client().get(&url).send().await.unwrap();
        cookies.set(UpstreamSource::PumpFun, "noequalsign");
        session.client().get(&url).send().await.unwrap();

        assert_eq!(
            cookie_headers_seen(&server).await,
            vec![Some("a=1".to_string()), None]
        );
        assert_eq!(
            session.built.read().generation,
            cookies.snapshot(UpstreamSource::PumpFun).generation
        );
    }

    #[tokio::test]
    async fn other_source_updates_do_not_rebuild() {
        let cookies = Arc::new(CookieStore::new());
        let session = UpstreamSession::new(
            UpstreamSource::PumpFun,
            HeaderMap::new(),
            Arc::clone(&cookies),
        )
        .unwrap();

        cookies.set(UpstreamSource::Xueqiu, "a=1");
        let _ = session.client();
        assert_eq!(session.built.read().generation, 0);

        cookies.set(UpstreamSource::PumpFun, "a=1");
        let _ = session.client();
        assert_eq!(session.built.read().generation, 1);
    }

    #[test]
    fn static_headers_are_lowercase_pairs() {
        let headers = static_headers(&[("referer", "https://example.com/")]);
        assert_eq!(headers["referer"], "https://example.com/");
    }
}
