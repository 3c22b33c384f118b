//! WooCommerce REST API client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::auth::{self, AuthMethod, OAuthParams};
use super::error::WooError;
use super::types::ApiResponse;
use crate::config::WooCommerceConfig;

/// WooCommerce REST API client.
///
/// Cheap to clone; clones share the HTTP client.
#[derive(Clone)]
pub struct WooClient {
    inner: Arc<WooClientInner>,
}

struct WooClientInner {
    client: reqwest::Client,
    store_url: String,
    api_version: String,
    consumer_key: String,
    consumer_secret: SecretString,
    timeout: Duration,
    query_string_auth: bool,
}

impl std::fmt::Debug for WooClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooClient")
            .field("store_url", &self.inner.store_url)
            .field("api_version", &self.inner.api_version)
            .field("consumer_key", &self.inner.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl WooClient {
    /// Create a client for a store.
    ///
    /// `store_url` must not end with a slash.
    #[must_use]
    pub fn new(client: reqwest::Client, store_url: &str, config: &WooCommerceConfig) -> Self {
        Self {
            inner: Arc::new(WooClientInner {
                client,
                store_url: store_url.to_string(),
                api_version: config.api_version.clone(),
                consumer_key: config.consumer_key.clone(),
                consumer_secret: config.consumer_secret.clone(),
                timeout: config.timeout,
                query_string_auth: config.query_string_auth,
            }),
        }
    }

    /// Full URL of an API endpoint, e.g. `products` becomes
    /// `<store>/wp-json/wc/v3/products`.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/wp-json/{}/{}",
            self.inner.store_url,
            self.inner.api_version,
            endpoint.trim_start_matches('/')
        )
    }

    /// How requests from this client are authenticated.
    ///
    /// # Errors
    ///
    /// Returns `WooError::Url` if the store URL does not parse.
    pub fn auth_method(&self) -> Result<AuthMethod, WooError> {
        let url = Url::parse(&self.endpoint_url(""))?;
        Ok(AuthMethod::for_url(&url, self.inner.query_string_auth))
    }

    /// POST a JSON body to an endpoint.
    ///
    /// Any HTTP status is returned as an [`ApiResponse`]; only transport and
    /// request-building failures are errors.
    pub(crate) async fn post<B>(&self, endpoint: &str, body: &B) -> Result<ApiResponse, WooError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let body = serde_json::to_vec(body)?;
        let response = self
            .request(Method::POST, endpoint)?
            .header(CONTENT_TYPE, "application/json;charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }

    /// Build an authenticated request with the default headers and timeout.
    fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder, WooError> {
        let inner = &self.inner;
        let mut url = Url::parse(&self.endpoint_url(endpoint))?;
        let secret = inner.consumer_secret.expose_secret();

        let auth_method = AuthMethod::for_url(&url, inner.query_string_auth);
        debug!(?auth_method, %method, path = %url.path(), "Building WooCommerce request");

        let builder = match auth_method {
            AuthMethod::Basic => inner
                .client
                .request(method, url)
                .basic_auth(&inner.consumer_key, Some(secret)),
            AuthMethod::QueryString => {
                url.query_pairs_mut()
                    .append_pair("consumer_key", &inner.consumer_key)
                    .append_pair("consumer_secret", secret);
                inner.client.request(method, url)
            }
            AuthMethod::OAuth => {
                let params = OAuthParams::now(&inner.consumer_key, secret, &inner.api_version);
                let signed = auth::sign_url(&url, method.as_str(), &params)?;
                inner.client.request(method, signed)
            }
        };

        Ok(builder
            .timeout(inner.timeout)
            .header(ACCEPT, "application/json"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(query_string_auth: bool) -> WooCommerceConfig {
        WooCommerceConfig {
            consumer_key: "ck_test".to_string(),
            consumer_secret: SecretString::from("cs_super_secret"),
            api_version: "wc/v3".to_string(),
            timeout: Duration::from_secs(5),
            query_string_auth,
        }
    }

    #[test]
    fn test_endpoint_url() {
        let woo = WooClient::new(reqwest::Client::new(), "https://shop.example.com", &config(false));
        assert_eq!(
            woo.endpoint_url("products"),
            "https://shop.example.com/wp-json/wc/v3/products"
        );
        assert_eq!(
            woo.endpoint_url("/products"),
            "https://shop.example.com/wp-json/wc/v3/products"
        );
    }

    #[test]
    fn test_auth_method_follows_scheme() {
        let https = WooClient::new(reqwest::Client::new(), "https://shop.example.com", &config(false));
        let https_qs = WooClient::new(reqwest::Client::new(), "https://shop.example.com", &config(true));
        let http = WooClient::new(reqwest::Client::new(), "http://localhost:8080", &config(false));

        assert_eq!(https.auth_method().unwrap(), AuthMethod::Basic);
        assert_eq!(https_qs.auth_method().unwrap(), AuthMethod::QueryString);
        assert_eq!(http.auth_method().unwrap(), AuthMethod::OAuth);
    }

    #[test]
    fn test_query_string_auth_request() {
        let woo = WooClient::new(reqwest::Client::new(), "https://shop.example.com", &config(true));
        let request = woo.request(Method::POST, "products").unwrap().build().unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://shop.example.com/wp-json/wc/v3/products?consumer_key=ck_test&consumer_secret=cs_super_secret"
        );
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_basic_auth_request() {
        let woo = WooClient::new(reqwest::Client::new(), "https://shop.example.com", &config(false));
        let request = woo.request(Method::POST, "products").unwrap().build().unwrap();

        assert_eq!(request.url().query(), None);
        let auth = request.headers()["authorization"].to_str().unwrap();
        assert!(auth.starts_with("Basic "));
        assert_eq!(request.headers()["accept"], "application/json");
        assert_eq!(request.timeout(), Some(&Duration::from_secs(5)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let woo = WooClient::new(reqwest::Client::new(), "https://shop.example.com", &config(false));
        let debug_output = format!("{woo:?}");
        assert!(debug_output.contains("ck_test"));
        assert!(!debug_output.contains("cs_super_secret"));
    }
}
