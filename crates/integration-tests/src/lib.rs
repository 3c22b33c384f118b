//! Integration tests for woo-listing.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p woo-listing-integration-tests
//! ```
//!
//! No store is needed: [`MockStore`] serves the WordPress media endpoint
//! and the WooCommerce products endpoint from an in-process axum server
//! and records every request it receives.
//!
//! # Test Categories
//!
//! - `create_product` - Full submissions through `ProductService`
//! - `media_upload` - Image uploads through `MediaClient`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use tokio::net::TcpListener;
use woo_listing_client::config::{AppConfig, ConfigError};
use woo_listing_client::services::ProductService;

/// Path of the WordPress media endpoint.
pub const MEDIA_PATH: &str = "/wp-json/wp/v2/media";
/// Path of the WooCommerce products endpoint.
pub const PRODUCTS_PATH: &str = "/wp-json/wc/v3/products";

pub const CONSUMER_KEY: &str = "ck_test";
pub const CONSUMER_SECRET: &str = "cs_test";
pub const WP_USERNAME: &str = "shop-admin";
pub const WP_APPLICATION_PASSWORD: &str = "abcd efgh ijkl";

/// A request the mock store received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    /// A header value as text, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The body as text.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Query parameters, decoded.
    #[must_use]
    pub fn query_params(&self) -> HashMap<String, String> {
        self.query
            .as_deref()
            .map(|q| {
                url_pairs(q)
                    .into_iter()
                    .collect::<HashMap<String, String>>()
            })
            .unwrap_or_default()
    }
}

/// Status and body the mock sends back.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
}

impl MockReply {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Debug)]
struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    media_reply: Mutex<MockReply>,
    product_reply: Mutex<MockReply>,
}

/// In-process stand-in for a WordPress + WooCommerce store.
///
/// Replies default to a successful upload and a created product with ID 1.
#[derive(Debug, Clone)]
pub struct MockStore {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockStore {
    /// Bind to a free local port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if no port can be bound.
    pub async fn start() -> io::Result<Self> {
        let state = Arc::new(MockState {
            requests: Mutex::new(Vec::new()),
            media_reply: Mutex::new(MockReply::new(
                201,
                r#"{"id":7,"source_url":"https://cdn.example.com/uploads/image.jpg"}"#,
            )),
            product_reply: Mutex::new(MockReply::new(201, r#"{"id":1}"#)),
        });

        let app = Router::new().fallback(record).with_state(Arc::clone(&state));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    /// Base URL of the store, e.g. `http://127.0.0.1:54321`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Set the reply for media uploads.
    pub fn reply_to_media(&self, reply: MockReply) {
        *lock(&self.state.media_reply) = reply;
    }

    /// Set the reply for product creation.
    pub fn reply_to_products(&self, reply: MockReply) {
        *lock(&self.state.product_reply) = reply;
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Requests received for one path.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Configuration pointing at this store, with test credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is rejected.
    pub fn config(&self) -> Result<AppConfig, ConfigError> {
        let url = self.url();
        AppConfig::from_lookup(|key| {
            let value = match key {
                "WC_URL" => url.as_str(),
                "WC_CONSUMER_KEY" => CONSUMER_KEY,
                "WC_CONSUMER_SECRET" => CONSUMER_SECRET,
                "WP_USERNAME" => WP_USERNAME,
                "WP_APPLICATION_PASSWORD" => WP_APPLICATION_PASSWORD,
                _ => return None,
            };
            Some(value.to_string())
        })
    }

    /// A product service talking to this store.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or HTTP client cannot be built.
    pub fn service(&self) -> Result<ProductService, Box<dyn std::error::Error>> {
        Ok(ProductService::from_config(&self.config()?)?)
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let path = uri.path().to_string();
    let reply = match path.as_str() {
        MEDIA_PATH => Some(lock(&state.media_reply).clone()),
        PRODUCTS_PATH => Some(lock(&state.product_reply).clone()),
        _ => None,
    };

    lock(&state.requests).push(RecordedRequest {
        method,
        path,
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    match reply {
        Some(reply) => (
            StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            reply.body,
        ),
        None => (StatusCode::NOT_FOUND, r#"{"code":"rest_no_route"}"#.to_string()),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn url_pairs(query: &str) -> Vec<(String, String)> {
    reqwest::Url::parse(&format!("http://localhost/?{query}"))
        .map(|url| url.query_pairs().into_owned().collect())
        .unwrap_or_default()
}
