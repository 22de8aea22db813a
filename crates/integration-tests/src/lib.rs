//! Integration test harness for Product Desk.
//!
//! Everything runs in-process on ephemeral ports:
//!
//! - [`FakeShopify`] stands in for the Admin GraphQL endpoint, keeps a small
//!   product catalog and records every request it receives
//! - [`TestApp`] serves the real admin router pointed at the fake
//! - [`ActionClient`] posts action forms with a freshly minted session token
//! - [`PageClient`] presses the page's buttons the way htmx does, posting
//!   page events and reading back the rendered [`PageHtml`]
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p product-desk-integration-tests
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{Json, Router, extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, routing::post};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use sha2::Sha256;

use product_desk_admin::config::{
    AdminConfig, DEFAULT_API_VERSION, LogFormat, ShopifyAdminConfig, ShopifyAppConfig,
};
use product_desk_admin::shopify::AdminClient;
use product_desk_admin::state::AppState;
use product_desk_core::action::{ActionRequest, ActionResponse};

pub const TEST_STORE: &str = "desk-test.myshopify.com";
pub const TEST_API_KEY: &str = "desk-test-api-key";
pub const TEST_API_SECRET: &str = "hush-7Qm2xV9kLp4Rz8Tn";
pub const TEST_ACCESS_TOKEN: &str = "shpat_integration_4kq9";

// =============================================================================
// Fake Admin API
// =============================================================================

/// One request received by the fake.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation_name: String,
    pub variables: Value,
    pub access_token: Option<String>,
}

#[derive(Debug, Default)]
struct FakeState {
    products: Vec<Value>,
    requests: Vec<RecordedRequest>,
    update_user_errors: Vec<Value>,
    variant_user_errors: Vec<Value>,
    delete_user_errors: Vec<Value>,
    top_level_errors: Vec<Value>,
    http_status: Option<u16>,
}

/// In-process stand-in for the Shopify Admin GraphQL endpoint.
#[derive(Clone)]
pub struct FakeShopify {
    addr: SocketAddr,
    state: Arc<Mutex<FakeState>>,
}

/// Raw product node as the Admin API returns it. `amount` is the scaled
/// amount (`"1999"` for 19.99).
#[must_use]
pub fn raw_product(n: u32, title: &str, amount: &str, variant_count: u32) -> Value {
    let variants: Vec<Value> = (1..=variant_count)
        .map(|v| {
            json!({"node": {
                "id": format!("gid://shopify/ProductVariant/{n}{v:02}"),
                "inventoryQuantity": i64::from(v) * 5 - 7
            }})
        })
        .collect();

    json!({
        "id": format!("gid://shopify/Product/{n}"),
        "title": title,
        "priceRange": {"minVariantPrice": {"amount": amount, "currencyCode": "USD"}},
        "status": "ACTIVE",
        "vendor": "Desk Goods",
        "images": {"edges": []},
        "variants": {"edges": variants}
    })
}

impl FakeShopify {
    /// Start the fake with an initial catalog.
    pub async fn start(products: Vec<Value>) -> Self {
        let state = Arc::new(Mutex::new(FakeState {
            products,
            ..FakeState::default()
        }));

        let router = Router::new()
            .route("/admin/api/{version}/graphql.json", post(graphql))
            .with_state(Arc::clone(&state));

        let addr = serve(router).await;
        Self { addr, state }
    }

    /// Endpoint the admin client should post to.
    #[must_use]
    pub fn graphql_url(&self) -> String {
        format!(
            "http://{}/admin/api/{DEFAULT_API_VERSION}/graphql.json",
            self.addr
        )
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake state poisoned")
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests for one operation.
    #[must_use]
    pub fn requests_for(&self, operation_name: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.operation_name == operation_name)
            .collect()
    }

    #[must_use]
    pub fn product_count(&self) -> usize {
        self.lock().products.len()
    }

    /// Reply to `productUpdate` with these userErrors.
    pub fn set_update_user_errors(&self, errors: Vec<Value>) {
        self.lock().update_user_errors = errors;
    }

    /// Reply to `productVariantUpdate` with these userErrors.
    pub fn set_variant_user_errors(&self, errors: Vec<Value>) {
        self.lock().variant_user_errors = errors;
    }

    /// Reply to `productDelete` with these userErrors.
    pub fn set_delete_user_errors(&self, errors: Vec<Value>) {
        self.lock().delete_user_errors = errors;
    }

    /// Reply to every operation with `data: null` and these errors.
    pub fn set_top_level_errors(&self, errors: Vec<Value>) {
        self.lock().top_level_errors = errors;
    }

    /// Reply to every operation with this HTTP status.
    pub fn fail_with_status(&self, status: Option<u16>) {
        self.lock().http_status = status;
    }
}

async fn graphql(
    State(state): State<Arc<Mutex<FakeState>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let operation_name = body["operationName"].as_str().unwrap_or_default().to_string();
    let variables = body["variables"].clone();

    let mut state = state.lock().expect("fake state poisoned");
    state.requests.push(RecordedRequest {
        operation_name: operation_name.clone(),
        variables: variables.clone(),
        access_token: headers
            .get("X-Shopify-Access-Token")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    });

    if let Some(status) = state.http_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, Json(json!({"errors": "unavailable"})));
    }

    if !state.top_level_errors.is_empty() {
        return (
            StatusCode::OK,
            Json(json!({"data": null, "errors": state.top_level_errors})),
        );
    }

    let reply = match operation_name.as_str() {
        "ProductsOverview" => list_products(&state, &variables),
        "ProductTitleAndPriceUpdate" => update_product(&mut state, &variables),
        "ProductDelete" => delete_product(&mut state, &variables),
        other => json!({"errors": [{"message": format!("unknown operation {other}")}]}),
    };

    (StatusCode::OK, Json(reply))
}

fn list_products(state: &FakeState, variables: &Value) -> Value {
    let first = usize::try_from(variables["first"].as_u64().unwrap_or(0)).unwrap_or(usize::MAX);
    let needle = variables["query"].as_str().map(title_needle);

    let edges: Vec<Value> = state
        .products
        .iter()
        .filter(|p| {
            needle.as_ref().is_none_or(|n| {
                p["title"]
                    .as_str()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(n)
            })
        })
        .take(first)
        .map(|p| json!({"node": p}))
        .collect();

    json!({"data": {"products": {"edges": edges}}})
}

/// `title:*linen\ shirt*` becomes `linen shirt`.
fn title_needle(query: &str) -> String {
    let inner = query
        .strip_prefix("title:*")
        .and_then(|q| q.strip_suffix('*'))
        .unwrap_or(query);

    let mut out = String::new();
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out.to_lowercase()
}

fn update_product(state: &mut FakeState, variables: &Value) -> Value {
    let product_id = variables["product"]["id"].as_str().unwrap_or_default();
    let title = variables["product"]["title"].as_str().unwrap_or_default();
    let variant_id = variables["variant"]["id"].as_str().unwrap_or_default();
    let price = variables["variant"]["price"].as_str().unwrap_or_default();

    let update_errors = state.update_user_errors.clone();
    let variant_errors = state.variant_user_errors.clone();

    let product = if update_errors.is_empty() {
        state
            .products
            .iter_mut()
            .find(|p| p["id"] == product_id)
            .map(|p| {
                p["title"] = json!(title);
                if variant_errors.is_empty() {
                    p["priceRange"]["minVariantPrice"]["amount"] = json!(price.replace('.', ""));
                }
                json!({"id": product_id, "title": title})
            })
    } else {
        None
    };

    let variant = variant_errors
        .is_empty()
        .then(|| json!({"id": variant_id, "price": price}));

    json!({"data": {
        "productUpdate": {"product": product, "userErrors": update_errors},
        "productVariantUpdate": {"productVariant": variant, "userErrors": variant_errors}
    }})
}

fn delete_product(state: &mut FakeState, variables: &Value) -> Value {
    let id = variables["input"]["id"].as_str().unwrap_or_default().to_string();

    if !state.delete_user_errors.is_empty() {
        return json!({"data": {"productDelete": {
            "deletedProductId": null,
            "userErrors": state.delete_user_errors
        }}});
    }

    let before = state.products.len();
    state.products.retain(|p| p["id"] != id.as_str());
    if state.products.len() == before {
        return json!({"data": {"productDelete": {
            "deletedProductId": null,
            "userErrors": [{"field": ["id"], "message": "Product does not exist"}]
        }}});
    }

    json!({"data": {"productDelete": {"deletedProductId": id, "userErrors": []}}})
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server error");
    });
    addr
}

// =============================================================================
// Spawned app
// =============================================================================

/// Config pointing at the test store with the test app credentials.
#[must_use]
pub fn test_config() -> AdminConfig {
    AdminConfig {
        host: "127.0.0.1".parse().expect("valid ip"),
        port: 0,
        shopify: ShopifyAdminConfig {
            store: TEST_STORE.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: SecretString::from(TEST_ACCESS_TOKEN),
        },
        app: ShopifyAppConfig {
            api_key: TEST_API_KEY.to_string(),
            api_secret: SecretString::from(TEST_API_SECRET),
        },
        log_format: LogFormat::Text,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// The admin app served on an ephemeral port against a [`FakeShopify`].
pub struct TestApp {
    pub base_url: String,
    pub fake: FakeShopify,
    pub config: AdminConfig,
}

impl TestApp {
    /// Start a fake with `products` and the app in front of it.
    pub async fn spawn(products: Vec<Value>) -> Self {
        let fake = FakeShopify::start(products).await;
        let config = test_config();
        let client = AdminClient::with_endpoint(&config.shopify, fake.graphql_url());
        let router = product_desk_admin::app(AppState::with_client(config.clone(), client));
        let addr = serve(router).await;

        Self {
            base_url: format!("http://{addr}"),
            fake,
            config,
        }
    }

    /// Action client carrying a valid session token.
    #[must_use]
    pub fn client(&self) -> ActionClient {
        ActionClient::new(&self.base_url, mint_session_token(&self.config, 60))
    }

    /// Page client for the default session.
    #[must_use]
    pub fn page(&self) -> PageClient {
        self.page_as("integration-session")
    }

    /// Page client whose token carries session id `sid`.
    #[must_use]
    pub fn page_as(&self, sid: &str) -> PageClient {
        PageClient::new(
            &self.base_url,
            mint_session_token_for(&self.config, sid, 60),
        )
    }
}

// =============================================================================
// Session tokens
// =============================================================================

/// Claims of a valid session token for `config`, expiring `ttl_secs` from now.
#[must_use]
pub fn session_claims(config: &AdminConfig, ttl_secs: i64) -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "iss": format!("https://{}/admin", config.shopify.store),
        "dest": format!("https://{}", config.shopify.store),
        "aud": config.app.api_key,
        "sub": "1001",
        "exp": now + ttl_secs,
        "nbf": now - 10,
        "iat": now - 10,
        "jti": "integration",
        "sid": "integration-session"
    })
}

/// Sign `claims` as an HS256 JWT with `secret`.
#[must_use]
pub fn sign_claims(claims: &Value, secret: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("any key length");
    mac.update(format!("{header}.{payload}").as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{header}.{payload}.{signature}")
}

/// Mint a valid session token for `config`.
#[must_use]
pub fn mint_session_token(config: &AdminConfig, ttl_secs: i64) -> String {
    sign_claims(
        &session_claims(config, ttl_secs),
        config.app.api_secret.expose_secret(),
    )
}

/// Mint a valid session token for `config` with session id `sid`.
#[must_use]
pub fn mint_session_token_for(config: &AdminConfig, sid: &str, ttl_secs: i64) -> String {
    let mut claims = session_claims(config, ttl_secs);
    claims["sid"] = json!(sid);
    sign_claims(&claims, config.app.api_secret.expose_secret())
}

// =============================================================================
// Action client
// =============================================================================

/// Posts action forms to the app.
#[derive(Clone)]
pub struct ActionClient {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl ActionClient {
    #[must_use]
    pub fn new(base_url: &str, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{base_url}/"),
            token,
        }
    }

    /// Post raw form pairs; returns status and JSON body.
    pub async fn post_form(&self, pairs: &[(&str, &str)]) -> (reqwest::StatusCode, Value) {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .form(pairs)
            .send()
            .await
            .expect("Action request failed");
        let status = response.status();
        let body = response.json().await.expect("Action response is not JSON");
        (status, body)
    }

    /// Post a typed request.
    pub async fn submit(&self, request: &ActionRequest) -> (reqwest::StatusCode, ActionResponse) {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .form(&request.to_form())
            .send()
            .await
            .expect("Action request failed");
        let status = response.status();
        let body = response
            .json()
            .await
            .expect("Action response is not an ActionResponse");
        (status, body)
    }
}

// =============================================================================
// Page client
// =============================================================================

/// Drives the rendered product page over HTTP.
///
/// Each call posts the fields one button's form would send and returns the
/// partial htmx would swap in.
#[derive(Clone)]
pub struct PageClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl PageClient {
    #[must_use]
    pub fn new(base_url: &str, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
            token,
        }
    }

    /// Load the full page.
    pub async fn load(&self) -> PageHtml {
        let response = self
            .http
            .get(format!("{}/", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await
            .expect("Page request failed");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        PageHtml(response.text().await.expect("Page body is not text"))
    }

    /// Post raw page event fields; returns status and body.
    pub async fn post_event(&self, pairs: &[(&str, &str)]) -> (reqwest::StatusCode, String) {
        let response = self
            .http
            .post(format!("{}/page", self.base_url))
            .bearer_auth(&self.token)
            .form(pairs)
            .send()
            .await
            .expect("Page event request failed");
        let status = response.status();
        let body = response.text().await.expect("Page event body is not text");
        (status, body)
    }

    /// Press the button named `event`, sending `fields` from its form.
    pub async fn press(&self, event: &str, fields: &[(&str, &str)]) -> PageHtml {
        let mut pairs = vec![("event", event)];
        pairs.extend_from_slice(fields);
        let (status, body) = self.post_event(&pairs).await;
        assert_eq!(status, reqwest::StatusCode::OK, "event {event}: {body}");
        PageHtml(body)
    }

    /// "Display Products".
    pub async fn display_products(&self) -> PageHtml {
        self.press("fetch", &[]).await
    }

    /// Type `term` in the search box and press "Search".
    pub async fn search(&self, term: &str) -> PageHtml {
        self.press("search", &[("search_term", term)]).await
    }

    /// Press a product card button (`open_update` or `open_delete`).
    pub async fn press_on(&self, event: &str, product_id: &str) -> PageHtml {
        self.press(event, &[("product_id", product_id)]).await
    }

    /// Fill the update modal and press "Save".
    pub async fn save_update(&self, title: &str, price: &str) -> PageHtml {
        self.press("save_update", &[("title", title), ("price", price)])
            .await
    }
}

/// One rendered page or page partial.
#[derive(Debug, Clone)]
pub struct PageHtml(pub String);

/// A toast the page asked the browser to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: String,
    pub duration_ms: Option<u64>,
    pub message: String,
}

impl PageHtml {
    /// Toasts in display order.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.0
            .split("<p data-toast ")
            .skip(1)
            .filter_map(|chunk| {
                let (attrs, rest) = chunk.split_once('>')?;
                let (message, _) = rest.split_once("</p>")?;
                Some(Toast {
                    level: attr(attrs, "data-level")?,
                    duration_ms: attr(attrs, "data-duration").and_then(|d| d.parse().ok()),
                    message: unescape(message),
                })
            })
            .collect()
    }

    /// Toast messages in display order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.toasts().into_iter().map(|t| t.message).collect()
    }

    /// Product ids of the listed cards.
    #[must_use]
    pub fn product_ids(&self) -> Vec<String> {
        self.0
            .split("data-product-id=\"")
            .skip(1)
            .filter_map(|chunk| chunk.split_once('"').map(|(id, _)| unescape(id)))
            .collect()
    }

    /// Titles of the listed cards.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.texts("<strong data-title>", "</strong>")
    }

    /// Displayed prices of the listed cards.
    #[must_use]
    pub fn prices(&self) -> Vec<String> {
        self.texts("<div data-price>", "</div>")
    }

    #[must_use]
    pub fn has_update_modal(&self) -> bool {
        self.0.contains("id=\"update-modal\"")
    }

    #[must_use]
    pub fn has_delete_modal(&self) -> bool {
        self.0.contains("id=\"delete-modal\"")
    }

    /// Current value of the input named `name`.
    #[must_use]
    pub fn input_value(&self, name: &str) -> Option<String> {
        let (_, after) = self.0.split_once(&format!("name=\"{name}\""))?;
        let (tag, _) = after.split_once('>')?;
        attr(tag, "value")
    }

    fn texts(&self, open: &str, close: &str) -> Vec<String> {
        self.0
            .split(open)
            .skip(1)
            .filter_map(|chunk| chunk.split_once(close).map(|(text, _)| unescape(text)))
            .collect()
    }
}

fn attr(tag: &str, name: &str) -> Option<String> {
    let (_, after) = tag.split_once(&format!("{name}=\""))?;
    after.split_once('"').map(|(value, _)| unescape(value))
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#34;", "\"")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
