//! In-process mock of the customer/countries API.
//!
//! Hosts the full surface the suite exercises on an ephemeral port, on its
//! own thread with its own runtime, because the engine's client is
//! blocking and must not run inside an async context. Every JSON response
//! carries the `X-Powered-By: Express` and charset-qualified content-type
//! headers the contract expects.
//!
//! [`SharedStore`] doubles as the mock's persistence and as the
//! [`EntityStore`] the reconciliation scenarios read, so "API view vs
//! backing store" is a real cross-source check here too.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use covenant_contract::{CmpOp, ContractResult, EntityStore};
use covenant_suite::fixtures;
use covenant_suite::models::country::Country;

/// The mock's user store plus the set of issued tokens.
#[derive(Clone, Default)]
pub struct SharedStore {
    users: Arc<Mutex<HashMap<String, Value>>>,
    tokens: Arc<Mutex<HashSet<String>>>,
}

impl SharedStore {
    fn issue_token(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.lock().unwrap().insert(token.clone());
        token
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| self.tokens.lock().unwrap().contains(token))
    }
}

impl EntityStore for SharedStore {
    fn fetch(&self, entity_type: &str, id: &str) -> ContractResult<Option<Value>> {
        if entity_type != "user" {
            return Ok(None);
        }
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}

/// A running mock service.
pub struct MockService {
    /// Base URL of the service, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    /// The mock's backing store, shared with the handlers.
    pub store: SharedStore,
}

impl MockService {
    /// Boots the service on an ephemeral port and waits until it accepts.
    pub fn spawn() -> Self {
        let store = SharedStore::default();
        let app = router(store.clone());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        listener.set_nonblocking(true).expect("nonblocking listener");

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("service runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, app).await.expect("mock service");
            });
        });

        Self {
            base_url: format!("http://{}", addr),
            store,
        }
    }

    /// The GraphQL endpoint URL.
    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }
}

fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/v1/countries", get(list_countries))
        .route("/api/v1/countries/{code}", get(country_by_code))
        .route("/api/v3/countries", get(filtered_countries))
        .route("/api/v4/countries", get(paged_countries))
        .route("/api/v5/countries", get(keyed_countries))
        .route("/api/login", post(login))
        .route("/api/user", post(create_user))
        .route("/api/user/{id}", get(get_user).delete(delete_user))
        .route("/api/card", post(create_card))
        .route("/graphql", post(graphql))
        .with_state(store)
}

/// A JSON response with the Express-flavored headers the contract expects.
fn express_json(status: StatusCode, body: &Value) -> Response {
    Response::builder()
        .status(status)
        .header("X-Powered-By", "Express")
        .header("Content-Type", "application/json; charset=utf-8")
        .body(Body::from(body.to_string()))
        .expect("response")
}

fn unauthorized(message: &str) -> Response {
    express_json(StatusCode::UNAUTHORIZED, &json!({"message": message}))
}

fn now_micros() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

// =============================================================================
// Countries
// =============================================================================

async fn list_countries() -> Response {
    let data: Vec<Country> = fixtures::country_dataset()
        .iter()
        .map(Country::without_gdp)
        .collect();
    express_json(StatusCode::OK, &serde_json::to_value(data).expect("json"))
}

async fn country_by_code(Path(code): Path<String>) -> Response {
    match fixtures::country_dataset()
        .into_iter()
        .find(|c| c.code == code)
    {
        Some(country) => express_json(
            StatusCode::OK,
            &serde_json::to_value(country.without_gdp()).expect("json"),
        ),
        None => Response::builder()
            .status(StatusCode::NO_CONTENT)
            .header("X-Powered-By", "Express")
            .body(Body::empty())
            .expect("response"),
    }
}

async fn filtered_countries(Query(params): Query<HashMap<String, String>>) -> Response {
    let threshold: f64 = match params.get("gdp").and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            return express_json(
                StatusCode::BAD_REQUEST,
                &json!({"message": "gdp must be a number"}),
            );
        }
    };
    let op: CmpOp = match params.get("operator").and_then(|v| v.parse().ok()) {
        Some(op) => op,
        None => {
            return express_json(
                StatusCode::BAD_REQUEST,
                &json!({"message": "unknown operator"}),
            );
        }
    };

    let data: Vec<Country> = fixtures::country_dataset()
        .into_iter()
        .filter(|c| c.gdp.is_some_and(|gdp| op.holds(gdp, threshold)))
        .collect();
    express_json(StatusCode::OK, &serde_json::to_value(data).expect("json"))
}

async fn paged_countries(Query(params): Query<HashMap<String, String>>) -> Response {
    let page: usize = params
        .get("page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    let size: usize = params
        .get("size")
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    if page == 0 || size == 0 {
        return express_json(
            StatusCode::BAD_REQUEST,
            &json!({"message": "page and size must be positive"}),
        );
    }

    let dataset = fixtures::country_dataset();
    let data: Vec<Country> = dataset
        .iter()
        .skip((page - 1) * size)
        .take(size)
        .map(Country::without_gdp)
        .collect();
    express_json(
        StatusCode::OK,
        &json!({
            "page": page,
            "size": size,
            "total": dataset.len(),
            "data": data,
        }),
    )
}

async fn keyed_countries(headers: HeaderMap) -> Response {
    let keyed = headers
        .get(fixtures::API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == fixtures::API_KEY_VALUE);
    if !keyed {
        return unauthorized("Invalid api key");
    }
    list_countries().await
}

// =============================================================================
// Login
// =============================================================================

async fn login(State(store): State<SharedStore>, body: String) -> Response {
    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let valid = payload.get("username").and_then(Value::as_str) == Some("staff")
        && payload.get("password").and_then(Value::as_str) == Some("1234567890");
    if !valid {
        return unauthorized("Invalid credentials");
    }
    express_json(
        StatusCode::OK,
        &json!({"token": store.issue_token(), "timeout": fixtures::SESSION_TIMEOUT_MS}),
    )
}

// =============================================================================
// Users
// =============================================================================

async fn create_user(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if !store.authorized(&headers) {
        return unauthorized("Unauthorized");
    }
    let mut user: Value = match serde_json::from_str(&body) {
        Ok(Value::Object(map)) => Value::Object(map),
        _ => {
            return express_json(
                StatusCode::BAD_REQUEST,
                &json!({"message": "malformed user payload"}),
            );
        }
    };

    let id = Uuid::new_v4().to_string();
    let now = now_micros();
    user["id"] = json!(id);
    user["createdAt"] = json!(now);
    user["updatedAt"] = json!(now);
    if let Some(addresses) = user.get_mut("addresses").and_then(Value::as_array_mut) {
        for address in addresses {
            address["id"] = json!(Uuid::new_v4().to_string());
            address["customerId"] = json!(id);
            address["createdAt"] = json!(now);
            address["updatedAt"] = json!(now);
        }
    }

    store.users.lock().unwrap().insert(id.clone(), user);
    express_json(
        StatusCode::OK,
        &json!({"id": id, "message": "Customer created"}),
    )
}

async fn get_user(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !store.authorized(&headers) {
        return unauthorized("Unauthorized");
    }
    match store.users.lock().unwrap().get(&id) {
        Some(user) => express_json(StatusCode::OK, user),
        None => express_json(
            StatusCode::NOT_FOUND,
            &json!({"message": "Customer not found"}),
        ),
    }
}

async fn delete_user(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !store.authorized(&headers) {
        return unauthorized("Unauthorized");
    }
    match store.users.lock().unwrap().remove(&id) {
        Some(_) => express_json(StatusCode::OK, &json!({"message": "Customer deleted"})),
        None => express_json(
            StatusCode::NOT_FOUND,
            &json!({"message": "Customer not found"}),
        ),
    }
}

// =============================================================================
// Cards
// =============================================================================

async fn create_card(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if !store.authorized(&headers) {
        return unauthorized("Unauthorized");
    }
    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let customer_id = payload
        .get("customerId")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let users = store.users.lock().unwrap();
    let Some(user) = users.get(customer_id) else {
        return express_json(
            StatusCode::NOT_FOUND,
            &json!({"message": "Customer not found"}),
        );
    };
    let holder = format!(
        "{} {}",
        user["lastName"].as_str().unwrap_or_default(),
        user["firstName"].as_str().unwrap_or_default()
    );
    express_json(
        StatusCode::OK,
        &json!({
            "cardHolder": holder,
            "cardNumber": "1111 2222 3333 4444",
            "expiredDate": "01-23-2028",
        }),
    )
}

// =============================================================================
// GraphQL
// =============================================================================

async fn graphql(body: String) -> Response {
    let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let code = payload
        .pointer("/variables/code")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let country = fixtures::country_dataset()
        .into_iter()
        .find(|c| c.code == code)
        .map(|c| json!({"name": c.name, "code": c.code}))
        .unwrap_or(Value::Null);
    express_json(StatusCode::OK, &json!({"data": {"country": country}}))
}
