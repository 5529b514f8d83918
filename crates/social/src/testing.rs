//! In-process record-store double for tests.
//!
//! Speaks just enough of the store's REST dialect for the resolver and
//! linker: `field=eq.<value>` filters, `select` projections, and
//! representation-returning inserts, over named in-memory collections.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use wishlink_store_client::{StoreClient, StoreConfig};

#[derive(Default)]
struct Inner {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    failing: Mutex<HashSet<String>>,
    requests: AtomicUsize,
    next_id: AtomicI64,
}

pub struct MockStore {
    state: Arc<Inner>,
    base_url: String,
}

impl MockStore {
    pub async fn spawn() -> Self {
        let state = Arc::new(Inner::default());
        let app = Router::new()
            .route(
                "/rest/v1/{collection}",
                get(handle_query).post(handle_insert),
            )
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn client(&self) -> StoreClient {
        StoreClient::new(
            StoreConfig::new(&self.base_url, "test-key")
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap()
    }

    pub fn seed(&self, collection: &str, row: Value) {
        self.state
            .collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(row);
    }

    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.state
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Make every request against `collection` answer 502.
    pub fn fail_collection(&self, collection: &str) {
        self.state
            .failing
            .lock()
            .unwrap()
            .insert(collection.to_string());
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }
}

async fn handle_query(
    State(state): State<Arc<Inner>>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if state.failing.lock().unwrap().contains(&collection) {
        return StatusCode::BAD_GATEWAY.into_response();
    }

    let select = params.get("select").map(String::as_str).unwrap_or("*");
    let mut filters = Vec::new();
    for (field, value) in &params {
        if field == "select" {
            continue;
        }
        let Some(expected) = value.strip_prefix("eq.") else {
            return (StatusCode::BAD_REQUEST, "unsupported predicate").into_response();
        };
        filters.push((field.clone(), expected.to_string()));
    }

    let rows = state
        .collections
        .lock()
        .unwrap()
        .get(&collection)
        .cloned()
        .unwrap_or_default();

    let matched: Vec<Value> = rows
        .into_iter()
        .filter(|row| {
            filters.iter().all(|(field, expected)| {
                row.get(field)
                    .is_some_and(|v| value_matches(v, expected))
            })
        })
        .map(|row| project(&row, select))
        .collect();

    Json(Value::Array(matched)).into_response()
}

async fn handle_insert(
    State(state): State<Arc<Inner>>,
    Path(collection): Path<String>,
    Json(mut row): Json<Value>,
) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if state.failing.lock().unwrap().contains(&collection) {
        return StatusCode::BAD_GATEWAY.into_response();
    }

    if row.get("id").is_none() {
        let id = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        row["id"] = json!(id);
    }
    state
        .collections
        .lock()
        .unwrap()
        .entry(collection)
        .or_default()
        .push(row.clone());

    (StatusCode::CREATED, Json(json!([row]))).into_response()
}

fn value_matches(v: &Value, expected: &str) -> bool {
    match v {
        Value::String(s) => s == expected,
        Value::Bool(b) => b.to_string() == expected,
        Value::Number(n) => n.to_string() == expected,
        Value::Null => expected == "null",
        _ => false,
    }
}

fn project(row: &Value, select: &str) -> Value {
    if select == "*" {
        return row.clone();
    }
    let mut out = serde_json::Map::new();
    for field in select.split(',') {
        if let Some(v) = row.get(field) {
            out.insert(field.to_string(), v.clone());
        }
    }
    Value::Object(out)
}
