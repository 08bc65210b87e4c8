//! In-memory HTTP server for exercising widgetkit clients.
//!
//! Two surfaces:
//! - `/echo[/...]` answers any method with a JSON description of the request
//!   it received, so tests can see exactly what a client put on the wire.
//! - `/scripts/{name}` hosts script sources and counts downloads, so tests
//!   can tell whether a loader went back to the network.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// What `/echo` saw.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub id: Uuid,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    /// Parsed JSON body, the raw text if it was not JSON, `null` if empty.
    pub body: Value,
}

#[derive(Clone, Debug, Default)]
pub struct HostedScript {
    pub source: String,
    pub hits: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hits {
    pub hits: u64,
}

pub type Db = Arc<RwLock<HashMap<String, HostedScript>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/scripts/{name}", get(get_script).put(put_script))
        .route("/scripts/{name}/hits", get(script_hits))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    let echo = Echo {
        id: Uuid::new_v4(),
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    };
    tracing::debug!(id = %echo.id, method = %echo.method, path = %echo.path, "echo");
    Json(echo)
}

async fn get_script(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> Result<String, StatusCode> {
    let mut scripts = db.write().await;
    let script = scripts.get_mut(&name).ok_or(StatusCode::NOT_FOUND)?;
    script.hits += 1;
    tracing::info!(%name, hits = script.hits, "served script");
    Ok(script.source.clone())
}

async fn put_script(
    State(db): State<Db>,
    Path(name): Path<String>,
    source: String,
) -> StatusCode {
    db.write().await.entry(name).or_default().source = source;
    StatusCode::NO_CONTENT
}

async fn script_hits(State(db): State<Db>, Path(name): Path<String>) -> Json<Hits> {
    let hits = db.read().await.get(&name).map_or(0, |s| s.hits);
    Json(Hits { hits })
}
