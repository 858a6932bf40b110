#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Request, State};
use http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use firm_admin::config::{AppConfig, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Requisição recebida pelo backend de teste.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub accept_language: Option<String>,
}

type Responder = dyn Fn(&Method, &str) -> (StatusCode, String) + Send + Sync;

#[derive(Clone)]
struct StubState {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    respond: Arc<Responder>,
}

/// Backend HTTP de verdade (porta efêmera) com respostas programadas.
pub struct StubBackend {
    pub url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StubBackend {
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&Method, &str) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            seen: seen.clone(),
            respond: Arc::new(respond),
        };
        let router = Router::new().fallback(stub_handler).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub backend");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn stub_handler(State(state): State<StubState>, req: Request) -> impl IntoResponse {
    let seen = SeenRequest {
        method: req.method().clone(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        accept_language: req
            .headers()
            .get("accept-language")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    let (status, body) = (state.respond)(&seen.method, &seen.path);
    state.seen.lock().unwrap().push(seen);

    (status, [("content-type", "application/json")], body)
}

/// Configuração apontando para uma porta onde nada escuta.
pub fn offline_config() -> AppConfig {
    AppConfig {
        backend_url: "http://127.0.0.1:1".to_string(),
        request_timeout: Some(Duration::from_secs(2)),
        ..AppConfig::default()
    }
}

pub fn config_for(backend_url: &str) -> AppConfig {
    AppConfig {
        backend_url: backend_url.to_string(),
        request_timeout: Some(Duration::from_secs(5)),
        ..AppConfig::default()
    }
}

pub async fn app_with(config: AppConfig) -> Router {
    let state = AppState::new(config)
        .await
        .expect("failed to build app state");
    firm_admin::app(state)
}

/// App sem backend: tudo cai no modo local.
pub async fn test_app() -> Router {
    app_with(offline_config()).await
}

/// Envia uma requisição e devolve status + corpo (JSON, ou string se não for JSON).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    lang: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = http::Request::builder().method(method).uri(uri);
    if let Some(lang) = lang {
        builder = builder.header("accept-language", lang);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}
