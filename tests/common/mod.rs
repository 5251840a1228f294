#![allow(dead_code)]

//! Test support: an in-process mock of the Curseforge API and a fake
//! process environment pointing at it.

use anyhow::Result;
use assert_fs::TempDir;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::PathBuf;

use mcmm::utils::Env;

pub const API_KEY: &str = "test-key";

#[derive(Clone)]
struct MockState {
    base: String,
}

/// Starts the mock on an ephemeral port and returns its base URL.
pub async fn spawn_mock_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let base = format!("http://{}", listener.local_addr().expect("local addr"));

    let app = Router::new()
        .route("/v1/mods/search", get(search_mods))
        .route("/v1/mods/{mod_id}", get(get_mod))
        .route("/v1/mods/{mod_id}/files", get(get_mod_files))
        .route("/v1/mods/{mod_id}/files/{file_id}", get(get_mod_file))
        .route(
            "/v1/mods/{mod_id}/files/{file_id}/download-url",
            get(get_download_url),
        )
        .route("/files/{a}/{b}/{name}", get(cdn_file))
        .with_state(MockState { base: base.clone() });

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    base
}

/// Bytes the mock CDN serves for `name`.
pub fn jar_bytes(name: &str) -> String {
    format!("jar bytes of {}", name)
}

fn fixture(state: &MockState, name: &str) -> Option<Value> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content.replace("{{base}}", &state.base)).ok()
}

fn sneaky_mod(state: &MockState) -> Value {
    json!({
        "data": {
            "id": 666,
            "gameId": 432,
            "name": "Sneaky",
            "mainFileId": 1,
            "latestFiles": [{
                "id": 1,
                "modId": 666,
                "fileName": "../sneaky.jar",
                "releaseType": 1,
                "downloadUrl": format!("{}/files/0/1/sneaky.jar", state.base),
                "gameVersions": ["1.20.1"]
            }],
            "latestFilesIndexes": []
        }
    })
}

fn unauthorized(headers: &HeaderMap) -> Option<Response> {
    match headers.get("x-api-key") {
        Some(key) if key == API_KEY => None,
        _ => Some(StatusCode::FORBIDDEN.into_response()),
    }
}

async fn search_mods(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    if params.get("gameId").map(String::as_str) != Some("432")
        || params.get("classId").map(String::as_str) != Some("6")
    {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let filter = params
        .get("searchFilter")
        .map(|f| f.to_lowercase())
        .unwrap_or_default();
    let version = params.get("gameVersion");

    let hits: Vec<Value> = ["mod_1030830.json", "mod_238222.json"]
        .iter()
        .filter_map(|name| fixture(&state, name))
        .map(|response| response["data"].clone())
        .filter(|m| {
            let name = m["name"].as_str().unwrap_or_default().to_lowercase();
            let slug = m["slug"].as_str().unwrap_or_default();
            name.contains(&filter) || slug.contains(&filter)
        })
        .filter(|m| match version {
            None => true,
            Some(version) => m["latestFilesIndexes"]
                .as_array()
                .into_iter()
                .flatten()
                .any(|index| index["gameVersion"] == json!(version)),
        })
        .collect();

    let count = hits.len();
    Json(json!({
        "data": hits,
        "pagination": {
            "index": 0,
            "pageSize": 50,
            "resultCount": count,
            "totalCount": count
        }
    }))
    .into_response()
}

async fn get_mod(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(mod_id): Path<u32>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    if mod_id == 666 {
        return Json(sneaky_mod(&state)).into_response();
    }
    match fixture(&state, &format!("mod_{}.json", mod_id)) {
        Some(body) => Json(body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_mod_files(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(mod_id): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let Some(mut body) = fixture(&state, &format!("mod_{}_files.json", mod_id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if let Some(version) = params.get("gameVersion") {
        if let Some(files) = body["data"].as_array_mut() {
            files.retain(|file| {
                file["gameVersions"]
                    .as_array()
                    .into_iter()
                    .flatten()
                    .any(|v| v == &json!(version))
            });
        }
    }
    Json(body).into_response()
}

async fn get_mod_file(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path((mod_id, file_id)): Path<(u32, u32)>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    match fixture(&state, &format!("mod_{}_file_{}.json", mod_id, file_id)) {
        Some(body) => Json(body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_download_url(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path((mod_id, file_id)): Path<(u32, u32)>,
) -> Response {
    if let Some(denied) = unauthorized(&headers) {
        return denied;
    }
    let url = match (mod_id, file_id) {
        (238222, 5101366) => Some(format!(
            "{}/files/5101/366/jei-1.20.1-forge-15.3.0.4.jar",
            state.base
        )),
        (238222, 4712866) => Some(format!(
            "{}/files/4712/866/jei-1.19.2-forge-11.6.0.1019.jar",
            state.base
        )),
        _ => None,
    };
    Json(json!({ "data": url })).into_response()
}

async fn cdn_file(headers: HeaderMap, Path((_a, _b, name)): Path<(String, String, String)>) -> Response {
    // The file host must never see the API key.
    if headers.contains_key("x-api-key") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    jar_bytes(&name).into_response()
}

/// Environment that only knows about the mock server and a temporary
/// working directory.
pub struct TestEnv {
    pub tempdir: TempDir,
    vars: HashMap<String, String>,
}

impl TestEnv {
    pub fn new(base_url: &str) -> Result<Self> {
        let tempdir = TempDir::new()?;
        let mut vars = HashMap::new();
        vars.insert("CURSEFORGE_API_KEY".to_string(), API_KEY.to_string());
        vars.insert("CURSEFORGE_API_URL".to_string(), format!("{}/v1", base_url));
        Ok(Self { tempdir, vars })
    }

    pub fn without_api_key(mut self) -> Self {
        self.vars.remove("CURSEFORGE_API_KEY");
        self
    }

    pub fn set_var(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}

impl Env for TestEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.tempdir.path().to_path_buf())
    }

    fn config_dir(&self) -> Option<PathBuf> {
        None
    }
}
