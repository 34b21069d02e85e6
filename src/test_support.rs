//! Fakes shared by the unit tests: a stub file server and a recording
//! subsetter.

use std::{
    collections::HashMap,
    io,
    net::TcpListener,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::{bail, Result};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use futures::stream;

use crate::subsetter::{BoundingBox, SubsetRequest, SubsetSettings, Subsetter};

pub const STUB_DIRECTORY: &str = "/history/MO/";

/// Served with a 200 whose body breaks off after the first chunk.
pub const BROKEN_FILE: &str = "broken.nc";

#[derive(Clone)]
struct StubState {
    files: Arc<HashMap<String, String>>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// Serves the given files under [`STUB_DIRECTORY`], cuts [`BROKEN_FILE`]
/// short and 404s everything else.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(files: &[(&str, &str)]) -> Self {
        let files: HashMap<String, String> = files
            .iter()
            .map(|(name, body)| (format!("{STUB_DIRECTORY}{name}"), body.to_string()))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            files: Arc::new(files),
            requests: Arc::clone(&requests),
        };

        let app = Router::new().fallback(serve_file).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        StubServer {
            base_url: format!("http://{addr}{STUB_DIRECTORY}"),
            requests,
        }
    }

    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn serve_file(State(state): State<StubState>, uri: Uri) -> Response {
    state.requests.lock().unwrap().push(uri.path().to_string());

    if uri.path() == format!("{STUB_DIRECTORY}{BROKEN_FILE}") {
        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection dropped")),
        ]);
        return (StatusCode::OK, Body::from_stream(chunks)).into_response();
    }

    match state.files.get(uri.path()) {
        Some(body) => (StatusCode::OK, body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

/// Base URL on a local port nothing is listening on.
pub fn unbound_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}{STUB_DIRECTORY}")
}

/// Records every request it is given, optionally failing on one call.
#[derive(Default)]
pub struct RecordingSubsetter {
    calls: Mutex<Vec<(SubsetSettings, BoundingBox)>>,
    fail_on_call: Option<usize>,
}

impl RecordingSubsetter {
    /// Fails the `call`th request (counting from 1).
    pub fn failing_on(call: usize) -> Self {
        RecordingSubsetter {
            fail_on_call: Some(call),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(SubsetSettings, BoundingBox)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn bounds(&self) -> Vec<BoundingBox> {
        self.calls().into_iter().map(|(_, bounds)| bounds).collect()
    }
}

impl Subsetter for RecordingSubsetter {
    async fn subset(&self, request: &SubsetRequest<'_>) -> Result<()> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((request.settings.clone(), request.bounds));

        if self.fail_on_call == Some(calls.len()) {
            bail!("service unavailable");
        }

        Ok(())
    }
}

pub fn settings_fixture() -> SubsetSettings {
    SubsetSettings {
        dataset_id: "cmems_mod_bal_phy_my_P1D-m".to_string(),
        dataset_version: "202303".to_string(),
        variables: vec!["so".to_string(), "thetao".to_string()],
        start_datetime: "2021-01-01T00:00:00".to_string(),
        end_datetime: "2022-12-31T12:30:00+01:00".to_string(),
        minimum_depth: 0.51,
        maximum_depth: 30.0,
        coordinates_selection_method: "strict-inside".to_string(),
        disable_progress_bar: false,
        credentials_file: PathBuf::from("/home/user/.copernicusmarine/creds"),
    }
}
