// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end tests for `HttpTransport`.
//!
//! These tests drive `CoOps<HttpTransport>` against an in-process HTTP server
//! that answers from a table of canned responses and records every request,
//! validating what actually goes over the wire.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::{BTreeMap, HashMap};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use tokio::sync::oneshot;

use coops::{
    AuthRequest, BearerAuth, ClientConfig, CoOps, ErrorKind, File, HttpTransport, Patch, Settings,
    TransportConfig, CONTENT_TYPE_JSON, PROTOCOL_VERSION,
};

/// A request as received by the test server.
#[derive(Debug, Clone)]
struct Seen {
    method: Method,
    key: String,
    headers: HeaderMap,
    body: String,
}

#[derive(Default)]
struct ServerState {
    responses: Mutex<HashMap<String, (u16, String)>>,
    seen: Mutex<Vec<Seen>>,
}

async fn handle(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let key = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    state.seen.lock().unwrap().push(Seen {
        method,
        key: key.clone(),
        headers,
        body,
    });
    match state.responses.lock().unwrap().get(&key) {
        Some((status, body)) => (StatusCode::from_u16(*status).unwrap(), body.clone()),
        None => (StatusCode::NOT_FOUND, format!("no route for {key}")),
    }
}

/// In-process server, shut down on drop.
struct TestServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TestServer {
    fn spawn() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let state = Arc::new(ServerState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("build runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind test server");
                addr_tx
                    .send(listener.local_addr().expect("local addr"))
                    .expect("report addr");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("serve");
            });
        });

        let addr = addr_rx.recv().expect("server address");
        TestServer {
            addr,
            state,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    fn respond(&self, key: &str, status: u16, body: &str) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert(key.to_string(), (status, body.to_string()));
    }

    fn seen(&self) -> Vec<Seen> {
        self.state.seen.lock().unwrap().clone()
    }

    fn last(&self) -> Seen {
        self.seen().pop().expect("at least one request")
    }

    fn config(&self, base_path: &str) -> ClientConfig {
        ClientConfig::new("http", "127.0.0.1", self.addr.port(), base_path)
    }

    fn client(&self, base_path: &str) -> CoOps<HttpTransport> {
        CoOps::new(self.config(base_path)).expect("client")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

const FILE_BODY: &str = r#"{"id":"1234","name":"Name","modified":"2010-02-02T04:05:06.078Z","revisionNumber":6,"content":"bbb","contentType":"text/html;editor=CKEditor","role":"OWNER"}"#;

fn header<'a>(seen: &'a Seen, name: &str) -> Option<&'a str> {
    seen.headers.get(name).and_then(|v| v.to_str().ok())
}

#[test]
fn join_over_http() {
    let server = TestServer::spawn();
    let key = format!("/files/1/join?protocolVersion={PROTOCOL_VERSION}&algorithm=dummy&algorithm=bogus");
    server.respond(
        &key,
        200,
        r#"{"extensions":["dummy","bogus"],"fileId":"00001111","revisionNumber":12,"content":"abc","contentType":"text/plain"}"#,
    );

    let client = server.client("/files/1");
    let join = client.join_file(&["dummy", "bogus"], None).unwrap().unwrap();
    assert_eq!(join.file_id, "00001111");
    assert_eq!(join.extensions, vec!["dummy", "bogus"]);
    assert_eq!(join.revision_number, 12);

    let seen = server.last();
    assert_eq!(seen.method, Method::GET);
    assert_eq!(seen.key, key);
    assert_eq!(header(&seen, "content-type"), None);
    assert!(seen.body.is_empty());
}

#[test]
fn get_revision_over_http() {
    let server = TestServer::spawn();
    server.respond("/files/1?revisionNumber=6", 200, FILE_BODY);

    let file = server
        .client("/files/1")
        .get_file_revision(Some(6), None)
        .unwrap()
        .unwrap();
    assert_eq!(file.revision_number, Some(6));
    assert_eq!(server.last().key, "/files/1?revisionNumber=6");
}

#[test]
fn save_sends_json_put() {
    let server = TestServer::spawn();
    server.respond("/files/1", 200, "");

    let file = File::new("asd", "abcd", "text/plain").with_revision_number(66);
    server.client("/files/1").save_file(&file, None).unwrap();

    let seen = server.last();
    assert_eq!(seen.method, Method::PUT);
    assert_eq!(header(&seen, "content-type"), Some(CONTENT_TYPE_JSON));
    let sent: File = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(sent, file);
}

#[test]
fn patch_sends_json_patch() {
    let server = TestServer::spawn();
    server.respond("/files/1", 200, "");

    let patch = Patch::new(666, "dummy", "change").with_property("meta", "value");
    server.client("/files/1").patch_file(&patch, None).unwrap();

    let seen = server.last();
    assert_eq!(seen.method, Method::PATCH);
    assert_eq!(header(&seen, "content-type"), Some(CONTENT_TYPE_JSON));
    let sent: Patch = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(sent, patch);
}

#[test]
fn auth_headers_reach_server() {
    let server = TestServer::spawn();
    server.respond("/", 200, FILE_BODY);

    let client = server.client("");
    client.get_file(Some(&BearerAuth::new("s3cret"))).unwrap();
    assert_eq!(header(&server.last(), "authorization"), Some("Bearer s3cret"));

    client.get_file(None).unwrap();
    assert_eq!(header(&server.last(), "authorization"), None);
}

fn content_type_auth(_request: &AuthRequest<'_>) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "text/plain".to_string()),
        ("X-Signature".to_string(), "abc".to_string()),
    ])
}

fn bad_header_auth(_request: &AuthRequest<'_>) -> BTreeMap<String, String> {
    BTreeMap::from([("Bad Header".to_string(), "x".to_string())])
}

#[test]
fn caller_content_type_replaces_auth_content_type() {
    let server = TestServer::spawn();
    server.respond("/files/1", 200, "");

    let file = File::new("asd", "abcd", "text/plain");
    server
        .client("/files/1")
        .save_file(&file, Some(&content_type_auth))
        .unwrap();

    let seen = server.last();
    let content_types: Vec<_> = seen
        .headers
        .get_all("content-type")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(content_types, vec![CONTENT_TYPE_JSON]);
    assert_eq!(header(&seen, "x-signature"), Some("abc"));
}

#[test]
fn invalid_auth_header_is_transport_error() {
    let server = TestServer::spawn();
    server.respond("/", 200, FILE_BODY);

    let err = server
        .client("")
        .get_file(Some(&bad_header_auth))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(server.seen().is_empty());
}

#[test]
fn no_content_is_absent() {
    let server = TestServer::spawn();
    server.respond("/", 204, "");
    assert_eq!(server.client("").get_file(None).unwrap(), None);
}

#[test]
fn status_codes_map_to_error_kinds() {
    let server = TestServer::spawn();
    let client = server.client("");
    let cases = [
        ("/?revisionNumber=1", 401, ErrorKind::Unauthorized),
        ("/?revisionNumber=2", 403, ErrorKind::Forbidden),
        ("/?revisionNumber=3", 409, ErrorKind::Server),
        ("/?revisionNumber=4", 500, ErrorKind::Server),
        ("/?revisionNumber=5", 201, ErrorKind::Server),
    ];
    for (key, status, _) in &cases {
        server.respond(key, *status, "Message!");
    }

    for (revision, (_, status, kind)) in (1u64..).zip(cases) {
        let err = client.get_file_revision(Some(revision), None).unwrap_err();
        assert_eq!(err.kind(), kind, "status {status}");
        assert_eq!(err.message(), Some("Message!"));
    }
}

#[test]
fn connection_refused_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = CoOps::new(ClientConfig::new("http", "127.0.0.1", port, "")).unwrap();
    let err = client.get_file(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.is_retryable());
}

#[test]
fn transport_config_user_agent() {
    let server = TestServer::spawn();
    server.respond("/f", 200, FILE_BODY);

    let settings = Settings {
        server: server.config("/f"),
        transport: TransportConfig {
            timeout_secs: Some(10),
            connect_timeout_secs: Some(2),
            user_agent: Some("editor-test/1.0".to_string()),
        },
    };
    CoOps::from_settings(settings).unwrap().get_file(None).unwrap();
    assert_eq!(header(&server.last(), "user-agent"), Some("editor-test/1.0"));
}

#[test]
fn default_user_agent() {
    let server = TestServer::spawn();
    server.respond("/", 200, FILE_BODY);
    server.client("").get_file(None).unwrap();
    let seen = server.last();
    assert!(header(&seen, "user-agent").unwrap().starts_with("coops/"));
}

#[test]
fn concurrent_requests_share_one_client() {
    let server = TestServer::spawn();
    server.respond("/", 200, FILE_BODY);
    let client = Arc::new(server.client(""));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            std::thread::spawn(move || client.get_file(None).unwrap().unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().id.as_deref(), Some("1234"));
    }
    assert_eq!(server.seen().len(), 4);
}
