//! In-process mock of the JSONPlaceholder posts resource
//!
//! Serves `/posts` and `/posts/{id}` with the same contract as the public
//! service: 100 seeded posts, writes are faked and never persisted, unknown
//! ids answer 404 with `{}`. Used by the integration tests and the
//! `mock-posts` binary.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::{json, Map, Value};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::Post;
use crate::common::Result;

/// Number of seeded posts; ids `1..=SEEDED_POSTS` exist
pub const SEEDED_POSTS: u64 = 100;

/// Knobs for reproducing server variations the suite has to cope with
#[derive(Debug, Clone)]
pub struct MockBehavior {
    /// Body returned for unknown ids
    pub not_found_body: Value,
    /// Status returned by DELETE (JSONPlaceholder uses 200, many APIs 204)
    pub delete_status: StatusCode,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            not_found_body: json!({}),
            delete_status: StatusCode::OK,
        }
    }
}

/// A running mock server
pub struct MockPostsServer {
    addr: SocketAddr,
    shutdown: broadcast::Sender<()>,
    handle: JoinHandle<()>,
}

impl MockPostsServer {
    /// Start on an ephemeral localhost port
    pub async fn start_local(behavior: MockBehavior) -> Result<Self> {
        Self::start(SocketAddr::from(([127, 0, 0, 1], 0)), behavior).await
    }

    /// Bind `addr` and serve in a background task
    pub async fn start(addr: SocketAddr, behavior: MockBehavior) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let (shutdown, rx) = broadcast::channel(1);

        info!(%addr, "mock posts server listening");
        let handle = tokio::spawn(serve(listener, Arc::new(behavior), rx));

        Ok(Self {
            addr,
            shutdown,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections and wait for the accept loop to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        let _ = self.handle.await;
    }

    /// Serve until the accept loop ends (for the standalone binary)
    pub async fn wait(self) {
        let _ = self.handle.await;
    }

    /// Handle for stopping the server from another task
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown.clone()
    }
}

async fn serve(listener: TcpListener, behavior: Arc<MockBehavior>, mut shutdown: broadcast::Receiver<()>) {
    loop {
        let stream = tokio::select! {
            _ = shutdown.recv() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, _)) => stream,
                Err(e) => {
                    warn!(error = %e, "mock accept failed");
                    continue;
                }
            },
        };
        tokio::spawn(serve_connection(stream, Arc::clone(&behavior)));
    }
    debug!("mock posts server stopped");
}

/// One keep-alive HTTP/1 connection; every request sees the same behavior
async fn serve_connection(stream: TcpStream, behavior: Arc<MockBehavior>) {
    let service = service_fn(move |req| {
        let behavior = Arc::clone(&behavior);
        async move { Ok::<_, Infallible>(handle_request(req, &behavior).await) }
    });

    if let Err(e) = http1::Builder::new().serve_connection(TokioIo::new(stream), service).await {
        if !e.is_incomplete_message() {
            debug!(error = %e, "mock connection closed with error");
        }
    }
}

/// The seeded post for `id`, if it exists
pub fn seeded_post(id: u64) -> Option<Post> {
    if id == 0 || id > SEEDED_POSTS {
        return None;
    }

    Some(Post {
        user_id: (id - 1) / 10 + 1,
        id,
        title: format!("post {id} title"),
        body: format!("post {id} body"),
    })
}

async fn handle_request(req: Request<Incoming>, behavior: &MockBehavior) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().trim_end_matches('/').to_string();

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return json_response(StatusCode::BAD_REQUEST, &json!({ "error": e.to_string() }));
        }
    };

    debug!(%method, %path, bytes = body.len(), "mock request");
    route(&method, &path, &body, behavior)
}

fn route(method: &Method, path: &str, body: &[u8], behavior: &MockBehavior) -> Response<Full<Bytes>> {
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    match segments.as_slice() {
        ["posts"] => match *method {
            Method::GET => {
                let posts: Vec<Post> = (1..=SEEDED_POSTS).filter_map(seeded_post).collect();
                json_response(StatusCode::OK, &json!(posts))
            }
            Method::POST => match parse_object(body) {
                Ok(mut fields) => {
                    fields.insert("id".to_string(), json!(SEEDED_POSTS + 1));
                    json_response(StatusCode::CREATED, &Value::Object(fields))
                }
                Err(response) => response,
            },
            _ => method_not_allowed(),
        },
        ["posts", raw_id] => {
            let existing = raw_id.parse::<u64>().ok().and_then(seeded_post);
            item_route(method, existing, body, behavior)
        }
        _ => json_response(StatusCode::NOT_FOUND, &behavior.not_found_body),
    }
}

fn item_route(
    method: &Method,
    existing: Option<Post>,
    body: &[u8],
    behavior: &MockBehavior,
) -> Response<Full<Bytes>> {
    // DELETE is faked for any id, matching the public service.
    if *method == Method::DELETE {
        return if behavior.delete_status == StatusCode::NO_CONTENT {
            empty_response(StatusCode::NO_CONTENT)
        } else {
            json_response(behavior.delete_status, &json!({}))
        };
    }

    let Some(post) = existing else {
        return match *method {
            Method::GET | Method::PUT | Method::PATCH => {
                json_response(StatusCode::NOT_FOUND, &behavior.not_found_body)
            }
            _ => method_not_allowed(),
        };
    };

    match *method {
        Method::GET => json_response(StatusCode::OK, &json!(post)),
        Method::PUT => match parse_object(body) {
            Ok(mut fields) => {
                fields.insert("id".to_string(), json!(post.id));
                json_response(StatusCode::OK, &Value::Object(fields))
            }
            Err(response) => response,
        },
        Method::PATCH => match parse_object(body) {
            Ok(fields) => {
                let mut merged = match json!(post) {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                for (key, value) in fields {
                    merged.insert(key, value);
                }
                merged.insert("id".to_string(), json!(post.id));
                json_response(StatusCode::OK, &Value::Object(merged))
            }
            Err(response) => response,
        },
        _ => method_not_allowed(),
    }
}

fn parse_object(body: &[u8]) -> std::result::Result<Map<String, Value>, Response<Full<Bytes>>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(json_response(
            StatusCode::BAD_REQUEST,
            &json!({ "error": "request body must be a JSON object" }),
        )),
        Err(e) => Err(json_response(
            StatusCode::BAD_REQUEST,
            &json!({ "error": format!("invalid JSON: {e}") }),
        )),
    }
}

fn method_not_allowed() -> Response<Full<Bytes>> {
    json_response(StatusCode::METHOD_NOT_ALLOWED, &json!({}))
}

fn json_response(status: StatusCode, body: &Value) -> Response<Full<Bytes>> {
    let text = serde_json::to_string_pretty(body).unwrap_or_else(|_| "{}".to_string());
    let mut response = Response::new(Full::new(Bytes::from(text)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    response
}

fn empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_seeded_posts() {
        assert!(seeded_post(0).is_none());
        assert!(seeded_post(SEEDED_POSTS + 1).is_none());

        let post = seeded_post(10).unwrap();
        assert_eq!(post.user_id, 1);
        assert_eq!(seeded_post(11).unwrap().user_id, 2);
        assert_eq!(seeded_post(100).unwrap().user_id, 10);
    }

    #[tokio::test]
    async fn test_get_routes() {
        let behavior = MockBehavior::default();

        let found = route(&Method::GET, "/posts/5", b"", &behavior);
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(body_json(found).await["id"], 5);

        let missing = route(&Method::GET, "/posts/9999", b"", &behavior);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(missing).await, json!({}));

        let not_numeric = route(&Method::GET, "/posts/abc", b"", &behavior);
        assert_eq!(not_numeric.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_write_routes() {
        let behavior = MockBehavior::default();

        let created = route(&Method::POST, "/posts", br#"{"title":"t","body":"b","userId":3}"#, &behavior);
        assert_eq!(created.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(created).await,
            json!({"id": 101, "title": "t", "body": "b", "userId": 3})
        );

        let patched = route(&Method::PATCH, "/posts/2", br#"{"title":"new"}"#, &behavior);
        let patched = body_json(patched).await;
        assert_eq!(patched["title"], "new");
        assert_eq!(patched["body"], "post 2 body");
        assert_eq!(patched["userId"], 1);

        let bad = route(&Method::PUT, "/posts/1", b"[1,2]", &behavior);
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_variants() {
        let ok = route(&Method::DELETE, "/posts/1", b"", &MockBehavior::default());
        assert_eq!(ok.status(), StatusCode::OK);

        let behavior = MockBehavior {
            delete_status: StatusCode::NO_CONTENT,
            ..Default::default()
        };
        let no_content = route(&Method::DELETE, "/posts/1", b"", &behavior);
        assert_eq!(no_content.status(), StatusCode::NO_CONTENT);
        let bytes = no_content.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
