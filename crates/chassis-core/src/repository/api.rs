//! REST API Client
//!
//! Thin `reqwest` wrapper over the records backend. Every authenticated call
//! reads the bearer token from the session first and fails with
//! `Unauthenticated` before any I/O when there is none. Every response goes
//! through the same status check.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};

use super::endpoints::{ChildCollection, DocumentKind};
use super::session_store::SessionManager;
use super::traits::RecordSource;
use crate::config::ClientConfig;
use crate::domain::paths::pdf_report_path;
use crate::domain::validation::RegisterRequest;
use crate::domain::{ClientError, ClientResult, LoginResponse, PageQuery, Record, Session, LOGIN_FAILED};

const AUTHENTICATE: &str = "users/authenticate";
const REGISTER: &str = "users/register";
const REGISTER_FAILED: &str = "Something went wrong";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: SessionManager,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: SessionManager) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// `POST users/authenticate`; stores the session on success
    pub async fn authenticate(&self, username: &str, password: &str) -> ClientResult<Session> {
        let url = self.config.api_url(AUTHENTICATE);
        log::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let body = LoginResponse::parse(&response.text().await?);
        if !status.is_success() {
            let message = body.message.unwrap_or_else(|| LOGIN_FAILED.to_string());
            log::warn!("Login rejected for {} (HTTP {}): {}", username, status.as_u16(), message);
            return Err(ClientError::Rejected(message));
        }

        match (body.token, body.message) {
            (Some(token), _) => {
                let session = Session::new(token, body.user);
                self.session.save(&session)?;
                log::info!("Logged in as {}", username);
                Ok(session)
            }
            (None, Some(message)) => {
                log::warn!("Login for {} answered without a token: {}", username, message);
                Err(ClientError::Rejected(message))
            }
            (None, None) => {
                log::error!("Login for {} answered HTTP {} without a token", username, status.as_u16());
                Err(ClientError::Decode("login response has no token".to_string()))
            }
        }
    }

    /// `POST users/register`. A refusal carries the server message.
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        let url = self.config.api_url(REGISTER);
        log::debug!("POST {}", url);
        let response = self.http.post(&url).json(request).send().await?;
        if response.status().is_success() {
            log::info!("Registered user {}", request.username);
            return Ok(());
        }
        let message = error_message(response)
            .await
            .unwrap_or_else(|| REGISTER_FAILED.to_string());
        log::warn!("Registration rejected for {}: {}", request.username, message);
        Err(ClientError::Rejected(message))
    }

    /// Forget the stored session. Later authenticated calls fail locally.
    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()?;
        log::info!("Logged out");
        Ok(())
    }

    /// Authenticated `GET`, decoded as JSON
    pub async fn get_json(&self, path: &str, params: &[(String, String)]) -> ClientResult<Value> {
        let token = self.session.require_token()?;
        let url = self.config.api_url(path);
        log::debug!("GET {} {:?}", url, params);
        let response = self
            .http
            .get(&url)
            .query(params)
            .bearer_auth(token)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Authenticated `POST` with a JSON body
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Value> {
        let token = self.session.require_token()?;
        let url = self.config.api_url(path);
        log::debug!("POST {}", url);
        let response = self.http.post(&url).json(body).bearer_auth(token).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn get_records(&self, path: &str, params: &[(String, String)]) -> ClientResult<Vec<Record>> {
        let value = self.get_json(path, params).await?;
        records_from(value)
    }

    /// Rows of a per-chassis collection, minus those without the key field
    pub async fn children(&self, collection: ChildCollection, stock_id: &str) -> ClientResult<Vec<Record>> {
        let records = self.get_records(&collection.path_for(stock_id), &[]).await?;
        Ok(records.into_iter().filter(|r| r.has(collection.key_field)).collect())
    }

    /// Ask the backend to render a report. `Ok(None)` means it answered
    /// without a `pdf_path`.
    pub async fn generate_document(&self, kind: DocumentKind, id: &str) -> ClientResult<Option<String>> {
        let mut body = serde_json::Map::new();
        body.insert(kind.id_field().to_string(), Value::String(id.to_string()));
        let value = self.post_json(kind.endpoint(), &body).await?;
        Ok(value
            .get("pdf_path")
            .and_then(Value::as_str)
            .filter(|p| !p.trim().is_empty())
            .map(pdf_report_path))
    }
}

#[async_trait(?Send)]
impl RecordSource for ApiClient {
    async fn fetch(&self, query: &PageQuery) -> ClientResult<Vec<Record>> {
        self.get_records(&query.endpoint, &query.pairs()).await
    }
}

async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = error_message(response).await;
    log::warn!("Request failed with HTTP {}: {:?}", status.as_u16(), message);
    Err(ClientError::Status { status: status.as_u16(), message })
}

/// `message` field of an error body, if there is one
async fn error_message(response: reqwest::Response) -> Option<String> {
    let text = response.text().await.ok()?;
    let value: Value = serde_json::from_str(&text).ok()?;
    value.get("message").and_then(Value::as_str).map(str::to_string)
}

/// Listing bodies are arrays; a lone object counts as one row
fn records_from(value: Value) -> ClientResult<Vec<Record>> {
    match value {
        Value::Array(values) => Ok(Record::from_values(values)),
        Value::Object(map) => Ok(vec![Record::from(map)]),
        Value::Null => Ok(Vec::new()),
        other => Err(ClientError::Decode(format!("expected an array of records, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{rejection_field_errors, FormField, Title, USERNAME_EXISTS};
    use crate::domain::AuthUser;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn client() -> ApiClient {
        // Port 9 (discard) is never reached by these tests
        let config = ClientConfig::default().with_api_base_url("http://127.0.0.1:9");
        ApiClient::new(config, SessionManager::in_memory())
    }

    #[tokio::test]
    async fn test_fetch_without_session_is_unauthenticated() {
        let api = client();
        let result = api.fetch(&PageQuery::page("plans", 1, 100)).await;
        assert_eq!(result, Err(ClientError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_logout_blocks_authenticated_calls() {
        let api = client();
        let user = AuthUser { id: "1".into(), username: "khwong".into() };
        api.session().save(&Session::new("tok", Some(user))).unwrap();
        assert!(api.session().is_authenticated());

        api.logout().unwrap();
        assert!(!api.session().is_authenticated());
        let result = api.children(super::super::FILES, "HS1234").await;
        assert_eq!(result, Err(ClientError::Unauthenticated));
        let result = api.generate_document(DocumentKind::SalesOrder, "SO-1").await;
        assert_eq!(result, Err(ClientError::Unauthenticated));
    }

    /// One-shot HTTP/1.1 server on a free local port. Answers the first
    /// request with the given response and hands back the raw request.
    async fn serve_once(status: &'static str, content_type: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                content_type,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });
        (base, handle)
    }

    fn client_at(base: &str) -> ApiClient {
        let config = ClientConfig::default().with_api_base_url(base);
        ApiClient::new(config, SessionManager::in_memory())
    }

    fn signed_in_at(base: &str) -> ApiClient {
        let api = client_at(base);
        api.session().save(&Session::new("tok", None)).unwrap();
        api
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer_and_query() {
        let (base, server) = serve_once(
            "200 OK",
            "application/json",
            r#"[{"plan_id": "P-001", "wheelbase": "4200"}, {"plan_id": "P-002"}]"#,
        )
        .await;
        let api = signed_in_at(&base);
        let query = PageQuery::page("plans", 1, 100).with_params(vec![("search".into(), "4200".into())]);

        let rows = api.fetch(&query).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].display("plan_id"), "P-001");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /plans?page=1&size=100&search=4200 HTTP/1.1\r\n"), "{}", request);
        assert!(request.to_lowercase().contains("authorization: bearer tok\r\n"));
    }

    #[tokio::test]
    async fn test_client_error_carries_server_message() {
        let (base, server) = serve_once("404 Not Found", "application/json", r#"{"message": "Plan not found"}"#).await;
        let api = signed_in_at(&base);

        let result = api.get_records("plans/P-404", &[]).await;
        assert_eq!(
            result,
            Err(ClientError::Status { status: 404, message: Some("Plan not found".to_string()) })
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_server_error_with_plain_body() {
        let (base, server) = serve_once("500 Internal Server Error", "text/plain", "upstream exploded").await;
        let api = signed_in_at(&base);

        let result = api.fetch(&PageQuery::page("weightcerts", 1, 100)).await;
        assert_eq!(result, Err(ClientError::Status { status: 500, message: None }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_authenticate_keeps_token_with_null_user_id() {
        let (base, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"token": "abc", "user": {"id": null, "username": "khwong"}}"#,
        )
        .await;
        let api = client_at(&base);

        let session = api.authenticate("khwong", "secret").await.unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.username(), Some("khwong"));
        assert_eq!(api.session().token().unwrap().as_deref(), Some("abc"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /users/authenticate HTTP/1.1\r\n"));
        assert!(request.contains(r#""username":"khwong""#));
    }

    #[tokio::test]
    async fn test_authenticate_rejection_uses_server_message() {
        let (base, server) = serve_once(
            "400 Bad Request",
            "application/json",
            r#"{"message": "Username or password is incorrect"}"#,
        )
        .await;
        let api = client_at(&base);

        let result = api.authenticate("khwong", "wrong").await;
        assert_eq!(result, Err(ClientError::Rejected("Username or password is incorrect".to_string())));
        assert!(!api.session().is_authenticated());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_authenticate_rejection_without_json() {
        let (base, server) = serve_once("502 Bad Gateway", "text/html", "<html>Bad Gateway</html>").await;
        let api = client_at(&base);

        let result = api.authenticate("khwong", "secret").await;
        assert_eq!(result, Err(ClientError::Rejected(LOGIN_FAILED.to_string())));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (base, server) = serve_once(
            "400 Bad Request",
            "application/json",
            r#"{"message": "Username \"meilin\" is already taken"}"#,
        )
        .await;
        let api = client_at(&base);
        let request = RegisterRequest {
            title: Title::Female,
            first_name: "Mei".into(),
            last_name: "Lin".into(),
            email: "mei@hongseng.com.my".into(),
            username: "meilin".into(),
            password: "secret1".into(),
            role: "User".into(),
        };

        let message = match api.register(&request).await {
            Err(ClientError::Rejected(message)) => message,
            other => panic!("expected a rejection, got {:?}", other),
        };
        assert_eq!(message, "Username \"meilin\" is already taken");
        assert_eq!(rejection_field_errors(&message).get(FormField::Username), Some(USERNAME_EXISTS));

        let sent = server.await.unwrap();
        assert!(sent.starts_with("POST /users/register HTTP/1.1\r\n"));
        assert!(sent.contains(r#""firstName":"Mei""#));
    }

    #[test]
    fn test_records_from_shapes() {
        let rows = records_from(json!([{"so_id": "SO-1"}, {"so_id": "SO-2"}])).unwrap();
        assert_eq!(rows.len(), 2);
        let single = records_from(json!({"so_id": "SO-1"})).unwrap();
        assert_eq!(single[0].display("so_id"), "SO-1");
        assert!(records_from(Value::Null).unwrap().is_empty());
        assert!(matches!(records_from(json!("oops")), Err(ClientError::Decode(_))));
    }
}
