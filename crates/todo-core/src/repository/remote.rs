//! Remote Task Repository
//!
//! Hosted relational table exposed through a PostgREST-style HTTP API.
//! Table columns: `id`, `todo`, `completed`, `created_at`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Deserializer, Serialize};

use super::traits::TaskRepository;
use crate::domain::{require_text, DomainError, DomainResult, Task, TaskFields, TaskId, TaskPatch};

pub const DEFAULT_TABLE: &str = "todos";

/// Endpoint and credentials for the hosted backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
}

impl BackendConfig {
    pub fn new(url: &str, api_key: &str) -> DomainResult<Self> {
        let url = url.trim().trim_end_matches('/');
        let api_key = api_key.trim();
        if url.is_empty() {
            return Err(DomainError::InvalidInput("backend url is empty".into()));
        }
        if api_key.is_empty() {
            return Err(DomainError::InvalidInput("backend key is empty".into()));
        }
        Ok(Self {
            url: url.to_string(),
            api_key: api_key.to_string(),
            table: DEFAULT_TABLE.to_string(),
        })
    }

    pub fn with_table(mut self, table: &str) -> Self {
        let table = table.trim();
        if !table.is_empty() {
            self.table = table.to_string();
        }
        self
    }

    /// Collection endpoint for the task table
    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }
}

/// Row as stored by the backend
#[derive(Debug, Deserialize)]
struct TodoRow {
    id: TaskId,
    todo: String,
    #[serde(default)]
    completed: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

impl From<TodoRow> for Task {
    fn from(row: TodoRow) -> Self {
        Task {
            id: row.id,
            text: row.todo,
            completed: row.completed,
            created_at: row.created_at,
        }
    }
}

/// Columns returned by an update
#[derive(Debug, Deserialize)]
struct FieldsRow {
    todo: String,
    #[serde(default)]
    completed: bool,
}

#[derive(Serialize)]
struct NewRow<'a> {
    todo: &'a str,
    completed: bool,
}

#[derive(Serialize)]
struct RowPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    todo: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

impl<'a> From<&'a TaskPatch> for RowPatch<'a> {
    fn from(patch: &'a TaskPatch) -> Self {
        Self {
            todo: patch.text.as_deref(),
            completed: patch.completed,
        }
    }
}

/// Accepts RFC 3339 timestamps and zone-less ones (read as UTC).
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_timestamp(&s)))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map an error response to `DomainError::Backend`, preferring the JSON
/// `message` field over the raw body.
fn backend_error(status: u16, body: &str) -> DomainError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.trim().to_string());
    let message = if message.is_empty() {
        format!("request failed with status {}", status)
    } else {
        message
    };
    DomainError::Backend { status, message }
}

fn id_filter(id: &TaskId) -> String {
    format!("eq.{}", id)
}

pub struct RemoteTaskRepository {
    client: Client,
    config: BackendConfig,
}

impl RemoteTaskRepository {
    pub fn new(config: BackendConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: BackendConfig) -> Self {
        Self { client, config }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> DomainResult<Response> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(backend_error(status.as_u16(), &body))
        }
    }
}

#[async_trait(?Send)]
impl TaskRepository for RemoteTaskRepository {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn add(&self, text: &str) -> DomainResult<Task> {
        let text = require_text(text)?;
        log::debug!("[REMOTE] Inserting task");
        let request = self
            .client
            .post(self.config.table_url())
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .json(&[NewRow { todo: &text, completed: false }]);
        let rows: Vec<TodoRow> = self.send(request).await?.json().await?;
        rows.into_iter()
            .next()
            .map(Task::from)
            .ok_or_else(|| DomainError::Backend {
                status: 200,
                message: "insert returned no rows".into(),
            })
    }

    async fn list(&self) -> DomainResult<Vec<Task>> {
        log::debug!("[REMOTE] Fetching tasks");
        let request = self
            .client
            .get(self.config.table_url())
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let rows: Vec<TodoRow> = self.send(request).await?.json().await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> DomainResult<TaskFields> {
        patch.validate()?;
        log::debug!("[REMOTE] Updating task {}", id);
        let request = self
            .client
            .patch(self.config.table_url())
            .query(&[("id", id_filter(id).as_str()), ("select", "todo,completed")])
            .header("Prefer", "return=representation")
            .json(&RowPatch::from(patch));
        let rows: Vec<FieldsRow> = self.send(request).await?.json().await?;
        rows.into_iter()
            .next()
            .map(|row| TaskFields {
                text: row.todo,
                completed: row.completed,
            })
            .ok_or_else(|| DomainError::not_found(id))
    }

    async fn delete(&self, id: &TaskId) -> DomainResult<()> {
        log::debug!("[REMOTE] Deleting task {}", id);
        let request = self
            .client
            .delete(self.config.table_url())
            .query(&[("id", id_filter(id).as_str())]);
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_config_trims_and_validates() {
        let config = BackendConfig::new(" https://abc.example.co/ ", "key").unwrap();
        assert_eq!(config.url, "https://abc.example.co");
        assert_eq!(config.table_url(), "https://abc.example.co/rest/v1/todos");

        let config = config.with_table("tasks");
        assert_eq!(config.table_url(), "https://abc.example.co/rest/v1/tasks");

        assert!(BackendConfig::new("", "key").is_err());
        assert!(BackendConfig::new("https://x", "  ").is_err());
    }

    #[test]
    fn test_row_maps_todo_column_to_text() {
        let rows: Vec<TodoRow> = serde_json::from_str(
            r#"[{"id": 7, "todo": "buy milk", "completed": true,
                 "created_at": "2024-05-01T12:30:00.123456+00:00"}]"#,
        )
        .unwrap();
        let task = Task::from(rows.into_iter().next().unwrap());

        assert_eq!(task.id, TaskId::new("7"));
        assert_eq!(task.text, "buy milk");
        assert!(task.completed);
        assert_eq!(
            task.created_at.map(|t| t.date_naive()),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap().date_naive())
        );
    }

    #[test]
    fn test_timestamp_without_zone_is_utc() {
        let parsed = parse_timestamp("2024-05-01T12:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_patch_body_uses_column_names() {
        let patch = TaskPatch::text("new text");
        let body = serde_json::to_value(RowPatch::from(&patch)).unwrap();
        assert_eq!(body, serde_json::json!({ "todo": "new text" }));

        let patch = TaskPatch::completed(true);
        let body = serde_json::to_value(RowPatch::from(&patch)).unwrap();
        assert_eq!(body, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn test_backend_error_prefers_json_message() {
        let err = backend_error(401, r#"{"message":"Invalid API key","hint":null}"#);
        assert_eq!(
            err,
            DomainError::Backend { status: 401, message: "Invalid API key".into() }
        );

        let err = backend_error(502, "Bad Gateway\n");
        assert_eq!(err, DomainError::Backend { status: 502, message: "Bad Gateway".into() });

        let err = backend_error(500, "");
        assert_eq!(
            err,
            DomainError::Backend { status: 500, message: "request failed with status 500".into() }
        );
    }

    #[test]
    fn test_id_filter() {
        assert_eq!(id_filter(&TaskId::new("abc")), "eq.abc");
    }

    mod http {
        use super::*;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::{TcpListener, TcpStream};
        use tokio::task::JoinHandle;

        /// Accept a single request, answer it, and hand back the raw request.
        async fn serve_once(
            status: &'static str,
            body: &'static str,
        ) -> (String, JoinHandle<String>) {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let handle = tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();
                let request = read_request(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
                request
            });
            (format!("http://{}", addr), handle)
        }

        async fn read_request(socket: &mut TcpStream) -> String {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            String::from_utf8_lossy(&buf).into_owned()
        }

        fn setup_repo(url: &str) -> RemoteTaskRepository {
            let client = Client::builder().no_proxy().build().unwrap();
            RemoteTaskRepository::with_client(client, BackendConfig::new(url, "anon").unwrap())
        }

        fn body_of(request: &str) -> &str {
            request.split("\r\n\r\n").nth(1).unwrap_or_default()
        }

        #[tokio::test]
        async fn test_add_posts_row_and_returns_representation() {
            let (url, server) = serve_once(
                "201 Created",
                r#"[{"id":7,"todo":"buy milk","completed":false,"created_at":"2024-05-01T12:30:00+00:00"}]"#,
            )
            .await;
            let repo = setup_repo(&url);

            let task = repo.add("  buy milk ").await.expect("Failed to add");
            let request = server.await.unwrap();
            let lower = request.to_lowercase();

            assert!(request.starts_with("POST /rest/v1/todos?select=* HTTP/1.1"));
            assert!(lower.contains("prefer: return=representation"));
            assert!(lower.contains("apikey: anon"));
            assert!(lower.contains("authorization: bearer anon"));
            assert_eq!(body_of(&request), r#"[{"todo":"buy milk","completed":false}]"#);

            assert_eq!(task.id, TaskId::new("7"));
            assert_eq!(task.text, "buy milk");
            assert!(task.created_at.is_some());
        }

        #[tokio::test]
        async fn test_add_with_no_rows_is_an_error() {
            let (url, server) = serve_once("201 Created", "[]").await;
            let err = setup_repo(&url).add("x").await.unwrap_err();
            server.await.unwrap();
            assert!(matches!(err, DomainError::Backend { status: 200, .. }));
        }

        #[tokio::test]
        async fn test_list_orders_newest_first() {
            let (url, server) = serve_once(
                "200 OK",
                r#"[{"id":2,"todo":"b","completed":true},{"id":1,"todo":"a","completed":false}]"#,
            )
            .await;
            let tasks = setup_repo(&url).list().await.expect("Failed to list");
            let request = server.await.unwrap();

            assert!(request
                .starts_with("GET /rest/v1/todos?select=*&order=created_at.desc HTTP/1.1"));
            assert_eq!(tasks.len(), 2);
            assert_eq!(tasks[0].id, TaskId::new("2"));
            assert!(tasks[0].completed);
            assert_eq!(tasks[1].text, "a");
        }

        #[tokio::test]
        async fn test_update_sends_patch_and_returns_fields() {
            let (url, server) =
                serve_once("200 OK", r#"[{"todo":"buy milk","completed":true}]"#).await;
            let fields = setup_repo(&url)
                .update(&TaskId::new("7"), &TaskPatch::completed(true))
                .await
                .expect("Failed to update");
            let request = server.await.unwrap();

            assert!(request.starts_with(
                "PATCH /rest/v1/todos?id=eq.7&select=todo%2Ccompleted HTTP/1.1"
            ));
            assert!(request.to_lowercase().contains("prefer: return=representation"));
            assert_eq!(body_of(&request), r#"{"completed":true}"#);
            assert_eq!(fields, TaskFields { text: "buy milk".into(), completed: true });
        }

        #[tokio::test]
        async fn test_update_matching_no_rows_is_not_found() {
            let (url, server) = serve_once("200 OK", "[]").await;
            let err = setup_repo(&url)
                .update(&TaskId::new("7"), &TaskPatch::text("renamed"))
                .await
                .unwrap_err();
            let request = server.await.unwrap();

            assert_eq!(body_of(&request), r#"{"todo":"renamed"}"#);
            assert!(matches!(err, DomainError::NotFound(_)));
        }

        #[tokio::test]
        async fn test_delete_by_id() {
            let (url, server) = serve_once("204 No Content", "").await;
            setup_repo(&url)
                .delete(&TaskId::new("7"))
                .await
                .expect("Failed to delete");
            let request = server.await.unwrap();

            assert!(request.starts_with("DELETE /rest/v1/todos?id=eq.7 HTTP/1.1"));
        }

        #[tokio::test]
        async fn test_error_status_maps_to_backend_error() {
            let (url, server) =
                serve_once("401 Unauthorized", r#"{"message":"Invalid API key"}"#).await;
            let err = setup_repo(&url).list().await.unwrap_err();
            server.await.unwrap();

            assert_eq!(
                err,
                DomainError::Backend { status: 401, message: "Invalid API key".into() }
            );
        }

        #[tokio::test]
        async fn test_refused_connection_is_transport_error() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let url = format!("http://{}", listener.local_addr().unwrap());
            drop(listener);

            let err = setup_repo(&url).list().await.unwrap_err();
            assert!(matches!(err, DomainError::Transport(_)));
        }

        #[tokio::test]
        async fn test_blank_text_rejected_before_request() {
            // Nothing listens here; a request would surface as a transport error.
            let repo = setup_repo("http://127.0.0.1:9");

            let err = repo.add(" ").await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));

            let err = repo.update(&TaskId::new("7"), &TaskPatch::text("")).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));

            let err = repo.update(&TaskId::new("7"), &TaskPatch::default()).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));
        }
    }
}
