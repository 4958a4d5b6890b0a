//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each CRUD operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`.

use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ListQuery, MessageBody, NewTodo, Todo, UpdateTodo, UpdatedTodo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn member(&self, id: i64) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    pub fn build_list_todos(&self, query: &ListQuery) -> HttpRequest {
        let mut params = Vec::new();
        if let Some(page) = query.page {
            params.push(format!("page={page}"));
        }
        if let Some(title) = query.title.as_deref().filter(|t| !t.is_empty()) {
            params.push(format!("title={}", urlencoding::encode(title)));
        }
        let mut path = self.collection();
        if !params.is_empty() {
            path.push('?');
            path.push_str(&params.join("&"));
        }
        HttpRequest::bodyless(HttpMethod::Get, path)
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Get, self.member(id))
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ClientError> {
        HttpRequest::json(HttpMethod::Post, self.collection(), input)
    }

    pub fn build_update_todo(&self, id: i64, input: &UpdateTodo) -> Result<HttpRequest, ClientError> {
        HttpRequest::json(HttpMethod::Put, self.member(id), input)
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::bodyless(HttpMethod::Delete, self.member(id))
    }

    /// An empty page comes back from the server as 404; it is returned here
    /// as an empty list rather than an error.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ClientError> {
        match check_status(&response, 200) {
            Ok(()) => decode(&response.body),
            Err(ClientError::NotFound(_)) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ClientError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<UpdatedTodo, ClientError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    /// Returns the server's confirmation message.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<String, ClientError> {
        check_status(&response, 200)?;
        let body: MessageBody = decode(&response.body)?;
        Ok(body.message)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ClientError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ClientError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ClientError::NotFound(response.error_message())),
        400 => Err(ClientError::BadRequest(response.error_message())),
        status => Err(ClientError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, body)
    }

    #[test]
    fn build_list_todos_without_query() {
        let req = client().build_list_todos(&ListQuery::default());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_todos_encodes_page_and_title() {
        let req = client().build_list_todos(&ListQuery::page(2).with_title("buy milk & eggs"));
        assert_eq!(
            req.path,
            "http://localhost:3000/todos?page=2&title=buy%20milk%20%26%20eggs"
        );
    }

    #[test]
    fn build_list_todos_skips_empty_title() {
        let req = client().build_list_todos(&ListQuery::default().with_title(""));
        assert_eq!(req.path, "http://localhost:3000/todos");
    }

    #[test]
    fn build_get_todo_produces_correct_request() {
        let req = client().build_get_todo(17);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos/17");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_produces_correct_request() {
        let input = NewTodo {
            title: "Buy milk".to_string(),
            description: "2% milk from store".to_string(),
        };
        let req = client().build_create_todo(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["description"], "2% milk from store");
    }

    #[test]
    fn build_update_todo_omits_absent_fields() {
        let input = UpdateTodo {
            title: None,
            description: Some("updated".to_string()),
        };
        let req = client().build_update_todo(1, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/todos/1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"description": "updated"}));
    }

    #[test]
    fn build_delete_todo_produces_correct_request() {
        let req = client().build_delete_todo(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todos/3");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_success() {
        let todos = client()
            .parse_list_todos(response(
                200,
                r#"[{"id":1,"title":"Test","description":"a test todo"}]"#,
            ))
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Test");
    }

    #[test]
    fn parse_list_todos_empty_page_is_empty_list() {
        let todos = client()
            .parse_list_todos(response(404, r#"{"error":"No todos found"}"#))
            .unwrap();
        assert!(todos.is_empty());
    }

    #[test]
    fn parse_list_todos_bad_page() {
        let err = client()
            .parse_list_todos(response(400, r#"{"error":"invalid digit found in string"}"#))
            .unwrap_err();
        assert!(matches!(err, ClientError::BadRequest(msg) if msg == "invalid digit found in string"));
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ClientError::Deserialization(_)));
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client()
            .parse_get_todo(response(404, r#"{"error":"todo 9 not found"}"#))
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound(msg) if msg == "todo 9 not found"));
    }

    #[test]
    fn parse_create_todo_success() {
        let todo = client()
            .parse_create_todo(response(
                201,
                r#"{"id":1,"title":"New","description":"brand new"}"#,
            ))
            .unwrap();
        assert_eq!(todo.id, 1);
        assert_eq!(todo.title, "New");
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(response(500, r#"{"error":"internal server error"}"#))
            .unwrap_err();
        assert!(matches!(err, ClientError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_update_todo_reads_echo() {
        let echoed = client()
            .parse_update_todo(response(200, r#"{"id":1,"description":"updated"}"#))
            .unwrap();
        assert_eq!(echoed.id, 1);
        assert!(echoed.title.is_none());
        assert_eq!(echoed.description.as_deref(), Some("updated"));
    }

    #[test]
    fn parse_delete_todo_returns_message() {
        let message = client()
            .parse_delete_todo(response(200, r#"{"message":"Todo deleted successfully"}"#))
            .unwrap();
        assert_eq!(message, "Todo deleted successfully");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        let err = client()
            .parse_get_todo(response(400, "plain text"))
            .unwrap_err();
        assert!(matches!(err, ClientError::BadRequest(msg) if msg == "plain text"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        let req = client.build_get_todo(1);
        assert_eq!(req.path, "http://localhost:3000/todos/1");
    }
}
