//! API route definitions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use issues::{CommandExecutor, ErrorKind, Issue, IssueError, IssueFilter, IssueStore, NewIssue};

use crate::body::{DeleteIssueBody, IssueBody, UpdateIssueBody};

/// How logical errors map onto HTTP status codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseMode {
    /// Every logical error is sent with `200 OK`; only the payload differs.
    #[default]
    Compatible,
    /// Validation errors use `400`, missing issues use `404`.
    Strict,
}

/// Shared application state
pub struct AppState<S> {
    pub executor: Arc<CommandExecutor<S>>,
    pub mode: ResponseMode,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            mode: self.mode,
        }
    }
}

/// Create API routes
pub fn create_routes<S: IssueStore + 'static>(
    executor: Arc<CommandExecutor<S>>,
    mode: ResponseMode,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/issues/:project",
            get(list_issues::<S>)
                .post(create_issue::<S>)
                .put(update_issue::<S>)
                .delete(delete_issue::<S>),
        )
        .with_state(AppState { executor, mode })
}

/// Successful update or delete.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionResponse {
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl ActionResponse {
    fn new(result: &str, id: String) -> Self {
        Self {
            result: result.to_string(),
            id,
        }
    }
}

/// Payload carried by every logical error.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// An [`IssueError`] on its way out of a handler.
#[derive(Debug)]
pub struct ApiError {
    error: IssueError,
    mode: ResponseMode,
}

impl ApiError {
    fn new(error: IssueError, mode: ResponseMode) -> Self {
        Self { error, mode }
    }

    fn status(&self) -> StatusCode {
        match (self.mode, self.error.kind()) {
            (ResponseMode::Compatible, _) => StatusCode::OK,
            (ResponseMode::Strict, ErrorKind::Validation) => StatusCode::BAD_REQUEST,
            (ResponseMode::Strict, ErrorKind::NotFound) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.error.to_string(),
            id: self.error.id().map(str::to_string),
        };
        (status, Json(body)).into_response()
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "issues-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// List a project's issues, narrowed by query parameter filters
async fn list_issues<S: IssueStore>(
    Path(project): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<AppState<S>>,
) -> Json<Vec<Issue>> {
    let filter = IssueFilter::from_pairs(params);
    let issues = state.executor.list_issues(&project, &filter);
    debug!("Listed {} issue(s) in project {}", issues.len(), project);
    Json(issues)
}

/// Create an issue
async fn create_issue<S: IssueStore>(
    Path(project): Path<String>,
    State(state): State<AppState<S>>,
    IssueBody(new_issue): IssueBody<NewIssue>,
) -> Result<Json<Issue>, ApiError> {
    match state.executor.create_issue(&project, new_issue) {
        Ok(issue) => {
            info!("Created issue {} in project {}", issue.id, project);
            Ok(Json(issue))
        }
        Err(e) => {
            warn!("Failed to create issue in project {}: {}", project, e);
            Err(ApiError::new(e, state.mode))
        }
    }
}

/// Update fields of an issue
async fn update_issue<S: IssueStore>(
    Path(project): Path<String>,
    State(state): State<AppState<S>>,
    IssueBody(body): IssueBody<UpdateIssueBody>,
) -> Result<Json<ActionResponse>, ApiError> {
    let (id, update) = body.into_parts();
    match state.executor.update_issue(&project, id.as_deref(), update) {
        Ok(id) => {
            info!("Updated issue {} in project {}", id, project);
            Ok(Json(ActionResponse::new("successfully updated", id)))
        }
        Err(e) => {
            warn!("Failed to update issue in project {}: {}", project, e);
            Err(ApiError::new(e, state.mode))
        }
    }
}

/// Delete an issue
async fn delete_issue<S: IssueStore>(
    Path(project): Path<String>,
    State(state): State<AppState<S>>,
    IssueBody(body): IssueBody<DeleteIssueBody>,
) -> Result<Json<ActionResponse>, ApiError> {
    match state.executor.delete_issue(&project, body.id.as_deref()) {
        Ok(id) => {
            info!("Deleted issue {} from project {}", id, project);
            Ok(Json(ActionResponse::new("successfully deleted", id)))
        }
        Err(e) => {
            warn!("Failed to delete issue in project {}: {}", project, e);
            Err(ApiError::new(e, state.mode))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use issues::InMemoryStorage;
    use serde_json::json;

    fn create_test_app(mode: ResponseMode) -> TestServer {
        let executor = Arc::new(CommandExecutor::new(InMemoryStorage::new()));
        let app = create_routes(executor, mode);
        TestServer::new(app).unwrap()
    }

    async fn create(server: &TestServer, project: &str, created_by: &str) -> Issue {
        server
            .post(&format!("/issues/{}", project))
            .json(&json!({
                "issue_title": "Title",
                "issue_text": "Text",
                "created_by": created_by,
            }))
            .await
            .json()
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = create_test_app(ResponseMode::Compatible);
        let response = server.get("/health").await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "status": "ok",
            "service": "issues-api",
            "version": env!("CARGO_PKG_VERSION")
        }));
    }

    #[tokio::test]
    async fn test_list_issues_empty() {
        let server = create_test_app(ResponseMode::Compatible);
        let response = server.get("/issues/unknown").await;
        response.assert_status_ok();
        let issues: Vec<Issue> = response.json();
        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn test_projects_are_isolated() {
        let server = create_test_app(ResponseMode::Compatible);
        let issue = create(&server, "alpha", "Tester").await;
        create(&server, "beta", "Tester").await;

        let alpha: Vec<Issue> = server.get("/issues/alpha").await.json();
        assert_eq!(alpha.len(), 1);
        assert_eq!(alpha[0].id, issue.id);

        let response = server
            .delete("/issues/beta")
            .json(&json!({ "_id": issue.id }))
            .await;
        response.assert_json(&json!({ "error": "could not delete", "_id": issue.id }));
    }

    #[tokio::test]
    async fn test_unknown_filter_key_matches_nothing() {
        let server = create_test_app(ResponseMode::Compatible);
        create(&server, "apitest", "Tester").await;

        let issues: Vec<Issue> = server
            .get("/issues/apitest")
            .add_query_param("bogus", "1")
            .await
            .json();
        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn test_form_bodies_are_accepted() {
        let server = create_test_app(ResponseMode::Compatible);
        let response = server
            .post("/issues/apitest")
            .form(&[
                ("issue_title", "Form issue"),
                ("issue_text", "Sent as a form"),
                ("created_by", "Tester"),
            ])
            .await;
        response.assert_status_ok();
        let issue: Issue = response.json();
        assert_eq!(issue.issue_title, "Form issue");
        assert_eq!(issue.assigned_to, "");

        let response = server
            .put("/issues/apitest")
            .form(&[("_id", issue.id.as_str()), ("open", "false")])
            .await;
        response.assert_json(&json!({ "result": "successfully updated", "_id": issue.id }));

        let closed: Vec<Issue> = server
            .get("/issues/apitest")
            .add_query_param("open", "false")
            .await
            .json();
        assert_eq!(closed.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_body_yields_validation_error() {
        let server = create_test_app(ResponseMode::Compatible);

        let response = server.post("/issues/apitest").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "error": "required field(s) missing" }));

        let response = server.delete("/issues/apitest").await;
        response.assert_json(&json!({ "error": "missing _id" }));
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let server = create_test_app(ResponseMode::Compatible);
        let response = server
            .post("/issues/apitest")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_strict_mode_status_codes() {
        let server = create_test_app(ResponseMode::Strict);

        let response = server
            .post("/issues/apitest")
            .json(&json!({ "issue_title": "Incomplete" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "required field(s) missing" }));

        let response = server
            .put("/issues/apitest")
            .json(&json!({ "_id": "missing", "status_text": "x" }))
            .await;
        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "could not update", "_id": "missing" }));

        let issue = create(&server, "apitest", "Tester").await;
        let response = server
            .delete("/issues/apitest")
            .json(&json!({ "_id": issue.id }))
            .await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_compatible_mode_uses_ok_for_errors() {
        let server = create_test_app(ResponseMode::Compatible);
        let response = server
            .put("/issues/apitest")
            .json(&json!({ "_id": "missing", "status_text": "x" }))
            .await;
        response.assert_status_ok();
        response.assert_json(&json!({ "error": "could not update", "_id": "missing" }));
    }
}
