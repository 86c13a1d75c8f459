//! Request body extraction.
//!
//! Clients send either JSON or `application/x-www-form-urlencoded` bodies.
//! An empty body decodes to the type's default so that a bare request
//! reaches the handler and gets the operation's own validation error.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use issues::IssueUpdate;
use serde::{de, de::DeserializeOwned, Deserialize, Deserializer};
use std::fmt;

/// Extractor decoding a JSON or form body into `T`.
#[derive(Debug, Clone)]
pub struct IssueBody<T>(pub T);

/// Rejection returned when a body cannot be decoded.
#[derive(Debug)]
pub struct BodyRejection(String);

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.0 })),
        )
            .into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for IssueBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| BodyRejection(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let value = if is_form {
            serde_urlencoded::from_bytes(&bytes)
                .map_err(|e| BodyRejection(format!("invalid form body: {}", e)))?
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| BodyRejection(format!("invalid JSON body: {}", e)))?
        };

        Ok(Self(value))
    }
}

/// Body of a PUT request: the target id plus the fields to change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIssueBody {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub issue_title: Option<String>,
    #[serde(default)]
    pub issue_text: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_open")]
    pub open: Option<bool>,
}

impl UpdateIssueBody {
    pub fn into_parts(self) -> (Option<String>, IssueUpdate) {
        let update = IssueUpdate {
            issue_title: self.issue_title,
            issue_text: self.issue_text,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            status_text: self.status_text,
            open: self.open,
        };
        (self.id, update)
    }
}

/// Body of a DELETE request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteIssueBody {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
}

/// Accepts `true`, `false`, `"true"`, `"false"`, `""` and `null`.
///
/// Forms only carry strings, so the string spellings are needed there. An
/// empty string or null means the field was not supplied.
fn deserialize_open<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OpenVisitor;

    impl<'de> de::Visitor<'de> for OpenVisitor {
        type Value = Option<bool>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean or the string \"true\" or \"false\"")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            match value {
                "" => Ok(None),
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }
    }

    deserializer.deserialize_any(OpenVisitor)
}
