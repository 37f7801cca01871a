pub mod http;
pub mod mock;
pub mod problems;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::consts::JUDGE_TYPE;
use crate::submission::Submission;

/// Failures at the remote boundary. Surfaced to callers as-is.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The judge rejected our session or CSRF token (HTTP 401/403).
    #[error("not authorized ({status}): check LEETCODE_SESSION and CSRF_TOKEN")]
    Unauthorized { status: u16 },

    /// The slug does not name any question.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// Any other non-success HTTP status.
    #[error("LeetCode API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The GraphQL endpoint answered with an `errors` array.
    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// A 2xx response whose body we could not use.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Identifier the judge hands back for a queued submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of the submit call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitPayload {
    pub judge_type: &'static str,
    pub typed_code: String,
    pub question_id: u64,
    pub test_mode: bool,
    pub lang: String,
}

impl SubmitPayload {
    /// A real (judged, non-test) submission of `sub` against `question_id`.
    pub fn new(sub: &Submission, question_id: u64) -> Self {
        Self {
            judge_type: JUDGE_TYPE,
            typed_code: sub.code.clone(),
            question_id,
            test_mode: false,
            lang: sub.lang.slug().to_string(),
        }
    }
}

/// Raw verdict returned by the check call. Opaque apart from a few markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionResult(pub Map<String, Value>);

impl SubmissionResult {
    /// Wrap a JSON value. Anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ApiError::UnexpectedResponse(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn state(&self) -> Option<&str> {
        self.get("state").and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status").and_then(Value::as_str)
    }

    pub fn status_msg(&self) -> Option<&str> {
        self.get("status_msg").and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The three calls the environment needs from the judge.
/// Implemented over HTTP by [`http::HttpApi`] and scripted by [`mock::MockApi`].
#[async_trait]
pub trait LeetCodeApi: Send + Sync {
    /// Queue `payload` for judging against the problem at `slug`.
    async fn submit(&self, slug: &str, payload: &SubmitPayload) -> Result<SubmissionId, ApiError>;

    /// Resolve a problem slug to its numeric id.
    async fn question_id(&self, slug: &str) -> Result<u64, ApiError>;

    /// Fetch whatever the judge currently knows about a submission.
    async fn check(&self, id: SubmissionId) -> Result<SubmissionResult, ApiError>;
}
