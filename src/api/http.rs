use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::problems::{
    QUESTION_DETAIL_QUERY, QuestionDetail, TopicStats, parse_question_detail, parse_topic_stats,
};
use super::{ApiError, LeetCodeApi, SubmissionId, SubmissionResult, SubmitPayload};
use crate::auth::Credentials;
use crate::consts::BASE_URL;

const QUESTION_ID_QUERY: &str = r#"query questionData($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
  }
}"#;

const WHOAMI_QUERY: &str = r#"{
  user {
    username
    isCurrentUserPremium
  }
}"#;

/// The signed-in account, as reported by GraphQL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(rename = "isCurrentUserPremium", default)]
    pub is_premium: bool,
}

/// Talks to leetcode.com with a fixed set of session headers.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Self::with_base_url(credentials, BASE_URL)
    }

    /// Point at a different host, e.g. leetcode.cn or a local stub.
    pub fn with_base_url(credentials: &Credentials, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(credentials.headers()?)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Who the session belongs to. `None` when the cookies are not signed in.
    pub async fn whoami(&self) -> Result<Option<User>, ApiError> {
        let data = self.graphql(WHOAMI_QUERY, json!({})).await?;
        parse_user(&data)
    }

    /// Statement, starter code and sample input for `slug`.
    pub async fn question_detail(&self, slug: &str) -> Result<QuestionDetail, ApiError> {
        let data = self
            .graphql(QUESTION_DETAIL_QUERY, json!({ "titleSlug": slug }))
            .await?;
        parse_question_detail(slug, &data)
    }

    /// Per-problem progress for a topic such as `algorithms` or `shell`.
    pub async fn topic_stats(&self, topic: &str) -> Result<TopicStats, ApiError> {
        let url = format!("{}/api/problems/{}/", self.base_url, topic);
        debug!(%url, "fetching topic stats");
        let resp = self.client.get(&url).send().await?;
        let value = read_json(resp).await?;
        parse_topic_stats(topic, value)
    }

    async fn graphql(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        let url = format!("{}/graphql", self.base_url);
        let body = json!({ "query": query, "variables": variables });
        let resp = self.client.post(&url).json(&body).send().await?;
        let value = read_json(resp).await?;
        if let Some(message) = graphql_errors(&value) {
            return Err(ApiError::Graphql(message));
        }
        value
            .get("data")
            .cloned()
            .ok_or_else(|| ApiError::UnexpectedResponse("GraphQL response has no data".to_string()))
    }
}

#[async_trait]
impl LeetCodeApi for HttpApi {
    async fn submit(&self, slug: &str, payload: &SubmitPayload) -> Result<SubmissionId, ApiError> {
        let url = format!("{}/problems/{}/submit/", self.base_url, slug);
        debug!(%url, lang = %payload.lang, "posting submission");
        let resp = self.client.post(&url).json(payload).send().await?;
        let value = read_json(resp).await?;
        parse_submission_id(&value)
    }

    async fn question_id(&self, slug: &str) -> Result<u64, ApiError> {
        let data = self
            .graphql(QUESTION_ID_QUERY, json!({ "titleSlug": slug }))
            .await?;
        parse_question_id(slug, &data)
    }

    async fn check(&self, id: SubmissionId) -> Result<SubmissionResult, ApiError> {
        let url = format!("{}/submissions/detail/{}/check/", self.base_url, id);
        let resp = self.client.get(&url).send().await?;
        let value = read_json(resp).await?;
        SubmissionResult::from_value(value)
    }
}

/// Map HTTP status to [`ApiError`] and decode the body as JSON.
async fn read_json(resp: reqwest::Response) -> Result<Value, ApiError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized {
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let text = resp.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| ApiError::UnexpectedResponse(format!("invalid JSON ({e}): {text}")))
}

fn graphql_errors(value: &Value) -> Option<String> {
    let errors = value.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }
    let messages: Vec<&str> = errors
        .iter()
        .filter_map(|e| e.get("message").and_then(Value::as_str))
        .collect();
    if messages.is_empty() {
        Some(Value::Array(errors.clone()).to_string())
    } else {
        Some(messages.join("; "))
    }
}

fn parse_submission_id(value: &Value) -> Result<SubmissionId, ApiError> {
    value
        .get("submission_id")
        .and_then(as_u64_lenient)
        .map(SubmissionId)
        .ok_or_else(|| ApiError::UnexpectedResponse(format!("no submission_id in {value}")))
}

fn parse_question_id(slug: &str, data: &Value) -> Result<u64, ApiError> {
    let question = match data.get("question") {
        Some(Value::Null) | None => return Err(ApiError::UnknownQuestion(slug.to_string())),
        Some(q) => q,
    };
    question
        .get("questionId")
        .and_then(as_u64_lenient)
        .ok_or_else(|| ApiError::UnexpectedResponse(format!("no questionId for {slug}: {question}")))
}

fn parse_user(data: &Value) -> Result<Option<User>, ApiError> {
    match data.get("user") {
        Some(Value::Null) | None => Ok(None),
        Some(user) => serde_json::from_value(user.clone())
            .map(Some)
            .map_err(|e| ApiError::UnexpectedResponse(format!("bad user object ({e}): {user}"))),
    }
}

/// LeetCode sends ids as numbers in some places and strings in others.
fn as_u64_lenient(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_id_from_number() {
        let id = parse_submission_id(&json!({"submission_id": 528121775})).unwrap();
        assert_eq!(id, SubmissionId(528121775));
    }

    #[test]
    fn submission_id_from_string() {
        let id = parse_submission_id(&json!({"submission_id": "42"})).unwrap();
        assert_eq!(id, SubmissionId(42));
    }

    #[test]
    fn missing_submission_id_is_unexpected() {
        let err = parse_submission_id(&json!({"error": "nope"})).unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse(_)));
    }

    #[test]
    fn question_id_parses_string_id() {
        let data = json!({"question": {"questionId": "1"}});
        assert_eq!(parse_question_id("two-sum", &data).unwrap(), 1);
    }

    #[test]
    fn null_question_is_unknown() {
        let data = json!({"question": null});
        match parse_question_id("no-such-problem", &data).unwrap_err() {
            ApiError::UnknownQuestion(slug) => assert_eq!(slug, "no-such-problem"),
            other => panic!("expected UnknownQuestion, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_question_id_is_unexpected() {
        let data = json!({"question": {"questionId": "abc"}});
        assert!(matches!(
            parse_question_id("two-sum", &data).unwrap_err(),
            ApiError::UnexpectedResponse(_)
        ));
    }

    #[test]
    fn graphql_errors_joined() {
        let value = json!({"errors": [{"message": "a"}, {"message": "b"}]});
        assert_eq!(graphql_errors(&value).unwrap(), "a; b");
    }

    #[test]
    fn empty_graphql_errors_ignored() {
        assert!(graphql_errors(&json!({"errors": [], "data": {}})).is_none());
        assert!(graphql_errors(&json!({"data": {}})).is_none());
    }

    #[test]
    fn user_parsed() {
        let data = json!({"user": {"username": "omgitspavel", "isCurrentUserPremium": false}});
        let user = parse_user(&data).unwrap().unwrap();
        assert_eq!(user.username, "omgitspavel");
        assert!(!user.is_premium);
    }

    #[test]
    fn null_user_means_signed_out() {
        assert!(parse_user(&json!({"user": null})).unwrap().is_none());
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let api =
            HttpApi::with_base_url(&Credentials::new("s", "c"), "http://localhost:8080/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8080");
    }
}
