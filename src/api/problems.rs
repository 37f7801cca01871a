//! Problem metadata: per-question detail and per-topic progress.

use serde::Deserialize;
use serde_json::Value;

use super::ApiError;
use crate::submission::Language;

pub(crate) const QUESTION_DETAIL_QUERY: &str = r#"query getQuestionDetail($titleSlug: String!) {
  question(titleSlug: $titleSlug) {
    questionId
    questionFrontendId
    title
    content
    isPaidOnly
    difficulty
    likes
    dislikes
    codeSnippets {
      lang
      langSlug
      code
    }
    sampleTestCase
    topicTags {
      name
      slug
    }
    hints
  }
}"#;

/// Statement, starter code and sample input for one problem.
/// Paid-only questions come back with `content` and `code_snippets` unset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetail {
    pub question_id: String,
    pub question_frontend_id: Option<String>,
    pub title: String,
    pub content: Option<String>,
    #[serde(default)]
    pub is_paid_only: bool,
    pub difficulty: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    pub code_snippets: Option<Vec<CodeSnippet>>,
    pub sample_test_case: Option<String>,
    pub topic_tags: Option<Vec<TopicTag>>,
    pub hints: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippet {
    pub lang: String,
    pub lang_slug: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicTag {
    pub name: String,
    pub slug: String,
}

impl QuestionDetail {
    /// Starter code for `lang`, if the problem offers it.
    pub fn snippet(&self, lang: Language) -> Option<&str> {
        self.code_snippets
            .as_deref()?
            .iter()
            .find(|s| s.lang_slug == lang.slug())
            .map(|s| s.code.as_str())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.topic_tags
            .iter()
            .flatten()
            .map(|t| t.name.as_str())
    }
}

/// The signed-in user's progress over every problem in a topic
/// (`algorithms`, `database`, `shell`, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopicStats {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub category_slug: String,
    #[serde(default)]
    pub num_solved: u32,
    #[serde(default)]
    pub num_total: u32,
    #[serde(default)]
    pub ac_easy: u32,
    #[serde(default)]
    pub ac_medium: u32,
    #[serde(default)]
    pub ac_hard: u32,
    #[serde(default)]
    pub stat_status_pairs: Vec<ProblemStatus>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProblemStatus {
    pub stat: ProblemStat,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub paid_only: bool,
    /// `"ac"` once solved, `"notac"` after a failed attempt, otherwise unset.
    pub status: Option<String>,
}

impl ProblemStatus {
    pub fn is_solved(&self) -> bool {
        self.status.as_deref() == Some("ac")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProblemStat {
    pub question_id: u64,
    pub frontend_question_id: u64,
    #[serde(rename = "question__title")]
    pub title: String,
    #[serde(rename = "question__title_slug")]
    pub title_slug: String,
    #[serde(rename = "question__hide", default)]
    pub hidden: bool,
    #[serde(default)]
    pub total_acs: u64,
    #[serde(default)]
    pub total_submitted: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Difficulty {
    pub level: u8,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self.level {
            1 => "Easy",
            2 => "Medium",
            3 => "Hard",
            _ => "?",
        }
    }
}

pub(crate) fn parse_question_detail(slug: &str, data: &Value) -> Result<QuestionDetail, ApiError> {
    match data.get("question") {
        Some(Value::Null) | None => Err(ApiError::UnknownQuestion(slug.to_string())),
        Some(q) => serde_json::from_value(q.clone()).map_err(|e| {
            ApiError::UnexpectedResponse(format!("bad question detail for {slug} ({e})"))
        }),
    }
}

pub(crate) fn parse_topic_stats(topic: &str, value: Value) -> Result<TopicStats, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::UnexpectedResponse(format!("bad stats for topic {topic} ({e})")))
}
