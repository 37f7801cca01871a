//! What gets sent to the judge.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SUBMISSION_TIMEOUT;

/// Languages the judge accepts, keyed by the slug it expects in `lang`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Java,
    Python,
    Python3,
    C,
    CSharp,
    JavaScript,
    TypeScript,
    Php,
    Swift,
    Kotlin,
    Dart,
    Golang,
    Ruby,
    Scala,
    Rust,
    Racket,
    Erlang,
    Elixir,
    MySql,
    MsSql,
    OracleSql,
}

impl Language {
    pub const ALL: &[Language] = &[
        Language::Cpp,
        Language::Java,
        Language::Python,
        Language::Python3,
        Language::C,
        Language::CSharp,
        Language::JavaScript,
        Language::TypeScript,
        Language::Php,
        Language::Swift,
        Language::Kotlin,
        Language::Dart,
        Language::Golang,
        Language::Ruby,
        Language::Scala,
        Language::Rust,
        Language::Racket,
        Language::Erlang,
        Language::Elixir,
        Language::MySql,
        Language::MsSql,
        Language::OracleSql,
    ];

    /// The slug the judge uses for this language.
    pub fn slug(self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Python => "python",
            Language::Python3 => "python3",
            Language::C => "c",
            Language::CSharp => "csharp",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Php => "php",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Dart => "dart",
            Language::Golang => "golang",
            Language::Ruby => "ruby",
            Language::Scala => "scala",
            Language::Rust => "rust",
            Language::Racket => "racket",
            Language::Erlang => "erlang",
            Language::Elixir => "elixir",
            Language::MySql => "mysql",
            Language::MsSql => "mssql",
            Language::OracleSql => "oraclesql",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.slug() == wanted)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// A candidate solution for one problem.
///
/// The slug is always required because the submit endpoint is addressed by
/// it. The numeric id is optional; when absent the environment looks it up
/// from the slug before submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub code: String,
    pub lang: Language,
    pub question_slug: String,
    pub question_id: Option<u64>,
    /// How long to wait after submitting before checking the verdict.
    pub timeout: Duration,
}

impl Submission {
    pub fn new(question_slug: impl Into<String>, lang: Language, code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            lang,
            question_slug: question_slug.into(),
            question_id: None,
            timeout: DEFAULT_SUBMISSION_TIMEOUT,
        }
    }

    pub fn with_question_id(mut self, id: u64) -> Self {
        self.question_id = Some(id);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Read a solution from disk. Empty files are refused; the judge would only
/// answer with a compile error.
pub fn load_code(path: &Path) -> Result<String> {
    let code = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read solution from {}", path.display()))?;
    if code.trim().is_empty() {
        anyhow::bail!("solution file {} is empty", path.display());
    }
    Ok(code)
}
