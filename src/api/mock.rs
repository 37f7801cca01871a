use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::time::Instant;

use super::{ApiError, LeetCodeApi, SubmissionId, SubmissionResult, SubmitPayload};

/// A call the mock received, with the (tokio) time it arrived.
#[derive(Debug, Clone)]
pub enum Call {
    Submit {
        slug: String,
        payload: SubmitPayload,
        at: Instant,
    },
    QuestionId {
        slug: String,
        at: Instant,
    },
    Check {
        id: SubmissionId,
        at: Instant,
    },
}

/// A scripted judge for tests. Each `check` returns the next scripted result.
pub struct MockApi {
    results: Vec<Value>,
    index: AtomicUsize,
    next_id: AtomicU64,
    questions: HashMap<String, u64>,
    reject_status: Option<u16>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new(results: Vec<Value>) -> Self {
        Self {
            results,
            index: AtomicUsize::new(0),
            next_id: AtomicU64::new(1),
            questions: HashMap::new(),
            reject_status: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make `slug` resolvable to `id`.
    pub fn with_question(mut self, slug: &str, id: u64) -> Self {
        self.questions.insert(slug.to_string(), id);
        self
    }

    /// Refuse every submit with the given HTTP status, like a stale session.
    pub fn rejecting(mut self, status: u16) -> Self {
        self.reject_status = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> usize {
        self.count(|c| matches!(c, Call::QuestionId { .. }))
    }

    pub fn submits(&self) -> usize {
        self.count(|c| matches!(c, Call::Submit { .. }))
    }

    pub fn checks(&self) -> usize {
        self.count(|c| matches!(c, Call::Check { .. }))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl LeetCodeApi for MockApi {
    async fn submit(&self, slug: &str, payload: &SubmitPayload) -> Result<SubmissionId, ApiError> {
        self.record(Call::Submit {
            slug: slug.to_string(),
            payload: payload.clone(),
            at: Instant::now(),
        });
        if let Some(status) = self.reject_status {
            return Err(ApiError::Unauthorized { status });
        }
        Ok(SubmissionId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn question_id(&self, slug: &str) -> Result<u64, ApiError> {
        self.record(Call::QuestionId {
            slug: slug.to_string(),
            at: Instant::now(),
        });
        self.questions
            .get(slug)
            .copied()
            .ok_or_else(|| ApiError::UnknownQuestion(slug.to_string()))
    }

    async fn check(&self, id: SubmissionId) -> Result<SubmissionResult, ApiError> {
        self.record(Call::Check {
            id,
            at: Instant::now(),
        });
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let value = self.results.get(i).cloned().ok_or_else(|| {
            ApiError::UnexpectedResponse(format!(
                "MockApi: no more results (check called {} times)",
                i + 1
            ))
        })?;
        SubmissionResult::from_value(value)
    }
}
