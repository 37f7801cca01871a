//! The submission environment: step a solution, get a reward.
//!
//! One [`LeetCodeEnv::step`] is one submission: wait out the cooldown,
//! resolve the question id if needed, submit, sleep for the submission's
//! timeout, check once, and classify. The single check after a blind delay
//! means a slow judge reports "Submission Timed-Out" rather than its real
//! verdict.

pub mod reward;

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::api::{ApiError, LeetCodeApi, SubmissionResult, SubmitPayload};
use crate::submission::Submission;

pub use reward::Status;

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Minimum gap between consecutive submissions, to stay under rate limits.
    pub cooldown: Duration,
}

/// Everything a step reports back.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub status: Status,
    pub reward: bool,
    pub done: bool,
    pub result: SubmissionResult,
}

pub struct LeetCodeEnv {
    api: Arc<dyn LeetCodeApi>,
    config: EnvConfig,
    last_submission: Option<Instant>,
    reward: bool,
}

impl LeetCodeEnv {
    pub fn new(api: Arc<dyn LeetCodeApi>, config: EnvConfig) -> Self {
        Self {
            api,
            config,
            last_submission: None,
            reward: false,
        }
    }

    /// Submit `sub` and turn the judge's answer into a reward.
    ///
    /// Remote failures (bad credentials, unknown slug, transport) come back
    /// unchanged. Ambiguous results do not fail; they classify as
    /// "Submission Timed-Out" or "Unknown".
    pub async fn step(&mut self, sub: &Submission) -> Result<StepOutcome, ApiError> {
        let result = self.send(sub).await?;

        let status = reward::classify(&result);
        let reward = reward::reward(&status);
        self.reward = reward;
        let done = self.is_done();

        info!(slug = %sub.question_slug, %status, reward, "submission judged");

        Ok(StepOutcome {
            status,
            reward,
            done,
            result,
        })
    }

    /// Fill in `sub.question_id` from its slug if it is missing, so repeated
    /// steps on the same submission skip the lookup.
    pub async fn resolve(&self, sub: &mut Submission) -> Result<u64, ApiError> {
        if let Some(id) = sub.question_id {
            return Ok(id);
        }
        let id = self.lookup(&sub.question_slug).await?;
        sub.question_id = Some(id);
        Ok(id)
    }

    /// Forget the last reward. The cooldown clock keeps running.
    pub fn reset(&mut self) {
        self.reward = false;
    }

    pub fn reward(&self) -> bool {
        self.reward
    }

    /// The episode ends on the first accepted solution.
    pub fn is_done(&self) -> bool {
        self.reward
    }

    pub fn cooldown(&self) -> Duration {
        self.config.cooldown
    }

    async fn send(&mut self, sub: &Submission) -> Result<SubmissionResult, ApiError> {
        self.wait_for_cooldown().await;

        let question_id = match sub.question_id {
            Some(id) => id,
            None => self.lookup(&sub.question_slug).await?,
        };

        let payload = SubmitPayload::new(sub, question_id);
        let submission_id = self.api.submit(&sub.question_slug, &payload).await?;
        debug!(%submission_id, timeout = ?sub.timeout, "submitted, waiting for judge");

        tokio::time::sleep(sub.timeout).await;

        let result = self.api.check(submission_id).await?;
        debug!(%submission_id, fields = result.len(), "checked submission");
        Ok(result)
    }

    async fn lookup(&self, slug: &str) -> Result<u64, ApiError> {
        let id = self.api.question_id(slug).await?;
        debug!(slug, id, "resolved question id");
        Ok(id)
    }

    async fn wait_for_cooldown(&mut self) {
        if let Some(last) = self.last_submission {
            let remaining = self.config.cooldown.saturating_sub(last.elapsed());
            if !remaining.is_zero() {
                debug!(?remaining, "cooling down");
                tokio::time::sleep(remaining).await;
            }
        }
        self.last_submission = Some(Instant::now());
    }
}
