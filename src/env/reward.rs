use std::fmt;

use serde_json::Value;

use crate::api::SubmissionResult;
use crate::consts::{STATUS_ACCEPTED, STATUS_TIMED_OUT, STATUS_UNKNOWN};

/// Outcome label for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The judge had not finished when we checked.
    TimedOut,
    /// Whatever the judge put in `status_msg` ("Accepted", "Wrong Answer", ...).
    Verdict(String),
    /// Nothing we recognise.
    Unknown,
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::TimedOut => STATUS_TIMED_OUT,
            Status::Verdict(msg) => msg.as_str(),
            Status::Unknown => STATUS_UNKNOWN,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.as_str() == STATUS_ACCEPTED
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<&str> for Status {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Map a raw check result onto a [`Status`].
///
/// Precedence: a result that is nothing but `state: STARTED` is still
/// running; so is `status: PENDING`; otherwise a present `status_msg` is
/// taken verbatim (non-string values as their JSON text); anything else is
/// unknown.
pub fn classify(result: &SubmissionResult) -> Status {
    if result.len() == 1 && result.state() == Some("STARTED") {
        return Status::TimedOut;
    }
    if result.status() == Some("PENDING") {
        return Status::TimedOut;
    }
    match result.get("status_msg") {
        Some(Value::String(msg)) => Status::Verdict(msg.clone()),
        Some(other) => Status::Verdict(other.to_string()),
        None => Status::Unknown,
    }
}

/// Only an accepted verdict is rewarded.
pub fn reward(status: &Status) -> bool {
    status.is_accepted()
}
