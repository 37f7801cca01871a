//! Session credentials and the request headers built from them.
//!
//! LeetCode authenticates browser sessions with two cookies: the
//! `LEETCODE_SESSION` token and the `csrftoken`. The CSRF token must also be
//! echoed back in `x-csrftoken`, and requests without a LeetCode referer are
//! rejected. Nothing is checked locally; a bad token shows up as a 401/403
//! on first use.

use std::fmt;

use anyhow::{Context, Result};
use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue, REFERER};

use crate::consts::{CSRF_ENV, REFERER as LEETCODE_REFERER, SESSION_ENV};

const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

/// The two secrets that make up a logged-in session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub session: String,
    pub csrf_token: String,
}

impl Credentials {
    pub fn new(session: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            csrf_token: csrf_token.into(),
        }
    }

    /// Read `LEETCODE_SESSION` and `CSRF_TOKEN` from the process environment.
    pub fn from_env() -> Result<Self> {
        let session = read_env(SESSION_ENV)?;
        let csrf_token = read_env(CSRF_ENV)?;
        Ok(Self::new(session, csrf_token))
    }

    /// Headers every authenticated request carries.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let cookie = format!(
            "csrftoken={}; LEETCODE_SESSION={}",
            self.csrf_token, self.session
        );
        let mut cookie =
            HeaderValue::from_str(&cookie).context("session cookie is not a valid header value")?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);

        let mut csrf = HeaderValue::from_str(&self.csrf_token)
            .context("CSRF token is not a valid header value")?;
        csrf.set_sensitive(true);
        headers.insert(CSRF_HEADER, csrf);

        headers.insert(REFERER, HeaderValue::from_static(LEETCODE_REFERER));
        Ok(headers)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("session", &"<redacted>")
            .field("csrf_token", &"<redacted>")
            .finish()
    }
}

fn read_env(name: &str) -> Result<String> {
    let value = std::env::var(name).with_context(|| format!("{name} is not set"))?;
    if value.is_empty() {
        anyhow::bail!("{name} is empty");
    }
    Ok(value)
}
