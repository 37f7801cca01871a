//! Project-wide constants.

use std::time::Duration;

/// Root of the LeetCode web API.
pub const BASE_URL: &str = "https://leetcode.com";

/// Referer the judge expects on every authenticated request.
pub const REFERER: &str = "https://leetcode.com";

/// Environment variable holding the `LEETCODE_SESSION` cookie.
pub const SESSION_ENV: &str = "LEETCODE_SESSION";

/// Environment variable holding the `csrftoken` cookie.
pub const CSRF_ENV: &str = "CSRF_TOKEN";

/// Judge mode for real (non-interpreted) submissions.
pub const JUDGE_TYPE: &str = "large";

/// How long to wait for the judge when a submission does not say otherwise.
pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Status reported when the judge had not finished by the time we checked.
pub const STATUS_TIMED_OUT: &str = "Submission Timed-Out";

/// Status reported when the result carries no recognisable marker.
pub const STATUS_UNKNOWN: &str = "Unknown";

/// The only status that earns a reward.
pub const STATUS_ACCEPTED: &str = "Accepted";
