//! Terminal output for the CLI.

use std::fmt::Write;

use crate::api::http::User;
use crate::api::problems::{QuestionDetail, TopicStats};
use crate::env::StepOutcome;
use crate::submission::Language;

/// Render one step's outcome. With `raw`, the judge's JSON follows.
pub fn render_outcome(attempt: usize, outcome: &StepOutcome, raw: bool) -> String {
    let mark = if outcome.reward { "✓" } else { "✗" };
    let mut out = format!(
        "[attempt {attempt}] {mark} {}\n   reward    {}\n   done      {}\n",
        outcome.status, outcome.reward, outcome.done
    );
    for (label, key) in [("runtime", "status_runtime"), ("memory", "status_memory")] {
        if let Some(value) = outcome.result.get(key).and_then(|v| v.as_str()) {
            let _ = writeln!(out, "   {label:<9} {value}");
        }
    }
    if raw {
        let json = serde_json::to_string_pretty(&outcome.result).unwrap_or_default();
        let _ = writeln!(out, "{json}");
    }
    out
}

/// Render the `whoami` answer.
pub fn render_user(user: Option<&User>) -> String {
    match user {
        Some(user) => format!(
            "   user      {}\n   premium   {}\n",
            user.username,
            if user.is_premium { "yes" } else { "no" }
        ),
        None => "   not signed in (check LEETCODE_SESSION and CSRF_TOKEN)\n".to_string(),
    }
}

/// Render a problem's header, statement and, for `lang`, its starter code.
pub fn render_question(detail: &QuestionDetail, lang: Option<Language>) -> String {
    let id = detail
        .question_frontend_id
        .as_deref()
        .unwrap_or(detail.question_id.as_str());
    let mut out = format!("{id}. {} [{}]\n", detail.title, detail.difficulty);
    let tags: Vec<&str> = detail.tags().collect();
    if !tags.is_empty() {
        let _ = writeln!(out, "   tags      {}", tags.join(", "));
    }
    if detail.is_paid_only {
        let _ = writeln!(out, "   premium only");
    }
    if let Some(sample) = &detail.sample_test_case {
        let _ = writeln!(out, "   sample    {}", sample.replace('\n', " | "));
    }
    if let Some(content) = &detail.content {
        let _ = writeln!(out, "\n{}", content.trim());
    }
    if let Some(lang) = lang {
        match detail.snippet(lang) {
            Some(code) => {
                let _ = writeln!(out, "\n{code}");
            }
            None => {
                let _ = writeln!(out, "\n   no {lang} starter code");
            }
        }
    }
    out
}

/// Render topic progress; with `unsolved`, list what is left.
pub fn render_topic_stats(stats: &TopicStats, unsolved: bool) -> String {
    let user = if stats.user_name.is_empty() {
        "(not signed in)"
    } else {
        stats.user_name.as_str()
    };
    let mut out = format!(
        "   user      {user}\n   solved    {}/{}\n   easy      {}\n   medium    {}\n   hard      {}\n",
        stats.num_solved, stats.num_total, stats.ac_easy, stats.ac_medium, stats.ac_hard
    );
    if unsolved {
        let mut left: Vec<_> = stats
            .stat_status_pairs
            .iter()
            .filter(|p| !p.is_solved() && !p.stat.hidden)
            .collect();
        left.sort_by_key(|p| p.stat.frontend_question_id);
        for p in left {
            let lock = if p.paid_only { " 🔒" } else { "" };
            let _ = writeln!(
                out,
                "   {:>5}  {:<6}  {}{lock}",
                p.stat.frontend_question_id,
                p.difficulty.label(),
                p.stat.title_slug
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SubmissionResult;
    use crate::env::Status;
    use serde_json::json;

    fn outcome(value: serde_json::Value, status: Status) -> StepOutcome {
        let reward = status.is_accepted();
        StepOutcome {
            status,
            reward,
            done: reward,
            result: SubmissionResult::from_value(value).unwrap(),
        }
    }

    #[test]
    fn accepted_outcome_rendered() {
        let o = outcome(
            json!({"status_msg": "Accepted", "status_runtime": "20 ms", "status_memory": "13.2 MB"}),
            Status::Verdict("Accepted".to_string()),
        );
        let text = render_outcome(1, &o, false);
        assert!(text.contains("[attempt 1] ✓ Accepted"));
        assert!(text.contains("reward    true"));
        assert!(text.contains("20 ms"));
        assert!(text.contains("13.2 MB"));
        assert!(!text.contains("status_msg"));
    }

    #[test]
    fn raw_appends_json() {
        let o = outcome(json!({"state": "STARTED"}), Status::TimedOut);
        let text = render_outcome(2, &o, true);
        assert!(text.contains("✗ Submission Timed-Out"));
        assert!(text.contains("\"state\": \"STARTED\""));
    }

    #[test]
    fn user_rendered() {
        let user = User {
            username: "omgitspavel".to_string(),
            is_premium: true,
        };
        let text = render_user(Some(&user));
        assert!(text.contains("omgitspavel"));
        assert!(text.contains("premium   yes"));
    }

    fn question() -> QuestionDetail {
        serde_json::from_value(json!({
            "questionId": "1",
            "questionFrontendId": "1",
            "title": "Two Sum",
            "content": "<p>Given an array...</p>",
            "isPaidOnly": false,
            "difficulty": "Easy",
            "codeSnippets": [{"lang": "Rust", "langSlug": "rust", "code": "impl Solution {}"}],
            "sampleTestCase": "[2,7,11,15]\n9",
            "topicTags": [{"name": "Array", "slug": "array"}, {"name": "Hash Table", "slug": "hash-table"}],
            "hints": null
        }))
        .unwrap()
    }

    #[test]
    fn question_rendered_with_snippet() {
        let text = render_question(&question(), Some(Language::Rust));
        assert!(text.starts_with("1. Two Sum [Easy]"));
        assert!(text.contains("tags      Array, Hash Table"));
        assert!(text.contains("sample    [2,7,11,15] | 9"));
        assert!(text.contains("<p>Given an array...</p>"));
        assert!(text.contains("impl Solution {}"));
    }

    #[test]
    fn missing_snippet_is_reported() {
        let text = render_question(&question(), Some(Language::Kotlin));
        assert!(text.contains("no kotlin starter code"));
        assert!(!render_question(&question(), None).contains("starter code"));
    }

    #[test]
    fn topic_stats_rendered() {
        let stats: TopicStats = serde_json::from_value(json!({
            "user_name": "omgitspavel",
            "num_solved": 1,
            "num_total": 3,
            "ac_easy": 1,
            "stat_status_pairs": [
                {"stat": {"question_id": 195, "frontend_question_id": 195,
                          "question__title": "Tenth Line", "question__title_slug": "tenth-line"},
                 "difficulty": {"level": 1}, "paid_only": false, "status": "ac"},
                {"stat": {"question_id": 194, "frontend_question_id": 194,
                          "question__title": "Transpose File", "question__title_slug": "transpose-file"},
                 "difficulty": {"level": 2}, "paid_only": false, "status": null},
                {"stat": {"question_id": 193, "frontend_question_id": 193,
                          "question__title": "Valid Phone Numbers", "question__title_slug": "valid-phone-numbers"},
                 "difficulty": {"level": 1}, "paid_only": true, "status": "notac"}
            ]
        }))
        .unwrap();

        let summary = render_topic_stats(&stats, false);
        assert!(summary.contains("solved    1/3"));
        assert!(!summary.contains("transpose-file"));

        let listing = render_topic_stats(&stats, true);
        assert!(!listing.contains("tenth-line"));
        let phone = listing.find("valid-phone-numbers").unwrap();
        let transpose = listing.find("transpose-file").unwrap();
        assert!(phone < transpose);
        assert!(listing.contains("Medium"));
    }

    #[test]
    fn signed_out_rendered() {
        assert!(render_user(None).contains("not signed in"));
    }
}
