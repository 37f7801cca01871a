use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use leetgym::api::LeetCodeApi;
use leetgym::api::http::HttpApi;
use leetgym::auth::Credentials;
use leetgym::consts::{BASE_URL, CSRF_ENV, SESSION_ENV};
use leetgym::env::{EnvConfig, LeetCodeEnv};
use leetgym::report::{render_outcome, render_question, render_topic_stats, render_user};
use leetgym::submission::{Language, Submission, load_code};

#[derive(Parser)]
#[command(
    name = "leetgym",
    version,
    about = "Submit solutions to LeetCode and read back a reward."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// LEETCODE_SESSION cookie
    #[arg(long, env = SESSION_ENV, hide_env_values = true, global = true)]
    session: Option<String>,

    /// csrftoken cookie
    #[arg(long, env = CSRF_ENV, hide_env_values = true, global = true)]
    csrf_token: Option<String>,

    /// API root (e.g. https://leetcode.cn)
    #[arg(long, default_value = BASE_URL, global = true)]
    base_url: String,

    /// Log every phase of a submission
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a solution and report the verdict
    Submit {
        /// Problem slug, e.g. two-sum
        #[arg(short, long)]
        slug: String,

        /// Language slug, e.g. python3, cpp, rust
        #[arg(short, long)]
        lang: Language,

        /// Solution source file (`-` reads stdin)
        #[arg(short, long)]
        file: PathBuf,

        /// Numeric question id; looked up from the slug when omitted
        #[arg(long)]
        question_id: Option<u64>,

        /// Seconds to wait for the judge before checking
        #[arg(short, long, default_value_t = 5)]
        timeout: u64,

        /// Minimum seconds between submissions
        #[arg(short, long, default_value_t = 0)]
        cooldown: u64,

        /// Resubmit until accepted, at most this many times
        #[arg(short, long, default_value_t = 1)]
        attempts: usize,

        /// Print the judge's raw JSON result
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
    /// Print the numeric id of a problem slug
    QuestionId {
        slug: String,
    },
    /// Show a problem's statement, tags and starter code
    Question {
        slug: String,

        /// Print the starter code for this language
        #[arg(short, long)]
        lang: Option<Language>,
    },
    /// Show solved/total counts for a topic
    Stats {
        /// algorithms, database, shell or concurrency
        #[arg(default_value = "algorithms")]
        topic: String,

        /// List every problem not yet accepted
        #[arg(long, default_value_t = false)]
        unsolved: bool,
    },
    /// Show which account the session cookies belong to
    Whoami,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let credentials = credentials(cli.session, cli.csrf_token)?;
    let api = HttpApi::with_base_url(&credentials, cli.base_url)?;

    match cli.command {
        Command::Submit {
            slug,
            lang,
            file,
            question_id,
            timeout,
            cooldown,
            attempts,
            raw,
        } => {
            let code = read_code(&file)?;
            let mut sub =
                Submission::new(slug, lang, code).with_timeout(Duration::from_secs(timeout));
            if let Some(id) = question_id {
                sub = sub.with_question_id(id);
            }

            let config = EnvConfig {
                cooldown: Duration::from_secs(cooldown),
            };
            let mut env = LeetCodeEnv::new(Arc::new(api), config);
            env.resolve(&mut sub)
                .await
                .with_context(|| format!("failed to look up {}", sub.question_slug))?;

            for attempt in 1..=attempts.max(1) {
                info!(attempt, slug = %sub.question_slug, lang = %sub.lang, "submitting");
                let outcome = env.step(&sub).await?;
                print!("{}", render_outcome(attempt, &outcome, raw));
                if outcome.done {
                    break;
                }
            }
        }
        Command::QuestionId { slug } => {
            let id = api
                .question_id(&slug)
                .await
                .with_context(|| format!("failed to look up {slug}"))?;
            println!("{id}");
        }
        Command::Question { slug, lang } => {
            let detail = api
                .question_detail(&slug)
                .await
                .with_context(|| format!("failed to fetch {slug}"))?;
            print!("{}", render_question(&detail, lang));
        }
        Command::Stats { topic, unsolved } => {
            let stats = api
                .topic_stats(&topic)
                .await
                .with_context(|| format!("failed to fetch stats for {topic}"))?;
            print!("{}", render_topic_stats(&stats, unsolved));
        }
        Command::Whoami => {
            let user = api.whoami().await?;
            print!("{}", render_user(user.as_ref()));
        }
    }

    Ok(())
}

fn credentials(session: Option<String>, csrf_token: Option<String>) -> Result<Credentials> {
    let session = session
        .filter(|s| !s.is_empty())
        .with_context(|| format!("missing session: pass --session or set {SESSION_ENV}"))?;
    let csrf_token = csrf_token
        .filter(|s| !s.is_empty())
        .with_context(|| format!("missing CSRF token: pass --csrf-token or set {CSRF_ENV}"))?;
    Ok(Credentials::new(session, csrf_token))
}

fn read_code(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut code = String::new();
        io::stdin()
            .read_to_string(&mut code)
            .context("failed to read solution from stdin")?;
        return Ok(code);
    }
    load_code(path)
}
