use chrono::{DateTime, Local};
use clap::Parser;

use snippet_cli::{
    config::RuntimeConfig,
    credentials::{CredentialStore, FileCredentialStore},
    git::{self, GitConfigError},
};
use snippet_core::{
    date_window::{self, DateWindow},
    github_api::{self, GithubApiError, SearchResults},
    markdown, query,
};

const DIVIDER: &str = "---------------------------------------";

const MISSING_TOKEN_GUIDANCE: &str = "\
Please add your personal access token for repo (Full control of private repositories) in GitHub.
You can generate one in GitHub under Personal settings > Personal access tokens.
Register it by running `snippet-cli --token <YOUR_PERSONAL_ACCESS_TOKEN>` first.";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Extract your authored GitHub PRs for a week as a markdown snippet"
)]
struct Cli {
    /// Restrict results to one GitHub organization.
    organization: Option<String>,

    /// Week offset relative to the current week (-1 is last week).
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    week: i32,

    /// Register a personal access token for this and later runs.
    #[arg(long)]
    token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    User,
    Runtime,
}

#[derive(Debug, PartialEq, Eq)]
struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    fn user(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            message: message.into(),
        }
    }

    fn runtime(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            message: message.into(),
        }
    }

    fn missing_token() -> Self {
        AppError::user(format!("missing github access token\n{MISSING_TOKEN_GUIDANCE}"))
    }

    fn from_git(error: GitConfigError) -> Self {
        AppError::user(error.to_string())
    }

    fn from_github_api(error: GithubApiError) -> Self {
        match error {
            GithubApiError::Http { status, message } => {
                AppError::runtime(format!("github search error ({status}): {message}"))
            }
            GithubApiError::Transport { .. } => AppError::runtime("github search request failed"),
            GithubApiError::InvalidResponse(_) => {
                AppError::runtime("invalid github search response")
            }
            GithubApiError::MalformedRepositoryUrl(url) => {
                AppError::runtime(format!("unexpected repository url: {url}"))
            }
        }
    }

    fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::User => 2,
            ErrorKind::Runtime => 1,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("error: {}", error.message);
            std::process::exit(error.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<String, AppError> {
    let config = RuntimeConfig::from_env();
    let store = FileCredentialStore::new(config.token_file());

    run_with(
        cli,
        &config,
        &store,
        git::github_username,
        github_api::search_pull_requests,
        Local::now,
    )
}

fn run_with<Store, LookupUser, Search, Now>(
    cli: Cli,
    config: &RuntimeConfig,
    store: &Store,
    lookup_username: LookupUser,
    search: Search,
    now: Now,
) -> Result<String, AppError>
where
    Store: CredentialStore,
    LookupUser: Fn() -> Result<String, GitConfigError>,
    Search: Fn(&str, &str) -> Result<SearchResults, GithubApiError>,
    Now: Fn() -> DateTime<Local>,
{
    let token = resolve_token(&cli, config, store)?;
    let username = lookup_username().map_err(AppError::from_git)?;

    let window = date_window::compute_window(now(), cli.week);
    let search_query = query::build_search_query(&username, cli.organization.as_deref(), &window);

    let results = search(&token, &search_query).map_err(AppError::from_github_api)?;
    let snippet = markdown::render_snippet(&results);

    let banner = banner(&window, cli.organization.as_deref());
    Ok(format!("{banner}\n{DIVIDER}\n{snippet}"))
}

/// Explicit `--token` wins and is persisted for later runs, then the
/// environment token, then the stored one. A missing token stops the
/// run before any username lookup or network call.
fn resolve_token<Store: CredentialStore>(
    cli: &Cli,
    config: &RuntimeConfig,
    store: &Store,
) -> Result<String, AppError> {
    let flag_token = cli
        .token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = flag_token {
        store
            .save(token)
            .map_err(|error| AppError::runtime(format!("failed to store access token: {error}")))?;
        return Ok(token.to_string());
    }

    if let Some(token) = &config.env_token {
        return Ok(token.clone());
    }

    match store.load() {
        Ok(Some(token)) => Ok(token),
        Ok(None) => Err(AppError::missing_token()),
        Err(error) => Err(AppError::runtime(format!(
            "failed to read stored access token: {error}"
        ))),
    }
}

fn banner(window: &DateWindow, organization: Option<&str>) -> String {
    let scope = organization
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("all repositories");

    format!(
        "{} ~ {} in {}",
        window.start_string(),
        window.end_string(),
        scope
    )
}
