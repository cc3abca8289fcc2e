// Command-line and environment configuration.
// Shared GitHub settings plus proxy-server and viewer options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Portfolio backend and terminal viewer for one GitHub user.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub github: GitHubArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the cached repository proxy.
    Serve(ServeArgs),
    /// Browse projects and recent activity (default).
    View(ViewArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GitHubArgs {
    /// GitHub user whose repositories and activity are shown.
    #[arg(long, short, env = "FOLIO_USERNAME", global = true, default_value = "octocat")]
    pub username: String,

    /// Optional token forwarded to GitHub for a higher rate limit.
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API base URL.
    #[arg(long, env = "FOLIO_API_BASE", global = true, default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "FOLIO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, short, env = "FOLIO_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Disable permissive CORS headers.
    #[arg(long)]
    pub no_cors: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Directory for the local response cache.
    #[arg(long, env = "FOLIO_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// GitHub access settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub token: Option<String>,
    pub api_base: String,
}

impl Config {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: None,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API host (mock servers, GHES).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

impl From<GitHubArgs> for Config {
    fn from(args: GitHubArgs) -> Self {
        Self {
            username: args.username,
            token: args.token.filter(|t| !t.is_empty()),
            api_base: args.api_base.trim_end_matches('/').to_string(),
        }
    }
}

/// Proxy server settings.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    /// How long a fetched repository list is served before refetching.
    pub cache_ttl: Duration,
}

/// One hour, for the life of the process.
pub const PROXY_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: true,
            cache_ttl: PROXY_CACHE_TTL,
        }
    }
}

impl From<ServeArgs> for ServeConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            enable_cors: !args.no_cors,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_view() {
        let cli = Cli::try_parse_from(["folio", "--username", "alice"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.github.username, "alice");
    }

    #[test]
    fn test_serve_args() {
        let cli =
            Cli::try_parse_from(["folio", "serve", "--port", "9000", "--no-cors", "-u", "bob"])
                .unwrap();
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve command");
        };
        let config = ServeConfig::from(args);
        assert_eq!(config.port, 9000);
        assert!(!config.enable_cors);
        assert_eq!(config.cache_ttl, PROXY_CACHE_TTL);
        assert_eq!(cli.github.username, "bob");
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let args = GitHubArgs {
            username: "alice".to_string(),
            token: Some(String::new()),
            api_base: "http://localhost:1234/".to_string(),
        };
        let config = Config::from(args);
        assert!(config.token.is_none());
        assert_eq!(config.api_base, "http://localhost:1234");
    }
}
