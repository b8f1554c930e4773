/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, DATABASE_URL, thread/pool sizing, PIDFILE など)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Test,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// What `/` serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootPage {
    Posts,
    Welcome,
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub worker_threads: usize,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub request_timeout: Duration,

    pub pidfile: PathBuf,
    pub root_page: RootPage,
    pub rich_text_editor: bool,
    pub abort_on_panic: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            None => 3000,
            Some(v) => v
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or(ConfigError::Invalid("PORT"))?,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let app_env = AppEnv::parse(lookup("APP_ENV").or_else(|| lookup("RAILS_ENV")));

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            let env = app_env.as_str();
            format!("sqlite://db/{env}/{env}.sqlite3")
        });
        if !database_url.starts_with("sqlite:") {
            return Err(ConfigError::Invalid("DATABASE_URL"));
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let db_max_connections = parse_count(&lookup, "RAILS_MAX_THREADS")?.unwrap_or(5);
        let db_min_connections =
            parse_count(&lookup, "RAILS_MIN_THREADS")?.unwrap_or(db_max_connections);
        if db_min_connections > db_max_connections {
            return Err(ConfigError::Invalid("RAILS_MIN_THREADS"));
        }

        let worker_threads = match parse_count(&lookup, "WEB_CONCURRENCY")? {
            Some(n) => n as usize,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        };

        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(match app_env {
                AppEnv::Development => Duration::from_secs(3600),
                _ => Duration::from_secs(30),
            });

        let pidfile = lookup("PIDFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("tmp/server.pid"));

        let root_page = match lookup("ROOT_PAGE").as_deref() {
            None | Some("posts") => RootPage::Posts,
            Some("welcome") => RootPage::Welcome,
            Some(_) => return Err(ConfigError::Invalid("ROOT_PAGE")),
        };

        let rich_text_editor = flag(&lookup, "RICH_TEXT_EDITOR");
        // Off unless asked for: a panicking request must not take the server down.
        let abort_on_panic = flag(&lookup, "ABORT_ON_PANIC");

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            worker_threads,
            db_max_connections,
            db_min_connections,
            request_timeout,
            pidfile,
            root_page,
            rich_text_editor,
            abort_on_panic,
        })
    }
}

fn flag<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    matches!(lookup(key).as_deref(), Some("1" | "true" | "yes"))
}

// Positive integer or absent; zero and garbage are rejected rather than defaulted.
fn parse_count<F>(lookup: &F, key: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(v) => match v.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ConfigError::Invalid(key)),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_follow_development_environment() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(
            config.database_url,
            "sqlite://db/development/development.sqlite3"
        );
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_min_connections, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(3600));
        assert_eq!(config.pidfile, PathBuf::from("tmp/server.pid"));
        assert_eq!(config.root_page, RootPage::Posts);
        assert!(!config.rich_text_editor);
        assert!(!config.abort_on_panic);
        assert!(config.worker_threads >= 1);
    }

    #[test]
    fn rails_env_is_accepted_as_environment_selector() {
        let config = config_from(&[("RAILS_ENV", "production")]).unwrap();

        assert!(config.app_env.is_production());
        assert_eq!(
            config.database_url,
            "sqlite://db/production/production.sqlite3"
        );
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn app_env_wins_over_rails_env() {
        let config = config_from(&[("APP_ENV", "test"), ("RAILS_ENV", "production")]).unwrap();

        assert_eq!(config.app_env, AppEnv::Test);
    }

    #[test]
    fn thread_settings_size_pool_and_runtime() {
        let config = config_from(&[
            ("RAILS_MAX_THREADS", "8"),
            ("RAILS_MIN_THREADS", "2"),
            ("WEB_CONCURRENCY", "3"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(config.db_max_connections, 8);
        assert_eq!(config.db_min_connections, 2);
        assert_eq!(config.worker_threads, 3);
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn min_threads_above_max_is_rejected() {
        let err = config_from(&[("RAILS_MAX_THREADS", "2"), ("RAILS_MIN_THREADS", "4")])
            .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid("RAILS_MIN_THREADS")));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let err = config_from(&[("WEB_CONCURRENCY", "0")]).unwrap_err();

        assert_eq!(err.to_string(), "invalid configuration: WEB_CONCURRENCY");
    }

    #[test]
    fn non_sqlite_database_url_is_rejected() {
        let err = config_from(&[("DATABASE_URL", "postgres://localhost/blog")]).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid("DATABASE_URL")));
    }

    #[test]
    fn welcome_root_and_rich_text_toggle() {
        let config =
            config_from(&[("ROOT_PAGE", "welcome"), ("RICH_TEXT_EDITOR", "true")]).unwrap();

        assert_eq!(config.root_page, RootPage::Welcome);
        assert!(config.rich_text_editor);

        assert!(config_from(&[("ROOT_PAGE", "admin")]).is_err());
    }

    #[test]
    fn port_must_be_a_valid_port_number() {
        for bad in ["abc", "0", "70000", ""] {
            let err = config_from(&[("PORT", bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid("PORT")), "PORT={bad:?}");
        }
    }

    #[test]
    fn abort_on_panic_is_opt_in() {
        assert!(config_from(&[("ABORT_ON_PANIC", "1")]).unwrap().abort_on_panic);
        assert!(!config_from(&[("APP_ENV", "development")]).unwrap().abort_on_panic);
    }
}
