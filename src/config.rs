use std::env;

use crate::cli::{Cli, Naming, OutputFormat};
use crate::version::NamingScheme;

pub const DEFAULT_REPOSITORY: &str = "https://repo1.maven.org/maven2";
pub const REPOSITORY_ENV: &str = "CLASS_VERSION_REPO";
pub const CURL_ENV: &str = "CLASS_VERSION_CURL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repository: String,
    pub curl: String,
    pub naming: NamingScheme,
    pub format: OutputFormat,
}

impl Config {
    pub fn resolve(cli: &Cli) -> Self {
        Self {
            repository: resolve_repository(cli.repo.as_deref(), env::var(REPOSITORY_ENV).ok()),
            curl: resolve_curl(env::var(CURL_ENV).ok()),
            naming: match cli.naming {
                Naming::Dotted => NamingScheme::Dotted,
                Naming::Plain => NamingScheme::Plain,
            },
            format: cli.format,
        }
    }
}

/// Flag, then environment, then Maven Central.
pub fn resolve_repository(flag: Option<&str>, from_env: Option<String>) -> String {
    let repo = flag
        .map(str::to_string)
        .or(from_env)
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REPOSITORY.to_string());
    repo.trim().trim_end_matches('/').to_string()
}

pub fn resolve_curl(from_env: Option<String>) -> String {
    from_env
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| "curl".to_string())
}
