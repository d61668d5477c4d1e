use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::coordinate::{Coordinate, InputPatterns};
use crate::detect::{Origin, inspect};
use crate::fetch::Fetch;
use crate::report::{Reporter, Warning};
use crate::walk::{SourceTree, Walker};

/// What a command-line argument turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Coordinate(Coordinate),
    Url(String),
    Path(PathBuf),
    Unknown,
}

/// Coordinates win over URLs, URLs over paths; a path must exist.
pub fn classify(arg: &str, patterns: &InputPatterns, exists: impl Fn(&Path) -> bool) -> Input {
    if let Some(coordinate) = patterns.parse_coordinate(arg) {
        return Input::Coordinate(coordinate);
    }
    if patterns.is_url(arg) {
        return Input::Url(arg.to_string());
    }
    let path = PathBuf::from(arg);
    if exists(&path) {
        return Input::Path(path);
    }
    Input::Unknown
}

pub struct Dispatcher<'a, T, F, P: ?Sized> {
    config: &'a Config,
    patterns: &'a InputPatterns,
    tree: &'a T,
    fetcher: &'a F,
    reporter: &'a mut P,
}

impl<'a, T: SourceTree, F: Fetch, P: Reporter + ?Sized> Dispatcher<'a, T, F, P> {
    pub fn new(
        config: &'a Config,
        patterns: &'a InputPatterns,
        tree: &'a T,
        fetcher: &'a F,
        reporter: &'a mut P,
    ) -> Self {
        Self {
            config,
            patterns,
            tree,
            fetcher,
            reporter,
        }
    }

    /// Processes one argument to completion.
    pub fn run(&mut self, arg: &str) -> Result<()> {
        let tree = self.tree;
        let input = classify(arg, self.patterns, |p| tree.exists(p));
        debug!(arg, ?input, "classified input");

        match input {
            Input::Coordinate(coordinate) => {
                let url = coordinate.to_url(&self.config.repository);
                info!(%coordinate, %url, "resolved dependency");
                self.remote(&coordinate.to_string(), &url)
            }
            Input::Url(url) => self.remote(arg, &url),
            Input::Path(path) => {
                Walker::new(self.tree, &mut *self.reporter, self.config.naming).run(&path)
            }
            Input::Unknown => self.reporter.warn(&Warning::UnknownInput(arg.to_string())),
        }
    }

    fn remote(&mut self, name: &str, url: &str) -> Result<()> {
        let body = self.fetcher.fetch(url)?;
        inspect(name, body, Origin::Named, self.config.naming, &mut *self.reporter)
            .with_context(|| format!("Failed to inspect download: {url}"))
    }
}
