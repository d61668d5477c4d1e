//! Maven coordinates and the grammars used to recognise command-line inputs.

use regex::Regex;
use std::fmt;

pub const DEFAULT_WRAPPER_PATTERN: &str = r#"^['"]?\w+['"]?\s*\(\s*['"]?(.*?)['"]?\s*\)$"#;
pub const DEFAULT_COORDINATE_PATTERN: &str = r"^([\w.]+):([\w.]+):([\w.]+)(?::([\w.]+))?$";
pub const DEFAULT_URL_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]+:";

/// Input grammars, built once and passed to whatever classifies arguments.
///
/// - `wrapper` must capture the inner text of a build-script call such as
///   `implementation("g:a:v")` in group 1.
/// - `coordinate` must capture group, artifact, version and the optional
///   classifier in groups 1 to 4.
/// - `url` matches arguments that carry a URI scheme.
#[derive(Debug, Clone)]
pub struct InputPatterns {
    pub wrapper: Regex,
    pub coordinate: Regex,
    pub url: Regex,
}

impl InputPatterns {
    pub fn new(wrapper: &str, coordinate: &str, url: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            wrapper: Regex::new(wrapper)?,
            coordinate: Regex::new(coordinate)?,
            url: Regex::new(url)?,
        })
    }

    pub fn parse_coordinate(&self, arg: &str) -> Option<Coordinate> {
        let arg = arg.trim();
        let inner = match self.wrapper.captures(arg) {
            Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
            None => arg,
        };

        let caps = self.coordinate.captures(inner)?;
        Some(Coordinate {
            group: caps[1].to_string(),
            artifact: caps[2].to_string(),
            version: caps[3].to_string(),
            classifier: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    pub fn is_url(&self, arg: &str) -> bool {
        self.url.is_match(arg)
    }
}

impl Default for InputPatterns {
    fn default() -> Self {
        Self::new(DEFAULT_WRAPPER_PATTERN, DEFAULT_COORDINATE_PATTERN, DEFAULT_URL_PATTERN)
            .expect("built-in input patterns are valid")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub classifier: Option<String>,
}

impl Coordinate {
    /// `{base}/{group as path}/{artifact}/{version}/{artifact}-{version}[-{classifier}].jar`
    pub fn to_url(&self, base: &str) -> String {
        let classifier = self
            .classifier
            .as_deref()
            .map(|c| format!("-{c}"))
            .unwrap_or_default();
        format!(
            "{}/{}/{}/{}/{}-{}{}.jar",
            base.trim_end_matches('/'),
            self.group.replace('.', "/"),
            self.artifact,
            self.version,
            self.artifact,
            self.version,
            classifier
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}
