use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::io::Write;

use crate::cli::OutputFormat;
use crate::detect::Detection;
use crate::sniff::FileKind;

pub const UNKNOWN_VERSION: &str = "<unknown>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The argument is neither a coordinate, a URL nor an existing path.
    UnknownInput(String),
    /// A named file (or fetched body) is neither a class file nor a jar.
    NotClassOrJar(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownInput(arg) => write!(f, "'{arg}' is not a file, URL or dependency"),
            Warning::NotClassOrJar(name) => write!(f, "'{name}' is not a .jar or .class"),
        }
    }
}

pub trait Reporter {
    fn report(&mut self, name: &str, detection: &Detection) -> Result<()>;

    fn warn(&mut self, warning: &Warning) -> Result<()>;
}

pub fn text_line(name: &str, detection: &Detection) -> String {
    match detection.detected() {
        Some(detected) => format!("{name}: {detected}"),
        None => format!("{name}: {UNKNOWN_VERSION}"),
    }
}

#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    name: &'a str,
    kind: FileKind,
    version: Option<String>,
    java: Option<&'a str>,
    major: Option<u16>,
    minor: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<&'a str>,
}

impl<'a> JsonLine<'a> {
    fn new(name: &'a str, detection: &'a Detection) -> Self {
        let detected = detection.detected();
        Self {
            name,
            kind: detection.kind(),
            version: detected.map(|d| d.to_string()),
            java: detected.map(|d| d.java.as_str()),
            major: detected.map(|d| d.version.major),
            minor: detected.map(|d| d.version.minor),
            entry: detection.entry(),
        }
    }
}

/// Results to `out`, warnings to `err`.
pub struct ConsoleReporter<O, E> {
    format: OutputFormat,
    out: O,
    err: E,
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(format: OutputFormat, out: O, err: E) -> Self {
        Self { format, out, err }
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Reporter for ConsoleReporter<O, E> {
    fn report(&mut self, name: &str, detection: &Detection) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", text_line(name, detection))?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, &JsonLine::new(name, detection))?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn warn(&mut self, warning: &Warning) -> Result<()> {
        writeln!(self.err, "{warning}")?;
        Ok(())
    }
}

/// Keeps text lines and warnings in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Collected {
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
impl Reporter for Collected {
    fn report(&mut self, name: &str, detection: &Detection) -> Result<()> {
        self.lines.push(text_line(name, detection));
        Ok(())
    }

    fn warn(&mut self, warning: &Warning) -> Result<()> {
        self.warnings.push(warning.to_string());
        Ok(())
    }
}
