//! # class-version
//!
//! Reports which Java release compiled a class file, either directly or
//! inside a jar, for local files, directory trees, URLs and Maven coordinates.
//!
//! ## Architecture
//!
//! - **sniff**: Magic-number classification with a replaying reader
//! - **version**: Class header reading and the major/minor to release table
//! - **archive**: First-match scan of jar entries
//! - **detect**: Per-stream dispatch between class files and jars
//! - **walk**: Recursive source tree walking with display-name roots
//! - **coordinate**: Maven coordinate grammar and repository URLs
//! - **fetch**: Remote downloads through curl
//! - **dispatch**: Command-line argument classification
//! - **report**: Text and JSON output
//! - **config**: Flag, environment and default resolution

pub mod archive;
pub mod cli;
pub mod config;
pub mod coordinate;
pub mod detect;
pub mod dispatch;
pub mod fetch;
pub mod report;
pub mod sniff;
pub mod version;
pub mod walk;

#[cfg(test)]
mod test_support;
