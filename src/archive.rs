use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Read, Seek};
use tracing::{debug, trace};
use zip::ZipArchive;

use crate::sniff::{FileKind, sniff};
use crate::version::{ClassVersion, Detected, NamingScheme};

/// The entry that decided an archive's version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveMatch {
    pub entry: String,
    pub detected: Detected,
}

/// Returns the version of the first class entry, in central-directory order,
/// whose header the version table can name. Later entries are never opened.
pub fn scan_archive<R: Read + Seek>(reader: R, scheme: NamingScheme) -> Result<Option<ArchiveMatch>> {
    let mut archive = ZipArchive::new(reader).context("Failed to read zip structure")?;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("Failed to open zip entry #{index}"))?;
        if !is_class_candidate(entry.name(), entry.is_dir()) {
            trace!(entry = entry.name(), "skipping entry");
            continue;
        }

        let name = entry.name().to_string();
        let probed =
            probe_entry(&mut entry, scheme).with_context(|| format!("Failed to read zip entry: {name}"))?;
        match probed {
            Some(detected) => {
                debug!(entry = %name, version = %detected, "archive version decided");
                return Ok(Some(ArchiveMatch {
                    entry: name,
                    detected,
                }));
            }
            None => debug!(entry = %name, "no usable class header, continuing"),
        }
    }

    Ok(None)
}

/// Name filter applied before any entry content is read.
pub fn is_class_candidate(name: &str, is_dir: bool) -> bool {
    if is_dir {
        return false;
    }
    let name = name.to_lowercase();
    !name.starts_with("meta-inf") && name.ends_with(".class") && !name.ends_with("-info.class")
}

fn probe_entry<R: Read>(entry: R, scheme: NamingScheme) -> io::Result<Option<Detected>> {
    let sniffed = sniff(entry)?;
    if sniffed.kind() != FileKind::Class {
        return Ok(None);
    }
    match ClassVersion::read_from(&mut sniffed.into_rest()) {
        Ok(version) => Ok(version.describe(scheme)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}
