use anyhow::Result;
use std::io::{self, Read, Seek};
use tracing::debug;

use crate::archive::{ArchiveMatch, scan_archive};
use crate::report::{Reporter, Warning};
use crate::sniff::{FileKind, sniff};
use crate::version::{ClassVersion, Detected, NamingScheme};

/// How a leaf was reached. Only inputs the user named get a warning when
/// they turn out not to be class files or jars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Named,
    Descended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Class(Option<Detected>),
    Archive(Option<ArchiveMatch>),
    Unrecognized,
}

impl Detection {
    pub fn kind(&self) -> FileKind {
        match self {
            Detection::Class(_) => FileKind::Class,
            Detection::Archive(_) => FileKind::Jar,
            Detection::Unrecognized => FileKind::Unknown,
        }
    }

    pub fn detected(&self) -> Option<&Detected> {
        match self {
            Detection::Class(detected) => detected.as_ref(),
            Detection::Archive(found) => found.as_ref().map(|m| &m.detected),
            Detection::Unrecognized => None,
        }
    }

    pub fn entry(&self) -> Option<&str> {
        match self {
            Detection::Archive(Some(found)) => Some(found.entry.as_str()),
            _ => None,
        }
    }
}

pub fn detect<R: Read + Seek>(reader: R, scheme: NamingScheme) -> Result<Detection> {
    let sniffed = sniff(reader)?;
    match sniffed.kind() {
        FileKind::Class => match ClassVersion::read_from(&mut sniffed.into_rest()) {
            Ok(version) => Ok(Detection::Class(version.describe(scheme))),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(Detection::Class(None)),
            Err(e) => Err(e.into()),
        },
        FileKind::Jar => Ok(Detection::Archive(scan_archive(sniffed.into_full(), scheme)?)),
        FileKind::Unknown => Ok(Detection::Unrecognized),
    }
}

/// Detects one stream and hands the outcome to `reporter`.
pub fn inspect<R: Read + Seek, P: Reporter + ?Sized>(
    name: &str,
    reader: R,
    origin: Origin,
    scheme: NamingScheme,
    reporter: &mut P,
) -> Result<()> {
    let detection = detect(reader, scheme)?;
    if detection == Detection::Unrecognized {
        if origin == Origin::Named {
            reporter.warn(&Warning::NotClassOrJar(name.to_string()))?;
        } else {
            debug!(name, "skipping unrecognized file");
        }
        return Ok(());
    }
    reporter.report(name, &detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Collected;
    use crate::test_support::{class_bytes, jar_bytes};
    use std::io::Cursor;

    #[test]
    fn detects_raw_class() {
        let detection = detect(Cursor::new(class_bytes(61, 0)), NamingScheme::Dotted).unwrap();
        assert_eq!(detection.kind(), FileKind::Class);
        assert_eq!(detection.detected().unwrap().to_string(), "Java 17 (61.0)");
        assert_eq!(detection.entry(), None);
    }

    #[test]
    fn truncated_or_ancient_class_is_undetermined() {
        let truncated = detect(Cursor::new(b"\xCA\xFE\xBA\xBE\x00\x00".to_vec()), NamingScheme::Dotted);
        assert_eq!(truncated.unwrap(), Detection::Class(None));

        let ancient = detect(Cursor::new(class_bytes(44, 0)), NamingScheme::Dotted);
        assert_eq!(ancient.unwrap(), Detection::Class(None));
    }

    #[test]
    fn detects_jar_through_replayed_magic() {
        let class = class_bytes(52, 0);
        let jar = jar_bytes(&[("p/A.class", &class)]);
        let detection = detect(Cursor::new(jar), NamingScheme::Dotted).unwrap();
        assert_eq!(detection.kind(), FileKind::Jar);
        assert_eq!(detection.entry(), Some("p/A.class"));
        assert_eq!(detection.detected().unwrap().to_string(), "Java 8 (52.0)");
    }

    #[test]
    fn unrecognized_warns_only_when_named() {
        let mut named = Collected::default();
        inspect(
            "notes.txt",
            Cursor::new(b"hello".to_vec()),
            Origin::Named,
            NamingScheme::Dotted,
            &mut named,
        )
        .unwrap();
        assert_eq!(named.warnings, vec!["'notes.txt' is not a .jar or .class"]);
        assert!(named.lines.is_empty());

        let mut descended = Collected::default();
        inspect(
            "notes.txt",
            Cursor::new(b"hello".to_vec()),
            Origin::Descended,
            NamingScheme::Dotted,
            &mut descended,
        )
        .unwrap();
        assert!(descended.warnings.is_empty());
        assert!(descended.lines.is_empty());
    }
}
