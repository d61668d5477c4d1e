use serde::Serialize;
use std::fmt;
use std::io::{self, Read};

/// Where the plain `N` naming starts.
///
/// `Dotted` keeps the `1.5`..`1.7` names for majors 49-51, `Plain` names them
/// `5`..`7`. Both agree everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingScheme {
    #[default]
    Dotted,
    Plain,
}

impl NamingScheme {
    fn plain_from(self) -> u16 {
        match self {
            NamingScheme::Dotted => 52,
            NamingScheme::Plain => 49,
        }
    }
}

/// The two version fields that follow `CAFEBABE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassVersion {
    pub major: u16,
    pub minor: u16,
}

impl ClassVersion {
    pub fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Reads minor then major, big-endian, from a stream positioned right
    /// after the magic number. Consumes exactly four bytes.
    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(Self {
            minor: u16::from_be_bytes([buf[0], buf[1]]),
            major: u16::from_be_bytes([buf[2], buf[3]]),
        })
    }

    pub fn java_version(self, scheme: NamingScheme) -> Option<String> {
        java_version(self.major, self.minor, scheme)
    }

    pub fn describe(self, scheme: NamingScheme) -> Option<Detected> {
        let java = self.java_version(scheme)?;
        Some(Detected {
            version: self,
            java,
        })
    }
}

pub fn java_version(major: u16, minor: u16, scheme: NamingScheme) -> Option<String> {
    let major = u32::from(major);
    if major >= u32::from(scheme.plain_from()) {
        return Some((major - 49 + 5).to_string());
    }
    if major >= 46 {
        return Some(format!("1.{}", major - 46 + 2));
    }
    if major == 45 {
        let name = match minor {
            3 => "1.1",
            0 => "1.0",
            _ => "1.x",
        };
        return Some(name.to_string());
    }
    None
}

/// A class version the table could name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detected {
    pub version: ClassVersion,
    pub java: String,
}

impl fmt::Display for Detected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Java {} ({}.{})",
            self.java, self.version.major, self.version.minor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn label(major: u16, minor: u16) -> Option<String> {
        ClassVersion::new(major, minor)
            .describe(NamingScheme::Dotted)
            .map(|d| d.to_string())
    }

    #[test]
    fn version_table_exact_cases() {
        assert_eq!(label(45, 0).as_deref(), Some("Java 1.0 (45.0)"));
        assert_eq!(label(45, 3).as_deref(), Some("Java 1.1 (45.3)"));
        assert_eq!(label(45, 7).as_deref(), Some("Java 1.x (45.7)"));
        assert_eq!(label(46, 0).as_deref(), Some("Java 1.2 (46.0)"));
        assert_eq!(label(52, 0).as_deref(), Some("Java 8 (52.0)"));
        assert_eq!(label(61, 0).as_deref(), Some("Java 17 (61.0)"));
        assert_eq!(label(44, 0), None);
        assert_eq!(label(0, 0), None);
    }

    #[test]
    fn dotted_names_cover_majors_below_52() {
        assert_eq!(label(49, 0).as_deref(), Some("Java 1.5 (49.0)"));
        assert_eq!(label(50, 0).as_deref(), Some("Java 1.6 (50.0)"));
        assert_eq!(label(51, 0).as_deref(), Some("Java 1.7 (51.0)"));
        assert_eq!(label(65, 65535).as_deref(), Some("Java 21 (65.65535)"));
    }

    #[test]
    fn plain_scheme_starts_at_major_49() {
        let name = |major| java_version(major, 0, NamingScheme::Plain);
        assert_eq!(name(48).as_deref(), Some("1.4"));
        assert_eq!(name(49).as_deref(), Some("5"));
        assert_eq!(name(51).as_deref(), Some("7"));
        assert_eq!(name(52).as_deref(), Some("8"));
        assert_eq!(java_version(45, 3, NamingScheme::Plain).as_deref(), Some("1.1"));
    }

    #[test]
    fn header_is_minor_then_major() {
        let mut cursor = Cursor::new([0x00, 0x03, 0x00, 0x34, 0xFF, 0xFF]);
        let version = ClassVersion::read_from(&mut cursor).unwrap();
        assert_eq!(version, ClassVersion::new(52, 3));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn truncated_header_is_unexpected_eof() {
        let mut cursor = Cursor::new([0x00, 0x00, 0x00]);
        let err = ClassVersion::read_from(&mut cursor).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
