use anyhow::{Context, Result, bail};
use std::io::{Read, Seek};
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::debug;

pub trait Fetch {
    type Body: Read + Seek;

    fn fetch(&self, url: &str) -> Result<Self::Body>;
}

/// Downloads with an external `curl`, spooling the body to a temporary file
/// that is removed when the returned handle is dropped.
#[derive(Debug, Clone)]
pub struct Curl {
    program: String,
}

impl Curl {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Fetch for Curl {
    type Body = NamedTempFile;

    fn fetch(&self, url: &str) -> Result<NamedTempFile> {
        let spool = NamedTempFile::new().context("Failed to create download spool file")?;
        let spool_path = spool
            .path()
            .to_str()
            .context("spool file path is not valid UTF-8")?;

        debug!(url, program = %self.program, "fetching");
        let status = Command::new(&self.program)
            .args([
                "-L",
                "--fail",
                "--silent",
                "--show-error",
                "-o",
                spool_path,
                url,
            ])
            .status()
            .with_context(|| {
                format!(
                    "Failed to execute {} (ensure curl is installed, or set CLASS_VERSION_CURL)",
                    self.program
                )
            })?;

        if !status.success() {
            bail!("Failed to download {url} ({status})");
        }

        Ok(spool)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_script(path: &Path, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        fs::write(path, body).unwrap();
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }

    #[test]
    fn spools_body_from_fake_curl() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("curl");
        write_script(
            &fake,
            r#"#!/bin/sh
# args: -L --fail --silent --show-error -o <file> <url>
printf '%s' "$7" > "$6"
"#,
        );

        let curl = Curl::new(fake.to_str().unwrap());
        let mut body = curl.fetch("https://example.org/x.jar").unwrap();
        let mut text = String::new();
        body.read_to_string(&mut text).unwrap();
        assert_eq!(text, "https://example.org/x.jar");
    }

    #[test]
    fn failed_download_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("curl");
        write_script(
            &fake,
            "#!/bin/sh\necho 'curl: (22) The requested URL returned error: 404' >&2\nexit 22\n",
        );

        let err = Curl::new(fake.to_str().unwrap())
            .fetch("https://example.org/missing.jar")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to download https://example.org/missing.jar"));
    }
}
