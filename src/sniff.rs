//! Magic-number sniffing.
//!
//! [`sniff`] reads at most four bytes from a stream, classifies them, and
//! hands back a [`Sniffed`] value that still owns the stream. Nothing read
//! during sniffing is lost: [`Sniffed::into_full`] replays the peeked bytes
//! in front of the untouched remainder, while [`Sniffed::into_rest`] gives
//! direct access to the bytes after the magic number.

use serde::Serialize;
use std::io::{self, Read, Seek, SeekFrom};

pub const MAGIC_LEN: usize = 4;

pub const CLASS_MAGIC: u32 = 0xCAFE_BABE;
pub const JAR_MAGIC: u32 = 0x504B_0304;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Class,
    Jar,
    Unknown,
}

impl FileKind {
    pub fn from_magic(magic: u32) -> Self {
        match magic {
            CLASS_MAGIC => FileKind::Class,
            JAR_MAGIC => FileKind::Jar,
            _ => FileKind::Unknown,
        }
    }

    /// Classifies a stream prefix. Anything shorter than the magic number is `Unknown`.
    pub fn from_prefix(prefix: &[u8]) -> Self {
        match prefix.first_chunk::<MAGIC_LEN>() {
            Some(magic) => Self::from_magic(u32::from_be_bytes(*magic)),
            None => FileKind::Unknown,
        }
    }
}

#[derive(Debug)]
pub struct Sniffed<R> {
    kind: FileKind,
    head: [u8; MAGIC_LEN],
    filled: usize,
    inner: R,
}

impl<R> Sniffed<R> {
    pub fn kind(&self) -> FileKind {
        self.kind
    }

    /// The bytes consumed while sniffing; shorter than four only at end of stream.
    pub fn head(&self) -> &[u8] {
        &self.head[..self.filled]
    }

    /// The whole original content: peeked bytes first, then the rest of the stream.
    pub fn into_full(self) -> ReplayReader<R> {
        ReplayReader {
            head: self.head,
            filled: self.filled,
            pos: 0,
            inner: self.inner,
        }
    }

    /// The stream positioned right after the peeked bytes.
    pub fn into_rest(self) -> R {
        self.inner
    }
}

pub fn sniff<R: Read>(mut reader: R) -> io::Result<Sniffed<R>> {
    let mut head = [0u8; MAGIC_LEN];
    let filled = read_up_to(&mut reader, &mut head)?;
    let kind = FileKind::from_prefix(&head[..filled]);
    Ok(Sniffed {
        kind,
        head,
        filled,
        inner: reader,
    })
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Replays the sniffed prefix, then continues with the underlying reader.
///
/// `pos` is the logical position within the replayed content. While it is
/// inside the prefix the underlying reader sits just past the prefix; after
/// that both positions advance together. Seeking relies on that relation, so
/// positions reported by [`Seek`] start at zero where sniffing began, not at
/// the underlying reader's origin.
#[derive(Debug)]
pub struct ReplayReader<R> {
    head: [u8; MAGIC_LEN],
    filled: usize,
    pos: u64,
    inner: R,
}

impl<R> ReplayReader<R> {
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn filled(&self) -> u64 {
        self.filled as u64
    }
}

impl<R: Read> Read for ReplayReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos < self.filled() {
            let start = self.pos as usize;
            let n = (self.filled - start).min(buf.len());
            buf[..n].copy_from_slice(&self.head[start..start + n]);
            self.pos += n as u64;
            return Ok(n);
        }

        let n = self.inner.read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: Seek> Seek for ReplayReader<R> {
    fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        let filled = self.filled();
        let origin = self
            .inner
            .stream_position()?
            .checked_sub(self.pos.max(filled))
            .ok_or_else(|| io::Error::other("underlying reader moved behind the replayed prefix"))?;

        let logical = match target {
            SeekFrom::Start(n) => n,
            SeekFrom::Current(delta) => offset(self.pos, delta)?,
            SeekFrom::End(delta) => {
                let end = self.inner.seek(SeekFrom::End(0))?.saturating_sub(origin);
                offset(end, delta)?
            }
        };

        self.inner.seek(SeekFrom::Start(origin + logical.max(filled)))?;
        self.pos = logical;
        Ok(logical)
    }
}

fn offset(base: u64, delta: i64) -> io::Result<u64> {
    base.checked_add_signed(delta).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "invalid seek to a negative or overflowing position",
        )
    })
}
