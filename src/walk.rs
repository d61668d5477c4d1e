use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use crate::detect::{Origin, inspect};
use crate::report::Reporter;
use crate::version::NamingScheme;

/// What the walker needs from a tree of sources.
pub trait SourceTree {
    type Reader: Read + Seek;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Direct children, in listing order.
    fn children(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn open(&self, path: &Path) -> io::Result<Self::Reader>;
}

/// The local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTree;

impl SourceTree for FsTree {
    type Reader = File;

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn children(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .follow_links(true)
            .max_depth(Some(1))
            .build();

        let mut children = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                e.into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed"))
            })?;
            if entry.depth() == 0 {
                continue;
            }
            children.push(entry.into_path());
        }
        Ok(children)
    }

    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}

pub struct Walker<'a, T, P: ?Sized> {
    tree: &'a T,
    reporter: &'a mut P,
    scheme: NamingScheme,
}

impl<'a, T: SourceTree, P: Reporter + ?Sized> Walker<'a, T, P> {
    pub fn new(tree: &'a T, reporter: &'a mut P, scheme: NamingScheme) -> Self {
        Self {
            tree,
            reporter,
            scheme,
        }
    }

    /// Walks a path the user named.
    pub fn run(&mut self, path: &Path) -> Result<()> {
        self.walk(path, None, Origin::Named)
    }

    /// Directories recurse with `root` fixed at the first directory seen;
    /// files are named relative to it.
    pub fn walk<'p>(&mut self, path: &'p Path, root: Option<&'p Path>, origin: Origin) -> Result<()> {
        if self.tree.is_dir(path) {
            let root = root.unwrap_or(path);
            let children = self
                .tree
                .children(path)
                .with_context(|| format!("Failed to list directory: {}", path.display()))?;
            for child in &children {
                self.walk(child, Some(root), Origin::Descended)?;
            }
            return Ok(());
        }

        let name = display_name(path, root);
        let reader = self
            .tree
            .open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        inspect(&name, reader, origin, self.scheme, &mut *self.reporter)
            .with_context(|| format!("Failed to inspect: {}", path.display()))
    }
}

pub fn display_name(path: &Path, root: Option<&Path>) -> String {
    root.and_then(|r| path.strip_prefix(r).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}
