//! Locating the files named by `\include` and `\input`.
//!
//! A resolver answers "what does this argument refer to" for the builder. Failure is always
//! `None`: a missing chapter file simply contributes no headings.

use crate::source::{Buffer, SourceId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maps an inclusion argument to the text source it names.
pub trait Resolver {
    /// Opens the source `target` refers to, as seen from the source `requesting`.
    fn resolve(&self, target: &str, requesting: &SourceId) -> Option<Buffer>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve(&self, target: &str, requesting: &SourceId) -> Option<Buffer> {
        (**self).resolve(target, requesting)
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Resolver that never finds anything, for outlines of a single file.
pub struct NoInclusions;

impl Resolver for NoInclusions {
    fn resolve(&self, _target: &str, _requesting: &SourceId) -> Option<Buffer> {
        None
    }
}

/// Candidate spellings of `target`, trying configured extensions first when it has none.
fn candidates(target: &str, extensions: &[String]) -> Vec<String> {
    let suffixed = extensions.iter().map(|ext| format!("{target}.{ext}"));
    if Path::new(target).extension().is_some() {
        std::iter::once(target.to_string()).chain(suffixed).collect()
    } else {
        suffixed.chain(std::iter::once(target.to_string())).collect()
    }
}

#[derive(Clone, Debug)]
/// Resolves targets against the filesystem the way TeX does.
///
/// Paths are looked up relative to the root document's directory first, then relative to the
/// directory of the file containing the command.
pub struct FsResolver {
    root_dir: PathBuf,
    extensions: Vec<String>,
}

impl FsResolver {
    #[must_use]
    /// Resolver for a document whose root file lives in `root_dir`.
    pub fn new(root_dir: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            extensions,
        }
    }

    #[must_use]
    /// Resolver for the document rooted at the file `root`.
    pub fn for_root(root: &Path, extensions: Vec<String>) -> Self {
        let root_dir = root
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self::new(root_dir, extensions)
    }
}

impl Resolver for FsResolver {
    fn resolve(&self, target: &str, requesting: &SourceId) -> Option<Buffer> {
        let target = target.trim();
        if target.is_empty() {
            return None;
        }
        let requesting_dir = requesting.as_path().parent();
        let bases = std::iter::once(self.root_dir.as_path()).chain(requesting_dir);
        bases
            .flat_map(|base| {
                candidates(target, &self.extensions)
                    .into_iter()
                    .map(move |name| base.join(name))
            })
            .find(|path| path.is_file())
            .and_then(|path| Buffer::open(&path).ok())
    }
}

#[derive(Clone, Debug, Default)]
/// Named in-memory documents, looked up by exact name then with each extension appended.
pub struct MemoryResolver {
    documents: HashMap<String, String>,
    extensions: Vec<String>,
}

impl MemoryResolver {
    #[must_use]
    /// Empty resolver trying `.tex` for extensionless names.
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            extensions: vec!["tex".to_string()],
        }
    }

    #[must_use]
    /// Adds a document under `name`.
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.insert(name.into(), text.into());
        self
    }

    /// Adds or replaces a document under `name`.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.documents.insert(name.into(), text.into());
    }
}

impl Resolver for MemoryResolver {
    fn resolve(&self, target: &str, _requesting: &SourceId) -> Option<Buffer> {
        let target = target.trim();
        candidates(target, &self.extensions)
            .into_iter()
            .find_map(|name| {
                let text = self.documents.get(&name)?;
                Some(Buffer::new(SourceId::new(name), text.clone()))
            })
    }
}

#[cfg(test)]
#[path = "tests/resolve.rs"]
mod tests;
