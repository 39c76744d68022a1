//! The file a user picked or dropped onto the upload form.
//!
//! Files opened from disk are described by their metadata only. The bytes
//! are read when a decoder or the upload asks for them, which only happens
//! once validation accepted the file.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

#[derive(Clone, PartialEq, Eq)]
enum Content {
    Memory(Arc<[u8]>),
    Disk(PathBuf),
}

/// A file offered for upload, described by MIME type and size.
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    mime_type: String,
    size_bytes: u64,
    content: Content,
}

impl CandidateFile {
    /// Creates a candidate whose size is the length of `content`.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: content.len() as u64,
            content: Content::Memory(content),
        }
    }

    /// Creates a candidate with a size reported by the source.
    ///
    /// Browsers and file systems report the size separately from the payload,
    /// and validation trusts the reported value.
    pub fn from_parts(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            content: Content::Memory(content.into()),
        }
    }

    /// Describes a file on disk without reading it. The MIME type is guessed
    /// from the extension and the size comes from the file's metadata.
    ///
    /// Files without a recognised extension get an empty MIME type, which
    /// validation rejects as an invalid type.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let size_bytes = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::debug!(
            target: "leafcheck_business::candidate",
            "opened {} ({} bytes) at {:?}",
            name,
            size_bytes,
            path
        );

        Ok(Self {
            name,
            mime_type: guess_mime_type(path),
            size_bytes,
            content: Content::Disk(path.to_path_buf()),
        })
    }

    /// Creates a candidate from in-memory bytes and the MIME type a browser
    /// reported, which may be empty. An empty type is guessed from `name`.
    pub fn from_bytes(
        name: impl Into<String>,
        reported_mime_type: &str,
        content: impl Into<Arc<[u8]>>,
    ) -> Self {
        let name = name.into();
        let mime_type = if reported_mime_type.is_empty() {
            guess_mime_type(Path::new(&name))
        } else {
            reported_mime_type.to_owned()
        };
        Self::new(name, mime_type, content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// The payload, read from disk on every call for path-backed files.
    pub fn load(&self) -> std::io::Result<Arc<[u8]>> {
        match &self.content {
            Content::Memory(bytes) => Ok(Arc::clone(bytes)),
            Content::Disk(path) => {
                log::debug!(
                    target: "leafcheck_business::candidate",
                    "reading {} from {:?}",
                    self.name,
                    path
                );
                Ok(Arc::from(std::fs::read(path)?))
            }
        }
    }
}

impl fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Guesses a MIME type from a path's extension, empty when unknown.
pub(crate) fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_owned())
        .unwrap_or_default()
}
