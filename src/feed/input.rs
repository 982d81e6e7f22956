use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use url::Url;

use super::NormalizeError;

/// Where a feed document comes from.
///
/// A location string is resolved to a file handle when the document is
/// opened; a reader is passed through untouched. Either way the handle lives
/// only as long as the normalization call that opened it.
pub enum FeedSource<'a> {
    /// Filesystem path or `file://` URL.
    Location(String),
    /// Any already-open stream.
    Reader(Box<dyn Read + 'a>),
}

impl<'a> FeedSource<'a> {
    pub fn reader(reader: impl Read + 'a) -> Self {
        FeedSource::Reader(Box::new(reader))
    }

    /// Label used in logs and errors.
    pub fn describe(&self) -> &str {
        match self {
            FeedSource::Location(location) => location.as_str(),
            FeedSource::Reader(_) => "<stream>",
        }
    }

    /// Resolves the source into a readable handle.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::SourceUnreadable`] if the location cannot be
    /// opened or names a remote (non-`file`) URL.
    pub(crate) fn open(self) -> Result<Box<dyn Read + 'a>, NormalizeError> {
        match self {
            FeedSource::Reader(reader) => Ok(reader),
            FeedSource::Location(location) => {
                let path = resolve_path(&location).map_err(|source| {
                    NormalizeError::SourceUnreadable {
                        location: location.clone(),
                        source,
                    }
                })?;
                let file = File::open(&path)
                    .map_err(|source| NormalizeError::SourceUnreadable { location, source })?;
                tracing::debug!(path = %path.display(), "Opened feed document");
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl std::fmt::Debug for FeedSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FeedSource").field(&self.describe()).finish()
    }
}

impl From<&str> for FeedSource<'_> {
    fn from(location: &str) -> Self {
        FeedSource::Location(location.to_string())
    }
}

impl From<String> for FeedSource<'_> {
    fn from(location: String) -> Self {
        FeedSource::Location(location)
    }
}

impl<'a> From<&'a [u8]> for FeedSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        FeedSource::reader(bytes)
    }
}

impl From<File> for FeedSource<'_> {
    fn from(file: File) -> Self {
        FeedSource::reader(BufReader::new(file))
    }
}

/// Maps a location string to a filesystem path.
///
/// Single-letter schemes are Windows drive letters, not URLs.
fn resolve_path(location: &str) -> io::Result<PathBuf> {
    match Url::parse(location) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().map_err(|()| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid file URL: {location}"),
            )
        }),
        Ok(url) if url.scheme().len() > 1 => Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!(
                "Unsupported scheme: {} (fetch remote feeds before normalizing)",
                url.scheme()
            ),
        )),
        _ => Ok(PathBuf::from(location)),
    }
}
