//! Input resolution: turning exactly one of a path, an open stream or a
//! literal string into a text buffer plus a last-modified candidate.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::RehydrateError;
use crate::timestamp::format_system_time;

/// A readable, seekable source of element JSON.
///
/// Implementors may report a modification time. Sources without reliable
/// modification metadata keep the default of `None`.
pub trait DocumentStream: Read + Seek {
    fn last_modified(&self) -> Option<SystemTime> {
        None
    }
}

impl DocumentStream for File {
    fn last_modified(&self) -> Option<SystemTime> {
        self.metadata().and_then(|m| m.modified()).ok()
    }
}

impl<R: DocumentStream> DocumentStream for BufReader<R> {
    fn last_modified(&self) -> Option<SystemTime> {
        self.get_ref().last_modified()
    }
}

impl<T: AsRef<[u8]>> DocumentStream for Cursor<T> {}

/// The caller-facing argument set: at most one field may be set.
#[derive(Default)]
pub struct JsonInput<'a> {
    pub path: Option<&'a Path>,
    pub stream: Option<&'a mut dyn DocumentStream>,
    pub text: Option<&'a str>,
}

impl<'a> JsonInput<'a> {
    pub fn path(path: &'a Path) -> Self {
        JsonInput {
            path: Some(path),
            ..Default::default()
        }
    }

    pub fn stream(stream: &'a mut dyn DocumentStream) -> Self {
        JsonInput {
            stream: Some(stream),
            ..Default::default()
        }
    }

    pub fn text(text: &'a str) -> Self {
        JsonInput {
            text: Some(text),
            ..Default::default()
        }
    }

    /// True when the only input is text made of nothing but whitespace.
    /// Such input rehydrates to an empty sequence without further checks.
    pub fn is_blank_text(&self) -> bool {
        self.path.is_none()
            && self.stream.is_none()
            && self.text.is_some_and(|t| t.trim().is_empty())
    }

    /// Check that exactly one input is set and return it.
    pub fn into_source(self) -> Result<JsonSource<'a>, RehydrateError> {
        match (self.path, self.stream, self.text) {
            (Some(path), None, None) => Ok(JsonSource::Path(path)),
            (None, Some(stream), None) => Ok(JsonSource::Stream(stream)),
            (None, None, Some(text)) => Ok(JsonSource::Text(text)),
            (path, stream, text) => {
                let given: Vec<&str> = [
                    path.map(|_| "path"),
                    stream.map(|_| "stream"),
                    text.map(|_| "text"),
                ]
                .into_iter()
                .flatten()
                .collect();
                let detail = if given.is_empty() {
                    "none was given".to_string()
                } else {
                    format!("got {}", given.join(", "))
                };
                Err(RehydrateError::InvalidArguments(detail))
            }
        }
    }
}

/// Exactly one resolved input.
pub enum JsonSource<'a> {
    Path(&'a Path),
    Stream(&'a mut dyn DocumentStream),
    Text(&'a str),
}

/// Where a [`RawDocument`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    Path(PathBuf),
    Stream,
    Text,
}

/// Text read from a single source, ready for the conformance gate.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub text: String,
    pub provenance: Provenance,
    /// Last-modified time derived from the source, if any.
    pub last_modified: Option<String>,
}

impl RawDocument {
    /// Read `source` into memory.
    ///
    /// A stream is read from its current position to the end and then put
    /// back at that position, so the caller can read it again.
    pub fn read(
        source: JsonSource<'_>,
        infer_timestamp_from_stream: bool,
    ) -> Result<RawDocument, RehydrateError> {
        match source {
            JsonSource::Path(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| RehydrateError::Io {
                    origin: format!("'{}'", path.display()),
                    source: e,
                })?;
                let last_modified = path_last_modified(path);
                Ok(RawDocument {
                    text,
                    provenance: Provenance::Path(path.to_path_buf()),
                    last_modified,
                })
            }
            JsonSource::Stream(stream) => {
                let text = read_stream(stream)?;
                let last_modified = if infer_timestamp_from_stream {
                    stream.last_modified().and_then(format_system_time)
                } else {
                    None
                };
                Ok(RawDocument {
                    text,
                    provenance: Provenance::Stream,
                    last_modified,
                })
            }
            JsonSource::Text(text) => Ok(RawDocument {
                text: text.to_string(),
                provenance: Provenance::Text,
                last_modified: None,
            }),
        }
    }
}

fn path_last_modified(path: &Path) -> Option<String> {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => format_system_time(t),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "no modification time for path");
            None
        }
    }
}

fn read_stream(stream: &mut dyn DocumentStream) -> Result<String, RehydrateError> {
    let io_err = |e| RehydrateError::Io {
        origin: "stream".to_string(),
        source: e,
    };

    let start = stream.stream_position().map_err(io_err)?;
    let mut bytes = Vec::new();
    let read = stream.read_to_end(&mut bytes);
    stream.seek(SeekFrom::Start(start)).map_err(io_err)?;
    read.map_err(io_err)?;

    String::from_utf8(bytes).map_err(|e| RehydrateError::Encoding {
        origin: "stream".to_string(),
        source: e.utf8_error(),
    })
}
