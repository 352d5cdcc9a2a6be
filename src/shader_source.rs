use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Shader source text read from disk, tagged with the path it was read
/// from.
#[derive(Debug)]
pub struct ShaderSource {
    path: PathBuf,
    text: String,
}

impl ShaderSource {
    /// Reads the whole file as UTF-8 text.
    ///
    /// Any failure (missing file, permissions, invalid UTF-8) is reported
    /// with the offending path; there is no empty-buffer fallback.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        return Ok(Self {
            path: path.to_owned(),
            text,
        });
    }

    pub fn source(&self) -> &str {
        return &self.text;
    }

    /// Byte length of the source text.
    pub fn len(&self) -> usize {
        return self.text.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.text.is_empty();
    }

    pub fn path(&self) -> &Path {
        return &self.path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("qstom-{}-{}", std::process::id(), name));
        return path;
    }

    #[test]
    fn reads_a_whole_file_and_reports_its_size() {
        let path = temp_path("frag.glsl");
        let contents = "void main() {}\n";
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        drop(file);

        let source = ShaderSource::read(&path).unwrap();
        assert_eq!(source.len(), contents.len());
        assert_eq!(source.source(), contents);
        assert_eq!(source.path(), path.as_path());
        assert!(!source.is_empty());
        // Debug formatting backs the unwrap/unwrap_err calls in tests.
        assert!(format!("{:?}", source).contains("frag.glsl"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_an_error_carrying_the_path() {
        let path = temp_path("does-not-exist.vert");
        let err = ShaderSource::read(&path).unwrap_err();
        match err {
            Error::Io { path: reported, source } => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Error::Io, got {:?}", other),
        }
    }
}
