/// Raw UCD source files, stored as `<data_dir>/<version>-<type>.txt`.
use std::io;
use std::path::{Path, PathBuf};

/// Path of the source file for `version` and `kind`.
pub fn source_path(data_dir: &Path, version: &str, kind: &str) -> PathBuf {
    data_dir.join(format!("{version}-{kind}.txt"))
}

/// Read a source file wholesale. A missing file is `Ok(None)`; any other
/// I/O failure is returned as an error.
pub fn read_source(data_dir: &Path, version: &str, kind: &str) -> io::Result<Option<String>> {
    let path = source_path(data_dir, version, kind);
    match std::fs::read_to_string(&path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "source file not found");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
