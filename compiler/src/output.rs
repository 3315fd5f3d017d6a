use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::RegistryError;

/// Commits a fully generated registry in a single write.
///
/// With a destination path the text goes to a temporary file next to it which
/// is then renamed over the destination, so readers see either the old file or
/// the complete new one. Without one it is written to stdout.
pub fn write_registry(text: &str, destination: Option<&Path>) -> Result<(), RegistryError> {
    match destination {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            fs::create_dir_all(dir)?;
            let mut tmp = NamedTempFile::new_in(dir)?;
            tmp.write_all(text.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(path).map_err(|e| RegistryError::Io(e.error))?;
            debug!(path = %path.display(), bytes = text.len(), "registry written");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_registry_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc_types.rs");
        write_registry("first\n", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");

        write_registry("second\n", Some(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");

        // Only the destination remains; the temporary file was renamed.
        let files: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }
}
