//! Scoped file access shared by the backing store and CSV interchange.
//!
//! Both helpers hand a buffered handle to a closure and own the handle for the
//! duration of the call, so it is closed on every exit path, including when
//! the closure fails half way through parsing.
//!
//! Writes go to a sibling temp file that is renamed over the target once the
//! closure succeeds. A failed write removes the temp file and leaves the
//! previous contents in place.

use crate::error::{PkeepError, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Opens `path` for reading and passes the reader to `f`.
///
/// A missing file is reported as [`PkeepError::FileMissing`].
pub fn read_with<T, F>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(BufReader<File>) -> Result<T>,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(PkeepError::FileMissing(path.to_path_buf()))
        }
        Err(e) => return Err(PkeepError::Io(e)),
    };
    f(BufReader::new(file))
}

/// Replaces the contents of `path` with whatever `f` writes.
///
/// The parent directory is created if needed.
pub fn write_with<F>(path: &Path, f: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(PkeepError::Io)?;
        }
    }

    let tmp_path = tmp_path_for(path);
    let result = write_tmp(&tmp_path, f)
        .and_then(|_| fs::rename(&tmp_path, path).map_err(PkeepError::Io));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_tmp<F>(tmp_path: &Path, f: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let file = File::create(tmp_path).map_err(PkeepError::Io)?;
    let mut writer = BufWriter::new(file);
    f(&mut writer)?;
    writer.flush().map_err(PkeepError::Io)?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    path.with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_read_missing_file_is_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = read_with(&path, |_| Ok(())).unwrap_err();
        assert!(matches!(err, PkeepError::FileMissing(p) if p == path));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");

        write_with(&path, |w| w.write_all(b"hello").map_err(PkeepError::Io)).unwrap();

        let text = read_with(&path, |mut r| {
            let mut s = String::new();
            r.read_to_string(&mut s).map_err(PkeepError::Io)?;
            Ok(s)
        })
        .unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_failed_write_keeps_previous_contents_and_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "original").unwrap();

        let result = write_with(&path, |w| {
            w.write_all(b"partial").map_err(PkeepError::Io)?;
            Err(PkeepError::validation("boom"))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        for entry in fs::read_dir(dir.path()).unwrap() {
            let name = entry.unwrap().file_name();
            assert!(!name.to_string_lossy().ends_with(".tmp"));
        }
    }
}
