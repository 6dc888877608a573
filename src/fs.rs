use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};

pub(crate) fn file(path: impl AsRef<Path>) -> Result<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::create(path).context(format!("Unable to create file {}", path.display()))
}

pub(crate) fn write_all(path: impl AsRef<Path>, data: impl IntoIterator<Item = u8>) -> Result<()> {
    let path = path.as_ref();
    let mut f = file(path)?;
    let buf: Vec<u8> = data.into_iter().collect();
    f.write_all(&buf)
        .context(format!("Unable to write data to {}", path.display()))?;
    f.sync_all()
        .context(format!("Unable to flush data to {}", path.display()))
}

/// Writes `contents` to a sibling of `path` and then renames it over `path`.
pub(crate) fn write_atomic(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    let tmp = tmp_path(path);
    if let Err(e) = write_all(&tmp, contents.as_ref().iter().copied()) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e).context(format!(
            "Unable to move '{}' to '{}'",
            tmp.display(),
            path.display()
        ));
    }
    Ok(())
}

pub(crate) fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).context(format!("Unable to read file {}", path.display()))
}

/// `expenses.csv` -> `.expenses.csv.tmp`, in the same directory.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| OsStr::new("expenses")));
    name.push(".tmp");
    path.with_file_name(name)
}
