//! Filesystem helpers shared by the store and the prompt indicator.

use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::Path;

/// Mode for files that do not exist yet. Temp files start at 0600.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Replaces `path` with `data` via a temp file in the same directory.
///
/// A crash mid-write leaves the previous file intact. The replaced file keeps
/// its permissions; a new file gets 0644 on unix.
pub(crate) fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;
    if let Some(permissions) = target_permissions(path)? {
        temp.as_file().set_permissions(permissions)?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

fn target_permissions(path: &Path) -> io::Result<Option<Permissions>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(new_file_permissions()),
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
