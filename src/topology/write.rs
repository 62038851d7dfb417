//! Writes a topology to disk in one shot.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::error::ConverterError;

use super::Topology;

/// Serializes `topology` to `path`, creating parent directories. The bytes go
/// to a temporary file beside the destination which is then renamed over
/// it, so the destination is either untouched or complete. Returns the size
/// written in bytes.
pub fn save_topology(topology: &Topology, path: &Path) -> Result<u64, ConverterError> {
    let bytes = serde_json::to_vec(topology)?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(serialize_error(&parent))?;

    let mut file = NamedTempFile::new_in(&parent).map_err(serialize_error(&parent))?;
    file.write_all(&bytes).map_err(serialize_error(path))?;
    file.as_file().sync_all().map_err(serialize_error(path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o644)).map_err(serialize_error(path))?;
    }

    file.persist(path).map_err(|e| ConverterError::Serialize {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(bytes.len() as u64)
}

fn serialize_error(target: &Path) -> impl FnOnce(std::io::Error) -> ConverterError {
    let path = target.to_path_buf();
    move |source| ConverterError::Serialize { path, source }
}

// -- Tests -------------------------------------------------------------------
