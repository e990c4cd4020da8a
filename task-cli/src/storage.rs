//! Loading and saving the task store on disk.
//!
//! The whole store is read at startup and rewritten in one shot after a mutation. There is no
//! locking and no temp-file swap: concurrent invocations race and the last writer wins.

use crate::error::StoreError;
use crate::repository::TaskRepository;
use log::{debug, info};
use std::fs;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads the store at `path`, first creating it with an empty store if it does not exist.
pub fn load(path: &Path) -> Result<TaskRepository, StoreError> {
    if !path.exists() {
        info!("Store file does not exist, creating one at {}", path.display());
        save(&TaskRepository::default(), path)?;
    }

    let contents = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let repo = TaskRepository::new_from_json(&contents).map_err(|err| match err {
        StoreError::Json(source) => StoreError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    debug!("Loaded {} tasks from {}", repo.len(), path.display());
    Ok(repo)
}

/// Overwrites the file at `path` with the serialized store.
pub fn save(repo: &TaskRepository, path: &Path) -> Result<(), StoreError> {
    info!("Committing tasks to storage");
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)
        .map_err(|source| io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    repo.save_as_json(&mut writer).map_err(|err| match err {
        StoreError::Json(source) => StoreError::Write {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    writer.flush().map_err(|source| io_error(path, source))?;
    info!("Store save completed");
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}
