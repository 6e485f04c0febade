use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use super::{validate_key, Storage};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.path_for(key);

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                log::error!("Could not read {}: {}", path.display(), e);
                Err(e.into())
            }
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        // Readers only ever see the old or the new blob.
        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp_path, &path) {
            log::error!("Could not move {} into place: {}", path.display(), e);
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        log::trace!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
