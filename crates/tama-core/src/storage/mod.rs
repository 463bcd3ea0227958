//! Save file persistence.
//!
//! The pet lives in a single JSON file. A missing file means there is no pet
//! yet; a file that cannot be read back is reported as corrupt and callers
//! start over with a fresh pet.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    error::{PetError, PetResult},
    pet::{Pet, PetSnapshot},
};

/// What to do with the stored timestamp when a pet is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestorePolicy {
    /// Keep it, so the pet decays for the time it was away.
    Resume,
    /// Reset it to now.
    Refresh,
}

#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored snapshot. `Ok(None)` when no file exists.
    pub fn load(&self) -> PetResult<Option<PetSnapshot>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(PetError::CorruptSaveData(format!(
                    "cannot read {:?}: {err}",
                    self.path
                )));
            }
        };
        let snapshot = serde_json::from_str(&raw)
            .map_err(|err| PetError::CorruptSaveData(err.to_string()))?;
        Ok(Some(snapshot))
    }

    /// Loads and restores the pet, treating corrupt data as no pet at all.
    pub fn load_pet(&self, policy: RestorePolicy, now: f64) -> Option<Pet> {
        let restored = self
            .load()
            .and_then(|snapshot| snapshot.map(Pet::from_snapshot).transpose());
        match restored {
            Ok(Some(mut pet)) => {
                if policy == RestorePolicy::Refresh {
                    pet.refresh_clock(now);
                }
                info!(name = pet.name(), alive = pet.is_alive(), "loaded pet from {:?}", self.path);
                Some(pet)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(%err, "discarding save file {:?}", self.path);
                None
            }
        }
    }

    /// Writes the snapshot to a sibling temp file, then renames it into place.
    pub fn save(&self, snapshot: &PetSnapshot) -> PetResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(snapshot).map_err(io::Error::other)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        info!(name = %snapshot.name, "saved pet to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::Action;

    fn save_in(dir: &tempfile::TempDir) -> SaveFile {
        SaveFile::new(dir.path().join("save.json"))
    }

    #[test]
    fn missing_file_means_no_pet() {
        let dir = tempfile::tempdir().unwrap();
        let store = save_in(&dir);
        assert!(store.load().unwrap().is_none());
        assert!(store.load_pet(RestorePolicy::Resume, 0.0).is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = save_in(&dir);
        let mut pet = Pet::new("Rex", 50.0);
        pet.perform_action(Action::Play).unwrap();
        store.save(&pet.to_snapshot()).unwrap();

        let loaded = store.load_pet(RestorePolicy::Resume, 999.0).unwrap();
        assert_eq!(loaded.name(), "Rex");
        assert_eq!(loaded.energy(), 90.0);
        assert_eq!(loaded.last_update(), 50.0);
        assert!(!dir.path().join("save.json.tmp").exists());
    }

    #[test]
    fn refresh_policy_resets_clock() {
        let dir = tempfile::tempdir().unwrap();
        let store = save_in(&dir);
        store.save(&Pet::new("Rex", 50.0).to_snapshot()).unwrap();
        let loaded = store.load_pet(RestorePolicy::Refresh, 999.0).unwrap();
        assert_eq!(loaded.last_update(), 999.0);
    }

    #[test]
    fn missing_hunger_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = save_in(&dir);
        fs::write(
            store.path(),
            r#"{"name":"Rex","happiness":1,"energy":1,"age_seconds":0,"alive":true,"last_update":0}"#,
        )
        .unwrap();
        assert!(matches!(store.load(), Err(PetError::CorruptSaveData(_))));
        assert!(store.load_pet(RestorePolicy::Resume, 0.0).is_none());
    }

    #[test]
    fn garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = save_in(&dir);
        fs::write(store.path(), "not json at all").unwrap();
        assert!(store.load_pet(RestorePolicy::Resume, 0.0).is_none());
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveFile::new(dir.path().join("nested/deeper/save.json"));
        store.save(&Pet::new("Rex", 0.0).to_snapshot()).unwrap();
        assert!(store.load().unwrap().is_some());
    }
}
