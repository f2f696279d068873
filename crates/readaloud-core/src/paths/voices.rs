//! Voice model file locations.
//!
//! Downloaded voices live under `<data_root>/voices/`. Voices that ship with
//! the application live under `<resource_root>/voices/` and are searched
//! second, so a download always shadows a bundled copy.

use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::{data_root, resource_root};
use crate::voice::VoiceId;

/// Directory that receives downloaded voices.
pub fn voices_dir() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("voices"))
}

/// Directory holding voices bundled with the application.
pub fn bundled_voices_dir() -> Result<PathBuf, PathError> {
    Ok(resource_root()?.join("voices"))
}

/// Path of the model file for `id` inside `dir`.
pub fn model_file_in(dir: &Path, id: &VoiceId) -> PathBuf {
    dir.join(id.model_file_name())
}

/// Path of the configuration sidecar for `id` inside `dir`.
pub fn config_file_in(dir: &Path, id: &VoiceId) -> PathBuf {
    dir.join(id.config_file_name())
}

/// Locate the model file for a voice, checking `downloads` then `bundled`.
///
/// Returns `None` when neither directory has the model.
pub fn find_model_in(downloads: &Path, bundled: Option<&Path>, id: &VoiceId) -> Option<PathBuf> {
    std::iter::once(downloads)
        .chain(bundled)
        .map(|dir| model_file_in(dir, id))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_voice_id() {
        let id = VoiceId::new("en_US", "amy", "medium").unwrap();
        let dir = Path::new("/data/voices");
        assert_eq!(
            model_file_in(dir, &id),
            PathBuf::from("/data/voices/en_US-amy-medium.onnx")
        );
        assert_eq!(
            config_file_in(dir, &id),
            PathBuf::from("/data/voices/en_US-amy-medium.onnx.json")
        );
    }

    #[test]
    fn download_shadows_bundled_copy() {
        let temp = tempfile::tempdir().unwrap();
        let downloads = temp.path().join("voices");
        let bundled = temp.path().join("bundled");
        std::fs::create_dir_all(&downloads).unwrap();
        std::fs::create_dir_all(&bundled).unwrap();
        let id = VoiceId::new("en_GB", "alan", "low").unwrap();

        assert_eq!(find_model_in(&downloads, Some(&bundled), &id), None);

        std::fs::write(model_file_in(&bundled, &id), b"m").unwrap();
        assert_eq!(
            find_model_in(&downloads, Some(&bundled), &id),
            Some(model_file_in(&bundled, &id))
        );
        assert_eq!(find_model_in(&downloads, None, &id), None);

        std::fs::write(model_file_in(&downloads, &id), b"m").unwrap();
        assert_eq!(
            find_model_in(&downloads, Some(&bundled), &id),
            Some(model_file_in(&downloads, &id))
        );
    }
}
