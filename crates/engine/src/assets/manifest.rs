use std::path::{Path, PathBuf};

use serde::Deserialize;

const IMAGE_DIR: &str = "images";
const AUDIO_DIR: &str = "audio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Audio,
}

/// Declared assets for one game: a base directory plus ordered name lists.
///
/// Images resolve under `<base_path>/images/`, audio under `<base_path>/audio/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub base_path: PathBuf,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub audio: Vec<String>,
}

impl AssetManifest {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    pub fn with_images<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_audio<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audio.extend(names.into_iter().map(Into::into));
        self
    }

    /// Rebases a relative `base_path` onto `root`; absolute paths are kept.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        if self.base_path.is_relative() {
            self.base_path = root.join(&self.base_path);
        }
        self
    }

    pub fn total(&self) -> usize {
        self.images.len() + self.audio.len()
    }

    pub fn path_for(&self, kind: AssetKind, name: &str) -> PathBuf {
        let dir = match kind {
            AssetKind::Image => IMAGE_DIR,
            AssetKind::Audio => AUDIO_DIR,
        };
        self.base_path.join(dir).join(name)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (AssetKind, &str)> {
        self.images
            .iter()
            .map(|name| (AssetKind::Image, name.as_str()))
            .chain(self.audio.iter().map(|name| (AssetKind::Audio, name.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_split_by_kind() {
        let manifest = AssetManifest::new("/game/plane")
            .with_images(["hero1.png"])
            .with_audio(["background.mp3"]);

        assert_eq!(manifest.total(), 2);
        assert_eq!(
            manifest.path_for(AssetKind::Image, "hero1.png"),
            PathBuf::from("/game/plane/images/hero1.png")
        );
        assert_eq!(
            manifest.path_for(AssetKind::Audio, "background.mp3"),
            PathBuf::from("/game/plane/audio/background.mp3")
        );
    }

    #[test]
    fn relative_base_is_rooted() {
        let manifest = AssetManifest::new("plane").rooted_at(Path::new("/srv/assets"));
        assert_eq!(manifest.base_path, PathBuf::from("/srv/assets/plane"));

        let absolute = AssetManifest::new("/abs").rooted_at(Path::new("/srv/assets"));
        assert_eq!(absolute.base_path, PathBuf::from("/abs"));
    }

    #[test]
    fn entries_keep_declaration_order() {
        let manifest = AssetManifest::new("x")
            .with_images(["b.png", "a.png"])
            .with_audio(["z.mp3"]);

        let entries: Vec<_> = manifest.entries().collect();
        assert_eq!(
            entries,
            vec![
                (AssetKind::Image, "b.png"),
                (AssetKind::Image, "a.png"),
                (AssetKind::Audio, "z.mp3"),
            ]
        );
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let manifest: AssetManifest =
            serde_json::from_str(r#"{ "base_path": "typing", "audio": ["hit.mp3"] }"#)
                .expect("manifest json");

        assert_eq!(manifest.base_path, PathBuf::from("typing"));
        assert!(manifest.images.is_empty());
        assert_eq!(manifest.audio, vec!["hit.mp3".to_string()]);
    }
}
