use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};

use image::ImageReader;
use tracing::{info, warn};

use crate::asset_names::validate_asset_name;

use super::{AssetError, AssetKind, AssetManifest, AudioClip, ImageAsset};

static STORE_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_store_lock_poison_once(operation: &'static str) {
    if STORE_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "asset store lock poisoned; recovered inner value");
    }
}

/// Completion counter shared between the loader threads and the loading scene.
#[derive(Debug, Clone)]
pub struct LoadProgress {
    completed: Arc<AtomicUsize>,
    total: usize,
}

impl LoadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total,
        }
    }

    pub fn mark_complete(&self) {
        let _ = self
            .completed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |done| {
                (done < self.total).then_some(done + 1)
            });
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Nothing declared means nothing to wait for.
    pub fn ratio(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed() as f32 / self.total as f32
    }

    /// `ceil(completed * 100 / total)`, exact in integer arithmetic. For the
    /// label only: with more than 100 assets it reads 100 one asset early.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        let scaled = self.completed() * 100;
        scaled.div_ceil(self.total).min(100) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total
    }
}

/// Counts a load as finished even when its thread unwinds.
struct CompletionGuard(LoadProgress);

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.0.mark_complete();
    }
}

#[derive(Debug, Default)]
struct AssetStore {
    images: HashMap<String, Arc<ImageAsset>>,
    audio: HashMap<String, AudioClip>,
}

#[derive(Debug, Clone, Default)]
struct SharedStore(Arc<RwLock<AssetStore>>);

impl SharedStore {
    fn read(&self) -> RwLockReadGuard<'_, AssetStore> {
        match self.0.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn_store_lock_poison_once("read");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, AssetStore> {
        match self.0.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn_store_lock_poison_once("write");
                poisoned.into_inner()
            }
        }
    }
}

/// Loads every declared asset on background threads and answers lookups.
///
/// Lookups of undeclared, failed or still-loading assets return `None`.
#[derive(Debug)]
pub struct ResourceLoader {
    manifest: AssetManifest,
    progress: LoadProgress,
    store: SharedStore,
    handles: Vec<JoinHandle<()>>,
    begun: bool,
}

impl ResourceLoader {
    pub fn new(manifest: AssetManifest) -> Self {
        let progress = LoadProgress::new(manifest.total());
        Self {
            manifest,
            progress,
            store: SharedStore::default(),
            handles: Vec::new(),
            begun: false,
        }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }

    pub fn progress(&self) -> &LoadProgress {
        &self.progress
    }

    pub fn has_begun(&self) -> bool {
        self.begun
    }

    /// Starts one named loader thread per declared asset. Later calls are no-ops.
    pub fn begin(&mut self) {
        if self.begun {
            return;
        }
        self.begun = true;
        info!(
            base_path = %self.manifest.base_path.display(),
            images = self.manifest.images.len(),
            audio = self.manifest.audio.len(),
            "asset_load_started"
        );

        let entries: Vec<(AssetKind, String)> = self
            .manifest
            .entries()
            .map(|(kind, name)| (kind, name.to_string()))
            .collect();
        for (kind, name) in entries {
            if let Err(source) = validate_asset_name(&name) {
                let error = AssetError::InvalidName {
                    name: name.clone(),
                    source,
                };
                warn!(asset = %name, error = %error, "asset_load_failed");
                self.progress.mark_complete();
                continue;
            }

            let path = self.manifest.path_for(kind, &name);
            let store = self.store.clone();
            let guard = CompletionGuard(self.progress.clone());
            let spawned = thread::Builder::new()
                .name(format!("asset:{name}"))
                .spawn(move || {
                    let _guard = guard;
                    load_into_store(kind, &name, &path, &store);
                });
            match spawned {
                Ok(handle) => self.handles.push(handle),
                Err(error) => {
                    // The closure, and with it the guard, was dropped on failure.
                    warn!(error = %error, "asset_loader_spawn_failed");
                }
            }
        }
    }

    /// Blocks until every started load has finished.
    pub fn wait(&mut self) {
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                warn!("asset_loader_thread_panicked");
            }
        }
    }

    pub fn image(&self, name: &str) -> Option<Arc<ImageAsset>> {
        self.store.read().images.get(name).cloned()
    }

    pub fn audio(&self, name: &str) -> Option<AudioClip> {
        self.store.read().audio.get(name).cloned()
    }
}

fn load_into_store(kind: AssetKind, name: &str, path: &Path, store: &SharedStore) {
    match kind {
        AssetKind::Image => match load_image(name, path) {
            Ok(image) => {
                store
                    .write()
                    .images
                    .insert(name.to_string(), Arc::new(image));
            }
            Err(error) => warn!(asset = name, error = %error, "asset_load_failed"),
        },
        AssetKind::Audio => match fs::read(path) {
            Ok(bytes) => {
                let clip = AudioClip {
                    name: name.to_string(),
                    bytes: Arc::new(bytes),
                };
                store.write().audio.insert(name.to_string(), clip);
            }
            Err(source) => {
                let error = AssetError::Io {
                    path: path.to_path_buf(),
                    source,
                };
                warn!(asset = name, error = %error, "asset_load_failed");
            }
        },
    }
}

fn load_image(name: &str, path: &Path) -> Result<ImageAsset, AssetError> {
    let reader = ImageReader::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decoded.to_rgba8();
    Ok(ImageAsset {
        name: name.to_string(),
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{Rgba, RgbaImage};

    use super::*;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
        let images = dir.join("images");
        fs::create_dir_all(&images).expect("images dir");
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(images.join(name))
            .expect("write png");
    }

    #[test]
    fn percent_matches_completed_share() {
        let progress = LoadProgress::new(5);
        progress.mark_complete();
        progress.mark_complete();
        assert_eq!(progress.percent(), 40);
        assert!(!progress.is_complete());

        for _ in 0..3 {
            progress.mark_complete();
        }
        assert_eq!(progress.percent(), 100);
        assert_eq!(progress.ratio(), 1.0);
        assert!(progress.is_complete());
    }

    #[test]
    fn percent_rounds_up() {
        let progress = LoadProgress::new(3);
        progress.mark_complete();
        assert_eq!(progress.percent(), 34);
    }

    #[test]
    fn rounded_hundred_is_not_complete_until_last_asset() {
        let progress = LoadProgress::new(101);
        for _ in 0..100 {
            progress.mark_complete();
        }
        assert_eq!(progress.percent(), 100);
        assert!(!progress.is_complete());

        progress.mark_complete();
        assert!(progress.is_complete());
    }

    #[test]
    fn completions_never_exceed_total() {
        let progress = LoadProgress::new(1);
        progress.mark_complete();
        progress.mark_complete();
        assert_eq!(progress.completed(), 1);
    }

    #[test]
    fn empty_manifest_is_immediately_complete() {
        let progress = LoadProgress::new(0);
        assert_eq!(progress.percent(), 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn loads_declared_images_and_counts_failures() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_png(temp.path(), "hero1.png", 3, 2);
        fs::create_dir_all(temp.path().join("audio")).expect("audio dir");
        fs::write(temp.path().join("audio").join("theme.mp3"), b"not really mp3")
            .expect("write audio");
        let manifest = AssetManifest::new(temp.path())
            .with_images(["hero1.png", "missing.png", "Bad.png"])
            .with_audio(["theme.mp3"]);
        let mut loader = ResourceLoader::new(manifest);

        loader.begin();
        loader.begin();
        loader.wait();

        assert_eq!(loader.progress().completed(), 4);
        assert!(loader.progress().is_complete());
        let hero = loader.image("hero1.png").expect("hero loaded");
        assert_eq!((hero.width, hero.height), (3, 2));
        assert_eq!(hero.rgba.len(), 3 * 2 * 4);
        assert!(loader.image("missing.png").is_none());
        assert!(loader.image("undeclared.png").is_none());
        let clip = loader.audio("theme.mp3").expect("audio bytes");
        assert_eq!(clip.bytes.as_slice(), b"not really mp3");
    }

    #[test]
    fn nothing_loads_before_begin() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_png(temp.path(), "a.png", 1, 1);
        let loader = ResourceLoader::new(AssetManifest::new(temp.path()).with_images(["a.png"]));

        assert!(!loader.has_begun());
        assert_eq!(loader.progress().percent(), 0);
        assert!(loader.image("a.png").is_none());
    }
}
