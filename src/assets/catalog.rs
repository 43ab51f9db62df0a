//! Sprite asset catalog
//!
//! Loads the sprite manifest for a character directory and answers
//! "which image shows pose P with expression E" for the renderer.
//!
//! # Fallback order
//!
//! `resolve(pose, expression)` never fails once the catalog is loaded:
//!
//! 1. exact `(pose, expression)` match
//! 2. base sprite of the same pose
//! 3. `(Expanded, expression)`, which the renderer turns into the collapsed view
//! 4. expanded base sprite (always present, checked at load time)

use crate::assets::manifest::{MANIFEST_FILE_NAME, ManifestEntry, SpriteManifest};
use crate::character::Pose;
use crate::config::AssetSettings;
use crate::error::{DeskmateError, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Expression id of the default image of a pose
pub const BASE_EXPRESSION: &str = "base";

/// One loaded sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteAsset {
    /// Pose the sprite belongs to
    pub pose: Pose,
    /// Opaque expression id
    pub expression: String,
    /// Absolute (or asset-root joined) image path
    pub path: PathBuf,
    /// Composite over a body of the same pose when rendering
    pub overlay: bool,
    /// Body expression for an overlay; `None` means the pose's base
    pub base: Option<String>,
}

impl SpriteAsset {
    /// Expression id of the body this overlay is drawn on
    pub fn body(&self) -> &str {
        self.base.as_deref().unwrap_or(BASE_EXPRESSION)
    }
}

/// Options controlling how a directory is interpreted
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// File stem for convention-named sprites
    pub sprite_stem: String,
    /// Mark convention-named expressions as overlays
    pub overlay_expressions: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            sprite_stem: BASE_EXPRESSION.to_string(),
            overlay_expressions: false,
        }
    }
}

impl From<&AssetSettings> for CatalogOptions {
    fn from(settings: &AssetSettings) -> Self {
        Self {
            sprite_stem: settings.sprite_stem.clone(),
            overlay_expressions: settings.overlay_expressions,
        }
    }
}

/// Read-only lookup from (pose, expression) to sprite
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
    sprites: HashMap<(Pose, String), SpriteAsset>,
    default: SpriteAsset,
}

impl AssetCatalog {
    /// Load the catalog for `dir`
    ///
    /// Uses `dir/manifest.json` when present, otherwise derives the manifest
    /// from the file naming convention.
    ///
    /// # Errors
    ///
    /// - `AssetDirectoryMissing` if `dir` is not a directory
    /// - `ManifestError` if `manifest.json` exists but is malformed
    /// - `MissingBaseAsset` if no expanded base sprite exists on disk
    pub fn load(dir: &Path, options: &CatalogOptions) -> Result<Self> {
        if !dir.is_dir() {
            return Err(DeskmateError::AssetDirectoryMissing(dir.to_path_buf()));
        }

        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        let manifest = if manifest_path.is_file() {
            info!("Loading sprite manifest {}", manifest_path.display());
            SpriteManifest::read(&manifest_path)?
        } else {
            info!(
                "No manifest in {}, scanning for '{}' sprites",
                dir.display(),
                options.sprite_stem
            );
            SpriteManifest::from_naming_convention(
                dir,
                &options.sprite_stem,
                options.overlay_expressions,
            )?
        };

        Self::from_manifest(dir, manifest)
    }

    /// Build a catalog from an already parsed manifest
    ///
    /// Entries whose image file does not exist are skipped with a warning;
    /// duplicates keep the first declaration. An overlay whose body is not a
    /// plain sprite of the same pose is drawn on the pose's base instead.
    pub fn from_manifest(root: &Path, manifest: SpriteManifest) -> Result<Self> {
        let mut sprites = HashMap::with_capacity(manifest.sprites.len());

        for ManifestEntry {
            pose,
            expression,
            path,
            overlay,
            base,
        } in manifest.sprites
        {
            let path = root.join(path);
            if !path.is_file() {
                warn!(
                    "Sprite {:?}/{} missing at {}, will fall back to base",
                    pose,
                    expression,
                    path.display()
                );
                continue;
            }

            let key = (pose, expression.clone());
            if sprites.contains_key(&key) {
                warn!("Duplicate sprite {:?}/{} ignored", pose, expression);
                continue;
            }
            sprites.insert(
                key,
                SpriteAsset {
                    pose,
                    expression,
                    path,
                    overlay,
                    base,
                },
            );
        }

        check_bodies(&mut sprites);

        let Some(default) = sprites
            .get(&(Pose::Expanded, BASE_EXPRESSION.to_string()))
            .cloned()
        else {
            return Err(DeskmateError::MissingBaseAsset(root.to_path_buf()));
        };

        info!(
            "Sprite catalog ready: {} sprites, {} expressions",
            sprites.len(),
            sprites
                .keys()
                .filter(|(pose, _)| *pose == Pose::Expanded)
                .count()
        );

        Ok(Self {
            root: root.to_path_buf(),
            sprites,
            default,
        })
    }

    /// Directory the catalog was loaded from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sprite for `(pose, expression)`, with the documented fallbacks
    pub fn resolve(&self, pose: Pose, expression: &str) -> &SpriteAsset {
        self.get(pose, expression)
            .or_else(|| self.get(pose, BASE_EXPRESSION))
            .or_else(|| self.get(Pose::Expanded, expression))
            .unwrap_or_else(|| self.default_sprite())
    }

    /// Image path for `(pose, expression)`, with fallbacks
    pub fn lookup(&self, pose: Pose, expression: &str) -> &Path {
        &self.resolve(pose, expression).path
    }

    /// Exact lookup without fallback
    pub fn get(&self, pose: Pose, expression: &str) -> Option<&SpriteAsset> {
        self.sprites.get(&(pose, expression.to_string()))
    }

    /// Whether an exact `(pose, expression)` sprite exists
    pub fn contains(&self, pose: Pose, expression: &str) -> bool {
        self.get(pose, expression).is_some()
    }

    /// The expanded base sprite
    pub fn default_sprite(&self) -> &SpriteAsset {
        &self.default
    }

    /// Sorted expression ids available for `pose`
    pub fn expressions(&self, pose: Pose) -> Vec<&str> {
        let mut expressions: Vec<&str> = self
            .sprites
            .keys()
            .filter(|(p, _)| *p == pose)
            .map(|(_, e)| e.as_str())
            .collect();
        expressions.sort_unstable();
        expressions
    }

    /// All sprites in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &SpriteAsset> {
        self.sprites.values()
    }

    /// Number of sprites
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Whether the catalog is empty (never true for a loaded catalog)
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

/// Drop body references that cannot be drawn
fn check_bodies(sprites: &mut HashMap<(Pose, String), SpriteAsset>) {
    let bodies: HashSet<(Pose, String)> = sprites
        .iter()
        .filter(|(_, asset)| !asset.overlay)
        .map(|(key, _)| key.clone())
        .collect();

    for asset in sprites.values_mut() {
        let Some(body) = &asset.base else {
            continue;
        };
        if !asset.overlay {
            warn!(
                "Sprite {:?}/{} is not an overlay, ignoring body '{}'",
                asset.pose, asset.expression, body
            );
            asset.base = None;
        } else if !bodies.contains(&(asset.pose, body.clone())) {
            warn!(
                "Body {:?}/{} of overlay '{}' not found, using base",
                asset.pose, body, asset.expression
            );
            asset.base = None;
        }
    }
}
