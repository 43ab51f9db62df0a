//! Declarative sprite manifest
//!
//! A manifest is an explicit list of `{pose, expression, path, overlay, base}`
//! entries. It is either read from `manifest.json` in the asset directory or
//! derived once from the file naming convention:
//!
//! | File                          | Pose      | Expression |
//! |-------------------------------|-----------|------------|
//! | `{stem}.png`                  | expanded  | `base`     |
//! | `{stem}_{expr}.png`           | expanded  | `expr`     |
//! | `{stem}-collapsed.png`        | collapsed | `base`     |
//! | `{stem}_{expr}-collapsed.png` | collapsed | `expr`     |
//!
//! After this point nothing inspects file names again; lookups go through the
//! catalog built from the manifest.
//!
//! Only a manifest can declare body variants. An overlay entry may name the
//! body it is drawn on with `base`, so one expression id stands for a
//! body + face combination:
//!
//! ```json
//! { "pose": "expanded", "expression": "negative", "path": "body_negative.png" },
//! { "pose": "expanded", "expression": "refuse", "path": "face_deadpan.png",
//!   "overlay": true, "base": "negative" }
//! ```

use crate::assets::catalog::BASE_EXPRESSION;
use crate::character::Pose;
use crate::error::{DeskmateError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of an explicit manifest inside the asset directory
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

const COLLAPSED_SUFFIX: &str = "-collapsed";

/// One sprite declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Pose the sprite belongs to
    pub pose: Pose,
    /// Opaque expression id (`base` for the default image)
    pub expression: String,
    /// Image path, relative to the asset directory
    pub path: PathBuf,
    /// Composite over the base sprite of the same pose instead of replacing it
    #[serde(default)]
    pub overlay: bool,
    /// Body expression an overlay is drawn on; `base` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

/// The full list of sprites for one character
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteManifest {
    /// Sprite declarations
    pub sprites: Vec<ManifestEntry>,
}

impl SpriteManifest {
    /// Parse manifest JSON; `path` is only used for error context
    pub fn parse(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| DeskmateError::ManifestError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a manifest file
    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::parse(&json, path)
    }

    /// Build a manifest by scanning `dir` for convention-named PNG files
    ///
    /// Entries are sorted by pose and expression so the result does not depend
    /// on directory iteration order.
    pub fn from_naming_convention(dir: &Path, stem: &str, overlay_expressions: bool) -> Result<Self> {
        let mut sprites = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                debug!("Skipping non UTF-8 file name in {}", dir.display());
                continue;
            };

            match classify_file_name(file_name, stem) {
                Some((pose, expression)) => {
                    let overlay = overlay_expressions && expression != BASE_EXPRESSION;
                    sprites.push(ManifestEntry {
                        pose,
                        expression,
                        path: PathBuf::from(file_name),
                        overlay,
                        base: None,
                    });
                }
                None => debug!("Ignoring {} (does not match sprite naming)", file_name),
            }
        }

        sprites.sort_by(|a, b| (a.pose, &a.expression).cmp(&(b.pose, &b.expression)));
        Ok(Self { sprites })
    }
}

/// Map a file name to its pose and expression under the naming convention
///
/// Returns `None` for files that do not belong to the sprite set.
pub fn classify_file_name(file_name: &str, stem: &str) -> Option<(Pose, String)> {
    let (name, extension) = file_name.rsplit_once('.')?;
    if !extension.eq_ignore_ascii_case("png") {
        return None;
    }

    let (name, pose) = match name.strip_suffix(COLLAPSED_SUFFIX) {
        Some(rest) => (rest, Pose::Collapsed),
        None => (name, Pose::Expanded),
    };

    if name == stem {
        return Some((pose, BASE_EXPRESSION.to_string()));
    }

    let expression = name.strip_prefix(stem)?.strip_prefix('_')?;
    if expression.is_empty() {
        return None;
    }
    Some((pose, expression.to_string()))
}
