//! Sprite assets
//!
//! Manifest parsing, the (pose, expression) catalog and the renderer that
//! turns catalog entries into window pixels.

pub mod catalog;
pub mod manifest;
pub mod render;

pub use catalog::{AssetCatalog, BASE_EXPRESSION, CatalogOptions, SpriteAsset};
pub use manifest::{ManifestEntry, SpriteManifest};
pub use render::{RenderOptions, SpriteKey, SpriteRenderer};
