//! Sprite rendering
//!
//! Turns a catalog entry into the RGBA pixels shown by the window:
//! decode → (overlay composite) → trim transparent border → fit into the
//! sprite box → (collapsed view). Results are cached per [`SpriteKey`].
//!
//! Failures never abort: a sprite that cannot be rendered is reported once and
//! replaced by the base sprite of the same pose, or by a blank image if even
//! that fails.

use crate::assets::catalog::{AssetCatalog, BASE_EXPRESSION, SpriteAsset};
use crate::character::geometry::Size;
use crate::character::{Edge, Pose, collapsed_size};
use crate::config::WindowSettings;
use crate::error::{DeskmateError, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identifies one rendered view of the character
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    /// Pose being displayed
    pub pose: Pose,
    /// Expression being displayed
    pub expression: String,
    /// Docked edge (collapsed pose only)
    pub edge: Edge,
}

impl SpriteKey {
    /// Key for the expanded base sprite
    pub fn base() -> Self {
        Self {
            pose: Pose::Expanded,
            expression: BASE_EXPRESSION.to_string(),
            edge: Edge::None,
        }
    }
}

/// Output geometry for rendered sprites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Box the expanded sprite is fitted into
    pub sprite_size: Size,
    /// Share of the sprite height kept when collapsed
    pub collapsed_fraction: f32,
}

impl RenderOptions {
    /// Size of a rendered sprite in `pose`
    pub fn output_size(&self, pose: Pose) -> Size {
        match pose {
            Pose::Expanded => self.sprite_size,
            Pose::Collapsed => collapsed_size(self.sprite_size, self.collapsed_fraction),
        }
    }
}

impl From<&WindowSettings> for RenderOptions {
    fn from(settings: &WindowSettings) -> Self {
        Self {
            sprite_size: settings.sprite_size,
            collapsed_fraction: settings.collapsed_fraction,
        }
    }
}

/// Caching sprite renderer
#[derive(Debug)]
pub struct SpriteRenderer {
    options: RenderOptions,
    decoded: HashMap<PathBuf, Arc<RgbaImage>>,
    rendered: HashMap<SpriteKey, Arc<RgbaImage>>,
    reported: HashSet<PathBuf>,
}

impl SpriteRenderer {
    /// Create an empty renderer
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            decoded: HashMap::new(),
            rendered: HashMap::new(),
            reported: HashSet::new(),
        }
    }

    /// Output geometry
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Decode every sprite of the catalog in parallel
    ///
    /// Called once before the event loop starts. Decode failures are reported
    /// here; `render` tries those files again on first use.
    pub fn preload(&mut self, catalog: &AssetCatalog) {
        let paths: Vec<&Path> = catalog
            .iter()
            .map(|asset| asset.path.as_path())
            .filter(|path| !self.decoded.contains_key(*path))
            .collect();

        let results: Vec<(PathBuf, std::result::Result<RgbaImage, image::ImageError>)> = paths
            .par_iter()
            .map(|path| (path.to_path_buf(), decode_png(path)))
            .collect();

        let mut loaded = 0usize;
        for (path, result) in results {
            match result {
                Ok(image) => {
                    self.decoded.insert(path, Arc::new(image));
                    loaded += 1;
                }
                Err(e) => self.report(&DeskmateError::SpriteRender { path, source: e }),
            }
        }
        info!("Preloaded {} of {} sprites", loaded, catalog.len());
    }

    /// Render the view identified by `key`, falling back instead of failing
    pub fn render(&mut self, catalog: &AssetCatalog, key: &SpriteKey) -> Arc<RgbaImage> {
        if let Some(image) = self.rendered.get(key) {
            return Arc::clone(image);
        }

        let image = match self.try_render(catalog, key) {
            Ok(image) => image,
            Err(e) => {
                self.report(&e);
                self.render_fallback(catalog, key)
            }
        };

        let image = Arc::new(image);
        self.rendered.insert(key.clone(), Arc::clone(&image));
        image
    }

    /// Render without fallback
    pub fn try_render(&mut self, catalog: &AssetCatalog, key: &SpriteKey) -> Result<RgbaImage> {
        let asset = catalog.resolve(key.pose, &key.expression);
        let source = self.compose(catalog, asset)?;
        let trimmed = trim_transparent(&source);

        let image = match (key.pose, asset.pose) {
            (Pose::Expanded, _) => fit_into(&trimmed, self.options.sprite_size),
            (Pose::Collapsed, Pose::Expanded) => {
                let full = fit_into(&trimmed, self.options.sprite_size);
                collapse_view(&full, self.options.collapsed_fraction, key.edge)
            }
            (Pose::Collapsed, Pose::Collapsed) => {
                let docked = fit_into(&trimmed, self.options.output_size(Pose::Collapsed));
                if key.edge == Edge::Left {
                    imageops::flip_horizontal(&docked)
                } else {
                    docked
                }
            }
        };

        debug!(
            "Rendered {:?}/{} ({:?}) from {}",
            key.pose,
            key.expression,
            key.edge,
            asset.path.display()
        );
        Ok(image)
    }

    fn render_fallback(&mut self, catalog: &AssetCatalog, key: &SpriteKey) -> RgbaImage {
        if key.expression != BASE_EXPRESSION {
            let base_key = SpriteKey {
                expression: BASE_EXPRESSION.to_string(),
                ..key.clone()
            };
            match self.try_render(catalog, &base_key) {
                Ok(image) => return image,
                Err(e) => self.report(&e),
            }
        }

        let size = self.options.output_size(key.pose);
        RgbaImage::new(size.width.max(1), size.height.max(1))
    }

    fn compose(&mut self, catalog: &AssetCatalog, asset: &SpriteAsset) -> Result<RgbaImage> {
        let layer = self.decode(&asset.path)?;
        if !asset.overlay {
            return Ok((*layer).clone());
        }

        let body = catalog
            .get(asset.pose, asset.body())
            .unwrap_or_else(|| catalog.resolve(asset.pose, BASE_EXPRESSION));
        let mut canvas = (*self.decode(&body.path)?).clone();
        imageops::overlay(&mut canvas, layer.as_ref(), 0, 0);
        Ok(canvas)
    }

    fn decode(&mut self, path: &Path) -> Result<Arc<RgbaImage>> {
        if let Some(image) = self.decoded.get(path) {
            return Ok(Arc::clone(image));
        }
        let image = decode_png(path).map_err(|source| DeskmateError::SpriteRender {
            path: path.to_path_buf(),
            source,
        })?;
        let image = Arc::new(image);
        self.decoded.insert(path.to_path_buf(), Arc::clone(&image));
        Ok(image)
    }

    fn report(&mut self, error: &DeskmateError) {
        let path = match error {
            DeskmateError::SpriteRender { path, .. } => path.clone(),
            _ => PathBuf::new(),
        };
        if self.reported.insert(path) {
            warn!("{error}; showing the default sprite instead");
        }
    }
}

fn decode_png(path: &Path) -> std::result::Result<RgbaImage, image::ImageError> {
    Ok(image::open(path)?.into_rgba8())
}

/// Crop away fully transparent rows and columns
///
/// A fully transparent image is returned unchanged.
pub fn trim_transparent(image: &RgbaImage) -> RgbaImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    match bounds {
        Some((x0, y0, x1, y1)) => {
            imageops::crop_imm(image, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image()
        }
        None => image.clone(),
    }
}

/// Scale `image` to fit inside `target` keeping its aspect ratio
///
/// The result is exactly `target` sized: the sprite is centered horizontally
/// and aligned to the top, the rest is transparent.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "scaled dimensions are positive and bounded by the target size"
)]
pub fn fit_into(image: &RgbaImage, target: Size) -> RgbaImage {
    let target_width = target.width.max(1);
    let target_height = target.height.max(1);
    let mut canvas = RgbaImage::new(target_width, target_height);
    if image.width() == 0 || image.height() == 0 {
        return canvas;
    }

    let scale = f64::min(
        f64::from(target_width) / f64::from(image.width()),
        f64::from(target_height) / f64::from(image.height()),
    );
    let width = ((f64::from(image.width()) * scale).round() as u32).clamp(1, target_width);
    let height = ((f64::from(image.height()) * scale).round() as u32).clamp(1, target_height);

    let scaled = imageops::resize(image, width, height, FilterType::Triangle);
    let x = (target_width - width) / 2;
    imageops::overlay(&mut canvas, &scaled, i64::from(x), 0);
    canvas
}

/// Upper-body view used while docked to a screen edge
///
/// Keeps the top `fraction` of the sprite and rotates it so the head points
/// into the screen: 270° on the right edge, 90° on the left edge.
pub fn collapse_view(image: &RgbaImage, fraction: f32, edge: Edge) -> RgbaImage {
    let size = collapsed_size(Size::new(image.width(), image.height()), fraction);
    let upper = imageops::crop_imm(image, 0, 0, image.width(), size.width).to_image();
    match edge {
        Edge::Left => imageops::rotate90(&upper),
        Edge::Right | Edge::None => imageops::rotate270(&upper),
    }
}
