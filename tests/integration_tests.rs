//! Integration tests for `Deskmate`
//!
//! Exercises the sprite catalog against real PNG directories, configuration
//! persistence, and the companion controller driven the way the GUI drives it.

use deskmate::{
    assets::{AssetCatalog, CatalogOptions, RenderOptions, SpriteKey, SpriteRenderer},
    character::{Edge, Pose, Point, Rect},
    config::{AppConfig, ConfigManager},
    controller::{Command, CompanionController, InputEvent, PointerButton},
    error::{DeskmateError, get_user_friendly_error},
    pomodoro::PomodoroState,
};
use image::{Rgba, RgbaImage};
use std::path::Path;
use std::time::{Duration, Instant};

const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

fn write_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_pixel(width, height, Rgba([200, 120, 90, 255]))
        .save(path)
        .unwrap();
}

fn sprite_dir(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        write_png(&dir.path().join(file), 60, 100);
    }
    dir
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.dialog.seed = Some(42);
    config.window.sprite_size = deskmate::character::Size::new(60, 100);
    config.window.initial_position = Some(Point::new(300, 400));
    config
}

/// Catalog with `base.png` and `base_blush.png` resolves known and unknown expressions
#[test]
fn test_blush_and_unknown_expression_lookup() {
    let dir = sprite_dir(&["base.png", "base_blush.png"]);
    let catalog = AssetCatalog::load(dir.path(), &CatalogOptions::default()).unwrap();

    assert_eq!(
        catalog.lookup(Pose::Expanded, "blush"),
        dir.path().join("base_blush.png")
    );
    assert_eq!(
        catalog.lookup(Pose::Expanded, "unknown"),
        dir.path().join("base.png")
    );
    // No collapsed art: the collapsed view is derived from the expanded base
    assert_eq!(
        catalog.lookup(Pose::Collapsed, "blush"),
        dir.path().join("base_blush.png")
    );
}

/// A directory without the base sprite is a fatal startup error
#[test]
fn test_missing_base_is_fatal() {
    let dir = sprite_dir(&["base_blush.png", "base_pouting.png"]);
    let result = AssetCatalog::load(dir.path(), &CatalogOptions::default());

    let Err(error) = result else {
        panic!("catalog without base sprite must not load");
    };
    assert!(matches!(error, DeskmateError::MissingBaseAsset(_)));
    assert!(get_user_friendly_error(&error).contains("base.png"));
}

/// A missing directory is reported with its path
#[test]
fn test_missing_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let result = AssetCatalog::load(&missing, &CatalogOptions::default());
    assert!(matches!(result, Err(DeskmateError::AssetDirectoryMissing(p)) if p == missing));
}

/// A manifest takes precedence over file names
#[test]
fn test_manifest_directory() {
    let dir = sprite_dir(&["idle.png", "idle_side.png", "smile.png"]);
    std::fs::write(
        dir.path().join("manifest.json"),
        r#"{ "sprites": [
            { "pose": "expanded", "expression": "base", "path": "idle.png" },
            { "pose": "collapsed", "expression": "base", "path": "idle_side.png" },
            { "pose": "expanded", "expression": "happy", "path": "smile.png" }
        ] }"#,
    )
    .unwrap();

    let catalog = AssetCatalog::load(dir.path(), &CatalogOptions::default()).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.lookup(Pose::Expanded, "happy"),
        dir.path().join("smile.png")
    );
    assert_eq!(
        catalog.lookup(Pose::Collapsed, "happy"),
        dir.path().join("idle_side.png")
    );
}

/// A drag expression can be a face overlay on a non-default body
#[test]
fn test_drag_shows_overlay_on_negative_body() {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(60, 100, Rgba([0, 0, 255, 255]))
        .save(dir.path().join("normal.png"))
        .unwrap();
    RgbaImage::from_pixel(60, 100, Rgba([0, 255, 0, 255]))
        .save(dir.path().join("negative.png"))
        .unwrap();
    RgbaImage::from_fn(60, 100, |_, y| {
        if y < 50 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
    .save(dir.path().join("deadpan.png"))
    .unwrap();
    std::fs::write(
        dir.path().join("manifest.json"),
        r#"{ "sprites": [
            { "pose": "expanded", "expression": "base", "path": "normal.png" },
            { "pose": "expanded", "expression": "negative", "path": "negative.png" },
            { "pose": "expanded", "expression": "refuse", "path": "deadpan.png",
              "overlay": true, "base": "negative" }
        ] }"#,
    )
    .unwrap();

    let catalog = AssetCatalog::load(dir.path(), &CatalogOptions::default()).unwrap();
    let mut config = test_config();
    config.expressions.drag = "refuse".to_string();
    let mut renderer = SpriteRenderer::new(RenderOptions::from(&config.window));
    let mut controller = CompanionController::new(config, catalog, SCREEN);
    let t0 = Instant::now();

    controller.handle_event(
        InputEvent::PointerDown {
            button: PointerButton::Left,
            at: Point::new(320, 450),
        },
        t0,
    );
    controller.handle_event(
        InputEvent::PointerMove {
            at: Point::new(380, 450),
        },
        t0,
    );

    let sprite = controller.view(t0).sprite;
    assert_eq!(sprite.expression, "refuse");
    let image = renderer.render(controller.catalog(), &sprite);
    assert_eq!(image.get_pixel(30, 10).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(30, 80).0, [0, 255, 0, 255]);
}

/// Renderer output matches the window size for each pose
#[test]
fn test_rendered_sizes_follow_layout() {
    let dir = sprite_dir(&["base.png", "base_blush.png"]);
    let catalog = AssetCatalog::load(dir.path(), &CatalogOptions::default()).unwrap();
    let config = test_config();
    let mut renderer = SpriteRenderer::new(RenderOptions::from(&config.window));
    renderer.preload(&catalog);

    let expanded = renderer.render(&catalog, &SpriteKey::base());
    assert_eq!((expanded.width(), expanded.height()), (60, 100));

    let collapsed = renderer.render(
        &catalog,
        &SpriteKey {
            pose: Pose::Collapsed,
            expression: "blush".to_string(),
            edge: Edge::Right,
        },
    );
    // Rotated upper body: width is the kept height, height is the sprite width
    assert_eq!(collapsed.height(), 60);
    assert!(collapsed.width() < 100);
}

/// Config written to disk loads back with the same values
#[test]
fn test_config_persistence_integration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let mut config = test_config();
    config.assets.directory = "art/alt".into();
    ConfigManager::save_to(&config, &path).unwrap();

    let loaded = ConfigManager::load_from(&path).unwrap();
    assert_eq!(loaded.assets.directory, config.assets.directory);
    assert_eq!(loaded.dialog.seed, Some(42));
    assert_eq!(loaded.window.initial_position, Some(Point::new(300, 400)));
}

/// Full interaction pass: drag, talk, collapse, expand, quit
#[test]
fn test_companion_session() {
    let dir = sprite_dir(&["base.png", "base_annoyed.png", "base_blush.png"]);
    let catalog = AssetCatalog::load(dir.path(), &CatalogOptions::default()).unwrap();
    let mut controller = CompanionController::new(test_config(), catalog, SCREEN);
    let t0 = Instant::now();

    // Drag right by 200px
    controller.handle_event(
        InputEvent::PointerDown {
            button: PointerButton::Left,
            at: Point::new(320, 450),
        },
        t0,
    );
    controller.handle_event(
        InputEvent::PointerMove {
            at: Point::new(520, 450),
        },
        t0,
    );
    assert_eq!(controller.character().position(), Point::new(500, 400));
    assert_eq!(controller.character().expression(), "annoyed");
    controller.handle_event(
        InputEvent::PointerUp {
            button: PointerButton::Left,
            at: Point::new(520, 450),
        },
        t0,
    );
    assert_eq!(controller.character().expression(), "base");

    // Right-click talks
    controller.handle_event(
        InputEvent::PointerDown {
            button: PointerButton::Right,
            at: Point::new(520, 450),
        },
        t0,
    );
    assert!(controller.is_dialog_visible());
    assert!(controller.view(t0).dialog.is_some());

    // Double-click collapses to the left half's edge and hides the bubble
    controller.handle_event(InputEvent::DoubleClick, t0);
    assert_eq!(controller.character().pose(), Pose::Collapsed);
    assert_eq!(controller.character().collapsed_edge(), Edge::Left);
    assert_eq!(controller.character().position().x, 0);
    assert!(!controller.is_dialog_visible());

    // Double-click again restores the dragged position
    controller.handle_event(InputEvent::DoubleClick, t0);
    assert_eq!(controller.character().pose(), Pose::Expanded);
    assert_eq!(controller.character().position(), Point::new(500, 400));

    controller.handle_command(Command::Quit, t0);
    assert!(controller.quit_requested());
}

/// Same seed, same first line
#[test]
fn test_seeded_dialog_is_reproducible() {
    let dir = sprite_dir(&["base.png"]);
    let t0 = Instant::now();

    let first_line = || {
        let catalog = AssetCatalog::load(dir.path(), &CatalogOptions::default()).unwrap();
        let mut controller = CompanionController::new(test_config(), catalog, SCREEN);
        controller.handle_command(Command::SaySomething, t0);
        controller.tick(t0 + Duration::from_secs(5));
        controller
            .view(t0 + Duration::from_secs(5))
            .dialog
            .map(|d| d.text)
    };

    let a = first_line();
    assert!(a.is_some());
    assert_eq!(a, first_line());
}

/// Pomodoro panel runs a work session to the short-break prompt
#[test]
fn test_pomodoro_through_controller() {
    let dir = sprite_dir(&["base.png"]);
    let catalog = AssetCatalog::load(dir.path(), &CatalogOptions::default()).unwrap();
    let mut config = test_config();
    config.pomodoro.work_minutes = 1;
    let mut controller = CompanionController::new(config, catalog, SCREEN);
    let t0 = Instant::now();

    controller.handle_command(Command::TogglePomodoro, t0);
    controller.handle_command(Command::PomodoroMain, t0);
    controller.tick(t0);
    assert_eq!(controller.pomodoro().state(), PomodoroState::Work);

    controller.tick(t0 + Duration::from_secs(61));
    assert_eq!(
        controller.pomodoro().state(),
        PomodoroState::AwaitingShortBreak
    );
    assert!(controller.is_dialog_visible());

    let view = controller.view(t0 + Duration::from_secs(61));
    let panel = view.pomodoro.unwrap();
    assert_eq!(panel.main_label, "Start short break");
}
