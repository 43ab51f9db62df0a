#![no_main]

use deskmate::assets::SpriteManifest;
use deskmate::assets::manifest::classify_file_name;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Manifest JSON and file-name classification must never panic
        let _ = SpriteManifest::parse(s, Path::new("manifest.json"));
        let _ = classify_file_name(s, "base");
    }
});
