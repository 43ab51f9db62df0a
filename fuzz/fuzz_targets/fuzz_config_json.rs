#![no_main]

use deskmate::config::AppConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes parsed as AppConfig must never panic
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = serde_json::from_str::<AppConfig>(s) {
            // Accepted configs must survive the derived geometry math
            let _ = deskmate::character::collapsed_size(
                config.window.sprite_size,
                config.window.collapsed_fraction,
            );
        }
    }
});
