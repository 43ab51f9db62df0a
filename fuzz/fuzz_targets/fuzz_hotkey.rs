#![no_main]

use deskmate::utils::hotkey::{HotkeyBinding, KeyCode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsed bindings print back to a spec that parses to the same binding
        if let Ok(binding) = s.parse::<HotkeyBinding>() {
            let reparsed: HotkeyBinding = binding.to_string().parse().unwrap();
            assert_eq!(binding, reparsed);
        }
        let _ = KeyCode::from_key_text(s, true);
    }
});
