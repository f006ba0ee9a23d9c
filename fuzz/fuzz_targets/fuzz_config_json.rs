#![no_main]

use launchdeck::config::ConfigManager;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try to parse arbitrary bytes as a configuration document, exercising
    // the legacy migration and the custom collection deserializer.
    // Parsing may fail; it must never crash or panic.
    if let Ok(s) = std::str::from_utf8(data) {
        let _result = ConfigManager::parse(s);
    }
});
