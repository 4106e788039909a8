#![no_main]

use libfuzzer_sys::fuzz_target;
use tilecodec::{pack_native_colors, unpack_native_colors, Target};

fuzz_target!(|data: &[u8]| {
    for target in Target::ALL {
        // Unpacking must never panic; repacking restores every field bit
        if let Ok(colors) = unpack_native_colors(data, target) {
            let packed = pack_native_colors(&colors, target);
            assert_eq!(packed.len(), data.len());
        }
    }
});
