#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tilecodec::{pack_native_tile, unpack_native_tile, Target};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    target: u8,
    indices: [u8; 64],
}

fuzz_target!(|input: FuzzInput| {
    let target = [Target::Snes, Target::Gb, Target::Gbc, Target::Pce]
        [input.target as usize % 4];
    let bpp = target.default_bpp();
    let mask = ((1u16 << bpp) - 1) as u8;
    let indices: Vec<u8> = input.indices.iter().map(|i| i & mask).collect();

    let packed = match pack_native_tile(&indices, target, bpp, 8, 8) {
        Ok(p) => p,
        Err(_) => return,
    };
    let unpacked = unpack_native_tile(&packed, target, bpp, 8, 8).expect("packed tile decodes");
    assert_eq!(unpacked, indices);
});
