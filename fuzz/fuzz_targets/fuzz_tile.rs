#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tilecodec::{unpack_native_tile, unpack_native_tiles, Target};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    target: u8,
    bpp: u8,
    width: u8,
    height: u8,
    bytes: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let target = Target::ALL[input.target as usize % Target::ALL.len()];
    let bpp = input.bpp as usize;
    let (width, height) = (input.width as usize, input.height as usize);

    // The decoders should never panic, regardless of input
    let _ = unpack_native_tile(&input.bytes, target, bpp, width, height);
    let _ = unpack_native_tiles(&input.bytes, target, bpp, width, height);
});
