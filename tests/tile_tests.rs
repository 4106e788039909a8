use pretty_assertions::assert_eq;
use tilecodec::*;

fn pattern_tile(len: usize, bpp: usize, seed: usize) -> Vec<u8> {
    let colors = 1usize << bpp;
    (0..len).map(|i| ((i * 37 + seed * 11 + i / 8) % colors) as u8).collect()
}

#[test]
fn test_round_trip_interleaved() {
    let cases = [
        (Target::Snes, 2),
        (Target::Snes, 4),
        (Target::Snes, 8),
        (Target::Gb, 2),
        (Target::Gbc, 2),
        (Target::Pce, 4),
    ];
    for (target, bpp) in cases {
        for seed in 0..16 {
            let indices = pattern_tile(64, bpp, seed);
            let packed = pack_native_tile(&indices, target, bpp, 8, 8).unwrap();
            assert_eq!(packed.len(), bpp / 2 * 16);
            assert_eq!(packed.len(), native_tile_size(target, bpp, 8, 8));
            let unpacked = unpack_native_tile(&packed, target, bpp, 8, 8).unwrap();
            assert_eq!(unpacked, indices, "{target} {bpp}bpp seed {seed}");
        }
    }
}

#[test]
fn test_round_trip_mode7() {
    let indices = pattern_tile(64 * 64, 8, 3);
    let packed = pack_native_tile(&indices, Target::SnesMode7, 8, 64, 64).unwrap();
    assert_eq!(packed, indices);
    assert_eq!(
        unpack_native_tile(&packed, Target::SnesMode7, 8, 64, 64).unwrap(),
        indices
    );
}

#[test]
fn test_gbc_zero_tile() {
    let packed = pack_native_tile(&[0u8; 64], Target::Gbc, 2, 8, 8).unwrap();
    assert_eq!(packed, vec![0u8; 16]);
}

#[test]
fn test_gbc_solid_tile() {
    let packed = pack_native_tile(&[3u8; 64], Target::Gbc, 2, 8, 8).unwrap();
    assert_eq!(packed, vec![0xffu8; 16]);
}

#[test]
fn test_snes_4bpp_layout() {
    let mut indices = vec![0u8; 64];
    indices[0] = 0x0f;
    indices[9] = 0x05; // (1,1)
    let packed = pack_native_tile(&indices, Target::Snes, 4, 8, 8).unwrap();

    let mut expected = vec![0u8; 32];
    expected[0] = 0x80;
    expected[1] = 0x80;
    expected[2] = 0x40; // row 1, plane 0
    expected[16] = 0x80;
    expected[17] = 0x80;
    expected[18] = 0x40; // row 1, plane 2
    assert_eq!(packed, expected);
}

#[test]
fn test_empty_input_packs_zero_blocks() {
    assert_eq!(
        pack_native_tile(&[], Target::Snes, 4, 8, 8).unwrap(),
        vec![0u8; 32]
    );
    assert_eq!(
        pack_native_tile(&[], Target::Pce, 4, 8, 8).unwrap(),
        vec![0u8; 32]
    );
}

#[test]
fn test_invalid_geometry() {
    let indices = vec![0u8; 128];
    assert_eq!(
        pack_native_tile(&indices, Target::Snes, 4, 16, 8),
        Err(TileCodecError::InvalidTileGeometry {
            target: Target::Snes,
            width: 16,
            height: 8,
        })
    );
    assert!(matches!(
        pack_native_tile(&indices, Target::Pce, 4, 8, 16),
        Err(TileCodecError::InvalidTileGeometry { .. })
    ));
    assert!(matches!(
        unpack_native_tile(&[0u8; 32], Target::Gbc, 2, 16, 16),
        Err(TileCodecError::InvalidTileGeometry { .. })
    ));
}

#[test]
fn test_mode7_ignores_geometry() {
    let indices = pattern_tile(64 * 64, 8, 1);
    assert!(pack_native_tile(&indices, Target::SnesMode7, 8, 64, 64).is_ok());
    assert!(pack_native_tile(&indices, Target::SnesMode7, 4, 3, 5).is_ok());
}

#[test]
fn test_wrong_index_count() {
    assert!(matches!(
        pack_native_tile(&[0u8; 63], Target::Snes, 4, 8, 8),
        Err(TileCodecError::InvalidInputSize { len: 63, .. })
    ));
    assert!(matches!(
        unpack_native_tile(&[0u8; 16], Target::Snes, 4, 8, 8),
        Err(TileCodecError::InvalidInputSize { len: 16, .. })
    ));
}

#[test]
fn test_invalid_bit_depth() {
    assert_eq!(
        pack_native_tile(&[0u8; 64], Target::Snes, 10, 8, 8),
        Err(TileCodecError::InvalidBitDepth {
            target: Target::Snes,
            bpp: 10,
        })
    );
    assert!(matches!(
        unpack_native_tile(&[0u8; 16], Target::Gb, 0, 8, 8),
        Err(TileCodecError::InvalidBitDepth { .. })
    ));
}

#[test]
fn test_sprite_planes() {
    let indices: Vec<u8> = (0..256).map(|i| (i % 16) as u8).collect();
    let packed = pack_native_tile(&indices, Target::PceSprite, 4, 16, 16).unwrap();
    assert_eq!(packed.len(), 128);
    assert_eq!(packed.len(), native_tile_size(Target::PceSprite, 4, 16, 16));

    assert!(packed[0..32].iter().all(|&b| b == 0xaa));
    assert!(packed[32..64].iter().all(|&b| b == 0xcc));
    assert!(packed[64..96].iter().all(|&b| b == 0xf0));
    let plane3: Vec<u8> = (0..32).map(|k| if k % 2 == 1 { 0xff } else { 0x00 }).collect();
    assert_eq!(&packed[96..128], plane3.as_slice());
}

#[test]
fn test_sprite_requires_groups_of_eight() {
    assert_eq!(
        pack_native_tile(&[1u8; 7], Target::PceSprite, 4, 16, 16),
        Err(TileCodecError::InvalidInputSize {
            target: Target::PceSprite,
            len: 7,
            multiple: 8,
        })
    );
}

#[test]
fn test_sprite_decode_not_implemented() {
    let result = unpack_native_tile(&[0u8; 128], Target::PceSprite, 4, 16, 16);
    assert!(matches!(
        result,
        Err(TileCodecError::NotImplemented {
            target: Target::PceSprite,
            ..
        })
    ));
}

#[test]
fn test_unsupported_target_degrades() {
    assert!(pack_native_tile(&[1u8; 64], Target::None, 4, 8, 8).unwrap().is_empty());
    assert_eq!(
        unpack_native_tile(&[0xffu8; 32], Target::None, 4, 16, 8).unwrap(),
        vec![0u8; 128]
    );
    assert_eq!(native_tile_size(Target::None, 4, 8, 8), 0);
    assert!(unpack_native_tiles(&[0u8; 32], Target::None, 4, 8, 8)
        .unwrap()
        .is_empty());
}

#[test]
fn test_unpack_tile_stream() {
    let tiles: Vec<Vec<u8>> = (0..3).map(|seed| pattern_tile(64, 2, seed)).collect();
    let mut stream = Vec::new();
    for tile in &tiles {
        stream.extend(pack_native_tile(tile, Target::Gbc, 2, 8, 8).unwrap());
    }
    assert_eq!(stream.len(), 48);
    assert_eq!(
        unpack_native_tiles(&stream, Target::Gbc, 2, 8, 8).unwrap(),
        tiles
    );

    stream.pop();
    assert!(matches!(
        unpack_native_tiles(&stream, Target::Gbc, 2, 8, 8),
        Err(TileCodecError::InvalidInputSize {
            len: 47,
            multiple: 16,
            ..
        })
    ));
}

#[test]
fn test_odd_bit_depth_rejected() {
    for bpp in [1, 3, 5, 7] {
        assert_eq!(
            pack_native_tile(&[1u8; 64], Target::Snes, bpp, 8, 8),
            Err(TileCodecError::InvalidBitDepth {
                target: Target::Snes,
                bpp,
            })
        );
        assert!(matches!(
            unpack_native_tile(&[0xffu8; 64], Target::Snes, bpp, 8, 8),
            Err(TileCodecError::InvalidBitDepth { .. })
        ));
        assert!(matches!(
            unpack_native_tiles(&[0xffu8; 32], Target::Snes, bpp, 8, 8),
            Err(TileCodecError::InvalidBitDepth { .. })
        ));
    }
}

#[test]
fn test_empty_geometry_stream_fails() {
    assert!(matches!(
        unpack_native_tiles(&[1u8; 16], Target::SnesMode7, 8, 0, 8),
        Err(TileCodecError::InvalidTileGeometry { width: 0, .. })
    ));
}

#[test]
fn test_unsupported_target_huge_geometry() {
    let tile = unpack_native_tile(&[], Target::None, 4, usize::MAX, 2).unwrap();
    assert!(tile.is_empty());
    assert_eq!(native_tile_size(Target::SnesMode7, 8, usize::MAX, 2), usize::MAX);
}
