use super::*;

#[test]
fn tile_errors_become_decode_errors() {
    assert!(matches!(tile_error(TileError::BadMagic), ApiError::Decode(_)));
}
