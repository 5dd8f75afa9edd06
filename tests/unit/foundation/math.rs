use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn unpremultiply_handles_edges() {
    assert_eq!(unpremultiply_rgba8([0, 0, 0, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremultiply_rgba8([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(unpremultiply_rgba8([64, 0, 128, 128]), [128, 0, 255, 128]);
}
