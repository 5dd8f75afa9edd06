use super::*;

#[test]
fn transparent_frame_has_packed_zeroed_pixels() {
    let f = FrameRGBA::transparent(3, 2);
    assert_eq!(f.data.len(), 24);
    assert!(f.data.iter().all(|&b| b == 0));
    assert!(f.premultiplied);
    assert!(!f.is_empty());
    assert!(FrameRGBA::transparent(0, 4).is_empty());
}

#[test]
fn pixel_lookup_is_row_major_and_bounds_checked() {
    let mut f = FrameRGBA::transparent(2, 2);
    f.data[12..16].copy_from_slice(&[1, 2, 3, 4]);
    assert_eq!(f.pixel(1, 1), Some([1, 2, 3, 4]));
    assert_eq!(f.pixel(0, 1), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 2), None);
}

#[test]
fn straight_conversion_undoes_premultiplication() {
    let f = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![64, 32, 0, 128, 10, 20, 30, 255],
        premultiplied: true,
    };
    let straight = f.to_straight_rgba8();
    assert_eq!(&straight[4..8], &[10, 20, 30, 255]);
    assert_eq!(straight[3], 128);
    assert!((i32::from(straight[0]) - 128).abs() <= 1);
    assert!((i32::from(straight[1]) - 64).abs() <= 1);

    let already = FrameRGBA {
        premultiplied: false,
        ..f.clone()
    };
    assert_eq!(already.to_straight_rgba8(), f.data);
}
