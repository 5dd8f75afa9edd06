use super::*;

#[test]
fn kernel_is_normalized_and_spans_three_sigma() {
    for sigma in [0.4, 1.0, 2.5, 5.0] {
        let k = GaussianKernel::new(sigma).unwrap();
        let sum: u32 = k.weights().iter().sum();
        assert_eq!(sum, 1 << 16);
        assert_eq!(k.radius(), (sigma * 3.0_f64).ceil() as u32);
        assert_eq!(k.weights().len(), 2 * k.radius() as usize + 1);
    }
}

#[test]
fn kernel_is_symmetric_and_peaks_in_the_middle() {
    let k = GaussianKernel::new(2.0).unwrap();
    let w = k.weights();
    let mid = w.len() / 2;
    for i in 0..mid {
        assert!(w[i] <= w[i + 1]);
    }
    assert_eq!(w[0], w[w.len() - 1]);
}

#[test]
fn invalid_sigma_is_rejected() {
    assert!(GaussianKernel::new(-1.0).is_err());
    assert!(GaussianKernel::new(f64::NAN).is_err());
}

#[test]
fn zero_sigma_is_identity() {
    let k = GaussianKernel::new(0.0).unwrap();
    assert_eq!(k.radius(), 0);
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(k.blur(&src, 1, 2).unwrap(), src);
}

#[test]
fn mismatched_buffer_is_an_error() {
    let k = GaussianKernel::new(1.0).unwrap();
    let err = k.blur(&[0u8; 12], 2, 2).unwrap_err();
    assert!(err.to_string().starts_with("render error: "));
}

#[test]
fn single_pixel_spreads_and_keeps_its_energy() {
    let (w, h) = (15u32, 15u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((7 * w + 7) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = GaussianKernel::new(1.2).unwrap().blur(&src, w, h).unwrap();
    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    assert!(out[center + 3] < 255);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8);
}

#[test]
fn edges_fade_into_transparency() {
    let (w, h) = (6u32, 1u32);
    let src = [200u8, 200, 200, 200].repeat(6);
    let out = GaussianKernel::new(1.0).unwrap().blur(&src, w, h).unwrap();
    assert!(out[3] < 200);
    assert!(out[23] < 200);
    assert!(out[11] > out[3]);
}
