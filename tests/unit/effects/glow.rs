use super::*;

#[test]
fn threshold_splits_opaque_copy_from_transparent() {
    let mut primary = PixelBuffer::new(4, 1).unwrap();
    let mut control = PixelBuffer::new(4, 1).unwrap();
    let greens = [0u8, 128, 129, 255];
    for (x, g) in greens.into_iter().enumerate() {
        let x = x as u32;
        primary.put(x, 0, [10 * x as u8 + 1, 20, 30, 77]);
        control.put(x, 0, [255, g, 255, 255]);
    }

    let glow = extract_glow(&control, &primary).unwrap();
    assert_eq!(glow.get(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(glow.get(1, 0), Some([0, 0, 0, 0]));
    assert_eq!(glow.get(2, 0), Some([21, 20, 30, 255]));
    assert_eq!(glow.get(3, 0), Some([31, 20, 30, 255]));
}

#[test]
fn copy_law_holds_for_every_pixel() {
    let mut primary = PixelBuffer::new(9, 7).unwrap();
    let mut control = PixelBuffer::new(9, 7).unwrap();
    for y in 0..7 {
        for x in 0..9 {
            primary.put(x, y, [(x * 20) as u8, (y * 30) as u8, 99, 3]);
            control.put(x, y, [0, ((x * 31 + y * 17) % 256) as u8, 0, 255]);
        }
    }
    let glow = extract_glow(&control, &primary).unwrap();
    for y in 0..7 {
        for x in 0..9 {
            let g = control.get(x, y).unwrap()[1];
            let p = primary.get(x, y).unwrap();
            let o = glow.get(x, y).unwrap();
            if g > GLOW_THRESHOLD {
                assert_eq!(o, [p[0], p[1], p[2], 255]);
            } else {
                assert_eq!(o[3], 0);
            }
        }
    }
}

#[test]
fn small_control_is_upscaled_to_output() {
    let primary = PixelBuffer::filled(40, 20, [5, 6, 7, 255]).unwrap();
    let control = PixelBuffer::filled(4, 2, [0, 255, 0, 255]).unwrap();
    let glow = extract_glow(&control, &primary).unwrap();
    assert_eq!(glow.dimensions(), (40, 20));
    assert!(glow.as_bytes().chunks_exact(4).all(|px| px == [5, 6, 7, 255]));
}
