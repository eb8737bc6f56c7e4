use std::io::Cursor;

use super::*;

fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let decoded = decode_image(&png_bytes(image::DynamicImage::ImageRgba8(img))).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_bytes(), &[100, 50, 200, 128]);
}

#[test]
fn decode_normalizes_rgb_and_gray_to_rgba() {
    let rgb = image::RgbImage::from_raw(1, 1, vec![1u8, 2, 3]).unwrap();
    let decoded = decode_image(&png_bytes(image::DynamicImage::ImageRgb8(rgb))).unwrap();
    assert_eq!(decoded.as_bytes(), &[1, 2, 3, 255]);

    let gray = image::GrayImage::from_raw(1, 1, vec![77u8]).unwrap();
    let decoded = decode_image(&png_bytes(image::DynamicImage::ImageLuma8(gray))).unwrap();
    assert_eq!(decoded.as_bytes(), &[77, 77, 77, 255]);
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn save_then_load_roundtrips_png() {
    let dir = PathBuf::from("target").join("unit_assets_io");
    let path = dir.join("roundtrip.png");
    let mut buf = PixelBuffer::filled(3, 2, [9, 8, 7, 255]).unwrap();
    buf.put(2, 1, [1, 2, 3, 4]);
    save_image(&buf, &path).unwrap();
    assert_eq!(load_image(&path).unwrap(), buf);
}

#[test]
fn load_missing_file_is_an_error() {
    assert!(load_image(Path::new("target/definitely/missing.png")).is_err());
}

#[test]
fn glow_path_inserts_suffix_before_extension() {
    assert_eq!(
        glow_output_path(Path::new("out/ship_diff.png")),
        PathBuf::from("out/ship_diff_glow.png")
    );
    assert_eq!(
        glow_output_path(Path::new("result")),
        PathBuf::from("result_glow")
    );
    assert_eq!(
        glow_output_path(Path::new("a.b.tga")),
        PathBuf::from("a.b_glow.tga")
    );
}
