use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_source_dispatches_on_type_and_content() {
    let raster = decode_source(Some("image/png"), &png_bytes(3, 2, [1, 2, 3, 255])).unwrap();
    assert!(matches!(raster, PreparedSource::Raster(_)));
    assert_eq!(raster.intrinsic_size(), (3.0, 2.0));

    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"></svg>"#;
    let by_content = decode_source(None, svg).unwrap();
    assert!(matches!(by_content, PreparedSource::Svg(_)));
    assert_eq!(by_content.intrinsic_size(), (40.0, 20.0));

    let by_type = decode_source(Some("image/svg+xml"), svg).unwrap();
    assert!(matches!(by_type, PreparedSource::Svg(_)));
}

#[test]
fn garbage_is_a_decode_error() {
    assert!(decode_source(Some("image/png"), b"not an image").is_err());
    assert!(parse_svg(br#"<svg"#).is_err());
}

#[test]
fn svg_rasterizes_at_requested_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2">
        <rect width="2" height="2" fill="#ff0000"/></svg>"##;
    let prepared = parse_svg(svg).unwrap();
    let img = rasterize_svg(&prepared, 8, 4).unwrap();
    assert_eq!((img.width, img.height), (8, 4));
    assert_eq!(img.rgba8_premul.len(), 8 * 4 * 4);
    let center = ((2 * 8 + 4) * 4) as usize;
    assert_eq!(&img.rgba8_premul[center..center + 4], &[255, 0, 0, 255]);

    assert!(rasterize_svg(&prepared, 0, 4).is_err());
}

#[test]
fn svg_region_renders_only_the_requested_window() {
    // Left half red, right half blue.
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="1">
        <rect width="1" height="1" fill="#ff0000"/>
        <rect x="1" width="1" height="1" fill="#0000ff"/></svg>"##;
    let prepared = parse_svg(svg).unwrap();

    let img = rasterize_svg_region(&prepared, 2000.0, 1000.0, Rect::new(1500.0, 0.0, 1510.0, 4.0))
        .unwrap();
    assert_eq!((img.width, img.height), (10, 4));
    assert!(img.rgba8_premul.chunks_exact(4).all(|p| p == [0, 0, 255, 255]));

    let img = rasterize_svg_region(&prepared, 2000.0, 1000.0, Rect::new(10.0, 10.0, 14.0, 12.0))
        .unwrap();
    assert!(img.rgba8_premul.chunks_exact(4).all(|p| p == [255, 0, 0, 255]));

    assert!(rasterize_svg_region(&prepared, 2000.0, 1000.0, Rect::ZERO).is_err());
}
