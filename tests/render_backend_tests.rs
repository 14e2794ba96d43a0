use std::fs;
use std::path::Path;

use approx::assert_relative_eq;

use chart_export_rs::core::PageBounds;
use chart_export_rs::decode::{DecodeOptions, Picture};
use chart_export_rs::error::ExportError;
use chart_export_rs::render::{NullPageRenderer, PageRenderer, PdfPageRenderer};

const CHART_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300" viewBox="0 0 400 300"><rect x="0" y="0" width="400" height="300" fill="#f0f0f0"/><path d="M 20 280 L 120 160 L 220 200 L 380 40" stroke="#2962ff" stroke-width="4" fill="none"/></svg>"##;

fn decode_fixture() -> Picture {
    Picture::decode_str(
        CHART_SVG,
        Path::new("chart.svg"),
        &DecodeOptions {
            load_system_fonts: false,
        },
    )
    .expect("decode fixture")
}

/// Width and height of the first `/MediaBox` entry in the document.
fn media_box_size(pdf: &[u8]) -> (f64, f64) {
    let text = String::from_utf8_lossy(pdf);
    let start = text.find("/MediaBox").expect("pdf has a MediaBox");
    let open = text[start..].find('[').expect("media box opens") + start;
    let close = text[open..].find(']').expect("media box closes") + open;
    let numbers: Vec<f64> = text[open + 1..close]
        .split_whitespace()
        .map(|token| token.parse().expect("media box number"))
        .collect();
    assert_eq!(numbers.len(), 4, "media box carries four coordinates");
    (numbers[2] - numbers[0], numbers[3] - numbers[1])
}

#[test]
fn renders_one_page_sized_to_picture_bounds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let destination = dir.path().join("chart.pdf");
    let picture = decode_fixture();

    let mut renderer = PdfPageRenderer::new();
    let byte_size = renderer
        .render_single_page(&picture, picture.bounds(), &destination)
        .expect("render");

    let bytes = fs::read(&destination).expect("read pdf");
    assert_eq!(byte_size, bytes.len() as u64);
    assert_eq!(renderer.last_byte_size(), Some(byte_size));
    assert!(bytes.starts_with(b"%PDF-"), "output must be a pdf document");

    let (width, height) = media_box_size(&bytes);
    assert_relative_eq!(width, 400.0, max_relative = 1e-2);
    assert_relative_eq!(height, 300.0, max_relative = 1e-2);
}

#[test]
fn non_positive_bounds_fail_before_any_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let destination = dir.path().join("chart.pdf");
    let picture = decode_fixture();

    let mut renderer = PdfPageRenderer::new();
    let err = renderer
        .render_single_page(&picture, PageBounds::new(0.0, 300.0), &destination)
        .expect_err("zero width must fail");

    assert!(matches!(err, ExportError::Render { .. }));
    assert!(!destination.exists());
}

#[test]
fn unwritable_destination_directory_fails_without_partial_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let destination = dir.path().join("missing-subdir").join("chart.pdf");
    let picture = decode_fixture();

    let mut renderer = PdfPageRenderer::new();
    let err = renderer
        .render_single_page(&picture, picture.bounds(), &destination)
        .expect_err("missing directory must fail");

    assert!(matches!(err, ExportError::Render { .. }));
    assert!(!destination.exists());
}

#[test]
fn render_failure_leaves_existing_destination_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let destination = dir.path().join("chart.pdf");
    fs::write(&destination, b"previous contents").expect("seed destination");
    let picture = decode_fixture();

    let mut renderer = PdfPageRenderer::new();
    renderer
        .render_single_page(&picture, PageBounds::new(-1.0, -1.0), &destination)
        .expect_err("invalid bounds must fail");

    let contents = fs::read(&destination).expect("read destination");
    assert_eq!(contents, b"previous contents");
}

#[test]
fn null_renderer_records_the_requested_page() {
    let dir = tempfile::tempdir().expect("tempdir");
    let destination = dir.path().join("chart.pdf");
    let picture = decode_fixture();

    let mut renderer = NullPageRenderer::default();
    renderer
        .render_single_page(&picture, picture.bounds(), &destination)
        .expect("null render");

    assert_eq!(renderer.pages_rendered, 1);
    assert_eq!(renderer.last_destination.as_deref(), Some(destination.as_path()));
    let bounds = renderer.last_bounds.expect("recorded bounds");
    assert_relative_eq!(bounds.width, 400.0, max_relative = 1e-3);
    assert!(!destination.exists(), "null renderer must not touch the filesystem");
}

#[test]
fn null_renderer_still_enforces_bounds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let destination = dir.path().join("chart.pdf");
    let picture = decode_fixture();

    let mut renderer = NullPageRenderer::default();
    let err = renderer
        .render_single_page(&picture, PageBounds::new(f64::NAN, 10.0), &destination)
        .expect_err("nan bounds must fail");
    assert!(matches!(err, ExportError::Render { .. }));
}
