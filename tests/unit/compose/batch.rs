use std::io::Cursor;

use super::*;
use crate::assets::embedded::EmbeddedImage;
use crate::foundation::core::{Slot, View};
use crate::plan::source::{TransformMap, TransformSource};

fn png_url(w: u32, h: u32, rgba: [u8; 4]) -> EmbeddedImage {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    EmbeddedImage::from_png_bytes(&buf)
}

fn requests() -> Vec<CompositeRequest> {
    let mut map = TransformMap::new();
    map.insert(
        "top_front".to_string(),
        serde_json::json!({ "x": 8, "y": 8, "r": 30, "o": 0.75 })
            .as_object()
            .unwrap()
            .clone(),
    );
    vec![
        CompositeRequest::new(png_url(16, 16, [0, 0, 255, 255]))
            .with_garment(Slot::Top.key(View::Front), png_url(6, 4, [255, 0, 0, 255]))
            .with_source(TransformSource::view_scoped(map)),
        CompositeRequest::default(),
        CompositeRequest::new(png_url(5, 7, [9, 9, 9, 255])),
    ]
}

#[test]
fn sequential_batch_keeps_order_and_isolates_failures() {
    let out = composite_batch(
        &requests(),
        &LayerOrder::standard(),
        &ComposeOpts::default(),
        &BatchOpts::default(),
    )
    .unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].as_ref().unwrap().report.drawn.len(), 1);
    assert!(matches!(out[1], Err(DressError::Input(_))));
    assert_eq!(out[2].as_ref().unwrap().report.width, 5);
}

#[test]
fn parallel_batch_matches_sequential_bytes() {
    let reqs = requests();
    let order = LayerOrder::standard();
    let opts = ComposeOpts::default();
    let seq = composite_batch(&reqs, &order, &opts, &BatchOpts::default()).unwrap();
    let par = composite_batch(
        &reqs,
        &order,
        &opts,
        &BatchOpts {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();

    assert_eq!(seq.len(), par.len());
    for (a, b) in seq.iter().zip(par.iter()) {
        match (a, b) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(_), Err(_)) => {}
            _ => panic!("sequential and parallel outcomes differ"),
        }
    }
}

#[test]
fn zero_threads_is_rejected() {
    let err = composite_batch(
        &[],
        &LayerOrder::standard(),
        &ComposeOpts::default(),
        &BatchOpts {
            parallel: true,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, DressError::Validation(_)));
}
