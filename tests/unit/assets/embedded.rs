use super::*;

#[test]
fn png_bytes_wrap_into_a_png_data_url() {
    let img = EmbeddedImage::from_png_bytes(&[1, 2, 3]);
    assert!(img.as_str().starts_with("data:image/png;base64,"));
    assert_eq!(img.decode_bytes().unwrap(), vec![1, 2, 3]);
}

#[test]
fn url_safe_alphabet_is_accepted() {
    // 0xfb 0xff encodes to "-_8=" in the URL-safe alphabet.
    let img = EmbeddedImage::new("data:image/png;base64,-_8=");
    assert_eq!(img.decode_bytes().unwrap(), vec![0xfb, 0xff]);
}

#[test]
fn malformed_urls_are_rejected() {
    assert!(EmbeddedImage::new("iVBORw0KGgo=").decode_bytes().is_err());
    assert!(EmbeddedImage::new("data:image/png;base64").decode_bytes().is_err());
    assert!(
        EmbeddedImage::new("data:image/png;base64,***")
            .decode_bytes()
            .is_err()
    );
}

#[test]
fn non_base64_payloads_are_percent_decoded() {
    let img = EmbeddedImage::new("data:image/svg+xml,%3Csvg%2F%3e x");
    assert_eq!(img.decode_bytes().unwrap(), b"<svg/> x".to_vec());
    assert!(EmbeddedImage::new("data:,%4").decode_bytes().is_err());
    assert!(EmbeddedImage::new("data:,%zz").decode_bytes().is_err());
}

#[test]
fn debug_output_elides_payload() {
    let img = EmbeddedImage::from_png_bytes(&[0u8; 64]);
    let dbg = format!("{img:?}");
    assert!(dbg.contains("data:image/png;base64"));
    assert!(!dbg.contains("AAAA"));
}

#[test]
fn empty_and_whitespace_payloads_are_empty() {
    assert!(EmbeddedImage::new("  ").is_empty());
    assert!(!EmbeddedImage::from_png_bytes(&[1]).is_empty());
}
