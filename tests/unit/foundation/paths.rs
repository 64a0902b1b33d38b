use super::*;

#[test]
fn uri_extension_reads_last_segment_only() {
    assert_eq!(uri_extension("foo.png"), Some("png"));
    assert_eq!(uri_extension("textures/a.b/foo.JPG"), Some("JPG"));
    assert_eq!(uri_extension("dir.d/noext"), None);
    assert_eq!(uri_extension("trailing."), None);
    assert_eq!(uri_extension("win\\dir\\foo.jpeg"), Some("jpeg"));
}

#[test]
fn replace_uri_extension_keeps_prefix_and_stem() {
    assert_eq!(replace_uri_extension("foo.png", "webp"), "foo.webp");
    assert_eq!(
        replace_uri_extension("textures/albedo.v2.png", "webp"),
        "textures/albedo.v2.webp"
    );
    assert_eq!(replace_uri_extension("textures/raw", "png"), "textures/raw.png");
}

#[test]
fn mime_type_mapping_special_cases_jpeg() {
    assert_eq!(mime_type_to_extension("image/jpeg"), "jpg");
    assert_eq!(mime_type_to_extension("image/png"), "png");
    assert_eq!(mime_type_to_extension("image/webp"), "webp");
    assert_eq!(mime_type_to_extension("image/ktx2"), "ktx2");

    assert_eq!(extension_to_mime_type("JPG"), "image/jpeg");
    assert_eq!(extension_to_mime_type("png"), "image/png");
}

#[test]
fn normalize_rel_path_rejects_escapes() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
}
