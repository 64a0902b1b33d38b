use super::*;

fn doc_with_two_textures() -> (Document, TextureId, TextureId) {
    let mut doc = Document::new();
    let a = doc.add_texture(Texture::new(vec![1, 2, 3], "image/png").with_uri("a.png"));
    let b = doc.add_texture(Texture::new(vec![4], "image/jpeg").with_name("b"));
    (doc, a, b)
}

#[test]
fn texture_ids_are_positional() {
    let (doc, a, b) = doc_with_two_textures();
    assert_eq!(a, TextureId(0));
    assert_eq!(b, TextureId(1));
    assert_eq!(doc.texture(a).unwrap().uri(), Some("a.png"));
    assert_eq!(doc.texture(b).unwrap().name(), Some("b"));
    assert!(doc.texture(TextureId(2)).is_none());
}

#[test]
fn slots_skip_generic_binding_and_duplicates() {
    let (mut doc, a, b) = doc_with_two_textures();
    doc.add_link("baseColorTexture", "material/0", a).unwrap();
    doc.add_link("texture", "sampler/0", a).unwrap();
    doc.add_link("emissiveTexture", "material/0", a).unwrap();
    doc.add_link("baseColorTexture", "material/1", a).unwrap();
    doc.add_link("normalTexture", "material/1", b).unwrap();

    assert_eq!(
        doc.texture_slots(a),
        vec!["baseColorTexture".to_string(), "emissiveTexture".to_string()]
    );
    assert_eq!(doc.texture_slots(b), vec!["normalTexture".to_string()]);
}

#[test]
fn link_to_missing_texture_is_rejected() {
    let (mut doc, _, _) = doc_with_two_textures();
    assert!(doc.add_link("normalTexture", "material/0", TextureId(5)).is_err());
    assert!(doc.links().is_empty());
}

#[test]
fn declare_extension_is_idempotent_and_required_is_sticky() {
    let mut doc = Document::new();
    doc.declare_extension("EXT_texture_webp", true);
    doc.declare_extension("EXT_texture_webp", false);
    doc.declare_extension("KHR_texture_transform", false);

    assert_eq!(
        doc.extensions_used(),
        &["EXT_texture_webp".to_string(), "KHR_texture_transform".to_string()]
    );
    assert_eq!(doc.extensions_required(), &["EXT_texture_webp".to_string()]);
}

#[test]
fn empty_uri_and_name_read_as_absent() {
    let mut tex = Texture::new(vec![], "image/png");
    tex.set_uri(Some(String::new())).set_name(Some(String::new()));
    assert_eq!(tex.uri(), None);
    assert_eq!(tex.name(), None);
}
