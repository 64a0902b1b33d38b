use crate::compress::encoder::{EncodeRequest, TextureEncoder};
use crate::compress::profile::EncodeProfile;
use crate::compress::select::select_textures;
use crate::document::model::Document;
use crate::foundation::error::{SquooshError, SquooshResult};
use crate::foundation::format::format_bytes;
use crate::foundation::paths::replace_uri_extension;

/// Warning logged when a run rewrites no texture.
pub const NOTHING_SELECTED: &str = "No textures were found, or none were selected for compression.";

/// Recompress every texture `profile` selects, in document order, returning how many were
/// rewritten.
///
/// Runs are all-or-nothing per texture but not per batch: the first encoder error is returned
/// as-is, textures rewritten before it stay rewritten, and later textures are not attempted.
#[tracing::instrument(skip_all, fields(out = %profile.out_extension))]
pub fn compress_textures(
    doc: &mut Document,
    profile: &EncodeProfile,
    encoder: &dyn TextureEncoder,
) -> SquooshResult<usize> {
    encoder.check_available()?;

    if let Some(ext) = profile.required_extension() {
        doc.declare_extension(ext, true);
    }

    let selected = select_textures(doc, &profile.criteria);
    let mut num_compressed = 0usize;

    for entry in selected {
        let texture = doc.texture(entry.id).ok_or_else(|| {
            SquooshError::validation(format!("texture {} vanished during compression", entry.id.0))
        })?;
        let in_bytes = texture.image().len() as u64;

        let request = EncodeRequest::for_texture(texture, &profile.flags, &profile.out_extension);
        let encoded = match encoder.encode(&request, doc.logger()) {
            Ok(bytes) => bytes,
            Err(e) => {
                doc.logger().error("• Texture compression failed.");
                return Err(e);
            }
        };

        let texture = doc.texture_mut(entry.id).ok_or_else(|| {
            SquooshError::validation(format!("texture {} vanished during compression", entry.id.0))
        })?;
        let uri = texture
            .uri()
            .map(|uri| replace_uri_extension(uri, &profile.out_extension));
        texture
            .set_image(encoded)
            .set_mime_type(profile.out_mime_type.as_str());
        if uri.is_some() {
            texture.set_uri(uri);
        }
        let out_bytes = texture.image().len() as u64;
        num_compressed += 1;

        doc.logger().info(&format!(
            "• Texture {} ({}) {} → {}.",
            entry.label,
            entry.slots.join(", "),
            format_bytes(in_bytes),
            format_bytes(out_bytes)
        ));
    }

    if num_compressed == 0 {
        doc.logger().warn(NOTHING_SELECTED);
    }

    Ok(num_compressed)
}

#[cfg(test)]
#[path = "../../tests/unit/compress/driver.rs"]
mod tests;
