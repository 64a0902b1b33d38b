use crate::foundation::error::{SquooshError, SquooshResult};

fn file_name(uri: &str) -> &str {
    uri.rsplit(['/', '\\']).next().unwrap_or(uri)
}

/// Return the extension of the last path segment of `uri`, without the leading dot.
///
/// Returns `None` when the file name has no dot or the extension is empty.
pub fn uri_extension(uri: &str) -> Option<&str> {
    let name = file_name(uri);
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() { None } else { Some(ext) }
}

/// Replace the trailing extension of `uri` with `ext`, keeping any directory prefix.
///
/// A URI without an extension gets `ext` appended.
pub fn replace_uri_extension(uri: &str, ext: &str) -> String {
    let name = file_name(uri);
    let prefix = &uri[..uri.len() - name.len()];
    let stem = match name.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => name,
    };
    format!("{prefix}{stem}.{ext}")
}

/// Map an `image/*` MIME type to the file extension the encoder expects.
pub fn mime_type_to_extension(mime_type: &str) -> &str {
    if mime_type == "image/jpeg" {
        return "jpg";
    }
    mime_type.rsplit('/').next().unwrap_or(mime_type)
}

/// Map a file extension to its `image/*` MIME type.
pub fn extension_to_mime_type(ext: &str) -> String {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        other => format!("image/{other}"),
    }
}

/// Normalize and validate manifest-relative texture paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> SquooshResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SquooshError::validation("texture paths must be relative"));
    }
    if s.is_empty() {
        return Err(SquooshError::validation("texture path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SquooshError::validation(
                "texture paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SquooshError::validation(
            "texture path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/paths.rs"]
mod tests;
