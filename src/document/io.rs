//! JSON manifest loading and saving.
//!
//! A manifest lists textures by URI (relative to the manifest file), the links that bind them to
//! consumers, and the declared document extensions:
//!
//! ```json
//! {
//!   "textures": [{ "name": "albedo", "uri": "textures/albedo.png" }],
//!   "links": [{ "name": "baseColorTexture", "parent": "material/0", "texture": 0 }],
//!   "extensionsUsed": [],
//!   "extensionsRequired": []
//! }
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use anyhow::Context as _;

use crate::document::model::{Document, Texture, TextureId};
use crate::foundation::error::{SquooshError, SquooshResult};
use crate::foundation::paths::{
    extension_to_mime_type, mime_type_to_extension, normalize_rel_path, uri_extension,
};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestDef {
    #[serde(default)]
    textures: Vec<TextureDef>,
    #[serde(default)]
    links: Vec<LinkDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extensions_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extensions_required: Vec<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextureDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct LinkDef {
    name: String,
    #[serde(default)]
    parent: String,
    texture: usize,
}

impl Document {
    /// Parse a manifest from `r`, reading texture bytes relative to `base_dir`.
    pub fn from_reader<R: std::io::Read>(r: R, base_dir: &Path) -> SquooshResult<Self> {
        let def: ManifestDef = serde_json::from_reader(r)
            .map_err(|e| SquooshError::serde(format!("parse document manifest JSON: {e}")))?;

        let mut doc = Document::new();
        for tex in &def.textures {
            let rel = normalize_rel_path(&tex.uri)?;
            let path = base_dir.join(&rel);
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read texture '{}'", path.display()))?;
            let mime_type = match &tex.mime_type {
                Some(m) => m.clone(),
                None => sniff_mime_type(&bytes, &rel)?,
            };

            let mut texture = Texture::new(bytes, mime_type).with_uri(rel);
            texture.set_name(tex.name.clone());
            doc.add_texture(texture);
        }

        for link in def.links {
            doc.add_link(link.name, link.parent, TextureId(link.texture))?;
        }

        for ext in &def.extensions_used {
            doc.declare_extension(ext, def.extensions_required.contains(ext));
        }
        for ext in &def.extensions_required {
            doc.declare_extension(ext, true);
        }

        Ok(doc)
    }

    /// Load a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SquooshResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SquooshError::validation(format!("open document manifest '{}': {e}", path.display()))
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_reader(BufReader::new(f), base_dir)
    }

    /// Write the manifest to `path` and every texture payload next to it.
    ///
    /// Textures without a URI are written as `texture-{index}.{ext}`. When two textures would land
    /// on the same file (e.g. `a.png` and `a.jpg` both recompressed to `a.webp`), later ones get a
    /// numeric suffix (`a-1.webp`) and the manifest records the renamed URI.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> SquooshResult<()> {
        let path = path.as_ref();
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let mut textures = Vec::with_capacity(self.textures().len());
        let mut taken = HashSet::<String>::new();
        for (index, tex) in self.textures().iter().enumerate() {
            let wanted = match tex.uri() {
                Some(uri) => normalize_rel_path(uri)?,
                None => format!(
                    "texture-{index}.{}",
                    mime_type_to_extension(tex.mime_type())
                ),
            };
            let uri = claim_unique_uri(&wanted, &mut taken);
            let out = base_dir.join(&uri);
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory '{}'", parent.display())
                })?;
            }
            std::fs::write(&out, tex.image())
                .with_context(|| format!("write texture '{}'", out.display()))?;

            textures.push(TextureDef {
                name: tex.name().map(str::to_string),
                uri,
                mime_type: Some(tex.mime_type().to_string()),
            });
        }

        let def = ManifestDef {
            textures,
            links: self
                .links()
                .iter()
                .map(|l| LinkDef {
                    name: l.name.clone(),
                    parent: l.parent.clone(),
                    texture: l.child.0,
                })
                .collect(),
            extensions_used: self.extensions_used().to_vec(),
            extensions_required: self.extensions_required().to_vec(),
        };

        let f = File::create(path)
            .with_context(|| format!("create document manifest '{}'", path.display()))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, &def)
            .map_err(|e| SquooshError::serde(format!("write document manifest JSON: {e}")))?;
        w.flush()
            .with_context(|| format!("flush document manifest '{}'", path.display()))?;
        Ok(())
    }
}

// Keys are lowercased so names differing only in case do not collide on case-insensitive
// filesystems.
fn claim_unique_uri(wanted: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(wanted.to_lowercase()) {
        return wanted.to_string();
    }
    let ext = uri_extension(wanted);
    let stem = match ext {
        Some(ext) => &wanted[..wanted.len() - ext.len() - 1],
        None => wanted,
    };
    let mut n = 1usize;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{stem}-{n}.{ext}"),
            None => format!("{stem}-{n}"),
        };
        if taken.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}

fn sniff_mime_type(bytes: &[u8], uri: &str) -> SquooshResult<String> {
    if let Ok(format) = image::guess_format(bytes) {
        return Ok(format.to_mime_type().to_string());
    }
    uri_extension(uri)
        .map(extension_to_mime_type)
        .ok_or_else(|| {
            SquooshError::validation(format!(
                "cannot determine MIME type of texture '{uri}'; set \"mimeType\" in the manifest"
            ))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/document/io.rs"]
mod tests;
