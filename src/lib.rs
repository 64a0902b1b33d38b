//! squoosh-gltf recompresses the textures of a scene-graph document with the external
//! `squoosh-cli` encoder.
//!
//! # Pipeline overview
//!
//! 1. **Select**: `Document + SelectionCriteria -> [SelectedTexture]` (format and slot filters)
//! 2. **Encode**: `EncodeRequest -> bytes` through a [`TextureEncoder`] ([`SquooshCli`] in
//!    production, any stub in tests)
//! 3. **Apply**: write the bytes, MIME type and URI extension back onto each texture
//!
//! [`compress_textures`] runs all three for an [`EncodeProfile`]. Profiles are built from
//! per-codec options: [`EncodeProfile::webp`], [`EncodeProfile::mozjpeg`],
//! [`EncodeProfile::oxipng`] and [`EncodeProfile::to_webp`].
//!
//! Processing is sequential and blocking, and the first encoder failure aborts the run.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Batch texture recompression.
pub mod compress;
/// Minimal scene-graph document model.
pub mod document;

pub use crate::compress::driver::{NOTHING_SELECTED, compress_textures};
pub use crate::compress::encoder::{
    EncodeRequest, SQUOOSH_CLI, SQUOOSH_INSTALL_HINT, SquooshCli, SquooshCliOpts, TextureEncoder,
    input_extension,
};
pub use crate::compress::profile::{
    EXT_TEXTURE_WEBP, EncodeProfile, MozJpegOptions, OxiPngOptions, ToWebpOptions, WebpOptions,
};
pub use crate::compress::select::{
    SelectedTexture, SelectionCriteria, WILDCARD, select_textures, texture_label,
};
pub use crate::document::logger::{LogEntry, LogLevel, Logger, MemoryLogger, TracingLogger};
pub use crate::document::model::{Document, GENERIC_TEXTURE_SLOT, Link, Texture, TextureId};
pub use crate::foundation::error::{SquooshError, SquooshResult};
pub use crate::foundation::format::format_bytes;
pub use crate::foundation::paths::{
    mime_type_to_extension, normalize_rel_path, replace_uri_extension, uri_extension,
};
