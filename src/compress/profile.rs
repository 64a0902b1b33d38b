use crate::compress::select::{SelectionCriteria, WILDCARD};
use crate::foundation::error::{SquooshError, SquooshResult};

/// Document extension declaring WebP texture support.
pub const EXT_TEXTURE_WEBP: &str = "EXT_texture_webp";

/// Options for [`EncodeProfile::webp`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebpOptions {
    /// Slot glob, or `*`.
    pub slots: String,
    /// Input image subtype, or `*`.
    pub formats: String,
    /// Encoder quality (0-100); the encoder default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

impl Default for WebpOptions {
    fn default() -> Self {
        Self {
            slots: WILDCARD.to_string(),
            formats: WILDCARD.to_string(),
            quality: None,
        }
    }
}

/// Options for [`EncodeProfile::mozjpeg`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MozJpegOptions {
    /// Slot glob, or `*`.
    pub slots: String,
    /// Input image subtype, or `*`.
    pub formats: String,
    /// Encoder quality (0-100); the encoder default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

impl Default for MozJpegOptions {
    fn default() -> Self {
        Self {
            slots: WILDCARD.to_string(),
            formats: "jpeg".to_string(),
            quality: None,
        }
    }
}

/// Options for [`EncodeProfile::oxipng`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OxiPngOptions {
    /// Slot glob, or `*`.
    pub slots: String,
    /// Input image subtype, or `*`.
    pub formats: String,
    /// Optimization effort; the encoder default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effort: Option<u8>,
}

impl Default for OxiPngOptions {
    fn default() -> Self {
        Self {
            slots: WILDCARD.to_string(),
            formats: "png".to_string(),
            effort: None,
        }
    }
}

/// Options for [`EncodeProfile::to_webp`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToWebpOptions {
    /// Slot glob, or `*`.
    pub slots: String,
}

impl Default for ToWebpOptions {
    fn default() -> Self {
        Self {
            slots: WILDCARD.to_string(),
        }
    }
}

#[derive(serde::Serialize)]
struct QualityArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<u8>,
}

#[derive(serde::Serialize)]
struct EffortArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    effort: Option<u8>,
}

fn codec_args<T: serde::Serialize>(args: &T) -> SquooshResult<String> {
    serde_json::to_string(args)
        .map_err(|e| SquooshError::serde(format!("encode codec options: {e}")))
}

/// Everything one compression transform needs: which textures, which encoder flags, and what
/// the output looks like.
#[derive(Clone, Debug)]
pub struct EncodeProfile {
    /// Texture selection.
    pub criteria: SelectionCriteria,
    /// Encoder flags passed before `--output-dir`.
    pub flags: Vec<String>,
    /// Extension of encoded files, also written into texture URIs.
    pub out_extension: String,
    /// MIME type assigned to encoded textures.
    ///
    /// Canonical rather than `image/{out_extension}`: MozJPEG output is `image/jpeg` even though
    /// its files end in `.jpg`.
    pub out_mime_type: String,
}

impl EncodeProfile {
    /// Recompress selected textures to WebP.
    pub fn webp(opts: &WebpOptions) -> SquooshResult<Self> {
        Ok(Self {
            criteria: SelectionCriteria::new(&opts.formats, &opts.slots)?,
            flags: vec![
                "--webp".to_string(),
                codec_args(&QualityArgs {
                    quality: opts.quality,
                })?,
            ],
            out_extension: "webp".to_string(),
            out_mime_type: "image/webp".to_string(),
        })
    }

    /// Recompress selected textures (JPEG by default) with MozJPEG.
    pub fn mozjpeg(opts: &MozJpegOptions) -> SquooshResult<Self> {
        Ok(Self {
            criteria: SelectionCriteria::new(&opts.formats, &opts.slots)?,
            flags: vec![
                "--mozjpeg".to_string(),
                codec_args(&QualityArgs {
                    quality: opts.quality,
                })?,
            ],
            out_extension: "jpg".to_string(),
            out_mime_type: "image/jpeg".to_string(),
        })
    }

    /// Recompress selected textures (PNG by default) with OxiPNG.
    pub fn oxipng(opts: &OxiPngOptions) -> SquooshResult<Self> {
        Ok(Self {
            criteria: SelectionCriteria::new(&opts.formats, &opts.slots)?,
            flags: vec![
                "--oxipng".to_string(),
                codec_args(&EffortArgs {
                    effort: opts.effort,
                })?,
            ],
            out_extension: "png".to_string(),
            out_mime_type: "image/png".to_string(),
        })
    }

    /// Convert every texture that is not already WebP to WebP with encoder defaults.
    pub fn to_webp(opts: &ToWebpOptions) -> SquooshResult<Self> {
        Ok(Self {
            criteria: SelectionCriteria::new(WILDCARD, &opts.slots)?
                .excluding_mime_type("image/webp"),
            flags: vec!["--webp".to_string()],
            out_extension: "webp".to_string(),
            out_mime_type: "image/webp".to_string(),
        })
    }

    /// Document extension that must be declared required before textures are rewritten.
    pub fn required_extension(&self) -> Option<&'static str> {
        match self.out_mime_type.as_str() {
            "image/webp" => Some(EXT_TEXTURE_WEBP),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compress/profile.rs"]
mod tests;
