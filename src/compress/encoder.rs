use std::ffi::OsString;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::document::logger::Logger;
use crate::document::model::Texture;
use crate::foundation::error::{SquooshError, SquooshResult};
use crate::foundation::paths::{mime_type_to_extension, uri_extension};

/// Default encoder executable.
pub const SQUOOSH_CLI: &str = "squoosh-cli";

/// Where [`SQUOOSH_CLI`] is installed from, quoted in "not found" errors.
pub const SQUOOSH_INSTALL_HINT: &str = "\"@squoosh/cli\" from NPM";

/// One texture's worth of work for a [`TextureEncoder`].
#[derive(Clone, Debug)]
pub struct EncodeRequest<'a> {
    /// Encoded input image.
    pub image: &'a [u8],
    /// File extension the input is staged with, so the encoder can infer its format.
    pub input_extension: String,
    /// Opaque encoder flags, e.g. `["--webp", "{\"quality\":80}"]`.
    pub flags: &'a [String],
    /// Extension of the file the encoder writes.
    pub output_extension: &'a str,
}

impl<'a> EncodeRequest<'a> {
    /// Build a request for `texture`, resolving its input extension.
    pub fn for_texture(
        texture: &'a Texture,
        flags: &'a [String],
        output_extension: &'a str,
    ) -> Self {
        Self {
            image: texture.image(),
            input_extension: input_extension(texture).to_string(),
            flags,
            output_extension,
        }
    }
}

/// Extension of the texture's URI when it has one, otherwise derived from its MIME type.
pub fn input_extension(texture: &Texture) -> &str {
    texture
        .uri()
        .and_then(uri_extension)
        .unwrap_or_else(|| mime_type_to_extension(texture.mime_type()))
}

/// Recompresses one image at a time.
pub trait TextureEncoder {
    /// Fail early when the encoder cannot run at all.
    fn check_available(&self) -> SquooshResult<()> {
        Ok(())
    }

    /// Encode `request.image`, returning the new bytes. Any error is fatal for the batch.
    ///
    /// `logger` is the document's logger; encoder diagnostics go there.
    fn encode(&self, request: &EncodeRequest<'_>, logger: &dyn Logger) -> SquooshResult<Vec<u8>>;
}

/// Options for [`SquooshCli`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SquooshCliOpts {
    /// Executable name (looked up on `PATH`) or path.
    pub program: PathBuf,
    /// Skip the `PATH` lookup in [`TextureEncoder::check_available`].
    pub skip_availability_check: bool,
}

impl Default for SquooshCliOpts {
    fn default() -> Self {
        Self {
            program: PathBuf::from(SQUOOSH_CLI),
            skip_availability_check: false,
        }
    }
}

impl SquooshCliOpts {
    /// Defaults, with the availability check skipped when the `CI` environment marker is set.
    pub fn from_env() -> Self {
        Self {
            skip_availability_check: std::env::var_os("CI").is_some_and(|v| !v.is_empty()),
            ..Self::default()
        }
    }
}

/// [`TextureEncoder`] that runs the external `squoosh-cli` once per texture.
///
/// The input is staged to a named temporary file and the encoder writes into a fresh temporary
/// directory; both are removed when [`TextureEncoder::encode`] returns.
#[derive(Clone, Debug, Default)]
pub struct SquooshCli {
    opts: SquooshCliOpts,
}

impl SquooshCli {
    /// Create an encoder with explicit options.
    pub fn new(opts: SquooshCliOpts) -> Self {
        Self { opts }
    }

    /// Create an encoder configured from the environment (see [`SquooshCliOpts::from_env`]).
    pub fn from_env() -> Self {
        Self::new(SquooshCliOpts::from_env())
    }

    /// Options in use.
    pub fn opts(&self) -> &SquooshCliOpts {
        &self.opts
    }

    fn program_name(&self) -> String {
        self.opts.program.display().to_string()
    }
}

impl TextureEncoder for SquooshCli {
    fn check_available(&self) -> SquooshResult<()> {
        if self.opts.skip_availability_check || which::which(&self.opts.program).is_ok() {
            return Ok(());
        }
        Err(SquooshError::tool_not_found(
            self.program_name(),
            SQUOOSH_INSTALL_HINT,
        ))
    }

    fn encode(&self, request: &EncodeRequest<'_>, logger: &dyn Logger) -> SquooshResult<Vec<u8>> {
        let mut input = tempfile::Builder::new()
            .prefix("squoosh-")
            .suffix(&format!(".{}", request.input_extension))
            .tempfile()
            .context("create temporary input file")?;
        input
            .write_all(request.image)
            .and_then(|()| input.flush())
            .with_context(|| format!("write temporary input '{}'", input.path().display()))?;

        let out_dir = tempfile::Builder::new()
            .prefix("squoosh-out-")
            .tempdir()
            .context("create temporary output directory")?;

        let stem = input.path().file_stem().ok_or_else(|| {
            SquooshError::compression("temporary input path has no file name (unexpected)")
        })?;
        let mut out_name = OsString::from(stem);
        out_name.push(".");
        out_name.push(request.output_extension);
        let out_path = out_dir.path().join(out_name);

        // Resolve through PATH so wrapper scripts (e.g. `squoosh-cli.cmd`) launch too.
        let program = which::which(&self.opts.program).unwrap_or_else(|_| self.opts.program.clone());

        logger.debug(&format!(
            "• {} {} --output-dir {} {}",
            self.program_name(),
            request.flags.join(" "),
            out_dir.path().display(),
            input.path().display()
        ));

        let status = Command::new(&program)
            .args(request.flags)
            .arg("--output-dir")
            .arg(out_dir.path())
            .arg(input.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| {
                SquooshError::compression(format!(
                    "failed to launch {} (is it installed and on PATH?): {e}",
                    self.program_name()
                ))
            })?;

        if !status.success() {
            return Err(SquooshError::compression(format!(
                "{} exited with status {status}",
                self.program_name()
            )));
        }

        let mut bytes = std::fs::read(&out_path).map_err(|e| {
            SquooshError::compression(format!(
                "{} did not write '{}': {e}",
                self.program_name(),
                out_path.display()
            ))
        })?;
        bytes.shrink_to_fit();
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compress/encoder.rs"]
mod tests;
