use super::*;
use crate::document::logger::MemoryLogger;

#[test]
fn input_extension_prefers_uri_then_mime_type() {
    let with_uri = Texture::new(vec![], "image/png").with_uri("textures/a.jpeg");
    assert_eq!(input_extension(&with_uri), "jpeg");

    let no_uri = Texture::new(vec![], "image/jpeg");
    assert_eq!(input_extension(&no_uri), "jpg");

    let bare_uri = Texture::new(vec![], "image/png").with_uri("textures/noext");
    assert_eq!(input_extension(&bare_uri), "png");
}

#[test]
fn request_borrows_texture_payload() {
    let tex = Texture::new(vec![1, 2, 3], "image/png");
    let flags = vec!["--webp".to_string()];
    let req = EncodeRequest::for_texture(&tex, &flags, "webp");
    assert_eq!(req.image, &[1, 2, 3]);
    assert_eq!(req.input_extension, "png");
    assert_eq!(req.output_extension, "webp");
}

#[test]
fn default_opts_target_squoosh_cli() {
    let opts = SquooshCliOpts::default();
    assert_eq!(opts.program, PathBuf::from("squoosh-cli"));
    assert!(!opts.skip_availability_check);
}

#[test]
fn missing_program_is_reported_before_any_work() {
    let enc = SquooshCli::new(SquooshCliOpts {
        program: PathBuf::from("squoosh-gltf-definitely-missing-binary"),
        skip_availability_check: false,
    });
    let err = enc.check_available().unwrap_err();
    match err {
        SquooshError::ToolNotFound { tool, install_hint } => {
            assert_eq!(tool, "squoosh-gltf-definitely-missing-binary");
            assert_eq!(install_hint, SQUOOSH_INSTALL_HINT);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn availability_check_can_be_bypassed() {
    let enc = SquooshCli::new(SquooshCliOpts {
        program: PathBuf::from("squoosh-gltf-definitely-missing-binary"),
        skip_availability_check: true,
    });
    assert!(enc.check_available().is_ok());
}

#[test]
fn launch_failure_is_a_compression_error() {
    let enc = SquooshCli::new(SquooshCliOpts {
        program: PathBuf::from("squoosh-gltf-definitely-missing-binary"),
        skip_availability_check: true,
    });
    let tex = Texture::new(vec![1, 2, 3], "image/png");
    let flags = vec!["--webp".to_string()];
    let err = enc
        .encode(&EncodeRequest::for_texture(&tex, &flags, "webp"), &MemoryLogger::new())
        .unwrap_err();
    assert!(matches!(err, SquooshError::Compression(_)));
}

#[cfg(unix)]
mod fake_cli {
    use super::*;
    use std::os::unix::fs::PermissionsExt as _;
    use std::path::Path;

    fn write_script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-squoosh");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    // Records its arguments, then copies the input to `<out-dir>/<stem>.<ext>` with a marker
    // byte appended.
    fn copying_script(dir: &Path, ext: &str) -> PathBuf {
        let log = dir.join("args.log");
        write_script(
            dir,
            &format!(
                r#"out=""; in=""; prev=""
for a in "$@"; do
  if [ "$prev" = "--output-dir" ]; then out="$a"; fi
  prev="$a"; in="$a"
done
printf '%s\n' "$@" > "{log}"
name=$(basename "$in")
cp "$in" "$out/${{name%.*}}.{ext}"
printf 'X' >> "$out/${{name%.*}}.{ext}""#,
                log = log.display(),
            ),
        )
    }

    #[test]
    fn encode_stages_input_and_reads_back_output() {
        let dir = tempfile::tempdir().unwrap();
        let enc = SquooshCli::new(SquooshCliOpts {
            program: copying_script(dir.path(), "webp"),
            skip_availability_check: false,
        });
        enc.check_available().unwrap();

        let tex = Texture::new(vec![10, 20, 30], "image/png").with_uri("a/b.jpeg");
        let flags = vec!["--webp".to_string(), "{\"quality\":80}".to_string()];
        let out = enc
            .encode(&EncodeRequest::for_texture(&tex, &flags, "webp"), &MemoryLogger::new())
            .unwrap();
        assert_eq!(out, vec![10, 20, 30, b'X']);

        let args = std::fs::read_to_string(dir.path().join("args.log")).unwrap();
        let args: Vec<&str> = args.lines().collect();
        assert_eq!(args.len(), 5);
        assert_eq!(&args[..3], &["--webp", "{\"quality\":80}", "--output-dir"]);
        assert!(args[4].ends_with(".jpeg"), "input keeps URI extension: {}", args[4]);

        // Scoped temp resources are gone once encode returns.
        assert!(!Path::new(args[3]).exists());
        assert!(!Path::new(args[4]).exists());
    }

    #[test]
    fn non_zero_exit_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let enc = SquooshCli::new(SquooshCliOpts {
            program: write_script(dir.path(), "exit 3"),
            skip_availability_check: false,
        });
        let tex = Texture::new(vec![1], "image/png");
        let err = enc
            .encode(&EncodeRequest::for_texture(&tex, &[], "webp"), &MemoryLogger::new())
            .unwrap_err();
        match err {
            SquooshError::Compression(msg) => assert!(msg.contains("exited with status")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_output_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let enc = SquooshCli::new(SquooshCliOpts {
            program: write_script(dir.path(), "exit 0"),
            skip_availability_check: false,
        });
        let tex = Texture::new(vec![1], "image/png");
        let err = enc
            .encode(&EncodeRequest::for_texture(&tex, &[], "webp"), &MemoryLogger::new())
            .unwrap_err();
        assert!(matches!(err, SquooshError::Compression(_)));
    }

    #[test]
    fn command_line_is_logged_through_the_given_logger() {
        use crate::document::logger::LogLevel;

        let dir = tempfile::tempdir().unwrap();
        let program = copying_script(dir.path(), "webp");
        let enc = SquooshCli::new(SquooshCliOpts {
            program: program.clone(),
            skip_availability_check: false,
        });
        let logger = MemoryLogger::new();
        let tex = Texture::new(vec![1], "image/png");
        let flags = vec!["--webp".to_string(), "{}".to_string()];
        enc.encode(&EncodeRequest::for_texture(&tex, &flags, "webp"), &logger)
            .unwrap();

        let debug = logger.messages(LogLevel::Debug);
        assert_eq!(debug.len(), 1);
        let line = &debug[0];
        let prefix = format!("• {} --webp {{}} --output-dir ", program.display());
        assert!(line.starts_with(&prefix), "{line}");
        assert!(line.ends_with(".png"), "{line}");
    }
}
