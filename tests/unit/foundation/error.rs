use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SquooshError::compression("x")
            .to_string()
            .contains("compression error:")
    );
    assert!(
        SquooshError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SquooshError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn tool_not_found_names_tool_and_install_source() {
    let msg = SquooshError::tool_not_found("squoosh-cli", "\"@squoosh/cli\" from NPM").to_string();
    assert_eq!(
        msg,
        "Command \"squoosh-cli\" not found. Please install \"@squoosh/cli\" from NPM."
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SquooshError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
