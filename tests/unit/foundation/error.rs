use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TeamColorError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TeamColorError::input_missing("base texture")
            .to_string()
            .contains("missing input: base texture")
    );
    assert!(
        TeamColorError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TeamColorError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
