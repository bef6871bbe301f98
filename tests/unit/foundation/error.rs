use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HelixError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(HelixError::not_found("x").to_string().contains("not found:"));
    assert!(HelixError::not_ready("x").to_string().contains("not ready:"));
    assert!(
        HelixError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        HelixError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HelixError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
