use super::*;
use crate::foundation::core::DVec3;

fn registry_ab() -> TransformRegistry {
    let mut r = TransformRegistry::new();
    r.register_transformer("a", |p, _| p + DVec3::X).unwrap();
    r.register_transformer("b", |p, _| DVec3::new(p.x * 2.0, p.y, p.z))
        .unwrap();
    r
}

#[test]
fn known_names_define_successfully() {
    let mut r = registry_ab();
    let p = r.define_pipeline("ab", &["a", "b"], false).unwrap();
    assert_eq!(p.name(), "ab");
    assert_eq!(p.stage_names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(r.compile("ab").is_ok());
}

#[test]
fn unknown_name_is_configuration_error_and_not_stored() {
    let mut r = registry_ab();
    let err = r.define_pipeline("bad", &["a", "missing"], false).unwrap_err();
    assert!(matches!(err, HelixError::Configuration(_)));
    assert!(err.to_string().contains("missing"));
    assert!(matches!(r.compile("bad"), Err(HelixError::NotFound(_))));
    assert_eq!(r.pipeline_names().count(), 0);
}

#[test]
fn failed_redefinition_keeps_previous_pipeline() {
    let mut r = registry_ab();
    r.define_pipeline("p", &["a"], true).unwrap();
    assert!(r.define_pipeline("p", &["nope"], false).is_err());
    let p = r.compile("p").unwrap();
    assert_eq!(p.stage_names().collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(r.default_pipeline(), Some("p"));
}

#[test]
fn composition_order_matters() {
    let mut r = registry_ab();
    let ab = r.define_pipeline("ab", &["a", "b"], false).unwrap();
    let ba = r.define_pipeline("ba", &["b", "a"], false).unwrap();
    let ctx = TransformCtx::initial();

    assert_eq!(ab.evaluate(&[DVec3::ZERO], &ctx), vec![DVec3::new(2.0, 0.0, 0.0)]);
    assert_eq!(ba.evaluate(&[DVec3::ZERO], &ctx), vec![DVec3::new(1.0, 0.0, 0.0)]);
}

#[test]
fn compile_unknown_is_not_found() {
    let r = registry_ab();
    assert!(matches!(r.compile("nope"), Err(HelixError::NotFound(_))));
}

#[test]
fn reregistration_overwrites_for_later_definitions_only() {
    let mut r = registry_ab();
    let before = r.define_pipeline("p", &["a"], false).unwrap();
    r.register_transformer("a", |p, _| p + DVec3::new(10.0, 0.0, 0.0))
        .unwrap();
    let after = r.define_pipeline("q", &["a"], false).unwrap();
    let ctx = TransformCtx::initial();

    assert_eq!(before.evaluate_point(DVec3::ZERO, &ctx).x, 1.0);
    assert_eq!(after.evaluate_point(DVec3::ZERO, &ctx).x, 10.0);
    assert_eq!(r.transformer_names().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn empty_names_are_rejected() {
    let mut r = registry_ab();
    assert!(matches!(
        r.register_transformer("  ", |p, _| p),
        Err(HelixError::Configuration(_))
    ));
    assert!(matches!(
        r.define_pipeline("", &["a"], false),
        Err(HelixError::Configuration(_))
    ));
}

#[test]
fn last_default_wins() {
    let mut r = registry_ab();
    r.define_pipeline("one", &["a"], true).unwrap();
    r.define_pipeline("two", &["b"], true).unwrap();
    r.define_pipeline("three", &["b"], false).unwrap();
    assert_eq!(r.default_pipeline(), Some("two"));
}
