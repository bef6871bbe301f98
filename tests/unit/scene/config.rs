use super::*;

#[test]
fn empty_object_uses_stock_scene() {
    let cfg = EngineConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.divisions, 100);
    assert_eq!(cfg.transition_steps, 100);
    assert_eq!(cfg.camera_position(), DVec3::new(50.0, -50.0, 50.0));
    assert_eq!(
        cfg.control_points(),
        vec![DVec3::ZERO, DVec3::new(0.0, -150.0, 0.0)]
    );
    cfg.validate().unwrap();
}

#[test]
fn pipelines_and_overrides_parse() {
    let json = r#"{
        "divisions": 20,
        "curve": { "uniform": { "tension": 0.5 } },
        "noise": { "amplitude": 3 },
        "pipelines": [
            { "name": "a", "transformers": ["noise"], "default": true },
            { "name": "b" }
        ]
    }"#;
    let cfg = EngineConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.divisions, 20);
    assert_eq!(cfg.curve, CatmullRomKind::Uniform { tension: 0.5 });
    assert_eq!(cfg.noise.amplitude, 3.0);
    assert_eq!(cfg.noise.spatial_scale, 100.0);
    assert_eq!(cfg.pipelines.len(), 2);
    assert!(cfg.pipelines[0].default);
    assert!(cfg.pipelines[1].transformers.is_empty());
    cfg.validate().unwrap();
}

#[test]
fn unknown_fields_are_rejected() {
    let err = EngineConfig::from_reader(r#"{ "divisons": 3 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, HelixError::Validation(_)));
}

#[test]
fn validation_catches_bad_values() {
    let cases: Vec<EngineConfig> = vec![
        EngineConfig {
            divisions: 0,
            ..EngineConfig::default()
        },
        EngineConfig {
            control_points: vec![],
            ..EngineConfig::default()
        },
        EngineConfig {
            transition_steps: 0,
            ..EngineConfig::default()
        },
        EngineConfig {
            camera: [f64::NAN, 0.0, 0.0],
            ..EngineConfig::default()
        },
        EngineConfig {
            pipelines: vec![
                PipelineDef {
                    name: "a".into(),
                    transformers: vec![],
                    default: true,
                },
                PipelineDef {
                    name: "b".into(),
                    transformers: vec![],
                    default: true,
                },
            ],
            ..EngineConfig::default()
        },
    ];
    for cfg in cases {
        assert!(matches!(cfg.validate(), Err(HelixError::Validation(_))));
    }
}

#[test]
fn json_output_parses_back() {
    let cfg = EngineConfig::default();
    let text = cfg.to_json_pretty().unwrap();
    let back = EngineConfig::from_reader(text.as_bytes()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn missing_file_is_validation_error() {
    let err = EngineConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("open engine config"));
}
