use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::DVec3;
use crate::scene::config::PipelineDef;

fn cfg() -> EngineConfig {
    EngineConfig {
        divisions: 10,
        transition_steps: 5,
        pipelines: vec![
            PipelineDef {
                name: "rest".into(),
                transformers: vec![],
                default: true,
            },
            PipelineDef {
                name: "wavy".into(),
                transformers: vec!["camera_attraction".into(), "noise".into()],
                default: false,
            },
        ],
        ..EngineConfig::default()
    }
}

#[test]
fn switch_parses_frame_and_name() {
    let s: PipelineSwitch = "12 = wavy".parse().unwrap();
    assert_eq!(s.at, FrameIndex(12));
    assert_eq!(s.pipeline, "wavy");
    assert!("wavy".parse::<PipelineSwitch>().is_err());
    assert!("x=wavy".parse::<PipelineSwitch>().is_err());
    assert!("3=".parse::<PipelineSwitch>().is_err());
}

#[test]
fn session_starts_on_default_pipeline() {
    let mut s = HelixSession::from_config(&cfg()).unwrap();
    assert_eq!(s.scheduler().active_pipeline(), Some("rest"));
    assert_eq!(s.scheduler().base_points().len(), 11);

    let f = s.step(FrameIndex(0), 0.0, false).unwrap();
    assert_eq!(f.points, s.scheduler().base_points());
    assert_eq!(f.state, SchedulerState::Steady);
    assert!(f.strands.is_none());
}

#[test]
fn unknown_transformer_in_config_is_configuration_error() {
    let mut c = cfg();
    c.pipelines[1].transformers.push("sparkle".into());
    assert!(matches!(
        HelixSession::from_config(&c),
        Err(HelixError::Configuration(_))
    ));
}

#[test]
fn config_without_default_is_not_ready_until_switched() {
    let mut c = cfg();
    c.pipelines[0].default = false;
    let mut s = HelixSession::from_config(&c).unwrap();
    assert!(matches!(
        s.step(FrameIndex(0), 0.0, false),
        Err(HelixError::NotReady(_))
    ));
    s.set_pipeline("wavy").unwrap();
    assert!(s.step(FrameIndex(0), 0.0, false).is_ok());
}

#[test]
fn run_applies_switches_and_counts_transitions() {
    let mut s = HelixSession::from_config(&cfg()).unwrap();
    let mut sink = InMemorySink::new();
    let switches = vec![PipelineSwitch {
        at: FrameIndex(2),
        pipeline: "wavy".into(),
    }];
    let opts = SessionOpts {
        with_strands: true,
        ..SessionOpts::default()
    };
    let stats = s.run(10, &opts, &switches, &mut sink).unwrap();

    assert_eq!(stats.frames_total, 10);
    assert_eq!(stats.transitions_completed, 1);
    assert!(sink.is_ended());

    let frames = sink.frames();
    assert_eq!(frames.len(), 10);
    assert_eq!(frames[1].active, "rest");
    assert_eq!(frames[2].pending.as_deref(), Some("wavy"));
    assert_eq!(frames[2].progress, 0.8);
    // swap issued before frame 2 completes on the 5th update, frame 6
    assert_eq!(frames[5].active, "rest");
    assert_eq!(frames[6].active, "wavy");
    assert_eq!(frames[6].state, SchedulerState::Steady);
    assert!(frames.iter().all(|f| f.points.len() == 11));
    assert!(frames.iter().all(|f| f.strands.as_ref().map(|s| s.len()) == Some(101)));
}

#[test]
fn camera_moves_affect_attraction() {
    let mut c = cfg();
    c.pipelines[1].transformers = vec!["camera_attraction".into()];
    c.pipelines[1].default = true;
    c.pipelines[0].default = false;
    let mut s = HelixSession::from_config(&c).unwrap();

    s.camera().set(DVec3::new(0.0, 0.0, 50.0));
    let near = s.step(FrameIndex(0), 0.0, false).unwrap();
    s.camera().set(DVec3::new(0.0, -1000.0, 50.0));
    let far = s.step(FrameIndex(1), 0.0, false).unwrap();
    assert!(near.points[0].x > far.points[0].x);
}

#[test]
fn custom_noise_source_is_used() {
    let mut c = cfg();
    c.pipelines[1].transformers = vec!["noise".into()];
    let mut s = HelixSession::with_noise(&c, Arc::new(|_: f64, _: f64, _: f64, _: f64| 1.0))
        .unwrap();
    s.scheduler_mut()
        .define_pipeline("now", &["noise"], true)
        .unwrap();
    let f = s.step(FrameIndex(0), 0.0, false).unwrap();
    assert_eq!(f.points[0], DVec3::new(15.0, 0.0, 0.0));
}

#[test]
fn zero_frames_is_rejected() {
    let mut s = HelixSession::from_config(&cfg()).unwrap();
    let mut sink = InMemorySink::new();
    assert!(s.run(0, &SessionOpts::default(), &[], &mut sink).is_err());
}

#[test]
fn noise_pipeline_survives_huge_start_time() {
    let mut c = cfg();
    c.pipelines[0].default = false;
    c.pipelines[1].default = true;
    let mut s = HelixSession::from_config(&c).unwrap();
    let mut sink = InMemorySink::new();
    let opts = SessionOpts {
        start_time: 1e30,
        ..SessionOpts::default()
    };
    s.run(3, &opts, &[], &mut sink).unwrap();
    assert!(sink
        .frames()
        .iter()
        .all(|f| f.points.iter().all(|p| p.is_finite())));
}
