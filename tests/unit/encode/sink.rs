use super::*;
use crate::foundation::core::DVec3;

fn frame(i: u64) -> SpineFrame {
    SpineFrame {
        frame: FrameIndex(i),
        time: i as f64 * 16.0,
        state: SchedulerState::Steady,
        active: "calm".to_string(),
        pending: None,
        progress: 1.0,
        points: vec![DVec3::new(1.0, 2.0, 3.0)],
        strands: None,
    }
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(SinkConfig {
        spine_len: 1,
        with_strands: false,
    })
    .unwrap();
    for i in 0..3 {
        sink.push_frame(&frame(i)).unwrap();
    }
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config().unwrap().spine_len, 1);
    let idx: Vec<u64> = sink.frames().iter().map(|f| f.frame.0).collect();
    assert_eq!(idx, vec![0, 1, 2]);
}

#[test]
fn json_lines_sink_writes_one_object_per_line() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.begin(SinkConfig {
        spine_len: 1,
        with_strands: false,
    })
    .unwrap();
    sink.push_frame(&frame(0)).unwrap();
    sink.push_frame(&frame(1)).unwrap();
    sink.end().unwrap();
    assert_eq!(sink.frames_written(), 2);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);

    let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(v["frame"], 1);
    assert_eq!(v["state"], "steady");
    assert_eq!(v["points"][0][2], 3.0);
    assert!(v.get("pending").is_none());
    assert!(v.get("strands").is_none());
}
