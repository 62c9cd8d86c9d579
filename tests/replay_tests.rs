//! Replay tests - record a game, round-trip it through JSON, play it back

use blockfall::core::{InputEvent, Recorder, Replay, ReplayFrame};
use blockfall::types::{Control, MOVE_REPEAT_MS, TICK_MS};

fn record_game(seed: u32) -> Recorder {
    let mut recorder = Recorder::new(seed);
    for i in 0..900u32 {
        match i % 60 {
            3 => recorder.press(Control::Rotate),
            5 => recorder.release(Control::Rotate),
            8 => recorder.press(if i % 120 == 8 { Control::Left } else { Control::Right }),
            20 => {
                recorder.release(Control::Left);
                recorder.release(Control::Right);
            }
            30 => recorder.press(Control::HardDrop),
            _ => {}
        }
        recorder.tick(TICK_MS);
    }
    recorder
}

#[test]
fn test_replay_rebuilds_recorded_session() {
    let recorder = record_game(77);
    let expected = recorder.session().snapshot();
    let replay = recorder.finish();

    assert_eq!(replay.seed, 77);
    assert_eq!(replay.frames.len(), 900);
    assert_eq!(replay.duration_ms(), 900 * TICK_MS as u64);

    let json = replay.to_json().unwrap();
    let loaded = Replay::from_json(&json).unwrap();
    assert_eq!(loaded, replay);

    let played = loaded.play();
    assert!(played.pieces_landed() > 0);
    assert_eq!(played.snapshot(), expected);
}

#[test]
fn test_step_applies_inputs_before_tick() {
    let mut session = blockfall::core::Session::new(4);
    let start_x: Vec<i8> = session.current().cells().iter().map(|p| p.x).collect();

    let frame = ReplayFrame {
        dt_ms: MOVE_REPEAT_MS,
        inputs: vec![InputEvent::Press(Control::Left)],
    };
    Replay::step(&frame, &mut session);

    let moved_x: Vec<i8> = session.current().cells().iter().map(|p| p.x).collect();
    let expected: Vec<i8> = start_x.iter().map(|x| x - 1).collect();
    assert_eq!(moved_x, expected);
    assert!(session.held().is_held(Control::Left));
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(Replay::from_json("{\"seed\": \"nope\"}").is_err());
    assert!(Replay::from_json("not json").is_err());
}

#[test]
fn test_hand_written_replay() {
    let json = r#"{
        "seed": 12,
        "frames": [
            { "dtMs": 16, "inputs": [ { "kind": "press", "control": "hardDrop" } ] },
            { "dtMs": 16 }
        ]
    }"#;
    let replay = Replay::from_json(json).unwrap();
    assert_eq!(replay.frames[0].inputs, vec![InputEvent::Press(Control::HardDrop)]);

    let session = replay.play();
    assert!(session.hard_dropping());
}

#[test]
fn test_replay_json_layout() {
    let mut recorder = Recorder::new(9);
    recorder.press(Control::Down);
    recorder.tick(TICK_MS);
    recorder.tick(TICK_MS);

    let json = recorder.finish().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["seed"], 9);
    let frames = value["frames"].as_array().unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0]["dtMs"], 16);
    assert_eq!(frames[0]["inputs"][0]["kind"], "press");
    assert_eq!(frames[0]["inputs"][0]["control"], "down");
    assert!(frames[1].get("inputs").is_none());
}
