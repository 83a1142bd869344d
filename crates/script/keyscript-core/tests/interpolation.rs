use keyscript_core::{
    interpolate_frames, parse_script, ContextPolicy, FrameStore, Playback, PlaybackConfig,
    PlaybackState, PoseFrame, Quat, Rbt, Scene, ScriptError,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct NodeSpec {
    name: String,
    rbt: Rbt,
}

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn robot_scene() -> Scene {
    let nodes: Vec<NodeSpec> =
        keyscript_test_fixtures::scenes::load("robot-arm").expect("load robot-arm scene");
    let mut scene = Scene::new();
    for node in nodes {
        scene.add_node(node.name, node.rbt);
    }
    scene
}

fn robot_script() -> (Scene, FrameStore<PoseFrame>) {
    let scene = robot_scene();
    let text = keyscript_test_fixtures::scripts::text("robot-arm-4").expect("fixture text");
    let store = parse_script(&text, &scene).expect("parse fixture");
    (scene, store)
}

fn robot(scene: &Scene) -> Rbt {
    *scene.rbt("robot").expect("robot node")
}

#[test]
fn endpoints_match_keyframes() {
    let (_, store) = robot_script();
    let f = store.frames();
    let at0 = interpolate_frames(&f[0], &f[1], &f[2], &f[3], 0.0);
    let at1 = interpolate_frames(&f[0], &f[1], &f[2], &f[3], 1.0);
    assert!(at0.approx_eq(&f[1], 1e-4));
    assert!(at1.approx_eq(&f[2], 1e-4));
}

#[test]
fn inputs_are_not_mutated() {
    let (_, store) = robot_script();
    let before = store.to_script_text();
    let f = store.frames();
    let _ = interpolate_frames(&f[0], &f[1], &f[2], &f[3], 0.37);
    assert_eq!(store.to_script_text(), before);
}

#[test]
fn static_nodes_stay_put() {
    let (_, store) = robot_script();
    let f = store.frames();
    let mid = interpolate_frames(&f[0], &f[1], &f[2], &f[3], 0.5);
    assert!(mid.rbts()[0].approx_eq(&f[1].rbts()[0], 1e-5));
}

#[test]
fn velocity_is_continuous_across_keyframes() {
    // Keys with uneven spacing so a straight blend would kink at the join.
    let keys: Vec<PoseFrame> = [0.0f32, 1.0, 4.0, 5.0, 9.0]
        .iter()
        .map(|&x| PoseFrame::from_rbts(vec![Rbt::new([x, 0.0, 0.0], Quat::IDENTITY)]))
        .collect();
    let x = |f: PoseFrame| f.rbts()[0].translation[0];
    let h = 1e-3;

    let left = x(interpolate_frames(&keys[0], &keys[1], &keys[2], &keys[3], 1.0))
        - x(interpolate_frames(&keys[0], &keys[1], &keys[2], &keys[3], 1.0 - h));
    let right = x(interpolate_frames(&keys[1], &keys[2], &keys[3], &keys[4], h))
        - x(interpolate_frames(&keys[1], &keys[2], &keys[3], &keys[4], 0.0));
    approx(left / h, right / h, 5e-2);
}

#[test]
fn rotation_moves_between_keys() {
    let (_, store) = robot_script();
    let f = store.frames();
    let mid = interpolate_frames(&f[0], &f[1], &f[2], &f[3], 0.5);
    let q = mid.rbts()[1].rotation;
    let norm = q.0.iter().map(|c| c * c).sum::<f32>().sqrt();
    approx(norm, 1.0, 1e-4);
    assert!(!q.same_rotation(&f[1].rbts()[1].rotation, 1e-3));
    assert!(!q.same_rotation(&f[2].rbts()[1].rotation, 1e-3));
}

#[test]
fn first_position_clamps_previous_context() {
    let (mut scene, store) = robot_script();
    assert_eq!(store.frame_number(), 0);
    assert!(store.can_animate());

    let ctx = store.context_frames().expect("clamped context");
    assert!(std::ptr::eq(ctx.prev, ctx.first));

    store
        .interpolate_and_show(&mut scene, 0.5)
        .expect("interpolate at first frame");
    let x = robot(&scene).translation[0];
    assert!(x > 0.0 && x < 1.0, "x={x}");
    assert_eq!(store.frame_number(), 0);
}

#[test]
fn strict_policy_refuses_first_position() {
    let (mut scene, store) = robot_script();
    let store = store.with_context_policy(ContextPolicy::Strict);
    let err = store.interpolate_and_show(&mut scene, 0.5).unwrap_err();
    assert!(err.is_precondition());
}

#[test]
fn interpolation_near_end_is_refused() {
    let (mut scene, mut store) = robot_script();
    store.seek(2);
    assert!(!store.can_animate());
    let err = store.interpolate_and_show(&mut scene, 0.5).unwrap_err();
    assert!(matches!(
        err,
        ScriptError::InsufficientContext { frame: 2, count: 4 }
    ));
}

#[test]
fn playback_walks_every_segment_then_finishes() {
    let (mut scene, mut store) = robot_script();
    let playback = Playback::new(&PlaybackConfig {
        ms_between_keyframes: 1000,
        frames_per_second: 10,
    });

    let state = playback.step(&mut store, &mut scene, 0.0).expect("step");
    assert_eq!(state, PlaybackState::Playing { segment: 0, alpha: 0.0 });
    approx(robot(&scene).translation[0], 0.0, 1e-5);

    let state = playback.step(&mut store, &mut scene, 1500.0).expect("step");
    assert_eq!(state, PlaybackState::Playing { segment: 1, alpha: 0.5 });
    assert_eq!(store.frame_number(), 1);
    let x = robot(&scene).translation[0];
    assert!(x > 1.0 && x < 2.0, "x={x}");

    let end = playback.duration_ms(&store);
    let state = playback.step(&mut store, &mut scene, end).expect("step");
    assert_eq!(state, PlaybackState::Finished);
    assert_eq!(store.frame_number(), 2);
    approx(robot(&scene).translation[0], 2.0, 1e-5);
}

#[test]
fn playback_needs_three_frames() {
    let mut scene = robot_scene();
    let mut store = FrameStore::<PoseFrame>::new();
    store
        .insert_after_current_from_scene(&mut scene)
        .expect("capture");
    let err = Playback::default()
        .step(&mut store, &mut scene, 0.0)
        .unwrap_err();
    assert!(err.is_precondition());
}
