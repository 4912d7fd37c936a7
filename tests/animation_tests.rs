//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step/cubic interpolation
//! - Quaternion slerp sampling
//! - AnimationClip duration computation
//! - Binder fail-fast validation
//! - AnimationMixer looping, constant poses and independence
//! - AnimationSystem insertion-order updates and stale bindings

use std::f32::consts::PI;
use std::sync::Arc;

use glam::{Quat, Vec3};

use diorama::animation::{
    AnimationClip, AnimationMixer, AnimationSystem, InterpolationMode, KeyframeCursor,
    KeyframeTrack, MorphWeightData, TargetPath, Track, TrackData,
};
use diorama::errors::Error;
use diorama::scene::{NodeHandle, Scene};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

/// Same orientation, ignoring the quaternion sign.
fn quat_approx(a: Quat, b: Quat) -> bool {
    a.dot(b).abs() > 1.0 - 1e-5
}

// ============================================================================
// Helpers
// ============================================================================

/// A model root with one child named `bone`.
fn add_model(scene: &mut Scene, name: &str) -> (NodeHandle, NodeHandle) {
    let root = scene.create_node(name);
    let bone = scene.add_to_parent(diorama::scene::Node::with_name("bone"), root);
    (root, bone)
}

/// 2 second clip rotating `bone` 180 degrees about +Y.
fn half_turn_clip() -> Arc<AnimationClip> {
    let track = KeyframeTrack::linear(
        vec![0.0, 1.0, 2.0],
        vec![
            Quat::IDENTITY,
            Quat::from_rotation_y(PI / 2.0),
            Quat::from_rotation_y(PI),
        ],
    );
    Arc::new(AnimationClip::new(
        "half_turn",
        vec![Track::new("bone", TargetPath::Rotation, TrackData::Quaternion(track))],
    ))
}

/// 2 second clip moving `bone` from x = 0 to x = 4.
fn slide_clip() -> Arc<AnimationClip> {
    let track = KeyframeTrack::linear(vec![0.0, 2.0], vec![Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)]);
    Arc::new(AnimationClip::new(
        "slide",
        vec![Track::new("bone", TargetPath::Translation, TrackData::Vector3(track))],
    ))
}

fn playing_mixer(scene: &Scene, root: NodeHandle, clip: Arc<AnimationClip>) -> AnimationMixer {
    let mut mixer = AnimationMixer::new(root);
    let action = mixer.clip_action(clip, scene).unwrap();
    mixer.action_mut(action).unwrap().play();
    mixer
}

// ============================================================================
// KeyframeTrack sampling
// ============================================================================

#[test]
fn track_linear_vec3_midpoint() {
    let track = KeyframeTrack::linear(vec![0.0, 1.0], vec![Vec3::ZERO, Vec3::new(2.0, 4.0, -6.0)]);
    let mut cursor = KeyframeCursor::default();
    let v = track.sample_with_cursor(0.5, &mut cursor);
    assert!(vec3_approx(v, Vec3::new(1.0, 2.0, -3.0)), "got {v}");
}

#[test]
fn track_exact_keyframes() {
    let track = KeyframeTrack::linear(vec![0.0, 1.0, 2.0], vec![0.0_f32, 10.0, 20.0]);
    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor), 10.0));
    assert!(approx(track.sample_with_cursor(2.0, &mut cursor), 20.0));
}

#[test]
fn track_quaternion_uses_slerp() {
    let track = KeyframeTrack::linear(
        vec![0.0, 1.0],
        vec![Quat::IDENTITY, Quat::from_rotation_y(PI / 2.0)],
    );
    let q = track.sample(0.5);
    assert!(quat_approx(q, Quat::from_rotation_y(PI / 4.0)));
    assert!(approx(q.length(), 1.0));
}

#[test]
fn track_step_interpolation() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![Vec3::X, Vec3::Y, Vec3::Z],
        InterpolationMode::Step,
    );
    assert!(vec3_approx(track.sample(0.7), Vec3::X));
    assert!(vec3_approx(track.sample(1.2), Vec3::Y));
}

#[test]
fn track_cubic_spline_hits_keyframes() {
    // [in_tangent, value, out_tangent] per keyframe
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 1.0, 0.0, 0.0, 3.0, 0.0],
        InterpolationMode::CubicSpline,
    );
    assert!(approx(track.sample(0.0), 1.0));
    assert!(approx(track.sample(1.0), 3.0));
    // Zero tangents give smoothstep: halfway value at t = 0.5
    assert!(approx(track.sample(0.5), 2.0));
}

#[test]
fn track_cursor_survives_loop_wrap() {
    let times: Vec<f32> = (0..20).map(|i| i as f32 * 0.1).collect();
    let values: Vec<f32> = (0..20).map(|i| i as f32).collect();
    let track = KeyframeTrack::linear(times, values);

    let mut cursor = KeyframeCursor::default();
    let mut t = 0.0_f32;
    for _ in 0..100 {
        t = (t + 0.033).rem_euclid(1.9);
        let fast = track.sample_with_cursor(t, &mut cursor);
        assert!(approx(fast, track.sample(t)), "mismatch at {t}");
    }
}

#[test]
fn morph_weight_track_interpolates_each_target() {
    let track = KeyframeTrack::linear(
        vec![0.0, 1.0],
        vec![
            MorphWeightData::from_slice(&[1.0, 0.0, 0.0]),
            MorphWeightData::from_slice(&[0.0, 1.0, 0.5]),
        ],
    );
    let w = track.sample(0.5).weights;
    assert!(approx(w[0], 0.5));
    assert!(approx(w[1], 0.5));
    assert!(approx(w[2], 0.25));
}

// ============================================================================
// AnimationClip
// ============================================================================

#[test]
fn clip_duration_is_latest_keyframe() {
    let a = KeyframeTrack::linear(vec![0.0, 1.5], vec![Vec3::ZERO, Vec3::ONE]);
    let b = KeyframeTrack::linear(vec![0.0, 3.0], vec![Quat::IDENTITY, Quat::IDENTITY]);
    let clip = AnimationClip::new(
        "mixed",
        vec![
            Track::new("a", TargetPath::Translation, TrackData::Vector3(a)),
            Track::new("b", TargetPath::Rotation, TrackData::Quaternion(b)),
        ],
    );
    assert!(approx(clip.duration, 3.0));
}

#[test]
fn clip_without_tracks_has_zero_duration() {
    let clip = AnimationClip::new("empty", Vec::new());
    assert!(approx(clip.duration, 0.0));
}

// ============================================================================
// Binder / clip_action
// ============================================================================

#[test]
fn clip_action_fails_fast_on_missing_node() {
    let mut scene = Scene::new();
    let (root, _) = add_model(&mut scene, "model");

    let track = KeyframeTrack::linear(vec![0.0, 1.0], vec![Vec3::ZERO, Vec3::ONE]);
    let clip = Arc::new(AnimationClip::new(
        "broken",
        vec![Track::new("tail", TargetPath::Translation, TrackData::Vector3(track))],
    ));

    let mut mixer = AnimationMixer::new(root);
    let err = mixer.clip_action(clip, &scene).unwrap_err();
    assert!(matches!(err, Error::ClipIntegrity { ref clip, .. } if clip == "broken"));
    assert_eq!(mixer.actions().count(), 0);
}

#[test]
fn clip_action_rejects_mismatched_value_type() {
    let mut scene = Scene::new();
    let (root, _) = add_model(&mut scene, "model");

    let track = KeyframeTrack::linear(vec![0.0, 1.0], vec![Vec3::ZERO, Vec3::ONE]);
    let clip = Arc::new(AnimationClip::new(
        "wrong_type",
        vec![Track::new("bone", TargetPath::Rotation, TrackData::Vector3(track))],
    ));

    let mut mixer = AnimationMixer::new(root);
    assert!(matches!(
        mixer.clip_action(clip, &scene),
        Err(Error::ClipIntegrity { .. })
    ));
}

#[test]
fn clip_action_rejects_malformed_keyframes() {
    let mut scene = Scene::new();
    let (root, _) = add_model(&mut scene, "model");

    let track = KeyframeTrack::linear(vec![0.0, 1.0, 2.0], vec![Vec3::ZERO, Vec3::ONE]);
    let clip = Arc::new(AnimationClip::new(
        "short",
        vec![Track::new("bone", TargetPath::Translation, TrackData::Vector3(track))],
    ));

    let mut mixer = AnimationMixer::new(root);
    assert!(mixer.clip_action(clip, &scene).is_err());
}

#[test]
fn binding_only_searches_own_subtree() {
    let mut scene = Scene::new();
    let (_, _) = add_model(&mut scene, "first");
    let lonely = scene.create_node("second");

    let mut mixer = AnimationMixer::new(lonely);
    assert!(mixer.clip_action(slide_clip(), &scene).is_err());
}

#[test]
fn same_clip_returns_existing_action() {
    let mut scene = Scene::new();
    let (root, _) = add_model(&mut scene, "model");
    let clip = half_turn_clip();

    let mut mixer = AnimationMixer::new(root);
    let first = mixer.clip_action(clip.clone(), &scene).unwrap();
    let second = mixer.clip_action(clip, &scene).unwrap();
    assert_eq!(first, second);
    assert_eq!(mixer.actions().count(), 1);
}

#[test]
fn distinct_clips_sharing_a_name_get_separate_actions() {
    let mut scene = Scene::new();
    let (root, _) = add_model(&mut scene, "model");
    let walk = slide_clip();
    let other_walk = slide_clip();
    assert_eq!(walk.name, other_walk.name);

    let mut mixer = AnimationMixer::new(root);
    let first = mixer.clip_action(walk.clone(), &scene).unwrap();
    let second = mixer.clip_action(other_walk, &scene).unwrap();
    assert_ne!(first, second);
    assert_eq!(mixer.actions().count(), 2);

    assert_eq!(mixer.clip_action(walk, &scene).unwrap(), first);
    assert_eq!(mixer.actions().count(), 2);
}

#[test]
fn play_is_idempotent_and_stop_rewinds() {
    let mut scene = Scene::new();
    let (root, _) = add_model(&mut scene, "model");
    let mut mixer = playing_mixer(&scene, root, slide_clip());
    mixer.update(0.5, &mut scene).unwrap();

    let (handle, _) = mixer.actions().next().unwrap();
    let action = mixer.action_mut(handle).unwrap();
    action.play();
    assert!(approx(action.time(), 0.5));

    action.stop();
    assert!(!action.is_playing());
    assert!(approx(action.time(), 0.0));
}

// ============================================================================
// AnimationMixer::update
// ============================================================================

#[test]
fn half_turn_wraps_to_start_after_full_duration() {
    let mut scene = Scene::new();
    let (root, bone) = add_model(&mut scene, "model");
    let mut mixer = playing_mixer(&scene, root, half_turn_clip());

    mixer.update(1.0, &mut scene).unwrap();
    let rotation = scene.get_node(bone).unwrap().transform.rotation;
    assert!(quat_approx(rotation, Quat::from_rotation_y(PI / 2.0)));

    mixer.update(1.0, &mut scene).unwrap();
    let (_, action) = mixer.actions().next().unwrap();
    assert!(approx(action.time(), 0.0), "local time {}", action.time());
    let rotation = scene.get_node(bone).unwrap().transform.rotation;
    assert!(quat_approx(rotation, Quat::IDENTITY));
}

#[test]
fn looping_pose_is_periodic() {
    let mut a_scene = Scene::new();
    let (a_root, a_bone) = add_model(&mut a_scene, "a");
    let mut a = playing_mixer(&a_scene, a_root, slide_clip());

    let mut b_scene = Scene::new();
    let (b_root, b_bone) = add_model(&mut b_scene, "b");
    let mut b = playing_mixer(&b_scene, b_root, slide_clip());

    a.update(0.75, &mut a_scene).unwrap();
    b.update(0.75 + 2.0 * 3.0, &mut b_scene).unwrap();

    let pa = a_scene.get_node(a_bone).unwrap().transform.position;
    let pb = b_scene.get_node(b_bone).unwrap().transform.position;
    assert!(vec3_approx(pa, pb), "{pa} vs {pb}");
    assert!(vec3_approx(pa, Vec3::new(1.5, 0.0, 0.0)));
}

#[test]
fn single_keyframe_track_gives_constant_pose() {
    let mut scene = Scene::new();
    let (root, bone) = add_model(&mut scene, "model");
    let pose = Vec3::new(1.0, 2.0, 3.0);
    let track = KeyframeTrack::linear(vec![0.0], vec![pose]);
    let clip = Arc::new(AnimationClip::new(
        "still",
        vec![Track::new("bone", TargetPath::Translation, TrackData::Vector3(track))],
    ));
    assert!(approx(clip.duration, 0.0));

    let mut mixer = playing_mixer(&scene, root, clip);
    for dt in [0.0, 0.016, 1.0, 123.4] {
        mixer.update(dt, &mut scene).unwrap();
        let p = scene.get_node(bone).unwrap().transform.position;
        assert!(p.is_finite());
        assert!(vec3_approx(p, pose));
    }
}

#[test]
fn stopped_action_does_not_write() {
    let mut scene = Scene::new();
    let (root, bone) = add_model(&mut scene, "model");
    let mut mixer = AnimationMixer::new(root);
    mixer.clip_action(slide_clip(), &scene).unwrap();

    scene.get_node_mut(bone).unwrap().transform.position = Vec3::new(9.0, 9.0, 9.0);
    mixer.update(1.0, &mut scene).unwrap();
    assert!(vec3_approx(
        scene.get_node(bone).unwrap().transform.position,
        Vec3::new(9.0, 9.0, 9.0)
    ));
}

#[test]
fn mixers_are_independent() {
    let mut scene = Scene::new();
    let (a_root, a_bone) = add_model(&mut scene, "a");
    let (b_root, b_bone) = add_model(&mut scene, "b");

    let mut a = playing_mixer(&scene, a_root, slide_clip());
    let mut b = playing_mixer(&scene, b_root, slide_clip());

    a.update(0.5, &mut scene).unwrap();
    let b_before = scene.get_node(b_bone).unwrap().transform.position;

    b.update(1.0, &mut scene).unwrap();
    let a_after = scene.get_node(a_bone).unwrap().transform.position;

    assert!(vec3_approx(b_before, Vec3::ZERO));
    assert!(vec3_approx(a_after, Vec3::new(1.0, 0.0, 0.0)));
    assert!(vec3_approx(
        scene.get_node(b_bone).unwrap().transform.position,
        Vec3::new(2.0, 0.0, 0.0)
    ));
}

#[test]
fn time_scale_speeds_up_playback() {
    let mut scene = Scene::new();
    let (root, bone) = add_model(&mut scene, "model");
    let mut mixer = playing_mixer(&scene, root, slide_clip());
    let (handle, _) = mixer.actions().next().unwrap();
    mixer.action_mut(handle).unwrap().time_scale = 2.0;

    mixer.update(0.25, &mut scene).unwrap();
    assert!(vec3_approx(
        scene.get_node(bone).unwrap().transform.position,
        Vec3::new(1.0, 0.0, 0.0)
    ));
}

#[test]
fn morph_weights_written_to_node() {
    let mut scene = Scene::new();
    let (root, bone) = add_model(&mut scene, "model");
    scene.get_node_mut(bone).unwrap().morph_weights = vec![0.0, 0.0];

    let track = KeyframeTrack::linear(
        vec![0.0, 1.0],
        vec![
            MorphWeightData::from_slice(&[0.0, 1.0]),
            MorphWeightData::from_slice(&[1.0, 0.0]),
        ],
    );
    let clip = Arc::new(AnimationClip::new(
        "flap",
        vec![Track::new("bone", TargetPath::Weights, TrackData::MorphWeights(track))],
    ));

    let mut mixer = playing_mixer(&scene, root, clip);
    mixer.update(0.25, &mut scene).unwrap();

    let weights = &scene.get_node(bone).unwrap().morph_weights;
    assert_eq!(weights.len(), 2);
    assert!(approx(weights[0], 0.25));
    assert!(approx(weights[1], 0.75));
}

// ============================================================================
// Stale bindings and the registry
// ============================================================================

#[test]
fn removed_node_is_reported_without_writes() {
    let mut scene = Scene::new();
    let (root, bone) = add_model(&mut scene, "model");
    let mut mixer = playing_mixer(&scene, root, slide_clip());

    scene.remove_node(bone);
    let err = mixer.update(0.5, &mut scene).unwrap_err();
    assert!(matches!(err, Error::StaleBinding { .. }));

    let (_, action) = mixer.actions().next().unwrap();
    assert!(approx(action.time(), 0.0));
}

#[test]
fn system_updates_every_mixer_once() {
    let mut scene = Scene::new();
    let mut system = AnimationSystem::new();
    let mut bones = Vec::new();
    for name in ["a", "b", "c"] {
        let (root, bone) = add_model(&mut scene, name);
        system.add(playing_mixer(&scene, root, slide_clip()));
        bones.push(bone);
    }

    system.update(0.5, &mut scene).unwrap();

    for mixer in system.iter() {
        let (_, action) = mixer.actions().next().unwrap();
        assert!(approx(action.time(), 0.5));
    }
    for bone in bones {
        assert!(vec3_approx(
            scene.get_node(bone).unwrap().transform.position,
            Vec3::new(1.0, 0.0, 0.0)
        ));
    }
}

#[test]
fn system_is_all_or_nothing() {
    let mut scene = Scene::new();
    let mut system = AnimationSystem::new();
    let (a_root, _) = add_model(&mut scene, "a");
    let (b_root, b_bone) = add_model(&mut scene, "b");
    system.add(playing_mixer(&scene, a_root, slide_clip()));
    system.add(playing_mixer(&scene, b_root, slide_clip()));

    scene.remove_node(b_bone);
    assert!(system.update(0.5, &mut scene).is_err());

    let first = system.iter().next().unwrap();
    let (_, action) = first.actions().next().unwrap();
    assert!(approx(action.time(), 0.0), "first mixer advanced before the failure");
}

#[test]
fn stale_mixer_is_disabled_after_first_failure() {
    let mut scene = Scene::new();
    let mut system = AnimationSystem::new();
    let (a_root, a_bone) = add_model(&mut scene, "a");
    let (b_root, b_bone) = add_model(&mut scene, "b");
    let a = system.add(playing_mixer(&scene, a_root, slide_clip()));
    let b = system.add(playing_mixer(&scene, b_root, slide_clip()));

    scene.remove_node(b_bone);
    assert!(system.update(0.5, &mut scene).is_err());
    assert!(system.is_disabled(b));
    assert!(!system.is_disabled(a));

    system.update(0.5, &mut scene).unwrap();
    system.validate(&scene).unwrap();

    let (_, action) = system.get(a).unwrap().actions().next().unwrap();
    assert!(approx(action.time(), 0.5));
    let position = scene.get_node(a_bone).unwrap().transform.position;
    assert!(approx(position.x, 1.0));
    assert_eq!(system.disabled_count(), 1);
}
