use std::f32::consts::TAU;
use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::{Quat, Vec3};

use diorama::animation::{
    AnimationClip, AnimationMixer, AnimationSystem, KeyframeTrack, TargetPath, Track, TrackData,
};
use diorama::scene::{Node, Scene};

const BONES: usize = 32;
const KEYFRAMES: usize = 120;

/// One clip animating rotation and translation of `BONES` nodes over 4 seconds.
fn rig_clip() -> Arc<AnimationClip> {
    let times: Vec<f32> = (0..KEYFRAMES).map(|i| i as f32 / 30.0).collect();
    let mut tracks = Vec::with_capacity(BONES * 2);
    for bone in 0..BONES {
        let name = format!("bone_{bone}");
        let rotations = times
            .iter()
            .map(|t| Quat::from_rotation_y(t * TAU + bone as f32))
            .collect();
        let positions = times
            .iter()
            .map(|t| Vec3::new(t.sin(), bone as f32 * 0.1, t.cos()))
            .collect();
        tracks.push(Track::new(
            name.clone(),
            TargetPath::Rotation,
            TrackData::Quaternion(KeyframeTrack::linear(times.clone(), rotations)),
        ));
        tracks.push(Track::new(
            name,
            TargetPath::Translation,
            TrackData::Vector3(KeyframeTrack::linear(times.clone(), positions)),
        ));
    }
    Arc::new(AnimationClip::new("rig", tracks))
}

fn build(models: usize) -> (Scene, AnimationSystem) {
    let clip = rig_clip();
    let mut scene = Scene::new();
    let mut system = AnimationSystem::new();

    for m in 0..models {
        let root = scene.create_node(format!("model_{m}"));
        let mut parent = root;
        for bone in 0..BONES {
            parent = scene.add_to_parent(Node::with_name(format!("bone_{bone}")), parent);
        }

        let mut mixer = AnimationMixer::new(root);
        let action = mixer.clip_action(clip.clone(), &scene).unwrap();
        mixer.action_mut(action).unwrap().play();
        system.add(mixer);
    }
    (scene, system)
}

fn mixer_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("animation_system_update");
    for models in [1, 3, 16] {
        let (mut scene, mut system) = build(models);
        group.bench_with_input(BenchmarkId::from_parameter(models), &models, |b, _| {
            b.iter(|| {
                system.update(black_box(1.0 / 60.0), &mut scene).unwrap();
            });
        });
    }
    group.finish();
}

fn frame_with_transforms(c: &mut Criterion) {
    let (mut scene, mut system) = build(3);
    c.bench_function("update_and_propagate_3_models", |b| {
        b.iter(|| {
            system.update(black_box(1.0 / 60.0), &mut scene).unwrap();
            scene.update_matrix_world();
        });
    });
}

fn bind_clip(c: &mut Criterion) {
    let (scene, _) = build(1);
    let clip = rig_clip();
    let root = scene.root_nodes[0];
    c.bench_function("bind_rig_clip", |b| {
        b.iter(|| {
            let mut mixer = AnimationMixer::new(root);
            black_box(mixer.clip_action(clip.clone(), &scene).unwrap());
        });
    });
}

criterion_group!(benches, mixer_update, frame_with_transforms, bind_clip);
criterion_main!(benches);
