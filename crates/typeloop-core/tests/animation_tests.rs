// Host-side tests for the per-frame animation model.

use glam::Vec3;
use typeloop_core::*;

fn instances(nb_text: u32, width: f32, depth: f32) -> Vec<TextInstance> {
    layout_with_depth(nb_text, width, depth)
        .unwrap()
        .iter()
        .enumerate()
        .map(|(i, p)| TextInstance::from_placement(InstanceId(i as u64), p))
        .collect()
}

#[test]
fn zero_elapsed_time_changes_nothing() {
    let mut v = instances(10, 1.0, 20.0);
    let before = v.clone();
    advance(&mut v, 0.0, -1.0, 20.0);
    assert_eq!(v, before);
}

#[test]
fn invalid_inputs_are_tolerated() {
    let mut v = instances(10, 1.0, 20.0);
    let before = v.clone();
    advance(&mut v, -0.5, -1.0, 20.0);
    advance(&mut v, f32::NAN, -1.0, 20.0);
    advance(&mut v, 0.1, -1.0, 0.0);
    advance(&mut v, 0.1, -1.0, -20.0);
    assert_eq!(v, before);
    advance(&mut [], 0.1, -1.0, 20.0);
}

#[test]
fn recycles_after_travelling_the_full_depth() {
    let depth = 10.0;
    let mut v = instances(10, 1.0, depth);
    // top, index 0: respawn point (0, 1, 0)
    let mut inst = vec![v.swap_remove(0)];
    assert_eq!(inst[0].original_position, Vec3::new(0.0, 1.0, 0.0));

    for _ in 0..3 {
        advance(&mut inst, 0.5, -5.0, depth);
    }
    // 1.5 s at -5 -> z = -7.5, ratio 0.75
    assert_eq!(inst[0].position, Vec3::new(0.0, 0.25, -7.5));
    assert_eq!(inst[0].scale.x, 0.25);

    // 2.0 s -> z reaches -10, which is the recycle boundary
    advance(&mut inst, 0.5, -5.0, depth);
    assert_eq!(inst[0].position, inst[0].original_position);
    assert_eq!(inst[0].scale.x, 1.0);

    // and it keeps looping from the start
    advance(&mut inst, 0.5, -5.0, depth);
    assert_eq!(inst[0].position, Vec3::new(0.0, 0.75, -2.5));
}

#[test]
fn only_scale_x_is_animated() {
    let mut v = instances(10, 1.0, 20.0);
    advance(&mut v, 0.25, -2.0, 20.0);
    for inst in &v {
        assert_eq!(inst.scale.y, 1.0);
        assert_eq!(inst.scale.z, 0.05);
    }
}

#[test]
fn update_order_does_not_matter() {
    let mut forward = instances(12, 2.0, 20.0);
    let mut backward: Vec<_> = forward.iter().rev().cloned().collect();
    for _ in 0..50 {
        advance(&mut forward, 0.07, -3.0, 20.0);
        advance(&mut backward, 0.07, -3.0, 20.0);
    }
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn model_matrix_applies_scale_rotation_translation() {
    let v = instances(10, 2.0, 20.0);
    let top = &v[0];
    let m = top.model_matrix();
    // local +y is turned onto +z and then offset by the position
    let p = m.transform_point3(Vec3::Y);
    assert!((p - (top.position + Vec3::Z)).abs().max_element() < 1e-5);
}

#[test]
fn normals_stay_perpendicular_under_non_uniform_scale() {
    let v = instances(10, 2.0, 20.0);
    let inst = &v[5];
    assert!(inst.scale.x < 1.0 && inst.scale.z < 1.0);

    let linear = glam::Mat3::from_mat4(inst.model_matrix());
    let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
    let tangents = [Vec3::new(1.0, -1.0, 0.0).normalize(), Vec3::Z];

    let n = inst.normal_matrix() * normal;
    for t in tangents {
        assert!(n.dot(linear * t).abs() < 1e-5);
    }
    // transforming the normal like a position skews it off the surface
    let skewed = linear * normal;
    assert!(skewed.dot(linear * tangents[0]).abs() > 1e-3);
}

#[test]
fn collapsed_axis_does_not_poison_the_normal_matrix() {
    let mut v = instances(10, 2.0, 20.0);
    v[0].scale.x = 0.0;
    assert!(v[0].normal_matrix().is_finite());
    let raw = v[0].to_raw();
    assert!(raw.normal.iter().flatten().all(|c| c.is_finite()));
    assert_eq!(raw.normal[0][3], 0.0);
}
