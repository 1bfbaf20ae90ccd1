// Host-side tests for the radial instance layout.

use glam::Vec3;
use typeloop_core::*;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-5
}

#[test]
fn layout_produces_four_copies_per_text() {
    for n in 1..=30 {
        let placements = layout(n, 1.25).unwrap();
        assert_eq!(placements.len(), 4 * n as usize, "nb_text={n}");
        for dir in Direction::ALL {
            let count = placements.iter().filter(|p| p.direction == dir).count();
            assert_eq!(count, n as usize);
        }
    }
}

#[test]
fn zero_instances_is_rejected() {
    assert_eq!(layout(0, 1.0), Err(LayoutError::NoInstances));
}

#[test]
fn copies_step_back_and_converge_toward_the_axis() {
    let placements = layout_with_depth(10, 2.0, 20.0).unwrap();
    let top: Vec<_> = placements
        .iter()
        .filter(|p| p.direction == Direction::Top)
        .collect();

    assert_eq!(top[0].origin, Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(top[0].position, Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(top[0].scale, Vec3::new(1.0, 1.0, 0.05));

    // interval = 20 / 10 = 2, halfway down the tunnel
    assert_eq!(top[5].position, Vec3::new(0.0, 1.0, -10.0));
    assert_eq!(top[5].scale, Vec3::new(0.75, 1.0, 0.05));

    for pair in top.windows(2) {
        assert!(pair[1].position.z < pair[0].position.z);
        assert!(pair[1].position.y < pair[0].position.y);
        assert!(pair[1].scale.x < pair[0].scale.x);
    }
}

#[test]
fn each_direction_uses_its_own_base_and_axis() {
    let placements = layout(10, 3.0).unwrap();
    let first = |d: Direction| placements.iter().find(|p| p.direction == d).unwrap();

    assert_eq!(first(Direction::Top).origin, Vec3::new(0.0, 3.0, 0.0));
    assert_eq!(first(Direction::Bottom).origin, Vec3::new(0.0, -3.0, 0.0));
    assert_eq!(first(Direction::Left).origin, Vec3::new(-3.0, 0.0, 0.0));
    assert_eq!(first(Direction::Right).origin, Vec3::new(3.0, 0.0, 0.0));

    assert_eq!(first(Direction::Top).rotation_axis, Vec3::X);
    assert_eq!(first(Direction::Bottom).rotation_axis, Vec3::NEG_X);
    assert_eq!(first(Direction::Left).rotation_axis, Vec3::NEG_Z);
    assert_eq!(first(Direction::Right).rotation_axis, Vec3::Z);
}

#[test]
fn rotation_is_a_quarter_turn_about_the_axis() {
    // +90 degrees about +x turns +y into +z
    let r = Direction::Top.rotation();
    assert!(approx(r * Vec3::Y, Vec3::Z));
    // the axis itself is fixed
    assert!(approx(r * Vec3::X, Vec3::X));
    let r = Direction::Right.rotation();
    assert!(approx(r * Vec3::X, Vec3::Y));
}

#[test]
fn zero_width_collapses_onto_the_axis() {
    for width in [0.0, -4.0, f32::NAN] {
        let placements = layout(12, width).unwrap();
        assert_eq!(placements.len(), 48);
        for p in &placements {
            assert_eq!(p.position.x, 0.0);
            assert_eq!(p.position.y, 0.0);
        }
    }
}

#[test]
fn layout_matches_where_the_animation_carries_a_fresh_copy() {
    let depth = 20.0;
    let placements = layout_with_depth(10, 1.5, depth).unwrap();
    let fresh = &placements[0];
    let target = &placements[3]; // z = -6

    let mut inst = vec![TextInstance::from_placement(InstanceId(0), fresh)];
    for _ in 0..12 {
        advance(&mut inst, 0.5, -1.0, depth);
    }
    assert!(approx(inst[0].position, target.position));
}
