// Initial placement: four radial directions, nb_text copies each, spread
// along -z exactly where the animation would have carried them.

use crate::constants::*;
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    /// Axis the text is turned around so it faces the center.
    pub fn rotation_axis(self) -> Vec3 {
        match self {
            Direction::Top => TOP_AXIS,
            Direction::Bottom => BOTTOM_AXIS,
            Direction::Left => LEFT_AXIS,
            Direction::Right => RIGHT_AXIS,
        }
    }

    /// Unit offset from the center before scaling by the text width.
    pub fn base(self) -> Vec3 {
        match self {
            Direction::Top => TOP_BASE,
            Direction::Bottom => BOTTOM_BASE,
            Direction::Left => LEFT_BASE,
            Direction::Right => RIGHT_BASE,
        }
    }

    pub fn rotation(self) -> Quat {
        Quat::from_axis_angle(self.rotation_axis(), FRAC_PI_2)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("instance count must be at least 1")]
    NoInstances,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub direction: Direction,
    pub index: u32,
    /// Respawn point of this copy: the direction base scaled by the text width.
    pub origin: Vec3,
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation_axis: Vec3,
}

impl Placement {
    pub fn rotation(&self) -> Quat {
        self.direction.rotation()
    }
}

/// Lay out `4 * nb_text` copies using the fixed recycle depth.
pub fn layout(nb_text: u32, text_width: f32) -> Result<Vec<Placement>, LayoutError> {
    layout_with_depth(nb_text, text_width, RECYCLE_DEPTH)
}

pub fn layout_with_depth(
    nb_text: u32,
    text_width: f32,
    depth: f32,
) -> Result<Vec<Placement>, LayoutError> {
    if nb_text == 0 {
        return Err(LayoutError::NoInstances);
    }
    // NaN and negative widths collapse onto the axis
    let width = if text_width > 0.0 { text_width } else { 0.0 };
    let depth = if depth > 0.0 { depth } else { 0.0 };
    let n = nb_text as f32;
    let interval = depth / n;

    let mut out = Vec::with_capacity(Direction::ALL.len() * nb_text as usize);
    for direction in Direction::ALL {
        let origin = direction.base() * width;
        for i in 0..nb_text {
            let fi = i as f32;
            let ratio = fi / n; // == i * interval / depth
            let z = -fi * interval;
            let position = Vec3::new(origin.x - origin.x * ratio, origin.y - origin.y * ratio, z);
            let scale = Vec3::new((n * 2.0 - fi) / (n * 2.0), 1.0, SCALE_Z);
            out.push(Placement {
                direction,
                index: i,
                origin,
                position,
                scale,
                rotation_axis: direction.rotation_axis(),
            });
        }
    }
    Ok(out)
}
