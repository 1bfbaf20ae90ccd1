// Per-frame motion of the text copies.

use crate::layout::{Direction, Placement};
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Quat, Vec3};

/// Stable handle of one rendered copy. Never reused across relayouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

#[derive(Clone, Debug, PartialEq)]
pub struct TextInstance {
    pub id: InstanceId,
    pub direction: Direction,
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Quat,
    pub original_position: Vec3,
}

impl TextInstance {
    pub fn from_placement(id: InstanceId, placement: &Placement) -> Self {
        Self {
            id,
            direction: placement.direction,
            position: placement.position,
            scale: placement.scale,
            rotation: placement.rotation(),
            original_position: placement.origin,
        }
    }

    /// Fraction of `depth` travelled from the respawn point.
    #[inline]
    pub fn depth_ratio(&self, depth: f32) -> f32 {
        (self.original_position.z - self.position.z) / depth
    }

    /// Object-to-world transform: scale, then rotate, then translate.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Inverse transpose of the model's linear part, `R * S^-1`.
    ///
    /// Axes scaled to (nearly) zero contribute nothing instead of blowing up;
    /// the shader renormalizes.
    pub fn normal_matrix(&self) -> Mat3 {
        let inv = |s: f32| if s.abs() > 1e-6 { s.recip() } else { 0.0 };
        let s = self.scale;
        Mat3::from_quat(self.rotation) * Mat3::from_diagonal(Vec3::new(inv(s.x), inv(s.y), inv(s.z)))
    }

    pub fn to_raw(&self) -> InstanceRaw {
        let n = self.normal_matrix();
        InstanceRaw {
            model: self.model_matrix().to_cols_array_2d(),
            normal: [
                n.x_axis.extend(0.0).to_array(),
                n.y_axis.extend(0.0).to_array(),
                n.z_axis.extend(0.0).to_array(),
            ],
        }
    }
}

/// Per-instance GPU record: model matrix columns, then normal matrix columns
/// padded to vec4.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
}

/// Advance every instance by `elapsed_secs`.
///
/// `speed` is in world units per second along z (negative moves away from the
/// camera). Zero, negative or NaN elapsed time and a non-positive depth leave
/// the instances untouched.
pub fn advance(instances: &mut [TextInstance], elapsed_secs: f32, speed: f32, depth: f32) {
    let usable = |v: f32| v.is_finite() && v > 0.0;
    if !usable(elapsed_secs) || !usable(depth) || !speed.is_finite() {
        return;
    }
    let dz = speed * elapsed_secs;
    for inst in instances.iter_mut() {
        step(inst, dz, depth);
    }
}

#[inline]
fn step(inst: &mut TextInstance, dz: f32, depth: f32) {
    let orig = inst.original_position;
    let new_z = inst.position.z + dz;
    if new_z <= -depth {
        inst.position = orig;
        inst.scale.x = 1.0;
        return;
    }
    let ratio = (orig.z - new_z) / depth;
    inst.position = Vec3::new(orig.x - orig.x * ratio, orig.y - orig.y * ratio, new_z);
    inst.scale.x = 1.0 - ratio;
}
