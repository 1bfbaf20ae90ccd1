pub mod animation;
pub mod bindings;
pub mod camera;
pub mod color;
pub mod constants;
pub mod controller;
pub mod geometry;
pub mod layout;
pub mod params;
pub mod query;
pub static TEXT_WGSL: &str = include_str!("../shaders/text.wgsl");

pub use animation::*;
pub use bindings::*;
pub use camera::Camera;
pub use controller::*;
pub use geometry::*;
pub use layout::*;
pub use params::*;
