//! Interactive ASCII ray caster for triangle meshes
//!
//! Casts one ray per character cell against a triangle mesh, flat-shades the
//! nearest hit with a fixed directional light, and quantizes the result onto
//! a five-glyph density ramp. The frame is redrawn after every keypress.

pub mod camera;
pub mod mesh;
pub mod renderer;
pub mod stl;
pub mod terminal;

pub use camera::Camera;
pub use mesh::{Mesh, Triangle};
pub use renderer::Renderer;
pub use terminal::TerminalDisplay;

/// Display glyphs ordered from empty to solid.
///
/// Index 0 is reserved for cells whose ray misses the mesh entirely; shaded
/// hits land in 1..=4.
pub const DENSITY_RAMP: [char; 5] = [' ', '\u{2591}', '\u{2592}', '\u{2593}', '\u{2588}'];
