//! # Vertex Module
//!
//! This module provides the `Vertex` struct, the interleaved layout the engine uses when it
//! hands geometry data (for example the CPU-morphed result of a [`MorphGeometry`]) to a
//! graphics backend. Each vertex carries a homogeneous position and an RGBA color.
//!
//! # Overview
//!
//! ## Structs
//!
//! - [`Vertex`]: A single vertex with position and color attributes, plain-old-data so that a
//!   slice of vertices can be reinterpreted as bytes with `bytemuck::cast_slice`.
//!
//! ## Constants
//!
//! - [`VERTICES`]: A colored triangle used as the base mesh of the demo application.
//!
//! ## Usage
//!
//! ```rust
//! use engine_core::{Geometry, Vertex, VERTICES};
//!
//! let geometry = Geometry::from_vertices(&VERTICES);
//! let vertices: Vec<Vertex> = geometry.to_vertices([1.0, 1.0, 1.0, 1.0]);
//! let bytes: &[u8] = bytemuck::cast_slice(&vertices);
//!
//! assert_eq!(bytes.len(), 3 * std::mem::size_of::<Vertex>());
//! ```
//!
//! # Crate Dependencies
//!
//! This module depends on the following crates:
//! - `bytemuck` for safe conversion of vertex slices into byte buffers.
//! - `nalgebra-glm` for the vector types used to read and write positions.
//!
//! [`MorphGeometry`]: crate::MorphGeometry

/// Represents a single vertex, including its position and color attributes.
///
/// # Fields
///
/// - `position`: A `[f32; 4]` array holding x, y, z and the homogeneous `w` component.
/// - `color`: A `[f32; 4]` array holding normalized RGBA components.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// The position of the vertex in 3D space, with `w` set to `1.0` for points.
    pub position: [f32; 4],

    /// The color of the vertex as RGBA, each component between 0.0 and 1.0.
    pub color: [f32; 4],
}

impl Vertex {
    /// Builds a vertex from a 3D point and a color. The `w` component is set to `1.0`.
    pub fn new(position: &nalgebra_glm::Vec3, color: [f32; 4]) -> Self {
        Self {
            position: [position.x, position.y, position.z, 1.0],
            color,
        }
    }

    /// Returns the x, y and z components of the position.
    pub fn position_vec3(&self) -> nalgebra_glm::Vec3 {
        nalgebra_glm::vec3(self.position[0], self.position[1], self.position[2])
    }
}

/// A colored triangle with clockwise winding, red, green and blue at its corners.
pub const VERTICES: [Vertex; 3] = [
    Vertex {
        position: [1.0, -1.0, 0.0, 1.0],
        color: [1.0, 0.0, 0.0, 1.0],
    },
    Vertex {
        position: [-1.0, -1.0, 0.0, 1.0],
        color: [0.0, 1.0, 0.0, 1.0],
    },
    Vertex {
        position: [0.0, 1.0, 0.0, 1.0],
        color: [0.0, 0.0, 1.0, 1.0],
    },
];

/// Indices of [`VERTICES`] in drawing order.
pub const INDICES: [u32; 3] = [0, 1, 2];
