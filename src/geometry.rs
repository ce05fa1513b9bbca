//! # Geometry (`geometry.rs`)
//!
//! CPU-side vertex data of a mesh: positions, optional normals, optional indices, the shader
//! attribute names each buffer is bound to and the shader defines it requires. Uploading to a
//! graphics backend happens elsewhere; this type only keeps the data and the naming
//! consistent.

use std::collections::BTreeMap;

use nalgebra_glm::Vec3;

use crate::vertex::Vertex;

/// Per-vertex attributes a geometry can carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VertexAttribute {
    Position,
    Normal,
    Tangent,
}

impl VertexAttribute {
    /// Shader attribute name used when nothing else has been assigned.
    pub fn default_name(self) -> &'static str {
        match self {
            VertexAttribute::Position => "VertexPosition",
            VertexAttribute::Normal => "VertexNormal",
            VertexAttribute::Tangent => "VertexTangent",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    indices: Option<Vec<u32>>,
    attribute_names: BTreeMap<VertexAttribute, String>,
    shader_defines: BTreeMap<String, String>,
}

impl Geometry {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            ..Default::default()
        }
    }

    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Builds a geometry from the positions of interleaved vertices.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        Self::new(vertices.iter().map(Vertex::position_vec3).collect())
    }

    /// Interleaves the positions with a single color.
    pub fn to_vertices(&self, color: [f32; 4]) -> Vec<Vertex> {
        self.positions
            .iter()
            .map(|position| Vertex::new(position, color))
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    pub fn normals_mut(&mut self) -> Option<&mut [Vec3]> {
        self.normals.as_deref_mut()
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = Some(indices);
    }

    /// Name of the shader attribute `attribute` is bound to.
    pub fn attribute_name(&self, attribute: VertexAttribute) -> &str {
        self.attribute_names
            .get(&attribute)
            .map(String::as_str)
            .unwrap_or_else(|| attribute.default_name())
    }

    pub fn set_attribute_name(&mut self, attribute: VertexAttribute, name: impl Into<String>) {
        self.attribute_names.insert(attribute, name.into());
    }

    pub fn shader_define(&self, name: &str) -> Option<&str> {
        self.shader_defines.get(name).map(String::as_str)
    }

    pub fn set_shader_define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.shader_defines.insert(name.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::VERTICES;

    #[test]
    fn attribute_names_fall_back_to_defaults() {
        let mut geometry = Geometry::from_vertices(&VERTICES);
        assert_eq!(geometry.attribute_name(VertexAttribute::Normal), "VertexNormal");

        geometry.set_attribute_name(VertexAttribute::Normal, "MorphNormal0");
        assert_eq!(geometry.attribute_name(VertexAttribute::Normal), "MorphNormal0");
    }

    #[test]
    fn vertices_round_through_positions() {
        let geometry = Geometry::from_vertices(&VERTICES);
        let vertices = geometry.to_vertices([0.0, 0.0, 0.0, 1.0]);

        assert_eq!(geometry.vertex_count(), 3);
        for (vertex, original) in vertices.iter().zip(VERTICES.iter()) {
            assert_eq!(vertex.position, original.position);
        }
    }
}
