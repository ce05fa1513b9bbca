//! # Morph Geometry (`morph.rs`)
//!
//! A [`MorphGeometry`] pairs a base [`Geometry`] with any number of morph targets stored as
//! per-vertex deltas, plus one weight per target. A vertex shader blends
//! `base + Σ weightᵢ · deltaᵢ`, but it can only receive [`MAX_ACTIVE_MORPH_TARGETS`] targets at
//! a time. When a geometry has more targets than that, every frame selects the heaviest ones
//! (see [`select_active_set`]) and rebinds their attribute names to the shader slots.
//!
//! ## Frame Flow
//!
//! 1. The animation code updates weights with [`MorphGeometry::set_weights`].
//! 2. The renderer calls [`MorphGeometry::render_setup`], which recomputes the active set,
//!    renames target attributes to `MorphPosition{slot}` / `MorphNormal{slot}` /
//!    `MorphTangent{slot}` when needed, and returns a [`MorphSetup`]: the targets to bind in
//!    slot order plus the [`MorphUniform`] to upload.
//!
//! Nothing about the active set is cached between frames: it always reflects the current
//! weights.

use crate::active_set::{select_active_set, ActiveSet};
use crate::error::MorphError;
use crate::geometry::{Geometry, VertexAttribute};
use crate::morph_uniform::MorphUniform;

/// Maximum number of morph targets a shader receives per draw.
pub const MAX_ACTIVE_MORPH_TARGETS: usize = 8;

/// Name of the shader define announcing the number of morph target slots.
pub const MORPH_TARGETS_DEFINE: &str = "MORPHTARGETS";

#[derive(Clone, Debug)]
pub struct MorphGeometry {
    base: Geometry,
    targets: Vec<Geometry>,
    weights: Vec<f32>,
}

impl MorphGeometry {
    pub fn new(mut base: Geometry) -> Self {
        base.set_shader_define(MORPH_TARGETS_DEFINE, MAX_ACTIVE_MORPH_TARGETS.to_string());
        Self {
            base,
            targets: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn base(&self) -> &Geometry {
        &self.base
    }

    /// Morph targets, each holding deltas against the base geometry.
    pub fn targets(&self) -> &[Geometry] {
        &self.targets
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Replaces all weights. The slice must have one weight per target.
    pub fn set_weights(&mut self, weights: &[f32]) -> Result<(), MorphError> {
        if weights.len() != self.weights.len() {
            return Err(MorphError::WeightCount {
                expected: self.weights.len(),
                actual: weights.len(),
            });
        }
        self.weights.copy_from_slice(weights);
        Ok(())
    }

    /// Adds morph targets given as complete geometries.
    ///
    /// Each target is converted in place into deltas against the base positions, and against
    /// the base normals when the target has normals. New targets start with weight zero. If
    /// any target is inconsistent with the base, nothing is added.
    pub fn add_morph_targets(
        &mut self,
        targets: impl IntoIterator<Item = Geometry>,
    ) -> Result<(), MorphError> {
        let mut deltas = Vec::new();
        for mut target in targets {
            self.check_target(&target)?;

            for (vertex, base) in target.positions_mut().iter_mut().zip(self.base.positions()) {
                *vertex -= base;
            }
            if let (Some(normals), Some(base_normals)) =
                (target.normals_mut(), self.base.normals())
            {
                for (normal, base) in normals.iter_mut().zip(base_normals) {
                    *normal -= base;
                }
            }
            deltas.push(target);
        }

        self.push_targets(deltas);
        Ok(())
    }

    /// Adds morph targets that already hold deltas against the base geometry.
    pub fn add_morph_target_deltas(
        &mut self,
        deltas: impl IntoIterator<Item = Geometry>,
    ) -> Result<(), MorphError> {
        let deltas: Vec<Geometry> = deltas.into_iter().collect();
        for delta in &deltas {
            self.check_target(delta)?;
        }
        self.push_targets(deltas);
        Ok(())
    }

    fn check_target(&self, target: &Geometry) -> Result<(), MorphError> {
        if target.vertex_count() != self.base.vertex_count() {
            return Err(MorphError::VertexCountMismatch {
                expected: self.base.vertex_count(),
                actual: target.vertex_count(),
            });
        }
        if target.normals().is_some() && self.base.normals().is_none() {
            return Err(MorphError::MissingBaseNormals);
        }
        Ok(())
    }

    fn push_targets(&mut self, targets: Vec<Geometry>) {
        self.weights.resize(self.weights.len() + targets.len(), 0.0);
        self.targets.extend(targets);

        // With few enough targets every one of them owns a fixed slot.
        if self.targets.len() <= MAX_ACTIVE_MORPH_TARGETS {
            let all: Vec<usize> = (0..self.targets.len()).collect();
            self.update_target_attributes(&all);
        }
        log::debug!("Morph geometry now has {} targets", self.targets.len());
    }

    /// Returns the targets with the largest current weights, at most
    /// [`MAX_ACTIVE_MORPH_TARGETS`] of them.
    pub fn active_morph_targets(&self) -> ActiveSet<'_, Geometry> {
        select_active_set(&self.targets, &self.weights, MAX_ACTIVE_MORPH_TARGETS)
    }

    /// Binds the targets at `target_indices` to consecutive shader slots.
    pub fn update_target_attributes(&mut self, target_indices: &[usize]) {
        for (slot, &index) in target_indices.iter().enumerate() {
            let Some(target) = self.targets.get_mut(index) else {
                log::warn!("Ignoring unknown morph target index {index}");
                continue;
            };
            target.set_attribute_name(VertexAttribute::Position, format!("MorphPosition{slot}"));
            target.set_attribute_name(VertexAttribute::Normal, format!("MorphNormal{slot}"));
            target.set_attribute_name(VertexAttribute::Tangent, format!("MorphTangent{slot}"));
        }
    }

    /// Sets the same index buffer on the base geometry and on every target.
    pub fn set_indices(&mut self, indices: Vec<u32>) {
        for target in &mut self.targets {
            target.set_indices(indices.clone());
        }
        self.base.set_indices(indices);
    }

    /// Blends the base geometry with every target on the CPU using `weights`.
    ///
    /// Normals are renormalized after blending. The result keeps the base indices and
    /// attribute names but is no longer morphable.
    pub fn compute_morphed(&self, weights: &[f32]) -> Result<Geometry, MorphError> {
        if weights.len() != self.targets.len() {
            return Err(MorphError::WeightCount {
                expected: self.targets.len(),
                actual: weights.len(),
            });
        }

        let mut morphed = self.base.clone();
        for (target, &weight) in self.targets.iter().zip(weights) {
            if weight == 0.0 {
                continue;
            }
            for (vertex, delta) in morphed.positions_mut().iter_mut().zip(target.positions()) {
                *vertex += delta * weight;
            }
            if let (Some(normals), Some(deltas)) = (morphed.normals_mut(), target.normals()) {
                for (normal, delta) in normals.iter_mut().zip(deltas) {
                    *normal += delta * weight;
                }
            }
        }

        if let Some(normals) = morphed.normals_mut() {
            for normal in normals.iter_mut() {
                if nalgebra_glm::length(normal) > f32::EPSILON {
                    *normal = nalgebra_glm::normalize(normal);
                }
            }
        }
        Ok(morphed)
    }

    /// Prepares the geometry for a draw.
    ///
    /// Returns the targets to bind, in slot order, together with the weights to upload. When
    /// there are more targets than shader slots, the heaviest targets are rebound to the slots
    /// on every call and every other target falls back to its default attribute names, so
    /// each slot name belongs to exactly one target.
    pub fn render_setup(&mut self) -> MorphSetup {
        let (indices, uniform) = {
            let active = self.active_morph_targets();
            (active.indices, MorphUniform::from_weights(&active.weights))
        };

        if self.targets.len() > MAX_ACTIVE_MORPH_TARGETS {
            for (index, target) in self.targets.iter_mut().enumerate() {
                if !indices.contains(&index) {
                    for attribute in [
                        VertexAttribute::Position,
                        VertexAttribute::Normal,
                        VertexAttribute::Tangent,
                    ] {
                        target.set_attribute_name(attribute, attribute.default_name());
                    }
                }
            }
            self.update_target_attributes(&indices);
        }
        MorphSetup { indices, uniform }
    }
}

/// Per-draw output of [`MorphGeometry::render_setup`].
#[derive(Clone, Debug, PartialEq)]
pub struct MorphSetup {
    /// Indices into [`MorphGeometry::targets`] of the targets bound to slots `0..`.
    pub indices: Vec<usize>,
    pub uniform: MorphUniform,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_glm::vec3;

    fn base() -> Geometry {
        Geometry::new(vec![vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)])
    }

    fn shifted(dy: f32) -> Geometry {
        Geometry::new(vec![vec3(0.0, dy, 0.0), vec3(1.0, dy, 0.0)])
    }

    #[test]
    fn new_sets_morph_define() {
        let morph = MorphGeometry::new(base());
        assert_eq!(morph.base().shader_define(MORPH_TARGETS_DEFINE), Some("8"));
    }

    #[test]
    fn targets_are_stored_as_deltas() {
        let mut morph = MorphGeometry::new(base());
        morph.add_morph_targets([shifted(2.0)]).unwrap();

        assert_eq!(morph.targets()[0].positions(), &[vec3(0.0, 2.0, 0.0), vec3(0.0, 2.0, 0.0)]);
        assert_eq!(morph.weights(), &[0.0]);
        assert_eq!(
            morph.targets()[0].attribute_name(VertexAttribute::Position),
            "MorphPosition0"
        );
    }

    #[test]
    fn mismatched_target_is_rejected_without_side_effects() {
        let mut morph = MorphGeometry::new(base());
        let bad = Geometry::new(vec![vec3(0.0, 0.0, 0.0)]);

        let result = morph.add_morph_targets([shifted(1.0), bad]);

        assert_eq!(
            result,
            Err(MorphError::VertexCountMismatch { expected: 2, actual: 1 })
        );
        assert!(morph.targets().is_empty());
    }

    #[test]
    fn target_normals_need_base_normals() {
        let mut morph = MorphGeometry::new(base());
        let target = shifted(1.0).with_normals(vec![vec3(0.0, 0.0, 1.0); 2]);

        assert_eq!(
            morph.add_morph_target_deltas([target]),
            Err(MorphError::MissingBaseNormals)
        );
    }

    #[test]
    fn weight_count_must_match() {
        let mut morph = MorphGeometry::new(base());
        morph.add_morph_target_deltas([shifted(1.0)]).unwrap();

        assert_eq!(
            morph.set_weights(&[0.5, 0.5]),
            Err(MorphError::WeightCount { expected: 1, actual: 2 })
        );
        morph.set_weights(&[0.5]).unwrap();
        assert_eq!(morph.weights(), &[0.5]);
    }

    #[test]
    fn compute_morphed_blends_deltas() {
        let mut morph = MorphGeometry::new(base());
        morph.add_morph_targets([shifted(2.0), shifted(-4.0)]).unwrap();

        let morphed = morph.compute_morphed(&[0.5, 0.25]).unwrap();

        assert_eq!(morphed.positions(), &[vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0)]);

        let morphed = morph.compute_morphed(&[1.0, 0.0]).unwrap();
        assert_eq!(morphed.positions()[1], vec3(1.0, 2.0, 0.0));
    }

    #[test]
    fn compute_morphed_renormalizes_normals() {
        let base = base().with_normals(vec![vec3(0.0, 0.0, 1.0); 2]);
        let target = shifted(0.0).with_normals(vec![vec3(1.0, 0.0, 0.0); 2]);
        let mut morph = MorphGeometry::new(base);
        morph.add_morph_targets([target]).unwrap();

        let morphed = morph.compute_morphed(&[1.0]).unwrap();

        let normal = morphed.normals().unwrap()[0];
        assert!((nalgebra_glm::length(&normal) - 1.0).abs() < 1e-6);
        assert!((normal.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn set_indices_reaches_every_target() {
        let mut morph = MorphGeometry::new(base());
        morph.add_morph_target_deltas([shifted(1.0), shifted(2.0)]).unwrap();

        morph.set_indices(vec![0, 1]);

        assert_eq!(morph.base().indices(), Some(&[0, 1][..]));
        assert!(morph.targets().iter().all(|t| t.indices() == Some(&[0, 1][..])));
    }

    #[test]
    fn dropped_target_reverts_to_default_names() {
        let mut morph = MorphGeometry::new(base());
        morph
            .add_morph_target_deltas((0..9).map(|i| shifted(i as f32)))
            .unwrap();
        let mut weights = [0.0; 9];
        weights[8] = 1.0;
        morph.set_weights(&weights).unwrap();
        assert_eq!(morph.render_setup().indices[0], 8);

        weights[8] = 0.0;
        weights[7] = 1.0;
        morph.set_weights(&weights).unwrap();
        let setup = morph.render_setup();

        assert!(!setup.indices.contains(&8));
        assert_eq!(
            morph.targets()[8].attribute_name(VertexAttribute::Normal),
            "VertexNormal"
        );
        assert_eq!(
            morph.targets()[7].attribute_name(VertexAttribute::Normal),
            "MorphNormal0"
        );
    }
}
