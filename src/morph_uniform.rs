//! # Morph Uniform
//!
//! This module defines the `MorphUniform` struct, the block of per-frame data a morphing
//! vertex shader needs: the influences (weights) of the active morph targets and how many of
//! the slots are in use.
//!
//! ## Design
//!
//! The `MorphUniform` struct contains:
//!
//! - `influences`: One weight per active target slot, in slot order. Slot `i` pairs with the
//!   attributes named `MorphPosition{i}`, `MorphNormal{i}` and `MorphTangent{i}`.
//! - `active_count`: Number of leading slots that carry a real target.
//!
//! ### Memory Layout and Traits
//!
//! - `#[repr(C)]`: Ensures a C-compatible memory layout.
//! - `bytemuck::Pod` and `bytemuck::Zeroable`: Allow the struct to be viewed as raw bytes.
//! - The trailing padding field keeps the size a multiple of 16 bytes, as uniform blocks
//!   require.
//!
//! ## Example Usage
//!
//! ```rust
//! use engine_core::MorphUniform;
//!
//! let uniform = MorphUniform::from_weights(&[0.75, 0.25]);
//! let raw_data: &[u8] = bytemuck::bytes_of(&uniform);
//!
//! assert_eq!(uniform.active_count, 2);
//! assert_eq!(raw_data.len() % 16, 0);
//! ```

use crate::morph::MAX_ACTIVE_MORPH_TARGETS;

#[repr(C)]
#[derive(Default, Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MorphUniform {
    /// Weights of the active morph targets; unused slots stay at zero.
    pub influences: [f32; MAX_ACTIVE_MORPH_TARGETS],

    /// Number of slots of `influences` in use.
    pub active_count: u32,

    _padding: [u32; 3],
}

impl MorphUniform {
    /// Packs up to [`MAX_ACTIVE_MORPH_TARGETS`] weights; extra weights are dropped.
    pub fn from_weights(weights: &[f32]) -> Self {
        let mut uniform = Self::default();
        let count = weights.len().min(MAX_ACTIVE_MORPH_TARGETS);
        uniform.influences[..count].copy_from_slice(&weights[..count]);
        uniform.active_count = count as u32;
        uniform
    }

    /// The influences that are in use.
    pub fn active_influences(&self) -> &[f32] {
        &self.influences[..self.active_count as usize]
    }
}
