//! GPU-side types shared by the gizmo pipelines.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::paint::Color;

// ── vertex ────────────────────────────────────────────────────────────────

/// One world-space vertex with its straight-alpha color (28 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl GpuVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4  // color
    ];

    #[inline]
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

// ── camera uniform ────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    #[inline]
    pub(super) fn new(view_proj: Mat4) -> Self {
        Self { view_proj: view_proj.to_cols_array_2d() }
    }

    /// Binding size for the layout entry; `None` only if the struct were empty.
    #[inline]
    pub(super) fn min_binding_size() -> Option<wgpu::BufferSize> {
        wgpu::BufferSize::new(std::mem::size_of::<Self>() as u64)
    }
}

// ── blend ─────────────────────────────────────────────────────────────────

/// Palette colors are straight alpha.
#[inline]
pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 28);
        let v = GpuVertex::new(Vec3::new(1.0, 2.0, 3.0), Color::RED);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn camera_uniform_is_column_major() {
        let m = Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0));
        let u = CameraUniform::new(m);
        assert_eq!(u.view_proj[3], [4.0, 5.0, 6.0, 1.0]);
        assert_eq!(CameraUniform::min_binding_size().map(|s| s.get()), Some(64));
    }
}
