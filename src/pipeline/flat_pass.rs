//! Flat lit geometry pass
//!
//! Emulates the classic fixed-function state: one directional light that
//! follows the camera, a global ambient term and Gouraud shading.

use crate::backend::types::*;
use crate::scene::{CameraUniformData, Headlight};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

/// Per-draw uniforms shared by the vertex and fragment stages
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct DrawUniforms {
    pub view_proj: Mat4,
    pub view: Mat4,
    /// Material base color, applied per vertex
    pub base_color: Vec4,
    /// xyz = eye-space direction towards the light, w = unused
    pub light_direction: Vec4,
    pub light_diffuse: Vec4,
    /// Global ambient color
    pub ambient: Vec4,
}

impl DrawUniforms {
    pub fn new(camera: &CameraUniformData, light: &Headlight, base_color: Vec4) -> Self {
        Self {
            view_proj: camera.view_proj,
            view: camera.view,
            base_color,
            light_direction: light.direction.normalize_or_zero().extend(0.0),
            light_diffuse: light.diffuse.extend(1.0),
            ambient: light.ambient.extend(1.0),
        }
    }
}

/// The only geometry pass of the renderer
pub struct FlatPass;

impl FlatPass {
    pub const NAME: &'static str = "Flat Pass";

    /// Pipeline state for the pass
    pub fn pipeline_descriptor(
        color_format: TextureFormat,
        depth_format: TextureFormat,
    ) -> RenderPipelineDescriptor {
        RenderPipelineDescriptor {
            label: Some(Self::NAME.into()),
            shader: FLAT_SHADER.to_string(),
            vertex_layouts: vec![Vertex::layout()],
            front_face: FrontFace::Ccw,
            cull_mode: CullMode::Back,
            depth_stencil: Some(DepthStencilState {
                format: depth_format,
                depth_write_enabled: true,
                depth_compare: CompareFunction::LessEqual,
            }),
            color_format,
        }
    }
}

pub const FLAT_SHADER: &str = r#"
struct DrawUniforms {
    view_proj: mat4x4<f32>,
    view: mat4x4<f32>,
    base_color: vec4<f32>,
    light_direction: vec4<f32>,
    light_diffuse: vec4<f32>,
    ambient: vec4<f32>,
}

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
    @location(1) uv: vec2<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: DrawUniforms;

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;

    output.clip_position = uniforms.view_proj * vec4<f32>(input.position, 1.0);

    // Eye-space normal, renormalized after the view transform
    let view_normal = (uniforms.view * vec4<f32>(input.normal, 0.0)).xyz;
    var n = vec3<f32>(0.0, 0.0, 0.0);
    if (dot(view_normal, view_normal) > 0.0) {
        n = normalize(view_normal);
    }

    let l = normalize(uniforms.light_direction.xyz);
    let n_dot_l = max(dot(n, l), 0.0);

    let lit = uniforms.ambient.rgb * uniforms.base_color.rgb
        + n_dot_l * uniforms.light_diffuse.rgb * uniforms.base_color.rgb;

    output.color = vec4<f32>(clamp(lit, vec3<f32>(0.0), vec3<f32>(1.0)), uniforms.base_color.a);
    output.uv = input.uv;

    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;
