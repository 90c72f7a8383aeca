use crate::device::InitError;
use crate::gl::{BufferTarget, GlApi, float_components};
use crate::shader::ReflectionInfo;

/// Diamond outline in NDC, drawn as a fan.
pub static TRIANGLE: [[f32; 3]; 4] = [
    [0.0, 0.5, 0.0],
    [-0.5, 0.0, 0.0],
    [0.0, -0.5, 0.0],
    [0.5, 0.0, 0.0],
];

/// Per-vertex RGBA, matching `TRIANGLE` by index.
pub static COLORS: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 0.0],
];

pub const VERTEX_COUNT: i32 = 4;

/// How one vertex array feeds a shader attribute.
///
/// The location is not part of the binding; it is looked up in the program's
/// reflection data.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexBinding {
    pub attribute: &'static str,
    pub components: i32,
    /// Byte stride; 0 means tightly packed.
    pub stride: i32,
}

pub const POSITION: VertexBinding = VertexBinding {
    attribute: "vPosition",
    components: 3,
    stride: 0,
};

pub const COLOR: VertexBinding = VertexBinding {
    attribute: "vColor",
    components: 4,
    stride: 0,
};

/// The fixed vertex streams of the scene.
pub fn streams() -> [(VertexBinding, &'static [u8]); 2] {
    [
        (POSITION, bytemuck::cast_slice(&TRIANGLE)),
        (COLOR, bytemuck::cast_slice(&COLORS)),
    ]
}

/// Resolves a binding's location and checks it against the attribute type.
pub fn resolve_binding<L>(
    binding: &VertexBinding,
    reflection: &ReflectionInfo<L>,
) -> Result<u32, InitError> {
    let attribute = reflection
        .attribute(binding.attribute)
        .ok_or_else(|| InitError::MissingAttribute(binding.attribute.to_string()))?;

    let accepted = float_components(attribute.gl_type).unwrap_or(0);
    if binding.components < 1 || binding.components > accepted {
        return Err(InitError::AttributeMismatch {
            name: binding.attribute.to_string(),
            accepted,
            supplied: binding.components,
        });
    }

    Ok(attribute.location)
}

struct BoundStream<G: GlApi> {
    location: u32,
    buffer: G::Buffer,
    binding: VertexBinding,
}

/// Vertex buffers for the scene, each tied to a reflected attribute location.
pub struct Geometry<G: GlApi> {
    streams: Vec<BoundStream<G>>,
}

impl<G: GlApi> Geometry<G> {
    /// Validates every binding, then uploads each stream to its own buffer.
    ///
    /// Buffers created before a failure are deleted.
    pub fn upload(
        gl: &mut G,
        reflection: &ReflectionInfo<G::UniformLocation>,
    ) -> Result<Self, InitError> {
        let resolved = streams()
            .into_iter()
            .map(|(binding, data)| {
                resolve_binding(&binding, reflection).map(|location| (location, binding, data))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut geometry = Self {
            streams: Vec::with_capacity(resolved.len()),
        };

        for (location, binding, data) in resolved {
            let buffer = match gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(reason) => {
                    geometry.destroy(gl);
                    return Err(InitError::BufferCreationFailed(reason));
                }
            };
            gl.upload_buffer(BufferTarget::Array, buffer, data);
            log::debug!(
                "vertex stream `{}` at location {location}: {} bytes",
                binding.attribute,
                data.len()
            );
            geometry.streams.push(BoundStream {
                location,
                buffer,
                binding,
            });
        }

        Ok(geometry)
    }

    /// Points every attribute at its buffer.
    pub fn bind(&self, gl: &mut G) {
        for s in &self.streams {
            gl.vertex_attrib_buffer(s.location, s.buffer, s.binding.components, s.binding.stride);
        }
    }

    pub fn vertex_count(&self) -> i32 {
        VERTEX_COUNT
    }

    pub fn destroy(self, gl: &mut G) {
        for s in self.streams {
            gl.delete_buffer(s.buffer);
        }
    }
}
