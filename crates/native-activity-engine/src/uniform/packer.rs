use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable};

use crate::device::InitError;
use crate::gl::{BufferTarget, GlApi};

/// One `vec4` member of a std140 uniform block.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct UniformVec4(pub [f32; 4]);

impl UniformVec4 {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Byte layout of a named uniform block as reported by reflection.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UniformBlockLayout {
    pub name: String,
    /// Block index within the program.
    pub index: u32,
    /// Uniform buffer binding point the block is attached to.
    pub binding: u32,
    /// `UNIFORM_BLOCK_DATA_SIZE` in bytes.
    pub data_size: usize,
    /// Member name → byte offset.
    pub fields: BTreeMap<String, usize>,
}

impl UniformBlockLayout {
    /// Layout with no fields, bound at the binding point equal to its index.
    pub fn new(name: impl Into<String>, index: u32, data_size: usize) -> Self {
        Self {
            name: name.into(),
            index,
            binding: index,
            data_size,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, offset: usize) -> Self {
        self.fields.insert(name.into(), offset);
        self
    }

    pub fn offset(&self, field: &str) -> Option<usize> {
        self.fields.get(field).copied()
    }
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum PackError {
    #[error("block `{block}` has no active field `{field}`")]
    UnknownField { block: String, field: String },
    #[error("field `{field}` ({len} bytes at offset {offset}) overruns block size {size}")]
    OutOfBounds {
        field: String,
        offset: usize,
        len: usize,
        size: usize,
    },
}

/// Builds the CPU-side contents of a uniform block.
///
/// The buffer is `layout.data_size` bytes; each `(field, bytes)` pair is copied
/// to the field's reported offset. Bytes not covered by any field are zero and
/// carry no meaning. Overlap between fields is not checked.
pub fn pack(layout: &UniformBlockLayout, fields: &[(&str, &[u8])]) -> Result<Vec<u8>, PackError> {
    let mut data = vec![0u8; layout.data_size];

    for &(field, bytes) in fields {
        let offset = layout.offset(field).ok_or_else(|| PackError::UnknownField {
            block: layout.name.clone(),
            field: field.to_string(),
        })?;

        let end = offset
            .checked_add(bytes.len())
            .filter(|&end| end <= layout.data_size)
            .ok_or_else(|| PackError::OutOfBounds {
                field: field.to_string(),
                offset,
                len: bytes.len(),
                size: layout.data_size,
            })?;

        data[offset..end].copy_from_slice(bytes);
    }

    Ok(data)
}

/// GPU buffer backing one uniform block.
pub struct UniformBuffer<G: GlApi> {
    buffer: G::Buffer,
    size: usize,
}

impl<G: GlApi> UniformBuffer<G> {
    /// Uploads `data`, assigns the block its binding point and binds the buffer there.
    pub fn upload(
        gl: &mut G,
        program: G::Program,
        layout: &UniformBlockLayout,
        data: &[u8],
    ) -> Result<Self, InitError> {
        let buffer = gl
            .create_buffer()
            .map_err(InitError::BufferCreationFailed)?;

        gl.upload_buffer(BufferTarget::Uniform, buffer, data);
        gl.uniform_block_binding(program, layout.index, layout.binding);
        gl.bind_uniform_buffer_base(layout.binding, buffer);

        log::info!(
            "uniform block `{}` uploaded: {} bytes at binding {}",
            layout.name,
            data.len(),
            layout.binding
        );

        Ok(Self {
            buffer,
            size: data.len(),
        })
    }

    pub fn buffer(&self) -> G::Buffer {
        self.buffer
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn destroy(self, gl: &mut G) {
        gl.delete_buffer(self.buffer);
    }
}
