use std::collections::BTreeMap;

use crate::gl::{GlApi, type_name};
use crate::uniform::UniformBlockLayout;

/// Active vertex attribute.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeInfo {
    pub location: u32,
    pub size: i32,
    pub gl_type: u32,
}

/// Placement of a uniform inside a named block.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlockMember {
    pub block_index: u32,
    pub offset: usize,
}

/// Active uniform.
///
/// Block members have no location; default-block uniforms have no `block`.
#[derive(Debug, Clone)]
pub struct UniformInfo<L> {
    pub location: Option<L>,
    pub size: i32,
    pub gl_type: u32,
    pub block: Option<BlockMember>,
}

/// Interface of a linked program, gathered once after link.
#[derive(Debug, Clone)]
pub struct ReflectionInfo<L> {
    pub attributes: BTreeMap<String, AttributeInfo>,
    pub uniforms: BTreeMap<String, UniformInfo<L>>,
    pub blocks: BTreeMap<String, UniformBlockLayout>,
}

impl<L> ReflectionInfo<L> {
    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.get(name)
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformInfo<L>> {
        self.uniforms.get(name)
    }

    pub fn block(&self, name: &str) -> Option<&UniformBlockLayout> {
        self.blocks.get(name)
    }
}

/// Enumerates attributes, uniforms and uniform blocks of a linked program.
pub fn reflect<G: GlApi>(gl: &G, program: G::Program) -> ReflectionInfo<G::UniformLocation> {
    let mut attributes = BTreeMap::new();
    let attribute_count = gl.active_attribute_count(program);
    log::info!("active attributes: {attribute_count}");

    for index in 0..attribute_count {
        let Some(var) = gl.active_attribute(program, index) else {
            continue;
        };
        log::info!(
            "attribute {index}: {} {} [{}]",
            type_name(var.gl_type),
            var.name,
            var.size
        );

        // Built-ins such as gl_VertexID are listed but have no location.
        let Some(location) = gl.attrib_location(program, &var.name) else {
            continue;
        };
        attributes.insert(
            var.name,
            AttributeInfo {
                location,
                size: var.size,
                gl_type: var.gl_type,
            },
        );
    }

    let mut uniforms = BTreeMap::new();
    let mut blocks: BTreeMap<u32, UniformBlockLayout> = BTreeMap::new();
    let uniform_count = gl.active_uniform_count(program);
    log::info!("active uniforms: {uniform_count}");

    for index in 0..uniform_count {
        let Some(var) = gl.active_uniform(program, index) else {
            continue;
        };

        let block = gl
            .uniform_block_member(program, index)
            .and_then(|(block_index, offset)| {
                let offset = usize::try_from(offset).ok()?;
                Some(BlockMember {
                    block_index,
                    offset,
                })
            });

        match block {
            Some(member) => {
                log::info!(
                    "uniform {index}: {} {} [{}] in block {} at offset {}",
                    type_name(var.gl_type),
                    var.name,
                    var.size,
                    member.block_index,
                    member.offset
                );
                blocks
                    .entry(member.block_index)
                    .or_insert_with(|| block_layout(gl, program, member.block_index))
                    .fields
                    .insert(var.name.clone(), member.offset);
            }
            None => log::info!(
                "uniform {index}: {} {} [{}]",
                type_name(var.gl_type),
                var.name,
                var.size
            ),
        }

        let location = match block {
            Some(_) => None,
            None => gl.uniform_location(program, &var.name),
        };

        uniforms.insert(
            var.name,
            UniformInfo {
                location,
                size: var.size,
                gl_type: var.gl_type,
                block,
            },
        );
    }

    let blocks = blocks
        .into_values()
        .map(|layout| {
            log::info!(
                "uniform block {} `{}`: {} bytes, {} field(s)",
                layout.index,
                layout.name,
                layout.data_size,
                layout.fields.len()
            );
            (layout.name.clone(), layout)
        })
        .collect();

    ReflectionInfo {
        attributes,
        uniforms,
        blocks,
    }
}

fn block_layout<G: GlApi>(gl: &G, program: G::Program, index: u32) -> UniformBlockLayout {
    let name = gl.uniform_block_name(program, index);
    let data_size = usize::try_from(gl.uniform_block_data_size(program, index)).unwrap_or(0);
    UniformBlockLayout::new(name, index, data_size)
}
