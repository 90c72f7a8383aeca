//! The fixed scene: vertex constants, attribute bindings and their GPU buffers.

mod geometry;

pub use geometry::{
    COLOR, COLORS, Geometry, POSITION, TRIANGLE, VERTEX_COUNT, VertexBinding, resolve_binding,
    streams,
};
