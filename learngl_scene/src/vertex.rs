//! Vertex records and the byte layout they're described to the GPU with.
//!
//! A record is a `#[repr(C)]` struct of `f32` arrays. Its layout is built from the component
//! count of each field in declaration order, so the offsets handed to the vertex shader always
//! follow the struct, whatever order the fields end up in.

use std::mem::size_of;

use bytemuck::{Pod, Zeroable};

/// One float attribute of a vertex record, as seen by the vertex shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// `layout (location = N)` in the shader
    pub location: u32,
    /// Number of floats
    pub components: usize,
    /// Bytes from the start of the record
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: usize,
}

impl VertexLayout {
    /// Builds a layout for consecutive float fields of the given widths. Locations are assigned
    /// in order starting at 0.
    pub fn from_components(components: &[usize]) -> Self {
        let mut offset = 0;
        let attributes = components.iter()
            .enumerate()
            .map(|(location, &components)| {
                let attribute = VertexAttribute {
                    location: location as u32,
                    components,
                    offset
                };
                offset += components * size_of::<f32>();
                attribute
            })
            .collect();

        Self { attributes, stride: offset }
    }

    pub fn attributes(&self) -> &[VertexAttribute] { &self.attributes }

    /// Size in bytes of one whole record.
    pub fn stride(&self) -> usize { self.stride }
}

/// A record that can be copied straight into a vertex buffer.
pub trait Vertex: Pod {
    fn layout() -> &'static VertexLayout;
}

lazy_static! {
    static ref COLORED_LAYOUT: VertexLayout = VertexLayout::from_components(&[3, 4]);
    static ref TEXTURED_LAYOUT: VertexLayout = VertexLayout::from_components(&[3, 4, 2]);
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl ColoredVertex {
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

impl Vertex for ColoredVertex {
    fn layout() -> &'static VertexLayout { &COLORED_LAYOUT }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    /// Texture coordinates, (0, 0) at the first pixel row of the image
    pub uv: [f32; 2],
}

impl TexturedVertex {
    pub const fn new(position: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self {
        Self { position, color, uv }
    }
}

impl Vertex for TexturedVertex {
    fn layout() -> &'static VertexLayout { &TEXTURED_LAYOUT }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    fn colored_layout_follows_the_struct() {
        let layout = ColoredVertex::layout();
        let attributes = layout.attributes();

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].offset, offset_of!(ColoredVertex, position));
        assert_eq!(attributes[1].offset, offset_of!(ColoredVertex, color));
        assert_eq!(layout.stride(), size_of::<ColoredVertex>());
    }

    #[test]
    fn textured_layout_follows_the_struct() {
        let layout = TexturedVertex::layout();
        let attributes = layout.attributes();

        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes[0].offset, offset_of!(TexturedVertex, position));
        assert_eq!(attributes[1].offset, offset_of!(TexturedVertex, color));
        assert_eq!(attributes[2].offset, offset_of!(TexturedVertex, uv));
        assert_eq!(layout.stride(), size_of::<TexturedVertex>());
        assert_eq!(layout.stride(), 9 * size_of::<f32>());
    }

    #[test]
    fn offsets_are_the_sum_of_the_fields_before_them() {
        let layout = VertexLayout::from_components(&[2, 1, 4, 3]);
        let offsets: Vec<usize> = layout.attributes().iter().map(|a| a.offset).collect();
        let locations: Vec<u32> = layout.attributes().iter().map(|a| a.location).collect();

        assert_eq!(offsets, vec![0, 8, 12, 28]);
        assert_eq!(locations, vec![0, 1, 2, 3]);
        assert_eq!(layout.stride(), 40);
    }

    #[test]
    fn empty_layout_has_no_stride() {
        let layout = VertexLayout::from_components(&[]);

        assert!(layout.attributes().is_empty());
        assert_eq!(layout.stride(), 0);
    }
}
