//! Staging vertex data on the CPU and uploading it to the GPU once.
//!
//! A [`GeometryBuilder`] collects records (and optionally indices). [`GeometryBuilder::upload`]
//! consumes it and returns a [`Mesh`], which is the only thing that can be drawn. Uploading twice,
//! adding vertices after the upload, or drawing before it simply don't type-check.

use std::convert::TryFrom;

use log::debug;

use crate::device::{BufferTarget, Device, Handle};
use crate::error::GeometryError;
use crate::vertex::Vertex;

pub struct GeometryBuilder<V> {
    vertices: Vec<V>,
    indices: Vec<u32>,
}

impl<V> Default for GeometryBuilder<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new()
        }
    }
}

impl<V: Vertex> GeometryBuilder<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: V) -> &mut Self {
        self.vertices.push(vertex);
        self
    }

    /// Adds a vertex and an index at the same time. The index doesn't have to refer to the vertex
    /// it was added with; it's only checked against the final vertex count when uploading.
    pub fn add_indexed_vertex(&mut self, vertex: V, index: u32) -> &mut Self {
        self.vertices.push(vertex);
        self.indices.push(index);
        self
    }

    pub fn add_index(&mut self, index: u32) -> &mut Self {
        self.indices.push(index);
        self
    }

    /// Checks the staged data without touching the GPU.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.is_empty() {
            return Err(GeometryError::Empty);
        }

        let vertex_count = self.vertices.len();
        if let Some((position, &index)) = self.indices.iter()
            .enumerate()
            .find(|&(_, index)| *index as usize >= vertex_count)
        {
            return Err(GeometryError::IndexOutOfRange { position, index, vertex_count });
        }

        Ok(())
    }

    /// Copies the staged records into a new vertex buffer (and the indices, if there are any,
    /// into an element buffer), describes the record layout to a new vertex array and releases
    /// the CPU-side copies.
    ///
    /// ```
    /// use scene::device::Device;
    /// use scene::geometry::GeometryBuilder;
    /// use scene::vertex::ColoredVertex;
    ///
    /// fn stage_once<D: Device>(device: &mut D) {
    ///     let mut geometry = GeometryBuilder::new();
    ///     geometry.add_vertex(ColoredVertex::new([0.0; 3], [1.0; 4]));
    ///     let _mesh = geometry.upload(device);
    /// }
    /// ```
    ///
    /// The builder is gone once it's uploaded, so nothing can be added afterwards:
    ///
    /// ```compile_fail
    /// use scene::device::Device;
    /// use scene::geometry::GeometryBuilder;
    /// use scene::vertex::ColoredVertex;
    ///
    /// fn stage_after_upload<D: Device>(device: &mut D) {
    ///     let mut geometry = GeometryBuilder::new();
    ///     geometry.add_vertex(ColoredVertex::new([0.0; 3], [1.0; 4]));
    ///     let _mesh = geometry.upload(device);
    ///     geometry.add_vertex(ColoredVertex::new([1.0; 3], [1.0; 4]));
    /// }
    /// ```
    pub fn upload<D: Device>(self, device: &mut D) -> Result<Mesh, GeometryError> {
        self.validate()?;

        let vertex_count = draw_count(self.vertices.len(), "vertices")?;
        let index_count = draw_count(self.indices.len(), "indices")?;
        let layout = V::layout();

        let vertex_array = device.create_vertex_array();
        device.bind_vertex_array(Some(vertex_array));

        let vertex_buffer = device.create_buffer();
        device.bind_buffer(BufferTarget::Array, Some(vertex_buffer));
        device.buffer_data(BufferTarget::Array, bytemuck::cast_slice(&self.vertices));

        let mode = if self.indices.is_empty() {
            DrawMode::Arrays { count: vertex_count }
        } else {
            let buffer = device.create_buffer();
            device.bind_buffer(BufferTarget::Element, Some(buffer));
            device.buffer_data(BufferTarget::Element, bytemuck::cast_slice(&self.indices));
            DrawMode::Elements { count: index_count, buffer }
        };

        for attribute in layout.attributes() {
            device.vertex_attribute(attribute, layout.stride());
        }

        // The element buffer binding is part of the vertex array's state, so it stays bound
        device.bind_buffer(BufferTarget::Array, None);
        device.bind_vertex_array(None);

        debug!(
            "Uploaded {} vertices ({} bytes each) and {} indices",
            vertex_count, layout.stride(), index_count
        );

        Ok(Mesh { vertex_array, vertex_buffer, mode })
    }
}

fn draw_count(len: usize, what: &'static str) -> Result<i32, GeometryError> {
    i32::try_from(len).map_err(|_| GeometryError::TooLarge { what, count: len })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Arrays { count: i32 },
    Elements { count: i32, buffer: Handle },
}

/// Geometry that lives on the GPU. The counts are fixed at upload time.
#[derive(Debug)]
pub struct Mesh {
    vertex_array: Handle,
    vertex_buffer: Handle,
    mode: DrawMode,
}

impl Mesh {
    pub fn vertex_array(&self) -> Handle { self.vertex_array }

    pub fn mode(&self) -> DrawMode { self.mode }

    pub fn is_indexed(&self) -> bool {
        match self.mode {
            DrawMode::Elements { .. } => true,
            DrawMode::Arrays { .. } => false
        }
    }

    pub fn draw<D: Device>(&self, device: &mut D) {
        device.bind_vertex_array(Some(self.vertex_array));
        match self.mode {
            DrawMode::Arrays { count } => device.draw_arrays(0, count),
            DrawMode::Elements { count, .. } => device.draw_elements(count)
        }
    }

    pub fn delete<D: Device>(self, device: &mut D) {
        if let DrawMode::Elements { buffer, .. } = self.mode {
            device.delete_buffer(buffer);
        }
        device.delete_buffer(self.vertex_buffer);
        device.delete_vertex_array(self.vertex_array);
    }
}
