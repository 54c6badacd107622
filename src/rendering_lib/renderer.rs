// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::geometry::Point2;
use super::vertex::Vertex;
use crate::engine_lib::shapes::{ShapeGeometry, ShapesScene};

const RENDERER_MAX_VERTICES: usize = 8192;
const RENDERER_MAX_INDICES: usize = RENDERER_MAX_VERTICES * 3;

const CIRCLE_SEGMENTS: usize = 48;
const FILL_ALPHA: f32 = 0.35;
const OUTLINE_WIDTH: f32 = 2.0;
const ANCHOR_HALF_SIZE: f32 = 4.0;
const MIDPOINT_HALF_SIZE: f32 = 2.0;
const ANCHOR_COLOR: [f32; 4] = [0.15, 0.35, 0.85, 1.0];
const MIDPOINT_COLOR: [f32; 4] = [0.4, 0.4, 0.4, 1.0];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScreenDimensionsUniform {
    width: f32,
    height: f32,
    _padding1: f32,
    _padding2: f32,
}

/// Triangle list for one frame of the shapes demo, in screen pixels.
#[derive(Debug, Default)]
pub struct FrameGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl FrameGeometry {
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Fan-triangulates a convex outline.
    pub fn add_polygon(&mut self, points: &[Point2], color: [f32; 4]) {
        if points.len() < 3 {
            return;
        }
        let start_vertex_index = self.vertices.len() as u16;
        for point in points {
            self.vertices.push(Vertex::new([point.x, point.y], color));
        }
        for i in 1..(points.len() as u16 - 1) {
            self.indices.push(start_vertex_index);
            self.indices.push(start_vertex_index + i);
            self.indices.push(start_vertex_index + i + 1);
        }
    }

    pub fn add_segment(&mut self, a: Point2, b: Point2, width: f32, color: [f32; 4]) {
        let side = (b - a).perp().normalize_or_zero() * (width * 0.5);
        if side == Point2::ZERO {
            return;
        }
        self.add_polygon(&[a + side, b + side, b - side, a - side], color);
    }

    pub fn add_outline(&mut self, points: &[Point2], width: f32, color: [f32; 4]) {
        let n = points.len();
        for i in 0..n {
            self.add_segment(points[i], points[(i + 1) % n], width, color);
        }
    }

    pub fn add_marker(&mut self, center: Point2, half_size: f32, color: [f32; 4]) {
        let h = half_size;
        self.add_polygon(
            &[
                center + Point2::new(-h, -h),
                center + Point2::new(h, -h),
                center + Point2::new(h, h),
                center + Point2::new(-h, h),
            ],
            color,
        );
    }

    pub fn add_shapes(&mut self, scene: &ShapesScene) {
        for shape in &scene.shapes {
            let color = shape.color.rgba();
            let fill = [color[0], color[1], color[2], FILL_ALPHA];
            let outline: Vec<Point2> = match shape.geometry() {
                ShapeGeometry::Polygon(polygon) => polygon.vertices().to_vec(),
                ShapeGeometry::Circle(circle) => circle.outline(CIRCLE_SEGMENTS),
            };
            self.add_polygon(&outline, fill);
            self.add_outline(&outline, OUTLINE_WIDTH, color);
            for midpoint in shape.edge_midpoints() {
                self.add_marker(midpoint, MIDPOINT_HALF_SIZE, MIDPOINT_COLOR);
            }
            for anchor in shape.anchors() {
                self.add_marker(anchor, ANCHOR_HALF_SIZE, ANCHOR_COLOR);
            }
        }
    }
}

pub struct Renderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,

    frame: FrameGeometry,

    screen_uniform_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        initial_screen_width: f32,
        initial_screen_height: f32,
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shapes Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let screen_uniform_data = ScreenDimensionsUniform {
            width: initial_screen_width,
            height: initial_screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        let screen_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Dimensions Uniform Buffer"),
            contents: bytemuck::bytes_of(&screen_uniform_data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("screen_dimensions_bind_group_layout"),
        });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &screen_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_uniform_buffer.as_entire_binding(),
            }],
            label: Some("screen_dimensions_bind_group"),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shapes Pipeline Layout"),
            bind_group_layouts: &[&screen_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shapes Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shapes Vertex Buffer"),
            size: (RENDERER_MAX_VERTICES * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shapes Index Buffer"),
            size: (RENDERER_MAX_INDICES * std::mem::size_of::<u16>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            frame: FrameGeometry::with_capacity(RENDERER_MAX_VERTICES, RENDERER_MAX_INDICES),
            screen_uniform_buffer,
            screen_bind_group,
        }
    }

    pub fn render_shapes(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        scene: &ShapesScene,
        screen_width: f32,
        screen_height: f32,
        clear_color: wgpu::Color,
    ) {
        let screen_uniform_data = ScreenDimensionsUniform {
            width: screen_width,
            height: screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        queue.write_buffer(&self.screen_uniform_buffer, 0, bytemuck::bytes_of(&screen_uniform_data));

        self.frame.clear();
        self.frame.add_shapes(scene);

        let fits = self.frame.vertices.len() <= RENDERER_MAX_VERTICES
            && self.frame.indices.len() < RENDERER_MAX_INDICES;
        if !fits {
            log::warn!(
                "Shapes frame exceeds buffer capacity ({} vertices, {} indices); skipping geometry",
                self.frame.vertices.len(),
                self.frame.indices.len()
            );
        }
        let draw_geometry = fits && !self.frame.indices.is_empty();

        let index_count = self.frame.indices.len();
        if draw_geometry {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.frame.vertices));
            // write_buffer needs a multiple of 4 bytes
            if self.frame.indices.len() % 2 == 1 {
                self.frame.indices.push(0);
            }
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.frame.indices));
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shapes Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear_color), store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if draw_geometry {
            let vertex_bytes = (self.frame.vertices.len() * std::mem::size_of::<Vertex>()) as u64;
            let index_bytes = (self.frame.indices.len() * std::mem::size_of::<u16>()) as u64;
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.screen_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vertex_bytes));
            render_pass.set_index_buffer(self.index_buffer.slice(..index_bytes), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..index_count as u32, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_scene::create_shapes_scene;

    #[test]
    fn polygon_fan_indices_stay_in_range() {
        let mut frame = FrameGeometry::default();
        frame.add_polygon(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)],
            [1.0; 4],
        );
        assert_eq!(frame.vertices.len(), 4);
        assert_eq!(frame.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn degenerate_input_adds_nothing() {
        let mut frame = FrameGeometry::default();
        frame.add_polygon(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)], [1.0; 4]);
        frame.add_segment(Point2::new(2.0, 2.0), Point2::new(2.0, 2.0), 2.0, [1.0; 4]);
        assert!(frame.vertices.is_empty());
        assert!(frame.indices.is_empty());
    }

    #[test]
    fn demo_scene_fits_in_buffers() {
        let mut frame = FrameGeometry::default();
        frame.add_shapes(&create_shapes_scene(8.0));
        assert!(frame.vertices.len() <= RENDERER_MAX_VERTICES);
        assert!(frame.indices.len() < RENDERER_MAX_INDICES);
        let max_index = *frame.indices.iter().max().unwrap() as usize;
        assert!(max_index < frame.vertices.len());
    }
}
