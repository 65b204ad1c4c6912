//! Presentation boundary
//!
//! The simulation hands one [`DrawCommand`] per body, in spawn order, to a
//! [`Presenter`]. A presenter with sprites draws textures; [`FallbackMesh`]
//! turns the commands into plain coloured triangles instead.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use vertex::{Vertex, colors};

use crate::sim::{Body, Shape, World};

/// Circle segments used by the fallback mesh
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Which fallback primitive to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
}

/// One body as the renderer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub kind: ShapeKind,
    pub center: Vec2,
    /// Radius for circles, half side for squares
    pub extent: f32,
    /// Cosmetic rotation (radians)
    pub angle: f32,
    /// RGBA used when no sprite is available
    pub color: [f32; 4],
    /// Orb sprite variant for textured presenters
    pub sprite: u32,
}

impl DrawCommand {
    pub fn from_body(body: &Body) -> Self {
        let (kind, extent) = match body.shape {
            Shape::Circle { radius } => (ShapeKind::Circle, radius),
            Shape::Square { half_size } => (ShapeKind::Square, half_size),
        };
        Self {
            kind,
            center: body.pos,
            extent,
            angle: body.angle,
            color: body.tint.to_rgba(),
            sprite: body.sprite,
        }
    }
}

/// Anything that can draw a frame of bodies
pub trait Presenter {
    /// Called once before the frame's bodies
    fn begin_frame(&mut self) {}
    fn draw(&mut self, command: &DrawCommand);
    /// Called once after the last body
    fn end_frame(&mut self) {}
}

/// Draw commands for every body, in spawn order
pub fn draw_commands(world: &World) -> Vec<DrawCommand> {
    world.bodies.iter().map(DrawCommand::from_body).collect()
}

/// Hand the whole world to a presenter
pub fn present(world: &World, presenter: &mut impl Presenter) {
    presenter.begin_frame();
    for command in draw_commands(world) {
        presenter.draw(&command);
    }
    presenter.end_frame();
}

/// Untextured presenter: tessellates each body into a triangle list
#[derive(Debug, Default)]
pub struct FallbackMesh {
    pub vertices: Vec<Vertex>,
    /// Bodies drawn in the current frame
    pub bodies: usize,
}

impl Presenter for FallbackMesh {
    fn begin_frame(&mut self) {
        self.vertices.clear();
        self.bodies = 0;
    }

    fn draw(&mut self, command: &DrawCommand) {
        match command.kind {
            ShapeKind::Circle => {
                self.vertices.extend(shapes::circle(
                    command.center,
                    command.extent,
                    command.color,
                    CIRCLE_SEGMENTS,
                ));
                self.vertices.extend(shapes::spoke(
                    command.center,
                    command.extent * 0.8,
                    command.extent * 0.1,
                    command.angle,
                    colors::SPIN_MARK,
                ));
            }
            ShapeKind::Square => {
                self.vertices.extend(shapes::square(
                    command.center,
                    command.extent,
                    command.angle,
                    command.color,
                ));
            }
        }
        self.bodies += 1;
    }
}

impl FallbackMesh {
    /// Raw bytes ready for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
