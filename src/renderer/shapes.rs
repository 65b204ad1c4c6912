//! Shape generation for the fallback (untextured) bodies

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Untextured orb disc as a triangle list: one (center, rim, next rim)
/// triangle per segment, rim points in order of increasing angle.
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let step = TAU / segments as f32;
    let rim = |i: u32| center + Vec2::from_angle(i as f32 * step) * radius;

    (0..segments)
        .flat_map(|i| [center, rim(i), rim(i + 1)])
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

/// Generate vertices for a square rotated by `angle` about its center
pub fn square(center: Vec2, half_size: f32, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corners = [
        Vec2::new(-half_size, -half_size),
        Vec2::new(half_size, -half_size),
        Vec2::new(half_size, half_size),
        Vec2::new(-half_size, half_size),
    ]
    .map(|c| center + rot.rotate(c));

    // Two triangles
    [0, 1, 2, 0, 2, 3]
        .into_iter()
        .map(|i| Vertex::new(corners[i].x, corners[i].y, color))
        .collect()
}

/// Thin quad from the center toward the rim along `angle`
pub fn spoke(center: Vec2, length: f32, width: f32, angle: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = Vec2::from_angle(angle);
    let perp = dir.perp() * (width / 2.0);
    let tip = center + dir * length;

    let a = center + perp;
    let b = center - perp;
    let c = tip - perp;
    let d = tip + perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}
