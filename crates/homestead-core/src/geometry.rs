//! Pure hexagon geometry for the staggered board grid.
//!
//! Tiles live on a rectangular grid where odd rows are shifted right by half
//! a hex width. Everything here is a function of (row, column) and the hex
//! radius; nothing is stored. Vertex identity is handled one level up (the
//! board interns vertices by quantized coordinate), so these functions only
//! produce raw pixel-space points.

/// Default hex radius in pixels, matching the classic board preset.
pub const DEFAULT_HEX_RADIUS: f64 = 50.0;

/// Quantization grid for vertex identity: coordinates are rounded to 1e-3
/// units before comparison, absorbing floating-point drift between vertices
/// computed independently from different tile centers.
const QUANT_SCALE: f64 = 1000.0;

/// Width of a hex (corner to corner through the horizontal axis of the grid).
/// Also the horizontal spacing between columns.
pub fn hex_width(radius: f64) -> f64 {
    2.0 * radius
}

/// Height of a hex row: sqrt(3) times the radius.
pub fn hex_height(radius: f64) -> f64 {
    3.0_f64.sqrt() * radius
}

/// Center of the hex at (row, col), before any board origin offset.
/// Odd rows are staggered right by half the hex width.
pub fn grid_center(row: usize, col: usize, radius: f64) -> (f64, f64) {
    let stagger = (row % 2) as f64 * (hex_width(radius) / 2.0);
    (col as f64 * hex_width(radius) + stagger, row as f64 * hex_height(radius))
}

/// The six corners of a hexagon centered at (cx, cy).
///
/// Vertex *i* sits at angle `60·i − 30` degrees; index 0 is the upper-right
/// corner. Consumers rely on consecutive indices forming edges, so the order
/// is part of the contract.
pub fn hexagon_vertices(cx: f64, cy: f64, radius: f64) -> [(f64, f64); 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f64 - 30.0).to_radians();
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    })
}

/// Midpoints of the six sides, pairing vertex *i* with vertex *(i+1) mod 6*.
pub fn hexagon_edge_midpoints(vertices: &[(f64, f64); 6]) -> [(f64, f64); 6] {
    std::array::from_fn(|i| {
        let (x1, y1) = vertices[i];
        let (x2, y2) = vertices[(i + 1) % 6];
        ((x1 + x2) / 2.0, (y1 + y2) / 2.0)
    })
}

/// Round a point onto the identity grid. Two points that quantize equal are
/// treated as the same physical vertex.
pub fn quantize(point: (f64, f64)) -> (i64, i64) {
    (
        (point.0 * QUANT_SCALE).round() as i64,
        (point.1 * QUANT_SCALE).round() as i64,
    )
}
