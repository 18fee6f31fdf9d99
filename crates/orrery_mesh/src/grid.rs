use crate::Vertex;

/// Turns a row-major grid of `(columns + 1) × (rows + 1)` vertices into a
/// triangle list with two triangles per cell.
///
/// Each cell with top-left corner `tl` emits `[tl, tr, br]` and
/// `[tl, br, bl]`, where "bottom" is the next row.
pub(crate) fn triangulate(grid: &[Vertex], columns: u32, rows: u32) -> Vec<Vertex> {
    let stride = columns as usize + 1;
    debug_assert_eq!(stride * (rows as usize + 1), grid.len(), "grid size");

    let mut ret = Vec::with_capacity(columns as usize * rows as usize * 6);
    for row in 0..rows as usize {
        let offset = row * stride;
        for col in 0..columns as usize {
            let tl = grid[offset + col];
            let tr = grid[offset + col + 1];
            let bl = grid[offset + stride + col];
            let br = grid[offset + stride + col + 1];
            ret.extend([tl, tr, br, tl, br, bl]);
        }
    }
    ret
}
