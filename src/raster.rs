//! Polygon rasterizer (C4, spec.md §4.5): scan-line fill of a polygon given
//! in grid-pixel coordinates into a bitmap, clipped to a `width x height`
//! raster.

use roaring::RoaringBitmap;

use crate::geom::GridPixel;

/// Rasterize a closed polygon (last vertex implicitly connects to the
/// first) into the set of cell indices whose pixel centers lie inside it,
/// clipped to `[0, width) x [0, height)`.
///
/// Horizontal edges never contribute an intersection; an edge between `p`
/// and `q` contributes at scanline `y` exactly when `min(p.y, q.y) <= y <
/// max(p.y, q.y)`, which avoids double-counting shared vertices.
pub fn rasterize_polygon(vertices: &[GridPixel], width: u32, height: u32) -> RoaringBitmap {
    let mut mask = RoaringBitmap::new();
    if vertices.len() < 3 {
        return mask;
    }

    let n = vertices.len();
    for y in 0..height as i64 {
        let mut xs: Vec<f64> = Vec::new();
        for i in 0..n {
            let p = vertices[i];
            let q = vertices[(i + 1) % n];
            if p.y == q.y {
                continue;
            }
            let (ymin, ymax) = if p.y < q.y { (p.y, q.y) } else { (q.y, p.y) };
            if !(ymin <= y && y < ymax) {
                continue;
            }
            let t = (y as f64 + 0.5 - p.y as f64) / (q.y as f64 - p.y as f64);
            xs.push(p.x as f64 + t * (q.x as f64 - p.x as f64));
        }
        xs.sort_by(|a, b| a.partial_cmp(b).expect("non-NaN pixel coordinates"));

        for pair in xs.chunks_exact(2) {
            let x0 = pair[0].ceil() as i64;
            let x1 = pair[1].floor() as i64;
            let x0 = x0.max(0);
            let x1 = x1.min(width as i64 - 1);
            if x0 > x1 {
                continue;
            }
            for x in x0..=x1 {
                mask.insert((y as u32) * width + x as u32);
            }
        }
    }

    mask
}
