//! Planar predicates used to validate scene shapes
//!
//! All tests are boundary-inclusive with a small tolerance, since scene data
//! routinely places shapes flush against each other (a source box resting on
//! the container floor, for instance).

use crate::Vec2;

/// Tolerance for on-boundary tests, in world units
pub const EPSILON: f32 = 1e-5;

/// Signed area of a polygon (positive for counter-clockwise winding)
pub fn signed_area(vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..n {
        twice_area += vertices[i].cross(vertices[(i + 1) % n]);
    }
    twice_area * 0.5
}

/// Whether point `p` lies on segment `a`-`b` (within [`EPSILON`])
pub fn point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> bool {
    let ab = b - a;
    let len = ab.length();
    if len <= EPSILON {
        return (p - a).length() <= EPSILON;
    }
    let distance = (p - a).cross(ab).abs() / len;
    if distance > EPSILON {
        return false;
    }
    let t = (p - a).dot(ab) / (len * len);
    (-EPSILON..=1.0 + EPSILON).contains(&t)
}

/// Whether segments `a1`-`a2` and `b1`-`b2` share at least one point
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let d1 = (a2 - a1).cross(b1 - a1);
    let d2 = (a2 - a1).cross(b2 - a1);
    let d3 = (b2 - b1).cross(a1 - b1);
    let d4 = (b2 - b1).cross(a2 - b1);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    // Collinear or touching cases
    point_on_segment(b1, a1, a2)
        || point_on_segment(b2, a1, a2)
        || point_on_segment(a1, b1, b2)
        || point_on_segment(a2, b1, b2)
}

/// Point where segments `a1`-`a2` and `b1`-`b2` properly cross
///
/// Touching at an endpoint or running collinear is not a crossing.
pub fn segment_crossing(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.cross(s);
    if denom.abs() <= EPSILON * EPSILON {
        return None;
    }
    let t = (b1 - a1).cross(s) / denom;
    let u = (b1 - a1).cross(r) / denom;
    let inside = |v: f32| v > EPSILON && v < 1.0 - EPSILON;
    if inside(t) && inside(u) {
        Some(a1 + r * t)
    } else {
        None
    }
}

/// Whether `p` lies inside `vertices` and off its boundary
pub fn polygon_strictly_contains(vertices: &[Vec2], p: Vec2) -> bool {
    let n = vertices.len();
    polygon_contains(vertices, p)
        && !(0..n).any(|i| point_on_segment(p, vertices[i], vertices[(i + 1) % n]))
}

/// First point where polygon `outer` reaches into polygon `inner`
///
/// Either an edge crossing or an `outer` vertex strictly inside `inner`.
/// Shared boundaries do not count, so a box resting on a floor passes.
pub fn polygon_intrusion(outer: &[Vec2], inner: &[Vec2]) -> Option<Vec2> {
    let (n, m) = (outer.len(), inner.len());
    for i in 0..n {
        let (a1, a2) = (outer[i], outer[(i + 1) % n]);
        for j in 0..m {
            if let Some(p) = segment_crossing(a1, a2, inner[j], inner[(j + 1) % m]) {
                return Some(p);
            }
        }
    }
    outer.iter().copied().find(|&v| polygon_strictly_contains(inner, v))
}

/// Whether a closed polygon is simple: no two non-adjacent edges touch
///
/// Also rejects polygons with fewer than 3 vertices or zero area.
pub fn is_simple_polygon(vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n < 3 || signed_area(vertices).abs() <= EPSILON {
        return false;
    }
    for i in 0..n {
        let (a1, a2) = (vertices[i], vertices[(i + 1) % n]);
        for j in (i + 1)..n {
            // Adjacent edges share a vertex by construction
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let (b1, b2) = (vertices[j], vertices[(j + 1) % n]);
            if segments_intersect(a1, a2, b1, b2) {
                return false;
            }
        }
    }
    true
}

/// Whether point `p` lies inside or on the boundary of a closed polygon
pub fn polygon_contains(vertices: &[Vec2], p: Vec2) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (vi, vj) = (vertices[i], vertices[j]);
        if point_on_segment(p, vj, vi) {
            return true;
        }
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = vj.x + (p.y - vj.y) * (vi.x - vj.x) / (vi.y - vj.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
