// Polygon helpers and ear-clipping triangulation for extruded text caps.
use glam::Vec2;

const DEGENERATE_AREA: f32 = 1e-12;

/// Twice the signed area; positive for counter-clockwise rings (y up).
#[inline]
fn orient(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

pub fn signed_area(ring: &[Vec2]) -> f32 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        sum += ring[i].perp_dot(ring[(i + 1) % n]);
    }
    sum * 0.5
}

#[inline]
pub fn is_clockwise(ring: &[Vec2]) -> bool {
    signed_area(ring) < 0.0
}

/// Even-odd point containment.
pub fn contains_point(ring: &[Vec2], p: Vec2) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (ring[i], ring[j]);
        if (pi.y > p.y) != (pj.y > p.y) && p.x < (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[inline]
fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    orient(a, b, p) >= 0.0 && orient(b, c, p) >= 0.0 && orient(c, a, p) >= 0.0
}

#[inline]
fn segments_cross(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let o1 = orient(p1, p2, q1);
    let o2 = orient(p1, p2, q2);
    let o3 = orient(q1, q2, p1);
    let o4 = orient(q1, q2, p2);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

// Whether `m` lies inside the interior wedge at `v` of a counter-clockwise ring.
#[inline]
fn in_cone(prev: Vec2, v: Vec2, next: Vec2, m: Vec2) -> bool {
    if orient(prev, v, next) >= 0.0 {
        orient(prev, v, m) > 0.0 && orient(v, next, m) > 0.0
    } else {
        orient(prev, v, m) > 0.0 || orient(v, next, m) > 0.0
    }
}

fn ring_edges<'a>(points: &'a [Vec2], ring: &'a [usize]) -> impl Iterator<Item = (Vec2, Vec2)> + 'a {
    let n = ring.len();
    (0..n).map(move |i| (points[ring[i]], points[ring[(i + 1) % n]]))
}

fn max_x(points: &[Vec2], ring: &[usize]) -> f32 {
    ring.iter()
        .map(|&i| points[i].x)
        .fold(f32::NEG_INFINITY, f32::max)
}

/// Find a ring position whose vertex can see `m` without crossing any edge.
fn find_bridge(
    points: &[Vec2],
    ring: &[usize],
    hole: &[usize],
    pending: &[Vec<usize>],
    m: Vec2,
) -> Option<usize> {
    let n = ring.len();
    let mut candidates: Vec<usize> = (0..n).collect();
    candidates.sort_by(|&a, &b| {
        let da = points[ring[a]].distance_squared(m);
        let db = points[ring[b]].distance_squared(m);
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    candidates.into_iter().find(|&pos| {
        let v = points[ring[pos]];
        if v == m {
            return false;
        }
        let prev = points[ring[(pos + n - 1) % n]];
        let next = points[ring[(pos + 1) % n]];
        if !in_cone(prev, v, next, m) {
            return false;
        }
        let blocked = |(a, b): (Vec2, Vec2)| {
            a != v && b != v && a != m && b != m && segments_cross(m, v, a, b)
        };
        !ring_edges(points, ring).any(blocked)
            && !ring_edges(points, hole).any(blocked)
            && !pending.iter().any(|h| ring_edges(points, h).any(blocked))
    })
}

/// Triangulate a counter-clockwise outer ring with clockwise holes.
///
/// Returned indices address the concatenation `outer ++ holes[0] ++ holes[1] ...`
/// and every triangle is wound counter-clockwise.
pub fn triangulate(outer: &[Vec2], holes: &[Vec<Vec2>]) -> Vec<[u32; 3]> {
    if outer.len() < 3 {
        return Vec::new();
    }
    let mut points: Vec<Vec2> = outer.to_vec();
    let mut ring: Vec<usize> = (0..outer.len()).collect();
    if is_clockwise(outer) {
        ring.reverse();
    }

    let mut hole_rings: Vec<Vec<usize>> = Vec::with_capacity(holes.len());
    for hole in holes.iter().filter(|h| h.len() >= 3) {
        let start = points.len();
        points.extend_from_slice(hole);
        let mut idx: Vec<usize> = (start..start + hole.len()).collect();
        if !is_clockwise(hole) {
            idx.reverse();
        }
        hole_rings.push(idx);
    }
    hole_rings.sort_by(|a, b| {
        max_x(&points, b)
            .partial_cmp(&max_x(&points, a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for k in 0..hole_rings.len() {
        let hole = &hole_rings[k];
        let m_pos = (0..hole.len())
            .max_by(|&a, &b| {
                points[hole[a]]
                    .x
                    .partial_cmp(&points[hole[b]].x)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(0);
        let m = points[hole[m_pos]];
        match find_bridge(&points, &ring, hole, &hole_rings[k + 1..], m) {
            Some(v_pos) => {
                let mut merged = Vec::with_capacity(ring.len() + hole.len() + 2);
                merged.extend_from_slice(&ring[..=v_pos]);
                for t in 0..=hole.len() {
                    merged.push(hole[(m_pos + t) % hole.len()]);
                }
                merged.extend_from_slice(&ring[v_pos..]);
                ring = merged;
            }
            None => log::warn!("no bridge found for polygon hole; hole left unfilled"),
        }
    }

    ear_clip(&points, ring)
}

fn ear_clip(points: &[Vec2], mut ring: Vec<usize>) -> Vec<[u32; 3]> {
    let mut triangles = Vec::with_capacity(ring.len().saturating_sub(2));
    let mut start = 0usize;

    while ring.len() > 3 {
        let n = ring.len();
        let mut clipped = false;
        for step in 0..n {
            let cur = (start + step) % n;
            let prev = (cur + n - 1) % n;
            let next = (cur + 1) % n;
            let (a, b, c) = (points[ring[prev]], points[ring[cur]], points[ring[next]]);
            let area = orient(a, b, c);
            if area.abs() <= DEGENERATE_AREA {
                ring.remove(cur);
                start = cur;
                clipped = true;
                break;
            }
            if area < 0.0 {
                continue;
            }
            let occupied = ring.iter().enumerate().any(|(k, &idx)| {
                if k == prev || k == cur || k == next {
                    return false;
                }
                let p = points[idx];
                p != a && p != b && p != c && point_in_triangle(p, a, b, c)
            });
            if occupied {
                continue;
            }
            triangles.push([ring[prev] as u32, ring[cur] as u32, ring[next] as u32]);
            ring.remove(cur);
            start = cur;
            clipped = true;
            break;
        }
        if !clipped {
            // Self-intersecting input: cut a corner anyway so the loop terminates.
            let cur = start % n;
            let prev = (cur + n - 1) % n;
            let next = (cur + 1) % n;
            triangles.push([ring[prev] as u32, ring[cur] as u32, ring[next] as u32]);
            ring.remove(cur);
        }
        if !ring.is_empty() {
            start %= ring.len();
        }
    }

    if ring.len() == 3 {
        let (a, b, c) = (points[ring[0]], points[ring[1]], points[ring[2]]);
        if orient(a, b, c).abs() > DEGENERATE_AREA {
            triangles.push([ring[0] as u32, ring[1] as u32, ring[2] as u32]);
        }
    }
    triangles
}
