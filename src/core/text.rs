// Extruded, bevelled 3D text geometry built from typeface shapes.
use super::constants::*;
use super::font::{Shape, Typeface};
use super::geometry::Geometry;
use super::triangulate::triangulate;
use glam::{Vec2, Vec3};

/// Fixed extrusion parameters for title text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextParams {
    pub size: f32,
    pub depth: f32,
    pub curve_segments: u32,
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: u32,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            size: TEXT_SIZE,
            depth: TEXT_DEPTH,
            curve_segments: TEXT_CURVE_SEGMENTS,
            bevel_enabled: true,
            bevel_thickness: TEXT_BEVEL_THICKNESS,
            bevel_size: TEXT_BEVEL_SIZE,
            bevel_offset: TEXT_BEVEL_OFFSET,
            bevel_segments: TEXT_BEVEL_SEGMENTS,
        }
    }
}

// One cross-section of the extrusion: outward contour offset and z position.
#[derive(Clone, Copy, Debug)]
struct Layer {
    offset: f32,
    z: f32,
}

fn layers(params: &TextParams) -> Vec<Layer> {
    let mut out = Vec::new();
    let segments = if params.bevel_enabled {
        params.bevel_segments
    } else {
        0
    };
    let half_pi = std::f32::consts::FRAC_PI_2;
    let bevel = |b: u32| {
        let t = b as f32 / segments as f32;
        (
            params.bevel_size * (t * half_pi).sin() + params.bevel_offset,
            params.bevel_thickness * (t * half_pi).cos(),
        )
    };
    for b in 0..segments {
        let (offset, z) = bevel(b);
        out.push(Layer { offset, z: -z });
    }
    let body_offset = if params.bevel_enabled {
        params.bevel_size + params.bevel_offset
    } else {
        0.0
    };
    out.push(Layer {
        offset: body_offset,
        z: 0.0,
    });
    out.push(Layer {
        offset: body_offset,
        z: params.depth,
    });
    for b in (0..segments).rev() {
        let (offset, z) = bevel(b);
        out.push(Layer {
            offset,
            z: params.depth + z,
        });
    }
    out
}

/// Mitred outward offset direction for each vertex of a ring.
///
/// Counter-clockwise solids and clockwise holes both get vectors pointing
/// away from the filled region.
fn bevel_vectors(ring: &[Vec2]) -> Vec<Vec2> {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let n0 = edge_normal(prev, cur);
            let n1 = edge_normal(cur, next);
            let sum = n0 + n1;
            let denom = 1.0 + n0.dot(n1);
            if denom <= 1e-4 {
                return n0;
            }
            let v = sum / denom;
            // Sharp spikes would otherwise shoot far outside the glyph.
            v.clamp_length_max(3.0)
        })
        .collect()
}

#[inline]
fn edge_normal(a: Vec2, b: Vec2) -> Vec2 {
    let d = b - a;
    Vec2::new(d.y, -d.x).try_normalize().unwrap_or(Vec2::ZERO)
}

/// Extrude one shape into `geometry`.
pub fn extrude_shape(geometry: &mut Geometry, shape: &Shape, params: &TextParams) {
    if shape.outer.len() < 3 {
        return;
    }
    let holes: Vec<Vec<Vec2>> = shape.holes.iter().filter(|h| h.len() >= 3).cloned().collect();
    let mut rings: Vec<&[Vec2]> = Vec::with_capacity(1 + holes.len());
    rings.push(&shape.outer);
    rings.extend(holes.iter().map(Vec::as_slice));

    let vectors: Vec<Vec<Vec2>> = rings.iter().map(|r| bevel_vectors(r)).collect();
    let flat_points: Vec<Vec2> = rings.iter().flat_map(|r| r.iter().copied()).collect();
    let flat_vectors: Vec<Vec2> = vectors.iter().flat_map(|v| v.iter().copied()).collect();
    let layers = layers(params);
    let at = |layer: &Layer, i: usize| {
        let p = flat_points[i] + flat_vectors[i] * layer.offset;
        Vec3::new(p.x, p.y, layer.z)
    };

    // Caps
    let triangles = triangulate(&shape.outer, &holes);
    if let (Some(front), Some(back)) = (layers.first(), layers.last()) {
        for [a, b, c] in &triangles {
            let (a, b, c) = (*a as usize, *b as usize, *c as usize);
            geometry.push_flat_triangle(at(front, a), at(front, c), at(front, b));
            geometry.push_flat_triangle(at(back, a), at(back, b), at(back, c));
        }
    }

    // Side walls between consecutive layers
    let mut start = 0usize;
    for ring in &rings {
        let n = ring.len();
        for pair in layers.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            for j in 0..n {
                let i0 = start + j;
                let i1 = start + (j + 1) % n;
                let (a, b, c, d) = (at(lo, i0), at(lo, i1), at(hi, i1), at(hi, i0));
                geometry.push_flat_triangle(a, b, c);
                geometry.push_flat_triangle(a, c, d);
            }
        }
        start += n;
    }
}

/// Build the extruded geometry for `text` without centring it.
pub fn build_text_geometry(face: &Typeface, text: &str, params: &TextParams) -> Geometry {
    let mut geometry = Geometry::new();
    for shape in face.generate_shapes(text, params.size, params.curve_segments) {
        extrude_shape(&mut geometry, &shape, params);
    }
    geometry
}

/// Centre `geometry` on its bounding box, or warn and leave it as is.
///
/// Returns whether the geometry was centred.
pub fn center_or_warn(geometry: &mut Geometry) -> bool {
    match geometry.center() {
        Some(_) => true,
        None => {
            log::warn!("unable to compute bounding box for text geometry");
            false
        }
    }
}

/// Text mesh ready for the scene: extruded and, when possible, centred.
pub fn build_text_mesh(face: &Typeface, text: &str, params: &TextParams) -> Geometry {
    let mut geometry = build_text_geometry(face, text, params);
    center_or_warn(&mut geometry);
    log::info!(
        "text mesh built: {} triangles for {:?}",
        geometry.triangle_count(),
        text
    );
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_run_front_bevel_body_back_bevel() {
        let params = TextParams::default();
        let l = layers(&params);
        assert_eq!(l.len(), params.bevel_segments as usize * 2 + 2);
        assert!((l[0].z + params.bevel_thickness).abs() < 1e-6);
        assert!((l[0].offset - params.bevel_offset).abs() < 1e-6);
        let last = l[l.len() - 1];
        assert!((last.z - (params.depth + params.bevel_thickness)).abs() < 1e-6);
        assert!(l.windows(2).all(|w| w[1].z >= w[0].z));
    }

    #[test]
    fn square_bevel_vectors_point_outward() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let v = bevel_vectors(&square);
        assert!((v[0] - Vec2::new(-1.0, -1.0)).length() < 1e-5);
        assert!((v[2] - Vec2::new(1.0, 1.0)).length() < 1e-5);
    }
}
