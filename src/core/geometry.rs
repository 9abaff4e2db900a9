use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Indexed triangle mesh with per-vertex normals.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append a triangle with its own three vertices and a flat face normal.
    pub fn push_flat_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let normal = (b - a).cross(c - a).try_normalize().unwrap_or(Vec3::Z);
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&[a, b, c]);
        self.normals.extend_from_slice(&[normal, normal, normal]);
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Bounding box of all positions.
    ///
    /// Returns `None` for an empty geometry or when any coordinate is not finite.
    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions {
            if !p.is_finite() {
                return None;
            }
            min = min.min(*p);
            max = max.max(*p);
        }
        Some(Aabb { min, max })
    }

    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Move the geometry so its bounding box is centred at the origin.
    ///
    /// Returns the applied offset, or `None` (geometry untouched) when the
    /// bounding box cannot be computed.
    pub fn center(&mut self) -> Option<Vec3> {
        let offset = -self.bounding_box()?.center();
        self.translate(offset);
        Some(offset)
    }

    /// Torus in the XY plane around the Z axis.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(2);
        let tubular = tubular_segments.max(3);
        let tau = std::f32::consts::TAU;

        let mut geometry = Geometry::new();
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * tau;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * tau;
                let position = Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let ring_center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                geometry.positions.push(position);
                geometry
                    .normals
                    .push((position - ring_center).try_normalize().unwrap_or(Vec3::Z));
            }
        }

        let row = tubular + 1;
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                geometry.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_geometry_has_no_bounding_box() {
        assert!(Geometry::new().bounding_box().is_none());
    }

    #[test]
    fn non_finite_positions_have_no_bounding_box() {
        let mut g = Geometry::new();
        g.positions.push(Vec3::ZERO);
        g.positions.push(Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(g.bounding_box().is_none());
        assert!(g.center().is_none());
        assert!(g.positions[1].x.is_nan());
    }

    #[test]
    fn flat_triangle_normal_follows_winding() {
        let mut g = Geometry::new();
        g.push_flat_triangle(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_eq!(g.normals[0], Vec3::Z);
        assert_eq!(g.indices, vec![0, 1, 2]);
    }
}
