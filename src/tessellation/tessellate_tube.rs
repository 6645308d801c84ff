use crate::geometry::{ShapeParameters, TrefoilKnot};
use crate::math::{Point2, Point3};

use super::{Mesh, SampleCurve};

/// Number of vertices on each cross-section ring.
pub const CROSS_SECTION_POINTS: usize = 12;

/// Sweeps a circular cross-section along a trefoil knot.
///
/// The tube is closed in both directions: the last ring connects back to the
/// first, and every ring wraps around onto its own first vertex. Vertex normals
/// point radially outward from the ring center.
#[derive(Debug, Clone, Copy)]
pub struct TessellateTube {
    knot: TrefoilKnot,
}

impl TessellateTube {
    /// Creates a new tube tessellation for the given parameters.
    ///
    /// Parameters are sanitized first, so `segment_count` is at least 3.
    #[must_use]
    pub fn new(params: &ShapeParameters) -> Self {
        Self {
            knot: TrefoilKnot::new(params),
        }
    }

    /// Executes the tessellation, producing a closed tube mesh.
    ///
    /// The result has `segment_count * CROSS_SECTION_POINTS` vertices and
    /// twice as many triangles.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn execute(&self) -> Mesh {
        let segments = self.knot.params().segment_count as usize;
        let ring = CROSS_SECTION_POINTS;
        let samples = SampleCurve::new(&self.knot, segments).execute();

        let vertex_count = segments * ring;
        let mut mesh = Mesh {
            positions: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            uvs: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(vertex_count * 2),
        };

        for (ring_idx, sample) in samples.iter().enumerate() {
            let u = ring_idx as f64 / segments as f64;
            for seg_idx in 0..ring {
                let v = seg_idx as f64 / ring as f64;
                let normal = sample.frame.radial(std::f64::consts::TAU * v);
                mesh.positions
                    .push(Point3::from(sample.position.coords + normal * sample.radius));
                mesh.normals.push(normal);
                mesh.uvs.push(Point2::new(u, v));

                let next_ring_idx = (ring_idx + 1) % segments;
                let curr = (ring_idx * ring + seg_idx) as u32;
                let next_seg = (ring_idx * ring + (seg_idx + 1) % ring) as u32;
                let next_ring = (next_ring_idx * ring + seg_idx) as u32;
                let next_both = (next_ring_idx * ring + (seg_idx + 1) % ring) as u32;

                // Counter-clockwise seen from outside the tube.
                mesh.indices.push([curr, next_seg, next_ring]);
                mesh.indices.push([next_seg, next_both, next_ring]);
            }
        }

        tracing::debug!(
            segments,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "tessellated trefoil tube"
        );
        mesh
    }
}

/// Builds the tube mesh for `params`.
///
/// Shorthand for `TessellateTube::new(params).execute()`.
#[must_use]
pub fn rebuild_mesh(params: &ShapeParameters) -> Mesh {
    TessellateTube::new(params).execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Curve;
    use approx::assert_relative_eq;

    fn params(segments: u32) -> ShapeParameters {
        ShapeParameters {
            segment_count: segments,
            ..ShapeParameters::default()
        }
    }

    #[test]
    fn triangle_count_matches_segments() {
        for segments in [3, 7, 50, 200] {
            let mesh = rebuild_mesh(&params(segments));
            assert_eq!(
                mesh.triangle_count(),
                segments as usize * CROSS_SECTION_POINTS * 2
            );
            assert_eq!(
                mesh.vertex_count(),
                segments as usize * CROSS_SECTION_POINTS
            );
        }
    }

    #[test]
    fn indices_are_in_range() {
        let mesh = rebuild_mesh(&params(200));
        assert!(mesh.is_consistent());
    }

    #[test]
    fn tube_is_closed_manifold() {
        assert!(rebuild_mesh(&params(3)).is_closed_manifold());
        assert!(rebuild_mesh(&params(64)).is_closed_manifold());
    }

    #[test]
    fn too_few_segments_are_clamped() {
        let mesh = rebuild_mesh(&params(0));
        assert_eq!(mesh.triangle_count(), 3 * CROSS_SECTION_POINTS * 2);
        assert!(mesh.is_closed_manifold());
    }

    #[test]
    fn rebuild_is_deterministic() {
        let p = ShapeParameters {
            frequency: 2.0,
            radius_variation: 4.0,
            ..ShapeParameters::default()
        };
        let a = rebuild_mesh(&p);
        let b = rebuild_mesh(&p);
        assert_eq!(a.indices, b.indices);
        let bits = |m: &Mesh| -> Vec<u64> {
            m.positions
                .iter()
                .flat_map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
                .collect()
        };
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn vertices_sit_on_ring_of_modulated_radius() {
        let p = params(40);
        let knot = TrefoilKnot::new(&p);
        let mesh = rebuild_mesh(&p);
        let samples = SampleCurve::new(&knot, 40).execute();
        for (ring_idx, sample) in samples.iter().enumerate() {
            for seg_idx in 0..CROSS_SECTION_POINTS {
                let i = ring_idx * CROSS_SECTION_POINTS + seg_idx;
                let offset = mesh.positions[i] - sample.position;
                assert_relative_eq!(offset.norm(), sample.radius, epsilon = 1e-12);
                assert!(offset.dot(&sample.frame.tangent).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn normals_point_outward_from_ring_center() {
        let p = params(24);
        let knot = TrefoilKnot::new(&p);
        let mesh = rebuild_mesh(&p);
        for (i, normal) in mesh.normals.iter().enumerate() {
            assert_relative_eq!(normal.norm(), 1.0, epsilon = 1e-12);
            let ring_idx = i / CROSS_SECTION_POINTS;
            let center = knot.evaluate(knot.domain().uniform(ring_idx, 24));
            let outward = (mesh.positions[i] - center).normalize();
            assert_relative_eq!(*normal, outward, epsilon = 1e-9);
        }
    }

    #[test]
    fn triangles_face_along_vertex_normals() {
        // Thin enough that the tube never folds through the tightest bend.
        let thin = ShapeParameters {
            base_radius: 0.05,
            radius_variation: 0.0,
            ..ShapeParameters::default()
        };
        for p in [
            thin,
            ShapeParameters {
                magnitude: 5.0,
                segment_count: 400,
                ..thin
            },
        ] {
            let mesh = rebuild_mesh(&p);
            for &[a, b, c] in &mesh.indices {
                let [a, b, c] = [a as usize, b as usize, c as usize];
                let face = (mesh.positions[b] - mesh.positions[a])
                    .cross(&(mesh.positions[c] - mesh.positions[a]));
                let vertex = mesh.normals[a] + mesh.normals[b] + mesh.normals[c];
                assert!(face.dot(&vertex) > 0.0);
            }
        }
    }

    #[test]
    fn degenerate_radius_still_produces_valid_mesh() {
        let mesh = rebuild_mesh(&ShapeParameters {
            base_radius: 0.0,
            radius_variation: 0.0,
            ..ShapeParameters::default()
        });
        assert!(mesh.is_closed_manifold());
        assert!(mesh.positions.iter().all(|p| p.coords.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn uvs_span_unit_square() {
        let mesh = rebuild_mesh(&params(10));
        assert!(mesh
            .uvs
            .iter()
            .all(|uv| (0.0..1.0).contains(&uv.x) && (0.0..1.0).contains(&uv.y)));
    }
}
