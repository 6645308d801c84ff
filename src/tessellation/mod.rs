mod sample_curve;
mod tessellate_tube;

pub use sample_curve::SampleCurve;
pub use tessellate_tube::{rebuild_mesh, TessellateTube, CROSS_SECTION_POINTS};

use std::collections::HashMap;

use crate::math::{Point2, Point3, Vector3};

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Computes the box enclosing `points`, or `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            aabb.min = aabb.min.inf(p);
            aabb.max = aabb.max.sup(p);
        }
        Some(aabb)
    }

    /// Center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// An indexed triangle mesh.
///
/// `positions`, `normals` and `uvs` are parallel arrays; `indices` holds one
/// entry per triangle referencing those arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Point3>,
    /// Unit vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates (`u` along the curve, `v` around the ring).
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl Mesh {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` when the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns `true` when every index references an existing vertex and the
    /// attribute arrays have matching lengths.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let n = self.positions.len();
        self.normals.len() == n
            && self.uvs.len() == n
            && self
                .indices
                .iter()
                .flatten()
                .all(|&i| (i as usize) < n)
    }

    /// Returns `true` when every undirected edge is shared by exactly two
    /// triangles and no triangle is degenerate in its indices.
    #[must_use]
    pub fn is_closed_manifold(&self) -> bool {
        if self.is_empty() || !self.is_consistent() {
            return false;
        }
        let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
        for &[a, b, c] in &self.indices {
            if a == b || b == c || a == c {
                return false;
            }
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *edges.entry((u.min(v), u.max(v))).or_default() += 1;
            }
        }
        edges.values().all(|&count| count == 2)
    }

    /// Bounding box of the vertex positions.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }
}
