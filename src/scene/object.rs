use crate::geometry::ShapeParameters;
use crate::math::{Color, Vector3};
use crate::tessellation::{rebuild_mesh, Mesh};

slotmap::new_key_type! {
    /// Unique identifier for an object in the scene graph.
    pub struct ObjectId;
}

/// A knot tube mesh together with the parameters it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotGeometry {
    params: ShapeParameters,
    mesh: Mesh,
}

impl KnotGeometry {
    /// Tessellates the knot for `params`.
    #[must_use]
    pub fn build(params: &ShapeParameters) -> Self {
        let params = params.sanitized();
        Self {
            mesh: rebuild_mesh(&params),
            params,
        }
    }

    /// The sanitized parameters the mesh was built from.
    #[must_use]
    pub fn params(&self) -> &ShapeParameters {
        &self.params
    }

    /// The tube mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

/// What a scene object draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A parametric knot; the fallback renderer draws its centerline.
    Knot(KnotGeometry),
    /// An arbitrary mesh, drawn only by full 3D backends.
    Mesh(Mesh),
}

impl Geometry {
    /// The triangle mesh of this geometry.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        match self {
            Self::Knot(knot) => knot.mesh(),
            Self::Mesh(mesh) => mesh,
        }
    }

    /// Returns the knot geometry, if this is one.
    #[must_use]
    pub fn as_knot(&self) -> Option<&KnotGeometry> {
        match self {
            Self::Knot(knot) => Some(knot),
            Self::Mesh(_) => None,
        }
    }
}

/// Surface appearance hints for 3D backends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f64,
    pub shininess: f64,
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x4a_9e_ff),
            opacity: 1.0,
            shininess: 100.0,
            wireframe: false,
        }
    }
}

/// Position and Euler rotation (radians) of an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
        }
    }
}

/// A renderable entry in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
    /// Child objects. Stored for hosts; transforms are not composed.
    pub children: Vec<ObjectId>,
}

impl SceneObject {
    /// Creates an object with default material and identity transform.
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            material: Material::default(),
            transform: Transform::default(),
            children: Vec::new(),
        }
    }

    /// Creates a knot object tessellated from `params`.
    #[must_use]
    pub fn knot(params: &ShapeParameters) -> Self {
        Self::new(Geometry::Knot(KnotGeometry::build(params)))
    }

    /// Sets the material.
    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }
}
