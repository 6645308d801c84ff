mod object;

pub use object::{Geometry, KnotGeometry, Material, ObjectId, SceneObject, Transform};

use slotmap::SlotMap;

use crate::error::SceneError;

/// Ordered container of renderable objects.
///
/// Objects are stored in an arena keyed by [`ObjectId`] and iterated in
/// insertion order. There is no transform hierarchy: child lists are kept
/// for hosts but ignored when rendering.
#[derive(Debug, Default)]
pub struct SceneGraph {
    objects: SlotMap<ObjectId, SceneObject>,
    order: Vec<ObjectId>,
}

impl SceneGraph {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object and returns its ID.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.order.push(id);
        id
    }

    /// Removes an object, detaching it from any parent's child list.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn remove(&mut self, id: ObjectId) -> Result<SceneObject, SceneError> {
        let object = self
            .objects
            .remove(id)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{id:?}")))?;
        self.order.retain(|&other| other != id);
        for parent in self.objects.values_mut() {
            parent.children.retain(|&child| child != id);
        }
        Ok(object)
    }

    /// Returns a reference to the object, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn get(&self, id: ObjectId) -> Result<&SceneObject, SceneError> {
        self.objects
            .get(id)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to the object, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn get_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject, SceneError> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{id:?}")))
    }

    /// Replaces an object's geometry wholesale, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the scene.
    pub fn set_geometry(
        &mut self,
        id: ObjectId,
        geometry: Geometry,
    ) -> Result<Geometry, SceneError> {
        let object = self.get_mut(id)?;
        Ok(std::mem::replace(&mut object.geometry, geometry))
    }

    /// Records `child` in `parent`'s child list.
    ///
    /// # Errors
    ///
    /// Returns an error if either object is not in the scene.
    pub fn add_child(&mut self, parent: ObjectId, child: ObjectId) -> Result<(), SceneError> {
        self.get(child)?;
        let parent = self.get_mut(parent)?;
        if !parent.children.contains(&child) {
            parent.children.push(child);
        }
        Ok(())
    }

    /// Iterates objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.order
            .iter()
            .filter_map(|&id| self.objects.get(id).map(|object| (id, object)))
    }

    /// Calls `f` for every object in insertion order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(ObjectId, &SceneObject),
    {
        for (id, object) in self.iter() {
            f(id, object);
        }
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when the scene holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
