//! Parent chains and model matrix resolution
//!
//! Each object has a [`Placement`]: static (always identity), a root that is
//! placed by its own translation, or a child of another object. The model
//! matrix of an object is its own translation followed by the translation of
//! every ancestor up to the root.
//!
//! Only translation is composed. Rotation and scale on the records are left
//! untouched.

use cgmath::{Matrix4, SquareMatrix};

use crate::error::SceneError;

use super::transform_store::ObjectTransformStore;

/// Where an object sits in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Never moves; resolves to the identity matrix.
    Static,
    /// Placed by its own translation only.
    Root,
    /// Placed by its own translation, then by its parent's chain.
    ChildOf(usize),
}

/// Validated placement table, one entry per object
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    placements: Vec<Placement>,
}

impl Hierarchy {
    /// Builds the table, rejecting out-of-range parents, self-parenting and cycles
    pub fn new(placements: Vec<Placement>) -> Result<Self, SceneError> {
        let len = placements.len();

        for (child, placement) in placements.iter().enumerate() {
            if let Placement::ChildOf(parent) = *placement {
                if parent >= len {
                    return Err(SceneError::ParentOutOfRange { child, parent, len });
                }
                if parent == child {
                    return Err(SceneError::SelfParent(child));
                }
            }
        }

        // A chain longer than the object count must revisit some object.
        for start in 0..len {
            let mut current = start;
            let mut steps = 0;
            while let Placement::ChildOf(parent) = placements[current] {
                steps += 1;
                if steps > len {
                    return Err(SceneError::ParentCycle(start));
                }
                current = parent;
            }
        }

        Ok(Self { placements })
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placement(&self, index: usize) -> Placement {
        self.placements[index]
    }

    /// Parent of `index`, if it has one
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        match self.placements[index] {
            Placement::ChildOf(parent) => Some(parent),
            Placement::Static | Placement::Root => None,
        }
    }

    /// Resolves the model matrix of object `index`.
    ///
    /// # Panics
    /// Panics if `index` is outside the hierarchy or the store.
    pub fn model_matrix(&self, store: &ObjectTransformStore, index: usize) -> Matrix4<f32> {
        let mut model = Matrix4::identity();
        let mut current = Some(index);

        while let Some(i) = current {
            current = match self.placements[i] {
                Placement::Static => None,
                Placement::Root => {
                    model = model * Matrix4::from_translation(store.transform(i).position);
                    None
                }
                Placement::ChildOf(parent) => {
                    model = model * Matrix4::from_translation(store.transform(i).position);
                    Some(parent)
                }
            };
        }

        model
    }

    /// Model matrices for every object, in index order
    pub fn model_matrices(&self, store: &ObjectTransformStore) -> Vec<Matrix4<f32>> {
        (0..self.placements.len())
            .map(|index| self.model_matrix(store, index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::transform::{Axis, AxisLimit};
    use cgmath::Vector3;

    fn reference() -> (Hierarchy, ObjectTransformStore) {
        let hierarchy = Hierarchy::new(vec![
            Placement::Static,
            Placement::Root,
            Placement::ChildOf(1),
            Placement::Root,
        ])
        .unwrap();
        (hierarchy, ObjectTransformStore::new(4))
    }

    #[test]
    fn test_static_object_is_identity() {
        let (hierarchy, mut store) = reference();
        store.nudge(0, Axis::X, 2.0);
        assert_eq!(hierarchy.model_matrix(&store, 0), Matrix4::identity());
    }

    #[test]
    fn test_child_follows_parent_translation() {
        let (hierarchy, mut store) = reference();
        store.nudge(1, Axis::Z, 0.2);
        store.nudge(2, Axis::X, -0.4);
        store.nudge(3, Axis::X, 0.3);

        let p1 = store.get(1).unwrap().position;
        let p2 = store.get(2).unwrap().position;
        let expected = Matrix4::identity()
            * Matrix4::from_translation(p2)
            * Matrix4::from_translation(p1);

        assert_eq!(hierarchy.model_matrix(&store, 2), expected);
        assert_eq!(
            hierarchy.model_matrix(&store, 3),
            Matrix4::from_translation(Vector3::new(0.3, 0.0, 0.0))
        );
        assert_eq!(
            hierarchy.model_matrix(&store, 1),
            Matrix4::from_translation(p1)
        );
    }

    #[test]
    fn test_parent_move_does_not_touch_siblings() {
        let (hierarchy, mut store) = reference();
        let before = hierarchy.model_matrix(&store, 3);
        store.nudge(1, Axis::Z, 0.1);
        assert_eq!(hierarchy.model_matrix(&store, 3), before);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let (hierarchy, mut store) = reference();
        store.nudge(1, Axis::Z, 0.123);
        store.nudge(2, Axis::X, 0.456);

        let first = hierarchy.model_matrices(&store);
        let second = hierarchy.model_matrices(&store);
        let as_bits = |m: &Matrix4<f32>| {
            let values: &[f32; 16] = m.as_ref();
            values.map(f32::to_bits)
        };
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(as_bits(a), as_bits(b));
        }
    }

    #[test]
    fn test_rotation_and_scale_are_not_applied() {
        let hierarchy = Hierarchy::new(vec![Placement::Root]).unwrap();
        let mut transform = crate::gfx::scene::transform::ObjectTransform::new(Vector3::new(
            1.0, 2.0, 3.0,
        ));
        transform.rotation = Vector3::new(45.0, 0.0, 0.0);
        transform.scale = Vector3::new(2.0, 2.0, 2.0);
        let store = ObjectTransformStore::from_transforms(vec![transform]);

        assert_eq!(
            hierarchy.model_matrix(&store, 0),
            Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn test_deep_chain_accumulates() {
        let hierarchy = Hierarchy::new(vec![
            Placement::Root,
            Placement::ChildOf(0),
            Placement::ChildOf(1),
        ])
        .unwrap();
        let mut store = ObjectTransformStore::new(3);
        store
            .set_axis_limit(0, Axis::Y, AxisLimit::new(-10.0, 10.0))
            .unwrap();
        store.nudge(0, Axis::Y, 1.0);
        store.nudge(1, Axis::Y, 2.0);
        store.nudge(2, Axis::Y, 4.0);

        let model = hierarchy.model_matrix(&store, 2);
        assert_eq!(model.w.y, 7.0);
    }

    #[test]
    fn test_invalid_hierarchies_rejected() {
        assert_eq!(
            Hierarchy::new(vec![Placement::Root, Placement::ChildOf(5)]).unwrap_err(),
            SceneError::ParentOutOfRange {
                child: 1,
                parent: 5,
                len: 2
            }
        );
        assert_eq!(
            Hierarchy::new(vec![Placement::ChildOf(0)]).unwrap_err(),
            SceneError::SelfParent(0)
        );
        assert_eq!(
            Hierarchy::new(vec![Placement::ChildOf(1), Placement::ChildOf(0)]).unwrap_err(),
            SceneError::ParentCycle(0)
        );
    }

    #[test]
    fn test_parent_lookup() {
        let (hierarchy, _) = reference();
        assert_eq!(hierarchy.parent_of(2), Some(1));
        assert_eq!(hierarchy.parent_of(1), None);
        assert_eq!(hierarchy.placement(0), Placement::Static);
    }
}
