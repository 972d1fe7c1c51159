//! Fixed-size store of object transforms
//!
//! The store is sized once when the scene is built. Records are only ever
//! mutated in place through clamped nudges.

use crate::error::SceneError;

use super::transform::{Axis, AxisLimit, ObjectTransform};

pub struct ObjectTransformStore {
    transforms: Vec<ObjectTransform>,
}

impl ObjectTransformStore {
    /// Creates `count` objects at the origin with no axis limits
    pub fn new(count: usize) -> Self {
        Self {
            transforms: vec![ObjectTransform::default(); count],
        }
    }

    pub fn from_transforms(transforms: Vec<ObjectTransform>) -> Self {
        Self { transforms }
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ObjectTransform> {
        self.transforms.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectTransform> {
        self.transforms.iter()
    }

    /// Constrains one axis of one object and re-clamps its position
    pub fn set_axis_limit(
        &mut self,
        index: usize,
        axis: Axis,
        limit: AxisLimit,
    ) -> Result<(), SceneError> {
        if !limit.is_valid() {
            return Err(SceneError::InvalidLimit {
                index,
                axis,
                min: limit.min,
                max: limit.max,
            });
        }
        let len = self.transforms.len();
        let transform = self
            .transforms
            .get_mut(index)
            .ok_or(SceneError::UnknownObject { index, len })?;
        transform.set_axis_limit(axis, Some(limit));
        Ok(())
    }

    /// Adds `signed_amount` to `position[axis]` of object `index`, then clamps
    /// into that axis' limit.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn nudge(&mut self, index: usize, axis: Axis, signed_amount: f32) {
        self.transforms[index].offset_axis(axis, signed_amount);
    }

    pub(crate) fn transform(&self, index: usize) -> &ObjectTransform {
        &self.transforms[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn reference_store() -> ObjectTransformStore {
        let mut store = ObjectTransformStore::new(4);
        store
            .set_axis_limit(1, Axis::Z, AxisLimit::new(-0.5, 0.25))
            .unwrap();
        store
            .set_axis_limit(2, Axis::X, AxisLimit::new(-0.5, 0.5))
            .unwrap();
        store
            .set_axis_limit(3, Axis::X, AxisLimit::new(-1.0, 0.5))
            .unwrap();
        store
    }

    #[test]
    fn test_single_large_nudge_lands_on_max() {
        let mut store = reference_store();
        store.nudge(1, Axis::Z, 1.0);
        assert_eq!(store.get(1).unwrap().position.z, 0.25);
    }

    #[test]
    fn test_opposite_nudges_in_one_frame_sum() {
        let mut store = reference_store();
        let step = 1.5 * 0.1;
        store.nudge(2, Axis::X, step);
        store.nudge(2, Axis::X, -step);
        assert!(store.get(2).unwrap().position.x.abs() < 1e-6);
    }

    #[test]
    fn test_random_nudges_never_leave_limits() {
        let mut store = reference_store();
        let mut rng = rand::rng();
        let targets = [(1, Axis::Z), (2, Axis::X), (3, Axis::X)];

        for _ in 0..10_000 {
            let (index, axis) = targets[rng.random_range(0..targets.len())];
            let amount = rng.random_range(-3.0f32..3.0);
            store.nudge(index, axis, amount);

            let transform = store.get(index).unwrap();
            let limit = transform.axis_limit(axis).unwrap();
            let value = transform.position[axis.index()];
            assert!(value >= limit.min && value <= limit.max);
        }
    }

    #[test]
    fn test_invalid_limit_rejected() {
        let mut store = ObjectTransformStore::new(2);
        let err = store
            .set_axis_limit(0, Axis::Y, AxisLimit::new(1.0, -1.0))
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidLimit { index: 0, .. }));
    }

    #[test]
    fn test_limit_on_unknown_object_rejected() {
        let mut store = ObjectTransformStore::new(2);
        let err = store
            .set_axis_limit(5, Axis::X, AxisLimit::new(-1.0, 1.0))
            .unwrap_err();
        assert_eq!(err, SceneError::UnknownObject { index: 5, len: 2 });
    }

    #[test]
    #[should_panic]
    fn test_nudge_out_of_range_panics() {
        let mut store = ObjectTransformStore::new(4);
        store.nudge(4, Axis::X, 0.1);
    }
}
