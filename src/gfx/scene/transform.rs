//! Per-object transform records
//!
//! An [`ObjectTransform`] carries position, rotation and scale plus an
//! optional clamp range for each position axis.

use cgmath::{Vector3, Zero};

/// One of the three position axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a `Vector3`
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Closed range a position component is clamped into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimit {
    pub min: f32,
    pub max: f32,
}

impl AxisLimit {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Transform of a single scene object.
///
/// Only `position` is used when model matrices are resolved; `rotation` and
/// `scale` are kept on the record but not composed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub position: Vector3<f32>,
    /// Euler angles in degrees.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    axis_limits: [Option<AxisLimit>; 3],
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            axis_limits: [None; 3],
        }
    }
}

impl ObjectTransform {
    pub fn new(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn axis_limit(&self, axis: Axis) -> Option<AxisLimit> {
        self.axis_limits[axis.index()]
    }

    /// Constrains `axis` to `limit` (or frees it with `None`) and re-clamps
    /// the current position.
    ///
    /// Callers validate the limit; see `ObjectTransformStore::set_axis_limit`.
    pub(crate) fn set_axis_limit(&mut self, axis: Axis, limit: Option<AxisLimit>) {
        self.axis_limits[axis.index()] = limit;
        self.clamp_position();
    }

    /// Adds `amount` to one position component, then clamps once.
    pub fn offset_axis(&mut self, axis: Axis, amount: f32) {
        let i = axis.index();
        self.position[i] += amount;
        if let Some(limit) = self.axis_limits[i] {
            self.position[i] = limit.clamp(self.position[i]);
        }
    }

    fn clamp_position(&mut self) {
        for axis in Axis::ALL {
            if let Some(limit) = self.axis_limits[axis.index()] {
                self.position[axis.index()] = limit.clamp(self.position[axis.index()]);
            }
        }
    }

    /// True when every constrained component sits inside its limit
    pub fn is_within_limits(&self) -> bool {
        Axis::ALL.iter().all(|axis| match self.axis_limit(*axis) {
            Some(limit) => limit.contains(self.position[axis.index()]),
            None => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_clamps_constrained_axis() {
        let mut transform = ObjectTransform::default();
        transform.set_axis_limit(Axis::X, Some(AxisLimit::new(-1.0, 1.0)));

        transform.offset_axis(Axis::X, 3.0);
        assert_eq!(transform.position.x, 1.0);

        transform.offset_axis(Axis::X, -10.0);
        assert_eq!(transform.position.x, -1.0);
    }

    #[test]
    fn test_unconstrained_axis_moves_freely() {
        let mut transform = ObjectTransform::default();
        transform.offset_axis(Axis::Y, 42.0);
        assert_eq!(transform.position.y, 42.0);
        assert!(transform.is_within_limits());
    }

    #[test]
    fn test_setting_limit_reclamps_position() {
        let mut transform = ObjectTransform::new(Vector3::new(0.0, 0.0, 3.0));
        transform.set_axis_limit(Axis::Z, Some(AxisLimit::new(-0.5, 0.25)));
        assert_eq!(transform.position.z, 0.25);
    }

    #[test]
    fn test_rotation_and_scale_defaults() {
        let transform = ObjectTransform::default();
        assert_eq!(transform.rotation, Vector3::zero());
        assert_eq!(transform.scale, Vector3::new(1.0, 1.0, 1.0));
    }
}
