//! Rigid transformation type for pose and calibration records.

use nalgebra::{Matrix4, Point3, Quaternion, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A rigid transformation consisting of rotation and translation.
///
/// Maps points from one coordinate frame to another. Composition is
/// associative but not commutative; operand order is part of every call
/// site's contract.
///
/// # Example
///
/// ```
/// use sweep_types::RigidTransform;
/// use nalgebra::{Point3, UnitQuaternion, Vector3};
/// use std::f64::consts::PI;
///
/// let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.0);
/// let translation = Vector3::new(1.0, 2.0, 3.0);
/// let transform = RigidTransform::new(rotation, translation);
///
/// let point = Point3::new(1.0, 0.0, 0.0);
/// let transformed = transform.transform_point(&point);
/// assert!((transformed.y - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Rotation as a unit quaternion.
    pub rotation: UnitQuaternion<f64>,
    /// Translation vector.
    pub translation: Vector3<f64>,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Creates a new rigid transform with the given rotation and translation.
    #[must_use]
    pub const fn new(rotation: UnitQuaternion<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Creates an identity transform (no rotation or translation).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Creates a transform with only translation.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation,
        }
    }

    /// Creates a transform with only rotation.
    #[must_use]
    pub fn from_rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self {
            rotation,
            translation: Vector3::zeros(),
        }
    }

    /// Creates a transform from dataset-style records.
    ///
    /// `translation` is `[x, y, z]` in meters and `rotation` is a quaternion
    /// in `[w, x, y, z]` order, normalized on construction.
    #[must_use]
    pub fn from_record(translation: [f64; 3], rotation: [f64; 4]) -> Self {
        let [w, x, y, z] = rotation;
        Self {
            rotation: UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z)),
            translation: Vector3::new(translation[0], translation[1], translation[2]),
        }
    }

    /// Transforms a 3D point.
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * point.coords + self.translation)
    }

    /// Composes this transform with another (self * other).
    ///
    /// The result applies `other` first, then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.translation + self.rotation * other.translation,
        }
    }

    /// Computes the inverse of this transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            rotation: inv_rotation,
            translation: inv_rotation * (-self.translation),
        }
    }

    /// Converts to a 4x4 homogeneous transformation matrix.
    #[must_use]
    pub fn to_matrix4(&self) -> Matrix4<f64> {
        let mut mat = Matrix4::identity();

        let rot_mat = self.rotation.to_rotation_matrix();
        for i in 0..3 {
            for j in 0..3 {
                mat[(i, j)] = rot_mat[(i, j)];
            }
        }

        mat[(0, 3)] = self.translation.x;
        mat[(1, 3)] = self.translation.y;
        mat[(2, 3)] = self.translation.z;

        mat
    }

    /// Returns true if this transform is approximately the identity.
    #[must_use]
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.rotation.angle().abs() < epsilon && self.translation.norm() < epsilon
    }
}
