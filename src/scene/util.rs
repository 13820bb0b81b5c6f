use nalgebra as na;
use na::{vector, Matrix2, Matrix3, Matrix4, Rotation3, Unit, Vector2, Vector3, Vector4};

/// Transformation of a point to homogenous coordinates.
pub fn to_hom_point(v: Vector3<f32>) -> Vector4<f32> {
    return vector![v.x, v.y, v.z, 1.0];
}

/// Transformation of a vector to homogenous coordinates.
pub fn to_hom_vector(v: Vector3<f32>) -> Vector4<f32> {
    return vector![v.x, v.y, v.z, 0.0];
}

/// Transformation of a point from homogenous coordinates.
pub fn from_hom_point(v: Vector4<f32>) -> Vector3<f32> {
    return vector![v.x / v.w, v.y / v.w, v.z / v.w];
}

/// Convex combination of two colors: t * color_1 + (1 - t) * color_2. t is unrestricted.
pub fn color_blend(color_1: Vector3<f32>, color_2: Vector3<f32>, t: f32) -> Vector3<f32> {
    return color_1 * t + color_2 * (1.0 - t);
}

/// Counter-clockwise rotation of the plane by `angle` radians.
pub fn rotation_2d(angle: f32) -> Matrix2<f32> {
    let (sin, cos) = angle.sin_cos();
    return Matrix2::new(cos, -sin,
                        sin,  cos);
}

/// Rotation by `angle` radians about `axis`, counter-clockwise when the axis points at the
/// viewer. The axis does not have to be normalized but must be non-zero.
pub fn angle_axis_rotation(angle: f32, axis: Vector3<f32>) -> Matrix3<f32> {
    return Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle).into_inner();
}

/// Rotation taking the orthonormal frame built from `u`, `v` onto the one built from `a`, `b`.
/// `u` is sent to the direction of `a`, and the plane of `u`, `v` to the plane of `a`, `b`.
/// Inputs need not be unit length or orthogonal, only linearly independent in pairs.
pub fn basis_rotation(u: Vector3<f32>, v: Vector3<f32>, a: Vector3<f32>, b: Vector3<f32>) -> Matrix3<f32> {
    fn frame(first: Vector3<f32>, second: Vector3<f32>) -> Matrix3<f32> {
        let e_1 = first.normalize();
        let e_2 = (second - e_1 * e_1.dot(&second)).normalize();
        return Matrix3::from_columns(&[e_1, e_2, e_1.cross(&e_2)]);
    }

    // Frames are orthonormal, so the inverse of the source frame is its transpose.
    return frame(a, b) * frame(u, v).transpose();
}

/// Rigid motion: rotate by `rotation`, then translate by `translation`.
pub fn isometry(rotation: Matrix3<f32>, translation: Vector3<f32>) -> Matrix4<f32> {
    let mut result = rotation.to_homogeneous();
    result.fixed_slice_mut::<3, 1>(0, 3).copy_from(&translation);
    return result;
}

/// Right-handed perspective projection into clip space, camera looking down -z.
/// `fovy` is the vertical field of view in radians. Depth is reversed, the near plane maps to
/// z / w = 1 and the far plane to -1, so that greater depth is nearer.
pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
    let mut result = Matrix4::new_perspective(aspect, fovy, near, far);
    for column in 0..4 {
        result[(2, column)] = -result[(2, column)];
    }
    return result;
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: Vector3<f32>, b: Vector3<f32>, t: f32) -> Vector3<f32> {
    return a + (b - a) * t;
}

/// Signed double area of the triangle a, b, c; positive when counter-clockwise.
pub fn cross_2d(a: Vector2<f32>, b: Vector2<f32>, c: Vector2<f32>) -> f32 {
    return (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
}
