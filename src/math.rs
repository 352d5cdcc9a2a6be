extern crate nalgebra_glm as glm;
use glm::Vec3;

const DEG2RAD: f32 = std::f32::consts::PI / 180.0;

/// A column-major 4x4 transform matrix.
///
/// `0[c][r]` is row `r` of column `c`, so the translation part of an
/// affine transform lives in column 3. Elementary transform helpers
/// ([`rotate`], [`translate`], [`scale`]) compose by left-multiplying the
/// new transform onto the existing one (`new * old`), which applies the
/// new transform last when the matrix multiplies column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const ZERO: Mat4 = Mat4([[0.0; 4]; 4]);

    /// Symmetric perspective projection. `fov_deg` is the vertical field
    /// of view in degrees.
    ///
    /// Division by zero when `aspect == 0` or `near == far`; neither is
    /// checked, same as passing garbage to any other constructor here.
    pub fn perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let f = 1.0 / (DEG2RAD * fov_deg * 0.5).tan();
        let inv_depth = 1.0 / (near - far);
        let mut out = Mat4::ZERO;
        out.0[0][0] = f / aspect;
        out.0[1][1] = f;
        out.0[2][2] = (near + far) * inv_depth;
        out.0[2][3] = -1.0;
        out.0[3][2] = 2.0 * near * far * inv_depth;
        return out;
    }

    /// Column-major matrix product `self * other`.
    pub fn multiply(&self, other: &Mat4) -> Mat4 {
        let mut out = Mat4::ZERO;
        for c in 0..4 {
            for r in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.0[k][r] * other.0[c][k];
                }
                out.0[c][r] = sum;
            }
        }
        return out;
    }

    /// Flat view of the 16 elements in column-major order, ready for a
    /// `uniformMatrix4fv`-style upload without transposition.
    pub fn as_slice(&self) -> &[f32] {
        return bytemuck::cast_slice(&self.0);
    }
}

/// Composes a rotation of `angle_deg` degrees about `axis` onto `m`.
///
/// The axis is not normalized here: a non-unit axis skews the result.
/// Callers pass unit axes.
pub fn rotate(m: &Mat4, angle_deg: f32, axis: &Vec3) -> Mat4 {
    let cos = (DEG2RAD * angle_deg).cos();
    let sin = (DEG2RAD * angle_deg).sin();
    let one_cos = 1.0 - cos;
    let (rx, ry, rz) = (axis.x, axis.y, axis.z);

    let mut r = Mat4::ZERO;
    r.0[0][0] = cos + rx * rx * one_cos;
    r.0[1][0] = rx * ry * one_cos - rz * sin;
    r.0[2][0] = rx * rz * one_cos + ry * sin;
    r.0[0][1] = ry * rx * one_cos + rz * sin;
    r.0[1][1] = cos + ry * ry * one_cos;
    r.0[2][1] = ry * rz * one_cos - rx * sin;
    r.0[0][2] = rz * rx * one_cos - ry * sin;
    r.0[1][2] = rz * ry * one_cos + rx * sin;
    r.0[2][2] = cos + rz * rz * one_cos;
    r.0[3][3] = 1.0;
    return r.multiply(m);
}

/// Composes a translation by `(x, y, z)` onto `m`.
pub fn translate(m: &Mat4, x: f32, y: f32, z: f32) -> Mat4 {
    let mut t = Mat4::IDENTITY;
    t.0[3][0] = x;
    t.0[3][1] = y;
    t.0[3][2] = z;
    return t.multiply(m);
}

/// Composes a per-axis scale onto `m`.
pub fn scale(m: &Mat4, x: f32, y: f32, z: f32) -> Mat4 {
    let mut s = Mat4::IDENTITY;
    s.0[0][0] = x;
    s.0[1][1] = y;
    s.0[2][2] = z;
    return s.multiply(m);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glm::vec3;

    fn assert_mat_eq(a: &Mat4, b: &Mat4, eps: f32) {
        for c in 0..4 {
            for r in 0..4 {
                let (x, y) = (a.0[c][r], b.0[c][r]);
                assert!(
                    (x - y).abs() <= eps,
                    "mismatch at [{}][{}]: {} vs {}",
                    c,
                    r,
                    x,
                    y
                );
            }
        }
    }

    // An arbitrary matrix with no structure to hide bookkeeping mistakes.
    fn sample() -> Mat4 {
        let mut m = Mat4::ZERO;
        for c in 0..4 {
            for r in 0..4 {
                m.0[c][r] = (c * 4 + r) as f32 * 0.25 - 1.5;
            }
        }
        return m;
    }

    // Applies `m` to a column vector.
    fn apply(m: &Mat4, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for r in 0..4 {
            for c in 0..4 {
                out[r] += m.0[c][r] * v[c];
            }
        }
        return out;
    }

    #[test]
    fn multiplying_by_identity_is_a_no_op() {
        let m = sample();
        assert_mat_eq(&m.multiply(&Mat4::IDENTITY), &m, 0.0);
        assert_mat_eq(&Mat4::IDENTITY.multiply(&m), &m, 0.0);
    }

    #[test]
    fn rotation_by_zero_degrees_is_identity() {
        let m = sample();
        let rotated = rotate(&m, 0.0, &vec3(0.3, -2.0, 5.0));
        assert_mat_eq(&rotated, &m, 1e-6);
    }

    #[test]
    fn rotation_by_a_full_turn_is_identity() {
        let m = sample();
        let rotated = rotate(&m, 360.0, &vec3(0.0, 1.0, 0.0));
        assert_mat_eq(&rotated, &m, 1e-4);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let r = rotate(&Mat4::IDENTITY, 90.0, &vec3(0.0, 0.0, 1.0));
        let v = apply(&r, [1.0, 0.0, 0.0, 1.0]);
        assert!((v[0] - 0.0).abs() < 1e-6);
        assert!((v[1] - 1.0).abs() < 1e-6);
        assert!((v[2] - 0.0).abs() < 1e-6);
        assert!((v[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn non_unit_axis_skews_the_rotation() {
        // Half-turn about an axis of length 2: cos = -1, so the diagonal
        // term along the axis becomes cos + 4 * (1 - cos) = 7. Documented
        // contract, not a bug: the axis is the caller's to normalize.
        let r = rotate(&Mat4::IDENTITY, 180.0, &vec3(0.0, 0.0, 2.0));
        assert!((r.0[2][2] - 7.0).abs() < 1e-4);
    }

    #[test]
    fn translation_fills_the_last_column() {
        let t = translate(&Mat4::IDENTITY, 1.5, -2.0, 0.25);
        assert_eq!(t.0[3], [1.5, -2.0, 0.25, 1.0]);
        // The rest stays identity.
        assert_eq!(t.0[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(t.0[1], [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(t.0[2], [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn scale_fills_the_diagonal() {
        let s = scale(&Mat4::IDENTITY, 2.0, 3.0, 4.0);
        assert_eq!(s.0[0][0], 2.0);
        assert_eq!(s.0[1][1], 3.0);
        assert_eq!(s.0[2][2], 4.0);
        assert_eq!(s.0[3][3], 1.0);
    }

    #[test]
    fn perspective_matches_the_closed_form() {
        let p = Mat4::perspective(45.0, 800.0 / 600.0, 0.1, 100.0);
        let inv_depth = 1.0 / (0.1f32 - 100.0);
        assert_eq!(p.0[3][2], 2.0 * 0.1 * 100.0 * inv_depth);
        assert_eq!(p.0[2][3], -1.0);
        assert_eq!(p.0[2][2], (0.1 + 100.0) * inv_depth);
        let f = 1.0 / (DEG2RAD * 45.0 * 0.5).tan();
        assert_eq!(p.0[0][0], f / (800.0 / 600.0));
        assert_eq!(p.0[1][1], f);
        // Everything off the closed form is zero.
        assert_eq!(p.0[3][3], 0.0);
        assert_eq!(p.0[0][3], 0.0);
    }

    #[test]
    fn translate_composes_on_the_left() {
        // Scale first, then translate: the translation must come out
        // unscaled because it is applied after the scale.
        let m = scale(&Mat4::IDENTITY, 2.0, 2.0, 2.0);
        let m = translate(&m, 1.0, 0.0, 0.0);
        let v = apply(&m, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(v, [3.0, 2.0, 2.0, 1.0]);
    }
}
