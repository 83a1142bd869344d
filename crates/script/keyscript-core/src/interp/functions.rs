//! Interpolation helpers:
//! - lerp / slerp (shortest-arc)
//! - quaternion algebra on (x, y, z, w) arrays
//! - uniform Catmull-Rom, evaluated as a cubic Bezier with control points
//!   derived from the neighbouring keys

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
fn neg4(q: [f32; 4]) -> [f32; 4] {
    [-q[0], -q[1], -q[2], -q[3]]
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

/// Normalize a quaternion; a zero quaternion becomes identity.
#[inline]
pub fn normalize_quat(q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        [q[0] * inv_len, q[1] * inv_len, q[2] * inv_len, q[3] * inv_len]
    } else {
        [0.0, 0.0, 0.0, 1.0]
    }
}

/// Hamilton product `a * b` (apply `b` first, then `a`).
#[inline]
pub fn quat_mul(a: [f32; 4], b: [f32; 4]) -> [f32; 4] {
    let [ax, ay, az, aw] = a;
    let [bx, by, bz, bw] = b;
    [
        aw * bx + ax * bw + ay * bz - az * by,
        aw * by - ax * bz + ay * bw + az * bx,
        aw * bz + ax * by - ay * bx + az * bw,
        aw * bw - ax * bx - ay * by - az * bz,
    ]
}

/// Inverse of a unit quaternion (its conjugate).
#[inline]
pub fn quat_inverse(q: [f32; 4]) -> [f32; 4] {
    [-q[0], -q[1], -q[2], q[3]]
}

/// Unit quaternion rotating by `angle` radians around `axis`.
pub fn quat_from_axis_angle(axis: [f32; 3], angle: f32) -> [f32; 4] {
    let len = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
    if len == 0.0 {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let (s, c) = (angle * 0.5).sin_cos();
    let k = s / len;
    [axis[0] * k, axis[1] * k, axis[2] * k, c]
}

/// Raise a unit quaternion to a real power, taking the short way around.
pub fn quat_pow(q: [f32; 4], t: f32) -> [f32; 4] {
    let q = if q[3] < 0.0 { neg4(q) } else { q };
    let sin_half = (q[0] * q[0] + q[1] * q[1] + q[2] * q[2]).sqrt();
    if sin_half <= f32::EPSILON {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let half = sin_half.atan2(q[3]);
    let (s, c) = (half * t).sin_cos();
    let k = s / sin_half;
    [q[0] * k, q[1] * k, q[2] * k, c]
}

/// Slerp between two unit quaternions with shortest-arc correction.
pub fn slerp(q1: [f32; 4], q2: [f32; 4], t: f32) -> [f32; 4] {
    let qa = normalize_quat(q1);
    let mut qb = normalize_quat(q2);

    let mut dot = dot4(qa, qb);
    if dot < 0.0 {
        qb = neg4(qb);
        dot = -dot;
    }

    // Nearly parallel: sin(theta) vanishes, fall back to nlerp.
    const DOT_THRESHOLD: f32 = 0.9995;
    if dot > DOT_THRESHOLD {
        return normalize_quat([
            lerp_f32(qa[0], qb[0], t),
            lerp_f32(qa[1], qb[1], t),
            lerp_f32(qa[2], qb[2], t),
            lerp_f32(qa[3], qb[3], t),
        ]);
    }

    let theta_0 = dot.clamp(-1.0, 1.0).acos();
    let theta = theta_0 * t;
    let sin_theta_0 = theta_0.sin();
    let s0 = (theta_0 - theta).sin() / sin_theta_0;
    let s1 = theta.sin() / sin_theta_0;

    [
        s0 * qa[0] + s1 * qb[0],
        s0 * qa[1] + s1 * qb[1],
        s0 * qa[2] + s1 * qb[2],
        s0 * qa[3] + s1 * qb[3],
    ]
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Catmull-Rom segment between `p1` and `p2`, with `p0`/`p3` as tangent context.
#[inline]
pub fn catmull_rom_f32(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let d = p1 + (p2 - p0) / 6.0;
    let e = p2 - (p3 - p1) / 6.0;
    cubic_bezier(p1, d, e, p2, t)
}

pub fn catmull_rom_vec3(
    p0: [f32; 3],
    p1: [f32; 3],
    p2: [f32; 3],
    p3: [f32; 3],
    t: f32,
) -> [f32; 3] {
    [
        catmull_rom_f32(p0[0], p1[0], p2[0], p3[0], t),
        catmull_rom_f32(p0[1], p1[1], p2[1], p3[1], t),
        catmull_rom_f32(p0[2], p1[2], p2[2], p3[2], t),
    ]
}

/// Catmull-Rom on rotations. Control points are built multiplicatively
/// (`d = (q2 q0^-1)^(1/6) q1`, `e = (q3 q1^-1)^(-1/6) q2`) and the Bezier is
/// evaluated with de Casteljau slerps.
pub fn catmull_rom_quat(
    q0: [f32; 4],
    q1: [f32; 4],
    q2: [f32; 4],
    q3: [f32; 4],
    t: f32,
) -> [f32; 4] {
    let (q0, q1, q2, q3) = (
        normalize_quat(q0),
        normalize_quat(q1),
        normalize_quat(q2),
        normalize_quat(q3),
    );
    let d = quat_mul(quat_pow(quat_mul(q2, quat_inverse(q0)), 1.0 / 6.0), q1);
    let e = quat_mul(quat_pow(quat_mul(q3, quat_inverse(q1)), -1.0 / 6.0), q2);

    let f = slerp(q1, d, t);
    let g = slerp(d, e, t);
    let h = slerp(e, q2, t);
    let m = slerp(f, g, t);
    let n = slerp(g, h, t);
    normalize_quat(slerp(m, n, t))
}
