//! Rotation and translation invariant moments of a point cloud.
//!
//! With centred points `d = p - mean(p)`, the second moment matrix is
//! `M = sum(d d^T)` and the third moment tensor is `T_ijk = sum(d_i d_j d_k)`.
//! The four invariants are the three characteristic-polynomial coefficients
//! of `M` (trace, sum of principal 2x2 minors, determinant) and the squared
//! Frobenius norm of `T`.

/// Returns `[trace(M), minors(M), det(M), |T|^2]` for the given points.
///
/// An empty slice yields zeros. `M` is positive semi-definite, so every
/// value is mathematically non-negative; round-off below zero is clamped.
pub fn moment_invariants(points: &[[f64; 3]]) -> [f64; 4] {
    if points.is_empty() {
        return [0.0; 4];
    }

    let centroid = centroid(points);
    let mut m = [[0.0f64; 3]; 3];
    let mut t = [[[0.0f64; 3]; 3]; 3];

    for p in points {
        let d = [p[0] - centroid[0], p[1] - centroid[1], p[2] - centroid[2]];
        for i in 0..3 {
            for j in 0..3 {
                let dij = d[i] * d[j];
                m[i][j] += dij;
                for k in 0..3 {
                    t[i][j][k] += dij * d[k];
                }
            }
        }
    }

    let trace = m[0][0] + m[1][1] + m[2][2];
    let minors = m[0][0] * m[1][1] - m[0][1] * m[1][0] + m[0][0] * m[2][2] - m[0][2] * m[2][0]
        + m[1][1] * m[2][2]
        - m[1][2] * m[2][1];
    let det = m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]);
    let skew: f64 = t.iter().flatten().flatten().map(|v| v * v).sum();

    [trace, minors, det, skew].map(|v| v.max(0.0))
}

fn centroid(points: &[[f64; 3]]) -> [f64; 3] {
    let n = points.len() as f64;
    let mut c = [0.0; 3];
    for p in points {
        c[0] += p[0];
        c[1] += p[1];
        c[2] += p[2];
    }
    [c[0] / n, c[1] / n, c[2] / n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helix(n: usize) -> Vec<[f64; 3]> {
        (0..n)
            .map(|i| {
                let t = i as f64 * 100f64.to_radians();
                [2.3 * t.cos(), 2.3 * t.sin(), 1.5 * i as f64]
            })
            .collect()
    }

    fn rotate(points: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let (a, b) = (0.7f64, -1.3f64);
        points
            .iter()
            .map(|p| {
                let x = a.cos() * p[0] - a.sin() * p[1];
                let y = a.sin() * p[0] + a.cos() * p[1];
                let z = p[2];
                let y2 = b.cos() * y - b.sin() * z;
                let z2 = b.sin() * y + b.cos() * z;
                [x + 12.0, y2 - 4.0, z2 + 30.5]
            })
            .collect()
    }

    fn assert_close(a: [f64; 4], b: [f64; 4]) {
        for (x, y) in a.iter().zip(&b) {
            let scale = x.abs().max(y.abs()).max(1.0);
            assert!((x - y).abs() / scale < 1e-9, "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn invariant_under_rigid_motion() {
        let points = helix(16);
        assert_close(moment_invariants(&points), moment_invariants(&rotate(&points)));
    }

    #[test]
    fn single_point_is_all_zero() {
        assert_eq!(moment_invariants(&[[4.0, -2.0, 9.0]]), [0.0; 4]);
        assert_eq!(moment_invariants(&[]), [0.0; 4]);
    }

    #[test]
    fn collinear_points_have_rank_one_moments() {
        let points = [[-1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let [trace, minors, det, skew] = moment_invariants(&points);
        assert_eq!(trace, 2.0);
        assert_eq!(minors, 0.0);
        assert_eq!(det, 0.0);
        assert_eq!(skew, 0.0);
    }

    #[test]
    fn asymmetric_points_have_third_moment() {
        let points = [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [3.0, 0.0, 0.0]];
        // d = -1, -1, 2 along x: T_xxx = -1 - 1 + 8 = 6
        let [trace, _, _, skew] = moment_invariants(&points);
        assert_eq!(trace, 6.0);
        assert_eq!(skew, 36.0);
    }

    #[test]
    fn values_are_non_negative() {
        let m = moment_invariants(&helix(40));
        assert!(m.iter().all(|v| *v >= 0.0));
        assert!(m[2] > 0.0);
    }
}
