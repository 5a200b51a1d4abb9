use nalgebra::{Matrix3, SymmetricEigen, Vector3};

/// Projects a 3D trace onto its two principal axes, centred on the origin.
///
/// The first output axis carries the largest spread. Axis signs are fixed so
/// that each axis' largest component is positive, which keeps repeated
/// renderings of the same structure identical.
pub fn best_projection(coords: &[[f64; 3]]) -> Vec<[f64; 2]> {
    if coords.is_empty() {
        return Vec::new();
    }

    let n = coords.len() as f64;
    let centroid = coords
        .iter()
        .fold(Vector3::zeros(), |acc, c| acc + Vector3::new(c[0], c[1], c[2]))
        / n;

    let centred: Vec<Vector3<f64>> = coords
        .iter()
        .map(|c| Vector3::new(c[0], c[1], c[2]) - centroid)
        .collect();
    let covariance = centred
        .iter()
        .fold(Matrix3::zeros(), |acc, d| acc + d * d.transpose());

    let eigen = SymmetricEigen::new(covariance);

    // Sort eigenvalues (nalgebra does not guarantee order)
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

    let axis = |k: usize| -> Vector3<f64> {
        let v: Vector3<f64> = eigen.eigenvectors.column(order[k]).into_owned();
        let dominant = v.iter().copied().fold(0.0f64, |m, x| if x.abs() > m.abs() { x } else { m });
        if dominant < 0.0 { -v } else { v }
    };
    let (first, second) = (axis(0), axis(1));

    centred.iter().map(|d| [d.dot(&first), d.dot(&second)]).collect()
}

/// Per-residue stroke opacity from confidence scores on a 0-100 scale.
pub fn confidence_opacities(confidences: &[f64]) -> Vec<f64> {
    confidences.iter().map(|c| (c / 100.0).clamp(0.0, 1.0)).collect()
}
