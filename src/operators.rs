//! Stateless discrete spatial operators.
//!
//! The Laplacian treats the grid as a torus (every edge wraps), while the
//! gradient clamps at the edges with one-sided differences (the np.gradient
//! convention, unit spacing). The mismatch is deliberate and load-bearing:
//! downstream consumers compare energy-flow output numerically, so neither
//! operator may adopt the other's boundary policy.

use ndarray::Array2;

/// Five-point Laplacian with toroidal wrap-around at every edge.
///
/// `lap[i][j] = (u[i-1][j] + u[i+1][j] + u[i][j-1] + u[i][j+1] - 4*u[i][j]) / (dx*dy)`
pub fn laplacian(u: &Array2<f64>, dx: f64, dy: f64) -> Array2<f64> {
    let (nx, ny) = u.dim();
    let mut out = Array2::zeros((nx, ny));
    let inv = 1.0 / (dx * dy);

    for i in 0..nx {
        let im = if i == 0 { nx - 1 } else { i - 1 };
        let ip = if i + 1 == nx { 0 } else { i + 1 };
        for j in 0..ny {
            let jm = if j == 0 { ny - 1 } else { j - 1 };
            let jp = if j + 1 == ny { 0 } else { j + 1 };
            out[[i, j]] =
                (u[[im, j]] + u[[ip, j]] + u[[i, jm]] + u[[i, jp]] - 4.0 * u[[i, j]]) * inv;
        }
    }
    out
}

/// Gradient along axis 0 (rows), unit spacing.
///
/// Centered differences in the interior, one-sided at the first and last
/// rows. Grids with fewer than two rows have no defined difference and
/// gradient zero.
pub fn gradient_axis0(u: &Array2<f64>) -> Array2<f64> {
    let (nx, ny) = u.dim();
    let mut out = Array2::zeros((nx, ny));
    if nx < 2 {
        return out;
    }

    for j in 0..ny {
        out[[0, j]] = u[[1, j]] - u[[0, j]];
        out[[nx - 1, j]] = u[[nx - 1, j]] - u[[nx - 2, j]];
    }
    for i in 1..nx - 1 {
        for j in 0..ny {
            out[[i, j]] = (u[[i + 1, j]] - u[[i - 1, j]]) / 2.0;
        }
    }
    out
}

/// Gradient along axis 1 (columns), unit spacing. Same edge convention as
/// [`gradient_axis0`].
pub fn gradient_axis1(u: &Array2<f64>) -> Array2<f64> {
    let (nx, ny) = u.dim();
    let mut out = Array2::zeros((nx, ny));
    if ny < 2 {
        return out;
    }

    for i in 0..nx {
        out[[i, 0]] = u[[i, 1]] - u[[i, 0]];
        out[[i, ny - 1]] = u[[i, ny - 1]] - u[[i, ny - 2]];
        for j in 1..ny - 1 {
            out[[i, j]] = (u[[i, j + 1]] - u[[i, j - 1]]) / 2.0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laplacian_of_central_impulse() {
        let mut u = Array2::zeros((4, 4));
        u[[2, 2]] = 2.0;
        let lap = laplacian(&u, 1.0, 1.0);

        assert_eq!(lap[[2, 2]], -8.0);
        for &(i, j) in &[(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert_eq!(lap[[i, j]], 2.0);
        }
        // Cells not adjacent to the impulse are untouched
        assert_eq!(lap[[0, 0]], 0.0);
        assert_eq!(lap[[0, 2]], 0.0);
    }

    #[test]
    fn laplacian_wraps_at_edges() {
        // Impulse in a corner: its four neighbors live on opposite edges
        let mut u = Array2::zeros((4, 4));
        u[[0, 0]] = 1.0;
        let lap = laplacian(&u, 1.0, 1.0);

        assert_eq!(lap[[0, 0]], -4.0);
        assert_eq!(lap[[3, 0]], 1.0);
        assert_eq!(lap[[1, 0]], 1.0);
        assert_eq!(lap[[0, 3]], 1.0);
        assert_eq!(lap[[0, 1]], 1.0);
    }

    #[test]
    fn laplacian_sums_to_zero_on_torus() {
        // Each cell contributes +4 to its neighbors and -4 to itself
        let mut u = Array2::zeros((6, 6));
        u[[1, 4]] = 3.0;
        u[[5, 0]] = -1.5;
        u[[2, 2]] = 0.25;
        let total = laplacian(&u, 1.0, 1.0).sum();
        assert!(total.abs() < 1e-12, "torus Laplacian should sum to zero, got {}", total);
    }

    #[test]
    fn laplacian_spacing_scales_output() {
        let mut u = Array2::zeros((4, 4));
        u[[2, 2]] = 2.0;
        let lap = laplacian(&u, 2.0, 2.0);
        assert_eq!(lap[[2, 2]], -2.0);
    }

    #[test]
    fn gradient_of_linear_ramp() {
        // u[i][j] = i: interior slope 1 everywhere, one-sided edges also 1
        let u = Array2::from_shape_fn((5, 3), |(i, _)| i as f64);
        let g0 = gradient_axis0(&u);
        for v in g0.iter() {
            assert_eq!(*v, 1.0);
        }
        // No variation along axis 1
        let g1 = gradient_axis1(&u);
        for v in g1.iter() {
            assert_eq!(*v, 0.0);
        }
    }

    #[test]
    fn gradient_edge_convention_is_one_sided() {
        // u = [0, 1, 4, 9] along a row: edges use adjacent difference,
        // interior uses the centered half-difference
        let u = Array2::from_shape_fn((1, 4), |(_, j)| (j * j) as f64);
        let g = gradient_axis1(&u);
        assert_eq!(g[[0, 0]], 1.0); // 1 - 0
        assert_eq!(g[[0, 1]], 2.0); // (4 - 0) / 2
        assert_eq!(g[[0, 2]], 4.0); // (9 - 1) / 2
        assert_eq!(g[[0, 3]], 5.0); // 9 - 4
    }

    #[test]
    fn gradient_does_not_wrap() {
        // A corner impulse must not leak to the opposite edge
        let mut u = Array2::zeros((4, 4));
        u[[0, 0]] = 1.0;
        let g = gradient_axis0(&u);
        assert_eq!(g[[3, 0]], 0.0);
        assert_eq!(g[[0, 0]], -1.0);
        assert_eq!(g[[1, 0]], -0.5);
    }
}
