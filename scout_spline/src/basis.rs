// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! B-spline basis function helpers.

/// Find the knot span index `k` with `knots[k] <= u < knots[k + 1]`.
///
/// `count` is the number of control points and `degree` the polynomial degree,
/// so the domain is `[knots[degree], knots[count]]`. The returned span always
/// has non-zero length, also at the closed end of the domain.
pub(crate) fn find_span(count: usize, degree: usize, u: f64, knots: &[f64]) -> usize {
    if u >= knots[count] {
        let mut span = count - 1;
        while span > degree && knots[span] >= knots[span + 1] {
            span -= 1;
        }
        return span;
    }
    if u <= knots[degree] {
        let mut span = degree;
        while span < count - 1 && knots[span] >= knots[span + 1] {
            span += 1;
        }
        return span;
    }

    let mut low = degree;
    let mut high = count;
    let mut mid = (low + high) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Evaluate the `degree + 1` non-vanishing basis functions on `span` at `u`.
///
/// The result holds `N[span - degree ..= span]` in order.
pub(crate) fn basis_funs(span: usize, u: f64, degree: usize, knots: &[f64]) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    n[0] = 1.0;
    for j in 1..=degree {
        left[j] = u - knots[span + 1 - j];
        right[j] = knots[span + j] - u;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const CUBIC: [f64; 10] = [0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0, 3.0, 3.0];

    #[test]
    fn span_lookup_interior_and_ends() {
        // 6 control points, degree 3.
        assert_eq!(find_span(6, 3, 0.0, &CUBIC), 3);
        assert_eq!(find_span(6, 3, 0.5, &CUBIC), 3);
        assert_eq!(find_span(6, 3, 1.0, &CUBIC), 4);
        assert_eq!(find_span(6, 3, 2.5, &CUBIC), 5);
        // The closed end maps onto the last non-empty span.
        assert_eq!(find_span(6, 3, 3.0, &CUBIC), 5);
    }

    #[test]
    fn span_lookup_skips_repeated_interior_knots_at_ends() {
        let knots = [0.0, 0.0, 1.0, 1.0, 2.0, 2.0];
        // Linear, 4 control points; knots[2] == knots[3] is an empty span.
        assert_eq!(find_span(4, 1, 1.0, &knots), 3);
        assert_eq!(find_span(4, 1, 2.0, &knots), 3);
    }

    #[test]
    fn basis_is_partition_of_unity() {
        for &u in &[0.0, 0.3, 1.0, 1.7, 2.2, 3.0] {
            let span = find_span(6, 3, u, &CUBIC);
            let n = basis_funs(span, u, 3, &CUBIC);
            assert_abs_diff_eq!(n.iter().sum::<f64>(), 1.0, epsilon = 1e-14);
            assert!(n.iter().all(|&v| v >= -1e-14), "basis must be non-negative");
        }
    }

    #[test]
    fn linear_basis_interpolates() {
        let knots = [0.0, 0.0, 1.0, 1.0];
        let n = basis_funs(1, 0.25, 1, &knots);
        assert_abs_diff_eq!(n[0], 0.75);
        assert_abs_diff_eq!(n[1], 0.25);
    }
}
