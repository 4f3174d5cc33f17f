// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Knot queries, Boehm knot insertion and Bézier extraction.
//!
//! All insertion works on the stored projective control points, so it is exact
//! for rational objects as well: the represented geometry never changes.

use crate::object::SplineObject;

impl SplineObject {
    /// Number of times `t` occurs in the knot vector of `direction`.
    pub fn multiplicity(&self, direction: usize, t: f64) -> usize {
        self.knots(direction).iter().filter(|&&k| k == t).count()
    }

    /// Distinct knot values inside the closed domain of `direction`, ascending.
    ///
    /// Both domain ends are included.
    pub fn breakpoints(&self, direction: usize) -> Vec<f64> {
        let (start, end) = self.domain(direction);
        let mut out: Vec<f64> = Vec::new();
        for &k in self.knots(direction) {
            if k >= start && k <= end && out.last() != Some(&k) {
                out.push(k);
            }
        }
        out
    }

    /// Insert the knot `t` once in `direction`.
    ///
    /// One control point is added in that direction. A value that already has
    /// multiplicity `order` is left alone.
    ///
    /// # Panics
    ///
    /// Panics if `t` lies outside the domain of `direction`.
    pub fn insert_knot(&mut self, direction: usize, t: f64) {
        let (start, end) = self.domain(direction);
        assert!(
            t >= start && t <= end,
            "knot {t} lies outside the domain [{start}, {end}]"
        );
        let degree = self.order(direction) - 1;
        let mult = self.multiplicity(direction, t);
        if mult > degree {
            return;
        }
        let count = self.shape()[direction];
        let width = self.width();
        let knots = self.knots(direction).to_vec();

        // Right-hand span everywhere except the closed end, where the left-hand
        // span keeps every referenced control point in range.
        let (span, mult) = if t < end {
            let span = knots.iter().rposition(|&k| k <= t).unwrap_or(degree);
            (span, mult)
        } else {
            (knots.iter().rposition(|&k| k < t).unwrap_or(degree), 0)
        };

        self.remap_direction(direction, count + 1, |src, dst| {
            for i in 0..=count {
                let out = &mut dst[i * width..(i + 1) * width];
                if i + degree <= span {
                    out.copy_from_slice(&src[i * width..(i + 1) * width]);
                } else if i + mult > span {
                    out.copy_from_slice(&src[(i - 1) * width..i * width]);
                } else {
                    let alpha = (t - knots[i]) / (knots[i + degree] - knots[i]);
                    let cur = &src[i * width..(i + 1) * width];
                    let prev = &src[(i - 1) * width..i * width];
                    for ((o, &c), &p) in out.iter_mut().zip(cur).zip(prev) {
                        *o = alpha * c + (1.0 - alpha) * p;
                    }
                }
            }
        });
        self.knots_mut(direction).insert(span + 1, t);
    }

    /// Decompose the object into Bézier pieces in place.
    ///
    /// Every breakpoint of every direction is raised to multiplicity `order`,
    /// unclamped ends are clamped, and the control points that fall outside
    /// the domain are dropped. Afterwards direction `d` holds
    /// `elements(d) × order(d)` control points, one block per Bézier element.
    pub fn bezier_extract(&mut self) {
        for direction in 0..self.pardim() {
            let order = self.order(direction);
            for t in self.breakpoints(direction) {
                while self.multiplicity(direction, t) < order {
                    self.insert_knot(direction, t);
                }
            }

            let (start, end) = self.domain(direction);
            let knots = self.knots(direction);
            let lead = knots
                .iter()
                .rposition(|&k| k == start)
                .map_or(0, |last| last + 1 - order);
            let trail = knots
                .iter()
                .position(|&k| k == end)
                .map_or(0, |first| knots.len() - first - order);
            if lead > 0 || trail > 0 {
                log::trace!("clamping direction {direction}: dropping {lead} + {trail} points");
                self.trim_direction(direction, lead, trail);
            }
        }
    }

    fn trim_direction(&mut self, direction: usize, lead: usize, trail: usize) {
        let width = self.width();
        let count = self.shape()[direction] - lead - trail;
        self.remap_direction(direction, count, |src, dst| {
            dst.copy_from_slice(&src[lead * width..(lead + count) * width]);
        });
        let knots = self.knots_mut(direction);
        knots.truncate(knots.len() - trail);
        knots.drain(..lead);
    }
}

#[cfg(test)]
mod tests {
    use crate::SplineObject;
    use approx::assert_abs_diff_eq;

    fn cubic_curve() -> SplineObject {
        // Uniform-ish clamped cubic with two interior knots.
        SplineObject::new(
            vec![4],
            vec![vec![0.0, 0.0, 0.0, 0.0, 1.0, 2.5, 4.0, 4.0, 4.0, 4.0]],
            2,
            false,
            vec![
                0.0, 0.0, 1.0, 2.0, 2.0, -1.0, 3.0, 0.5, 4.0, 3.0, 5.0, 1.0,
            ],
        )
        .unwrap()
    }

    pub(crate) fn assert_same_geometry(a: &SplineObject, b: &SplineObject) {
        let pardim = a.pardim();
        let steps: u32 = 12;
        let total = (steps + 1).pow(u32::try_from(pardim).unwrap());
        for k in 0..total {
            let mut rest = k;
            let params: Vec<f64> = (0..pardim)
                .map(|d| {
                    let (s, e) = a.domain(d);
                    let i = rest % (steps + 1);
                    rest /= steps + 1;
                    s + (e - s) * f64::from(i) / f64::from(steps)
                })
                .collect();
            let pa = a.evaluate(&params);
            let pb = b.evaluate(&params);
            for (x, y) in pa.iter().zip(&pb) {
                assert_abs_diff_eq!(x, y, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn breakpoints_and_multiplicity() {
        let c = cubic_curve();
        assert_eq!(c.breakpoints(0), vec![0.0, 1.0, 2.5, 4.0]);
        assert_eq!(c.multiplicity(0, 0.0), 4);
        assert_eq!(c.multiplicity(0, 2.5), 1);
        assert_eq!(c.multiplicity(0, 3.0), 0);
    }

    #[test]
    fn insertion_preserves_geometry() {
        let original = cubic_curve();
        let mut refined = original.clone();
        refined.insert_knot(0, 1.7);
        refined.insert_knot(0, 1.0);
        refined.insert_knot(0, 2.5);
        // Already at full multiplicity.
        refined.insert_knot(0, 4.0);
        assert_eq!(refined.shape(), &[9]);
        assert_eq!(refined.knots(0).len(), 13);
        assert_same_geometry(&original, &refined);
    }

    #[test]
    fn extraction_yields_order_sized_blocks() {
        let original = cubic_curve();
        let mut bez = original.clone();
        bez.bezier_extract();
        // Three elements of four points each.
        assert_eq!(bez.shape(), &[12]);
        assert_eq!(
            bez.knots(0),
            &[
                0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 2.5, 2.5, 2.5, 2.5, 4.0, 4.0, 4.0, 4.0
            ]
        );
        assert_same_geometry(&original, &bez);
    }

    #[test]
    fn extraction_clamps_unclamped_ends() {
        // Uniform quadratic, unclamped at both ends: domain [2, 5].
        let original = SplineObject::new(
            vec![3],
            vec![vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]],
            1,
            false,
            vec![0.0, 3.0, 1.0, 4.0, 2.0],
        )
        .unwrap();
        assert_eq!(original.domain(0), (2.0, 5.0));
        let mut bez = original.clone();
        bez.bezier_extract();
        assert_eq!(bez.domain(0), (2.0, 5.0));
        assert_eq!(bez.shape(), &[9]);
        assert_eq!(bez.knots(0).len(), 12);
        assert_eq!(bez.multiplicity(0, 2.0), 3);
        assert_eq!(bez.multiplicity(0, 5.0), 3);
        assert_same_geometry(&original, &bez);
    }

    #[test]
    fn extraction_of_rational_surface_is_exact() {
        let w = core::f64::consts::FRAC_1_SQRT_2;
        // Quarter cylinder: rational quadratic arc swept linearly in z,
        // with an extra interior knot in the sweep direction.
        let arc = [[1.0, 0.0, 1.0], [w, w, w], [0.0, 1.0, 1.0]];
        let mut cps = Vec::new();
        for z in [0.0, 1.0, 2.0] {
            for [x, y, wt] in arc {
                cps.extend_from_slice(&[x, y, z * wt, wt]);
            }
        }
        let original = SplineObject::new(
            vec![3, 2],
            vec![
                vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
                vec![0.0, 0.0, 0.5, 1.0, 1.0],
            ],
            3,
            true,
            cps,
        )
        .unwrap();
        let mut bez = original.clone();
        bez.bezier_extract();
        assert_eq!(bez.shape(), &[3, 4]);
        assert_same_geometry(&original, &bez);
    }
}
