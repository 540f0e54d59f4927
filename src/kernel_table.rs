/*
 * Copyright (c) Radzivon Bartoshyk, 10/2026. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::axis_plan::AxisPlan;
use crate::kernel::ResampleKernel;
use crate::support::Axis;
use crate::ResizeError;

/// Fixed point precision of integer coefficients
pub(crate) const COEF_PRECISION: i32 = 12;
const COEF_SCALE: f64 = (1 << COEF_PRECISION) as f64;

/// Normalizing divisors below this magnitude are treated as a degenerate kernel
const DEGENERATE_SUM: f64 = 1e-9;
/// Coefficients below `TRIM_EPS * gain` are structurally zero
const TRIM_EPS: f64 = 1e-9;
const COPY_EPS: f64 = 1e-9;

/// How the coefficients of each destination sample are scaled
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Normalization {
    /// Coefficients sum to the gain
    #[default]
    Auto,
    /// Coefficients are divided by the given total instead of their sum
    Total(f64),
    /// Raw kernel values times gain
    None,
}

/// Kernel of one destination sample
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowKernel {
    /// First source sample, always inside the source
    pub start: usize,
    pub coef_offset: usize,
    pub size: usize,
    /// Single unit coefficient, the sample can be copied
    pub copy: bool,
    /// Sum of integer coefficients
    pub int_sum: i32,
}

/// Coefficients of every destination sample along one axis.
///
/// Built once per configuration, shared read only between all tiles.
#[derive(Debug, Clone)]
pub struct RowKernelTable {
    rows: Vec<RowKernel>,
    coef_flt: Vec<f64>,
    coef_int: Vec<i16>,
    fir_len: usize,
    gain: f64,
    integer: bool,
    overflow: bool,
}

#[derive(Default)]
struct RowScratch {
    taps: Vec<f64>,
    coefs: Vec<f64>,
    ints: Vec<i32>,
    order: Vec<usize>,
}

impl RowKernelTable {
    /// Builds coefficients, when `integer` is set the fixed point ones are computed as well.
    ///
    /// `gain` multiplies every coefficient, for integer tables it must already account
    /// for the bit depth difference between the two ends of the pass.
    pub fn build(
        plan: &AxisPlan,
        kernel: &dyn ResampleKernel,
        gain: f64,
        normalization: Normalization,
        integer: bool,
        axis: Axis,
    ) -> Result<RowKernelTable, ResizeError> {
        let fir_len = plan.fir_len;
        let mut table = RowKernelTable {
            rows: Vec::with_capacity(plan.dst_extent),
            coef_flt: Vec::with_capacity(plan.dst_extent * fir_len),
            coef_int: Vec::new(),
            fir_len,
            gain,
            integer,
            overflow: false,
        };
        if integer {
            table.coef_int.reserve(plan.dst_extent * fir_len);
        }

        let last_src = plan.src_extent as i64 - 1;
        let mut scratch = RowScratch::default();

        for y in 0..plan.dst_extent {
            let center = plan.src_center(y);
            let pos_beg = if plan.nearest {
                (center + 0.5).floor() as i64
            } else {
                (center + plan.support).floor() as i64 - fir_len as i64 + 1
            };

            scratch.taps.clear();
            if plan.nearest {
                scratch.taps.push(1.);
            } else {
                for k in 0..fir_len {
                    let x = ((pos_beg + k as i64) as f64 - center) / plan.zc_size;
                    scratch.taps.push(kernel.value(x));
                }
            }
            let mut raw_sum: f64 = scratch.taps.iter().sum();

            let amp = match normalization {
                Normalization::None => gain,
                Normalization::Auto | Normalization::Total(_) => {
                    // Signed divisor: a negative sum flips the row so it still sums to the gain
                    let divisor = match normalization {
                        Normalization::Total(total) if total != 0. => total,
                        _ => raw_sum,
                    };
                    if divisor.abs() >= DEGENERATE_SUM {
                        gain / divisor
                    } else {
                        raw_sum = make_single_tap(&mut scratch.taps);
                        gain
                    }
                }
            };

            // Edge replication: taps outside the source merge into the border coefficient
            let mut start = pos_beg.clamp(0, last_src) as usize;
            let mut last_pos = start;
            scratch.coefs.clear();
            for (k, &tap) in scratch.taps.iter().enumerate() {
                let pos = (pos_beg + k as i64).clamp(0, last_src) as usize;
                let coef = tap * amp;
                match scratch.coefs.last_mut() {
                    Some(last) if pos == last_pos => *last += coef,
                    _ => scratch.coefs.push(coef),
                }
                last_pos = pos;
            }

            let mut int_sum = 0i32;
            scratch.ints.clear();
            if integer {
                let target = (raw_sum * amp * COEF_SCALE).round();
                table.overflow |= quantize_row(&scratch.coefs, &mut scratch.ints);
                distribute_residual(
                    &scratch.coefs,
                    &mut scratch.ints,
                    &mut scratch.order,
                    target,
                )
                .map_err(|_| ResizeError::CoefficientOverflow(axis))?;
                int_sum = scratch.ints.iter().sum();
            }

            // Tightest window: drop structurally zero coefficients on both ends
            let trim_threshold = TRIM_EPS * gain.abs().max(1e-9);
            let is_zero = |i: usize, coefs: &[f64], ints: &[i32]| {
                coefs[i].abs() < trim_threshold && (ints.is_empty() || ints[i] == 0)
            };
            let mut first = 0usize;
            let mut end = scratch.coefs.len();
            while end - first > 1 && is_zero(first, &scratch.coefs, &scratch.ints) {
                first += 1;
            }
            while end - first > 1 && is_zero(end - 1, &scratch.coefs, &scratch.ints) {
                end -= 1;
            }
            start += first;
            let size = end - first;

            let coef_offset = table.coef_flt.len();
            table
                .coef_flt
                .extend_from_slice(&scratch.coefs[first..end]);
            if integer {
                table.coef_int.extend(
                    scratch.ints[first..end]
                        .iter()
                        .map(|&v| v.clamp(i16::MIN as i32, i16::MAX as i32) as i16),
                );
            }

            let copy = size == 1 && {
                let single = scratch.coefs[first];
                let float_unit = (single - gain).abs() <= COPY_EPS * gain.abs().max(1.);
                let int_unit = !integer || scratch.ints[first] == (gain * COEF_SCALE).round() as i32;
                float_unit && int_unit
            };

            table.rows.push(RowKernel {
                start,
                coef_offset,
                size,
                copy,
                int_sum,
            });
        }

        Ok(table)
    }

    #[inline]
    pub fn rows(&self) -> &[RowKernel] {
        &self.rows
    }

    #[inline]
    pub fn row(&self, index: usize) -> &RowKernel {
        &self.rows[index]
    }

    #[inline]
    pub fn fir_len(&self) -> usize {
        self.fir_len
    }

    #[inline]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn is_integer(&self) -> bool {
        self.integer
    }

    /// Some fixed point coefficient did not fit into 16 bits and was saturated
    pub fn has_overflow(&self) -> bool {
        self.overflow
    }

    #[inline]
    pub fn float_coefficients(&self, row: &RowKernel) -> &[f64] {
        &self.coef_flt[row.coef_offset..row.coef_offset + row.size]
    }

    /// Fixed point coefficients, empty for floating point tables
    #[inline]
    pub fn int_coefficients(&self, row: &RowKernel) -> &[i16] {
        if self.coef_int.is_empty() {
            return &[];
        }
        &self.coef_int[row.coef_offset..row.coef_offset + row.size]
    }

    /// Source range `[begin, end)` read by destination samples `[y0, y1)`
    pub fn src_boundaries(&self, y0: usize, y1: usize) -> (usize, usize) {
        let mut begin = usize::MAX;
        let mut end = 0usize;
        for row in &self.rows[y0..y1] {
            begin = begin.min(row.start);
            end = end.max(row.start + row.size);
        }
        (begin, end)
    }
}

/// Keeps only the largest tap as a unit tap with its sign, returns the new sum
fn make_single_tap(taps: &mut [f64]) -> f64 {
    let mut best = 0usize;
    for (i, tap) in taps.iter().enumerate() {
        if tap.abs() > taps[best].abs() {
            best = i;
        }
    }
    let unit = if taps[best] < 0. { -1. } else { 1. };
    taps.iter_mut().for_each(|x| *x = 0.);
    taps[best] = unit;
    unit
}

/// Rounds coefficients into 16 bit fixed point, returns true on saturation
fn quantize_row(coefs: &[f64], ints: &mut Vec<i32>) -> bool {
    let mut saturated = false;
    ints.extend(coefs.iter().map(|&c| {
        let v = (c * COEF_SCALE).round();
        if v > i16::MAX as f64 || v < i16::MIN as f64 {
            saturated = true;
        }
        v.clamp(i16::MIN as f64, i16::MAX as f64) as i32
    }));
    saturated
}

/// Forces integer coefficients to sum to `target` by adding or removing units,
/// largest float coefficients first.
fn distribute_residual(
    coefs: &[f64],
    ints: &mut [i32],
    order: &mut Vec<usize>,
    target: f64,
) -> Result<(), ()> {
    let sum: i64 = ints.iter().map(|&x| x as i64).sum();
    let mut residual = target as i64 - sum;
    if residual == 0 {
        return Ok(());
    }
    order.clear();
    order.extend(0..coefs.len());
    order.sort_by(|&a, &b| coefs[b].abs().total_cmp(&coefs[a].abs()));

    let unit = residual.signum() as i32;
    while residual != 0 {
        let mut progressed = false;
        for &i in order.iter() {
            if residual == 0 {
                break;
            }
            let v = ints[i] + unit;
            if v >= i16::MIN as i32 && v <= i16::MAX as i32 {
                ints[i] = v;
                residual -= unit as i64;
                progressed = true;
            }
        }
        if !progressed {
            return Err(());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis_plan::AxisGeometry;
    use crate::kernel::{
        BilinearKernel, BoxKernel, GaussianKernel, LanczosKernel, PointKernel, SplineKernel,
    };

    fn make_table(
        geometry: AxisGeometry,
        kernel: &dyn ResampleKernel,
        gain: f64,
        integer: bool,
    ) -> RowKernelTable {
        let plan = AxisPlan::new(&geometry, kernel, Axis::Horizontal).unwrap();
        RowKernelTable::build(
            &plan,
            kernel,
            gain,
            Normalization::Auto,
            integer,
            Axis::Horizontal,
        )
        .unwrap()
    }

    #[test]
    fn test_normalization_downscale() {
        let table = make_table(
            AxisGeometry::new(100, 50),
            &LanczosKernel::new(3),
            1.,
            true,
        );
        for row in table.rows() {
            let sum: f64 = table.float_coefficients(row).iter().sum();
            assert!((sum - 1.).abs() < 1e-6, "float sum {}", sum);
            let int_sum: i32 = table.int_coefficients(row).iter().map(|&x| x as i32).sum();
            assert_eq!(int_sum, 4096);
            assert_eq!(row.int_sum, 4096);
        }
    }

    #[test]
    fn test_normalization_with_gain() {
        let table = make_table(
            AxisGeometry::new(37, 91).with_window(1.25, 33.5),
            &SplineKernel::Spline36,
            257. / 256.,
            true,
        );
        let target = (257. / 256. * 4096f64).round() as i32;
        for row in table.rows() {
            let sum: f64 = table.float_coefficients(row).iter().sum();
            assert!((sum - 257. / 256.).abs() < 1e-6);
            assert_eq!(row.int_sum, target);
        }
    }

    #[test]
    fn test_boundaries_inside_source() {
        for (src, dst) in [(5usize, 17usize), (17, 5), (64, 64), (3, 1), (1, 9)] {
            let table = make_table(
                AxisGeometry::new(src, dst).with_kernel_scale(0.7),
                &LanczosKernel::new(4),
                1.,
                true,
            );
            for row in table.rows() {
                assert!(row.size >= 1);
                assert!(row.start + row.size <= src);
                assert!(row.size <= table.fir_len());
            }
        }
    }

    #[test]
    fn test_window_outside_source_replicates_edges() {
        let table = make_table(
            AxisGeometry::new(8, 8).with_window(-4., 8.),
            &BilinearKernel,
            1.,
            false,
        );
        let first = table.row(0);
        assert_eq!(first.start, 0);
        assert_eq!(first.size, 1);
        assert!(first.copy);
        let sum: f64 = table.float_coefficients(first).iter().sum();
        assert!((sum - 1.).abs() < 1e-12);
    }

    #[test]
    fn test_box_upscale_doubles() {
        let table = make_table(AxisGeometry::new(4, 8), &BoxKernel, 1., true);
        for (y, row) in table.rows().iter().enumerate() {
            assert_eq!(row.start, y / 2);
            assert_eq!(row.size, 1);
            assert!(row.copy);
            assert_eq!(table.int_coefficients(row), &[4096]);
        }
    }

    #[test]
    fn test_point_upscale_doubles() {
        let table = make_table(AxisGeometry::new(4, 8), &PointKernel, 1., true);
        for (y, row) in table.rows().iter().enumerate() {
            assert_eq!(row.start, y / 2);
            assert_eq!(row.size, 1);
            assert!(row.copy);
        }
    }

    #[test]
    fn test_point_picks_nearest_sample() {
        // Centers -0.1, 1.3, 2.7, 4.1
        let table = make_table(
            AxisGeometry::new(6, 4).with_window(-0.3, 5.6),
            &PointKernel,
            1.,
            false,
        );
        let starts: Vec<usize> = table.rows().iter().map(|row| row.start).collect();
        assert_eq!(starts, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_point_kernel_copy_rows() {
        let table = make_table(
            AxisGeometry::new(10, 10).with_forced_scale(true),
            &PointKernel,
            1.,
            true,
        );
        for (y, row) in table.rows().iter().enumerate() {
            assert_eq!(row.start, y);
            assert!(row.copy);
        }
    }

    #[test]
    fn test_trimmed_interpolating_identity() {
        let table = make_table(
            AxisGeometry::new(16, 16).with_forced_scale(true),
            &LanczosKernel::new(3),
            1.,
            false,
        );
        for (y, row) in table.rows().iter().enumerate() {
            assert_eq!(row.start, y);
            assert_eq!(row.size, 1);
            assert!(row.copy);
        }
    }

    #[test]
    fn test_degenerate_gaussian() {
        // Sharp gaussian sampled between pixels gives a near zero sum
        let kernel = GaussianKernel::new(100.);
        let geometry = AxisGeometry::new(8, 8)
            .with_forced_scale(true)
            .with_kernel_scale(4.)
            .with_window(0.5, 8.);
        let table = make_table(geometry, &kernel, 1., true);
        for row in table.rows() {
            let sum: f64 = table.float_coefficients(row).iter().sum();
            assert!((sum - 1.).abs() < 1e-6);
            assert_eq!(row.int_sum, 4096);
        }
    }

    struct InvertedBox;

    impl ResampleKernel for InvertedBox {
        fn support(&self) -> f64 {
            1.
        }

        fn value(&self, x: f64) -> f64 {
            if x.abs() < 1. {
                -1.
            } else {
                0.
            }
        }
    }

    #[test]
    fn test_negative_sum_normalizes_to_gain() {
        for gain in [1., 0.5] {
            let table = make_table(AxisGeometry::new(12, 5), &InvertedBox, gain, false);
            for row in table.rows() {
                let coefs = table.float_coefficients(row);
                let sum: f64 = coefs.iter().sum();
                assert!((sum - gain).abs() < 1e-12, "{} vs {}", sum, gain);
                assert!(coefs.iter().all(|&c| c >= 0.));
            }
        }
    }

    #[test]
    fn test_total_normalization() {
        let geometry = AxisGeometry::new(32, 16);
        let kernel = BilinearKernel;
        let plan = AxisPlan::new(&geometry, &kernel, Axis::Vertical).unwrap();
        let table = RowKernelTable::build(
            &plan,
            &kernel,
            1.,
            Normalization::Total(4.),
            false,
            Axis::Vertical,
        )
        .unwrap();
        let row = table.row(5);
        let sum: f64 = table.float_coefficients(row).iter().sum();
        // Raw bilinear sum over a 2x footprint is 2
        assert!((sum - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_coefficient_overflow_detected() {
        let geometry = AxisGeometry::new(16, 16).with_forced_scale(true);
        let kernel = BilinearKernel;
        let plan = AxisPlan::new(&geometry, &kernel, Axis::Vertical).unwrap();
        let table = RowKernelTable::build(
            &plan,
            &kernel,
            2.,
            Normalization::None,
            true,
            Axis::Vertical,
        );
        assert!(table.map(|t| !t.has_overflow()).unwrap_or(false));
        let overflowing = RowKernelTable::build(
            &plan,
            &kernel,
            16.,
            Normalization::Auto,
            true,
            Axis::Vertical,
        );
        assert!(matches!(
            overflowing,
            Err(ResizeError::CoefficientOverflow(Axis::Vertical))
        ) || overflowing.map(|t| t.has_overflow()).unwrap_or(false));
    }

    #[test]
    fn test_src_boundaries() {
        let table = make_table(AxisGeometry::new(100, 50), &LanczosKernel::new(3), 1., false);
        let (begin, end) = table.src_boundaries(10, 20);
        for row in &table.rows()[10..20] {
            assert!(row.start >= begin);
            assert!(row.start + row.size <= end);
        }
        let (begin, end) = table.src_boundaries(0, 50);
        assert_eq!(begin, 0);
        assert_eq!(end, 100);
    }

    #[test]
    fn test_residual_distribution_prefers_largest() {
        let coefs = [0.1, 0.5, 0.4];
        let mut ints = vec![409, 2048, 1638];
        let mut order = Vec::new();
        distribute_residual(&coefs, &mut ints, &mut order, 4096.).unwrap();
        assert_eq!(ints, vec![409, 2049, 1638]);
        let mut ints = vec![0, 0, 0];
        distribute_residual(&coefs, &mut ints, &mut order, 7.).unwrap();
        assert_eq!(ints, vec![2, 3, 2]);
    }
}
