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
use crate::format_blit::FormatBlit;
use crate::kernel::ResampleKernel;
use crate::kernel_table::{Normalization, RowKernelTable, COEF_PRECISION};
use crate::sample::{PlaneRead, PlaneWrite, RowRead, RowWrite};
use crate::support::{Axis, SampleFormat};
use crate::ResizeError;

/// Placement of one convolution pass.
///
/// Destination samples `[d0, d1)` of the resized axis are computed from source rows
/// addressed relative to `origin`, columns `[in_col, in_col + width)`, and stored from
/// `(out_row, out_col)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) struct PassWindow {
    pub(crate) d0: usize,
    pub(crate) d1: usize,
    pub(crate) origin: usize,
    pub(crate) in_col: usize,
    pub(crate) width: usize,
    pub(crate) out_row: usize,
    pub(crate) out_col: usize,
}

/// Resamples the vertical axis of a plane, each output row is a weighted sum of input rows.
///
/// Horizontal resampling is done by the same scaler on a transposed plane.
#[derive(Debug, Clone)]
pub(crate) struct Scaler {
    table: RowKernelTable,
    src_format: SampleFormat,
    dst_format: SampleFormat,
    integer: bool,
    shift: u32,
    add: f64,
    add_fixed: i64,
    copy_blit: Option<FormatBlit>,
}

impl Scaler {
    /// Creates a pass computing `dst = gain * Σ c_k * src_k + add`, values are in the
    /// unsigned domain of the respective formats.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        plan: &AxisPlan,
        kernel: &dyn ResampleKernel,
        normalization: Normalization,
        src_format: SampleFormat,
        dst_format: SampleFormat,
        gain: f64,
        add: f64,
        integer: bool,
        axis: Axis,
    ) -> Result<Scaler, ResizeError> {
        let integer = integer && !src_format.is_float() && !dst_format.is_float();
        if integer {
            let shift = (COEF_PRECISION + src_format.bits as i32 - dst_format.bits as i32) as u32;
            let depth_scale = 2f64.powi(src_format.bits as i32 - dst_format.bits as i32);
            let table = RowKernelTable::build(
                plan,
                kernel,
                gain * depth_scale,
                normalization,
                true,
                axis,
            )?;
            let copy_blit = if table.gain() == 1. && add == 0. {
                Some(FormatBlit::new(src_format, dst_format, gain, 0.))
            } else {
                None
            };
            Ok(Scaler {
                table,
                src_format,
                dst_format,
                integer,
                shift,
                add,
                add_fixed: (add * (1i64 << shift) as f64).round() as i64,
                copy_blit,
            })
        } else {
            let table = RowKernelTable::build(plan, kernel, gain, normalization, false, axis)?;
            let copy_blit = if gain == 1. && add == 0. {
                Some(FormatBlit::new(src_format, dst_format, 1., 0.))
            } else {
                None
            };
            Ok(Scaler {
                table,
                src_format,
                dst_format,
                integer,
                shift: 0,
                add,
                add_fixed: 0,
                copy_blit,
            })
        }
    }

    pub(crate) fn table(&self) -> &RowKernelTable {
        &self.table
    }

    /// Source rows `[begin, end)` read while computing destination rows `[y0, y1)`
    pub(crate) fn src_boundaries(&self, y0: usize, y1: usize) -> (usize, usize) {
        self.table.src_boundaries(y0, y1)
    }

    pub(crate) fn process<P: PlaneRead, W: PlaneWrite>(
        &self,
        src: &P,
        dst: &mut W,
        window: &PassWindow,
    ) {
        if self.integer {
            self.process_int(src, dst, window);
        } else {
            self.process_float(src, dst, window);
        }
    }

    /// Copies rows whose kernel is a single unit coefficient, returns false when the
    /// row must be convolved
    #[inline]
    fn try_copy_row<P: PlaneRead, W: RowWrite>(
        &self,
        src: &P,
        y: usize,
        dst_line: &mut W,
        window: &PassWindow,
    ) -> bool {
        let row = self.table.row(y);
        match self.copy_blit {
            Some(blit) if row.copy => {
                let src_line = src.row(row.start - window.origin).offset(window.in_col);
                blit.blit_row(&src_line, dst_line, window.width);
                true
            }
            _ => false,
        }
    }

    fn process_int<P: PlaneRead, W: PlaneWrite>(
        &self,
        src: &P,
        dst: &mut W,
        window: &PassWindow,
    ) {
        let shift = self.shift;
        let src_bias = self.src_format.bias() as i64;
        let dst_bias = self.dst_format.bias();
        let low = -dst_bias as i64;
        let high = (self.dst_format.max_value() - dst_bias) as i64;
        let base = self.add_fixed - ((dst_bias as i64) << shift) + (1i64 << (shift - 1));

        let mut acc = vec![0i64; window.width];

        for (i, y) in (window.d0..window.d1).enumerate() {
            let mut dst_line = dst.row_mut(window.out_row + i).offset(window.out_col);
            if self.try_copy_row(src, y, &mut dst_line, window) {
                continue;
            }
            let row = self.table.row(y);
            acc.fill(base + src_bias * row.int_sum as i64);
            for (k, &coef) in self.table.int_coefficients(row).iter().enumerate() {
                let src_line = src
                    .row(row.start + k - window.origin)
                    .offset(window.in_col);
                let coef = coef as i64;
                for (x, a) in acc.iter_mut().enumerate() {
                    *a += coef * src_line.read_int(x) as i64;
                }
            }
            for (x, &v) in acc.iter().enumerate() {
                dst_line.write_int(x, (v >> shift).clamp(low, high) as i32);
            }
        }
    }

    fn process_float<P: PlaneRead, W: PlaneWrite>(
        &self,
        src: &P,
        dst: &mut W,
        window: &PassWindow,
    ) {
        let to_float = self.dst_format.is_float();
        let dst_bias = self.dst_format.bias();
        let max_value = self.dst_format.max_value() as f64;

        let mut acc = vec![0f64; window.width];

        for (i, y) in (window.d0..window.d1).enumerate() {
            let mut dst_line = dst.row_mut(window.out_row + i).offset(window.out_col);
            if self.try_copy_row(src, y, &mut dst_line, window) {
                continue;
            }
            let row = self.table.row(y);
            acc.fill(self.add);
            for (k, &coef) in self.table.float_coefficients(row).iter().enumerate() {
                let src_line = src
                    .row(row.start + k - window.origin)
                    .offset(window.in_col);
                for (x, a) in acc.iter_mut().enumerate() {
                    *a += coef * src_line.read_float(x) as f64;
                }
            }
            if to_float {
                for (x, &v) in acc.iter().enumerate() {
                    dst_line.write_float(x, v as f32);
                }
            } else {
                for (x, &v) in acc.iter().enumerate() {
                    let v = v.round().clamp(0., max_value) as i32;
                    dst_line.write_int(x, v - dst_bias);
                }
            }
        }
    }
}
