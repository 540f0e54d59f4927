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
use crate::sample::{PlaneRead, PlaneWrite, RowRead, RowWrite};
use crate::support::SampleFormat;
use crate::transpose::PlaneRegion;

#[derive(Debug, Copy, Clone, PartialEq)]
enum BlitMode {
    /// Same integer representation on both sides
    Copy,
    ShiftLeft(u32),
    /// Rounded right shift
    ShiftRight(u32),
    IntAffine,
    IntToFloat,
    FloatToInt,
    FloatAffine,
}

/// Element-wise conversion `dst = src * gain + add` between two sample formats.
///
/// Values are handled in the unsigned domain, storage bias is applied on read and write.
/// Integer results are rounded and saturated to the destination bit depth.
#[derive(Debug, Copy, Clone)]
pub(crate) struct FormatBlit {
    mode: BlitMode,
    gain: f64,
    add: f64,
    dst_max: i32,
}

/// Exponent of `value` when it is an exact power of two
fn power_of_two_exponent(value: f64) -> Option<i32> {
    if !value.is_finite() || value <= 0. {
        return None;
    }
    let exponent = value.log2().round() as i32;
    if (-16..=16).contains(&exponent) && 2f64.powi(exponent) == value {
        Some(exponent)
    } else {
        None
    }
}

impl FormatBlit {
    pub(crate) fn new(src: SampleFormat, dst: SampleFormat, gain: f64, add: f64) -> FormatBlit {
        let mode = match (src.is_float(), dst.is_float()) {
            (false, false) => {
                if src == dst && gain == 1. && add == 0. {
                    BlitMode::Copy
                } else if add == 0. {
                    match power_of_two_exponent(gain) {
                        Some(n) if n >= 0 => BlitMode::ShiftLeft(n as u32),
                        Some(n) => BlitMode::ShiftRight(n.unsigned_abs()),
                        None => BlitMode::IntAffine,
                    }
                } else {
                    BlitMode::IntAffine
                }
            }
            (false, true) => BlitMode::IntToFloat,
            (true, false) => BlitMode::FloatToInt,
            (true, true) => BlitMode::FloatAffine,
        };
        FormatBlit {
            mode,
            gain,
            add,
            dst_max: if dst.is_float() { 0 } else { dst.max_value() },
        }
    }

    /// Converts a single sample `src[sx]` into `dst[dx]`
    #[inline(always)]
    pub(crate) fn convert<R: RowRead, W: RowWrite>(
        &self,
        src: &R,
        sx: usize,
        dst: &mut W,
        dx: usize,
    ) {
        match self.mode {
            BlitMode::Copy => dst.write_int(dx, src.read_int(sx)),
            BlitMode::ShiftLeft(n) => {
                let v = ((src.read_int(sx) + R::INT_BIAS) << n).min(self.dst_max);
                dst.write_int(dx, v - W::INT_BIAS);
            }
            BlitMode::ShiftRight(n) => {
                let v = ((src.read_int(sx) + R::INT_BIAS + (1 << (n - 1))) >> n).min(self.dst_max);
                dst.write_int(dx, v - W::INT_BIAS);
            }
            BlitMode::IntAffine | BlitMode::FloatToInt => {
                let v = src.read_float(sx) as f64 * self.gain + self.add;
                let v = v.round().clamp(0., self.dst_max as f64) as i32;
                dst.write_int(dx, v - W::INT_BIAS);
            }
            BlitMode::IntToFloat | BlitMode::FloatAffine => {
                let v = src.read_float(sx) as f64 * self.gain + self.add;
                dst.write_float(dx, v as f32);
            }
        }
    }

    pub(crate) fn blit_row<R: RowRead, W: RowWrite>(&self, src: &R, dst: &mut W, width: usize) {
        match self.mode {
            BlitMode::Copy => {
                for x in 0..width {
                    dst.write_int(x, src.read_int(x));
                }
            }
            _ => {
                for x in 0..width {
                    self.convert(src, x, dst, x);
                }
            }
        }
    }

    pub(crate) fn blit_rect<P: PlaneRead, W: PlaneWrite>(
        &self,
        src: &P,
        dst: &mut W,
        region: &PlaneRegion,
    ) {
        for y in 0..region.rows {
            let src_line = src.row(region.in_row + y).offset(region.in_col);
            let mut dst_line = dst.row_mut(region.out_row + y).offset(region.out_col);
            self.blit_row(&src_line, &mut dst_line, region.cols);
        }
    }
}
