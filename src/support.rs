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
use crate::ResizeError;

/// Declares processing axis
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialOrd, PartialEq, Eq, Hash, Default)]
/// Declares integer sample range TV (limited) or Full
pub enum YuvRange {
    /// Limited range Y ∈ [16 << (depth - 8), 235 << (depth - 8)], UV ∈ [16 << (depth - 8), 240 << (depth - 8)]
    Limited,
    /// Full range Y ∈ [0, 2^bit_depth - 1], UV centered on 1 << (depth - 1)
    #[default]
    Full,
}

#[derive(Debug, Copy, Clone, PartialOrd, PartialEq)]
pub struct YuvChromaRange {
    pub bias_y: u32,
    pub bias_uv: u32,
    pub range_y: u32,
    pub range_uv: u32,
    pub range: YuvRange,
}

pub const fn get_yuv_range(depth: u32, range: YuvRange) -> YuvChromaRange {
    match range {
        YuvRange::Limited => YuvChromaRange {
            bias_y: 16 << (depth - 8),
            bias_uv: 1 << (depth - 1),
            range_y: 219 << (depth - 8),
            range_uv: 224 << (depth - 8),
            range,
        },
        YuvRange::Full => YuvChromaRange {
            bias_y: 0,
            bias_uv: 1 << (depth - 1),
            range_uv: (1 << depth) - 1,
            range_y: (1 << depth) - 1,
            range,
        },
    }
}

/// Numeric interpretation of a sample
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum NumericKind {
    Unsigned,
    /// 16 bit values stored with a `-32768` bias, used by integer scratch buffers
    Signed,
    Float,
}

/// Declares how samples are laid out in memory
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum SampleEncoding {
    U8,
    /// 9..16 bit samples stored in `u16`
    U16,
    /// Legacy 16 bit layout: plane of most significant bytes followed by plane of least significant bytes,
    /// both of `stride * height` bytes
    Stack16,
    F32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
/// Pixel format of a single plane
pub struct PixelFormat {
    pub encoding: SampleEncoding,
    pub bits: u32,
    /// Ignored for floating point planes
    pub range: YuvRange,
    /// Chroma planes are centered around zero (float) or `1 << (bits - 1)` (integers)
    pub chroma: bool,
}

impl PixelFormat {
    pub const fn u8(range: YuvRange) -> PixelFormat {
        PixelFormat {
            encoding: SampleEncoding::U8,
            bits: 8,
            range,
            chroma: false,
        }
    }

    pub const fn u16(bits: u32, range: YuvRange) -> PixelFormat {
        PixelFormat {
            encoding: SampleEncoding::U16,
            bits,
            range,
            chroma: false,
        }
    }

    pub const fn stack16(bits: u32, range: YuvRange) -> PixelFormat {
        PixelFormat {
            encoding: SampleEncoding::Stack16,
            bits,
            range,
            chroma: false,
        }
    }

    pub const fn f32() -> PixelFormat {
        PixelFormat {
            encoding: SampleEncoding::F32,
            bits: 32,
            range: YuvRange::Full,
            chroma: false,
        }
    }

    pub const fn with_chroma(self, chroma: bool) -> PixelFormat {
        PixelFormat { chroma, ..self }
    }

    pub const fn kind(&self) -> NumericKind {
        match self.encoding {
            SampleEncoding::U8 | SampleEncoding::U16 | SampleEncoding::Stack16 => {
                NumericKind::Unsigned
            }
            SampleEncoding::F32 => NumericKind::Float,
        }
    }

    pub const fn bytes_per_sample(&self) -> usize {
        match self.encoding {
            SampleEncoding::U8 => 1,
            SampleEncoding::U16 | SampleEncoding::Stack16 => 2,
            SampleEncoding::F32 => 4,
        }
    }

    pub const fn is_float(&self) -> bool {
        matches!(self.encoding, SampleEncoding::F32)
    }

    /// Number of stacked sub-planes a buffer of this format holds
    pub(crate) const fn planes(&self) -> usize {
        match self.encoding {
            SampleEncoding::Stack16 => 2,
            _ => 1,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ResizeError> {
        let valid = match self.encoding {
            SampleEncoding::U8 => self.bits == 8,
            SampleEncoding::U16 | SampleEncoding::Stack16 => (8..=16).contains(&self.bits),
            SampleEncoding::F32 => self.bits == 32,
        };
        if !valid {
            return Err(ResizeError::UnsupportedBitDepth(self.bits));
        }
        Ok(())
    }

    pub(crate) const fn sample_format(&self) -> SampleFormat {
        SampleFormat {
            kind: self.kind(),
            bits: self.bits,
        }
    }

    /// Values of the nominal black and white (or -0.5 and +0.5 for chroma) levels
    fn nominal_levels(&self) -> (f64, f64) {
        if self.is_float() {
            return if self.chroma { (-0.5, 0.5) } else { (0., 1.) };
        }
        let range = get_yuv_range(self.bits, self.range);
        if self.chroma {
            let half = range.range_uv as f64 * 0.5;
            let mid = range.bias_uv as f64;
            (mid - half, mid + half)
        } else {
            let black = range.bias_y as f64;
            (black, black + range.range_y as f64)
        }
    }
}

/// Storage format as seen by the convolution and blit kernels
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SampleFormat {
    pub(crate) kind: NumericKind,
    pub(crate) bits: u32,
}

impl SampleFormat {
    pub(crate) const SCRATCH_INT: SampleFormat = SampleFormat {
        kind: NumericKind::Signed,
        bits: 16,
    };

    pub(crate) const SCRATCH_FLOAT: SampleFormat = SampleFormat {
        kind: NumericKind::Float,
        bits: 32,
    };

    #[inline]
    pub(crate) const fn is_float(&self) -> bool {
        matches!(self.kind, NumericKind::Float)
    }

    /// Maximum storable value in unsigned domain
    #[inline]
    pub(crate) const fn max_value(&self) -> i32 {
        ((1i64 << self.bits) - 1) as i32
    }

    /// Offset between the unsigned value and its stored representation
    #[inline]
    pub(crate) const fn bias(&self) -> i32 {
        match self.kind {
            NumericKind::Signed => 1 << (self.bits - 1),
            _ => 0,
        }
    }
}

/// Affine transform `dst = src * gain + add` mapping source sample values onto destination values
/// for the configured ranges and bit depths.
pub(crate) fn range_conversion(src: &PixelFormat, dst: &PixelFormat) -> (f64, f64) {
    let (src_black, src_white) = src.nominal_levels();
    let (dst_black, dst_white) = dst.nominal_levels();
    let gain = (dst_white - dst_black) / (src_white - src_black);
    let add = dst_black - src_black * gain;
    (gain, add)
}
