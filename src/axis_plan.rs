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
use crate::kernel::ResampleKernel;
use crate::support::Axis;
use crate::ResizeError;

/// Support used for kernels without footprint, makes every row a single tap
const NEAREST_SUPPORT: f64 = 1e-6;

/// Maximum number of taps per destination sample
pub(crate) const MAX_FIR_LEN: usize = 1 << 16;

/// Geometry of one axis: which part of the source maps onto the destination and how
/// the kernel footprint is scaled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisGeometry {
    pub src_extent: usize,
    pub dst_extent: usize,
    /// Start of the source window, may be fractional
    pub win_offset: f64,
    /// Size of the source window, may be fractional
    pub win_extent: f64,
    /// Values below 1 widen the kernel footprint (blur), above 1 narrow it (sharpen)
    pub kernel_scale: f64,
    /// Position of the sample center inside a source pixel
    pub center_src: f64,
    /// Position of the sample center inside a destination pixel
    pub center_dst: f64,
    /// Applies kernel scale as is, even when downscaling, and always resamples this axis
    pub force_scale: bool,
}

impl AxisGeometry {
    /// Full window, centered samples, unscaled kernel
    pub fn new(src_extent: usize, dst_extent: usize) -> AxisGeometry {
        AxisGeometry {
            src_extent,
            dst_extent,
            win_offset: 0.,
            win_extent: src_extent as f64,
            kernel_scale: 1.,
            center_src: 0.5,
            center_dst: 0.5,
            force_scale: false,
        }
    }

    pub fn with_window(self, offset: f64, extent: f64) -> AxisGeometry {
        AxisGeometry {
            win_offset: offset,
            win_extent: extent,
            ..self
        }
    }

    pub fn with_kernel_scale(self, kernel_scale: f64) -> AxisGeometry {
        AxisGeometry {
            kernel_scale,
            ..self
        }
    }

    pub fn with_center(self, center_src: f64, center_dst: f64) -> AxisGeometry {
        AxisGeometry {
            center_src,
            center_dst,
            ..self
        }
    }

    pub fn with_forced_scale(self, force_scale: bool) -> AxisGeometry {
        AxisGeometry {
            force_scale,
            ..self
        }
    }

    pub(crate) fn validate(&self, axis: Axis) -> Result<(), ResizeError> {
        if self.src_extent == 0 || self.dst_extent == 0 {
            return Err(ResizeError::ZeroBaseSize);
        }
        if !self.kernel_scale.is_finite() || self.kernel_scale <= 0. {
            return Err(ResizeError::InvalidKernelScale(axis));
        }
        if !self.win_offset.is_finite()
            || !self.win_extent.is_finite()
            || self.win_extent <= 0.
            || self.win_offset >= self.src_extent as f64
            || self.win_offset + self.win_extent <= 0.
        {
            return Err(ResizeError::InvalidWindow(axis));
        }
        // Window may reach at most one source extent past either edge
        let src = self.src_extent as f64;
        if self.win_offset < -src || self.win_offset + self.win_extent > 2. * src {
            return Err(ResizeError::InvalidWindow(axis));
        }
        if !self.center_src.is_finite() || !self.center_dst.is_finite() {
            return Err(ResizeError::InvalidWindow(axis));
        }
        Ok(())
    }

    /// Integer crop offset when the axis is a plain copy of a source window
    pub(crate) fn crop_offset(&self) -> Option<usize> {
        let offset = self.win_offset;
        let is_integer = offset.fract() == 0. && self.win_extent.fract() == 0.;
        if !is_integer || offset < 0. {
            return None;
        }
        let offset = offset as usize;
        let fits = offset + self.dst_extent <= self.src_extent;
        if fits && self.win_extent as usize == self.dst_extent {
            Some(offset)
        } else {
            None
        }
    }

    /// Whether the axis needs a convolution pass or can be handled as a crop
    pub(crate) fn needs_resampling(&self) -> bool {
        self.crop_offset().is_none()
            || self.kernel_scale != 1.
            || self.force_scale
            || self.center_src != self.center_dst
    }

    /// Destination to source size ratio
    pub(crate) fn scale_factor(&self) -> f64 {
        self.dst_extent as f64 / self.win_extent
    }
}

/// Per-axis resampling arithmetic derived from [AxisGeometry] and the kernel support.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisPlan {
    /// Source pixels per destination pixel
    pub step: f64,
    /// Distance between kernel zero crossings in source pixels
    pub zc_size: f64,
    /// Kernel half width in source pixels
    pub support: f64,
    pub fir_len: usize,
    /// Source position of the center of destination pixel 0
    pub src_pos0: f64,
    pub src_extent: usize,
    pub dst_extent: usize,
    pub nearest: bool,
}

impl AxisPlan {
    pub fn new(
        geometry: &AxisGeometry,
        kernel: &dyn ResampleKernel,
        axis: Axis,
    ) -> Result<AxisPlan, ResizeError> {
        geometry.validate(axis)?;
        let step = geometry.win_extent / geometry.dst_extent as f64;
        let zc_size = if geometry.force_scale {
            1. / geometry.kernel_scale
        } else {
            step.max(1.) / geometry.kernel_scale
        };
        let kernel_support = kernel.support();
        let nearest = kernel_support <= 0. || kernel_support.is_nan();
        let support = if nearest {
            NEAREST_SUPPORT
        } else {
            kernel_support * zc_size
        };
        let span = (support * 2.).ceil();
        if !span.is_finite() || span > MAX_FIR_LEN as f64 {
            return Err(ResizeError::KernelTooLong(axis));
        }
        let fir_len = (span as usize).max(1);
        if geometry.dst_extent.checked_mul(fir_len).is_none() {
            return Err(ResizeError::KernelTooLong(axis));
        }
        let src_pos0 = geometry.win_offset + step * geometry.center_dst - geometry.center_src;
        Ok(AxisPlan {
            step,
            zc_size,
            support,
            fir_len,
            src_pos0,
            src_extent: geometry.src_extent,
            dst_extent: geometry.dst_extent,
            nearest,
        })
    }

    /// Source position mapped onto the center of destination sample `index`
    #[inline]
    pub fn src_center(&self, index: usize) -> f64 {
        self.src_pos0 + index as f64 * self.step
    }

    /// Approximate number of source samples read for the whole destination
    pub(crate) fn src_span(&self) -> usize {
        let last_src = self.src_extent as f64;
        let first = (self.src_center(0) - self.support).floor().clamp(0., last_src - 1.);
        let last = (self.src_center(self.dst_extent - 1) + self.support)
            .ceil()
            .clamp(1., last_src);
        ((last - first) as usize).max(1)
    }
}
