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
use crate::support::Axis;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ResizeError {
    ZeroBaseSize,
    /// Window does not overlap the source plane, reaches too far past it, or has a non-finite/non-positive extent
    InvalidWindow(Axis),
    InvalidKernelScale(Axis),
    /// Kernel footprint exceeds the maximum number of taps per destination sample
    KernelTooLong(Axis),
    UnsupportedBitDepth(u32),
    /// Integer coefficient does not fit into 16 bits while integer processing was required
    CoefficientOverflow(Axis),
    /// Scratch buffers cannot hold even a single destination pixel tile
    TileSizing(usize),
    PointerOverflow,
    /// Element type of the plane is not compatible with the configured pixel format
    FormatMismatch,
    SourceDimensionsMismatch(MismatchedSize),
    DestinationDimensionsMismatch(MismatchedSize),
    SourcePlaneSizeMismatch(MismatchedSize),
    SourcePlaneMinimumSizeMismatch(MismatchedSize),
    DestinationSizeMismatch(MismatchedSize),
    MinimumDestinationSizeMismatch(MismatchedSize),
}

impl Display for ResizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ResizeError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            ResizeError::InvalidWindow(axis) => f.write_fmt(format_args!(
                "Source window on {:?} axis must overlap the source and have a positive extent",
                axis
            )),
            ResizeError::InvalidKernelScale(axis) => f.write_fmt(format_args!(
                "Kernel scale on {:?} axis must be finite and greater than zero",
                axis
            )),
            ResizeError::KernelTooLong(axis) => f.write_fmt(format_args!(
                "Kernel footprint on {:?} axis exceeds the supported number of taps",
                axis
            )),
            ResizeError::UnsupportedBitDepth(bits) => {
                f.write_fmt(format_args!("Bit depth {} is not supported", bits))
            }
            ResizeError::CoefficientOverflow(axis) => f.write_fmt(format_args!(
                "Too big kernel coefficient on {:?} axis for integer processing",
                axis
            )),
            ResizeError::TileSizing(budget) => f.write_fmt(format_args!(
                "Cannot fit a single tile into scratch buffers of {} samples",
                budget
            )),
            ResizeError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            ResizeError::FormatMismatch => {
                f.write_str("Plane element type does not match configured pixel format")
            }
            ResizeError::SourceDimensionsMismatch(size) => f.write_fmt(format_args!(
                "Source dimensions mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            ResizeError::DestinationDimensionsMismatch(size) => f.write_fmt(format_args!(
                "Destination dimensions mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            ResizeError::SourcePlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Source plane have invalid size, it must be {}, but it was {}",
                size.expected, size.received
            )),
            ResizeError::SourcePlaneMinimumSizeMismatch(size) => f.write_fmt(format_args!(
                "Source plane have invalid size, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            ResizeError::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            ResizeError::MinimumDestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination must have size at least {} but it is {}",
                size.expected, size.received
            )),
        }
    }
}

impl Error for ResizeError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<(), ResizeError> {
    let (_, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(ResizeError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<(), ResizeError> {
    let (product0, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(ResizeError::PointerOverflow);
    }
    let (_, overflow) = product0.overflowing_mul(v2);
    if overflow {
        return Err(ResizeError::PointerOverflow);
    }
    Ok(())
}

/// Checks a source plane made of `planes` stacked sub-planes of `stride * height` elements.
#[inline]
pub(crate) fn check_source_plane<V>(
    data: &[V],
    stride: u32,
    width: u32,
    height: u32,
    planes: usize,
) -> Result<(), ResizeError> {
    check_overflow_v3(stride as usize, height as usize, planes)?;
    if width == 0 || height == 0 {
        return Err(ResizeError::ZeroBaseSize);
    }
    if (stride as usize) < (width as usize) {
        return Err(ResizeError::SourcePlaneMinimumSizeMismatch(MismatchedSize {
            expected: width as usize * height as usize * planes,
            received: stride as usize * height as usize * planes,
        }));
    }
    if stride as usize * height as usize * planes != data.len() {
        return Err(ResizeError::SourcePlaneSizeMismatch(MismatchedSize {
            expected: stride as usize * height as usize * planes,
            received: data.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_destination_plane<V>(
    data: &[V],
    stride: u32,
    width: u32,
    height: u32,
    planes: usize,
) -> Result<(), ResizeError> {
    check_overflow_v3(stride as usize, height as usize, planes)?;
    if width == 0 || height == 0 {
        return Err(ResizeError::ZeroBaseSize);
    }
    if (stride as usize) < (width as usize) {
        return Err(ResizeError::MinimumDestinationSizeMismatch(MismatchedSize {
            expected: width as usize * height as usize * planes,
            received: stride as usize * height as usize * planes,
        }));
    }
    if stride as usize * height as usize * planes != data.len() {
        return Err(ResizeError::DestinationSizeMismatch(MismatchedSize {
            expected: stride as usize * height as usize * planes,
            received: data.len(),
        }));
    }
    Ok(())
}
