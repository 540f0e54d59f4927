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
#![forbid(unsafe_code)]
mod axis_plan;
mod filter_resize;
mod format_blit;
mod images;
mod kernel;
mod kernel_table;
mod resize_error;
mod roadmap;
mod sample;
mod scaler;
mod support;
mod transpose;

pub use support::get_yuv_range;
pub use support::Axis;
pub use support::NumericKind;
pub use support::PixelFormat;
pub use support::SampleEncoding;
pub use support::YuvChromaRange;
pub use support::YuvRange;

pub use resize_error::MismatchedSize;
pub use resize_error::ResizeError;

pub use images::BufferStoreMut;
pub use images::ResizePlane;
pub use images::ResizePlaneMut;
pub use sample::ResizeSample;

pub use kernel::BicubicKernel;
pub use kernel::BilinearKernel;
pub use kernel::BoxKernel;
pub use kernel::GaussianKernel;
pub use kernel::LanczosKernel;
pub use kernel::PointKernel;
pub use kernel::ResampleKernel;
pub use kernel::SplineKernel;

pub use axis_plan::AxisGeometry;
pub use axis_plan::AxisPlan;
pub use kernel_table::Normalization;
pub use kernel_table::RowKernel;
pub use kernel_table::RowKernelTable;

pub use filter_resize::ComputePath;
pub use filter_resize::FilterResize;
pub use filter_resize::ResizeOptions;
