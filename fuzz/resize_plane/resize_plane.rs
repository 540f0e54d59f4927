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
#![no_main]

use fir_resize::{
    AxisGeometry, BicubicKernel, BilinearKernel, BoxKernel, FilterResize, LanczosKernel,
    PixelFormat, PointKernel, ResampleKernel, ResizeOptions, ResizePlane, ResizePlaneMut,
    SplineKernel, YuvRange,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (u8, u8, u8, u8, u8, u8)| {
    fuzz_resize(data.0, data.1, data.2, data.3, data.4, data.5);
});

fn fuzz_resize(
    i_width: u8,
    i_height: u8,
    o_width: u8,
    o_height: u8,
    kernel: u8,
    budget: u8,
) {
    if i_width == 0 || i_height == 0 || o_width == 0 || o_height == 0 {
        return;
    }
    let bicubic = BicubicKernel::default();
    let lanczos = LanczosKernel::new(3);
    let kernel: &dyn ResampleKernel = match kernel % 6 {
        0 => &PointKernel,
        1 => &BoxKernel,
        2 => &BilinearKernel,
        3 => &bicubic,
        4 => &lanczos,
        _ => &SplineKernel::Spline36,
    };

    let src = vec![127u8; i_width as usize * i_height as usize];
    let src_plane = ResizePlane::new(&src, i_width as u32, i_width as u32, i_height as u32);

    let filter = FilterResize::new(
        AxisGeometry::new(i_width as usize, o_width as usize),
        AxisGeometry::new(i_height as usize, o_height as usize),
        kernel,
        kernel,
        PixelFormat::u8(YuvRange::Full),
        PixelFormat::u8(YuvRange::Full),
        ResizeOptions::default().with_buffer_budget(budget as usize * 16 + 1),
    )
    .unwrap();

    let mut dst = ResizePlaneMut::<u8>::alloc(o_width as u32, o_height as u32);
    filter.process(&src_plane, &mut dst).unwrap();
}
