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

use arbitrary::Arbitrary;
use fir_resize::{
    AxisGeometry, ComputePath, FilterResize, LanczosKernel, PixelFormat, ResizeOptions,
    ResizePlane, ResizePlaneMut, YuvRange,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    src_width: u8,
    src_height: u8,
    dst_width: u8,
    dst_height: u8,
    bit_depth: u8,
    limited: bool,
    float_path: bool,
    window_offset: i8,
}

fuzz_target!(|input: Input| {
    fuzz_formats(input);
});

fn fuzz_formats(input: Input) {
    if input.src_width == 0
        || input.src_height == 0
        || input.dst_width == 0
        || input.dst_height == 0
    {
        return;
    }
    let range = if input.limited {
        YuvRange::Limited
    } else {
        YuvRange::Full
    };
    let bit_depth = 9 + (input.bit_depth % 8) as u32;
    let compute = if input.float_path {
        ComputePath::Float
    } else {
        ComputePath::Auto
    };
    let (src_width, src_height) = (input.src_width as usize, input.src_height as usize);
    let (dst_width, dst_height) = (input.dst_width as usize, input.dst_height as usize);
    let kernel = LanczosKernel::new(3);

    let h = AxisGeometry::new(src_width, dst_width)
        .with_window(input.window_offset as f64 * 0.25, src_width as f64);
    let v = AxisGeometry::new(src_height, dst_height);

    let Ok(filter) = FilterResize::new(
        h,
        v,
        &kernel,
        &kernel,
        PixelFormat::u16(bit_depth, range),
        PixelFormat::stack16(16, range),
        ResizeOptions::default().with_compute(compute),
    ) else {
        return;
    };

    let src = vec![(1u16 << (bit_depth - 1)) + 3; src_width * src_height];
    let src_plane = ResizePlane::new(&src, src_width as u32, src_width as u32, src_height as u32);
    let mut dst = ResizePlaneMut::alloc_stack16(dst_width as u32, dst_height as u32);
    filter.process(&src_plane, &mut dst).unwrap();

    let Ok(back) = FilterResize::new(
        AxisGeometry::new(dst_width, src_width),
        AxisGeometry::new(dst_height, src_height),
        &kernel,
        &kernel,
        PixelFormat::stack16(16, range),
        PixelFormat::f32(),
        ResizeOptions::default(),
    ) else {
        return;
    };
    let mut restored = ResizePlaneMut::<f32>::alloc(src_width as u32, src_height as u32);
    back.process(&dst.to_fixed(), &mut restored).unwrap();
}
