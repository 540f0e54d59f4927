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
use fir_resize::{
    AxisGeometry, FilterResize, LanczosKernel, PixelFormat, ResizeOptions, ResizePlane,
    ResizePlaneMut, SplineKernel, YuvRange,
};
use image::{GenericImageView, GrayImage, ImageBuffer, ImageReader, Luma};
use std::time::Instant;

fn main() {
    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "./assets/bench.jpg".to_string());
    let img = ImageReader::open(&input).unwrap().decode().unwrap();
    let dimensions = img.dimensions();
    let width = dimensions.0;
    let height = dimensions.1;
    let dst_width = args
        .next()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(width / 2 + 1);
    let dst_height = args
        .next()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(height / 3 + 1);

    let luma = img.to_luma8();
    let src = ResizePlane::new(luma.as_raw(), width, width, height);

    let kernel = LanczosKernel::new(3);
    let filter = FilterResize::new(
        AxisGeometry::new(width as usize, dst_width as usize),
        AxisGeometry::new(height as usize, dst_height as usize),
        &kernel,
        &kernel,
        PixelFormat::u8(YuvRange::Full),
        PixelFormat::u8(YuvRange::Full),
        ResizeOptions::default(),
    )
    .unwrap();
    println!(
        "Tile: {:?}, integer path: {}",
        filter.tile_size(),
        filter.uses_integer_path()
    );

    let mut dst = ResizePlaneMut::<u8>::alloc(dst_width, dst_height);
    let start_time = Instant::now();
    filter.process(&src, &mut dst).unwrap();
    println!("Lanczos3 u8 time: {:?}", start_time.elapsed());

    GrayImage::from_raw(dst_width, dst_height, dst.data.borrow().to_vec())
        .unwrap()
        .save("resized_u8.png")
        .unwrap();

    // Same plane widened to 16 bit studio range on the way
    let spline = SplineKernel::Spline36;
    let wide = FilterResize::new(
        AxisGeometry::new(width as usize, dst_width as usize),
        AxisGeometry::new(height as usize, dst_height as usize),
        &spline,
        &spline,
        PixelFormat::u8(YuvRange::Full),
        PixelFormat::u16(16, YuvRange::Limited),
        ResizeOptions::default(),
    )
    .unwrap();
    let mut dst16 = ResizePlaneMut::<u16>::alloc(dst_width, dst_height);
    let start_time = Instant::now();
    wide.process(&src, &mut dst16).unwrap();
    println!("Spline36 u8 -> u16 time: {:?}", start_time.elapsed());

    let image16: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(dst_width, dst_height, dst16.data.borrow().to_vec()).unwrap();
    image16.save("resized_u16.png").unwrap();
}
