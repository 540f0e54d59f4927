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
use criterion::{criterion_group, criterion_main, Criterion};
use fir_resize::{
    AxisGeometry, BilinearKernel, ComputePath, FilterResize, LanczosKernel, PixelFormat,
    ResampleKernel, ResizeOptions, ResizePlane, ResizePlaneMut, YuvRange,
};
use rand::Rng;

const WIDTH: usize = 1920;
const HEIGHT: usize = 1080;

fn make_filter(
    dst_width: usize,
    dst_height: usize,
    kernel: &dyn ResampleKernel,
    src_format: PixelFormat,
    dst_format: PixelFormat,
    compute: ComputePath,
) -> FilterResize {
    FilterResize::new(
        AxisGeometry::new(WIDTH, dst_width),
        AxisGeometry::new(HEIGHT, dst_height),
        kernel,
        kernel,
        src_format,
        dst_format,
        ResizeOptions::default().with_compute(compute),
    )
    .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::rng();
    let src_u8: Vec<u8> = (0..WIDTH * HEIGHT)
        .map(|_| rng.random_range(0..=255u8))
        .collect();
    let src_f32: Vec<f32> = src_u8.iter().map(|&v| v as f32 / 255.).collect();
    let plane_u8 = ResizePlane::new(&src_u8, WIDTH as u32, WIDTH as u32, HEIGHT as u32);
    let plane_f32 = ResizePlane::new(&src_f32, WIDTH as u32, WIDTH as u32, HEIGHT as u32);
    let u8_full = PixelFormat::u8(YuvRange::Full);

    let lanczos = LanczosKernel::new(3);

    c.bench_function("fir-resize: Lanczos3 u8 1920x1080 -> 1280x720 integer", |b| {
        let filter = make_filter(1280, 720, &lanczos, u8_full, u8_full, ComputePath::Auto);
        let mut dst = ResizePlaneMut::<u8>::alloc(1280, 720);
        b.iter(|| {
            filter.process(&plane_u8, &mut dst).unwrap();
        })
    });

    c.bench_function("fir-resize: Lanczos3 u8 1920x1080 -> 1280x720 float", |b| {
        let filter = make_filter(1280, 720, &lanczos, u8_full, u8_full, ComputePath::Float);
        let mut dst = ResizePlaneMut::<u8>::alloc(1280, 720);
        b.iter(|| {
            filter.process(&plane_u8, &mut dst).unwrap();
        })
    });

    c.bench_function("fir-resize: Bilinear u8 1920x1080 -> 3840x2160", |b| {
        let filter = make_filter(
            3840,
            2160,
            &BilinearKernel,
            u8_full,
            u8_full,
            ComputePath::Auto,
        );
        let mut dst = ResizePlaneMut::<u8>::alloc(3840, 2160);
        b.iter(|| {
            filter.process(&plane_u8, &mut dst).unwrap();
        })
    });

    c.bench_function("fir-resize: Lanczos3 u8 -> u16 10 bit 1920x1080 -> 960x540", |b| {
        let filter = make_filter(
            960,
            540,
            &lanczos,
            u8_full,
            PixelFormat::u16(10, YuvRange::Full),
            ComputePath::Auto,
        );
        let mut dst = ResizePlaneMut::<u16>::alloc(960, 540);
        b.iter(|| {
            filter.process(&plane_u8, &mut dst).unwrap();
        })
    });

    c.bench_function("fir-resize: Lanczos3 f32 1920x1080 -> 1280x720", |b| {
        let filter = make_filter(
            1280,
            720,
            &lanczos,
            PixelFormat::f32(),
            PixelFormat::f32(),
            ComputePath::Auto,
        );
        let mut dst = ResizePlaneMut::<f32>::alloc(1280, 720);
        b.iter(|| {
            filter.process(&plane_f32, &mut dst).unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
