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
use crate::axis_plan::{AxisGeometry, AxisPlan};
use crate::format_blit::FormatBlit;
use crate::images::{ResizePlane, ResizePlaneMut};
use crate::kernel::ResampleKernel;
use crate::kernel_table::Normalization;
use crate::resize_error::{check_overflow_v2, MismatchedSize};
use crate::roadmap::{
    describe_tile, horizontal_first, solve_tile_size, AxisSpan, PassStep, Roadmap, Stage,
    TileDescriptor, TileSize,
};
use crate::sample::{
    DestinationKind, PlaneRead, PlaneView, PlaneViewMut, PlaneWrite, ResizeSample, Sample,
    SourceKind,
};
use crate::scaler::Scaler;
use crate::support::{range_conversion, Axis, PixelFormat, SampleFormat};
use crate::transpose::transpose_plane;
use crate::ResizeError;
#[cfg(feature = "rayon")]
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

/// Arithmetic used by the convolution passes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ComputePath {
    /// Fixed point when both ends are integer, floating point otherwise or when
    /// coefficients do not fit into 16 bits
    #[default]
    Auto,
    /// Fixed point only, configuration fails when it is not possible
    Integer,
    Float,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResizeOptions {
    pub compute: ComputePath,
    pub normalization_h: Normalization,
    pub normalization_v: Normalization,
    /// Samples per scratch buffer the tile solver starts from
    pub buffer_budget: usize,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        ResizeOptions {
            compute: ComputePath::Auto,
            normalization_h: Normalization::Auto,
            normalization_v: Normalization::Auto,
            buffer_budget: 1 << 16,
        }
    }
}

impl ResizeOptions {
    pub fn with_compute(self, compute: ComputePath) -> Self {
        ResizeOptions { compute, ..self }
    }

    pub fn with_normalization(self, horizontal: Normalization, vertical: Normalization) -> Self {
        ResizeOptions {
            normalization_h: horizontal,
            normalization_v: vertical,
            ..self
        }
    }

    pub fn with_buffer_budget(self, buffer_budget: usize) -> Self {
        ResizeOptions {
            buffer_budget,
            ..self
        }
    }
}

/// Value domain of an intermediate plane: source levels or destination levels
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Space {
    Source,
    Destination,
}

/// Representation of the plane between two passes, `scale` multiplies the nominal value
#[derive(Debug, Copy, Clone)]
struct StageFormat {
    format: SampleFormat,
    scale: f64,
    space: Space,
}

#[derive(Debug, Clone)]
enum Pass {
    Resize(Axis, Scaler),
    Transpose(FormatBlit),
    Blit(FormatBlit),
}

/// Separable 2-D resampler of a single plane.
///
/// Everything is decided at construction: which axes need resampling, their order,
/// coefficient tables and tile size. Processing then cannot fail for planes matching
/// the configuration.
#[derive(Debug, Clone)]
pub struct FilterResize {
    roadmap: Roadmap,
    passes: Vec<Pass>,
    src_format: PixelFormat,
    dst_format: PixelFormat,
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    dst_height: usize,
    offset_h: usize,
    offset_v: usize,
    tile: TileSize,
    integer: bool,
}

struct PassBuilder<'a> {
    roadmap: Roadmap,
    plan_h: AxisPlan,
    plan_v: AxisPlan,
    kernel_h: &'a dyn ResampleKernel,
    kernel_v: &'a dyn ResampleKernel,
    options: &'a ResizeOptions,
    src_format: PixelFormat,
    dst_format: PixelFormat,
}

impl PassBuilder<'_> {
    fn build(&self, integer: bool) -> Result<Vec<Pass>, ResizeError> {
        let (gain, add) = range_conversion(&self.src_format, &self.dst_format);
        let scratch = if integer {
            SampleFormat::SCRATCH_INT
        } else {
            SampleFormat::SCRATCH_FLOAT
        };
        let scratch_scale = |space: Space| -> f64 {
            if !integer {
                return 1.;
            }
            let bits = match space {
                Space::Source => self.src_format.bits,
                Space::Destination => self.dst_format.bits,
            };
            2f64.powi(16 - bits as i32)
        };

        let steps = self.roadmap.steps();
        let len = self.roadmap.len();
        let last_resize = (0..len)
            .rev()
            .find(|&i| matches!(steps[i], PassStep::Resize(_)));

        let mut current = StageFormat {
            format: self.src_format.sample_format(),
            scale: 1.,
            space: Space::Source,
        };
        let mut passes = Vec::with_capacity(len);
        for (i, &step) in steps.iter().take(len).enumerate() {
            let space = match last_resize {
                Some(r) if i < r => Space::Source,
                _ => Space::Destination,
            };
            let next = if i + 1 == len {
                StageFormat {
                    format: self.dst_format.sample_format(),
                    scale: 1.,
                    space: Space::Destination,
                }
            } else {
                StageFormat {
                    format: scratch,
                    scale: scratch_scale(space),
                    space,
                }
            };
            let converts = current.space != next.space;
            let pass_gain = if converts { gain } else { 1. } * next.scale / current.scale;
            let pass_add = if converts { add * next.scale } else { 0. };

            let pass = match step {
                PassStep::Resize(axis) => {
                    let (plan, kernel, normalization) = match axis {
                        Axis::Horizontal => {
                            (&self.plan_h, self.kernel_h, self.options.normalization_h)
                        }
                        Axis::Vertical => (&self.plan_v, self.kernel_v, self.options.normalization_v),
                    };
                    let scaler = Scaler::new(
                        plan,
                        kernel,
                        normalization,
                        current.format,
                        next.format,
                        pass_gain,
                        pass_add,
                        integer,
                        axis,
                    )?;
                    Pass::Resize(axis, scaler)
                }
                PassStep::Transpose => Pass::Transpose(FormatBlit::new(
                    current.format,
                    next.format,
                    pass_gain,
                    pass_add,
                )),
                PassStep::None => Pass::Blit(FormatBlit::new(
                    current.format,
                    next.format,
                    pass_gain,
                    pass_add,
                )),
            };
            passes.push(pass);
            current = next;
        }
        Ok(passes)
    }
}

/// Axis whose fixed point coefficients had to be saturated
fn overflowing_axis(passes: &[Pass]) -> Option<Axis> {
    passes.iter().find_map(|pass| match pass {
        Pass::Resize(axis, scaler) if scaler.table().has_overflow() => Some(*axis),
        _ => None,
    })
}

impl FilterResize {
    /// Configures resampling of a `h.src_extent` x `v.src_extent` plane into
    /// `h.dst_extent` x `v.dst_extent`.
    ///
    /// # Arguments
    ///
    /// * `h`, `v`: Geometry of horizontal and vertical axes.
    /// * `kernel_h`, `kernel_v`: Kernels, used only when the axis needs resampling.
    /// * `src_format`, `dst_format`: Pixel formats, range and bit depth conversion is
    ///   folded into the passes.
    /// * `options`: See [ResizeOptions].
    pub fn new(
        h: AxisGeometry,
        v: AxisGeometry,
        kernel_h: &dyn ResampleKernel,
        kernel_v: &dyn ResampleKernel,
        src_format: PixelFormat,
        dst_format: PixelFormat,
        options: ResizeOptions,
    ) -> Result<FilterResize, ResizeError> {
        src_format.validate()?;
        dst_format.validate()?;
        let plan_h = AxisPlan::new(&h, kernel_h, Axis::Horizontal)?;
        let plan_v = AxisPlan::new(&v, kernel_v, Axis::Vertical)?;
        check_overflow_v2(h.src_extent, v.src_extent)?;
        check_overflow_v2(h.dst_extent, v.dst_extent)?;

        let both_integer = !src_format.is_float() && !dst_format.is_float();
        let integer = match options.compute {
            ComputePath::Auto => both_integer,
            ComputePath::Integer => {
                if !both_integer {
                    return Err(ResizeError::FormatMismatch);
                }
                true
            }
            ComputePath::Float => false,
        };

        let resize_h = h.needs_resampling();
        let resize_v = v.needs_resampling();
        let span_h = if resize_h {
            plan_h.src_span()
        } else {
            h.dst_extent
        };
        let span_v = if resize_v {
            plan_v.src_span()
        } else {
            v.dst_extent
        };
        let roadmap = Roadmap::new(
            resize_h,
            resize_v,
            horizontal_first(&h, &v, span_h, span_v),
        );

        let builder = PassBuilder {
            roadmap,
            plan_h,
            plan_v,
            kernel_h,
            kernel_v,
            options: &options,
            src_format,
            dst_format,
        };

        let built = builder.build(integer).and_then(|passes| {
            match overflowing_axis(&passes) {
                Some(axis) if integer => Err(ResizeError::CoefficientOverflow(axis)),
                _ => Ok(passes),
            }
        });
        let (passes, integer) = match built {
            Ok(passes) => (passes, integer),
            Err(ResizeError::CoefficientOverflow(axis))
                if integer && options.compute == ComputePath::Auto =>
            {
                log::warn!(
                    "Kernel coefficients on {:?} axis do not fit into 16 bits, using floating point path",
                    axis
                );
                (builder.build(false)?, false)
            }
            Err(err) => return Err(err),
        };

        let mut filter = FilterResize {
            roadmap,
            passes,
            src_format,
            dst_format,
            src_width: h.src_extent,
            src_height: v.src_extent,
            dst_width: h.dst_extent,
            dst_height: v.dst_extent,
            offset_h: h.crop_offset().unwrap_or(0),
            offset_v: v.crop_offset().unwrap_or(0),
            tile: TileSize {
                width: h.dst_extent,
                height: v.dst_extent,
                scratch: 0,
            },
            integer,
        };
        let tile = solve_tile_size(
            roadmap,
            &filter.span(Axis::Horizontal),
            &filter.span(Axis::Vertical),
            filter.dst_width,
            filter.dst_height,
            options.buffer_budget,
        )?;
        filter.tile = tile;

        log::debug!(
            "Resize {}x{} -> {}x{}: roadmap {:?}, tile {}x{}, scratch {} samples, integer path: {}",
            filter.src_width,
            filter.src_height,
            filter.dst_width,
            filter.dst_height,
            filter.roadmap,
            filter.tile.width,
            filter.tile.height,
            filter.tile.scratch,
            filter.integer
        );

        Ok(filter)
    }

    /// Destination tile `(width, height)` processed at once
    pub fn tile_size(&self) -> (usize, usize) {
        (self.tile.width, self.tile.height)
    }

    /// Whether passes run in fixed point arithmetic
    pub fn uses_integer_path(&self) -> bool {
        self.integer
    }

    fn scaler(&self, axis: Axis) -> Option<&Scaler> {
        self.passes.iter().find_map(|pass| match pass {
            Pass::Resize(pass_axis, scaler) if *pass_axis == axis => Some(scaler),
            _ => None,
        })
    }

    fn span(&self, axis: Axis) -> AxisSpan<'_> {
        AxisSpan {
            scaler: self.scaler(axis),
            offset: match axis {
                Axis::Horizontal => self.offset_h,
                Axis::Vertical => self.offset_v,
            },
        }
    }

    /// Resamples `src` into `dst`.
    ///
    /// Plane element types must match configured formats: `u8` for 8 bit and stack16,
    /// `u16` for 9..16 bit, `f32` for float.
    pub fn process<S: ResizeSample, D: ResizeSample>(
        &self,
        src: &ResizePlane<S>,
        dst: &mut ResizePlaneMut<D>,
    ) -> Result<(), ResizeError> {
        src.check_constraints(self.src_format.planes())?;
        dst.check_constraints(self.dst_format.planes())?;
        if src.width as usize != self.src_width {
            return Err(ResizeError::SourceDimensionsMismatch(MismatchedSize {
                expected: self.src_width,
                received: src.width as usize,
            }));
        }
        if src.height as usize != self.src_height {
            return Err(ResizeError::SourceDimensionsMismatch(MismatchedSize {
                expected: self.src_height,
                received: src.height as usize,
            }));
        }
        if dst.width as usize != self.dst_width {
            return Err(ResizeError::DestinationDimensionsMismatch(MismatchedSize {
                expected: self.dst_width,
                received: dst.width as usize,
            }));
        }
        if dst.height as usize != self.dst_height {
            return Err(ResizeError::DestinationDimensionsMismatch(MismatchedSize {
                expected: self.dst_height,
                received: dst.height as usize,
            }));
        }

        let source = S::source(src, &self.src_format)?;
        let target = D::destination(dst, &self.dst_format)?;

        macro_rules! dispatch_target {
            ($src:expr) => {
                match target {
                    DestinationKind::U8(view) => self.process_views($src, view),
                    DestinationKind::U16(view) => self.process_views($src, view),
                    DestinationKind::Stack16(view) => self.process_views($src, view),
                    DestinationKind::F32(view) => self.process_views($src, view),
                }
            };
        }

        match source {
            SourceKind::U8(view) => dispatch_target!(&view),
            SourceKind::U16(view) => dispatch_target!(&view),
            SourceKind::Stack16(view) => dispatch_target!(&view),
            SourceKind::F32(view) => dispatch_target!(&view),
        }
        Ok(())
    }

    fn process_views<P: PlaneRead, W: PlaneWrite>(&self, src: &P, dst: W) {
        let bands = dst.into_bands(self.tile.height);
        let span_h = self.span(Axis::Horizontal);
        let span_v = self.span(Axis::Vertical);

        let iter;
        #[cfg(feature = "rayon")]
        {
            iter = bands.into_par_iter();
        }
        #[cfg(not(feature = "rayon"))]
        {
            iter = bands.into_iter();
        }

        iter.enumerate().for_each(|(band_index, mut band)| {
            let band_y0 = band_index * self.tile.height;
            if self.integer {
                self.process_band::<P, W, i16>(src, &mut band, band_y0, &span_h, &span_v);
            } else {
                self.process_band::<P, W, f32>(src, &mut band, band_y0, &span_h, &span_v);
            }
        });
    }

    /// Processes tiles of one band left to right, scratch buffers are private to the band
    fn process_band<P: PlaneRead, W: PlaneWrite, T: Sample>(
        &self,
        src: &P,
        band: &mut W,
        band_y0: usize,
        span_h: &AxisSpan,
        span_v: &AxisSpan,
    ) {
        let band_y1 = (band_y0 + self.tile.height).min(self.dst_height);
        let mut scratch_a = vec![T::default(); self.tile.scratch];
        let mut scratch_b = vec![T::default(); self.tile.scratch];
        for x0 in (0..self.dst_width).step_by(self.tile.width) {
            let x1 = (x0 + self.tile.width).min(self.dst_width);
            let tile = describe_tile(
                self.roadmap,
                span_h,
                span_v,
                x0,
                x1,
                band_y0,
                band_y1,
                band_y0,
            );
            self.process_tile(src, band, &tile, &mut scratch_a, &mut scratch_b);
        }
    }

    /// Walks the roadmap of a tile, passes alternate between the two scratch buffers
    fn process_tile<P: PlaneRead, W: PlaneWrite, T: Sample>(
        &self,
        src: &P,
        band: &mut W,
        tile: &TileDescriptor,
        scratch_a: &mut [T],
        scratch_b: &mut [T],
    ) {
        let mut input_shape = (0usize, 0usize);
        for (i, (stage, pass)) in tile
            .stages
            .iter()
            .zip(self.passes.iter())
            .take(tile.len)
            .enumerate()
        {
            let last = i + 1 == tile.len;
            let (rows, cols) = stage.output_shape();
            if i == 0 {
                if last {
                    run_stage(pass, stage, src, band);
                } else {
                    let mut output =
                        PlaneViewMut::new(&mut scratch_a[..rows * cols], cols, cols, rows);
                    run_stage(pass, stage, src, &mut output);
                }
            } else {
                let (read, write): (&[T], &mut [T]) = if i % 2 == 1 {
                    (&*scratch_a, &mut *scratch_b)
                } else {
                    (&*scratch_b, &mut *scratch_a)
                };
                let (in_rows, in_cols) = input_shape;
                let input = PlaneView::new(&read[..in_rows * in_cols], in_cols, in_cols, in_rows);
                if last {
                    run_stage(pass, stage, &input, band);
                } else {
                    let mut output = PlaneViewMut::new(&mut write[..rows * cols], cols, cols, rows);
                    run_stage(pass, stage, &input, &mut output);
                }
            }
            input_shape = (rows, cols);
        }
    }
}

fn run_stage<P: PlaneRead, W: PlaneWrite>(pass: &Pass, stage: &Stage, src: &P, dst: &mut W) {
    match (pass, stage) {
        (Pass::Resize(_, scaler), Stage::Resize(window)) => scaler.process(src, dst, window),
        (Pass::Transpose(blit), Stage::Transpose(region)) => {
            transpose_plane(src, dst, region, blit)
        }
        (Pass::Blit(blit), Stage::Blit(region)) => blit.blit_rect(src, dst, region),
        // Passes and stages are both derived from the same roadmap
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{BilinearKernel, BoxKernel, LanczosKernel, PointKernel, SplineKernel};
    use crate::support::YuvRange;
    use rand::Rng;

    fn random_u8(len: usize) -> Vec<u8> {
        let mut rng = rand::rng();
        (0..len).map(|_| rng.random_range(0..=255u8)).collect()
    }

    fn random_f32(len: usize) -> Vec<f32> {
        let mut rng = rand::rng();
        (0..len).map(|_| rng.random_range(0f32..1f32)).collect()
    }

    fn resize<S: ResizeSample, D: ResizeSample>(
        filter: &FilterResize,
        src: &[S],
        width: usize,
        height: usize,
        dst_width: usize,
        dst_height: usize,
    ) -> Vec<D> {
        let planes = filter.src_format.planes();
        let src_plane = ResizePlane::new(
            &src[..width * height * planes],
            width as u32,
            width as u32,
            height as u32,
        );
        let mut dst_plane = ResizePlaneMut::<D>::alloc(dst_width as u32, dst_height as u32);
        if filter.dst_format.planes() == 2 {
            dst_plane.data = crate::images::BufferStoreMut::Owned(vec![
                D::default();
                dst_width * dst_height * 2
            ]);
        }
        filter.process(&src_plane, &mut dst_plane).unwrap();
        dst_plane.data.borrow().to_vec()
    }

    fn u8_full() -> PixelFormat {
        PixelFormat::u8(YuvRange::Full)
    }

    #[test]
    fn test_identity_is_exact() {
        let (width, height) = (33usize, 17usize);
        let src = random_u8(width * height);
        let plain = FilterResize::new(
            AxisGeometry::new(width, width),
            AxisGeometry::new(height, height),
            &PointKernel,
            &PointKernel,
            u8_full(),
            u8_full(),
            ResizeOptions::default(),
        )
        .unwrap();
        assert_eq!(plain.roadmap, Roadmap::Blit);
        let dst: Vec<u8> = resize(&plain, &src, width, height, width, height);
        assert_eq!(dst, src);

        for compute in [ComputePath::Integer, ComputePath::Float] {
            let forced = FilterResize::new(
                AxisGeometry::new(width, width).with_forced_scale(true),
                AxisGeometry::new(height, height).with_forced_scale(true),
                &PointKernel,
                &PointKernel,
                u8_full(),
                u8_full(),
                ResizeOptions::default().with_compute(compute),
            )
            .unwrap();
            assert_eq!(forced.roadmap.len(), 4);
            let dst: Vec<u8> = resize(&forced, &src, width, height, width, height);
            assert_eq!(dst, src);
        }
    }

    #[test]
    fn test_bit_depth_round_trip() {
        let (width, height) = (16usize, 16usize);
        let src: Vec<u8> = (0..=255u8).collect();
        let u16_full = PixelFormat::u16(16, YuvRange::Full);
        let widen = FilterResize::new(
            AxisGeometry::new(width, width),
            AxisGeometry::new(height, height),
            &PointKernel,
            &PointKernel,
            u8_full(),
            u16_full,
            ResizeOptions::default(),
        )
        .unwrap();
        let wide: Vec<u16> = resize(&widen, &src, width, height, width, height);
        assert!(wide.iter().zip(src.iter()).all(|(&w, &s)| w == s as u16 * 257));
        let narrow = FilterResize::new(
            AxisGeometry::new(width, width),
            AxisGeometry::new(height, height),
            &PointKernel,
            &PointKernel,
            u16_full,
            u8_full(),
            ResizeOptions::default(),
        )
        .unwrap();
        let back: Vec<u8> = resize(&narrow, &wide, width, height, width, height);
        assert_eq!(back, src);
    }

    #[test]
    fn test_box_upscale_doubles_columns() {
        let src: Vec<u8> = (0..4).flat_map(|_| [0u8, 4, 8, 12]).collect();
        let box_kernel = BoxKernel;
        let point_kernel = PointKernel;
        let kernels: [&dyn ResampleKernel; 2] = [&box_kernel, &point_kernel];
        for kernel in kernels {
            for compute in [ComputePath::Integer, ComputePath::Float] {
                let filter = FilterResize::new(
                    AxisGeometry::new(4, 8),
                    AxisGeometry::new(4, 4),
                    kernel,
                    kernel,
                    u8_full(),
                    u8_full(),
                    ResizeOptions::default().with_compute(compute),
                )
                .unwrap();
                assert_eq!(filter.roadmap, Roadmap::Horizontal);
                let dst: Vec<u8> = resize(&filter, &src, 4, 4, 8, 4);
                for row in dst.chunks_exact(8) {
                    assert_eq!(row, &[0, 0, 4, 4, 8, 8, 12, 12]);
                }
            }
        }
    }

    #[test]
    fn test_downscale_stays_in_range() {
        let (width, height) = (100usize, 100usize);
        let src = random_u8(width * height);
        let min = *src.iter().min().unwrap();
        let max = *src.iter().max().unwrap();

        let lanczos = LanczosKernel::new(3);
        let filter = FilterResize::new(
            AxisGeometry::new(width, 50),
            AxisGeometry::new(height, 50),
            &lanczos,
            &lanczos,
            u8_full(),
            PixelFormat::f32(),
            ResizeOptions::default(),
        )
        .unwrap();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let table = filter.scaler(axis).unwrap().table();
            for row in table.rows() {
                let sum: f64 = table.float_coefficients(row).iter().sum();
                assert!((sum - 1. / 255.).abs() < 1e-6 || (sum - 1.).abs() < 1e-6);
            }
        }
        let dst: Vec<f32> = resize(&filter, &src, width, height, 50, 50);
        assert!(dst.iter().all(|v| v.is_finite()));

        for kernel in [&BoxKernel as &dyn ResampleKernel, &BilinearKernel] {
            let filter = FilterResize::new(
                AxisGeometry::new(width, 50),
                AxisGeometry::new(height, 50),
                kernel,
                kernel,
                u8_full(),
                u8_full(),
                ResizeOptions::default(),
            )
            .unwrap();
            let dst: Vec<u8> = resize(&filter, &src, width, height, 50, 50);
            assert!(dst.iter().all(|&v| v >= min && v <= max));
        }
    }

    #[test]
    fn test_tiling_invariance() {
        let (width, height) = (97usize, 61usize);
        let (dst_width, dst_height) = (45usize, 130usize);
        let kernel = SplineKernel::Spline36;
        let make = |src_format, dst_format, budget| {
            FilterResize::new(
                AxisGeometry::new(width, dst_width),
                AxisGeometry::new(height, dst_height),
                &kernel,
                &kernel,
                src_format,
                dst_format,
                ResizeOptions::default().with_buffer_budget(budget),
            )
            .unwrap()
        };

        let src = random_u8(width * height);
        let whole = make(u8_full(), u8_full(), 1 << 20);
        let tiled = make(u8_full(), u8_full(), 64);
        assert!(whole.uses_integer_path());
        assert_eq!(whole.tile_size(), (dst_width, dst_height));
        assert_ne!(tiled.tile_size(), whole.tile_size());
        let a: Vec<u8> = resize(&whole, &src, width, height, dst_width, dst_height);
        let b: Vec<u8> = resize(&tiled, &src, width, height, dst_width, dst_height);
        assert_eq!(a, b);

        let src = random_f32(width * height);
        let whole = make(PixelFormat::f32(), PixelFormat::f32(), 1 << 20);
        let tiled = make(PixelFormat::f32(), PixelFormat::f32(), 64);
        let a: Vec<f32> = resize(&whole, &src, width, height, dst_width, dst_height);
        let b: Vec<f32> = resize(&tiled, &src, width, height, dst_width, dst_height);
        for (&a, &b) in a.iter().zip(b.iter()) {
            assert!((a - b).abs() <= 1e-5 * a.abs().max(1.), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_studio_range_remap() {
        let src: Vec<u8> = (0..=255u8).collect();
        let targets = [
            (PixelFormat::u16(10, YuvRange::Limited), 2u32),
            (PixelFormat::u16(16, YuvRange::Limited), 8u32),
        ];
        // Same remap through a single vertical pass and through transposes
        let layouts = [
            (
                AxisGeometry::new(1, 1),
                AxisGeometry::new(256, 256).with_forced_scale(true),
            ),
            (
                AxisGeometry::new(256, 256).with_forced_scale(true),
                AxisGeometry::new(1, 1),
            ),
        ];
        for (dst_format, shift) in targets {
            let expected: Vec<u16> = (0..=255u16).map(|v| v << shift).collect();
            for (h, v) in layouts {
                for compute in [ComputePath::Integer, ComputePath::Float] {
                    let filter = FilterResize::new(
                        h,
                        v,
                        &PointKernel,
                        &PointKernel,
                        PixelFormat::u8(YuvRange::Limited),
                        dst_format,
                        ResizeOptions::default().with_compute(compute),
                    )
                    .unwrap();
                    assert_eq!(filter.uses_integer_path(), compute == ComputePath::Integer);
                    let dst: Vec<u16> = resize(
                        &filter,
                        &src,
                        h.src_extent,
                        v.src_extent,
                        h.dst_extent,
                        v.dst_extent,
                    );
                    assert_eq!(dst, expected, "{:?} {:?}", dst_format, compute);
                }
            }
        }
    }

    #[test]
    fn test_stack16_matches_u16() {
        let (width, height) = (20usize, 12usize);
        let (dst_width, dst_height) = (31usize, 9usize);
        let mut rng = rand::rng();
        let src: Vec<u16> = (0..width * height)
            .map(|_| rng.random_range(0..=u16::MAX))
            .collect();
        let stacked: Vec<u8> = src
            .iter()
            .map(|&v| (v >> 8) as u8)
            .chain(src.iter().map(|&v| v as u8))
            .collect();
        let kernel = LanczosKernel::new(3);
        let make = |src_format, dst_format| {
            FilterResize::new(
                AxisGeometry::new(width, dst_width),
                AxisGeometry::new(height, dst_height),
                &kernel,
                &kernel,
                src_format,
                dst_format,
                ResizeOptions::default(),
            )
            .unwrap()
        };
        let u16_format = PixelFormat::u16(16, YuvRange::Full);
        let stack_format = PixelFormat::stack16(16, YuvRange::Full);

        let reference: Vec<u16> = resize(
            &make(u16_format, u16_format),
            &src,
            width,
            height,
            dst_width,
            dst_height,
        );
        let from_stack: Vec<u16> = resize(
            &make(stack_format, u16_format),
            &stacked,
            width,
            height,
            dst_width,
            dst_height,
        );
        assert_eq!(from_stack, reference);

        let to_stack: Vec<u8> = resize(
            &make(u16_format, stack_format),
            &src,
            width,
            height,
            dst_width,
            dst_height,
        );
        let count = dst_width * dst_height;
        for i in 0..count {
            let v = ((to_stack[i] as u16) << 8) | to_stack[count + i] as u16;
            assert_eq!(v, reference[i]);
        }
    }

    #[test]
    fn test_axis_order_is_transparent() {
        let kernel = SplineKernel::Spline16;
        let float = PixelFormat::f32();
        let cases = [((97usize, 61usize), (45usize, 130usize)), ((61, 97), (130, 45))];
        for ((width, height), (dst_width, dst_height)) in cases {
            let src = random_f32(width * height);
            let both = FilterResize::new(
                AxisGeometry::new(width, dst_width),
                AxisGeometry::new(height, dst_height),
                &kernel,
                &kernel,
                float,
                float,
                ResizeOptions::default(),
            )
            .unwrap();
            let horizontal = FilterResize::new(
                AxisGeometry::new(width, dst_width),
                AxisGeometry::new(height, height),
                &kernel,
                &kernel,
                float,
                float,
                ResizeOptions::default(),
            )
            .unwrap();
            let vertical = FilterResize::new(
                AxisGeometry::new(dst_width, dst_width),
                AxisGeometry::new(height, dst_height),
                &kernel,
                &kernel,
                float,
                float,
                ResizeOptions::default(),
            )
            .unwrap();
            assert_eq!(horizontal.roadmap, Roadmap::Horizontal);
            assert_eq!(vertical.roadmap, Roadmap::Vertical);

            let expected_order = if width > height {
                Roadmap::HorizontalFirst
            } else {
                Roadmap::VerticalFirst
            };
            assert_eq!(both.roadmap, expected_order);

            let direct: Vec<f32> = resize(&both, &src, width, height, dst_width, dst_height);
            let mid: Vec<f32> = resize(&horizontal, &src, width, height, dst_width, height);
            let staged: Vec<f32> = resize(&vertical, &mid, dst_width, height, dst_width, dst_height);
            for (&a, &b) in direct.iter().zip(staged.iter()) {
                assert!((a - b).abs() < 1e-4, "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_crop_window() {
        let (width, height) = (12usize, 10usize);
        let src = random_u8(width * height);
        let filter = FilterResize::new(
            AxisGeometry::new(width, 5).with_window(3., 5.),
            AxisGeometry::new(height, 4).with_window(2., 4.),
            &LanczosKernel::new(3),
            &LanczosKernel::new(3),
            u8_full(),
            u8_full(),
            ResizeOptions::default(),
        )
        .unwrap();
        assert_eq!(filter.roadmap, Roadmap::Blit);
        let dst: Vec<u8> = resize(&filter, &src, width, height, 5, 4);
        for y in 0..4 {
            for x in 0..5 {
                assert_eq!(dst[y * 5 + x], src[(y + 2) * width + x + 3]);
            }
        }
    }

    #[test]
    fn test_coefficient_overflow() {
        let kernel = LanczosKernel::new(3);
        let options = ResizeOptions::default()
            .with_normalization(Normalization::Total(0.05), Normalization::Total(0.05));
        let geometry_h = AxisGeometry::new(32, 48);
        let geometry_v = AxisGeometry::new(32, 48);
        let filter = FilterResize::new(
            geometry_h,
            geometry_v,
            &kernel,
            &kernel,
            u8_full(),
            u8_full(),
            options,
        )
        .unwrap();
        assert!(!filter.uses_integer_path());
        let forced = FilterResize::new(
            geometry_h,
            geometry_v,
            &kernel,
            &kernel,
            u8_full(),
            u8_full(),
            options.with_compute(ComputePath::Integer),
        );
        assert!(matches!(
            forced,
            Err(ResizeError::CoefficientOverflow(_))
        ));
    }

    #[test]
    fn test_configuration_errors() {
        let kernel = BilinearKernel;
        assert_eq!(
            FilterResize::new(
                AxisGeometry::new(10, 10).with_window(-20., 5.),
                AxisGeometry::new(10, 10),
                &kernel,
                &kernel,
                u8_full(),
                u8_full(),
                ResizeOptions::default(),
            )
            .err(),
            Some(ResizeError::InvalidWindow(Axis::Horizontal))
        );
        assert_eq!(
            FilterResize::new(
                AxisGeometry::new(10, 10),
                AxisGeometry::new(10, 10).with_window(0., 1e12),
                &kernel,
                &kernel,
                u8_full(),
                u8_full(),
                ResizeOptions::default(),
            )
            .err(),
            Some(ResizeError::InvalidWindow(Axis::Vertical))
        );
        for scale in [1e-15, 1e-300] {
            assert_eq!(
                FilterResize::new(
                    AxisGeometry::new(10, 10).with_kernel_scale(scale),
                    AxisGeometry::new(10, 10),
                    &kernel,
                    &kernel,
                    u8_full(),
                    u8_full(),
                    ResizeOptions::default(),
                )
                .err(),
                Some(ResizeError::KernelTooLong(Axis::Horizontal))
            );
        }
        assert_eq!(
            FilterResize::new(
                AxisGeometry::new(10, 10),
                AxisGeometry::new(10, 10),
                &kernel,
                &kernel,
                PixelFormat::f32(),
                u8_full(),
                ResizeOptions::default().with_compute(ComputePath::Integer),
            )
            .err(),
            Some(ResizeError::FormatMismatch)
        );
        assert_eq!(
            FilterResize::new(
                AxisGeometry::new(10, 10),
                AxisGeometry::new(10, 10),
                &kernel,
                &kernel,
                PixelFormat::u16(17, YuvRange::Full),
                u8_full(),
                ResizeOptions::default(),
            )
            .err(),
            Some(ResizeError::UnsupportedBitDepth(17))
        );
    }

    #[test]
    fn test_process_errors() {
        let kernel = BilinearKernel;
        let filter = FilterResize::new(
            AxisGeometry::new(8, 4),
            AxisGeometry::new(6, 3),
            &kernel,
            &kernel,
            u8_full(),
            u8_full(),
            ResizeOptions::default(),
        )
        .unwrap();
        let src = vec![0u8; 8 * 6];
        let wrong = vec![0u16; 8 * 6];
        let mut dst = ResizePlaneMut::<u8>::alloc(4, 3);
        assert_eq!(
            filter.process(&ResizePlane::new(&wrong, 8, 8, 6), &mut dst),
            Err(ResizeError::FormatMismatch)
        );
        assert_eq!(
            filter.process(&ResizePlane::new(&src[..7 * 6], 7, 7, 6), &mut dst),
            Err(ResizeError::SourceDimensionsMismatch(MismatchedSize {
                expected: 8,
                received: 7,
            }))
        );
        let mut small = ResizePlaneMut::<u8>::alloc(4, 2);
        assert_eq!(
            filter.process(&ResizePlane::new(&src, 8, 8, 6), &mut small),
            Err(ResizeError::DestinationDimensionsMismatch(MismatchedSize {
                expected: 3,
                received: 2,
            }))
        );
        assert!(filter
            .process(&ResizePlane::new(&src, 8, 8, 6), &mut dst)
            .is_ok());
    }
}
