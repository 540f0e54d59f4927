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
use crate::axis_plan::AxisGeometry;
use crate::scaler::{PassWindow, Scaler};
use crate::support::Axis;
use crate::transpose::PlaneRegion;
use crate::ResizeError;

/// Tiles narrower than this many rows are only accepted when nothing taller fits
const MIN_TILE_ROWS: usize = 16;
/// Scratch budget ceiling in samples
const MAX_BUFFER_BUDGET: usize = 1 << 26;
/// Scale factor ratio above which the more strongly shrunk axis always goes first
const EXTREME_RATIO: f64 = 8.;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PassStep {
    Resize(Axis),
    Transpose,
    None,
}

/// Sequence of passes chosen once per configuration
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Roadmap {
    /// No axis is resampled, plain format conversion of the window
    Blit,
    Vertical,
    /// Rows are transposed, resampled and transposed back
    Horizontal,
    VerticalFirst,
    HorizontalFirst,
}

impl Roadmap {
    pub(crate) fn new(resize_h: bool, resize_v: bool, horizontal_first: bool) -> Roadmap {
        match (resize_h, resize_v) {
            (false, false) => Roadmap::Blit,
            (false, true) => Roadmap::Vertical,
            (true, false) => Roadmap::Horizontal,
            (true, true) => {
                if horizontal_first {
                    Roadmap::HorizontalFirst
                } else {
                    Roadmap::VerticalFirst
                }
            }
        }
    }

    pub(crate) const fn steps(&self) -> [PassStep; 4] {
        use PassStep::*;
        match self {
            Roadmap::Blit => [None, None, None, None],
            Roadmap::Vertical => [Resize(Axis::Vertical), None, None, None],
            Roadmap::Horizontal => [Transpose, Resize(Axis::Horizontal), Transpose, None],
            Roadmap::VerticalFirst => [
                Resize(Axis::Vertical),
                Transpose,
                Resize(Axis::Horizontal),
                Transpose,
            ],
            Roadmap::HorizontalFirst => [
                Transpose,
                Resize(Axis::Horizontal),
                Transpose,
                Resize(Axis::Vertical),
            ],
        }
    }

    /// Number of meaningful steps, a blit still counts as one
    pub(crate) fn len(&self) -> usize {
        self.steps()
            .iter()
            .filter(|&&step| step != PassStep::None)
            .count()
            .max(1)
    }
}

/// Decides whether the horizontal pass runs before the vertical one.
///
/// `src_width` and `src_height` are the source spans read for the whole destination.
pub(crate) fn horizontal_first(
    h: &AxisGeometry,
    v: &AxisGeometry,
    src_width: usize,
    src_height: usize,
) -> bool {
    let scale_h = h.scale_factor();
    let scale_v = v.scale_factor();
    let ratio = (scale_h / scale_v).max(scale_v / scale_h);
    if ratio > EXTREME_RATIO {
        return scale_h < scale_v;
    }
    let vertical_first_size = v.dst_extent * src_width;
    let horizontal_first_size = h.dst_extent * src_height;
    horizontal_first_size < vertical_first_size
}

/// Source span feeding a destination span on one axis
#[derive(Debug, Copy, Clone)]
pub(crate) struct AxisSpan<'a> {
    pub(crate) scaler: Option<&'a Scaler>,
    /// Crop offset when the axis is not resampled
    pub(crate) offset: usize,
}

impl AxisSpan<'_> {
    pub(crate) fn span(&self, d0: usize, d1: usize) -> (usize, usize) {
        match self.scaler {
            Some(scaler) => scaler.src_boundaries(d0, d1),
            None => (d0 + self.offset, d1 + self.offset),
        }
    }

    /// Widest source span over all tiles of `tile` samples
    fn max_extent(&self, tile: usize, dst_extent: usize) -> usize {
        (0..dst_extent)
            .step_by(tile)
            .map(|d0| {
                let (s0, s1) = self.span(d0, (d0 + tile).min(dst_extent));
                s1 - s0
            })
            .max()
            .unwrap_or(0)
    }
}

/// Geometry of a single roadmap step inside a tile
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Stage {
    Resize(PassWindow),
    Transpose(PlaneRegion),
    Blit(PlaneRegion),
    None,
}

impl Stage {
    /// `(rows, cols)` of the samples written by the stage
    pub(crate) fn output_shape(&self) -> (usize, usize) {
        match self {
            Stage::Resize(window) => (window.d1 - window.d0, window.width),
            Stage::Transpose(region) => (region.cols, region.rows),
            Stage::Blit(region) => (region.rows, region.cols),
            Stage::None => (0, 0),
        }
    }
}

/// Destination rectangle `[x0, x1) x [y0, y1)` with the geometry of every step.
///
/// Rows written to the destination are relative to `band_y0`.
#[derive(Debug, Copy, Clone)]
pub(crate) struct TileDescriptor {
    pub(crate) stages: [Stage; 4],
    pub(crate) len: usize,
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn describe_tile(
    roadmap: Roadmap,
    h: &AxisSpan,
    v: &AxisSpan,
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
    band_y0: usize,
) -> TileDescriptor {
    let (w, h_rows) = (x1 - x0, y1 - y0);
    let out_row = y0 - band_y0;
    let mut stages = [Stage::None; 4];
    match roadmap {
        Roadmap::Blit => {
            stages[0] = Stage::Blit(PlaneRegion {
                in_row: y0 + v.offset,
                in_col: x0 + h.offset,
                rows: h_rows,
                cols: w,
                out_row,
                out_col: x0,
            });
        }
        Roadmap::Vertical => {
            stages[0] = Stage::Resize(PassWindow {
                d0: y0,
                d1: y1,
                origin: 0,
                in_col: x0 + h.offset,
                width: w,
                out_row,
                out_col: x0,
            });
        }
        Roadmap::Horizontal => {
            let (sx0, sx1) = h.span(x0, x1);
            stages[0] = Stage::Transpose(PlaneRegion {
                in_row: y0 + v.offset,
                in_col: sx0,
                rows: h_rows,
                cols: sx1 - sx0,
                out_row: 0,
                out_col: 0,
            });
            stages[1] = Stage::Resize(PassWindow {
                d0: x0,
                d1: x1,
                origin: sx0,
                in_col: 0,
                width: h_rows,
                out_row: 0,
                out_col: 0,
            });
            stages[2] = Stage::Transpose(PlaneRegion {
                in_row: 0,
                in_col: 0,
                rows: w,
                cols: h_rows,
                out_row,
                out_col: x0,
            });
        }
        Roadmap::VerticalFirst => {
            let (sx0, sx1) = h.span(x0, x1);
            let sw = sx1 - sx0;
            stages[0] = Stage::Resize(PassWindow {
                d0: y0,
                d1: y1,
                origin: 0,
                in_col: sx0,
                width: sw,
                out_row: 0,
                out_col: 0,
            });
            stages[1] = Stage::Transpose(PlaneRegion {
                in_row: 0,
                in_col: 0,
                rows: h_rows,
                cols: sw,
                out_row: 0,
                out_col: 0,
            });
            stages[2] = Stage::Resize(PassWindow {
                d0: x0,
                d1: x1,
                origin: sx0,
                in_col: 0,
                width: h_rows,
                out_row: 0,
                out_col: 0,
            });
            stages[3] = Stage::Transpose(PlaneRegion {
                in_row: 0,
                in_col: 0,
                rows: w,
                cols: h_rows,
                out_row,
                out_col: x0,
            });
        }
        Roadmap::HorizontalFirst => {
            let (sx0, sx1) = h.span(x0, x1);
            let (sy0, sy1) = v.span(y0, y1);
            let sh = sy1 - sy0;
            stages[0] = Stage::Transpose(PlaneRegion {
                in_row: sy0,
                in_col: sx0,
                rows: sh,
                cols: sx1 - sx0,
                out_row: 0,
                out_col: 0,
            });
            stages[1] = Stage::Resize(PassWindow {
                d0: x0,
                d1: x1,
                origin: sx0,
                in_col: 0,
                width: sh,
                out_row: 0,
                out_col: 0,
            });
            stages[2] = Stage::Transpose(PlaneRegion {
                in_row: 0,
                in_col: 0,
                rows: w,
                cols: sh,
                out_row: 0,
                out_col: 0,
            });
            stages[3] = Stage::Resize(PassWindow {
                d0: y0,
                d1: y1,
                origin: sy0,
                in_col: 0,
                width: w,
                out_row,
                out_col: x0,
            });
        }
    }
    TileDescriptor {
        stages,
        len: roadmap.len(),
    }
}

/// Chosen tile size and the scratch samples each of the two ping-pong buffers needs
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct TileSize {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) scratch: usize,
}

fn scratch_need(roadmap: Roadmap, tw: usize, th: usize, sw: usize, sh: usize) -> usize {
    match roadmap {
        Roadmap::Blit | Roadmap::Vertical => 0,
        Roadmap::Horizontal => (sw * th).max(tw * th),
        Roadmap::VerticalFirst => (th * sw).max(tw * th),
        Roadmap::HorizontalFirst => (sw * sh).max(tw * sh),
    }
}

/// Finds the widest tile, then the tallest one for that width, whose scratch buffers
/// fit into `budget` samples. The budget is doubled when nothing fits.
pub(crate) fn solve_tile_size(
    roadmap: Roadmap,
    h: &AxisSpan,
    v: &AxisSpan,
    dst_width: usize,
    dst_height: usize,
    budget: usize,
) -> Result<TileSize, ResizeError> {
    let mut budget = budget.max(1);
    loop {
        let mut tw = dst_width;
        loop {
            let sw = h.max_extent(tw, dst_width);
            let fits = |th: usize| -> Option<usize> {
                let sh = v.max_extent(th, dst_height);
                let scratch = scratch_need(roadmap, tw, th, sw, sh);
                if scratch.max(tw * th) <= budget {
                    Some(scratch)
                } else {
                    None
                }
            };
            if let Some(mut scratch) = fits(1) {
                let (mut lo, mut hi) = (1usize, dst_height);
                while lo < hi {
                    let mid = (lo + hi + 1) / 2;
                    if let Some(need) = fits(mid) {
                        lo = mid;
                        scratch = need;
                    } else {
                        hi = mid - 1;
                    }
                }
                if let Some(need) = fits(lo) {
                    scratch = need;
                }
                if lo >= MIN_TILE_ROWS.min(dst_height) || tw == 1 {
                    return Ok(TileSize {
                        width: tw,
                        height: lo,
                        scratch,
                    });
                }
            }
            if tw == 1 {
                break;
            }
            tw = tw.div_ceil(2);
        }
        if budget >= MAX_BUFFER_BUDGET {
            return Err(ResizeError::TileSizing(budget));
        }
        budget = (budget * 2).min(MAX_BUFFER_BUDGET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SCALER: AxisSpan = AxisSpan {
        scaler: None,
        offset: 0,
    };

    #[test]
    fn test_roadmap_steps() {
        assert_eq!(Roadmap::new(false, false, false), Roadmap::Blit);
        assert_eq!(Roadmap::Blit.len(), 1);
        assert_eq!(Roadmap::new(false, true, true).len(), 1);
        assert_eq!(
            Roadmap::new(true, false, false).steps(),
            [
                PassStep::Transpose,
                PassStep::Resize(Axis::Horizontal),
                PassStep::Transpose,
                PassStep::None
            ]
        );
        assert_eq!(Roadmap::new(true, true, true), Roadmap::HorizontalFirst);
        assert_eq!(
            Roadmap::new(true, true, false).steps()[0],
            PassStep::Resize(Axis::Vertical)
        );
        assert_eq!(Roadmap::VerticalFirst.len(), 4);
    }

    #[test]
    fn test_processing_order() {
        let h = AxisGeometry::new(400, 100);
        let v = AxisGeometry::new(100, 90);
        assert!(horizontal_first(&h, &v, 400, 100));
        let h = AxisGeometry::new(100, 100);
        let v = AxisGeometry::new(400, 100);
        assert!(!horizontal_first(&h, &v, 100, 400));
        // Equal intermediate sizes keep the vertical pass first
        let h = AxisGeometry::new(100, 50);
        let v = AxisGeometry::new(100, 50);
        assert!(!horizontal_first(&h, &v, 100, 100));
    }

    #[test]
    fn test_extreme_ratio_forces_shrunk_axis_first() {
        // Spans are skewed so the area rule alone would pick the other order
        let h = AxisGeometry::new(1000, 100);
        let v = AxisGeometry::new(100, 99);
        assert!(horizontal_first(&h, &v, 10, 100_000));
        let h = AxisGeometry::new(100, 99);
        let v = AxisGeometry::new(1000, 100);
        assert!(!horizontal_first(&h, &v, 100_000, 10));
    }

    #[test]
    fn test_blit_tiles() {
        let tile = solve_tile_size(Roadmap::Blit, &NO_SCALER, &NO_SCALER, 64, 64, 1 << 16)
            .unwrap();
        assert_eq!(
            tile,
            TileSize {
                width: 64,
                height: 64,
                scratch: 0
            }
        );
        let tile = solve_tile_size(Roadmap::Blit, &NO_SCALER, &NO_SCALER, 64, 64, 256).unwrap();
        assert_eq!(tile.width, 16);
        assert_eq!(tile.height, 16);
    }

    #[test]
    fn test_tile_geometry_horizontal() {
        let h = AxisSpan {
            scaler: None,
            offset: 3,
        };
        let v = AxisSpan {
            scaler: None,
            offset: 2,
        };
        let tile = describe_tile(Roadmap::Horizontal, &h, &v, 4, 10, 8, 12, 8);
        assert_eq!(tile.len, 3);
        assert_eq!(
            tile.stages[0],
            Stage::Transpose(PlaneRegion {
                in_row: 10,
                in_col: 7,
                rows: 4,
                cols: 6,
                out_row: 0,
                out_col: 0,
            })
        );
        assert_eq!(tile.stages[1].output_shape(), (6, 4));
        assert_eq!(tile.stages[2].output_shape(), (4, 6));
        assert_eq!(tile.stages[3], Stage::None);
    }

    #[test]
    fn test_tile_sizing_failure() {
        use crate::axis_plan::AxisPlan;
        use crate::kernel::LanczosKernel;
        use crate::kernel_table::Normalization;
        use crate::support::SampleFormat;

        let kernel = LanczosKernel::new(3);
        let make = |axis: Axis| {
            let plan = AxisPlan::new(&AxisGeometry::new(10_000, 1), &kernel, axis).unwrap();
            Scaler::new(
                &plan,
                &kernel,
                Normalization::Auto,
                SampleFormat::SCRATCH_FLOAT,
                SampleFormat::SCRATCH_FLOAT,
                1.,
                0.,
                false,
                axis,
            )
            .unwrap()
        };
        let (scaler_h, scaler_v) = (make(Axis::Horizontal), make(Axis::Vertical));
        let h = AxisSpan {
            scaler: Some(&scaler_h),
            offset: 0,
        };
        let v = AxisSpan {
            scaler: Some(&scaler_v),
            offset: 0,
        };
        assert_eq!(h.span(0, 1), (0, 10_000));
        assert_eq!(
            solve_tile_size(Roadmap::HorizontalFirst, &h, &v, 1, 1, 1 << 16),
            Err(ResizeError::TileSizing(MAX_BUFFER_BUDGET))
        );
        assert_eq!(
            solve_tile_size(Roadmap::VerticalFirst, &h, &v, 1, 1, 1 << 16),
            Ok(TileSize {
                width: 1,
                height: 1,
                scratch: 10_000
            })
        );
    }
}
