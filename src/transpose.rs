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
use crate::format_blit::FormatBlit;
use crate::sample::{PlaneRead, PlaneWrite, RowWrite};

const BLOCK_SIZE: usize = 16;

/// `rows` x `cols` samples read at `(in_row, in_col)` and stored from `(out_row, out_col)`.
///
/// A transpose writes them as `cols` x `rows` samples.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub(crate) struct PlaneRegion {
    pub(crate) in_row: usize,
    pub(crate) in_col: usize,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) out_row: usize,
    pub(crate) out_col: usize,
}

/// Transposes a region converting every sample through `blit`.
///
/// Works in square blocks so both planes are walked with short strides.
pub(crate) fn transpose_plane<P: PlaneRead, W: PlaneWrite>(
    src: &P,
    dst: &mut W,
    rect: &PlaneRegion,
    blit: &FormatBlit,
) {
    for by in (0..rect.rows).step_by(BLOCK_SIZE) {
        let y_end = (by + BLOCK_SIZE).min(rect.rows);
        for bx in (0..rect.cols).step_by(BLOCK_SIZE) {
            let x_end = (bx + BLOCK_SIZE).min(rect.cols);
            for x in bx..x_end {
                let mut dst_line = dst.row_mut(rect.out_row + x).offset(rect.out_col);
                for y in by..y_end {
                    let src_line = src.row(rect.in_row + y);
                    blit.convert(&src_line, rect.in_col + x, &mut dst_line, y);
                }
            }
        }
    }
}
