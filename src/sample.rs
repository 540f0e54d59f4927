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
use crate::images::{ResizePlane, ResizePlaneMut};
use crate::support::{PixelFormat, SampleEncoding};
use crate::ResizeError;
use num_traits::AsPrimitive;
use std::fmt::Debug;

/// Storage element of a plane.
///
/// Integer samples may be stored with a bias: the unsigned value is `raw + INT_BIAS`.
pub trait Sample: Copy + Default + Debug + Send + Sync + 'static + AsPrimitive<f32> {
    const INT_BIAS: i32;

    fn to_raw_int(self) -> i32;

    fn from_raw_int(v: i32) -> Self;

    /// Rounds to nearest, integer storage saturates
    fn from_float(v: f32) -> Self;
}

impl Sample for u8 {
    const INT_BIAS: i32 = 0;

    #[inline(always)]
    fn to_raw_int(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn from_raw_int(v: i32) -> Self {
        v as u8
    }

    #[inline(always)]
    fn from_float(v: f32) -> Self {
        v.round() as u8
    }
}

impl Sample for u16 {
    const INT_BIAS: i32 = 0;

    #[inline(always)]
    fn to_raw_int(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn from_raw_int(v: i32) -> Self {
        v as u16
    }

    #[inline(always)]
    fn from_float(v: f32) -> Self {
        v.round() as u16
    }
}

/// 16 bit values kept as signed numbers with `-32768` bias, layout of integer scratch buffers
impl Sample for i16 {
    const INT_BIAS: i32 = 1 << 15;

    #[inline(always)]
    fn to_raw_int(self) -> i32 {
        self as i32
    }

    #[inline(always)]
    fn from_raw_int(v: i32) -> Self {
        v as i16
    }

    #[inline(always)]
    fn from_float(v: f32) -> Self {
        (v - Self::INT_BIAS as f32).round() as i16
    }
}

impl Sample for f32 {
    const INT_BIAS: i32 = 0;

    #[inline(always)]
    fn to_raw_int(self) -> i32 {
        self.round() as i32
    }

    #[inline(always)]
    fn from_raw_int(v: i32) -> Self {
        v as f32
    }

    #[inline(always)]
    fn from_float(v: f32) -> Self {
        v
    }
}

/// Read access to a single row of samples
pub(crate) trait RowRead: Copy {
    const INT_BIAS: i32;

    /// Stored integer value, add [RowRead::INT_BIAS] to get the unsigned value
    fn read_int(&self, x: usize) -> i32;

    /// Unbiased value
    fn read_float(&self, x: usize) -> f32;

    /// Row starting at column `x`
    fn offset(self, x: usize) -> Self;
}

/// Write access to a single row of samples
pub(crate) trait RowWrite {
    const INT_BIAS: i32;

    /// Stores a value already shifted by the bias and clamped to the storage range
    fn write_int(&mut self, x: usize, v: i32);

    fn write_float(&mut self, x: usize, v: f32);

    /// Row starting at column `x`
    fn offset(self, x: usize) -> Self;
}

impl<T: Sample> RowRead for &[T] {
    const INT_BIAS: i32 = T::INT_BIAS;

    #[inline(always)]
    fn read_int(&self, x: usize) -> i32 {
        self[x].to_raw_int()
    }

    #[inline(always)]
    fn read_float(&self, x: usize) -> f32 {
        if T::INT_BIAS != 0 {
            (self[x].to_raw_int() + T::INT_BIAS) as f32
        } else {
            self[x].as_()
        }
    }

    #[inline(always)]
    fn offset(self, x: usize) -> Self {
        &self[x..]
    }
}

impl<T: Sample> RowWrite for &mut [T] {
    const INT_BIAS: i32 = T::INT_BIAS;

    #[inline(always)]
    fn write_int(&mut self, x: usize, v: i32) {
        self[x] = T::from_raw_int(v);
    }

    #[inline(always)]
    fn write_float(&mut self, x: usize, v: f32) {
        self[x] = T::from_float(v);
    }

    #[inline(always)]
    fn offset(self, x: usize) -> Self {
        &mut self[x..]
    }
}

/// Row of a stack16 plane: most significant bytes and least significant bytes
#[derive(Debug, Copy, Clone)]
pub struct Stack16Row<'a> {
    msb: &'a [u8],
    lsb: &'a [u8],
}

impl RowRead for Stack16Row<'_> {
    const INT_BIAS: i32 = 0;

    #[inline(always)]
    fn read_int(&self, x: usize) -> i32 {
        ((self.msb[x] as i32) << 8) | self.lsb[x] as i32
    }

    #[inline(always)]
    fn read_float(&self, x: usize) -> f32 {
        self.read_int(x) as f32
    }

    #[inline(always)]
    fn offset(self, x: usize) -> Self {
        Stack16Row {
            msb: &self.msb[x..],
            lsb: &self.lsb[x..],
        }
    }
}

#[derive(Debug)]
pub struct Stack16RowMut<'a> {
    msb: &'a mut [u8],
    lsb: &'a mut [u8],
}

impl RowWrite for Stack16RowMut<'_> {
    const INT_BIAS: i32 = 0;

    #[inline(always)]
    fn write_int(&mut self, x: usize, v: i32) {
        self.msb[x] = (v >> 8) as u8;
        self.lsb[x] = v as u8;
    }

    #[inline(always)]
    fn write_float(&mut self, x: usize, v: f32) {
        self.write_int(x, v.round().clamp(0., 65535.) as i32);
    }

    #[inline(always)]
    fn offset(self, x: usize) -> Self {
        Stack16RowMut {
            msb: &mut self.msb[x..],
            lsb: &mut self.lsb[x..],
        }
    }
}

/// Read only plane, rows are addressed relative to the view
pub(crate) trait PlaneRead: Sync {
    type Row<'r>: RowRead
    where
        Self: 'r;

    fn row(&self, y: usize) -> Self::Row<'_>;
}

pub(crate) trait PlaneWrite: Send {
    type Row<'r>: RowWrite
    where
        Self: 'r;

    fn row_mut(&mut self, y: usize) -> Self::Row<'_>;

    /// Splits the plane into bands of `rows` rows, last band may be shorter
    fn into_bands(self, rows: usize) -> Vec<Self>
    where
        Self: Sized;
}

/// Non owning view over `height` rows of `width` samples with `stride` elements per row
#[derive(Debug, Copy, Clone)]
pub struct PlaneView<'a, T> {
    data: &'a [T],
    stride: usize,
    width: usize,
    height: usize,
}

impl<'a, T: Sample> PlaneView<'a, T> {
    pub(crate) fn new(data: &'a [T], stride: usize, width: usize, height: usize) -> Self {
        PlaneView {
            data,
            stride,
            width,
            height,
        }
    }
}

impl<T: Sample> PlaneRead for PlaneView<'_, T> {
    type Row<'r>
        = &'r [T]
    where
        Self: 'r;

    #[inline(always)]
    fn row(&self, y: usize) -> &[T] {
        debug_assert!(y < self.height);
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }
}

#[derive(Debug)]
pub struct PlaneViewMut<'a, T> {
    data: &'a mut [T],
    stride: usize,
    width: usize,
    height: usize,
}

impl<'a, T: Sample> PlaneViewMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], stride: usize, width: usize, height: usize) -> Self {
        PlaneViewMut {
            data,
            stride,
            width,
            height,
        }
    }

    #[cfg(test)]
    pub(crate) fn height(&self) -> usize {
        self.height
    }
}

impl<T: Sample> PlaneWrite for PlaneViewMut<'_, T> {
    type Row<'r>
        = &'r mut [T]
    where
        Self: 'r;

    #[inline(always)]
    fn row_mut(&mut self, y: usize) -> &mut [T] {
        debug_assert!(y < self.height);
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    fn into_bands(self, rows: usize) -> Vec<Self> {
        let rows = rows.max(1);
        let (stride, width, height) = (self.stride, self.width, self.height);
        let used = stride * height;
        self.data[..used]
            .chunks_mut(stride * rows)
            .enumerate()
            .map(|(i, chunk)| PlaneViewMut {
                data: chunk,
                stride,
                width,
                height: rows.min(height - i * rows),
            })
            .collect()
    }
}

/// Stack16 plane: `height` rows of most significant bytes followed by `height` rows of
/// least significant bytes
#[derive(Debug, Copy, Clone)]
pub struct Stack16View<'a> {
    msb: PlaneView<'a, u8>,
    lsb: PlaneView<'a, u8>,
}

impl<'a> Stack16View<'a> {
    pub(crate) fn new(data: &'a [u8], stride: usize, width: usize, height: usize) -> Self {
        let (msb, lsb) = data.split_at(stride * height);
        Stack16View {
            msb: PlaneView::new(msb, stride, width, height),
            lsb: PlaneView::new(lsb, stride, width, height),
        }
    }
}

impl PlaneRead for Stack16View<'_> {
    type Row<'r>
        = Stack16Row<'r>
    where
        Self: 'r;

    #[inline(always)]
    fn row(&self, y: usize) -> Stack16Row<'_> {
        Stack16Row {
            msb: self.msb.row(y),
            lsb: self.lsb.row(y),
        }
    }
}

#[derive(Debug)]
pub struct Stack16ViewMut<'a> {
    msb: PlaneViewMut<'a, u8>,
    lsb: PlaneViewMut<'a, u8>,
}

impl<'a> Stack16ViewMut<'a> {
    pub(crate) fn new(data: &'a mut [u8], stride: usize, width: usize, height: usize) -> Self {
        let (msb, lsb) = data.split_at_mut(stride * height);
        Stack16ViewMut {
            msb: PlaneViewMut::new(msb, stride, width, height),
            lsb: PlaneViewMut::new(lsb, stride, width, height),
        }
    }
}

impl PlaneWrite for Stack16ViewMut<'_> {
    type Row<'r>
        = Stack16RowMut<'r>
    where
        Self: 'r;

    #[inline(always)]
    fn row_mut(&mut self, y: usize) -> Stack16RowMut<'_> {
        Stack16RowMut {
            msb: self.msb.row_mut(y),
            lsb: self.lsb.row_mut(y),
        }
    }

    fn into_bands(self, rows: usize) -> Vec<Self> {
        self.msb
            .into_bands(rows)
            .into_iter()
            .zip(self.lsb.into_bands(rows))
            .map(|(msb, lsb)| Stack16ViewMut { msb, lsb })
            .collect()
    }
}

/// Borrowed source plane in one of the supported layouts
#[derive(Debug, Copy, Clone)]
pub enum SourceKind<'a> {
    U8(PlaneView<'a, u8>),
    U16(PlaneView<'a, u16>),
    Stack16(Stack16View<'a>),
    F32(PlaneView<'a, f32>),
}

/// Borrowed destination plane in one of the supported layouts
#[derive(Debug)]
pub enum DestinationKind<'a> {
    U8(PlaneViewMut<'a, u8>),
    U16(PlaneViewMut<'a, u16>),
    Stack16(Stack16ViewMut<'a>),
    F32(PlaneViewMut<'a, f32>),
}

mod private {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for f32 {}
}

/// Element types accepted by [crate::FilterResize]: `u8` (8 bit and stack16 planes),
/// `u16` (9..16 bit planes) and `f32`.
pub trait ResizeSample: private::Sealed + Copy + Debug + Default + Send + Sync {
    #[doc(hidden)]
    fn source<'a>(
        plane: &'a ResizePlane<'_, Self>,
        format: &PixelFormat,
    ) -> Result<SourceKind<'a>, ResizeError>;

    #[doc(hidden)]
    fn destination<'a>(
        plane: &'a mut ResizePlaneMut<'_, Self>,
        format: &PixelFormat,
    ) -> Result<DestinationKind<'a>, ResizeError>;
}

impl ResizeSample for u8 {
    fn source<'a>(
        plane: &'a ResizePlane<'_, u8>,
        format: &PixelFormat,
    ) -> Result<SourceKind<'a>, ResizeError> {
        let (stride, width, height) = plane_dims(plane.stride, plane.width, plane.height);
        match format.encoding {
            SampleEncoding::U8 => Ok(SourceKind::U8(PlaneView::new(
                plane.data, stride, width, height,
            ))),
            SampleEncoding::Stack16 => Ok(SourceKind::Stack16(Stack16View::new(
                plane.data, stride, width, height,
            ))),
            _ => Err(ResizeError::FormatMismatch),
        }
    }

    fn destination<'a>(
        plane: &'a mut ResizePlaneMut<'_, u8>,
        format: &PixelFormat,
    ) -> Result<DestinationKind<'a>, ResizeError> {
        let (stride, width, height) = plane_dims(plane.stride, plane.width, plane.height);
        let data = plane.data.as_mut();
        match format.encoding {
            SampleEncoding::U8 => Ok(DestinationKind::U8(PlaneViewMut::new(
                data, stride, width, height,
            ))),
            SampleEncoding::Stack16 => Ok(DestinationKind::Stack16(Stack16ViewMut::new(
                data, stride, width, height,
            ))),
            _ => Err(ResizeError::FormatMismatch),
        }
    }
}

impl ResizeSample for u16 {
    fn source<'a>(
        plane: &'a ResizePlane<'_, u16>,
        format: &PixelFormat,
    ) -> Result<SourceKind<'a>, ResizeError> {
        if format.encoding != SampleEncoding::U16 {
            return Err(ResizeError::FormatMismatch);
        }
        let (stride, width, height) = plane_dims(plane.stride, plane.width, plane.height);
        Ok(SourceKind::U16(PlaneView::new(
            plane.data, stride, width, height,
        )))
    }

    fn destination<'a>(
        plane: &'a mut ResizePlaneMut<'_, u16>,
        format: &PixelFormat,
    ) -> Result<DestinationKind<'a>, ResizeError> {
        if format.encoding != SampleEncoding::U16 {
            return Err(ResizeError::FormatMismatch);
        }
        let (stride, width, height) = plane_dims(plane.stride, plane.width, plane.height);
        Ok(DestinationKind::U16(PlaneViewMut::new(
            plane.data.as_mut(),
            stride,
            width,
            height,
        )))
    }
}

impl ResizeSample for f32 {
    fn source<'a>(
        plane: &'a ResizePlane<'_, f32>,
        format: &PixelFormat,
    ) -> Result<SourceKind<'a>, ResizeError> {
        if format.encoding != SampleEncoding::F32 {
            return Err(ResizeError::FormatMismatch);
        }
        let (stride, width, height) = plane_dims(plane.stride, plane.width, plane.height);
        Ok(SourceKind::F32(PlaneView::new(
            plane.data, stride, width, height,
        )))
    }

    fn destination<'a>(
        plane: &'a mut ResizePlaneMut<'_, f32>,
        format: &PixelFormat,
    ) -> Result<DestinationKind<'a>, ResizeError> {
        if format.encoding != SampleEncoding::F32 {
            return Err(ResizeError::FormatMismatch);
        }
        let (stride, width, height) = plane_dims(plane.stride, plane.width, plane.height);
        Ok(DestinationKind::F32(PlaneViewMut::new(
            plane.data.as_mut(),
            stride,
            width,
            height,
        )))
    }
}

#[inline]
fn plane_dims(stride: u32, width: u32, height: u32) -> (usize, usize, usize) {
    (stride as usize, width as usize, height as usize)
}
