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
use crate::resize_error::{check_destination_plane, check_source_plane};
use crate::ResizeError;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn as_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

#[derive(Debug, Clone)]
/// Non-owning representation of a single image plane.
///
/// Stack16 planes are `u8` planes holding `height` rows of most significant bytes
/// followed by `height` rows of least significant bytes.
pub struct ResizePlane<'a, T>
where
    T: Copy + Debug,
{
    pub data: &'a [T],
    /// Stride here always means Elements per row.
    pub stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<'a, T> ResizePlane<'a, T>
where
    T: Copy + Debug,
{
    pub fn new(data: &'a [T], stride: u32, width: u32, height: u32) -> Self {
        ResizePlane {
            data,
            stride,
            width,
            height,
        }
    }

    /// `planes` is 2 for stack16 layout
    pub fn check_constraints(&self, planes: usize) -> Result<(), ResizeError> {
        check_source_plane(self.data, self.stride, self.width, self.height, planes)
    }
}

#[derive(Debug)]
/// Mutable representation of a single image plane
pub struct ResizePlaneMut<'a, T>
where
    T: Copy + Debug,
{
    pub data: BufferStoreMut<'a, T>,
    /// Stride here always means Elements per row.
    pub stride: u32,
    pub width: u32,
    pub height: u32,
}

impl<T> ResizePlaneMut<'_, T>
where
    T: Copy + Debug,
{
    pub fn check_constraints(&self, planes: usize) -> Result<(), ResizeError> {
        check_destination_plane(
            self.data.borrow(),
            self.stride,
            self.width,
            self.height,
            planes,
        )
    }

    pub fn to_fixed(&self) -> ResizePlane<'_, T> {
        ResizePlane {
            data: self.data.borrow(),
            stride: self.stride,
            width: self.width,
            height: self.height,
        }
    }
}

impl<'a, T> ResizePlaneMut<'a, T>
where
    T: Default + Clone + Copy + Debug,
{
    /// Allocates a plane with stride equal to width
    pub fn alloc(width: u32, height: u32) -> Self {
        ResizePlaneMut {
            data: BufferStoreMut::Owned(vec![T::default(); width as usize * height as usize]),
            stride: width,
            width,
            height,
        }
    }

    pub fn borrowed(data: &'a mut [T], stride: u32, width: u32, height: u32) -> Self {
        ResizePlaneMut {
            data: BufferStoreMut::Borrowed(data),
            stride,
            width,
            height,
        }
    }
}

impl ResizePlaneMut<'_, u8> {
    /// Allocates a stack16 plane: two stacked byte planes of `width` x `height`
    pub fn alloc_stack16(width: u32, height: u32) -> Self {
        ResizePlaneMut {
            data: BufferStoreMut::Owned(vec![0u8; width as usize * height as usize * 2]),
            stride: width,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_constraints() {
        let plane = ResizePlaneMut::<u16>::alloc(5, 3);
        assert!(plane.check_constraints(1).is_ok());
        assert!(plane.to_fixed().check_constraints(1).is_ok());
        assert!(plane.check_constraints(2).is_err());

        let stacked = ResizePlaneMut::alloc_stack16(5, 3);
        assert_eq!(stacked.data.borrow().len(), 30);
        assert!(stacked.check_constraints(2).is_ok());

        let mut storage = vec![0f32; 10];
        let borrowed = ResizePlaneMut::borrowed(&mut storage, 4, 4, 2);
        assert_eq!(
            borrowed.check_constraints(1),
            Err(ResizeError::DestinationSizeMismatch(
                crate::resize_error::MismatchedSize {
                    expected: 8,
                    received: 10,
                }
            ))
        );
    }
}
