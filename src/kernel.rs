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
use std::f64::consts::PI;

/// Continuous FIR kernel sampled when resampling tables are built.
///
/// `value` is evaluated in kernel space, where zero crossings of interpolating kernels
/// lie on integer positions. Kernels with zero support are treated as nearest neighbour sampling.
pub trait ResampleKernel {
    /// Half width of the kernel footprint
    fn support(&self) -> f64;
    /// Kernel value at distance `x` from the center
    fn value(&self, x: f64) -> f64;
}

#[inline]
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-9 {
        1.
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Nearest neighbour sampling
#[derive(Debug, Copy, Clone, Default)]
pub struct PointKernel;

impl ResampleKernel for PointKernel {
    fn support(&self) -> f64 {
        0.
    }

    fn value(&self, x: f64) -> f64 {
        if x.abs() <= 0.5 {
            1.
        } else {
            0.
        }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct BoxKernel;

impl ResampleKernel for BoxKernel {
    fn support(&self) -> f64 {
        0.5
    }

    fn value(&self, x: f64) -> f64 {
        if x.abs() <= 0.5 {
            1.
        } else {
            0.
        }
    }
}

/// Triangle kernel
#[derive(Debug, Copy, Clone, Default)]
pub struct BilinearKernel;

impl ResampleKernel for BilinearKernel {
    fn support(&self) -> f64 {
        1.
    }

    fn value(&self, x: f64) -> f64 {
        (1. - x.abs()).max(0.)
    }
}

/// Mitchell-Netravali family of cubic kernels.
#[derive(Debug, Copy, Clone)]
pub struct BicubicKernel {
    pub b: f64,
    pub c: f64,
}

impl BicubicKernel {
    pub const fn new(b: f64, c: f64) -> BicubicKernel {
        BicubicKernel { b, c }
    }

    pub const fn catmull_rom() -> BicubicKernel {
        BicubicKernel::new(0., 0.5)
    }

    pub const fn mitchell() -> BicubicKernel {
        BicubicKernel::new(1. / 3., 1. / 3.)
    }
}

impl Default for BicubicKernel {
    fn default() -> Self {
        BicubicKernel::new(1. / 3., 1. / 3.)
    }
}

impl ResampleKernel for BicubicKernel {
    fn support(&self) -> f64 {
        2.
    }

    fn value(&self, x: f64) -> f64 {
        let (b, c) = (self.b, self.c);
        let x = x.abs();
        if x < 1. {
            ((12. - 9. * b - 6. * c) * x * x * x + (-18. + 12. * b + 6. * c) * x * x + (6. - 2. * b))
                / 6.
        } else if x < 2. {
            ((-b - 6. * c) * x * x * x
                + (6. * b + 30. * c) * x * x
                + (-12. * b - 48. * c) * x
                + (8. * b + 24. * c))
                / 6.
        } else {
            0.
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct LanczosKernel {
    taps: u32,
}

impl LanczosKernel {
    pub fn new(taps: u32) -> LanczosKernel {
        LanczosKernel { taps: taps.max(1) }
    }
}

impl Default for LanczosKernel {
    fn default() -> Self {
        LanczosKernel::new(4)
    }
}

impl ResampleKernel for LanczosKernel {
    fn support(&self) -> f64 {
        self.taps as f64
    }

    fn value(&self, x: f64) -> f64 {
        let taps = self.taps as f64;
        if x.abs() >= taps {
            return 0.;
        }
        sinc(x) * sinc(x / taps)
    }
}

/// Cubic splines with 2, 3 or 4 lobes: spline16, spline36, spline64
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum SplineKernel {
    Spline16,
    Spline36,
    Spline64,
}

impl ResampleKernel for SplineKernel {
    fn support(&self) -> f64 {
        match self {
            SplineKernel::Spline16 => 2.,
            SplineKernel::Spline36 => 3.,
            SplineKernel::Spline64 => 4.,
        }
    }

    fn value(&self, x: f64) -> f64 {
        let x = x.abs();
        match self {
            SplineKernel::Spline16 => {
                if x < 1. {
                    ((x - 9. / 5.) * x - 1. / 5.) * x + 1.
                } else if x < 2. {
                    let x = x - 1.;
                    ((-1. / 3. * x + 4. / 5.) * x - 7. / 15.) * x
                } else {
                    0.
                }
            }
            SplineKernel::Spline36 => {
                if x < 1. {
                    ((13. / 11. * x - 453. / 209.) * x - 3. / 209.) * x + 1.
                } else if x < 2. {
                    let x = x - 1.;
                    ((-6. / 11. * x + 270. / 209.) * x - 156. / 209.) * x
                } else if x < 3. {
                    let x = x - 2.;
                    ((1. / 11. * x - 45. / 209.) * x + 26. / 209.) * x
                } else {
                    0.
                }
            }
            SplineKernel::Spline64 => {
                if x < 1. {
                    ((49. / 41. * x - 6387. / 2911.) * x - 3. / 2911.) * x + 1.
                } else if x < 2. {
                    let x = x - 1.;
                    ((-24. / 41. * x + 4032. / 2911.) * x - 2328. / 2911.) * x
                } else if x < 3. {
                    let x = x - 2.;
                    ((6. / 41. * x - 1008. / 2911.) * x + 582. / 2911.) * x
                } else if x < 4. {
                    let x = x - 3.;
                    ((-1. / 41. * x + 168. / 2911.) * x - 97. / 2911.) * x
                } else {
                    0.
                }
            }
        }
    }
}

/// Gaussian bell `2^(-p/10 * x^2)`, higher `p` gives a sharper kernel.
#[derive(Debug, Copy, Clone)]
pub struct GaussianKernel {
    pub p: f64,
}

impl GaussianKernel {
    pub fn new(p: f64) -> GaussianKernel {
        GaussianKernel {
            p: p.clamp(0.1, 100.),
        }
    }
}

impl Default for GaussianKernel {
    fn default() -> Self {
        GaussianKernel::new(30.)
    }
}

impl ResampleKernel for GaussianKernel {
    fn support(&self) -> f64 {
        4.
    }

    fn value(&self, x: f64) -> f64 {
        if x.abs() >= 4. {
            return 0.;
        }
        2f64.powf(-self.p * 0.1 * x * x)
    }
}
