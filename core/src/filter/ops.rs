//! Numeric filter primitives
//!
//! Separable correlation with half-sample symmetric ("reflect") boundaries:
//! a lane `a b c d` is extended as `d c b a | a b c d | d c b a`. All
//! functions preserve the input shape.

use ndarray::{Array2, Axis};

/// Gaussian kernels extend to this many standard deviations
const TRUNCATE: f64 = 4.0;

/// Largest sigma a Gaussian filter accepts; the kernel then has 2049 taps
pub const MAX_SIGMA: f64 = 256.0;

/// Builds a normalized 1-D Gaussian kernel
///
/// The kernel radius is `round(4 * sigma)`; `sigma == 0` gives `[1.0]`.
/// Sigma is clamped to `[0, MAX_SIGMA]`.
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let sigma = sigma.clamp(0.0, MAX_SIGMA);
    let radius = (TRUNCATE * sigma + 0.5) as usize;
    if radius == 0 {
        return vec![1.0];
    }

    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = i as f64 - radius as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Gaussian smoothing along both axes
pub fn smooth(input: &Array2<f64>, sigma: f64) -> Array2<f64> {
    let kernel = gaussian_kernel(sigma);
    let rows_done = correlate1d(input, &kernel, Axis(0));
    correlate1d(&rows_done, &kernel, Axis(1))
}

/// Sobel derivative along `axis`, smoothed across the other axis
pub fn gradient(input: &Array2<f64>, axis: Axis) -> Array2<f64> {
    let cross = Axis(1 - axis.index());
    let derivative = correlate1d(input, &[-1.0, 0.0, 1.0], axis);
    correlate1d(&derivative, &[1.0, 2.0, 1.0], cross)
}

/// Correlates every lane along `axis` with an odd-length weight vector
pub fn correlate1d(input: &Array2<f64>, weights: &[f64], axis: Axis) -> Array2<f64> {
    let radius = (weights.len() / 2) as isize;
    let mut output = Array2::zeros(input.raw_dim());

    for (in_lane, mut out_lane) in input.lanes(axis).into_iter().zip(output.lanes_mut(axis)) {
        let n = in_lane.len();
        for i in 0..n {
            let mut acc = 0.0;
            for (k, w) in weights.iter().enumerate() {
                let offset = i as isize + k as isize - radius;
                acc += w * in_lane[reflect_index(offset, n)];
            }
            out_lane[i] = acc;
        }
    }

    output
}

/// Maps an out-of-range index back into `0..n` by mirroring at the edges
fn reflect_index(index: isize, n: usize) -> usize {
    let n = n as isize;
    let period = 2 * n;
    let wrapped = index.rem_euclid(period);
    if wrapped < n {
        wrapped as usize
    } else {
        (period - 1 - wrapped) as usize
    }
}

/// Percentile of pre-sorted values using linear interpolation
///
/// `p` is in percent. Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
