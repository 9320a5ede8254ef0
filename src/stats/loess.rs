// src/stats/loess.rs

use crate::stats::ols;

/// Local linear regression with a tricube kernel. For each input x the
/// `frac`-nearest neighbors are weighted by distance and a weighted line
/// is fit through them; the smoothed value is that line evaluated at x.
/// No robustness iterations. Inputs must be sorted by x ascending.
pub fn smooth(xs: &[f64], ys: &[f64], frac: f64) -> Vec<f64> {
    let n = xs.len();
    if n == 0 || ys.len() != n {
        return Vec::new();
    }
    if n == 1 {
        return vec![ys[0]];
    }

    let span = ((frac * n as f64).ceil() as usize).clamp(2, n);
    let mut fitted = Vec::with_capacity(n);

    for i in 0..n {
        let (lo, hi) = window(xs, i, span);
        let max_dist = (xs[i] - xs[lo]).abs().max((xs[hi - 1] - xs[i]).abs());

        let mut weights = Vec::with_capacity(hi - lo);
        for &x in &xs[lo..hi] {
            weights.push(tricube((x - xs[i]).abs(), max_dist));
        }

        fitted.push(weighted_fit_at(&xs[lo..hi], &ys[lo..hi], &weights, xs[i]));
    }

    fitted
}

/// Index range of the `span` nearest neighbors of xs[i].
fn window(xs: &[f64], i: usize, span: usize) -> (usize, usize) {
    let n = xs.len();
    // Expand greedily from i, taking the nearer neighbor each step.
    let mut lo = i;
    let mut hi = i + 1;
    while hi - lo < span {
        let take_left = lo > 0 && (hi == n || xs[i] - xs[lo - 1] <= xs[hi] - xs[i]);
        if take_left {
            lo -= 1;
        } else {
            hi += 1;
        }
    }
    (lo, hi)
}

fn tricube(dist: f64, max_dist: f64) -> f64 {
    if max_dist <= 0.0 {
        return 1.0;
    }
    let u = (dist / max_dist).min(1.0);
    let t = 1.0 - u * u * u;
    t * t * t
}

/// Weighted least squares line through the window, evaluated at x0.
/// Falls back to the weighted mean when the window is degenerate.
fn weighted_fit_at(xs: &[f64], ys: &[f64], ws: &[f64], x0: f64) -> f64 {
    let sw: f64 = ws.iter().sum();
    if sw <= 0.0 {
        return ols::fit(xs, ys).map_or(mean(ys), |f| f.predict(x0));
    }

    let mean_x: f64 = xs.iter().zip(ws).map(|(x, w)| x * w).sum::<f64>() / sw;
    let mean_y: f64 = ys.iter().zip(ws).map(|(y, w)| y * w).sum::<f64>() / sw;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for ((&x, &y), &w) in xs.iter().zip(ys).zip(ws) {
        sxx += w * (x - mean_x) * (x - mean_x);
        sxy += w * (x - mean_x) * (y - mean_y);
    }

    if sxx == 0.0 {
        return mean_y;
    }
    let slope = sxy / sxx;
    mean_y + slope * (x0 - mean_x)
}

fn mean(ys: &[f64]) -> f64 {
    if ys.is_empty() {
        0.0
    } else {
        ys.iter().sum::<f64>() / ys.len() as f64
    }
}
