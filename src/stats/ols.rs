// src/stats/ols.rs

/// Ordinary least squares fit of y = intercept + slope * x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    pub slope: f64,
    pub intercept: f64,
}

impl OlsFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Fits a line through (xs, ys). Returns `None` for a degenerate group:
/// fewer than two points, mismatched lengths, or zero x-variance.
pub fn fit(xs: &[f64], ys: &[f64]) -> Option<OlsFit> {
    let n = xs.len();
    if n < 2 || ys.len() != n {
        return None;
    }

    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(OlsFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_linear_relationship() {
        // price = 100000 + 150 * sqft
        let sqft = [800.0, 1000.0, 1250.0, 1600.0, 2100.0];
        let price: Vec<f64> = sqft.iter().map(|s| 100_000.0 + 150.0 * s).collect();

        let fit = fit(&sqft, &price).unwrap();
        assert!((fit.slope - 150.0).abs() < 1e-9);
        assert!((fit.intercept - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn single_point_is_degenerate() {
        assert!(fit(&[1200.0], &[350_000.0]).is_none());
    }

    #[test]
    fn zero_x_variance_is_degenerate() {
        assert!(fit(&[1000.0, 1000.0, 1000.0], &[1.0, 2.0, 3.0]).is_none());
    }
}
