use std::f64::consts::TAU;

/// `k (x - x0)²`, the symmetric restraint in the legacy convention (no factor of one half).
#[inline]
pub fn harmonic(x: f64, x0: f64, k: f64) -> f64 {
    let dx = x - x0;
    k * dx * dx
}

/// `step(x - x0) k (x - x0)²`: zero until `x` exceeds `x0`.
#[inline]
pub fn upper_wall(x: f64, x0: f64, k: f64) -> f64 {
    if x > x0 { harmonic(x, x0, k) } else { 0.0 }
}

/// `step(-(x - x0)) k (x - x0)²`: zero until `x` drops below `x0`.
#[inline]
pub fn lower_wall(x: f64, x0: f64, k: f64) -> f64 {
    if x < x0 { harmonic(x, x0, k) } else { 0.0 }
}

/// Harmonic restraint on a periodic coordinate, using the minimum of `|Δ|`, `|Δ + 2π|` and
/// `|Δ - 2π|` as the deviation.
#[inline]
pub fn periodic_harmonic(theta: f64, theta0: f64, k: f64) -> f64 {
    let delta = theta - theta0;
    let d = delta.abs().min((delta + TAU).abs()).min((delta - TAU).abs());
    k * d * d
}
