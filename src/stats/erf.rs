// Gauss error function, Abramowitz and Stegun 7.1.26.
//
// The base approximation only holds for x >= 0, the sign is restored with
// erf(-x) = -erf(x). Maximum absolute error is about 1.5e-7. Hazard curves
// computed elsewhere with these exact coefficients must be reproducible, so
// each term multiplies its coefficient by t left to right, one factor at a
// time, rather than reusing powers or using Horner form.

const P: f64 = 0.3275911;
const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;

pub fn erf(x: f64) -> f64 {
    if x < 0.0 {
        -erf_base(-x)
    } else {
        erf_base(x)
    }
}

#[inline]
fn erf_base(x: f64) -> f64 {
    let t = 1.0 / (1.0 + P * x);
    1.0 - (A1 * t
        + A2 * t * t
        + A3 * t * t * t
        + A4 * t * t * t * t
        + A5 * t * t * t * t * t)
        * (-x * x).exp()
}
