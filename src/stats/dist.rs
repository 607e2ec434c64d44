//! Tail probabilities for the chi-square and F distributions.
//!
//! No crate in our stack ships these CDFs, so we carry the small set of
//! special-function kernels they need: Lanczos `ln_gamma`, the regularized
//! incomplete gamma function (series + Lentz continued fraction), and the
//! regularized incomplete beta function. Accuracy is far beyond what a
//! printed p-value needs (~1e-12 relative over the ranges we use).

/// Maximum iterations for the series/continued-fraction evaluations.
const MAX_ITER: usize = 500;

/// Convergence threshold relative to the running value.
const EPS: f64 = 1e-14;

/// Smallest representable scale used to keep Lentz's method away from zero.
const TINY: f64 = 1e-300;

/// Natural log of the gamma function (Lanczos approximation, g = 7).
pub fn ln_gamma(x: f64) -> f64 {
    // Coefficients for g = 7, n = 9 (Godfrey's table).
    const COEF: [f64; 8] = [
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const SQRT_TWO_PI: f64 = 2.5066282746310002;

    if x < 0.5 {
        // Reflection formula keeps the approximation in its accurate range.
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut acc = 0.99999999999980993;
    for (i, c) in COEF.iter().enumerate() {
        acc += c / (x + i as f64 + 1.0);
    }
    let t = x + 7.5;
    (SQRT_TWO_PI * acc).ln() + (x + 0.5) * t.ln() - t
}

/// Regularized lower incomplete gamma function P(a, x).
pub fn reg_gamma_lower(a: f64, x: f64) -> f64 {
    debug_assert!(a > 0.0 && x >= 0.0);
    if x == 0.0 {
        return 0.0;
    }
    if x < a + 1.0 {
        gamma_series(a, x)
    } else {
        1.0 - gamma_cont_frac(a, x)
    }
}

/// Regularized upper incomplete gamma function Q(a, x) = 1 - P(a, x).
pub fn reg_gamma_upper(a: f64, x: f64) -> f64 {
    debug_assert!(a > 0.0 && x >= 0.0);
    if x == 0.0 {
        return 1.0;
    }
    if x < a + 1.0 {
        1.0 - gamma_series(a, x)
    } else {
        gamma_cont_frac(a, x)
    }
}

/// Series expansion of P(a, x), convergent for x < a + 1.
fn gamma_series(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut term = 1.0 / a;
    let mut sum = term;
    for _ in 0..MAX_ITER {
        ap += 1.0;
        term *= x / ap;
        sum += term;
        if term.abs() < sum.abs() * EPS {
            break;
        }
    }
    sum * (-x + a * x.ln() - ln_gamma(a)).exp()
}

/// Continued-fraction expansion of Q(a, x), convergent for x >= a + 1
/// (modified Lentz's method).
fn gamma_cont_frac(a: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / TINY;
    let mut d = 1.0 / b;
    let mut h = d;

    for i in 1..=MAX_ITER {
        let an = -(i as f64) * (i as f64 - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < TINY {
            d = TINY;
        }
        c = b + an / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < EPS {
            break;
        }
    }

    h * (-x + a * x.ln() - ln_gamma(a)).exp()
}

/// Regularized incomplete beta function I_x(a, b).
pub fn reg_inc_beta(a: f64, b: f64, x: f64) -> f64 {
    debug_assert!(a > 0.0 && b > 0.0);
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let front =
        (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln()).exp();

    // Use the continued fraction in its fast-converging region and the
    // symmetry relation elsewhere.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_cont_frac(a, b, x) / a
    } else {
        1.0 - reg_inc_beta(b, a, 1.0 - x)
    }
}

/// Continued fraction for the incomplete beta function (modified Lentz).
fn beta_cont_frac(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step.
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        // Odd step.
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < EPS {
            break;
        }
    }

    h
}

/// Survival function of the chi-square distribution with `df` degrees of
/// freedom: P(X > x) = Q(df/2, x/2).
pub fn chi_square_sf(x: f64, df: usize) -> f64 {
    debug_assert!(df > 0);
    if x <= 0.0 {
        return 1.0;
    }
    reg_gamma_upper(df as f64 / 2.0, x / 2.0)
}

/// Survival function of the F distribution with (`d1`, `d2`) degrees of
/// freedom: P(F > f) = I_{d2/(d2 + d1 f)}(d2/2, d1/2).
pub fn f_sf(f: f64, d1: usize, d2: usize) -> f64 {
    debug_assert!(d1 > 0 && d2 > 0);
    if f <= 0.0 {
        return 1.0;
    }
    let (d1f, d2f) = (d1 as f64, d2 as f64);
    reg_inc_beta(d2f / 2.0, d1f / 2.0, d2f / (d2f + d1f * f))
}
