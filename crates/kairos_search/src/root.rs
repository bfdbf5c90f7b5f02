//! Bounded bisection root finder shared by the event searches.
//!
//! Standard numerical bisection on a bracketed sign change. The caller
//! chooses tolerance and iteration cap; running out of iterations is
//! reported instead of returning an unconverged midpoint.

use thiserror::Error;

/// Bisection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectConfig {
    /// Maximum number of halvings.
    pub max_iterations: u32,
    /// Stop once the bracket is narrower than this (same unit as the argument).
    pub tolerance: f64,
}

impl Default for BisectConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-8,
        }
    }
}

impl BisectConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err("tolerance must be positive");
        }
        Ok(())
    }
}

/// Why a bisection did not produce a root.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BisectError<E> {
    #[error("function does not change sign over the bracket")]
    NotBracketed,
    #[error("no convergence after {iterations} iterations (bracket width {width})")]
    NotConverged { iterations: u32, width: f64 },
    #[error("evaluation failed: {0}")]
    Eval(E),
}

/// Find a zero of `f` between `a` and `b`.
///
/// `f(a)` and `f(b)` must have opposite signs (or one of them be zero).
/// Returns the midpoint of the final bracket.
pub fn bisect_root<F, E>(
    a: f64,
    b: f64,
    mut f: F,
    config: &BisectConfig,
) -> Result<f64, BisectError<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let (mut t_a, mut t_b) = if a <= b { (a, b) } else { (b, a) };
    let mut f_a = f(t_a).map_err(BisectError::Eval)?;
    let f_b = f(t_b).map_err(BisectError::Eval)?;

    if f_a == 0.0 {
        return Ok(t_a);
    }
    if f_b == 0.0 {
        return Ok(t_b);
    }
    if f_a * f_b > 0.0 || !(f_a * f_b).is_finite() {
        return Err(BisectError::NotBracketed);
    }

    for _ in 0..config.max_iterations {
        if (t_b - t_a).abs() < config.tolerance {
            return Ok(0.5 * (t_a + t_b));
        }
        let t_mid = 0.5 * (t_a + t_b);
        let f_mid = f(t_mid).map_err(BisectError::Eval)?;

        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
    }

    let width = (t_b - t_a).abs();
    if width < config.tolerance {
        Ok(0.5 * (t_a + t_b))
    } else {
        Err(BisectError::NotConverged {
            iterations: config.max_iterations,
            width,
        })
    }
}
