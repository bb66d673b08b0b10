//! Input helpers: deterministic random arrays and value-list parsing.

use anyhow::{ensure, Context, Result};
use rand::{rngs::StdRng, Rng as _, SeedableRng};

/// `n` integers drawn uniformly from `[0, upper)` with a fixed seed.
///
/// Integers keep every algorithm (including counting and radix) applicable.
#[must_use]
pub fn random_values(n: usize, upper: u32, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let upper = upper.max(1);
    (0..n).map(|_| f64::from(rng.random_range(0..upper))).collect()
}

/// Parse `"5, 3 8,1"` style lists (commas and/or whitespace).
///
/// Non-finite values are rejected: JSON cannot carry them.
///
/// # Errors
/// Fails on the first token that is not a finite number.
pub fn parse_values(s: &str) -> Result<Vec<f64>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(i, t)| {
            let v = t
                .parse::<f64>()
                .with_context(|| format!("value {} ({t:?}) is not a number", i + 1))?;
            ensure!(v.is_finite(), "value {} ({t:?}) is not finite", i + 1);
            Ok(v)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_is_seeded() {
        let a = random_values(32, 100, 42);
        let b = random_values(32, 100, 42);
        let c = random_values(32, 100, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|v| (0.0..100.0).contains(v) && v.fract() == 0.0));
    }

    #[test]
    fn parses_mixed_separators() {
        assert_eq!(parse_values("5, 3 8,1").unwrap(), vec![5.0, 3.0, 8.0, 1.0]);
        assert_eq!(parse_values("  ").unwrap(), Vec::<f64>::new());
        assert_eq!(parse_values("-2.5,1e2").unwrap(), vec![-2.5, 100.0]);
        let err = parse_values("1,x").unwrap_err();
        assert!(err.to_string().contains("value 2"));
        assert!(parse_values("1,inf").is_err());
        assert!(parse_values("NaN").is_err());
    }
}
