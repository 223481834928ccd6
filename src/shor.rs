//! Shor's factorization algorithm, demonstrated at pedagogical scale.
//!
//! The quantum part estimates the period of a^x mod N: a uniform estimation
//! register entangled with the modular-exponentiation residues is collapsed
//! by measuring the work register, the inverse QFT is applied to the
//! estimation register, and one measurement yields an approximate phase s/r.
//! The classical part recovers r by continued fractions and derives factors
//! from gcd(a^(r/2) +- 1, N). Inconclusive runs are retried with a fresh
//! random base up to a fixed attempt budget.

use anyhow::Result;
use num_complex::Complex;
use rand::Rng;

use crate::{measure, qft, QState, Qbit};

/// Cap on the estimation register so a run cannot allocate an absurd state
/// vector. 20 qubits is a 2^20 dense state, still fine on a laptop.
const MAX_ESTIMATION_QUBITS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Factors { p: u64, q: u64 },
    Exhausted { attempts: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attempt {
    Factors { p: u64, q: u64 },
    Inconclusive,
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let rem = a % b;
        a = b;
        b = rem;
    }
    a
}

pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut result = 1;
    let mut base = base % modulus;
    while exp > 0 {
        if exp % 2 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exp /= 2;
    }
    result
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Brute-force order finding: the smallest r > 0 with a^r = 1 (mod n).
/// Used by the demo to verify what the quantum subroutine estimates.
pub fn classical_order(a: u64, n: u64) -> Option<u64> {
    if gcd(a, n) != 1 {
        return None;
    }

    let mut r = 1;
    let mut value = a % n;
    while value != 1 {
        value = value * a % n;
        r += 1;
        if r > n {
            return None;
        }
    }
    Some(r)
}

/// Reject inputs the algorithm is not meant for, before any simulation runs.
pub fn validate(n: u64) -> Result<()> {
    if n <= 3 {
        return Err(anyhow::anyhow!("N must be greater than 3, got {}", n));
    }
    if n % 2 == 0 {
        return Err(anyhow::anyhow!(
            "N = {} is even, 2 divides it trivially; choose an odd composite",
            n
        ));
    }
    if is_prime(n) {
        return Err(anyhow::anyhow!(
            "N = {} is prime and has no nontrivial factors",
            n
        ));
    }
    estimation_qubits(n)?;
    Ok(())
}

/// Width of the estimation register: twice the bit length of N.
pub fn estimation_qubits(n: u64) -> Result<usize> {
    let bits = n.ilog2() as usize + 1;
    let t = 2 * bits;
    if t > MAX_ESTIMATION_QUBITS {
        return Err(anyhow::anyhow!(
            "N = {} needs {} estimation qubits, more than the {} this simulator allows",
            n,
            t,
            MAX_ESTIMATION_QUBITS
        ));
    }
    Ok(t)
}

/// One round of quantum phase estimation for a^x mod n.
///
/// Returns the measured value k of the t-qubit estimation register together
/// with the register size 2^t; k/2^t approximates s/r for a random s.
pub fn measure_phase(a: u64, n: u64, t: usize, rng: &mut impl Rng) -> Result<(usize, usize)> {
    let size = 1_usize << t;

    let mut powers = Vec::with_capacity(size);
    let mut value = 1_u64;
    for _ in 0..size {
        powers.push(value);
        value = value * a % n;
    }

    // Measuring the work register collapses the estimation register onto the
    // exponents sharing one residue: |i0>, |i0 + r>, |i0 + 2r>, ...
    let drawn = rng.random_range(0..size);
    let residue = powers[drawn];
    let hits = powers.iter().filter(|&&p| p == residue).count();
    let amplitude = Complex::new(1.0 / (hits as f64).sqrt(), 0.0);

    let amplitudes: Vec<Qbit> = powers
        .iter()
        .map(|&p| {
            if p == residue {
                amplitude
            } else {
                Complex::new(0.0, 0.0)
            }
        })
        .collect();
    let state = QState::new(&amplitudes)?;

    let transformed = qft::inverse_qft(t)?.apply(&state)?;
    let k = measure::sample_once(&transformed, rng);

    Ok((k, size))
}

pub fn continued_fraction(mut num: u64, mut den: u64, max_terms: usize) -> Vec<u64> {
    let mut terms = Vec::new();
    while den != 0 && terms.len() < max_terms {
        terms.push(num / den);
        let rem = num % den;
        num = den;
        den = rem;
    }
    terms
}

pub fn convergents(terms: &[u64]) -> Vec<(u64, u64)> {
    let mut result = Vec::with_capacity(terms.len());
    let (mut p_prev, mut q_prev) = (1_u64, 0_u64);
    let (mut p, mut q) = match terms.first() {
        Some(&a0) => (a0, 1_u64),
        None => return result,
    };
    result.push((p, q));

    for &a in &terms[1..] {
        let p_next = a * p + p_prev;
        let q_next = a * q + q_prev;
        p_prev = p;
        q_prev = q;
        p = p_next;
        q = q_next;
        result.push((p, q));
    }

    result
}

/// Candidate period from a measured phase k/q: the denominator of the best
/// rational approximation with denominator at most n.
pub fn recover_period(k: u64, q: u64, n: u64) -> Option<u64> {
    if k == 0 {
        return None;
    }

    let terms = continued_fraction(k, q, 32);
    convergents(&terms)
        .into_iter()
        .map(|(_, den)| den)
        .filter(|&den| den > 0 && den <= n)
        .max()
}

fn nontrivial_split(x: u64, n: u64) -> Option<(u64, u64)> {
    for f in [gcd(x + 1, n), gcd(x - 1, n)] {
        if f != 1 && f != n {
            return Some((f.min(n / f), f.max(n / f)));
        }
    }
    None
}

/// One factoring attempt with a fixed base.
pub fn attempt(n: u64, a: u64, rng: &mut impl Rng) -> Result<Attempt> {
    if a < 2 || a >= n {
        return Err(anyhow::anyhow!(
            "Base must satisfy 2 <= a < N, got a = {}",
            a
        ));
    }

    let g = gcd(a, n);
    if g != 1 {
        // Lucky draw: a shares a factor with N, no quantum work needed
        println!("  gcd({}, {}) = {} gives a factor classically", a, n, g);
        return Ok(Attempt::Factors {
            p: g.min(n / g),
            q: g.max(n / g),
        });
    }

    let t = estimation_qubits(n)?;
    let (k, size) = measure_phase(a, n, t, rng)?;
    println!("  measured k = {} of {} (phase {:.4})", k, size, k as f64 / size as f64);

    let Some(r) = recover_period(k as u64, size as u64, n) else {
        println!("  no period candidate from this measurement");
        return Ok(Attempt::Inconclusive);
    };

    if mod_pow(a, r, n) != 1 {
        println!("  candidate r = {} is not a period of {}^x mod {}", r, a, n);
        return Ok(Attempt::Inconclusive);
    }
    println!("  period r = {}", r);

    if r % 2 == 1 {
        println!("  period is odd");
        return Ok(Attempt::Inconclusive);
    }

    let x = mod_pow(a, r / 2, n);
    if x == n - 1 {
        println!("  {}^(r/2) = -1 (mod {})", a, n);
        return Ok(Attempt::Inconclusive);
    }

    match nontrivial_split(x, n) {
        Some((p, q)) => Ok(Attempt::Factors { p, q }),
        None => {
            println!("  gcd({} +- 1, {}) is trivial", x, n);
            Ok(Attempt::Inconclusive)
        }
    }
}

/// Factor n with up to `max_attempts` random bases. Exhausting the budget is
/// a reported outcome, not an error.
pub fn factor(n: u64, max_attempts: u32, rng: &mut impl Rng) -> Result<Outcome> {
    validate(n)?;

    for attempt_no in 1..=max_attempts {
        let a = rng.random_range(2..n);
        println!("Attempt {}: base a = {}", attempt_no, a);

        if let Attempt::Factors { p, q } = attempt(n, a, rng)? {
            return Ok(Outcome::Factors { p, q });
        }
    }

    Ok(Outcome::Exhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gcd_and_mod_pow() {
        assert_eq!(gcd(48, 18), 6);
        assert_eq!(gcd(7, 15), 1);
        assert_eq!(gcd(0, 15), 15);

        assert_eq!(mod_pow(7, 4, 15), 1);
        assert_eq!(mod_pow(7, 2, 15), 4);
        assert_eq!(mod_pow(2, 10, 1000), 24);
    }

    #[test]
    fn test_classical_order() {
        assert_eq!(classical_order(7, 15), Some(4));
        assert_eq!(classical_order(2, 15), Some(4));
        assert_eq!(classical_order(14, 15), Some(2));
        // Not coprime to 15
        assert_eq!(classical_order(6, 15), None);
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        assert!(validate(1).is_err());
        assert!(validate(3).is_err());
        // Even
        assert!(validate(10).is_err());
        // Prime
        assert!(validate(13).is_err());
        // Too many estimation qubits
        assert!(validate(40_000).is_err());

        assert!(validate(15).is_ok());
        assert!(validate(21).is_ok());
        assert!(validate(35).is_ok());
    }

    #[test]
    fn test_continued_fraction_convergents() {
        let terms = continued_fraction(31, 13, 20);
        assert_eq!(terms, vec![2, 2, 1, 1, 2]);

        let convs = convergents(&terms);
        assert_eq!(convs.first(), Some(&(2, 1)));
        assert_eq!(convs.last(), Some(&(31, 13)));

        // 355/113 is its own best approximation
        let terms = continued_fraction(355, 113, 20);
        assert_eq!(convergents(&terms).last(), Some(&(355, 113)));
    }

    #[test]
    fn test_recover_period_for_n15() {
        // Phase 3/4 measured as 192/256 recovers r = 4
        assert_eq!(recover_period(192, 256, 15), Some(4));
        assert_eq!(recover_period(64, 256, 15), Some(4));
        // Phase 1/2 only reveals the divisor 2
        assert_eq!(recover_period(128, 256, 15), Some(2));
        // k = 0 carries no information
        assert_eq!(recover_period(0, 256, 15), None);
    }

    #[test]
    fn test_factor_derivation_for_a7_n15() {
        // r = 4 for a = 7: gcd(7^2 +- 1, 15) splits 15 into 3 * 5
        let x = mod_pow(7, 2, 15);
        assert_eq!(x, 4);
        assert_eq!(nontrivial_split(x, 15), Some((3, 5)));
    }

    #[test]
    fn test_attempt_rejects_invalid_base() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(attempt(15, 1, &mut rng).is_err());
        assert!(attempt(15, 15, &mut rng).is_err());
    }

    #[test]
    fn test_factor_fifteen() -> Result<()> {
        // Every base except a = 14 has a decent per-attempt success chance,
        // so a generous budget makes the outcome effectively certain.
        let mut rng = StdRng::seed_from_u64(3);
        match factor(15, 64, &mut rng)? {
            Outcome::Factors { p, q } => {
                assert_eq!((p, q), (3, 5));
            }
            Outcome::Exhausted { .. } => panic!("factoring 15 should not exhaust 64 attempts"),
        }
        Ok(())
    }

    #[test]
    fn test_attempt_budget_is_respected() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(9);
        let outcome = factor(15, 0, &mut rng)?;
        assert_eq!(outcome, Outcome::Exhausted { attempts: 0 });
        Ok(())
    }

    #[test]
    fn test_measure_phase_lands_on_multiple_of_64() -> Result<()> {
        // For a = 7, N = 15 the period is 4, so the estimation register
        // concentrates on multiples of 256/4
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..4 {
            let (k, size) = measure_phase(7, 15, 8, &mut rng)?;
            assert_eq!(size, 256);
            assert_eq!(k % 64, 0);
        }
        Ok(())
    }
}
