use std::collections::BTreeMap;
use std::fmt::Display;

use rand::Rng;

use crate::qstate::QState;

/// Draw one computational basis outcome by inverting the cumulative
/// probability distribution of the state.
pub fn sample_once(state: &QState, rng: &mut impl Rng) -> usize {
    let r: f64 = rng.random();
    let mut cumulative = 0.0;

    for (i, amplitude) in state.state.iter().enumerate() {
        cumulative += amplitude.norm_sqr();
        if r < cumulative {
            return i;
        }
    }

    // Rounding can leave the cumulative sum just below 1
    state.dim() - 1
}

pub fn sample(state: &QState, shots: usize, rng: &mut impl Rng) -> Histogram {
    let mut counts = BTreeMap::new();
    for _ in 0..shots {
        *counts.entry(sample_once(state, rng)).or_insert(0) += 1;
    }

    Histogram {
        counts,
        shots,
        num_of_qbits: state.num_of_qbits(),
    }
}

/// Observed counts per basis state over a number of shots.
pub struct Histogram {
    counts: BTreeMap<usize, usize>,
    shots: usize,
    num_of_qbits: usize,
}

impl Histogram {
    pub fn counts(&self) -> &BTreeMap<usize, usize> {
        &self.counts
    }

    pub fn shots(&self) -> usize {
        self.shots
    }

    pub fn num_of_qbits(&self) -> usize {
        self.num_of_qbits
    }

    pub fn frequency(&self, basis: usize) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        *self.counts.get(&basis).unwrap_or(&0) as f64 / self.shots as f64
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

        for (basis, count) in entries {
            writeln!(
                f,
                "|{:0width$b}>: {} ({:.1}%)",
                basis,
                count,
                *count as f64 / self.shots as f64 * 100.0,
                width = self.num_of_qbits
            )?;
        }

        Ok(())
    }
}
