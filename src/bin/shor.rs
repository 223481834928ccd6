//! Walkthrough of Shor's algorithm: the QFT building block, the period
//! finding subroutine, then full factoring runs for a few small semiprimes.

use anyhow::Result;
use rand::Rng;
use quantum_basics::shor::{self, Outcome};
use quantum_basics::{qft, QState};

const MAX_ATTEMPTS: u32 = 10;

fn demonstrate_qft() -> Result<()> {
    println!("=== Quantum Fourier Transform, the key subroutine ===\n");

    let circuit = qft::qft(3)?;
    println!("QFT circuit for 3 qubits ({} gates):\n{}", circuit.len(), circuit);

    let input = QState::from_str("001")?;
    let result = circuit.apply(&input)?;
    println!("QFT applied to |001>:\n{}", result);

    Ok(())
}

fn demonstrate_period_finding(rng: &mut impl Rng) -> Result<()> {
    let (a, n) = (7_u64, 15_u64);
    println!("=== Period finding for {}^x mod {} ===\n", a, n);

    println!("Sequence of powers:");
    let mut value = 1;
    for x in 1..=8 {
        value = value * a % n;
        println!("  {}^{} mod {} = {}", a, x, n, value);
    }
    match shor::classical_order(a, n) {
        Some(r) => println!("Order found classically: r = {}", r),
        None => println!("{} is not coprime to {}", a, n),
    }

    let t = shor::estimation_qubits(n)?;
    println!(
        "\nQuantum estimation with {} counting qubits ({} basis states):",
        t,
        1_usize << t
    );
    let (k, size) = shor::measure_phase(a, n, t, rng)?;
    println!("  measured k = {} (phase {:.4})", k, k as f64 / size as f64);
    match shor::recover_period(k as u64, size as u64, n) {
        Some(r) => println!("  continued fractions recover candidate r = {}", r),
        None => println!("  k = 0 carries no period information, a real run retries"),
    }

    Ok(())
}

fn main() -> Result<()> {
    let mut rng = rand::rng();

    demonstrate_qft()?;
    demonstrate_period_finding(&mut rng)?;

    for n in [15, 21, 35] {
        println!("\n=== Factoring N = {} ===\n", n);
        match shor::factor(n, MAX_ATTEMPTS, &mut rng)? {
            Outcome::Factors { p, q } => {
                println!("\nSuccess: {} = {} x {}", n, p, q);
            }
            Outcome::Exhausted { attempts } => {
                println!("\nNo factor found after {} attempts", attempts);
            }
        }
    }

    Ok(())
}
