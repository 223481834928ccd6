//! Walkthrough of the basic quantum gates: each section builds a small fixed
//! circuit, prints it, applies it to |0...0> and reports the measured counts.

use std::f64::consts::FRAC_PI_2;

use anyhow::Result;
use plotters::prelude::*;
use rand::Rng;
use quantum_basics::{measure, Circuit, Histogram, QState};

const SHOTS: usize = 1000;

fn report(title: &str, expected: &str, circuit: &Circuit, rng: &mut impl Rng) -> Result<Histogram> {
    println!("\n=== {} ===", title);
    println!("{}", circuit);

    let state = circuit.apply(&QState::zero_state(circuit.num_of_qbits()))?;
    println!("Resulting state:\n{}", state);

    let histogram = measure::sample(&state, SHOTS, rng);
    println!("Counts over {} shots:\n{}", SHOTS, histogram);
    println!("Expected: {}", expected);

    Ok(histogram)
}

fn plot_histogram(histogram: &Histogram, file_name: &str) -> Result<()> {
    let root = BitMapBackend::new(file_name, (640, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let size = 1_i32 << histogram.num_of_qbits();
    let max_count = histogram.counts().values().copied().max().unwrap_or(0) as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Measurement counts", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0..size, 0..max_count + max_count / 10 + 1)?;
    chart.configure_mesh().draw()?;

    chart.draw_series(histogram.counts().iter().map(|(&basis, &count)| {
        Rectangle::new([(basis as i32, 0), (basis as i32 + 1, count as i32)], BLUE.filled())
    }))?;

    root.present()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = rand::rng();

    report(
        "Hadamard gate",
        "~50% |0> and ~50% |1>",
        &Circuit::new(1).H(0)?,
        &mut rng,
    )?;

    report(
        "Pauli-X gate (NOT)",
        "100% |1>",
        &Circuit::new(1).X(0)?,
        &mut rng,
    )?;

    report(
        "Pauli-Y gate",
        "100% |1> (bit flip with a phase)",
        &Circuit::new(1).Y(0)?,
        &mut rng,
    )?;

    report(
        "Pauli-Z gate between Hadamards (HZH = X)",
        "100% |1>",
        &Circuit::new(1).H(0)?.Z(0)?.H(0)?,
        &mut rng,
    )?;

    let bell = report(
        "CNOT gate, Bell state",
        "~50% |00> and ~50% |11> (entangled)",
        &Circuit::new(2).H(0)?.cnot(0, 1)?,
        &mut rng,
    )?;
    plot_histogram(&bell, "bell_counts.png")?;
    println!("Histogram written to bell_counts.png");

    report(
        "S gate between Hadamards",
        "~50% |0> and ~50% |1>",
        &Circuit::new(1).H(0)?.S(0)?.H(0)?,
        &mut rng,
    )?;

    report(
        "T gate between Hadamards",
        "~85% |0> and ~15% |1>",
        &Circuit::new(1).H(0)?.T(0)?.H(0)?,
        &mut rng,
    )?;

    report(
        "SWAP gate",
        "100% |10> (excitation moved from qubit 0 to qubit 1)",
        &Circuit::new(2).X(0)?.swap(0, 1)?,
        &mut rng,
    )?;

    report(
        "Toffoli gate (CCX)",
        "100% |111>",
        &Circuit::new(3).X(0)?.X(1)?.toffoli(0, 1, 2)?,
        &mut rng,
    )?;

    report(
        "RY(pi/2) rotation",
        "~50% |0> and ~50% |1>",
        &Circuit::new(1).ry(FRAC_PI_2, 0)?,
        &mut rng,
    )?;

    println!("\nAll gate examples completed");
    Ok(())
}
