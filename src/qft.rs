//! Quantum Fourier Transform circuits built from Hadamards, controlled phase
//! rotations and a final bit-reversal swap layer.

use std::f64::consts::PI;

use anyhow::Result;

use crate::circuit::{Circuit, GateKind};

/// Forward QFT on `num_of_qbits` qubits: |x> -> sum_y e^(2*pi*i*x*y/2^n) |y> / sqrt(2^n).
pub fn qft(num_of_qbits: usize) -> Result<Circuit> {
    let mut circuit = Circuit::new(num_of_qbits);

    for k in (0..num_of_qbits).rev() {
        circuit.add_gate(GateKind::H, k)?;
        for j in (0..k).rev() {
            let angle = PI / 2f64.powi((k - j) as i32);
            circuit.add_control(j, k, GateKind::Phase(angle))?;
        }
    }

    for i in 0..num_of_qbits / 2 {
        circuit = circuit.swap(i, num_of_qbits - 1 - i)?;
    }

    Ok(circuit)
}

/// Inverse QFT: the forward sequence reversed with negated rotation angles.
pub fn inverse_qft(num_of_qbits: usize) -> Result<Circuit> {
    let mut circuit = Circuit::new(num_of_qbits);

    for i in 0..num_of_qbits / 2 {
        circuit = circuit.swap(i, num_of_qbits - 1 - i)?;
    }

    for k in 0..num_of_qbits {
        for j in 0..k {
            let angle = -PI / 2f64.powi((k - j) as i32);
            circuit.add_control(j, k, GateKind::Phase(angle))?;
        }
        circuit.add_gate(GateKind::H, k)?;
    }

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_approx_complex_eq, QState};
    use num_complex::Complex;

    #[test]
    fn test_qft_of_zero_is_uniform() -> Result<()> {
        let q000 = QState::from_str("000")?;
        let result = qft(3)?.apply(&q000)?;

        let expected = 1.0 / 8f64.sqrt();
        for i in 0..8 {
            assert_approx_complex_eq!(expected, 0.0, result.state[i]);
        }

        Ok(())
    }

    #[test]
    fn test_inverse_qft_of_uniform_is_zero() -> Result<()> {
        let uniform = QState::new(&[Complex::new(1.0 / 8f64.sqrt(), 0.0); 8])?;
        let result = inverse_qft(3)?.apply(&uniform)?;

        assert_approx_complex_eq!(1.0, 0.0, result.state[0]);
        for i in 1..8 {
            assert_approx_complex_eq!(0.0, 0.0, result.state[i]);
        }

        Ok(())
    }

    #[test]
    fn test_qft_phase_progression() -> Result<()> {
        // QFT|001> has amplitude e^(2*pi*i*y/8)/sqrt(8) at |y>
        let q001 = QState::from_str("001")?;
        let result = qft(3)?.apply(&q001)?;

        let inv_root8 = 1.0 / 8f64.sqrt();
        for y in 0..8 {
            let angle = 2.0 * PI * y as f64 / 8.0;
            assert_approx_complex_eq!(
                inv_root8 * angle.cos(),
                inv_root8 * angle.sin(),
                result.state[y]
            );
        }

        Ok(())
    }

    #[test]
    fn test_inverse_undoes_forward() -> Result<()> {
        let q011 = QState::from_str("011")?;
        let transformed = qft(3)?.apply(&q011)?;
        let restored = inverse_qft(3)?.apply(&transformed)?;

        assert_approx_complex_eq!(1.0, 0.0, restored.state[0b011]);
        for i in [0, 1, 2, 4, 5, 6, 7] {
            assert_approx_complex_eq!(0.0, 0.0, restored.state[i]);
        }

        Ok(())
    }
}
