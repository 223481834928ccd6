use std::fmt::Display;

use anyhow::Result;
use nalgebra_sparse::{coo::CooMatrix, csr::CsrMatrix};
use num_complex::Complex;

use crate::gates::{
    h_matrix, phase_matrix, rx_matrix, ry_matrix, rz_matrix, s_matrix, t_matrix, x_matrix,
    y_matrix, z_matrix,
};
use crate::qstate::QState;
use crate::Qbit;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GateKind {
    H,
    X,
    Y,
    Z,
    S,
    T,
    Phase(f64),
    RX(f64),
    RY(f64),
    RZ(f64),
}

impl GateKind {
    pub fn matrix(&self) -> CsrMatrix<Qbit> {
        match self {
            GateKind::H => h_matrix(),
            GateKind::X => x_matrix(),
            GateKind::Y => y_matrix(),
            GateKind::Z => z_matrix(),
            GateKind::S => s_matrix(),
            GateKind::T => t_matrix(),
            GateKind::Phase(angle) => phase_matrix(*angle),
            GateKind::RX(angle) => rx_matrix(*angle),
            GateKind::RY(angle) => ry_matrix(*angle),
            GateKind::RZ(angle) => rz_matrix(*angle),
        }
    }

    fn label(&self) -> String {
        match self {
            GateKind::H => "H".to_string(),
            GateKind::X => "X".to_string(),
            GateKind::Y => "Y".to_string(),
            GateKind::Z => "Z".to_string(),
            GateKind::S => "S".to_string(),
            GateKind::T => "T".to_string(),
            GateKind::Phase(angle) => format!("P({:.4})", angle),
            GateKind::RX(angle) => format!("RX({:.4})", angle),
            GateKind::RY(angle) => format!("RY({:.4})", angle),
            GateKind::RZ(angle) => format!("RZ({:.4})", angle),
        }
    }
}

/// One placed gate: the full-register matrix is built once when the gate is
/// added, the description is kept for printing the circuit.
struct Step {
    desc: String,
    matrix: CsrMatrix<Qbit>,
}

pub struct Circuit {
    steps: Vec<Step>,
    num_of_qbits: usize,
}

impl Circuit {
    pub fn new(num_of_qbits: usize) -> Self {
        Self {
            steps: Vec::new(),
            num_of_qbits,
        }
    }

    pub fn num_of_qbits(&self) -> usize {
        self.num_of_qbits
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Qubit 0 is the least significant bit, so it sits at the last position
    /// of the Kronecker product.
    fn reverse_index(&self, index: usize) -> Result<usize> {
        if index >= self.num_of_qbits {
            return Err(anyhow::anyhow!(
                "Index out of bounds for the number of qubits {}",
                self.num_of_qbits
            ));
        }
        Ok(self.num_of_qbits - 1 - index)
    }

    fn create_gate_for_index(
        &self,
        index: usize,
        gate: &CsrMatrix<Qbit>,
    ) -> Result<CsrMatrix<Qbit>> {
        let index = self.reverse_index(index)?;

        let mut matrix = CsrMatrix::identity(1);
        for i in 0..self.num_of_qbits {
            if i == index {
                matrix = kronecker_product(&matrix, gate);
            } else {
                matrix = kronecker_product(&matrix, &CsrMatrix::identity(2));
            }
        }

        Ok(matrix)
    }

    /// Controlled gate as a sum over control bit patterns: for every pattern
    /// the control slots get |0><0| or |1><1| projectors, and the target slot
    /// gets the gate only when all controls are 1.
    fn build_controlled_matrix(
        &self,
        controls: &[usize],
        target: usize,
        gate: &CsrMatrix<Qbit>,
    ) -> Result<CsrMatrix<Qbit>> {
        if controls.is_empty() {
            return Err(anyhow::anyhow!("Controlled gate needs at least one control"));
        }

        let target = self.reverse_index(target)?;
        let controls = controls
            .iter()
            .map(|&c| self.reverse_index(c))
            .collect::<Result<Vec<_>>>()?;

        for (i, &c) in controls.iter().enumerate() {
            if c == target {
                return Err(anyhow::anyhow!(
                    "Control and target qubits cannot be the same"
                ));
            }
            if controls[..i].contains(&c) {
                return Err(anyhow::anyhow!("Control qubits must be distinct"));
            }
        }

        // |0><0|
        let mut zero_zero = CooMatrix::new(2, 2);
        zero_zero.push(0, 0, Complex::new(1.0, 0.0));
        let zero_zero = CsrMatrix::from(&zero_zero);

        // |1><1|
        let mut one_one = CooMatrix::new(2, 2);
        one_one.push(1, 1, Complex::new(1.0, 0.0));
        let one_one = CsrMatrix::from(&one_one);

        let id = CsrMatrix::identity(2);

        let all_ones = (1_usize << controls.len()) - 1;
        let mut result: Option<CsrMatrix<Qbit>> = None;

        for pattern in 0..=all_ones {
            let mut term = CsrMatrix::identity(1);
            for slot in 0..self.num_of_qbits {
                let factor = if let Some(ci) = controls.iter().position(|&c| c == slot) {
                    if (pattern >> ci) & 1 == 1 {
                        &one_one
                    } else {
                        &zero_zero
                    }
                } else if slot == target && pattern == all_ones {
                    gate
                } else {
                    &id
                };
                term = kronecker_product(&term, factor);
            }

            result = Some(match result {
                Some(acc) => acc + term,
                None => term,
            });
        }

        // The pattern loop runs at least once
        result.ok_or_else(|| anyhow::anyhow!("Empty controlled gate"))
    }

    fn push(&mut self, desc: String, matrix: CsrMatrix<Qbit>) {
        self.steps.push(Step { desc, matrix });
    }

    pub fn add_gate(&mut self, kind: GateKind, target: usize) -> Result<()> {
        let matrix = self.create_gate_for_index(target, &kind.matrix())?;
        self.push(format!("{} q{}", kind.label(), target), matrix);
        Ok(())
    }

    pub fn add_control(&mut self, control: usize, target: usize, kind: GateKind) -> Result<()> {
        let matrix = self.build_controlled_matrix(&[control], target, &kind.matrix())?;
        self.push(
            format!("C{} q{} -> q{}", kind.label(), control, target),
            matrix,
        );
        Ok(())
    }

    pub fn gate(mut self, kind: GateKind, target: usize) -> Result<Self> {
        self.add_gate(kind, target)?;
        Ok(self)
    }

    pub fn control(mut self, control: usize, target: usize, kind: GateKind) -> Result<Self> {
        self.add_control(control, target, kind)?;
        Ok(self)
    }

    #[allow(non_snake_case)]
    pub fn H(self, index: usize) -> Result<Self> {
        self.gate(GateKind::H, index)
    }

    #[allow(non_snake_case)]
    pub fn X(self, index: usize) -> Result<Self> {
        self.gate(GateKind::X, index)
    }

    #[allow(non_snake_case)]
    pub fn Y(self, index: usize) -> Result<Self> {
        self.gate(GateKind::Y, index)
    }

    #[allow(non_snake_case)]
    pub fn Z(self, index: usize) -> Result<Self> {
        self.gate(GateKind::Z, index)
    }

    #[allow(non_snake_case)]
    pub fn S(self, index: usize) -> Result<Self> {
        self.gate(GateKind::S, index)
    }

    #[allow(non_snake_case)]
    pub fn T(self, index: usize) -> Result<Self> {
        self.gate(GateKind::T, index)
    }

    pub fn phase(self, angle: f64, index: usize) -> Result<Self> {
        self.gate(GateKind::Phase(angle), index)
    }

    pub fn rx(self, angle: f64, index: usize) -> Result<Self> {
        self.gate(GateKind::RX(angle), index)
    }

    pub fn ry(self, angle: f64, index: usize) -> Result<Self> {
        self.gate(GateKind::RY(angle), index)
    }

    pub fn rz(self, angle: f64, index: usize) -> Result<Self> {
        self.gate(GateKind::RZ(angle), index)
    }

    pub fn cnot(self, control: usize, target: usize) -> Result<Self> {
        self.control(control, target, GateKind::X)
    }

    pub fn toffoli(mut self, control1: usize, control2: usize, target: usize) -> Result<Self> {
        let matrix = self.build_controlled_matrix(&[control1, control2], target, &x_matrix())?;
        self.push(
            format!("CCX q{} q{} -> q{}", control1, control2, target),
            matrix,
        );
        Ok(self)
    }

    pub fn swap(self, index1: usize, index2: usize) -> Result<Self> {
        if index1 == index2 {
            return Err(anyhow::anyhow!("Cannot swap a qubit with itself"));
        }

        self.cnot(index1, index2)?
            .cnot(index2, index1)?
            .cnot(index1, index2)
    }

    pub fn apply(&self, state: &QState) -> Result<QState> {
        if state.num_of_qbits() != self.num_of_qbits {
            return Err(anyhow::anyhow!(
                "Circuit expects {} qubits but the state has {}",
                self.num_of_qbits,
                state.num_of_qbits()
            ));
        }

        let mut result = state.state.clone();
        for step in &self.steps {
            result = &step.matrix * result;
        }
        Ok(QState { state: result })
    }
}

impl Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{:>3}: {}", i, step.desc)?;
        }
        Ok(())
    }
}

pub fn kronecker_product(x: &CsrMatrix<Qbit>, y: &CsrMatrix<Qbit>) -> CsrMatrix<Qbit> {
    let mut result = CooMatrix::new(x.nrows() * y.nrows(), x.ncols() * y.ncols());

    for (rx, cx, value_x) in x.triplet_iter() {
        for (ry, cy, value_y) in y.triplet_iter() {
            let new_row = rx * y.nrows() + ry;
            let new_col = cx * y.ncols() + cy;
            let new_value = value_x * value_y;
            result.push(new_row, new_col, new_value);
        }
    }

    CsrMatrix::from(&result)
}
