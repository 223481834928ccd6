pub mod circuit;
pub mod gates;
pub mod measure;
pub mod qft;
pub mod qstate;
pub mod shor;
mod test_util;

use num_complex::Complex;

pub type Qbit = Complex<f64>;

pub use circuit::{Circuit, GateKind};
pub use measure::Histogram;
pub use qstate::QState;
