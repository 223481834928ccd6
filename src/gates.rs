use nalgebra::Matrix2;
use nalgebra_sparse::convert::serial::convert_dense_coo;
use nalgebra_sparse::{coo::CooMatrix, csr::CsrMatrix};
use num_complex::Complex;

use crate::Qbit;

pub fn h_matrix() -> CsrMatrix<Qbit> {
    let root2 = 2.0_f64.sqrt();
    let one = Complex::new(1.0, 0.0);
    let hadamard_coo = convert_dense_coo(&Matrix2::from_row_slice(&[
        one / root2,
        one / root2,
        one / root2,
        -one / root2,
    ]));
    CsrMatrix::from(&hadamard_coo)
}

pub fn x_matrix() -> CsrMatrix<Qbit> {
    let mut x_coo = CooMatrix::new(2, 2);
    x_coo.push(0, 1, Complex::new(1.0, 0.0));
    x_coo.push(1, 0, Complex::new(1.0, 0.0));
    CsrMatrix::from(&x_coo)
}

pub fn y_matrix() -> CsrMatrix<Qbit> {
    let mut y_coo = CooMatrix::new(2, 2);
    y_coo.push(0, 1, Complex::new(0.0, -1.0));
    y_coo.push(1, 0, Complex::new(0.0, 1.0));
    CsrMatrix::from(&y_coo)
}

pub fn z_matrix() -> CsrMatrix<Qbit> {
    let mut z_coo = CooMatrix::new(2, 2);
    z_coo.push(0, 0, Complex::new(1.0, 0.0));
    z_coo.push(1, 1, Complex::new(-1.0, 0.0));
    CsrMatrix::from(&z_coo)
}

pub fn s_matrix() -> CsrMatrix<Qbit> {
    let mut s_coo = CooMatrix::new(2, 2);
    s_coo.push(0, 0, Complex::new(1.0, 0.0));
    s_coo.push(1, 1, Complex::new(0.0, 1.0));
    CsrMatrix::from(&s_coo)
}

pub fn t_matrix() -> CsrMatrix<Qbit> {
    let mut t_coo = CooMatrix::new(2, 2);
    t_coo.push(0, 0, Complex::new(1.0, 0.0));
    t_coo.push(1, 1, Complex::from_polar(1.0, std::f64::consts::FRAC_PI_4));
    CsrMatrix::from(&t_coo)
}

/// Phase gate diag(1, e^(i*angle)). S and T are the angle = pi/2 and pi/4 cases.
pub fn phase_matrix(angle: f64) -> CsrMatrix<Qbit> {
    let mut p_coo = CooMatrix::new(2, 2);
    p_coo.push(0, 0, Complex::new(1.0, 0.0));
    p_coo.push(1, 1, Complex::from_polar(1.0, angle));
    CsrMatrix::from(&p_coo)
}

pub fn rx_matrix(angle: f64) -> CsrMatrix<Qbit> {
    let half = angle / 2.0;
    let cos = Complex::new(half.cos(), 0.0);
    let msin = Complex::new(0.0, -half.sin());
    let rx_coo = convert_dense_coo(&Matrix2::from_row_slice(&[cos, msin, msin, cos]));
    CsrMatrix::from(&rx_coo)
}

pub fn ry_matrix(angle: f64) -> CsrMatrix<Qbit> {
    let half = angle / 2.0;
    let cos = Complex::new(half.cos(), 0.0);
    let sin = Complex::new(half.sin(), 0.0);
    let ry_coo = convert_dense_coo(&Matrix2::from_row_slice(&[cos, -sin, sin, cos]));
    CsrMatrix::from(&ry_coo)
}

pub fn rz_matrix(angle: f64) -> CsrMatrix<Qbit> {
    let half = angle / 2.0;
    let mut rz_coo = CooMatrix::new(2, 2);
    rz_coo.push(0, 0, Complex::from_polar(1.0, -half));
    rz_coo.push(1, 1, Complex::from_polar(1.0, half));
    CsrMatrix::from(&rz_coo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_complex_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn entry(matrix: &CsrMatrix<Qbit>, row: usize, col: usize) -> Qbit {
        matrix
            .get_entry(row, col)
            .map(|e| e.into_value())
            .unwrap_or(Complex::new(0.0, 0.0))
    }

    #[test]
    fn test_phase_matrix_special_cases() {
        // P(pi/2) = S, P(pi/4) = T, P(pi) = Z
        let s = s_matrix();
        let p = phase_matrix(FRAC_PI_2);
        assert_approx_complex_eq!(entry(&s, 1, 1).re, entry(&s, 1, 1).im, entry(&p, 1, 1));

        let t = t_matrix();
        let p = phase_matrix(FRAC_PI_4);
        assert_approx_complex_eq!(entry(&t, 1, 1).re, entry(&t, 1, 1).im, entry(&p, 1, 1));

        let z = z_matrix();
        let p = phase_matrix(PI);
        assert_approx_complex_eq!(entry(&z, 1, 1).re, entry(&z, 1, 1).im, entry(&p, 1, 1));
    }

    #[test]
    fn test_ry_half_pi_rotates_to_superposition() {
        let ry = ry_matrix(FRAC_PI_2);
        let inv_root2 = 1.0 / 2.0_f64.sqrt();

        assert_approx_complex_eq!(inv_root2, 0.0, entry(&ry, 0, 0));
        assert_approx_complex_eq!(-inv_root2, 0.0, entry(&ry, 0, 1));
        assert_approx_complex_eq!(inv_root2, 0.0, entry(&ry, 1, 0));
        assert_approx_complex_eq!(inv_root2, 0.0, entry(&ry, 1, 1));
    }
}
