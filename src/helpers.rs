pub fn modulus(a: f64, b: f64) -> f64 {
    ((a % b) + b) % b
}

#[cfg(test)]
pub fn assert_almost_eq(a: f64, b: f64) {
    if (a - b).abs() > 1e-4 {
        assert_eq!(a, b)
    }
}
