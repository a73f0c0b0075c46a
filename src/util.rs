/// Round to two decimal places, the precision every score is reported at.
///
/// Exact halves go to the even neighbour, so 3.125 becomes 3.12.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
