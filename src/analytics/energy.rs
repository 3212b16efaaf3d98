/// Maps a set of check-ins to the 0-100 energy percentage shown on the
/// energy ring: the mean of `(physical17 + cognitive17) / 2` rescaled from
/// the 1-7 scale. An empty set yields the neutral default of 50.
///
/// Mood and stress do not modulate the score; the formula surfaced to users
/// is the contract.
pub fn energy_percentage(ratings: &[(i32, i32)]) -> u8 {
    if ratings.is_empty() {
        return 50;
    }

    let avg: f64 = ratings
        .iter()
        .map(|(physical, cognitive)| (physical + cognitive) as f64 / 2.0)
        .sum::<f64>()
        / ratings.len() as f64;

    (((avg - 1.0) / 6.0) * 100.0).round() as u8
}
