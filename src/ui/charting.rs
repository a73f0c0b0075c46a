/// Chart points for the tracker: (game number starting at 1, wpm)
pub fn chart_points(history: &[f64]) -> Vec<(f64, f64)> {
    history
        .iter()
        .enumerate()
        .map(|(i, &wpm)| ((i + 1) as f64, wpm))
        .collect()
}

/// Compute X (game number) and Y (WPM) upper bounds for the tracker chart
pub fn compute_chart_params(history: &[f64]) -> (f64, f64) {
    let highest_wpm = history.iter().cloned().fold(0.0, f64::max);

    // keep both axes non-degenerate for a single game or all-zero scores
    let last_game = (history.len() as f64).max(2.0);
    (last_game, highest_wpm.ceil().max(1.0))
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_points_number_games_from_one() {
        assert_eq!(chart_points(&[10.0, 20.5]), vec![(1.0, 10.0), (2.0, 20.5)]);
        assert!(chart_points(&[]).is_empty());
    }

    #[test]
    fn test_compute_chart_params_empty() {
        assert_eq!(compute_chart_params(&[]), (2.0, 1.0));
    }

    #[test]
    fn test_compute_chart_params() {
        assert_eq!(compute_chart_params(&[12.0, 64.29, 30.0]), (3.0, 65.0));
    }

    #[test]
    fn test_format_label() {
        assert_eq!(format_label(1.0), "1");
        assert_eq!(format_label(1.2345), "1.23");
    }
}
