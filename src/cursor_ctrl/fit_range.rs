use super::grid::round_half_up;

/// Maps normalized cursor positions onto the bins of a transient.
#[derive(Clone, Debug)]
pub struct FitRange {
    /// number of bins minus one
    n_intervals: usize,
    /// time step between two bins
    x_inc: f32,
    /// `prefix_sum[i]` is the photon count of the bins before `i`
    prefix_sum: Box<[f32]>,
}

impl FitRange {
    pub fn new(trans: &[f32], x_inc: f32) -> Self {
        let prefix_sum = std::iter::once(0.0)
            .chain(trans.iter().scan(0.0, |sum, &y| {
                *sum += y;
                Some(*sum)
            }))
            .collect();

        Self {
            n_intervals: trans.len().saturating_sub(1),
            x_inc,
            prefix_sum,
        }
    }

    pub fn n_intervals(&self) -> usize {
        self.n_intervals
    }

    /// The time at the right edge of the plot.
    pub fn max_value(&self) -> f32 {
        self.n_intervals as f32 * self.x_inc
    }

    /// Nearest bin index to a position in `[0, 1]`.
    pub fn index_of(&self, position: f32) -> usize {
        round_half_up(position * self.n_intervals as f32).max(0.0) as usize
    }

    /// First bin covered by the left cursor.
    pub fn fit_start(&self, left: f32) -> usize {
        self.index_of(left)
    }

    /// One past the last bin covered by the right cursor.
    pub fn fit_end(&self, right: f32) -> usize {
        self.index_of(right) + 1
    }

    /// Time value shown next to a cursor at `position`.
    pub fn value_of(&self, position: f32) -> f32 {
        position * self.max_value()
    }

    /// Inverse of [`Self::value_of`].
    pub fn position_of(&self, value: f32) -> f32 {
        value / self.max_value()
    }

    /// Total photons in `[start, end)`, or `None` when the range is outside the transient.
    pub fn photon_count(&self, start: usize, end: usize) -> Option<f32> {
        if start > end || end >= self.prefix_sum.len() {
            return None;
        }

        Some(self.prefix_sum[end] - self.prefix_sum[start])
    }
}

/// Formats a count with at most five decimals, switching to scientific
/// notation for very large or very small magnitudes.
pub fn pretty_fmt(value: f32) -> String {
    let abs = value.abs();

    if abs.is_nan() {
        return "-".to_owned();
    }

    if abs > 1e4 || (abs != 0.0 && abs < 1e-4) {
        let formatted = format!("{value:.5e}");
        let (mantissa, exponent) = formatted
            .split_once('e')
            .unwrap_or((formatted.as_str(), "0"));
        format!("{}E{exponent}", trim_decimals(mantissa))
    } else {
        trim_decimals(&format!("{value:.5}")).to_owned()
    }
}

fn trim_decimals(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::{pretty_fmt, FitRange};

    fn range() -> FitRange {
        FitRange::new(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5)
    }

    #[test]
    fn intervals_and_values() {
        let range = range();
        assert_eq!(range.n_intervals(), 4);
        assert_eq!(range.max_value(), 2.0);
        assert_eq!(range.value_of(0.5), 1.0);
        assert_eq!(range.position_of(1.0), 0.5);
    }

    #[test]
    fn indices_round_to_nearest_bin() {
        let range = range();
        assert_eq!(range.fit_start(0.0), 0);
        assert_eq!(range.fit_start(0.3), 1);
        assert_eq!(range.fit_start(0.375), 2);
        assert_eq!(range.fit_end(1.0), 5);
    }

    #[test]
    fn photon_count_over_selection() {
        let range = range();
        assert_eq!(range.photon_count(0, 5), Some(15.0));
        assert_eq!(range.photon_count(1, 3), Some(5.0));
        assert_eq!(range.photon_count(2, 2), Some(0.0));
        assert_eq!(range.photon_count(0, 6), None);
        assert_eq!(range.photon_count(3, 2), None);
    }

    #[test]
    fn empty_transient() {
        let range = FitRange::new(&[], 1.0);
        assert_eq!(range.n_intervals(), 0);
        assert_eq!(range.photon_count(0, 0), Some(0.0));
        assert_eq!(range.photon_count(0, 1), None);
    }

    #[test]
    fn formatting() {
        assert_eq!(pretty_fmt(12.5), "12.5");
        assert_eq!(pretty_fmt(3.0), "3");
        assert_eq!(pretty_fmt(0.0), "0");
        assert_eq!(pretty_fmt(12345.0), "1.2345E4");
        assert_eq!(pretty_fmt(f32::NAN), "-");
    }
}
