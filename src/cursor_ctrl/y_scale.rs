use strum::{Display, EnumIter};

#[derive(Clone, Copy, Debug, Default, Display, EnumIter, Eq, PartialEq)]
pub enum YScale {
    #[default]
    #[strum(to_string = "Linear")]
    Linear,
    #[strum(to_string = "Log")]
    Log,
}

impl YScale {
    /// Maps a data value onto the axis. Non-positive values have no log and map to `None`.
    pub fn apply(self, value: f32) -> Option<f32> {
        match self {
            Self::Linear => Some(value),
            Self::Log => (value > 0.0).then(|| value.log10()),
        }
    }
}

/// A segmented toggle: exactly one scale is selected at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScaleSelector {
    selected: YScale,
}

impl ScaleSelector {
    pub fn select(&mut self, scale: YScale) {
        self.selected = scale;
    }

    pub fn selected(self) -> YScale {
        self.selected
    }

    pub fn is_selected(self, scale: YScale) -> bool {
        self.selected == scale
    }
}

#[cfg(test)]
mod tests {
    use super::{ScaleSelector, YScale};
    use strum::IntoEnumIterator as _;

    #[test]
    fn exactly_one_toggle_is_selected() {
        let mut selector = ScaleSelector::default();

        for scale in YScale::iter() {
            selector.select(scale);
            assert_eq!(YScale::iter().filter(|s| selector.is_selected(*s)).count(), 1);
            assert!(selector.is_selected(scale));
        }
    }

    #[test]
    fn log_scale_drops_non_positive_values() {
        assert!(YScale::Log.apply(100.0).is_some_and(|v| (v - 2.0).abs() < 1e-6));
        assert_eq!(YScale::Log.apply(0.0), None);
        assert_eq!(YScale::Log.apply(-3.0), None);
        assert_eq!(YScale::Linear.apply(-3.0), Some(-3.0));
    }
}
