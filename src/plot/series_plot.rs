use crate::cursor_ctrl::YScale;
use iced::{
    mouse::Cursor,
    widget::canvas::{Frame, Geometry, Path, Program, Stroke},
    Color, Point, Rectangle, Renderer, Theme,
};
use std::ops::Range;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineKind {
    Data,
    Fit,
    Residual,
}

impl LineKind {
    fn color(self, theme: &Theme) -> Color {
        let palette = theme.extended_palette();

        match self {
            Self::Data => palette.background.strong.color,
            Self::Fit => palette.danger.base.color,
            Self::Residual => palette.primary.base.color,
        }
    }

    fn width(self) -> f32 {
        match self {
            Self::Data => 1.0,
            Self::Fit | Self::Residual => 1.5,
        }
    }
}

/// One polyline, sampled once per bin.
#[derive(Clone, Debug)]
pub struct Line {
    values: Box<[f32]>,
    /// bins that get drawn
    visible: Range<usize>,
    kind: LineKind,
}

impl Line {
    pub fn new(values: impl Into<Box<[f32]>>, kind: LineKind) -> Self {
        let values = values.into();

        Self {
            visible: 0..values.len(),
            values,
            kind,
        }
    }

    /// Only draws the bins in `visible`.
    pub fn crop(mut self, visible: Range<usize>) -> Self {
        let end = visible.end.min(self.values.len());
        self.visible = visible.start.min(end)..end;
        self
    }
}

/// Draws a set of lines sharing the same bins and the same vertical axis.
#[derive(Clone, Debug)]
pub struct SeriesPlot {
    lines: Vec<Line>,
    y_scale: YScale,
    /// centers the axis on zero and draws a baseline there
    centered: bool,
}

impl SeriesPlot {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            y_scale: YScale::Linear,
            centered: false,
        }
    }

    pub fn y_scale(mut self, y_scale: YScale) -> Self {
        self.y_scale = y_scale;
        self
    }

    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Lowest and highest scaled value over every bin of every line.
    fn y_range(&self) -> Option<(f32, f32)> {
        let (min, max) = self
            .lines
            .iter()
            .flat_map(|line| line.values.iter())
            .filter_map(|&v| self.y_scale.apply(v))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), v| {
                (min.min(v), max.max(v))
            });

        if min > max {
            return None;
        }

        if self.centered {
            let extent = min.abs().max(max.abs()).max(f32::EPSILON);
            Some((-extent, extent))
        } else if min == max {
            Some((min - 0.5, max + 0.5))
        } else {
            Some((min, max))
        }
    }

    fn bins(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.values.len())
            .max()
            .unwrap_or_default()
    }
}

impl<Message> Program<Message> for SeriesPlot {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        let Some((min, max)) = self.y_range() else {
            return vec![frame.into_geometry()];
        };

        let n_intervals = self.bins().saturating_sub(1).max(1) as f32;
        let to_point = |bin: usize, value: f32| {
            Point::new(
                bin as f32 / n_intervals * bounds.width,
                (1.0 - (value - min) / (max - min)) * bounds.height,
            )
        };

        if self.centered {
            let last = self.bins().saturating_sub(1);
            let baseline = Path::line(to_point(0, 0.0), to_point(last, 0.0));
            frame.stroke(
                &baseline,
                Stroke::default()
                    .with_color(theme.extended_palette().background.weak.color)
                    .with_width(1.0),
            );
        }

        for line in &self.lines {
            let path = Path::new(|builder| {
                let mut pen_down = false;

                for bin in line.visible.clone() {
                    // log scale has holes where the data isn't positive
                    let Some(value) = self.y_scale.apply(line.values[bin]) else {
                        pen_down = false;
                        continue;
                    };

                    if pen_down {
                        builder.line_to(to_point(bin, value));
                    } else {
                        builder.move_to(to_point(bin, value));
                        pen_down = true;
                    }
                }
            });

            frame.stroke(
                &path,
                Stroke::default()
                    .with_color(line.kind.color(theme))
                    .with_width(line.kind.width()),
            );
        }

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::{Line, LineKind, SeriesPlot};
    use crate::cursor_ctrl::YScale;

    #[test]
    fn crop_stays_inside_values() {
        let line = Line::new(vec![1.0; 10], LineKind::Fit).crop(3..20);
        assert_eq!(line.visible, 3..10);

        let line = Line::new(vec![1.0; 10], LineKind::Fit).crop(12..20);
        assert_eq!(line.visible, 10..10);
    }

    #[test]
    fn y_range_covers_every_line() {
        let plot = SeriesPlot::new(vec![
            Line::new(vec![1.0, 5.0], LineKind::Data),
            Line::new(vec![-2.0, 3.0], LineKind::Fit),
        ]);

        assert_eq!(plot.y_range(), Some((-2.0, 5.0)));
    }

    #[test]
    fn centered_range_is_symmetric() {
        let plot = SeriesPlot::new(vec![Line::new(vec![-2.0, 5.0], LineKind::Residual)])
            .centered(true);

        assert_eq!(plot.y_range(), Some((-5.0, 5.0)));
    }

    #[test]
    fn log_range_skips_non_positive_values() {
        let plot = SeriesPlot::new(vec![Line::new(vec![0.0, 10.0, 1000.0], LineKind::Data)])
            .y_scale(YScale::Log);

        let (min, max) = plot.y_range().unwrap();
        assert!((min - 1.0).abs() < 1e-6);
        assert!((max - 3.0).abs() < 1e-6);
    }

    #[test]
    fn empty_plot_has_no_range() {
        assert_eq!(SeriesPlot::new(Vec::new()).y_range(), None);
    }
}
