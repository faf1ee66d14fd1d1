use crate::{
    config::Config,
    cursor_ctrl::{pretty_fmt, BySide, CursorController, FitRange, Side, YScale},
    dataset::Dataset,
    plot::{CursorEvent, CursorLayer, Line, LineKind, MarkerView, SeriesPlot},
};
use iced::{
    widget::{button, column, row, text, Canvas},
    Alignment::Center,
    Element, Length, Task,
};
use iced_aw::number_input;
use log::debug;
use strum::IntoEnumIterator as _;

#[derive(Debug)]
pub struct FitCursors {
    config: Config,
    dataset: Dataset,
    cursors: CursorController,
}

#[derive(Clone, Copy, Debug)]
pub enum Message {
    FitPane(CursorEvent),
    ResidualsPane(CursorEvent),
    SpinnerChanged(Side, f32),
    YScaleSelected(YScale),
}

impl FitCursors {
    pub fn create() -> (Self, Task<Message>) {
        (Self::new(Config::load()), Task::none())
    }

    fn new(config: Config) -> Self {
        let dataset = Dataset::demo(&config.demo);
        let mut cursors = CursorController::new(
            config.cursor,
            FitRange::new(&dataset.trans, dataset.x_inc),
        );
        cursors.init();

        Self {
            config,
            dataset,
            cursors,
        }
    }

    pub fn title(&self) -> String {
        String::from("Fit Cursors")
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::FitPane(event) => match event {
                CursorEvent::Resized(size) => {
                    self.cursors.resize_fit_pane(size.width, size.height);
                }
                CursorEvent::Entered(event) => self.cursors.mouse_over_cursor(event),
                CursorEvent::Exited(side) => self.cursors.mouse_off_cursor(side),
                CursorEvent::Dragged { source, pointer_x } => {
                    self.cursors.drag_to(source, pointer_x);
                }
                CursorEvent::Released(side) => {
                    self.cursors.snap_cursor(side);
                    debug!(
                        "fit range is now [{}, {})",
                        self.cursors.fit_start(),
                        self.cursors.fit_end()
                    );
                }
            },
            Message::ResidualsPane(CursorEvent::Resized(size)) => {
                self.cursors.resize_res_pane(size.width, size.height);
            }
            // the mirrors only follow
            Message::ResidualsPane(_) => {}
            Message::SpinnerChanged(side, value) => self.cursors.set_value(side, value),
            Message::YScaleSelected(scale) => self.cursors.select_y_scale(scale),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let y_scale = row(YScale::iter().map(|scale| {
            button(text(scale.to_string()))
                .style(if self.cursors.y_scale().is_selected(scale) {
                    button::primary
                } else {
                    button::secondary
                })
                .on_press(Message::YScaleSelected(scale))
                .into()
        }));

        let spinner = |side: Side| {
            number_input(
                self.cursors.value(side),
                self.cursors.spinner_bounds(side),
                move |value| Message::SpinnerChanged(side, value),
            )
            .step(self.dataset.x_inc)
            .ignore_buttons(true)
        };

        let photons = self
            .cursors
            .photon_count()
            .map_or_else(String::new, pretty_fmt);

        let controls = row![
            y_scale,
            text("Start"),
            spinner(Side::Left),
            text("End"),
            spinner(Side::Right),
            text(format!("Photons: {photons}")),
        ]
        .spacing(10)
        .align_y(Center);

        let visible = self.cursors.fit_start()..self.cursors.fit_end();

        let fit_plot = Canvas::new(
            SeriesPlot::new(vec![
                Line::new(self.dataset.trans.clone(), LineKind::Data),
                Line::new(self.dataset.fit.clone(), LineKind::Fit).crop(visible.clone()),
            ])
            .y_scale(self.cursors.y_scale().selected()),
        )
        .width(Length::Fill)
        .height(self.config.plot.fit_height);

        let residuals_plot = Canvas::new(
            SeriesPlot::new(vec![Line::new(
                self.dataset.residuals().collect::<Vec<_>>(),
                LineKind::Residual,
            )
            .crop(visible)])
            .centered(true),
        )
        .width(Length::Fill)
        .height(self.config.plot.residuals_height);

        let fit_markers = BySide::from_fn(|side| {
            let marker = self.cursors.marker(side);
            MarkerView {
                x: marker.translate_x().get(),
                bar_len: marker.bar_len(),
                circle: Some(*marker.circle()),
            }
        });

        let residuals_markers = BySide::from_fn(|side| {
            let marker = self.cursors.marker(side);
            MarkerView {
                x: marker.mirror_x(),
                bar_len: marker.mirror_bar_len(),
                circle: None,
            }
        });

        column![
            controls,
            CursorLayer::new(fit_plot, fit_markers, Message::FitPane)
                .interactive(self.config.cursor.grab_width),
            CursorLayer::new(residuals_plot, residuals_markers, Message::ResidualsPane),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::{FitCursors, Message};
    use crate::{
        config::Config,
        cursor_ctrl::{HoverEvent, Side, YScale},
        plot::CursorEvent,
    };
    use iced::Size;

    /// 256 demo bins over a 255 wide panel puts every bin on a whole pixel.
    fn app() -> FitCursors {
        let mut app = FitCursors::new(Config::default());
        app.update(Message::FitPane(CursorEvent::Resized(Size::new(255.0, 320.0))));
        app.update(Message::ResidualsPane(CursorEvent::Resized(Size::new(
            255.0, 120.0,
        ))));
        app
    }

    #[test]
    fn first_layout_spreads_the_cursors() {
        let app = app();

        assert_eq!(app.cursors.offset(Side::Left), 0.0);
        assert_eq!(app.cursors.offset(Side::Right), 255.0);
        assert_eq!(app.cursors.marker(Side::Right).mirror_bar_len(), 119.0);
        assert_eq!(app.cursors.csr_div(), 1.0);
    }

    #[test]
    fn drag_then_release_snaps() {
        let mut app = app();

        app.update(Message::FitPane(CursorEvent::Dragged {
            source: Side::Left,
            pointer_x: 40.3,
        }));
        assert_eq!(app.cursors.marker(Side::Left).mirror_x(), 40.3);

        app.update(Message::FitPane(CursorEvent::Released(Side::Left)));
        assert_eq!(app.cursors.offset(Side::Left), 40.0);
        assert_eq!(app.cursors.fit_start(), 40);
    }

    #[test]
    fn hover_round_trip() {
        let mut app = app();

        app.update(Message::FitPane(CursorEvent::Entered(HoverEvent {
            source: Side::Right,
            y: 3.0,
        })));
        assert!(app.cursors.marker(Side::Right).circle().is_highlighted());

        app.update(Message::FitPane(CursorEvent::Exited(Side::Right)));
        assert!(!app.cursors.marker(Side::Right).circle().is_highlighted());
    }

    #[test]
    fn residuals_pane_does_not_move_cursors() {
        let mut app = app();

        app.update(Message::ResidualsPane(CursorEvent::Dragged {
            source: Side::Right,
            pointer_x: 155.0,
        }));
        assert_eq!(app.cursors.offset(Side::Right), 255.0);
    }

    #[test]
    fn y_scale_toggle() {
        let mut app = app();
        assert!(app.cursors.y_scale().is_selected(YScale::Linear));

        app.update(Message::YScaleSelected(YScale::Log));
        assert!(app.cursors.y_scale().is_selected(YScale::Log));
        assert!(!app.cursors.y_scale().is_selected(YScale::Linear));
    }
}
