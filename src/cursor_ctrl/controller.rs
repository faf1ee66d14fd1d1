use super::{
    grid::{clamp, snap},
    BySide, FitRange, Marker, Property, ScaleSelector, Side, YScale,
};
use crate::config::CursorConfig;
use log::{debug, info, trace};
use std::ops::RangeInclusive;

/// Size of one of the two plot panels.
#[derive(Debug, Default)]
struct Pane {
    width: Property<f32>,
    height: Property<f32>,
}

/// Pointer entered a cursor. `y` is relative to the top of the fit panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverEvent {
    pub source: Side,
    pub y: f32,
}

/// Pointer dragged a cursor. `x` is relative to the cursor's current center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEvent {
    pub source: Side,
    pub x: f32,
}

#[derive(Debug)]
pub struct CursorController {
    config: CursorConfig,
    /// panel with the transient and the fitted curve, owns the cursors
    fit_pane: Pane,
    /// panel with the residuals, shows the mirrors
    res_pane: Pane,
    markers: BySide<Marker>,
    /// distance in pixels between two bins
    csr_div: Property<f32>,
    y_scale: ScaleSelector,
    fit_range: FitRange,
    initialized: bool,
}

impl CursorController {
    pub fn new(config: CursorConfig, fit_range: FitRange) -> Self {
        Self {
            markers: BySide::from_fn(|_| Marker::new(config.circle_radius)),
            config,
            fit_pane: Pane::default(),
            res_pane: Pane::default(),
            csr_div: Property::default(),
            y_scale: ScaleSelector::default(),
            fit_range,
            initialized: false,
        }
    }

    /// Places the cursors at the two edges of the fit panel and sets up the bindings.
    pub fn init(&mut self) {
        if self.initialized {
            debug!("cursor controller already initialized");
            return;
        }
        self.initialized = true;

        self.markers[Side::Left].translate_x.set(0.0);
        self.markers[Side::Right]
            .translate_x
            .set(self.fit_pane.width.get());

        for side in Side::ALL {
            let marker = &self.markers[side];

            marker.mirror_x.bind(&marker.translate_x);
            // a bar as tall as the panel makes the panel grow on every layout
            marker.bar_len.bind_map(&self.fit_pane.height, |h| h - 1.0);
            marker
                .mirror_bar_len
                .bind_map(&self.res_pane.height, |h| h - 1.0);
        }

        let n_intervals = self.fit_range.n_intervals() as f32;
        self.csr_div
            .bind_map(&self.fit_pane.width, move |w| w / n_intervals);

        self.y_scale.select(YScale::Linear);

        info!(
            "cursors initialized over {} intervals, fit panel width {}",
            self.fit_range.n_intervals(),
            self.fit_pane.width.get()
        );
    }

    /// Rounds `csr_pos` to the nearest bin boundary.
    pub fn snap_csr_pos(&self, csr_pos: &Property<f32>) {
        csr_pos.set(snap(csr_pos.get(), self.csr_div.get()));
    }

    pub fn snap_cursor(&self, side: Side) {
        self.snap_csr_pos(&self.markers[side].translate_x);
        debug!("{side:?} cursor snapped to {}", self.offset(side));
    }

    pub fn mouse_over_cursor(&mut self, event: HoverEvent) {
        let height = self.fit_pane.height.get();
        let circle = &mut self.markers[event.source].circle;

        // keep the enlarged circle inside the panel
        let margin = circle.radius * self.config.hover_margin;
        circle.center_y = clamp(event.y, margin, height - margin);
        circle.set_scale(self.config.hover_scale);
    }

    pub fn mouse_off_cursor(&mut self, source: Side) {
        self.markers[source].circle.set_scale(1.0);
    }

    pub fn cursor_dragged(&mut self, event: DragEvent) {
        let translate_x = &self.markers[event.source].translate_x;
        let candidate = translate_x.get() + event.x;

        let (mut min, mut max) = (0.0, self.fit_pane.width.get());
        match event.source {
            Side::Left => max = self.markers[Side::Right].translate_x.get(),
            Side::Right => min = self.markers[Side::Left].translate_x.get(),
        }

        translate_x.set(clamp(candidate, min, max));
        trace!("{:?} cursor dragged to {}", event.source, translate_x.get());
    }

    /// Drags `source` towards the pointer, measured from where the cursor is now.
    pub fn drag_to(&mut self, source: Side, pointer_x: f32) {
        let x = pointer_x - self.offset(source);
        self.cursor_dragged(DragEvent { source, x });
    }

    /// Follows a resize of the fit panel, keeping the cursors' relative positions.
    pub fn resize_fit_pane(&mut self, width: f32, height: f32) {
        let old_width = self.fit_pane.width.get();
        let positions = Side::ALL.map(|side| self.position(side));

        self.fit_pane.width.set(width);
        self.fit_pane.height.set(height);

        if old_width == width {
            return;
        }

        if old_width > 0.0 {
            for (side, position) in Side::ALL.into_iter().zip(positions) {
                self.markers[side].translate_x.set(position * width);
            }
        } else {
            self.markers[Side::Left].translate_x.set(0.0);
            self.markers[Side::Right].translate_x.set(width);
        }

        debug!("fit panel resized to {width}x{height}");
    }

    pub fn resize_res_pane(&mut self, width: f32, height: f32) {
        self.res_pane.width.set(width);
        self.res_pane.height.set(height);
    }

    /// Moves a cursor to the given time value, kept within its spinner's bounds.
    pub fn set_value(&mut self, side: Side, value: f32) {
        let bounds = self.spinner_bounds(side);
        let value = clamp(value, *bounds.start(), *bounds.end());
        let position = self.fit_range.position_of(value);

        self.markers[side]
            .translate_x
            .set(position * self.fit_pane.width.get());
    }

    pub fn select_y_scale(&mut self, scale: YScale) {
        self.y_scale.select(scale);
    }

    pub fn y_scale(&self) -> ScaleSelector {
        self.y_scale
    }

    pub fn marker(&self, side: Side) -> &Marker {
        &self.markers[side]
    }

    pub fn offset(&self, side: Side) -> f32 {
        self.markers[side].translate_x.get()
    }

    pub fn csr_div(&self) -> f32 {
        self.csr_div.get()
    }

    /// Cursor offset relative to the fit panel's width, in `[0, 1]`.
    pub fn position(&self, side: Side) -> f32 {
        let width = self.fit_pane.width.get();

        if width > 0.0 {
            self.offset(side) / width
        } else {
            0.0
        }
    }

    pub fn value(&self, side: Side) -> f32 {
        self.fit_range.value_of(self.position(side))
    }

    pub fn spinner_bounds(&self, side: Side) -> RangeInclusive<f32> {
        match side {
            Side::Left => 0.0..=self.value(Side::Right),
            Side::Right => self.value(Side::Left)..=self.fit_range.max_value(),
        }
    }

    pub fn fit_start(&self) -> usize {
        self.fit_range.fit_start(self.position(Side::Left))
    }

    pub fn fit_end(&self) -> usize {
        self.fit_range.fit_end(self.position(Side::Right))
    }

    pub fn photon_count(&self) -> Option<f32> {
        self.fit_range.photon_count(self.fit_start(), self.fit_end())
    }
}
