use super::Property;
use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];
}

/// The highlight drawn on a cursor's bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub radius: f32,
    pub center_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            center_y: radius,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale_x = scale;
        self.scale_y = scale;
    }

    pub fn is_highlighted(&self) -> bool {
        self.scale_x > 1.0 || self.scale_y > 1.0
    }
}

/// One draggable cursor together with everything that follows it.
#[derive(Debug)]
pub struct Marker {
    /// horizontal offset from the left edge of the fit panel
    pub(super) translate_x: Property<f32>,
    /// offset of the indicator on the residuals panel
    pub(super) mirror_x: Property<f32>,
    /// length of the bar on the fit panel
    pub(super) bar_len: Property<f32>,
    /// length of the bar on the residuals panel
    pub(super) mirror_bar_len: Property<f32>,
    pub(super) circle: Circle,
}

impl Marker {
    pub(super) fn new(circle_radius: f32) -> Self {
        Self {
            translate_x: Property::default(),
            mirror_x: Property::default(),
            bar_len: Property::default(),
            mirror_bar_len: Property::default(),
            circle: Circle::new(circle_radius),
        }
    }

    /// The cursor's offset as a settable cell.
    pub fn translate_x(&self) -> &Property<f32> {
        &self.translate_x
    }

    pub fn mirror_x(&self) -> f32 {
        self.mirror_x.get()
    }

    pub fn bar_len(&self) -> f32 {
        self.bar_len.get()
    }

    pub fn mirror_bar_len(&self) -> f32 {
        self.mirror_bar_len.get()
    }

    pub fn circle(&self) -> &Circle {
        &self.circle
    }
}

/// One value per cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BySide<T> {
    pub left: T,
    pub right: T,
}

impl<T> BySide<T> {
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self {
            left: f(Side::Left),
            right: f(Side::Right),
        }
    }
}

impl<T> Index<Side> for BySide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

impl<T> IndexMut<Side> for BySide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
