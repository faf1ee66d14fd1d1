mod controller;
pub use controller::{CursorController, HoverEvent};

mod fit_range;
pub use fit_range::{pretty_fmt, FitRange};

mod grid;

mod marker;
pub use marker::{BySide, Circle, Marker, Side};

mod property;
pub use property::Property;

mod y_scale;
pub use y_scale::{ScaleSelector, YScale};
