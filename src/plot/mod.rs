mod cursor_layer;
pub use cursor_layer::{CursorEvent, CursorLayer, MarkerView};

mod series_plot;
pub use series_plot::{Line, LineKind, SeriesPlot};
