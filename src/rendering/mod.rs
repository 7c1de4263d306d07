mod center;
mod overlay;

pub use center::{CenterEntry, CenterView, center_view};
pub use overlay::{Overlay, ToastView, overlay};

/// Everything a frontend needs to draw the overlay layer and the center panel.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub overlay: Overlay,
    pub center: CenterView,
    pub queue_len: usize,
}
