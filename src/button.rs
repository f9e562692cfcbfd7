use crate::geometry::{Point, Rect, Size};

/// A clickable rectangle with a caption, centred on the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
}

impl Button {
    pub fn centered(screen: &Rect, size: Size, label: &str) -> Self {
        Button {
            rect: Rect::centered_in(screen, size),
            label: label.to_string(),
        }
    }

    pub fn contains(&self, at: Point) -> bool {
        self.rect.contains(at)
    }
}
