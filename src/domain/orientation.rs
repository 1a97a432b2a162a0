// Viewport orientation domain model
use serde::{Deserialize, Serialize};

/// On-screen area available to the widget, in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape only when strictly wider than tall; a square viewport is portrait.
    pub fn from_dimensions(dimensions: Dimensions) -> Self {
        if dimensions.width > dimensions.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn layout_direction(self) -> LayoutDirection {
        match self {
            Orientation::Portrait => LayoutDirection::Column,
            Orientation::Landscape => LayoutDirection::Row,
        }
    }
}

/// Stacked (column) or side-by-side (row) placement of title and chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    Column,
    Row,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let cases = [
            (400.0, 800.0, Orientation::Portrait),
            (800.0, 400.0, Orientation::Landscape),
            (500.0, 500.0, Orientation::Portrait),
            (500.5, 500.0, Orientation::Landscape),
            (0.0, 0.0, Orientation::Portrait),
        ];

        for (width, height, expected) in cases {
            assert_eq!(
                Orientation::from_dimensions(Dimensions::new(width, height)),
                expected,
                "{}x{}",
                width,
                height
            );
        }
    }

    #[test]
    fn test_layout_direction_follows_orientation() {
        assert_eq!(Orientation::Portrait.layout_direction(), LayoutDirection::Column);
        assert_eq!(Orientation::Landscape.layout_direction(), LayoutDirection::Row);
    }
}
