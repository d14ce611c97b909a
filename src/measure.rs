//! Measured geometry of rendered elements.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum RectsError {
    #[error("Invalid rectangles JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Degenerate rectangle for {0}")]
    Degenerate(String),
}

/// Axis-aligned bounding box, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Vertical center; the wiring layout axis runs top to bottom.
    pub fn center_y(&self) -> f64 {
        self.top + self.height() / 2.0
    }

    /// This rectangle expressed relative to the top left corner of `frame`.
    pub fn relative_to(&self, frame: &Rect) -> Rect {
        Rect {
            top: self.top - frame.top,
            left: self.left - frame.left,
            bottom: self.bottom - frame.top,
            right: self.right - frame.left,
        }
    }

    fn is_degenerate(&self) -> bool {
        !(self.top.is_finite()
            && self.left.is_finite()
            && self.bottom.is_finite()
            && self.right.is_finite())
            || self.bottom < self.top
            || self.right < self.left
    }
}

/// Measures the container holding the network interface badges and the
/// badges themselves, all in the same (viewport) coordinate system.
///
/// `None` means "not currently rendered".
pub trait EndpointRects {
    fn container(&self) -> Option<Rect>;
    fn endpoint(&self, id: &str) -> Option<Rect>;
}

/// Lookup-table backed measurements, as captured from a rendering surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RectTable {
    pub container: Option<Rect>,
    #[serde(default)]
    pub endpoints: HashMap<String, Rect>,
}

impl RectTable {
    pub fn new(container: Rect) -> Self {
        Self {
            container: Some(container),
            endpoints: HashMap::new(),
        }
    }

    pub fn with(mut self, id: impl Into<String>, rect: Rect) -> Self {
        self.endpoints.insert(id.into(), rect);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, rect: Rect) {
        self.endpoints.insert(id.into(), rect);
    }

    pub fn from_json(json: &str) -> Result<Self, RectsError> {
        let table: RectTable = serde_json::from_str(json)?;
        if let Some(container) = &table.container {
            if container.is_degenerate() {
                return Err(RectsError::Degenerate("container".to_string()));
            }
        }
        if let Some((id, _)) = table.endpoints.iter().find(|(_, r)| r.is_degenerate()) {
            return Err(RectsError::Degenerate(id.clone()));
        }
        Ok(table)
    }
}

impl EndpointRects for RectTable {
    fn container(&self) -> Option<Rect> {
        self.container
    }

    fn endpoint(&self, id: &str) -> Option<Rect> {
        self.endpoints.get(id).copied()
    }
}

impl<T: EndpointRects + ?Sized> EndpointRects for &T {
    fn container(&self) -> Option<Rect> {
        (**self).container()
    }

    fn endpoint(&self, id: &str) -> Option<Rect> {
        (**self).endpoint(id)
    }
}
