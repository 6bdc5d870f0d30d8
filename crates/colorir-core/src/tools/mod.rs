//! Drawing tools and the pointer interaction state machine.

use crate::color::{PALETTE, Rgb, Thickness};
use kurbo::{BezPath, Circle, Line, Point, Rect, Shape};
use serde::{Deserialize, Serialize};

/// Flattening tolerance for tool shapes, in surface pixels.
const SHAPE_TOLERANCE: f64 = 0.1;

/// Default eraser width: ten times a thin brush, rounded up.
pub const DEFAULT_ERASER_WIDTH: u32 = 50;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Fill,
    Line,
    Circle,
    Square,
}

impl ToolKind {
    pub fn all() -> [ToolKind; 6] {
        [
            ToolKind::Brush,
            ToolKind::Eraser,
            ToolKind::Fill,
            ToolKind::Line,
            ToolKind::Circle,
            ToolKind::Square,
        ]
    }

    /// Label spoken when the tool is selected.
    pub fn spoken_name(self) -> &'static str {
        match self {
            ToolKind::Brush => "Pincel",
            ToolKind::Eraser => "Borracha",
            ToolKind::Fill => "Balde de tinta",
            ToolKind::Line => "Linha",
            ToolKind::Circle => "Círculo",
            ToolKind::Square => "Quadrado",
        }
    }

    /// Freehand tools paint segment by segment.
    pub fn is_freehand(self) -> bool {
        matches!(self, ToolKind::Brush | ToolKind::Eraser)
    }

    /// Shape tools preview against a snapshot until release.
    pub fn is_shape(self) -> bool {
        matches!(self, ToolKind::Line | ToolKind::Circle | ToolKind::Square)
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// Waiting for a press.
    #[default]
    Idle,
    /// A freehand stroke is in progress.
    Stroke {
        /// Last point painted.
        last: Point,
    },
    /// A shape is being dragged out.
    Shape {
        start: Point,
        current: Point,
    },
}

/// What the surface owner must do in response to pointer input.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction {
    /// Stroke this segment with the current stroke style.
    Segment(Line),
    /// Snapshot the surface; a shape preview is starting.
    BeginPreview,
    /// Restore the snapshot, then stroke this path.
    Preview(BezPath),
    /// Keep the last preview and drop the snapshot.
    EndPreview,
    /// Flood fill from this pixel with the current color.
    Fill { x: i64, y: i64 },
}

/// Manages the current tool, color and widths, and turns pointer input into
/// [`ToolAction`]s.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Brush and fill color.
    pub color: Rgb,
    /// Stroke width shared by the brush and shape tools.
    pub line_width: u32,
    pub eraser_width: u32,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            color: PALETTE[0].color,
            line_width: Thickness::default().width(),
            eraser_width: DEFAULT_ERASER_WIDTH,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool manager with explicit widths.
    pub fn with_widths(line_width: u32, eraser_width: u32) -> Self {
        Self {
            line_width,
            eraser_width,
            ..Self::default()
        }
    }

    /// Set the current tool. Any interaction in progress is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Set the color. Picking a color while erasing switches back to the brush.
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
        if self.current_tool == ToolKind::Eraser {
            self.set_tool(ToolKind::Brush);
        }
    }

    /// Color strokes are painted with: opaque white for the eraser.
    pub fn stroke_color(&self) -> Rgb {
        match self.current_tool {
            ToolKind::Eraser => Rgb::WHITE,
            _ => self.color,
        }
    }

    pub fn stroke_width(&self) -> u32 {
        match self.current_tool {
            ToolKind::Eraser => self.eraser_width,
            _ => self.line_width,
        }
    }

    /// Begin a tool interaction. Presses at non-finite positions are ignored.
    pub fn begin(&mut self, point: Point) -> Option<ToolAction> {
        if !point.is_finite() {
            log::debug!("Ignoring press at {point:?}");
            return None;
        }
        let tool = self.current_tool;
        if tool.is_freehand() {
            self.state = ToolState::Stroke { last: point };
            None
        } else if tool.is_shape() {
            self.state = ToolState::Shape {
                start: point,
                current: point,
            };
            Some(ToolAction::BeginPreview)
        } else {
            self.state = ToolState::Idle;
            Some(ToolAction::Fill {
                x: point.x.floor() as i64,
                y: point.y.floor() as i64,
            })
        }
    }

    /// Update the current interaction. Moves with no press in progress, or
    /// to a non-finite position, do nothing.
    pub fn update(&mut self, point: Point) -> Option<ToolAction> {
        if !point.is_finite() {
            return None;
        }
        match &mut self.state {
            ToolState::Idle => None,
            ToolState::Stroke { last } => {
                let segment = Line::new(*last, point);
                *last = point;
                Some(ToolAction::Segment(segment))
            }
            ToolState::Shape { start, current } => {
                *current = point;
                shape_between(self.current_tool, *start, point).map(ToolAction::Preview)
            }
        }
    }

    /// End the current interaction.
    pub fn end(&mut self) -> Option<ToolAction> {
        let state = std::mem::take(&mut self.state);
        match state {
            ToolState::Shape { .. } => Some(ToolAction::EndPreview),
            _ => None,
        }
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a tool interaction is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// The shape currently being dragged out, if any.
    pub fn preview_shape(&self) -> Option<BezPath> {
        match self.state {
            ToolState::Shape { start, current } => shape_between(self.current_tool, start, current),
            _ => None,
        }
    }
}

/// Outline of the shape a shape tool draws between a press and the pointer.
///
/// Squares grow toward the pointer with side `max(|dx|, |dy|)`, circles are
/// centered on the press with the distance to the pointer as radius.
pub fn shape_between(tool: ToolKind, start: Point, end: Point) -> Option<BezPath> {
    match tool {
        ToolKind::Line => Some(Line::new(start, end).to_path(SHAPE_TOLERANCE)),
        ToolKind::Circle => Some(Circle::new(start, start.distance(end)).to_path(SHAPE_TOLERANCE)),
        ToolKind::Square => {
            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let size = dx.abs().max(dy.abs());
            let corner = Point::new(start.x + size.copysign(dx), start.y + size.copysign(dy));
            Some(Rect::from_points(start, corner).to_path(SHAPE_TOLERANCE))
        }
        ToolKind::Brush | ToolKind::Eraser | ToolKind::Fill => None,
    }
}
