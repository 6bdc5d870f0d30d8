//! Restricted SVG outline markup.
//!
//! The grammar is a strict subset: an optional `svg` root carrying a
//! `viewBox`, and `path`, `circle`, `rect` and `ellipse` elements anywhere
//! below it. Every other element and attribute is accepted and ignored.

mod markup;
mod path;

pub use markup::{Element, MarkupError, scan_elements};
pub use path::{PathCommand, parse_path_data, replay};

use kurbo::{BezPath, Circle, Ellipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Flattening tolerance (viewBox units) used when converting curves to paths.
const PATH_TOLERANCE: f64 = 0.01;

/// Logical coordinate bounds of an outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width: 200.0,
            height: 200.0,
        }
    }
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Parse a `viewBox` attribute value.
    ///
    /// Components are separated by whitespace or commas. A missing or
    /// non-numeric component takes its default; a width or height that is not
    /// strictly positive takes the default of 200.
    pub fn parse(value: &str) -> Self {
        let defaults = Self::default();
        let parts: Vec<Option<f64>> = value
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect();
        let get = |i: usize| parts.get(i).copied().flatten();
        let extent = |i: usize, fallback: f64| get(i).filter(|v| *v > 0.0).unwrap_or(fallback);
        Self {
            min_x: get(0).unwrap_or(defaults.min_x),
            min_y: get(1).unwrap_or(defaults.min_y),
            width: extent(2, defaults.width),
            height: extent(3, defaults.height),
        }
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// A drawable element parsed from an outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapePrimitive {
    Path { commands: Vec<PathCommand> },
    Circle { cx: f64, cy: f64, r: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
}

impl ShapePrimitive {
    /// Build the outline path in viewBox coordinates.
    ///
    /// Returns `None` for geometry that cannot be stroked (negative or
    /// non-finite radii, non-finite rectangles, paths with no segments).
    pub fn to_path(&self) -> Option<BezPath> {
        match *self {
            ShapePrimitive::Path { ref commands } => {
                let path = replay(commands);
                (!path.elements().is_empty()).then_some(path)
            }
            ShapePrimitive::Circle { cx, cy, r } => {
                all_finite(&[cx, cy, r]).filter(|_| r >= 0.0)?;
                Some(Circle::new(Point::new(cx, cy), r).to_path(PATH_TOLERANCE))
            }
            ShapePrimitive::Rect {
                x,
                y,
                width,
                height,
            } => {
                all_finite(&[x, y, width, height])?;
                Some(Rect::new(x, y, x + width, y + height).to_path(PATH_TOLERANCE))
            }
            ShapePrimitive::Ellipse { cx, cy, rx, ry } => {
                all_finite(&[cx, cy, rx, ry]).filter(|_| rx >= 0.0 && ry >= 0.0)?;
                Some(Ellipse::new(Point::new(cx, cy), (rx, ry), 0.0).to_path(PATH_TOLERANCE))
            }
        }
    }
}

fn all_finite(values: &[f64]) -> Option<()> {
    values.iter().all(|v| v.is_finite()).then_some(())
}

/// A parsed outline: its bounds and shapes in paint order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutlineMarkup {
    /// The declared viewBox, if the root carried one.
    pub view_box: Option<ViewBox>,
    pub shapes: Vec<ShapePrimitive>,
}

impl OutlineMarkup {
    /// The declared viewBox or the default `0 0 200 200`.
    pub fn view_box_or_default(&self) -> ViewBox {
        self.view_box.unwrap_or_default()
    }
}

/// Parse outline markup into shapes.
pub fn parse_outline(source: &str) -> Result<OutlineMarkup, MarkupError> {
    let elements = scan_elements(source)?;
    let view_box = elements
        .iter()
        .find(|e| e.name == "svg")
        .and_then(|svg| svg.attr("viewBox"))
        .map(ViewBox::parse);

    let shapes = elements.iter().filter_map(primitive_from_element).collect();
    Ok(OutlineMarkup { view_box, shapes })
}

fn primitive_from_element(element: &Element<'_>) -> Option<ShapePrimitive> {
    let num = |name: &str| numeric_attr(element, name);
    match element.name {
        "path" => element.attr("d").map(|d| ShapePrimitive::Path {
            commands: parse_path_data(d),
        }),
        "circle" => Some(ShapePrimitive::Circle {
            cx: num("cx"),
            cy: num("cy"),
            r: num("r"),
        }),
        "rect" => Some(ShapePrimitive::Rect {
            x: num("x"),
            y: num("y"),
            width: num("width"),
            height: num("height"),
        }),
        "ellipse" => Some(ShapePrimitive::Ellipse {
            cx: num("cx"),
            cy: num("cy"),
            rx: num("rx"),
            ry: num("ry"),
        }),
        _ => None,
    }
}

/// Read a numeric attribute: missing means 0, otherwise the leading number
/// of the value (so `"10px"` reads as 10). A value with no leading number is
/// NaN, which later keeps the shape from being drawn.
fn numeric_attr(element: &Element<'_>, name: &str) -> f64 {
    match element.attr(name) {
        None => 0.0,
        Some(raw) => {
            let trimmed = raw.trim_start();
            path::scan_number(trimmed, 0).map_or(f64::NAN, |(v, _)| v)
        }
    }
}
