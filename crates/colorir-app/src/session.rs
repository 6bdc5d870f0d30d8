//! The drawing session: everything one child's coloring page needs.

use colorir_core::color::{PaletteEntry, Rgb};
use colorir_core::fill::flood_fill;
use colorir_core::narration::Announcer;
use colorir_core::outline::{LibraryError, OutlineContent, OutlineDocument, OutlineId, OutlineLibrary};
use colorir_core::surface::{RasterSurface, SurfaceSnapshot};
use colorir_core::tools::{ToolAction, ToolKind, ToolManager};
use colorir_core::{ColorirConfig, Narrator};
use colorir_render::{DecodedImage, Rasterizer, RenderError, StrokeStyle, export_png, render_outline};
use kurbo::{Point, Shape};
use thiserror::Error;

/// Outline selected when a session starts.
pub const INITIAL_OUTLINE: &str = "sun";

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Invalid outline: {0}")]
    InvalidOutline(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Application state for one coloring page.
pub struct DrawingSession<R, N> {
    config: ColorirConfig,
    tools: ToolManager,
    library: OutlineLibrary,
    selected: Option<OutlineId>,
    surface: RasterSurface,
    /// Pixels under a shape being dragged out.
    preview: Option<SurfaceSnapshot>,
    rasterizer: R,
    announcer: Announcer<N>,
}

impl<R: Rasterizer, N: Narrator> DrawingSession<R, N> {
    /// Start a session on a `width` x `height` surface showing the sun.
    pub fn new(config: ColorirConfig, width: u32, height: u32, rasterizer: R, narrator: N) -> SessionResult<Self> {
        let mut session = Self {
            tools: ToolManager::with_widths(config.line_width, config.eraser_width),
            announcer: Announcer::with_debounce(narrator, config.narration_debounce()),
            library: OutlineLibrary::builtin(),
            selected: None,
            surface: RasterSurface::new(width, height),
            preview: None,
            rasterizer,
            config,
        };
        session.select_outline(&OutlineId::new(INITIAL_OUTLINE))?;
        Ok(session)
    }

    pub fn config(&self) -> &ColorirConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn library(&self) -> &OutlineLibrary {
        &self.library
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn narrator(&self) -> &N {
        self.announcer.inner()
    }

    pub fn selected_outline(&self) -> Option<&OutlineDocument> {
        self.selected.as_ref().and_then(|id| self.library.get(id))
    }

    pub fn select_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
        self.preview = None;
        self.announcer.say(tool.spoken_name());
    }

    pub fn select_color(&mut self, entry: &PaletteEntry) {
        self.set_color(entry.color, entry.name);
    }

    /// Set an arbitrary color, announced as `name`.
    pub fn set_color(&mut self, color: Rgb, name: &str) {
        self.tools.set_color(color);
        self.announcer.say(name);
    }

    /// Set the width shared by the brush and shape tools.
    pub fn set_line_width(&mut self, width: u32) {
        self.tools.line_width = width;
        self.announcer.say(&format!("Espessura {width}"));
    }

    /// Select an outline and draw it over a cleared surface.
    ///
    /// If the outline cannot be drawn, the previous selection is kept and
    /// redrawn.
    pub fn select_outline(&mut self, id: &OutlineId) -> SessionResult<()> {
        let name = self
            .library
            .get(id)
            .map(|o| o.name.clone())
            .ok_or_else(|| LibraryError::NotFound(id.clone()))?;
        let previous = self.selected.replace(id.clone());
        if let Err(e) = self.render_selected() {
            log::warn!("Cannot show outline {id}: {e}");
            self.selected = previous;
            if let Err(redraw) = self.render_selected() {
                log::error!("Failed to redraw previous outline: {redraw}");
            }
            return Err(e);
        }
        self.announcer.say(&name);
        log::info!("Selected outline {id}");
        Ok(())
    }

    pub fn pointer_down(&mut self, point: Point) -> SessionResult<()> {
        match self.tools.begin(point) {
            Some(action) => self.apply(action),
            None => Ok(()),
        }
    }

    pub fn pointer_move(&mut self, point: Point) -> SessionResult<()> {
        match self.tools.update(point) {
            Some(action) => self.apply(action),
            None => Ok(()),
        }
    }

    /// Finish the current interaction. Release itself does not draw.
    pub fn pointer_up(&mut self, _point: Point) -> SessionResult<()> {
        match self.tools.end() {
            Some(action) => self.apply(action),
            None => Ok(()),
        }
    }

    /// Resize the surface (which clears it) and redraw the selected outline.
    pub fn resize(&mut self, width: u32, height: u32) -> SessionResult<()> {
        self.tools.cancel();
        self.preview = None;
        self.surface.resize(width, height);
        self.render_selected()
    }

    /// Wipe the page, outline included.
    pub fn clear(&mut self) {
        self.tools.cancel();
        self.preview = None;
        self.surface.clear();
        self.selected = None;
        self.announcer.say("Limpar tudo");
    }

    /// Add an outline at runtime and return its generated id.
    pub fn add_outline(&mut self, name: &str, content: OutlineContent) -> SessionResult<OutlineId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::InvalidOutline("name is empty".to_string()));
        }
        match &content {
            OutlineContent::Vector(markup) => {
                if !(markup.contains("<svg") && markup.contains("</svg>")) {
                    return Err(SessionError::InvalidOutline(format!("{name} is not SVG markup")));
                }
            }
            OutlineContent::Raster(source) => {
                DecodedImage::from_source(source)
                    .map_err(|e| SessionError::InvalidOutline(format!("{name}: {e}")))?;
            }
        }
        let document = OutlineDocument::with_generated_id(name, content);
        Ok(self.library.add(document)?.id.clone())
    }

    /// Remove an outline. If it was selected, the first remaining one is
    /// selected instead.
    pub fn remove_outline(&mut self, id: &OutlineId) -> SessionResult<()> {
        self.library.remove(id)?;
        if self.selected.as_ref() == Some(id) {
            let first = self
                .library
                .first()
                .map(|o| o.id.clone())
                .ok_or_else(|| LibraryError::NotFound(id.clone()))?;
            self.select_outline(&first)?;
        }
        Ok(())
    }

    /// Encode the page as a PNG.
    pub fn export_png(&self) -> SessionResult<Vec<u8>> {
        let png = export_png(&self.surface)?;
        log::info!("Exported {}x{} drawing", self.surface.width(), self.surface.height());
        Ok(png)
    }

    fn render_selected(&mut self) -> SessionResult<()> {
        let Some(document) = self.selected.as_ref().and_then(|id| self.library.get(id)) else {
            return Ok(());
        };
        if self.surface.is_empty() {
            log::debug!("Surface is empty; not rendering {}", document.id);
            return Ok(());
        }
        let style = StrokeStyle::outline(self.config.outline_stroke_width);
        render_outline(&mut self.rasterizer, document, &mut self.surface, &style)?;
        Ok(())
    }

    fn apply(&mut self, action: ToolAction) -> SessionResult<()> {
        match action {
            ToolAction::Segment(line) => {
                let style = self.stroke_style();
                self.rasterizer
                    .stroke_path(&mut self.surface, &line.to_path(0.1), &style, kurbo::Affine::IDENTITY)?;
            }
            ToolAction::BeginPreview => {
                self.preview = Some(self.surface.snapshot());
            }
            ToolAction::Preview(path) => {
                if let Some(snapshot) = &self.preview {
                    self.surface.restore(snapshot);
                }
                let style = self.stroke_style();
                self.rasterizer
                    .stroke_path(&mut self.surface, &path, &style, kurbo::Affine::IDENTITY)?;
            }
            ToolAction::EndPreview => {
                self.preview = None;
            }
            ToolAction::Fill { x, y } => {
                if let Err(e) = flood_fill(&mut self.surface, x, y, self.tools.color, self.config.fill) {
                    log::warn!("Ignoring fill: {e}");
                }
            }
        }
        Ok(())
    }

    fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.tools.stroke_color(), f64::from(self.tools.stroke_width()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorir_core::PALETTE;
    use colorir_core::outline::ImageSource;
    use colorir_render::{SkiaRasterizer, encode_png};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shares what was said with the test after the session takes ownership.
    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Narrator for Recorder {
        fn announce(&mut self, text: &str) {
            self.0.borrow_mut().push(text.to_string());
        }
    }

    impl Recorder {
        fn said(&self) -> Vec<String> {
            self.0.borrow().clone()
        }
    }

    fn session(width: u32, height: u32) -> (DrawingSession<SkiaRasterizer, Recorder>, Recorder) {
        let recorder = Recorder::default();
        let session = DrawingSession::new(ColorirConfig::default(), width, height, SkiaRasterizer, recorder.clone()).unwrap();
        (session, recorder)
    }

    fn has_ink(surface: &RasterSurface) -> bool {
        surface.data().chunks_exact(4).any(|px| px[3] > 0)
    }

    #[test]
    fn test_starts_on_sun() {
        let (session, recorder) = session(200, 200);
        assert_eq!(session.selected_outline().unwrap().name, "Sol");
        assert_eq!(recorder.said(), vec!["Sol"]);
        assert!(has_ink(session.surface()));
        assert_eq!(session.tools().current_tool, ToolKind::Brush);
    }

    #[test]
    fn test_announcements() {
        let (mut session, recorder) = session(100, 100);
        session.select_tool(ToolKind::Fill);
        session.select_color(&PALETTE[1]);
        session.set_line_width(8);
        session.clear();
        assert_eq!(
            recorder.said(),
            vec!["Sol", "Balde de tinta", "Azul", "Espessura 8", "Limpar tudo"]
        );
    }

    #[test]
    fn test_repeated_announcement_debounced() {
        let (mut session, recorder) = session(50, 50);
        session.select_tool(ToolKind::Line);
        session.select_tool(ToolKind::Line);
        assert_eq!(recorder.said(), vec!["Sol", "Linha"]);
    }

    #[test]
    fn test_color_leaves_eraser() {
        let (mut session, _) = session(50, 50);
        session.select_tool(ToolKind::Eraser);
        session.select_color(&PALETTE[3]);
        assert_eq!(session.tools().current_tool, ToolKind::Brush);
        assert_eq!(session.tools().color, PALETTE[3].color);
    }

    #[test]
    fn test_unknown_outline() {
        let (mut session, _) = session(50, 50);
        assert!(matches!(
            session.select_outline(&"moon".into()),
            Err(SessionError::Library(LibraryError::NotFound(_)))
        ));
        assert_eq!(session.selected_outline().unwrap().id.as_str(), "sun");
    }

    #[test]
    fn test_brush_stroke_paints() {
        let (mut session, _) = session(100, 100);
        session.clear();
        session.pointer_down(Point::new(10.0, 10.0)).unwrap();
        assert!(!has_ink(session.surface()));
        session.pointer_move(Point::new(60.0, 10.0)).unwrap();
        session.pointer_up(Point::new(60.0, 10.0)).unwrap();
        assert_eq!(session.surface().pixel(30, 10), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_eraser_paints_white() {
        let (mut session, _) = session(100, 100);
        session.clear();
        session.select_tool(ToolKind::Eraser);
        session.pointer_down(Point::new(50.0, 50.0)).unwrap();
        session.pointer_move(Point::new(52.0, 50.0)).unwrap();
        // The eraser is 50 px wide.
        assert_eq!(session.surface().pixel(51, 70), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_shape_preview_restores_between_moves() {
        let (mut session, _) = session(100, 100);
        session.clear();
        session.select_tool(ToolKind::Line);
        session.pointer_down(Point::new(10.0, 50.0)).unwrap();
        session.pointer_move(Point::new(90.0, 50.0)).unwrap();
        assert_eq!(session.surface().pixel(80, 50), Some([255, 0, 0, 255]));

        session.pointer_move(Point::new(10.0, 90.0)).unwrap();
        assert_eq!(session.surface().pixel(80, 50), Some([0, 0, 0, 0]));
        assert_eq!(session.surface().pixel(10, 80), Some([255, 0, 0, 255]));

        session.pointer_up(Point::new(10.0, 90.0)).unwrap();
        assert_eq!(session.surface().pixel(10, 80), Some([255, 0, 0, 255]));
        // Further moves do nothing after release.
        session.pointer_move(Point::new(90.0, 90.0)).unwrap();
        assert_eq!(session.surface().pixel(80, 90), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_fill_tool() {
        let (mut session, _) = session(20, 20);
        session.clear();
        session.select_tool(ToolKind::Fill);
        session.select_color(&PALETTE[2]);
        session.pointer_down(Point::new(3.5, 3.5)).unwrap();
        assert_eq!(session.surface().pixel(19, 19), Some([255, 255, 0, 255]));

        // Off-surface and non-finite presses are ignored.
        session.select_color(&PALETTE[1]);
        let before = session.surface().clone();
        session.pointer_down(Point::new(-4.0, 3.0)).unwrap();
        session.pointer_down(Point::new(3.0, 20.0)).unwrap();
        session.pointer_down(Point::new(f64::NAN, f64::NAN)).unwrap();
        assert_eq!(session.surface(), &before);
    }

    #[test]
    fn test_resize_rerenders() {
        let (mut session, _) = session(100, 100);
        session.resize(300, 150).unwrap();
        assert_eq!((session.surface().width(), session.surface().height()), (300, 150));
        assert!(has_ink(session.surface()));

        session.clear();
        session.resize(120, 120).unwrap();
        assert!(!has_ink(session.surface()));
    }

    #[test]
    fn test_add_outline_validation() {
        let (mut session, _) = session(50, 50);
        assert!(matches!(
            session.add_outline("", OutlineContent::Vector("<svg></svg>".into())),
            Err(SessionError::InvalidOutline(_))
        ));
        assert!(matches!(
            session.add_outline("Pipa", OutlineContent::Vector("<circle r=\"3\"/>".into())),
            Err(SessionError::InvalidOutline(_))
        ));

        let id = session
            .add_outline("Pipa", OutlineContent::Vector("<svg viewBox=\"0 0 10 10\"></svg>".into()))
            .unwrap();
        assert!(id.as_str().starts_with("custom-"));
        assert_eq!(session.library().len(), 6);
    }

    #[test]
    fn test_raster_outline_must_decode() {
        let (mut session, _) = session(50, 50);
        assert!(matches!(
            session.add_outline("Foto", OutlineContent::Raster(ImageSource::Bytes(vec![1, 2, 3]))),
            Err(SessionError::InvalidOutline(_))
        ));
        let text = ImageSource::DataUrl("data:text/plain;base64,aGVsbG8=".to_string());
        assert!(matches!(
            session.add_outline("Texto", OutlineContent::Raster(text)),
            Err(SessionError::InvalidOutline(_))
        ));
        assert_eq!(session.library().len(), 5);

        let png = encode_png(&[0, 0, 255, 255].repeat(4), 2, 2).unwrap();
        let image = session
            .add_outline("Foto", OutlineContent::Raster(ImageSource::Bytes(png)))
            .unwrap();
        assert!(image.as_str().starts_with("image-"));
        session.select_outline(&image).unwrap();
        assert_eq!(session.surface().pixel(25, 25), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_failed_selection_keeps_previous_outline() {
        let (mut session, recorder) = session(60, 60);
        let broken = OutlineDocument::new(
            "broken",
            "Quebrado",
            OutlineContent::Raster(ImageSource::Bytes(b"garbage".to_vec())),
        );
        session.library.add(broken).unwrap();

        assert!(matches!(
            session.select_outline(&"broken".into()),
            Err(SessionError::Render(RenderError::Decode(_)))
        ));
        assert_eq!(session.selected_outline().unwrap().id.as_str(), "sun");
        assert!(has_ink(session.surface()));
        session.resize(80, 80).unwrap();
        assert!(has_ink(session.surface()));
        assert_eq!(recorder.said(), vec!["Sol"]);
    }

    #[test]
    fn test_remove_selected_outline_selects_first() {
        let (mut session, recorder) = session(80, 80);
        session.select_outline(&"tree".into()).unwrap();
        session.remove_outline(&"tree".into()).unwrap();
        assert_eq!(session.selected_outline().unwrap().id.as_str(), "sun");
        assert_eq!(recorder.said(), vec!["Sol", "Árvore", "Sol"]);
        assert!(session.remove_outline(&"tree".into()).is_err());
    }

    #[test]
    fn test_cannot_remove_last_outline() {
        let (mut session, _) = session(40, 40);
        for id in ["house", "car", "butterfly", "tree"] {
            session.remove_outline(&id.into()).unwrap();
        }
        assert!(matches!(
            session.remove_outline(&"sun".into()),
            Err(SessionError::Library(LibraryError::LastOutline(_)))
        ));
    }

    #[test]
    fn test_export_png() {
        let (session, _) = session(64, 48);
        let png = session.export_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
