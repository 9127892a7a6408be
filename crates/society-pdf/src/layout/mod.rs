//! Page layout primitives shared by the report and certificate renderers
//!
//! All layout coordinates are millimetres measured from the top-left corner
//! of the page, with `y` growing downward. [`Page`] converts to PDF user
//! space (points, origin bottom-left) when it records an operation.
//!
//! Vertical position is carried in an explicit [`Cursor`] value. Draw code
//! asks [`Canvas::ensure_room`] before placing a fixed-height block and
//! continues with the cursor it gets back, which may point at a fresh page.

pub mod text;

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use crate::palette::Rgb;
use crate::watermark::WatermarkImage;
use text::{encode_win_ansi, Align, TextStyle};

pub const PT_PER_MM: f64 = 72.0 / 25.4;
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Resource name of the watermark image XObject
pub const WATERMARK_XOBJECT: &str = "Wm";
/// Resource name of the graphics state carrying watermark opacity
pub const WATERMARK_GSTATE: &str = "GSwm";

/// Bezier control distance for quarter circles
const KAPPA: f64 = 0.552_284_75;

/// Fixed page size and margins, in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
}

impl PageGeometry {
    /// A4 portrait, used by reports
    pub const A4_PORTRAIT: PageGeometry = PageGeometry {
        width: 210.0,
        height: 297.0,
        margin: 14.0,
        top_margin: 20.0,
        bottom_margin: 24.0,
    };

    /// A4 landscape, used by certificates
    pub const A4_LANDSCAPE: PageGeometry = PageGeometry {
        width: 297.0,
        height: 210.0,
        margin: 14.0,
        top_margin: 20.0,
        bottom_margin: 24.0,
    };

    /// Lowest y a block may reach before it must move to the next page
    pub fn content_bottom(&self) -> f64 {
        self.height - self.bottom_margin
    }

    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    pub fn width_pt(&self) -> f32 {
        (self.width * PT_PER_MM) as f32
    }

    pub fn height_pt(&self) -> f32 {
        (self.height * PT_PER_MM) as f32
    }
}

/// Axis-aligned rectangle in layout coordinates (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `width` x `height` box centered on (`cx`, `cy`)
    pub fn centered_on(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }
}

/// Current drawing position: page index and vertical offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f64,
}

impl Cursor {
    pub fn advance(self, dy: f64) -> Cursor {
        Cursor {
            page: self.page,
            y: self.y + dy,
        }
    }

    pub fn at(self, y: f64) -> Cursor {
        Cursor { page: self.page, y }
    }
}

/// How the watermark is stamped on each page
#[derive(Debug, Clone, Copy)]
pub struct WatermarkStamp<'w> {
    pub image: &'w WatermarkImage,
    /// Box the image is fitted into, aspect ratio preserved
    pub frame: Rect,
    pub opacity: f32,
}

impl WatermarkStamp<'_> {
    /// Largest rectangle with the image's aspect ratio centered in `frame`
    pub fn placement(&self) -> Rect {
        let aspect = f64::from(self.image.width()) / f64::from(self.image.height());
        let (w, h) = if aspect >= self.frame.width / self.frame.height {
            (self.frame.width, self.frame.width / aspect)
        } else {
            (self.frame.height * aspect, self.frame.height)
        };
        Rect::centered_on(
            self.frame.x + self.frame.width / 2.0,
            self.frame.y + self.frame.height / 2.0,
            w,
            h,
        )
    }
}

/// Content stream operations recorded for one page
#[derive(Debug, Clone)]
pub struct Page {
    height: f64,
    operations: Vec<Operation>,
    watermarked: bool,
}

impl Page {
    fn new(geometry: &PageGeometry) -> Self {
        Self {
            height: geometry.height,
            operations: Vec::new(),
            watermarked: false,
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    pub fn is_watermarked(&self) -> bool {
        self.watermarked
    }

    /// Whether any `Tj` on this page shows exactly `text`
    pub fn shows_text(&self, text: &str) -> bool {
        let encoded = encode_win_ansi(text);
        self.operations.iter().any(|op| {
            op.operator == "Tj"
                && matches!(op.operands.first(), Some(Object::String(bytes, _)) if *bytes == encoded)
        })
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn x(&self, mm: f64) -> Object {
        Object::Real((mm * PT_PER_MM) as f32)
    }

    fn y(&self, mm: f64) -> Object {
        Object::Real(((self.height - mm) * PT_PER_MM) as f32)
    }

    fn span(&self, mm: f64) -> Object {
        Object::Real((mm * PT_PER_MM) as f32)
    }

    fn set_fill(&mut self, color: Rgb) {
        let [r, g, b] = color.to_unit();
        self.push("rg", vec![r.into(), g.into(), b.into()]);
    }

    fn set_stroke(&mut self, color: Rgb, line_width_mm: f64) {
        let [r, g, b] = color.to_unit();
        self.push("RG", vec![r.into(), g.into(), b.into()]);
        let width = self.span(line_width_mm);
        self.push("w", vec![width]);
    }

    fn rect_path(&mut self, rect: Rect) {
        let operands = vec![
            self.x(rect.x),
            self.y(rect.y + rect.height),
            self.span(rect.width),
            self.span(rect.height),
        ];
        self.push("re", operands);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.set_fill(color);
        self.rect_path(rect);
        self.push("f", vec![]);
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Rgb, line_width_mm: f64) {
        self.set_stroke(color, line_width_mm);
        self.rect_path(rect);
        self.push("S", vec![]);
    }

    /// Filled rectangle with quarter-circle corners
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgb) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
        let k = r * KAPPA;
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);

        self.set_fill(color);
        self.move_to(left + r, top);
        self.line_to(right - r, top);
        self.curve_to((right - r + k, top), (right, top + r - k), (right, top + r));
        self.line_to(right, bottom - r);
        self.curve_to((right, bottom - r + k), (right - r + k, bottom), (right - r, bottom));
        self.line_to(left + r, bottom);
        self.curve_to((left + r - k, bottom), (left, bottom - r + k), (left, bottom - r));
        self.line_to(left, top + r);
        self.curve_to((left, top + r - k), (left + r - k, top), (left + r, top));
        self.push("h", vec![]);
        self.push("f", vec![]);
    }

    /// Circle marker, either filled or outlined in `color`
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, filled: bool) {
        let k = radius * KAPPA;
        if filled {
            self.set_fill(color);
        } else {
            self.set_stroke(color, 0.3);
        }
        self.move_to(cx + radius, cy);
        self.curve_to((cx + radius, cy + k), (cx + k, cy + radius), (cx, cy + radius));
        self.curve_to((cx - k, cy + radius), (cx - radius, cy + k), (cx - radius, cy));
        self.curve_to((cx - radius, cy - k), (cx - k, cy - radius), (cx, cy - radius));
        self.curve_to((cx + k, cy - radius), (cx + radius, cy - k), (cx + radius, cy));
        self.push("h", vec![]);
        self.push(if filled { "f" } else { "S" }, vec![]);
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, line_width_mm: f64) {
        self.set_stroke(color, line_width_mm);
        self.move_to(from.0, from.1);
        self.line_to(to.0, to.1);
        self.push("S", vec![]);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let operands = vec![self.x(x), self.y(y)];
        self.push("m", operands);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let operands = vec![self.x(x), self.y(y)];
        self.push("l", operands);
    }

    fn curve_to(&mut self, c1: (f64, f64), c2: (f64, f64), end: (f64, f64)) {
        let operands = vec![
            self.x(c1.0),
            self.y(c1.1),
            self.x(c2.0),
            self.y(c2.1),
            self.x(end.0),
            self.y(end.1),
        ];
        self.push("c", operands);
    }

    /// Draw one line of text with its baseline at `y`.
    ///
    /// For centered and right-aligned styles `x` is the anchor point.
    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        let left = match style.align {
            Align::Left => x,
            Align::Center => x - style.width_mm(content) / 2.0,
            Align::Right => x - style.width_mm(content),
        };
        self.set_fill(style.color);
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![
                Object::Name(style.font.resource_name().as_bytes().to_vec()),
                Object::Real(style.size_pt as f32),
            ],
        );
        let operands = vec![self.x(left), self.y(y)];
        self.push("Td", operands);
        self.push(
            "Tj",
            vec![Object::String(
                encode_win_ansi(content),
                StringFormat::Literal,
            )],
        );
        self.push("ET", vec![]);
    }

    /// Paint the watermark image at reduced opacity
    fn stamp(&mut self, stamp: &WatermarkStamp<'_>) {
        let area = stamp.placement();
        self.push("q", vec![]);
        self.push(
            "gs",
            vec![Object::Name(WATERMARK_GSTATE.as_bytes().to_vec())],
        );
        let operands = vec![
            self.span(area.width),
            Object::Integer(0),
            Object::Integer(0),
            self.span(area.height),
            self.x(area.x),
            self.y(area.y + area.height),
        ];
        self.push("cm", operands);
        self.push(
            "Do",
            vec![Object::Name(WATERMARK_XOBJECT.as_bytes().to_vec())],
        );
        self.push("Q", vec![]);
        self.watermarked = true;
    }
}

/// A growing list of pages sharing one geometry and watermark
#[derive(Debug)]
pub struct Canvas<'w> {
    geometry: PageGeometry,
    watermark: Option<WatermarkStamp<'w>>,
    pages: Vec<Page>,
}

impl<'w> Canvas<'w> {
    /// Start a canvas with its first page already stamped
    pub fn new(geometry: PageGeometry, watermark: Option<WatermarkStamp<'w>>) -> Self {
        let mut canvas = Self {
            geometry,
            watermark,
            pages: Vec::new(),
        };
        canvas.add_page();
        canvas
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn watermark(&self) -> Option<&WatermarkStamp<'w>> {
        self.watermark.as_ref()
    }

    /// Cursor at the top margin of the first page
    pub fn start(&self) -> Cursor {
        Cursor {
            page: 0,
            y: self.geometry.top_margin,
        }
    }

    /// Append a page, stamping the watermark before anything else is drawn
    pub fn add_page(&mut self) -> usize {
        let mut page = Page::new(&self.geometry);
        if let Some(stamp) = &self.watermark {
            page.stamp(stamp);
        }
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Make sure a block of `height` fits below `cursor`.
    ///
    /// Returns `cursor` unchanged when it fits, otherwise a cursor at the top
    /// margin of a newly added page.
    pub fn ensure_room(&mut self, cursor: Cursor, height: f64) -> Cursor {
        if cursor.y + height <= self.geometry.content_bottom() {
            return cursor;
        }
        let page = self.add_page();
        tracing::debug!(page = page + 1, y = cursor.y, height, "Page overflow");
        Cursor {
            page,
            y: self.geometry.top_margin,
        }
    }

    /// Page `index`; indices come from cursors handed out by this canvas
    pub fn page(&mut self, index: usize) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[index.min(last)]
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}
