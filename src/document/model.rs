use crate::foundation::{
    core::Frame,
    error::{KeepsakeError, KeepsakeResult},
};

/// Version written into every persisted document blob.
///
/// Version 2 additionally covers the seeded tear/scallop generator: the LCG recurrence is part of
/// the visual contract, so replacing it requires bumping this.
pub const SCHEMA_VERSION: u32 = 2;

pub const DEFAULT_PAGE_WIDTH: f64 = 800.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 1130.0;
pub const DEFAULT_PAGE_COLOR: &str = "#f7f3e9";

/// Placeholder restored when a text element is committed empty.
pub const TEXT_PLACEHOLDER: &str = "Your text";

/// The full collection of one guest's scrapbook pages.
///
/// A document always holds at least one page. It is persisted whole as one versioned JSON blob
/// and mutated only through a `CanvasSession`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

/// One scrapbook canvas: fixed dimensions, one background, an ordered list of elements.
///
/// Width/height are fixed at creation. All element geometry is stored in page-native units;
/// display scale never enters the model.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Page {
    pub id: String,
    pub width: f64,
    pub height: f64,
    pub background: Background,
    pub elements: Vec<Element>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Background {
    /// Solid fill, hex color string.
    Color(String),
    /// Procedural texture id, resolved by the geometry generators at render time.
    Texture(String),
}

impl Default for Background {
    fn default() -> Self {
        Self::Color(DEFAULT_PAGE_COLOR.to_string())
    }
}

/// A positioned, transformable item on a page.
///
/// `z_index` determines paint order; ties are broken by insertion order (render performs a stable
/// sort). `id` is unique within a document for the element's lifetime and never reused.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Element {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise, about the element center.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    #[serde(default = "default_scale")]
    pub scale_y: f64,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub locked: bool,
    #[serde(flatten)]
    pub kind: ElementKind,
}

fn default_scale() -> f64 {
    1.0
}

fn is_false(v: &bool) -> bool {
    !*v
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Image(ImageElement),
    Video(VideoElement),
    Sticker(StickerElement),
    Text(TextElement),
    Drawing(DrawingElement),
    Shape(ShapeElement),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageElement {
    /// Reference into the guest's media list; elements whose media no longer exists are dropped
    /// during reconciliation, never nulled.
    pub media_id: String,
    /// Resolved source URL, refreshed from the media list on load (links may be time-limited).
    pub src: String,
    #[serde(default)]
    pub frame: FrameStyle,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_filter_intensity")]
    pub filter_intensity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

fn default_filter() -> String {
    "none".to_string()
}

fn default_filter_intensity() -> f64 {
    100.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoElement {
    pub media_id: String,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StickerElement {
    pub sticker_id: String,
    pub category: StickerCategory,
    /// Fixed source for emoji/stamp stickers. Washi tape carries no stored source; its SVG is
    /// regenerated at render time from the element's current dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerCategory {
    Emoji,
    Stamp,
    Washi,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextElement {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    pub fill: String,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
    /// Optional container chrome behind the glyphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<TextBox>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextBox {
    pub color: String,
    pub shape: TextBoxShape,
    pub padding: f64,
    pub corner_radius: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBoxShape {
    #[default]
    Rectangle,
    Pill,
    Cloud,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawingElement {
    pub strokes: Vec<Stroke>,
}

/// One continuous freehand path.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Flat `[x0, y0, x1, y1, ...]` sequence in element-local coordinates.
    pub points: Vec<f64>,
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    #[serde(default)]
    pub brush: BrushKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    #[default]
    Pen,
    Marker,
    Highlighter,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeElement {
    pub shape: ShapeType,
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default = "default_shape_opacity")]
    pub opacity: f64,
}

fn default_shape_opacity() -> f64 {
    1.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    Rectangle,
    Oval,
    Pill,
    Heart,
    Star,
    Scalloped,
    Starburst,
    Cloud,
    Arrow,
    Banner,
    Ribbon,
    Ticket,
    Tag,
    SpeechBubble,
    ThoughtBubble,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    #[default]
    None,
    Classic,
    Polaroid,
    Film,
    Rounded,
    Oval,
    Heart,
    Torn,
    Scalloped,
    Stamp,
}

impl ElementKind {
    /// Minimum `(width, height)` in page-native units, enforced after any transform.
    pub fn min_size(&self) -> (f64, f64) {
        match self {
            Self::Text(_) => (50.0, 30.0),
            Self::Sticker(s) if s.category == StickerCategory::Washi => (30.0, 10.0),
            _ => (30.0, 30.0),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Video(_) => "video",
            Self::Sticker(_) => "sticker",
            Self::Text(_) => "text",
            Self::Drawing(_) => "drawing",
            Self::Shape(_) => "shape",
        }
    }
}

impl Element {
    pub fn frame(&self) -> Frame {
        Frame::new(self.x, self.y, self.width, self.height)
    }

    /// Clamps width/height up to the per-type floor. Applied by the session after every
    /// geometry-changing merge so no operation can leave an element below its minimum.
    pub fn clamp_min_size(&mut self) {
        let (min_w, min_h) = self.kind.min_size();
        if self.width < min_w {
            self.width = min_w;
        }
        if self.height < min_h {
            self.height = min_h;
        }
    }

    pub fn image(
        id: impl Into<String>,
        media_id: impl Into<String>,
        src: impl Into<String>,
        frame: Frame,
        rotation: f64,
        z_index: i32,
    ) -> Self {
        Self {
            id: id.into(),
            x: frame.x,
            y: frame.y,
            width: frame.width,
            height: frame.height,
            rotation,
            scale_x: 1.0,
            scale_y: 1.0,
            z_index,
            locked: false,
            kind: ElementKind::Image(ImageElement {
                media_id: media_id.into(),
                src: src.into(),
                frame: FrameStyle::default(),
                filter: default_filter(),
                filter_intensity: default_filter_intensity(),
                border_color: None,
            }),
        }
    }

    pub fn video(
        id: impl Into<String>,
        media_id: impl Into<String>,
        src: impl Into<String>,
        thumbnail: Option<String>,
        frame: Frame,
        rotation: f64,
        z_index: i32,
    ) -> Self {
        Self {
            id: id.into(),
            x: frame.x,
            y: frame.y,
            width: frame.width,
            height: frame.height,
            rotation,
            scale_x: 1.0,
            scale_y: 1.0,
            z_index,
            locked: false,
            kind: ElementKind::Video(VideoElement {
                media_id: media_id.into(),
                src: src.into(),
                thumbnail,
            }),
        }
    }

    pub fn sticker(
        id: impl Into<String>,
        sticker_id: impl Into<String>,
        category: StickerCategory,
        x: f64,
        y: f64,
        z_index: i32,
    ) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width: 80.0,
            height: 80.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            z_index,
            locked: false,
            kind: ElementKind::Sticker(StickerElement {
                sticker_id: sticker_id.into(),
                category,
                src: None,
            }),
        }
    }

    pub fn text(id: impl Into<String>, x: f64, y: f64, z_index: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width: 200.0,
            height: 50.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            z_index,
            locked: false,
            kind: ElementKind::Text(TextElement {
                content: TEXT_PLACEHOLDER.to_string(),
                font_family: "Caveat".to_string(),
                font_size: 24.0,
                font_weight: FontWeight::Normal,
                font_style: FontStyle::Normal,
                text_decoration: TextDecoration::None,
                fill: "#3d3d3d".to_string(),
                align: TextAlign::Center,
                vertical_align: VerticalAlign::Middle,
                background: None,
            }),
        }
    }

    pub fn drawing(id: impl Into<String>, frame: Frame, z_index: i32) -> Self {
        Self {
            id: id.into(),
            x: frame.x,
            y: frame.y,
            width: frame.width,
            height: frame.height,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            z_index,
            locked: false,
            kind: ElementKind::Drawing(DrawingElement { strokes: Vec::new() }),
        }
    }

    pub fn shape(id: impl Into<String>, shape: ShapeType, frame: Frame, z_index: i32) -> Self {
        Self {
            id: id.into(),
            x: frame.x,
            y: frame.y,
            width: frame.width,
            height: frame.height,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            z_index,
            locked: false,
            kind: ElementKind::Shape(ShapeElement {
                shape,
                fill: "#e8c39e".to_string(),
                stroke_color: None,
                stroke_width: 0.0,
                corner_radius: 0.0,
                opacity: 1.0,
            }),
        }
    }
}

impl Page {
    /// A fresh page with the default canvas size, warm-neutral background and no elements.
    pub fn default_canvas(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: DEFAULT_PAGE_WIDTH,
            height: DEFAULT_PAGE_HEIGHT,
            background: Background::default(),
            elements: Vec::new(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn next_z_index(&self) -> i32 {
        self.elements.iter().map(|e| e.z_index).max().unwrap_or(0) + 1
    }
}

impl Document {
    pub fn with_default_page() -> Self {
        Self {
            pages: vec![Page::default_canvas("page-1")],
        }
    }

    /// Serialize to the persisted `{ version, pages }` blob.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "version": SCHEMA_VERSION,
            "pages": self.pages,
        })
    }

    /// Development-time validation. Load paths never call this; malformed input is normalized
    /// instead. The builder and the CLI use it to fail loudly on programmer errors.
    pub fn validate(&self) -> KeepsakeResult<()> {
        if self.pages.is_empty() {
            return Err(KeepsakeError::validation("document must have >= 1 page"));
        }

        let mut seen = std::collections::BTreeSet::new();
        for page in &self.pages {
            if !(page.width.is_finite() && page.width > 0.0)
                || !(page.height.is_finite() && page.height > 0.0)
            {
                return Err(KeepsakeError::validation(format!(
                    "page '{}' must have positive finite dimensions",
                    page.id
                )));
            }

            for el in &page.elements {
                if el.id.trim().is_empty() {
                    return Err(KeepsakeError::validation("element id must be non-empty"));
                }
                if !seen.insert(el.id.clone()) {
                    return Err(KeepsakeError::validation(format!(
                        "duplicate element id '{}'",
                        el.id
                    )));
                }
                for v in [el.x, el.y, el.width, el.height, el.rotation, el.scale_x, el.scale_y] {
                    if !v.is_finite() {
                        return Err(KeepsakeError::validation(format!(
                            "element '{}' has non-finite geometry",
                            el.id
                        )));
                    }
                }

                match &el.kind {
                    ElementKind::Image(img) => {
                        if !(0.0..=100.0).contains(&img.filter_intensity) {
                            return Err(KeepsakeError::validation(format!(
                                "element '{}' filter intensity must be in 0..=100",
                                el.id
                            )));
                        }
                    }
                    ElementKind::Drawing(d) => {
                        for stroke in &d.strokes {
                            if stroke.points.len() % 2 != 0 {
                                return Err(KeepsakeError::validation(format!(
                                    "element '{}' has a stroke with odd point count",
                                    el.id
                                )));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_is_empty_with_warm_background() {
        let page = Page::default_canvas("p1");
        assert_eq!(page.width, DEFAULT_PAGE_WIDTH);
        assert_eq!(page.height, DEFAULT_PAGE_HEIGHT);
        assert_eq!(page.background, Background::Color("#f7f3e9".to_string()));
        assert!(page.elements.is_empty());
    }

    #[test]
    fn element_json_uses_type_tag() {
        let el = Element::sticker("e1", "washi-1", StickerCategory::Washi, 10.0, 20.0, 3);
        let v = serde_json::to_value(&el).unwrap();
        assert_eq!(v["type"], "sticker");
        assert_eq!(v["category"], "washi");
        assert_eq!(v["z_index"], 3);
        let back: Element = serde_json::from_value(v).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn background_json_shape() {
        let bg = Background::Texture("dots".to_string());
        let v = serde_json::to_value(&bg).unwrap();
        assert_eq!(v["type"], "texture");
        assert_eq!(v["value"], "dots");
    }

    #[test]
    fn min_sizes_per_type() {
        let img = Element::image("i", "m", "u", Frame::new(0.0, 0.0, 100.0, 100.0), 0.0, 0);
        assert_eq!(img.kind.min_size(), (30.0, 30.0));
        let text = Element::text("t", 0.0, 0.0, 0);
        assert_eq!(text.kind.min_size(), (50.0, 30.0));
        let washi = Element::sticker("w", "washi-1", StickerCategory::Washi, 0.0, 0.0, 0);
        assert_eq!(washi.kind.min_size(), (30.0, 10.0));
        let emoji = Element::sticker("s", "smile", StickerCategory::Emoji, 0.0, 0.0, 0);
        assert_eq!(emoji.kind.min_size(), (30.0, 30.0));
    }

    #[test]
    fn clamp_min_size_raises_small_dimensions() {
        let mut el = Element::image("i", "m", "u", Frame::new(0.0, 0.0, 10.0, 10.0), 0.0, 0);
        el.clamp_min_size();
        assert_eq!((el.width, el.height), (30.0, 30.0));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let mut doc = Document::with_default_page();
        doc.pages[0]
            .elements
            .push(Element::text("e1", 0.0, 0.0, 0));
        doc.pages[0]
            .elements
            .push(Element::text("e1", 10.0, 10.0, 1));
        assert!(doc.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_document() {
        let doc = Document { pages: vec![] };
        assert!(doc.validate().is_err());
    }
}
