use kurbo::{Affine, BezPath, Shape as _};

use crate::{
    document::model::{
        BrushKind, Element, ElementKind, Page, ShapeType, StickerCategory, TextAlign,
        TextBoxShape, TextDecoration, VerticalAlign,
    },
    geometry::{
        clip::frame_clip_path,
        decor::{Edges, frame_overlay_svg, frame_padding, washi_svg},
        filter::{FilterChannels, channels_at},
        shape::shape_path,
        texture::background_texture_svg,
    },
};

/// Backend-agnostic display list for a single page.
///
/// This is the reproducibility core: the editor and the viewer both compile pages through
/// [`compile_page`], so every per-type visual rule (frame padding, clip paths, filter channels,
/// washi regeneration, z-order) is applied in exactly one place. Hosts map the list onto DOM
/// nodes, a 2D canvas, or a retained scene graph; a host that honors the node order and fields
/// renders the same pixels in both surfaces.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DisplayList {
    pub page_id: String,
    pub width: f64,
    pub height: f64,
    pub background: BackgroundPaint,
    /// Paint order: stable sort by `z_index`, ties broken by insertion order.
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackgroundPaint {
    Color { value: String },
    Texture { id: String, src: String },
}

/// One element resolved into drawable form.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneNode {
    pub id: String,
    pub z_index: i32,
    /// Insertion index within the page, the z tie-breaker.
    pub seq: usize,
    /// Page-space transform: translate to (x, y), then rotate and scale about the element
    /// center. Element-local space is `(0,0)..(width,height)`.
    pub transform: Affine,
    pub width: f64,
    pub height: f64,
    pub locked: bool,
    pub content: NodeContent,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeContent {
    Image {
        src: String,
        /// SVG path data clipping the photo, for clip-style frames.
        clip: Option<String>,
        /// Content inset reserved by the frame style.
        padding: Edges,
        /// Frame artwork drawn over the photo, as an SVG data URI.
        overlay: Option<String>,
        channels: FilterChannels,
        css_filter: String,
        border_color: Option<String>,
    },
    Video {
        src: String,
        thumbnail: Option<String>,
    },
    Sticker {
        category: StickerCategory,
        sticker_id: String,
        /// Washi tape regenerates here from the element's current dimensions; other categories
        /// pass their stored source through.
        src: Option<String>,
    },
    Text {
        content: String,
        font_family: String,
        font_size: f64,
        bold: bool,
        italic: bool,
        underline: bool,
        fill: String,
        align: TextAlign,
        vertical_align: VerticalAlign,
        /// Container chrome behind the glyphs: fill color, outline path, content padding.
        container: Option<TextContainer>,
    },
    Drawing {
        strokes: Vec<StrokePath>,
    },
    Shape {
        /// SVG path data in element-local coordinates.
        path: String,
        fill: String,
        stroke_color: Option<String>,
        stroke_width: f64,
        opacity: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextContainer {
    pub color: String,
    pub path: String,
    pub padding: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StrokePath {
    /// SVG path data (polyline) in element-local coordinates.
    pub d: String,
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    pub brush: BrushKind,
}

/// Compile one page into its display list. Pure: the same page always compiles to the same
/// list, which is what the scene fingerprint asserts.
pub fn compile_page(page: &Page) -> DisplayList {
    let background = match &page.background {
        crate::document::model::Background::Color(value) => BackgroundPaint::Color {
            value: value.clone(),
        },
        crate::document::model::Background::Texture(id) => BackgroundPaint::Texture {
            id: id.clone(),
            src: background_texture_svg(id, page.width, page.height),
        },
    };

    let mut nodes: Vec<SceneNode> = page
        .elements
        .iter()
        .enumerate()
        .map(|(seq, el)| compile_element(el, seq))
        .collect();
    nodes.sort_by(|a, b| a.z_index.cmp(&b.z_index).then(a.seq.cmp(&b.seq)));

    DisplayList {
        page_id: page.id.clone(),
        width: page.width,
        height: page.height,
        background,
        nodes,
    }
}

fn compile_element(el: &Element, seq: usize) -> SceneNode {
    let content = match &el.kind {
        ElementKind::Image(img) => {
            let channels = channels_at(&img.filter, img.filter_intensity);
            NodeContent::Image {
                src: img.src.clone(),
                clip: frame_clip_path(img.frame, &el.id, el.width, el.height),
                padding: frame_padding(img.frame, el.width, el.height),
                overlay: frame_overlay_svg(img.frame, el.width, el.height),
                css_filter: channels.to_css(),
                channels,
                border_color: img.border_color.clone(),
            }
        }
        ElementKind::Video(vid) => NodeContent::Video {
            src: vid.src.clone(),
            thumbnail: vid.thumbnail.clone(),
        },
        ElementKind::Sticker(st) => NodeContent::Sticker {
            category: st.category,
            sticker_id: st.sticker_id.clone(),
            src: match st.category {
                StickerCategory::Washi => Some(washi_svg(&st.sticker_id, el.width, el.height)),
                _ => st.src.clone(),
            },
        },
        ElementKind::Text(text) => NodeContent::Text {
            content: text.content.clone(),
            font_family: text.font_family.clone(),
            font_size: text.font_size,
            bold: text.font_weight == crate::document::model::FontWeight::Bold,
            italic: text.font_style == crate::document::model::FontStyle::Italic,
            underline: text.text_decoration == TextDecoration::Underline,
            fill: text.fill.clone(),
            align: text.align,
            vertical_align: text.vertical_align,
            container: text.background.as_ref().map(|tb| TextContainer {
                color: tb.color.clone(),
                path: text_container_path(tb.shape, el.width, el.height, tb.corner_radius),
                padding: tb.padding,
            }),
        },
        ElementKind::Drawing(drawing) => NodeContent::Drawing {
            strokes: drawing
                .strokes
                .iter()
                .map(|s| StrokePath {
                    d: polyline_path(&s.points),
                    color: s.color.clone(),
                    width: s.width,
                    opacity: s.opacity,
                    brush: s.brush,
                })
                .collect(),
        },
        ElementKind::Shape(shape) => NodeContent::Shape {
            path: shape_path(shape.shape, el.width, el.height, shape.corner_radius).to_svg(),
            fill: shape.fill.clone(),
            stroke_color: shape.stroke_color.clone(),
            stroke_width: shape.stroke_width,
            opacity: shape.opacity,
        },
    };

    SceneNode {
        id: el.id.clone(),
        z_index: el.z_index,
        seq,
        transform: element_transform(el),
        width: el.width,
        height: el.height,
        locked: el.locked,
        content,
    }
}

/// Translate to the element origin, then rotate and scale about the element center.
pub fn element_transform(el: &Element) -> Affine {
    let cx = el.width / 2.0;
    let cy = el.height / 2.0;
    Affine::translate((el.x, el.y))
        * Affine::translate((cx, cy))
        * Affine::rotate(el.rotation.to_radians())
        * Affine::scale_non_uniform(el.scale_x, el.scale_y)
        * Affine::translate((-cx, -cy))
}

fn text_container_path(shape: TextBoxShape, w: f64, h: f64, corner_radius: f64) -> String {
    match shape {
        TextBoxShape::Rectangle => shape_path(ShapeType::Rectangle, w, h, corner_radius).to_svg(),
        TextBoxShape::Pill => shape_path(ShapeType::Pill, w, h, 0.0).to_svg(),
        TextBoxShape::Cloud => shape_path(ShapeType::Cloud, w, h, 0.0).to_svg(),
    }
}

fn polyline_path(points: &[f64]) -> String {
    let mut p = BezPath::new();
    let mut pairs = points.chunks_exact(2);
    if let Some(first) = pairs.next() {
        p.move_to((first[0], first[1]));
    }
    for pair in pairs {
        p.line_to((pair[0], pair[1]));
    }
    p.to_svg()
}
