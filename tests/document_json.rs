use keepsake::{
    Background, Document, Element, ElementKind, Frame, FrameStyle, SCHEMA_VERSION, ShapeType,
    StickerCategory, normalize,
};

fn rich_document() -> Document {
    let mut doc = Document::with_default_page();
    let page = &mut doc.pages[0];
    page.background = Background::Texture("craft".to_string());

    let mut photo = Element::image(
        "el-1",
        "m-1",
        "https://cdn.test/a.jpg",
        Frame::new(40.0, 60.0, 320.0, 240.0),
        -3.0,
        0,
    );
    if let ElementKind::Image(img) = &mut photo.kind {
        img.frame = FrameStyle::Polaroid;
        img.filter = "vintage".to_string();
        img.filter_intensity = 70.0;
        img.border_color = Some("#ffffff".to_string());
    }
    page.elements.push(photo);

    page.elements.push(Element::video(
        "el-2",
        "m-2",
        "https://cdn.test/b.mp4",
        Some("https://cdn.test/b.jpg".to_string()),
        Frame::new(400.0, 60.0, 320.0, 180.0),
        0.0,
        1,
    ));
    page.elements
        .push(Element::sticker("el-3", "washi-4", StickerCategory::Washi, 100.0, 400.0, 2));
    page.elements.push(Element::text("el-4", 120.0, 500.0, 3));

    let mut shape = Element::shape(
        "el-5",
        ShapeType::Heart,
        Frame::new(500.0, 600.0, 140.0, 130.0),
        4,
    );
    shape.rotation = 15.0;
    shape.locked = true;
    page.elements.push(shape);

    doc
}

#[test]
fn document_survives_json_round_trip() {
    let doc = rich_document();
    let value = doc.to_value();
    assert_eq!(value["version"], SCHEMA_VERSION);
    assert_eq!(normalize(&value), doc);
}

#[test]
fn round_trip_is_stable_across_two_cycles() {
    let doc = rich_document();
    let once = normalize(&doc.to_value());
    let twice = normalize(&once.to_value());
    assert_eq!(once, twice);
}

#[test]
fn legacy_single_page_payload_is_upgraded() {
    let raw = serde_json::json!({
        "width": 640.0,
        "height": 900.0,
        "background": { "type": "color", "value": "#ffffff" },
        "elements": [
            {
                "id": "a",
                "type": "text",
                "x": 10.0, "y": 10.0, "width": 200.0, "height": 50.0,
                "content": "hi",
                "font_family": "Caveat",
                "font_size": 24.0,
                "fill": "#3d3d3d"
            }
        ]
    });
    let doc = normalize(&raw);
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.pages[0].width, 640.0);
    assert_eq!(doc.pages[0].elements.len(), 1);
}

#[test]
fn locked_flag_round_trips_when_set_and_is_omitted_otherwise() {
    let doc = rich_document();
    let value = doc.to_value();
    let elements = value["pages"][0]["elements"].as_array().unwrap();
    assert!(elements[0].get("locked").is_none());
    assert_eq!(elements[4]["locked"], true);
    assert_eq!(normalize(&value), doc);
}

#[test]
fn validate_rejects_duplicate_element_ids() {
    let mut doc = rich_document();
    let dup = doc.pages[0].elements[0].clone();
    doc.pages[0].elements.push(dup);
    assert!(doc.validate().is_err());
}

#[test]
fn validate_rejects_non_positive_page_dimensions() {
    let mut doc = Document::with_default_page();
    doc.pages[0].height = 0.0;
    assert!(doc.validate().is_err());
}
