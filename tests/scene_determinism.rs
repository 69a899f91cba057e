use keepsake::{
    Background, Document, Element, ElementKind, Frame, FrameStyle, StickerCategory, channels_at,
    compile_page, fingerprint_display_list, frame_clip_path, normalize,
};

fn framed_photo(id: &str, style: FrameStyle) -> Element {
    let mut el = Element::image(
        id,
        "m-1",
        "https://cdn.test/p.jpg",
        Frame::new(60.0, 80.0, 240.0, 180.0),
        -2.0,
        0,
    );
    if let ElementKind::Image(img) = &mut el.kind {
        img.frame = style;
    }
    el
}

fn scrapbook_page() -> Document {
    let mut doc = Document::with_default_page();
    let page = &mut doc.pages[0];
    page.background = Background::Texture("grid".to_string());
    page.elements.push(framed_photo("el-1", FrameStyle::Torn));
    page.elements.push(Element::sticker(
        "el-2",
        "washi-3",
        StickerCategory::Washi,
        120.0,
        50.0,
        1,
    ));
    page.elements.push(Element::text("el-3", 100.0, 400.0, 2));
    doc
}

#[test]
fn same_page_always_fingerprints_identically() {
    let doc = scrapbook_page();
    let a = fingerprint_display_list(&compile_page(&doc.pages[0]));
    let b = fingerprint_display_list(&compile_page(&doc.pages[0]));
    assert_eq!(a, b);
}

#[test]
fn fingerprint_survives_a_save_load_cycle() {
    let doc = scrapbook_page();
    let before = fingerprint_display_list(&compile_page(&doc.pages[0]));
    let reloaded = normalize(&doc.to_value());
    let after = fingerprint_display_list(&compile_page(&reloaded.pages[0]));
    assert_eq!(before, after);
}

#[test]
fn torn_edge_depends_on_id_and_size_only() {
    let a = frame_clip_path(FrameStyle::Torn, "el-1", 240.0, 180.0).unwrap();
    let b = frame_clip_path(FrameStyle::Torn, "el-1", 240.0, 180.0).unwrap();
    assert_eq!(a, b);

    assert_ne!(a, frame_clip_path(FrameStyle::Torn, "el-2", 240.0, 180.0).unwrap());
    assert_ne!(a, frame_clip_path(FrameStyle::Torn, "el-1", 260.0, 180.0).unwrap());
}

#[test]
fn scalloped_edge_is_reproducible_too() {
    let a = frame_clip_path(FrameStyle::Scalloped, "el-9", 200.0, 150.0).unwrap();
    let b = frame_clip_path(FrameStyle::Scalloped, "el-9", 200.0, 150.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn plain_frames_carry_no_clip() {
    assert!(frame_clip_path(FrameStyle::None, "el-1", 200.0, 150.0).is_none());
    assert!(frame_clip_path(FrameStyle::Polaroid, "el-1", 200.0, 150.0).is_none());
}

#[test]
fn any_element_change_moves_the_fingerprint() {
    let doc = scrapbook_page();
    let base = fingerprint_display_list(&compile_page(&doc.pages[0]));

    let mut moved = doc.clone();
    moved.pages[0].elements[0].x += 1.0;
    assert_ne!(
        base,
        fingerprint_display_list(&compile_page(&moved.pages[0]))
    );

    let mut refilled = doc.clone();
    if let ElementKind::Image(img) = &mut refilled.pages[0].elements[0].kind {
        img.filter = "warm".to_string();
    }
    assert_ne!(
        base,
        fingerprint_display_list(&compile_page(&refilled.pages[0]))
    );
}

#[test]
fn z_order_changes_move_the_fingerprint() {
    let doc = scrapbook_page();
    let base = fingerprint_display_list(&compile_page(&doc.pages[0]));
    let mut raised = doc.clone();
    raised.pages[0].elements[0].z_index = 10;
    assert_ne!(
        base,
        fingerprint_display_list(&compile_page(&raised.pages[0]))
    );
}

#[test]
fn filter_intensity_interpolates_toward_neutral() {
    let full = channels_at("sepia", 100.0);
    let half = channels_at("sepia", 50.0);
    let off = channels_at("sepia", 0.0);

    assert!((full.sepia - 0.8).abs() < 1e-9);
    assert!((half.sepia - 0.4).abs() < 1e-9);
    assert!(off.is_neutral());

    // Out-of-range intensities clamp rather than extrapolate.
    assert_eq!(channels_at("sepia", 250.0), full);
    assert_eq!(channels_at("sepia", -10.0), off);
}

#[test]
fn unknown_filter_id_is_neutral_at_any_intensity() {
    assert!(channels_at("solarize", 100.0).is_neutral());
    assert_eq!(channels_at("solarize", 100.0).to_css(), "none");
}
