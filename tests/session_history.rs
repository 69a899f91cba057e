use std::io::Cursor;

use keepsake::{
    CanvasSession, Document, DocumentStore, Element, ElementKind, ElementPatch, Frame,
    GridLayout, KeepsakeResult, Media, MosaicLayout, BytesProbe, SessionOptions,
};

struct NullStore;
impl DocumentStore for NullStore {
    fn save(&mut self, _document: &Document) -> KeepsakeResult<()> {
        Ok(())
    }
}

fn session() -> CanvasSession {
    CanvasSession::new(
        Document::with_default_page(),
        Box::new(NullStore),
        SessionOptions::default(),
    )
}

fn session_with_cap(max_history: usize) -> CanvasSession {
    CanvasSession::new(
        Document::with_default_page(),
        Box::new(NullStore),
        SessionOptions {
            max_history,
            ..SessionOptions::default()
        },
    )
}

fn image_at(id: &str, x: f64, y: f64, z: i32) -> Element {
    Element::image(
        id,
        "m-1",
        "https://cdn.test/p.jpg",
        Frame::new(x, y, 200.0, 150.0),
        0.0,
        z,
    )
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::new(width, height);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn history_cap_evicts_oldest_snapshots() {
    let mut s = session_with_cap(5);
    for i in 0..10 {
        s.add_element(image_at(&format!("e{i}"), 0.0, 0.0, i));
    }
    // Ten commits through a cap of five: only the four most recent edits stay undoable.
    let mut undos = 0;
    while s.undo() {
        undos += 1;
    }
    assert_eq!(undos, 4);
    assert_eq!(s.active_page().elements.len(), 6);
}

#[test]
fn undo_redo_are_inverses() {
    let mut s = session();
    s.add_element(image_at("e1", 10.0, 10.0, 0));
    s.update_element("e1", ElementPatch::position(50.0, 60.0));

    assert!(s.undo());
    assert_eq!(s.active_page().element("e1").unwrap().x, 10.0);
    assert!(s.redo());
    assert_eq!(s.active_page().element("e1").unwrap().x, 50.0);
    assert!(!s.redo());
}

#[test]
fn new_edit_after_undo_discards_redo_branch() {
    let mut s = session();
    s.add_element(image_at("e1", 10.0, 10.0, 0));
    s.update_element("e1", ElementPatch::position(50.0, 60.0));
    assert!(s.undo());

    s.update_element("e1", ElementPatch::rotation(45.0));
    assert!(!s.redo(), "redo tail is gone after a fresh edit");
    let el = s.active_page().element("e1").unwrap();
    assert_eq!(el.rotation, 45.0);
    assert_eq!(el.x, 10.0);
}

#[test]
fn undo_at_baseline_is_refused() {
    let mut s = session();
    assert!(!s.undo());
    s.add_element(image_at("e1", 0.0, 0.0, 0));
    assert!(s.undo());
    assert!(!s.undo());
    assert!(s.active_page().elements.is_empty());
}

#[test]
fn selection_is_not_a_history_entry() {
    let mut s = session();
    s.add_element(image_at("e1", 0.0, 0.0, 0));
    let len = s.history_len();
    s.clear_selection();
    s.select("e1");
    assert_eq!(s.history_len(), len);
}

#[test]
fn duplicate_element_id_is_rejected() {
    let mut s = session();
    s.add_element(image_at("e1", 0.0, 0.0, 0));
    s.add_element(image_at("e1", 90.0, 90.0, 1));
    assert_eq!(s.active_page().elements.len(), 1);
    assert_eq!(s.active_page().element("e1").unwrap().x, 0.0);
}

#[test]
fn update_clamps_below_type_minimum() {
    let mut s = session();
    s.add_element(image_at("e1", 0.0, 0.0, 0));
    s.update_element("e1", ElementPatch::size(4.0, 4.0));
    let el = s.active_page().element("e1").unwrap();
    assert_eq!((el.width, el.height), (30.0, 30.0));
}

#[test]
fn grid_layout_repositions_images_only() {
    let mut s = session();
    s.add_element(image_at("e1", 700.0, 900.0, 0));
    s.add_element(image_at("e2", 700.0, 900.0, 1));
    s.add_element(Element::text("t1", 5.0, 5.0, 2));
    let len = s.history_len();

    s.apply_layout(&GridLayout::default());

    assert_eq!(s.history_len(), len + 1, "layout is one history entry");
    let t = s.active_page().element("t1").unwrap();
    assert_eq!((t.x, t.y), (5.0, 5.0));
    let e1 = s.active_page().element("e1").unwrap();
    let e2 = s.active_page().element("e2").unwrap();
    assert_ne!((e1.x, e1.y), (e2.x, e2.y));
}

#[test]
fn mosaic_layout_tilts_slots() {
    let positions = {
        use keepsake::LayoutGenerator as _;
        MosaicLayout::default().positions(4, 800.0, 1130.0)
    };
    assert_eq!(positions.len(), 4);
    assert!(positions.iter().any(|p| p.rotation != 0.0));
}

#[test]
fn place_photos_fits_aspect_and_commits_once() {
    let mut s = session();
    let mut probe = BytesProbe::new();
    probe.insert("m-wide", png_bytes(200, 100));
    probe.insert("m-tall", png_bytes(100, 300));
    let media = vec![
        Media::photo("m-wide", "https://cdn.test/wide.jpg"),
        Media::photo("m-tall", "https://cdn.test/tall.jpg"),
        Media::video("m-vid", "https://cdn.test/v.mp4", None),
    ];
    let len = s.history_len();

    s.place_photos(&media, &mut probe, &GridLayout::default());

    assert_eq!(s.history_len(), len + 1, "batch placement is one history entry");
    let page = s.active_page();
    assert_eq!(page.elements.len(), 2, "videos are not placed as photos");

    let wide = &page.elements[0];
    assert!((wide.width / wide.height - 2.0).abs() < 1e-9);
    let tall = &page.elements[1];
    assert!((tall.height / tall.width - 3.0).abs() < 1e-9);
}

#[test]
fn failed_probe_places_a_square_placeholder() {
    let mut s = session();
    let mut probe = BytesProbe::new();
    let media = vec![Media::photo("m-missing", "https://cdn.test/x.jpg")];

    s.place_photos(&media, &mut probe, &GridLayout::default());

    let page = s.active_page();
    assert_eq!(page.elements.len(), 1);
    let el = &page.elements[0];
    assert!((el.width - el.height).abs() < 1e-9, "1x1 fallback aspect");
}

#[test]
fn reconcile_resets_history_baseline() {
    let mut s = session();
    s.add_element(image_at("e1", 0.0, 0.0, 0));
    let dropped = s.reconcile_media(&[]);
    assert_eq!(dropped, 1);
    assert!(s.active_page().elements.is_empty());
    assert!(!s.undo(), "a dangling reference cannot be undone back in");
}

#[test]
fn reconcile_refreshes_rotated_urls() {
    let mut s = session();
    s.add_element(image_at("e1", 0.0, 0.0, 0));
    s.reconcile_media(&[Media::photo("m-1", "https://cdn.test/fresh.jpg")]);
    let ElementKind::Image(img) = &s.active_page().element("e1").unwrap().kind else {
        panic!("expected image");
    };
    assert_eq!(img.src, "https://cdn.test/fresh.jpg");
}

#[test]
fn last_page_cannot_be_deleted() {
    let mut s = session();
    assert!(!s.delete_page(0));
    s.add_page(None);
    assert!(s.delete_page(1));
    assert!(!s.delete_page(0));
}

#[test]
fn page_reorder_moves_and_rejects_out_of_range() {
    let mut s = session();
    s.add_page(None);
    s.add_page(None);
    let first = s.document().pages[0].id.clone();
    assert!(s.reorder_page(0, 2));
    assert_eq!(s.document().pages[2].id, first);
    assert!(!s.reorder_page(0, 9));
}

#[test]
fn page_reorder_follows_the_active_page() {
    let mut s = session();
    s.add_page(None);
    s.add_page(None);
    s.set_active_page(1);
    let active = s.document().pages[1].id.clone();

    // Moving an earlier page past the active one shifts it left.
    assert!(s.reorder_page(0, 2));
    assert_eq!(s.active_page_index(), 0);
    assert_eq!(s.active_page().id, active);

    // Moving a later page in front of it shifts it right again.
    assert!(s.reorder_page(2, 0));
    assert_eq!(s.active_page_index(), 1);
    assert_eq!(s.active_page().id, active);
}

#[test]
fn undo_clamps_active_page_after_page_removal() {
    let mut s = session();
    s.add_page(None);
    s.set_active_page(1);
    s.add_element(image_at("e1", 0.0, 0.0, 0));
    s.undo(); // element
    s.undo(); // page add
    assert_eq!(s.document().pages.len(), 1);
    assert_eq!(s.active_page_index(), 0);
}
