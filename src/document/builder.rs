use crate::{
    document::model::{Background, Document, Element, Page},
    foundation::error::{KeepsakeError, KeepsakeResult},
};

/// Programmatic document construction. JSON via Serde is supported, but tests and host
/// integrations usually want this instead; `build()` validates the result.
pub struct DocumentBuilder {
    pages: Vec<Page>,
}

impl DocumentBuilder {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    pub fn page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn build(self) -> KeepsakeResult<Document> {
        let doc = Document { pages: self.pages };
        doc.validate()?;
        Ok(doc)
    }
}

pub struct PageBuilder {
    id: String,
    width: f64,
    height: f64,
    background: Background,
    elements: Vec<Element>,
}

impl PageBuilder {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            background: Background::default(),
            elements: Vec::new(),
        }
    }

    pub fn background(mut self, bg: Background) -> Self {
        self.background = bg;
        self
    }

    pub fn element(mut self, el: Element) -> KeepsakeResult<Self> {
        if self.elements.iter().any(|e| e.id == el.id) {
            return Err(KeepsakeError::validation(format!(
                "duplicate element id '{}'",
                el.id
            )));
        }
        self.elements.push(el);
        Ok(self)
    }

    pub fn build(self) -> KeepsakeResult<Page> {
        if self.id.trim().is_empty() {
            return Err(KeepsakeError::validation("page id must be non-empty"));
        }
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(KeepsakeError::validation(
                "page dimensions must be positive and finite",
            ));
        }
        Ok(Page {
            id: self.id,
            width: self.width,
            height: self.height,
            background: self.background,
            elements: self.elements,
        })
    }
}
