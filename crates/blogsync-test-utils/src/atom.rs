//! Builders for Atom documents as the blog service returns them.

/// An `<entry>` document under construction.
#[derive(Debug, Clone)]
pub struct EntryXml {
    pub title: String,
    pub alternate: Option<String>,
    pub edit: Option<String>,
    pub preview: Option<String>,
    pub updated: String,
    pub edited: String,
    pub draft: bool,
    pub content: String,
    pub categories: Vec<String>,
}

impl EntryXml {
    /// Published entry with the given public and edit URLs.
    pub fn new(alternate: &str, edit: &str) -> Self {
        Self {
            title: "Test entry".to_string(),
            alternate: Some(alternate.to_string()),
            edit: Some(edit.to_string()),
            preview: None,
            updated: "2012-12-19T10:00:00+09:00".to_string(),
            edited: "2012-12-19T11:00:00+09:00".to_string(),
            draft: false,
            content: "Hello, world.".to_string(),
            categories: Vec::new(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn updated(mut self, updated: &str) -> Self {
        self.updated = updated.to_string();
        self
    }

    pub fn edited(mut self, edited: &str) -> Self {
        self.edited = edited.to_string();
        self
    }

    pub fn draft(mut self) -> Self {
        self.draft = true;
        self
    }

    pub fn preview(mut self, href: &str) -> Self {
        self.preview = Some(href.to_string());
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }

    pub fn category(mut self, term: &str) -> Self {
        self.categories.push(term.to_string());
        self
    }

    pub fn without_alternate(mut self) -> Self {
        self.alternate = None;
        self
    }

    pub fn without_edit(mut self) -> Self {
        self.edit = None;
        self
    }

    /// The bare `<entry>` element, for embedding in a feed.
    pub fn element(&self) -> String {
        let mut xml = String::from(
            "<entry xmlns=\"http://www.w3.org/2005/Atom\" xmlns:app=\"http://www.w3.org/2007/app\">\n",
        );
        if let Some(edit) = &self.edit {
            xml.push_str(&format!("  <link rel=\"edit\" href=\"{edit}\"/>\n"));
        }
        if let Some(alternate) = &self.alternate {
            xml.push_str(&format!(
                "  <link rel=\"alternate\" type=\"text/html\" href=\"{alternate}\"/>\n"
            ));
        }
        if let Some(preview) = &self.preview {
            xml.push_str(&format!("  <link rel=\"preview\" href=\"{preview}\"/>\n"));
        }
        xml.push_str(&format!("  <title>{}</title>\n", escape(&self.title)));
        xml.push_str(&format!("  <updated>{}</updated>\n", self.updated));
        xml.push_str(&format!("  <app:edited>{}</app:edited>\n", self.edited));
        xml.push_str(&format!(
            "  <content type=\"text/x-markdown\">{}</content>\n",
            escape(&self.content)
        ));
        for term in &self.categories {
            xml.push_str(&format!("  <category term=\"{}\"/>\n", escape(term)));
        }
        let draft = if self.draft { "yes" } else { "no" };
        xml.push_str(&format!(
            "  <app:control>\n    <app:draft>{draft}</app:draft>\n  </app:control>\n"
        ));
        xml.push_str("</entry>");
        xml
    }

    /// A standalone document, as returned by GET/PUT/POST on an entry.
    pub fn document(&self) -> String {
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n{}\n", self.element())
    }
}

/// A feed page holding `entries`, linking to `next` when given.
pub fn feed_xml(entries: &[EntryXml], next: Option<&str>) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<feed xmlns=\"http://www.w3.org/2005/Atom\" xmlns:app=\"http://www.w3.org/2007/app\">\n",
    );
    xml.push_str("  <link rel=\"alternate\" href=\"https://example.hatenablog.com/\"/>\n");
    if let Some(next) = next {
        xml.push_str(&format!("  <link rel=\"next\" href=\"{}\"/>\n", escape(next)));
    }
    xml.push_str("  <title>Example Blog</title>\n");
    for entry in entries {
        xml.push_str(&entry.element());
        xml.push('\n');
    }
    xml.push_str("</feed>\n");
    xml
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
