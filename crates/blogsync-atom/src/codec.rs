//! Atom XML parsing and serialization
//!
//! Documents are read into a small element tree keyed by local names, so
//! namespace prefixes chosen by the server do not matter. Serialization
//! writes the fixed prefixes `app:` and `hatenablog:`.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;

use crate::model::{
    APP_NS, ATOM_NS, AtomEntry, Author, Category, Content, Control, Feed, HATENABLOG_NS, Link,
    Links,
};
use crate::{Error, Result};

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Parse one page of an Atom feed.
pub fn parse_feed(bytes: &[u8]) -> Result<Feed> {
    let root = read_document(bytes)?;
    if root.name != "feed" {
        return Err(Error::xml(format!("expected <feed>, found <{}>", root.name)));
    }

    let mut feed = Feed::default();
    for child in &root.children {
        match child.name.as_str() {
            "link" => feed.links.push(link_from(child)),
            "title" => feed.title = child.text.clone(),
            "subtitle" => feed.subtitle = child.text.clone(),
            "entry" => feed.entries.push(entry_from(child)?),
            _ => {}
        }
    }
    Ok(feed)
}

/// Parse a single `<entry>` document.
pub fn parse_entry(bytes: &[u8]) -> Result<AtomEntry> {
    let root = read_document(bytes)?;
    if root.name != "entry" {
        return Err(Error::xml(format!("expected <entry>, found <{}>", root.name)));
    }
    entry_from(&root)
}

/// Serialize an entry for PUT/POST, including the XML declaration.
pub fn serialize_entry(entry: &AtomEntry) -> Result<Vec<u8>> {
    let mut writer = Writer::new(XML_HEADER.as_bytes().to_vec());

    let root = BytesStart::new("entry").with_attributes([
        ("xmlns", ATOM_NS),
        ("xmlns:app", APP_NS),
        ("xmlns:hatenablog", HATENABLOG_NS),
    ]);
    write(&mut writer, Event::Start(root))?;

    if let Some(id) = &entry.id {
        write_text_element(&mut writer, "id", &[], id)?;
    }
    for link in entry.links.iter() {
        let empty = BytesStart::new("link")
            .with_attributes([("rel", link.rel.as_str()), ("href", link.href.as_str())]);
        write(&mut writer, Event::Empty(empty))?;
    }
    write_text_element(&mut writer, "title", &[], &entry.title)?;
    if let Some(updated) = &entry.updated {
        write_text_element(&mut writer, "updated", &[], &format_timestamp(updated))?;
    }

    match entry.content.content_type.as_deref() {
        Some(content_type) if !content_type.is_empty() => write_text_element(
            &mut writer,
            "content",
            &[("type", content_type)],
            &entry.content.body,
        )?,
        _ => write_text_element(&mut writer, "content", &[], &entry.content.body)?,
    }

    for category in &entry.categories {
        let empty = BytesStart::new("category").with_attributes([("term", category.term.as_str())]);
        write(&mut writer, Event::Empty(empty))?;
    }

    if let Some(control) = &entry.control {
        write(&mut writer, Event::Start(BytesStart::new("app:control")))?;
        write_text_element(&mut writer, "app:draft", &[], &control.draft)?;
        write_text_element(&mut writer, "app:preview", &[], &control.preview)?;
        write(&mut writer, Event::End(BytesEnd::new("app:control")))?;
    }

    if let Some(custom_url) = entry.custom_url.as_deref().filter(|s| !s.is_empty()) {
        write_text_element(&mut writer, "hatenablog:custom-url", &[], custom_url)?;
    }

    write(&mut writer, Event::End(BytesEnd::new("entry")))?;
    Ok(writer.into_inner())
}

fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(Error::xml)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
    write(writer, Event::Start(start))?;
    write(writer, Event::Text(BytesText::new(text)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn entry_from(element: &Element) -> Result<AtomEntry> {
    let mut entry = AtomEntry::default();
    for child in &element.children {
        match child.name.as_str() {
            "id" => entry.id = Some(child.text.clone()),
            "link" => entry.links.push(link_from(child)),
            "author" => {
                entry.author = Some(Author {
                    name: child.child_text("name").unwrap_or_default().to_string(),
                })
            }
            "title" => entry.title = child.text.clone(),
            "updated" => entry.updated = Some(timestamp_from(child)?),
            "published" => entry.published = Some(timestamp_from(child)?),
            "edited" => entry.edited = Some(timestamp_from(child)?),
            "content" => {
                entry.content = Content {
                    content_type: child.attribute("type").map(str::to_string),
                    body: child.text.clone(),
                }
            }
            "category" => entry.categories.push(Category {
                term: child.attribute("term").unwrap_or_default().to_string(),
            }),
            "control" => {
                entry.control = Some(Control {
                    draft: child.child_text("draft").unwrap_or_default().trim().to_string(),
                    preview: child.child_text("preview").unwrap_or_default().trim().to_string(),
                })
            }
            "custom-url" => entry.custom_url = Some(child.text.clone()),
            _ => {}
        }
    }
    Ok(entry)
}

fn link_from(element: &Element) -> Link {
    Link::new(
        element.attribute("rel").unwrap_or_default(),
        element.attribute("href").unwrap_or_default(),
    )
}

fn timestamp_from(element: &Element) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(element.text.trim()).map_err(|_| Error::Timestamp {
        element: element.name.clone(),
        value: element.text.clone(),
    })
}

/// Element with its local name, attributes, direct text and child elements.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let mut element = Element {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Default::default()
        };
        for attribute in start.attributes() {
            let attribute = attribute.map_err(Error::xml)?;
            let key = attribute.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let name = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value().map_err(Error::xml)?.into_owned();
            element.attributes.push((name, value));
        }
        Ok(element)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn child_text(&self, name: &str) -> Option<&str> {
        self.children
            .iter()
            .find(|child| child.name == name)
            .map(|child| child.text.as_str())
    }
}

fn read_document(bytes: &[u8]) -> Result<Element> {
    let source = std::str::from_utf8(bytes).map_err(Error::xml)?;
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event().map_err(Error::xml)? {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::End(_) => {
                let Some(element) = stack.pop() else {
                    return Err(Error::xml("unbalanced end tag"));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text.unescape().map_err(Error::xml)?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    let data = data.into_inner();
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => return Err(Error::xml("unexpected end of document")),
            _ => {}
        }
    }
}
