//! Streaming feed parser.
//!
//! Pulls `title` and `link` out of every RSS `<item>` and Atom `<entry>`.
//! Nothing else in the document is inspected; channel-level titles and links
//! are ignored and missing fields are left as `None`.

use crate::models::FeedEntry;
use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
}

/// Parse an RSS 1.0/2.0 or Atom document into its entries, in document order.
///
/// # Errors
///
/// Returns an error if the document is not well-formed XML.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);

    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut capture: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"item" | b"entry" => {
                    current = Some(FeedEntry::default());
                    capture = None;
                }
                b"title" if current.is_some() => {
                    capture = Some(Field::Title);
                    text.clear();
                }
                b"link" => {
                    if let Some(entry) = current.as_mut() {
                        match link_href(&e)? {
                            Some(href) => set_once(&mut entry.link, &href),
                            None => {
                                capture = Some(Field::Link);
                                text.clear();
                            }
                        }
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"link" => {
                    if let (Some(entry), Some(href)) = (current.as_mut(), link_href(&e)?) {
                        set_once(&mut entry.link, &href);
                    }
                }
                b"item" | b"entry" => entries.push(FeedEntry::default()),
                _ => {}
            },
            Event::Text(e) if capture.is_some() => {
                text.push_str(&unescape(std::str::from_utf8(&e)?)?);
            }
            Event::CData(e) if capture.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::GeneralRef(r) if capture.is_some() => {
                let name = std::str::from_utf8(&r)?;
                match resolve_reference(name) {
                    Some(resolved) => text.push_str(&resolved),
                    None => {
                        text.push('&');
                        text.push_str(name);
                        text.push(';');
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"title" | b"link" => {
                    if let (Some(field), Some(entry)) = (capture.take(), current.as_mut()) {
                        match field {
                            Field::Title => set_once(&mut entry.title, &text),
                            Field::Link => set_once(&mut entry.link, &text),
                        }
                    }
                }
                b"item" | b"entry" => {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                    capture = None;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

/// First non-empty value wins; later duplicates (e.g. `media:title`) are ignored.
fn set_once(slot: &mut Option<String>, value: &str) {
    let value = value.trim();
    if slot.is_none() && !value.is_empty() {
        *slot = Some(value.to_string());
    }
}

/// The `href` of an Atom link, if it points at the article itself.
///
/// Links with a `rel` other than `alternate` (e.g. `self`, `enclosure`) yield `None`
/// so they can't shadow the real article link.
fn link_href(e: &BytesStart<'_>) -> Result<Option<String>, Box<dyn Error>> {
    let mut href = None;
    let mut rel_ok = true;
    for attr in e.attributes() {
        let attr = attr?;
        let value = unescape(std::str::from_utf8(&attr.value)?)?.into_owned();
        match attr.key.local_name().as_ref() {
            b"href" => href = Some(value),
            b"rel" => rel_ok = value == "alternate",
            _ => {}
        }
    }
    Ok(href.filter(|_| rel_ok))
}

/// Resolve `amp`, `#38`, `#x26` and friends. Unknown names yield `None`.
fn resolve_reference(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    resolve_predefined_entity(name).map(str::to_owned)
}
