use std::io::{self, BufRead, BufReader};

use flate2::bufread::GzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::common::amount::Amount;
use crate::common::error::LedgerError;
use crate::common::event::{AccountRecord, LedgerEvent, SplitRecord, TransactionRecord};

/// Namespace of the top-level GnuCash elements (`gnc:account`, ...).
pub const GNC_NAMESPACE: &[u8] = b"http://www.gnucash.org/XML/gnc";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Wraps `input` in a gzip decoder when it starts with the gzip magic bytes,
/// otherwise hands it back untouched. Nothing is consumed by the check.
pub fn decompress<'a, R: BufRead + 'a>(mut input: R) -> io::Result<Box<dyn BufRead + 'a>> {
    if input.fill_buf()?.starts_with(&GZIP_MAGIC) {
        Ok(Box::new(BufReader::new(GzDecoder::new(input))))
    } else {
        Ok(Box::new(input))
    }
}

/// Streams the recognized elements of a GnuCash XML document.
///
/// The document is read in a single pass. Only start elements bound to
/// [`GNC_NAMESPACE`] named `count-data`, `account` or `transaction` are
/// decoded, one subtree at a time; everything else is skipped. The iterator
/// stops after the first error.
///
/// # Examples
///
/// ```
/// use gnc_ledger::common::event::LedgerEvent;
/// use gnc_ledger::io::reader::read_events;
///
/// let xml = r#"<gnc-v2 xmlns:gnc="http://www.gnucash.org/XML/gnc"
///                      xmlns:cd="http://www.gnucash.org/XML/cd">
///     <gnc:count-data cd:type="account">3</gnc:count-data>
/// </gnc-v2>"#;
/// let events: Vec<_> = read_events(xml.as_bytes()).collect();
///
/// assert!(matches!(
///     &events[..],
///     [Ok(LedgerEvent::CountData { kind, value })] if kind == "account" && value == "3"
/// ));
/// ```
pub fn read_events<R: BufRead>(input: R) -> EventReader<R> {
    EventReader {
        reader: NsReader::from_reader(input),
        buf: Vec::new(),
        done: false,
    }
}

pub struct EventReader<R> {
    reader: NsReader<R>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<LedgerEvent, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.next_event();
        if !matches!(next, Ok(Some(_))) {
            self.done = true;
        }
        next.transpose()
    }
}

impl<R: BufRead> EventReader<R> {
    fn next_event(&mut self) -> Result<Option<LedgerEvent>, LedgerError> {
        loop {
            self.buf.clear();
            let (ns, event) = self.reader.read_resolved_event_into(&mut self.buf)?;
            let start = match event {
                Event::Start(start) => start,
                Event::Eof => return Ok(None),
                _ => continue,
            };
            if !matches!(ns, ResolveResult::Bound(Namespace(ns)) if ns == GNC_NAMESPACE) {
                continue;
            }
            let start = start.into_owned();

            let event = match start.local_name().as_ref() {
                b"count-data" => {
                    let kind = attribute(&start, b"type")?.unwrap_or_default();
                    let element = read_element(&mut self.reader, &start)?;
                    LedgerEvent::CountData {
                        kind,
                        value: element.text,
                    }
                }
                b"account" => {
                    let element = read_element(&mut self.reader, &start)?;
                    LedgerEvent::Account(account_record(&element))
                }
                b"transaction" => {
                    let element = read_element(&mut self.reader, &start)?;
                    LedgerEvent::Transaction(transaction_record(&element)?)
                }
                _ => continue,
            };
            return Ok(Some(event));
        }
    }
}

/// Subtree of one recognized element, keyed by local names.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn named(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            ..Default::default()
        }
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'e>(&'e self, name: &'e str) -> impl Iterator<Item = &'e Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first element along `path`, empty when any step is missing.
    fn text_at(&self, path: &[&str]) -> String {
        path.iter()
            .try_fold(self, |element, name| element.child(name))
            .map(|element| element.text.clone())
            .unwrap_or_default()
    }
}

/// Reads events up to the end tag matching `start`, which has already been
/// consumed.
fn read_element<R: BufRead>(
    reader: &mut NsReader<R>,
    start: &BytesStart<'_>,
) -> Result<Element, LedgerError> {
    let mut current = Element::named(start);
    let mut open: Vec<Element> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => open.push(std::mem::replace(&mut current, Element::named(&e))),
            Event::Empty(e) => current.children.push(Element::named(&e)),
            Event::Text(t) => current.text.push_str(&t.unescape()?),
            Event::CData(c) => current.text.push_str(&String::from_utf8_lossy(&c)),
            Event::End(_) => match open.pop() {
                Some(mut parent) => {
                    std::mem::swap(&mut parent, &mut current);
                    current.children.push(parent);
                }
                None => return Ok(current),
            },
            Event::Eof => {
                let outermost = open.first().unwrap_or(&current);
                return Err(LedgerError::UnexpectedEof(outermost.name.clone()));
            }
            _ => {}
        }
        buf.clear();
    }
}

fn attribute(start: &BytesStart<'_>, local_name: &[u8]) -> Result<Option<String>, LedgerError> {
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == local_name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn account_record(element: &Element) -> AccountRecord {
    AccountRecord {
        id: element.text_at(&["id"]),
        name: element.text_at(&["name"]),
        kind: element.text_at(&["type"]),
        parent_id: element.text_at(&["parent"]),
        commodity_space: element.text_at(&["commodity", "space"]),
    }
}

fn transaction_record(element: &Element) -> Result<TransactionRecord, LedgerError> {
    // '2014-07-30 00:00:00 +0200', only the calendar date is kept
    let posted = element.text_at(&["date-posted", "date"]);
    let date = posted.split(' ').next().unwrap_or_default().trim().to_string();

    let splits = match element.child("splits") {
        Some(splits) => splits
            .children_named("split")
            .map(split_record)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(TransactionRecord {
        num: element.text_at(&["num"]),
        date,
        splits,
    })
}

fn split_record(element: &Element) -> Result<SplitRecord, LedgerError> {
    let value = element.text_at(&["value"]);
    let amount = Amount::from_rational(&value).map_err(|e| LedgerError::InvalidValue {
        reason: e.to_string(),
        value,
    })?;
    Ok(SplitRecord {
        value: amount,
        account_id: element.text_at(&["account"]),
    })
}
