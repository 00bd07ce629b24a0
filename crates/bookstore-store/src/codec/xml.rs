//! # XML Codec
//!
//! Lists are wrapped in a container element with one child per item, and
//! each record uses a plain `<id>` element for its own identifier.
//!
//! Money is written in dollars and ratings must be finite, the same as in
//! the JSON records. Text keeps its leading and trailing whitespace.
//!
//! ```xml
//! <?xml version='1.0' encoding='utf-8'?>
//! <bookstore>
//!   <next_ids><book>3</book><author>2</author><customer>2</customer><order>2</order></next_ids>
//!   <authors><author><id>1</id><name>Leo Tolstoy</name><country>Russia</country></author></authors>
//!   <books><book><id>1</id><title>War and Peace</title><author_id>1</author_id>...</book></books>
//!   <customers>
//!     <customer>
//!       <id>1</id>...<purchased_books><book_id>1</book_id></purchased_books>
//!     </customer>
//!   </customers>
//!   <orders>
//!     <order><id>1</id>...<books><book_id>1</book_id></books></order>
//!   </orders>
//! </bookstore>
//! ```

use bookstore_core::money::major_units;
use bookstore_core::snapshot::finite_rating;
use bookstore_core::{
    AuthorId, AuthorRecord, BookId, BookRecord, CatalogSnapshot, CustomerId, CustomerRecord,
    Money, NextIds, OrderId, OrderRecord, OrderStatus,
};
use quick_xml::encoding::EncodingError;
use quick_xml::events::{BytesText, Event};
use quick_xml::se::Serializer;
use quick_xml::{DeError, Reader, Writer};
use serde::{Deserialize, Serialize};

use super::SnapshotCodec;
use crate::error::StoreResult;
use crate::format::StorageFormat;

const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl SnapshotCodec for XmlCodec {
    fn format(&self) -> StorageFormat {
        StorageFormat::Xml
    }

    fn encode(&self, snapshot: &CatalogSnapshot) -> StoreResult<String> {
        let document = XmlDocument::from(snapshot);

        let mut body = String::new();
        let mut serializer = Serializer::new(&mut body);
        serializer.indent(' ', 2);
        document.serialize(serializer)?;

        Ok(format!("{}\n{}\n", XML_DECLARATION, body))
    }

    fn decode(&self, contents: &str) -> StoreResult<CatalogSnapshot> {
        let protected = protect_leaf_whitespace(contents)?;
        let document: XmlDocument = quick_xml::de::from_reader(protected.as_slice())?;
        Ok(document.into())
    }
}

// =============================================================================
// Whitespace Preservation
// =============================================================================

/// Rewrites the edge whitespace of every leaf element's text as character
/// references.
///
/// The serde deserializer trims raw text before unescaping it, so
/// `<name>&#32;Leo&#32;</name>` decodes to `" Leo "` where
/// `<name> Leo </name>` would decode to `"Leo"`. Text that is whitespace
/// only, such as indentation, is left for the deserializer to drop.
fn protect_leaf_whitespace(contents: &str) -> Result<Vec<u8>, DeError> {
    let mut reader = Reader::from_str(contents);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(contents.len()));

    let mut after_start = false;
    let mut pending: Option<BytesText<'_>> = None;
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Text(text) if after_start => {
                pending = Some(text);
                after_start = false;
            }
            event => {
                if let Some(text) = pending.take() {
                    let text = if matches!(event, Event::End(_)) {
                        char_ref_edges(text)?
                    } else {
                        text
                    };
                    writer
                        .write_event(Event::Text(text))
                        .map_err(quick_xml::Error::from)?;
                }
                after_start = matches!(event, Event::Start(_));
                writer.write_event(event).map_err(quick_xml::Error::from)?;
            }
        }
    }

    Ok(writer.into_inner())
}

fn char_ref_edges(text: BytesText<'_>) -> Result<BytesText<'static>, DeError> {
    let raw = text.into_inner();
    let raw = std::str::from_utf8(&raw).map_err(EncodingError::from)?;

    let body = raw.trim_matches(is_xml_space);
    if body.is_empty() || body.len() == raw.len() {
        return Ok(BytesText::from_escaped(raw.to_string()));
    }

    let lead = raw.len() - raw.trim_start_matches(is_xml_space).len();
    let mut escaped = String::with_capacity(raw.len() + 16);
    push_char_refs(&mut escaped, &raw[..lead]);
    escaped.push_str(body);
    push_char_refs(&mut escaped, &raw[lead + body.len()..]);
    Ok(BytesText::from_escaped(escaped))
}

fn push_char_refs(out: &mut String, whitespace: &str) {
    for c in whitespace.chars() {
        out.push_str(&format!("&#{};", c as u32));
    }
}

fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

// =============================================================================
// Document Shape
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "bookstore")]
struct XmlDocument {
    next_ids: NextIds,
    #[serde(default)]
    authors: AuthorList,
    #[serde(default)]
    books: BookList,
    #[serde(default)]
    customers: CustomerList,
    #[serde(default)]
    orders: OrderList,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AuthorList {
    #[serde(rename = "author", default)]
    items: Vec<XmlAuthor>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct BookList {
    #[serde(rename = "book", default)]
    items: Vec<XmlBook>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CustomerList {
    #[serde(rename = "customer", default)]
    items: Vec<XmlCustomer>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OrderList {
    #[serde(rename = "order", default)]
    items: Vec<XmlOrder>,
}

/// `<purchased_books>` / `<books>` inside a customer or order.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BookIdList {
    #[serde(rename = "book_id", default)]
    ids: Vec<BookId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlAuthor {
    id: AuthorId,
    name: String,
    country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    birthday: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlBook {
    id: BookId,
    title: String,
    author_id: AuthorId,
    #[serde(with = "major_units")]
    price: Money,
    genre: String,
    #[serde(default, with = "finite_rating")]
    rating: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlCustomer {
    id: CustomerId,
    name: String,
    email: String,
    #[serde(with = "major_units")]
    balance: Money,
    #[serde(default)]
    purchased_books: BookIdList,
}

#[derive(Debug, Serialize, Deserialize)]
struct XmlOrder {
    id: OrderId,
    customer_id: CustomerId,
    order_date: String,
    #[serde(default)]
    status: OrderStatus,
    #[serde(with = "major_units")]
    total_price: Money,
    #[serde(default)]
    books: BookIdList,
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&CatalogSnapshot> for XmlDocument {
    fn from(snapshot: &CatalogSnapshot) -> Self {
        XmlDocument {
            next_ids: snapshot.next_ids,
            authors: AuthorList {
                items: snapshot
                    .authors
                    .iter()
                    .map(|a| XmlAuthor {
                        id: a.author_id,
                        name: a.name.clone(),
                        country: a.country.clone(),
                        birthday: a.birthday.clone(),
                    })
                    .collect(),
            },
            books: BookList {
                items: snapshot
                    .books
                    .iter()
                    .map(|b| XmlBook {
                        id: b.book_id,
                        title: b.title.clone(),
                        author_id: b.author_id,
                        price: b.price,
                        genre: b.genre.clone(),
                        rating: b.rating,
                    })
                    .collect(),
            },
            customers: CustomerList {
                items: snapshot
                    .customers
                    .iter()
                    .map(|c| XmlCustomer {
                        id: c.customer_id,
                        name: c.name.clone(),
                        email: c.email.clone(),
                        balance: c.balance,
                        purchased_books: BookIdList {
                            ids: c.purchased_book_ids.clone(),
                        },
                    })
                    .collect(),
            },
            orders: OrderList {
                items: snapshot
                    .orders
                    .iter()
                    .map(|o| XmlOrder {
                        id: o.order_id,
                        customer_id: o.customer_id,
                        order_date: o.order_date.clone(),
                        status: o.status.clone(),
                        total_price: o.total_price,
                        books: BookIdList {
                            ids: o.book_ids.clone(),
                        },
                    })
                    .collect(),
            },
        }
    }
}

impl From<XmlDocument> for CatalogSnapshot {
    fn from(document: XmlDocument) -> Self {
        CatalogSnapshot {
            next_ids: document.next_ids,
            authors: document
                .authors
                .items
                .into_iter()
                .map(|a| AuthorRecord {
                    author_id: a.id,
                    name: a.name,
                    country: a.country,
                    birthday: a.birthday,
                })
                .collect(),
            books: document
                .books
                .items
                .into_iter()
                .map(|b| BookRecord {
                    book_id: b.id,
                    title: b.title,
                    author_id: b.author_id,
                    price: b.price,
                    genre: b.genre,
                    rating: b.rating,
                })
                .collect(),
            customers: document
                .customers
                .items
                .into_iter()
                .map(|c| CustomerRecord {
                    customer_id: c.id,
                    name: c.name,
                    email: c.email,
                    balance: c.balance,
                    purchased_book_ids: c.purchased_books.ids,
                })
                .collect(),
            orders: document
                .orders
                .items
                .into_iter()
                .map(|o| OrderRecord {
                    order_id: o.id,
                    customer_id: o.customer_id,
                    book_ids: o.books.ids,
                    order_date: o.order_date,
                    status: o.status,
                    total_price: o.total_price,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<bookstore>
  <next_ids><book>3</book><author>2</author><customer>2</customer><order>2</order></next_ids>
  <authors>
    <author><id>1</id><name>Leo Tolstoy</name><country>Russia</country></author>
  </authors>
  <books>
    <book><id>1</id><title>War and Peace</title><author_id>1</author_id><price>500</price><genre>Novel</genre><rating>0</rating></book>
    <book><id>2</id><title>Anna Karenina</title><author_id>1</author_id><price>450.5</price><genre>Novel</genre><rating>4.5</rating></book>
  </books>
  <customers>
    <customer>
      <id>1</id><name>Ivan Ivanov</name><email>ivan@mail.ru</email><balance>50</balance>
      <purchased_books><book_id>1</book_id><book_id>2</book_id></purchased_books>
    </customer>
  </customers>
  <orders>
    <order>
      <id>1</id><customer_id>1</customer_id><order_date>2024/03/05 12:30</order_date>
      <status>Completed</status><total_price>950.5</total_price>
      <books><book_id>1</book_id><book_id>2</book_id></books>
    </order>
  </orders>
</bookstore>
"#;

    #[test]
    fn test_decode_sample_document() {
        let snapshot = XmlCodec.decode(SAMPLE).unwrap();

        assert_eq!(snapshot.next_ids.book, 3);
        assert_eq!(snapshot.authors.len(), 1);
        assert_eq!(snapshot.books[1].rating, 4.5);
        assert_eq!(snapshot.books[0].price.cents(), 50000);
        assert_eq!(snapshot.books[1].price.cents(), 45050);
        assert_eq!(snapshot.customers[0].balance.cents(), 5000);
        assert_eq!(snapshot.orders[0].total_price.cents(), 95050);
        assert_eq!(
            snapshot.customers[0].purchased_book_ids,
            vec![BookId::new(1), BookId::new(2)]
        );
        assert_eq!(snapshot.orders[0].book_ids.len(), 2);
        assert_eq!(snapshot.orders[0].status, OrderStatus::Completed);
        assert_eq!(snapshot.orders[0].order_date, "2024/03/05 12:30");
    }

    #[test]
    fn test_encode_shape() {
        let snapshot = XmlCodec.decode(SAMPLE).unwrap();
        let text = XmlCodec.encode(&snapshot).unwrap();

        assert!(text.starts_with(XML_DECLARATION));
        assert!(text.contains("<bookstore>"));
        assert!(text.contains("<purchased_books>"));
        assert!(text.contains("<book_id>2</book_id>"));
        assert!(!text.contains("<birthday>"));
        assert_eq!(XmlCodec.decode(&text).unwrap(), snapshot);
    }

    #[test]
    fn test_empty_catalog_round_trips() {
        let empty = CatalogSnapshot::default();
        let text = XmlCodec.encode(&empty).unwrap();
        assert_eq!(XmlCodec.decode(&text).unwrap(), empty);
    }

    #[test]
    fn test_text_is_escaped() {
        let mut snapshot = CatalogSnapshot::default();
        snapshot.authors.push(AuthorRecord {
            author_id: AuthorId::new(1),
            name: "Smith & <Sons>".to_string(),
            country: "UK".to_string(),
            birthday: Some("1900-01-01".to_string()),
        });
        snapshot.next_ids.author = 2;

        let text = XmlCodec.encode(&snapshot).unwrap();
        assert!(text.contains("Smith &amp; &lt;Sons"));
        assert_eq!(XmlCodec.decode(&text).unwrap(), snapshot);
    }

    #[test]
    fn test_decode_single_line_legacy_file() {
        let legacy = "<?xml version='1.0' encoding='utf-8'?>\n<bookstore><next_ids><book>2</book>\
            <author>2</author><customer>2</customer><order>1</order></next_ids>\
            <authors><author><id>1</id><name>Leo Tolstoy</name><country>Russia</country></author></authors>\
            <books><book><id>1</id><title>War and Peace</title><author_id>1</author_id>\
            <price>500.0</price><genre>Novel</genre><rating>0.0</rating></book></books>\
            <customers><customer><id>1</id><name>Ivan</name><email>ivan@mail.ru</email>\
            <balance>1000.0</balance><purchased_books /></customer></customers>\
            <orders /></bookstore>";

        let snapshot = XmlCodec.decode(legacy).unwrap();
        assert_eq!(snapshot.books[0].price.cents(), 50000);
        assert_eq!(snapshot.customers[0].balance.cents(), 100000);
        assert!(snapshot.customers[0].purchased_book_ids.is_empty());
        assert!(snapshot.orders.is_empty());
    }

    #[test]
    fn test_edge_whitespace_round_trips() {
        let mut snapshot = CatalogSnapshot::default();
        snapshot.authors.push(AuthorRecord {
            author_id: AuthorId::new(1),
            name: "  Leo  ".to_string(),
            country: "\tRussia\n".to_string(),
            birthday: None,
        });
        snapshot.next_ids.author = 2;

        let text = XmlCodec.encode(&snapshot).unwrap();
        let back = XmlCodec.decode(&text).unwrap();
        assert_eq!(back.authors[0].name, "  Leo  ");
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_char_ref_edges() {
        let text = char_ref_edges(BytesText::from_escaped(" a &amp; b\n")).unwrap();
        assert_eq!(&*text, b"&#32;a &amp; b&#10;");

        let untouched = char_ref_edges(BytesText::from_escaped("plain")).unwrap();
        assert_eq!(&*untouched, b"plain");
    }

    #[test]
    fn test_encode_refuses_non_finite_rating() {
        let mut snapshot = XmlCodec.decode(SAMPLE).unwrap();
        snapshot.books[0].rating = f64::INFINITY;
        assert!(XmlCodec.encode(&snapshot).is_err());
    }

    #[test]
    fn test_missing_next_ids_is_an_error() {
        let err = XmlCodec.decode("<bookstore><authors/></bookstore>").unwrap_err();
        assert!(err.is_corrupt_data());
    }
}
