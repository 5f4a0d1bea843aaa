//! Request bodies for the S3 RestXml protocol
//!
//! Documents are written with the S3 namespace and an XML declaration, text is
//! escaped by the writer so object keys can be embedded as they are.

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use std::io::{self, Write};

/// The S3 XML namespace.
pub const S3_NAMESPACE: &str = "http://s3.amazonaws.com/doc/2006-03-01/";

/// Types that can be written as the children of an XML element.
pub trait WriteXml {
    /// # Errors
    ///
    /// Will return `Err` if writing to the underlying writer fails
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()>;
}

/// Serialize `value` inside `root_element`
///
/// # Errors
///
/// Will return `Err` if the document can not be written
pub fn to_xml<T: WriteXml>(root_element: &str, value: &T) -> Result<String> {
    let mut writer = Writer::new(Vec::with_capacity(512));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element(root_element)
        .with_attribute(("xmlns", S3_NAMESPACE))
        .write_inner_content(|w| value.write_xml(w))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Write `<tag>text</tag>`
///
/// # Errors
///
/// Will return `Err` if writing to the underlying writer fails
pub fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> io::Result<()> {
    writer
        .create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

/// Write `<tag>text</tag>` only if the value is `Some`
///
/// # Errors
///
/// Will return `Err` if writing to the underlying writer fails
pub fn write_optional_text<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<&str>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, v)?;
    }
    Ok(())
}

/// # Errors
///
/// Will return `Err` if writing to the underlying writer fails
pub fn write_optional_u32<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: Option<u32>,
) -> io::Result<()> {
    if let Some(v) = value {
        write_text_element(writer, tag, &v.to_string())?;
    }
    Ok(())
}

/// # Errors
///
/// Will return `Err` if writing to the underlying writer fails
pub fn write_bool<W: Write>(writer: &mut Writer<W>, tag: &str, value: bool) -> io::Result<()> {
    write_text_element(writer, tag, if value { "true" } else { "false" })
}
