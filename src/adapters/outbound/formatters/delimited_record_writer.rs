use crate::shared::error::LicenseReportError;
use crate::shared::Result;
use std::borrow::Cow;
use std::io::{self, Write};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Record separator shared by all presets (fixed for reproducible reports)
const CRLF: &str = "\r\n";

/// Separators and quote character of a delimited text format
///
/// Immutable once a writer holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSetting {
    field_separator: String,
    record_separator: String,
    quote: char,
}

impl WriterSetting {
    /// Custom setting
    ///
    /// # Errors
    /// Returns a validation error if either separator is empty or contains
    /// the quote character, since no record could then be read back.
    pub fn new(
        field_separator: impl Into<String>,
        record_separator: impl Into<String>,
        quote: char,
    ) -> Result<Self> {
        let field_separator = field_separator.into();
        let record_separator = record_separator.into();

        if field_separator.is_empty() || record_separator.is_empty() {
            return Err(LicenseReportError::Validation {
                message: "field and record separators must not be empty".to_string(),
            }
            .into());
        }
        if field_separator.contains(quote) || record_separator.contains(quote) {
            return Err(LicenseReportError::Validation {
                message: format!("separators must not contain the quote character '{}'", quote),
            }
            .into());
        }

        Ok(Self {
            field_separator,
            record_separator,
            quote,
        })
    }

    /// Comma-separated values
    pub fn csv() -> Self {
        Self::preset(",")
    }

    /// Tab-separated values
    pub fn tsv() -> Self {
        Self::preset("\t")
    }

    /// Space-separated values
    pub fn ssv() -> Self {
        Self::preset(" ")
    }

    fn preset(field_separator: &str) -> Self {
        Self {
            field_separator: field_separator.to_string(),
            record_separator: CRLF.to_string(),
            quote: '"',
        }
    }

    pub fn field_separator(&self) -> &str {
        &self.field_separator
    }

    pub fn record_separator(&self) -> &str {
        &self.record_separator
    }

    pub fn quote(&self) -> char {
        self.quote
    }

    /// Formats one record, including the trailing record separator
    pub fn format_record<I>(&self, fields: I, style: QuoteStyle) -> String
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        let mut record = String::new();
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                record.push_str(&self.field_separator);
            }
            record.push_str(&self.format_field(&field.to_field(), style));
        }
        record.push_str(&self.record_separator);
        record
    }

    /// Formats a single field, quoting and escaping it when required
    pub fn format_field<'a>(&self, text: &'a str, style: QuoteStyle) -> Cow<'a, str> {
        if style == QuoteStyle::Necessary && !self.needs_quote(text) {
            return Cow::Borrowed(text);
        }

        let mut quoted = String::with_capacity(text.len() + 2);
        quoted.push(self.quote);
        for c in text.chars() {
            if c == self.quote {
                quoted.push(self.quote);
            }
            quoted.push(c);
        }
        quoted.push(self.quote);
        Cow::Owned(quoted)
    }

    /// A field needs quoting when it holds a line break, the quote character,
    /// or the field separator, or when it starts or ends with a tab or space.
    ///
    /// The edge-whitespace rule goes beyond minimal CSV quoting; some TSV
    /// readers trim unquoted fields and would lose it.
    fn needs_quote(&self, text: &str) -> bool {
        text.contains(['\r', '\n'])
            || text.contains(self.quote)
            || text.contains(self.field_separator.as_str())
            || text.starts_with(['\t', ' '])
            || text.ends_with(['\t', ' '])
    }
}

impl Default for WriterSetting {
    fn default() -> Self {
        Self::csv()
    }
}

/// When fields are wrapped in quote characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Only fields that would otherwise be ambiguous
    #[default]
    Necessary,
    /// Every field
    Always,
}

/// Text conversion for record fields
///
/// `None` becomes the empty string.
pub trait FieldValue {
    fn to_field(&self) -> Cow<'_, str>;
}

impl FieldValue for str {
    fn to_field(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl FieldValue for String {
    fn to_field(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl FieldValue for Cow<'_, str> {
    fn to_field(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_ref())
    }
}

impl FieldValue for char {
    fn to_field(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn to_field(&self) -> Cow<'_, str> {
        (**self).to_field()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_field(&self) -> Cow<'_, str> {
        match self {
            Some(value) => value.to_field(),
            None => Cow::Borrowed(""),
        }
    }
}

macro_rules! display_field_value {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                fn to_field(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

display_field_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// Blocking delimited text writer
pub struct DelimitedRecordWriter<W: Write> {
    writer: W,
    setting: WriterSetting,
}

impl<W: Write> DelimitedRecordWriter<W> {
    pub fn new(writer: W, setting: WriterSetting) -> Self {
        Self { writer, setting }
    }

    pub fn setting(&self) -> &WriterSetting {
        &self.setting
    }

    /// Appends one record, quoting only where necessary
    pub fn write_record<I>(&mut self, fields: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        self.write_record_with_style(fields, QuoteStyle::Necessary)
    }

    pub fn write_record_with_style<I>(&mut self, fields: I, style: QuoteStyle) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        let record = self.setting.format_record(fields, style);
        self.writer.write_all(record.as_bytes())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Flushes and returns the underlying writer
    pub fn close(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Non-blocking delimited text writer
///
/// Every call takes `&mut self`, so records from one owner are written in
/// call order and never interleave.
pub struct AsyncDelimitedRecordWriter<W: AsyncWrite + Unpin> {
    writer: W,
    setting: WriterSetting,
}

impl<W: AsyncWrite + Unpin> AsyncDelimitedRecordWriter<W> {
    pub fn new(writer: W, setting: WriterSetting) -> Self {
        Self { writer, setting }
    }

    pub fn setting(&self) -> &WriterSetting {
        &self.setting
    }

    /// Appends one record, quoting only where necessary
    pub async fn write_record<I>(&mut self, fields: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        self.write_record_with_style(fields, QuoteStyle::Necessary)
            .await
    }

    pub async fn write_record_with_style<I>(
        &mut self,
        fields: I,
        style: QuoteStyle,
    ) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: FieldValue,
    {
        let record = self.setting.format_record(fields, style);
        self.writer.write_all(record.as_bytes()).await
    }

    pub async fn flush(&mut self) -> io::Result<()> {
        self.writer.flush().await
    }

    /// Flushes and shuts the underlying writer down
    pub async fn close(mut self) -> io::Result<W> {
        self.writer.flush().await?;
        self.writer.shutdown().await?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tsv_field(text: &str) -> String {
        WriterSetting::tsv()
            .format_field(text, QuoteStyle::Necessary)
            .into_owned()
    }

    #[test]
    fn test_plain_fields_are_verbatim() {
        assert_eq!(tsv_field("a"), "a");
        assert_eq!(tsv_field(""), "");
        assert_eq!(tsv_field("a b"), "a b");
    }

    #[test]
    fn test_edge_whitespace_is_quoted() {
        assert_eq!(tsv_field(" a"), "\" a\"");
        assert_eq!(tsv_field("a "), "\"a \"");
        assert_eq!(tsv_field("\ta"), "\"\ta\"");
        assert_eq!(tsv_field("a\t"), "\"a\t\"");
    }

    #[test]
    fn test_quote_character_is_doubled() {
        assert_eq!(tsv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_line_breaks_are_quoted() {
        assert_eq!(tsv_field("line1\nline2"), "\"line1\nline2\"");
        assert_eq!(tsv_field("line1\r"), "\"line1\r\"");
    }

    #[test]
    fn test_field_separator_depends_on_setting() {
        let csv = WriterSetting::csv();
        assert_eq!(csv.format_field("a,b", QuoteStyle::Necessary), "\"a,b\"");
        assert_eq!(csv.format_field("a\tb", QuoteStyle::Necessary), "a\tb");

        let ssv = WriterSetting::ssv();
        assert_eq!(ssv.format_field("a b", QuoteStyle::Necessary), "\"a b\"");
    }

    #[test]
    fn test_quote_always() {
        let setting = WriterSetting::tsv();
        assert_eq!(setting.format_field("a", QuoteStyle::Always), "\"a\"");
        assert_eq!(setting.format_field("", QuoteStyle::Always), "\"\"");
    }

    #[test]
    fn test_format_record_joins_and_terminates() {
        let setting = WriterSetting::tsv();
        let record = setting.format_record(["Id", "Version", ""], QuoteStyle::Necessary);
        assert_eq!(record, "Id\tVersion\t\r\n");
    }

    #[test]
    fn test_format_record_accepts_mixed_optional_values() {
        let setting = WriterSetting::csv();
        let fields: Vec<Option<&str>> = vec![Some("x"), None, Some("y")];
        assert_eq!(
            setting.format_record(fields, QuoteStyle::Necessary),
            "x,,y\r\n"
        );
        assert_eq!(
            setting.format_record([1u32, 22, 333], QuoteStyle::Necessary),
            "1,22,333\r\n"
        );
    }

    #[test]
    fn test_empty_record_is_just_separator() {
        let setting = WriterSetting::tsv();
        let fields: Vec<String> = Vec::new();
        assert_eq!(setting.format_record(fields, QuoteStyle::Necessary), "\r\n");
    }

    #[test]
    fn test_custom_setting_validation() {
        assert!(WriterSetting::new("|", "\n", '\'').is_ok());
        assert!(WriterSetting::new("", "\n", '"').is_err());
        assert!(WriterSetting::new(",", "", '"').is_err());
        assert!(WriterSetting::new("\"", "\n", '"').is_err());
    }

    #[test]
    fn test_custom_quote_character() {
        let setting = WriterSetting::new("|", "\n", '\'').unwrap();
        assert_eq!(
            setting.format_record(["it's", "a|b", "plain"], QuoteStyle::Necessary),
            "'it''s'|'a|b'|plain\n"
        );
    }

    #[test]
    fn test_sync_writer_writes_records() {
        let mut writer = DelimitedRecordWriter::new(Vec::new(), WriterSetting::tsv());
        writer.write_record(["a", " b"]).unwrap();
        writer
            .write_record_with_style(["c"], QuoteStyle::Always)
            .unwrap();
        writer.flush().unwrap();
        let bytes = writer.close().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "a\t\" b\"\r\n\"c\"\r\n");
    }

    #[tokio::test]
    async fn test_async_writer_matches_sync_formatting() {
        let fields = ["Newtonsoft.Json", "13.0.1", "James \"JK\" Newton-King", " padded"];

        let mut sync_writer = DelimitedRecordWriter::new(Vec::new(), WriterSetting::tsv());
        sync_writer.write_record(fields).unwrap();
        let sync_bytes = sync_writer.close().unwrap();

        let mut async_writer = AsyncDelimitedRecordWriter::new(Vec::new(), WriterSetting::tsv());
        async_writer.write_record(fields).await.unwrap();
        let async_bytes = async_writer.close().await.unwrap();

        assert_eq!(sync_bytes, async_bytes);
    }

    #[tokio::test]
    async fn test_async_writer_preserves_call_order() {
        let mut writer = AsyncDelimitedRecordWriter::new(Vec::new(), WriterSetting::csv());
        for i in 0..5u32 {
            writer.write_record([i]).await.unwrap();
        }
        let bytes = writer.close().await.unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "0\r\n1\r\n2\r\n3\r\n4\r\n");
    }

    #[test]
    fn test_round_trip_through_csv_reader() {
        let values = [
            "tab\tinside",
            "quote \" inside",
            "multi\r\nline",
            " leading",
            "trailing\t",
            "",
            "plain",
        ];

        let mut writer = DelimitedRecordWriter::new(Vec::new(), WriterSetting::tsv());
        writer.write_record(values).unwrap();
        let bytes = writer.close().unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quote(b'"')
            .has_headers(false)
            .from_reader(bytes.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        let parsed: Vec<&str> = record.iter().collect();
        assert_eq!(parsed, values);
    }
}
