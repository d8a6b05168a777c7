/// Formatter adapters for the delimited text report
mod delimited_record_writer;

pub use delimited_record_writer::{
    AsyncDelimitedRecordWriter, DelimitedRecordWriter, FieldValue, QuoteStyle, WriterSetting,
};
