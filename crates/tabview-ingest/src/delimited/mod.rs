//! Delimited text reading.

mod decode;
mod delimiter;
mod reader;

pub use decode::decode_text;
pub use delimiter::{DELIMITER_CANDIDATES, detect_delimiter};
pub use reader::read_delimited;
