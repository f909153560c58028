//! JSON output formatting for echoed values.
//!
//! Output uses `", "` and `": "` separators and escapes everything outside
//! printable ASCII, so `{"test":"data"}` comes back as `{"test": "data"}`.

use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// `serde_json` formatter with spaced separators and ASCII-only output.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoFormatter;

impl Formatter for EchoFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        // Quotes, backslashes and control characters never reach here.
        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch <= '~' {
                continue;
            }
            writer.write_all(&bytes[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&bytes[start..])
    }
}

/// Serialize a value with [`EchoFormatter`].
pub fn to_vec<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut output = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut output, EchoFormatter);
    value.serialize(&mut serializer)?;
    Ok(output)
}
