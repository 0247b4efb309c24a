//! Plain-text results file.

use std::fmt::Display;
use std::io::Write;

use crate::FormatError;

/// Writes one line per signal message.
///
/// An empty iterator leaves the writer untouched, so a pass without signals
/// produces an empty results file.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_results<I, W>(messages: I, mut writer: W) -> Result<usize, FormatError>
where
    I: IntoIterator,
    I::Item: Display,
    W: Write,
{
    let mut count = 0;
    for message in messages {
        writeln!(writer, "{message}")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_one_line_per_message() {
        let mut output = Cursor::new(Vec::new());
        let count = write_results(["first", "second"], &mut output).unwrap();
        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(output.into_inner()).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_no_messages() {
        let mut output = Cursor::new(Vec::new());
        let count = write_results(Vec::<String>::new(), &mut output).unwrap();
        assert_eq!(count, 0);
        assert!(output.into_inner().is_empty());
    }
}
