//! Physical line splitting.
//!
//! A physical line ends at `\r\n`, `\n` or a bare `\r`. A terminator at the
//! very end of the input does not produce a trailing empty line, so
//! `"a\nb\n"` and `"a\nb"` both yield two lines.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Split in-memory text into physical lines.
pub fn split_lines(text: &str) -> SplitLines<'_> {
    SplitLines { rest: text }
}

/// Iterator returned by [`split_lines`].
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(end) = self.rest.find(['\r', '\n']) else {
            let line = self.rest;
            self.rest = "";
            return Some(line);
        };

        let line = &self.rest[..end];
        let terminator = if self.rest[end..].starts_with("\r\n") { 2 } else { 1 };
        self.rest = &self.rest[end + terminator..];
        Some(line)
    }
}

/// Physical lines read from a [`BufRead`], decoded as UTF-8.
///
/// Reads one `\n`-terminated chunk at a time and splits it further on bare
/// `\r`, so memory use is bounded by the longest chunk.
pub struct ReaderLines<R> {
    reader: R,
    queued: VecDeque<String>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            queued: VecDeque::new(),
            buf: Vec::new(),
            done: false,
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            self.done = true;
            return Ok(());
        }

        let mut chunk = self.buf.as_slice();
        if let Some(stripped) = chunk.strip_suffix(b"\n") {
            chunk = stripped;
        }
        if let Some(stripped) = chunk.strip_suffix(b"\r") {
            chunk = stripped;
        }

        for piece in chunk.split(|&b| b == b'\r') {
            let line = String::from_utf8(piece.to_vec())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            self.queued.push_back(line);
        }

        Ok(())
    }
}

impl<R: BufRead> Iterator for ReaderLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.queued.is_empty() {
            if self.done {
                return None;
            }
            if let Err(e) = self.fill() {
                self.done = true;
                return Some(Err(e));
            }
        }
        self.queued.pop_front().map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<&str> {
        split_lines(text).collect()
    }

    fn collect_reader(text: &str) -> Vec<String> {
        ReaderLines::new(text.as_bytes())
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(collect("a\r\nb"), vec!["a", "b"]);
        assert_eq!(collect("a\nb"), vec!["a", "b"]);
        assert_eq!(collect("a\rb"), vec!["a", "b"]);
        assert_eq!(collect("a\n\rb"), vec!["a", "", "b"]);
        assert_eq!(collect("a\r\rb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_trailing_terminator() {
        assert_eq!(collect("a\r\n"), vec!["a"]);
        assert_eq!(collect("a\r\n\r\n"), vec!["a", ""]);
        assert_eq!(collect("\n"), vec![""]);
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_reader_matches_split() {
        for text in [
            "a\r\nb",
            "a\nb\n",
            "a\rb\r",
            "a\n\rb",
            "a\r\r\nb",
            "\r\n",
            "NAME,AGE\r\n\"x\ny\",2\r\n",
            "",
        ] {
            let expected: Vec<String> = collect(text).into_iter().map(String::from).collect();
            assert_eq!(collect_reader(text), expected, "input {text:?}");
        }
    }

    #[test]
    fn test_reader_rejects_invalid_utf8() {
        let bytes: &[u8] = b"ok\n\xff\xfe\n";
        let mut lines = ReaderLines::new(bytes);
        assert_eq!(lines.next().unwrap().unwrap(), "ok");
        let err = lines.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(lines.next().is_none());
    }
}
