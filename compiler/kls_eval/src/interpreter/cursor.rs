//! Byte cursor over script text.
//!
//! Reading past the end yields `0`, so scanning loops terminate on the
//! sentinel without separate bounds checks. Every position the cursor stops
//! at is an ASCII byte or the end of input, so slices stay on character
//! boundaries.

use std::borrow::Cow;

use super::keyword::Keyword;

/// What a statement starts with.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Leading<'a> {
    /// No name at all: end of script, or a stray symbol.
    Empty,
    Keyword(Keyword),
    Unknown(&'a str),
}

#[derive(Clone, Debug)]
pub(crate) struct ScriptCursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> ScriptCursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        ScriptCursor { source, pos: 0 }
    }

    #[inline]
    pub(crate) fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.source.len());
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.source.len()
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Current byte, `0` at the end.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.source.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    #[inline]
    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or_default()
    }

    /// Skip whitespace and `#` comments. Returns the new position.
    pub(crate) fn skip_comments(&mut self) -> usize {
        loop {
            self.eat_while(|b| b.is_ascii_whitespace());
            if self.current() != b'#' {
                return self.pos;
            }
            let rest = &self.source.as_bytes()[self.pos..];
            self.pos += memchr::memchr(b'\n', rest).unwrap_or(rest.len());
        }
    }

    /// Read an identifier-like word. Trailing whitespace and comments are
    /// skipped unless the word is directly followed by `;` or `,`.
    pub(crate) fn read_name(&mut self) -> &'a str {
        let start = self.skip_comments();
        self.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_');
        let name = self.slice(start, self.pos);
        if !matches!(self.current(), b';' | b',') {
            self.skip_comments();
        }
        name
    }

    pub(crate) fn read_keyword(&mut self) -> Leading<'a> {
        match self.read_name() {
            "" => Leading::Empty,
            word => Keyword::lookup(word).map_or(Leading::Unknown(word), Leading::Keyword),
        }
    }

    /// Read one statement parameter: text up to `;`, `,` or the end.
    ///
    /// A `#` comment inside the parameter is cut out and the text after it
    /// continues the same parameter.
    pub(crate) fn read_param(&mut self) -> Cow<'a, str> {
        let start = self.skip_comments();
        let rest = &self.source.as_bytes()[start..];
        self.pos = start + memchr::memchr3(b';', b',', b'#', rest).unwrap_or(rest.len());
        let param = self.slice(start, self.pos);

        if self.current() == b'#' {
            let tail = self.read_param();
            return Cow::Owned(format!("{param}{tail}"));
        }

        self.eat_while(|b| b.is_ascii_whitespace());
        Cow::Borrowed(param)
    }

    /// Position of the next statement-ending `;` at or after `from`.
    /// A `;` inside a `#` comment does not count.
    pub(crate) fn next_terminator(&self, mut from: usize) -> Option<usize> {
        let bytes = self.source.as_bytes();
        loop {
            let rest = bytes.get(from..)?;
            let at = from + memchr::memchr2(b';', b'#', rest)?;
            if bytes[at] == b';' {
                return Some(at);
            }
            from = at + memchr::memchr(b'\n', &bytes[at..])?;
        }
    }

    #[inline]
    pub(crate) fn is_terminated(&self) -> bool {
        self.current() == b';'
    }

    /// Consume a `,` list separator if present.
    #[inline]
    pub(crate) fn next_separator(&mut self) -> bool {
        if self.current() == b',' {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}
