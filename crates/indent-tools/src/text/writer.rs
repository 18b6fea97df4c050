//! Indentation applied while streaming to an [`io::Write`]

use std::io::{self, Write};

use crate::text::{Indent, Level, Scope, DEFAULT_INDENT};

/// Writes indented lines straight through to an underlying writer
///
/// Indentation is written when the first content reaches a line, so depth
/// changes take effect on the next line. Blank lines stay unindented, as in
/// [`IndentBuilder`](crate::IndentBuilder).
///
/// ```
/// use indent_tools::IndentWriter;
/// # fn main() -> std::io::Result<()> {
/// let mut out = IndentWriter::new(Vec::new());
/// out.println("int main() {")?;
/// {
///     let mut body = out.scope();
///     body.println("return 0;")?;
/// }
/// out.println("}")?;
///
/// assert_eq!(out.into_inner(), b"int main() {\n    return 0;\n}\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IndentWriter<W> {
    inner: W,
    level: Level,
    at_line_start: bool,
}

impl<W: Write> IndentWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_indent(inner, DEFAULT_INDENT)
    }

    pub fn with_indent(inner: W, indent: impl Into<String>) -> Self {
        Self {
            inner,
            level: Level::new(indent),
            at_line_start: true,
        }
    }

    pub const fn depth(&self) -> usize {
        self.level.depth
    }

    pub fn indent_unit(&self) -> &str {
        &self.level.unit
    }

    pub const fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Write text without ending the line
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.write_all(text.as_bytes())
    }

    /// Write text followed by a line break
    pub fn println(&mut self, text: &str) -> io::Result<()> {
        self.print(text)?;
        self.newline()
    }

    /// Write each line of `lines` on its own line
    pub fn print_lines<I>(&mut self, lines: I) -> io::Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            self.println(line.as_ref())?;
        }
        Ok(())
    }

    pub fn newline(&mut self) -> io::Result<()> {
        self.write_all(b"\n")
    }

    /// Increase depth until the returned guard is dropped
    pub fn scope(&mut self) -> Scope<'_, Self> {
        Scope::new(self)
    }

    pub fn indent(&mut self) {
        self.level.indent();
    }

    /// Decrease depth by one level
    ///
    /// # Panics
    ///
    /// Panics if the depth is already zero.
    pub fn unindent(&mut self) {
        self.level.unindent();
    }

    fn write_segment(&mut self, segment: &[u8]) -> io::Result<()> {
        if segment.is_empty() {
            return Ok(());
        }
        if self.at_line_start {
            for unit in self.level.prefix() {
                self.inner.write_all(unit.as_bytes())?;
            }
            self.at_line_start = false;
        }
        self.inner.write_all(segment)
    }
}

impl<W: Write> Write for IndentWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut segments = buf.split(|&b| b == b'\n');
        if let Some(first) = segments.next() {
            self.write_segment(first)?;
        }
        for segment in segments {
            self.inner.write_all(b"\n")?;
            self.at_line_start = true;
            self.write_segment(segment)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> Indent for IndentWriter<W> {
    fn indent(&mut self) {
        self.level.indent();
    }

    fn unindent(&mut self) {
        self.level.unindent();
    }
}
