//! Indentation-aware text builder
//!
//! [`IndentBuilder`] collects lines of output while tracking an indentation
//! depth, so code generators can indent along with the structure they emit:
//!
//! ```
//! use indent_tools::IndentBuilder;
//!
//! let mut sb = IndentBuilder::new();
//! sb.append("int main() {");
//! {
//!     let mut body = sb.scope();
//!     body.append("int x = 0;");
//!     body.append("return x;");
//! }
//! sb.append("}");
//!
//! assert_eq!(sb.to_string(), "int main() {\n    int x = 0;\n    return x;\n}");
//! ```
//!
//! [`IndentWriter`] applies the same indentation to anything implementing
//! [`std::io::Write`], for output that should not be buffered in memory.

use std::fmt;
use std::iter;
use std::ops::{Deref, DerefMut};

use tracing::trace;

mod writer;
pub use writer::IndentWriter;

/// Indentation used when none is configured
pub const DEFAULT_INDENT: &str = "    ";

/// Output that tracks an indentation depth
///
/// Implemented by [`IndentBuilder`] and [`IndentWriter`]; [`Scope`] works
/// with either.
pub trait Indent {
    fn indent(&mut self);

    /// # Panics
    ///
    /// Implementations panic when the depth is already zero.
    fn unindent(&mut self);
}

/// Indentation unit and current depth
#[derive(Clone, Debug, PartialEq, Eq)]
struct Level {
    unit: String,
    depth: usize,
}

impl Level {
    fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
        trace!(depth = self.depth, "indent");
    }

    fn unindent(&mut self) {
        assert!(self.depth > 0, "unindent called at depth zero");
        self.depth -= 1;
        trace!(depth = self.depth, "unindent");
    }

    /// One unit per level
    fn prefix(&self) -> impl Iterator<Item = &str> {
        iter::repeat(self.unit.as_str()).take(self.depth)
    }
}

/// Accumulates indented lines of text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndentBuilder {
    level: Level,
    lines: Vec<String>,
    line_open: bool,
}

impl Default for IndentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentBuilder {
    pub fn new() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    /// Create a builder that prefixes one `indent` per depth level
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            level: Level::new(indent),
            lines: Vec::new(),
            line_open: false,
        }
    }

    pub const fn depth(&self) -> usize {
        self.level.depth
    }

    pub fn indent_unit(&self) -> &str {
        &self.level.unit
    }

    /// Lines emitted so far, indentation included
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append text as complete lines
    ///
    /// Every `\n`-separated segment becomes its own line at the current
    /// depth. Empty segments become blank lines without indentation. A line
    /// left open by [`IndentBuilder::write`] is finished by the first segment.
    pub fn append(&mut self, text: &str) {
        self.write(text);
        self.line_open = false;
    }

    /// Write text without ending the current line
    ///
    /// Each `\n` starts a new line; indentation is applied when the first
    /// content reaches a line.
    pub fn write(&mut self, text: &str) {
        let mut segments = text.split('\n');
        if let Some(first) = segments.next() {
            if self.line_open {
                self.continue_line(first);
            } else {
                self.start_line(first);
            }
        }
        for segment in segments {
            self.start_line(segment);
        }
        self.line_open = true;
    }

    /// End the open line, or emit a blank line when none is open
    pub fn newline(&mut self) {
        self.append("");
    }

    /// Increase depth until the returned guard is dropped
    ///
    /// The guard dereferences to the builder, so output written through it
    /// lands one level deeper.
    pub fn scope(&mut self) -> Scope<'_> {
        Scope::new(self)
    }

    pub fn indent(&mut self) {
        self.level.indent();
    }

    /// Decrease depth by one level
    ///
    /// # Panics
    ///
    /// Panics if the depth is already zero; unbalanced unindents are a bug in
    /// the calling generator.
    pub fn unindent(&mut self) {
        self.level.unindent();
    }

    fn start_line(&mut self, segment: &str) {
        let mut line = String::new();
        self.push_content(&mut line, segment);
        self.lines.push(line);
    }

    fn continue_line(&mut self, segment: &str) {
        match self.lines.pop() {
            Some(mut line) => {
                self.push_content(&mut line, segment);
                self.lines.push(line);
            }
            None => self.start_line(segment),
        }
    }

    fn push_content(&self, line: &mut String, segment: &str) {
        if segment.is_empty() {
            return;
        }
        if line.is_empty() {
            line.extend(self.level.prefix());
        }
        line.push_str(segment);
    }
}

impl fmt::Display for IndentBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.lines.iter();
        if let Some(first) = lines.next() {
            f.write_str(first)?;
        }
        for line in lines {
            f.write_str("\n")?;
            f.write_str(line)?;
        }
        Ok(())
    }
}

impl fmt::Write for IndentBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}

impl Indent for IndentBuilder {
    fn indent(&mut self) {
        self.level.indent();
    }

    fn unindent(&mut self) {
        self.level.unindent();
    }
}

/// Guard that indents its target once and unindents it on drop
///
/// Returned by [`IndentBuilder::scope`] and [`IndentWriter::scope`]. The guard
/// dereferences to its target.
#[derive(Debug)]
pub struct Scope<'a, T: Indent = IndentBuilder> {
    target: &'a mut T,
}

impl<'a, T: Indent> Scope<'a, T> {
    pub fn new(target: &'a mut T) -> Self {
        target.indent();
        Self { target }
    }
}

impl<T: Indent> Deref for Scope<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.target
    }
}

impl<T: Indent> DerefMut for Scope<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.target
    }
}

impl<T: Indent> Drop for Scope<'_, T> {
    fn drop(&mut self) {
        self.target.unindent();
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write as _;

    use super::*;

    #[test]
    fn test_scope_nesting() {
        let mut sb = IndentBuilder::new();
        sb.append("A");
        {
            let mut inner = sb.scope();
            inner.append("B");
            assert_eq!(inner.depth(), 1);
        }
        sb.append("C");

        assert_eq!(sb.depth(), 0);
        assert_eq!(sb.lines(), ["A", "    B", "C"]);
    }

    #[test]
    fn test_append_splits_lines() {
        let mut sb = IndentBuilder::with_indent("\t");
        sb.indent();
        sb.append("X\nY\nZ");
        assert_eq!(sb.lines(), ["\tX", "\tY", "\tZ"]);
    }

    #[test]
    fn test_blank_segments_are_not_indented() {
        let mut sb = IndentBuilder::new();
        let mut scope = sb.scope();
        scope.append("a\n\nb");
        drop(scope);
        assert_eq!(sb.to_string(), "    a\n\n    b");
    }

    #[test]
    fn test_write_continues_open_line() {
        let mut sb = IndentBuilder::new();
        sb.write("int main() {");
        {
            let mut body = sb.scope();
            body.write("\nint x = 0;\nreturn x;\n");
        }
        sb.append("}");
        assert_eq!(sb.to_string(), "int main() {\n    int x = 0;\n    return x;\n}");
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        let mut sb = IndentBuilder::new();
        sb.write("done\n");
        assert_eq!(sb.to_string(), "done\n");
    }

    #[test]
    fn test_newline() {
        let mut sb = IndentBuilder::new();
        sb.append("a");
        sb.newline();
        sb.write("b");
        sb.newline();
        sb.append("c");
        assert_eq!(sb.lines(), ["a", "", "b", "c"]);
    }

    #[test]
    fn test_fmt_write() -> fmt::Result {
        let mut sb = IndentBuilder::new();
        sb.indent();
        writeln!(sb, "let x = {};", 42)?;
        write!(sb, "x")?;
        assert_eq!(sb.to_string(), "    let x = 42;\n    x");
        Ok(())
    }

    #[test]
    fn test_scope_restores_depth_on_unwind() {
        let mut sb = IndentBuilder::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut scope = sb.scope();
            scope.append("inside");
            std::panic::resume_unwind(Box::new("generator failed"));
        }));
        assert!(result.is_err());
        assert_eq!(sb.depth(), 0);
    }

    #[test]
    #[should_panic(expected = "depth zero")]
    fn test_unindent_below_zero_panics() {
        let mut sb = IndentBuilder::new();
        sb.unindent();
    }
}
