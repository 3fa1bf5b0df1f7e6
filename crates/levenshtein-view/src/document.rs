use ropey::LineType;
use ropey::Rope;

/// Line-oriented view of a text used to place line-level deltas into
/// character space.
pub trait LineSource {
    /// Character offset of the first character of `line`.
    ///
    /// `line == line_count` is the position just past the last line and
    /// resolves to [`LineSource::total_len`].
    fn offset_for_line(&self, line: usize) -> Option<usize>;

    /// Text of `line`, including its line terminator when it has one.
    fn line_text(&self, line: usize) -> Option<String>;

    /// Number of characters in the whole text.
    fn total_len(&self) -> usize;

    fn line_end_offset(&self, line: usize) -> Option<usize> {
        let start = self.offset_for_line(line)?;
        let text = self.line_text(line)?;
        Some(start + text.chars().count())
    }
}

#[derive(Clone, Debug)]
pub struct Document {
    rope: Rope,
}

impl Document {
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    pub fn line_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }

        let mut count = self.rope.len_lines(LineType::LF);
        if count == 0 {
            return 0;
        }

        if self.rope.byte(self.rope.len() - 1) == b'\n' {
            count = count.saturating_sub(1);
        }

        count
    }

    /// Line content without its terminator.
    pub fn line(&self, index: usize) -> Option<String> {
        let text = self.line_text(index)?;
        Some(trim_line_ending(&text).to_string())
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .filter_map(|index| self.line(index))
            .collect()
    }

    /// Lines including their terminators; concatenated they reproduce the text.
    pub fn raw_lines(&self) -> Vec<String> {
        (0..self.line_count())
            .filter_map(|index| self.line_text(index))
            .collect()
    }

    pub fn chars(&self) -> Vec<char> {
        self.text().chars().collect()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl LineSource for Document {
    fn offset_for_line(&self, line: usize) -> Option<usize> {
        let count = self.line_count();
        if line == count {
            return Some(self.total_len());
        }
        if line > count {
            return None;
        }
        let byte = self.rope.line_to_byte_idx(line, LineType::LF);
        Some(self.rope.byte_to_char_idx(byte))
    }

    fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.line_count() {
            return None;
        }
        Some(self.rope.line(line, LineType::LF).to_string())
    }

    fn total_len(&self) -> usize {
        self.rope.len_chars()
    }
}

fn trim_line_ending(line: &str) -> &str {
    if let Some(stripped) = line.strip_suffix("\r\n") {
        return stripped;
    }
    let without_lf = line.strip_suffix('\n').unwrap_or(line);
    without_lf.strip_suffix('\r').unwrap_or(without_lf)
}
