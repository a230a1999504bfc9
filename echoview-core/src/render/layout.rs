//! Text layout: glyph metrics and greedy word wrap.

use embedded_graphics::mono_font::MonoFont;

/// Fixed per-character metrics of a monospaced font.
///
/// Taken once from the selected font and assumed constant for every glyph —
/// a simplification that holds for the `embedded-graphics` mono fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Horizontal advance per character, in pixels.
    pub advance_width: u32,
    /// Vertical distance between the tops of consecutive sub-lines.
    pub line_height: u32,
}

impl GlyphMetrics {
    pub fn from_font(font: &MonoFont<'_>) -> Self {
        Self {
            advance_width: font.character_size.width + font.character_spacing,
            line_height: font.character_size.height,
        }
    }

    /// Characters that fit on one line of a `frame_width`-pixel frame.
    pub fn columns(&self, frame_width: u32) -> usize {
        (frame_width / self.advance_width) as usize
    }

    /// Full sub-lines that fit in a `frame_height`-pixel frame.
    pub fn rows(&self, frame_height: u32) -> usize {
        (frame_height / self.line_height) as usize
    }
}

/// Greedy word wrap: accumulate words onto the current line while they fit;
/// when the next word would overflow, start a new line.
///
/// A word is broken mid-word only when it alone exceeds `max_cols`.
/// Interior whitespace runs are preserved, each whitespace character
/// becoming one space; whitespace at line edges is dropped, so
/// whitespace-only input wraps to no lines at all.
pub fn wrap(text: &str, max_cols: usize) -> Vec<String> {
    if max_cols == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for (gap, word) in words_with_gaps(text) {
        let word_len = word.chars().count();

        if word_len > max_cols {
            // The only case where a mid-word break is allowed.
            flush(&mut current, &mut lines);
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_cols) {
                if chunk.len() == max_cols {
                    lines.push(chunk.iter().collect());
                } else {
                    // Short tail stays open so following words can join it.
                    current = chunk.iter().collect();
                }
            }
            continue;
        }

        if current.is_empty() {
            // Whitespace at a line edge is dropped.
            current = word;
        } else if current.chars().count() + gap + word_len <= max_cols {
            for _ in 0..gap {
                current.push(' ');
            }
            current.push_str(&word);
        } else {
            flush(&mut current, &mut lines);
            current = word;
        }
    }

    flush(&mut current, &mut lines);
    lines
}

/// Non-whitespace runs of `text`, each paired with the number of whitespace
/// characters separating it from the previous run.
fn words_with_gaps(text: &str) -> Vec<(usize, String)> {
    let mut items = Vec::new();
    let mut gap = 0usize;
    let mut word = String::new();

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !word.is_empty() {
                items.push((gap, std::mem::take(&mut word)));
                gap = 0;
            }
            gap += 1;
        } else {
            word.push(ch);
        }
    }
    if !word.is_empty() {
        items.push((gap, word));
    }
    items
}

fn flush(current: &mut String, lines: &mut Vec<String>) {
    if !current.is_empty() {
        lines.push(std::mem::take(current));
    }
}
