//! Emoji-framed screen headers.
//!
//! Telegram renders chat text proportionally, so "centering" is done on
//! a display-cell model: emoji and wide CJK count as two cells, plain
//! letters as one, combining marks as zero. Arabic titles are wrapped in
//! RLE/PDF embedding controls so the frame emoji stay on the visual
//! edges, and padded with no-break spaces Telegram will not collapse.

use shared::Lang;

pub const HEADER_EMOJI: char = '✨';
const TARGET_WIDTH: usize = 29;

const NBSP: &str = "\u{00A0}";
const RLE: char = '\u{202B}';
const PDF: char = '\u{202C}';
const RLM: char = '\u{200F}';

fn is_emoji(c: char) -> bool {
    matches!(c,
        '\u{1F300}'..='\u{1F5FF}'
        | '\u{1F600}'..='\u{1F64F}'
        | '\u{1F680}'..='\u{1F6FF}'
        | '\u{1F900}'..='\u{1F9FF}'
        | '\u{1FA70}'..='\u{1FAFF}'
        | '\u{2600}'..='\u{26FF}'
        | '\u{2700}'..='\u{27BF}'
        | '\u{FE0F}'
    )
}

fn is_combining(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}'
        | '\u{0610}'..='\u{061A}'
        | '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06DC}'
        | '\u{06DF}'..='\u{06E4}'
        | '\u{06E7}'..='\u{06E8}'
        | '\u{06EA}'..='\u{06ED}'
        | '\u{0E31}'
        | '\u{0E34}'..='\u{0E3A}'
        | '\u{0E47}'..='\u{0E4E}'
    )
}

fn is_wide(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{115F}'
        | '\u{2E80}'..='\u{303E}'
        | '\u{3041}'..='\u{33FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{A000}'..='\u{A4CF}'
        | '\u{AC00}'..='\u{D7A3}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FE30}'..='\u{FE4F}'
        | '\u{FF00}'..='\u{FF60}'
        | '\u{FFE0}'..='\u{FFE6}'
        | '\u{20000}'..='\u{2FFFD}'
        | '\u{30000}'..='\u{3FFFD}'
    )
}

fn is_directional(c: char) -> bool {
    matches!(c,
        '\u{200C}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}

/// Display-cell width of a string under the fixed-width model above.
pub fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| {
            if is_combining(c) || is_directional(c) {
                0
            } else if is_wide(c) || is_emoji(c) {
                2
            } else {
                1
            }
        })
        .sum()
}

/// Strips emoji (and the emoji variation selector) so padding is
/// computed against the textual part of a title only.
pub fn remove_emoji(text: &str) -> String {
    text.chars().filter(|c| !is_emoji(*c)).collect()
}

fn contains_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

fn header_line(title: &str, lang: Lang, emoji: char, underline: bool) -> String {
    let title_width = display_width(&remove_emoji(title));
    let mut title = title.to_string();
    if title_width < TARGET_WIDTH {
        let extra = TARGET_WIDTH - title_width;
        let left = extra / 2;
        title = format!("{}{}{}", " ".repeat(left), title, " ".repeat(extra - left));
    }

    let is_arabic = contains_arabic(&title);
    let visible = if is_arabic {
        let indent = if lang.is_arabic() { NBSP } else { "" };
        format!("{indent}{RLE}{emoji} {title} {emoji}{PDF}")
    } else {
        format!("{emoji} {title} {emoji}")
    };

    let needed = TARGET_WIDTH.saturating_sub(display_width(&visible));
    let pad_left = needed / 2;
    let pad_right = needed - pad_left;
    let mut line = format!(
        "{}<b>{}</b>{}",
        NBSP.repeat(pad_left),
        visible,
        NBSP.repeat(pad_right)
    );
    if underline {
        let rule = "━".repeat(TARGET_WIDTH);
        if is_arabic {
            line.push_str(&format!("\n{RLM}{rule}"));
        } else {
            line.push_str(&format!("\n{rule}"));
        }
    }
    line
}

/// Framed, centered, underlined header for a menu screen.
pub fn build_header(title: &str, lang: Lang) -> String {
    header_line(title, lang, HEADER_EMOJI, true)
}

/// Same header with a custom frame emoji, for the celebratory and
/// warning notices.
pub fn build_header_framed(title: &str, lang: Lang, emoji: char) -> String {
    header_line(title, lang, emoji, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_emoji_as_two_cells() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("✨"), 2);
        assert_eq!(display_width("📊 ok"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn width_skips_combining_and_directional_marks() {
        // "مرحبا" with a fatha on the first letter
        assert_eq!(display_width("مَرحبا"), 5);
        assert_eq!(display_width("\u{202B}hi\u{202C}"), 2);
    }

    #[test]
    fn remove_emoji_keeps_text() {
        assert_eq!(remove_emoji("📊 Stats ✨"), " Stats ");
        assert_eq!(remove_emoji("plain"), "plain");
    }

    #[test]
    fn custom_frame_emoji_replaces_the_default() {
        let header = build_header_framed("Done", Lang::En, '🎉');
        assert!(header.contains('🎉'));
        assert!(!header.contains(HEADER_EMOJI));
    }

    #[test]
    fn latin_header_is_framed_and_underlined() {
        let header = build_header("Admin Panel", Lang::En);
        let mut lines = header.lines();
        let first = lines.next().unwrap();
        let second = lines.next().unwrap();
        assert!(first.contains("<b>"));
        assert!(first.matches(HEADER_EMOJI).count() == 2);
        assert_eq!(second.chars().filter(|c| *c == '━').count(), 29);
        assert!(!first.contains('\u{202B}'));
    }

    #[test]
    fn arabic_header_carries_bidi_controls() {
        let header = build_header("لوحة التحكم", Lang::Ar);
        assert!(header.contains('\u{202B}'));
        assert!(header.contains('\u{202C}'));
        // underline line is protected by an RLM
        let second = header.lines().nth(1).unwrap();
        assert!(second.starts_with('\u{200F}'));
    }

    #[test]
    fn short_titles_are_padded_to_target_width() {
        let header = header_line("Hi", Lang::En, HEADER_EMOJI, false);
        let stripped = remove_emoji(&header)
            .replace("<b>", "")
            .replace("</b>", "");
        // frame emoji contribute 4 cells on top of the padded title
        assert!(display_width(&stripped) >= 29);
        assert!(!header.contains('━'));
    }
}
