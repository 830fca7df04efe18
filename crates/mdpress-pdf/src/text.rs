//! Text sanitization and word wrapping
//!
//! The builtin PDF faces encode WinAnsi only, so text is mapped into that
//! repertoire before it is measured or drawn. Wrapping is width-estimate
//! based: the layout never reflows, so the estimate only has to be
//! deterministic, not typographically exact.

/// Map text into the WinAnsi repertoire, replacing unmappable characters
///
/// Newlines survive (they delimit physical lines for the wrapper); tabs
/// become spaces.
pub fn sanitize(text: &str) -> String {
    text.chars().map(winansi_char).collect()
}

fn winansi_char(c: char) -> char {
    match c {
        ' '..='~' | '\n' => c,
        '\u{A0}'..='\u{FF}' => c,
        // The WinAnsi 0x80-0x9F block
        '•' | '–' | '—' | '‘' | '’' | '‚' | '“' | '”' | '„' | '…' | '€' | '™' | '†' | '‡'
        | '‰' | '‹' | '›' | 'ƒ' | 'ˆ' | '˜' | 'Œ' | 'œ' | 'Š' | 'š' | 'Ž' | 'ž' | 'Ÿ' => c,
        '\t' => ' ',
        _ => '?',
    }
}

/// Word-wrap `text` to at most `max_chars` characters per line
///
/// Embedded newlines are hard line boundaries. Words longer than the
/// limit are broken mid-word rather than overflowing.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        if raw_line.trim().is_empty() {
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0usize;

        for word in raw_line.split_whitespace() {
            let word_len = word.chars().count();
            let needed = if current_len == 0 {
                word_len
            } else {
                current_len + 1 + word_len
            };

            if needed <= max_chars {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(word);
                current_len += word_len;
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
            }

            if word_len <= max_chars {
                current.push_str(word);
                current_len = word_len;
            } else {
                // Hard-break an overlong word
                let mut chunk = String::new();
                for (i, c) in word.chars().enumerate() {
                    if i > 0 && i % max_chars == 0 {
                        lines.push(std::mem::take(&mut chunk));
                    }
                    chunk.push(c);
                }
                current_len = chunk.chars().count();
                current = chunk;
            }
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}
