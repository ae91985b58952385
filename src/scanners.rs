//! Character classes shared by the lexer's line classifiers and inline-markup
//! recognizer.

use unicode_categories::UnicodeCategories;

const fn ascii_set(chars: &[u8]) -> [bool; 128] {
    let mut a = [false; 128];
    let mut i = 0;
    while i < chars.len() {
        a[chars[i] as usize] = true;
        i += 1;
    }
    a
}

static ADORNMENT: [bool; 128] = ascii_set(b"=-~\"'#*^+:.,;!?_$%&(){}[]<>|/\\");
static START_PREFIX: [bool; 128] = ascii_set(b"-:/'\"<([{");
static END_SUFFIX: [bool; 128] = ascii_set(b"-.,:;!?\\/'\")]}>");

#[inline]
fn in_set(set: &[bool; 128], c: char) -> bool {
    (c as u32) < 128 && set[c as usize]
}

#[inline]
pub fn is_adornment_char(c: char) -> bool {
    in_set(&ADORNMENT, c)
}

/// Whether `line` is one adornment rune repeated.  Leading whitespace must
/// already be skipped.
pub fn is_adornment_line(line: &[char]) -> bool {
    match line.first() {
        Some(&c) if is_adornment_char(c) => line.iter().all(|&r| r == c),
        _ => false,
    }
}

#[inline]
pub fn is_bullet_char(c: char) -> bool {
    matches!(c, '*' | '+' | '-' | '•' | '‣' | '⁃')
}

#[inline]
pub fn is_role_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}

/// The rune that closes `c` when `c` opens a bracket or quotation.
pub fn closing_pair(c: char) -> Option<char> {
    let closer = match c {
        '\'' => '\'',
        '"' => '"',
        '<' => '>',
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '«' => '»',
        '»' => '«',
        '‹' => '›',
        '›' => '‹',
        '“' => '”',
        '”' => '”',
        '‘' => '’',
        '’' => '’',
        '„' => '“',
        '‚' => '‘',
        c if c.is_punctuation_open() => {
            return char::from_u32(c as u32 + 1).filter(|p| p.is_punctuation_close());
        }
        _ => return None,
    };
    Some(closer)
}

/// Whether a start-string may sit between `prev` and `next`.  `prev` is
/// `None` at the start of the scanned region, `next` is `None` at the end of
/// the line.
pub fn markup_start_ok(prev: Option<char>, next: Option<char>) -> bool {
    let next = match next {
        Some(n) if !n.is_whitespace() => n,
        _ => return false,
    };
    let prev = match prev {
        None => return true,
        Some('\\') => return false,
        Some(p) => p,
    };

    let opener = in_set(&START_PREFIX, prev)
        || prev.is_whitespace()
        || prev.is_punctuation_dash()
        || prev.is_punctuation_other()
        || prev.is_punctuation_initial_quote()
        || prev.is_punctuation_final_quote()
        || prev.is_punctuation_open()
        || prev.is_separator_space()
        || prev.is_separator_line();

    opener && closing_pair(prev) != Some(next)
}

/// Whether an end-string may sit between `prev` and `next`.
pub fn markup_end_ok(prev: Option<char>, next: Option<char>) -> bool {
    match prev {
        Some(p) if !p.is_whitespace() => {}
        _ => return false,
    }
    match next {
        None => true,
        Some(n) => {
            n.is_whitespace()
                || in_set(&END_SUFFIX, n)
                || n.is_punctuation_dash()
                || n.is_punctuation_other()
                || n.is_punctuation_initial_quote()
                || n.is_punctuation_final_quote()
                || n.is_punctuation_close()
                || n.is_punctuation_open()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adornments() {
        assert!(is_adornment_line(&"=====".chars().collect::<Vec<_>>()));
        assert!(is_adornment_line(&['\\', '\\']));
        assert!(!is_adornment_line(&"==-==".chars().collect::<Vec<_>>()));
        assert!(!is_adornment_line(&"@@@@".chars().collect::<Vec<_>>()));
        assert!(!is_adornment_line(&"````".chars().collect::<Vec<_>>()));
        assert!(!is_adornment_line(&[]));
    }

    #[test]
    fn start_strings() {
        assert!(markup_start_ok(None, Some('a')));
        assert!(markup_start_ok(Some(' '), Some('a')));
        assert!(markup_start_ok(Some('-'), Some('a')));
        assert!(markup_start_ok(Some('\u{2014}'), Some('a')));
        assert!(markup_start_ok(Some('\u{00a0}'), Some('a')));
        assert!(markup_start_ok(Some('\u{2028}'), Some('a')));
        assert!(markup_start_ok(Some('\u{300c}'), Some('a')));

        assert!(!markup_start_ok(Some('a'), Some('b')));
        assert!(!markup_start_ok(Some('\\'), Some('b')));
        assert!(!markup_start_ok(None, Some(' ')));
        assert!(!markup_start_ok(None, None));
    }

    #[test]
    fn start_strings_between_pairs() {
        assert!(!markup_start_ok(Some('('), Some(')')));
        assert!(!markup_start_ok(Some('"'), Some('"')));
        assert!(!markup_start_ok(Some('«'), Some('»')));
        assert!(!markup_start_ok(Some('\u{300c}'), Some('\u{300d}')));
        assert!(markup_start_ok(Some('('), Some(']')));
    }

    #[test]
    fn end_strings() {
        assert!(markup_end_ok(Some('a'), None));
        assert!(markup_end_ok(Some('a'), Some(' ')));
        assert!(markup_end_ok(Some('a'), Some('.')));
        assert!(markup_end_ok(Some('a'), Some('\u{2019}')));
        assert!(markup_end_ok(Some('a'), Some('\u{300d}')));

        assert!(!markup_end_ok(Some(' '), None));
        assert!(!markup_end_ok(None, None));
        assert!(!markup_end_ok(Some('a'), Some('b')));
    }
}
