/// Splits `input` into normalized lines.
///
/// CRLF and lone CR end a line like LF does, tabs expand to `tab_width`
/// stops, vertical tab and form feed become spaces, and trailing whitespace
/// is dropped.  A final line terminator does not start another line.
pub fn split_lines(input: &str, tab_width: usize) -> Vec<Vec<char>> {
    let sb = input.as_bytes();
    let end = sb.len();
    let mut lines = vec![];

    let mut ix = 0;
    let matcher = jetscii::bytes!(b'\r', b'\n');

    while ix < end {
        let (eol, next) = match matcher.find(&sb[ix..]) {
            Some(offset) => {
                let eol = ix + offset;
                let mut next = eol + 1;
                if sb[eol] == b'\r' && next < end && sb[next] == b'\n' {
                    next += 1;
                }
                (eol, next)
            }
            None => (end, end),
        };

        lines.push(expand_line(&input[ix..eol], tab_width));
        ix = next;
    }

    if lines.is_empty() {
        lines.push(vec![]);
    }
    lines
}

fn expand_line(line: &str, tab_width: usize) -> Vec<char> {
    let width = tab_width.max(1);
    let mut out: Vec<char> = Vec::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\t' => {
                let pad = width - out.len() % width;
                out.extend(std::iter::repeat(' ').take(pad));
            }
            '\x0b' | '\x0c' => out.push(' '),
            c => out.push(c),
        }
    }
    rtrim(&mut out);
    out
}

pub fn rtrim(line: &mut Vec<char>) {
    let spaces = line.iter().rev().take_while(|c| c.is_whitespace()).count();
    let new_len = line.len() - spaces;
    line.truncate(new_len);
}

/// Number of leading spaces.
pub fn indentation(line: &[char]) -> usize {
    line.iter().take_while(|&&c| c == ' ').count()
}

pub fn rune_count(s: &str) -> usize {
    s.chars().count()
}

/// Normalizes a hyperlink target name for matching: surrounding whitespace is
/// trimmed, inner runs collapse to one space, and the result is case-folded.
pub fn normalize_name(name: &str) -> String {
    let mut v = String::with_capacity(name.len());
    let mut last_was_whitespace = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            if !last_was_whitespace {
                last_was_whitespace = true;
                v.push(' ');
            }
        } else {
            last_was_whitespace = false;
            v.push(c);
        }
    }
    caseless::default_case_fold_str(&v)
}

/// Removes the common indentation of `lines`, ignoring empty ones.
pub fn dedent(lines: &[(usize, String)]) -> Vec<String> {
    let min = lines
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(indent, _)| *indent)
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|(indent, text)| {
            if text.is_empty() {
                String::new()
            } else {
                let mut s = " ".repeat(indent - min);
                s.push_str(text);
                s
            }
        })
        .collect()
}
