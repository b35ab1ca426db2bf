//! Script minifier.
//!
//! Removes `#` comments and every whitespace run that the interpreter would
//! skip anyway. A run is kept as a single space only where dropping it would
//! glue two tokens together: between two word characters (`set x`, `1 .5`)
//! or between two operator characters (`> -1`).

/// Minify `script`. The result evaluates exactly like the input.
pub fn minify(script: &str) -> String {
    let mut out = String::with_capacity(script.len());
    let mut gap = false;
    let mut chars = script.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '#' {
            while chars.next_if(|&next| next != '\n').is_some() {}
            gap = true;
            continue;
        }
        if c.is_whitespace() {
            gap = true;
            continue;
        }
        if gap {
            if out.chars().next_back().is_some_and(|prev| needs_space(prev, c)) {
                out.push(' ');
            }
            gap = false;
        }
        out.push(c);
    }

    out
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn is_operator(c: char) -> bool {
    !(is_word(c) || c.is_whitespace() || matches!(c, ';' | ',' | '(' | ')'))
}

fn needs_space(prev: char, next: char) -> bool {
    (is_word(prev) && is_word(next)) || (is_operator(prev) && is_operator(next))
}
