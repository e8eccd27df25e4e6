//! Bracket matching and call-site scanning over raw expression text.
//!
//! These are the two leaf operations every rewrite pass is built on. Both
//! operate on byte offsets into the working buffer; brackets are ASCII, so
//! splicing at the returned offsets is always char-boundary safe.

use once_cell::sync::Lazy;
use regex::Regex;

/// Bracket scanning ran off the end of the text before depth returned to
/// zero. `offset` is where the scan started, which upstream turns into an
/// approximate column for the diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unbalanced {
    pub offset: usize,
}

/// A call site found by [`find_call`]: `start` is the first byte of the
/// function name, `args_start` is the byte just past the opening `(`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub start: usize,
    pub args_start: usize,
}

/// Given `from` pointing just past an opening parenthesis (depth 1 implied),
/// returns the index just past the matching `)`.
pub fn matching_close(text: &str, from: usize) -> Result<usize, Unbalanced> {
    let mut depth = 1usize;
    for (i, c) in text[from..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(from + i + 1);
                }
            }
            _ => {}
        }
    }
    Err(Unbalanced { offset: from })
}

/// Finds the first occurrence of `name` used as a function call: a
/// standalone word (boundary discipline on both ends) followed, after only
/// whitespace, by `(`. Occurrences inside longer identifiers never match.
pub fn find_call(text: &str, name: &str) -> Option<CallSite> {
    let pattern = Regex::new(&format!(r"\b{}\b\s*\(", regex::escape(name)))
        .expect("escaped identifier is a valid pattern");
    pattern.find(text).map(|m| CallSite {
        start: m.start(),
        args_start: m.end(),
    })
}

static CALL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z_]\w*)\s*\(").expect("static pattern"));

/// All distinct identifiers used as calls in `text`, in first-appearance
/// order.
pub fn call_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in CALL_NAME.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
