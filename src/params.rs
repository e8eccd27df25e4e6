//! Free-parameter extraction from the final rewritten expression.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("static pattern"));

/// Extracts the ordered, duplicate-free list of free parameter names.
///
/// Tokenizes the expression into maximal word-character runs and discards
/// numeric literals (digit-leading tokens), the energy symbol, anything
/// recognized as a function name (the special math set, the wrapped call
/// targets, the indirect-evaluation keyword), and the reserved bin-edge
/// formals `lo`/`hi`, which only appear because the rewrite passes inserted
/// them. Whatever survives is a parameter, listed at its first textual
/// occurrence.
///
/// For additive models `norm` is prepended unconditionally; a `norm` the
/// user wrote into the expression is folded into that first slot rather
/// than listed twice.
pub fn extract_parameters(expr: &str, call_targets: &[String], additive: bool) -> Vec<String> {
    let mut params: Vec<String> = Vec::new();
    for token in WORD.find_iter(expr) {
        let word = token.as_str();
        if word.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        if word == "e" || word == "E" {
            continue;
        }
        if catalog::SPECIAL_FUNCTIONS.contains(&word)
            || word == catalog::EVAL_KEYWORD
            || catalog::BIN_EDGE_PARAMS.contains(&word)
            || call_targets.iter().any(|t| t == word)
        {
            continue;
        }
        if !params.iter().any(|p| p == word) {
            params.push(word.to_string());
        }
    }

    if additive {
        params.retain(|p| p != catalog::NORM_PARAM);
        params.insert(0, catalog::NORM_PARAM.to_string());
    }
    params
}
