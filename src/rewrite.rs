//! Expression rewriting passes.
//!
//! Every pass works the same way: the finalized prefix is moved into a
//! `done` buffer and the argument text stays in the working buffer, so a
//! rescan of the remainder catches nested calls of the same name without
//! ever revisiting finalized text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog;
use crate::registry::FunctionRegistry;
use crate::scan::{self, Unbalanced};

static POW: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\s*\*").expect("static pattern"));
static LOG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\blog\b\s*\(").expect("static pattern"));
static LN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bln\b\s*\(").expect("static pattern"));
static SMIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bsmin\b").expect("static pattern"));
static SMAX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bsmax\b").expect("static pattern"));
static ENERGY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[eE]\b").expect("static pattern"));

/// Operator and log-base normalization.
///
/// `**` becomes `^`; `log(` means base 10 in XSPEC, so it becomes `log10(`
/// and `ln(` becomes `log(` (in that order, or freshly renamed logs would be
/// renamed twice). The scalar `smin`/`smax` variants are renamed to their
/// final names as literal tokens; this must run before vector min/max
/// detection so the renamed calls get array-wrapped exactly once.
pub fn normalize_operators(expr: &str) -> String {
    let expr = POW.replace_all(expr, "^");
    let expr = LOG.replace_all(&expr, "log10(");
    let expr = LN.replace_all(&expr, "log(");
    let expr = SMIN.replace_all(&expr, "min");
    let expr = SMAX.replace_all(&expr, "max");
    expr.into_owned()
}

/// Rewrites binary-form `min`/`max` calls into the single-array-argument
/// form the output dialect expects: `min(a,b)` becomes `min([a,b])`.
///
/// Idempotent: a call whose argument text already begins with `[` is left
/// untouched, so re-running the pass on its own output changes nothing.
pub fn wrap_vector_minmax(expr: &str) -> Result<String, Unbalanced> {
    let mut buffer = expr.to_string();
    for name in ["min", "max"] {
        let mut done = String::new();
        while let Some(site) = scan::find_call(&buffer, name) {
            let close = scan::matching_close(&buffer, site.args_start)?;
            if buffer[site.args_start..].trim_start().starts_with('[') {
                // Already array-form; finalize the whole call as-is.
                done.push_str(&buffer[..close]);
                buffer.drain(..close);
                continue;
            }
            done.push_str(&buffer[..site.start]);
            done.push_str(name);
            done.push_str("([");
            // Argument text stays in the working buffer so nested calls of
            // the same name are rescanned.
            let rest = format!("{}]){}", &buffer[site.args_start..close - 1], &buffer[close..]);
            buffer = rest;
        }
        done.push_str(&buffer);
        buffer = done;
    }
    Ok(buffer)
}

/// Rewrites every call to a non-special function into the indirect
/// evaluation form `eval_fun2(&name,lo,hi, [args])`, handing the callee the
/// current bin edges. When the callee is a registered additive function a
/// leading `1, ` pins its own normalization to unity, since the outer
/// expression controls the overall scale.
///
/// Returns the rewritten buffer and the distinct wrapped call targets in
/// first-appearance order (the parameter extractor filters these out).
/// Wrapped calls use the `eval_fun2` keyword and `&name` is not followed by
/// `(`, so later passes never re-wrap an already-rewritten call.
pub fn wrap_subfunctions(
    expr: &str,
    registry: &FunctionRegistry,
) -> Result<(String, Vec<String>), Unbalanced> {
    let targets: Vec<String> = scan::call_names(expr)
        .into_iter()
        .filter(|n| {
            !catalog::SPECIAL_FUNCTIONS.contains(&n.as_str()) && n != catalog::EVAL_KEYWORD
        })
        .collect();

    let mut buffer = expr.to_string();
    for name in &targets {
        let mut done = String::new();
        while let Some(site) = scan::find_call(&buffer, name) {
            let close = scan::matching_close(&buffer, site.args_start)?;
            done.push_str(&buffer[..site.start]);
            done.push_str(catalog::EVAL_KEYWORD);
            done.push_str("(&");
            done.push_str(name);
            done.push_str(",lo,hi, [");
            if registry.is_additive(name) {
                done.push_str("1, ");
            }
            buffer = format!("{}]){}", &buffer[site.args_start..close - 1], &buffer[close..]);
        }
        done.push_str(&buffer);
        buffer = done;
    }
    Ok((buffer, targets))
}

/// Replaces every standalone energy symbol (`e` or `E`) with the bin-centre
/// formula. Identifiers that merely contain the letter, and exponent forms
/// like `2e3`, have no word boundary around it and are untouched. Runs after
/// both wrappers so energy references inside nested call arguments are
/// converted too.
pub fn substitute_energy(expr: &str) -> String {
    ENERGY.replace_all(expr, catalog::ENERGY_FORMULA).into_owned()
}
