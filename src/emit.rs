//! Emission of the S-Lang function definition and registration call.
//!
//! Output shape per model:
//!
//! ```text
//! define <name>_fit(lo,hi,par)
//! {
//!     variable <p0>, <p1>;
//!     <p0> = par[0];
//!     <p1> = par[1];
//!
//!     return <expr>;
//! };
//!
//! add_slang_function("<name>", ["<p0>","<p1>"]);
//! ```
//!
//! Line wrapping is best effort and purely cosmetic: expressions longer than
//! the wrap width are split at top-level `+`/`*` only (bracket depth zero
//! over both `()` and `[]`), so the wrapped text stays syntactically intact.

use std::fmt::Write as _;

use crate::catalog::{self, WRAP_WIDTH};

/// Renders one converted model definition as output text.
///
/// `expr` is the fully rewritten expression; for additive models it is
/// wrapped as `( expr )*norm` here, matching the implicit normalization
/// slot prepended to `params`.
pub fn render(name: &str, expr: &str, params: &[String], additive: bool) -> String {
    // Wrap before adding the norm factor, so the user's expression is still
    // at top level when split points are chosen.
    let expr = if additive {
        format!("( {} )*{}", wrap_expression(expr), catalog::NORM_PARAM)
    } else {
        wrap_expression(expr)
    };

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "define {name}_fit(lo,hi,par)");
    out.push_str("{\n");
    if !params.is_empty() {
        let _ = writeln!(out, "    {};", declare_variables(params));
    }
    for (i, par) in params.iter().enumerate() {
        let _ = writeln!(out, "    {par} = par[{i}];");
    }
    let _ = writeln!(out, "\n    return {expr};");
    out.push_str("};\n\n");
    let _ = writeln!(
        out,
        "add_slang_function(\"{name}\", {});\n",
        parameter_list(params)
    );
    out
}

fn declare_variables(params: &[String]) -> String {
    let flat = format!("variable {}", params.join(", "));
    if flat.len() <= WRAP_WIDTH {
        return flat;
    }
    format!("variable {}", params.join(", \n        "))
}

fn parameter_list(params: &[String]) -> String {
    if params.is_empty() {
        return "[]".to_string();
    }
    let flat = format!("[\"{}\"]", params.join("\",\""));
    if flat.len() <= WRAP_WIDTH {
        return flat;
    }
    format!("[\"{}\"]", params.join("\",\n        \""))
}

/// Splits a long expression at top-level `+`/`*` boundaries. Operators
/// inside brackets are never touched.
fn wrap_expression(expr: &str) -> String {
    if expr.len() <= WRAP_WIDTH {
        return expr.to_string();
    }
    let mut out = String::new();
    let mut depth = 0usize;
    for c in expr.chars() {
        match c {
            '(' | '[' => {
                depth += 1;
                out.push(c);
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                out.push(c);
            }
            '+' | '*' if depth == 0 => {
                out.push(' ');
                out.push(c);
                out.push_str("\n        ");
            }
            _ => out.push(c),
        }
    }
    out
}
