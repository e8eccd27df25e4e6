//! The conversion pipeline: line classification, directive parsing, and the
//! per-line transpilation drive.
//!
//! Control flow per directive: split into name / raw expression / model
//! type, register additive names, normalize operators, rewrite vector
//! min/max, wrap subfunction calls against the registry, substitute the
//! energy symbol, extract parameters, emit. Recoverable errors abort only
//! the directive that raised them; the rest of the file proceeds.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use miette::SourceSpan;

use crate::catalog;
use crate::emit;
use crate::errors::{to_error_source, ConvertError, ErrorContext};
use crate::params;
use crate::registry::FunctionRegistry;
use crate::rewrite;
use crate::scan::Unbalanced;

/// Classification of how a fit function combines with others. Additive
/// models get an implicit `norm` parameter and scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    Additive,
    Multiplicative,
    Convolution,
}

impl ModelType {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "add" => Some(Self::Additive),
            "mul" => Some(Self::Multiplicative),
            "con" => Some(Self::Convolution),
            _ => None,
        }
    }
}

/// One parsed `mdefine` directive. Created per input line and consumed by
/// the end of that line's processing.
#[derive(Debug)]
pub struct ModelDefinition {
    pub name: String,
    pub expression: String,
    pub model_type: ModelType,
}

enum DirectiveIssue {
    Malformed(&'static str),
    UnknownType(String),
}

/// Parses `mdefine <name> <expr...> [: <type>]`. The expression is the text
/// between the name and the first `:`; the type is the text after the last
/// `:` (absent or empty means additive). Returns the definition plus the
/// byte column of the expression within `line`, used to anchor diagnostics.
fn parse_directive(line: &str) -> Result<(ModelDefinition, usize), DirectiveIssue> {
    let base = line.len() - line.trim_start().len();
    let trimmed = line.trim_start();

    let (body, type_text) = match trimmed.find(':') {
        Some(first) => {
            let after_last = trimmed[trimmed.rfind(':').expect("find succeeded") + 1..].trim();
            let tail = if after_last.is_empty() { None } else { Some(after_last) };
            (&trimmed[..first], tail)
        }
        None => (trimmed, None),
    };

    let model_type = match type_text {
        None => ModelType::Additive,
        Some(t) => {
            ModelType::parse(t).ok_or_else(|| DirectiveIssue::UnknownType(t.to_string()))?
        }
    };

    // The caller classified this line, so the first token is `mdefine`.
    let rest = body.strip_prefix("mdefine").unwrap_or(body);
    let name_field = rest.trim_start();
    if name_field.is_empty() {
        return Err(DirectiveIssue::Malformed("missing model name"));
    }
    let name_end = name_field
        .find(char::is_whitespace)
        .unwrap_or(name_field.len());
    let name = &name_field[..name_end];

    let expr_field = name_field[name_end..].trim_start();
    let expression = expr_field.trim_end();
    if expression.is_empty() {
        return Err(DirectiveIssue::Malformed("missing model expression"));
    }
    // expr_field is a true suffix of body, so its column falls out of the
    // lengths.
    let expr_col = base + (body.len() - expr_field.len());

    Ok((
        ModelDefinition {
            name: name.to_string(),
            expression: expression.to_string(),
            model_type,
        },
        expr_col,
    ))
}

/// Runs one model definition through the full rewrite chain and renders it.
fn transpile(def: &ModelDefinition, registry: &FunctionRegistry) -> Result<String, Unbalanced> {
    let additive = def.model_type == ModelType::Additive;
    let expr = rewrite::normalize_operators(&def.expression);
    let expr = rewrite::wrap_vector_minmax(&expr)?;
    let (expr, targets) = rewrite::wrap_subfunctions(&expr, registry)?;
    let expr = rewrite::substitute_energy(&expr);
    let parameters = params::extract_parameters(&expr, &targets, additive);
    Ok(emit::render(&def.name, &expr, &parameters, additive))
}

/// Drives one conversion run. Owns the function registry, which is mutated
/// in strict line order and read-only during each line's wrapping pass.
pub struct ConvertPipeline {
    registry: FunctionRegistry,
}

impl Default for ConvertPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertPipeline {
    pub fn new() -> Self {
        Self {
            registry: FunctionRegistry::with_intrinsics(),
        }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Converts `source` (named `source_name` in diagnostics), writing the
    /// translated output to `out` (named `output_name` in I/O errors).
    ///
    /// Returns the recoverable diagnostics collected along the way; only
    /// I/O failures are returned as `Err` and abort the run.
    pub fn convert_source(
        &mut self,
        source_name: &str,
        source: &str,
        output_name: &str,
        out: &mut dyn Write,
    ) -> Result<Vec<ConvertError>, ConvertError> {
        let src = to_error_source(source_name, source);
        let mut diagnostics = Vec::new();

        write_out(out, output_name, catalog::OUTPUT_HEADER.as_bytes())?;

        let mut offset = 0usize;
        for line in source.lines() {
            let line_span = SourceSpan::from(offset..offset + line.len().max(1));

            match line.split_whitespace().next() {
                None => {}
                Some(first) if first.starts_with('#') => {
                    write_out(out, output_name, format!("%{line}\n").as_bytes())?;
                }
                Some("mdefine") => match parse_directive(line) {
                    Ok((def, expr_col)) => {
                        let additive = def.model_type == ModelType::Additive;
                        // Register before wrapping, so self-references and
                        // later lines see the new additive function.
                        let mut duplicate = None;
                        if additive && !self.registry.register(&def.name) {
                            duplicate = Some(ConvertError::DuplicateRegistration {
                                message: format!(
                                    "'{}' is already a known additive function",
                                    def.name
                                ),
                                ctx: ErrorContext::with_source_and_span(
                                    Arc::clone(&src),
                                    line_span,
                                )
                                .help("both definitions are emitted; the last one loaded wins"),
                            });
                        }
                        match transpile(&def, &self.registry) {
                            Ok(text) => {
                                write_out(out, output_name, text.as_bytes())?;
                                diagnostics.extend(duplicate);
                            }
                            Err(unbalanced) => {
                                // The rewrite offset drifts as the buffer is
                                // spliced; clamp it to the line for an
                                // approximate column.
                                let col = (expr_col + unbalanced.offset)
                                    .min(line.len().saturating_sub(1));
                                diagnostics.push(ConvertError::UnbalancedBrackets {
                                    message: format!(
                                        "in model '{}' (near column {})",
                                        def.name,
                                        col + 1
                                    ),
                                    ctx: ErrorContext::with_source_and_span(
                                        Arc::clone(&src),
                                        SourceSpan::from(offset + col..offset + col + 1),
                                    )
                                    .help("this definition was skipped; check its parentheses"),
                                });
                            }
                        }
                    }
                    Err(DirectiveIssue::Malformed(what)) => {
                        diagnostics.push(ConvertError::UnrecognizedLine {
                            message: format!("{what} in mdefine directive"),
                            ctx: ErrorContext::with_source_and_span(Arc::clone(&src), line_span)
                                .help("expected: mdefine <name> <expr...> [: add|mul|con]"),
                        });
                    }
                    Err(DirectiveIssue::UnknownType(given)) => {
                        diagnostics.push(ConvertError::UnknownModelType {
                            message: format!("'{given}' (expected add, mul, or con)"),
                            ctx: ErrorContext::with_source_and_span(Arc::clone(&src), line_span)
                                .help("this definition was skipped"),
                        });
                    }
                },
                Some(_) => {
                    diagnostics.push(ConvertError::UnrecognizedLine {
                        message: format!("failed to parse line: \"{}\"", line.trim()),
                        ctx: ErrorContext::with_source_and_span(Arc::clone(&src), line_span)
                            .help("only mdefine directives, comments, and blank lines are understood"),
                    });
                }
            }

            offset += line.len() + 1;
        }

        Ok(diagnostics)
    }

    /// Converts `input` into `output` on disk. The output file is acquired
    /// once and flushed before returning; I/O failures are fatal.
    pub fn convert_file(
        &mut self,
        input: &Path,
        output: &Path,
    ) -> Result<Vec<ConvertError>, ConvertError> {
        let source = fs::read_to_string(input).map_err(|e| ConvertError::Io {
            path: input.display().to_string(),
            source: e,
        })?;
        let file = fs::File::create(output).map_err(|e| ConvertError::Io {
            path: output.display().to_string(),
            source: e,
        })?;
        let mut out = std::io::BufWriter::new(file);

        let diagnostics = self.convert_source(
            &input.display().to_string(),
            &source,
            &output.display().to_string(),
            &mut out,
        )?;

        out.flush().map_err(|e| ConvertError::Io {
            path: output.display().to_string(),
            source: e,
        })?;
        Ok(diagnostics)
    }
}

fn write_out(out: &mut dyn Write, output_name: &str, bytes: &[u8]) -> Result<(), ConvertError> {
    out.write_all(bytes).map_err(|e| ConvertError::Io {
        path: output_name.to_string(),
        source: e,
    })
}
