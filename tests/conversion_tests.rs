// tests/conversion_tests.rs
//
// End-to-end conversions through the pipeline, exercising the whole rewrite
// chain the way a real .xcm file would.

use xcm2sl::engine::ConvertPipeline;
use xcm2sl::ConvertError;

// Runs a whole source buffer through one pipeline, returning the emitted
// text and the collected diagnostics.
fn convert(source: &str) -> (String, Vec<ConvertError>) {
    let mut pipeline = ConvertPipeline::new();
    let mut out = Vec::new();
    let diagnostics = pipeline
        .convert_source("input.xcm", source, "input.sl", &mut out)
        .expect("writing to a Vec cannot fail");
    (String::from_utf8(out).unwrap(), diagnostics)
}

#[test]
fn simple_additive_model_full_output() {
    let (out, diagnostics) = convert("mdefine mypow e*a\n");
    assert!(diagnostics.is_empty());

    let expected = "\
\n%%% Automatically translated by xcm2sl %%%\n\n\
define mypow_fit(lo,hi,par)
{
    variable norm, a;
    norm = par[0];
    a = par[1];

    return ( (6.19920995*(lo+hi)/lo/hi)*a )*norm;
};

add_slang_function(\"mypow\", [\"norm\",\"a\"]);

";
    assert_eq!(out, expected);
}

#[test]
fn realistic_file_converts_every_directive_in_order() {
    let source = "\
# models for obs 1234
mdefine bigbump e**(0-gam) + gauss_hump*exp(0-(e-centre)**2)

mdefine stack bigbump(gam, gauss_hump, centre) + powerlaw(gam2)
mdefine screen exp(0-tau*e) : mul
";
    let (out, diagnostics) = convert(source);
    assert!(diagnostics.is_empty());

    // Comment passthrough with the translated marker.
    assert!(out.contains("%# models for obs 1234\n"));

    // Definitions come out in input order.
    let bigbump = out.find("define bigbump_fit").unwrap();
    let stack = out.find("define stack_fit").unwrap();
    let screen = out.find("define screen_fit").unwrap();
    assert!(bigbump < stack && stack < screen);

    // Exponent operator was normalized and the energy symbol replaced.
    assert!(out.contains("(6.19920995*(lo+hi)/lo/hi)^(0-gam)"));

    // bigbump was registered by its own line, so the later reference is an
    // indirect call with the unit normalization; the intrinsic powerlaw too.
    assert!(out.contains("eval_fun2(&bigbump,lo,hi, [1, gam, gauss_hump, centre])"));
    assert!(out.contains("eval_fun2(&powerlaw,lo,hi, [1, gam2])"));

    // Multiplicative model: no norm anywhere.
    assert!(out.contains("add_slang_function(\"screen\", [\"tau\"]);"));
}

#[test]
fn minmax_combo_matches_expected_rewrite() {
    let (out, diagnostics) = convert("mdefine combo min(a, b)+c\n");
    assert!(diagnostics.is_empty());
    assert!(out.contains("    return ( min([a, b])+c )*norm;"));
    assert!(out.contains("add_slang_function(\"combo\", [\"norm\",\"a\",\"b\",\"c\"]);"));
}

#[test]
fn scalar_smin_is_renamed_then_wrapped_once() {
    let (out, diagnostics) = convert("mdefine edgecase smin(a,b)*c\n");
    assert!(diagnostics.is_empty());
    assert!(out.contains("min([a,b])*c"));
    assert!(!out.contains("smin"));
    assert!(!out.contains("[[")); // never double-wrapped
}

#[test]
fn log_bases_are_translated() {
    let (out, diagnostics) = convert("mdefine logs log(a) + ln(b) : mul\n");
    assert!(diagnostics.is_empty());
    assert!(out.contains("log10(a) + log(b)"));
}

#[test]
fn shared_argument_names_unify_into_one_parameter() {
    let (out, diagnostics) = convert("mdefine pair foo(kT) + bar(kT)\n");
    assert!(diagnostics.is_empty());
    // kT appears once in the parameter list, at first occurrence.
    assert!(out.contains("add_slang_function(\"pair\", [\"norm\",\"kT\"]);"));
}

#[test]
fn bad_lines_do_not_stop_the_run() {
    let source = "\
statistic chi
mdefine broken min(a, b
mdefine ok e*a
";
    let (out, diagnostics) = convert(source);
    assert_eq!(diagnostics.len(), 2);
    assert!(matches!(diagnostics[0], ConvertError::UnrecognizedLine { .. }));
    assert!(matches!(diagnostics[1], ConvertError::UnbalancedBrackets { .. }));
    assert!(!out.contains("define broken_fit"));
    assert!(out.contains("define ok_fit(lo,hi,par)"));
}

#[test]
fn registry_state_carries_across_the_whole_run() {
    let source = "\
mdefine first e*a
mdefine second first(a) + 1 : mul
mdefine third second(a)*first(b)
";
    let (out, diagnostics) = convert(source);
    assert!(diagnostics.is_empty());
    // first is additive (unit norm injected); second is not.
    assert!(out.contains("eval_fun2(&first,lo,hi, [1, a])"));
    assert!(out.contains("eval_fun2(&second,lo,hi, [a])"));
    assert!(out.contains("eval_fun2(&first,lo,hi, [1, b])"));
}

#[test]
fn long_definitions_are_wrapped_without_breaking_brackets() {
    let source = "mdefine wide alpha_one*beta_two + gamma_three*delta_four + epsilon_five*zeta_six + eta_seven\n";
    let (out, diagnostics) = convert(source);
    assert!(diagnostics.is_empty());
    // The return expression got split onto continuation lines.
    let ret: Vec<&str> = out
        .lines()
        .skip_while(|l| !l.trim_start().starts_with("return"))
        .take_while(|l| !l.starts_with("};"))
        .collect();
    assert!(ret.len() > 1, "expected a wrapped return, got {ret:?}");
    assert!(ret.join("\n").contains(" +\n"));
    // Every continuation line sits at the fixed indent; nothing was split
    // inside brackets.
    for line in &ret[1..] {
        assert!(line.starts_with("        "), "bad continuation: {line:?}");
    }
}
