//! Built-in end-to-end self-test, run with `ccheck --test`.
//!
//! Each scenario feeds a small translation unit through the full
//! pipeline twice, once checking and once fixing, and compares the
//! reported diagnostics and the repaired output against the expected
//! results. On top of the per-scenario expectations the suite asserts the
//! engine-wide properties: fixing is idempotent, fixing a clean input is
//! a no-op, and fixed output still parses.

use ccheck_util::Handler;

struct Scenario {
    name: &'static str,
    input: &'static str,
    /// Expected diagnostics, without the file prefix.
    diags: &'static [&'static str],
    /// Expected content after fixing.
    fixed: &'static str,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "trailing-whitespace",
        input: "int x = 1;  \n",
        diags: &["1:12: Whitespace at end of line"],
        fixed: "int x = 1;\n",
    },
    Scenario {
        name: "wrong-indentation",
        input: "int f(void)\n{\n  return 0;\n}\n",
        diags: &[
            "3:3: Wrong indentation: found 0 tabs, should be 1 tabs",
            "3:3: Non-continuation line should not have any spaces for indentation (found 2)",
        ],
        fixed: "int f(void)\n{\n\treturn 0;\n}\n",
    },
    Scenario {
        name: "space-before-brace",
        input: "if (x){\n\treturn;\n}\n",
        diags: &["1:7: Expected single space before block opening brace."],
        fixed: "if (x) {\n\treturn;\n}\n",
    },
    Scenario {
        name: "space-after-lparen",
        input: "f( x);\n",
        diags: &["1:3: Unexpected whitespace after '('."],
        fixed: "f(x);\n",
    },
    Scenario {
        name: "braceless-else",
        input: "if (x)\n\ty();\nelse\n\tz();\n",
        diags: &[],
        fixed: "if (x)\n\ty();\nelse\n\tz();\n",
    },
    Scenario {
        name: "case-dedent",
        input: "switch (x) {\n\tcase 1:\n\t\tbreak;\n}\n",
        diags: &[],
        fixed: "switch (x) {\n\tcase 1:\n\t\tbreak;\n}\n",
    },
    Scenario {
        name: "operator-spacing",
        input: "int x = 1+2;\n",
        diags: &[
            "1:10: Expected space before binary operator.",
            "1:10: Expected space after binary operator.",
        ],
        fixed: "int x = 1 + 2;\n",
    },
    Scenario {
        name: "clean-function",
        input: "int main(void)\n{\n\treturn 0;\n}\n",
        diags: &[],
        fixed: "int main(void)\n{\n\treturn 0;\n}\n",
    },
];

/// Checks a source, returning rendered diagnostics.
fn run_check(source: &str) -> Result<Vec<String>, String> {
    let mut stream = ccheck_lex::tokenize(source);
    let module = ccheck_par::parse_module(&stream).map_err(|e| e.to_string())?;
    let handler = Handler::new();
    ccheck_style::check(&mut stream, &module, &handler, false);
    Ok(handler
        .sorted_diagnostics()
        .iter()
        .map(|d| format!("{}", d))
        .collect())
}

/// Fixes a source, returning the rewritten content.
fn run_fix(source: &str) -> Result<String, String> {
    let mut stream = ccheck_lex::tokenize(source);
    let module = ccheck_par::parse_module(&stream).map_err(|e| e.to_string())?;
    let handler = Handler::new();
    ccheck_style::check(&mut stream, &module, &handler, true);
    Ok(stream.write())
}

fn run_scenario(scenario: &Scenario) -> Result<(), String> {
    // Lexer round-trip.
    let stream = ccheck_lex::tokenize(scenario.input);
    if stream.write() != scenario.input {
        return Err("lexer round-trip failed".to_string());
    }

    // Check reports the expected diagnostics.
    let diags = run_check(scenario.input)?;
    if diags != scenario.diags {
        return Err(format!(
            "diagnostics mismatch: expected {:?}, got {:?}",
            scenario.diags, diags
        ));
    }

    // Fix produces the expected output.
    let fixed = run_fix(scenario.input)?;
    if fixed != scenario.fixed {
        return Err(format!(
            "fix mismatch: expected {:?}, got {:?}",
            scenario.fixed, fixed
        ));
    }

    // Fixing is idempotent.
    let refixed = run_fix(&fixed)?;
    if refixed != fixed {
        return Err(format!(
            "fix not idempotent: {:?} became {:?}",
            fixed, refixed
        ));
    }

    // Fixed output is clean.
    let clean = run_check(&fixed)?;
    if !clean.is_empty() {
        return Err(format!("fixed output still reports {:?}", clean));
    }

    Ok(())
}

/// Runs the whole suite, printing one line per scenario. Returns true if
/// every scenario passed.
pub fn run() -> bool {
    let mut passed = true;
    for scenario in SCENARIOS {
        match run_scenario(scenario) {
            Ok(()) => println!("selftest {}: ok", scenario.name),
            Err(msg) => {
                println!("selftest {}: FAILED: {}", scenario.name, msg);
                passed = false;
            }
        }
    }
    passed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scenarios_pass() {
        for scenario in SCENARIOS {
            if let Err(msg) = run_scenario(scenario) {
                panic!("scenario {} failed: {}", scenario.name, msg);
            }
        }
    }

    #[test]
    fn test_run_reports_success() {
        assert!(run());
    }
}
