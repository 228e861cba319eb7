// Compiles every regex the crate uses once at build time and emits them as a
// static set, so an invalid pattern fails the build instead of a run.
use regex::Regex;
use std::fmt::Write as _;
use std::path::Path;

const PATTERNS: &[(&str, &str)] = &[
    // report/aggregator.rs: `/en_US/shop` -> `/shop`
    (r#"^/[a-z]{2}_[A-Z]{2}/"#, "locale_prefix"),
    // parser/builder.rs: `IP - - [DATE TIME] "METHOD ENDPOINT PROTO" STATUS ...`
    (
        r#"^(?P<ip>\S+) \S+ \S+ \[[^\]]*\] "(?P<method>[A-Z]+) (?P<endpoint>\S+)[^"]*" (?P<status>\S+) "#,
        "werkzeug_access_full",
    ),
    // parser/builder.rs: `METHOD ENDPOINT HTTP/x STATUS ...`
    (
        r#"^"?(?P<method>[A-Z]+) (?P<endpoint>\S+) HTTP/[^"\s]*"? (?P<status>\S+) "#,
        "werkzeug_access_bare",
    ),
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let failures: Vec<String> = PATTERNS
        .iter()
        .filter_map(|(pattern, name)| {
            Regex::new(pattern)
                .err()
                .map(|e| format!("  - '{name}': {e} (pattern: {pattern})"))
        })
        .collect();
    if !failures.is_empty() {
        panic!("Invalid regex patterns:\n{}", failures.join("\n"));
    }

    let out_dir = std::env::var("OUT_DIR").unwrap_or_else(|e| panic!("OUT_DIR not set: {e}"));
    let dest = Path::new(&out_dir).join("validated_regexes.rs");
    if let Err(e) = std::fs::write(&dest, render()) {
        panic!("Failed to write {}: {e}", dest.display());
    }
}

fn render() -> String {
    let mut code = String::from("// Generated by build.rs\n");
    code.push_str("use crate::parser::regex_patterns::StaticRegexSet;\n\n");

    code.push_str("pub static VALIDATED_PATTERNS: StaticRegexSet = StaticRegexSet::new(&[\n");
    for (pattern, name) in PATTERNS {
        let _ = writeln!(code, "    (r#\"{pattern}\"#, \"{name}\"),");
    }
    code.push_str("]);\n\n");

    code.push_str("pub mod pattern_index {\n");
    for (index, (_, name)) in PATTERNS.iter().enumerate() {
        let _ = writeln!(code, "    pub const {}: usize = {index};", name.to_uppercase());
    }
    code.push_str("}\n");

    code
}
