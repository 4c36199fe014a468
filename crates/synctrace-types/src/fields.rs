//! Derived-field extraction from entry message bodies.
//!
//! Each field is driven by an ordered table of label-prefixed patterns;
//! the first pattern that matches wins, absence is not an error. Keeping
//! the tables here (instead of ad hoc branching at the call sites) keeps
//! the derivation testable and easy to extend when the agent grows new
//! message variants.

use regex::Regex;
use std::sync::LazyLock;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("field extraction pattern must compile"))
        .collect()
}

/// Identifier-shaped values: stop at whitespace, comma or semicolon.
static POLICY_ID_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"PolicyID:\s*([^\s,;]+)",
        r"Policy measurement\. ID:\s*([^\s,;]+)",
        r"Policy ID:\s*([^\s,;]+)",
    ])
});

static BUNDLE_ID_RULES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"BundleID:\s*([^\s,;]+)", r"Bundle ID:\s*([^\s,;]+)"]));

/// Name-shaped values may contain spaces: capture to end of line or comma.
static APP_NAME_RULES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"AppName:\s*([^,\r\n]+)", r"App name:\s*([^,\r\n]+)"]));

static APP_TYPE_RULES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"AppType:\s*([^\s,;]+)", r"App type:\s*([^\s,;]+)"]));

static APP_INTENT_RULES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"App intent:\s*([^\s,;]+)", r"Intent:\s*([^\s,;]+)"]));

static SCRIPT_TYPE_RULES: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"ScriptType:\s*([^\s,;]+)", r"Script type:\s*([^\s,;]+)"]));

static EXECUTION_CONTEXT_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"ExecutionContext:\s*([^\s,;]+)",
        r"Execution context:\s*([^\s,;]+)",
    ])
});

static INSTALL_ERROR_CODE_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"ErrorCode:\s*(-?\d+)",
        r"Installation error code:\s*(-?\d+)",
    ])
});

fn first_match(rules: &[Regex], message: &str) -> Option<String> {
    rules
        .iter()
        .find_map(|re| re.captures(message))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn policy_id(message: &str) -> Option<String> {
    first_match(&POLICY_ID_RULES, message)
}

pub(crate) fn bundle_id(message: &str) -> Option<String> {
    first_match(&BUNDLE_ID_RULES, message)
}

pub(crate) fn app_name(message: &str) -> Option<String> {
    first_match(&APP_NAME_RULES, message)
}

pub(crate) fn app_type(message: &str) -> Option<String> {
    first_match(&APP_TYPE_RULES, message)
}

pub(crate) fn app_intent(message: &str) -> Option<String> {
    first_match(&APP_INTENT_RULES, message)
}

pub(crate) fn script_type(message: &str) -> Option<String> {
    first_match(&SCRIPT_TYPE_RULES, message)
}

pub(crate) fn execution_context(message: &str) -> Option<String> {
    first_match(&EXECUTION_CONTEXT_RULES, message)
}

pub(crate) fn install_error_code(message: &str) -> Option<i64> {
    first_match(&INSTALL_ERROR_CODE_RULES, message).and_then(|v| v.parse().ok())
}
