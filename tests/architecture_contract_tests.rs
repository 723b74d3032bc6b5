//! Architecture contract tests.

mod support;

use support::architecture::find_lines_containing;

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::app",
            "crate::cli",
            "tokio::",
            "reqwest::",
            "dialoguer::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_lines_containing(
        "src/port",
        &["use crate::adapter", "use crate::app", "use crate::cli", "reqwest::"],
    );

    assert!(hits.is_empty(), "ports reach outward: {hits:#?}");
}

#[test]
fn app_layer_does_not_touch_adapters() {
    let hits = find_lines_containing("src/app", &["crate::adapter", "crate::cli"]);

    assert!(hits.is_empty(), "app layer imports adapters: {hits:#?}");
}

#[test]
fn only_the_console_adapter_prompts() {
    let hits = find_lines_containing("src", &["dialoguer::"])
        .into_iter()
        .filter(|(path, _, _)| !path.starts_with("src/adapter/console/") && path != "src/error.rs")
        .collect::<Vec<_>>();

    assert!(hits.is_empty(), "interactive prompts outside console adapter: {hits:#?}");
}
