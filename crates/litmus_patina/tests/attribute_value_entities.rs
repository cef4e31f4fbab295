//! End-to-end behaviour of `lit/attribute-value-entities` on whole scripts.

use litmus_patina::{format_results, lint, Linter, Locale, OutputFormat, Severity};

fn lint_js(source: &str) -> litmus_patina::LintResult {
    lint(source, "scenario.js")
}

#[test]
fn unencoded_greater_than_is_reported_at_the_attribute() {
    let source = r#"html`<div title="a > b"></div>`"#;
    let result = lint_js(source);

    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.rule_name, "lit/attribute-value-entities");
    assert_eq!(diag.message_id, Some("unencoded"));
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(
        &source[diag.start.offset as usize..diag.end.offset as usize],
        r#"title="a > b""#
    );
}

#[test]
fn named_reference_is_accepted() {
    assert!(!lint_js(r#"html`<div title="a &gt; b"></div>`"#).has_diagnostics());
}

#[test]
fn numeric_reference_is_accepted() {
    assert!(!lint_js(r#"html`<div title="copyright &#169;"></div>`"#).has_diagnostics());
}

#[test]
fn bare_ampersand_is_reported() {
    assert_eq!(lint_js(r#"html`<div title="bad & value"></div>`"#).error_count, 1);
}

#[test]
fn non_markup_tag_is_ignored() {
    assert!(!lint_js(r#"other`<div title="a > b"></div>`"#).has_diagnostics());
}

#[test]
fn fully_dynamic_value_is_ignored() {
    let source = r#"html`<div title=${a > b ? x : y} class="${cls}"></div>`"#;
    let result = lint_js(source);
    assert!(!result.has_diagnostics());
    assert_eq!(result.template_count, 1);
}

#[test]
fn valid_references_do_not_hide_a_bare_ampersand() {
    let result = lint_js(r#"html`<div title="&amp; &#169; & &lt;"></div>`"#);
    assert_eq!(result.error_count, 1);
}

#[test]
fn each_special_character_is_one_diagnostic() {
    for value in ["<", ">", "&quot; \" ", "<<>>"] {
        let source = format!(r#"html`<p data-x='{value}'></p>`"#);
        assert_eq!(lint_js(&source).error_count, 1, "value {value:?}");
    }
}

#[test]
fn linting_twice_gives_the_same_diagnostics() {
    let source = r#"
const a = html`<a href="/x?a=1&b=2" title="ok"></a>`;
const b = html`<ul>${items.map((i) => html`<li data-v="${i} > 0">${i}</li>`)}</ul>`;
"#;
    let linter = Linter::new();
    let first = linter.lint_source(source, "twice.js");
    let second = linter.lint_source(source, "twice.js");

    let summarize = |r: &litmus_patina::LintResult| {
        r.diagnostics
            .iter()
            .map(|d| (d.start.offset, d.end.offset, d.message.to_string()))
            .collect::<Vec<_>>()
    };
    assert_eq!(first.diagnostics.len(), 2);
    assert_eq!(summarize(&first), summarize(&second));
}

#[test]
fn locations_point_into_multiline_templates() {
    let source = "const view = html`\n  <section>\n    <img alt=\"1 < 2\" src=\"${src}\">\n  </section>\n`;\n";
    let result = lint_js(source);

    assert_eq!(result.diagnostics.len(), 1);
    let diag = &result.diagnostics[0];
    assert_eq!((diag.start.line, diag.start.column), (3, 10));
    assert_eq!((diag.end.line, diag.end.column), (3, 21));
}

#[test]
fn element_order_is_parents_first() {
    let source = r#"html`<main title="<"><p title=">"></p></main><aside title="&"></aside>`"#;
    let result = lint_js(source);
    let columns: Vec<u32> = result.diagnostics.iter().map(|d| d.start.column).collect();
    assert_eq!(columns.len(), 3);
    assert!(columns.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn unparseable_markup_is_skipped_silently() {
    let source = r#"html`<div title="a > b"`; html`<!-- open`;"#;
    let result = lint_js(source);
    assert!(!result.has_diagnostics());
    assert_eq!(result.template_count, 0);
}

#[test]
fn stray_end_tag_does_not_hide_later_attributes() {
    let source = r#"html`${cond ? html`<div>` : ''}<p title="a>b"></p></div>`;"#;
    let result = lint_js(source);
    assert_eq!(result.template_count, 2);
    assert_eq!(result.error_count, 1);
    let span = &result.diagnostics[0];
    assert_eq!(
        &source[span.start.offset as usize..span.end.offset as usize],
        r#"title="a>b""#
    );
}

#[test]
fn broken_script_yields_no_diagnostics() {
    let result = lint_js("}}} html`<a title=\">\"></a>` {{{");
    assert!(!result.has_diagnostics());
    assert_eq!(result.filename, "scenario.js");
}

#[test]
fn disable_next_line_comment_suppresses() {
    let source = r#"
// litmus-disable-next-line lit/attribute-value-entities
html`<a title="a > b"></a>`;
html`<a title="a > b"></a>`;
"#;
    let result = lint_js(source);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.diagnostics[0].start.line, 4);
}

#[test]
fn disable_file_comment_suppresses_everything() {
    let source = "/* litmus-disable */\nhtml`<a title=\"a > b\"></a>`;\n";
    assert!(!lint_js(source).has_diagnostics());
}

#[test]
fn message_follows_the_locale() {
    let source = r#"html`<a title="a > b"></a>`"#;
    let english = Linter::new().lint_source(source, "a.js");
    let japanese = Linter::new()
        .with_locale(Locale::Ja)
        .lint_source(source, "a.js");
    assert_eq!(english.diagnostics.len(), japanese.diagnostics.len());
    assert_ne!(english.diagnostics[0].message, japanese.diagnostics[0].message);
}

#[test]
fn json_output() {
    let source = r#"html`<div title="a > b"></div>`"#;
    let result = lint_js(source);
    let sources = [("scenario.js".to_string(), source.to_string())];
    let json = format_results(&[result], &sources, OutputFormat::Json, false);

    insta::assert_snapshot!(json, @r###"
    [
      {
        "file": "scenario.js",
        "messages": [
          {
            "ruleId": "lit/attribute-value-entities",
            "messageId": "unencoded",
            "severity": 2,
            "message": "Attribute values may not contain unencoded HTML entities, e.g. use `&gt;` instead of `>`",
            "line": 1,
            "column": 11,
            "endLine": 1,
            "endColumn": 24
          }
        ],
        "errorCount": 1,
        "warningCount": 0
      }
    ]
    "###);
}

#[test]
fn json_columns_count_utf16_units() {
    let source = "const s = \"\u{1F600}\"; html`<a title=\">\"></a>`;";
    let result = lint_js(source);
    let sources = [("scenario.js".to_string(), source.to_string())];
    let json = format_results(&[result], &sources, OutputFormat::Json, false);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let message = &parsed[0]["messages"][0];
    assert_eq!(message["column"], 25);
    assert_eq!(message["endColumn"], 34);
}
