//! Lint command - Lint markup in tagged templates

use crate::config::{self, LitmusConfig, RuleSetting, LITMUS_CONFIG_SCHEMA};
use clap::{Args, ValueEnum};
use glob::{glob, Pattern};
use ignore::Walk;
use litmus_carton::i18n::{t_fmt, Locale};
use litmus_patina::{
    format_results, format_summary, Linter, OutputFormat, RuleRegistry, Severity,
};
use rayon::prelude::*;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Script extensions that may contain tagged templates
const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "mts", "cts", "tsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Recommended,
    All,
}

#[derive(Args)]
pub struct LintArgs {
    /// Files, directories or glob patterns to lint
    #[arg(default_value = ".")]
    pub patterns: Vec<String>,

    /// Config file path (defaults to ./litmus.config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Maximum number of warnings before failing
    #[arg(long)]
    pub max_warnings: Option<usize>,

    /// Quiet mode - only report errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Message locale (en, ja, zh)
    #[arg(long)]
    pub locale: Option<String>,

    /// Rule preset
    #[arg(long, value_enum, default_value = "recommended")]
    pub rules: PresetArg,

    /// Print the JSON schema of litmus.config.json and exit
    #[arg(long)]
    pub print_schema: bool,
}

impl Default for LintArgs {
    fn default() -> Self {
        Self {
            patterns: vec![".".to_string()],
            config: None,
            format: FormatArg::Text,
            max_warnings: None,
            quiet: false,
            locale: None,
            rules: PresetArg::Recommended,
            print_schema: false,
        }
    }
}

pub fn run(args: LintArgs) {
    if args.print_schema {
        println!("{}", LITMUS_CONFIG_SCHEMA);
        return;
    }

    let start = Instant::now();

    let config = config::load_config(args.config.as_deref(), None).unwrap_or_else(|err| {
        warn!("{err}; using default configuration");
        LitmusConfig::default()
    });
    let locale = resolve_locale(args.locale.as_deref().or(config.locale.as_deref()));
    let linter = build_linter(&config, args.rules, locale);

    let ignore = compile_ignore(&config.ignore);
    let files = collect_files(&args.patterns, &ignore);

    if files.is_empty() {
        let patterns = format!("{:?}", args.patterns);
        eprintln!(
            "{}",
            t_fmt(locale, "cli.no_files", &[("patterns", patterns.as_str())])
        );
        return;
    }
    debug!(count = files.len(), "collected files");

    let error_count = AtomicUsize::new(0);
    let warning_count = AtomicUsize::new(0);

    // Lint all files in parallel and collect results
    let results: Vec<_> = files
        .par_iter()
        .filter_map(|path| {
            let source = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", path.display(), e);
                    return None;
                }
            };

            let filename = path.to_string_lossy().to_string();
            let mut result = linter.lint_source(&source, &filename);
            if args.quiet {
                result.diagnostics.retain(|d| d.severity == Severity::Error);
                result.warning_count = 0;
            }

            error_count.fetch_add(result.error_count, Ordering::Relaxed);
            warning_count.fetch_add(result.warning_count, Ordering::Relaxed);

            Some((filename, source, result))
        })
        .collect();

    let total_errors = error_count.load(Ordering::Relaxed);
    let total_warnings = warning_count.load(Ordering::Relaxed);

    let format = match args.format {
        FormatArg::Json => OutputFormat::Json,
        FormatArg::Text => OutputFormat::Text,
    };

    if format == OutputFormat::Json || total_errors > 0 || total_warnings > 0 {
        let lint_results: Vec<_> = results.iter().map(|(_, _, r)| r).cloned().collect();
        let sources: Vec<_> = results
            .iter()
            .map(|(f, s, _)| (f.clone(), s.clone()))
            .collect();

        let color = std::io::stdout().is_terminal();
        let output = format_results(&lint_results, &sources, format, color);
        if !output.trim().is_empty() {
            print!("{}", output);
            if format == OutputFormat::Json {
                println!();
            }
        }
    }

    let elapsed = start.elapsed();
    if format == OutputFormat::Text {
        println!(
            "\n{}",
            format_summary(total_errors, total_warnings, files.len())
        );
        println!("Linted {} files in {:.4?}", files.len(), elapsed);
    }
    info!(files = files.len(), errors = total_errors, warnings = total_warnings, "lint finished");

    if total_errors > 0 {
        std::process::exit(1);
    }

    if let Some(max) = args.max_warnings {
        if total_warnings > max {
            let (count, max) = (total_warnings.to_string(), max.to_string());
            eprintln!(
                "\n{}",
                t_fmt(
                    locale,
                    "cli.too_many_warnings",
                    &[("count", count.as_str()), ("max", max.as_str())]
                )
            );
            std::process::exit(1);
        }
    }
}

fn resolve_locale(requested: Option<&str>) -> Locale {
    match requested {
        Some(code) => Locale::parse(code).unwrap_or_else(|| {
            warn!(locale = code, "unsupported locale, falling back to English");
            Locale::En
        }),
        None => Locale::default(),
    }
}

/// Build the linter from the preset and the config's rule settings
fn build_linter(config: &LitmusConfig, preset: PresetArg, locale: Locale) -> Linter {
    let registry = match preset {
        PresetArg::Recommended => RuleRegistry::with_recommended(),
        PresetArg::All => RuleRegistry::with_all(),
    };

    let known = RuleRegistry::with_all();
    for name in config.rules.keys() {
        if known.get(name).is_none() {
            warn!(rule = name.as_str(), "unknown rule in configuration");
        }
    }

    let enabled: Vec<String> = registry
        .rules()
        .iter()
        .map(|rule| rule.meta().name)
        .filter(|name| config.rules.get(*name) != Some(&RuleSetting::Off))
        .map(str::to_string)
        .collect();
    let overrides: Vec<(String, Severity)> = config
        .rules
        .iter()
        .filter_map(|(name, setting)| match setting {
            RuleSetting::Error => Some((name.clone(), Severity::Error)),
            RuleSetting::Warn => Some((name.clone(), Severity::Warning)),
            RuleSetting::Off => None,
        })
        .collect();

    Linter::with_registry(registry)
        .with_locale(locale)
        .with_enabled_rules(Some(enabled))
        .with_severity_overrides(overrides)
}

fn compile_ignore(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                warn!(pattern = p.as_str(), %err, "invalid ignore pattern");
                None
            }
        })
        .collect()
}

fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

fn is_ignored(path: &Path, ignore: &[Pattern]) -> bool {
    let relative = path.strip_prefix(".").unwrap_or(path);
    path.components().any(|c| c.as_os_str() == "node_modules")
        || ignore.iter().any(|p| p.matches_path(relative))
}

/// Collect script files using glob patterns or directory walking
fn collect_files(patterns: &[String], ignore: &[Pattern]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = patterns
        .iter()
        .flat_map(|pattern| {
            if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
                glob(pattern)
                    .ok()
                    .into_iter()
                    .flatten()
                    .filter_map(|r| r.ok())
                    .collect::<Vec<_>>()
            } else {
                // Use directory walking for paths (respects .gitignore)
                Walk::new(pattern)
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_some_and(|t| t.is_file()))
                    .map(|e| e.path().to_path_buf())
                    .collect::<Vec<_>>()
            }
        })
        .filter(|p| is_script(p) && !is_ignored(p, ignore))
        .collect();

    files.sort();
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_script_extensions() {
        assert!(is_script(Path::new("a/b.ts")));
        assert!(is_script(Path::new("c.mjs")));
        assert!(!is_script(Path::new("d.vue")));
        assert!(!is_script(Path::new("README")));
    }

    #[test]
    fn test_ignore_patterns() {
        let ignore = compile_ignore(&["dist/**".to_string(), "[".to_string()]);
        assert_eq!(ignore.len(), 1);
        assert!(is_ignored(Path::new("./dist/app.js"), &ignore));
        assert!(is_ignored(Path::new("src/node_modules/x.js"), &ignore));
        assert!(!is_ignored(Path::new("src/app.js"), &ignore));
    }

    #[test]
    fn test_locale_resolution() {
        assert_eq!(resolve_locale(Some("ja")), Locale::Ja);
        assert_eq!(resolve_locale(Some("klingon")), Locale::En);
        assert_eq!(resolve_locale(None), Locale::En);
    }

    #[test]
    fn test_rule_off_disables() {
        let config =
            parse_config(r#"{ "rules": { "lit/attribute-value-entities": "off" } }"#).unwrap();
        let linter = build_linter(&config, PresetArg::Recommended, Locale::En);
        assert!(!linter.is_rule_enabled("lit/attribute-value-entities"));
        let result = linter.lint_source(r#"html`<a title=">"></a>`;"#, "a.js");
        assert!(!result.has_diagnostics());
    }

    #[test]
    fn test_rule_warn_downgrades() {
        let config =
            parse_config(r#"{ "rules": { "lit/attribute-value-entities": "warn" } }"#).unwrap();
        let linter = build_linter(&config, PresetArg::All, Locale::En);
        let result = linter.lint_source(r#"html`<a title=">"></a>`;"#, "a.js");
        assert_eq!(result.error_count, 0);
        assert_eq!(result.warning_count, 1);
    }

    #[test]
    fn test_collect_files_walks_directories() {
        let dir = std::env::temp_dir().join(format!("litmus-collect-{}", std::process::id()));
        let nested = dir.join("src");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("view.js"), "html`<a></a>`;").unwrap();
        fs::write(nested.join("notes.md"), "# notes").unwrap();

        let files = collect_files(&[dir.to_string_lossy().to_string()], &[]);
        assert_eq!(files, vec![nested.join("view.js")]);

        fs::remove_dir_all(&dir).unwrap();
    }
}
