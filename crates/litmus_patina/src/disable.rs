//! Inline suppression comments in scripts.
//!
//! ```js
//! /* litmus-disable */                       // whole file, all rules
//! /* litmus-disable lit/attribute-value-entities */
//! // litmus-disable-next-line
//! html`<a title="a > b"></a>`;
//! html`<a title="a > b"></a>`; // litmus-disable-line
//! ```
//!
//! A directive must open its comment. Rule names follow, separated by
//! commas or whitespace; `--` starts a free-form description.

use litmus_carton::{CompactString, FxHashMap, FxHashSet, LineIndex};

const DIRECTIVE: &str = "litmus-disable";

/// Which rules a directive applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleFilter {
    All,
    Rules(FxHashSet<CompactString>),
}

impl RuleFilter {
    fn from_names<'s>(names: impl Iterator<Item = &'s str>) -> Self {
        let rules: FxHashSet<CompactString> = names.map(CompactString::from).collect();
        if rules.is_empty() {
            Self::All
        } else {
            Self::Rules(rules)
        }
    }

    #[inline]
    pub fn matches(&self, rule_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Rules(rules) => rules.contains(rule_name),
        }
    }

    fn merge(&mut self, other: Self) {
        match other {
            Self::All => *self = Self::All,
            Self::Rules(more) => {
                if let Self::Rules(rules) = self {
                    rules.extend(more);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveKind {
    File,
    Line,
    NextLine,
}

/// Suppressions collected from one file's comments
#[derive(Debug, Default)]
pub struct DisableDirectives {
    file: Option<RuleFilter>,
    /// 1-indexed line -> suppressed rules
    lines: FxHashMap<u32, RuleFilter>,
}

impl DisableDirectives {
    /// Collect directives from comment spans (`[start, end)` byte offsets).
    pub fn parse(lines: &LineIndex<'_>, comments: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let source = lines.source();
        let mut directives = Self::default();

        for (start, end) in comments {
            let Some(text) = source.get(start as usize..end as usize) else {
                continue;
            };
            let Some((kind, filter)) = parse_comment(text) else {
                continue;
            };
            match kind {
                DirectiveKind::File => match directives.file.as_mut() {
                    Some(existing) => existing.merge(filter),
                    None => directives.file = Some(filter),
                },
                DirectiveKind::Line => directives.add_line(lines.line_col(start).0, filter),
                DirectiveKind::NextLine => directives.add_line(lines.line_col(end).0 + 1, filter),
            }
        }

        directives
    }

    fn add_line(&mut self, line: u32, filter: RuleFilter) {
        match self.lines.get_mut(&line) {
            Some(existing) => existing.merge(filter),
            None => {
                self.lines.insert(line, filter);
            }
        }
    }

    /// Whether `rule_name` is suppressed for a diagnostic starting on `line`
    #[inline]
    pub fn is_disabled(&self, rule_name: &str, line: u32) -> bool {
        self.file.as_ref().is_some_and(|f| f.matches(rule_name))
            || self.lines.get(&line).is_some_and(|f| f.matches(rule_name))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.lines.is_empty()
    }
}

fn parse_comment(text: &str) -> Option<(DirectiveKind, RuleFilter)> {
    let body = text
        .strip_suffix("*/")
        .unwrap_or(text)
        .trim_start_matches(['/', '*'])
        .trim_start();
    let rest = body.strip_prefix(DIRECTIVE)?;

    let (kind, rest) = if let Some(rest) = rest.strip_prefix("-next-line") {
        (DirectiveKind::NextLine, rest)
    } else if let Some(rest) = rest.strip_prefix("-line") {
        (DirectiveKind::Line, rest)
    } else {
        (DirectiveKind::File, rest)
    };
    // `litmus-disabled`, `litmus-disable-lines` and the like are not directives
    if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
        return None;
    }

    let names = rest.split("--").next().unwrap_or_default();
    let filter = RuleFilter::from_names(
        names
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|name| !name.is_empty()),
    );
    Some((kind, filter))
}
