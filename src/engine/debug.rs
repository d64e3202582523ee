//! Rule introspection
//!
//! `Display` on a [`Rule`] renders its structure, one arm per combinator:
//!
//! ```text
//! <Seq <Str "a"> <Cached <Seq <Str "b"> <Str "c">>> <Str "d">>
//! ```
//!
//! Lazy rules print as `<Lazy>` without following the reference, so
//! recursive grammars render in finite space. [`RuleTree`] prints the same
//! structure indented, one rule per line, with ids.

use super::rule::{Rule, RuleKind};
use std::fmt::{self, Write};

impl RuleKind {
    /// Short name of the combinator
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Str(_) => "Str",
            RuleKind::Re { .. } => "Re",
            RuleKind::Seq(_) => "Seq",
            RuleKind::Choice(_) => "Choice",
            RuleKind::Maybe(_) => "Maybe",
            RuleKind::Cached(_) => "Cached",
            RuleKind::Map(..) => "Map",
            RuleKind::On(..) => "On",
            RuleKind::Fail { .. } => "Fail",
            RuleKind::Skip(_) => "Skip",
            RuleKind::Eof => "Eof",
            RuleKind::Lazy(_) => "Lazy",
        }
    }

    /// Direct sub-rules, not following lazy references
    pub fn children(&self) -> Vec<&Rule> {
        match self {
            RuleKind::Seq(rules) | RuleKind::Choice(rules) => rules.iter().collect(),
            RuleKind::Maybe(rule)
            | RuleKind::Cached(rule)
            | RuleKind::Map(rule, _)
            | RuleKind::On(rule, _)
            | RuleKind::Fail { rule, .. }
            | RuleKind::Skip(rule) => vec![&**rule],
            RuleKind::Str(_) | RuleKind::Re { .. } | RuleKind::Eof | RuleKind::Lazy(_) => {
                Vec::new()
            }
        }
    }

    fn label(&self) -> Option<String> {
        match self {
            RuleKind::Str(lit) => Some(format!("{:?}", lit)),
            RuleKind::Re { pattern, .. } => Some(format!("/{}/", pattern)),
            RuleKind::Fail { labels, .. } => Some(format!("[{}]", labels.join(" | "))),
            _ => None,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        write!(f, "<{}", kind.name())?;
        if let Some(label) = kind.label() {
            write!(f, " {}", label)?;
        }
        for child in kind.children() {
            write!(f, " {}", child)?;
        }
        f.write_str(">")
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule#{}{}", self.id().raw(), self)
    }
}

/// Indented rule tree printer
pub struct RuleTree {
    /// Indentation string
    indent: String,
    /// Maximum depth to print
    max_depth: Option<usize>,
}

impl RuleTree {
    /// Create a new tree printer
    pub fn new() -> Self {
        Self {
            indent: "  ".to_string(),
            max_depth: None,
        }
    }

    /// Set the indentation string
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Set the maximum depth to print
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Print a rule
    pub fn print(&self, rule: &Rule) -> String {
        let mut output = String::new();
        self.print_rule(rule, 0, &mut output);
        output
    }

    fn print_rule(&self, rule: &Rule, depth: usize, output: &mut String) {
        let indent = self.indent.repeat(depth);

        if self.max_depth.is_some_and(|max| depth > max) {
            // Writing to a String cannot fail
            let _ = writeln!(output, "{}...", indent);
            return;
        }

        let kind = rule.kind();
        let _ = match kind.label() {
            Some(label) => writeln!(output, "{}{} {} #{}", indent, kind.name(), label, rule.id().raw()),
            None => writeln!(output, "{}{} #{}", indent, kind.name(), rule.id().raw()),
        };

        for child in kind.children() {
            self.print_rule(child, depth + 1, output);
        }
    }
}

impl Default for RuleTree {
    fn default() -> Self {
        Self::new()
    }
}
