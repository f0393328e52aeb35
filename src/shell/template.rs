//! Shell command templates.
//!
//! A template is shell text that may contain the `{args}` placeholder.
//! Every occurrence is replaced with the raw argument string at invocation
//! time; no quoting is applied.

use regex::Regex;
use std::sync::LazyLock;

/// The argument placeholder recognized in shell templates.
pub const PLACEHOLDER: &str = "{args}";

/// Brace-adjacent occurrences of the placeholder word, well-formed or not.
static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{*[ \t]*\bargs\b[ \t]*\}*").unwrap());

/// A validated shell template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTemplate {
    text: String,
    has_placeholder: bool,
}

impl ShellTemplate {
    /// Validate template text.
    ///
    /// Plain uses of the word `args` are left alone. Anything that touches a
    /// brace must be exactly `{args}`: `{args`, `args}`, `{ args }` and
    /// doubled braces such as `{{args}}` are rejected.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut has_placeholder = false;

        for found in PLACEHOLDER_PATTERN.find_iter(text) {
            let token = found.as_str();
            if !token.contains(['{', '}']) {
                continue;
            }
            if token != PLACEHOLDER {
                return Err(format!(
                    "malformed placeholder `{}` at offset {} (use `{}`)",
                    token,
                    found.start(),
                    PLACEHOLDER
                ));
            }
            has_placeholder = true;
        }

        Ok(Self {
            text: text.to_string(),
            has_placeholder,
        })
    }

    /// Substitute the argument string for every placeholder.
    pub fn render(&self, args: &str) -> String {
        if self.has_placeholder {
            self.text.replace(PLACEHOLDER, args)
        } else {
            self.text.clone()
        }
    }

    /// Whether the template uses the placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.has_placeholder
    }

    /// The template text as written.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_placeholder() {
        let template = ShellTemplate::parse("echo {args}").unwrap();
        assert!(template.has_placeholder());
        assert_eq!(template.render("hi"), "echo hi");
    }

    #[test]
    fn renders_every_occurrence() {
        let template = ShellTemplate::parse("echo {args} && echo {args}").unwrap();
        assert_eq!(template.render("x"), "echo x && echo x");
    }

    #[test]
    fn args_are_inserted_raw() {
        let template = ShellTemplate::parse("git commit -m {args}").unwrap();
        assert_eq!(
            template.render("\"fix: it's done\""),
            "git commit -m \"fix: it's done\""
        );
    }

    #[test]
    fn template_without_placeholder_ignores_args() {
        let template = ShellTemplate::parse("pytest").unwrap();
        assert!(!template.has_placeholder());
        assert_eq!(template.render("ignored"), "pytest");
    }

    #[test]
    fn other_braces_are_untouched() {
        let template = ShellTemplate::parse("awk '{print $1}' {args} ${HOME}").unwrap();
        assert_eq!(template.render("f.txt"), "awk '{print $1}' f.txt ${HOME}");
    }

    #[test]
    fn plain_word_args_is_not_a_placeholder() {
        let template = ShellTemplate::parse("echo args $args --args").unwrap();
        assert!(!template.has_placeholder());
    }

    #[test]
    fn rejects_unclosed_placeholder() {
        assert!(ShellTemplate::parse("echo {args").is_err());
        assert!(ShellTemplate::parse("echo args}").is_err());
    }

    #[test]
    fn rejects_nested_placeholder() {
        let err = ShellTemplate::parse("echo {{args}}").unwrap_err();
        assert!(err.contains("{{args}}"));
    }

    #[test]
    fn rejects_padded_placeholder() {
        assert!(ShellTemplate::parse("echo { args }").is_err());
    }
}
