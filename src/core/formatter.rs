//! Line formatting
//!
//! Renders `(timestamp, severity, message)` into a single display line using
//! a positional message template and a strftime date pattern. Both are parsed
//! once when the logger is built, so rendering itself cannot fail.
//!
//! Template placeholders:
//!
//! | placeholder | value                        |
//! |-------------|------------------------------|
//! | `{0}`       | timestamp, per date pattern  |
//! | `{1}`       | severity code (`INF`, ...)   |
//! | `{2}`       | message                      |
//!
//! `{{` and `}}` produce literal braces.

use super::error::{LoggerError, Result};
use super::severity::Severity;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

/// Default message template: `(date) [INF] message`
pub const DEFAULT_TEMPLATE: &str = "({0}) [{1}] {2}";

/// Default date pattern: `10/18/2026 14:03:07`
pub const DEFAULT_DATE_PATTERN: &str = "%m/%d/%Y %H:%M:%S";

/// Separator placed between the message and the addendum
pub const ADDENDUM_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Date,
    Severity,
    Message,
}

/// A validated message template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl MessageTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut index = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        index.push(c);
                    }
                    if !closed {
                        return Err(LoggerError::formatter(
                            "template",
                            format!("unclosed placeholder starting at byte {}", pos),
                        ));
                    }
                    let segment = match index.trim() {
                        "0" => Segment::Date,
                        "1" => Segment::Severity,
                        "2" => Segment::Message,
                        other => {
                            return Err(LoggerError::formatter(
                                "template",
                                format!(
                                    "unsupported placeholder '{{{}}}' at byte {}; expected {{0}}, {{1}} or {{2}}",
                                    other, pos
                                ),
                            ))
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(LoggerError::formatter(
                        "template",
                        format!("unmatched '}}' at byte {}", pos),
                    ))
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE.to_string(),
            segments: vec![
                Segment::Literal("(".to_string()),
                Segment::Date,
                Segment::Literal(") [".to_string()),
                Segment::Severity,
                Segment::Literal("] ".to_string()),
                Segment::Message,
            ],
        }
    }
}

/// A validated strftime date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern(String);

impl DatePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::formatter(
                "date pattern",
                format!("invalid strftime pattern '{}'", pattern),
            ));
        }
        Ok(Self(pattern.to_string()))
    }

    #[must_use]
    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp.format(&self.0).to_string()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DatePattern {
    fn default() -> Self {
        Self(DEFAULT_DATE_PATTERN.to_string())
    }
}

/// Renders log lines from a template and a date pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formatter {
    template: MessageTemplate,
    date_pattern: DatePattern,
}

impl Formatter {
    pub fn new(template: &str, date_pattern: &str) -> Result<Self> {
        Ok(Self {
            template: MessageTemplate::parse(template)?,
            date_pattern: DatePattern::parse(date_pattern)?,
        })
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    pub fn date_pattern(&self) -> &DatePattern {
        &self.date_pattern
    }

    /// Render one line. `addendum` is appended after [`ADDENDUM_SEPARATOR`].
    #[must_use]
    pub fn render(
        &self,
        severity: Severity,
        timestamp: &DateTime<Utc>,
        message: &str,
        addendum: Option<&str>,
    ) -> String {
        let mut line = String::with_capacity(self.template.source.len() + message.len() + 24);
        for segment in &self.template.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Date => line.push_str(&self.date_pattern.format(timestamp)),
                Segment::Severity => line.push_str(severity.code()),
                Segment::Message => line.push_str(message),
            }
        }
        if let Some(addendum) = addendum {
            line.push_str(ADDENDUM_SEPARATOR);
            line.push_str(addendum);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn test_default_render() {
        let formatter = Formatter::default();
        let line = formatter.render(Severity::Information, &fixed_datetime(), "ready", None);
        assert_eq!(line, "(01/08/2025 10:30:45) [INF] ready");
    }

    #[test]
    fn test_default_template_matches_parsed() {
        let parsed = MessageTemplate::parse(DEFAULT_TEMPLATE).unwrap();
        assert_eq!(parsed, MessageTemplate::default());
    }

    #[test]
    fn test_custom_template_and_pattern() {
        let formatter = Formatter::new("{1}|{0}|{2}", "%Y-%m-%d").unwrap();
        let line = formatter.render(Severity::Warning, &fixed_datetime(), "low disk", None);
        assert_eq!(line, "WRN|2025-01-08|low disk");
    }

    #[test]
    fn test_placeholders_may_repeat_or_be_omitted() {
        let formatter = Formatter::new("{2} {2}", DEFAULT_DATE_PATTERN).unwrap();
        let line = formatter.render(Severity::Debug, &fixed_datetime(), "echo", None);
        assert_eq!(line, "echo echo");
    }

    #[test]
    fn test_escaped_braces() {
        let formatter = Formatter::new("{{{1}}} {2}", DEFAULT_DATE_PATTERN).unwrap();
        let line = formatter.render(Severity::Error, &fixed_datetime(), "x", None);
        assert_eq!(line, "{ERR} x");
    }

    #[test]
    fn test_addendum_appended() {
        let formatter = Formatter::default();
        let line = formatter.render(
            Severity::Fatal,
            &fixed_datetime(),
            "halt",
            Some("heap=1024"),
        );
        assert_eq!(line, "(01/08/2025 10:30:45) [FTL] halt | heap=1024");
    }

    #[test]
    fn test_malformed_templates_rejected() {
        for bad in ["{0", "{3}", "{x}", "{0:yyyy}", "stray }", "{}"] {
            let err = MessageTemplate::parse(bad).unwrap_err();
            assert!(
                matches!(err, LoggerError::FormatterError { .. }),
                "template {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_malformed_date_pattern_rejected() {
        assert!(DatePattern::parse("%Y-%m-%d %Q").is_err());
        assert!(DatePattern::parse("%Y-%m-%d").is_ok());
    }
}
