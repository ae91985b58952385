//! Diagnostic conditions raised while parsing.

use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Severe,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Severe => "SEVERE",
        }
    }

    pub fn from_name(name: &str) -> Option<Severity> {
        match name {
            "INFO" => Some(Severity::Info),
            "WARNING" => Some(Severity::Warning),
            "ERROR" => Some(Severity::Error),
            "SEVERE" => Some(Severity::Severe),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! message_kinds {
    ($($kind:ident => $severity:ident, $text:literal;)*) => {
        /// A named diagnostic condition.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum MessageKind {
            $($kind,)*
        }

        impl MessageKind {
            /// Every condition, in declaration order.
            pub const ALL: &'static [MessageKind] = &[$(MessageKind::$kind,)*];

            pub fn severity(self) -> Severity {
                match self {
                    $(MessageKind::$kind => Severity::$severity,)*
                }
            }

            /// The human-readable message.
            pub fn message(self) -> &'static str {
                match self {
                    $(MessageKind::$kind => $text,)*
                }
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $(MessageKind::$kind => stringify!($kind),)*
                }
            }

            pub fn from_name(name: &str) -> Option<MessageKind> {
                match name {
                    $(stringify!($kind) => Some(MessageKind::$kind),)*
                    _ => None,
                }
            }
        }
    };
}

message_kinds! {
    OverlineTooShortForTitle => Info,
        "Possible incomplete section title. Treating the overline as ordinary text because it's so short.";
    UnexpectedTitleOverlineOrTransition => Info,
        "Unexpected possible title overline or transition. Treating it as ordinary text because it's so short.";
    UnderlineTooShortForTitle => Info,
        "Possible title underline, too short for the title. Treating it as ordinary text because it's so short.";
    ShortOverline => Warning, "Title overline too short.";
    ShortUnderline => Warning, "Title underline too short.";
    ExplicitMarkupWithUnIndent => Warning,
        "Explicit markup ends without a blank line; unexpected unindent.";
    BulletListWithUnIndent => Warning,
        "Bullet list ends without a blank line; unexpected unindent.";
    EnumListWithUnIndent => Warning,
        "Enumerated list ends without a blank line; unexpected unindent.";
    DefinitionListWithUnIndent => Warning,
        "Definition list ends without a blank line; unexpected unindent.";
    BlockQuoteWithUnIndent => Warning,
        "Block quote ends without a blank line; unexpected unindent.";
    InvalidSectionOrTransitionMarker => Error, "Invalid section title or transition marker.";
    UnexpectedIndentation => Error, "Unexpected indentation.";
    UnexpectedSectionTitle => Severe, "Unexpected section title.";
    UnexpectedSectionTitleOrTransition => Severe, "Unexpected section title or transition.";
    IncompleteSectionTitle => Severe, "Incomplete section title.";
    MissingMatchingUnderlineForOverline => Severe,
        "Missing matching underline for section title overline.";
    OverlineUnderlineMismatch => Severe, "Title overline & underline mismatch.";
    TitleLevelInconsistent => Severe, "Title level inconsistent:";
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic condition together with its severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserMessage {
    pub kind: MessageKind,
    pub severity: Severity,
}

impl From<MessageKind> for ParserMessage {
    fn from(kind: MessageKind) -> Self {
        ParserMessage {
            kind,
            severity: kind.severity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for &kind in MessageKind::ALL {
            assert_eq!(MessageKind::from_name(kind.as_str()), Some(kind));
        }
        for severity in [
            Severity::Info,
            Severity::Warning,
            Severity::Error,
            Severity::Severe,
        ] {
            assert_eq!(Severity::from_name(severity.as_str()), Some(severity));
        }
    }

    #[test]
    fn severities() {
        assert_eq!(
            MessageKind::UnderlineTooShortForTitle.severity(),
            Severity::Info
        );
        assert_eq!(MessageKind::ShortOverline.severity(), Severity::Warning);
        assert_eq!(
            MessageKind::InvalidSectionOrTransitionMarker.severity(),
            Severity::Error
        );
        assert_eq!(
            MessageKind::TitleLevelInconsistent.severity(),
            Severity::Severe
        );
    }
}
