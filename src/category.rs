use crate::statics;

/// Display category of a property's value field. Purely cosmetic: it picks a
/// visual tag and never affects editability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCategory {
    Callback,
    Enum,
    Function,
    ElementRef,
    /// A plain type name made of ASCII letters and hyphens (`color`, `length`, ...).
    Named(String),
    Unknown,
}

impl DisplayCategory {
    pub fn tag(&self) -> &str {
        match self {
            DisplayCategory::Callback => statics::TAG_CALLBACK,
            DisplayCategory::Enum => statics::TAG_ENUM,
            DisplayCategory::Function => statics::TAG_FUNCTION,
            DisplayCategory::ElementRef => statics::TAG_ELEMENT_REF,
            DisplayCategory::Named(name) => name,
            DisplayCategory::Unknown => statics::TAG_UNKNOWN,
        }
    }
}

/// First match wins; the order matters because `callback(..)` would otherwise
/// fall through to the name pattern check and fail it.
pub fn classify(type_name: &str) -> DisplayCategory {
    if type_name == "callback" || type_name.starts_with("callback(") {
        DisplayCategory::Callback
    } else if type_name.starts_with("enum ") {
        DisplayCategory::Enum
    } else if type_name.starts_with("function(") {
        DisplayCategory::Function
    } else if type_name == "element ref" {
        DisplayCategory::ElementRef
    } else if is_plain_type_name(type_name) {
        DisplayCategory::Named(type_name.to_string())
    } else {
        DisplayCategory::Unknown
    }
}

fn is_plain_type_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
}
