//! Document type declarations

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Supported document types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Doctype {
    #[default]
    #[serde(rename = "HTML5")]
    Html5,
    #[serde(rename = "HTML4_STRICT")]
    Html4Strict,
    #[serde(rename = "HTML4_LOOSE")]
    Html4Loose,
    #[serde(rename = "XHTML1_STRICT")]
    Xhtml1Strict,
    #[serde(rename = "XHTML1_TRANSITIONAL")]
    Xhtml1Transitional,
    #[serde(rename = "XHTML11")]
    Xhtml11,
    #[serde(rename = "XHTML5")]
    Xhtml5,
}

impl Doctype {
    pub fn name(self) -> &'static str {
        match self {
            Doctype::Html5 => "HTML5",
            Doctype::Html4Strict => "HTML4_STRICT",
            Doctype::Html4Loose => "HTML4_LOOSE",
            Doctype::Xhtml1Strict => "XHTML1_STRICT",
            Doctype::Xhtml1Transitional => "XHTML1_TRANSITIONAL",
            Doctype::Xhtml11 => "XHTML11",
            Doctype::Xhtml5 => "XHTML5",
        }
    }

    pub fn all() -> &'static [Doctype] {
        &[
            Doctype::Html5,
            Doctype::Html4Strict,
            Doctype::Html4Loose,
            Doctype::Xhtml1Strict,
            Doctype::Xhtml1Transitional,
            Doctype::Xhtml11,
            Doctype::Xhtml5,
        ]
    }

    /// The `<!DOCTYPE ...>` declaration
    pub fn declaration(self) -> &'static str {
        match self {
            Doctype::Html5 | Doctype::Xhtml5 => "<!DOCTYPE html>",
            Doctype::Html4Strict => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#
            }
            Doctype::Html4Loose => {
                r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
            }
            Doctype::Xhtml1Strict => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#
            }
            Doctype::Xhtml1Transitional => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#
            }
            Doctype::Xhtml11 => {
                r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">"#
            }
        }
    }

    pub fn is_xhtml(self) -> bool {
        matches!(
            self,
            Doctype::Xhtml1Strict | Doctype::Xhtml1Transitional | Doctype::Xhtml11 | Doctype::Xhtml5
        )
    }

    pub fn is_html5(self) -> bool {
        matches!(self, Doctype::Html5 | Doctype::Xhtml5)
    }
}

impl Display for Doctype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Doctype {
    type Err = DoctypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        let normalized = match normalized.as_str() {
            "XHTML" => "XHTML1_STRICT",
            "HTML" => "HTML5",
            other => other,
        };
        Doctype::all()
            .iter()
            .copied()
            .find(|doctype| doctype.name() == normalized)
            .ok_or_else(|| DoctypeParseError::Unknown(s.to_string()))
    }
}

/// Error type for doctype parsing
#[derive(Debug, Clone, PartialEq)]
pub enum DoctypeParseError {
    Unknown(String),
}

impl Display for DoctypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctypeParseError::Unknown(doctype) => write!(
                f,
                "Unknown doctype: '{}'. Available doctypes: {}",
                doctype,
                Doctype::all()
                    .iter()
                    .map(|d| d.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

impl std::error::Error for DoctypeParseError {}
