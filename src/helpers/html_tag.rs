//! The `<html>` root element and its attributes

use tracing::trace;

use crate::helpers::Doctype;

/// Namespace declared on the root element of XHTML documents
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Renders the document's opening and closing `<html>` tags
#[derive(Debug, Clone, Default)]
pub struct HtmlTag {
    // Insertion-ordered; attribute output follows this order.
    attributes: Vec<(String, String)>,
    use_namespaces: bool,
    doctype: Doctype,
}

impl HtmlTag {
    pub fn new(doctype: Doctype) -> Self {
        Self {
            doctype,
            ..Self::default()
        }
    }

    /// Set one attribute, replacing an existing value in place
    pub fn set_attribute<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, current)) => *current = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set several attributes; existing names are overwritten
    pub fn set_attributes<I, K, V>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in attributes {
            self.set_attribute(name, value);
        }
        self
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Add the doctype's namespace declarations when opening the tag
    pub fn set_use_namespaces(&mut self, use_namespaces: bool) -> &mut Self {
        self.use_namespaces = use_namespaces;
        self
    }

    pub fn use_namespaces(&self) -> bool {
        self.use_namespaces
    }

    pub fn set_doctype(&mut self, doctype: Doctype) -> &mut Self {
        self.doctype = doctype;
        self
    }

    pub fn doctype(&self) -> Doctype {
        self.doctype
    }

    pub fn open_tag(&self) -> String {
        let mut attributes: Vec<(&str, &str)> = Vec::with_capacity(self.attributes.len() + 1);
        if self.use_namespaces && self.doctype.is_xhtml() && self.attribute("xmlns").is_none() {
            trace!(doctype = %self.doctype, "Adding XHTML namespace to html tag");
            attributes.push(("xmlns", XHTML_NAMESPACE));
        }
        attributes.extend(self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        format!("<html{}>", html_attributes(&attributes))
    }

    pub fn close_tag(&self) -> &'static str {
        "</html>"
    }
}

/// Render `name="value"` pairs, each preceded by a space
pub fn html_attributes(attributes: &[(&str, &str)]) -> String {
    attributes
        .iter()
        .map(|(name, value)| {
            let name = tera::escape_html(name);
            let value = tera::escape_html(value);
            format!(" {name}=\"{value}\"")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_order_is_kept_on_overwrite() {
        let mut tag = HtmlTag::default();
        tag.set_attribute("lang", "en").set_attribute("dir", "ltr");
        tag.set_attribute("lang", "fr");

        assert_eq!(
            tag.attributes(),
            &[
                ("lang".to_string(), "fr".to_string()),
                ("dir".to_string(), "ltr".to_string())
            ]
        );
        assert_eq!(tag.open_tag(), r#"<html lang="fr" dir="ltr">"#);
    }

    #[test]
    fn test_namespaces_only_for_xhtml() {
        let mut tag = HtmlTag::new(Doctype::Html5);
        tag.set_use_namespaces(true);
        assert_eq!(tag.open_tag(), "<html>");

        tag.set_doctype(Doctype::Xhtml1Strict);
        assert_eq!(
            tag.open_tag(),
            r#"<html xmlns="http:&#x2F;&#x2F;www.w3.org&#x2F;1999&#x2F;xhtml">"#
        );
    }

    #[test]
    fn test_explicit_xmlns_is_not_duplicated() {
        let mut tag = HtmlTag::new(Doctype::Xhtml11);
        tag.set_use_namespaces(true)
            .set_attribute("xmlns", "urn:custom");

        assert_eq!(tag.open_tag(), r#"<html xmlns="urn:custom">"#);
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let rendered = html_attributes(&[("title", "a \"quoted\" <value>")]);
        assert!(rendered.starts_with(" title=\""));
        assert!(!rendered.contains("<value>"));
        assert!(!rendered.contains("\"quoted\""));
    }
}
