//! `<html>` tag attributes and namespaces

use viewkit::helpers::{Doctype, HtmlTag, XHTML_NAMESPACE};

fn escape(value: &str) -> String {
    tera::escape_html(value)
}

fn attribute<'a>(tag: &'a HtmlTag, name: &str) -> Option<&'a str> {
    tag.attribute(name)
}

#[test]
fn test_setting_single_attribute() {
    let mut tag = HtmlTag::default();
    tag.set_attribute("xmlns", XHTML_NAMESPACE);
    assert_eq!(attribute(&tag, "xmlns"), Some(XHTML_NAMESPACE));
}

#[test]
fn test_adding_multiple_attributes() {
    let attributes = [("xmlns", XHTML_NAMESPACE), ("prefix", "og: http://ogp.me/ns#")];
    let mut tag = HtmlTag::default();
    tag.set_attributes(attributes);

    for (name, value) in attributes {
        assert_eq!(attribute(&tag, name), Some(value));
    }
}

#[test]
fn test_setting_multiple_attributes_overwrites_existing() {
    let mut tag = HtmlTag::default();
    tag.set_attribute("prefix", "foobar");

    let attributes = [("xmlns", XHTML_NAMESPACE), ("prefix", "og: http://ogp.me/ns#")];
    tag.set_attributes(attributes);

    assert_eq!(tag.attributes().len(), 2);
    for (name, value) in attributes {
        assert_eq!(attribute(&tag, name), Some(value));
    }
}

#[test]
fn test_open_tag_without_attributes() {
    assert_eq!(HtmlTag::default().open_tag(), "<html>");
}

#[test]
fn test_open_tag_with_attributes() {
    let attributes = [("xmlns", XHTML_NAMESPACE), ("xmlns:og", "http://ogp.me/ns#")];
    let mut tag = HtmlTag::default();
    tag.set_attributes(attributes);

    let rendered = tag.open_tag();
    assert!(rendered.starts_with("<html"));
    for (name, value) in attributes {
        assert!(rendered.contains(&format!("{}=\"{}\"", name, escape(value))));
    }
}

#[test]
fn test_close_tag() {
    assert_eq!(HtmlTag::default().close_tag(), "</html>");
}

#[test]
fn test_use_namespaces_setter() {
    let mut tag = HtmlTag::default();
    tag.set_use_namespaces(true);
    assert!(tag.use_namespaces());
}

#[test]
fn test_namespace_attribute_added_for_xhtml() {
    let mut tag = HtmlTag::new("xhtml".parse::<Doctype>().unwrap());
    tag.set_use_namespaces(true)
        .set_attributes([("prefix", "og: http://ogp.me/ns#")]);

    let rendered = tag.open_tag();
    assert!(rendered.contains(&format!("xmlns=\"{}\"", escape(XHTML_NAMESPACE))));
    assert!(rendered.contains(&format!("prefix=\"{}\"", escape("og: http://ogp.me/ns#"))));
}

#[test]
fn test_namespace_attribute_skipped_without_flag() {
    let tag = HtmlTag::new(Doctype::Xhtml1Transitional);
    assert_eq!(tag.open_tag(), "<html>");
}
