//! JSON rendering of view model trees and plain values

use serde::Serialize;
use serde_json::{Value, json};
use viewkit::core::error::{Error, Result};
use viewkit::renderer::{JsonRenderer, JsonSerializable, Renderable, Renderer};
use viewkit::{JsonModel, Variables, ViewModel};

fn vars(value: Value) -> Variables {
    value.as_object().cloned().unwrap()
}

fn model(value: Value) -> ViewModel {
    ViewModel::with_variables(vars(value))
}

fn non_object_models() -> Vec<Value> {
    vec![
        json!("string"),
        json!(1),
        json!(1.0),
        json!(["foo", "bar"]),
        json!({"foo": "bar"}),
    ]
}

struct SelfEncoding {
    value: Value,
}

impl JsonSerializable for SelfEncoding {
    fn json_value(&self) -> Result<Value> {
        Ok(self.value.clone())
    }
}

#[derive(Serialize)]
struct PlainObject {
    foo: &'static str,
    bar: &'static str,
}

#[test]
fn test_renders_view_models_without_children() {
    let rendered = JsonRenderer::new()
        .render(model(json!({"foo": "bar"})).into(), None)
        .unwrap();
    assert_eq!(rendered, r#"{"foo":"bar"}"#);
}

#[test]
fn test_renders_children_using_capture_to_value() {
    let mut root = model(json!({"foo": "bar"}));
    let mut child1 = model(json!({"foo": "bar"}));
    let mut child2 = model(json!({"foo": "bar"}));
    child1.set_capture_to(Some("child1"));
    child2.set_capture_to(Some("child2"));
    root.add_child(child1).add_child(child2);

    let rendered = JsonRenderer::new().render(root.into(), None).unwrap();
    assert_eq!(
        rendered,
        r#"{"foo":"bar","child1":{"foo":"bar"},"child2":{"foo":"bar"}}"#
    );
}

#[test]
fn test_throws_away_children_without_capture_to_by_default() {
    let mut root = model(json!({"foo": "bar"}));
    let mut child1 = model(json!({"foo": "baz"}));
    let mut child2 = model(json!({"foo": "bar"}));
    child1.set_capture_to(None);
    child2.set_capture_to(Some("child2"));
    root.add_child(child1).add_child(child2);

    let rendered = JsonRenderer::new().render(root.into(), None).unwrap();
    assert_eq!(rendered, r#"{"foo":"bar","child2":{"foo":"bar"}}"#);
}

#[test]
fn test_can_merge_children_without_capture_to() {
    let mut renderer = JsonRenderer::new();
    renderer.set_merge_unnamed_children(true);

    let mut root = model(json!({"foo": "bar"}));
    let mut child1 = model(json!({"foo": "baz"}));
    let mut child2 = model(json!({"foo": "bar"}));
    child1.set_capture_to(None);
    child2.set_capture_to(Some("child2"));
    root.add_child(child1).add_child(child2);

    let rendered = renderer.render(root.into(), None).unwrap();
    assert_eq!(rendered, r#"{"foo":"baz","child2":{"foo":"bar"}}"#);
}

#[test]
fn test_later_unnamed_children_win_when_merging() {
    let mut renderer = JsonRenderer::new();
    renderer.set_merge_unnamed_children(true);

    let mut root = model(json!({"a": 0}));
    for value in 1..=3 {
        let mut child = model(json!({"a": value}));
        child.set_capture_to(Some(""));
        root.add_child(child);
    }

    let rendered = renderer.render(root.into(), None).unwrap();
    assert_eq!(rendered, r#"{"a":3}"#);
}

#[test]
fn test_renders_non_object_models_as_json() {
    for value in non_object_models() {
        let expected = serde_json::to_string(&value).unwrap();
        let rendered = JsonRenderer::new().render(value.into(), None).unwrap();
        assert_eq!(rendered, expected);
    }
}

#[test]
fn test_renders_self_serializing_values() {
    let value = SelfEncoding {
        value: json!({"foo": "bar"}),
    };
    let rendered = JsonRenderer::new()
        .render(Renderable::serializing(value), None)
        .unwrap();
    assert_eq!(rendered, r#"{"foo":"bar"}"#);
}

#[test]
fn test_renders_iterables_as_objects() {
    let rendered = JsonRenderer::new()
        .render(Renderable::iterable([("foo", "bar"), ("bar", "baz")]), None)
        .unwrap();
    assert_eq!(rendered, r#"{"foo":"bar","bar":"baz"}"#);
}

#[test]
fn test_renders_plain_structs_as_objects() {
    let renderable = Renderable::from_serialize(&PlainObject {
        foo: "bar",
        bar: "baz",
    })
    .unwrap();
    let rendered = JsonRenderer::new().render(renderable, None).unwrap();
    assert_eq!(rendered, r#"{"foo":"bar","bar":"baz"}"#);
}

#[test]
fn test_non_model_with_values_is_domain_error() {
    let err = JsonRenderer::new()
        .render("foo".into(), Some(vars(json!({"bar": "baz"}))))
        .unwrap_err();
    assert!(matches!(err, Error::Domain(_)));
}

#[test]
fn test_non_model_with_empty_values_renders() {
    let rendered = JsonRenderer::new()
        .render("foo".into(), Some(Variables::new()))
        .unwrap();
    assert_eq!(rendered, r#""foo""#);
}

#[test]
fn test_renders_trees_by_default() {
    assert!(JsonRenderer::new().can_render_trees());
}

#[test]
fn test_set_has_jsonp_callback() {
    let mut renderer = JsonRenderer::new();
    assert!(!renderer.has_jsonp_callback());
    renderer.set_jsonp_callback("0");
    assert!(!renderer.has_jsonp_callback());
    renderer.set_jsonp_callback("callback");
    assert!(renderer.has_jsonp_callback());
    assert_eq!(renderer.jsonp_callback(), Some("callback"));
}

#[test]
fn test_renders_view_models_with_jsonp_callback() {
    let mut renderer = JsonRenderer::new();
    renderer.set_jsonp_callback("callback");

    let rendered = renderer
        .render(model(json!({"foo": "bar"})).into(), None)
        .unwrap();
    assert_eq!(rendered, r#"callback({"foo":"bar"});"#);
}

#[test]
fn test_renders_non_object_models_with_jsonp_callback() {
    let mut renderer = JsonRenderer::new();
    renderer.set_jsonp_callback("callback");

    for value in non_object_models() {
        let expected = format!("callback({});", serde_json::to_string(&value).unwrap());
        assert_eq!(renderer.render(value.into(), None).unwrap(), expected);
    }
}

#[test]
fn test_renders_self_serializing_values_with_jsonp_callback() {
    let mut renderer = JsonRenderer::new();
    renderer.set_jsonp_callback("callback");

    let rendered = renderer
        .render(
            Renderable::serializing(SelfEncoding {
                value: json!({"foo": "bar"}),
            }),
            None,
        )
        .unwrap();
    assert_eq!(rendered, r#"callback({"foo":"bar"});"#);
}

#[test]
fn test_renders_iterables_with_jsonp_callback() {
    let mut renderer = JsonRenderer::new();
    renderer.set_jsonp_callback("callback");

    let rendered = renderer
        .render(Renderable::iterable([("foo", "bar"), ("bar", "baz")]), None)
        .unwrap();
    assert_eq!(rendered, r#"callback({"foo":"bar","bar":"baz"});"#);
}

#[test]
fn test_empty_callback_leaves_output_unwrapped() {
    let mut renderer = JsonRenderer::new();
    renderer.set_jsonp_callback("callback").set_jsonp_callback("");

    let rendered = renderer.render(json!([1, 2]).into(), None).unwrap();
    assert_eq!(rendered, "[1,2]");
}

#[test]
fn test_recurses_json_model_children() {
    let mut root = JsonModel::with_variables(vars(json!({"foo": "bar"})));
    let mut child1 = JsonModel::with_variables(vars(json!({"foo": "bar"})));
    let mut child2 = JsonModel::with_variables(vars(json!({"foo": "bar"})));
    child1.set_capture_to(Some("child1"));
    child2.set_capture_to(Some("child2"));
    root.add_child(child1).add_child(child2);

    let rendered = JsonRenderer::new().render(root.into(), None).unwrap();
    assert_eq!(
        rendered,
        r#"{"foo":"bar","child1":{"foo":"bar"},"child2":{"foo":"bar"}}"#
    );
}

#[test]
fn test_json_model_callback_is_not_doubled() {
    let mut root = JsonModel::with_variables(vars(json!({"foo": "bar"})));
    root.set_jsonp_callback("cb");

    let mut renderer = JsonRenderer::new();
    renderer.set_jsonp_callback("cb");

    let rendered = renderer.render(root.into(), None).unwrap();
    assert_eq!(rendered, r#"cb({"foo":"bar"});"#);
}

#[test]
fn test_nested_grandchildren_are_rendered() {
    let mut grandchild = model(json!({"depth": 2}));
    grandchild.set_capture_to(Some("inner"));
    let mut child = model(json!({"depth": 1}));
    child.set_capture_to(Some("outer")).add_child(grandchild);
    let mut root = model(json!({"depth": 0}));
    root.add_child(child);

    let rendered = JsonRenderer::new().render(root.into(), None).unwrap();
    assert_eq!(
        rendered,
        r#"{"depth":0,"outer":{"depth":1,"inner":{"depth":2}}}"#
    );
}

#[test]
fn test_blank_callback_option_on_model_leaves_output_unwrapped() {
    let mut root = model(json!({"a": 1}));
    root.set_option("jsonp_callback", " ");

    let rendered = JsonRenderer::new().render(root.into(), None).unwrap();
    assert_eq!(rendered, r#"{"a":1}"#);
}
