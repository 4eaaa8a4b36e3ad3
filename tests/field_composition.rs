//! End-to-end field behavior through the public API.
//!
//! Each test builds its own registry so nothing leaks between tests through
//! the thread's default registry.
//!
//! Run with: cargo test --test field_composition

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use spark_form::{
    register_builtin_controls, Control, ControlOverrides, ControlProps, ControlRegistry, Element,
    FieldController, FieldProps, FieldValue, FormContext, Lang, Layout, ListInput, MarkerTag,
    TextInput, ValueType,
};

// =============================================================================
// HELPERS
// =============================================================================

fn context() -> FormContext {
    let registry = ControlRegistry::new();
    register_builtin_controls(&registry);
    FormContext::new(registry, Lang::default())
}

fn field(props: FieldProps) -> FieldController {
    FieldController::with_context(props, context())
}

fn text_input(field: &FieldController) -> Rc<dyn Control> {
    field.reference().expect("field should be bound after render")
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn required_empty_value_fails_with_required_kind() {
    let f = field(FieldProps {
        required: true,
        ..Default::default()
    });

    assert!(!f.validate(Some(FieldValue::Empty)));
    assert!(f.has_error());
    assert!(!f.has_value());
    assert_eq!(f.failure().unwrap().kind(), "required");
    assert_eq!(f.error_text(), "This field is required");
}

#[test]
fn read_only_always_passes() {
    let f = field(FieldProps {
        type_name: "email".into(),
        required: true,
        max: Some(1.0),
        read_only: true,
        ..Default::default()
    });

    assert!(f.validate(Some(FieldValue::Empty)));
    assert!(f.validate(Some("not an email".into())));
    assert!(!f.has_error());
}

#[test]
fn array_count_is_checked_against_bounds() {
    let f = field(FieldProps {
        type_name: "tags".into(),
        value: "a,b,c".into(),
        sep: Some(",".into()),
        min: Some(2.0),
        max: Some(5.0),
        ..Default::default()
    });
    assert_eq!(f.value_type(), ValueType::Array);
    assert!(f.validate(None));

    let mut props = f.props();
    props.max = Some(2.0);
    f.update_props(props);

    assert!(!f.validate(None));
    assert_eq!(f.failure().unwrap().kind(), "max.array");
    assert_eq!(f.error_text(), "Please choose no more than 2 items");
}

#[test]
fn number_bound_compares_parsed_value() {
    let f = field(FieldProps {
        type_name: "number".into(),
        value: "15".into(),
        max: Some(10.0),
        ..Default::default()
    });

    assert!(!f.validate(None));
    assert_eq!(f.failure().unwrap().kind(), "max.number");
    assert_eq!(f.error_text(), "The value must be no greater than 10");

    assert!(f.validate(Some("9.5".into())));
}

#[test]
fn format_failure_uses_type_tip() {
    let f = field(FieldProps::typed("email"));
    f.render();

    assert!(!f.set_value("nope"));
    assert_eq!(f.failure().unwrap().kind(), "email");
    assert_eq!(f.error_text(), "Please enter a valid email address");

    assert!(f.set_value("ada@example.com"));
    assert!(!f.has_error());
    assert_eq!(f.error_text(), "");
}

#[test]
fn custom_predicate_falls_back_to_tip() {
    let f = field(FieldProps {
        tip: Some("Must be even".into()),
        on_validate: Some(Rc::new(|value: &FieldValue| {
            value.as_number().is_some_and(|n| n % 2.0 == 0.0)
        })),
        ..Default::default()
    });

    assert!(!f.validate(Some("3".into())));
    assert_eq!(f.failure().unwrap().kind(), "");
    assert_eq!(f.error_text(), "Must be even");
    assert!(f.validate(Some("4".into())));
}

#[test]
fn custom_predicate_runs_before_empty_short_circuit() {
    let calls = Rc::new(RefCell::new(0));
    let calls_clone = calls.clone();
    let f = field(FieldProps {
        on_validate: Some(Rc::new(move |_: &FieldValue| {
            *calls_clone.borrow_mut() += 1;
            false
        })),
        ..Default::default()
    });

    assert!(!f.validate(Some(FieldValue::Empty)));
    assert_eq!(*calls.borrow(), 1);
}

// =============================================================================
// HINTS
// =============================================================================

#[test]
fn hint_joins_required_and_min() {
    let f = field(FieldProps {
        required: true,
        min: Some(3.0),
        ..Default::default()
    });
    assert_eq!(f.hint(), "required, at least 3 characters");
}

#[test]
fn explicit_tip_replaces_derived_hint() {
    let f = field(FieldProps {
        required: true,
        tip: Some("Your legal name".into()),
        ..Default::default()
    });
    assert_eq!(f.hint(), "Your legal name");
}

#[test]
fn hint_uses_injected_bundle() {
    let mut lang = Lang::default();
    lang.set("validation.hints.required", "obligatoire");
    let registry = ControlRegistry::new();
    register_builtin_controls(&registry);

    let f = FieldController::with_context(
        FieldProps {
            required: true,
            ..Default::default()
        },
        FormContext::new(registry, lang),
    );
    assert_eq!(f.hint(), "obligatoire");
}

// =============================================================================
// REGISTRY
// =============================================================================

#[test]
fn last_registration_wins() {
    const FIRST: MarkerTag = MarkerTag::new("first");
    const SECOND: MarkerTag = MarkerTag::new("second");

    let registry = ControlRegistry::new();
    registry.register("color", |_props: ControlProps| Element::new("first"), FIRST);
    registry.register_with(
        "color",
        |_props: ControlProps| Element::new("second"),
        SECOND,
        ValueType::Array,
    );

    let descriptor = registry.resolve("color").unwrap();
    assert_eq!(descriptor.marker(), SECOND);
    assert_eq!(descriptor.value_type(), ValueType::Array);
    assert_eq!(descriptor.render(ControlProps::default()).tag, "second");
}

#[test]
fn unregistered_type_renders_without_control() {
    let f = field(FieldProps {
        type_name: "date".into(),
        layout: Layout::Stacked,
        label: Some("Birthday".into()),
        ..Default::default()
    });

    let tree = f.render();
    assert!(f.reference().is_none());
    assert!(tree.find_reference().is_none());
    assert_eq!(f.get_value(None), FieldValue::Empty);
}

// =============================================================================
// VALUE ROUND-TRIP
// =============================================================================

#[test]
fn set_then_get_round_trips_through_text_input() {
    let f = field(FieldProps::typed("text"));
    f.render();

    f.set_value("hello");
    assert_eq!(f.get_value(None), FieldValue::from("hello"));

    let input = text_input(&f);
    let input = input.as_any().downcast_ref::<TextInput>().unwrap();
    assert_eq!(input.text(), "hello");
}

#[test]
fn set_then_get_round_trips_through_list_input() {
    let f = field(FieldProps::typed("tags"));
    f.render();

    f.set_value(vec!["rust", "forms"]);
    assert_eq!(f.get_value(None), FieldValue::from(vec!["rust", "forms"]));
    assert_eq!(f.get_value(Some(";")), FieldValue::from("rust;forms"));
}

#[test]
fn control_input_flows_back_into_field() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    let f = field(FieldProps {
        max: Some(3.0),
        on_change: Some(Rc::new(move |value: &FieldValue| {
            seen_clone.borrow_mut().push(value.clone());
        })),
        ..Default::default()
    });
    f.render();

    let control = text_input(&f);
    let input = control.as_any().downcast_ref::<TextInput>().unwrap();

    input.focus();
    assert!(f.is_focused());

    input.input("abcd");
    assert!(f.has_error());
    assert_eq!(f.value(), FieldValue::from("abcd"));

    input.input("abc");
    assert!(!f.has_error());

    input.blur();
    assert!(!f.is_focused());
    assert_eq!(
        *seen.borrow(),
        vec![FieldValue::from("abcd"), FieldValue::from("abc")]
    );
}

#[test]
fn list_toggle_validates_item_count() {
    let f = field(FieldProps {
        type_name: "checkbox-group".into(),
        max: Some(1.0),
        overrides: ControlOverrides {
            extra: json!({ "options": ["red", "green"] })
                .as_object()
                .cloned()
                .unwrap(),
            ..Default::default()
        },
        ..Default::default()
    });
    let tree = f.render();
    assert_eq!(tree.find_reference().unwrap().children.len(), 2);

    let control = f.reference().unwrap();
    let list = control.as_any().downcast_ref::<ListInput>().unwrap();
    list.toggle("red");
    assert!(!f.has_error());
    list.toggle("green");
    assert!(f.has_error());
    assert_eq!(f.failure().unwrap().kind(), "max.array");
}

// =============================================================================
// COMPOSITION
// =============================================================================

#[test]
fn nested_child_control_becomes_reference() {
    let input = Rc::new(TextInput::new("nested"));
    let markup = Element::new("div")
        .with_child(Element::new("span").with_text("Prefix"))
        .with_child(
            Element::new("div").with_child(Element::component(TextInput::MARKER, input.clone())),
        );

    let f = field(FieldProps {
        children: Some(vec![markup]),
        ..Default::default()
    });
    let tree = f.render();

    let reference = f.reference().unwrap();
    let bound = reference.as_any().downcast_ref::<TextInput>().unwrap();
    assert!(std::ptr::eq(bound, &*input));
    assert_eq!(f.get_value(None), FieldValue::from("nested"));

    let marked = tree.find_reference().unwrap();
    assert_eq!(marked.marker, Some(TextInput::MARKER));
    assert_eq!(marked.key.as_deref(), Some("0"));

    input.input("");
    assert!(f.validate(None));
    assert!(!f.has_value());
}

#[test]
fn only_first_matching_child_is_bound() {
    let first = Rc::new(TextInput::new("first"));
    let second = Rc::new(TextInput::new("second"));

    let f = field(FieldProps {
        children: Some(vec![
            Element::component(TextInput::MARKER, first.clone()),
            Element::component(TextInput::MARKER, second.clone()),
        ]),
        ..Default::default()
    });
    let tree = f.render();

    assert_eq!(f.get_value(None), FieldValue::from("first"));
    let marked: Vec<_> = tree
        .children
        .iter()
        .filter(|child| child.reference)
        .collect();
    assert_eq!(marked.len(), 1);
}

#[test]
fn declaration_from_json() {
    let props = FieldProps::from_json(
        r#"{
            "type": "integer",
            "label": "Age",
            "required": true,
            "min": 18,
            "layout": "stacked",
            "control": { "placeholder": "years" }
        }"#,
    )
    .unwrap();

    let f = field(props);
    assert_eq!(f.value_type(), ValueType::Number);
    assert_eq!(f.hint(), "required, a whole number, no less than 18");

    let tree = f.render();
    assert_eq!(tree.children[0].text.as_deref(), Some("Age"));
    assert!(!f.set_value("12"));
    assert_eq!(f.error_text(), "The value must be no less than 18");
}
