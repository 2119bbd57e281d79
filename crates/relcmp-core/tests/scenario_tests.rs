//! # Scenario Tests
//!
//! Record lists as an item page receives them, compared by id, by name,
//! as full objects and as primitives.

use relcmp_core::{KeyPath, Value, compare_arrays_using, compare_arrays_using_ids};

// =============================================================================
// FIXTURES
// =============================================================================

fn parse(json: &str) -> Vec<Value> {
    serde_json::from_str(json).expect("fixture is valid JSON")
}

fn base() -> Vec<Value> {
    parse(
        r#"[
            {"id": 1, "name": "test"},
            {"id": 2, "name": "another test"},
            {"id": 3, "name": "one last test"}
        ]"#,
    )
}

fn with_wrong_id() -> Vec<Value> {
    parse(
        r#"[
            {"id": 1, "name": "test"},
            {"id": 5, "name": "another test"},
            {"id": 3, "name": "one last test"}
        ]"#,
    )
}

fn with_wrong_name() -> Vec<Value> {
    parse(
        r#"[
            {"id": 1, "name": "test"},
            {"id": 2, "name": "wrong test"},
            {"id": 3, "name": "one last test"}
        ]"#,
    )
}

fn with_different_order() -> Vec<Value> {
    let base = base();
    vec![base[0].clone(), base[2].clone(), base[1].clone()]
}

fn with_one_more() -> Vec<Value> {
    let mut list = base();
    list.push(Value::object([
        ("id", Value::from(4)),
        ("name", Value::from("fourth test")),
    ]));
    list
}

fn with_added_properties() -> Vec<Value> {
    parse(
        r#"[
            {"id": 1, "name": "test", "extra": "extra property"},
            {"id": 2, "name": "another test", "extra": "extra property"},
            {"id": 3, "name": "one last test", "extra": "extra property"}
        ]"#,
    )
}

fn field(name: &str) -> impl Fn(&Value) -> Option<Value> {
    let path = KeyPath::parse(name).expect("valid path");
    move |record: &Value| path.select(record).cloned()
}

// =============================================================================
// BY ID
// =============================================================================

mod by_id {
    use super::*;

    #[test]
    fn same_list() {
        let compare = compare_arrays_using(field("id"));
        assert!(compare(&base(), &base()));
    }

    #[test]
    fn regardless_of_order() {
        let compare = compare_arrays_using(field("id"));
        assert!(compare(&base(), &with_different_order()));
    }

    #[test]
    fn regardless_of_other_properties() {
        let compare = compare_arrays_using(field("id"));
        assert!(compare(&base(), &with_wrong_name()));
    }

    #[test]
    fn regardless_of_extra_properties() {
        let compare = compare_arrays_using(field("id"));
        assert!(compare(&base(), &with_added_properties()));
    }

    #[test]
    fn ids_do_not_match() {
        let compare = compare_arrays_using(field("id"));
        assert!(!compare(&base(), &with_wrong_id()));
    }

    #[test]
    fn sizes_do_not_match() {
        let compare = compare_arrays_using(field("id"));
        assert!(!compare(&base(), &with_one_more()));
    }
}

// =============================================================================
// BY NAME
// =============================================================================

mod by_name {
    use super::*;

    #[test]
    fn same_list() {
        let compare = compare_arrays_using(field("name"));
        assert!(compare(&base(), &base()));
    }

    #[test]
    fn regardless_of_order() {
        let compare = compare_arrays_using(field("name"));
        assert!(compare(&base(), &with_different_order()));
    }

    #[test]
    fn regardless_of_other_properties() {
        let compare = compare_arrays_using(field("name"));
        assert!(compare(&base(), &with_wrong_id()));
    }

    #[test]
    fn regardless_of_extra_properties() {
        let compare = compare_arrays_using(field("name"));
        assert!(compare(&base(), &with_added_properties()));
    }

    #[test]
    fn names_do_not_match() {
        let compare = compare_arrays_using(field("name"));
        assert!(!compare(&base(), &with_wrong_name()));
    }

    #[test]
    fn sizes_do_not_match() {
        let compare = compare_arrays_using(field("name"));
        assert!(!compare(&base(), &with_one_more()));
    }
}

// =============================================================================
// BY FULL OBJECT
// =============================================================================

mod by_full_object {
    use super::*;

    fn whole(record: &Value) -> Value {
        record.clone()
    }

    #[test]
    fn same_list() {
        let compare = compare_arrays_using(whole);
        assert!(compare(&base(), &base()));
    }

    #[test]
    fn regardless_of_order() {
        let compare = compare_arrays_using(whole);
        assert!(compare(&base(), &with_different_order()));
    }

    #[test]
    fn extra_properties_break_equality() {
        let compare = compare_arrays_using(whole);
        assert!(!compare(&base(), &with_added_properties()));
    }

    #[test]
    fn ids_do_not_match() {
        let compare = compare_arrays_using(whole);
        assert!(!compare(&base(), &with_wrong_id()));
    }

    #[test]
    fn names_do_not_match() {
        let compare = compare_arrays_using(whole);
        assert!(!compare(&base(), &with_wrong_name()));
    }

    #[test]
    fn sizes_do_not_match() {
        let compare = compare_arrays_using(whole);
        assert!(!compare(&base(), &with_one_more()));
    }
}

// =============================================================================
// PRIMITIVES
// =============================================================================

mod primitives {
    use super::*;

    const PRIMITIVES: [i64; 4] = [1, 2, 3, 4];

    #[test]
    fn same_list() {
        let compare = compare_arrays_using(|n: &i64| *n);
        assert!(compare(&PRIMITIVES, &PRIMITIVES));
    }

    #[test]
    fn regardless_of_order() {
        let compare = compare_arrays_using(|n: &i64| *n);
        assert!(compare(&PRIMITIVES, &[1, 3, 2, 4]));
    }

    #[test]
    fn one_element_wrong() {
        let compare = compare_arrays_using(|n: &i64| *n);
        assert!(!compare(&PRIMITIVES, &[1, 5, 3, 4]));
    }

    #[test]
    fn sizes_do_not_match() {
        let compare = compare_arrays_using(|n: &i64| *n);
        assert!(!compare(&PRIMITIVES, &[1, 2, 3, 4, 5]));
    }

    #[test]
    fn structural_primitives_behave_the_same() {
        let compare = compare_arrays_using(|v: &Value| v.clone());
        let values: Vec<Value> = PRIMITIVES.iter().map(|&n| Value::from(n)).collect();
        let reordered: Vec<Value> = [1, 3, 2, 4].into_iter().map(Value::from).collect();
        let floats: Vec<Value> = [4.0, 3.0, 2.0, 1.0].into_iter().map(Value::from).collect();

        assert!(compare(&values, &reordered));
        assert!(compare(&values, &floats));
    }
}

// =============================================================================
// BY IDS
// =============================================================================

mod by_ids {
    use super::*;

    #[test]
    fn same_list() {
        let compare = compare_arrays_using_ids::<Value>();
        assert!(compare(&base(), &base()));
    }

    #[test]
    fn regardless_of_order() {
        let compare = compare_arrays_using_ids::<Value>();
        assert!(compare(&base(), &with_different_order()));
    }

    #[test]
    fn regardless_of_other_properties() {
        let compare = compare_arrays_using_ids::<Value>();
        assert!(compare(&base(), &with_wrong_name()));
    }

    #[test]
    fn regardless_of_extra_properties() {
        let compare = compare_arrays_using_ids::<Value>();
        assert!(compare(&base(), &with_added_properties()));
    }

    #[test]
    fn ids_do_not_match() {
        let compare = compare_arrays_using_ids::<Value>();
        assert!(!compare(&base(), &with_wrong_id()));
    }

    #[test]
    fn sizes_do_not_match() {
        let compare = compare_arrays_using_ids::<Value>();
        assert!(!compare(&base(), &with_one_more()));
    }

    #[test]
    fn records_without_id_match_each_other() {
        let compare = compare_arrays_using_ids::<Value>();
        let anonymous = parse(r#"[{"name": "a"}, {"id": 1}]"#);
        let other = parse(r#"[{"id": 1}, {"name": "b"}]"#);
        let identified = parse(r#"[{"id": 2}, {"id": 1}]"#);

        assert!(compare(&anonymous, &other));
        assert!(!compare(&anonymous, &identified));
    }
}

// =============================================================================
// COMPOSITE KEYS
// =============================================================================

mod composite_keys {
    use super::*;

    fn relationships(json: &str) -> Vec<Value> {
        parse(json)
    }

    #[test]
    fn nested_key_object() {
        let compare = compare_arrays_using(field("left"));
        let shown = relationships(
            r#"[
                {"id": 1, "left": {"id": "a", "type": "Publication"}},
                {"id": 2, "left": {"id": "b", "type": "Person"}}
            ]"#,
        );
        let fresh = relationships(
            r#"[
                {"id": 9, "left": {"id": "b", "type": "Person"}},
                {"id": 8, "left": {"id": "a", "type": "Publication"}}
            ]"#,
        );
        let widened = relationships(
            r#"[
                {"id": 1, "left": {"id": "a", "type": "Publication", "place": 0}},
                {"id": 2, "left": {"id": "b", "type": "Person"}}
            ]"#,
        );

        assert!(compare(&shown, &fresh));
        // The extractor selected the whole "left" object, so its extra
        // property counts.
        assert!(!compare(&shown, &widened));
    }

    #[test]
    fn tuple_of_fields() {
        let left_id = field("left.id");
        let kind = field("type");
        let compare = compare_arrays_using(move |r: &Value| (left_id(r), kind(r)));

        let shown = relationships(
            r#"[{"left": {"id": "a"}, "type": "author"}, {"left": {"id": "a"}, "type": "editor"}]"#,
        );
        let swapped = relationships(
            r#"[{"left": {"id": "a"}, "type": "editor"}, {"left": {"id": "a"}, "type": "author"}]"#,
        );
        let doubled = relationships(
            r#"[{"left": {"id": "a"}, "type": "author"}, {"left": {"id": "a"}, "type": "author"}]"#,
        );

        assert!(compare(&shown, &swapped));
        assert!(!compare(&shown, &doubled));
    }
}
