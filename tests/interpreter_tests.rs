// Integration tests for step views built from whole trace documents

use algotracer::analyzer::{Analyzer, RecordedTrace};
use algotracer::interpreter::{active_line, Shape, StepView, ViewOptions};
use algotracer::trace::{Category, TraceDocument};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join(name)
}

fn load_demo(name: &str) -> TraceDocument {
    let response = RecordedTrace::new(demo(name))
        .analyze("")
        .expect("demo trace should be readable");
    TraceDocument::parse_response(&response).expect("demo trace should parse")
}

#[test]
fn test_index_variables_point_into_the_array() {
    let document = load_demo("bubble_sort.trace.json");

    // arr = [3, 5, 8, 1] with i = 0, j = 1
    let view = StepView::build(&document, 7).expect("step 8 exists");
    assert_eq!(view.arrays.len(), 1);

    let arr = &view.arrays[0];
    assert_eq!(arr.name, "arr");
    assert_eq!(arr.highlighted, vec![0, 1]);

    let highlighted: Vec<bool> = arr.cells.iter().map(|c| c.highlighted).collect();
    assert_eq!(highlighted, vec![true, true, false, false]);

    let labels: Vec<Vec<String>> = arr.cells.iter().map(|c| c.pointers.clone()).collect();
    assert_eq!(
        labels,
        vec![
            vec!["i".to_string()],
            vec!["j".to_string()],
            Vec::new(),
            Vec::new()
        ]
    );
}

#[test]
fn test_literal_array_scenario() {
    let document = TraceDocument::parse_response(
        r#"{
            "steps": [{
                "line": 3,
                "action": "compare",
                "state": {
                    "variables": {"arr": [5, 3, 8, 1], "i": 0, "j": 1},
                    "dataStructures": {"arrays": {"arr": [5, 3, 8, 1]}}
                }
            }]
        }"#,
    )
    .expect("document should parse");

    let view = StepView::build(&document, 0).expect("step exists");
    let arr = &view.arrays[0];
    assert_eq!(arr.highlighted, vec![0, 1]);
    assert_eq!(arr.cells[0].pointers, vec!["i".to_string()]);
    assert_eq!(arr.cells[1].pointers, vec!["j".to_string()]);
    assert_eq!(arr.length_label(), "Array[4]");

    // The array is shown only as an array, never as a variable
    assert!(!view.variables.contains("arr"));
    let primitive: Vec<&str> = view
        .variables
        .primitive
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(primitive, vec!["i", "j"]);
}

#[test]
fn test_pointer_inference_can_be_disabled() {
    let document = load_demo("bubble_sort.trace.json");
    let view = StepView::build_with(
        &document,
        7,
        ViewOptions {
            pointer_inference: false,
        },
    )
    .expect("step exists");

    let arr = &view.arrays[0];
    assert!(arr.highlighted.is_empty());
    assert!(arr.cells.iter().all(|c| !c.highlighted && c.pointers.is_empty()));
    // Classification is unaffected
    assert_eq!(arr.cells[1].shape, Shape::Leaf("5".to_string()));
}

#[test]
fn test_fenced_tree_trace() {
    let document = load_demo("tree_inorder.trace.md");
    assert_eq!(document.len(), 4);
    assert_eq!(document.language, "Python");

    let view = StepView::build(&document, 0).expect("first step exists");
    assert_eq!(view.action, "call");
    assert_eq!(view.position_label(), "Step 1 / 4");
    assert_eq!(view.active_frame, "inorder");
    assert_eq!(view.complexity.time, "O(n)");
    assert_eq!(view.complexity.space, "O(h)");

    // `out` is an array; `node` is an object
    let composite: Vec<&str> = view
        .variables
        .composite
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(composite, vec!["node"]);
    assert!(view.variables.primitive.is_empty());
    assert!(view.arrays[0].is_empty());

    let categories: Vec<Category> = view.structures.iter().map(|g| g.category).collect();
    assert_eq!(categories, vec![Category::Trees, Category::Stacks]);
    assert_eq!(view.structures[0].items[0].name, "Tree 1");
    assert_eq!(view.structures[1].items[0].name, "Stack 1");
}

#[test]
fn test_nested_tree_collapses_past_the_depth_limit() {
    let document = TraceDocument::parse_response(
        r#"{"steps": [{"line": 1, "state": {"variables": {
            "root": {"left": {"left": {"left": {"val": 1}}}}
        }}}]}"#,
    )
    .expect("document should parse");

    let view = StepView::build(&document, 0).expect("step exists");
    let root = &view.variables.composite[0].shape;

    let Shape::Composite(level0) = root else {
        panic!("root should be composite: {:?}", root);
    };
    let Shape::Composite(level1) = &level0[0].1 else {
        panic!("level 1 should be composite");
    };
    let Shape::Composite(level2) = &level1[0].1 else {
        panic!("level 2 should be composite");
    };
    assert_eq!(level2[0].1, Shape::Opaque);
}

#[test]
fn test_out_of_range_line_has_no_active_line() {
    let document = load_demo("tree_inorder.trace.md");
    let source = fs::read_to_string(demo("tree_inorder.py")).expect("demo source exists");
    let line_count = source.lines().count();

    let first = StepView::build(&document, 0).expect("first step exists");
    assert_eq!(first.active_line(line_count), Some(7));

    let last = StepView::build(&document, 3).expect("last step exists");
    assert_eq!(last.line, 999);
    assert_eq!(last.active_line(line_count), None);
    assert_eq!(active_line(999, 12), None);
    assert_eq!(active_line(0, 12), None);
}

#[test]
fn test_every_step_of_the_demo_builds() {
    let document = load_demo("bubble_sort.trace.json");
    for index in 0..document.len() {
        let view = StepView::build(&document, index).expect("step exists");
        assert_eq!(view.total, 29);
        assert!(view.progress() > 0.0 && view.progress() <= 1.0);
    }
    assert!(StepView::build(&document, document.len()).is_none());
}
