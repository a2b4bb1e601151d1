//! Integration tests for the JSON parse boundary.

use flowcheck::error::ErrorCode;
use flowcheck::parse;

const CANVAS_JSON: &str = r#"{
  "nodes": [
    {
      "id": "t",
      "type": "webhook",
      "position": { "x": 0, "y": 0 },
      "data": {
        "type": "webhook",
        "label": "Incoming webhook",
        "category": "triggers",
        "config": { "path": "/hooks/new-lead" }
      }
    },
    {
      "id": "cond",
      "type": "if_else",
      "position": { "x": 250, "y": 0 },
      "data": {
        "type": "if_else",
        "label": "Check score",
        "category": "logic",
        "config": { "condition": "score > 50" }
      }
    }
  ],
  "edges": [
    {
      "id": "e1",
      "source": "t",
      "target": "cond",
      "sourceHandle": null,
      "targetHandle": null
    }
  ]
}"#;

#[test]
fn parses_canvas_json() {
    let wf = parse::parse(CANVAS_JSON).expect("should parse");
    assert_eq!(wf.nodes.len(), 2);
    assert_eq!(wf.edges.len(), 1);
    assert_eq!(wf.nodes[0].kind(), "webhook");
    assert!(wf.nodes[0].category_is_trigger());
    assert_eq!(wf.nodes[1].data.config["condition"], "score > 50");
    assert_eq!(wf.edges[0].source_handle, None);
}

#[test]
fn camel_case_handles_round_trip() {
    let mut wf = parse::parse(CANVAS_JSON).expect("should parse");
    wf.edges[0].source_handle = Some("true".into());
    let json = serde_json::to_value(&wf).expect("serialize");
    assert_eq!(json["edges"][0]["sourceHandle"], "true");
}

#[test]
fn minimal_node_data_defaults_apply() {
    let json = r#"{
      "nodes": [
        {
          "id": "a",
          "type": "log",
          "position": { "x": 0, "y": 0 },
          "data": { "type": "log" }
        }
      ],
      "edges": []
    }"#;
    let wf = parse::parse(json).expect("should parse");
    assert_eq!(wf.nodes[0].data.label, "");
    assert_eq!(wf.nodes[0].data.category, None);
    assert!(wf.nodes[0].data.config.is_empty());
}

#[test]
fn malformed_json_yields_invalid_json_code() {
    let errors = parse::parse("{ nodes: oops").expect_err("should fail");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::InvalidJson);
}

#[test]
fn graph_build_skips_dangling_edges() {
    let (_, graph) = parse::parse_and_build(CANVAS_JSON).expect("should parse");
    assert_eq!(graph.outgoing_count("t"), 1);
    assert_eq!(graph.incoming_count("cond"), 1);

    let json = r#"{
      "nodes": [
        { "id": "a", "type": "log", "position": { "x": 0, "y": 0 },
          "data": { "type": "log" } }
      ],
      "edges": [ { "id": "e1", "source": "a", "target": "ghost" } ]
    }"#;
    let (_, graph) = parse::parse_and_build(json).expect("dangling edge is not a parse failure");
    assert_eq!(graph.outgoing_count("a"), 0);
    assert_eq!(graph.node_indices.len(), 1);
}
