use super::*;

fn edge(node: &str, parents: &[&str]) -> Edge {
    Edge::new(node, parents.iter().map(|p| p.to_string()))
}

#[test]
fn test_merge_into_empty() {
    let merged = merge_edges(Vec::new(), vec![edge("b", &["a"])]);
    assert_eq!(merged, vec![edge("b", &["a"])]);
}

#[test]
fn test_merge_distinct_targets_keeps_order() {
    let merged = merge_edges(vec![edge("a", &["x"])], vec![edge("b", &["y"])]);
    assert_eq!(merged, vec![edge("a", &["x"]), edge("b", &["y"])]);
}

#[test]
fn test_merge_same_target_unions_parents() {
    let merged = merge_edges(
        vec![edge("t", &["s1", "s2"])],
        vec![edge("t", &["s2", "s3"])],
    );
    assert_eq!(merged, vec![edge("t", &["s1", "s2", "s3"])]);
}

#[test]
fn test_merge_never_drops_earlier_parent_set() {
    // A <- x, B <- y, then B <- A
    let mut lineage = vec![edge("A", &["x"])];
    lineage = merge_edges(lineage, vec![edge("B", &["y"])]);
    lineage = merge_edges(lineage, vec![edge("B", &["A"])]);

    assert_eq!(lineage.len(), 2);
    assert_eq!(lineage[0], edge("A", &["x"]));
    assert_eq!(lineage[1], edge("B", &["y", "A"]));
}

#[test]
fn test_merge_root_then_parented_edge() {
    let merged = merge_edges(vec![edge("t", &[])], vec![edge("t", &["s"])]);
    assert_eq!(merged, vec![edge("t", &["s"])]);
    assert!(!merged[0].is_root());
}

#[test]
fn test_merge_dedupes_within_left() {
    let merged = merge_edges(vec![edge("t", &["a"]), edge("t", &["a", "b"])], Vec::new());
    assert_eq!(merged, vec![edge("t", &["a", "b"])]);
}

#[test]
fn test_edge_serializes_with_plain_keys() {
    let json = serde_json::to_value(edge("out.csv", &["dbo.t1"])).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "node_name": "out.csv", "parent_nodes": ["dbo.t1"] })
    );
}

#[test]
fn test_graph_ancestors_follow_chains() {
    let edges = merge_edges(
        vec![edge("stage", &["src_a", "src_b"])],
        vec![edge("mart", &["stage"])],
    );
    let graph = LineageGraph::from_edges(&edges);

    let ancestors: Vec<String> = graph.ancestors("mart").into_iter().collect();
    assert_eq!(ancestors, vec!["src_a", "src_b", "stage"]);
    assert!(graph.ancestors("src_a").is_empty());
    assert!(graph.ancestors("missing").is_empty());
}

#[test]
fn test_graph_ancestors_exclude_self_on_cycle() {
    let graph = LineageGraph::from_edges(&[edge("a", &["b"]), edge("b", &["a"])]);
    let ancestors: Vec<String> = graph.ancestors("a").into_iter().collect();
    assert_eq!(ancestors, vec!["b"]);
}

#[test]
fn test_fold_transitive_appends_indirect_ancestors() {
    let edges = vec![
        edge("stage", &["src_b", "src_a"]),
        edge("mart", &["stage"]),
        edge("report", &["mart", "lookup"]),
    ];
    let folded = fold_transitive(&edges);

    assert_eq!(folded[0], edge("stage", &["src_b", "src_a"]));
    assert_eq!(folded[1], edge("mart", &["stage", "src_a", "src_b"]));
    assert_eq!(
        folded[2],
        edge("report", &["mart", "lookup", "src_a", "src_b", "stage"])
    );
}

#[test]
fn test_fold_transitive_leaves_unchained_edges_alone() {
    let edges = vec![edge("t1", &["s1"]), edge("t2", &["s2"]), edge("root", &[])];
    assert_eq!(fold_transitive(&edges), edges);
}
