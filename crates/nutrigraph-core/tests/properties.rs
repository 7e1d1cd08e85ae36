use nutrigraph_core::prelude::*;
use proptest::prelude::*;
use std::collections::HashSet;

const FOOD_GROUPS: &[&str] = &["Fruits", "Grains", "Nuts"];
const BIO_GROUPS: &[&str] = &["Lipids", "Metabolic"];

/// Random bipartite graphs. Link endpoints occasionally point at ids that
/// do not exist, to exercise dangling-reference handling.
fn arb_graph() -> impl Strategy<Value = GraphData> {
    (1usize..6, 1usize..6).prop_flat_map(|(foods, markers)| {
        let food_groups = prop::collection::vec(0..FOOD_GROUPS.len(), foods);
        let bio_groups = prop::collection::vec(0..BIO_GROUPS.len(), markers);
        let links = prop::collection::vec(
            (0..foods + 1, 0..markers + 1, any::<bool>(), 0u8..4, 0usize..4),
            0..20,
        );
        (food_groups, bio_groups, links).prop_map(move |(fg, bg, links)| {
            let mut nodes = Vec::new();
            for (i, g) in fg.iter().enumerate() {
                let (id, label) = (format!("f{i}"), format!("Food {i}"));
                nodes.push(Node::new(&id, &label, NodeType::Food, FOOD_GROUPS[*g]));
            }
            for (i, g) in bg.iter().enumerate() {
                let (id, label) = (format!("b{i}"), format!("Marker {i}"));
                nodes.push(Node::new(&id, &label, NodeType::Biomarker, BIO_GROUPS[*g]));
            }
            let links = links
                .into_iter()
                .map(|(f, b, up, s, cites)| {
                    let effect = if up { Effect::Increase } else { Effect::Decrease };
                    let strength = match s {
                        0 => Strength::High,
                        1 => Strength::Medium,
                        2 => Strength::Low,
                        _ => Strength::Other("anecdotal".into()),
                    };
                    let citations = (0..cites)
                        .map(|c| Citation {
                            title: format!("paper {c}"),
                            year: 2000 + c as i32,
                            doi: String::new(),
                            kind: "RCT".into(),
                        })
                        .collect();
                    // Index == count means "points at a node that does not exist".
                    Link::new(&format!("f{f}"), &format!("b{b}"), effect, strength)
                        .with_citations(citations)
                })
                .collect();
            GraphData::new(nodes, links)
        })
    })
}

fn arb_filter() -> impl Strategy<Value = SubgraphFilter> {
    let types = prop_oneof![
        Just(TypeFilter::All),
        Just(TypeFilter::Food),
        Just(TypeFilter::Biomarker)
    ];
    let groups = prop_oneof![
        Just(None),
        Just(Some("Fruits".to_string())),
        Just(Some("Grains".to_string())),
        Just(Some("Lipids".to_string())),
        Just(Some("Nowhere".to_string())),
    ];
    (types, groups).prop_map(|(t, g)| SubgraphFilter::new(t, g))
}

fn arb_query(markers: usize) -> impl Strategy<Value = RecommendQuery> {
    prop::collection::vec((0..markers + 1, any::<bool>()), 0..5).prop_map(|picks| {
        picks.into_iter().fold(RecommendQuery::new(), |q, (b, up)| {
            let dir = if up { Direction::Increase } else { Direction::Decrease };
            q.target(format!("b{b}"), dir)
        })
    })
}

proptest! {
    #[test]
    fn neighbor_sets_are_symmetric(graph in arb_graph()) {
        let store = GraphStore::new(graph);
        let index = ConnectivityIndex::build(&store);
        for link in store.resolved_links() {
            prop_assert!(index.neighbors_of(link.source.as_str()).contains(link.target.as_str()));
            prop_assert!(index.neighbors_of(link.target.as_str()).contains(link.source.as_str()));
        }
    }

    #[test]
    fn dangling_ids_never_appear(graph in arb_graph(), filter in arb_filter()) {
        let store = GraphStore::new(graph.clone());
        let index = ConnectivityIndex::build(&store);
        let known: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();

        for node in &graph.nodes {
            for id in index.neighbors_of(node.id.as_str()) {
                prop_assert!(known.contains(id.as_str()));
            }
        }
        let view = filter_subgraph(&graph, &filter);
        for link in &view.links {
            prop_assert!(
                known.contains(link.source.as_str()) && known.contains(link.target.as_str())
            );
        }
    }

    #[test]
    fn filtering_is_idempotent(graph in arb_graph(), filter in arb_filter()) {
        let once = filter_subgraph(&graph, &filter);
        let twice = filter_subgraph(&once, &filter);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_keeps_every_primary_node(graph in arb_graph(), filter in arb_filter()) {
        let view = filter_subgraph(&graph, &filter);
        let visible: HashSet<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        for node in graph.nodes.iter().filter(|n| filter.matches(n)) {
            prop_assert!(visible.contains(node.id.as_str()));
        }
    }

    #[test]
    fn coverage_and_partition_bounds(
        (graph, query) in arb_graph().prop_flat_map(|g| {
            let markers = g.nodes.iter().filter(|n| n.is_biomarker()).count();
            (Just(g), arb_query(markers))
        })
    ) {
        let store = GraphStore::new(graph);
        let targets: Vec<String> = query
            .unique_targets()
            .into_iter()
            .map(|t| t.to_string())
            .collect();
        let set = recommend(&store, &query);

        for rec in set.recommendations.iter().chain(set.foods_to_limit.iter()) {
            prop_assert!(rec.coverage_pct <= 100);
            let linked_all = targets
                .iter()
                .all(|t| rec.matches.iter().any(|m| m.biomarker_id.as_str() == t.as_str()));
            prop_assert_eq!(rec.coverage_pct == 100, linked_all);
        }
        for rec in &set.recommendations {
            prop_assert!(rec.final_score > 0.0);
        }
        for rec in &set.foods_to_limit {
            prop_assert!(rec.final_score <= 0.0);
            prop_assert!(rec.conflict_count > 0);
        }
        prop_assert!(set.foods_to_limit.len() <= 6);
    }
}
