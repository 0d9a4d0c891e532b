//! Property tests for the concept store and path finder.
//!
//! Each property runs over randomly generated teaching sequences: a handful
//! of concept names drawn from a small alphabet so that collisions (upserts
//! of an existing name) and dense edge sets actually occur.

use concept_graph::{ConceptStore, GraphError};
use proptest::prelude::*;

const NAMES: &[&str] = &["Democracy", "Freedom", "Voting", "Equality", "Market", "State"];
const LABELS: &[&str] = &["requires", "enables", "limits"];

fn arb_name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NAMES)
}

fn arb_label() -> impl Strategy<Value = &'static str> {
    prop::sample::select(LABELS)
}

/// A store built from random upserts followed by random connects between
/// names that were taught.
fn arb_store() -> impl Strategy<Value = ConceptStore> {
    (
        prop::collection::vec((arb_name(), "[a-z]{1,8}", "[a-z ]{0,20}"), 1..12),
        prop::collection::vec((arb_name(), arb_name(), arb_label()), 0..20),
    )
        .prop_map(|(concepts, edges)| {
            let mut store = ConceptStore::new();
            for (name, category, definition) in concepts {
                store.upsert_concept(name, category, definition);
            }
            for (source, target, label) in edges {
                // Edges to untaught names are rejected; that is fine here.
                let _ = store.connect(source, target, label);
            }
            store
        })
}

proptest! {
    #[test]
    fn upsert_then_lookup_returns_latest(
        mut store in arb_store(),
        name in arb_name(),
        category in "[a-z]{1,8}",
        definition in "[a-z ]{1,20}",
    ) {
        store.upsert_concept(name, category.clone(), definition.clone());

        let concept = store.lookup(name).unwrap();
        prop_assert_eq!(&concept.category, &category);
        let expected = (!definition.is_empty()).then_some(definition);
        prop_assert_eq!(&concept.definition, &expected);
    }

    #[test]
    fn path_to_self_is_zero_hops(store in arb_store()) {
        let names: Vec<String> = store.names().map(str::to_string).collect();
        for name in names {
            let path = store.find_path(&name, &name).unwrap();
            prop_assert_eq!(path.steps.len(), 1);
            prop_assert_eq!(path.hop_count(), 0);
        }
    }

    #[test]
    fn direct_edge_is_single_step(mut store in arb_store(), label in arb_label()) {
        let names: Vec<String> = store.names().map(str::to_string).collect();
        let source = &names[0];
        let target = names.last().unwrap();
        prop_assume!(source != target);

        store.connect(source, target, label).unwrap();

        let path = store.find_path(source, target).unwrap();
        prop_assert_eq!(path.hop_count(), 1);
        prop_assert_eq!(path.steps.len(), 1);
        prop_assert_eq!(path.steps[0].concept.as_str(), source.as_str());
        prop_assert_eq!(path.steps[0].target.as_deref(), Some(target.as_str()));
    }

    #[test]
    fn connect_to_missing_concept_never_mutates(
        mut store in arb_store(),
        label in arb_label(),
    ) {
        let before = store.export();
        let existing = store.names().next().unwrap().to_string();

        let err = store.connect(&existing, "Nowhere", label).unwrap_err();
        let is_missing = matches!(err, GraphError::MissingConcept { .. });
        prop_assert!(is_missing);
        let err = store.connect("Nowhere", &existing, label).unwrap_err();
        let is_missing = matches!(err, GraphError::MissingConcept { .. });
        prop_assert!(is_missing);

        prop_assert_eq!(store.export(), before);
    }

    #[test]
    fn export_import_round_trip(store in arb_store()) {
        let restored = ConceptStore::import(store.export()).unwrap();

        prop_assert_eq!(restored.export(), store.export());
        prop_assert_eq!(restored.relation_count(), store.relation_count());
    }
}
