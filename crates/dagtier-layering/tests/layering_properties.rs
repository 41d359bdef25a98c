//! Property tests: every layering of every generated DAG satisfies the width,
//! precedence, partition and no-gap invariants.

use dagtier_core::{Dag, GraphView};
use dagtier_layering::CoffmanGraham;
use proptest::prelude::*;

#[path = "../../dagtier-core/tests/generators.rs"]
mod generators;
use generators::*;

/// Phase-1 labelling computed the slow way: at each step scan every
/// unlabelled element whose predecessors are all labelled and take the one
/// with the smallest descending predecessor-label list, earliest insertion
/// first on ties.
fn naive_label_order(dag: &Dag<u32>) -> Vec<u32> {
    let elements: Vec<u32> = dag.elements().copied().collect();
    let mut label: Vec<Option<usize>> = vec![None; elements.len()];
    let position = |e: &u32| elements.iter().position(|x| x == e).expect("member");
    let mut order = Vec::with_capacity(elements.len());

    while order.len() < elements.len() {
        let mut best: Option<(Vec<usize>, usize)> = None;
        for (pos, element) in elements.iter().enumerate() {
            if label[pos].is_some() {
                continue;
            }
            let preds: Option<Vec<usize>> = dag
                .direct_predecessors_of(element)
                .expect("member")
                .into_iter()
                .map(|p| label[position(p)])
                .collect();
            let Some(mut preds) = preds else {
                continue;
            };
            preds.sort_unstable_by(|a, b| b.cmp(a));
            let key = (preds, pos);
            if best.as_ref().is_none_or(|current| key < *current) {
                best = Some(key);
            }
        }
        let (_, pos) = best.expect("acyclic input always has an eligible element");
        order.push(elements[pos]);
        label[pos] = Some(order.len());
    }

    order
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn layering_satisfies_invariants(spec in arb_dag(30, 0.15), width in 1usize..8) {
        let dag = spec.dag();
        let layering = CoffmanGraham::solver_for_arbitrary_graphs(width)
            .expect("positive width")
            .solve(&dag)
            .expect("acyclic input");

        prop_assert_eq!(layering.verify(&dag, width), Ok(()));
        prop_assert_eq!(layering.element_count(), dag.count());
        prop_assert!(layering.max_layer_width() <= width);
    }

    #[test]
    fn labels_are_a_topological_bijection(spec in arb_dag(30, 0.2)) {
        let dag = spec.dag();
        let labels = CoffmanGraham::priority_labels(&dag).expect("acyclic input");

        prop_assert_eq!(labels.len(), dag.count());
        let mut seen: Vec<usize> = dag
            .elements()
            .map(|e| labels.label_of(e).expect("labelled"))
            .collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (1..=dag.count()).collect::<Vec<_>>());

        for (from, to) in dag.arrows() {
            prop_assert!(labels.label_of(from) < labels.label_of(to));
        }
    }

    #[test]
    fn labels_match_naive_labelling(spec in arb_dag(20, 0.25)) {
        let dag = spec.dag();
        let labels = CoffmanGraham::priority_labels(&dag).expect("acyclic input");
        prop_assert_eq!(labels.in_label_order().to_vec(), naive_label_order(&dag));
    }

    #[test]
    fn unbounded_width_gives_longest_path_layering(spec in arb_dag(25, 0.2)) {
        // With room for everything, each element lands one below its deepest
        // predecessor.
        let dag = spec.dag();
        let layering = CoffmanGraham::solver_for_arbitrary_graphs(dag.count().max(1))
            .expect("positive width")
            .solve(&dag)
            .expect("acyclic input");

        for element in dag.elements() {
            let expected = dag
                .direct_predecessors_of(element)
                .expect("member")
                .into_iter()
                .filter_map(|p| layering.layer_of(p))
                .max()
                .map_or(0, |deepest| deepest + 1);
            prop_assert_eq!(layering.layer_of(element), Some(expected));
        }
    }

    #[test]
    fn width_one_gives_one_layer_per_element(spec in arb_dag(20, 0.2)) {
        let dag = spec.dag();
        let layering = CoffmanGraham::solver_for_arbitrary_graphs(1)
            .expect("positive width")
            .solve(&dag)
            .expect("acyclic input");
        prop_assert_eq!(layering.len(), dag.count());
    }

    #[test]
    fn layering_of_reduction_is_valid_for_original(spec in arb_dag(20, 0.3), width in 1usize..5) {
        let dag = spec.dag();
        let solver = CoffmanGraham::solver_for_arbitrary_graphs(width).expect("positive width");
        let reduced = dag.transitive_reduction();
        let layering = solver.solve(&reduced).expect("acyclic input");
        prop_assert_eq!(layering.verify(&dag, width), Ok(()));
    }
}
