#![allow(dead_code)]

use dagtier_core::{Dag, GraphBuilder};

#[derive(Clone, Copy, Debug)]
pub struct BenchmarkTier {
    pub name: &'static str,
    pub element_count: u32,
    /// Out of 1000: chance that a forward pair within `span` gets an arrow.
    pub arrow_per_mille: u64,
    /// Arrows only connect elements at most this far apart in creation order.
    pub span: u32,
}

pub const TIER_S: BenchmarkTier = BenchmarkTier {
    name: "S",
    element_count: 100,
    arrow_per_mille: 150,
    span: 20,
};

pub const TIER_M: BenchmarkTier = BenchmarkTier {
    name: "M",
    element_count: 400,
    arrow_per_mille: 80,
    span: 40,
};

pub const TIER_L: BenchmarkTier = BenchmarkTier {
    name: "L",
    element_count: 1_500,
    arrow_per_mille: 40,
    span: 60,
};

pub const TIERS: [BenchmarkTier; 3] = [TIER_S, TIER_M, TIER_L];

#[derive(Clone, Copy, Debug)]
struct Prng(u64);

impl Prng {
    const fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // 64-bit LCG constants from Numerical Recipes.
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0
    }

    fn chance(&mut self, numerator: u64, denominator: u64) -> bool {
        debug_assert!(numerator <= denominator);
        self.next_u64() % denominator < numerator
    }
}

/// A random task-graph-shaped DAG: arrows only run forward, between elements
/// created close together, so the result looks like a build pipeline rather
/// than a dense tangle.
pub fn generate_dag(tier: BenchmarkTier, seed: u64) -> Dag<u32> {
    let mut prng = Prng::new(seed);
    let mut builder = GraphBuilder::with_capacity(tier.element_count as usize);
    for element in 0..tier.element_count {
        builder.add_element(element).expect("distinct element");
    }
    for from in 0..tier.element_count {
        let end = (from + tier.span).min(tier.element_count);
        for to in from + 1..end {
            if prng.chance(tier.arrow_per_mille, 1000) {
                builder.add_arrow(from, to).expect("forward arrow");
            }
        }
    }
    builder.create_acyclic_graph().expect("forward arrows are acyclic")
}
