use clados_core::{TaxonId, TaxonRef, TaxonomyConfig};
use clados_taxonomy::{
    format_tree, PruneOptions, RankOntology, Taxon, TaxonProvider, TaxonRecord, TaxonStore,
    TaxonTree, TreePruner,
};
use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

const LEVEL_RANKS: [&str; 4] = ["order", "family", "genus", "species"];

/// Balanced four-level taxonomy with `breadth` children per node and a
/// sprinkling of placeholder and environmental names.
fn build_taxonomy(breadth: usize) -> TaxonTree {
    let mut tree = TaxonTree::new(Taxon::new(1u32, "root"));
    let mut next_id = 2u32;
    let mut level = vec![tree.root_id()];

    for rank in LEVEL_RANKS {
        let mut next_level = Vec::with_capacity(level.len() * breadth);
        for &parent in &level {
            for _ in 0..breadth {
                let id = TaxonId::new(next_id);
                let name = match next_id % 13 {
                    0 => format!("unclassified clade {}", next_id),
                    7 => format!("environmental sample {}", next_id),
                    _ => format!("{} {}", rank, next_id),
                };
                tree.add_child(parent, Taxon::new(id, name).with_rank(rank))
                    .unwrap();
                next_level.push(id);
                next_id += 1;
            }
        }
        level = next_level;
    }
    tree
}

fn build_store(breadth: usize) -> TaxonStore {
    let mut store = TaxonStore::new();
    store.add_taxon(TaxonRecord::new(1u32, "root")).unwrap();
    let mut next_id = 2u32;
    let mut level = vec![TaxonId::ROOT];

    for rank in LEVEL_RANKS {
        let mut next_level = Vec::with_capacity(level.len() * breadth);
        for &parent in &level {
            for _ in 0..breadth {
                let id = TaxonId::new(next_id);
                store
                    .add_taxon(
                        TaxonRecord::new(id, format!("{} {}", rank, next_id))
                            .with_rank(rank)
                            .with_parent(parent),
                    )
                    .unwrap();
                next_level.push(id);
                next_id += 1;
            }
        }
        level = next_level;
    }
    store
}

fn bench_prune_to_rank(c: &mut Criterion) {
    let config = TaxonomyConfig::default();
    let pruner = TreePruner::new(RankOntology::ncbi(), &config);
    let mut group = c.benchmark_group("prune_to_rank");

    for breadth in &[3, 6, 10] {
        let tree = build_taxonomy(*breadth);
        group.throughput(Throughput::Elements(tree.len() as u64));

        for target in &["family", "species"] {
            group.bench_with_input(
                BenchmarkId::new(*target, tree.len()),
                &tree,
                |b, tree| {
                    b.iter_batched(
                        || tree.clone(),
                        |mut t| {
                            pruner
                                .prune_to_rank(&mut t, black_box(*target), PruneOptions::default())
                                .unwrap()
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }

    group.finish();
}

fn bench_clean(c: &mut Criterion) {
    let config = TaxonomyConfig::default();
    let pruner = TreePruner::new(RankOntology::ncbi(), &config);
    let mut group = c.benchmark_group("clean");

    for breadth in &[3, 6, 10] {
        let tree = build_taxonomy(*breadth);
        group.throughput(Throughput::Elements(tree.len() as u64));

        group.bench_with_input(BenchmarkId::new("clean", tree.len()), &tree, |b, tree| {
            b.iter_batched(
                || tree.clone(),
                |mut t| pruner.clean(&mut t),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");

    for breadth in &[3, 6, 10] {
        let tree = build_taxonomy(*breadth);
        group.throughput(Throughput::Elements(tree.len() as u64));

        group.bench_with_input(BenchmarkId::new("preorder", tree.len()), &tree, |b, tree| {
            b.iter(|| black_box(tree).iter().count());
        });

        group.bench_with_input(BenchmarkId::new("leaves", tree.len()), &tree, |b, tree| {
            b.iter(|| black_box(tree).leaves().len());
        });

        group.bench_with_input(BenchmarkId::new("format", tree.len()), &tree, |b, tree| {
            b.iter(|| format_tree(black_box(tree), Some(3)));
        });
    }

    group.finish();
}

fn bench_descendant_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("descendant_tree");

    for breadth in &[3, 6] {
        let store = build_store(*breadth);
        group.throughput(Throughput::Elements(store.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("materialize", store.len()),
            &store,
            |b, store| {
                b.iter(|| store.descendant_tree(black_box(&TaxonRef::from(1u32))).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_prune_to_rank,
    bench_clean,
    bench_traversal,
    bench_descendant_tree
);
criterion_main!(benches);
