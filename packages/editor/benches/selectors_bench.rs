use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scribe_blocks::{Block, BlockRegistry, Uid};
use scribe_editor::{selectors, AllowedBlockTypes, BlockSelection, EditorState, Selectors};
use std::sync::Arc;

fn document(size: usize) -> EditorState {
    let mut state = EditorState::default();
    let blocks = (0..size).map(|index| {
        let name = if index % 3 == 0 { "core/heading" } else { "core/paragraph" };
        Block::new(index as u64, name).with_attribute("content", format!("Block number {index}"))
    });
    state.reset_blocks(blocks).expect("unique uids");
    state
}

fn serialize_content(c: &mut Criterion) {
    let registry = Arc::new(BlockRegistry::with_core_types());
    let state = document(500);

    c.bench_function("edited_post_content_cold", |b| {
        let selectors = Selectors::new(Arc::clone(&registry));
        b.iter(|| {
            selectors.clear_caches();
            selectors.get_edited_post_content(black_box(&state))
        })
    });

    c.bench_function("edited_post_content_memoized", |b| {
        let selectors = Selectors::new(Arc::clone(&registry));
        b.iter(|| selectors.get_edited_post_content(black_box(&state)))
    });
}

fn edit_and_requery(c: &mut Criterion) {
    let registry = Arc::new(BlockRegistry::with_core_types());
    let selectors = Selectors::new(registry);
    let mut state = document(500);
    let mut counter = 0u64;

    c.bench_function("title_edit_then_get_blocks", |b| {
        b.iter(|| {
            counter += 1;
            state.push_document(state.present().with_edit("title", format!("Title {counter}")));
            selectors.get_blocks(black_box(&state))
        })
    });
}

fn selection_queries(c: &mut Criterion) {
    let mut state = document(1000);
    state.block_selection = BlockSelection::range(Uid::from(900u64), Uid::from(100u64));

    c.bench_function("multi_selected_span", |b| {
        b.iter(|| selectors::multi_selected_span(black_box(&state)).len())
    });

    c.bench_function("block_insertion_point", |b| {
        b.iter(|| selectors::get_block_insertion_point(black_box(&state)))
    });
}

fn inserter_items(c: &mut Criterion) {
    let selectors = Selectors::new(Arc::new(BlockRegistry::with_core_types()));
    let state = document(200);

    c.bench_function("inserter_items_all", |b| {
        b.iter(|| selectors.get_inserter_items(black_box(&state), &AllowedBlockTypes::All))
    });
}

criterion_group!(
    benches,
    serialize_content,
    edit_and_requery,
    selection_queries,
    inserter_items
);
criterion_main!(benches);
