use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagebuilder_editor::transforms::{
    add_component_to_column, move_component, set_column_span, update_component,
};
use pagebuilder_editor::{History, LayoutEdit};
use pagebuilder_model::component::TextPatch;
use pagebuilder_model::{
    create_travel_landing_layout, validate_layout, ComponentType, ComponentUpdate, PageLayout,
};
use std::sync::Arc;

fn travel() -> Arc<PageLayout> {
    match create_travel_landing_layout() {
        Ok(layout) => Arc::new(layout),
        Err(e) => panic!("bundled template failed to load: {}", e),
    }
}

fn transforms(c: &mut Criterion) {
    let layout = travel();
    let section = &layout.sections[4];
    let row = &section.rows[0];
    let column = &row.columns[0];
    let source = layout.sections[0].rows[0].columns[0].clone();
    let component_id = source.components[0].id.clone();

    c.bench_function("add_component_to_column", |b| {
        b.iter(|| {
            add_component_to_column(
                black_box(&layout),
                &column.id,
                ComponentType::Text,
                Some(0),
            )
        })
    });

    c.bench_function("move_component_across_sections", |b| {
        b.iter(|| move_component(black_box(&layout), &source.id, &column.id, &component_id, 0))
    });

    c.bench_function("set_column_span_noop", |b| {
        b.iter(|| {
            set_column_span(
                black_box(&layout),
                &section.id,
                &row.id,
                &column.id,
                column.span as i64,
            )
        })
    });

    let update = ComponentUpdate::Text(TextPatch {
        text: Some("Benchmark".to_string()),
    });
    c.bench_function("update_component", |b| {
        b.iter(|| update_component(black_box(&layout), &component_id, &update))
    });
}

fn history(c: &mut Criterion) {
    c.bench_function("history_200_title_edits", |b| {
        b.iter(|| {
            let mut history = History::new(travel());
            for i in 0..200 {
                history.apply(&LayoutEdit::SetTitle {
                    title: format!("Title {}", i),
                });
            }
            history
        })
    });
}

fn validation(c: &mut Criterion) {
    let layout = travel();

    c.bench_function("validate_travel_layout", |b| {
        b.iter(|| validate_layout(black_box(&layout)))
    });
}

criterion_group!(benches, transforms, history, validation);
criterion_main!(benches);
