use copier::Projection;

copier::projections! {
    #[derive(Clone, Default)]
    struct Row { id: u64, cells: Vec<Option<String>> }

    #[derive(Clone, Default)]
    #[copy_target(source = Row)]
    struct RowView { id: u64, cells: Vec<Option<String>> }

    // a projection of a projection
    #[derive(Clone, Default)]
    #[copy_target(source = RowView)]
    struct RowSummary { id: u64 }
}

fn main() {
    let row = Row { id: 1, cells: vec![Some("x".to_string()), None] };
    let view = RowView::forward(&row);
    let summary = RowSummary::forward(&view);
    let back: Row = view.reverse();

    assert_eq!(summary.id, 1);
    assert_eq!(back.cells, row.cells);
}
