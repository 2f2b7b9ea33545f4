use copier::Projection;

macro_rules! byte {
    () => {
        u8
    };
}

type Bag = Vec<u8>;

copier::projections! {
    #[derive(Default)]
    struct Source { items: Vec<byte!()>, extra: Bag }

    // element types hidden behind a macro or an alias are copied whole
    #[derive(Default)]
    #[copy_target(source = Source)]
    struct Target { items: Vec<byte!()>, extra: Bag }
}

fn main() {
    let source = Source { items: vec![1], extra: vec![2] };
    let target = Target::forward(&source);

    assert_eq!(target.items, source.items);
    assert_eq!(target.extra, source.extra);
    assert_eq!(target.reverse().items, vec![1]);
}
