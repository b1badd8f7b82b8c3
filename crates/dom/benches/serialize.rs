use chaindom::Document;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A list with `items` entries, each an element with an attribute and text
fn make_list(items: usize) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let ul = doc.create_element("ul");
    doc.append_child(root, ul).unwrap();
    for i in 0..items {
        let li = doc.create_element("li");
        doc.set_attribute(li, "data-index", i as i64).unwrap();
        let text = doc.create_text_node(format!("Item {i} & more"));
        doc.append_child(li, text).unwrap();
        doc.append_child(ul, li).unwrap();
    }
    doc
}

fn bench_serialize(c: &mut Criterion) {
    let doc = make_list(1000);
    c.bench_function("serialize_1000_items", |b| {
        b.iter(|| black_box(doc.to_string()))
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_1000_items", |b| b.iter(|| black_box(make_list(1000))));
}

fn bench_move(c: &mut Criterion) {
    let mut doc = make_list(1000);
    let ul = doc.children(doc.root())[0];
    c.bench_function("move_first_to_end", |b| {
        b.iter(|| {
            let first = doc.first_child(ul).unwrap();
            doc.append_child(ul, first).unwrap();
        })
    });
}

criterion_group!(benches, bench_serialize, bench_build, bench_move);
criterion_main!(benches);
