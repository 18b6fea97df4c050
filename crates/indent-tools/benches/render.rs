use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use indent_tools::{Element, Factory, Flavor, IndentBuilder};

fn table(rows: usize, cols: usize) -> Element {
    let h = Factory::for_html();
    h.table()
        .children((1..=rows).map(|y| h.tr().children((1..=cols).map(|x| h.td().text(x * y)))))
        .build()
}

fn bench_render_table(c: &mut Criterion) {
    let doc = table(10, 10);
    c.bench_function("render_html_table_10x10", |b| {
        b.iter(|| black_box(&doc).render(Flavor::Html))
    });
}

fn bench_render_mixed(c: &mut Criterion) {
    let x = Factory::new();
    let doc = x
        .tag("article")
        .children((0..50).map(|i| {
            x.p()
                .child("Paragraph ")
                .child(x.em().text(i))
                .child(" with <escaped> & quoted \"text\".")
        }))
        .build();
    c.bench_function("render_xml_mixed_content", |b| {
        b.iter(|| black_box(&doc).render(Flavor::Xml))
    });
}

fn bench_indent_builder(c: &mut Criterion) {
    c.bench_function("indent_builder_nested", |b| {
        b.iter(|| {
            let mut sb = IndentBuilder::new();
            for i in 0..100 {
                sb.append("{");
                {
                    let mut inner = sb.scope();
                    inner.append(&format!("let x{i} = {i};\nlet y{i} = x{i} * 2;"));
                }
                sb.append("}");
            }
            black_box(sb.to_string())
        })
    });
}

criterion_group!(benches, bench_render_table, bench_render_mixed, bench_indent_builder);
criterion_main!(benches);
