use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use indent_tools::{Factory, Flavor, parse_html, parse_one};

const ADDRESS_XML: &str = include_str!("../tests/fixtures/address.xml");
const EXAMPLE_HTML: &str = include_str!("../tests/fixtures/example.html");

fn bench_address(c: &mut Criterion) {
    c.bench_function("parse_xml_address", |b| {
        b.iter(|| parse_one(black_box(ADDRESS_XML)))
    });
}

fn bench_example_page(c: &mut Criterion) {
    c.bench_function("parse_html_example", |b| {
        b.iter(|| parse_html(black_box(EXAMPLE_HTML)))
    });
}

fn bench_large_document(c: &mut Criterion) {
    let x = Factory::new();
    let doc = x
        .tag("catalog")
        .children((0..500).map(|i| {
            x.tag("book")
                .attr("id", format!("bk{i}"))
                .children([
                    x.tag("title").text(format!("Volume {i}")),
                    x.tag("price").attr("currency", "USD").text(i * 3),
                ])
        }))
        .build()
        .render(Flavor::Xml);

    c.bench_function("parse_xml_catalog_500", |b| {
        b.iter(|| parse_one(black_box(&doc)))
    });
}

criterion_group!(benches, bench_address, bench_example_page, bench_large_document);
criterion_main!(benches);
