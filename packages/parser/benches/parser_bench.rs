use criterion::{black_box, criterion_group, criterion_main, Criterion};
use poster_parser::{parse_document, parse_fragment, serialize_fragment};

const POSTER: &str = r#"
<div class="poster" style="position: relative; width: 720px; height: 720px; background: #fef3c7">
  <h1 style="position: absolute; top: 80px; left: 40px; font-size: 64px">Summer Sale</h1>
  <p style="position: absolute; top: 160px; left: 40px">Up to <strong>50% off</strong> on select items!</p>
  <img src="https://images.unsplash.com/photo-1523275335684-37898b6baf30" alt="Product"
       style="position: absolute; right: 40px; bottom: 40px; width: 380px; height: 380px">
</div>
"#;

fn parse_poster_fragment(c: &mut Criterion) {
    c.bench_function("parse_poster_fragment", |b| {
        b.iter(|| parse_fragment(black_box(POSTER)))
    });
}

fn parse_full_document(c: &mut Criterion) {
    let source = format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><style>.poster {{ font-family: sans-serif }}</style></head><body>{}</body></html>",
        POSTER
    );

    c.bench_function("parse_full_document", |b| {
        b.iter(|| parse_document(black_box(&source)))
    });
}

fn parse_large_poster(c: &mut Criterion) {
    // Simulate a busy poster with many positioned blocks
    let mut source = String::from("<div class=\"poster\">");
    for i in 0..500 {
        source.push_str(&format!(
            r#"<p style="position: absolute; top: {}px; left: {}px">Block {} &amp; <em>more</em></p>"#,
            i * 3,
            i * 2,
            i
        ));
    }
    source.push_str("</div>");

    c.bench_function("parse_large_poster_500_blocks", |b| {
        b.iter(|| parse_fragment(black_box(&source)))
    });
}

fn round_trip(c: &mut Criterion) {
    c.bench_function("parse_serialize_round_trip", |b| {
        b.iter(|| serialize_fragment(&parse_fragment(black_box(POSTER))))
    });
}

fn tokenize_only(c: &mut Criterion) {
    use poster_parser::tokenize;

    c.bench_function("tokenize_only", |b| {
        b.iter(|| tokenize(black_box(POSTER)))
    });
}

criterion_group!(
    benches,
    parse_poster_fragment,
    parse_full_document,
    parse_large_poster,
    round_trip,
    tokenize_only
);
criterion_main!(benches);
