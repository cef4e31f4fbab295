//! Benchmark for litmus_patina linter.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use litmus_patina::rules::lit::find_unencoded_entity;
use litmus_patina::Linter;

fn bench_lint_small(c: &mut Criterion) {
    let source = r#"
import { html, LitElement } from 'lit';

class MyCard extends LitElement {
  render() {
    return html`
      <div class="card" title="Tom &amp; Jerry">
        <a href="/search?q=${this.query}&page=2" title="next > ">Next</a>
        <img alt="${this.alt}" src=${this.src}>
      </div>
    `;
  }
}
"#;

    let linter = Linter::new();

    let mut group = c.benchmark_group("script");
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("lint_small", |b| {
        b.iter(|| linter.lint_source(black_box(source), "card.js"))
    });

    group.finish();
}

fn bench_lint_large(c: &mut Criterion) {
    let mut source = String::from("import { html } from 'lit';\n\n");
    for i in 0..500 {
        source.push_str(&format!(
            r#"export const view{i} = (item) => html`
  <li class="item-{i}" data-id="${{item.id}}" title="Item {i} &mdash; ${{item.name}}">
    <button aria-label="Remove &quot;${{item.name}}&quot;" @click=${{item.remove}}>x</button>
    <span title="{i} > 0">${{item.label}}</span>
  </li>
`;
"#,
        ));
    }

    let linter = Linter::new();

    let mut group = c.benchmark_group("script");
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("lint_large", |b| {
        b.iter(|| linter.lint_source(black_box(&source), "views.js"))
    });

    group.finish();
}

fn bench_value_scan(c: &mut Criterion) {
    let value = "a &amp; b &#169; c ".repeat(64);

    c.bench_function("find_unencoded_entity", |b| {
        b.iter(|| find_unencoded_entity(black_box(&value)))
    });
}

criterion_group!(benches, bench_lint_small, bench_lint_large, bench_value_scan);
criterion_main!(benches);
