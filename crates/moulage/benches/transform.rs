//! Benchmarks for the macro transform.
//!
//! Run with: cargo bench -p moulage

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use moulage::{transform_macros, BuildMode, MacroOptions};

// =============================================================================
// Test Data
// =============================================================================

const IMPORT: &str =
    "import { component, functional, type, EVENTS, INJECTIONS } from 'vue-jsx-component.macro';\n";

/// Single component with typed props
const SIMPLE: &str = r#"import { component, type } from 'vue-jsx-component.macro';

export const Counter = component({
  props: {
    start: type<number>(),
    label: type<string | null>(),
  },
  render() {
    return <button>{this.label}: {this.start}</button>
  },
});
"#;

/// Plain module without macros, exercises the fast path
const PLAIN: &str = r#"import { defineComponent, h } from 'vue';

export default defineComponent({
  props: { start: Number },
  render() {
    return h('div', this.start);
  },
});
"#;

/// Many definitions of every shape in one module
fn generate_large_module(count: usize) -> String {
    let mut source = String::from(IMPORT);
    for i in 0..count {
        source.push_str(&format!(
            r#"
export const Panel{i} = component({{
  props: {{
    title: type<string>(),
    size: type<number | string>(),
    items: type<string[]>(),
  }},
  [EVENTS]: {{}} as {{ select: number }},
  [INJECTIONS]: {{ theme: {{ type: String, from: 'theme' }} }},
  data() {{
    return {{ open: false }};
  }},
  render() {{
    return <section>{{this.title}}</section>
  }},
}});

export const Cell{i} = functional({{
  props: {{ value: type<number>() }},
  render(ctx) {{
    return <td>{{ctx.props.value}}</td>
  }},
}});

export const Leaf{i} = functional((ctx) => <span>{{ctx.props.text}}</span>);
"#
        ));
    }
    source
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    group.throughput(Throughput::Bytes(SIMPLE.len() as u64));

    let development = MacroOptions::new(BuildMode::Development);
    let production = MacroOptions::new(BuildMode::Production);

    group.bench_function("simple_development", |b| {
        b.iter(|| {
            let result = transform_macros(black_box(SIMPLE), &development).unwrap();
            black_box(result.code);
        })
    });

    group.bench_function("simple_production", |b| {
        b.iter(|| {
            let result = transform_macros(black_box(SIMPLE), &production).unwrap();
            black_box(result.code);
        })
    });

    group.finish();
}

fn bench_fast_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    group.throughput(Throughput::Bytes(PLAIN.len() as u64));

    let options = MacroOptions::default();
    group.bench_function("no_macro_import", |b| {
        b.iter(|| {
            let result = transform_macros(black_box(PLAIN), &options).unwrap();
            black_box(result.changed);
        })
    });

    group.finish();
}

fn bench_large_module(c: &mut Criterion) {
    let source = generate_large_module(100);

    let mut group = c.benchmark_group("transform_large");
    group.throughput(Throughput::Bytes(source.len() as u64));

    let options = MacroOptions::new(BuildMode::Development);
    group.bench_function("300_definitions", |b| {
        b.iter(|| {
            let result = transform_macros(black_box(&source), &options).unwrap();
            black_box(result.usages);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_simple, bench_fast_path, bench_large_module);
criterion_main!(benches);
