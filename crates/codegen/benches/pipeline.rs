// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for parameter extraction and header rendering.

use codegen::{build_marker_table, extract, GccBackend, MarkerTable, Template};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use model_ir::{ActivationKind, IntermediateModel, Layer};

/// A stack of dense layers, `units` wide, with deterministic weights.
fn dense_stack(depth: usize, units: usize) -> IntermediateModel {
    let layers = (0..depth)
        .map(|l| {
            let weights = (0..units)
                .map(|i| (0..units).map(|j| ((l + i * j) % 17) as f32 * 0.125 - 1.0).collect())
                .collect();
            Layer::dense(ActivationKind::Relu, weights, Some(vec![0.01; units]))
        })
        .collect();
    IntermediateModel::new("bench", layers)
}

fn bench_extract(c: &mut Criterion) {
    let model = dense_stack(8, 128);
    c.bench_function("extract_8x128", |b| b.iter(|| extract(black_box(&model)).unwrap()));
}

fn bench_marker_table(c: &mut Criterion) {
    let model = dense_stack(8, 128);
    let params = extract(&model).unwrap();
    c.bench_function("marker_table_8x128", |b| {
        b.iter(|| MarkerTable::from_parameters(black_box(&params)).unwrap())
    });
}

fn bench_render_header(c: &mut Criterion) {
    let backend = GccBackend::default();
    let template = backend.header_template().unwrap();
    let table = build_marker_table(&dense_stack(8, 128)).unwrap();
    c.bench_function("render_bundled_header", |b| {
        b.iter(|| template.render(black_box(&table)).unwrap())
    });
}

fn bench_parse_template(c: &mut Criterion) {
    let backend = GccBackend::default();
    let text = std::fs::read_to_string(backend.header_template_path()).unwrap();
    let syntax = backend.config().marker_syntax();
    c.bench_function("parse_bundled_header", |b| {
        b.iter(|| Template::parse(black_box(&text), &syntax).unwrap())
    });
}

criterion_group!(
    benches,
    bench_extract,
    bench_marker_table,
    bench_render_header,
    bench_parse_template
);
criterion_main!(benches);
