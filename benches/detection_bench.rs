use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use routemap::DetectorRegistry;
use std::hint::black_box;

fn generate_django_urls(num_routes: usize) -> String {
    let mut code = String::from("from django.urls import path, re_path\n\nurlpatterns = [\n");
    for i in 0..num_routes {
        if i % 4 == 0 {
            code.push_str(&format!("    re_path(r'^legacy/{}/$', views.legacy_{}),\n", i, i));
        } else {
            code.push_str(&format!("    path('items/{}/', views.item_{}),\n", i, i));
        }
    }
    code.push_str("]\n");
    code
}

fn generate_flask_app(num_routes: usize) -> String {
    let mut code = String::from("from flask import Flask\napp = Flask(__name__)\n\n");
    for i in 0..num_routes {
        code.push_str(&format!(
            "@app.route('/items/{}', methods=['GET', 'POST'])\ndef item_{}():\n    return str({})\n\n",
            i, i, i
        ));
    }
    code
}

fn generate_express_app(num_routes: usize) -> String {
    let mut code = String::from("const express = require('express');\nconst app = express();\n\n");
    for i in 0..num_routes {
        code.push_str(&format!(
            "app.get('/items/{}', (req, res) => res.json({{ id: {} }}));\naxios.get('/remote/{}');\n",
            i, i, i
        ));
    }
    code
}

fn benchmark_detection(c: &mut Criterion) {
    let registry = DetectorRegistry::new();
    let mut group = c.benchmark_group("detection");

    for size in [10, 100, 500] {
        let django = generate_django_urls(size);
        let flask = generate_flask_app(size);
        let express = generate_express_app(size);

        group.bench_with_input(BenchmarkId::new("django", size), &django, |b, code| {
            b.iter(|| black_box(registry.detect_all("urls.py", black_box(code))))
        });
        group.bench_with_input(BenchmarkId::new("flask", size), &flask, |b, code| {
            b.iter(|| black_box(registry.detect_all("app.py", black_box(code))))
        });
        group.bench_with_input(BenchmarkId::new("express", size), &express, |b, code| {
            b.iter(|| black_box(registry.detect_file("server.js", black_box(code))))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_detection);
criterion_main!(benches);
