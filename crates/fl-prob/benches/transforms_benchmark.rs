use criterion::{Criterion, criterion_group, criterion_main};
use fl_core::{ControlPoint, Density, NullSink, Transformation};
use fl_prob::{BSpline, Composite, Linear, Normal, Sigmoid, TransformedDensity};
use std::hint::black_box;
use std::sync::Arc;

fn bench_closed_form(c: &mut Criterion) {
    let xs: Vec<f64> = (0..10_000).map(|i| (i as f64) * 0.001 - 5.0).collect();
    let ps: Vec<f64> = (0..10_000).map(|i| ((i as f64) + 0.5) / 10_000.0).collect();
    let sigmoid = Sigmoid::new(1.7, 0.2);

    c.bench_function("sigmoid_forward_deriv_10k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &x in &xs {
                acc += sigmoid.forward_deriv(x);
            }
            black_box(acc)
        })
    });

    c.bench_function("sigmoid_inverse_deriv_10k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &p in &ps {
                acc += sigmoid.inverse_deriv(p);
            }
            black_box(acc)
        })
    });
}

fn bench_spline(c: &mut Criterion) {
    let spline = BSpline::new(&[
        ControlPoint::new(0.1, 0.3),
        ControlPoint::new(0.35, 0.4),
        ControlPoint::new(0.6, 0.55),
        ControlPoint::new(0.85, 0.9),
    ])
    .with_sink(Arc::new(NullSink));
    let ps: Vec<f64> = (0..1_000).map(|i| ((i as f64) + 0.5) / 1_000.0).collect();

    c.bench_function("bspline_forward_1k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &x in &ps {
                acc += spline.forward(x);
            }
            black_box(acc)
        })
    });

    c.bench_function("bspline_inverse_deriv_1k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &y in &ps {
                acc += spline.inverse_deriv(y);
            }
            black_box(acc)
        })
    });
}

fn bench_density(c: &mut Criterion) {
    let chain = Composite::default()
        .then(Linear::new(0.8, -0.1))
        .then(Sigmoid::new(2.0, 0.0))
        .then(BSpline::new(&BSpline::default_control_points(5)).with_sink(Arc::new(NullSink)));
    let d = TransformedDensity::new(Normal::standard(), chain).with_sink(Arc::new(NullSink));
    let ys: Vec<f64> = (0..1_000).map(|i| ((i as f64) + 0.5) / 1_000.0).collect();

    c.bench_function("composite_density_1k", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &y in &ys {
                acc += d.pdf(y);
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_closed_form, bench_spline, bench_density);
criterion_main!(benches);
