//! Solver benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench solve
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use weq_rs::alphabet::Alphabet;
use weq_rs::equation::Equation;
use weq_rs::options::{PrintOptions, SolveOptions};
use weq_rs::solver::Solver;
use weq_rs::trace::NoTrace;

struct Problem {
    name: &'static str,
    consts: &'static str,
    vars: &'static str,
    equation: &'static str,
    options: fn() -> SolveOptions,
}

fn short_range() -> SolveOptions {
    SolveOptions::default().with_cycle_range(20)
}

fn splitting() -> SolveOptions {
    SolveOptions::default().with_split_by_equidecomposability(true)
}

const PROBLEMS: &[Problem] = &[
    Problem {
        name: "commute",
        consts: "{a}",
        vars: "{u, v}",
        equation: "u a v = v a u",
        options: SolveOptions::default,
    },
    Problem {
        name: "quadratic",
        consts: "{}",
        vars: "{u, v, z}",
        equation: "u u v v = z z",
        options: SolveOptions::default,
    },
    Problem {
        name: "cycled",
        consts: "{a, b}",
        vars: "{u}",
        equation: "u u a = b u u",
        options: short_range,
    },
    Problem {
        name: "split",
        consts: "{}",
        vars: "{u, v, x, y}",
        equation: "u v x y = v u y x",
        options: splitting,
    },
];

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for problem in PROBLEMS {
        group.bench_with_input(BenchmarkId::from_parameter(problem.name), problem, |b, p| {
            b.iter(|| {
                let mut solver = Solver::new(p.consts, p.vars, p.equation, PrintOptions::default(), (p.options)())
                    .expect("valid problem");
                solver.solve(&mut NoTrace).expect("no trace errors")
            })
        });
    }
    group.finish();
}

fn bench_reduce(c: &mut Criterion) {
    let consts = Alphabet::parse("{a, b}").expect("valid alphabet");
    let vars = Alphabet::parse("{u, v}").expect("valid alphabet");
    let text = "a b a b u a b v b a b a = a b a b v b a u b a b a";
    let eq = Equation::parse(text, &consts, &vars).expect("valid equation");

    c.bench_function("reduce", |b| {
        b.iter(|| {
            let mut eq = eq.clone();
            eq.reduce();
            eq
        })
    });
}

criterion_group!(benches, bench_solve, bench_reduce);
criterion_main!(benches);
