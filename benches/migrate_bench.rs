//! Migration Benchmark
//!
//! Measures per-file migration time on the fixture corpus and on generated
//! units, plus parallel throughput of the multi-file driver.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use arkmig::java::{BinaryOp, Modifiers, PrimitiveType, SourceUnit, SymbolTable, TreeBuilder};
use arkmig::lowering::{CancellationToken, MigrationOptions, migrate, migrate_files};
use arkmig_java::fixtures;

// =============================================================================
// Generated Inputs
// =============================================================================

/// A class with `methods` methods, each holding `statements` nested
/// if/else assignments over a local counter.
fn generate_unit(methods: usize, statements: usize) -> SourceUnit {
    let mut b = TreeBuilder::new("Generated.java", "");
    let mut members = Vec::with_capacity(methods);
    for m in 0..methods {
        let mut body = Vec::with_capacity(statements + 1);
        let int = b.primitive(PrimitiveType::Int);
        let zero = b.int(0);
        body.push(b.local_var(int, "x", Some(zero)));
        for s in 0..statements {
            let x = b.name("x");
            let bound = b.int(s as i64);
            let cond = b.binary(BinaryOp::Lt, x, bound);
            let x = b.name("x");
            let one = b.int(1);
            let sum = b.binary(BinaryOp::Add, x, one);
            let then_branch = b.assign_stmt("x", sum);
            let x = b.name("x");
            let two = b.int(2);
            let diff = b.binary(BinaryOp::Sub, x, two);
            let else_branch = b.assign_stmt("x", diff);
            body.push(b.if_stmt(cond, then_branch, Some(else_branch)));
        }
        let block = b.block(body);
        let ret = b.void();
        members.push(b.method(Modifiers::STATIC, &format!("m{m}"), vec![], ret, Some(block)));
    }
    let class = b.class_decl(Modifiers::empty(), "Generated", None, vec![], members);
    let root = b.compilation_unit(None, &[], vec![class]);
    match b.finish(root) {
        Ok(unit) => unit,
        Err(error) => panic!("generated tree is invalid: {error}"),
    }
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_fixtures(c: &mut Criterion) {
    let symbols = SymbolTable::jdk();
    let options = MigrationOptions::default();
    let mut group = c.benchmark_group("migrate_fixture");

    for unit in fixtures::all() {
        group.bench_with_input(
            BenchmarkId::from_parameter(unit.file_name()),
            &unit,
            |b, unit| b.iter(|| black_box(migrate(unit, &symbols, &options))),
        );
    }

    group.finish();
}

fn bench_generated(c: &mut Criterion) {
    let symbols = SymbolTable::jdk();
    let options = MigrationOptions::default();
    let mut group = c.benchmark_group("migrate_generated");

    for (methods, statements) in [(10, 5), (50, 10), (200, 10)] {
        let unit = generate_unit(methods, statements);
        let label = format!("{methods}m_{statements}stmt");
        group.throughput(Throughput::Elements(unit.len() as u64));
        group.bench_with_input(BenchmarkId::new("nodes", &label), &unit, |b, unit| {
            b.iter(|| black_box(migrate(unit, &symbols, &options)))
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let symbols = SymbolTable::jdk();
    let options = MigrationOptions::default();
    let unit = generate_unit(50, 10);

    c.bench_function("render_only", |b| {
        // Migrate once outside the loop to isolate printing
        let result = match migrate(&unit, &symbols, &options) {
            Ok(result) => result,
            Err(error) => panic!("migration failed: {error}"),
        };
        b.iter(|| black_box(result.render()))
    });
}

fn bench_parallel(c: &mut Criterion) {
    let symbols = SymbolTable::jdk();
    let options = MigrationOptions::default();
    let units: Vec<SourceUnit> = (0..64).map(|_| generate_unit(20, 10)).collect();
    let mut group = c.benchmark_group("migrate_files");
    group.throughput(Throughput::Elements(units.len() as u64));

    group.bench_function("64_files", |b| {
        b.iter(|| {
            let token = CancellationToken::new();
            black_box(migrate_files(&units, &symbols, &options, &token))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fixtures,
    bench_generated,
    bench_render,
    bench_parallel
);
criterion_main!(benches);
