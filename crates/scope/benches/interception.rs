use criterion::{Criterion, black_box, criterion_group, criterion_main};

use adminkit_scope::{
    CallSite, DeclarationRegistry, PolicyId, QueryInterceptor, QueryOp, ScopeContext,
};

fn registry(services: usize) -> DeclarationRegistry {
    let mut registry = DeclarationRegistry::new();
    for i in 0..services {
        registry.declare_type(format!("Service{i}"), PolicyId::new("org-scope"));
        registry.declare_method(format!("Service{i}"), "list", PolicyId::new("dept-scope"));
    }
    registry
}

fn bench_around_call(c: &mut Criterion) {
    let interceptor = QueryInterceptor::new(registry(64));
    let ctx = ScopeContext::new();

    let mut group = c.benchmark_group("around_call");

    group.bench_function("declared", |b| {
        b.iter(|| {
            let r: Result<u64, ()> = interceptor.around_call(
                &ctx,
                CallSite::new("Service7", "list"),
                || Ok(black_box(42u64)),
            );
            r
        })
    });

    group.bench_function("undeclared", |b| {
        b.iter(|| {
            let r: Result<u64, ()> = interceptor.around_call(
                &ctx,
                CallSite::new("Unregistered", "list"),
                || Ok(black_box(42u64)),
            );
            r
        })
    });

    group.bench_function("bare_continuation", |b| {
        b.iter(|| {
            let r: Result<u64, ()> = Ok(black_box(42u64));
            r
        })
    });

    group.finish();
}

fn bench_around_query(c: &mut Criterion) {
    let interceptor = QueryInterceptor::new(registry(64));
    let mut group = c.benchmark_group("around_query");

    group.bench_function("select_scoped", |b| {
        let ctx = ScopeContext::new();
        let _scope = ctx.activate(PolicyId::new("org-scope"));
        let mut builder = String::from("select * from users");
        b.iter(|| {
            let r: Result<usize, ()> =
                interceptor.around_query(&ctx, QueryOp::Select, &mut builder, |q| Ok(q.len()));
            r
        })
    });

    group.bench_function("select_unscoped", |b| {
        let ctx = ScopeContext::new();
        let mut builder = String::from("select * from users");
        b.iter(|| {
            let r: Result<usize, ()> =
                interceptor.around_query(&ctx, QueryOp::Select, &mut builder, |q| Ok(q.len()));
            r
        })
    });

    group.finish();
}

criterion_group!(benches, bench_around_call, bench_around_query);
criterion_main!(benches);
