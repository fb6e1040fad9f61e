use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fern::{ContextData, Fern, FernOptions, Method, Outcome, RawRequest};
use serde_json::json;
use tokio::runtime::Runtime;

// A route with `num_steps` synchronous steps followed by `send`.
fn build_sync_route(num_steps: usize) -> Fern {
  let mut fern = Fern::new(FernOptions::default());
  let mut builder = fern.endpoint("/bench", Method::Post).map_body_strict(["a", "b"]);
  for _ in 0..num_steps {
    builder = builder.use_step("noop", |ctx: ContextData| {
      let _ = ctx.read().body_field("a");
      Outcome::Continue
    });
  }
  builder.send(json!({"ok": true}));
  fern
}

// Same shape, but every step is deferred.
fn build_deferred_route(num_steps: usize) -> Fern {
  let mut fern = Fern::new(FernOptions::default());
  let mut builder = fern.endpoint("/bench", Method::Post);
  for _ in 0..num_steps {
    builder = builder.use_db(|_ctx: ContextData| async move {
      tokio::task::yield_now().await;
      Ok(true)
    });
  }
  builder.send(json!({"ok": true}));
  fern
}

fn bench_dispatch_sync_steps(c: &mut Criterion) {
  let mut group = c.benchmark_group("DispatchSync");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 5, 20] {
    let fern = build_sync_route(num_steps);
    group.throughput(Throughput::Elements(num_steps as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), &num_steps, |b, _| {
      b.to_async(&rt).iter(|| async {
        let req = RawRequest::new(Method::Post, "/bench").with_body(json!({"a": 1, "b": 2}));
        fern.dispatch(req).await.unwrap()
      })
    });
  }
  group.finish();
}

fn bench_dispatch_deferred_steps(c: &mut Criterion) {
  let mut group = c.benchmark_group("DispatchDeferred");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 5, 20] {
    let fern = build_deferred_route(num_steps);
    group.throughput(Throughput::Elements(num_steps as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), &num_steps, |b, _| {
      b.to_async(&rt).iter(|| async { fern.dispatch(RawRequest::new(Method::Post, "/bench")).await.unwrap() })
    });
  }
  group.finish();
}

criterion_group!(benches, bench_dispatch_sync_steps, bench_dispatch_deferred_steps);
criterion_main!(benches);
