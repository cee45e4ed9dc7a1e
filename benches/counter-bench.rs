use std::hint::black_box;
use std::sync::Arc;
use std::sync::Barrier;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lockbench::{Counter, CounterKind, Runner, RunnerConfig};

const CONCURRENT_NUM: usize = 4;
const LOOP_TIMES: usize = 10_000;

pub fn contend(counter: Arc<dyn Counter>, concurrent_num: usize, loop_times: usize) {
    let mut handles = Vec::new();
    let barrier = Arc::new(Barrier::new(concurrent_num));
    let core_ids = core_affinity::get_core_ids().unwrap_or_default();
    for t_id in 0..concurrent_num {
        let core = core_ids.get(t_id % core_ids.len().max(1)).copied();
        let clone_counter = counter.clone();
        let clone_barrier = barrier.clone();
        let handle = std::thread::spawn(move || {
            if let Some(core) = core {
                core_affinity::set_for_current(core);
            }
            clone_barrier.wait();
            for _ in 0..loop_times {
                black_box(clone_counter.get());
                clone_counter.increment();
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

fn uncontended_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncontended_get_increment");

    for kind in CounterKind::ALL {
        let counter = kind.create();
        group.bench_function(kind.to_string(), |b| {
            b.iter(|| {
                black_box(counter.get());
                counter.increment();
            })
        });
    }

    group.finish();
}

fn contended_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_get_increment");

    for kind in CounterKind::ALL {
        group.bench_with_input(BenchmarkId::new(kind.to_string(), CONCURRENT_NUM), &kind, |b, kind| {
            b.iter(|| contend(kind.create(), CONCURRENT_NUM, LOOP_TIMES))
        });
    }

    group.finish();
}

fn runner_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("runner");
    group.sample_size(10);

    for kind in CounterKind::ALL {
        group.bench_with_input(BenchmarkId::new(kind.to_string(), CONCURRENT_NUM), &kind, |b, kind| {
            b.iter(|| {
                let config = RunnerConfig::new(*kind, CONCURRENT_NUM).with_iterations(LOOP_TIMES);
                Runner::new(config).run().unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, uncontended_benchmark, contended_benchmark, runner_benchmark);
criterion_main!(benches);
