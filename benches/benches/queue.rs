use std::thread;
use std::time::Duration;

use blocking_ring::BoundedBlockingQueue;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const MESSAGES: u64 = 10_000;

fn uncontended(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncontended");
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_get_cap64", |b| {
        let queue = BoundedBlockingQueue::new(64).expect("queue");
        b.iter(|| {
            queue.put(criterion::black_box(7u64));
            criterion::black_box(queue.get());
        });
    });

    group.finish();
}

fn hand_off(c: &mut Criterion) {
    let mut group = c.benchmark_group("hand_off");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);
    group.throughput(Throughput::Elements(MESSAGES));

    for capacity in [1usize, 16, 256] {
        group.bench_with_input(
            BenchmarkId::new("spsc", capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let queue = BoundedBlockingQueue::new(capacity).expect("queue");
                    let producer = {
                        let queue = queue.clone();
                        thread::spawn(move || {
                            for value in 0..MESSAGES {
                                queue.put(value);
                            }
                        })
                    };
                    let mut sum = 0u64;
                    for _ in 0..MESSAGES {
                        sum = sum.wrapping_add(queue.get());
                    }
                    producer.join().expect("producer");
                    criterion::black_box(sum)
                });
            },
        );
    }

    for producers in [2u64, 4] {
        group.bench_with_input(
            BenchmarkId::new("mpmc_cap16", producers),
            &producers,
            |b, &producers| {
                b.iter(|| {
                    let queue = BoundedBlockingQueue::new(16).expect("queue");
                    let per_thread = MESSAGES / producers;
                    let producer_handles: Vec<_> = (0..producers)
                        .map(|_| {
                            let queue = queue.clone();
                            thread::spawn(move || {
                                for value in 0..per_thread {
                                    queue.put(value);
                                }
                            })
                        })
                        .collect();
                    let consumer_handles: Vec<_> = (0..producers)
                        .map(|_| {
                            let queue = queue.clone();
                            thread::spawn(move || {
                                (0..per_thread).fold(0u64, |acc, _| acc.wrapping_add(queue.get()))
                            })
                        })
                        .collect();
                    for handle in producer_handles {
                        handle.join().expect("producer");
                    }
                    let sum = consumer_handles
                        .into_iter()
                        .map(|handle| handle.join().expect("consumer"))
                        .fold(0u64, u64::wrapping_add);
                    criterion::black_box(sum)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, uncontended, hand_off);
criterion_main!(benches);
