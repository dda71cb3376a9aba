// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_grid::{Container, ContainerId, GlobalId, GridCoord, RecordKind};
use understory_grid_drag::{DragSession, relative_offsets, resolve_footprint};

/// A `side` x `side` rack whose left half is occupied and selected.
fn half_full_rack(side: u32) -> Container<GlobalId> {
    let mut rack = Container::grid(ContainerId(1), side, side);
    let mut n = 0;
    for y in 1..=side {
        for x in 1..=side / 2 {
            n += 1;
            let coord = GridCoord::new(x, y);
            rack.put(coord, GlobalId::new(RecordKind::Sample, n)).unwrap();
            rack.set_selected(coord, true);
        }
    }
    rack
}

fn bench_offsets(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/relative_offsets");

    for side in [8_u32, 32, 96] {
        let rack = half_full_rack(side);
        group.throughput(Throughput::Elements(u64::from(side * side / 2)));
        group.bench_with_input(BenchmarkId::from_parameter(side), &rack, |b, rack| {
            b.iter(|| black_box(relative_offsets(rack, GridCoord::new(1, 1))));
        });
    }

    group.finish();
}

fn bench_footprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/resolve_footprint");

    for side in [8_u32, 32, 96] {
        let rack = half_full_rack(side);
        let offsets = relative_offsets(&rack, GridCoord::new(1, 1));
        let destination = GridCoord::new(side / 2 + 1, 1);
        group.throughput(Throughput::Elements(offsets.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side), &offsets, |b, offsets| {
            b.iter(|| {
                black_box(resolve_footprint(&rack, offsets, GridCoord::new(1, 1), destination))
            });
        });
    }

    group.finish();
}

fn bench_drop_and_rollback(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/drop_rollback");

    // Shift the whole occupied half to the right, then reject it on the server side.
    for side in [8_u32, 32, 96] {
        let rack = half_full_rack(side);
        group.throughput(Throughput::Elements(u64::from(side * side / 2)));
        group.bench_with_input(BenchmarkId::from_parameter(side), &rack, |b, rack| {
            b.iter_batched(
                || rack.clone(),
                |mut rack| {
                    let mut session = DragSession::default();
                    session.arm(&mut rack, GridCoord::new(1, 1)).unwrap();
                    session.hover(&rack, Some(GridCoord::new(side / 2 + 1, 1)));
                    let pending = session.drop(&mut rack).unwrap().into_pending().unwrap();
                    black_box(session.settle(&mut rack, pending, Err(())));
                    black_box(rack);
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_offsets, bench_footprint, bench_drop_and_rollback);
criterion_main!(benches);
