// SPDX-License-Identifier: MPL-2.0
use std::time::Duration;

extern crate criterion;
use self::criterion::*;

use semver_resolve::comparator::NodeSemver;
use semver_resolve::resolver::Resolver;

/// `width` caret alternatives over consecutive majors.
fn range_set(width: u64, offset: u64) -> String {
    (0..width)
        .map(|major| format!("^{}.{}.0", major, offset))
        .collect::<Vec<_>>()
        .join(" || ")
}

fn bench_cartesian(c: &mut Criterion) {
    let mut group = c.benchmark_group("cartesian");
    group.measurement_time(Duration::from_secs(10));

    let resolver = Resolver::new(NodeSemver);
    for (inputs, width) in [(2, 4), (3, 6), (4, 8)] {
        let range_sets: Vec<String> = (0..inputs).map(|i| range_set(width, i)).collect();
        group.bench_function(format!("{}x{}", inputs, width), |b| {
            b.iter(|| resolver.resolve(black_box(range_sets.as_slice())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cartesian);
criterion_main!(benches);
