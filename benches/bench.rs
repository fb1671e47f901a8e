// Criterion benchmarks for Civic Proximity

use chrono::Utc;
use civic_proximity::core::{
    distance::{calculate_bounding_box, haversine_distance},
    filter_by_radius, format_distance, Dashboard, DashboardQuery,
};
use civic_proximity::models::{GeoPoint, Issue, IssueLocation, IssueStatus, Priority};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_issue(id: usize, lat: f64, lon: f64) -> Issue {
    Issue {
        id: id as u64,
        title: format!("Issue {}", id),
        description: "Reported during benchmark".to_string(),
        category: "Road Infrastructure".to_string(),
        status: if id % 3 == 0 { IssueStatus::Resolved } else { IssueStatus::Open },
        priority: Priority::Medium,
        reported_by: "Anonymous".to_string(),
        reported_at: Utc::now(),
        last_updated: None,
        location: IssueLocation {
            address: format!("Sector {}", id % 40),
            coordinates: GeoPoint::new(lat, lon).ok(),
        },
        images: vec![],
        upvotes: 0,
        comments: vec![],
    }
}

fn create_issues(count: usize) -> Vec<Issue> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.0007) % 0.5;
            create_issue(i, 30.7333 + lat_offset - 0.25, 76.7794 + lon_offset - 0.25)
        })
        .collect()
}

fn origin() -> GeoPoint {
    GeoPoint::new(30.7333, 76.7794).unwrap()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(30.7333),
                black_box(76.7794),
                black_box(30.77),
                black_box(76.7401),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    let center = origin();
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| calculate_bounding_box(black_box(&center), black_box(5.0)));
    });
}

fn bench_format_distance(c: &mut Criterion) {
    c.bench_function("format_distance", |b| {
        b.iter(|| format_distance(black_box(3.456)));
    });
}

fn bench_filter_by_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_radius");

    for issue_count in [10, 100, 1000, 10000].iter() {
        let issues = create_issues(*issue_count);

        group.bench_with_input(
            BenchmarkId::new("radius_5km", issue_count),
            issue_count,
            |b, _| {
                b.iter(|| filter_by_radius(black_box(&issues), black_box(Some(origin())), black_box(5.0)));
            },
        );
    }

    group.finish();
}

fn bench_dashboard_view(c: &mut Criterion) {
    let dashboard = Dashboard::default();
    let issues = create_issues(1000);
    let query = DashboardQuery {
        origin: Some(origin()),
        radius_km: Some(10.0),
        search: Some("sector 1".to_string()),
        ..Default::default()
    };

    c.bench_function("dashboard_view_1000_issues", |b| {
        b.iter(|| {
            let view = dashboard.view(black_box(&issues), black_box(&query));
            black_box(view.stats)
        });
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_format_distance,
    bench_filter_by_radius,
    bench_dashboard_view
);

criterion_main!(benches);
