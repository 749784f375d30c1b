use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use safehours_core::{
    check_time_overlap, peak_rolling_contact_time, rolling_contact_time, weekly_hours,
};
use safehours_domain::{Activity, ActivityType};

/// A year of two-a-day instruction, the upper end of a realistic personal
/// log.
fn sample_log() -> Vec<Activity> {
    let first: NaiveDate = "2024-01-01".parse().expect("bench date literal");

    (0..365u64)
        .flat_map(|day| {
            let date = first + Days::new(day);
            [
                Activity::new(ActivityType::Flight, date, "09:00", "11:00")
                    .with_briefing(0.5, 0.5),
                Activity::new(ActivityType::Ground, date, "14:00", "16:00"),
            ]
        })
        .collect()
}

fn bench_rolling_contact_time(c: &mut Criterion) {
    let activities = sample_log();
    let instant = "2024-12-30".parse::<NaiveDate>().unwrap().and_hms_opt(16, 0, 0).unwrap();

    c.bench_function("rolling_contact_time_730_activities", |b| {
        b.iter(|| rolling_contact_time(black_box(&activities), black_box(instant)))
    });
}

fn bench_peak_over_day(c: &mut Criterion) {
    let activities = sample_log();
    let date: NaiveDate = "2024-12-30".parse().unwrap();

    c.bench_function("peak_rolling_contact_time_730_activities", |b| {
        b.iter(|| peak_rolling_contact_time(black_box(&activities), black_box(date)))
    });
}

fn bench_weekly_hours(c: &mut Criterion) {
    let activities = sample_log();
    let date: NaiveDate = "2024-12-30".parse().unwrap();

    c.bench_function("weekly_hours_730_activities", |b| {
        b.iter(|| weekly_hours(black_box(&activities), black_box(date)))
    });
}

fn bench_overlap_check(c: &mut Criterion) {
    let activities = sample_log();
    let candidate = Activity::new(
        ActivityType::Sim,
        "2024-12-30".parse().unwrap(),
        "11:30",
        "13:30",
    );

    c.bench_function("check_time_overlap_730_activities", |b| {
        b.iter(|| check_time_overlap(black_box(&activities), black_box(&candidate), None))
    });
}

criterion_group!(
    benches,
    bench_rolling_contact_time,
    bench_peak_over_day,
    bench_weekly_hours,
    bench_overlap_check
);
criterion_main!(benches);
