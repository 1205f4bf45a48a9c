use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expense_core::core::services::{BudgetService, SummaryService};
use expense_core::daycycle::{Coordinate, DayCycle, SunTimes};
use expense_core::domain::{BudgetDefinition, Expense, PeriodType};

const CATEGORIES: [&str; 5] = ["Food", "Transport", "Rent", "Utilities", ""];

fn build_sample_expenses(count: usize) -> Vec<Expense> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..count)
        .map(|idx| {
            let date = start + Duration::days((idx % 365) as i64);
            Expense::new(
                date.format("%Y-%m-%d").to_string(),
                CATEGORIES[idx % CATEGORIES.len()],
                format!("{}.50", 100 + idx % 400),
            )
            .with_id(format!("{:06}", idx))
        })
        .collect()
}

fn sample_budgets() -> Vec<BudgetDefinition> {
    vec![
        BudgetDefinition::overall(PeriodType::Month, 250_000.0),
        BudgetDefinition::overall(PeriodType::Week, 60_000.0),
        BudgetDefinition::for_category("Food", PeriodType::Month, 40_000.0),
        BudgetDefinition::for_category("Transport", PeriodType::Week, 10_000.0),
        BudgetDefinition::for_category("Other", PeriodType::Day, 2_000.0),
    ]
}

fn bench_budget_progress(c: &mut Criterion) {
    let expenses = build_sample_expenses(black_box(10_000));
    let budgets = sample_budgets();
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("budget_progress_10k", |b| {
        b.iter(|| {
            let progress = BudgetService::compute_progress(&expenses, &budgets, today);
            black_box(progress);
        })
    });

    c.bench_function("dashboard_totals_10k", |b| {
        b.iter(|| black_box(SummaryService::dashboard_totals(&expenses, today)))
    });
}

fn bench_sun_times(c: &mut Criterion) {
    let lagos = Coordinate::new(6.5244, 3.3792).unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    c.bench_function("sun_times_compute", |b| {
        b.iter(|| black_box(SunTimes::compute(black_box(date), lagos)))
    });

    let now = Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());
    let mut cycle = DayCycle::new(Some(lagos));
    c.bench_function("day_cycle_resolve_cached", |b| {
        b.iter(|| black_box(cycle.resolve(&now)))
    });
}

criterion_group!(benches, bench_budget_progress, bench_sun_times);
criterion_main!(benches);
