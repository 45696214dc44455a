//! Report evaluation benchmark over a populated year of KPI rows.

use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use rusqlite::params;
use tempfile::tempdir;

use trafic_core::errors::StorageError;
use trafic_core::traits::storage::ITraficReport;
use trafic_storage::TraficReportEngine;

fn sqe(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

fn bench_unified_traffic(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let engine = TraficReportEngine::open(&dir.path().join("bench.db")).unwrap();

    let as_of = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    // One summary per day for a year, two operators per day in each direction.
    engine
        .with_writer(|tx| {
            for offset in 0..365u64 {
                let date = as_of.date().checked_sub_days(Days::new(offset)).unwrap();
                tx.execute(
                    "INSERT INTO kpi_summary (date, node) VALUES (?1, 'N1')",
                    params![format!("{date} 00:00:00")],
                )
                .map_err(sqe)?;
                let kpi_id = tx.last_insert_rowid();
                for operator in ["OP1", "OP2"] {
                    tx.execute(
                        "INSERT INTO traffic_entree
                         (kpi_id, operator, suffix, traffic, tentative_appel, appel_repondu)
                         VALUES (?1, ?2, 'S1', 10, 12, 9)",
                        params![kpi_id, operator],
                    )
                    .map_err(sqe)?;
                    tx.execute(
                        "INSERT INTO traffic_sortie
                         (kpi_id, operator, suffix, traffic, tentative_appel, appel_repondu,
                          appel_non_repondu)
                         VALUES (?1, ?2, 'S1', 3, 3, 2, 1)",
                        params![kpi_id, operator],
                    )
                    .map_err(sqe)?;
                }
            }
            Ok(())
        })
        .unwrap();

    c.bench_function("unified_traffic_one_year", |b| {
        b.iter(|| engine.unified_traffic(as_of).unwrap())
    });

    c.bench_function("refresh_unified_traffic_one_year", |b| {
        b.iter(|| engine.refresh_unified_traffic(as_of).unwrap())
    });
}

criterion_group!(benches, bench_unified_traffic);
criterion_main!(benches);
