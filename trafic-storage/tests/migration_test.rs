//! Migration tests.

use rusqlite::Connection;

use trafic_storage::migrations;

fn get_table_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .map(|r| r.unwrap())
        .collect()
}

#[test]
fn fresh_database_migrates_to_latest_version() {
    let conn = Connection::open_in_memory().unwrap();
    let applied = migrations::run_migrations(&conn).unwrap();
    assert_eq!(applied, migrations::LATEST_VERSION);
    assert_eq!(
        migrations::current_version(&conn).unwrap(),
        migrations::LATEST_VERSION
    );

    let columns = get_table_columns(&conn, "kpi_summary");
    assert!(columns.contains(&"date".to_string()));
    assert!(columns.contains(&"node".to_string()));

    let columns = get_table_columns(&conn, "traffic_entree");
    assert!(columns.contains(&"kpi_id".to_string()));
    assert!(columns.contains(&"traffic".to_string()));
    assert!(columns.contains(&"tentative_appel".to_string()));
    assert!(columns.contains(&"appel_repondu".to_string()));
    assert!(
        !columns.contains(&"appel_non_repondu".to_string()),
        "entree has no unanswered-call column"
    );

    let columns = get_table_columns(&conn, "traffic_sortie");
    assert!(columns.contains(&"appel_non_repondu".to_string()));

    let columns = get_table_columns(&conn, "trafic_unifie");
    assert!(columns.contains(&"total_appel_non_repondu".to_string()));
    assert!(columns.contains(&"kind".to_string()));
}

#[test]
fn rerunning_migrations_is_a_no_op() {
    let conn = Connection::open_in_memory().unwrap();
    migrations::run_migrations(&conn).unwrap();
    let applied = migrations::run_migrations(&conn).unwrap();
    assert_eq!(applied, 0);
    assert_eq!(
        migrations::current_version(&conn).unwrap(),
        migrations::LATEST_VERSION
    );
}

#[test]
fn version_starts_at_zero_on_untouched_database() {
    let conn = Connection::open_in_memory().unwrap();
    assert_eq!(migrations::current_version(&conn).unwrap(), 0);
}
