mod common;

use inventory::dashboard::{
    transfer::{self, ImportStatus},
    Dashboard, Mode, SortKey, SubmitOutcome,
};
use inventory::products::repo_types::NewProduct;

fn product(name: &str, category: &str, price: f64, stock: i32) -> NewProduct {
    NewProduct {
        name: name.into(),
        category: category.into(),
        price,
        stock,
    }
}

#[tokio::test]
async fn submit_creates_then_updates_and_reloads() {
    let mut dashboard = Dashboard::new(common::spawn_server().await);
    dashboard.load().await.expect("initial load");
    assert!(dashboard.state().products().is_empty());

    let outcome = dashboard
        .submit(&product("Pen", "Office", 1.5, 100))
        .await
        .expect("create");
    let SubmitOutcome::Created(id) = outcome else {
        panic!("expected a create, got {outcome:?}");
    };
    assert_eq!(dashboard.state().products().len(), 1);

    assert!(dashboard.state_mut().begin_edit(id).is_some());
    let outcome = dashboard
        .submit(&product("Pen", "Office", 2.0, 80))
        .await
        .expect("update");
    assert_eq!(outcome, SubmitOutcome::Updated(id));
    assert_eq!(dashboard.state().mode(), Mode::Viewing);
    assert_eq!(dashboard.state().products()[0].stock, 80);
}

#[tokio::test]
async fn failed_submit_keeps_edit_mode() {
    let mut dashboard = Dashboard::new(common::spawn_server().await);
    dashboard.submit(&product("Pen", "Office", 1.5, 1)).await.expect("create");
    let id = dashboard.state().products()[0].id;

    dashboard.state_mut().begin_edit(id);
    let err = dashboard
        .submit(&product("", "Office", 1.5, 1))
        .await
        .unwrap_err();
    assert_eq!(err.reason(), "Please fill in all fields");
    assert_eq!(dashboard.state().mode(), Mode::Editing(id));
}

#[tokio::test]
async fn delete_only_happens_on_confirm() {
    let mut dashboard = Dashboard::new(common::spawn_server().await);
    dashboard.submit(&product("Pen", "Office", 1.5, 1)).await.expect("create");
    let id = dashboard.state().products()[0].id;

    let pending = dashboard.request_delete(id);
    assert_eq!(pending.id(), id);
    dashboard.load().await.expect("reload");
    assert_eq!(dashboard.state().products().len(), 1);

    dashboard.confirm_delete(pending).await.expect("delete");
    assert!(dashboard.state().products().is_empty());

    let again = dashboard.request_delete(id);
    assert!(dashboard.confirm_delete(again).await.is_err());
}

#[tokio::test]
async fn import_reports_each_record() {
    let mut dashboard = Dashboard::new(common::spawn_server().await);
    let records = transfer::parse_import(
        r#"[
            {"name": "Pen", "category": "Office", "price": 1.5, "stock": 100},
            {"name": "Ghost", "category": "Office", "price": 2},
            {"name": "Ruler", "category": "School", "price": 3, "stock": 0}
        ]"#,
    )
    .expect("parse");

    let report = dashboard.import(records).await;
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.created(), 2);
    assert!(matches!(report.outcomes[0].status, ImportStatus::Created(_)));
    assert_eq!(
        report.outcomes[1].status,
        ImportStatus::Rejected("Please fill in all fields".into())
    );
    assert_eq!(report.outcomes[1].name.as_deref(), Some("Ghost"));
    assert_eq!(dashboard.state().products().len(), 2);
}

#[tokio::test]
async fn snapshot_drives_view_and_summary() {
    let mut dashboard = Dashboard::new(common::spawn_server().await);
    for (name, category, price, stock) in [
        ("Stapler", "Office", 12.0, 5),
        ("Pen", "Office", 1.5, 100),
        ("Ruler", "School", 3.0, 10),
    ] {
        dashboard
            .submit(&product(name, category, price, stock))
            .await
            .expect("create");
    }

    let state = dashboard.state_mut();
    state.set_sort(Some(SortKey::Price));
    let names: Vec<&str> = state.filtered().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Pen", "Ruler", "Stapler"]);

    state.set_search("school");
    assert_eq!(state.filtered().len(), 1);

    let summary = state.summary();
    assert_eq!(summary.total_products, 3);
    assert_eq!(summary.total_stock, 115);
    assert!((summary.total_value - 240.0).abs() < 1e-9);
}

#[tokio::test]
async fn export_writes_snapshot_file() {
    let mut dashboard = Dashboard::new(common::spawn_server().await);
    dashboard.submit(&product("Pen", "Office", 1.5, 100)).await.expect("create");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(transfer::DEFAULT_EXPORT_FILE);
    std::fs::write(&path, dashboard.export_json().expect("export")).expect("write");

    let text = std::fs::read_to_string(&path).expect("read");
    let records = transfer::parse_import(&text).expect("exported file is importable");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].label(), Some("Pen"));
}
