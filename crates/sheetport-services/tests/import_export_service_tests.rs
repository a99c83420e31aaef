//! Integration tests for ImportExportService
//!
//! Runs exports and imports against in-memory collaborators and a store that
//! can be made to fail.

mod common;

use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;
use sheetport_core::{
    CellValue, Column, ColumnType, InMemorySource, MemoryTableStore, SERIAL_NO_COLUMN_ID,
    TableStore,
};
use sheetport_services::ServiceError;

use common::{FlakyStore, UnreadableSource, import_export_service, people_table};

fn store_with_people() -> Arc<MemoryTableStore> {
    Arc::new(MemoryTableStore::new().with_table("t1", people_table()))
}

// ============ export Tests ============

#[tokio::test]
async fn export_csv_delivers_named_file() {
    let (service, download) = import_export_service(store_with_people());

    let exported = service
        .export("t1", "csv", Some("people"))
        .await
        .expect("should export");

    assert_eq!(exported.filename, "people.csv");
    assert_eq!(exported.mime_type, "text/csv");
    assert_eq!(exported.success_message(), "CSV exported successfully!");

    let delivery = download.last().expect("should deliver a file");
    assert_eq!(delivery.filename, "people.csv");
    assert_eq!(delivery.mime_type, "text/csv");
    assert_eq!(
        delivery.content,
        "Serial No.,Name,Age\n1,Alice,30\n2,Bob,25\n3,Carol,41"
    );
    assert_eq!(exported.size, delivery.content.len());
}

#[tokio::test]
async fn export_json_without_name_uses_default_file_name() {
    let (service, download) = import_export_service(store_with_people());

    service.export("t1", "JSON", None).await.unwrap();

    let delivery = download.last().unwrap();
    assert_eq!(delivery.filename, "table.json");
    assert_eq!(delivery.mime_type, "application/json");

    let document: Value = serde_json::from_str(&delivery.content).unwrap();
    assert_eq!(document["metadata"]["totalRows"], 3);
    assert_eq!(document["metadata"]["totalColumns"], 3);
    assert_eq!(document["rows"][2]["col_name"], "Carol");
}

#[tokio::test]
async fn export_missing_table_is_not_found() {
    let (service, download) = import_export_service(Arc::new(MemoryTableStore::new()));

    let err = service.export("missing", "csv", None).await.unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(ref id) if id == "missing"));
    assert!(download.deliveries().is_empty());
}

#[tokio::test]
async fn export_unknown_format_is_unsupported() {
    let (service, download) = import_export_service(store_with_people());

    let err = service.export("t1", "pdf", None).await.unwrap_err();

    assert!(matches!(err, ServiceError::UnsupportedFormat(_)));
    assert!(download.deliveries().is_empty());
}

#[tokio::test]
async fn export_load_failure_is_store_error() {
    let store = Arc::new(
        FlakyStore::new(MemoryTableStore::new().with_table("t1", people_table())).failing_loads(),
    );
    let (service, _) = import_export_service(store);

    let err = service.export("t1", "csv", None).await.unwrap_err();

    assert!(matches!(err, ServiceError::Store { .. }));
    assert!(err.to_string().starts_with("Failed to load table 't1'"));
}

// ============ import Tests ============

#[tokio::test]
async fn import_csv_replaces_table() {
    let store = store_with_people();
    let (service, _) = import_export_service(store.clone());
    let source = InMemorySource::new("people.csv", "Name,Age\nAlice,30\nBob,25");

    let result = service.import(&source, "t1").await.expect("should import");

    assert_eq!(result.imported, 2);
    assert_eq!(result.columns.len(), 3);
    assert_eq!(result.columns[0], Column::serial_no());
    assert_eq!(result.columns[1].name, "Name");
    assert_eq!(result.columns[1].column_type, ColumnType::Text);
    assert_eq!(result.columns[2].name, "Age");
    assert_eq!(result.columns[2].column_type, ColumnType::Number);

    let age_id = &result.columns[2].id;
    assert_eq!(result.rows[0].value(age_id), Some(CellValue::Integer(30)));
    assert_eq!(result.rows[1].value(age_id), Some(CellValue::Integer(25)));

    let stored = store.get("t1").expect("table should be stored");
    assert_eq!(stored, result.to_table());
    assert!(stored.column("col_name").is_none());
}

#[tokio::test]
async fn import_json_keeps_row_ids() {
    let store = Arc::new(MemoryTableStore::new());
    let (service, _) = import_export_service(store.clone());
    let source = InMemorySource::new(
        "Backup.JSON",
        r#"{"columns":[{"id":"c1","name":"City","type":"text","editable":true}],
            "rows":[{"id":"a","serialNo":5,"c1":"Oslo"},{"id":"b","c1":"Lima"}]}"#,
    );

    let result = service.import(&source, "t2").await.unwrap();

    assert_eq!(result.imported, 2);
    assert_eq!(result.columns[0].id, SERIAL_NO_COLUMN_ID);
    let ids: Vec<&str> = result.rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    let serials: Vec<u64> = result.rows.iter().map(|r| r.serial_no).collect();
    assert_eq!(serials, vec![1, 2]);
    assert!(store.get("t2").is_some());
}

#[tokio::test]
async fn exported_json_imports_back_unchanged() {
    let store = store_with_people();
    let (service, download) = import_export_service(store.clone());

    service.export("t1", "json", Some("people")).await.unwrap();
    let content = download.last().unwrap().content;
    let source = InMemorySource::new("people.json", content);
    service.import(&source, "copy").await.unwrap();

    assert_eq!(store.get("copy"), Some(people_table()));
}

#[tokio::test]
async fn import_strips_byte_order_mark() {
    let store = Arc::new(MemoryTableStore::new());
    let (service, _) = import_export_service(store);
    let source = InMemorySource::new("bom.csv", "\u{feff}Name\nAlice");

    let result = service.import(&source, "t1").await.unwrap();

    assert_eq!(result.columns[1].name, "Name");
}

#[tokio::test]
async fn import_excel_is_rejected_before_reading() {
    let store = Arc::new(FlakyStore::new(MemoryTableStore::new()));
    let (service, _) = import_export_service(store.clone());
    let source = UnreadableSource {
        name: "book.xlsx".into(),
    };

    let err = service.import(&source, "t1").await.unwrap_err();

    assert!(matches!(err, ServiceError::ExcelUnsupported));
    assert_eq!(
        err.to_string(),
        "Excel import is not available. Please use CSV or JSON import instead."
    );
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn import_unknown_extension_is_unsupported() {
    let (service, _) = import_export_service(Arc::new(MemoryTableStore::new()));
    let source = InMemorySource::new("notes.txt", "Name\nAlice");

    let err = service.import(&source, "t1").await.unwrap_err();

    assert!(matches!(err, ServiceError::UnsupportedFormat(ref ext) if ext == "txt"));
}

#[tokio::test]
async fn import_empty_csv_leaves_table_untouched() {
    let store = store_with_people();
    let (service, _) = import_export_service(store.clone());
    let source = InMemorySource::new("empty.csv", "\n\n");

    let err = service.import(&source, "t1").await.unwrap_err();

    assert!(matches!(err, ServiceError::EmptyInput));
    assert_eq!(err.to_string(), "CSV file is empty");
    assert_eq!(store.get("t1"), Some(people_table()));
}

#[tokio::test]
async fn import_json_without_rows_is_invalid() {
    let store = store_with_people();
    let (service, _) = import_export_service(store.clone());
    let source = InMemorySource::new("bad.json", r#"{"columns": []}"#);

    let err = service.import(&source, "t1").await.unwrap_err();

    assert!(matches!(err, ServiceError::InvalidFormat(_)));
    assert_eq!(store.get("t1"), Some(people_table()));
}

#[tokio::test]
async fn import_read_failure_is_file_read_error() {
    let (service, _) = import_export_service(Arc::new(MemoryTableStore::new()));
    let source = UnreadableSource {
        name: "data.csv".into(),
    };

    let err = service.import(&source, "t1").await.unwrap_err();

    assert!(matches!(err, ServiceError::FileRead { .. }));
    assert!(err.to_string().contains("data.csv"));
}

#[tokio::test]
async fn import_save_failure_is_propagated() {
    let store = Arc::new(
        FlakyStore::new(MemoryTableStore::new().with_table("t1", people_table())).failing_saves(),
    );
    let (service, _) = import_export_service(store.clone());
    let source = InMemorySource::new("people.csv", "Name\nZed");

    let err = service.import(&source, "t1").await.unwrap_err();

    assert!(matches!(err, ServiceError::Store { .. }));
    assert_eq!(store.save_count(), 1);
    assert_eq!(store.inner.load("t1").await.unwrap(), Some(people_table()));
}
