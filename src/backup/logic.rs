// mongotool/src/backup/logic.rs
use std::fs;

use anyhow::{Context, Result};
use futures::stream::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use serde_json::{Map, Value};

use crate::config::AppConfig;

/// Renders stored documents as backup records in relaxed extended JSON,
/// which stays plain JSON except where BSON types need their `$` forms.
pub fn documents_to_records(documents: Vec<Document>) -> Vec<Value> {
    documents
        .into_iter()
        .map(|document| Bson::Document(document).into_relaxed_extjson())
        .collect()
}

/// Dumps every user collection of the database into the backup document
/// consumed by the restore flow.
pub async fn perform_backup_orchestration(
    app_config: &AppConfig,
    db: &Database,
) -> Result<()> {
    let mut names = db.list_collection_names().await.with_context(|| {
        format!(
            "Failed to list collections of database '{}'",
            app_config.db_name
        )
    })?;
    names.retain(|name| !name.starts_with("system."));
    // Sorted so repeated backups of the same data produce the same file.
    names.sort();

    println!("🗄️ Backing up database '{}'...\n", app_config.db_name);

    let mut export = Map::new();
    let mut total = 0usize;
    for name in names {
        let cursor = db
            .collection::<Document>(&name)
            .find(doc! {})
            .await
            .with_context(|| format!("Failed to scan collection '{}'", name))?;
        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .with_context(|| format!("Failed to read records from collection '{}'", name))?;

        let records = documents_to_records(documents);
        println!("📦 {}: {} records exported", name, records.len());
        total += records.len();
        export.insert(name, Value::Array(records));
    }

    let backup = serde_json::to_string_pretty(&Value::Object(export))
        .context("Failed to serialise backup document")?;
    fs::write(&app_config.backup_file, backup).with_context(|| {
        format!(
            "Failed to write backup file at {}",
            app_config.backup_file.display()
        )
    })?;

    println!("\n🎉 Database backed up successfully!");
    println!(
        "\nTotal: {} records -> {}",
        total,
        app_config.backup_file.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn test_documents_render_as_plain_json() {
        let documents = vec![doc! { "name": "Ana", "age": 31, "active": true }];
        let records = documents_to_records(documents);
        assert_eq!(
            records,
            vec![json!({"name": "Ana", "age": 31, "active": true})]
        );
    }

    #[test]
    fn test_object_ids_render_in_extended_json() -> Result<()> {
        let id = ObjectId::parse_str("507f1f77bcf86cd799439011")?;
        let records = documents_to_records(vec![doc! { "_id": id }]);
        assert_eq!(
            records,
            vec![json!({"_id": {"$oid": "507f1f77bcf86cd799439011"}})]
        );
        Ok(())
    }

    #[test]
    fn test_exported_records_load_back_unchanged() -> Result<()> {
        let documents = vec![
            doc! { "sku": "A-1", "qty": 4, "dims": { "w": 2.5, "h": 1.0 } },
            doc! { "sku": "A-2", "qty": 0, "tags": ["red", "blue"] },
        ];
        let backup = json!({ "products": documents_to_records(documents.clone()) }).to_string();

        let batches = crate::restore::logic::parse_backup_document(&backup)?;
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].name, "products");
        assert_eq!(batches[0].documents, documents);
        Ok(())
    }
}
