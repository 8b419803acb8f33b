// mongotool/src/restore/logic.rs
use std::fs;

use anyhow::{Context, Result};
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use serde_json::{Map, Value};

use crate::config::AppConfig;
use crate::restore::verification;

/// One collection's worth of backup records, in file order.
#[derive(Debug)]
pub struct CollectionBatch {
    pub name: String,
    pub documents: Vec<Document>,
}

/// Parses the backup document: a JSON object mapping collection names to
/// arrays of records, each record itself a JSON object.
///
/// Collections keep the order they have in the file. Extended-JSON forms
/// such as `{"$oid": ...}` deserialize to their BSON types, so files
/// written by the backup flow load back unchanged.
pub fn parse_backup_document(raw: &str) -> Result<Vec<CollectionBatch>> {
    let top_level: Map<String, Value> = serde_json::from_str(raw)
        .context("Backup file must be a JSON object mapping collection names to record arrays")?;

    let mut batches = Vec::with_capacity(top_level.len());
    for (name, value) in top_level {
        let records = match value {
            Value::Array(records) => records,
            _ => anyhow::bail!("Value for collection '{}' is not an array", name),
        };

        let mut documents = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let bson = Bson::try_from(record).with_context(|| {
                format!("Record {} in collection '{}' is not valid", index, name)
            })?;
            match bson {
                Bson::Document(document) => documents.push(document),
                _ => anyhow::bail!(
                    "Record {} in collection '{}' is not a JSON object",
                    index,
                    name
                ),
            }
        }

        batches.push(CollectionBatch { name, documents });
    }

    Ok(batches)
}

/// Orchestrates the restore: read the backup document, then replace the
/// contents of every collection it names, in file order.
///
/// Each collection is cleared with `delete_many({})` before its records
/// are bulk-inserted. Delete and insert are not wrapped in a transaction;
/// a crash between the two leaves that collection empty.
pub async fn perform_restore_orchestration(
    app_config: &AppConfig,
    db: &Database,
) -> Result<()> {
    let raw = fs::read_to_string(&app_config.backup_file).with_context(|| {
        format!(
            "Failed to read backup file at {}",
            app_config.backup_file.display()
        )
    })?;
    let batches = parse_backup_document(&raw)?;

    println!("🔄 Restoring database '{}'...\n", app_config.db_name);

    for batch in &batches {
        println!(
            "📦 {}: loading {} records...",
            batch.name,
            batch.documents.len()
        );

        let collection = db.collection::<Document>(&batch.name);
        collection
            .delete_many(doc! {})
            .await
            .with_context(|| format!("Failed to clear collection '{}'", batch.name))?;

        // insert_many rejects an empty batch; an empty record array means
        // the collection simply ends empty.
        if !batch.documents.is_empty() {
            collection
                .insert_many(&batch.documents)
                .await
                .with_context(|| {
                    format!("Failed to insert records into collection '{}'", batch.name)
                })?;
        }

        println!("   ✅ {} records loaded", batch.documents.len());
    }

    verification::verify_restore(db, &batches).await?;

    let total: usize = batches.iter().map(|batch| batch.documents.len()).sum();
    println!("\n🎉 Database restored successfully!");
    println!("\nTotal: {} records", total);

    println!("\n📊 Loaded collections:");
    for batch in batches.iter().filter(|batch| !batch.documents.is_empty()) {
        println!("   - {}: {} records", batch.name, batch.documents.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_collections_in_file_order() -> Result<()> {
        let raw = r#"{"users": [{"name": "Ana"}], "logs": []}"#;
        let batches = parse_backup_document(raw)?;

        let names: Vec<&str> = batches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["users", "logs"]);
        assert_eq!(batches[0].documents.len(), 1);
        assert_eq!(batches[0].documents[0].get_str("name")?, "Ana");
        assert!(batches[1].documents.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_empty_backup_document() -> Result<()> {
        let batches = parse_backup_document("{}")?;
        assert!(batches.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_keeps_nested_json_values() -> Result<()> {
        let raw = json!({
            "products": [
                {
                    "name": "Widget",
                    "price": 9.5,
                    "active": true,
                    "tags": ["red", "blue"],
                    "meta": { "discontinued": null }
                }
            ]
        })
        .to_string();

        let batches = parse_backup_document(&raw)?;
        let document = &batches[0].documents[0];

        assert_eq!(document.get_str("name")?, "Widget");
        assert_eq!(document.get_f64("price")?, 9.5);
        assert!(document.get_bool("active")?);
        assert_eq!(document.get_array("tags")?.len(), 2);
        assert!(document.get_document("meta")?.get("discontinued").is_some());
        Ok(())
    }

    #[test]
    fn test_parse_reads_extended_json_object_ids() -> Result<()> {
        let raw = r#"{"orders": [{"_id": {"$oid": "507f1f77bcf86cd799439011"}, "total": 12.0}]}"#;
        let batches = parse_backup_document(raw)?;
        let document = &batches[0].documents[0];

        assert_eq!(
            document.get_object_id("_id")?.to_hex(),
            "507f1f77bcf86cd799439011"
        );
        Ok(())
    }

    #[test]
    fn test_parse_rejects_non_object_top_level() {
        assert!(parse_backup_document("[1, 2, 3]").is_err());
        assert!(parse_backup_document("\"users\"").is_err());
        assert!(parse_backup_document("not json at all").is_err());
    }

    #[test]
    fn test_parse_rejects_non_array_collection_value() {
        let result = parse_backup_document(r#"{"users": {"name": "Ana"}}"#);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("not an array"));
    }

    #[test]
    fn test_parse_rejects_non_object_record() {
        let result = parse_backup_document(r#"{"users": [42]}"#);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("not a JSON object"));
    }
}
