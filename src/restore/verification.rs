// mongotool/src/restore/verification.rs
use anyhow::{Context, Result};
use mongodb::Database;
use mongodb::bson::{Document, doc};

use crate::restore::logic::CollectionBatch;

/// Verifies the restored collections by re-counting their documents.
///
/// A count mismatch is reported as a warning rather than an error; only a
/// rejected count query fails the run.
pub async fn verify_restore(db: &Database, expected: &[CollectionBatch]) -> Result<()> {
    println!(
        "\nPerforming basic restore verification for database: {}",
        db.name()
    );

    for batch in expected {
        let count = db
            .collection::<Document>(&batch.name)
            .count_documents(doc! {})
            .await
            .with_context(|| {
                format!("Failed to count documents in collection '{}'", batch.name)
            })?;

        if count != batch.documents.len() as u64 {
            println!(
                "⚠️ Collection '{}' holds {} documents after restore, expected {}.",
                batch.name,
                count,
                batch.documents.len()
            );
        }
    }

    println!("✓ Basic restore verification completed for {}.", db.name());
    Ok(())
}
