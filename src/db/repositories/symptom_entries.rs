use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, row_error},
    models::SymptomEntry,
};

fn row_to_symptom_entry(row: &Row) -> Result<SymptomEntry, rusqlite::Error> {
    let occurred_at_str: String = row.get("occurred_at")?;

    Ok(SymptomEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        symptom_name: row.get("symptom_name")?,
        severity: row.get("severity")?,
        occurred_at: parse_datetime(&occurred_at_str, "occurred_at").map_err(row_error)?,
        notes: row.get("notes")?,
    })
}

impl Database {
    pub async fn insert_symptom_entry(&self, entry: &SymptomEntry) -> Result<()> {
        let record = entry.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO symptom_entries (id, user_id, symptom_name, severity, occurred_at, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.user_id,
                    record.symptom_name,
                    record.severity,
                    record.occurred_at.to_rfc3339(),
                    record.notes,
                ],
            )
            .with_context(|| "failed to insert symptom entry")?;
            Ok(())
        })
        .await
    }

    /// Full history for one user, ascending by occurrence time.
    pub async fn get_symptom_entries_for_user(&self, user_id: &str) -> Result<Vec<SymptomEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, symptom_name, severity, occurred_at, notes
                 FROM symptom_entries
                 WHERE user_id = ?1
                 ORDER BY occurred_at ASC",
            )?;

            let entries_iter = stmt.query_map(params![user_id], row_to_symptom_entry)?;

            let mut entries = Vec::new();
            for entry_result in entries_iter {
                entries.push(entry_result?);
            }

            Ok(entries)
        })
        .await
    }

    pub async fn delete_symptom_entry(&self, user_id: &str, entry_id: &str) -> Result<bool> {
        let user_id = user_id.to_string();
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let deleted = conn
                .execute(
                    "DELETE FROM symptom_entries WHERE user_id = ?1 AND id = ?2",
                    params![user_id, entry_id],
                )
                .with_context(|| "failed to delete symptom entry")?;
            Ok(deleted > 0)
        })
        .await
    }
}
