use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, row_error},
    models::FoodEntry,
};

fn row_to_food_entry(row: &Row) -> Result<FoodEntry, rusqlite::Error> {
    let occurred_at_str: String = row.get("occurred_at")?;

    Ok(FoodEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        food_name: row.get("food_name")?,
        category: row.get("category")?,
        occurred_at: parse_datetime(&occurred_at_str, "occurred_at").map_err(row_error)?,
    })
}

impl Database {
    pub async fn insert_food_entry(&self, entry: &FoodEntry) -> Result<()> {
        let record = entry.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO food_entries (id, user_id, food_name, category, occurred_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.user_id,
                    record.food_name,
                    record.category,
                    record.occurred_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert food entry")?;
            Ok(())
        })
        .await
    }

    /// Full history for one user, ascending by occurrence time.
    pub async fn get_food_entries_for_user(&self, user_id: &str) -> Result<Vec<FoodEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, food_name, category, occurred_at
                 FROM food_entries
                 WHERE user_id = ?1
                 ORDER BY occurred_at ASC",
            )?;

            let entries_iter = stmt.query_map(params![user_id], row_to_food_entry)?;

            let mut entries = Vec::new();
            for entry_result in entries_iter {
                entries.push(entry_result?);
            }

            Ok(entries)
        })
        .await
    }

    /// Delete a food entry. Scoped to the owning user so one user cannot
    /// remove another user's history.
    pub async fn delete_food_entry(&self, user_id: &str, entry_id: &str) -> Result<bool> {
        let user_id = user_id.to_string();
        let entry_id = entry_id.to_string();
        self.execute(move |conn| {
            let deleted = conn
                .execute(
                    "DELETE FROM food_entries WHERE user_id = ?1 AND id = ?2",
                    params![user_id, entry_id],
                )
                .with_context(|| "failed to delete food entry")?;
            Ok(deleted > 0)
        })
        .await
    }
}
