use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, row_error},
    models::Correlation,
};

fn row_to_correlation(row: &Row) -> Result<Correlation, rusqlite::Error> {
    let last_updated_str: String = row.get("last_updated")?;

    Ok(Correlation {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        food_name: row.get("food_name")?,
        symptom_name: row.get("symptom_name")?,
        confidence: row.get("confidence")?,
        occurrences: row.get("occurrences")?,
        last_updated: parse_datetime(&last_updated_str, "last_updated").map_err(row_error)?,
    })
}

impl Database {
    /// Look up the record for one (food, symptom) pair. Name matching is
    /// case-insensitive (NOCASE collation on both columns).
    pub async fn get_correlation(
        &self,
        user_id: &str,
        food_name: &str,
        symptom_name: &str,
    ) -> Result<Option<Correlation>> {
        let user_id = user_id.to_string();
        let food_name = food_name.to_string();
        let symptom_name = symptom_name.to_string();
        self.execute(move |conn| {
            let correlation = conn
                .query_row(
                    "SELECT id, user_id, food_name, symptom_name, confidence, occurrences, last_updated
                     FROM correlations
                     WHERE user_id = ?1 AND food_name = ?2 AND symptom_name = ?3",
                    params![user_id, food_name, symptom_name],
                    row_to_correlation,
                )
                .optional()
                .with_context(|| "failed to query correlation")?;
            Ok(correlation)
        })
        .await
    }

    /// All records for one user, strongest association first.
    pub async fn list_correlations(&self, user_id: &str) -> Result<Vec<Correlation>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, food_name, symptom_name, confidence, occurrences, last_updated
                 FROM correlations
                 WHERE user_id = ?1
                 ORDER BY confidence DESC, occurrences DESC",
            )?;

            let correlations_iter = stmt.query_map(params![user_id], row_to_correlation)?;

            let mut correlations = Vec::new();
            for correlation_result in correlations_iter {
                correlations.push(correlation_result?);
            }

            Ok(correlations)
        })
        .await
    }

    /// Insert or update the record for one pair. An existing row keeps its
    /// id but takes the new display names, confidence, occurrences and
    /// last_updated timestamp.
    pub async fn upsert_correlation(&self, correlation: &Correlation) -> Result<Correlation> {
        let record = correlation.clone();
        self.execute(move |conn| upsert_one(conn, &record))
            .await
    }

    /// Write the full output of an analysis run in a single transaction:
    /// upsert every computed pair, then prune records whose pair the run no
    /// longer produced. Rolls back entirely on any failure.
    pub async fn write_analysis_results(
        &self,
        user_id: &str,
        results: Vec<Correlation>,
    ) -> Result<()> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            let mut kept_ids: HashSet<String> = HashSet::new();
            for record in &results {
                let written = upsert_one(&tx, record)?;
                kept_ids.insert(written.id);
            }

            let existing_ids: Vec<String> = {
                let mut stmt =
                    tx.prepare("SELECT id FROM correlations WHERE user_id = ?1")?;
                let ids_iter = stmt.query_map(params![user_id], |row| row.get(0))?;
                let mut ids = Vec::new();
                for id_result in ids_iter {
                    ids.push(id_result?);
                }
                ids
            };

            for id in existing_ids {
                if !kept_ids.contains(&id) {
                    tx.execute("DELETE FROM correlations WHERE id = ?1", params![id])
                        .with_context(|| "failed to prune stale correlation")?;
                }
            }

            tx.commit().context("failed to commit analysis results")?;
            Ok(())
        })
        .await
    }
}

fn upsert_one(conn: &rusqlite::Connection, record: &Correlation) -> Result<Correlation> {
    let existing_id: Option<String> = conn
        .query_row(
            "SELECT id FROM correlations
             WHERE user_id = ?1 AND food_name = ?2 AND symptom_name = ?3",
            params![record.user_id, record.food_name, record.symptom_name],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| "failed to look up existing correlation")?;

    let now = Utc::now();
    let mut written = record.clone();
    written.last_updated = now;

    match existing_id {
        Some(id) => {
            conn.execute(
                "UPDATE correlations
                 SET food_name = ?1,
                     symptom_name = ?2,
                     confidence = ?3,
                     occurrences = ?4,
                     last_updated = ?5
                 WHERE id = ?6",
                params![
                    record.food_name,
                    record.symptom_name,
                    record.confidence,
                    record.occurrences,
                    now.to_rfc3339(),
                    id,
                ],
            )
            .with_context(|| "failed to update correlation")?;
            written.id = id;
        }
        None => {
            conn.execute(
                "INSERT INTO correlations (id, user_id, food_name, symptom_name, confidence, occurrences, last_updated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.user_id,
                    record.food_name,
                    record.symptom_name,
                    record.confidence,
                    record.occurrences,
                    now.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert correlation")?;
        }
    }

    Ok(written)
}
