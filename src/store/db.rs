//! libSQL-backed lead record store.
//!
//! One append-only `leads` table. Records are written exactly once per
//! accepted submission and never updated or deleted, so every operation is a
//! single statement and no cross-record transactions are needed.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use libsql::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::DatabaseError;
use crate::pipeline::types::Intent;

/// How many records the stats read path returns as "recent".
const RECENT_LEADS_LIMIT: i64 = 10;

/// A lead record about to be persisted.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub company: String,
    pub message: String,
    pub phone: Option<String>,
    pub lead_score: u8,
    pub intent: Intent,
    pub response_time_ms: i64,
    pub email_sent: bool,
    pub response_text: String,
}

/// Reduced projection of a record for the stats read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentLead {
    pub name: String,
    pub company: String,
    pub score: i64,
    pub response_time_ms: i64,
    pub timestamp: String,
    pub intent: String,
}

/// Aggregate stats over all persisted records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadStats {
    pub total_leads: i64,
    pub avg_response_time_ms: i64,
    pub emails_sent: i64,
    /// Percentage of records with a successful email send.
    pub email_success_rate: f64,
    pub intent_breakdown: HashMap<String, i64>,
    /// 10 most recent records, newest first.
    pub recent_leads: Vec<RecentLead>,
}

/// libSQL lead store.
///
/// Holds a single connection reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LeadStore {
    #[allow(dead_code)]
    db: Arc<libsql::Database>,
    conn: Connection,
}

impl LeadStore {
    /// Open (or create) a local database file and ensure the schema exists.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        info!(path = %path.display(), "Lead database opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        Ok(store)
    }

    /// Idempotently create the `leads` table.
    pub async fn init_schema(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS leads (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    timestamp TEXT NOT NULL,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    company TEXT NOT NULL,
                    message TEXT NOT NULL,
                    phone TEXT,
                    lead_score INTEGER NOT NULL,
                    intent TEXT NOT NULL,
                    response_time_ms INTEGER,
                    email_sent INTEGER NOT NULL DEFAULT 0,
                    response_text TEXT NOT NULL,
                    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
                );",
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("init_schema: {e}")))?;
        debug!("Lead schema ensured");
        Ok(())
    }

    /// Append one record and return its assigned id.
    pub async fn save(&self, lead: &NewLead) -> Result<i64, DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO leads (timestamp, name, email, company, message, phone, lead_score, intent, response_time_ms, email_sent, response_text) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    lead.timestamp.to_rfc3339(),
                    lead.name.clone(),
                    lead.email.clone(),
                    lead.company.clone(),
                    lead.message.clone(),
                    opt_text(&lead.phone),
                    lead.lead_score as i64,
                    lead.intent.as_str(),
                    lead.response_time_ms,
                    lead.email_sent as i64,
                    lead.response_text.clone(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("save: {e}")))?;

        let id = self.conn.last_insert_rowid();
        debug!(lead_id = id, intent = %lead.intent, "Lead record saved");
        Ok(id)
    }

    /// Aggregate stats over all records plus the 10 most recent.
    pub async fn stats(&self) -> Result<LeadStats, DatabaseError> {
        let total_leads = self.count_query("SELECT COUNT(*) FROM leads").await?;

        let avg_response_time_ms = {
            let mut rows = self
                .conn
                .query(
                    "SELECT AVG(response_time_ms) FROM leads WHERE response_time_ms IS NOT NULL",
                    (),
                )
                .await
                .map_err(|e| DatabaseError::Query(format!("stats avg: {e}")))?;
            match rows.next().await {
                Ok(Some(row)) => row.get::<f64>(0).unwrap_or(0.0) as i64,
                _ => 0,
            }
        };

        let emails_sent = self
            .count_query("SELECT COUNT(*) FROM leads WHERE email_sent = 1")
            .await?;

        let email_success_rate = if total_leads > 0 {
            emails_sent as f64 / total_leads as f64 * 100.0
        } else {
            0.0
        };

        let mut intent_breakdown = HashMap::new();
        let mut rows = self
            .conn
            .query("SELECT intent, COUNT(*) FROM leads GROUP BY intent", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("stats breakdown: {e}")))?;
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("stats breakdown: {e}")))?
        {
            let intent: String = row
                .get(0)
                .map_err(|e| DatabaseError::Query(format!("stats breakdown row: {e}")))?;
            let count: i64 = row
                .get(1)
                .map_err(|e| DatabaseError::Query(format!("stats breakdown row: {e}")))?;
            intent_breakdown.insert(intent, count);
        }

        // id is assigned in insertion order, so it orders records newest
        // first deterministically even within one created_at second.
        let mut recent_leads = Vec::new();
        let mut rows = self
            .conn
            .query(
                "SELECT name, company, lead_score, response_time_ms, created_at, intent \
                 FROM leads ORDER BY id DESC LIMIT ?1",
                params![RECENT_LEADS_LIMIT],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("stats recent: {e}")))?;
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("stats recent: {e}")))?
        {
            recent_leads.push(row_to_recent(&row)?);
        }

        Ok(LeadStats {
            total_leads,
            avg_response_time_ms,
            emails_sent,
            email_success_rate,
            intent_breakdown,
            recent_leads,
        })
    }

    async fn count_query(&self, sql: &str) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn
            .query(sql, ())
            .await
            .map_err(|e| DatabaseError::Query(format!("count: {e}")))?;
        match rows.next().await {
            Ok(Some(row)) => row
                .get::<i64>(0)
                .map_err(|e| DatabaseError::Query(format!("count row: {e}"))),
            Ok(None) => Ok(0),
            Err(e) => Err(DatabaseError::Query(format!("count: {e}"))),
        }
    }
}

fn opt_text(s: &Option<String>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.clone()),
        None => libsql::Value::Null,
    }
}

fn row_to_recent(row: &libsql::Row) -> Result<RecentLead, DatabaseError> {
    let map = |e: libsql::Error| DatabaseError::Query(format!("recent row: {e}"));
    Ok(RecentLead {
        name: row.get(0).map_err(map)?,
        company: row.get(1).map_err(map)?,
        score: row.get(2).map_err(map)?,
        response_time_ms: row.get::<i64>(3).unwrap_or(0),
        timestamp: row.get(4).map_err(map)?,
        intent: row.get(5).map_err(map)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(intent: Intent, email_sent: bool, response_time_ms: i64) -> NewLead {
        NewLead {
            timestamp: Utc::now(),
            name: "Alice Chen".into(),
            email: "alice@example.com".into(),
            company: "Acme Robotics".into(),
            message: "We need a demo ASAP, I'm the CEO".into(),
            phone: Some("555-0100".into()),
            lead_score: 9,
            intent,
            response_time_ms,
            email_sent,
            response_text: "Hi Alice, ...".into(),
        }
    }

    #[tokio::test]
    async fn save_assigns_monotonic_ids() {
        let store = LeadStore::new_memory().await.unwrap();
        let first = store.save(&lead(Intent::DemoRequest, true, 12)).await.unwrap();
        let second = store.save(&lead(Intent::PricingInquiry, false, 8)).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn stats_on_empty_store() {
        let store = LeadStore::new_memory().await.unwrap();
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_leads, 0);
        assert_eq!(stats.avg_response_time_ms, 0);
        assert_eq!(stats.emails_sent, 0);
        assert_eq!(stats.email_success_rate, 0.0);
        assert!(stats.intent_breakdown.is_empty());
        assert!(stats.recent_leads.is_empty());
    }

    #[tokio::test]
    async fn save_then_stats_reflects_one_more_record() {
        let store = LeadStore::new_memory().await.unwrap();
        store.save(&lead(Intent::DemoRequest, true, 10)).await.unwrap();
        let before = store.stats().await.unwrap();

        store.save(&lead(Intent::DemoRequest, true, 10)).await.unwrap();
        let after = store.stats().await.unwrap();

        assert_eq!(after.total_leads, before.total_leads + 1);
        assert_eq!(
            after.intent_breakdown["demo_request"],
            before.intent_breakdown["demo_request"] + 1
        );
    }

    #[tokio::test]
    async fn stats_aggregates_email_and_timing() {
        let store = LeadStore::new_memory().await.unwrap();
        store.save(&lead(Intent::DemoRequest, true, 10)).await.unwrap();
        store.save(&lead(Intent::SupportQuestion, false, 30)).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_leads, 2);
        assert_eq!(stats.avg_response_time_ms, 20);
        assert_eq!(stats.emails_sent, 1);
        assert!((stats.email_success_rate - 50.0).abs() < f64::EPSILON);
        assert_eq!(stats.intent_breakdown["demo_request"], 1);
        assert_eq!(stats.intent_breakdown["support_question"], 1);
    }

    #[tokio::test]
    async fn recent_leads_newest_first_capped_at_ten() {
        let store = LeadStore::new_memory().await.unwrap();
        for i in 0..12 {
            let mut l = lead(Intent::GeneralInquiry, false, i);
            l.name = format!("Lead {i}");
            store.save(&l).await.unwrap();
        }

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.recent_leads.len(), 10);
        assert_eq!(stats.recent_leads[0].name, "Lead 11");
        assert_eq!(stats.recent_leads[9].name, "Lead 2");
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let store = LeadStore::new_memory().await.unwrap();
        store.init_schema().await.unwrap();
        store.save(&lead(Intent::DemoRequest, true, 5)).await.unwrap();
        store.init_schema().await.unwrap();
        assert_eq!(store.stats().await.unwrap().total_leads, 1);
    }

    #[tokio::test]
    async fn new_local_creates_parent_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("leads.db");
        let store = LeadStore::new_local(&db_path).await.unwrap();
        assert!(db_path.exists());
        drop(store);
    }

    #[tokio::test]
    async fn null_phone_round_trips() {
        let store = LeadStore::new_memory().await.unwrap();
        let mut l = lead(Intent::DemoRequest, true, 5);
        l.phone = None;
        let id = store.save(&l).await.unwrap();
        assert_eq!(id, 1);
    }
}
