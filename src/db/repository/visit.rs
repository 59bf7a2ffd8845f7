use chrono::NaiveDate;
use rusqlite::{params, Connection};

use super::parse_date;
use crate::db::DatabaseError;
use crate::models::*;

/// Input for [`add_visit`].
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub visit_date: NaiveDate,
    pub department: Option<String>,
    pub reason: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub doctor_notes: Option<String>,
}

/// Visit history, newest first.
pub fn get_visits(conn: &Connection, patient_id: PatientId) -> Result<Vec<Visit>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, visit_date, department, reason, diagnosis, treatment, doctor_notes
         FROM visits WHERE patient_id = ?1
         ORDER BY visit_date DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![patient_id], |row| {
        Ok(Visit {
            id: row.get(0)?,
            visit_date: parse_date(row.get(1)?),
            department: row.get(2)?,
            reason: row.get(3)?,
            diagnosis: row.get(4)?,
            treatment: row.get(5)?,
            doctor_notes: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

pub fn add_visit(
    conn: &Connection,
    patient_id: PatientId,
    visit: &NewVisit,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO visits (patient_id, visit_date, department, reason, diagnosis, treatment, doctor_notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            patient_id,
            visit.visit_date.to_string(),
            visit.department,
            visit.reason,
            visit.diagnosis,
            visit.treatment,
            visit.doctor_notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
