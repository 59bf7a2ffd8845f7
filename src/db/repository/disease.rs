use rusqlite::{params, Connection};

use super::parse_date;
use crate::db::DatabaseError;
use crate::models::*;

pub fn get_chronic_diseases(
    conn: &Connection,
    patient_id: PatientId,
) -> Result<Vec<ChronicDisease>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, disease_name, disease_code, diagnosed_date, severity, notes
         FROM chronic_diseases WHERE patient_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![patient_id], |row| {
        Ok(ChronicDisease {
            id: row.get(0)?,
            name: row.get(1)?,
            code: row.get(2)?,
            diagnosed_date: parse_date(row.get(3)?),
            severity: row.get(4)?,
            notes: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
