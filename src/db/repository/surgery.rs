use rusqlite::{params, Connection};

use super::parse_date;
use crate::db::DatabaseError;
use crate::models::*;

pub fn get_surgeries(
    conn: &Connection,
    patient_id: PatientId,
) -> Result<Vec<Surgery>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, surgery_name, surgery_date, notes
         FROM surgeries WHERE patient_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![patient_id], |row| {
        Ok(Surgery {
            id: row.get(0)?,
            name: row.get(1)?,
            date: parse_date(row.get(2)?),
            notes: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
