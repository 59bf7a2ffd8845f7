use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::*;

pub fn get_medications(
    conn: &Connection,
    patient_id: PatientId,
) -> Result<Vec<Medication>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, drug_name, dose, frequency, reason
         FROM current_medications WHERE patient_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![patient_id], |row| {
        Ok(Medication {
            id: row.get(0)?,
            drug_name: row.get(1)?,
            dose: row.get(2)?,
            frequency: row.get(3)?,
            reason: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
