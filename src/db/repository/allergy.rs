use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::*;

pub fn get_allergies(
    conn: &Connection,
    patient_id: PatientId,
) -> Result<Vec<Allergy>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, allergen, reaction_type, severity
         FROM allergies WHERE patient_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![patient_id], |row| {
        Ok(Allergy {
            id: row.get(0)?,
            allergen: row.get(1)?,
            reaction: row.get(2)?,
            severity: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
