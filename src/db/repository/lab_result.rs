use rusqlite::{params, Connection};

use super::parse_date;
use crate::db::DatabaseError;
use crate::models::*;

/// All lab results, newest first.
pub fn get_lab_results(
    conn: &Connection,
    patient_id: PatientId,
) -> Result<Vec<LabResult>, DatabaseError> {
    query_labs(
        conn,
        "SELECT id, test_name, result_value, normal_range, test_date, is_abnormal
         FROM lab_results WHERE patient_id = ?1
         ORDER BY test_date DESC, id",
        patient_id,
    )
}

/// Abnormal lab results only, newest first.
pub fn get_abnormal_lab_results(
    conn: &Connection,
    patient_id: PatientId,
) -> Result<Vec<LabResult>, DatabaseError> {
    query_labs(
        conn,
        "SELECT id, test_name, result_value, normal_range, test_date, is_abnormal
         FROM lab_results WHERE patient_id = ?1 AND is_abnormal = 1
         ORDER BY test_date DESC, id",
        patient_id,
    )
}

fn query_labs(
    conn: &Connection,
    sql: &str,
    patient_id: PatientId,
) -> Result<Vec<LabResult>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![patient_id], |row| {
        Ok(LabResult {
            id: row.get(0)?,
            test_name: row.get(1)?,
            result_value: row.get(2)?,
            normal_range: row.get(3)?,
            test_date: parse_date(row.get(4)?),
            is_abnormal: row.get::<_, i64>(5)? != 0,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
