use std::str::FromStr;

use rusqlite::{params_from_iter, Connection};

use crate::db::DatabaseError;
use crate::models::*;

/// Contraindications for any of the given disease names, most severe first.
/// An empty name list returns immediately without a query.
pub fn get_contraindications_for(
    conn: &Connection,
    disease_names: &[String],
) -> Result<Vec<Contraindication>, DatabaseError> {
    if disease_names.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; disease_names.len()].join(", ");
    let sql = format!(
        "SELECT id, disease_name, contraindicated_substance, risk_level, reason, source
         FROM contraindications
         WHERE disease_name IN ({placeholders})
         ORDER BY CASE risk_level
             WHEN 'critical' THEN 1
             WHEN 'high' THEN 2
             WHEN 'moderate' THEN 3
         END, id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(disease_names.iter()), |row| {
        Ok(ContraindicationRow {
            id: row.get(0)?,
            disease_name: row.get(1)?,
            substance: row.get(2)?,
            risk_level: row.get(3)?,
            reason: row.get(4)?,
            source: row.get(5)?,
        })
    })?;

    let mut rules = Vec::new();
    for row in rows {
        rules.push(contraindication_from_row(row?)?);
    }
    Ok(rules)
}

pub fn insert_contraindication(
    conn: &Connection,
    disease_name: &str,
    substance: &str,
    risk_level: RiskLevel,
    reason: &str,
    source: &str,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO contraindications (disease_name, contraindicated_substance, risk_level, reason, source)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![disease_name, substance, risk_level.as_str(), reason, source],
    )?;
    Ok(conn.last_insert_rowid())
}

// Internal row type; risk level is validated after the row is read.
struct ContraindicationRow {
    id: i64,
    disease_name: String,
    substance: String,
    risk_level: String,
    reason: Option<String>,
    source: Option<String>,
}

fn contraindication_from_row(row: ContraindicationRow) -> Result<Contraindication, DatabaseError> {
    Ok(Contraindication {
        id: row.id,
        disease_name: row.disease_name,
        substance: row.substance,
        risk_level: RiskLevel::from_str(&row.risk_level)?,
        reason: row.reason,
        source: row.source,
    })
}
