use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::*;

/// Input for [`add_new_patient`].
#[derive(Debug, Clone, Default)]
pub struct NewPatient {
    pub national_id: Option<String>,
    pub name: String,
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub blood_type: Option<String>,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub diseases: Vec<NewDisease>,
    pub allergies: Vec<NewAllergy>,
    pub medications: Vec<NewMedication>,
}

#[derive(Debug, Clone)]
pub struct NewDisease {
    pub name: String,
    pub code: Option<DiseaseCategory>,
    pub severity: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAllergy {
    pub allergen: String,
    pub reaction: Option<String>,
    pub severity: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMedication {
    pub drug_name: String,
    pub dose: Option<String>,
    pub frequency: Option<String>,
    pub reason: Option<String>,
}

pub fn get_patient(conn: &Connection, id: PatientId) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            "SELECT patient_id, national_id, name, age, sex, blood_type, phone, emergency_contact
             FROM patients WHERE patient_id = ?1",
            params![id],
            |row| {
                Ok(Patient {
                    id: row.get(0)?,
                    national_id: row.get(1)?,
                    name: row.get(2)?,
                    age: to_age(row.get(3)?),
                    sex: row.get(4)?,
                    blood_type: row.get(5)?,
                    phone: row.get(6)?,
                    emergency_contact: row.get(7)?,
                })
            },
        )
        .optional()?;
    Ok(patient)
}

pub fn list_patient_summaries(conn: &Connection) -> Result<Vec<PatientSummary>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT patient_id, name, age, sex FROM patients ORDER BY patient_id")?;
    let rows = stmt.query_map([], |row| {
        Ok(PatientSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            age: to_age(row.get(2)?),
            sex: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

/// Insert a patient with optional diseases, allergies and medications.
/// All rows land or none do. Returns the new patient id.
pub fn add_new_patient(
    conn: &Connection,
    patient: &NewPatient,
) -> Result<PatientId, DatabaseError> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO patients (national_id, name, age, sex, blood_type, phone, emergency_contact)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            patient.national_id,
            patient.name,
            patient.age,
            patient.sex,
            patient.blood_type,
            patient.phone,
            patient.emergency_contact,
        ],
    )
    .map_err(DatabaseError::from_write)?;
    let patient_id = tx.last_insert_rowid();

    for d in &patient.diseases {
        tx.execute(
            "INSERT INTO chronic_diseases (patient_id, disease_name, disease_code, severity)
             VALUES (?1, ?2, ?3, ?4)",
            params![patient_id, d.name, d.code.map(|c| c.as_str()), d.severity],
        )?;
    }

    for a in &patient.allergies {
        tx.execute(
            "INSERT INTO allergies (patient_id, allergen, reaction_type, severity)
             VALUES (?1, ?2, ?3, ?4)",
            params![patient_id, a.allergen, a.reaction, a.severity],
        )?;
    }

    for m in &patient.medications {
        tx.execute(
            "INSERT INTO current_medications (patient_id, drug_name, dose, frequency, reason)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![patient_id, m.drug_name, m.dose, m.frequency, m.reason],
        )?;
    }

    tx.commit()?;
    tracing::info!(patient_id, "New patient registered");
    Ok(patient_id)
}

fn to_age(raw: Option<i64>) -> Option<u32> {
    raw.and_then(|a| u32::try_from(a).ok())
}
