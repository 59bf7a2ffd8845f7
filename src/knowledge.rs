//! Read-only access to the clinical knowledge base.
//!
//! The session snapshot loads through this seam so it can be exercised
//! against in-memory fakes as well as SQLite.

use rusqlite::Connection;

use crate::db::{self, DatabaseError};
use crate::models::*;

/// Per-patient record fetches plus the global contraindication rule table.
pub trait KnowledgeBase {
    fn patient(&self, id: PatientId) -> Result<Option<Patient>, DatabaseError>;
    fn chronic_diseases(&self, id: PatientId) -> Result<Vec<ChronicDisease>, DatabaseError>;
    fn allergies(&self, id: PatientId) -> Result<Vec<Allergy>, DatabaseError>;
    fn medications(&self, id: PatientId) -> Result<Vec<Medication>, DatabaseError>;
    fn surgeries(&self, id: PatientId) -> Result<Vec<Surgery>, DatabaseError>;
    /// Newest first.
    fn visits(&self, id: PatientId) -> Result<Vec<Visit>, DatabaseError>;
    /// Newest first.
    fn lab_results(&self, id: PatientId) -> Result<Vec<LabResult>, DatabaseError>;
    /// Newest first.
    fn abnormal_lab_results(&self, id: PatientId) -> Result<Vec<LabResult>, DatabaseError>;
    /// Rules for any of the named diseases, most severe first.
    fn contraindications_for(
        &self,
        disease_names: &[String],
    ) -> Result<Vec<Contraindication>, DatabaseError>;
}

/// [`KnowledgeBase`] over a borrowed SQLite connection.
pub struct SqliteKnowledgeBase<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteKnowledgeBase<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl KnowledgeBase for SqliteKnowledgeBase<'_> {
    fn patient(&self, id: PatientId) -> Result<Option<Patient>, DatabaseError> {
        db::get_patient(self.conn, id)
    }

    fn chronic_diseases(&self, id: PatientId) -> Result<Vec<ChronicDisease>, DatabaseError> {
        db::get_chronic_diseases(self.conn, id)
    }

    fn allergies(&self, id: PatientId) -> Result<Vec<Allergy>, DatabaseError> {
        db::get_allergies(self.conn, id)
    }

    fn medications(&self, id: PatientId) -> Result<Vec<Medication>, DatabaseError> {
        db::get_medications(self.conn, id)
    }

    fn surgeries(&self, id: PatientId) -> Result<Vec<Surgery>, DatabaseError> {
        db::get_surgeries(self.conn, id)
    }

    fn visits(&self, id: PatientId) -> Result<Vec<Visit>, DatabaseError> {
        db::get_visits(self.conn, id)
    }

    fn lab_results(&self, id: PatientId) -> Result<Vec<LabResult>, DatabaseError> {
        db::get_lab_results(self.conn, id)
    }

    fn abnormal_lab_results(&self, id: PatientId) -> Result<Vec<LabResult>, DatabaseError> {
        db::get_abnormal_lab_results(self.conn, id)
    }

    fn contraindications_for(
        &self,
        disease_names: &[String],
    ) -> Result<Vec<Contraindication>, DatabaseError> {
        db::get_contraindications_for(self.conn, disease_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_memory_database, seed::seed_demo_data};

    #[test]
    fn sqlite_knowledge_base_reads_seeded_records() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();
        let kb = SqliteKnowledgeBase::new(&conn);

        assert_eq!(kb.patient(2).unwrap().unwrap().name, "Ahmed Mohamed Ali");
        assert_eq!(kb.allergies(2).unwrap()[0].allergen, "Penicillin");
        assert_eq!(kb.chronic_diseases(2).unwrap().len(), 2);
        assert_eq!(kb.medications(1).unwrap().len(), 3);
        assert_eq!(kb.surgeries(1).unwrap().len(), 1);
        assert!(kb.patient(99).unwrap().is_none());
    }

    #[test]
    fn empty_disease_list_yields_no_rules() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();
        let kb = SqliteKnowledgeBase::new(&conn);
        assert!(kb.contraindications_for(&[]).unwrap().is_empty());
    }
}
