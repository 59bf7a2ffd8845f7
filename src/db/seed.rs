//! Demo dataset: five patients with distinct clinical scenarios plus the
//! global contraindication rule table.

use rusqlite::{params, Connection};

use super::{insert_contraindication, DatabaseError};
use crate::models::RiskLevel;

const CAD: &str = "Coronary Artery Disease";
const HTN: &str = "Hypertension";
const T2D: &str = "Type 2 Diabetes";
const ASTHMA: &str = "Asthma";
const MG: &str = "Myasthenia Gravis";
const CKD: &str = "Chronic Kidney Disease";
const ULCER: &str = "Peptic Ulcer";

// Child tables first so foreign keys never dangle mid-clear.
const CLEAR_ORDER: &[&str] = &[
    "contraindications",
    "lab_results",
    "visits",
    "surgeries",
    "current_medications",
    "allergies",
    "chronic_diseases",
    "patients",
];

type PatientRow = (
    i64,
    &'static str,
    &'static str,
    u32,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const PATIENTS: &[PatientRow] = &[
    (1, "29012345678901", "Abdullah Youssef", 56, "male", "A+", "01012345678", "01098765432"),
    (2, "29112345678902", "Ahmed Mohamed Ali", 58, "male", "B+", "01123456789", "01187654321"),
    (3, "29212345678903", "Sara Khaled", 34, "female", "O+", "01234567890", "01276543210"),
    (4, "29312345678904", "Mahmoud Abdelrahman", 41, "male", "AB+", "01345678901", "01365432109"),
    (5, "29412345678905", "Fatma Hassan", 31, "female", "O-", "01456789012", "01454321098"),
];

// (patient, name, code, diagnosed, severity, notes)
const DISEASES: &[(i64, &str, &str, &str, &str, &str)] = &[
    (1, CAD, "coronary_artery_disease", "2020-03-15", "severe", "Stent placed in 2023"),
    (1, HTN, "hypertension", "2018-07-20", "moderate", "Controlled on medication"),
    (2, HTN, "hypertension", "2015-01-10", "moderate", "Controlled on amlodipine"),
    (2, T2D, "type2_diabetes", "2017-05-22", "moderate", "Last HbA1c 7.2%"),
    (
        3,
        MG,
        "myasthenia_gravis",
        "2022-08-14",
        "moderate",
        "Anti-AChR positive, responds to pyridostigmine",
    ),
    (4, ASTHMA, "asthma", "2010-04-05", "moderate", "Uses rescue inhaler as needed"),
];

// (patient, allergen, reaction, severity)
const ALLERGIES: &[(i64, &str, &str, &str)] = &[
    (2, "Penicillin", "Anaphylaxis", "severe"),
    (4, "Aspirin", "Bronchospasm", "severe"),
    (4, "Dust", "Rhinitis and shortness of breath", "moderate"),
    (5, "Sulfa drugs", "Skin rash", "mild"),
];

// (patient, drug, dose, frequency, reason)
const MEDICATIONS: &[(i64, &str, &str, &str, &str)] = &[
    (1, "Aspirin", "75mg", "once daily", "Antiplatelet after stent"),
    (1, "Atorvastatin", "20mg", "once daily in the evening", "Cholesterol lowering"),
    (1, "Bisoprolol", "5mg", "once daily in the morning", "Rate control and blood pressure"),
    (2, "Amlodipine", "5mg", "once daily", "Blood pressure"),
    (2, "Metformin", "500mg", "twice daily", "Glycemic control"),
    (
        3,
        "Pyridostigmine",
        "60mg",
        "three times daily",
        "Myasthenia gravis, cholinesterase inhibitor",
    ),
    (4, "Salbutamol Inhaler", "100mcg", "as needed", "Asthma rescue inhaler"),
];

// (patient, name, date, notes)
const SURGERIES: &[(i64, &str, &str, &str)] = &[(
    1,
    "Cardiac catheterization with stent",
    "2023-06-10",
    "LAD stent, no complications",
)];

// (patient, date, department, reason, diagnosis, treatment, notes)
const VISITS: &[(i64, &str, &str, &str, &str, &str, &str)] = &[
    (
        1,
        "2024-11-20",
        "Emergency",
        "Acute chest pain",
        "Unstable angina",
        "Nitroglycerin and monitoring",
        "Improved after treatment, needs follow-up",
    ),
    (
        1,
        "2025-03-15",
        "Cardiology clinic",
        "Routine follow-up",
        "Stable",
        "Continue medications",
        "Normal ECG, blood pressure controlled",
    ),
    (
        2,
        "2025-01-10",
        "Internal medicine clinic",
        "Diabetes follow-up",
        "Uncontrolled diabetes",
        "Metformin dose increased",
        "Needs better diet adherence",
    ),
    (
        3,
        "2024-06-20",
        "Neurology clinic",
        "MG follow-up",
        "Stable myasthenia gravis",
        "Continue pyridostigmine",
        "Good muscle strength",
    ),
    (
        3,
        "2025-01-08",
        "Emergency",
        "Generalized weakness and dysphagia",
        "MG exacerbation, possible crisis",
        "IV immunoglobulin and respiratory monitoring",
        "Had stopped medication for two days",
    ),
    (
        4,
        "2024-12-05",
        "Emergency",
        "Acute asthma attack",
        "Status asthmaticus",
        "Nebulizer and systemic steroids",
        "Improved within two hours, avoid triggers",
    ),
    (
        5,
        "2025-02-01",
        "General clinic",
        "Recurrent headache",
        "Tension headache",
        "Paracetamol and advice",
        "No red flags, family history of diabetes",
    ),
];

// (patient, test, value, range, date, abnormal)
const LABS: &[(i64, &str, &str, &str, &str, bool)] = &[
    (1, "Troponin I", "0.02 ng/mL", "< 0.04 ng/mL", "2024-11-20", false),
    (1, "LDL Cholesterol", "145 mg/dL", "< 100 mg/dL", "2025-03-15", true),
    (1, "HDL Cholesterol", "38 mg/dL", "> 40 mg/dL", "2025-03-15", true),
    (1, "HbA1c", "5.8%", "< 5.7%", "2025-03-15", true),
    (1, "Creatinine", "1.1 mg/dL", "0.7-1.3 mg/dL", "2025-03-15", false),
    (2, "HbA1c", "7.2%", "< 7.0%", "2025-01-10", true),
    (2, "Fasting Blood Sugar", "165 mg/dL", "70-100 mg/dL", "2025-01-10", true),
    (2, "Creatinine", "1.0 mg/dL", "0.7-1.3 mg/dL", "2025-01-10", false),
    (2, "Blood Pressure", "150/95 mmHg", "< 140/90 mmHg", "2025-01-10", true),
    (3, "Anti-AChR Antibodies", "15.2 nmol/L", "< 0.4 nmol/L", "2022-08-14", true),
    (3, "CBC - WBC", "7.5 x10^3/uL", "4.5-11.0 x10^3/uL", "2025-01-08", false),
    (3, "Thyroid Function (TSH)", "2.8 mIU/L", "0.4-4.0 mIU/L", "2024-06-20", false),
    (3, "CRP", "3.2 mg/L", "< 5 mg/L", "2025-01-08", false),
    (4, "SpO2", "91%", "> 95%", "2024-12-05", true),
    (4, "ABG - pH", "7.38", "7.35-7.45", "2024-12-05", false),
    (4, "ABG - pCO2", "48 mmHg", "35-45 mmHg", "2024-12-05", true),
    (4, "CBC - Eosinophils", "8%", "1-4%", "2024-12-05", true),
    (5, "CBC", "normal", "normal", "2025-02-01", false),
    (5, "Fasting Blood Sugar", "92 mg/dL", "70-100 mg/dL", "2025-02-01", false),
    (5, "TSH", "2.1 mIU/L", "0.4-4.0 mIU/L", "2025-02-01", false),
];

const CONTRAINDICATIONS: &[(&str, &str, RiskLevel, &str, &str)] = &[
    (
        MG,
        "Magnesium",
        RiskLevel::Critical,
        "Impairs neuromuscular transmission and can precipitate respiratory crisis",
        "MG Foundation / UpToDate",
    ),
    (
        MG,
        "Aminoglycosides",
        RiskLevel::Critical,
        "Worsens muscle weakness and may trigger myasthenic crisis",
        "FDA Drug Safety Communication",
    ),
    (
        MG,
        "Beta-blockers",
        RiskLevel::High,
        "May increase weakness and mask signs of deterioration",
        "British National Formulary",
    ),
    (
        MG,
        "Fluoroquinolones",
        RiskLevel::High,
        "Exacerbates muscle weakness (boxed warning)",
        "FDA Black Box Warning",
    ),
    (
        MG,
        "Succinylcholine",
        RiskLevel::Critical,
        "Unpredictable response, resistance or hypersensitivity",
        "Miller's Anesthesia",
    ),
    (
        MG,
        "D-Penicillamine",
        RiskLevel::Critical,
        "May induce or worsen myasthenia gravis",
        "UpToDate",
    ),
    (
        MG,
        "Telithromycin",
        RiskLevel::Critical,
        "Reports of acute exacerbation and death in MG patients",
        "FDA Safety Alert",
    ),
    (
        CAD,
        "NSAIDs",
        RiskLevel::High,
        "Raises risk of cardiovascular events and thrombosis",
        "AHA Guidelines",
    ),
    (CAD, "Triptans", RiskLevel::High, "Causes coronary vasoconstriction", "ESC Guidelines"),
    (
        HTN,
        "NSAIDs",
        RiskLevel::Moderate,
        "Raises blood pressure and blunts antihypertensives",
        "JNC Guidelines",
    ),
    (
        HTN,
        "Pseudoephedrine",
        RiskLevel::High,
        "Raises blood pressure significantly",
        "FDA OTC Guidelines",
    ),
    (
        T2D,
        "Corticosteroids",
        RiskLevel::High,
        "Raises blood glucose significantly",
        "ADA Standards of Care",
    ),
    (
        T2D,
        "Thiazide Diuretics",
        RiskLevel::Moderate,
        "May raise blood glucose",
        "ADA Standards of Care",
    ),
    (
        ASTHMA,
        "Beta-blockers",
        RiskLevel::High,
        "Causes bronchoconstriction, risk of severe attack",
        "GINA Guidelines",
    ),
    (
        ASTHMA,
        "Aspirin",
        RiskLevel::High,
        "May trigger attacks in aspirin-sensitive asthma",
        "GINA Guidelines",
    ),
    (
        ASTHMA,
        "NSAIDs",
        RiskLevel::Moderate,
        "May worsen asthma in some patients",
        "GINA Guidelines",
    ),
    (CKD, "NSAIDs", RiskLevel::High, "Accelerates loss of kidney function", "KDIGO Guidelines"),
    (CKD, "Metformin", RiskLevel::High, "Risk of lactic acidosis", "FDA Drug Safety"),
    (
        CKD,
        "Aminoglycosides",
        RiskLevel::High,
        "Nephrotoxic, accumulates in renal failure",
        "Sanford Guide",
    ),
    (ULCER, "Aspirin", RiskLevel::High, "Raises risk of gastric bleeding", "ACG Guidelines"),
    (
        ULCER,
        "NSAIDs",
        RiskLevel::High,
        "Erodes gastric mucosa and worsens ulcers",
        "ACG Guidelines",
    ),
    (
        ULCER,
        "Corticosteroids",
        RiskLevel::Moderate,
        "Raises risk of ulceration and bleeding",
        "ACG Guidelines",
    ),
];

/// Replace all clinical data with the demo dataset.
pub fn seed_demo_data(conn: &Connection) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;

    for table in CLEAR_ORDER {
        tx.execute(&format!("DELETE FROM {table}"), [])?;
    }

    for p in PATIENTS {
        tx.execute(
            "INSERT INTO patients (patient_id, national_id, name, age, sex, blood_type, phone, emergency_contact)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![p.0, p.1, p.2, p.3, p.4, p.5, p.6, p.7],
        )?;
    }

    for d in DISEASES {
        tx.execute(
            "INSERT INTO chronic_diseases (patient_id, disease_name, disease_code, diagnosed_date, severity, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![d.0, d.1, d.2, d.3, d.4, d.5],
        )?;
    }

    for a in ALLERGIES {
        tx.execute(
            "INSERT INTO allergies (patient_id, allergen, reaction_type, severity) VALUES (?1, ?2, ?3, ?4)",
            params![a.0, a.1, a.2, a.3],
        )?;
    }

    for m in MEDICATIONS {
        tx.execute(
            "INSERT INTO current_medications (patient_id, drug_name, dose, frequency, reason)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![m.0, m.1, m.2, m.3, m.4],
        )?;
    }

    for s in SURGERIES {
        tx.execute(
            "INSERT INTO surgeries (patient_id, surgery_name, surgery_date, notes) VALUES (?1, ?2, ?3, ?4)",
            params![s.0, s.1, s.2, s.3],
        )?;
    }

    for v in VISITS {
        tx.execute(
            "INSERT INTO visits (patient_id, visit_date, department, reason, diagnosis, treatment, doctor_notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![v.0, v.1, v.2, v.3, v.4, v.5, v.6],
        )?;
    }

    for l in LABS {
        tx.execute(
            "INSERT INTO lab_results (patient_id, test_name, result_value, normal_range, test_date, is_abnormal)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![l.0, l.1, l.2, l.3, l.4, l.5 as i64],
        )?;
    }

    for &(disease, substance, risk, reason, source) in CONTRAINDICATIONS {
        insert_contraindication(&tx, disease, substance, risk, reason, source)?;
    }

    tx.commit()?;
    tracing::info!(
        patients = PATIENTS.len(),
        contraindications = CONTRAINDICATIONS.len(),
        "Demo data seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn seeds_all_tables() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();
        assert_eq!(count(&conn, "patients"), 5);
        assert_eq!(count(&conn, "chronic_diseases"), 6);
        assert_eq!(count(&conn, "allergies"), 4);
        assert_eq!(count(&conn, "lab_results"), 20);
        assert_eq!(count(&conn, "contraindications"), 22);
    }

    #[test]
    fn reseeding_replaces_rather_than_duplicates() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();
        seed_demo_data(&conn).unwrap();
        assert_eq!(count(&conn, "patients"), 5);
        assert_eq!(count(&conn, "contraindications"), 22);
    }

    #[test]
    fn rule_disease_names_match_recorded_diseases() {
        let conn = open_memory_database().unwrap();
        seed_demo_data(&conn).unwrap();
        let orphans: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM chronic_diseases
                 WHERE disease_name NOT IN (SELECT disease_name FROM contraindications)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(orphans, 0);
    }
}
