//! Health Sentinel command line.
//!
//! Usage:
//!   sentinel init
//!   sentinel patients
//!   sentinel context --patient <id>
//!   sentinel check --patient <id> <text>
//!   sentinel vitals --patient <id> [--spo2 <v>] [--heart-rate <v>] ...
//!   sentinel summary --patient <id>
//!   sentinel register --name <name> [--age <n>] [--disease <d>]... [--allergy <a>]...
//!   sentinel transfer --patient <id> --reason <text> [--priority <p>] [--notes <text>]
//!   sentinel ask <text>
//!   sentinel diagnose --patient <id> --complaint <text> [--notes <text>] [--transcript <text>]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rusqlite::Connection;

use sentinel_lib::advisor::build_advisor;
use sentinel_lib::config::{self, AdvisorConfig};
use sentinel_lib::db;
use sentinel_lib::intelligence::compile_context;
use sentinel_lib::knowledge::SqliteKnowledgeBase;
use sentinel_lib::models::{Alert, PatientId, VitalKey, VitalReadings};
use sentinel_lib::session_cache::{ActiveSession, SessionSnapshot};
use sentinel_lib::workflow;

#[derive(Parser)]
#[command(name = "sentinel")]
#[command(version)]
#[command(
    about = "Contraindication, allergy and vital-sign alerting for the selected patient",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database file
    #[arg(long, global = true, env = config::DB_PATH_ENV)]
    db: Option<PathBuf>,

    /// Print alerts as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and load the demo patients
    Init,

    /// List patients
    Patients,

    /// Print the advisory context block for a patient
    Context {
        #[arg(short, long)]
        patient: PatientId,
    },

    /// Check free text (medications given, substances taken) for conflicts
    Check {
        #[arg(short, long)]
        patient: PatientId,

        /// Text to scan
        text: String,
    },

    /// Validate vital signs
    Vitals {
        #[arg(short, long)]
        patient: PatientId,
        #[arg(long)]
        systolic_bp: Option<f64>,
        #[arg(long)]
        diastolic_bp: Option<f64>,
        #[arg(long)]
        heart_rate: Option<f64>,
        #[arg(long)]
        spo2: Option<f64>,
        #[arg(long)]
        temperature: Option<f64>,
        #[arg(long)]
        respiratory_rate: Option<f64>,
        #[arg(long)]
        gcs: Option<f64>,
    },

    /// Ask the advisor for a record summary
    Summary {
        #[arg(short, long)]
        patient: PatientId,
    },

    /// Register a new patient
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        national_id: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        sex: Option<String>,
        #[arg(long)]
        blood_type: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        emergency_contact: Option<String>,
        /// Chronic disease (repeatable)
        #[arg(long = "disease")]
        diseases: Vec<String>,
        /// Allergen (repeatable)
        #[arg(long = "allergy")]
        allergies: Vec<String>,
        /// Current medication (repeatable)
        #[arg(long = "medication")]
        medications: Vec<String>,
    },

    /// Record an emergency visit for a patient from reception
    Transfer {
        #[arg(short, long)]
        patient: PatientId,
        #[arg(short, long)]
        reason: String,
        #[arg(long, default_value = "moderate")]
        priority: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Ask the advisor a free-form question
    Ask { text: String },

    /// Run the differential-diagnosis loop
    Diagnose {
        #[arg(short, long)]
        patient: PatientId,
        #[arg(short, long)]
        complaint: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, default_value = "")]
        transcript: String,
    },
}

fn main() -> Result<()> {
    sentinel_lib::init_tracing();
    let cli = Cli::parse();
    let db_path = cli.db.clone().unwrap_or_else(config::database_path);

    match cli.command {
        Commands::Init => {
            let conn = open(&db_path)?;
            db::seed::seed_demo_data(&conn).context("Seeding demo data")?;
            println!("Database ready at {}", db_path.display());
        }
        Commands::Patients => {
            let conn = open(&db_path)?;
            for p in db::list_patient_summaries(&conn)? {
                println!(
                    "{:>3}  {:<24} {:>3}  {}",
                    p.id,
                    p.name,
                    p.age.map(|a| a.to_string()).unwrap_or_default(),
                    p.sex.unwrap_or_default()
                );
            }
        }
        Commands::Context { patient } => {
            let conn = open(&db_path)?;
            println!("{}", compile_context(&load(&conn, patient)?));
        }
        Commands::Check { patient, text } => {
            let conn = open(&db_path)?;
            let session = load(&conn, patient)?;
            print_alerts(&workflow::check_administered(&session, &text), cli.json)?;
        }
        Commands::Vitals {
            patient,
            systolic_bp,
            diastolic_bp,
            heart_rate,
            spo2,
            temperature,
            respiratory_rate,
            gcs,
        } => {
            let conn = open(&db_path)?;
            let mut session = load(&conn, patient)?;
            let mut readings = VitalReadings::new();
            for (key, value) in [
                (VitalKey::SystolicBp, systolic_bp),
                (VitalKey::DiastolicBp, diastolic_bp),
                (VitalKey::HeartRate, heart_rate),
                (VitalKey::Spo2, spo2),
                (VitalKey::Temperature, temperature),
                (VitalKey::RespiratoryRate, respiratory_rate),
                (VitalKey::Gcs, gcs),
            ] {
                readings.set_number(key.as_str(), value);
            }
            let report = workflow::record_vitals(&mut session, readings);
            println!("{}\n", report.status_text);
            print_alerts(&report.alerts, cli.json)?;
        }
        Commands::Summary { patient } => {
            let conn = open(&db_path)?;
            let advisor = build_advisor(&AdvisorConfig::from_env())?;
            let mut active = ActiveSession::new();
            let advice = workflow::select_patient(
                &mut active,
                &SqliteKnowledgeBase::new(&conn),
                patient,
                advisor.as_ref(),
            )?;
            println!("{}", advice.text);
        }
        Commands::Register {
            name,
            national_id,
            age,
            sex,
            blood_type,
            phone,
            emergency_contact,
            diseases,
            allergies,
            medications,
        } => {
            let conn = open(&db_path)?;
            let form = workflow::RegistrationForm {
                national_id,
                name,
                age,
                sex,
                blood_type,
                phone,
                emergency_contact,
                diseases: diseases.join("\n"),
                allergies: allergies.join("\n"),
                medications: medications.join("\n"),
            };
            let id = workflow::register_patient(&conn, &form)?;
            println!("Patient registered (ID: {id})");
        }
        Commands::Transfer {
            patient,
            reason,
            priority,
            notes,
        } => {
            let conn = open(&db_path)?;
            let mut active = ActiveSession::new();
            active.select_patient(&SqliteKnowledgeBase::new(&conn), patient)?;
            let receipt =
                workflow::transfer_to_emergency(&mut active, &conn, &reason, &priority, &notes)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            } else {
                println!(
                    "{} transferred to {} (visit {})\n    Reason: {}\n    Priority: {}",
                    receipt.patient_name,
                    workflow::EMERGENCY_DEPARTMENT,
                    receipt.visit_id,
                    receipt.visit_reason,
                    receipt.priority
                );
            }
        }
        Commands::Ask { text } => {
            let advisor = build_advisor(&AdvisorConfig::from_env())?;
            println!("{}", workflow::ask(advisor.as_ref(), &text).text);
        }
        Commands::Diagnose {
            patient,
            complaint,
            notes,
            transcript,
        } => {
            let conn = open(&db_path)?;
            let session = load(&conn, patient)?;
            let advisor = build_advisor(&AdvisorConfig::from_env())?;
            let report = workflow::run_diagnosis_loop(
                &session,
                &complaint,
                &notes,
                &transcript,
                advisor.as_ref(),
            )?;
            println!("{}\n", report.advice.text);
            print_alerts(&report.alerts, cli.json)?;
            if !report.avoid.is_empty() {
                println!("\nAvoid prescribing:");
                print_alerts(&report.avoid, cli.json)?;
            }
        }
    }

    Ok(())
}

fn open(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Creating {}", parent.display()))?;
    }
    db::open_database(path).with_context(|| format!("Opening database {}", path.display()))
}

fn load(conn: &Connection, patient: PatientId) -> Result<SessionSnapshot> {
    Ok(SessionSnapshot::load(&SqliteKnowledgeBase::new(conn), patient)?)
}

fn print_alerts(alerts: &[Alert], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(alerts)?);
        return Ok(());
    }
    for alert in alerts {
        println!("[{}] {}", alert.alert_type.as_str().to_uppercase(), alert.title);
        if !alert.message.is_empty() {
            println!("    {}", alert.message);
        }
        if !alert.details.is_empty() {
            println!("    {}", alert.details);
        }
    }
    Ok(())
}
