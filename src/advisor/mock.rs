use super::{Advisor, AdvisorError};

const DEMO_NOTICE: &str = "[Demo mode: canned response, no model was consulted]";

// (trigger keywords, canned answer). First keyword hit wins.
const CANNED: &[(&[&str], &str)] = &[
    (
        &["myasthenia", "mg crisis", "pyridostigmine"],
        "Myasthenia gravis: watch for myasthenic crisis. Check FVC and NIF, assess bulbar \
         weakness, and avoid magnesium, aminoglycosides, fluoroquinolones and beta-blockers.",
    ),
    (
        &["chest pain", "troponin", "coronary", "angina"],
        "Possible acute coronary syndrome: obtain a 12-lead ECG within 10 minutes, serial \
         troponin, aspirin unless contraindicated, and continuous cardiac monitoring.",
    ),
    (
        &["asthma", "wheez", "bronchospasm"],
        "Acute asthma: nebulized salbutamol, assess SpO2 and peak flow, systemic steroids, \
         and avoid beta-blockers and NSAIDs.",
    ),
];

const GENERIC: &str = "Review the alerts and history above. Reassess vital signs, confirm \
    allergies before any administration, and escalate if the patient deteriorates.";

/// Deterministic advisor for demos and offline use.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockAdvisor;

impl MockAdvisor {
    pub fn new() -> Self {
        Self
    }
}

impl Advisor for MockAdvisor {
    fn advise(
        &self,
        prompt: &str,
        _system_prompt: Option<&str>,
        _max_tokens: Option<u32>,
    ) -> Result<String, AdvisorError> {
        let lower = prompt.to_lowercase();
        let answer = CANNED
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(_, answer)| *answer)
            .unwrap_or(GENERIC);
        Ok(format!("{answer}\n\n{DEMO_NOTICE}"))
    }
}
