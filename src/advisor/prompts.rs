//! Prompt templates for the advisory model.

pub const SYSTEM_PROMPT: &str = "You are a clinical decision support assistant for emergency \
and internal medicine physicians. Base every statement on the patient context provided. \
Flag contraindications and allergies explicitly. Be concise and structured. You support \
the physician's judgement and never replace it.";

pub fn summary_prompt(patient_context: &str) -> String {
    format!(
        "Summarize this patient's record for the receiving physician in at most eight lines. \
         Lead with the most dangerous risks, then active conditions and medications.\n\n\
         Patient context:\n{patient_context}"
    )
}

pub fn conversation_analysis_prompt(transcript: &str, patient_context: &str) -> String {
    format!(
        "Analyze the following doctor-patient conversation. Extract symptoms, onset, \
         substances taken and any red flags. Relate findings to the patient's history.\n\n\
         Conversation:\n{transcript}\n\n\
         Patient context:\n{patient_context}"
    )
}

pub fn suggestion_prompt(patient_context: &str, clinical_data: &str, vitals: &str) -> String {
    format!(
        "Based on the patient context, current clinical data and vital signs, suggest \
         immediate investigations and management for the emergency physician. Mark anything \
         that conflicts with the patient's contraindications.\n\n\
         Patient context:\n{patient_context}\n\n\
         Clinical data:\n{clinical_data}\n\n\
         Vital signs:\n{vitals}"
    )
}

pub fn diagnosis_loop_prompt(
    patient_context: &str,
    chief_complaint: &str,
    form_data: &str,
    transcript: &str,
) -> String {
    format!(
        "Work through a differential diagnosis step by step. For each candidate give \
         supporting and opposing evidence from the record, the next test that would \
         discriminate, and treatments to avoid for this patient.\n\n\
         Patient context:\n{patient_context}\n\n\
         Chief complaint: {chief_complaint}\n\n\
         Form data:\n{form_data}\n\n\
         Conversation transcript:\n{transcript}"
    )
}

/// Emergency screen fields as one clinical-data block.
pub fn emergency_clinical_data(
    chief_complaint: &str,
    history: &str,
    medications_given: &str,
    substances_taken: &str,
) -> String {
    format!(
        "Chief complaint: {chief_complaint}\n\
         History of present illness: {history}\n\
         Medications given: {medications_given}\n\
         Taken before arrival: {substances_taken}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_embed_their_inputs() {
        let prompt = diagnosis_loop_prompt("CTX", "Dyspnea", "FORM", "TRANSCRIPT");
        for part in ["CTX", "Chief complaint: Dyspnea", "FORM", "TRANSCRIPT"] {
            assert!(prompt.contains(part), "missing {part}");
        }
        assert!(summary_prompt("CTX").ends_with("CTX"));
    }
}
