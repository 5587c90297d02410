//! 診断ラベルごとの受診先の案内

use crate::types::Disease;
use serde::Serialize;

/// 受診先の案内
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DoctorRecommendation {
    pub specialist: &'static str,
    pub physician: &'static str,
    pub emergency: &'static str,
}

const PNEUMONIA: DoctorRecommendation = DoctorRecommendation {
    specialist: "Consult Pulmonologist (Lung Specialist)",
    physician: "Consult General Physician for treatment guidance",
    emergency: "Consult Emergency Doctor if severe breathing difficulty or chest pain occurs",
};

const COVID_19: DoctorRecommendation = DoctorRecommendation {
    specialist: "Consult General Physician / COVID Specialist",
    physician: "Consult Pulmonologist if breathing issues persist",
    emergency: "Consult Emergency Doctor if oxygen levels drop or breathing becomes difficult",
};

const TUBERCULOSIS: DoctorRecommendation = DoctorRecommendation {
    specialist: "Consult Pulmonologist / TB Specialist",
    physician: "Consult Infectious Disease Specialist for TB management",
    emergency: "Consult Emergency Doctor if coughing blood, severe weakness, or rapid weight loss occurs",
};

const GENERAL: DoctorRecommendation = DoctorRecommendation {
    specialist: "Consult General Physician",
    physician: "Consult Pulmonologist if symptoms worsen",
    emergency: "Consult Emergency Doctor if symptoms become severe",
};

/// 診断ラベルから案内を選ぶ（NORMAL・空ラベルは案内なし）
pub fn recommend(disease: &Disease) -> Option<DoctorRecommendation> {
    match disease {
        Disease::Normal => None,
        Disease::Pneumonia => Some(PNEUMONIA),
        Disease::Covid19 => Some(COVID_19),
        Disease::Tuberculosis => Some(TUBERCULOSIS),
        Disease::Other(label) if label.trim().is_empty() => None,
        Disease::Other(_) => Some(GENERAL),
    }
}
