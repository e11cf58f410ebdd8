use serde::{Deserialize, Serialize};

use crate::workflows::eligibility::EducationLevel;

pub const COMMON_MAJORS: [&str; 13] = [
    "Computer Science",
    "Electrical Engineering",
    "Civil Engineering",
    "Business Administration (BBA)",
    "Accounting & Finance",
    "Medicine (MBBS)",
    "Law",
    "Media Studies",
    "Psychology",
    "Economics",
    "Physics/Chemistry/Biology",
    "Arts & Humanities",
    "Other",
];

pub const PROFESSIONS: [&str; 34] = [
    "Student",
    "Self-Employed / Freelancer",
    "Software Engineer / IT Professional",
    "IT Support / Technician",
    "Teacher / Academic",
    "Healthcare Professional (Doctor, Nurse, Pharmacist, etc.)",
    "Healthcare Support (Lab Tech, Paramedic, etc.)",
    "Business Owner / Entrepreneur",
    "Sales and Marketing",
    "Customer Support / Call Center",
    "Retail Worker / Shopkeeper",
    "Accountant / Finance Professional",
    "Banking / Finance (Banker, Teller, Analyst)",
    "Government Employee / Civil Servant",
    "Lawyer / Legal Professional",
    "Journalist / Media Professional",
    "Creative Professional (Designer, Writer, Artist)",
    "Hospitality / Hotel & Restaurant Staff",
    "NGO / Non-profit Worker",
    "Tradesman (Electrician, Plumber, Carpenter, etc.)",
    "Construction Worker",
    "Driver (Taxi / Truck / Ride-hailing)",
    "Pilot / Aviation Professional",
    "Agriculture / Farming",
    "Researcher / Scientist",
    "Consultant",
    "Real Estate / Property Agent",
    "Security Personnel",
    "Logistics / Supply Chain",
    "Manufacturing / Factory Worker",
    "Home-maker / Homemaker",
    "Unemployed",
    "Retired",
    "Other",
];

/// Upper end of the income slider, in rupees.
pub const MAX_MONTHLY_INCOME: u32 = 500_000;
pub const INCOME_STEP: u32 = 10_000;

/// Onboarding step that records this form.
const PROFESSIONAL_STEP: u8 = 3;

/// Education labels offered by the onboarding dropdown, lowest first.
pub fn education_options() -> impl Iterator<Item = &'static str> {
    EducationLevel::ALL.into_iter().map(EducationLevel::label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalField {
    Education,
    Profession,
}

impl ProfessionalField {
    pub fn message(self) -> &'static str {
        match self {
            ProfessionalField::Education => "Please select education level",
            ProfessionalField::Profession => "Please select profession",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please fill all required fields")]
pub struct ProfessionalInfoError {
    pub missing: Vec<ProfessionalField>,
}

/// Third onboarding step as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfessionalInfoForm {
    pub education: String,
    pub major: String,
    pub profession: String,
    pub monthly_income: u32,
}

/// Profile update produced by an accepted professional-info form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalInfo {
    pub education: String,
    pub major: Option<String>,
    pub profession: String,
    pub monthly_income: u32,
    pub profile_completed_step: u8,
}

impl ProfessionalInfoForm {
    pub fn validate(&self) -> Result<ProfessionalInfo, ProfessionalInfoError> {
        let mut missing = Vec::new();
        if self.education.trim().is_empty() {
            missing.push(ProfessionalField::Education);
        }
        if self.profession.trim().is_empty() {
            missing.push(ProfessionalField::Profession);
        }
        if !missing.is_empty() {
            return Err(ProfessionalInfoError { missing });
        }

        Ok(ProfessionalInfo {
            education: self.education.clone(),
            major: (!self.major.is_empty()).then(|| self.major.clone()),
            profession: self.profession.clone(),
            monthly_income: self.monthly_income,
            profile_completed_step: PROFESSIONAL_STEP,
        })
    }
}

/// Renders a monthly income as `Rs 12,000`, or "Not provided" when blank.
pub fn format_income(amount: Option<f64>) -> String {
    match amount {
        Some(value) if value.is_finite() && value != 0.0 => {
            let rounded = value.round();
            let sign = if rounded < 0.0 { "-" } else { "" };
            format!("Rs {sign}{}", group_thousands(rounded.abs() as u64))
        }
        _ => "Not provided".to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_education_and_profession() {
        let error = ProfessionalInfoForm::default()
            .validate()
            .expect_err("blank form is rejected");

        assert_eq!(
            error.missing,
            vec![ProfessionalField::Education, ProfessionalField::Profession]
        );
        assert_eq!(error.to_string(), "Please fill all required fields");
        assert_eq!(
            ProfessionalField::Education.message(),
            "Please select education level"
        );
    }

    #[test]
    fn accepted_form_becomes_a_profile_update() {
        let form = ProfessionalInfoForm {
            education: "Masters".to_string(),
            major: String::new(),
            profession: "Consultant".to_string(),
            monthly_income: 120_000,
        };

        let info = form.validate().expect("form is complete");

        assert_eq!(info.major, None);
        assert_eq!(info.monthly_income, 120_000);
        assert_eq!(info.profile_completed_step, 3);
    }

    #[test]
    fn income_formatting() {
        assert_eq!(format_income(None), "Not provided");
        assert_eq!(format_income(Some(0.0)), "Not provided");
        assert_eq!(format_income(Some(950.0)), "Rs 950");
        assert_eq!(format_income(Some(12_000.0)), "Rs 12,000");
        assert_eq!(format_income(Some(1_250_000.0)), "Rs 1,250,000");
    }

    #[test]
    fn dropdown_options_cover_the_education_ladder() {
        let options: Vec<_> = education_options().collect();
        assert_eq!(options.first(), Some(&"Matric/O-Levels"));
        assert_eq!(options.last(), Some(&"PhD"));
        assert!(PROFESSIONS.contains(&"Teacher / Academic"));
        assert_eq!(COMMON_MAJORS.len(), 13);
    }
}
