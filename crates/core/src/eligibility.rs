//! Advisory eligibility filtering.
//!
//! Projects may restrict visibility by department, year, and minimum GPA.
//! These filters are read-time advice for listing clients only; the
//! application engine never rejects an ineligible student's submission.

/// A project's eligibility criteria. Empty lists mean unrestricted.
#[derive(Debug, Clone, Default)]
pub struct Eligibility {
    pub departments: Vec<String>,
    pub years: Vec<String>,
    pub min_gpa: Option<f64>,
}

/// The student attributes the filters apply to.
#[derive(Debug, Clone)]
pub struct StudentFacts<'a> {
    pub department: &'a str,
    pub year: &'a str,
    pub gpa: Option<f64>,
}

/// Whether a student matches the project's advisory criteria.
///
/// A missing GPA fails a `min_gpa` restriction; an empty allow-list always
/// matches.
pub fn matches(criteria: &Eligibility, student: &StudentFacts<'_>) -> bool {
    if !criteria.departments.is_empty()
        && !criteria
            .departments
            .iter()
            .any(|d| d.eq_ignore_ascii_case(student.department))
    {
        return false;
    }

    if !criteria.years.is_empty() && !criteria.years.iter().any(|y| y == student.year) {
        return false;
    }

    if let Some(min) = criteria.min_gpa {
        match student.gpa {
            Some(gpa) if gpa >= min => {}
            _ => return false,
        }
    }

    true
}
