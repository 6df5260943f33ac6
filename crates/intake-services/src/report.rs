//! Batch processing summary, handed back to the front end after a run.

use intake_core::NormalizedRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeReport {
    pub total_records: usize,
    pub valid_emails: usize,
    pub valid_phones: usize,
    pub error_count: usize,
    pub errors: Vec<String>,
}

/// Summarize a processed batch. Pure; the error list is carried verbatim
/// in the order it was accumulated.
pub fn summarize(records: &[NormalizedRecord], errors: &[String]) -> IntakeReport {
    IntakeReport {
        total_records: records.len(),
        valid_emails: records.iter().filter(|r| r.email_valid).count(),
        valid_phones: records.iter().filter(|r| r.phone_valid).count(),
        error_count: errors.len(),
        errors: errors.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email_valid: bool, phone_valid: bool) -> NormalizedRecord {
        NormalizedRecord {
            id: "1".to_string(),
            name: "JOHN DOE".to_string(),
            email: "john@example.com".to_string(),
            phone: "1234567890".to_string(),
            email_valid,
            phone_valid,
        }
    }

    #[test]
    fn test_summarize_counts() {
        let records = vec![record(true, true), record(true, false), record(false, false)];
        let errors = vec!["Invalid phone: 123".to_string()];

        let report = summarize(&records, &errors);
        assert_eq!(report.total_records, 3);
        assert_eq!(report.valid_emails, 2);
        assert_eq!(report.valid_phones, 1);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.errors, errors);
    }

    #[test]
    fn test_summarize_empty_batch() {
        let report = summarize(&[], &[]);
        assert_eq!(report.total_records, 0);
        assert_eq!(report.error_count, 0);
        assert!(report.errors.is_empty());
    }
}
