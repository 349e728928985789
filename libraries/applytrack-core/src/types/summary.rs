/// Status counts over a set of applications
use super::ApplicationStatus;
use serde::{Deserialize, Serialize};

/// Counts of applications per status.
///
/// `total` includes records whose status matches no named bucket, so the
/// named buckets may sum to less than `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub applied: usize,
    pub interview: usize,
    pub offer: usize,
    pub rejected: usize,
}

impl StatusSummary {
    /// Count one record.
    pub fn record(&mut self, status: &ApplicationStatus) {
        self.total += 1;
        match status {
            ApplicationStatus::Applied => self.applied += 1,
            ApplicationStatus::Interview => self.interview += 1,
            ApplicationStatus::Offer => self.offer += 1,
            ApplicationStatus::Rejected => self.rejected += 1,
            ApplicationStatus::Other(_) => {}
        }
    }

    /// Sum of the named buckets
    pub fn named(&self) -> usize {
        self.applied + self.interview + self.offer + self.rejected
    }

    /// Records whose status matched no named bucket
    pub fn unrecognized(&self) -> usize {
        self.total - self.named()
    }
}

impl<'a> FromIterator<&'a ApplicationStatus> for StatusSummary {
    fn from_iter<I: IntoIterator<Item = &'a ApplicationStatus>>(iter: I) -> Self {
        let mut summary = Self::default();
        for status in iter {
            summary.record(status);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_named_and_other() {
        let statuses = [
            ApplicationStatus::Applied,
            ApplicationStatus::Applied,
            ApplicationStatus::Offer,
            ApplicationStatus::Other("Ghosted".into()),
        ];
        let summary: StatusSummary = statuses.iter().collect();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.interview, 0);
        assert_eq!(summary.offer, 1);
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.unrecognized(), 1);
    }

    #[test]
    fn test_empty() {
        let summary: StatusSummary = std::iter::empty().collect();
        assert_eq!(summary, StatusSummary::default());
    }
}
