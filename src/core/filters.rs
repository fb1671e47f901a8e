use std::str::FromStr;

use crate::models::{DashboardStats, Issue, IssueStatus};

/// Status selector from the dashboard dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(IssueStatus),
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        trimmed.parse::<IssueStatus>().map(StatusFilter::Only)
    }
}

/// Case-insensitive substring match over title, description, category and
/// address. An empty term matches everything.
#[inline]
pub fn matches_search(issue: &Issue, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        issue.title.as_str(),
        issue.description.as_str(),
        issue.category.as_str(),
        issue.location.address.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[inline]
pub fn matches_status(issue: &Issue, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Only(status) => issue.status == status,
    }
}

/// Count issues per status. `nearby` is filled in by the caller, which knows
/// whether a location was applied.
pub fn calculate_stats<'a, I>(issues: I) -> DashboardStats
where
    I: IntoIterator<Item = &'a Issue>,
{
    issues
        .into_iter()
        .fold(DashboardStats::default(), |mut stats, issue| {
            stats.total += 1;
            match issue.status {
                IssueStatus::Open => stats.open += 1,
                IssueStatus::InProgress => stats.in_progress += 1,
                IssueStatus::Resolved => stats.resolved += 1,
                IssueStatus::Closed => stats.closed += 1,
            }
            stats
        })
}
