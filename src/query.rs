//! Read-only aggregate queries over the entity tree.

use std::fmt;

use crate::model::Institute;

/// Number of excellent students across every course and group.
pub fn count_excellent(institute: &Institute) -> usize {
    institute.students().filter(|s| s.is_excellent()).count()
}

/// The institute with the most excellent students and that count.
///
/// Ties go to the institute that comes first. Returns `None` for an empty
/// input.
pub fn best_institute<'a, I>(institutes: I) -> Option<(&'a Institute, usize)>
where
    I: IntoIterator<Item = &'a Institute>,
{
    let mut best: Option<(&'a Institute, usize)> = None;
    for institute in institutes {
        let count = count_excellent(institute);
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((institute, count)),
        }
    }
    best
}

/// Outcome of the best-institute query, ready for display or persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcellenceReport {
    Best { institute: String, count: usize },
    NoData,
}

impl ExcellenceReport {
    pub fn from_institutes<'a, I>(institutes: I) -> Self
    where
        I: IntoIterator<Item = &'a Institute>,
    {
        match best_institute(institutes) {
            Some((institute, count)) => Self::Best {
                institute: institute.name().to_string(),
                count,
            },
            None => Self::NoData,
        }
    }
}

impl fmt::Display for ExcellenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Best { institute, count } => write!(
                f,
                "Institute with the most excellent students: {}. Count: {}.",
                institute, count
            ),
            Self::NoData => f.write_str("No data."),
        }
    }
}
