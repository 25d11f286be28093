//! Pure filter and sort functions for directory views.
//!
//! # Responsibility
//! - Derive a filtered, sorted borrow-view of a record slice on demand.
//! - Hold no state; the same inputs always produce the same view.
//!
//! # Invariants
//! - Filtering and sorting are stable: non-matches drop out, everything
//!   else keeps its relative input order unless the sort key differs.
//! - An empty term and an unset sort field both return the input unchanged.

use crate::model::user::UserRecord;

/// Record fields the directory can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Email,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

/// Sort direction; selecting the same field again toggles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Case-insensitive substring filter on `name` OR `email`.
///
/// An empty `term` returns every record; order is always preserved.
pub fn filter_users<'a>(users: &'a [UserRecord], term: &str) -> Vec<&'a UserRecord> {
    if term.is_empty() {
        return users.iter().collect();
    }

    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|user| {
            user.name.to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sorts a view by `field`, case-insensitively; `None` leaves it untouched.
///
/// Uses the standard stable sort, so records with equal keys keep their
/// relative input order in both directions.
pub fn sort_users<'a>(
    mut users: Vec<&'a UserRecord>,
    field: Option<SortField>,
    order: SortOrder,
) -> Vec<&'a UserRecord> {
    let Some(field) = field else {
        return users;
    };

    users.sort_by(|a, b| {
        let ordering = match field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    users
}
