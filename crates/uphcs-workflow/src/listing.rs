//! In-memory search, sort, and paging for the patient list views.
//!
//! The backend returns the whole collection for a clinic; everything the
//! list views do after that happens here, deterministically.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use uphcs_core::models::contact_attempt::ContactAttempt;
use uphcs_core::models::patient::{ActivePatient, ConsultPatient, PatientRow};

use crate::error::WorkflowError;

pub const ACTIVE_PAGE_SIZE: usize = 50;
pub const INACTIVE_PAGE_SIZE: usize = 10;
pub const CONTACT_HISTORY_PAGE_SIZE: usize = 5;

/// A sortable cell value. `Missing` orders after everything else in both
/// directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(i64),
    Date(Date),
    Missing,
}

impl<'a> From<Option<u8>> for SortKey<'a> {
    fn from(v: Option<u8>) -> Self {
        v.map_or(SortKey::Missing, |n| SortKey::Number(i64::from(n)))
    }
}

impl<'a> From<Option<u32>> for SortKey<'a> {
    fn from(v: Option<u32>) -> Self {
        v.map_or(SortKey::Missing, |n| SortKey::Number(i64::from(n)))
    }
}

impl<'a> From<Option<Date>> for SortKey<'a> {
    fn from(v: Option<Date>) -> Self {
        v.map_or(SortKey::Missing, SortKey::Date)
    }
}

impl<'a> From<Option<&'a str>> for SortKey<'a> {
    fn from(v: Option<&'a str>) -> Self {
        v.map_or(SortKey::Missing, SortKey::Text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Three-way comparison of two cells under `direction`.
pub fn compare(a: SortKey<'_>, b: SortKey<'_>, direction: Direction) -> Ordering {
    let natural = match (a, b) {
        (SortKey::Missing, SortKey::Missing) => return Ordering::Equal,
        (SortKey::Missing, _) => return Ordering::Greater,
        (_, SortKey::Missing) => return Ordering::Less,
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        (SortKey::Number(x), SortKey::Number(y)) => x.cmp(&y),
        (SortKey::Date(x), SortKey::Date(y)) => x.cmp(&y),
        // A column always yields one kind of key; fall back to a fixed order.
        (x, y) => rank(x).cmp(&rank(y)),
    };
    match direction {
        Direction::Ascending => natural,
        Direction::Descending => natural.reverse(),
    }
}

fn rank(key: SortKey<'_>) -> u8 {
    match key {
        SortKey::Number(_) => 0,
        SortKey::Date(_) => 1,
        SortKey::Text(_) => 2,
        SortKey::Missing => 3,
    }
}

/// A row that can be shown in a list view.
pub trait ListRow {
    type Column: Copy + Eq + fmt::Debug;

    /// Numeric id, matched as a substring by search.
    fn id(&self) -> i64;

    /// Text fields matched case-insensitively by search.
    fn search_fields(&self) -> Vec<&str>;

    fn sort_key(&self, column: Self::Column) -> SortKey<'_>;

    /// Only an empty query matches everything; whitespace is searched for
    /// like any other text.
    fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.search_fields()
            .iter()
            .any(|f| f.to_lowercase().contains(&needle))
            || self.id().to_string().contains(query)
    }
}

/// Column plus direction. Selecting the same column again flips the
/// direction; a different column starts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<C> {
    pub column: C,
    pub direction: Direction,
}

impl<C: Copy + Eq> SortState<C> {
    pub fn new(column: C) -> Self {
        Self {
            column,
            direction: Direction::Ascending,
        }
    }

    pub fn select(self, column: C) -> Self {
        if column == self.column {
            Self {
                column,
                direction: self.direction.flip(),
            }
        } else {
            Self::new(column)
        }
    }
}

/// Everything a list view needs to turn a collection into one page.
#[derive(Debug, Clone)]
pub struct ListQuery<C> {
    pub search: String,
    pub sort: Option<SortState<C>>,
    /// Zero-based.
    pub page: usize,
    pub per_page: usize,
}

impl<C: Copy + Eq> ListQuery<C> {
    pub fn new(per_page: usize) -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 0,
            per_page,
        }
    }

    pub fn apply<'r, R>(&self, rows: &'r [R]) -> Page<'r, R>
    where
        R: ListRow<Column = C>,
    {
        let mut matched: Vec<&R> = rows.iter().filter(|r| r.matches(&self.search)).collect();
        if let Some(sort) = self.sort {
            // `sort_by` is stable, so equal keys keep backend order.
            matched.sort_by(|a, b| compare(a.sort_key(sort.column), b.sort_key(sort.column), sort.direction));
        }
        let total = matched.len();
        Page {
            rows: paginate(&matched, self.page, self.per_page).to_vec(),
            page: self.page,
            page_count: page_count(total, self.per_page),
            total,
        }
    }
}

#[derive(Debug)]
pub struct Page<'r, R> {
    pub rows: Vec<&'r R>,
    pub page: usize,
    pub page_count: usize,
    /// Rows that matched the search, across all pages.
    pub total: usize,
}

/// Slice out zero-based page `page`. Past the end yields an empty slice.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let per_page = per_page.max(1);
    let start = page.saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

pub fn page_count(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1))
}

/// Declares a column enum with kebab-case names for the command line.
macro_rules! columns {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = WorkflowError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| WorkflowError::UnknownColumn(s.to_string()))
            }
        }
    };
}

columns! {
    /// Columns of the active patient list.
    ActiveColumn {
        Id => "id",
        Mrn => "mrn",
        FirstName => "first-name",
        LastName => "last-name",
        Status => "status",
        Phq9First => "phq9-first",
        Phq9Last => "phq9-last",
        Gad7First => "gad7-first",
        Gad7Last => "gad7-last",
        InitialAssessment => "initial-assessment",
        LastFollowUp => "last-follow-up",
        LastPsychConsult => "last-psych-consult",
        LastRelapsePlan => "last-relapse-plan",
        TotalContacts => "total-contacts",
        WeeksSinceInitial => "weeks",
        MinutesThisMonth => "minutes",
    }
}

columns! {
    /// Columns of the inactive and enrolled patient lists.
    PatientColumn {
        Id => "id",
        Mrn => "mrn",
        FirstName => "first-name",
        LastName => "last-name",
        Status => "status",
        Dob => "dob",
        EnrollmentDate => "enrollment-date",
        Phq9First => "phq9-first",
        Phq9Last => "phq9-last",
        Gad7First => "gad7-first",
        Gad7Last => "gad7-last",
        DeactivationDate => "deactivation-date",
    }
}

columns! {
    /// Columns of a consultant's assigned-patient list.
    ConsultColumn {
        Id => "id",
        Mrn => "mrn",
        FirstName => "first-name",
        LastName => "last-name",
        Status => "status",
        Dob => "dob",
        ReferralDate => "referral-date",
        Phq9 => "phq9",
        Gad7 => "gad7",
        CareManager => "care-manager",
    }
}

columns! {
    /// Columns of the contact-attempt history.
    ContactColumn {
        Date => "date",
        AttemptedBy => "attempted-by",
        Minutes => "minutes",
    }
}

impl ListRow for ActivePatient {
    type Column = ActiveColumn;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.mrn.as_str()]
    }

    fn sort_key(&self, column: ActiveColumn) -> SortKey<'_> {
        match column {
            ActiveColumn::Id => SortKey::Number(self.id),
            ActiveColumn::Mrn => SortKey::Text(&self.mrn),
            ActiveColumn::FirstName => SortKey::Text(&self.first_name),
            ActiveColumn::LastName => SortKey::Text(&self.last_name),
            ActiveColumn::Status => SortKey::Text(self.status.code()),
            ActiveColumn::Phq9First => self.phq9_first.into(),
            ActiveColumn::Phq9Last => self.phq9_last.into(),
            ActiveColumn::Gad7First => self.gad7_first.into(),
            ActiveColumn::Gad7Last => self.gad7_last.into(),
            ActiveColumn::InitialAssessment => self.initial_assessment_date.into(),
            ActiveColumn::LastFollowUp => self.last_follow_up_date.into(),
            ActiveColumn::LastPsychConsult => self.last_psychiatric_consult_date.into(),
            ActiveColumn::LastRelapsePlan => self.last_relapse_plan_date.into(),
            ActiveColumn::TotalContacts => self.total_contacts.into(),
            ActiveColumn::WeeksSinceInitial => self.weeks_since_initial_assessment.into(),
            ActiveColumn::MinutesThisMonth => self.minutes_this_month.into(),
        }
    }
}

impl ListRow for PatientRow {
    type Column = PatientColumn;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.mrn.as_str()]
    }

    fn sort_key(&self, column: PatientColumn) -> SortKey<'_> {
        match column {
            PatientColumn::Id => SortKey::Number(self.id),
            PatientColumn::Mrn => SortKey::Text(&self.mrn),
            PatientColumn::FirstName => SortKey::Text(&self.first_name),
            PatientColumn::LastName => SortKey::Text(&self.last_name),
            PatientColumn::Status => SortKey::Text(self.status.code()),
            PatientColumn::Dob => self.dob.into(),
            PatientColumn::EnrollmentDate => self.enrollment_date.into(),
            PatientColumn::Phq9First => self.phq9_first.into(),
            PatientColumn::Phq9Last => self.phq9_last.into(),
            PatientColumn::Gad7First => self.gad7_first.into(),
            PatientColumn::Gad7Last => self.gad7_last.into(),
            PatientColumn::DeactivationDate => self.deactivation_date.into(),
        }
    }
}

impl ListRow for ConsultPatient {
    type Column = ConsultColumn;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str(), self.mrn.as_str()]
    }

    fn sort_key(&self, column: ConsultColumn) -> SortKey<'_> {
        match column {
            ConsultColumn::Id => SortKey::Number(self.id),
            ConsultColumn::Mrn => SortKey::Text(&self.mrn),
            ConsultColumn::FirstName => SortKey::Text(&self.first_name),
            ConsultColumn::LastName => SortKey::Text(&self.last_name),
            ConsultColumn::Status => SortKey::Text(self.status.code()),
            ConsultColumn::Dob => self.dob.into(),
            ConsultColumn::ReferralDate => self.referral_date.into(),
            ConsultColumn::Phq9 => self.phq9_score.into(),
            ConsultColumn::Gad7 => self.gad7_score.into(),
            ConsultColumn::CareManager => self.care_manager_name.as_deref().into(),
        }
    }
}

impl ListRow for ContactAttempt {
    type Column = ContactColumn;

    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.attempted_by.as_str()];
        if let Some(notes) = &self.notes {
            fields.push(notes);
        }
        fields
    }

    fn sort_key(&self, column: ContactColumn) -> SortKey<'_> {
        match column {
            ContactColumn::Date => SortKey::Date(self.attempt_date),
            ContactColumn::AttemptedBy => SortKey::Text(&self.attempted_by),
            ContactColumn::Minutes => SortKey::Number(i64::from(self.minutes)),
        }
    }
}
