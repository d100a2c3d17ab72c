//! Cleaned company records and the table that holds them.

use std::fmt;

pub const COMPANY_NAME: &str = "company_name";
pub const FOCUS: &str = "focus";
pub const SECTOR: &str = "sector";
pub const REGION: &str = "region";
pub const SIZE: &str = "size";
pub const SIZE_CATEGORY: &str = "size_category";
pub const COUNTRY: &str = "country";

/// Columns every input file must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 5] = [COMPANY_NAME, FOCUS, SECTOR, REGION, SIZE];

/// Fill value for absent categorical fields.
pub const UNKNOWN: &str = "unknown";

/// Headcount band of a company.
///
/// Anything outside the known bands parses as [`CompanySize::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanySize {
    OneToTen,
    ElevenToFifty,
    FiftyOneToTwoHundred,
    TwoHundredOneToFiveHundred,
    FiveHundredOneToThousand,
    Unknown,
}

impl CompanySize {
    pub const ALL: [CompanySize; 6] = [
        CompanySize::OneToTen,
        CompanySize::ElevenToFifty,
        CompanySize::FiftyOneToTwoHundred,
        CompanySize::TwoHundredOneToFiveHundred,
        CompanySize::FiveHundredOneToThousand,
        CompanySize::Unknown,
    ];

    /// Matches an already-normalized (lowercased, trimmed) size value.
    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == value)
            .unwrap_or(CompanySize::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompanySize::OneToTen => "1-10",
            CompanySize::ElevenToFifty => "11-50",
            CompanySize::FiftyOneToTwoHundred => "51-200",
            CompanySize::TwoHundredOneToFiveHundred => "201-500",
            CompanySize::FiveHundredOneToThousand => "501-1k",
            CompanySize::Unknown => UNKNOWN,
        }
    }

    pub fn category(self) -> SizeCategory {
        match self {
            CompanySize::OneToTen | CompanySize::ElevenToFifty => SizeCategory::Small,
            CompanySize::FiftyOneToTwoHundred | CompanySize::TwoHundredOneToFiveHundred => {
                SizeCategory::Medium
            }
            CompanySize::FiveHundredOneToThousand => SizeCategory::Large,
            CompanySize::Unknown => SizeCategory::Unknown,
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse size bucket derived from [`CompanySize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
    Unknown,
}

impl SizeCategory {
    /// Display order used by the size distribution chart.
    pub const ALL: [SizeCategory; 4] = [
        SizeCategory::Small,
        SizeCategory::Medium,
        SizeCategory::Large,
        SizeCategory::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SizeCategory::Small => "Small",
            SizeCategory::Medium => "Medium",
            SizeCategory::Large => "Large",
            SizeCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the trimmed text after the last comma of `region`, or `region`
/// itself when it has no comma.
pub fn derive_country(region: &str) -> String {
    match region.rsplit_once(',') {
        Some((_, country)) => country.trim().to_string(),
        None => region.to_string(),
    }
}

/// Role of a column within a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    CompanyName,
    Focus,
    Sector,
    Region,
    Size,
    SizeCategory,
    Country,
    /// Pass-through column, indexing [`Table::extra_names`] and [`Record::extras`].
    Extra(usize),
}

impl Column {
    /// Maps a header name onto a known role.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            COMPANY_NAME => Some(Column::CompanyName),
            FOCUS => Some(Column::Focus),
            SECTOR => Some(Column::Sector),
            REGION => Some(Column::Region),
            SIZE => Some(Column::Size),
            SIZE_CATEGORY => Some(Column::SizeCategory),
            COUNTRY => Some(Column::Country),
            _ => None,
        }
    }
}

/// One cleaned company row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Deduplication key, kept exactly as read.
    pub company_name: Option<String>,
    pub focus: String,
    pub sector: String,
    pub region: String,
    pub size: CompanySize,
    pub size_category: SizeCategory,
    pub country: String,
    pub extras: Vec<Option<String>>,
}

impl Record {
    /// Text of `column` for this record; `None` only for missing cells.
    pub fn value(&self, column: Column) -> Option<&str> {
        match column {
            Column::CompanyName => self.company_name.as_deref(),
            Column::Focus => Some(&self.focus),
            Column::Sector => Some(&self.sector),
            Column::Region => Some(&self.region),
            Column::Size => Some(self.size.as_str()),
            Column::SizeCategory => Some(self.size_category.as_str()),
            Column::Country => Some(&self.country),
            Column::Extra(i) => self.extras.get(i).and_then(|v| v.as_deref()),
        }
    }
}

/// Ordered, deduplicated collection of [`Record`]s plus its column layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub columns: Vec<Column>,
    pub extra_names: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn column_name(&self, column: Column) -> &str {
        match column {
            Column::CompanyName => COMPANY_NAME,
            Column::Focus => FOCUS,
            Column::Sector => SECTOR,
            Column::Region => REGION,
            Column::Size => SIZE,
            Column::SizeCategory => SIZE_CATEGORY,
            Column::Country => COUNTRY,
            Column::Extra(i) => self.extra_names.get(i).map(String::as_str).unwrap_or(""),
        }
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| self.column_name(*c)).collect()
    }

    /// Values of one column in record order.
    pub fn values(&self, column: Column) -> impl Iterator<Item = Option<&str>> {
        self.records.iter().map(move |r| r.value(column))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
