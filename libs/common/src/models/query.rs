//! Search query inputs: category filter and result-count limit

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{UpstreamError, UpstreamResult};

/// Fixed set of catalog categories offered as filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Toys,
    Automotive,
    Health,
    Beauty,
    #[serde(rename = "Food & Beverage")]
    FoodAndBeverage,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Clothing,
        Category::Books,
        Category::HomeAndGarden,
        Category::Sports,
        Category::Toys,
        Category::Automotive,
        Category::Health,
        Category::Beauty,
        Category::FoodAndBeverage,
    ];

    /// Label sent to the catalog
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::HomeAndGarden => "Home & Garden",
            Category::Sports => "Sports",
            Category::Toys => "Toys",
            Category::Automotive => "Automotive",
            Category::Health => "Health",
            Category::Beauty => "Beauty",
            Category::FoodAndBeverage => "Food & Beverage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UpstreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UpstreamError::ValidationFailure(format!("unknown category: {s}")))
    }
}

/// Maximum number of results requested from the catalog, never below 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Take(NonZeroU32);

impl Take {
    /// Smallest allowed limit
    pub const MIN: Take = Take(NonZeroU32::MIN);
    /// Initial limit of the search form
    pub const DEFAULT: Take = Take::MIN;
    /// Increment/decrement step of the +/- controls
    pub const STEP: u32 = 10;

    /// Build a limit, rejecting zero
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Take)
    }

    /// Build a limit, clamping anything below 1 up to 1
    pub fn clamped(value: i64) -> Self {
        let value = u32::try_from(value.max(1)).unwrap_or(u32::MAX);
        Take::new(value).unwrap_or(Take::MIN)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn increment(self) -> Self {
        Take(self.0.saturating_add(Self::STEP))
    }

    /// Step down, floored at [`Take::MIN`]
    pub fn decrement(self) -> Self {
        Take::clamped(i64::from(self.get()) - i64::from(Self::STEP))
    }

    /// Display form of the limit with `.` between digit groups
    ///
    /// `10000` renders as `10.000`, the shape [`Take::parse_entry`] reads back.
    pub fn grouped(self) -> String {
        let digits = self.get().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        out
    }

    /// Parse a value typed into the limit field
    ///
    /// Dots are treated as digit-group separators (`10.000` is ten thousand).
    /// Numbers below 1 clamp to 1; anything non-numeric is a
    /// [`UpstreamError::ValidationFailure`] and must leave the current
    /// limit untouched.
    pub fn parse_entry(input: &str) -> UpstreamResult<Self> {
        let digits: String = input.trim().chars().filter(|c| *c != '.').collect();
        digits
            .parse::<i64>()
            .map(Take::clamped)
            .map_err(|e| UpstreamError::ValidationFailure(format!("invalid take {input:?}: {e}")))
    }
}

impl Default for Take {
    fn default() -> Self {
        Take::DEFAULT
    }
}

impl fmt::Display for Take {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Take {
    type Error = UpstreamError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Take::new(value)
            .ok_or_else(|| UpstreamError::ValidationFailure("take must be at least 1".to_string()))
    }
}

impl From<Take> for u32 {
    fn from(take: Take) -> Self {
        take.get()
    }
}

/// One search request as issued by the search form
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub search_term: String,
    pub category: Option<Category>,
    pub take: Take,
}

impl SearchQuery {
    /// Query-string pairs for `/api/products`; the category is omitted when unset
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("searchTerm", self.search_term.clone())];
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        pairs.push(("take", self.take.to_string()));
        pairs
    }

    pub fn has_search_term(&self) -> bool {
        !self.search_term.is_empty()
    }
}
