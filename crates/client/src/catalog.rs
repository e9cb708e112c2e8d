//! Client-side product filtering and sorting.

use std::str::FromStr;

use rust_decimal::Decimal;

use shopfront_core::Product;

/// Error returned when a filter or sort name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseQueryError {
    kind: &'static str,
    value: String,
}

/// Price band filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    #[default]
    All,
    /// Below 25.
    Under25,
    /// 25 to 50 inclusive.
    From25To50,
    /// 50 to 100 inclusive.
    From50To100,
    /// Above 100.
    Over100,
}

impl PriceRange {
    /// Whether `price` falls in this band.
    #[must_use]
    pub fn contains(self, price: Decimal) -> bool {
        let (low, high) = (Decimal::from(25), Decimal::from(50));
        let hundred = Decimal::from(100);
        match self {
            Self::All => true,
            Self::Under25 => price < low,
            Self::From25To50 => price >= low && price <= high,
            Self::From50To100 => price >= high && price <= hundred,
            Self::Over100 => price > hundred,
        }
    }
}

impl FromStr for PriceRange {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            "under25" => Ok(Self::Under25),
            "25to50" => Ok(Self::From25To50),
            "50to100" => Ok(Self::From50To100),
            "over100" => Ok(Self::Over100),
            other => Err(ParseQueryError {
                kind: "price range",
                value: other.to_string(),
            }),
        }
    }
}

/// Product ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
}

impl FromStr for SortOrder {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "name" => Ok(Self::Name),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            other => Err(ParseQueryError {
                kind: "sort order",
                value: other.to_string(),
            }),
        }
    }
}

/// Search, price band and ordering applied to a product list.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
    pub price_range: PriceRange,
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Whether `product` passes the search and price filters.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let term = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);
        let matches_search = term.is_none_or(|term| {
            product.name.to_lowercase().contains(&term)
                || product.description.to_lowercase().contains(&term)
        });
        matches_search && self.price_range.contains(product.price.amount())
    }

    /// Filter and sort `products`.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut selected: Vec<Product> = products
            .iter()
            .filter(|product| self.matches(product))
            .cloned()
            .collect();
        match self.sort {
            SortOrder::Name => selected.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::PriceLow => selected.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceHigh => selected.sort_by(|a, b| b.price.cmp(&a.price)),
        }
        selected
    }
}
