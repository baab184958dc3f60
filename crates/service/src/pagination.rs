//! Pagination utilities for service layer
//!
//! Parses `page`, `size` and repeated `sort` query parameters into a
//! [`PageRequest`]. Pages are 0-based; sort entries follow the
//! `property(,property)*(,asc|desc)` form.

use crate::errors::ServiceError;

/// Bounds applied while parsing a page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

impl PageLimits {
    pub fn new(default_size: u64, max_size: u64) -> Self {
        let default_size = default_size.max(1);
        Self { default_size, max_size: max_size.max(default_size) }
    }
}

impl Default for PageLimits {
    fn default() -> Self { Self { default_size: 3, max_size: 100 } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: &str) -> Self {
        Self { property: property.to_string(), direction: Direction::Asc }
    }

    pub fn desc(property: &str) -> Self {
        Self { property: property.to_string(), direction: Direction::Desc }
    }
}

/// 0-based page request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(PageLimits::default())
    }
}

impl PageRequest {
    pub fn first(limits: PageLimits) -> Self {
        Self { page: 0, size: limits.default_size, sort: Vec::new() }
    }

    /// Build from raw query pairs. Unknown keys are ignored.
    pub fn from_query_pairs(pairs: &[(String, String)], limits: PageLimits) -> Result<Self, ServiceError> {
        let mut req = Self::first(limits);
        for (key, value) in pairs {
            match key.as_str() {
                "page" => req.page = parse_number("page", value)?,
                "size" => {
                    let size = parse_number("size", value)?;
                    if size == 0 {
                        return Err(ServiceError::Validation("size must be greater than 0".into()));
                    }
                    req.size = size.min(limits.max_size);
                }
                "sort" => req.sort.extend(parse_sort(value)?),
                _ => {}
            }
        }
        Ok(req)
    }

    /// Row offset of the first record. `None` when it cannot be expressed as a
    /// SQL offset (beyond `i64::MAX`); such a page is empty.
    pub fn offset(&self) -> Option<u64> {
        self.page.checked_mul(self.size).filter(|o| *o <= i64::MAX as u64)
    }
}

fn parse_number(name: &str, value: &str) -> Result<u64, ServiceError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ServiceError::Validation(format!("{name} must be a non-negative integer, got '{value}'")))
}

fn parse_sort(value: &str) -> Result<Vec<SortOrder>, ServiceError> {
    let mut parts: Vec<&str> = value.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    let direction = match parts.last().map(|p| p.to_ascii_lowercase()) {
        Some(d) if d == "asc" => {
            parts.pop();
            Direction::Asc
        }
        Some(d) if d == "desc" => {
            parts.pop();
            Direction::Desc
        }
        _ => Direction::Asc,
    };
    if parts.is_empty() {
        return Err(ServiceError::Validation(format!("sort '{value}' names no property")));
    }
    Ok(parts
        .into_iter()
        .map(|p| SortOrder { property: p.to_string(), direction })
        .collect())
}
