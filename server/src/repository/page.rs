use std::cmp::Ordering;

use crate::models::Event;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Id,
    Name,
    BasePrice,
    MaxPrice,
    BeginEventDateTime,
    EndEventDateTime,
}

impl SortProperty {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(SortProperty::Id),
            "name" => Some(SortProperty::Name),
            "basePrice" => Some(SortProperty::BasePrice),
            "maxPrice" => Some(SortProperty::MaxPrice),
            "beginEventDateTime" => Some(SortProperty::BeginEventDateTime),
            "endEventDateTime" => Some(SortProperty::EndEventDateTime),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::Name => "name",
            SortProperty::BasePrice => "basePrice",
            SortProperty::MaxPrice => "maxPrice",
            SortProperty::BeginEventDateTime => "beginEventDateTime",
            SortProperty::EndEventDateTime => "endEventDateTime",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::Name => "name",
            SortProperty::BasePrice => "base_price",
            SortProperty::MaxPrice => "max_price",
            SortProperty::BeginEventDateTime => "begin_event_date_time",
            SortProperty::EndEventDateTime => "end_event_date_time",
        }
    }

    fn compare(&self, a: &Event, b: &Event) -> Ordering {
        match self {
            SortProperty::Id => a.id.cmp(&b.id),
            SortProperty::Name => a.name.cmp(&b.name),
            SortProperty::BasePrice => a.base_price.cmp(&b.base_price),
            SortProperty::MaxPrice => a.max_price.cmp(&b.max_price),
            SortProperty::BeginEventDateTime => {
                a.begin_event_date_time.cmp(&b.begin_event_date_time)
            }
            SortProperty::EndEventDateTime => a.end_event_date_time.cmp(&b.end_event_date_time),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: Direction,
}

impl Sort {
    /// Parses `property[,asc|desc]`. Unknown properties yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(',').map(str::trim);
        let property = SortProperty::parse(parts.next()?)?;
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            Some("desc") => Direction::Desc,
            _ => Direction::Asc,
        };
        Some(Self {
            property,
            direction,
        })
    }

    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        let ordering = self.property.compare(a, b);
        let ordering = match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        };
        ordering.then_with(|| a.id.cmp(&b.id))
    }

    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.property.as_str(), self.direction.as_str())
    }
}

/// Zero-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    /// Builds a request from raw query values, falling back to defaults for
    /// anything missing or unparseable.
    pub fn from_query(page: Option<&str>, size: Option<&str>, sort: Option<&str>) -> Self {
        let page = page.and_then(|p| p.trim().parse().ok()).unwrap_or(0);
        let size = size
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self::new(page, size).with_sort(sort.and_then(Sort::parse))
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self { page, ..*self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        let pages = self.total_elements.div_ceil(u64::from(self.size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn has_next(&self) -> bool {
        !self.is_last()
    }
}
