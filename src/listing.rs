//! List composition - search, year filter and growing-prefix pagination
//!
//! The visible set is always recomputed from the full source snapshot.

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::models::Tablero;

/// Does `record` pass the search term and year filter?
///
/// `needle` must already be lowercased.
fn matches(record: &Tablero, needle: &str, year: Option<i32>) -> bool {
    let text_ok = needle.is_empty()
        || record.nombre.to_lowercase().contains(needle)
        || record.ubicacion.to_lowercase().contains(needle)
        || record.marca.to_lowercase().contains(needle)
        || record.estado.as_str().to_lowercase().contains(needle);
    let year_ok = year.map_or(true, |y| record.ano_fabricacion == y);
    text_ok && year_ok
}

/// Filter `records` and take the first `page * page_size` survivors,
/// preserving source order.
pub fn compose<'a>(
    records: &'a [Tablero],
    search: &str,
    year: Option<i32>,
    page: usize,
    page_size: usize,
) -> Vec<&'a Tablero> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|r| matches(r, &needle, year))
        .take(page.saturating_mul(page_size))
        .collect()
}

/// Holds the composer inputs for the list screen
#[derive(Clone, Debug)]
pub struct ListView {
    source: Vec<Tablero>,
    search: String,
    year_filter: Option<i32>,
    page: usize,
    page_size: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        ListView {
            source: Vec::new(),
            search: String::new(),
            year_filter: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn set_source(&mut self, records: Vec<Tablero>) {
        self.source = records;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_year_filter(&mut self, year: Option<i32>) {
        self.year_filter = year;
        self.page = 1;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn year_filter(&self) -> Option<i32> {
        self.year_filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn source(&self) -> &[Tablero] {
        &self.source
    }

    pub fn visible(&self) -> Vec<&Tablero> {
        compose(
            &self.source,
            &self.search,
            self.year_filter,
            self.page,
            self.page_size,
        )
    }

    pub fn filtered_len(&self) -> usize {
        let needle = self.search.to_lowercase();
        self.source
            .iter()
            .filter(|r| matches(r, &needle, self.year_filter))
            .count()
    }

    pub fn has_more(&self) -> bool {
        self.page.saturating_mul(self.page_size) < self.filtered_len()
    }

    /// Advance one page. No-op once everything filtered is visible.
    pub fn load_more(&mut self) -> bool {
        if self.has_more() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Distinct manufacture years of the source, ascending
    pub fn available_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.source.iter().map(|r| r.ano_fabricacion).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Step the year filter: unset -> first year -> ... -> last year -> unset
    pub fn cycle_year_filter(&mut self) {
        let years = self.available_years();
        let next = match self.year_filter {
            None => years.first().copied(),
            Some(current) => years.iter().copied().find(|y| *y > current),
        };
        self.set_year_filter(next);
    }
}
