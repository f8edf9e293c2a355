//! Expense listing
//!
//! Sorts expenses newest first, pages through them ten at a time, and
//! buckets each page under "Month Year" headings.

use std::collections::HashMap;

use crate::models::Expense;

/// Number of expenses per listing page
pub const PAGE_SIZE: usize = 10;

/// Sort by date descending
///
/// Timestamps order by time of day; a bare date counts as midnight UTC.
/// The sort is stable, so equal instants keep their storage order.
/// Expenses whose date does not parse go last, also in storage order.
pub fn sort_by_date_desc(expenses: &[Expense]) -> Vec<Expense> {
    let (mut dated, undated): (Vec<_>, Vec<_>) = expenses
        .iter()
        .map(|e| (e.instant(), e))
        .partition(|(date, _)| date.is_some());

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    dated
        .into_iter()
        .chain(undated)
        .map(|(_, e)| e.clone())
        .collect()
}

/// Expenses sharing a calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    /// e.g. "June 2024"
    pub label: String,
    pub expenses: Vec<Expense>,
}

impl MonthGroup {
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

/// Bucket expenses by month, buckets in first-seen order
///
/// Expenses with an unparseable date are left out.
pub fn group_by_month(expenses: &[Expense]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for expense in expenses {
        let Some(label) = expense.month_label() else {
            continue;
        };

        match index.get(&label) {
            Some(&i) => groups[i].expenses.push(expense.clone()),
            None => {
                index.insert(label.clone(), groups.len());
                groups.push(MonthGroup {
                    label,
                    expenses: vec![expense.clone()],
                });
            }
        }
    }

    groups
}

/// Number of pages needed for `total_items`
pub fn page_count(total_items: usize) -> usize {
    total_items.div_ceil(PAGE_SIZE)
}

/// One page of a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// 1-indexed page number after clamping
    pub number: usize,
    /// Total number of pages (0 for an empty sequence)
    pub page_count: usize,
    pub total_items: usize,
    pub items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    /// Slice out page `requested`, clamped into `1..=page_count`
    pub fn of(items: &'a [T], requested: usize) -> Self {
        let count = page_count(items.len());
        let number = requested.clamp(1, count.max(1));
        let start = ((number - 1) * PAGE_SIZE).min(items.len());
        let end = (start + PAGE_SIZE).min(items.len());

        Self {
            number,
            page_count: count,
            total_items: items.len(),
            items: &items[start..end],
        }
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.page_count
    }
}

/// A page of the listing, grouped for display
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub number: usize,
    pub page_count: usize,
    pub total_items: usize,
    pub groups: Vec<MonthGroup>,
    /// Expenses on this page whose date does not parse
    pub undated: Vec<Expense>,
}

impl ListingPage {
    /// Sort, paginate, then group page `requested` of `expenses`
    pub fn build(expenses: &[Expense], requested: usize) -> Self {
        let sorted = sort_by_date_desc(expenses);
        let page = Page::of(&sorted, requested);

        Self {
            number: page.number,
            page_count: page.page_count,
            total_items: page.total_items,
            groups: group_by_month(page.items),
            undated: page
                .items
                .iter()
                .filter(|e| e.parsed_date().is_none())
                .cloned()
                .collect(),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.page_count
    }
}
