//! Grouped order view builder.
//!
//! Assembles the hierarchical display list: the Writers Admin section first,
//! then one section per employer in alphabetical order, then Others. Groups
//! left empty by the status filter are omitted entirely rather than rendered
//! empty.

use log::debug;
use std::collections::HashMap;

use crate::domain::models::order::{Order, OrderStatus, WorkCategory};
use crate::domain::models::views::{OrderSection, SectionStatusCounts, StatusFilter};

pub const WRITERS_ADMIN_SECTION_ID: &str = "writers-admin";
pub const OTHERS_SECTION_ID: &str = "others";
const EMPLOYER_SECTION_PREFIX: &str = "employer-";

/// Stable section key for an employer, used for collapse state.
pub fn employer_section_id(name: &str) -> String {
    format!("{}{}", EMPLOYER_SECTION_PREFIX, name)
}

/// View builder over an order snapshot.
#[derive(Debug, Clone, Default)]
pub struct GroupingService;

impl GroupingService {
    pub fn new() -> Self {
        Self
    }

    /// Build the grouped view for the given filter. Section sub-totals and
    /// status counts are computed strictly from the filtered set.
    pub fn build_grouped_view(
        &self,
        orders: &[Order],
        employers: &[String],
        filter: StatusFilter,
    ) -> Vec<OrderSection> {
        let filtered: Vec<&Order> = orders
            .iter()
            .filter(|o| filter.matches(o.status))
            .collect();

        let mut sections = Vec::new();

        let writers_admin: Vec<&Order> = filtered
            .iter()
            .copied()
            .filter(|o| o.category == WorkCategory::WritersAdmin)
            .collect();
        if let Some(section) =
            Self::build_section("Writers Admin", WRITERS_ADMIN_SECTION_ID, writers_admin)
        {
            sections.push(section);
        }

        let mut sorted_employers: Vec<&String> = employers.iter().collect();
        sorted_employers.sort_by_key(|name| name.to_lowercase());

        for name in sorted_employers {
            let employer_orders: Vec<&Order> = filtered
                .iter()
                .copied()
                .filter(|o| o.category == WorkCategory::Employer && &o.employer_name == name)
                .collect();
            if let Some(section) =
                Self::build_section(name, &employer_section_id(name), employer_orders)
            {
                sections.push(section);
            }
        }

        let others: Vec<&Order> = filtered
            .iter()
            .copied()
            .filter(|o| o.category == WorkCategory::Others)
            .collect();
        if let Some(section) = Self::build_section("Others", OTHERS_SECTION_ID, others) {
            sections.push(section);
        }

        debug!(
            "Grouped {} orders into {} sections (filter {:?})",
            filtered.len(),
            sections.len(),
            filter
        );
        sections
    }

    /// All orders belonging to a section, from the UNFILTERED snapshot.
    /// Export-by-status uses this, so a status filter active in the view
    /// never changes what gets exported.
    pub fn section_orders(&self, orders: &[Order], section_id: &str) -> Vec<Order> {
        let mut matching: Vec<Order> = orders
            .iter()
            .filter(|o| Self::belongs_to_section(o, section_id))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date_created.cmp(&a.date_created));
        matching
    }

    /// Collapse-state lookup. Unknown or stale keys default to expanded.
    pub fn is_section_collapsed(collapsed: &HashMap<String, bool>, section_id: &str) -> bool {
        collapsed.get(section_id).copied().unwrap_or(false)
    }

    fn belongs_to_section(order: &Order, section_id: &str) -> bool {
        match section_id {
            WRITERS_ADMIN_SECTION_ID => order.category == WorkCategory::WritersAdmin,
            OTHERS_SECTION_ID => order.category == WorkCategory::Others,
            _ => match section_id.strip_prefix(EMPLOYER_SECTION_PREFIX) {
                Some(name) => {
                    order.category == WorkCategory::Employer && order.employer_name == name
                }
                None => false,
            },
        }
    }

    /// Build one section from its (already filtered) orders; `None` when the
    /// group is empty so it disappears from the view.
    fn build_section(title: &str, section_id: &str, orders: Vec<&Order>) -> Option<OrderSection> {
        if orders.is_empty() {
            return None;
        }

        let mut counts = SectionStatusCounts::default();
        let mut total_amount = 0.0;
        for order in &orders {
            match order.status {
                OrderStatus::Active => counts.active += 1,
                OrderStatus::Submitted => counts.submitted += 1,
                OrderStatus::Completed => counts.completed += 1,
            }
            total_amount += order.amount;
        }

        let mut owned: Vec<Order> = orders.into_iter().cloned().collect();
        owned.sort_by(|a, b| b.date_created.cmp(&a.date_created));

        Some(OrderSection {
            title: title.to_string(),
            section_id: section_id.to_string(),
            orders: owned,
            status_counts: counts,
            total_amount,
        })
    }
}
