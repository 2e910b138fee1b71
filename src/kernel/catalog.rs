//! The scenario sidebar: categories with collapsible scenario lists and one selection cursor.

use rustc_hash::FxHashSet;

use crate::kernel::services::ports::ScenarioInfo;

pub const PREFERRED_CATEGORIES: &[&str] = &[
    "Networking",
    "Lifecycle",
    "Scheduling",
    "Security",
    "Storage",
    "Ops",
    "Resources",
    "Kernel",
];

const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCategory {
    pub name: String,
    pub expanded: bool,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRow<'a> {
    Category(&'a CatalogCategory),
    Entry(&'a CatalogEntry),
}

impl CatalogRow<'_> {
    pub fn is_category(&self) -> bool {
        matches!(self, CatalogRow::Category(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<CatalogCategory>,
    cursor: usize,
}

impl Catalog {
    pub fn build(scenarios: &[ScenarioInfo], completed: &FxHashSet<String>) -> Self {
        let mut catalog = Self::default();
        catalog.rebuild(scenarios, completed);
        catalog
    }

    /// Regroups the scenarios, keeping expansion state and the cursor where possible.
    pub fn rebuild(&mut self, scenarios: &[ScenarioInfo], completed: &FxHashSet<String>) {
        let mut groups: Vec<(String, Vec<CatalogEntry>)> = Vec::new();
        for info in scenarios {
            let category = if info.category.is_empty() {
                UNCATEGORIZED
            } else {
                info.category.as_str()
            };
            let entry = CatalogEntry {
                id: info.id.clone(),
                title: info.name.clone(),
                description: info.description.clone(),
                completed: completed.contains(&info.id),
            };
            match groups.iter_mut().find(|(name, _)| name == category) {
                Some((_, entries)) => entries.push(entry),
                None => groups.push((category.to_string(), vec![entry])),
            }
        }

        // Preferred categories first, the rest in first-seen order.
        groups.sort_by_key(|(name, _)| {
            PREFERRED_CATEGORIES
                .iter()
                .position(|p| p == name)
                .unwrap_or(PREFERRED_CATEGORIES.len())
        });

        let previous = std::mem::take(&mut self.categories);
        self.categories = groups
            .into_iter()
            .map(|(name, entries)| {
                let expanded = previous
                    .iter()
                    .find(|c| c.name == name)
                    .map_or(true, |c| c.expanded);
                CatalogCategory {
                    name,
                    expanded,
                    entries,
                }
            })
            .collect();
        self.clamp_cursor();
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Visible rows: every category, followed by its entries when expanded.
    pub fn rows(&self) -> Vec<CatalogRow<'_>> {
        let mut rows = Vec::new();
        for category in &self.categories {
            rows.push(CatalogRow::Category(category));
            if category.expanded {
                rows.extend(category.entries.iter().map(CatalogRow::Entry));
            }
        }
        rows
    }

    pub fn selected(&self) -> Option<CatalogRow<'_>> {
        self.rows().get(self.cursor).copied()
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        match self.selected()? {
            CatalogRow::Entry(entry) => Some(entry),
            CatalogRow::Category(_) => None,
        }
    }

    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .find(|e| e.id == id)
    }

    /// `(completed, total)`.
    pub fn progress(&self) -> (usize, usize) {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .fold((0, 0), |(done, total), e| {
                (done + usize::from(e.completed), total + 1)
            })
    }

    pub fn move_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_down(&mut self) -> bool {
        if self.cursor + 1 >= self.rows().len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_top(&mut self) -> bool {
        std::mem::replace(&mut self.cursor, 0) != 0
    }

    pub fn move_bottom(&mut self) -> bool {
        let last = self.rows().len().saturating_sub(1);
        std::mem::replace(&mut self.cursor, last) != last
    }

    pub fn collapse(&mut self) -> bool {
        self.set_selected_expanded(Some(false))
    }

    pub fn expand(&mut self) -> bool {
        self.set_selected_expanded(Some(true))
    }

    pub fn toggle(&mut self) -> bool {
        self.set_selected_expanded(None)
    }

    /// Only acts when the cursor is on a category row.
    fn set_selected_expanded(&mut self, expanded: Option<bool>) -> bool {
        let name = match self.selected() {
            Some(CatalogRow::Category(category)) => category.name.clone(),
            _ => return false,
        };
        let Some(category) = self.categories.iter_mut().find(|c| c.name == name) else {
            return false;
        };
        let next = expanded.unwrap_or(!category.expanded);
        let changed = category.expanded != next;
        category.expanded = next;
        self.clamp_cursor();
        changed
    }

    fn clamp_cursor(&mut self) {
        let len = self.rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "Networking" => "🌐",
        "Lifecycle" => "🔄",
        "Scheduling" => "📅",
        "Security" => "🔒",
        "Storage" => "💾",
        "Ops" => "⚙",
        "Resources" => "📊",
        "Kernel" => "🐧",
        _ => "📁",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/catalog.rs"]
mod tests;
