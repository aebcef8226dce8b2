use crate::dashboard::model::Checklist;
use crate::dashboard::store::DemoStore;
use crate::utils::formatting::{percent, progress_bar};
use crate::utils::table::Table;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerStats {
    pub total: usize,
    pub complete: usize,
    pub pending: usize,
    /// Completed checklists over all checklists, rounded.
    pub percent_complete: u32,
}

pub fn stats(checklists: &[Checklist]) -> ManagerStats {
    let total = checklists.len();
    let complete = checklists.iter().filter(|c| c.is_complete()).count();
    ManagerStats {
        total,
        complete,
        pending: total - complete,
        percent_complete: percent(complete, total),
    }
}

/// Pending checklists first, then by employee name and title.
pub fn sorted_rows(checklists: &[Checklist]) -> Vec<&Checklist> {
    let mut rows: Vec<&Checklist> = checklists.iter().collect();
    rows.sort_by(|a, b| {
        a.is_complete()
            .cmp(&b.is_complete())
            .then_with(|| a.employee_name.cmp(&b.employee_name))
            .then_with(|| a.title.cmp(&b.title))
    });
    rows
}

pub fn render_manager(store: &DemoStore) -> String {
    let s = stats(&store.checklists);
    let mut out = String::new();

    let _ = writeln!(out, "📋 Checklists today: {}", s.total);
    let _ = writeln!(out, "   complete: {}   pending: {}", s.complete, s.pending);
    let _ = writeln!(out, "   overall {}\n", progress_bar(s.percent_complete, 20));

    let mut table = Table::new(&["Location", "Employee", "Checklist", "Progress", "Status", "Updated"]);
    for c in sorted_rows(&store.checklists) {
        table.add_row(vec![
            c.location_name.clone(),
            c.employee_name.clone(),
            c.title.clone(),
            format!("{}%", c.progress),
            if c.is_complete() { "Complete" } else { "Pending" }.to_string(),
            c.last_updated.format("%H:%M").to_string(),
        ]);
    }
    out.push_str(&table.render());
    out
}

/// Task-level breakdown of one checklist.
pub fn render_checklist_detail(checklist: &Checklist) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} @ {} ({}%)",
        checklist.title, checklist.employee_name, checklist.location_name, checklist.progress
    );
    for t in &checklist.tasks {
        let _ = writeln!(
            out,
            "  {} {}{}",
            if t.completed { "✓" } else { "✗" },
            t.title,
            t.value
                .as_deref()
                .map(|v| format!(": {v}"))
                .unwrap_or_default()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn store() -> DemoStore {
        DemoStore::seeded(
            NaiveDate::from_ymd_opt(2026, 2, 12)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn stats_add_up() {
        let store = store();
        let s = stats(&store.checklists);
        assert_eq!(s.total, 30);
        assert_eq!(s.complete + s.pending, s.total);
        assert_eq!(s.percent_complete, percent(s.complete, s.total));
    }

    #[test]
    fn pending_rows_come_first() {
        let store = store();
        let rows = sorted_rows(&store.checklists);
        let first_done = rows.iter().position(|c| c.is_complete()).unwrap();
        assert!(rows[first_done..].iter().all(|c| c.is_complete()));
        assert!(rows[..first_done].windows(2).all(|w| w[0].employee_name <= w[1].employee_name));
    }

    #[test]
    fn empty_store_has_zero_percent() {
        assert_eq!(stats(&[]).percent_complete, 0);
    }
}
