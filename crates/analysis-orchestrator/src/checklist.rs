use analysis_core::{ChecklistEntry, ChecklistMode, ChecklistStatus, InvestmentChecklistItem};

/// Demonstration checklist shown with every analysis in static mode
pub fn static_checklist() -> Vec<ChecklistEntry> {
    vec![
        ChecklistEntry::new("Read the whitepaper", ChecklistStatus::Pass),
        ChecklistEntry::new("Check team & advisors", ChecklistStatus::Pass),
        ChecklistEntry::new("Analyze competitors", ChecklistStatus::Warning),
        ChecklistEntry::new("Define entry point", ChecklistStatus::Fail),
        ChecklistEntry::new("Calculate position size", ChecklistStatus::Pass),
    ]
}

/// Produces the due-diligence checklist section of a result
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecklistEvaluator {
    mode: ChecklistMode,
}

impl ChecklistEvaluator {
    pub fn new(mode: ChecklistMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ChecklistMode {
        self.mode
    }

    /// In configured mode: completed => pass, required and open => fail,
    /// optional and open => warning. An empty configured list falls back to
    /// the static table.
    pub fn evaluate(&self, items: &[InvestmentChecklistItem]) -> Vec<ChecklistEntry> {
        match self.mode {
            ChecklistMode::Static => static_checklist(),
            ChecklistMode::Configured if items.is_empty() => static_checklist(),
            ChecklistMode::Configured => items
                .iter()
                .map(|item| {
                    let status = match (item.completed, item.is_required) {
                        (true, _) => ChecklistStatus::Pass,
                        (false, true) => ChecklistStatus::Fail,
                        (false, false) => ChecklistStatus::Warning,
                    };
                    ChecklistEntry::new(&item.item, status)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::ChecklistCategory;

    #[test]
    fn test_static_mode_ignores_configuration() {
        let evaluator = ChecklistEvaluator::default();
        let items = vec![InvestmentChecklistItem::new("1", ChecklistCategory::Exit, "Set stop loss", true)];
        let entries = evaluator.evaluate(&items);
        assert_eq!(entries, static_checklist());
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[2].status, ChecklistStatus::Warning);
        assert_eq!(entries[3].status, ChecklistStatus::Fail);
    }

    #[test]
    fn test_configured_mode_maps_progress() {
        let evaluator = ChecklistEvaluator::new(ChecklistMode::Configured);
        let mut done = InvestmentChecklistItem::new("1", ChecklistCategory::Research, "Read the whitepaper", true);
        done.completed = true;
        let items = vec![
            done,
            InvestmentChecklistItem::new("2", ChecklistCategory::Entry, "Define entry point", true),
            InvestmentChecklistItem::new("3", ChecklistCategory::Risk, "Check correlation with BTC", false),
        ];

        let statuses: Vec<ChecklistStatus> = evaluator.evaluate(&items).iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![ChecklistStatus::Pass, ChecklistStatus::Fail, ChecklistStatus::Warning]
        );
    }

    #[test]
    fn test_configured_mode_without_items_falls_back() {
        let evaluator = ChecklistEvaluator::new(ChecklistMode::Configured);
        assert_eq!(evaluator.evaluate(&[]), static_checklist());
    }
}
