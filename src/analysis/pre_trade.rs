use {
    crate::{
        analysis::risk::{remaining_budget, risk_ratio},
        config::{CHECKLIST, RISK, default_confirmations},
        domain::{
            ConfirmationImportance, TradeConfirmation, TradeDirection, TradeRecord, TradeStatus,
        },
        utils::{format_money, today_utc},
    },
    chrono::Utc,
    itertools::Itertools,
    serde::Serialize,
    strum_macros::{Display, EnumIter},
    thiserror::Error,
};

/// The four steps of the pre-trade gate, in the order they are walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum PreTradeStep {
    TechnicalConfirmations,
    ZoneSelection,
    TradeSetup,
    RiskValidation,
}

impl PreTradeStep {
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn title(&self) -> &'static str {
        CHECKLIST.steps.get(self.index()).copied().unwrap_or("")
    }
}

/// A single reason the gate refuses to open the trade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnmetCondition {
    #[error("{missing} critical confirmation(s) not ticked")]
    CriticalConfirmations { missing: usize },
    #[error("{done}/{required} important confirmations ticked")]
    ImportantConfirmations { done: usize, required: usize },
    #[error("no zone selected")]
    NoZone,
    #[error("entry price must be positive")]
    NoEntry,
    #[error("risk {risk} exceeds remaining weekly budget {remaining}")]
    OverBudget { risk: String, remaining: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChecklistError {
    #[error("trade blocked: {}", .0.iter().join("; "))]
    Blocked(Vec<UnmetCondition>),
    #[error("unknown confirmation '{0}'")]
    UnknownConfirmation(String),
}

/// Ticked counts per importance level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ConfirmationProgress {
    pub critical_total: usize,
    pub critical_done: usize,
    pub important_total: usize,
    pub important_done: usize,
    /// ceil(share x important_total)
    pub important_required: usize,
    pub optional_total: usize,
    pub optional_done: usize,
}

impl ConfirmationProgress {
    pub fn from_confirmations(confirmations: &[TradeConfirmation]) -> Self {
        let mut p = confirmations.iter().fold(Self::default(), |mut p, c| {
            match c.importance {
                ConfirmationImportance::Critical => {
                    p.critical_total += 1;
                    p.critical_done += usize::from(c.completed);
                }
                ConfirmationImportance::Important => {
                    p.important_total += 1;
                    p.important_done += usize::from(c.completed);
                }
                ConfirmationImportance::Optional => {
                    p.optional_total += 1;
                    p.optional_done += usize::from(c.completed);
                }
            }
            p
        });
        p.important_required =
            (p.important_total as f64 * RISK.important_confirmation_share).ceil() as usize;
        p
    }

    pub fn critical_met(&self) -> bool {
        self.critical_done == self.critical_total
    }

    pub fn important_met(&self) -> bool {
        self.important_done >= self.important_required
    }

    pub fn is_sufficient(&self) -> bool {
        self.critical_met() && self.important_met()
    }
}

/// Step four report. Only `within_budget` blocks the trade; the rest is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskValidation {
    pub risk_ratio: f64,
    pub remaining_budget: f64,
    pub within_budget: bool,
    pub ratio_acceptable: bool,
    pub setup_complete: bool,
}

/// Working state of one pass through the pre-trade gate.
#[derive(Debug, Clone, PartialEq)]
pub struct PreTradeDraft {
    pub confirmations: Vec<TradeConfirmation>,
    pub zone_id: Option<String>,
    pub zone_name: Option<String>,
    pub planned_entry_id: Option<String>,
    pub direction: TradeDirection,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub size: f64,
    pub risk_amount: f64,
    pub notes: Option<String>,
}

impl Default for PreTradeDraft {
    fn default() -> Self {
        Self {
            confirmations: default_confirmations(),
            zone_id: None,
            zone_name: None,
            planned_entry_id: None,
            direction: TradeDirection::Buy,
            entry: 0.0,
            stop_loss: 0.0,
            take_profit: 0.0,
            size: 0.0,
            risk_amount: 0.0,
            notes: None,
        }
    }
}

impl PreTradeDraft {
    /// Flip one confirmation by id.
    pub fn toggle(&mut self, id: &str) -> Result<bool, ChecklistError> {
        let c = self
            .confirmations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ChecklistError::UnknownConfirmation(id.to_string()))?;
        c.completed = !c.completed;
        Ok(c.completed)
    }

    pub fn confirm(&mut self, ids: &[String]) -> Result<(), ChecklistError> {
        for id in ids {
            let c = self
                .confirmations
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| ChecklistError::UnknownConfirmation(id.clone()))?;
            c.completed = true;
        }
        Ok(())
    }

    pub fn progress(&self) -> ConfirmationProgress {
        ConfirmationProgress::from_confirmations(&self.confirmations)
    }

    pub fn risk_validation(&self, budget: f64, used: f64) -> RiskValidation {
        let ratio = risk_ratio(self.entry, self.stop_loss, self.take_profit);
        let remaining = remaining_budget(budget, used);
        RiskValidation {
            risk_ratio: ratio,
            remaining_budget: remaining,
            within_budget: self.risk_amount <= remaining,
            ratio_acceptable: ratio >= RISK.min_risk_ratio,
            setup_complete: self.stop_loss > 0.0 && self.take_profit > 0.0,
        }
    }

    pub fn step_complete(&self, step: PreTradeStep, budget: f64, used: f64) -> bool {
        match step {
            PreTradeStep::TechnicalConfirmations => self.progress().is_sufficient(),
            PreTradeStep::ZoneSelection => self.zone_id.is_some(),
            PreTradeStep::TradeSetup => self.entry > 0.0,
            PreTradeStep::RiskValidation => self.risk_validation(budget, used).within_budget,
        }
    }

    /// Every blocking condition that currently fails. Empty means the trade can be opened.
    pub fn unmet_conditions(&self, budget: f64, used: f64) -> Vec<UnmetCondition> {
        let mut unmet = Vec::new();
        let progress = self.progress();
        if !progress.critical_met() {
            unmet.push(UnmetCondition::CriticalConfirmations {
                missing: progress.critical_total - progress.critical_done,
            });
        }
        if !progress.important_met() {
            unmet.push(UnmetCondition::ImportantConfirmations {
                done: progress.important_done,
                required: progress.important_required,
            });
        }
        if self.zone_id.is_none() {
            unmet.push(UnmetCondition::NoZone);
        }
        if self.entry <= 0.0 {
            unmet.push(UnmetCondition::NoEntry);
        }
        let risk = self.risk_validation(budget, used);
        if !risk.within_budget {
            unmet.push(UnmetCondition::OverBudget {
                risk: format_money(self.risk_amount),
                remaining: format_money(risk.remaining_budget),
            });
        }
        unmet
    }

    pub fn can_open(&self, budget: f64, used: f64) -> bool {
        self.unmet_conditions(budget, used).is_empty()
    }

    /// Turn the draft into an open trade dated today, or list why it cannot be.
    pub fn into_trade(self, budget: f64, used: f64) -> Result<TradeRecord, ChecklistError> {
        let unmet = self.unmet_conditions(budget, used);
        if !unmet.is_empty() {
            return Err(ChecklistError::Blocked(unmet));
        }
        let now = Utc::now();
        Ok(TradeRecord {
            id: uuid::Uuid::new_v4().to_string(),
            date: today_utc(),
            pair: RISK.instrument.to_string(),
            direction: self.direction,
            entry: self.entry,
            exit: None,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            size: self.size,
            status: TradeStatus::Open,
            pnl: None,
            risk_ratio: risk_ratio(self.entry, self.stop_loss, self.take_profit),
            zone_id: self.zone_id,
            zone_name: self.zone_name,
            planned_entry_id: self.planned_entry_id,
            confirmations: self.confirmations,
            risk_amount: self.risk_amount,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        })
    }
}
