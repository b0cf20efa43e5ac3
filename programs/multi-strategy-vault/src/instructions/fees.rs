use anchor_lang::prelude::*;

use crate::{
    accounting::Snapshot,
    events::{FeesChanged, FeesProposed, FeesTaken},
    state::{PendingChange, VaultFees},
    vault::{Env, FeeAssessment, Vault},
};

impl Vault {
    /// Settle management and performance fees. Callable by anyone.
    pub fn take_management_and_performance_fees(&mut self, env: &mut Env<'_>) -> Result<()> {
        self.non_reentrant(|vault| {
            let (_, assessment) = vault.settle_fees(env)?;
            vault.emit_fees_taken(&assessment, env.now);
            Ok(())
        })
    }

    /// Settle pending fees ahead of an operation and return the snapshot the
    /// operation must use from here on.
    pub(crate) fn take_fees(&mut self, env: &Env<'_>) -> Result<Snapshot> {
        let (snapshot, assessment) = self.settle_fees(env)?;
        if assessment.fee_shares > 0 {
            self.emit_fees_taken(&assessment, env.now);
        }
        Ok(snapshot)
    }

    fn settle_fees(&mut self, env: &Env<'_>) -> Result<(Snapshot, FeeAssessment)> {
        let snapshot = self.snapshot(env)?;
        let assessment = self.assess_fees(&snapshot, env.now)?;

        if assessment.share_value > self.state.high_water_mark {
            self.state.high_water_mark = assessment.share_value;
        }

        if assessment.fee_shares > 0 {
            self.shares
                .mint(&self.state.fee_recipient, assessment.fee_shares)?;
            msg!(
                "Fees taken: management {}, performance {}, {} shares to {}",
                assessment.accrued.management,
                assessment.accrued.performance,
                assessment.fee_shares,
                self.state.fee_recipient
            );
        }
        self.state.fees_updated_at = env.now;

        Ok((snapshot.with_minted(assessment.fee_shares)?, assessment))
    }

    fn emit_fees_taken(&self, assessment: &FeeAssessment, now: i64) {
        emit!(FeesTaken {
            vault: self.address,
            fee_recipient: self.state.fee_recipient,
            management_fee: assessment.accrued.management,
            performance_fee: assessment.accrued.performance,
            fee_shares: assessment.fee_shares,
            high_water_mark: self.state.high_water_mark,
            timestamp: now,
        });
    }

    /// Propose a new fee schedule (owner only). Takes effect through
    /// [`Vault::change_fees`] once the quit period has elapsed.
    pub fn propose_fees(&mut self, env: &mut Env<'_>, fees: VaultFees) -> Result<()> {
        self.state.require_owner(&env.caller)?;
        fees.validate()?;

        self.state.proposed_fees = PendingChange::Pending {
            proposed_at: env.now,
            payload: fees,
        };

        emit!(FeesProposed {
            vault: self.address,
            proposed_fees: fees,
            timestamp: env.now,
        });
        Ok(())
    }

    /// Install the proposed fee schedule. Callable by anyone once due.
    ///
    /// Fees accrued under the old schedule are not settled; the accrual clock
    /// restarts at `env.now`.
    pub fn change_fees(&mut self, env: &mut Env<'_>) -> Result<()> {
        let new_fees = self
            .state
            .proposed_fees
            .take_due(env.now, self.state.quit_period)?;

        let old_fees = std::mem::replace(&mut self.state.fees, new_fees);
        self.state.fees_updated_at = env.now;

        emit!(FeesChanged {
            vault: self.address,
            old_fees,
            new_fees,
            timestamp: env.now,
        });
        Ok(())
    }
}
