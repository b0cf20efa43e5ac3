use anchor_lang::prelude::*;

use crate::{
    constants::PERMIT_DOMAIN,
    errors::VaultError,
    events::{SharesApproved, SharesTransferred},
    interfaces::SignatureVerifier,
    vault::{Env, Vault},
};

/// Off-band approval signed by a share owner
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermitMessage {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub value: u64,
    pub nonce: u64,
    pub deadline: i64,
}

impl PermitMessage {
    /// Bytes the owner signs: domain tag followed by the Borsh layout of the message
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = PERMIT_DOMAIN.to_vec();
        self.serialize(&mut bytes)
            .map_err(|_| error!(VaultError::PermitEncodingFailed))?;
        Ok(bytes)
    }
}

impl Vault {
    pub fn transfer(&mut self, env: &mut Env<'_>, to: Pubkey, shares: u64) -> Result<()> {
        let from = env.caller;
        self.move_shares(from, to, shares)
    }

    /// Move shares out of `from`, spending the allowance `from` granted the caller
    pub fn transfer_from(
        &mut self,
        env: &mut Env<'_>,
        from: Pubkey,
        to: Pubkey,
        shares: u64,
    ) -> Result<()> {
        self.shares.spend_allowance(&from, &env.caller, shares)?;
        self.move_shares(from, to, shares)
    }

    pub fn approve(&mut self, env: &mut Env<'_>, spender: Pubkey, shares: u64) -> Result<()> {
        let owner = env.caller;
        self.set_allowance(owner, spender, shares)
    }

    /// Approve `spender` on behalf of `owner` through a signed [`PermitMessage`].
    ///
    /// Consumes the owner's current nonce, so each signature is usable once.
    #[allow(clippy::too_many_arguments)]
    pub fn permit(
        &mut self,
        env: &mut Env<'_>,
        verifier: &dyn SignatureVerifier,
        owner: Pubkey,
        spender: Pubkey,
        value: u64,
        deadline: i64,
        signature: &[u8; 64],
    ) -> Result<()> {
        require!(env.now <= deadline, VaultError::PermitExpired);

        let message = PermitMessage {
            vault: self.address,
            owner,
            spender,
            value,
            nonce: self.shares.nonce(&owner),
            deadline,
        };
        require!(
            verifier.verify(&owner, &message.to_bytes()?, signature),
            VaultError::InvalidSignature
        );

        self.shares.use_nonce(&owner)?;
        self.set_allowance(owner, spender, value)
    }

    fn move_shares(&mut self, from: Pubkey, to: Pubkey, shares: u64) -> Result<()> {
        require_keys_neq!(to, Pubkey::default(), VaultError::InvalidReceiver);

        self.shares.transfer(&from, &to, shares)?;

        emit!(SharesTransferred {
            vault: self.address,
            from,
            to,
            shares,
        });
        Ok(())
    }

    fn set_allowance(&mut self, owner: Pubkey, spender: Pubkey, shares: u64) -> Result<()> {
        require_keys_neq!(spender, Pubkey::default(), VaultError::InvalidReceiver);

        self.shares.approve(&owner, &spender, shares);

        emit!(SharesApproved {
            vault: self.address,
            owner,
            spender,
            shares,
        });
        Ok(())
    }
}
