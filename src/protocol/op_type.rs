//! The closed operation registry.
//!
//! Operation codes are positional: an operation's numeric code is its index
//! in the order the chain registered it, so this list reproduces the
//! reference ordering verbatim and is strictly append-only. Reordering or
//! inserting entries would silently change every code after the edit and
//! break binary compatibility with the chain.

use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A registered operation kind.
///
/// `code()` is the on-wire numeric tag (the discriminant), `name()` the
/// JSON tag. Codes `56..` are virtual operations: produced by the node in
/// account histories, never broadcast by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum OpType {
    Vote,
    Comment,
    Transfer,
    TransferToVesting,
    WithdrawVesting,
    LimitOrderCreate,
    LimitOrderCancel,
    FeedPublish,
    Convert,
    AccountCreate,
    AccountUpdate,
    WitnessUpdate,
    AccountWitnessVote,
    AccountWitnessProxy,
    Pow,
    Custom,
    ReportOverProduction,
    DeleteComment,
    CustomJson,
    CommentOptions,
    SetWithdrawVestingRoute,
    LimitOrderCreate2,
    ClaimAccount,
    CreateClaimedAccount,
    RequestAccountRecovery,
    RecoverAccount,
    ChangeRecoveryAccount,
    EscrowTransfer,
    EscrowDispute,
    EscrowRelease,
    Pow2,
    EscrowApprove,
    TransferToSavings,
    TransferFromSavings,
    CancelTransferFromSavings,
    CustomBinary,
    DeclineVotingRights,
    ResetAccount,
    SetResetAccount,
    ClaimRewardBalance,
    DelegateVestingShares,
    AccountCreateWithDelegation,
    WitnessSetProperties,
    AccountUpdate2,
    CreateProposal,
    UpdateProposalVotes,
    RemoveProposal,
    ClaimRewardBalance2,
    Vote2,
    SmtSetup,
    SmtSetupEmissions,
    SmtSetupIcoTier,
    SmtSetSetupParameters,
    SmtSetRuntimeParameters,
    SmtCreate,
    SmtContribute,
    FillConvertRequest,
    AuthorReward,
    CurationReward,
    CommentReward,
    LiquidityReward,
    Interest,
    FillVestingWithdraw,
    FillOrder,
    ShutdownWitness,
    FillTransferFromSavings,
    Hardfork,
    CommentPayoutUpdate,
    ReturnVestingDelegation,
    CommentBenefactorReward,
    ProducerReward,
    ClearNullAccountBalance,
    ProposalPay,
    SpsFund,
}

/// First code in the virtual-operation range.
const FIRST_VIRTUAL_CODE: u16 = OpType::FillConvertRequest as u16;

impl OpType {
    /// Every registered operation, in code order.
    pub const ALL: [OpType; 74] = [
        OpType::Vote,
        OpType::Comment,
        OpType::Transfer,
        OpType::TransferToVesting,
        OpType::WithdrawVesting,
        OpType::LimitOrderCreate,
        OpType::LimitOrderCancel,
        OpType::FeedPublish,
        OpType::Convert,
        OpType::AccountCreate,
        OpType::AccountUpdate,
        OpType::WitnessUpdate,
        OpType::AccountWitnessVote,
        OpType::AccountWitnessProxy,
        OpType::Pow,
        OpType::Custom,
        OpType::ReportOverProduction,
        OpType::DeleteComment,
        OpType::CustomJson,
        OpType::CommentOptions,
        OpType::SetWithdrawVestingRoute,
        OpType::LimitOrderCreate2,
        OpType::ClaimAccount,
        OpType::CreateClaimedAccount,
        OpType::RequestAccountRecovery,
        OpType::RecoverAccount,
        OpType::ChangeRecoveryAccount,
        OpType::EscrowTransfer,
        OpType::EscrowDispute,
        OpType::EscrowRelease,
        OpType::Pow2,
        OpType::EscrowApprove,
        OpType::TransferToSavings,
        OpType::TransferFromSavings,
        OpType::CancelTransferFromSavings,
        OpType::CustomBinary,
        OpType::DeclineVotingRights,
        OpType::ResetAccount,
        OpType::SetResetAccount,
        OpType::ClaimRewardBalance,
        OpType::DelegateVestingShares,
        OpType::AccountCreateWithDelegation,
        OpType::WitnessSetProperties,
        OpType::AccountUpdate2,
        OpType::CreateProposal,
        OpType::UpdateProposalVotes,
        OpType::RemoveProposal,
        OpType::ClaimRewardBalance2,
        OpType::Vote2,
        OpType::SmtSetup,
        OpType::SmtSetupEmissions,
        OpType::SmtSetupIcoTier,
        OpType::SmtSetSetupParameters,
        OpType::SmtSetRuntimeParameters,
        OpType::SmtCreate,
        OpType::SmtContribute,
        OpType::FillConvertRequest,
        OpType::AuthorReward,
        OpType::CurationReward,
        OpType::CommentReward,
        OpType::LiquidityReward,
        OpType::Interest,
        OpType::FillVestingWithdraw,
        OpType::FillOrder,
        OpType::ShutdownWitness,
        OpType::FillTransferFromSavings,
        OpType::Hardfork,
        OpType::CommentPayoutUpdate,
        OpType::ReturnVestingDelegation,
        OpType::CommentBenefactorReward,
        OpType::ProducerReward,
        OpType::ClearNullAccountBalance,
        OpType::ProposalPay,
        OpType::SpsFund,
    ];

    /// The on-wire numeric code (position in the registered order).
    pub fn code(self) -> u16 {
        self as u16
    }

    /// The JSON tag, e.g. `"custom_json"`.
    pub fn name(self) -> &'static str {
        match self {
            OpType::Vote => "vote",
            OpType::Comment => "comment",
            OpType::Transfer => "transfer",
            OpType::TransferToVesting => "transfer_to_vesting",
            OpType::WithdrawVesting => "withdraw_vesting",
            OpType::LimitOrderCreate => "limit_order_create",
            OpType::LimitOrderCancel => "limit_order_cancel",
            OpType::FeedPublish => "feed_publish",
            OpType::Convert => "convert",
            OpType::AccountCreate => "account_create",
            OpType::AccountUpdate => "account_update",
            OpType::WitnessUpdate => "witness_update",
            OpType::AccountWitnessVote => "account_witness_vote",
            OpType::AccountWitnessProxy => "account_witness_proxy",
            OpType::Pow => "pow",
            OpType::Custom => "custom",
            OpType::ReportOverProduction => "report_over_production",
            OpType::DeleteComment => "delete_comment",
            OpType::CustomJson => "custom_json",
            OpType::CommentOptions => "comment_options",
            OpType::SetWithdrawVestingRoute => "set_withdraw_vesting_route",
            OpType::LimitOrderCreate2 => "limit_order_create2",
            OpType::ClaimAccount => "claim_account",
            OpType::CreateClaimedAccount => "create_claimed_account",
            OpType::RequestAccountRecovery => "request_account_recovery",
            OpType::RecoverAccount => "recover_account",
            OpType::ChangeRecoveryAccount => "change_recovery_account",
            OpType::EscrowTransfer => "escrow_transfer",
            OpType::EscrowDispute => "escrow_dispute",
            OpType::EscrowRelease => "escrow_release",
            OpType::Pow2 => "pow2",
            OpType::EscrowApprove => "escrow_approve",
            OpType::TransferToSavings => "transfer_to_savings",
            OpType::TransferFromSavings => "transfer_from_savings",
            OpType::CancelTransferFromSavings => "cancel_transfer_from_savings",
            OpType::CustomBinary => "custom_binary",
            OpType::DeclineVotingRights => "decline_voting_rights",
            OpType::ResetAccount => "reset_account",
            OpType::SetResetAccount => "set_reset_account",
            OpType::ClaimRewardBalance => "claim_reward_balance",
            OpType::DelegateVestingShares => "delegate_vesting_shares",
            OpType::AccountCreateWithDelegation => "account_create_with_delegation",
            OpType::WitnessSetProperties => "witness_set_properties",
            OpType::AccountUpdate2 => "account_update2",
            OpType::CreateProposal => "create_proposal",
            OpType::UpdateProposalVotes => "update_proposal_votes",
            OpType::RemoveProposal => "remove_proposal",
            OpType::ClaimRewardBalance2 => "claim_reward_balance2",
            OpType::Vote2 => "vote2",
            OpType::SmtSetup => "smt_setup",
            OpType::SmtSetupEmissions => "smt_setup_emissions",
            OpType::SmtSetupIcoTier => "smt_setup_ico_tier",
            OpType::SmtSetSetupParameters => "smt_set_setup_parameters",
            OpType::SmtSetRuntimeParameters => "smt_set_runtime_parameters",
            OpType::SmtCreate => "smt_create",
            OpType::SmtContribute => "smt_contribute",
            OpType::FillConvertRequest => "fill_convert_request",
            OpType::AuthorReward => "author_reward",
            OpType::CurationReward => "curation_reward",
            OpType::CommentReward => "comment_reward",
            OpType::LiquidityReward => "liquidity_reward",
            OpType::Interest => "interest",
            OpType::FillVestingWithdraw => "fill_vesting_withdraw",
            OpType::FillOrder => "fill_order",
            OpType::ShutdownWitness => "shutdown_witness",
            OpType::FillTransferFromSavings => "fill_transfer_from_savings",
            OpType::Hardfork => "hardfork",
            OpType::CommentPayoutUpdate => "comment_payout_update",
            OpType::ReturnVestingDelegation => "return_vesting_delegation",
            OpType::CommentBenefactorReward => "comment_benefactor_reward",
            OpType::ProducerReward => "producer_reward",
            OpType::ClearNullAccountBalance => "clear_null_account_balance",
            OpType::ProposalPay => "proposal_pay",
            OpType::SpsFund => "sps_fund",
        }
    }

    /// Looks up a registered kind by its JSON tag.
    pub fn from_name(name: &str) -> Option<OpType> {
        OpType::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// Whether the node generates this operation (it cannot be broadcast).
    pub fn is_virtual(self) -> bool {
        self.code() >= FIRST_VIRTUAL_CODE
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OpType {
    type Err = UnknownOpType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownOpType(s.to_owned()))
    }
}

/// Error for a name absent from the registry.
#[derive(Debug, thiserror::Error)]
#[error("unknown operation type `{0}`")]
pub struct UnknownOpType(pub String);

impl Serialize for OpType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for OpType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_positional() {
        for (idx, op) in OpType::ALL.iter().enumerate() {
            assert_eq!(op.code() as usize, idx, "{op} out of registry order");
        }
    }

    #[test]
    fn reference_codes_are_pinned() {
        assert_eq!(OpType::Vote.code(), 0);
        assert_eq!(OpType::CustomJson.code(), 18);
        assert_eq!(OpType::DelegateVestingShares.code(), 40);
        assert_eq!(OpType::SpsFund.code(), 73);
    }

    #[test]
    fn names_round_trip() {
        for op in OpType::ALL {
            assert_eq!(OpType::from_name(op.name()), Some(op));
        }
        assert_eq!(OpType::from_name("no_such_op"), None);
    }

    #[test]
    fn virtual_range_starts_at_fill_convert_request() {
        assert!(!OpType::SmtContribute.is_virtual());
        assert!(OpType::FillConvertRequest.is_virtual());
        assert!(OpType::SpsFund.is_virtual());
    }

    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&OpType::CustomJson).unwrap();
        assert_eq!(json, "\"custom_json\"");
        let back: OpType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OpType::CustomJson);
    }
}
