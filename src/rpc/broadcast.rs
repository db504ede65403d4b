//! Role requirements for broadcast operations.
//!
//! Pure data: which key roles may sign each broadcastable operation, with
//! the weakest sufficient role listed first, plus the operation's
//! parameter names. Mirrors the steem-js broadcast table.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::crypto::brain_key::KeyRole;

/// Signing metadata for one broadcastable operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastOperation {
    /// Roles that may sign, weakest first.
    pub roles: &'static [&'static str],
    /// Operation name as registered.
    pub operation: &'static str,
    /// Parameter names in reflection order.
    pub params: &'static [&'static str],
}

macro_rules! broadcast_op {
    ([$($role:literal),+], $operation:literal, [$($param:literal),*]) => {
        BroadcastOperation {
            roles: &[$($role),+],
            operation: $operation,
            params: &[$($param),*],
        }
    };
}

/// Every broadcastable operation with its role requirements.
pub static BROADCAST_OPERATIONS: &[BroadcastOperation] = &[
    broadcast_op!(["posting", "active", "owner"], "vote", ["voter", "author", "permlink", "weight"]),
    broadcast_op!(
        ["posting", "active", "owner"],
        "comment",
        ["parent_author", "parent_permlink", "author", "permlink", "title", "body", "json_metadata"]
    ),
    broadcast_op!(["active", "owner"], "transfer", ["from", "to", "amount", "memo"]),
    broadcast_op!(["active", "owner"], "transfer_to_vesting", ["from", "to", "amount"]),
    broadcast_op!(["active", "owner"], "withdraw_vesting", ["account", "vesting_shares"]),
    broadcast_op!(
        ["active", "owner"],
        "limit_order_create",
        ["owner", "orderid", "amount_to_sell", "min_to_receive", "fill_or_kill", "expiration"]
    ),
    broadcast_op!(["active", "owner"], "limit_order_cancel", ["owner", "orderid"]),
    broadcast_op!(["active", "owner"], "price", ["base", "quote"]),
    broadcast_op!(["active", "owner"], "feed_publish", ["publisher", "exchange_rate"]),
    broadcast_op!(["active", "owner"], "convert", ["owner", "requestid", "amount"]),
    broadcast_op!(
        ["active", "owner"],
        "account_create",
        ["fee", "creator", "new_account_name", "owner", "active", "posting", "memo_key", "json_metadata"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "account_update",
        ["account", "owner", "active", "posting", "memo_key", "json_metadata"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "witness_update",
        ["owner", "url", "block_signing_key", "props", "fee"]
    ),
    broadcast_op!(["active", "owner"], "account_witness_vote", ["account", "witness", "approve"]),
    broadcast_op!(["active", "owner"], "account_witness_proxy", ["account", "proxy"]),
    broadcast_op!(["active", "owner"], "pow", ["worker", "input", "signature", "work"]),
    broadcast_op!(["active", "owner"], "custom", ["required_auths", "id", "data"]),
    broadcast_op!(["posting", "active", "owner"], "delete_comment", ["author", "permlink"]),
    broadcast_op!(
        ["posting", "active", "owner"],
        "custom_json",
        ["required_auths", "required_posting_auths", "id", "json"]
    ),
    broadcast_op!(
        ["posting", "active", "owner"],
        "comment_options",
        ["author", "permlink", "max_accepted_payout", "percent_steem_dollars", "allow_votes", "allow_curation_rewards", "extensions"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "set_withdraw_vesting_route",
        ["from_account", "to_account", "percent", "auto_vest"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "limit_order_create2",
        ["owner", "orderid", "amount_to_sell", "exchange_rate", "fill_or_kill", "expiration"]
    ),
    broadcast_op!(["active", "owner"], "claim_account", ["creator", "fee", "extensions"]),
    broadcast_op!(
        ["active", "owner"],
        "create_claimed_account",
        ["creator", "new_account_name", "owner", "active", "posting", "memo_key", "json_metadata", "extensions"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "request_account_recovery",
        ["recovery_account", "account_to_recover", "new_owner_authority", "extensions"]
    ),
    broadcast_op!(
        ["owner"],
        "recover_account",
        ["account_to_recover", "new_owner_authority", "recent_owner_authority", "extensions"]
    ),
    broadcast_op!(
        ["owner"],
        "change_recovery_account",
        ["account_to_recover", "new_recovery_account", "extensions"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "escrow_transfer",
        ["from", "to", "agent", "escrow_id", "sbd_amount", "steem_amount", "fee", "ratification_deadline", "escrow_expiration", "json_meta"]
    ),
    broadcast_op!(["active", "owner"], "escrow_dispute", ["from", "to", "agent", "who", "escrow_id"]),
    broadcast_op!(
        ["active", "owner"],
        "escrow_release",
        ["from", "to", "agent", "who", "receiver", "escrow_id", "sbd_amount", "steem_amount"]
    ),
    broadcast_op!(["active", "owner"], "pow2", ["input", "pow_summary"]),
    broadcast_op!(
        ["active", "owner"],
        "escrow_approve",
        ["from", "to", "agent", "who", "escrow_id", "approve"]
    ),
    broadcast_op!(["active", "owner"], "transfer_to_savings", ["from", "to", "amount", "memo"]),
    broadcast_op!(
        ["active", "owner"],
        "transfer_from_savings",
        ["from", "request_id", "to", "amount", "memo"]
    ),
    broadcast_op!(["active", "owner"], "cancel_transfer_from_savings", ["from", "request_id"]),
    broadcast_op!(["posting", "active", "owner"], "custom_binary", ["id", "data"]),
    broadcast_op!(["owner"], "decline_voting_rights", ["account", "decline"]),
    broadcast_op!(
        ["active", "owner"],
        "reset_account",
        ["reset_account", "account_to_reset", "new_owner_authority"]
    ),
    broadcast_op!(
        ["owner", "posting"],
        "set_reset_account",
        ["account", "current_reset_account", "reset_account"]
    ),
    broadcast_op!(
        ["posting", "active", "owner"],
        "claim_reward_balance",
        ["account", "reward_steem", "reward_sbd", "reward_vests"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "delegate_vesting_shares",
        ["delegator", "delegatee", "vesting_shares"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "account_create_with_delegation",
        ["fee", "delegation", "creator", "new_account_name", "owner", "active", "posting", "memo_key", "json_metadata", "extensions"]
    ),
    broadcast_op!(["active", "owner"], "witness_set_properties", ["owner", "props", "extensions"]),
    broadcast_op!(
        ["posting", "active", "owner"],
        "account_update2",
        ["account", "owner", "active", "posting", "memo_key", "json_metadata", "posting_json_metadata", "extensions"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "create_proposal",
        ["creator", "receiver", "start_date", "end_date", "daily_pay", "subject", "permlink", "extensions"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "update_proposal_votes",
        ["voter", "proposal_ids", "approve", "extensions"]
    ),
    broadcast_op!(["active", "owner"], "remove_proposal", ["proposal_owner", "proposal_ids", "extensions"]),
    broadcast_op!(
        ["posting", "active", "owner"],
        "claim_reward_balance2",
        ["account", "reward_tokens", "extensions"]
    ),
    broadcast_op!(
        ["posting", "active", "owner"],
        "vote2",
        ["voter", "author", "permlink", "rshares", "extensions"]
    ),
    broadcast_op!(
        ["active", "owner"],
        "fill_convert_request",
        ["owner", "requestid", "amount_in", "amount_out"]
    ),
    broadcast_op!(["posting", "active", "owner"], "comment_reward", ["author", "permlink", "payout"]),
    broadcast_op!(["active", "owner"], "liquidity_reward", ["owner", "payout"]),
    broadcast_op!(["active", "owner"], "interest", ["owner", "interest"]),
    broadcast_op!(
        ["active", "owner"],
        "fill_vesting_withdraw",
        ["from_account", "to_account", "withdrawn", "deposited"]
    ),
    broadcast_op!(
        ["posting", "active", "owner"],
        "fill_order",
        ["current_owner", "current_orderid", "current_pays", "open_owner", "open_orderid", "open_pays"]
    ),
    broadcast_op!(
        ["posting", "active", "owner"],
        "fill_transfer_from_savings",
        ["from", "to", "amount", "request_id", "memo"]
    ),
];

static BY_OPERATION: LazyLock<HashMap<&'static str, &'static BroadcastOperation>> =
    LazyLock::new(|| {
        BROADCAST_OPERATIONS
            .iter()
            .map(|op| (op.operation, op))
            .collect()
    });

/// Looks up the broadcast metadata for an operation name.
pub fn find_operation(operation: &str) -> Option<&'static BroadcastOperation> {
    BY_OPERATION.get(operation).copied()
}

/// The roles that may sign `operation`, weakest first.
pub fn roles_for(operation: &str) -> Option<&'static [&'static str]> {
    find_operation(operation).map(|op| op.roles)
}

/// The weakest role sufficient to sign `operation`.
pub fn lowest_role(operation: &str) -> Option<KeyRole> {
    roles_for(operation).and_then(|roles| roles.first()?.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_the_expected_size() {
        assert_eq!(BROADCAST_OPERATIONS.len(), 56);
    }

    #[test]
    fn posting_suffices_for_social_operations() {
        assert_eq!(lowest_role("vote"), Some(KeyRole::Posting));
        assert_eq!(lowest_role("custom_json"), Some(KeyRole::Posting));
        assert_eq!(lowest_role("comment"), Some(KeyRole::Posting));
    }

    #[test]
    fn transfers_need_the_active_key() {
        assert_eq!(lowest_role("transfer"), Some(KeyRole::Active));
        assert_eq!(lowest_role("delegate_vesting_shares"), Some(KeyRole::Active));
    }

    #[test]
    fn recovery_needs_the_owner_key() {
        assert_eq!(lowest_role("recover_account"), Some(KeyRole::Owner));
        assert_eq!(lowest_role("decline_voting_rights"), Some(KeyRole::Owner));
    }

    #[test]
    fn unknown_operations_have_no_entry() {
        assert!(roles_for("producer_reward").is_none());
        assert!(lowest_role("no_such_op").is_none());
    }

    #[test]
    fn params_match_the_reflection_order() {
        let op = find_operation("custom_json").unwrap();
        assert_eq!(
            op.params,
            &["required_auths", "required_posting_auths", "id", "json"]
        );
    }
}
