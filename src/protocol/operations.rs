//! Typed operation bodies and the operation tagged union.
//!
//! JSON carries an operation as the 2-tuple `[name, body]`. The name is
//! looked up in the [`OpType`] registry; bodies of operations this crate
//! models get typed structs, registered operations without a model (the
//! escrow family, SMT setup, and every virtual operation) are carried as
//! raw JSON under [`OtherOperation`], and names missing from the registry
//! fall back to [`UnknownOperation`] so histories from newer chains still
//! decode.
//!
//! Binary encoding emits `uvarint(code)` followed by the body fields in
//! the reference reflection order. Only typed bodies have a binary form;
//! raw-bodied operations latch [`EncodeError::UnsupportedOperation`].

use std::io;

use serde::de::DeserializeOwned;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use super::authority::Authority;
use super::op_type::OpType;
use crate::asset::Asset;
use crate::crypto::PublicKey;
use crate::encoder::{BinaryEncoder, BinarySerialize, EncodeError};
use crate::scalar::{Int16, UInt16, UInt32, UInt64};
use crate::timestamp::TimePointSec;

/// A quote of one asset in terms of another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub base: Asset,
    pub quote: Asset,
}

impl BinarySerialize for Price {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        self.base.binary_serialize(enc);
        self.quote.binary_serialize(enc);
    }
}

/// Witness-published chain parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainProperties {
    pub account_creation_fee: Asset,
    pub maximum_block_size: UInt32,
    pub sbd_interest_rate: UInt16,
}

impl BinarySerialize for ChainProperties {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        self.account_creation_fee.binary_serialize(enc);
        self.maximum_block_size.binary_serialize(enc);
        self.sbd_interest_rate.binary_serialize(enc);
    }
}

/// Proof-of-work payload of the legacy `pow` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowWork {
    pub worker: String,
    pub input: String,
    pub signature: String,
    pub work: String,
}

impl BinarySerialize for PowWork {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("worker").string(&self.worker);
        enc.field("input").string(&self.input);
        enc.field("signature").string(&self.signature);
        enc.field("work").string(&self.work);
    }
}

/// Casts a vote on a post or comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteOperation {
    pub voter: String,
    pub author: String,
    pub permlink: String,
    /// Voting weight in basis points; negative values downvote.
    pub weight: Int16,
}

impl BinarySerialize for VoteOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("voter").string(&self.voter);
        enc.field("author").string(&self.author);
        enc.field("permlink").string(&self.permlink);
        self.weight.binary_serialize(enc.field("weight"));
    }
}

/// Creates a post (empty `parent_author`) or a reply.
///
/// For a new post the category is carried in `parent_permlink`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentOperation {
    pub parent_author: String,
    pub parent_permlink: String,
    pub author: String,
    pub permlink: String,
    pub title: String,
    pub body: String,
    pub json_metadata: String,
}

impl CommentOperation {
    /// Whether this is a top-level post rather than a reply.
    pub fn is_post(&self) -> bool {
        self.parent_author.is_empty()
    }
}

impl BinarySerialize for CommentOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("parent_author").string(&self.parent_author);
        enc.field("parent_permlink").string(&self.parent_permlink);
        enc.field("author").string(&self.author);
        enc.field("permlink").string(&self.permlink);
        enc.field("title").string(&self.title);
        enc.field("body").string(&self.body);
        enc.field("json_metadata").string(&self.json_metadata);
    }
}

/// Moves liquid funds, optionally carrying a (possibly encrypted) memo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferOperation {
    pub from: String,
    pub to: String,
    pub amount: Asset,
    pub memo: String,
}

impl BinarySerialize for TransferOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("from").string(&self.from);
        enc.field("to").string(&self.to);
        self.amount.binary_serialize(enc.field("amount"));
        enc.field("memo").string(&self.memo);
    }
}

/// Powers STEEM up into vesting shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferToVestingOperation {
    pub from: String,
    pub to: String,
    pub amount: Asset,
}

impl BinarySerialize for TransferToVestingOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("from").string(&self.from);
        enc.field("to").string(&self.to);
        self.amount.binary_serialize(enc.field("amount"));
    }
}

/// Starts powering vesting shares down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawVestingOperation {
    pub account: String,
    pub vesting_shares: Asset,
}

impl BinarySerialize for WithdrawVestingOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("account").string(&self.account);
        self.vesting_shares
            .binary_serialize(enc.field("vesting_shares"));
    }
}

/// Places a limit order on the internal market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitOrderCreateOperation {
    pub owner: String,
    pub orderid: UInt32,
    pub amount_to_sell: Asset,
    pub min_to_receive: Asset,
    pub fill_or_kill: bool,
    pub expiration: TimePointSec,
}

impl BinarySerialize for LimitOrderCreateOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("owner").string(&self.owner);
        self.orderid.binary_serialize(enc.field("orderid"));
        self.amount_to_sell
            .binary_serialize(enc.field("amount_to_sell"));
        self.min_to_receive
            .binary_serialize(enc.field("min_to_receive"));
        enc.field("fill_or_kill").boolean(self.fill_or_kill);
        self.expiration.binary_serialize(enc.field("expiration"));
    }
}

/// Cancels a limit order by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitOrderCancelOperation {
    pub owner: String,
    pub orderid: UInt32,
}

impl BinarySerialize for LimitOrderCancelOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("owner").string(&self.owner);
        self.orderid.binary_serialize(enc.field("orderid"));
    }
}

/// Publishes a witness price feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedPublishOperation {
    pub publisher: String,
    pub exchange_rate: Price,
}

impl BinarySerialize for FeedPublishOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("publisher").string(&self.publisher);
        self.exchange_rate
            .binary_serialize(enc.field("exchange_rate"));
    }
}

/// Converts SBD to STEEM at the feed price after a delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOperation {
    pub owner: String,
    pub requestid: UInt32,
    pub amount: Asset,
}

impl BinarySerialize for ConvertOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("owner").string(&self.owner);
        self.requestid.binary_serialize(enc.field("requestid"));
        self.amount.binary_serialize(enc.field("amount"));
    }
}

/// Creates an account, funded by the creator's fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountCreateOperation {
    pub fee: Asset,
    pub creator: String,
    pub new_account_name: String,
    pub owner: Authority,
    pub active: Authority,
    pub posting: Authority,
    pub memo_key: PublicKey,
    pub json_metadata: String,
}

impl BinarySerialize for AccountCreateOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        self.fee.binary_serialize(enc.field("fee"));
        enc.field("creator").string(&self.creator);
        enc.field("new_account_name").string(&self.new_account_name);
        self.owner.binary_serialize(enc.field("owner"));
        self.active.binary_serialize(enc.field("active"));
        self.posting.binary_serialize(enc.field("posting"));
        self.memo_key.binary_serialize(enc.field("memo_key"));
        enc.field("json_metadata").string(&self.json_metadata);
    }
}

/// Replaces any subset of an account's authorities and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountUpdateOperation {
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Authority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<Authority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posting: Option<Authority>,
    pub memo_key: PublicKey,
    pub json_metadata: String,
}

impl BinarySerialize for AccountUpdateOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("account").string(&self.account);
        enc.field("owner").option(self.owner.as_ref());
        enc.field("active").option(self.active.as_ref());
        enc.field("posting").option(self.posting.as_ref());
        self.memo_key.binary_serialize(enc.field("memo_key"));
        enc.field("json_metadata").string(&self.json_metadata);
    }
}

/// Registers or updates a witness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WitnessUpdateOperation {
    pub owner: String,
    pub url: String,
    pub block_signing_key: PublicKey,
    pub props: ChainProperties,
    pub fee: Asset,
}

impl BinarySerialize for WitnessUpdateOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("owner").string(&self.owner);
        enc.field("url").string(&self.url);
        self.block_signing_key
            .binary_serialize(enc.field("block_signing_key"));
        self.props.binary_serialize(enc.field("props"));
        self.fee.binary_serialize(enc.field("fee"));
    }
}

/// Approves or unapproves a witness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountWitnessVoteOperation {
    pub account: String,
    pub witness: String,
    pub approve: bool,
}

impl BinarySerialize for AccountWitnessVoteOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("account").string(&self.account);
        enc.field("witness").string(&self.witness);
        enc.field("approve").boolean(self.approve);
    }
}

/// Delegates witness voting to a proxy account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountWitnessProxyOperation {
    pub account: String,
    pub proxy: String,
}

impl BinarySerialize for AccountWitnessProxyOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("account").string(&self.account);
        enc.field("proxy").string(&self.proxy);
    }
}

/// Legacy proof-of-work mining claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowOperation {
    pub worker_account: String,
    pub block_id: String,
    pub nonce: UInt64,
    pub work: PowWork,
    pub props: ChainProperties,
}

impl BinarySerialize for PowOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("worker_account").string(&self.worker_account);
        enc.field("block_id").string(&self.block_id);
        self.nonce.binary_serialize(enc.field("nonce"));
        self.work.binary_serialize(enc.field("work"));
        self.props.binary_serialize(enc.field("props"));
    }
}

/// Reports a witness for double-producing a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOverProductionOperation {
    pub reporter: String,
}

impl BinarySerialize for ReportOverProductionOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("reporter").string(&self.reporter);
    }
}

/// Deletes a comment that has no replies or votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteCommentOperation {
    pub author: String,
    pub permlink: String,
}

impl BinarySerialize for DeleteCommentOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("author").string(&self.author);
        enc.field("permlink").string(&self.permlink);
    }
}

/// Application-defined payload routed by `id` (follows, notifications,
/// sidechain traffic, …).
///
/// Both auth sets are `flat_set`s on the wire: serialization emits them
/// lexicographically sorted without touching the caller's vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomJsonOperation {
    pub required_auths: Vec<String>,
    pub required_posting_auths: Vec<String>,
    pub id: String,
    /// The embedded payload as a JSON string, either a bare object or a
    /// `[type, body]` tuple.
    pub json: String,
}

impl CustomJsonOperation {
    /// Decodes the embedded JSON string into a typed payload, accepting
    /// both the bare-object and `[type, body]` tuple forms.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(&self.json)?;
        let body = match value {
            serde_json::Value::Array(mut parts) if parts.len() == 2 => parts.remove(1),
            other => other,
        };
        serde_json::from_value(body)
    }
}

impl BinarySerialize for CustomJsonOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        let mut auths = self.required_auths.clone();
        auths.sort();
        enc.field("required_auths").sequence(&auths);

        let mut posting_auths = self.required_posting_auths.clone();
        posting_auths.sort();
        enc.field("required_posting_auths").sequence(&posting_auths);

        enc.field("id").string(&self.id);
        enc.field("json").string(&self.json);
    }
}

/// The body of a `custom_json` follow plugin payload (`id = "follow"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowPayload {
    pub follower: String,
    pub following: String,
    #[serde(default)]
    pub what: Vec<String>,
}

/// Caps payouts and reward routing for a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentOptionsOperation {
    pub author: String,
    pub permlink: String,
    pub max_accepted_payout: Asset,
    pub percent_steem_dollars: UInt16,
    pub allow_votes: bool,
    pub allow_curation_rewards: bool,
    #[serde(default)]
    pub extensions: Vec<serde_json::Value>,
}

impl BinarySerialize for CommentOptionsOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("author").string(&self.author);
        enc.field("permlink").string(&self.permlink);
        self.max_accepted_payout
            .binary_serialize(enc.field("max_accepted_payout"));
        self.percent_steem_dollars
            .binary_serialize(enc.field("percent_steem_dollars"));
        enc.field("allow_votes").boolean(self.allow_votes);
        enc.field("allow_curation_rewards")
            .boolean(self.allow_curation_rewards);
        if self.extensions.is_empty() {
            enc.field("extensions").uvarint(0);
        } else {
            enc.fail(EncodeError::UnsupportedExtensions("comment_options extensions"));
        }
    }
}

/// Routes part of a power-down to another account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetWithdrawVestingRouteOperation {
    pub from_account: String,
    pub to_account: String,
    pub percent: UInt16,
    pub auto_vest: bool,
}

impl BinarySerialize for SetWithdrawVestingRouteOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("from_account").string(&self.from_account);
        enc.field("to_account").string(&self.to_account);
        self.percent.binary_serialize(enc.field("percent"));
        enc.field("auto_vest").boolean(self.auto_vest);
    }
}

/// Moves funds into the three-day-withdrawal savings balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferToSavingsOperation {
    pub from: String,
    pub to: String,
    pub amount: Asset,
    pub memo: String,
}

impl BinarySerialize for TransferToSavingsOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("from").string(&self.from);
        enc.field("to").string(&self.to);
        self.amount.binary_serialize(enc.field("amount"));
        enc.field("memo").string(&self.memo);
    }
}

/// Requests a withdrawal from savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFromSavingsOperation {
    pub from: String,
    pub request_id: UInt32,
    pub to: String,
    pub amount: Asset,
    pub memo: String,
}

impl BinarySerialize for TransferFromSavingsOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("from").string(&self.from);
        self.request_id.binary_serialize(enc.field("request_id"));
        enc.field("to").string(&self.to);
        self.amount.binary_serialize(enc.field("amount"));
        enc.field("memo").string(&self.memo);
    }
}

/// Cancels a pending savings withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelTransferFromSavingsOperation {
    pub from: String,
    pub request_id: UInt32,
}

impl BinarySerialize for CancelTransferFromSavingsOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("from").string(&self.from);
        self.request_id.binary_serialize(enc.field("request_id"));
    }
}

/// Irreversibly declines the account's right to vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclineVotingRightsOperation {
    pub account: String,
    pub decline: bool,
}

impl BinarySerialize for DeclineVotingRightsOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("account").string(&self.account);
        enc.field("decline").boolean(self.decline);
    }
}

/// Claims pending author/curation rewards into the main balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRewardBalanceOperation {
    pub account: String,
    pub reward_steem: Asset,
    pub reward_sbd: Asset,
    pub reward_vests: Asset,
}

impl BinarySerialize for ClaimRewardBalanceOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("account").string(&self.account);
        self.reward_steem.binary_serialize(enc.field("reward_steem"));
        self.reward_sbd.binary_serialize(enc.field("reward_sbd"));
        self.reward_vests.binary_serialize(enc.field("reward_vests"));
    }
}

/// Delegates vesting shares to another account; a delegation of zero
/// removes the delegation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegateVestingSharesOperation {
    pub delegator: String,
    pub delegatee: String,
    pub vesting_shares: Asset,
}

impl BinarySerialize for DelegateVestingSharesOperation {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.field("delegator").string(&self.delegator);
        enc.field("delegatee").string(&self.delegatee);
        self.vesting_shares
            .binary_serialize(enc.field("vesting_shares"));
    }
}

/// A registered operation this crate carries as raw JSON.
///
/// The body is kept as unparsed JSON text so re-serializing reproduces it
/// byte for byte (field order included).
#[derive(Debug, Clone)]
pub struct OtherOperation {
    pub kind: OpType,
    pub body: Box<RawValue>,
}

impl PartialEq for OtherOperation {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.body.get() == other.body.get()
    }
}

/// An operation whose name is not in the registry (newer chain version).
#[derive(Debug, Clone)]
pub struct UnknownOperation {
    pub name: String,
    pub body: Box<RawValue>,
}

impl PartialEq for UnknownOperation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.body.get() == other.body.get()
    }
}

/// Errors from decoding an operation tuple.
#[derive(Debug, thiserror::Error)]
pub enum OperationDecodeError {
    /// Strict decoding saw a name missing from the registry.
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
    /// The body did not match the operation's field layout.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

macro_rules! operations {
    ($($kind:ident => $body:ident),+ $(,)?) => {
        /// One unit of action within a transaction.
        ///
        /// JSON form is the 2-tuple `[name, body]`; see the module docs
        /// for how unmodeled and unregistered names are carried.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Operation {
            $($kind($body),)+
            /// Registered operation without a typed body.
            Other(OtherOperation),
            /// Name not present in the registry.
            Unknown(UnknownOperation),
        }

        impl Operation {
            /// The registered kind, or `None` for unregistered names.
            pub fn op_type(&self) -> Option<OpType> {
                match self {
                    $(Operation::$kind(_) => Some(OpType::$kind),)+
                    Operation::Other(op) => Some(op.kind),
                    Operation::Unknown(_) => None,
                }
            }

            /// The JSON tag of this operation.
            pub fn name(&self) -> &str {
                match self {
                    $(Operation::$kind(_) => OpType::$kind.name(),)+
                    Operation::Other(op) => op.kind.name(),
                    Operation::Unknown(op) => &op.name,
                }
            }

            fn from_registered(
                kind: OpType,
                body: Box<RawValue>,
            ) -> Result<Self, serde_json::Error> {
                match kind {
                    $(OpType::$kind => Ok(Operation::$kind(serde_json::from_str(body.get())?)),)+
                    other => Ok(Operation::Other(OtherOperation { kind: other, body })),
                }
            }
        }

        impl Serialize for Operation {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(self.name())?;
                match self {
                    $(Operation::$kind(op) => tuple.serialize_element(op)?,)+
                    Operation::Other(op) => tuple.serialize_element(&op.body)?,
                    Operation::Unknown(op) => tuple.serialize_element(&op.body)?,
                }
                tuple.end()
            }
        }

        impl BinarySerialize for Operation {
            fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
                match self {
                    $(Operation::$kind(op) => {
                        enc.field("op_code").uvarint(OpType::$kind.code() as u64);
                        op.binary_serialize(enc);
                    })+
                    Operation::Other(op) => enc.fail(EncodeError::UnsupportedOperation(
                        op.kind.name().to_owned(),
                    )),
                    Operation::Unknown(op) => {
                        enc.fail(EncodeError::UnsupportedOperation(op.name.clone()))
                    }
                }
            }
        }

        $(
            impl From<$body> for Operation {
                fn from(op: $body) -> Self {
                    Operation::$kind(op)
                }
            }
        )+
    };
}

operations! {
    Vote => VoteOperation,
    Comment => CommentOperation,
    Transfer => TransferOperation,
    TransferToVesting => TransferToVestingOperation,
    WithdrawVesting => WithdrawVestingOperation,
    LimitOrderCreate => LimitOrderCreateOperation,
    LimitOrderCancel => LimitOrderCancelOperation,
    FeedPublish => FeedPublishOperation,
    Convert => ConvertOperation,
    AccountCreate => AccountCreateOperation,
    AccountUpdate => AccountUpdateOperation,
    WitnessUpdate => WitnessUpdateOperation,
    AccountWitnessVote => AccountWitnessVoteOperation,
    AccountWitnessProxy => AccountWitnessProxyOperation,
    Pow => PowOperation,
    ReportOverProduction => ReportOverProductionOperation,
    DeleteComment => DeleteCommentOperation,
    CustomJson => CustomJsonOperation,
    CommentOptions => CommentOptionsOperation,
    SetWithdrawVestingRoute => SetWithdrawVestingRouteOperation,
    TransferToSavings => TransferToSavingsOperation,
    TransferFromSavings => TransferFromSavingsOperation,
    CancelTransferFromSavings => CancelTransferFromSavingsOperation,
    DeclineVotingRights => DeclineVotingRightsOperation,
    ClaimRewardBalance => ClaimRewardBalanceOperation,
    DelegateVestingShares => DelegateVestingSharesOperation,
}

impl Operation {
    /// Decodes a `[name, body]` pair, falling back to
    /// [`Operation::Unknown`] for unregistered names.
    pub fn from_parts(name: &str, body: Box<RawValue>) -> Result<Self, OperationDecodeError> {
        match OpType::from_name(name) {
            Some(kind) => Ok(Self::from_registered(kind, body)?),
            None => Ok(Operation::Unknown(UnknownOperation {
                name: name.to_owned(),
                body,
            })),
        }
    }

    /// Like [`from_parts`](Self::from_parts), but unregistered names are
    /// an error instead of an `Unknown` value.
    pub fn from_parts_strict(
        name: &str,
        body: Box<RawValue>,
    ) -> Result<Self, OperationDecodeError> {
        match OpType::from_name(name) {
            Some(kind) => Ok(Self::from_registered(kind, body)?),
            None => Err(OperationDecodeError::UnknownOperation(name.to_owned())),
        }
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (name, body): (String, Box<RawValue>) = Deserialize::deserialize(deserializer)?;
        Operation::from_parts(&name, body).map_err(serde::de::Error::custom)
    }
}
