//! The Steem protocol layer: operations, authorities, and transactions.
//!
//! - [`op_type`] - the closed, append-only operation registry
//! - [`operations`] - typed operation bodies and the `[name, body]` JSON
//!   tuple codec
//! - [`authority`] - weighted account/key authorities
//! - [`transaction`] - building, digesting, signing, and verifying
//!   transactions
//! - [`operation_object`] - account-history rows as returned by API nodes

pub mod authority;
pub mod op_type;
pub mod operation_object;
pub mod operations;
pub mod transaction;

pub use authority::Authority;
pub use op_type::OpType;
pub use operation_object::OperationObject;
pub use operations::{
    AccountCreateOperation, AccountUpdateOperation, AccountWitnessProxyOperation,
    AccountWitnessVoteOperation, CancelTransferFromSavingsOperation, ChainProperties,
    ClaimRewardBalanceOperation, CommentOperation, CommentOptionsOperation, ConvertOperation,
    CustomJsonOperation, DeclineVotingRightsOperation, DelegateVestingSharesOperation,
    DeleteCommentOperation, FeedPublishOperation, FollowPayload, LimitOrderCancelOperation,
    LimitOrderCreateOperation, Operation, OtherOperation, PowOperation, PowWork, Price,
    ReportOverProductionOperation, SetWithdrawVestingRouteOperation, TransferFromSavingsOperation,
    TransferOperation, TransferToSavingsOperation, TransferToVestingOperation, UnknownOperation,
    VoteOperation, WithdrawVestingOperation, WitnessUpdateOperation,
};
pub use transaction::{Transaction, TransactionError, ref_block_num, ref_block_prefix};
