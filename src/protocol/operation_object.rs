//! Account-history rows as returned by `get_account_history` and
//! `get_ops_in_block`.

use serde::{Deserialize, Serialize};

use super::operations::Operation;
use crate::scalar::{UInt16, UInt32, UInt64};
use crate::timestamp::TimePointSec;

/// One operation as recorded in chain history, with its block context.
///
/// The `op` field is the usual `[name, body]` tuple; virtual operations
/// decode like any other registered operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationObject {
    #[serde(rename = "block")]
    pub block_number: UInt32,
    #[serde(rename = "trx_id")]
    pub transaction_id: String,
    #[serde(rename = "trx_in_block")]
    pub transaction_in_block: UInt32,
    pub op: Operation,
    #[serde(rename = "op_in_trx")]
    pub operation_in_transaction: UInt16,
    #[serde(rename = "virtual_op")]
    pub virtual_operation: UInt64,
    pub timestamp: TimePointSec,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::OpType;

    #[test]
    fn history_row_round_trips() {
        let json = r#"{
            "block": 4321,
            "trx_id": "0000000000000000000000000000000000000000",
            "trx_in_block": 2,
            "op": ["vote", {"voter":"a","author":"b","permlink":"c","weight":100}],
            "op_in_trx": 0,
            "virtual_op": 0,
            "timestamp": "2016-08-08T12:24:17"
        }"#;
        let row: OperationObject = serde_json::from_str(json).unwrap();
        assert_eq!(row.block_number.0, 4321);
        assert_eq!(row.op.op_type(), Some(OpType::Vote));

        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["op"][0], "vote");
        assert_eq!(back["timestamp"], "2016-08-08T12:24:17");
    }

    #[test]
    fn virtual_operations_decode_as_raw_bodies() {
        let json = r#"{
            "block": 1,
            "trx_id": "00",
            "trx_in_block": 0,
            "op": ["producer_reward", {"producer":"w","vesting_shares":"0.000001 VESTS"}],
            "op_in_trx": 0,
            "virtual_op": 1,
            "timestamp": "2020-01-01T00:00:00"
        }"#;
        let row: OperationObject = serde_json::from_str(json).unwrap();
        assert_eq!(row.op.op_type(), Some(OpType::ProducerReward));
        assert!(row.op.op_type().unwrap().is_virtual());
    }
}
