//! Catalog of Steem API methods.
//!
//! Pure data: which API each method lives under, its positional parameter
//! names, and whether the node expects the params as a single object. The
//! table mirrors the condenser-era catalog that appnode deployments still
//! serve.

/// One API method definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiMethod {
    /// API namespace, e.g. `database_api`.
    pub api: &'static str,
    /// Method name within the namespace.
    pub method: &'static str,
    /// Positional parameter names; empty for nullary methods.
    pub params: &'static [&'static str],
    /// Whether params are passed as one object instead of positionally.
    pub is_object: bool,
}

impl ApiMethod {
    /// The dotted form used by JSON-RPC 2.0 nodes, e.g.
    /// `database_api.get_block`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.api, self.method)
    }
}

macro_rules! method {
    ($api:literal, $method:literal) => {
        ApiMethod { api: $api, method: $method, params: &[], is_object: false }
    };
    ($api:literal, $method:literal, [$($param:literal),+]) => {
        ApiMethod { api: $api, method: $method, params: &[$($param),+], is_object: false }
    };
    ($api:literal, $method:literal, [$($param:literal),+], object) => {
        ApiMethod { api: $api, method: $method, params: &[$($param),+], is_object: true }
    };
}

/// Every known API method.
pub static API_METHODS: &[ApiMethod] = &[
    method!("database_api", "set_subscribe_callback", ["callback", "clearFilter"]),
    method!("database_api", "set_pending_transaction_callback", ["cb"]),
    method!("database_api", "set_block_applied_callback", ["cb"]),
    method!("database_api", "cancel_all_subscriptions"),
    method!("database_api", "get_trending_tags", ["afterTag", "limit"]),
    method!("database_api", "get_tags_used_by_author", ["author"]),
    method!("database_api", "get_post_discussions_by_payout", ["query"]),
    method!("database_api", "get_comment_discussions_by_payout", ["query"]),
    method!("database_api", "get_discussions_by_trending", ["query"]),
    method!("database_api", "get_discussions_by_trending30", ["query"]),
    method!("database_api", "get_discussions_by_created", ["query"]),
    method!("database_api", "get_discussions_by_active", ["query"]),
    method!("database_api", "get_discussions_by_cashout", ["query"]),
    method!("database_api", "get_discussions_by_payout", ["query"]),
    method!("database_api", "get_discussions_by_votes", ["query"]),
    method!("database_api", "get_discussions_by_children", ["query"]),
    method!("database_api", "get_discussions_by_hot", ["query"]),
    method!("database_api", "get_discussions_by_feed", ["query"]),
    method!("database_api", "get_discussions_by_blog", ["query"]),
    method!("database_api", "get_discussions_by_comments", ["query"]),
    method!("database_api", "get_discussions_by_promoted", ["query"]),
    method!("database_api", "get_block_header", ["blockNum"]),
    method!("database_api", "get_block", ["blockNum"]),
    method!("database_api", "get_ops_in_block", ["blockNum", "onlyVirtual"]),
    method!("database_api", "get_state", ["path"]),
    method!("database_api", "get_trending_categories", ["after", "limit"]),
    method!("database_api", "get_best_categories", ["after", "limit"]),
    method!("database_api", "get_active_categories", ["after", "limit"]),
    method!("database_api", "get_recent_categories", ["after", "limit"]),
    method!("database_api", "get_config"),
    method!("database_api", "get_dynamic_global_properties"),
    method!("database_api", "get_chain_properties"),
    method!("database_api", "get_feed_history"),
    method!("database_api", "get_current_median_history_price"),
    method!("database_api", "get_witness_schedule"),
    method!("database_api", "get_hardfork_version"),
    method!("database_api", "get_next_scheduled_hardfork"),
    method!("account_by_key_api", "get_key_references", ["key"]),
    method!("database_api", "get_accounts", ["names"]),
    method!("database_api", "get_account_references", ["accountId"]),
    method!("database_api", "lookup_account_names", ["accountNames"]),
    method!("database_api", "lookup_accounts", ["lowerBoundName", "limit"]),
    method!("database_api", "get_account_count"),
    method!("database_api", "get_conversion_requests", ["accountName"]),
    method!("database_api", "get_account_history", ["account", "from", "limit"]),
    method!("database_api", "get_owner_history", ["account"]),
    method!("database_api", "get_recovery_request", ["account"]),
    method!("database_api", "get_escrow", ["from", "escrowId"]),
    method!("database_api", "get_withdraw_routes", ["account", "withdrawRouteType"]),
    method!("database_api", "get_account_bandwidth", ["account", "bandwidthType"]),
    method!("database_api", "get_savings_withdraw_from", ["account"]),
    method!("database_api", "get_savings_withdraw_to", ["account"]),
    method!("database_api", "get_order_book", ["limit"]),
    method!("database_api", "get_open_orders", ["owner"]),
    method!("database_api", "get_liquidity_queue", ["startAccount", "limit"]),
    method!("database_api", "get_transaction_hex", ["trx"]),
    method!("database_api", "get_transaction", ["trxId"]),
    method!("database_api", "get_required_signatures", ["trx", "availableKeys"]),
    method!("database_api", "get_potential_signatures", ["trx"]),
    method!("database_api", "verify_authority", ["trx"]),
    method!("database_api", "verify_account_authority", ["nameOrId", "signers"]),
    method!("database_api", "get_active_votes", ["author", "permlink"]),
    method!("database_api", "get_account_votes", ["voter"]),
    method!("database_api", "get_content", ["author", "permlink"]),
    method!("database_api", "get_content_replies", ["author", "permlink"]),
    method!(
        "database_api",
        "get_discussions_by_author_before_date",
        ["author", "startPermlink", "beforeDate", "limit"]
    ),
    method!(
        "database_api",
        "get_replies_by_last_update",
        ["startAuthor", "startPermlink", "limit"]
    ),
    method!("database_api", "get_witnesses", ["witnessIds"]),
    method!("database_api", "get_witness_by_account", ["accountName"]),
    method!("database_api", "get_witnesses_by_vote", ["from", "limit"]),
    method!("database_api", "lookup_witness_accounts", ["lowerBoundName", "limit"]),
    method!("database_api", "get_witness_count"),
    method!("database_api", "get_active_witnesses"),
    method!("database_api", "get_miner_queue"),
    method!("database_api", "get_reward_fund", ["name"]),
    method!("database_api", "get_vesting_delegations", ["account", "from", "limit"]),
    method!("login_api", "login", ["username", "password"]),
    method!("login_api", "get_api_by_name", ["database_api"]),
    method!("login_api", "get_version"),
    method!(
        "follow_api",
        "get_followers",
        ["following", "startFollower", "followType", "limit"]
    ),
    method!(
        "follow_api",
        "get_following",
        ["follower", "startFollowing", "followType", "limit"]
    ),
    method!("follow_api", "get_follow_count", ["account"]),
    method!("follow_api", "get_feed_entries", ["account", "entryId", "limit"]),
    method!("follow_api", "get_feed", ["account", "entryId", "limit"]),
    method!("follow_api", "get_blog_entries", ["account", "entryId", "limit"]),
    method!("follow_api", "get_blog", ["account", "entryId", "limit"]),
    method!("follow_api", "get_account_reputations", ["lowerBoundName", "limit"]),
    method!("follow_api", "get_reblogged_by", ["author", "permlink"]),
    method!("follow_api", "get_blog_authors", ["blogAccount"]),
    method!("network_broadcast_api", "broadcast_transaction", ["trx"]),
    method!(
        "network_broadcast_api",
        "broadcast_transaction_with_callback",
        ["confirmationCallback", "trx"]
    ),
    method!("network_broadcast_api", "broadcast_transaction_synchronous", ["trx"]),
    method!("network_broadcast_api", "broadcast_block", ["b"]),
    method!("network_broadcast_api", "set_max_block_age", ["maxBlockAge"]),
    method!("market_history_api", "get_ticker"),
    method!("market_history_api", "get_volume"),
    method!("market_history_api", "get_order_book", ["limit"]),
    method!("market_history_api", "get_trade_history", ["start", "end", "limit"]),
    method!("market_history_api", "get_recent_trades", ["limit"]),
    method!("market_history_api", "get_market_history", ["bucket_seconds", "start", "end"]),
    method!("market_history_api", "get_market_history_buckets"),
    method!("condenser_api", "find_proposals", ["id_set"]),
    method!(
        "condenser_api",
        "list_proposals",
        ["start", "limit", "order_by", "order_direction", "status"]
    ),
    method!(
        "condenser_api",
        "list_proposal_votes",
        ["start", "limit", "order_by", "order_direction", "status"]
    ),
    method!("condenser_api", "get_nai_pool"),
    method!("rc_api", "find_rc_accounts", ["accounts"], object),
    method!("condenser_api", "get_expiring_vesting_delegations", ["account", "start", "limit"]),
    method!(
        "database_api",
        "find_change_recovery_account_requests",
        ["account"],
        object
    ),
];

/// Looks up a method by API namespace and name.
///
/// Method names repeat across namespaces (`get_order_book` exists in both
/// `database_api` and `market_history_api`), so both parts are required.
pub fn find_method(api: &str, method: &str) -> Option<&'static ApiMethod> {
    API_METHODS
        .iter()
        .find(|entry| entry.api == api && entry.method == method)
}
