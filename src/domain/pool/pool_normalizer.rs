//! Normalization of heterogeneous upstream pool records

use serde_json::{Map, Value};
use tracing::debug;

use crate::shared::errors::PoolError;
use super::{Pool, TokenInfo, DEFAULT_TOKEN_DECIMALS};

// Resolution order per attribute: canonical name first, then aliases.
const ADDRESS: &[&str] = &["address", "pair", "pubkey"];
const NAME: &[&str] = &["name"];
const BIN_STEP: &[&str] = &["binStep", "bin_step"];
const BASE_FEE: &[&str] = &["baseFee", "base_fee", "base_fee_percentage"];
const TVL: &[&str] = &["tvl", "liquidity"];
const VOLUME_24H: &[&str] = &["volume24h", "volume_24h", "trade_volume_24h", "volume"];
const VOLUME_7D: &[&str] = &["volume7d", "volume_7d"];
const FEES_24H: &[&str] = &["fees24h", "fees_24h"];
const APR: &[&str] = &["apr", "farmApr", "farm_apr"];
const APY: &[&str] = &["apy"];
const PRICE: &[&str] = &["price", "current_price"];
const LIQUIDITY: &[&str] = &["liquidity"];
const IS_VERIFIED: &[&str] = &["isVerified", "is_verified"];

/// Token side of a record: the nested object key plus top-level mint aliases
struct TokenRule {
    object: &'static str,
    mint_aliases: &'static [&'static str],
}

const TOKEN_X: TokenRule = TokenRule { object: "tokenX", mint_aliases: &["token_x", "mint_x"] };
const TOKEN_Y: TokenRule = TokenRule { object: "tokenY", mint_aliases: &["token_y", "mint_y"] };

/// Converts raw pool records into canonical [`Pool`] values
pub struct PoolNormalizer;

impl PoolNormalizer {
    /// Normalize a whole API response. Records that fail are dropped.
    pub fn normalize_batch(response: &Value) -> Vec<Pool> {
        Self::normalize_records(Self::extract_records(response))
    }

    /// Normalize a list of records, skipping the ones that fail
    pub fn normalize_records(records: &[Value]) -> Vec<Pool> {
        records
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| match Self::normalize_record(raw) {
                Ok(pool) => Some(pool),
                Err(e) => {
                    debug!("Dropping pool record #{}: {}", i, e);
                    None
                }
            })
            .collect()
    }

    /// Pull the record array out of a raw array, `{pairs: [...]}` or `{data: [...]}`
    pub fn extract_records(response: &Value) -> &[Value] {
        match response {
            Value::Array(records) => records.as_slice(),
            Value::Object(obj) => ["pairs", "data"]
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_array))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Normalize a single record
    pub fn normalize_record(raw: &Value) -> Result<Pool, PoolError> {
        let obj = raw
            .as_object()
            .ok_or_else(|| PoolError::InvalidPoolData("record is not an object".to_string()))?;

        let token_x = Self::resolve_token(obj, &TOKEN_X)?;
        let token_y = Self::resolve_token(obj, &TOKEN_Y)?;

        let name = resolve_string(obj, NAME)
            .unwrap_or_else(|| format!("{}-{}", token_x.symbol, token_y.symbol));

        Ok(Pool {
            address: resolve_string(obj, ADDRESS).unwrap_or_default(),
            name: Some(name),
            token_x,
            token_y,
            bin_step: resolve_measure(obj, BIN_STEP, false)?,
            base_fee: resolve_measure(obj, BASE_FEE, false)?,
            tvl: resolve_measure(obj, TVL, true)?,
            volume_24h: resolve_measure(obj, VOLUME_24H, true)?,
            apr: resolve_measure(obj, APR, true)?,
            yield_score: None,
            volume_7d: resolve_optional(obj, VOLUME_7D),
            fees_24h: resolve_optional(obj, FEES_24H),
            apy: resolve_optional(obj, APY),
            price: resolve_optional(obj, PRICE),
            liquidity: resolve_optional(obj, LIQUIDITY),
            is_verified: IS_VERIFIED
                .iter()
                .find_map(|key| obj.get(*key).and_then(Value::as_bool))
                .unwrap_or(false),
        })
    }

    /// Symbol, mint and decimals of one side. Decimals follow the measure
    /// rule: absent or 0 falls back to the default.
    fn resolve_token(obj: &Map<String, Value>, rule: &TokenRule) -> Result<TokenInfo, PoolError> {
        let nested = match obj.get(rule.object) {
            None | Some(Value::Null) => None,
            Some(Value::Object(token)) => Some(token),
            Some(other) => {
                return Err(PoolError::InvalidPoolData(format!(
                    "{} must be an object, got {}",
                    rule.object, other
                )))
            }
        };

        let symbol = nested
            .and_then(|token| resolve_string(token, &["symbol"]))
            .unwrap_or_else(|| "Unknown".to_string());

        let mint = nested
            .and_then(|token| resolve_string(token, &["mint", "address"]))
            .or_else(|| resolve_string(obj, rule.mint_aliases))
            .unwrap_or_default();

        let decimals = match nested.and_then(|token| token.get("decimals")) {
            None | Some(Value::Null) => DEFAULT_TOKEN_DECIMALS,
            Some(value) => number_of(value)
                .filter(|d| d.fract() == 0.0 && (0.0..=255.0).contains(d))
                .map(|d| d as u8)
                .ok_or_else(|| {
                    PoolError::InvalidPoolData(format!("{}.decimals is invalid: {}", rule.object, value))
                })?,
        };
        let decimals = if decimals == 0 { DEFAULT_TOKEN_DECIMALS } else { decimals };

        Ok(TokenInfo { symbol, mint, decimals })
    }
}

/// Numeric value of a JSON number or numeric string
fn number_of(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn resolve_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First non-zero number among `keys`, else 0. A zero under the canonical
/// name defers to the aliases.
fn resolve_measure(obj: &Map<String, Value>, keys: &[&str], non_negative: bool) -> Result<f64, PoolError> {
    let Some((key, value)) = keys
        .iter()
        .filter_map(|key| obj.get(*key).and_then(number_of).map(|n| (*key, n)))
        .find(|(_, n)| *n != 0.0)
    else {
        return Ok(0.0);
    };

    if non_negative && value < 0.0 {
        return Err(PoolError::InvalidPoolData(format!("{} is negative: {}", key, value)));
    }
    Ok(value)
}

fn resolve_optional(obj: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| obj.get(*key).and_then(number_of))
}
