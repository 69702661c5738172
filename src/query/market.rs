//! Token and coin market queries.

use serde_json::Value;
use tracing::{debug, info};

use crate::data::{CenticClient, CoinGeckoClient, CoinLookup, JsonSource, RankingCriteria};
use crate::document::{reshape, resolve, splice};
use crate::error::{AppError, HistoryError};
use crate::history::{HistoryPipeline, HistorySeries};
use crate::report::format_series_summary;

/// Series carried by a CoinGecko market chart.
pub const MARKET_CHART_SERIES: [&str; 3] = ["prices", "market_caps", "total_volumes"];

/// Daily price, market cap and volume of a coin over the last `days` (+1) days.
///
/// The coin is looked up by name; an unknown name is a usage error.
pub fn coin_history<S: JsonSource>(
    coins: &dyn CoinLookup,
    coingecko: &CoinGeckoClient<S>,
    pipeline: &HistoryPipeline,
    coin_name: &str,
    currency: &str,
    days: i64,
) -> Result<Value, AppError> {
    pipeline.check_interval(days)?;
    let coin_id = coins
        .resolve_coin(coin_name)?
        .ok_or_else(|| AppError::new(2, format!("Coin '{coin_name}' not found on CoinGecko.")))?;
    debug!(coin_name, coin_id = %coin_id, "resolved coin");

    let mut doc = coingecko.market_chart(&coin_id, currency, days)?;
    for key in MARKET_CHART_SERIES {
        let rows = resolve(&doc, &[key])?
            .as_array()
            .ok_or_else(|| HistoryError::path_not_found(&[key]))?;
        let series = market_chart_to_series(rows)?;
        splice(&mut doc, &[key], Value::Object(series))?;
        let view = reshape(&mut doc, &[key], days, pipeline)?;
        info!(coin_id = %coin_id, "coin history {}", format_series_summary(key, &view));
    }
    Ok(doc)
}

/// `[[epoch_ms, value], ...]` -> `{"<epoch_s>": value, ...}`.
///
/// Sub-second precision is dropped; a row that is not a `[number, value]`
/// pair fails the whole conversion.
pub fn market_chart_to_series(rows: &[Value]) -> Result<HistorySeries, HistoryError> {
    let mut out = HistorySeries::with_capacity(rows.len());
    for row in rows {
        let malformed = || HistoryError::MalformedTimestamp { key: row.to_string() };
        let Some([ts, value]) = row.as_array().map(Vec::as_slice) else {
            return Err(malformed());
        };
        let millis = ts
            .as_f64()
            .filter(|ms| ms.is_finite())
            .ok_or_else(malformed)?;
        let secs = (millis / 1000.0).floor() as i64;
        out.insert(secs.to_string(), value.clone());
    }
    Ok(out)
}

/// Top `count` tokens by `criteria`, each merged with its analytics document.
pub fn top_n_asset_performance<S: JsonSource>(
    centic: &CenticClient<S>,
    count: usize,
    criteria: RankingCriteria,
    interval_days: i64,
) -> Result<Value, AppError> {
    if interval_days < 0 {
        return Err(HistoryError::InvalidInterval { days: interval_days }.into());
    }

    let ranking = centic.token_ranking(criteria, count, interval_days)?;
    let docs = resolve(&ranking, &["docs"])?
        .as_array()
        .ok_or_else(|| HistoryError::path_not_found(&["docs"]))?;

    let mut out = Vec::with_capacity(docs.len());
    for (idx, doc) in docs.iter().enumerate() {
        let mut doc = doc.clone();
        let id = doc
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| HistoryError::PathNotFound {
                path: format!("docs.{idx}.id"),
            })?
            .to_string();

        let analytics = centic.token_analytics(&id)?;
        merge_into(&mut doc, analytics)
            .map_err(|_| AppError::new(3, format!("Analytics for token '{id}' is not a JSON object.")))?;
        out.push(doc);
    }

    info!(count = out.len(), criteria = criteria.as_query(), "top assets");
    Ok(Value::Array(out))
}

/// Shallow merge: keys of `extra` overwrite keys of `target`.
fn merge_into(target: &mut Value, extra: Value) -> Result<(), Value> {
    match (target.as_object_mut(), extra) {
        (Some(target), Value::Object(extra)) => {
            target.extend(extra);
            Ok(())
        }
        (_, extra) => Err(extra),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use serde_json::json;

    use super::*;
    use crate::clock::FixedClock;
    use crate::data::source::stub::StubSource;
    use crate::history::TIMESTAMP_FORMAT;

    const GECKO: &str = "https://gecko.test/api/v3";
    const CENTIC: &str = "https://centic.test/v3";

    fn pipeline() -> HistoryPipeline {
        let now = NaiveDateTime::parse_from_str("2024-01-10 00:00:00", TIMESTAMP_FORMAT).unwrap();
        HistoryPipeline::new(FixedClock::utc(now))
    }

    fn gecko() -> CoinGeckoClient<StubSource> {
        let stub = StubSource::default()
            .with(
                &format!("{GECKO}/coins/list"),
                json!([{"id": "ethereum", "symbol": "eth", "name": "Ethereum"}]),
            )
            .with(
                &format!("{GECKO}/coins/ethereum/market_chart"),
                json!({
                    "prices": [[1704067200000i64, 2200.0], [1704801600000i64, 2300.0], [1704805200123i64, 2310.0]],
                    "market_caps": [[1704801600000i64, 2.7e11]],
                    "total_volumes": [[1704801600000i64, 1.1e10]],
                }),
            );
        CoinGeckoClient::new(stub, GECKO)
    }

    #[test]
    fn chart_rows_become_epoch_seconds() {
        let rows = vec![json!([1704067200000i64, 1.5]), json!([1704067200999.0, 2.5])];
        let series = market_chart_to_series(&rows).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series["1704067200"], json!(2.5));
    }

    #[test]
    fn malformed_chart_row_fails() {
        let rows = vec![json!([1704067200000i64, 1.5]), json!(["soon", 2.0])];
        assert!(matches!(
            market_chart_to_series(&rows),
            Err(HistoryError::MalformedTimestamp { .. })
        ));
        assert!(market_chart_to_series(&[json!([1])]).is_err());
    }

    #[test]
    fn coin_history_reshapes_every_series() {
        let gecko = gecko();

        let doc = coin_history(&gecko, &gecko, &pipeline(), "ethereum", "usd", 6).unwrap();

        assert_eq!(doc["prices"], json!({"2024-01-09": 2310.0}));
        assert_eq!(doc["market_caps"], json!({"2024-01-09": 2.7e11}));
        assert_eq!(doc["total_volumes"], json!({"2024-01-09": 1.1e10}));
    }

    #[test]
    fn unknown_coin_is_usage_error() {
        let gecko = gecko();
        let err = coin_history(&gecko, &gecko, &pipeline(), "notacoin", "usd", 6).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn top_assets_merge_analytics() {
        let stub = StubSource::default()
            .with(
                &format!("{CENTIC}/ranking/tokens"),
                json!({"docs": [
                    {"id": "0x1_0xaaa", "name": "Alpha", "price": 1.0},
                    {"id": "0x1_0xbbb", "name": "Beta"},
                ]}),
            )
            .with(
                &format!("{CENTIC}/common/analytics"),
                json!({"price": 1.25, "asset": {"1704801600": 10}}),
            );
        let centic = CenticClient::new(stub, CENTIC);

        let out = top_n_asset_performance(&centic, 2, RankingCriteria::MarketCap, 7).unwrap();

        let docs = out.as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["name"], json!("Alpha"));
        assert_eq!(docs[0]["price"], json!(1.25));
        assert_eq!(docs[1]["asset"], json!({"1704801600": 10}));

        let analytics_calls = centic.source().requested(&format!("{CENTIC}/common/analytics"));
        assert_eq!(analytics_calls.len(), 2);
        assert!(analytics_calls[1].contains(&("id".to_string(), "0x1_0xbbb".to_string())));
    }

    #[test]
    fn top_assets_reject_docs_without_id() {
        let stub = StubSource::default().with(
            &format!("{CENTIC}/ranking/tokens"),
            json!({"docs": [{"name": "Anon"}]}),
        );
        let centic = CenticClient::new(stub, CENTIC);

        let err = top_n_asset_performance(&centic, 1, RankingCriteria::TokenHealth, 7).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("docs.0.id"));
    }

    #[test]
    fn merge_rejects_non_objects() {
        let mut target = json!({"a": 1});
        assert!(merge_into(&mut target, json!([1])).is_err());
        merge_into(&mut target, json!({"a": 2, "b": 3})).unwrap();
        assert_eq!(target, json!({"a": 2, "b": 3}));
    }
}
