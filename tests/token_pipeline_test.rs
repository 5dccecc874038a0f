// End-to-end pipeline scenario: fetch a feed through its adapter, then run
// the client-side filter/sort pipeline over the normalized records.

use chrono::Utc;

use omax_server::filtering::tokens::{apply_filters, TokenAge, TokenFilterOptions, TokenSortKey};
use omax_server::filtering::SortOrder;
use omax_server::sources::odin::OdinSource;
use omax_server::sources::TokenSource;
use omax_server::TokenCategory;

#[test]
fn test_age_filter_over_the_odin_feed() {
    let tokens = OdinSource.fetch_tokens().unwrap();
    assert_eq!(tokens.len(), 5);
    let now = Utc::now().timestamp();

    let options = TokenFilterOptions {
        token_age: TokenAge::OverOneDay,
        ..Default::default()
    };
    let visible = apply_filters(&tokens, &options, now);

    // ODINDOG was created 3 days ago and MJOL 6 days ago; the 2-hour-old
    // RUNE and younger tokens drop out.
    let tickers: Vec<&str> = visible.iter().map(|t| t.ticker.as_str()).collect();
    assert!(tickers.contains(&"ODINDOG"));
    assert!(tickers.contains(&"MJOL"));
    assert!(!tickers.contains(&"RUNE"));
    assert_eq!(visible.len(), 2);
}

#[test]
fn test_market_cap_bound_holds_for_every_survivor() {
    let tokens = OdinSource.fetch_tokens().unwrap();
    let now = Utc::now().timestamp();

    let options = TokenFilterOptions {
        min_market_cap: "100000".into(),
        ..Default::default()
    };
    let visible = apply_filters(&tokens, &options, now);
    assert!(!visible.is_empty());
    assert!(visible.iter().all(|t| t.marketcap >= 100_000.0));
}

#[test]
fn test_category_tab_then_sort() {
    let tokens = OdinSource.fetch_tokens().unwrap();
    let now = Utc::now().timestamp();

    let options = TokenFilterOptions {
        category: Some(TokenCategory::Graduated),
        sort_by: TokenSortKey::Volume,
        sort_order: SortOrder::Desc,
        ..Default::default()
    };
    let visible = apply_filters(&tokens, &options, now);
    assert_eq!(visible.len(), 2);
    // ODINDOG has the larger 24h volume of the two graduated tokens.
    assert_eq!(visible[0].ticker, "ODINDOG");
    assert_eq!(visible[1].ticker, "MJOL");
}

#[test]
fn test_search_matches_ticker_case_insensitively() {
    let tokens = OdinSource.fetch_tokens().unwrap();
    let now = Utc::now().timestamp();

    let options = TokenFilterOptions {
        search: "mJoL".into(),
        ..Default::default()
    };
    let visible = apply_filters(&tokens, &options, now);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Mjolnir");
}

#[test]
fn test_filter_form_wire_names() {
    // The dashboard submits the form as camelCase JSON with stringly bounds.
    let options: TokenFilterOptions = serde_json::from_str(
        r#"{
            "minMarketCap": "100",
            "tokenAge": "1d+",
            "hideBundled": true,
            "sortBy": "volume",
            "sortOrder": "asc"
        }"#,
    )
    .unwrap();
    assert_eq!(options.min_market_cap, "100");
    assert_eq!(options.token_age, TokenAge::OverOneDay);
    assert!(options.hide_bundled);
    assert_eq!(options.sort_by, TokenSortKey::Volume);
    assert_eq!(options.sort_order, SortOrder::Asc);
}
