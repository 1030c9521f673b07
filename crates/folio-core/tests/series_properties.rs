//! Property tests for series construction invariants.

use folio_core::prelude::*;
use proptest::prelude::*;

fn base() -> Date {
    Date::from_ymd(2020, 1, 1).unwrap()
}

proptest! {
    #[test]
    fn positive_prices_on_increasing_dates_always_build(
        gaps in prop::collection::vec(1i64..5, 1..60),
        prices in prop::collection::vec(0.01f64..1e6, 60),
    ) {
        let mut date = base();
        let mut points = Vec::with_capacity(gaps.len());
        for (gap, price) in gaps.iter().zip(prices.iter()) {
            date = date.add_days(*gap);
            points.push((date, *price));
        }

        let series = PriceSeries::new(points.clone()).unwrap();
        prop_assert_eq!(series.len(), points.len());
        prop_assert!(series.dates().windows(2).all(|w| w[0] < w[1]));
        for (d, p) in points {
            prop_assert_eq!(series.price_on(d), Some(p));
        }
    }

    #[test]
    fn any_non_positive_price_is_rejected(
        len in 2usize..30,
        bad_index in 0usize..30,
        bad_price in -1e6f64..=0.0,
    ) {
        let bad_index = bad_index % len;
        let points: Vec<(Date, f64)> = (0..len)
            .map(|i| {
                let price = if i == bad_index { bad_price } else { 10.0 };
                (base().add_days(i as i64), price)
            })
            .collect();

        let err = PriceSeries::new(points).unwrap_err();
        prop_assert_eq!(err, CoreError::InvalidPrice { index: bad_index, price: bad_price });
    }

    #[test]
    fn tickers_normalize_case(raw in "[a-zA-Z]{1,6}") {
        let ticker = Ticker::new(&raw).unwrap();
        prop_assert_eq!(ticker.as_str(), raw.to_uppercase());
    }
}
