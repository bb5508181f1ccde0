use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use tally_core::{DayClock, Event, Resampler, Window, LABEL_FORMAT};

const FEB_01: i64 = 1_769_904_000; // 2026-02-01T00:00:00Z
const SPAN: i64 = 25 * 86_400;

fn arb_ts() -> impl Strategy<Value = DateTime<Utc>> {
    (FEB_01..FEB_01 + SPAN).prop_map(|s| Utc.timestamp_opt(s, 0).unwrap())
}

fn arb_balance() -> impl Strategy<Value = f64> {
    (-1_000_000i64..1_000_000i64).prop_map(|c| c as f64 / 100.0)
}

fn arb_event() -> impl Strategy<Value = Event> {
    (arb_ts(), arb_balance()).prop_map(|(ts, b)| Event::new(ts, b))
}

/// Events with pairwise distinct timestamps, in arbitrary order.
fn arb_distinct_events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::btree_map(FEB_01..FEB_01 + SPAN, arb_balance(), 0..60)
        .prop_map(|m| {
            m.into_iter()
                .map(|(s, b)| Event::new(Utc.timestamp_opt(s, 0).unwrap(), b))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

fn arb_window() -> impl Strategy<Value = Window> {
    (0u32..25, 0u32..20).prop_map(|(offset, len)| {
        let start = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap() + chrono::Days::new(offset as u64);
        let end = start + chrono::Days::new(len as u64);
        Window::new(start, end).unwrap()
    })
}

fn arb_zone() -> impl Strategy<Value = DayClock> {
    prop::sample::select(vec!["UTC", "America/Chicago", "Asia/Kolkata", "Pacific/Auckland"])
        .prop_map(|name| DayClock::from_name(name).unwrap())
}

proptest! {
    #[test]
    fn length_matches_window(
        events in prop::collection::vec(arb_event(), 0..80),
        window in arb_window(),
        clock in arb_zone(),
    ) {
        let s = Resampler::new(clock).resample(&events, &window);
        prop_assert_eq!(s.labels.len(), s.values.len());
        prop_assert_eq!(s.values.len(), window.len());
        prop_assert_eq!(
            s.labels.first().cloned(),
            Some(window.start().format(LABEL_FORMAT).to_string())
        );
        prop_assert_eq!(
            s.labels.last().cloned(),
            Some(window.end().format(LABEL_FORMAT).to_string())
        );
    }

    #[test]
    fn days_without_events_repeat_previous_value(
        events in prop::collection::vec(arb_event(), 0..80),
        window in arb_window(),
        clock in arb_zone(),
    ) {
        let s = Resampler::new(clock).resample(&events, &window);
        let event_days: BTreeSet<String> = events
            .iter()
            .map(|e| clock.day_of(e.timestamp).format(LABEL_FORMAT).to_string())
            .collect();
        for i in 1..s.len() {
            if !event_days.contains(&s.labels[i]) {
                prop_assert_eq!(s.values[i], s.values[i - 1]);
            }
        }
    }

    #[test]
    fn exact_duplicates_change_nothing(
        events in arb_distinct_events(),
        pick in any::<prop::sample::Index>(),
        window in arb_window(),
    ) {
        prop_assume!(!events.is_empty());
        let r = Resampler::default();
        let mut doubled = events.clone();
        doubled.push(events[pick.index(events.len())]);

        prop_assert_eq!(r.resample(&events, &window), r.resample(&doubled, &window));
        prop_assert_eq!(r.replay(&events), r.replay(&doubled));
    }

    #[test]
    fn input_order_is_irrelevant(
        events in arb_distinct_events(),
        window in arb_window(),
        clock in arb_zone(),
    ) {
        let r = Resampler::new(clock);
        let mut sorted = events.clone();
        sorted.sort_by_key(|e| e.timestamp);

        prop_assert_eq!(r.resample(&events, &window), r.resample(&sorted, &window));
        prop_assert_eq!(r.replay(&events), r.replay(&sorted));
    }

    #[test]
    fn replay_lists_each_event_day_once(
        events in prop::collection::vec(arb_event(), 0..80),
        clock in arb_zone(),
    ) {
        let s = Resampler::new(clock).replay(&events);
        let distinct: BTreeSet<NaiveDate> =
            events.iter().map(|e| clock.day_of(e.timestamp)).collect();

        prop_assert_eq!(s.len(), distinct.len());
        // ISO labels sort lexicographically in day order
        prop_assert!(s.labels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn spanning_window_agrees_with_replay_on_event_days(
        events in arb_distinct_events(),
        clock in arb_zone(),
    ) {
        let r = Resampler::new(clock);
        let replay = r.replay(&events);
        match Window::spanning(&events, &clock) {
            None => prop_assert!(replay.is_empty()),
            Some(window) => {
                let dense = r.resample(&events, &window);
                for (label, value) in replay.points() {
                    let i = dense.labels.iter().position(|l| l == label).unwrap();
                    prop_assert_eq!(dense.values[i], value);
                }
            }
        }
    }
}
