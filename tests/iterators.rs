use hdrfixed::Histogram;

#[test]
fn iter_recorded_non_saturated_total_count() {
    let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();

    h.record(1).unwrap();
    h.record(1_000).unwrap();
    h.record(1_000_000).unwrap();

    let expected = vec![1, 1_000, h.highest_equivalent(1_000_000)];
    assert_eq!(
        expected,
        h.iter_recorded()
            .map(|iv| iv.value_iterated_to())
            .collect::<Vec<u64>>()
    );
}

#[test]
fn iter_recorded_saturated_total_count() {
    let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();

    h.record_n(1, u64::max_value()).unwrap();
    h.record_n(1_000, u64::max_value()).unwrap();
    h.record_n(1_000_000, u64::max_value()).unwrap();

    assert_eq!(u64::max_value(), h.len());
    let expected = vec![1, 1_000, h.highest_equivalent(1_000_000)];
    assert_eq!(
        expected,
        h.iter_recorded()
            .map(|iv| iv.value_iterated_to())
            .collect::<Vec<u64>>()
    );
}

#[test]
fn iter_recorded_empty() {
    let h = Histogram::<u64>::new_with_max(30_000_000, 2).unwrap();
    assert_eq!(0, h.iter_recorded().count());
}

#[test]
fn iter_recorded_percentiles_and_counts() {
    let mut h = Histogram::<u64>::new_with_max(10_000, 3).unwrap();
    h.record_n(100, 2).unwrap();
    h.record_n(500, 1).unwrap();
    h.record_n(8_000, 1).unwrap();

    let values = h.iter_recorded().collect::<Vec<_>>();
    assert_eq!(3, values.len());

    assert_eq!(100, values[0].value_iterated_from());
    assert_eq!(100, values[0].value_iterated_to());
    assert_eq!(2, values[0].count_at_value());
    assert_eq!(2, values[0].total_count_to_index());
    assert_eq!(50.0, values[0].percentile());

    assert_eq!(3, values[1].total_count_to_index());
    assert_eq!(75.0, values[1].percentile());

    // 8000 lives in a slot of width 4
    assert_eq!(8_000, values[2].value_iterated_from());
    assert_eq!(8_003, values[2].value_iterated_to());
    assert_eq!(4, values[2].total_count_to_index());
    assert_eq!(100.0, values[2].percentile());
    assert_eq!(h.index_for(8_000), Some(values[2].index()));
}

#[test]
fn iter_recorded_is_ascending() {
    let mut h = Histogram::<u64>::new_with_bounds(1000, 10_000_000, 3).unwrap();
    for &v in &[9_999_999, 1000, 123_456, 5000, 5001, 77_777] {
        h += v;
    }

    let values = h
        .iter_recorded()
        .map(|iv| iv.value_iterated_from())
        .collect::<Vec<_>>();
    let mut sorted = values.clone();
    sorted.sort();
    assert_eq!(sorted, values);

    let indices = h.iter_recorded().map(|iv| iv.index()).collect::<Vec<_>>();
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn iter_recorded_restarts_on_each_call() {
    let mut h = Histogram::<u64>::new_with_max(30_000_000, 2).unwrap();
    h += 2;
    h += 30_000;

    let first = h.iter_recorded().collect::<Vec<_>>();
    let second = h.iter_recorded().collect::<Vec<_>>();
    assert_eq!(first, second);
}

#[test]
fn iter_recorded_clone_resumes_from_same_point() {
    let mut h = Histogram::<u64>::new_with_max(30_000_000, 2).unwrap();
    h += 2;
    h += 300;
    h += 30_000;

    let mut iter = h.iter_recorded();
    assert_eq!(2, iter.next().unwrap().value_iterated_to());

    let rest = iter.clone().map(|iv| iv.value_iterated_to()).collect::<Vec<_>>();
    assert_eq!(vec![301, 30_079], rest);
    assert_eq!(rest, iter.map(|iv| iv.value_iterated_to()).collect::<Vec<_>>());
}

#[test]
fn iter_recorded_is_fused() {
    let mut h = Histogram::<u64>::new_with_max(30_000_000, 2).unwrap();
    h += 2;

    let mut iter = h.iter_recorded();
    assert!(iter.next().is_some());
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn iter_all_visits_every_slot() {
    let mut h = Histogram::<u64>::new_with_max(30_000_000, 2).unwrap();
    h += 2;
    h += 30_000;

    let values = h.iter_all().collect::<Vec<_>>();
    assert_eq!(h.distinct_values(), values.len());
    assert_eq!(2432, values.len());

    for (i, iv) in values.iter().enumerate() {
        assert_eq!(i, iv.index());
        assert_eq!(h.value_for(i), Some(iv.value_iterated_from()));
    }

    let counted: u64 = values.iter().map(|iv| iv.count_at_value()).sum();
    assert_eq!(2, counted);
    assert_eq!(2, values.last().unwrap().total_count_to_index());
    assert_eq!(
        h.value_for(h.last_index()),
        Some(values.last().unwrap().value_iterated_from())
    );
}

#[test]
fn iter_all_empty_reports_full_percentile() {
    let h = Histogram::<u32>::new_with_max(30_000_000, 2).unwrap();

    let values = h.iter_all().collect::<Vec<_>>();
    assert_eq!(2432, values.len());
    assert!(values.iter().all(|iv| iv.percentile() == 100.0));
    assert!(values.iter().all(|iv| iv.count_at_value() == 0));
}

#[test]
fn iter_all_and_recorded_agree() {
    let mut h = Histogram::<u16>::new_with_bounds(1000, 10_000_000, 3).unwrap();
    for v in (1000..2_000_000).step_by(9973) {
        h += v;
    }

    let from_all = h
        .iter_all()
        .filter(|iv| iv.count_at_value() != 0)
        .collect::<Vec<_>>();
    let recorded = h.iter_recorded().collect::<Vec<_>>();
    assert_eq!(from_all, recorded);
}
