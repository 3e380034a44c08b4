use basic_bloom_rs::{BasicFilter, Filter, FilterConfigBuilder, HashKind};

fn build_filter(double_hashing: bool, partitioned: bool, kind: HashKind) -> BasicFilter {
    let config = FilterConfigBuilder::default()
        .capacity(1000)
        .false_positive_rate(0.01)
        .seed(0)
        .double_hashing(double_hashing)
        .partitioned(partitioned)
        .hash_kind(kind)
        .build()
        .expect("failed to build config");
    BasicFilter::new(config).expect("failed to build filter")
}

fn inserted_keys() -> Vec<Vec<u8>> {
    (0..1000).map(|i| format!("item_{i:04}").into_bytes()).collect()
}

fn probe_keys() -> Vec<Vec<u8>> {
    // Disjoint from the inserted set by prefix
    (0..10_000)
        .map(|i| format!("probe_{i:05}").into_bytes())
        .collect()
}

fn measured_false_positive_rate(filter: &mut BasicFilter) -> f64 {
    for key in inserted_keys() {
        filter.add(&key).unwrap();
    }
    for key in inserted_keys() {
        assert!(filter.lookup(&key).unwrap(), "false negative before remove");
    }
    let probes = probe_keys();
    let hits = probes
        .iter()
        .filter(|key| filter.lookup(key.as_slice()).unwrap())
        .count();
    hits as f64 / probes.len() as f64
}

#[test]
fn test_rate_near_target_with_double_hashing() {
    let mut filter = build_filter(true, false, HashKind::H3);
    let rate = measured_false_positive_rate(&mut filter);
    assert!(rate < 0.03, "measured rate {rate} too far above 1% target");
}

#[test]
fn test_rate_near_target_with_independent_hashing() {
    let mut filter = build_filter(false, false, HashKind::H3);
    let rate = measured_false_positive_rate(&mut filter);
    assert!(rate < 0.03, "measured rate {rate} too far above 1% target");
}

#[test]
fn test_rate_near_target_with_mixing_hash() {
    let mut filter = build_filter(true, false, HashKind::Mixing64);
    let rate = measured_false_positive_rate(&mut filter);
    assert!(rate < 0.03, "measured rate {rate} too far above 1% target");
}

#[test]
fn test_partitioned_rate_stays_bounded() {
    // Partitioned filters carry slightly more ones at the same load, so the
    // tolerance is a bit looser
    let mut filter = build_filter(true, true, HashKind::H3);
    let rate = measured_false_positive_rate(&mut filter);
    assert!(rate < 0.05, "measured rate {rate} out of bounds");
}

#[test]
fn test_no_false_negatives_across_modes() {
    for double_hashing in [true, false] {
        for partitioned in [true, false] {
            for kind in [HashKind::H3, HashKind::Mixing64] {
                let mut filter = build_filter(double_hashing, partitioned, kind);
                for key in inserted_keys() {
                    filter.add(&key).unwrap();
                }
                for key in inserted_keys() {
                    assert!(
                        filter.lookup(&key).unwrap(),
                        "false negative: double={double_hashing} part={partitioned} kind={kind:?}"
                    );
                }
            }
        }
    }
}
