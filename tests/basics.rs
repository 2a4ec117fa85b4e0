use oppo_filter::{FilterError, OppoFilter, Outcome, SizeTrackingFilter};

const TWENTY_NINE_ID: &[u8] = &[27, 28, 29];
const THIRTY_ID: &[u8] = &[27, 28, 30];
const THIRTY_THREE_ID: &[u8] = &[27, 28, 33];
const SHORTER_ID: &[u8] = &[27, 28];

const FRESH: Outcome = Outcome {
    contains: false,
    collision: false,
};
const SEEN: Outcome = Outcome {
    contains: true,
    collision: false,
};
const COLLIDED: Outcome = Outcome {
    contains: false,
    collision: true,
};

fn check(f: &SizeTrackingFilter, id: &[u8], expected: Outcome, entries: u64, bytes: u64) {
    assert_eq!(f.test_and_insert(id), expected, "id {:?}", id);
    assert_eq!(f.count_entries(), entries, "entries after {:?}", id);
    assert_eq!(f.bytes_used(), bytes, "bytes after {:?}", id);
}

// {27, 28, 30} and {27, 28, 33} share a slot under the default hash; {27, 28, 29} has the other one
#[test]
fn the_basics() {
    let f = SizeTrackingFilter::new(2).unwrap();
    check(&f, TWENTY_NINE_ID, FRESH, 1, 3);
    check(&f, TWENTY_NINE_ID, SEEN, 1, 3);
    check(&f, THIRTY_ID, FRESH, 2, 6);
    check(&f, TWENTY_NINE_ID, SEEN, 2, 6);
    check(&f, THIRTY_ID, SEEN, 2, 6);

    check(&f, THIRTY_THREE_ID, COLLIDED, 2, 6);
    check(&f, THIRTY_THREE_ID, SEEN, 2, 6);
    check(&f, THIRTY_ID, COLLIDED, 2, 6);
    check(&f, THIRTY_ID, SEEN, 2, 6);
    check(&f, THIRTY_THREE_ID, COLLIDED, 2, 6);

    // A 2-byte id displacing a 3-byte one
    check(&f, SHORTER_ID, COLLIDED, 2, 5);
}

#[test]
fn plain_filter_matches_tracking_filter() {
    let plain = OppoFilter::new(2).unwrap();
    let tracking = SizeTrackingFilter::new(2).unwrap();
    let ids = [
        TWENTY_NINE_ID,
        THIRTY_ID,
        THIRTY_THREE_ID,
        THIRTY_ID,
        THIRTY_ID,
        SHORTER_ID,
        TWENTY_NINE_ID,
    ];
    for id in ids {
        assert_eq!(plain.test_and_insert(id), tracking.test_and_insert(id));
    }
}

#[test]
fn size_rounding() {
    assert_eq!(OppoFilter::new(3).unwrap().size(), 4);
    assert_eq!(OppoFilter::new(4).unwrap().size(), 4);
    assert_eq!(OppoFilter::new(129).unwrap().size(), 256);
}

#[test]
fn size_bounds() {
    assert_eq!(OppoFilter::new(0).unwrap_err(), FilterError::SizeTooSmall);
    assert_eq!(OppoFilter::new(-7).unwrap_err(), FilterError::SizeTooSmall);
    assert_eq!(
        OppoFilter::new((1 << 30) + 1).unwrap_err(),
        FilterError::SizeTooLarge
    );
}

// For an identifier tested once on a fresh filter, the answer is always "not seen, no collision"
#[test]
fn no_false_positives_on_first_sighting() {
    for i in 0u32..1_000 {
        let f = OppoFilter::new(64).unwrap();
        assert!(f.test_and_insert(&i.to_le_bytes()).is_fresh());
    }
}

#[test]
fn immediate_repeat_is_contained() {
    let f = OppoFilter::new(1024).unwrap();
    for i in 0u32..10_000 {
        let id = i.to_be_bytes();
        f.test_and_insert(&id);
        assert!(f.contains_and_insert(&id));
    }
}

// With more slots than ids, a collision-free answer is the complete truth
#[test]
fn contains_is_never_wrong() {
    use std::collections::HashSet;

    let f = OppoFilter::new(256).unwrap();
    let mut inserted: HashSet<Vec<u8>> = HashSet::new();
    for i in 0u32..2_000 {
        let id = (i % 300).to_le_bytes().to_vec();
        let outcome = f.test_and_insert(&id);
        if outcome.contains {
            assert!(inserted.contains(&id));
        }
        inserted.insert(id);
    }
}
