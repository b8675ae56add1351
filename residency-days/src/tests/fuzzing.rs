use arbitrary::{Arbitrary, Unstructured};

use crate::fuzzing::{run_fuzz_compute, Data, RawEvent};

fn raw(country: u8, departed_to: Option<u8>, day: u16, minute: u16) -> RawEvent {
    RawEvent { country, departed_to, day, minute }
}

#[test]
fn no_fuzz_empty_log() {
    let data = Data {
        events: vec![],
        strict: false,
        from_home: false,
        baseline: 3,
        year_offset: None,
    };

    assert!(!run_fuzz_compute(data));
}

#[test]
fn fuzz_round_trip() {
    let data = Data {
        events: vec![raw(0, Some(2), 10, 600), raw(2, None, 40, 0), raw(0, None, 90, 1439)],
        strict: false,
        from_home: true,
        baseline: 12,
        year_offset: Some(1),
    };

    assert!(run_fuzz_compute(data));
}

#[test]
fn fuzz_duplicates_and_wrapping_values() {
    let data = Data {
        events: vec![
            raw(255, None, u16::MAX, u16::MAX),
            raw(1, Some(255), u16::MAX, 0),
            raw(3, None, 0, 0),
        ],
        strict: true,
        from_home: false,
        baseline: 0,
        year_offset: Some(u8::MAX),
    };

    assert!(run_fuzz_compute(data));
}

#[test]
fn fuzz_arbitrary_bytes() {
    for seed in 0..64u8 {
        let bytes: Vec<u8> = (0..512u32).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
        let Ok(data) = Data::arbitrary(&mut Unstructured::new(&bytes)) else {
            continue;
        };

        run_fuzz_compute(data);
    }
}
