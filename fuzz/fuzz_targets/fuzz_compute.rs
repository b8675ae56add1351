#![no_main]
use libfuzzer_sys::{fuzz_target, Corpus};
use residency_days::fuzzing::{run_fuzz_compute, Data};

fuzz_target!(|data: Data| -> Corpus {
    if run_fuzz_compute(data) {
        Corpus::Keep
    } else {
        Corpus::Reject
    }
});
