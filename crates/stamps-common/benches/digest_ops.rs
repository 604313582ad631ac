use divan::counter::BytesCount;
use divan::{Bencher, black_box_drop};
use stamps_common::crypto::ContentHash;

fn main() {
    divan::main();
}

#[divan::bench(min_time = 0.250, args = [1024, 1024 * 1024, 16 * 1024 * 1024])]
fn content_hash(bencher: Bencher, len: usize) {
    let data = vec![0x5au8; len];

    bencher
        .counter(BytesCount::new(len))
        .bench_local(|| black_box_drop(ContentHash::of_bytes(divan::black_box(&data)).to_hex()));
}
