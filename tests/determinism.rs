//! Checksums are repeatable and independent of threads, entry order and
//! the parallel threshold

use std::sync::Arc;
use std::thread;

use sparse_crc32::{compute_sparse_crc32, compute_sparse_crc32_with, ChecksumConfig, SparseFile};

fn scattered_file() -> SparseFile {
    let size = 1u64 << 36;
    let stride = size / 512;
    let mut file = SparseFile::new(size);
    // One entry per stride of a 64 GiB logical buffer, jittered, all distinct.
    let mut state = 0x9E37_79B9u64;
    for i in 0..512u64 {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        file.push(i * stride + state % stride, (i as u8) | 1);
    }
    file
}

#[test]
fn repeated_runs_agree() {
    let file = scattered_file();
    let first = compute_sparse_crc32(&file).unwrap();
    for _ in 0..3 {
        assert_eq!(compute_sparse_crc32(&file).unwrap(), first);
    }
}

#[test]
fn concurrent_callers_share_one_file() {
    let file = Arc::new(scattered_file());
    let expected = compute_sparse_crc32(&file).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let file = Arc::clone(&file);
            thread::spawn(move || compute_sparse_crc32(&file).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("worker panicked"), expected);
    }
    assert_eq!(*file, scattered_file(), "input must not be modified");
}

#[test]
fn entry_order_does_not_matter() {
    let file = scattered_file();
    let mut reversed = file.clone();
    reversed.entries.reverse();
    assert_eq!(
        compute_sparse_crc32(&file).unwrap(),
        compute_sparse_crc32(&reversed).unwrap()
    );
}

#[test]
fn parallel_threshold_is_transparent() {
    let file = scattered_file();
    let eager = ChecksumConfig::default().with_parallel_threshold(1);
    let sequential = ChecksumConfig::default().with_parallel_threshold(usize::MAX);
    assert_eq!(
        compute_sparse_crc32_with(&file, &eager).unwrap(),
        compute_sparse_crc32_with(&file, &sequential).unwrap()
    );
}
