//! CONTEXT: Property-based tests for progmem accounting and chunked reads
//! OWNERS: @runtime
//! NOTE: Tests only; banks are in-memory and never change during a case.
//!
//! TEST_SCOPE:
//!   - arena == used + free for any page sequence
//!   - largest free block bounded by free bytes
//!   - uniform banks: all programmed / erased runs closed by a programmed page
//!   - any split of reads concatenates to the unbounded read
//!
//! TEST_SCENARIOS:
//!   - totals_balance(): mixed sizes and states
//!   - all_programmed_has_no_free_space(): uniform, every page used
//!   - erased_prefix_closed_by_programmed_page(): largest == free bytes
//!   - trailing_erased_run_is_not_measured(): run at end of bank never counts
//!   - split_reads_match_unbounded_read(): two reads at any split point
//!   - chunked_reads_match_unbounded_read(): arbitrary chunk sizes
use std::sync::Arc;

use nexus_hal::{MemProgMem, ProgMem};
use nexus_procfs::{OpenFlags, ProcEntry, ProcFs, ProgMemEntry, ProgMemInfo};
use proptest::prelude::*;

fn arb_bank() -> impl Strategy<Value = (Vec<usize>, Vec<bool>)> {
    prop::collection::vec((1usize..=8192, any::<bool>()), 0..48)
        .prop_map(|pages| pages.into_iter().unzip())
}

fn build(sizes: &[usize], programmed: &[bool]) -> MemProgMem {
    let bank = MemProgMem::with_page_sizes(sizes.iter().copied());
    for (page, &used) in programmed.iter().enumerate() {
        if used {
            bank.program(page);
        }
    }
    bank
}

fn unbounded(bank: Arc<MemProgMem>) -> Vec<u8> {
    let entry = ProgMemEntry::new(bank);
    let mut file = entry.open("progmem", OpenFlags::RDONLY).unwrap();
    let mut buf = vec![0u8; 1024];
    let n = file.read(0, &mut buf).unwrap();
    buf.truncate(n);
    buf
}

proptest! {
    #[test]
    fn totals_balance((sizes, programmed) in arb_bank()) {
        let bank = build(&sizes, &programmed);
        let info = ProgMemInfo::collect(&bank);
        prop_assert_eq!(info.arena, info.used_bytes + info.free_bytes);
        prop_assert_eq!(info.arena, sizes.iter().sum::<usize>());
        prop_assert!(info.largest_free_block <= info.free_bytes);
        if !bank.is_uniform() {
            prop_assert_eq!(info.largest_free_block, 0);
        }
    }

    #[test]
    fn all_programmed_has_no_free_space(size in 1usize..=4096, pages in 0usize..32) {
        let bank = MemProgMem::uniform(size, pages);
        for page in 0..pages {
            bank.program(page);
        }
        let info = ProgMemInfo::collect(&bank);
        prop_assert_eq!(info.free_bytes, 0);
        prop_assert_eq!(info.largest_free_block, 0);
        prop_assert_eq!(info.used_bytes, size * pages);
    }

    #[test]
    fn erased_prefix_closed_by_programmed_page(size in 1usize..=4096, erased in 1usize..32) {
        let bank = MemProgMem::uniform(size, erased + 1);
        bank.program(erased);
        let info = ProgMemInfo::collect(&bank);
        prop_assert_eq!(info.largest_free_block, info.free_bytes);
        prop_assert_eq!(info.largest_free_block, info.arena - size);
    }

    #[test]
    fn trailing_erased_run_is_not_measured(size in 1usize..=4096, head in 0usize..8, tail in 1usize..8) {
        // `head` erased pages, one programmed page, then `tail` erased pages.
        let bank = MemProgMem::uniform(size, head + 1 + tail);
        bank.program(head);
        let info = ProgMemInfo::collect(&bank);
        prop_assert_eq!(info.free_bytes, (head + tail) * size);
        prop_assert_eq!(info.largest_free_block, head * size);
    }

    #[test]
    fn split_reads_match_unbounded_read((sizes, programmed) in arb_bank(), split in 0usize..128) {
        let bank = Arc::new(build(&sizes, &programmed));
        let expected = unbounded(Arc::clone(&bank));

        let entry = ProgMemEntry::new(bank);
        let mut file = entry.open("progmem", OpenFlags::RDONLY).unwrap();
        let mut first = vec![0u8; split];
        let n1 = file.read(0, &mut first).unwrap();
        first.truncate(n1);
        let mut second = vec![0u8; 1024];
        let n2 = file.read(n1 as u64, &mut second).unwrap();
        first.extend_from_slice(&second[..n2]);
        prop_assert_eq!(first, expected);
    }

    #[test]
    fn chunked_reads_match_unbounded_read(chunk in 1usize..64, programmed in prop::collection::vec(any::<bool>(), 0..24)) {
        let sizes = vec![1024; programmed.len()];
        let bank = Arc::new(build(&sizes, &programmed));
        let expected = unbounded(Arc::clone(&bank));

        let fs = ProcFs::default();
        fs.register(Arc::new(ProgMemEntry::new(bank)));
        let fh = fs.open("/proc/progmem", OpenFlags::RDONLY).unwrap();
        prop_assert_eq!(fs.read_to_end(fh, chunk).unwrap(), expected);
    }
}
