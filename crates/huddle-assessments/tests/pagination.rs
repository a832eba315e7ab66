use huddle_assessments::pagination::paginate;

#[test]
fn chunks_into_full_pages_and_a_remainder() {
    let items: Vec<u32> = (1..=7).collect();
    let pages = paginate(&items, 3);
    assert_eq!(pages, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
}

#[test]
fn page_count_and_sizes_hold_for_many_shapes() {
    for n in 0..25usize {
        for p in 1..8usize {
            let items: Vec<usize> = (0..n).collect();
            let pages = paginate(&items, p);

            assert_eq!(pages.len(), n.div_ceil(p), "n={n} p={p}");
            if let Some((last, full)) = pages.split_last() {
                assert!(full.iter().all(|page| page.len() == p));
                assert!(!last.is_empty() && last.len() <= p);
            }
            let flattened: Vec<usize> = pages.into_iter().flatten().collect();
            assert_eq!(flattened, items, "n={n} p={p}");
        }
    }
}

#[test]
fn empty_input_has_no_pages() {
    let pages = paginate::<u32>(&[], 10);
    assert!(pages.is_empty());
}

#[test]
fn zero_page_size_puts_one_item_per_page() {
    let pages = paginate(&["a", "b"], 0);
    assert_eq!(pages, vec![vec!["a"], vec!["b"]]);
}
