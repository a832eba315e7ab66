/// Split `items` into consecutive pages of `page_size`, preserving order.
///
/// The last page may be shorter. An empty input yields no pages. A page
/// size of zero is treated as one so every item still lands on a page.
pub fn paginate<T: Clone>(items: &[T], page_size: usize) -> Vec<Vec<T>> {
    items
        .chunks(page_size.max(1))
        .map(<[T]>::to_vec)
        .collect()
}
