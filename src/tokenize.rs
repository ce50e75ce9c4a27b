//! N-gram tokenization over arbitrary token sequences.

/// Fixed-width sliding windows over `items`.
///
/// Yields nothing when `items` is shorter than `ngram_length`, and nothing
/// when `ngram_length` is zero.
///
/// # Examples
///
/// ```
/// use regraft::tokenize::ngrams;
///
/// let bigrams: Vec<&[i32]> = ngrams(&[1, 2, 3, 4, 5], 2).collect();
/// assert_eq!(bigrams, vec![&[1, 2][..], &[2, 3], &[3, 4], &[4, 5]]);
/// assert_eq!(ngrams(&[1, 2, 3], 0).count(), 0);
/// ```
pub fn ngrams<T>(items: &[T], ngram_length: usize) -> std::slice::Windows<'_, T> {
    if ngram_length == 0 {
        // slice::windows rejects a zero size.
        return items[..0].windows(1);
    }
    items.windows(ngram_length)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
