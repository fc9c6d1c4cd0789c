//! Competition ("1224") place numbering.

/// Place and tie flag for each item of an already sorted list.
///
/// Items for which `same` holds with the first item of their block share
/// that block's place; the next block is placed at its 1-based position, so
/// two results tied for 1st are followed by 3rd.
pub(crate) fn competition_places<T>(
    sorted: &[T],
    mut same: impl FnMut(&T, &T) -> bool,
) -> Vec<(u32, bool)> {
    let mut places = Vec::with_capacity(sorted.len());
    let mut start = 0;

    while start < sorted.len() {
        let mut end = start + 1;
        while end < sorted.len() && same(&sorted[start], &sorted[end]) {
            end += 1;
        }

        let tied = end - start > 1;
        places.extend(std::iter::repeat_n((start as u32 + 1, tied), end - start));
        start = end;
    }

    places
}
