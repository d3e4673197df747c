//! Display-path levels.
//!
//! A display path is edited as up to [`LEVEL_COUNT`] ordered slots. The
//! stored form is always the joined path; slots are derived from it and back.

/// Number of level slots in a display path.
pub const LEVEL_COUNT: usize = 5;

/// Path separator for both canonical and display paths.
pub const SEPARATOR: char = '/';

/// Ordered level slots, possibly empty.
pub type Levels = [String; LEVEL_COUNT];

/// Returns a level set with every slot empty.
pub fn empty_levels() -> Levels {
    Default::default()
}

/// Splits a display path into level slots.
///
/// Segments fill slots left to right and missing slots are empty. Segments
/// past the last slot are kept, joined, in the last slot so that
/// `join_levels(&split_levels(p))` never loses text.
pub fn split_levels(display_path: &str) -> Levels {
    let mut levels = empty_levels();
    if display_path.is_empty() {
        return levels;
    }

    let mut segments = display_path.splitn(LEVEL_COUNT, SEPARATOR);
    for slot in levels.iter_mut() {
        match segments.next() {
            Some(segment) => *slot = segment.to_string(),
            None => break,
        }
    }
    levels
}

/// Joins the non-empty slots with `/`.
pub fn join_levels<S: AsRef<str>>(levels: &[S]) -> String {
    levels
        .iter()
        .map(AsRef::as_ref)
        .filter(|level| !level.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(slots: [&str; LEVEL_COUNT]) -> Levels {
        slots.map(str::to_string)
    }

    #[test]
    fn split_pads_with_empty_slots() {
        assert_eq!(
            split_levels("Profile/Name"),
            levels(["Profile", "Name", "", "", ""])
        );
        assert_eq!(split_levels(""), empty_levels());
    }

    #[test]
    fn split_folds_overflow_into_last_slot() {
        let split = split_levels("a/b/c/d/e/f/g");
        assert_eq!(split, levels(["a", "b", "c", "d", "e/f/g"]));
        assert_eq!(join_levels(&split), "a/b/c/d/e/f/g");
    }

    #[test]
    fn join_skips_empty_slots() {
        assert_eq!(join_levels(&levels(["A", "", "B", "", ""])), "A/B");
        assert_eq!(join_levels(&empty_levels()), "");
    }

    #[test]
    fn round_trip_for_gapless_levels() {
        let cases = [
            levels(["One", "", "", "", ""]),
            levels(["One", "Two", "", "", ""]),
            levels(["One", "Two", "Three", "Four", "Five"]),
            empty_levels(),
        ];
        for case in cases {
            assert_eq!(split_levels(&join_levels(&case)), case);
        }
    }

    #[test]
    fn split_normalises_empty_segments_on_join() {
        let split = split_levels("A//B");
        assert_eq!(split, levels(["A", "", "B", "", ""]));
        assert_eq!(join_levels(&split), "A/B");
    }
}
