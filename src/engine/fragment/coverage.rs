use crate::engine::errors::StorageError;
use crate::engine::fragment::Fragment;

/// Checks that `fragments` tile `[0, row_count)` exactly once, in ordinal
/// order, with no empty fragment.
pub fn verify_coverage(
    table: &str,
    fragments: &[Fragment],
    row_count: u64,
) -> Result<(), StorageError> {
    let fail = |reason: String| StorageError::InvalidRowCount {
        table: table.to_string(),
        reason,
    };

    let mut expected_start = 0u64;
    for (i, f) in fragments.iter().enumerate() {
        if f.ordinal() != i {
            return Err(fail(format!("fragment at position {i} has ordinal {}", f.ordinal())));
        }
        if f.length() == 0 {
            return Err(fail(format!("fragment {i} is empty")));
        }
        if f.start_offset() != expected_start {
            return Err(fail(format!(
                "fragment {i} starts at {} but previous coverage ends at {expected_start}",
                f.start_offset()
            )));
        }
        expected_start = f.end_offset();
    }

    if expected_start != row_count {
        return Err(fail(format!(
            "fragments cover {expected_start} documents, expected {row_count}"
        )));
    }
    Ok(())
}
