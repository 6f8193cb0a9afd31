//! First success among ordered alternatives.

/// Try `attempt` on each alternative in order and stop at the first `Ok`.
///
/// Returns the winning alternative with its value, or every failure (in order)
/// if none succeeded. Alternatives after the winner are never tried.
pub fn first_success<A, T, E, I, F>(alternatives: I, mut attempt: F) -> Result<(A, T), Vec<(A, E)>>
where
    I: IntoIterator<Item = A>,
    F: FnMut(&A) -> Result<T, E>,
{
    let mut failures = Vec::new();
    for alt in alternatives {
        match attempt(&alt) {
            Ok(value) => return Ok((alt, value)),
            Err(err) => failures.push((alt, err)),
        }
    }
    Err(failures)
}
