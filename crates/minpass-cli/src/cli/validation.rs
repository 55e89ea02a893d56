/// Parse the `--concurrency` value.
///
/// # Errors
///
/// Returns an error message for zero or non-numeric input.
pub fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("Concurrency must be a positive integer: '{}'", s))?;
    if value == 0 {
        return Err("Concurrency must be at least 1".to_string());
    }
    Ok(value)
}
