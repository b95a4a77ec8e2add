//! Sierra record number check digit.
//!
//! Strong record keys end in a check digit computed over the record number.
//! Starting from the rightmost digit, digits are weighted 2, 3, 4, ... and the
//! weighted sum is taken mod 11. A remainder of 10 is written as `x`.

/// Compute the check digit for a record number.
///
/// # Examples
///
/// ```
/// use sierra_record_id::check_digit::check_digit;
///
/// assert_eq!(check_digit(1_234_567), '2');
/// assert_eq!(check_digit(1_000_001), 'x');
/// ```
#[must_use]
pub fn check_digit(rec_num: u32) -> char {
    let mut remaining = rec_num;
    let mut weight = 2;
    let mut sum: u32 = 0;
    while remaining > 0 {
        sum += (remaining % 10) * weight;
        remaining /= 10;
        weight += 1;
    }
    match sum % 11 {
        10 => 'x',
        // Always a single decimal digit here.
        d => char::from_digit(d, 10).unwrap_or('x'),
    }
}

/// Does `candidate` match the check digit for `rec_num`?
#[must_use]
pub fn is_valid_check_digit(rec_num: u32, candidate: char) -> bool {
    check_digit(rec_num) == candidate
}
