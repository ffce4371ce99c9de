//! Basic Bitcoin address format check.
//!
//! This is not a checksum validation; it only rejects input that can never be
//! an address so that obviously wrong input never reaches the ledger API.

use super::ExplorerError;

/// Address prefixes accepted by [`validate_address`].
pub const ACCEPTED_PREFIXES: [&str; 3] = ["1", "3", "bc1"];

/// Length range for base58 (P2PKH / P2SH) addresses.
const BASE58_LEN: std::ops::RangeInclusive<usize> = 26..=35;

/// Length range for bech32 (`bc1`) addresses.
const BECH32_LEN: std::ops::RangeInclusive<usize> = 42..=62;

/// Validate user input as a plausible Bitcoin address and return it trimmed.
///
/// `1` and `3` addresses must be 26 to 35 characters. `bc1` addresses are
/// held to 42 to 62 characters instead, since a 26 to 35 bound would reject
/// every real bech32 address.
///
/// # Errors
///
/// Returns `ExplorerError::InvalidAddress` with a user-facing message when the
/// input is empty, has an unknown prefix, or has an implausible length.
pub fn validate_address(input: &str) -> Result<&str, ExplorerError> {
    let address = input.trim();

    if address.is_empty() {
        return Err(ExplorerError::invalid_address(
            "Please enter a wallet address",
        ));
    }

    let length_ok = if address.starts_with("bc1") {
        BECH32_LEN.contains(&address.len())
    } else if address.starts_with('1') || address.starts_with('3') {
        BASE58_LEN.contains(&address.len())
    } else {
        return Err(ExplorerError::invalid_address(format!(
            "'{address}' must start with one of {}",
            ACCEPTED_PREFIXES.join(", ")
        )));
    };

    if !length_ok || !address.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ExplorerError::invalid_address(format!(
            "'{address}' is not a valid Bitcoin wallet address"
        )));
    }

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::genesis("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")]
    #[case::p2sh("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy")]
    #[case::bech32("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq")]
    #[case::padded("  1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa  ")]
    fn test_valid_addresses(#[case] input: &str) {
        assert_eq!(validate_address(input).unwrap(), input.trim());
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    #[case::too_short("1A1zP1eP5QGefi")]
    #[case::too_long("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNaXXXXX")]
    #[case::bad_prefix("xA1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")]
    #[case::short_bech32("bc1qar0srrr7xfkvy5l643")]
    #[case::bech32_at_base58_length("bc1qar0srrr7xfkvy5l643lydnw9re")]
    #[case::punctuation("1A1zP1eP5QGefi2DMPTf-L5SLmv7DivfNa")]
    fn test_invalid_addresses(#[case] input: &str) {
        let err = validate_address(input).unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidAddress(_)));
        assert!(!err.is_retryable());
    }
}
