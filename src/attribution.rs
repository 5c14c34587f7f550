use crate::decoder::DecodedInput;
use crate::models::{Transaction, Wallet};

/// Is the wallet a party to this transaction? Every check is evaluated;
/// any single match is enough. Plain value transfers (no function data)
/// reduce to comparing `from` against the stored session anchor, so a
/// cleared anchor matches nothing.
pub fn wallet_involved(
    tx: &Transaction,
    decoded: &DecodedInput,
    wallet: &Wallet,
    anchor: Option<&str>,
) -> bool {
    if !decoded.has_function_data() {
        return anchor.is_some_and(|addr| tx.from.eq_ignore_ascii_case(addr));
    }

    let mut involved = false;
    if decoded.contains_address(&wallet.address) {
        involved = true;
    }
    // Substring match on the prefix-stripped address covers data sources
    // that disagree about `0x` prefixing.
    let bare = wallet
        .address
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .to_lowercase();
    if !bare.is_empty() && tx.from.to_lowercase().contains(&bare) {
        involved = true;
    }
    if let Some(op) = tx.operations.first() {
        if op.involves(&wallet.address) {
            involved = true;
        }
    }
    involved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_input;
    use crate::models::Operation;

    const WALLET: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";
    const OTHER: &str = "0x1111111111111111111111111111111111111111";

    fn wallet() -> Wallet {
        Wallet {
            address: WALLET.to_string(),
        }
    }

    fn plain_transfer(from: &str) -> Transaction {
        Transaction {
            hash: "0x01".to_string(),
            from: from.to_string(),
            to: Some(OTHER.to_string()),
            input: String::new(),
            block_number: "1200".to_string(),
            is_constructor: false,
            operations: Vec::new(),
        }
    }

    #[test]
    fn plain_transfer_matches_anchor_case_insensitively() {
        let tx = plain_transfer("0xD8DA6BF26964AF9D7EED9E03E53415D37AA96045");
        let decoded = decode_input(&tx.input);
        assert!(wallet_involved(&tx, &decoded, &wallet(), Some(WALLET)));
    }

    #[test]
    fn plain_transfer_without_anchor_matches_nothing() {
        // Even a wallet identical to `from` cannot attribute a plain
        // transfer once the session anchor is gone.
        let tx = plain_transfer(WALLET);
        let decoded = decode_input(&tx.input);
        assert!(!wallet_involved(&tx, &decoded, &wallet(), None));
        assert!(!wallet_involved(&tx, &decoded, &wallet(), Some(OTHER)));
    }

    #[test]
    fn empty_input_never_flags_involvement_by_itself() {
        let tx = plain_transfer(OTHER);
        let decoded = decode_input(&tx.input);
        assert!(!decoded.has_function_data());
        assert!(!wallet_involved(&tx, &decoded, &wallet(), Some(WALLET)));
    }

    #[test]
    fn decoded_argument_match_attributes_without_from_match() {
        // transfer(wallet, 1): the wallet appears only as the recipient.
        let mut tx = plain_transfer(OTHER);
        tx.input = format!(
            "0xa9059cbb000000000000000000000000{}{}",
            &WALLET[2..],
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        let decoded = decode_input(&tx.input);
        assert!(wallet_involved(&tx, &decoded, &wallet(), Some(OTHER)));
    }

    #[test]
    fn prefix_stripped_from_substring_matches() {
        let mut tx = plain_transfer(&WALLET[2..]); // upstream dropped the 0x
        tx.input = "0xdeadbeef00000000".to_string(); // some contract call
        let decoded = decode_input(&tx.input);
        assert!(wallet_involved(&tx, &decoded, &wallet(), None));
    }

    #[test]
    fn first_operation_involvement_counts() {
        let mut tx = plain_transfer(OTHER);
        tx.input = "0xdeadbeef00000000".to_string();
        tx.operations.push(Operation {
            kind: "transfer".to_string(),
            from: OTHER.to_string(),
            to: WALLET.to_string(),
            value: "5".to_string(),
        });
        let decoded = decode_input(&tx.input);
        assert!(wallet_involved(&tx, &decoded, &wallet(), None));
    }

    #[test]
    fn contract_call_unrelated_to_wallet_is_not_attributed() {
        let mut tx = plain_transfer(OTHER);
        tx.input = format!(
            "0xa9059cbb000000000000000000000000{}{}",
            &OTHER[2..],
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        let decoded = decode_input(&tx.input);
        assert!(!wallet_involved(&tx, &decoded, &wallet(), Some(WALLET)));
    }
}
