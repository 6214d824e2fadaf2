use proptest::prelude::*;

use ledgerkit_types::{
    to_base_units, AccountId, PublicKey, Status, Timestamp, TokenId, TransactionId,
};

proptest! {
    /// Entity ids survive display -> parse.
    #[test]
    fn entity_id_display_parse(shard in 0u64..1000, realm in 0u64..1000, num in any::<u64>()) {
        let id = TokenId::new(shard, realm, num);
        let parsed: TokenId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// Transaction ids survive display -> parse, including the nanos padding.
    #[test]
    fn transaction_id_display_parse(num in 1u64..1_000_000, secs in 0u64..4_000_000_000, nanos in 0u32..1_000_000_000) {
        let id = TransactionId::new(AccountId::from_num(num), Timestamp::new(secs, nanos));
        let parsed: TransactionId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }

    /// A whole number scales by 10^decimals.
    #[test]
    fn whole_amount_scales(whole in 0u64..1_000_000_000, decimals in 0u32..9) {
        let expected = whole * 10u64.pow(decimals);
        prop_assert_eq!(to_base_units(&whole.to_string(), decimals), Ok(expected));
    }

    /// Base units rendered back to a decimal string convert to the same value.
    #[test]
    fn base_units_through_display(units in 0u64..1_000_000_000_000, decimals in 1u32..9) {
        let scale = 10u64.pow(decimals);
        let display = format!("{}.{:0width$}", units / scale, units % scale, width = decimals as usize);
        prop_assert_eq!(to_base_units(&display, decimals), Ok(units));
    }

    /// Fractional digits beyond the token's decimals are always rejected.
    #[test]
    fn excess_precision_rejected(whole in 0u64..1000, decimals in 0u32..6) {
        let display = format!("{whole}.{}1", "0".repeat(decimals as usize));
        prop_assert!(to_base_units(&display, decimals).is_err());
    }

    /// Ed25519 keys parse from their DER rendering.
    #[test]
    fn ed25519_der_parse(bytes in prop::array::uniform32(0u8..)) {
        let key = PublicKey::Ed25519(bytes);
        let parsed: PublicKey = key.to_string_der().parse().unwrap();
        prop_assert_eq!(parsed, key);
    }

    /// Any code name maps back to itself.
    #[test]
    fn status_code_names_are_stable(code in "[A-Z_]{1,40}") {
        let status: Status = code.parse().unwrap();
        prop_assert_eq!(status.as_str(), code.as_str());
    }
}
