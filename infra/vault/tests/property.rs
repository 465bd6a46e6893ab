use proptest::prelude::*;
use seatlock_vault::prelude::*;

proptest! {
    #[test]
    fn roundtrip_arbitrary_bytes(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let vault = Vault::<ChaCha>::builder()
            .derived_keys("ikm", "salt")
            .unwrap()
            .build()
            .unwrap();

        let sealed = vault.seal_bytes(&data, b"ctx").unwrap();
        let unsealed = vault.unseal_bytes(&sealed, b"ctx").unwrap();
        prop_assert_eq!(data, unsealed);
    }

    #[test]
    fn flipping_any_bit_breaks_the_seal(
        data in proptest::collection::vec(any::<u8>(), 1..256),
        flip_index in any::<prop::sample::Index>(),
        flip_bit in 0u8..8,
    ) {
        let vault = Vault::<Aes>::builder()
            .derived_keys("ikm", "salt")
            .unwrap()
            .build()
            .unwrap();

        let mut sealed = vault.seal_bytes(&data, b"ctx").unwrap();
        let index = flip_index.index(sealed.len());
        sealed[index] ^= 1 << flip_bit;

        prop_assert!(vault.unseal_bytes(&sealed, b"ctx").is_err());
    }
}
