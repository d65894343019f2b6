use csign_crypto::prelude::*;
use csign_domain::SignatureType;
use proptest::prelude::*;

fn signature_type() -> impl Strategy<Value = SignatureType> {
    prop_oneof![
        Just(SignatureType::Possession),
        Just(SignatureType::Knowledge),
        Just(SignatureType::Biometry),
        Just(SignatureType::PossessionKnowledge),
        Just(SignatureType::PossessionBiometry),
        Just(SignatureType::PossessionKnowledgeBiometry),
    ]
}

proptest! {
    #[test]
    fn computed_signatures_are_well_formed_and_verify(
        master in any::<[u8; 16]>(),
        ty in signature_type(),
        payload in proptest::collection::vec(any::<u8>(), 0..512),
        counter in any::<u64>(),
    ) {
        let keys = derive_signature_keys(ty, &MasterSecret::from_bytes(master));
        let signature = compute_signature(&payload, &keys, counter).unwrap();

        prop_assert!(validate_signature_format(&signature, ty.factor_count()).is_ok());
        prop_assert!(verify(&payload, &signature, &keys, counter).unwrap());
    }

    #[test]
    fn format_check_never_panics(signature in "\\PC{0,40}", factors in 1usize..=3) {
        let _ = validate_signature_format(&signature, factors);
    }
}
