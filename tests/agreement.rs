// Properties of the public key-agreement API.

use ecdh25519::{
    clamp, clamped, compute_shared, derive_public, generate_secret, init,
    self_test, Config, Error, BASE_POINT, NULL_POINT,
};
use proptest::prelude::*;

fn setup() {
    init(Config::default()).unwrap();
}

fn dec32(s: &str) -> [u8; 32] {
    let mut r = [0u8; 32];
    hex::decode_to_slice(s, &mut r[..]).unwrap();
    r
}

#[test]
fn rfc7748_vectors() {
    setup();
    let s = dec32("a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4");
    let u = dec32("e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c");
    assert_eq!(compute_shared(&s, &u).unwrap(),
        dec32("c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552"));

    let s = dec32("4b66e9d4d1b4673c5ad22691957d6af5c11b6421e0ea01d42ca4169e7918ba0d");
    let u = dec32("e5210f12786811d3f4b7959d0538ae2c31dbe7106fc03c3efc4cd549c715a493");
    assert_eq!(compute_shared(&s, &u).unwrap(),
        dec32("95cbde9476e8907d7aade45cb4b873f88b595a68799fa152e6f8f7647aac7957"));
}

#[test]
fn top_bit_ignored() {
    setup();
    let a = dec32("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
    let mut pb = dec32("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");
    let k = compute_shared(&a, &pb).unwrap();
    pb[31] |= 0x80;
    assert_eq!(compute_shared(&a, &pb).unwrap(), k);
}

#[test]
fn low_order_peers_rejected() {
    setup();
    let s = generate_secret().unwrap();
    let peers = [
        "0000000000000000000000000000000000000000000000000000000000000000",
        "0100000000000000000000000000000000000000000000000000000000000000",
        "e0eb7a7c3b41b8ae1656e3faf19fc46ada098deb9c32b1fd866205165f49b800",
        "5f9c95bca3508c24b1d0b1559c83ef5b04445cc4581c8e86d8224eddd09f1157",
        "ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
        "edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
        "eeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f",
    ];
    for p in peers.iter() {
        assert_eq!(compute_shared(&s, &dec32(p)), Err(Error::DegenerateOutput), "{}", p);
    }
}

#[test]
fn null_secret_rejected() {
    setup();
    assert_eq!(derive_public(&NULL_POINT), Err(Error::DegenerateInput));
}

#[test]
fn self_peer_round_trip() {
    setup();
    let s = generate_secret().unwrap();
    let p = derive_public(&s).unwrap();
    let k1 = compute_shared(&s, &p).unwrap();
    let k2 = compute_shared(&s, &p).unwrap();
    assert_eq!(k1, k2);
    assert_eq!(derive_public(&s).unwrap(), p);
}

#[test]
fn self_test_passes() {
    assert!(self_test());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_clamp_idempotent(x in prop::array::uniform32(any::<u8>())) {
        let once = clamped(x);
        let mut twice = once;
        clamp(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_clamp_bits(x in prop::array::uniform32(any::<u8>())) {
        let s = clamped(x);
        prop_assert_eq!(s[0] & 7, 0);
        prop_assert_eq!(s[31] & 0x80, 0);
        prop_assert_eq!(s[31] & 0x40, 0x40);
        prop_assert_eq!(&s[1..31], &x[1..31]);
    }

    #[test]
    fn prop_agreement(
        a in prop::array::uniform32(any::<u8>()),
        b in prop::array::uniform32(any::<u8>()),
    ) {
        setup();
        prop_assume!(a != NULL_POINT && b != NULL_POINT);
        let pa = derive_public(&a).unwrap();
        let pb = derive_public(&b).unwrap();
        prop_assert_eq!(compute_shared(&a, &pb), compute_shared(&b, &pa));
    }

    #[test]
    fn prop_base_point(s in prop::array::uniform32(any::<u8>())) {
        setup();
        prop_assume!(s != NULL_POINT);
        prop_assert_eq!(derive_public(&s), compute_shared(&s, &BASE_POINT));
    }
}
