// Gate lifecycle, as seen by a host process. This file holds a single
// test, since the gate is process-wide.

use ecdh25519::{
    active_backend, compute_shared, derive_public, generate_secret, init,
    state, Config, Error, GateState, BASE_POINT,
};
use tracing_subscriber::EnvFilter;

#[test]
fn init_lifecycle() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("ecdh25519=trace"))
        .with_test_writer()
        .try_init();

    let secret = [0x11u8; 32];

    // Everything is refused before init().
    assert_eq!(state(), GateState::Unverified);
    assert_eq!(generate_secret(), Err(Error::Unverified));
    assert_eq!(derive_public(&secret), Err(Error::Unverified));
    assert_eq!(compute_shared(&secret, &BASE_POINT), Err(Error::Unverified));

    // Concurrent init() calls all observe the same outcome.
    std::thread::scope(|sc| {
        let handles: Vec<_> = (0..8)
            .map(|_| sc.spawn(|| init(Config::default())))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), Ok(()));
        }
    });
    assert_eq!(state(), GateState::Verified);
    let backend = active_backend();

    // Later calls keep the recorded outcome and ignore their
    // configuration.
    assert_eq!(init(Config::portable()), Ok(()));
    assert_eq!(active_backend(), backend);

    let public = derive_public(&secret).unwrap();
    assert_eq!(compute_shared(&secret, &BASE_POINT), Ok(public));

    // Key agreement from several threads at once.
    std::thread::scope(|sc| {
        for i in 0..4u8 {
            sc.spawn(move || {
                let a = generate_secret().unwrap();
                let mut b = [i; 32];
                b[1] = 0x5A;
                let pa = derive_public(&a).unwrap();
                let pb = derive_public(&b).unwrap();
                assert_eq!(compute_shared(&a, &pb), compute_shared(&b, &pa));
            });
        }
    });
}
