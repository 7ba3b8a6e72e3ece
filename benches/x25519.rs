mod util;
use util::core_cycles;

use ecdh25519::{active_backend, compute_shared, derive_public, init, Config};

fn seed() -> [u8; 32] {
    let z = core_cycles();
    let mut b = [0u8; 32];
    b[ 0.. 8].copy_from_slice(&z.to_le_bytes());
    b[ 8..16].copy_from_slice(&z.to_le_bytes());
    b[16..24].copy_from_slice(&z.to_le_bytes());
    b[24..32].copy_from_slice(&z.to_le_bytes());
    b
}

fn bench_compute_shared() -> (f64, u8) {
    let mut b = seed();
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            b = compute_shared(&b, &b).unwrap_or(b);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 100.0, b[0])
}

fn bench_derive_public() -> (f64, u8) {
    let mut b = seed();
    let mut tt = [0; 100];
    for i in 0..tt.len() {
        let begin = core_cycles();
        for _ in 0..100 {
            b = derive_public(&b).unwrap_or(b);
        }
        let end = core_cycles();
        tt[i] = end.wrapping_sub(begin);
    }
    tt.sort();
    ((tt[tt.len() >> 1] as f64) / 100.0, b[0])
}

fn main() {
    // Set ECDH25519_NOSIMD=1 to measure the portable backend.
    if let Err(e) = init(Config::from_env()) {
        eprintln!("init failed: {}", e);
        return;
    }
    println!("backend: {}", active_backend());

    let mut bx = 0u8;

    let (v, x) = bench_compute_shared();
    bx ^= x;
    println!("compute_shared:                {:13.2}", v);
    let (v, x) = bench_derive_public();
    bx ^= x;
    println!("derive_public:                 {:13.2}", v);

    println!("{}", bx);
}
