//! Known-answer self-test.
//!
//! The self-test runs a fixed set of X25519 vectors through every backend
//! that the current process may use: the portable backend, each
//! accelerated variant that the CPU supports, and the dispatcher itself.
//! A run succeeds only if every check passes; all checks are performed
//! (there is no early exit), and each mismatch is logged with the vector
//! index and the backend name.

use subtle::ConstantTimeEq;

use crate::accel;
use crate::backend::PORTABLE_NAME;
use crate::dispatch;
use crate::field::GF25519;
use crate::ladder;
use crate::x25519::{BASE_POINT, NULL_POINT};

/// A known-answer vector.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Vector {
    pub(crate) scalar: [u8; 32],
    pub(crate) point: [u8; 32],
    pub(crate) expected: [u8; 32],
    /// false if the output is the null point.
    pub(crate) valid: bool,
}

pub(crate) static VECTORS: [Vector; 19] = [
    // RFC 7748, section 5.2.
    Vector {
        scalar: [
            0xa5, 0x46, 0xe3, 0x6b, 0xf0, 0x52, 0x7c, 0x9d,
            0x3b, 0x16, 0x15, 0x4b, 0x82, 0x46, 0x5e, 0xdd,
            0x62, 0x14, 0x4c, 0x0a, 0xc1, 0xfc, 0x5a, 0x18,
            0x50, 0x6a, 0x22, 0x44, 0xba, 0x44, 0x9a, 0xc4,
        ],
        point: [
            0xe6, 0xdb, 0x68, 0x67, 0x58, 0x30, 0x30, 0xdb,
            0x35, 0x94, 0xc1, 0xa4, 0x24, 0xb1, 0x5f, 0x7c,
            0x72, 0x66, 0x24, 0xec, 0x26, 0xb3, 0x35, 0x3b,
            0x10, 0xa9, 0x03, 0xa6, 0xd0, 0xab, 0x1c, 0x4c,
        ],
        expected: [
            0xc3, 0xda, 0x55, 0x37, 0x9d, 0xe9, 0xc6, 0x90,
            0x8e, 0x94, 0xea, 0x4d, 0xf2, 0x8d, 0x08, 0x4f,
            0x32, 0xec, 0xcf, 0x03, 0x49, 0x1c, 0x71, 0xf7,
            0x54, 0xb4, 0x07, 0x55, 0x77, 0xa2, 0x85, 0x52,
        ],
        valid: true,
    },
    Vector {
        scalar: [
            0x4b, 0x66, 0xe9, 0xd4, 0xd1, 0xb4, 0x67, 0x3c,
            0x5a, 0xd2, 0x26, 0x91, 0x95, 0x7d, 0x6a, 0xf5,
            0xc1, 0x1b, 0x64, 0x21, 0xe0, 0xea, 0x01, 0xd4,
            0x2c, 0xa4, 0x16, 0x9e, 0x79, 0x18, 0xba, 0x0d,
        ],
        point: [
            0xe5, 0x21, 0x0f, 0x12, 0x78, 0x68, 0x11, 0xd3,
            0xf4, 0xb7, 0x95, 0x9d, 0x05, 0x38, 0xae, 0x2c,
            0x31, 0xdb, 0xe7, 0x10, 0x6f, 0xc0, 0x3c, 0x3e,
            0xfc, 0x4c, 0xd5, 0x49, 0xc7, 0x15, 0xa4, 0x93,
        ],
        expected: [
            0x95, 0xcb, 0xde, 0x94, 0x76, 0xe8, 0x90, 0x7d,
            0x7a, 0xad, 0xe4, 0x5c, 0xb4, 0xb8, 0x73, 0xf8,
            0x8b, 0x59, 0x5a, 0x68, 0x79, 0x9f, 0xa1, 0x52,
            0xe6, 0xf8, 0xf7, 0x64, 0x7a, 0xac, 0x79, 0x57,
        ],
        valid: true,
    },
    // RFC 7748, section 6.1: key pairs of Alice and Bob, then shared
    // secret from both sides.
    Vector {
        scalar: [
            0x77, 0x07, 0x6d, 0x0a, 0x73, 0x18, 0xa5, 0x7d,
            0x3c, 0x16, 0xc1, 0x72, 0x51, 0xb2, 0x66, 0x45,
            0xdf, 0x4c, 0x2f, 0x87, 0xeb, 0xc0, 0x99, 0x2a,
            0xb1, 0x77, 0xfb, 0xa5, 0x1d, 0xb9, 0x2c, 0x2a,
        ],
        point: [
            0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        expected: [
            0x85, 0x20, 0xf0, 0x09, 0x89, 0x30, 0xa7, 0x54,
            0x74, 0x8b, 0x7d, 0xdc, 0xb4, 0x3e, 0xf7, 0x5a,
            0x0d, 0xbf, 0x3a, 0x0d, 0x26, 0x38, 0x1a, 0xf4,
            0xeb, 0xa4, 0xa9, 0x8e, 0xaa, 0x9b, 0x4e, 0x6a,
        ],
        valid: true,
    },
    Vector {
        scalar: [
            0x5d, 0xab, 0x08, 0x7e, 0x62, 0x4a, 0x8a, 0x4b,
            0x79, 0xe1, 0x7f, 0x8b, 0x83, 0x80, 0x0e, 0xe6,
            0x6f, 0x3b, 0xb1, 0x29, 0x26, 0x18, 0xb6, 0xfd,
            0x1c, 0x2f, 0x8b, 0x27, 0xff, 0x88, 0xe0, 0xeb,
        ],
        point: [
            0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        expected: [
            0xde, 0x9e, 0xdb, 0x7d, 0x7b, 0x7d, 0xc1, 0xb4,
            0xd3, 0x5b, 0x61, 0xc2, 0xec, 0xe4, 0x35, 0x37,
            0x3f, 0x83, 0x43, 0xc8, 0x5b, 0x78, 0x67, 0x4d,
            0xad, 0xfc, 0x7e, 0x14, 0x6f, 0x88, 0x2b, 0x4f,
        ],
        valid: true,
    },
    Vector {
        scalar: [
            0x77, 0x07, 0x6d, 0x0a, 0x73, 0x18, 0xa5, 0x7d,
            0x3c, 0x16, 0xc1, 0x72, 0x51, 0xb2, 0x66, 0x45,
            0xdf, 0x4c, 0x2f, 0x87, 0xeb, 0xc0, 0x99, 0x2a,
            0xb1, 0x77, 0xfb, 0xa5, 0x1d, 0xb9, 0x2c, 0x2a,
        ],
        point: [
            0xde, 0x9e, 0xdb, 0x7d, 0x7b, 0x7d, 0xc1, 0xb4,
            0xd3, 0x5b, 0x61, 0xc2, 0xec, 0xe4, 0x35, 0x37,
            0x3f, 0x83, 0x43, 0xc8, 0x5b, 0x78, 0x67, 0x4d,
            0xad, 0xfc, 0x7e, 0x14, 0x6f, 0x88, 0x2b, 0x4f,
        ],
        expected: [
            0x4a, 0x5d, 0x9d, 0x5b, 0xa4, 0xce, 0x2d, 0xe1,
            0x72, 0x8e, 0x3b, 0xf4, 0x80, 0x35, 0x0f, 0x25,
            0xe0, 0x7e, 0x21, 0xc9, 0x47, 0xd1, 0x9e, 0x33,
            0x76, 0xf0, 0x9b, 0x3c, 0x1e, 0x16, 0x17, 0x42,
        ],
        valid: true,
    },
    Vector {
        scalar: [
            0x5d, 0xab, 0x08, 0x7e, 0x62, 0x4a, 0x8a, 0x4b,
            0x79, 0xe1, 0x7f, 0x8b, 0x83, 0x80, 0x0e, 0xe6,
            0x6f, 0x3b, 0xb1, 0x29, 0x26, 0x18, 0xb6, 0xfd,
            0x1c, 0x2f, 0x8b, 0x27, 0xff, 0x88, 0xe0, 0xeb,
        ],
        point: [
            0x85, 0x20, 0xf0, 0x09, 0x89, 0x30, 0xa7, 0x54,
            0x74, 0x8b, 0x7d, 0xdc, 0xb4, 0x3e, 0xf7, 0x5a,
            0x0d, 0xbf, 0x3a, 0x0d, 0x26, 0x38, 0x1a, 0xf4,
            0xeb, 0xa4, 0xa9, 0x8e, 0xaa, 0x9b, 0x4e, 0x6a,
        ],
        expected: [
            0x4a, 0x5d, 0x9d, 0x5b, 0xa4, 0xce, 0x2d, 0xe1,
            0x72, 0x8e, 0x3b, 0xf4, 0x80, 0x35, 0x0f, 0x25,
            0xe0, 0x7e, 0x21, 0xc9, 0x47, 0xd1, 0x9e, 0x33,
            0x76, 0xf0, 0x9b, 0x3c, 0x1e, 0x16, 0x17, 0x42,
        ],
        valid: true,
    },
    // RFC 7748, section 5.2: iterated test, after one iteration.
    Vector {
        scalar: [
            0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        point: [
            0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        expected: [
            0x42, 0x2c, 0x8e, 0x7a, 0x62, 0x27, 0xd7, 0xbc,
            0xa1, 0x35, 0x0b, 0x3e, 0x2b, 0xb7, 0x27, 0x9f,
            0x78, 0x97, 0xb8, 0x7b, 0xb6, 0x85, 0x4b, 0x78,
            0x3c, 0x60, 0xe8, 0x03, 0x11, 0xae, 0x30, 0x79,
        ],
        valid: true,
    },
    // All-ones scalar (clamping clears the low and high bits).
    Vector {
        scalar: [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        ],
        point: [
            0x09, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        expected: [
            0x84, 0x7c, 0x0d, 0x2c, 0x37, 0x52, 0x34, 0xf3,
            0x65, 0xe6, 0x60, 0x95, 0x51, 0x87, 0xa3, 0x73,
            0x5a, 0x0f, 0x76, 0x13, 0xd1, 0x60, 0x9d, 0x3a,
            0x6a, 0x4d, 0x8c, 0x53, 0xae, 0xaa, 0x5a, 0x22,
        ],
        valid: true,
    },
    // Peer value with the top bit set (the bit is ignored).
    Vector {
        scalar: [
            0x77, 0x07, 0x6d, 0x0a, 0x73, 0x18, 0xa5, 0x7d,
            0x3c, 0x16, 0xc1, 0x72, 0x51, 0xb2, 0x66, 0x45,
            0xdf, 0x4c, 0x2f, 0x87, 0xeb, 0xc0, 0x99, 0x2a,
            0xb1, 0x77, 0xfb, 0xa5, 0x1d, 0xb9, 0x2c, 0x2a,
        ],
        point: [
            0xde, 0x9e, 0xdb, 0x7d, 0x7b, 0x7d, 0xc1, 0xb4,
            0xd3, 0x5b, 0x61, 0xc2, 0xec, 0xe4, 0x35, 0x37,
            0x3f, 0x83, 0x43, 0xc8, 0x5b, 0x78, 0x67, 0x4d,
            0xad, 0xfc, 0x7e, 0x14, 0x6f, 0x88, 0x2b, 0xcf,
        ],
        expected: [
            0x4a, 0x5d, 0x9d, 0x5b, 0xa4, 0xce, 0x2d, 0xe1,
            0x72, 0x8e, 0x3b, 0xf4, 0x80, 0x35, 0x0f, 0x25,
            0xe0, 0x7e, 0x21, 0xc9, 0x47, 0xd1, 0x9e, 0x33,
            0x76, 0xf0, 0x9b, 0x3c, 0x1e, 0x16, 0x17, 0x42,
        ],
        valid: true,
    },
    // Pseudorandom scalars and points.
    Vector {
        scalar: [
            0x75, 0xfd, 0xa6, 0x40, 0x5d, 0x2e, 0xf4, 0x56,
            0xcb, 0xd1, 0xca, 0xd4, 0x07, 0xf4, 0x75, 0x41,
            0xb9, 0x05, 0x8f, 0xb8, 0x2b, 0x98, 0x06, 0x99,
            0x34, 0xbb, 0x25, 0x29, 0x39, 0x60, 0xd2, 0xeb,
        ],
        point: [
            0xaa, 0xec, 0xfb, 0xe6, 0x5f, 0x94, 0xf2, 0x97,
            0x22, 0xd9, 0x96, 0xab, 0xfb, 0x15, 0x1e, 0xf6,
            0x7d, 0x7a, 0x35, 0x41, 0x8f, 0xf9, 0xa0, 0xac,
            0xa9, 0x89, 0xce, 0xee, 0x71, 0xc6, 0xe4, 0x1e,
        ],
        expected: [
            0x48, 0x8e, 0x68, 0x07, 0x58, 0x3d, 0x41, 0x05,
            0xc9, 0x26, 0xca, 0x04, 0x8c, 0x6c, 0xc9, 0x74,
            0xbc, 0x3e, 0xf7, 0x56, 0x0f, 0x5e, 0x04, 0x27,
            0x25, 0x8a, 0xd3, 0x1e, 0x6a, 0x39, 0xb0, 0x46,
        ],
        valid: true,
    },
    Vector {
        scalar: [
            0x35, 0x98, 0x68, 0x00, 0x1e, 0x62, 0x8a, 0x8a,
            0x77, 0x3f, 0x24, 0xad, 0x98, 0xb9, 0x53, 0x7e,
            0x8a, 0x98, 0x25, 0x81, 0xa7, 0xed, 0xb0, 0x10,
            0xe5, 0x14, 0xf7, 0x67, 0xfa, 0x70, 0x18, 0x21,
        ],
        point: [
            0x72, 0xcb, 0xec, 0x57, 0xb7, 0x65, 0xb7, 0x85,
            0xb6, 0xbb, 0xbf, 0x02, 0x0b, 0x5b, 0x61, 0xc7,
            0x92, 0xab, 0xa6, 0xd5, 0x4c, 0xfe, 0xd7, 0x97,
            0x4b, 0x19, 0xdb, 0x40, 0x63, 0x9d, 0x99, 0xd0,
        ],
        expected: [
            0x02, 0x6c, 0xe1, 0x23, 0x90, 0x8c, 0x73, 0x5c,
            0x39, 0xee, 0x71, 0x27, 0xd3, 0x22, 0xf4, 0x35,
            0xdc, 0x4c, 0x3b, 0x95, 0x18, 0x51, 0xf0, 0x72,
            0x68, 0x54, 0x2b, 0xaa, 0x64, 0xb8, 0xbf, 0x04,
        ],
        valid: true,
    },
    Vector {
        scalar: [
            0x74, 0x0a, 0x22, 0xaa, 0x73, 0xfa, 0x86, 0x28,
            0xe1, 0x10, 0x51, 0xdf, 0x4d, 0xa1, 0x38, 0x45,
            0xbb, 0xf4, 0x28, 0xcd, 0x88, 0x23, 0x22, 0x8d,
            0x35, 0xa5, 0xb6, 0x81, 0x01, 0x86, 0x16, 0x18,
        ],
        point: [
            0xc6, 0xe8, 0x72, 0x7a, 0x61, 0x52, 0xdc, 0xab,
            0xa9, 0x41, 0x84, 0x7e, 0xb9, 0xaa, 0x7d, 0x4d,
            0x9a, 0xa0, 0x5f, 0x6d, 0x2d, 0xb2, 0xf1, 0x65,
            0xc6, 0xbf, 0xc8, 0x11, 0x7b, 0x85, 0xf2, 0x5c,
        ],
        expected: [
            0x4b, 0xe4, 0xce, 0x98, 0x5f, 0x95, 0x38, 0x8e,
            0x42, 0xfe, 0x1b, 0xed, 0x9f, 0x09, 0x4a, 0xc5,
            0x9c, 0xeb, 0x9d, 0x96, 0x74, 0x57, 0xbe, 0xe8,
            0xbb, 0xd6, 0x27, 0x12, 0xc3, 0xe4, 0x44, 0x7d,
        ],
        valid: true,
    },
    // Low-order points (u = 0, u = 1, two points of order 8), then
    // p - 1, p and p + 1: the output is the null point.
    Vector {
        scalar: [
            0x5d, 0xab, 0x08, 0x7e, 0x62, 0x4a, 0x8a, 0x4b,
            0x79, 0xe1, 0x7f, 0x8b, 0x83, 0x80, 0x0e, 0xe6,
            0x6f, 0x3b, 0xb1, 0x29, 0x26, 0x18, 0xb6, 0xfd,
            0x1c, 0x2f, 0x8b, 0x27, 0xff, 0x88, 0xe0, 0xeb,
        ],
        point: [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        expected: [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        valid: false,
    },
    Vector {
        scalar: [
            0x5d, 0xab, 0x08, 0x7e, 0x62, 0x4a, 0x8a, 0x4b,
            0x79, 0xe1, 0x7f, 0x8b, 0x83, 0x80, 0x0e, 0xe6,
            0x6f, 0x3b, 0xb1, 0x29, 0x26, 0x18, 0xb6, 0xfd,
            0x1c, 0x2f, 0x8b, 0x27, 0xff, 0x88, 0xe0, 0xeb,
        ],
        point: [
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        expected: [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        valid: false,
    },
    Vector {
        scalar: [
            0x5d, 0xab, 0x08, 0x7e, 0x62, 0x4a, 0x8a, 0x4b,
            0x79, 0xe1, 0x7f, 0x8b, 0x83, 0x80, 0x0e, 0xe6,
            0x6f, 0x3b, 0xb1, 0x29, 0x26, 0x18, 0xb6, 0xfd,
            0x1c, 0x2f, 0x8b, 0x27, 0xff, 0x88, 0xe0, 0xeb,
        ],
        point: [
            0xe0, 0xeb, 0x7a, 0x7c, 0x3b, 0x41, 0xb8, 0xae,
            0x16, 0x56, 0xe3, 0xfa, 0xf1, 0x9f, 0xc4, 0x6a,
            0xda, 0x09, 0x8d, 0xeb, 0x9c, 0x32, 0xb1, 0xfd,
            0x86, 0x62, 0x05, 0x16, 0x5f, 0x49, 0xb8, 0x00,
        ],
        expected: [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        valid: false,
    },
    Vector {
        scalar: [
            0x5d, 0xab, 0x08, 0x7e, 0x62, 0x4a, 0x8a, 0x4b,
            0x79, 0xe1, 0x7f, 0x8b, 0x83, 0x80, 0x0e, 0xe6,
            0x6f, 0x3b, 0xb1, 0x29, 0x26, 0x18, 0xb6, 0xfd,
            0x1c, 0x2f, 0x8b, 0x27, 0xff, 0x88, 0xe0, 0xeb,
        ],
        point: [
            0x5f, 0x9c, 0x95, 0xbc, 0xa3, 0x50, 0x8c, 0x24,
            0xb1, 0xd0, 0xb1, 0x55, 0x9c, 0x83, 0xef, 0x5b,
            0x04, 0x44, 0x5c, 0xc4, 0x58, 0x1c, 0x8e, 0x86,
            0xd8, 0x22, 0x4e, 0xdd, 0xd0, 0x9f, 0x11, 0x57,
        ],
        expected: [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        valid: false,
    },
    Vector {
        scalar: [
            0x5d, 0xab, 0x08, 0x7e, 0x62, 0x4a, 0x8a, 0x4b,
            0x79, 0xe1, 0x7f, 0x8b, 0x83, 0x80, 0x0e, 0xe6,
            0x6f, 0x3b, 0xb1, 0x29, 0x26, 0x18, 0xb6, 0xfd,
            0x1c, 0x2f, 0x8b, 0x27, 0xff, 0x88, 0xe0, 0xeb,
        ],
        point: [
            0xec, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
        ],
        expected: [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        valid: false,
    },
    Vector {
        scalar: [
            0x5d, 0xab, 0x08, 0x7e, 0x62, 0x4a, 0x8a, 0x4b,
            0x79, 0xe1, 0x7f, 0x8b, 0x83, 0x80, 0x0e, 0xe6,
            0x6f, 0x3b, 0xb1, 0x29, 0x26, 0x18, 0xb6, 0xfd,
            0x1c, 0x2f, 0x8b, 0x27, 0xff, 0x88, 0xe0, 0xeb,
        ],
        point: [
            0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
        ],
        expected: [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        valid: false,
    },
    Vector {
        scalar: [
            0x5d, 0xab, 0x08, 0x7e, 0x62, 0x4a, 0x8a, 0x4b,
            0x79, 0xe1, 0x7f, 0x8b, 0x83, 0x80, 0x0e, 0xe6,
            0x6f, 0x3b, 0xb1, 0x29, 0x26, 0x18, 0xb6, 0xfd,
            0x1c, 0x2f, 0x8b, 0x27, 0xff, 0x88, 0xe0, 0xeb,
        ],
        point: [
            0xee, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
        ],
        expected: [
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ],
        valid: false,
    },
];

/// Runs the known-answer self-test; returns true if all checks pass.
///
/// This does not depend on, nor modify, the state of the self-test gate.
pub fn self_test() -> bool {
    run_vectors(&VECTORS)
}

fn check(index: usize, backend: &str, entry: &str,
    out: Option<[u8; 32]>, v: &Vector) -> bool
{
    match out {
        Some(r) if r == v.expected => true,
        Some(_) => {
            tracing::error!(vector = index, backend, entry, "known-answer mismatch");
            false
        }
        None => {
            tracing::error!(vector = index, backend, entry, "backend unavailable");
            false
        }
    }
}

pub(crate) fn run_vectors(vectors: &[Vector]) -> bool {
    let caps = accel::capabilities();
    let mut ok = true;

    for (i, v) in vectors.iter().enumerate() {
        let base = v.point == BASE_POINT;

        ok &= check(i, PORTABLE_NAME, "multiply",
            Some(dispatch::generic(&v.scalar, &v.point)), v);
        if base {
            ok &= check(i, PORTABLE_NAME, "multiply_base",
                Some(ladder::mul_base::<GF25519>(&v.scalar)), v);
        }

        for a in accel::variants() {
            if !caps.contains(a.required()) {
                continue;
            }
            ok &= check(i, a.name(), "multiply",
                a.multiply(&v.scalar, &v.point), v);
            if base {
                ok &= check(i, a.name(), "multiply_base",
                    a.multiply_base(&v.scalar), v);
            }
        }

        // Full dispatch, with the null point check applied by the
        // key-agreement functions.
        let out = dispatch::multiply(&v.scalar, &v.point);
        ok &= check(i, "dispatch", "multiply", Some(out), v);
        let valid = !bool::from(out[..].ct_eq(&NULL_POINT[..]));
        if valid != v.valid {
            tracing::error!(vector = i, expected = v.valid, "validity mismatch");
            ok = false;
        }
    }

    // The base point entry points must agree with the general ones.
    for (i, v) in vectors.iter().enumerate() {
        let expected = dispatch::generic(&v.scalar, &BASE_POINT);
        if dispatch::multiply_base(&v.scalar) != expected {
            tracing::error!(vector = i, "base point consistency mismatch");
            ok = false;
        }
    }

    ok
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{run_vectors, self_test, VECTORS};

    #[test]
    fn vectors_pass() {
        assert!(self_test());
    }

    #[test]
    fn corrupted_vector_fails() {
        for i in [0, 7, 12, VECTORS.len() - 1] {
            let mut vv = VECTORS;
            vv[i].expected[5] ^= 0x01;
            assert!(!run_vectors(&vv), "vector {}", i);
        }

        // Validity flag alone.
        let mut vv = VECTORS;
        vv[3].valid = false;
        assert!(!run_vectors(&vv));
    }
}
