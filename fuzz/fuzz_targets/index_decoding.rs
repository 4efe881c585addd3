// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index file decoding under adversarial input.
//!
//! A `.dkvx` file sitting next to the tables can be stale, truncated or
//! hand-edited. The worst case has to be an error, not a panic or a huge
//! allocation driven by a header that lies about its row count.

#![no_main]

use docket::index::format;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = format::decode(data) else {
        return;
    };

    // A file that decodes must describe itself consistently.
    let dim = decoded.header.dimension as usize;
    assert!(dim > 0, "decoded a zero-dimension index");
    assert_eq!(
        decoded.vectors.len(),
        dim * decoded.header.row_count as usize,
        "vector payload disagrees with the header"
    );
    assert_eq!(
        decoded.model_id.len(),
        decoded.header.model_id_len as usize,
        "model id length disagrees with the header"
    );

    // Re-encoding keeps everything a reader can observe. Reserved bytes
    // are not carried, so compare the decoded forms rather than raw bytes.
    let again = format::encode(
        &decoded.model_id,
        dim,
        decoded.header.fingerprint(),
        &decoded.vectors,
    )
    .expect("re-encode of a decoded index");
    let redecoded = format::decode(&again).expect("decode of a re-encoded index");
    assert_eq!(redecoded.model_id, decoded.model_id);
    assert_eq!(redecoded.header.fingerprint(), decoded.header.fingerprint());
    let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&redecoded.vectors), bits(&decoded.vectors));
});
