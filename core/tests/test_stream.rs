#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    use deflate_core::prelude::*;
    use deflate_core::types::StreamError;

    fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        StdRng::seed_from_u64(seed).fill_bytes(&mut buf);
        buf
    }

    fn text(len: usize) -> Vec<u8> {
        b"the quick brown fox jumps over the lazy dog. "
            .iter()
            .cycle()
            .take(len)
            .copied()
            .collect()
    }

    fn decode_independently(flags: u16, compressed: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        match flags {
            wrapper_ids::GZIP => GzDecoder::new(compressed).read_to_end(&mut out),
            wrapper_ids::ZLIB => ZlibDecoder::new(compressed).read_to_end(&mut out),
            _ => DeflateDecoder::new(compressed).read_to_end(&mut out),
        }
        .unwrap();
        out
    }

    const WRAPPERS: [u16; 3] = [wrapper_ids::DEFLATE, wrapper_ids::GZIP, wrapper_ids::ZLIB];

    #[test]
    fn empty_input_produces_a_valid_stream() {
        for flags in WRAPPERS {
            let c = compress_stream(&[], 1, flags, 0, 0).unwrap();
            assert!(!c.is_empty());
            assert!(decode_independently(flags, &c).is_empty());
            assert!(decompress_stream(&c, flags, 0).unwrap().is_empty());
        }
    }

    #[test]
    fn one_byte_round_trips_at_every_level() {
        for level in 0..=3 {
            for flags in WRAPPERS {
                let c = compress_stream(b"z", level, flags, 0, 0).unwrap();
                assert_eq!(decode_independently(flags, &c), b"z");
                assert_eq!(decompress_stream(&c, flags, 0).unwrap(), b"z");
            }
        }
    }

    #[test]
    fn gzip_header_is_canonical() {
        let c = compress_stream(b"hello", 2, wrapper_ids::GZIP, 0, 0).unwrap();
        assert_eq!(&c[..4], &[0x1f, 0x8b, 0x08, 0x00]);
        assert_eq!(c[9], 0xff);
        let isize_le = u32::from_le_bytes(c[c.len() - 4..].try_into().unwrap());
        assert_eq!(isize_le, 5);
    }

    #[test]
    fn multi_megabyte_payloads_round_trip() {
        let payloads = [random_bytes(2 * 1024 * 1024 + 17, 7), text(3 * 1024 * 1024)];
        for data in &payloads {
            for flags in WRAPPERS {
                let c = compress_stream(data, 1, flags, MemoryProfile::Large as u8, 0).unwrap();
                assert_eq!(&decode_independently(flags, &c), data);
                assert_eq!(&decompress_stream(&c, flags, 0).unwrap(), data);
                if flags != wrapper_ids::DEFLATE {
                    assert_eq!(&decompress_stream(&c, wrapper_ids::AUTO, 0).unwrap(), data);
                }
            }
        }
    }

    #[test]
    fn highly_compressible_input_shrinks() {
        let data = vec![0u8; 1 << 20];
        let c = compress_stream(&data, 3, wrapper_ids::ZLIB, 0, 0).unwrap();
        assert!(c.len() < data.len() / 100);
        assert_eq!(decompress_stream(&c, wrapper_ids::ZLIB, 0).unwrap(), data);
    }

    #[test]
    fn small_transfer_units_span_many_slices() {
        let data = text(100_000);
        let config = ApiConfig { transfer_unit: 777, ..ApiConfig::with_telemetry() };
        let out = compress_with(&data, &CompressParams::default(), &config).unwrap();
        let t = out.telemetry.unwrap();
        assert_eq!(t.slices, 100_000u64.div_ceil(777));
        assert_eq!(t.bytes_in, 100_000);
        assert_eq!(decode_independently(wrapper_ids::GZIP, &out.data), data);
    }

    #[test]
    fn tiny_initial_buffer_grows() {
        let data = random_bytes(50_000, 1);
        let config = ApiConfig { initial_buffer: 1, ..ApiConfig::with_telemetry() };
        let out = compress_with(&data, &CompressParams::default(), &config).unwrap();
        assert!(out.telemetry.unwrap().growth_events > 0);
        assert_eq!(decode_independently(wrapper_ids::GZIP, &out.data), data);
    }

    #[test]
    fn incompressible_input_hits_output_maximum() {
        let data = random_bytes(64 * 1024, 3);
        let config = ApiConfig::new(Some(16 * 1024), false);
        let err = compress_with(&data, &CompressParams::default(), &config).unwrap_err();
        assert_eq!(err, StreamError::BufferLimitExceeded { limit: 16 * 1024 });
        assert!(err.is_resource_exhaustion());
    }

    #[test]
    fn maximum_equal_to_initial_size_cannot_grow() {
        let data = random_bytes(8 * 1024, 11);
        let config = ApiConfig { initial_buffer: 1024, max_output: Some(1024), ..ApiConfig::default() };
        let err = compress_with(&data, &CompressParams::default(), &config).unwrap_err();
        assert_eq!(err, StreamError::BufferLimitExceeded { limit: 1024 });
    }

    #[test]
    fn unallocatable_initial_buffer_is_not_a_limit_error() {
        let config = ApiConfig { initial_buffer: usize::MAX, ..ApiConfig::default() };
        let err = compress_with(b"abc", &CompressParams::default(), &config).unwrap_err();
        assert_eq!(err, StreamError::AllocationFailed { requested: usize::MAX });
        assert!(err.is_resource_exhaustion());

        let c = compress_stream(b"abc", 1, wrapper_ids::ZLIB, 0, 0).unwrap();
        let err = decompress_with(&c, &DecompressParams::default(), &config).unwrap_err();
        assert!(matches!(err, StreamError::AllocationFailed { .. }));
    }

    #[test]
    fn output_maximum_smaller_than_initial_buffer() {
        let config = ApiConfig::new(Some(64), false);
        let out = compress_with(b"abc", &CompressParams::default(), &config).unwrap();
        assert!(out.data.len() <= 64);
        assert_eq!(decode_independently(wrapper_ids::GZIP, &out.data), b"abc");
    }

    #[test]
    fn invalid_level_is_a_configuration_error() {
        for level in [-1, 4, 100] {
            assert!(matches!(
                compress_stream(b"abc", level, wrapper_ids::GZIP, 0, 0),
                Err(StreamError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn unsupported_wrappers_are_invalid_parameters() {
        for flags in [wrapper_ids::GZIP_NO_HDR, wrapper_ids::ZLIB_NO_HDR, 9] {
            let err = compress_stream(b"abc", 1, flags, 0, 0).unwrap_err();
            assert_eq!(err.codec_code(), Some((Direction::Compress, -8)));
            assert_eq!(err.to_string(), "Error -8 Invalid parameter");
        }
    }

    #[test]
    fn window_bits_are_checked() {
        assert!(compress_stream(b"abc", 1, wrapper_ids::ZLIB, 0, 9).is_ok());
        let err = compress_stream(b"abc", 1, wrapper_ids::ZLIB, 0, 16).unwrap_err();
        assert_eq!(err.codec_code(), Some((Direction::Compress, -8)));
    }

    #[test]
    fn same_input_same_output() {
        let data = text(200_000);
        let a = compress_stream(&data, 2, wrapper_ids::GZIP, 3, 0).unwrap();
        let b = compress_stream(&data, 2, wrapper_ids::GZIP, 3, 0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn independent_streams_on_separate_threads() {
        let handles: Vec<_> = (0..4u64)
            .map(|seed| {
                std::thread::spawn(move || {
                    let data = random_bytes(200_000, seed);
                    let c = compress_stream(&data, (seed % 4) as i32, wrapper_ids::ZLIB, 0, 0).unwrap();
                    decompress_stream(&c, wrapper_ids::ZLIB, 0).unwrap() == data
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_round_trip(
            data in proptest::collection::vec(any::<u8>(), 0..4096),
            level in 0i32..=3,
            wrapper in 0usize..3,
            unit in 1usize..5000,
            initial in 1usize..512,
        ) {
            let flags = WRAPPERS[wrapper];
            let params = CompressParams { level, flags, profile: MemoryProfile::Minimal, window_bits: 0 };
            let config = ApiConfig { initial_buffer: initial, transfer_unit: unit, ..ApiConfig::default() };
            let c = compress_with(&data, &params, &config).unwrap();
            prop_assert_eq!(c.unused_input, 0);

            let d = decompress_with(&c.data, &DecompressParams { flags, window_bits: 0 }, &config).unwrap();
            prop_assert_eq!(d.data, data);
            prop_assert_eq!(d.unused_input, 0);
        }
    }
}
