#[cfg(test)]
mod tests {
    use num_enum::TryFromPrimitive;

    use deflate_core::compression::{message_for, translate, CompressStatus, DecompressStatus};
    use deflate_core::types::{Direction, StreamError};

    #[test]
    fn ok_translates_to_none_both_ways() {
        assert!(translate(0, Direction::Compress).is_none());
        assert!(translate(0, Direction::Decompress).is_none());
    }

    #[test]
    fn compress_table() {
        let cases = [
            (-1, "Not enough room in output buffer"),
            (-3, "Invalid state"),
            (-4, "Invalid compression level."),
            (-5, "Level buffer too small."),
            (-7, "Invalid flush type"),
            (-8, "Invalid parameter"),
            (-9, "Invalid operation"),
        ];
        for (code, msg) in cases {
            assert!(CompressStatus::try_from_primitive(code).is_ok());
            assert_eq!(message_for(code, Direction::Compress), Some(msg));
        }
    }

    #[test]
    fn decompress_table() {
        let cases = [
            (1, "End of input reached"),
            (2, "End of output reached"),
            (3, "End of gzip name buffer reached"),
            (4, "End of gzip comment buffer reached"),
            (5, "End of extra buffer reached"),
            (6, "Dictionary needed to continue"),
            (-1, "Invalid deflate block found"),
            (-2, "Invalid deflate symbol found"),
            (-3, "Invalid lookback distance found"),
            (-4, "Invalid gzip/zlib wrapper found"),
            (-5, "Gzip/zlib wrapper specifies unsupported compress method"),
            (-6, "Incorrect checksum found"),
        ];
        for (code, msg) in cases {
            assert!(DecompressStatus::try_from_primitive(code).is_ok());
            assert_eq!(message_for(code, Direction::Decompress), Some(msg));
        }
    }

    #[test]
    fn directions_are_never_cross_translated() {
        // -5 exists on both sides with unrelated meanings
        let c = translate(-5, Direction::Compress).unwrap();
        let d = translate(-5, Direction::Decompress).unwrap();
        assert_ne!(c, d);
        assert_eq!(c.codec_code(), Some((Direction::Compress, -5)));
        assert_eq!(d.codec_code(), Some((Direction::Decompress, -5)));
        // 1 only exists for decompression
        assert_eq!(message_for(1, Direction::Compress), Some("Unknown Error"));
    }

    #[test]
    fn unknown_codes_keep_raw_value() {
        let err = translate(-99, Direction::Decompress).unwrap();
        assert_eq!(
            err,
            StreamError::CodecFault { code: -99, direction: Direction::Decompress, message: "Unknown error" }
        );
        assert_eq!(err.to_string(), "Error -99 Unknown error");
        assert!(!err.is_resource_exhaustion());
    }
}
