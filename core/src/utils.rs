use std::fmt;
use num_enum::TryFromPrimitive;

/// Running CRC-32 as used by the gzip trailer and header CRC16.
pub fn compute_crc32(data: &[u8]) -> u32 {
    use crc32fast::Hasher;
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::MemoryProfile;

    #[test]
    fn crc32_of_known_vector() {
        assert_eq!(compute_crc32(b"123456789"), 0xCBF4_3926);
        assert_eq!(compute_crc32(b""), 0);
    }

    #[test]
    fn enum_name_or_hex_formats_both_ways() {
        assert_eq!(enum_name_or_hex::<MemoryProfile>(2), "Small");
        assert_eq!(enum_name_or_hex::<MemoryProfile>(0x2a), "0x2a");
    }
}
