/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at counter-desk scale)
///
/// Every persisted row (bookings, promotions, credit entries, ...) gets its
/// id from here so ids stay sortable by creation time.
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Generate a short human-readable code like `BK-K3J9XA1F2` or `GRP-K3J9X04BC`.
///
/// Last 5 digits of the base-36 timestamp + 4 random hex digits, uppercased.
/// Staff read these over the counter, so they stay short and unambiguous;
/// uniqueness is enforced by the database, not by this function.
pub fn generate_code(prefix: &str) -> String {
    use rand::Rng;

    let mut ts = now_millis() as u64;
    let mut base36 = [0u8; 13];
    let mut i = base36.len();
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    loop {
        i -= 1;
        base36[i] = DIGITS[(ts % 36) as usize];
        ts /= 36;
        if ts == 0 {
            break;
        }
    }
    let encoded = &base36[i..];
    let tail_start = encoded.len().saturating_sub(5);
    let tail = std::str::from_utf8(&encoded[tail_start..]).unwrap_or("00000");

    let random: u32 = rand::thread_rng().gen_range(0..0x100_0000);
    let random_part = format!("{random:06X}");

    format!("{prefix}-{tail}{}", &random_part[..4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_ids_are_positive_and_time_ordered() {
        let a = snowflake_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = snowflake_id();
        assert!(a > 0);
        assert!(b > a);
    }

    #[test]
    fn snowflake_fits_js_safe_integer() {
        let id = snowflake_id();
        assert!(id < (1_i64 << 53));
    }

    #[test]
    fn generated_codes_carry_prefix_and_fixed_length() {
        let code = generate_code("BK");
        assert!(code.starts_with("BK-"));
        assert_eq!(code.len(), "BK-".len() + 9);
        assert!(code[3..].chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
