use acctthrive_core::EntropyPort;
use acctthrive_model::{ProgramConfig, ReferralCode, Timestamp, UserId, ValidationError};

pub const CODE_PREFIX_LEN: usize = 2;
pub const CODE_TIME_DIGITS: usize = 6;
pub const CODE_SUFFIX_LEN: usize = 3;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Builds `<prefix><time><suffix>`, upper-cased.
///
/// The prefix is the first two ASCII alphanumerics of the user id, the time
/// part is the last six digits of `now` in epoch milliseconds, and the
/// suffix is three base-36 characters drawn from `entropy`. Uniqueness is
/// best-effort only.
pub fn generate_code(
    user_id: &UserId,
    now: Timestamp,
    entropy: &mut impl EntropyPort,
) -> Result<ReferralCode, ValidationError> {
    let prefix: String = user_id
        .as_str()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(CODE_PREFIX_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let time = now.as_millis() % 10_u64.pow(CODE_TIME_DIGITS as u32);

    let mut draw = entropy.next_u32();
    let mut suffix = [0_u8; CODE_SUFFIX_LEN];
    for slot in &mut suffix {
        *slot = BASE36[(draw % 36) as usize];
        draw /= 36;
    }
    let suffix: String = suffix.iter().map(|&b| char::from(b)).collect();

    ReferralCode::parse(&format!(
        "{prefix}{time:0width$}{suffix}",
        width = CODE_TIME_DIGITS
    ))
}

#[must_use]
pub fn generate_link(config: &ProgramConfig, code: &ReferralCode) -> String {
    config.share_link(code)
}
