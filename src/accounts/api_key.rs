use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

pub const API_KEY_LEN: usize = 40;

/// Fresh bearer token drawn from the OS CSPRNG.
pub fn generate_api_key() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(API_KEY_LEN)
        .map(char::from)
        .collect()
}
