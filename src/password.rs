use std::fmt;

use rand::Rng;

use crate::error::Error;

pub const DEFAULT_LENGTH: i64 = 12;

/// ASCII letters, digits and punctuation.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password(<{} chars>)", self.0.len())
    }
}

/// Validate a length as given on the command line.
pub fn password_length(raw: i64) -> Result<usize, Error> {
    match usize::try_from(raw) {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidArgument(format!(
            "password length must be positive, got {raw}"
        ))),
    }
}

pub fn generate_password(length: usize) -> Result<Password, Error> {
    if length == 0 {
        return Err(Error::InvalidArgument(
            "password length must be positive, got 0".to_string(),
        ));
    }
    // thread rng is a CSPRNG seeded from the OS
    let mut rng = rand::rng();
    let password = (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    Ok(Password(password))
}
