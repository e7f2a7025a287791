//! Login credentials and the eligibility rule derived from them.

/// A username/password pair for the ERP. Never persisted; the identifier
/// is upper-cased once at construction, which is how the ERP expects it.
#[derive(Clone, Debug)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    pub fn new(identifier: &str, secret: &str) -> Self {
        Self {
            identifier: identifier.trim().to_uppercase(),
            secret: secret.to_string(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Whether this identifier falls under the condonation scheme.
    ///
    /// Roll numbers look like `VA24CS042`: a two-letter campus code, the
    /// admission-year digits, then the rest of the roll. A student is
    /// eligible when the digits right after the campus code parse and are
    /// at or above `batch_threshold`. Anything not matching that pattern
    /// is ineligible.
    pub fn condonation_eligible(&self, batch_threshold: u32) -> bool {
        let mut chars = self.identifier.chars();
        let prefix_alphabetic = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        if !prefix_alphabetic {
            return false;
        }

        let digits: String = chars.take_while(|c| c.is_ascii_digit()).collect();
        match digits.parse::<u32>() {
            Ok(batch) => batch >= batch_threshold,
            Err(_) => false,
        }
    }
}
