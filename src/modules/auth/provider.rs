use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value {
            "ADMIN" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::Admin => String::from("ADMIN"),
            Role::User => String::from("USER"),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct Identity {
    pub user_id: String,
    pub role: Role,
}

/// Resolves a bearer token to an authenticated identity. Stands in for the
/// blog platform's session service, which lives outside this repository.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> Option<Identity>;
}

/// Static token table parsed from the `AUTH_TOKENS` environment variable.
/// Entries are comma-separated `token=user_id` or `token=user_id:ADMIN`.
pub struct StaticTokens {
    tokens: HashMap<String, Identity>,
}

impl StaticTokens {
    pub fn parse(raw: &str) -> Self {
        let mut tokens = HashMap::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((token, target)) = entry.split_once('=') else {
                tracing::warn!("Ignoring malformed AUTH_TOKENS entry: {}", entry);
                continue;
            };

            let (user_id, role) = match target.split_once(':') {
                Some((user_id, role)) => (user_id, Role::from(role)),
                None => (target, Role::User),
            };

            if token.is_empty() || user_id.is_empty() {
                tracing::warn!("Ignoring malformed AUTH_TOKENS entry: {}", entry);
                continue;
            }

            tokens.insert(
                token.to_string(),
                Identity {
                    user_id: user_id.to_string(),
                    role,
                },
            );
        }

        Self { tokens }
    }
}

#[async_trait]
impl IdentityProvider for StaticTokens {
    async fn resolve(&self, token: &str) -> Option<Identity> {
        self.tokens.get(token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parses_user_and_admin_entries() {
        let provider = StaticTokens::parse("t1=alice,t2=root:ADMIN, t3=bob:USER");

        let alice = provider.resolve("t1").await.unwrap();
        assert_eq!(alice.user_id, "alice");
        assert_eq!(alice.role, Role::User);

        let root = provider.resolve("t2").await.unwrap();
        assert_eq!(root.user_id, "root");
        assert_eq!(root.role, Role::Admin);

        let bob = provider.resolve("t3").await.unwrap();
        assert_eq!(bob.role, Role::User);
    }

    #[tokio::test]
    async fn skips_malformed_entries_and_unknown_tokens() {
        let provider = StaticTokens::parse("garbage,=nobody,t1=alice");

        assert!(provider.resolve("garbage").await.is_none());
        assert!(provider.resolve("").await.is_none());
        assert!(provider.resolve("t1").await.is_some());
    }
}
