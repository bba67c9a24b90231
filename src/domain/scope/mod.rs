//! Scopes in use across the environment.

#[cfg(feature = "http")]
pub mod client;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeDefinition {
    pub scope: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ResourceListOf;

    #[test]
    fn test_scope_list_decode() {
        let list: ResourceListOf<ScopeDefinition> =
            serde_json::from_str(r#"{"values":[{"scope":"finbourne"},{"scope":"default"}]}"#)
                .unwrap();
        let scopes: Vec<_> = list.values.iter().map(|s| s.scope.as_str()).collect();
        assert_eq!(scopes, vec!["finbourne", "default"]);
    }
}
