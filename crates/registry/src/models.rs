use anyhow::{Context, Result};
use fleetdeck_types::ProviderSchema;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::config::RegistryConfig;

/// Manifest document wrapping an ordered provider list.
#[derive(Debug, Clone, Default, serde::Serialize, Deserialize)]
struct ProviderManifest {
    #[serde(default)]
    providers: Vec<ProviderSchema>,
}

const EMBEDDED_MANIFEST: &str = include_str!("../manifest/providers.json");

/// The read-only catalog of credential provider schemas.
///
/// Loaded once at process start from the embedded manifest, optionally
/// extended by operator-authored catalog files, and never mutated
/// afterwards. Insertion order is the canonical picker order.
#[derive(Debug, Clone, Default, serde::Serialize, Deserialize)]
pub struct ProviderRegistry {
    providers: IndexMap<String, ProviderSchema>,
}

impl ProviderRegistry {
    /// Loads the catalog that ships embedded in the binary.
    pub fn from_embedded_manifest() -> Result<Self> {
        let manifest: ProviderManifest =
            serde_json::from_str(EMBEDDED_MANIFEST).context("parse embedded provider manifest")?;
        let mut registry = Self::default();
        registry.extend(manifest.providers);
        Ok(registry)
    }

    /// Loads the embedded catalog plus any operator catalogs named by the
    /// registry configuration.
    ///
    /// An unreadable or malformed operator catalog is skipped with a
    /// warning; catalog problems never prevent startup. Operator entries
    /// override embedded entries with the same kind while keeping the
    /// original catalog position.
    pub fn from_config() -> Result<Self> {
        let config = RegistryConfig::load();
        let mut registry = Self::from_embedded_manifest()?;

        for path in config.catalog_paths() {
            match load_catalog_file(&path) {
                Ok(providers) => registry.extend(providers),
                Err(error) => {
                    warn!(path = %path.display(), %error, "skipping unreadable provider catalog");
                }
            }
        }

        Ok(registry)
    }

    /// Looks up a provider schema by its kind key.
    pub fn lookup(&self, kind: &str) -> Option<&ProviderSchema> {
        self.providers.get(kind)
    }

    /// Iterates providers in catalog order.
    pub fn providers(&self) -> impl Iterator<Item = &ProviderSchema> {
        self.providers.values()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn extend(&mut self, providers: Vec<ProviderSchema>) {
        for provider in providers {
            self.providers.insert(provider.kind.clone(), provider);
        }
    }
}

/// Reads one operator catalog file, accepting YAML or JSON.
fn load_catalog_file(path: &Path) -> Result<Vec<ProviderSchema>> {
    let content = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let manifest: ProviderManifest =
        serde_yaml::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
    Ok(manifest.providers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetdeck_types::FieldKind;
    use std::io::Write;

    #[test]
    fn embedded_manifest_non_empty_and_unique_kinds() {
        let registry = ProviderRegistry::from_embedded_manifest().expect("load embedded manifest");
        assert!(!registry.is_empty(), "embedded catalog should not be empty");

        let mut seen = std::collections::HashSet::new();
        for provider in registry.providers() {
            assert!(seen.insert(provider.kind.clone()), "duplicate kind: {}", provider.kind);
            assert!(!provider.display_name.is_empty());

            let mut field_names = std::collections::HashSet::new();
            for field in &provider.fields {
                assert!(
                    field_names.insert(field.name.clone()),
                    "duplicate field '{}' in '{}'",
                    field.name,
                    provider.kind
                );
            }
        }
    }

    #[test]
    fn lookup_finds_known_provider_with_ordered_fields() {
        let registry = ProviderRegistry::from_embedded_manifest().expect("load embedded manifest");
        let smtp = registry.lookup("smtp").expect("smtp provider");
        let names: Vec<&str> = smtp.field_names().collect();
        assert_eq!(names, vec!["host", "username", "password", "from_email"]);
        assert_eq!(smtp.field("from_email").map(|f| f.kind), Some(FieldKind::Email));
        assert!(registry.lookup("nonexistent").is_none());
    }

    #[test]
    fn operator_catalog_overrides_by_kind() {
        let mut registry = ProviderRegistry::from_embedded_manifest().expect("load embedded manifest");
        let original_position = registry.providers().position(|p| p.kind == "github").expect("github present");

        registry.extend(vec![ProviderSchema {
            kind: "github".to_string(),
            display_name: "GitHub Enterprise".to_string(),
            fields: vec![],
        }]);

        let replaced = registry.lookup("github").expect("github still present");
        assert_eq!(replaced.display_name, "GitHub Enterprise");
        let new_position = registry.providers().position(|p| p.kind == "github").expect("github present");
        assert_eq!(new_position, original_position, "override keeps catalog position");
    }

    #[test]
    fn malformed_catalog_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp catalog");
        writeln!(file, "providers: [ {{ not valid").expect("write catalog");
        assert!(load_catalog_file(file.path()).is_err());
    }

    #[test]
    fn yaml_catalog_file_parses() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp catalog");
        writeln!(
            file,
            r#"
providers:
  - kind: notion
    display_name: Notion
    fields:
      - {{ name: integration_token, label: Integration Token, type: password, required: true, sensitive: true }}
"#
        )
        .expect("write catalog");
        let providers = load_catalog_file(file.path()).expect("parse yaml catalog");
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].kind, "notion");
    }
}
