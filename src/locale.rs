//! Localized text resolution for storefront UI strings.

use anyhow::{Result, bail};
use std::collections::HashMap;
use tracing::debug;

/// Language code used when no explicit selection is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Named arguments for formatter-backed catalog entries.
///
/// Lookups for an argument the caller did not supply return the raw
/// `{name}` placeholder, so formatters always produce a displayable
/// string instead of panicking.
#[derive(Debug, Default, Clone)]
pub struct MessageArgs {
    values: HashMap<String, String>,
}

impl MessageArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> String {
        self.values
            .get(name)
            .cloned()
            .unwrap_or_else(|| format!("{{{name}}}"))
    }
}

/// A single catalog entry: either a literal string or a formatting
/// function over [`MessageArgs`].
#[derive(Clone)]
pub enum CatalogEntry {
    Literal(&'static str),
    Formatted(fn(&MessageArgs) -> String),
}

/// All key/entry mappings for one language.
pub type Catalog = HashMap<&'static str, CatalogEntry>;

fn english() -> Catalog {
    use CatalogEntry::{Formatted, Literal};
    HashMap::from([
        ("back", Literal("Back")),
        ("save", Literal("Save")),
        ("cancel", Literal("Cancel")),
        ("addProduct", Literal("Add product")),
        ("price", Literal("Price")),
        ("currency", Literal("Currency")),
        ("loading", Literal("Loading...")),
        ("noResults", Literal("No results found")),
        (
            "lastCheckedOn",
            Formatted(|args: &MessageArgs| format!("Last checked on {}", args.get("date"))),
        ),
        (
            "itemsInCart",
            Formatted(|args: &MessageArgs| format!("{} items in your cart", args.get("count"))),
        ),
        (
            "greeting",
            Formatted(|args: &MessageArgs| format!("Hello, {}!", args.get("name"))),
        ),
    ])
}

fn spanish() -> Catalog {
    use CatalogEntry::{Formatted, Literal};
    HashMap::from([
        ("back", Literal("Atrás")),
        ("save", Literal("Guardar")),
        ("cancel", Literal("Cancelar")),
        ("addProduct", Literal("Añadir producto")),
        ("price", Literal("Precio")),
        ("currency", Literal("Moneda")),
        ("loading", Literal("Cargando...")),
        ("noResults", Literal("No se encontraron resultados")),
        (
            "lastCheckedOn",
            Formatted(|args: &MessageArgs| {
                format!("Última verificación el {}", args.get("date"))
            }),
        ),
        (
            "itemsInCart",
            Formatted(|args: &MessageArgs| {
                format!("{} artículos en tu carrito", args.get("count"))
            }),
        ),
        (
            "greeting",
            Formatted(|args: &MessageArgs| format!("¡Hola, {}!", args.get("name"))),
        ),
    ])
}

fn supported_catalogs() -> HashMap<&'static str, Catalog> {
    HashMap::from([("en", english()), ("es", spanish())])
}

/// Owns the active language selection and the catalog set for one
/// session. Resolution is a pure function of the current state; the
/// only mutation is an explicit [`LocaleContext::set_language`] call.
pub struct LocaleContext {
    language: String,
    catalogs: HashMap<&'static str, Catalog>,
}

impl LocaleContext {
    /// Creates a context for `language`. Unknown language codes are an
    /// explicit error rather than a silent fallback. Every catalog must
    /// cover the same key set; a partial catalog is a data-integrity
    /// defect and fails construction.
    pub fn new(language: &str) -> Result<Self> {
        let catalogs = supported_catalogs();
        verify_complete(&catalogs)?;
        if !catalogs.contains_key(language) {
            bail!("Unsupported language code: {language}");
        }
        Ok(LocaleContext {
            language: language.to_string(),
            catalogs,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Switches the active language. Takes effect for all subsequent
    /// resolutions; on error the previous selection is retained.
    pub fn set_language(&mut self, language: &str) -> Result<()> {
        if !self.catalogs.contains_key(language) {
            bail!("Unsupported language code: {language}");
        }
        self.language = language.to_string();
        Ok(())
    }

    /// Resolves `key` without formatter arguments.
    pub fn resolve(&self, key: &str) -> String {
        self.resolve_with(key, &MessageArgs::new())
    }

    /// Resolves `key` in the current language. A missing key resolves
    /// to the key itself so callers always get something displayable.
    pub fn resolve_with(&self, key: &str, args: &MessageArgs) -> String {
        let Some(catalog) = self.catalogs.get(self.language.as_str()) else {
            return key.to_string();
        };
        match catalog.get(key) {
            Some(CatalogEntry::Literal(text)) => (*text).to_string(),
            Some(CatalogEntry::Formatted(format)) => format(args),
            None => {
                debug!("Missing translation key '{key}', returning key as-is");
                key.to_string()
            }
        }
    }
}

fn verify_complete(catalogs: &HashMap<&'static str, Catalog>) -> Result<()> {
    let mut languages = catalogs.iter();
    let Some((first_language, first_catalog)) = languages.next() else {
        bail!("No locale catalogs registered");
    };

    for (language, catalog) in languages {
        for key in first_catalog.keys() {
            if !catalog.contains_key(key) {
                bail!("Locale catalog '{language}' is missing key '{key}'");
            }
        }
        for key in catalog.keys() {
            if !first_catalog.contains_key(key) {
                bail!("Locale catalog '{first_language}' is missing key '{key}'");
            }
        }
    }
    Ok(())
}
