/// Translations keyed by field name, owned by whoever resolves field
/// options. Untranslatable sources are cached as `None` as well.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<String, CachedQuery>,
}

#[derive(Debug, Clone)]
struct CachedQuery {
    source: String,
    options: TranslateOptions,
    query: Option<String>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached translation for `field` when it was produced from
    /// the same source and options, translating and storing it otherwise.
    pub fn get_or_translate(
        &mut self,
        field: &str,
        source: &str,
        options: &TranslateOptions,
    ) -> Option<String> {
        if let Some(entry) = self.entries.get(field) {
            if entry.source == source && &entry.options == options {
                return entry.query.clone();
            }
        }

        let query = translate_with_options(source, options)
            .ok()
            .map(|translation| translation.query);
        self.entries.insert(
            field.to_string(),
            CachedQuery {
                source: source.to_string(),
                options: options.clone(),
                query: query.clone(),
            },
        );
        query
    }

    pub fn invalidate(&mut self, field: &str) -> bool {
        self.entries.remove(field).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
