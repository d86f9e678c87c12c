use apidiff_core::config::ReportOptions;
use apidiff_core::model::{Api, ApiId, ApiMap, ApiSet, ElementKey, Item, Symbol, SymbolKind};
use apidiff_core::report::{MemoryWriter, PageRegistry, ReportContext};

/// An API set of `n` instances named `v1`..`vn`
#[allow(dead_code)]
pub fn apis(n: usize) -> ApiSet {
    ApiSet::new(
        (1..=n)
            .map(|i| Api::new(format!("v{}", i), format!("Version {}", i)))
            .collect(),
    )
    .unwrap()
}

/// A registry writing into memory, with default options
#[allow(dead_code)]
pub fn registry(n: usize) -> PageRegistry<MemoryWriter> {
    registry_with(n, ReportOptions::default())
}

#[allow(dead_code)]
pub fn registry_with(n: usize, options: ReportOptions) -> PageRegistry<MemoryWriter> {
    PageRegistry::new(ReportContext::new(apis(n), options), MemoryWriter::new())
}

#[allow(dead_code)]
pub fn util() -> ElementKey {
    ElementKey::package(None, "java.util")
}

#[allow(dead_code)]
pub fn list() -> ElementKey {
    ElementKey::type_in(util(), "List")
}

/// The same symbol in every instance listed in `ids`
#[allow(dead_code)]
pub fn symbol_in(ids: &[usize], kind: SymbolKind, name: &str, signature: &str) -> ApiMap<Item> {
    ids.iter()
        .map(|&i| (ApiId(i), Item::Symbol(Symbol::new(kind, name, signature))))
        .collect()
}

/// One string value per instance, keyed by instance index
#[allow(dead_code)]
pub fn texts(values: &[(usize, &str)]) -> ApiMap<String> {
    values
        .iter()
        .map(|&(i, text)| (ApiId(i), text.to_string()))
        .collect()
}
