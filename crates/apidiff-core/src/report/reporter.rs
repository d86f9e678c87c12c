use std::collections::BTreeSet;

use crate::errors::Result;
use crate::model::{ApiId, ApiMap, DocFile, FacetMap, Item, Position};

/// Callback protocol between a Symbol Provider and the report engine
///
/// Events arrive depth first with children before their parents. Every
/// method returns the fatal channel only: a returned error aborts the run.
pub trait Reporter {
    /// Register the per-instance values of a position
    ///
    /// # Errors
    ///
    /// `DuplicatePosition` when the position was already registered.
    fn comparing(&mut self, position: &Position, values: ApiMap<Item>) -> Result<()>;

    /// Signal that a position and everything beneath it has been compared
    ///
    /// # Errors
    ///
    /// Fails when the position cannot be routed or its page was rendered.
    fn completed(&mut self, position: &Position, equal: bool) -> Result<()>;

    /// # Errors
    ///
    /// Fails when the position cannot be routed or its page was rendered.
    fn report_missing(&mut self, position: &Position, missing: &BTreeSet<ApiId>) -> Result<()>;

    /// Register facet values that differ between instances
    ///
    /// # Errors
    ///
    /// Fails when the position cannot be routed or its page was rendered.
    fn report_different(&mut self, position: &Position, values: FacetMap) -> Result<()>;

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_modifiers(
        &mut self,
        position: &Position,
        values: ApiMap<Vec<String>>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::Modifiers(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_kinds(&mut self, position: &Position, values: ApiMap<String>) -> Result<()> {
        self.report_different(position, FacetMap::Kinds(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_types(&mut self, position: &Position, values: ApiMap<String>) -> Result<()> {
        self.report_different(position, FacetMap::Types(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_thrown_types(
        &mut self,
        position: &Position,
        values: ApiMap<Vec<String>>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::ThrownTypes(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_superinterfaces(
        &mut self,
        position: &Position,
        values: ApiMap<Vec<String>>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::Superinterfaces(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_permitted_subclasses(
        &mut self,
        position: &Position,
        values: ApiMap<Vec<String>>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::PermittedSubclasses(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_annotations(
        &mut self,
        position: &Position,
        values: ApiMap<String>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::Annotations(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_annotation_values(
        &mut self,
        position: &Position,
        values: ApiMap<String>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::AnnotationValues(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_directives(
        &mut self,
        position: &Position,
        values: ApiMap<String>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::Directives(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_raw_doc_comments(
        &mut self,
        position: &Position,
        values: ApiMap<String>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::RawDocComments(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_api_descriptions(
        &mut self,
        position: &Position,
        values: ApiMap<String>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::ApiDescriptions(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_doc_files(
        &mut self,
        position: &Position,
        values: ApiMap<DocFile>,
    ) -> Result<()> {
        self.report_different(position, FacetMap::DocFiles(values))
    }

    /// # Errors
    ///
    /// See [`Reporter::report_different`].
    fn report_different_values(&mut self, position: &Position, values: ApiMap<String>) -> Result<()> {
        self.report_different(position, FacetMap::Values(values))
    }

    /// End of the run: render the root index and the run-wide resources
    ///
    /// # Errors
    ///
    /// `RunAlreadyFinished` on a second call; `InvalidInput` when a page was
    /// never completed; `Io` when a file cannot be written.
    fn finish(&mut self, all_equal: bool) -> Result<()>;
}
