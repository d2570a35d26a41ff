use crate::{
    column::ColumnRegistry,
    default_sort::DefaultSort,
    directive::{self, OrderParams},
    order::{self, OrderClause},
};
use model::core::dialect::SqlDialect;
use query_builder::{
    build::select::{FromState, SelectBuilder},
    dialect::{self, Dialect},
};

/// Sorting configuration of one data table.
///
/// Immutable while serving requests; the nulls-last default can only be
/// changed through `&mut self`, i.e. during setup.
pub struct Datatable {
    registry: ColumnRegistry,
    default_sort: DefaultSort,
    dialect: Box<dyn Dialect>,
    nulls_last: bool,
}

impl Datatable {
    pub fn new(registry: ColumnRegistry, dialect: SqlDialect) -> Self {
        Self {
            registry,
            default_sort: DefaultSort::default(),
            dialect: dialect::for_kind(dialect),
            nulls_last: false,
        }
    }

    pub fn with_default_sort(mut self, default_sort: DefaultSort) -> Self {
        self.default_sort = default_sort;
        self
    }

    pub fn with_nulls_last(mut self, nulls_last: bool) -> Self {
        self.nulls_last = nulls_last;
        self
    }

    pub fn nulls_last(&self) -> bool {
        self.nulls_last
    }

    pub fn set_nulls_last(&mut self, nulls_last: bool) {
        self.nulls_last = nulls_last;
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn default_sort(&self) -> &DefaultSort {
        &self.default_sort
    }

    /// Builds the order clause for a request without applying it.
    pub fn order_clause(&self, params: &OrderParams) -> OrderClause<'_> {
        let directives = directive::parse(params.entries(), &self.registry);
        let resolved = order::resolve(&directives, &self.registry, self.nulls_last);
        OrderClause::build(resolved, self.dialect.as_ref())
    }

    /// Appends the request's sort terms to `query`. Invalid entries are
    /// ignored; with nothing valid the query comes back unchanged.
    pub fn sort_records(
        &self,
        query: SelectBuilder<FromState>,
        params: &OrderParams,
    ) -> SelectBuilder<FromState> {
        self.order_clause(params).apply(query)
    }

    /// Appends the table's default ordering after whatever `query` has.
    pub fn default_sort_records(
        &self,
        query: SelectBuilder<FromState>,
    ) -> SelectBuilder<FromState> {
        self.default_sort.apply(query)
    }
}
