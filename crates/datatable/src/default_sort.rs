use crate::column::ColumnSource;
use query_builder::{
    ast::common::OrderDir,
    build::select::{FromState, SelectBuilder},
};

/// The fixed ordering a table falls back to, applied after any ordering the
/// request asked for so results stay deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultSort {
    terms: Vec<(ColumnSource, OrderDir)>,
}

impl DefaultSort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, source: ColumnSource, direction: OrderDir) -> Self {
        self.terms.push((source, direction));
        self
    }

    pub fn terms(&self) -> &[(ColumnSource, OrderDir)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Appends the default terms. Terms already present are not deduplicated.
    pub fn apply(&self, query: SelectBuilder<FromState>) -> SelectBuilder<FromState> {
        self.terms.iter().fold(query, |query, (source, direction)| {
            query.order_by(source.to_expr(), Some(*direction))
        })
    }
}
