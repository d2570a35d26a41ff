//! Turns data table sort requests into `ORDER BY` terms on a
//! [`SelectBuilder`](query_builder::build::select::SelectBuilder).

pub mod column;
pub mod config;
pub mod datatable;
pub mod default_sort;
pub mod directive;
pub mod error;
pub mod order;

pub use crate::{
    column::{ColumnDefinition, ColumnRegistry, ColumnSource},
    config::TableConfig,
    datatable::Datatable,
    default_sort::DefaultSort,
    directive::{OrderDirective, OrderParams, RawOrderEntry},
    error::DatatableError,
    order::{OrderClause, ResolvedOrder},
};

#[cfg(test)]
pub(crate) mod test_util;
