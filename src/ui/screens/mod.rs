pub(crate) mod form;
pub(crate) mod overview;
pub(crate) mod transactions;
